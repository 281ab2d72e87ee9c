use std::collections::HashMap;

use log::debug;

use crate::image_pipeline::common::error::{PipelineError, Result};
use crate::image_pipeline::format::types::{FourCc, PixelFormat, SubdeviceMode};
use crate::image_pipeline::unpack::{luma, split, subrect, yuy2};

/// A pixel codec: writes the mode's output streams into `dest` from one
/// raw frame in `source`.
pub type UnpackFn = fn(dest: &mut [&mut [u8]], source: &[u8], mode: &SubdeviceMode);

/// Dispatch table mapping `(fourcc, output formats)` tuples to codecs.
///
/// The registry is built once per device configuration; lookups on the
/// frame path are a single hash probe.
#[derive(Debug, Clone)]
pub struct UnpackerRegistry {
    entries: HashMap<(FourCc, Vec<PixelFormat>), UnpackFn>,
}

impl UnpackerRegistry {
    /// An empty registry; callers register their own codec set.
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// The standard codec set for the supported sensors.
    pub fn with_defaults() -> Self {
        use PixelFormat::*;

        let defaults: &[(FourCc, &[PixelFormat], UnpackFn)] = &[
            (FourCc::Yuy2, &[Yuyv], subrect::unpack_subrect),
            (FourCc::Yuy2, &[Rgb8], yuy2::unpack_rgb_from_yuy2),
            (FourCc::Yuy2, &[Bgr8], yuy2::unpack_bgr_from_yuy2),
            (FourCc::Yuy2, &[Rgba8], yuy2::unpack_rgba_from_yuy2),
            (FourCc::Yuy2, &[Bgra8], yuy2::unpack_bgra_from_yuy2),
            (FourCc::Z16, &[Z16], subrect::unpack_subrect),
            (FourCc::Invr, &[Z16], subrect::unpack_subrect),
            (FourCc::Invz, &[Z16], subrect::unpack_subrect),
            (FourCc::Y8, &[Y8], subrect::unpack_subrect),
            (FourCc::Invi, &[Y8], subrect::unpack_subrect),
            (FourCc::Y8, &[Y16], luma::unpack_y16_from_y8),
            // Native Y16 frames carry 10 significant bits.
            (FourCc::Y16, &[Y16], luma::unpack_y16_from_y16_10),
            (FourCc::Y8i, &[Y8, Y8], split::unpack_y8_y8_from_y8i),
            (FourCc::Y12i, &[Y16, Y16], split::unpack_y16_y16_from_y12i),
            (FourCc::Inri, &[Z16, Y8], split::unpack_z16_y8_from_inri),
            (FourCc::Inri, &[Z16, Y16], split::unpack_z16_y16_from_inri),
        ];

        let mut entries = HashMap::with_capacity(defaults.len());
        for &(fourcc, outputs, unpack) in defaults {
            entries.insert((fourcc, outputs.to_vec()), unpack);
        }
        debug!("unpacker registry initialized with {} codecs", entries.len());
        Self { entries }
    }

    /// Register a codec for a `(fourcc, outputs)` tuple. Duplicate
    /// registrations are rejected.
    pub fn register(
        &mut self,
        fourcc: FourCc,
        outputs: &[PixelFormat],
        unpack: UnpackFn,
    ) -> Result<()> {
        let key = (fourcc, outputs.to_vec());
        if self.entries.contains_key(&key) {
            return Err(PipelineError::UnsupportedFormat(format!(
                "duplicate unpacker registration for {} -> {}",
                fourcc,
                format_list(outputs)
            )));
        }
        self.entries.insert(key, unpack);
        Ok(())
    }

    /// Look up the codec for a mode's `(fourcc, outputs)` tuple.
    pub fn find(&self, mode: &SubdeviceMode) -> Result<UnpackFn> {
        let outputs: Vec<PixelFormat> = mode.streams.iter().map(|s| s.format).collect();
        self.entries
            .get(&(mode.fourcc, outputs))
            .copied()
            .ok_or_else(|| {
                PipelineError::UnsupportedFormat(format!(
                    "no unpacker for {} -> {}",
                    mode.fourcc,
                    format_list(&mode.streams.iter().map(|s| s.format).collect::<Vec<_>>())
                ))
            })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for UnpackerRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

fn format_list(formats: &[PixelFormat]) -> String {
    formats
        .iter()
        .map(|f| f.to_string())
        .collect::<Vec<_>>()
        .join("+")
}
