use tracing::{debug, info_span, instrument};

use crate::image_pipeline::common::error::{PipelineError, Result};
use crate::image_pipeline::common::timing::{PipelineTimings, Timer};
use crate::image_pipeline::format::size::{frame_size, plane_size};
use crate::image_pipeline::format::types::SubdeviceMode;
use crate::image_pipeline::unpack::UnpackerRegistry;

/// Knobs for the decode path.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Validate the subdevice mode and buffer sizes before dispatching.
    /// Leave enabled unless the caller has already validated the mode once
    /// per configuration and profiling shows the checks matter.
    pub validate_modes: bool,
    /// Reject frames wider or taller than this.
    pub max_dimension: Option<usize>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            validate_modes: true,
            max_dimension: Some(16_384),
        }
    }
}

impl PipelineConfig {
    pub fn builder() -> PipelineConfigBuilder {
        PipelineConfigBuilder::default()
    }
}

#[derive(Default)]
pub struct PipelineConfigBuilder {
    validate_modes: Option<bool>,
    max_dimension: Option<Option<usize>>,
}

impl PipelineConfigBuilder {
    pub fn validate_modes(mut self, validate: bool) -> Self {
        self.validate_modes = Some(validate);
        self
    }

    pub fn max_dimension(mut self, max: Option<usize>) -> Self {
        self.max_dimension = Some(max);
        self
    }

    pub fn build(self) -> PipelineConfig {
        let default = PipelineConfig::default();
        PipelineConfig {
            validate_modes: self.validate_modes.unwrap_or(default.validate_modes),
            max_dimension: self.max_dimension.unwrap_or(default.max_dimension),
        }
    }
}

/// Decode orchestrator: owns the codec registry and the validation gate in
/// front of it.
pub struct FramePipeline {
    registry: UnpackerRegistry,
    config: PipelineConfig,
}

impl FramePipeline {
    /// A pipeline with the standard codec set.
    pub fn new(config: PipelineConfig) -> Self {
        Self {
            registry: UnpackerRegistry::with_defaults(),
            config,
        }
    }

    /// A pipeline with a caller-assembled codec set.
    pub fn with_registry(registry: UnpackerRegistry, config: PipelineConfig) -> Self {
        Self { registry, config }
    }

    fn validate(&self, source: &[u8], mode: &SubdeviceMode, dest: &[&mut [u8]]) -> Result<()> {
        if self.config.validate_modes {
            mode.validate()?;
            if let Some(max) = self.config.max_dimension {
                if mode.width > max || mode.height > max {
                    return Err(PipelineError::BadGeometry(format!(
                        "frame {}x{} exceeds maximum dimension {}",
                        mode.width, mode.height, max
                    )));
                }
            }
        }

        let needed = frame_size(mode.width, mode.height, mode.fourcc)?;
        if source.len() < needed {
            return Err(PipelineError::BadGeometry(format!(
                "source buffer holds {} bytes, frame needs {}",
                source.len(),
                needed
            )));
        }
        if dest.len() != mode.streams.len() {
            return Err(PipelineError::BadGeometry(format!(
                "mode declares {} output streams, got {} destination planes",
                mode.streams.len(),
                dest.len()
            )));
        }
        for (plane, stream) in dest.iter().zip(&mode.streams) {
            let needed = plane_size(stream.width, stream.height, stream.format)?;
            if plane.len() < needed {
                return Err(PipelineError::BadGeometry(format!(
                    "destination plane holds {} bytes, {} stream needs {}",
                    plane.len(),
                    stream.format,
                    needed
                )));
            }
        }
        Ok(())
    }

    /// Decode one raw frame into the mode's output planes.
    #[instrument(skip_all, fields(fourcc = %mode.fourcc, width = mode.width, height = mode.height))]
    pub fn decode(
        &self,
        source: &[u8],
        mode: &SubdeviceMode,
        dest: &mut [&mut [u8]],
    ) -> Result<()> {
        {
            let _span = info_span!("validate_mode").entered();
            self.validate(source, mode, dest)?;
        }

        let unpack = self.registry.find(mode)?;

        {
            let _span = info_span!("unpack").entered();
            unpack(dest, source, mode);
        }

        debug!(streams = mode.streams.len(), "frame decoded");
        Ok(())
    }

    /// Decode one raw frame and report how long each step took.
    pub fn decode_with_timings(
        &self,
        source: &[u8],
        mode: &SubdeviceMode,
        dest: &mut [&mut [u8]],
    ) -> Result<PipelineTimings> {
        let mut timings = PipelineTimings::new();

        let timer = Timer::start("validate_mode");
        self.validate(source, mode, dest)?;
        let (name, duration) = timer.stop();
        timings.add_step(name, duration);

        let timer = Timer::start("find_unpacker");
        let unpack = self.registry.find(mode)?;
        let (name, duration) = timer.stop();
        timings.add_step(name, duration);

        let timer = Timer::start("unpack");
        unpack(dest, source, mode);
        let (name, duration) = timer.stop();
        timings.add_step(name, duration);

        Ok(timings)
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    pub fn registry(&self) -> &UnpackerRegistry {
        &self.registry
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image_pipeline::format::types::{FourCc, PixelFormat, StreamMode};

    fn z16_mode(width: usize, height: usize) -> SubdeviceMode {
        SubdeviceMode {
            width,
            height,
            fourcc: FourCc::Z16,
            streams: vec![StreamMode {
                width,
                height,
                format: PixelFormat::Z16,
            }],
        }
    }

    #[test]
    fn decode_passes_depth_through() {
        let pipeline = FramePipeline::new(PipelineConfig::default());
        let mode = z16_mode(4, 2);
        let source: Vec<u8> = (0..16).collect();
        let mut plane = vec![0u8; 16];
        pipeline
            .decode(&source, &mode, &mut [&mut plane])
            .unwrap();
        assert_eq!(plane, source);
    }

    #[test]
    fn decode_rejects_short_source() {
        let pipeline = FramePipeline::new(PipelineConfig::default());
        let mode = z16_mode(4, 2);
        let source = vec![0u8; 15];
        let mut plane = vec![0u8; 16];
        let err = pipeline
            .decode(&source, &mode, &mut [&mut plane])
            .unwrap_err();
        assert!(matches!(err, PipelineError::BadGeometry(_)));
    }

    #[test]
    fn decode_rejects_short_destination() {
        let pipeline = FramePipeline::new(PipelineConfig::default());
        let mode = z16_mode(4, 2);
        let source = vec![0u8; 16];
        let mut plane = vec![0u8; 15];
        let err = pipeline
            .decode(&source, &mode, &mut [&mut plane])
            .unwrap_err();
        assert!(matches!(err, PipelineError::BadGeometry(_)));
    }

    #[test]
    fn decode_rejects_plane_count_mismatch() {
        let pipeline = FramePipeline::new(PipelineConfig::default());
        let mode = z16_mode(4, 2);
        let source = vec![0u8; 16];
        let err = pipeline.decode(&source, &mode, &mut []).unwrap_err();
        assert!(matches!(err, PipelineError::BadGeometry(_)));
    }

    #[test]
    fn decode_rejects_unknown_mode_tuple() {
        let pipeline = FramePipeline::new(PipelineConfig::default());
        let mode = SubdeviceMode {
            width: 4,
            height: 2,
            fourcc: FourCc::Z16,
            streams: vec![StreamMode {
                width: 4,
                height: 2,
                format: PixelFormat::Rgb8,
            }],
        };
        let source = vec![0u8; 16];
        let mut plane = vec![0u8; 24];
        let err = pipeline
            .decode(&source, &mode, &mut [&mut plane])
            .unwrap_err();
        assert!(matches!(err, PipelineError::UnsupportedFormat(_)));
    }

    #[test]
    fn max_dimension_is_enforced() {
        let config = PipelineConfig::builder().max_dimension(Some(64)).build();
        let pipeline = FramePipeline::new(config);
        let mode = z16_mode(128, 2);
        let source = vec![0u8; 128 * 2 * 2];
        let mut plane = vec![0u8; 128 * 2 * 2];
        let err = pipeline
            .decode(&source, &mode, &mut [&mut plane])
            .unwrap_err();
        assert!(matches!(err, PipelineError::BadGeometry(_)));
    }

    #[test]
    fn custom_registry_codecs_are_dispatched() {
        fn fill_with_ones(dest: &mut [&mut [u8]], _source: &[u8], _mode: &SubdeviceMode) {
            dest[0].fill(1);
        }

        let mut registry = UnpackerRegistry::new();
        registry
            .register(FourCc::Invi, &[PixelFormat::Y8], fill_with_ones)
            .unwrap();
        let pipeline = FramePipeline::with_registry(registry, PipelineConfig::default());

        let mode = SubdeviceMode {
            width: 4,
            height: 1,
            fourcc: FourCc::Invi,
            streams: vec![StreamMode {
                width: 4,
                height: 1,
                format: PixelFormat::Y8,
            }],
        };
        let source = vec![0u8; 4];
        let mut plane = vec![0u8; 4];
        pipeline
            .decode(&source, &mode, &mut [&mut plane])
            .unwrap();
        assert_eq!(plane, vec![1u8; 4]);
    }

    #[test]
    fn timings_cover_every_step() {
        let pipeline = FramePipeline::new(PipelineConfig::default());
        let mode = z16_mode(4, 2);
        let source = vec![0u8; 16];
        let mut plane = vec![0u8; 16];
        let timings = pipeline
            .decode_with_timings(&source, &mode, &mut [&mut plane])
            .unwrap();
        assert!(timings.get_step("validate_mode").is_some());
        assert!(timings.get_step("find_unpacker").is_some());
        assert!(timings.get_step("unpack").is_some());
        assert_eq!(timings.steps().len(), 3);
    }
}
