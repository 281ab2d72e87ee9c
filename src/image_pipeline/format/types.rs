use std::fmt;

use crate::image_pipeline::common::error::{PipelineError, Result};

/// Decoded pixel layouts produced by the codecs.
///
/// Every format has a fixed byte width per pixel. `Yuyv` is the one
/// exception in spirit: it is 2 bytes per pixel but pixels pair into a
/// 4-byte `{y0, u, y1, v}` macropixel, so YUYV planes must have an even
/// width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PixelFormat {
    Z16,
    Yuyv,
    Rgb8,
    Bgr8,
    Rgba8,
    Bgra8,
    Y8,
    Y16,
}

impl PixelFormat {
    pub fn bytes_per_pixel(self) -> usize {
        match self {
            PixelFormat::Z16 => 2,
            PixelFormat::Yuyv => 2,
            PixelFormat::Rgb8 => 3,
            PixelFormat::Bgr8 => 3,
            PixelFormat::Rgba8 => 4,
            PixelFormat::Bgra8 => 4,
            PixelFormat::Y8 => 1,
            PixelFormat::Y16 => 2,
        }
    }
}

impl fmt::Display for PixelFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PixelFormat::Z16 => "z16",
            PixelFormat::Yuyv => "yuyv",
            PixelFormat::Rgb8 => "rgb8",
            PixelFormat::Bgr8 => "bgr8",
            PixelFormat::Rgba8 => "rgba8",
            PixelFormat::Bgra8 => "bgra8",
            PixelFormat::Y8 => "y8",
            PixelFormat::Y16 => "y16",
        };
        f.write_str(name)
    }
}

/// The smallest indivisible unit of a packed wire format: how many logical
/// pixels it spans and how many bytes it occupies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Macropixel {
    pub width: usize,
    pub bytes: usize,
}

/// Raw pixel-packing schemes delivered by the sensor, identified by their
/// on-wire four-character code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FourCc {
    /// Standard `{y0, u, y1, v}` 2x1 macropixel.
    Yuy2,
    /// 16-bit depth.
    Z16,
    /// 8-bit luma.
    Y8,
    /// 16-bit luma carrying 10 significant bits.
    Y16,
    /// Interleaved 8-bit left/right luma pair.
    Y8i,
    /// Interleaved 10-bit left/right luma pair packed into 3 bytes.
    Y12i,
    /// 16-bit depth (F200 lineage).
    Invr,
    /// 16-bit depth (SR300 lineage).
    Invz,
    /// 8-bit infrared.
    Invi,
    /// 16-bit depth followed by 8-bit infrared in 3 bytes.
    Inri,
    /// 16-bit depth plus 16-bit infrared in a 2x1 macropixel.
    Inzi,
}

impl FourCc {
    /// Parse an on-wire four-character code.
    pub fn from_code(code: [u8; 4]) -> Result<Self> {
        match &code {
            b"YUY2" => Ok(FourCc::Yuy2),
            b"Z16 " => Ok(FourCc::Z16),
            b"Y8  " => Ok(FourCc::Y8),
            b"Y16 " => Ok(FourCc::Y16),
            b"Y8I " => Ok(FourCc::Y8i),
            b"Y12I" => Ok(FourCc::Y12i),
            b"INVR" => Ok(FourCc::Invr),
            b"INVZ" => Ok(FourCc::Invz),
            b"INVI" => Ok(FourCc::Invi),
            b"INRI" => Ok(FourCc::Inri),
            b"INZI" => Ok(FourCc::Inzi),
            _ => Err(PipelineError::UnsupportedFormat(format!(
                "unknown fourcc '{}'",
                String::from_utf8_lossy(&code)
            ))),
        }
    }

    pub fn code(self) -> [u8; 4] {
        match self {
            FourCc::Yuy2 => *b"YUY2",
            FourCc::Z16 => *b"Z16 ",
            FourCc::Y8 => *b"Y8  ",
            FourCc::Y16 => *b"Y16 ",
            FourCc::Y8i => *b"Y8I ",
            FourCc::Y12i => *b"Y12I",
            FourCc::Invr => *b"INVR",
            FourCc::Invz => *b"INVZ",
            FourCc::Invi => *b"INVI",
            FourCc::Inri => *b"INRI",
            FourCc::Inzi => *b"INZI",
        }
    }

    pub fn macropixel(self) -> Macropixel {
        let (width, bytes) = match self {
            FourCc::Yuy2 => (2, 4),
            FourCc::Z16 => (1, 2),
            FourCc::Y8 => (1, 1),
            FourCc::Y16 => (1, 2),
            FourCc::Y8i => (1, 2),
            FourCc::Y12i => (1, 3),
            FourCc::Invr => (1, 2),
            FourCc::Invz => (1, 2),
            FourCc::Invi => (1, 1),
            FourCc::Inri => (1, 3),
            FourCc::Inzi => (2, 4),
        };
        Macropixel { width, bytes }
    }
}

impl fmt::Display for FourCc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let code = self.code();
        f.write_str(std::str::from_utf8(&code).unwrap_or("????").trim_end())
    }
}

/// One decoded output plane requested from a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreamMode {
    pub width: usize,
    pub height: usize,
    pub format: PixelFormat,
}

/// Descriptor carried with every raw frame: the input geometry and packing
/// plus the one or two output streams the codec should produce.
///
/// Output streams are top-left aligned sub-rectangles of the input; the
/// device may deliver more pixels than the caller asked for, never fewer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubdeviceMode {
    pub width: usize,
    pub height: usize,
    pub fourcc: FourCc,
    pub streams: Vec<StreamMode>,
}

impl SubdeviceMode {
    /// Check the mode invariants the codecs rely on.
    pub fn validate(&self) -> Result<()> {
        let mp = self.fourcc.macropixel();
        if self.width % mp.width != 0 {
            return Err(PipelineError::BadGeometry(format!(
                "input width {} is not a multiple of the {} macropixel width {}",
                self.width, self.fourcc, mp.width
            )));
        }
        if self.streams.is_empty() || self.streams.len() > 2 {
            return Err(PipelineError::BadGeometry(format!(
                "expected 1 or 2 output streams, got {}",
                self.streams.len()
            )));
        }
        for stream in &self.streams {
            if stream.width > self.width || stream.height > self.height {
                return Err(PipelineError::BadGeometry(format!(
                    "output stream {}x{} exceeds input {}x{}",
                    stream.width, stream.height, self.width, self.height
                )));
            }
            if stream.format == PixelFormat::Yuyv && stream.width % 2 != 0 {
                return Err(PipelineError::BadGeometry(format!(
                    "YUYV stream width {} must be even",
                    stream.width
                )));
            }
            if self.fourcc == FourCc::Yuy2 && stream.width % 2 != 0 {
                return Err(PipelineError::BadGeometry(format!(
                    "stream width {} must land on a YUY2 macropixel boundary",
                    stream.width
                )));
            }
        }
        if self.streams.len() == 2 {
            let (a, b) = (&self.streams[0], &self.streams[1]);
            if a.width != b.width || a.height != b.height {
                return Err(PipelineError::BadGeometry(format!(
                    "split streams disagree on size: {}x{} vs {}x{}",
                    a.width, a.height, b.width, b.height
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fourcc_code_roundtrip() {
        for fourcc in [
            FourCc::Yuy2,
            FourCc::Z16,
            FourCc::Y8,
            FourCc::Y16,
            FourCc::Y8i,
            FourCc::Y12i,
            FourCc::Invr,
            FourCc::Invz,
            FourCc::Invi,
            FourCc::Inri,
            FourCc::Inzi,
        ] {
            assert_eq!(FourCc::from_code(fourcc.code()).unwrap(), fourcc);
        }
    }

    #[test]
    fn fourcc_unknown_code_rejected() {
        let err = FourCc::from_code(*b"NV12").unwrap_err();
        assert!(matches!(err, PipelineError::UnsupportedFormat(_)));
    }

    #[test]
    fn mode_rejects_non_macropixel_width() {
        let mode = SubdeviceMode {
            width: 641,
            height: 480,
            fourcc: FourCc::Yuy2,
            streams: vec![StreamMode {
                width: 640,
                height: 480,
                format: PixelFormat::Rgb8,
            }],
        };
        assert!(matches!(
            mode.validate().unwrap_err(),
            PipelineError::BadGeometry(_)
        ));
    }

    #[test]
    fn mode_rejects_oversized_stream() {
        let mode = SubdeviceMode {
            width: 320,
            height: 240,
            fourcc: FourCc::Z16,
            streams: vec![StreamMode {
                width: 640,
                height: 240,
                format: PixelFormat::Z16,
            }],
        };
        assert!(matches!(
            mode.validate().unwrap_err(),
            PipelineError::BadGeometry(_)
        ));
    }

    #[test]
    fn mode_rejects_odd_yuyv_stream() {
        let mode = SubdeviceMode {
            width: 640,
            height: 480,
            fourcc: FourCc::Yuy2,
            streams: vec![StreamMode {
                width: 639,
                height: 480,
                format: PixelFormat::Yuyv,
            }],
        };
        assert!(mode.validate().is_err());
    }

    #[test]
    fn mode_rejects_mismatched_split_streams() {
        let mode = SubdeviceMode {
            width: 640,
            height: 480,
            fourcc: FourCc::Y8i,
            streams: vec![
                StreamMode {
                    width: 640,
                    height: 480,
                    format: PixelFormat::Y8,
                },
                StreamMode {
                    width: 320,
                    height: 480,
                    format: PixelFormat::Y8,
                },
            ],
        };
        assert!(mode.validate().is_err());
    }

    #[test]
    fn mode_accepts_subrect() {
        let mode = SubdeviceMode {
            width: 640,
            height: 481,
            fourcc: FourCc::Z16,
            streams: vec![StreamMode {
                width: 628,
                height: 468,
                format: PixelFormat::Z16,
            }],
        };
        assert!(mode.validate().is_ok());
    }
}
