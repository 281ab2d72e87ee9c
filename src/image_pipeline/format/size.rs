use crate::image_pipeline::common::error::{PipelineError, Result};
use crate::image_pipeline::format::types::{FourCc, PixelFormat};

/// Byte size of a decoded plane of `width` x `height` pixels.
pub fn plane_size(width: usize, height: usize, format: PixelFormat) -> Result<usize> {
    if format == PixelFormat::Yuyv && width % 2 != 0 {
        return Err(PipelineError::BadGeometry(format!(
            "YUYV requires an even width, got {width}"
        )));
    }
    Ok(width * height * format.bytes_per_pixel())
}

/// Byte size of a raw frame of `width` x `height` pixels in a packed wire
/// format.
pub fn frame_size(width: usize, height: usize, fourcc: FourCc) -> Result<usize> {
    let mp = fourcc.macropixel();
    if width % mp.width != 0 {
        return Err(PipelineError::BadGeometry(format!(
            "width {} is not a multiple of the {} macropixel width {}",
            width, fourcc, mp.width
        )));
    }
    Ok(width / mp.width * height * mp.bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plane_sizes() {
        assert_eq!(plane_size(640, 480, PixelFormat::Z16).unwrap(), 614_400);
        assert_eq!(plane_size(640, 480, PixelFormat::Yuyv).unwrap(), 614_400);
        assert_eq!(plane_size(640, 480, PixelFormat::Rgb8).unwrap(), 921_600);
        assert_eq!(plane_size(640, 480, PixelFormat::Bgra8).unwrap(), 1_228_800);
        assert_eq!(plane_size(640, 480, PixelFormat::Y8).unwrap(), 307_200);
        assert_eq!(plane_size(640, 480, PixelFormat::Y16).unwrap(), 614_400);
    }

    #[test]
    fn plane_size_rejects_odd_yuyv() {
        assert!(matches!(
            plane_size(641, 480, PixelFormat::Yuyv).unwrap_err(),
            PipelineError::BadGeometry(_)
        ));
    }

    #[test]
    fn frame_sizes() {
        // One macropixel covers two YUY2 pixels in four bytes.
        assert_eq!(frame_size(640, 480, FourCc::Yuy2).unwrap(), 614_400);
        assert_eq!(frame_size(640, 480, FourCc::Z16).unwrap(), 614_400);
        assert_eq!(frame_size(640, 480, FourCc::Y8).unwrap(), 307_200);
        assert_eq!(frame_size(640, 480, FourCc::Y8i).unwrap(), 614_400);
        assert_eq!(frame_size(640, 480, FourCc::Y12i).unwrap(), 921_600);
        assert_eq!(frame_size(640, 480, FourCc::Inri).unwrap(), 921_600);
        // INZI packs depth + infrared for two pixels into four bytes.
        assert_eq!(frame_size(640, 480, FourCc::Inzi).unwrap(), 614_400);
    }

    #[test]
    fn frame_size_rejects_partial_macropixel() {
        assert!(matches!(
            frame_size(639, 480, FourCc::Yuy2).unwrap_err(),
            PipelineError::BadGeometry(_)
        ));
        assert!(matches!(
            frame_size(639, 480, FourCc::Inzi).unwrap_err(),
            PipelineError::BadGeometry(_)
        ));
    }
}
