//! Table-driven rectification: per-pixel trigonometry is paid once at
//! configuration time, after which rectifying a frame is one indirect
//! load per pixel.

use log::debug;

use crate::image_pipeline::align::align_images;
use crate::image_pipeline::common::error::{PipelineError, Result};
use crate::image_pipeline::format::types::PixelFormat;
use crate::image_pipeline::geometry::types::{Extrinsics, Intrinsics};

/// Build the index table mapping each rectified pixel to its source pixel
/// in the unrectified image.
///
/// Reuses the alignment kernel with a constant depth of 1.0: reprojection
/// of a pinhole ray does not depend on its length. Entries whose
/// reprojection falls outside the unrectified image keep their initial
/// value of zero; callers must not read through them. The table is
/// deterministic for a given intrinsics/extrinsics triple.
pub fn compute_rectification_table(
    rect_intrin: &Intrinsics,
    rect_to_unrect: &Extrinsics,
    unrect_intrin: &Intrinsics,
) -> Vec<u32> {
    let mut table = vec![0u32; rect_intrin.width * rect_intrin.height];
    align_images(
        rect_intrin,
        rect_to_unrect,
        unrect_intrin,
        |_| 1.0,
        |rect_index, unrect_index| table[rect_index] = unrect_index as u32,
    );
    debug!(
        "rectification table built: {}x{} entries",
        rect_intrin.width, rect_intrin.height
    );
    table
}

fn rectify_pixels<const N: usize>(out: &mut [u8], table: &[u32], unrect: &[u8]) {
    for (px, &entry) in out.chunks_exact_mut(N).zip(table) {
        px.copy_from_slice(&unrect[entry as usize * N..][..N]);
    }
}

/// Apply a rectification table to one frame.
///
/// YUYV cannot be rectified per-pixel because resampling would pair U and
/// V channels from unrelated macropixels.
pub fn rectify_image(
    out: &mut [u8],
    table: &[u32],
    unrect: &[u8],
    format: PixelFormat,
) -> Result<()> {
    match format {
        PixelFormat::Y8 => rectify_pixels::<1>(out, table, unrect),
        PixelFormat::Y16 | PixelFormat::Z16 => rectify_pixels::<2>(out, table, unrect),
        PixelFormat::Rgb8 | PixelFormat::Bgr8 => rectify_pixels::<3>(out, table, unrect),
        PixelFormat::Rgba8 | PixelFormat::Bgra8 => rectify_pixels::<4>(out, table, unrect),
        PixelFormat::Yuyv => {
            return Err(PipelineError::UnsupportedFormat(
                "cannot rectify YUYV images; U/V channels would be resampled across macropixels"
                    .into(),
            ))
        }
    }
    Ok(())
}
