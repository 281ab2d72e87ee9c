//! Nearest-neighbour alignment of a depth image and a second camera's
//! image, in either direction.
//!
//! Callers zero the output plane before the call; pixels that receive no
//! data stay zero, which is the "no depth / out of view" sentinel.

use crate::image_pipeline::common::error::{PipelineError, Result};
use crate::image_pipeline::format::types::PixelFormat;
use crate::image_pipeline::geometry::types::{Extrinsics, Intrinsics};

/// Shared reprojection kernel.
///
/// Scans the depth image in raster order. For every pixel with non-zero
/// depth: deproject into the depth camera frame, apply the rigid transform,
/// project into the other camera, round to the nearest pixel, and hand the
/// `(depth_index, other_index)` pair to `transfer` when it lands inside
/// the other image. The transfer policy is a closure so each call site
/// monomorphises its own inner loop.
pub(crate) fn align_images<G, T>(
    depth_intrin: &Intrinsics,
    depth_to_other: &Extrinsics,
    other_intrin: &Intrinsics,
    get_depth: G,
    mut transfer: T,
) where
    G: Fn(usize) -> f32,
    T: FnMut(usize, usize),
{
    let mut depth_index = 0;
    for depth_y in 0..depth_intrin.height {
        for depth_x in 0..depth_intrin.width {
            // Zero depth means no data; nothing is written to the aligned
            // image for this pixel.
            let depth = get_depth(depth_index);
            if depth != 0.0 {
                let point = depth_intrin.deproject([depth_x as f32, depth_y as f32], depth);
                let other_point = depth_to_other.transform(point);
                let pixel = other_intrin.project(other_point);

                let other_x = pixel[0].round() as isize;
                let other_y = pixel[1].round() as isize;
                if other_x >= 0
                    && other_y >= 0
                    && (other_x as usize) < other_intrin.width
                    && (other_y as usize) < other_intrin.height
                {
                    transfer(
                        depth_index,
                        other_y as usize * other_intrin.width + other_x as usize,
                    );
                }
            }
            depth_index += 1;
        }
    }
}

/// Warp a raw depth image into the other camera's pixel grid.
///
/// `out` is sized like the other image and carries raw 16-bit depth; the
/// scale is only used to reach metric space for the reprojection. When
/// several depth pixels land on the same output pixel the last writer in
/// raster order wins.
pub fn align_depth_to_other(
    out: &mut [u16],
    depth: &[u16],
    depth_scale: f32,
    depth_intrin: &Intrinsics,
    depth_to_other: &Extrinsics,
    other_intrin: &Intrinsics,
) {
    align_images(
        depth_intrin,
        depth_to_other,
        other_intrin,
        |i| f32::from(depth[i]) * depth_scale,
        |depth_index, other_index| out[other_index] = depth[depth_index],
    );
}

fn align_other_to_depth_bytes<const N: usize>(
    out: &mut [u8],
    other: &[u8],
    depth: &[u16],
    depth_scale: f32,
    depth_intrin: &Intrinsics,
    depth_to_other: &Extrinsics,
    other_intrin: &Intrinsics,
) {
    align_images(
        depth_intrin,
        depth_to_other,
        other_intrin,
        |i| f32::from(depth[i]) * depth_scale,
        |depth_index, other_index| {
            out[depth_index * N..][..N].copy_from_slice(&other[other_index * N..][..N]);
        },
    );
}

/// Warp the other camera's image into the depth camera's pixel grid.
///
/// `out` is sized like the depth image; each depth pixel is written at
/// most once. YUYV cannot be aligned per-pixel because resampling would
/// pair U and V channels from unrelated macropixels.
pub fn align_other_to_depth(
    out: &mut [u8],
    other: &[u8],
    other_format: PixelFormat,
    depth: &[u16],
    depth_scale: f32,
    depth_intrin: &Intrinsics,
    depth_to_other: &Extrinsics,
    other_intrin: &Intrinsics,
) -> Result<()> {
    match other_format {
        PixelFormat::Y8 => align_other_to_depth_bytes::<1>(
            out,
            other,
            depth,
            depth_scale,
            depth_intrin,
            depth_to_other,
            other_intrin,
        ),
        PixelFormat::Y16 | PixelFormat::Z16 => align_other_to_depth_bytes::<2>(
            out,
            other,
            depth,
            depth_scale,
            depth_intrin,
            depth_to_other,
            other_intrin,
        ),
        PixelFormat::Rgb8 | PixelFormat::Bgr8 => align_other_to_depth_bytes::<3>(
            out,
            other,
            depth,
            depth_scale,
            depth_intrin,
            depth_to_other,
            other_intrin,
        ),
        PixelFormat::Rgba8 | PixelFormat::Bgra8 => align_other_to_depth_bytes::<4>(
            out,
            other,
            depth,
            depth_scale,
            depth_intrin,
            depth_to_other,
            other_intrin,
        ),
        PixelFormat::Yuyv => {
            return Err(PipelineError::UnsupportedFormat(
                "cannot align YUYV images; U/V channels would be resampled across macropixels"
                    .into(),
            ))
        }
    }
    Ok(())
}
