//! Pixel codecs: turn one raw frame of a known FourCC into one or two
//! caller-owned output planes.
//!
//! All codecs share the signature `fn(dest, source, mode)` and never
//! allocate. Mode preconditions are `debug_assert!`ed; release builds rely
//! on the caller (normally [`FramePipeline`](crate::image_pipeline::pipeline::FramePipeline))
//! validating the mode and buffer sizes up front.

mod luma;
mod registry;
mod split;
mod subrect;
mod yuy2;


pub use luma::{unpack_y16_from_y16_10, unpack_y16_from_y8};
pub use registry::{UnpackFn, UnpackerRegistry};
pub use split::{
    unpack_y16_y16_from_y12i, unpack_y8_y8_from_y8i, unpack_z16_y16_from_inri,
    unpack_z16_y8_from_inri,
};
pub use subrect::unpack_subrect;
pub use yuy2::{
    unpack_bgr_from_yuy2, unpack_bgra_from_yuy2, unpack_rgb_from_yuy2, unpack_rgba_from_yuy2,
};
