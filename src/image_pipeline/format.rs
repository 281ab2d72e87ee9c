//! Pixel formats, raw FourCC layouts, and frame geometry descriptors.

pub mod size;
pub mod types;

pub use size::{frame_size, plane_size};
pub use types::{FourCc, Macropixel, PixelFormat, StreamMode, SubdeviceMode};
