//! Camera intrinsics, rigid extrinsics, and the pinhole projection math
//! shared by alignment and rectification.

pub mod transform;
pub mod types;

pub use types::{DistortionModel, Extrinsics, Intrinsics};
