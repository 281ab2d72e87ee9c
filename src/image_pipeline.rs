//! The pipeline core: pixel codecs, geometric alignment, rectification,
//! and the thermal calibration table.

pub mod align;
pub mod common;
pub mod format;
pub mod geometry;
pub mod pipeline;
pub mod rectify;
pub mod thermal;
pub mod unpack;

pub use align::{align_depth_to_other, align_other_to_depth};
pub use common::error::{PipelineError, Result};
pub use common::timing::{PipelineTimings, StepTiming, Timer};
pub use format::{frame_size, plane_size, FourCc, Macropixel, PixelFormat, StreamMode, SubdeviceMode};
pub use geometry::{DistortionModel, Extrinsics, Intrinsics};
pub use pipeline::{FramePipeline, PipelineConfig, PipelineConfigBuilder};
pub use rectify::{compute_rectification_table, rectify_image};
pub use thermal::{TableHeader, TempData, ThermalCalibrationTable};
pub use unpack::{UnpackFn, UnpackerRegistry};
