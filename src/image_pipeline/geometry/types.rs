use nalgebra::{Matrix3, Vector3};

/// Lens distortion applied by [`Intrinsics::project`] and undone by
/// [`Intrinsics::deproject`].
///
/// `ModifiedBrownConrady` images are distorted on the way in, so they can
/// only be projected to; `InverseBrownConrady` images were rectified by
/// applying the inverse distortion, so they can only be deprojected from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DistortionModel {
    None,
    ModifiedBrownConrady,
    InverseBrownConrady,
}

/// Pinhole camera parameters for one stream.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Intrinsics {
    /// Image width in pixels.
    pub width: usize,
    /// Image height in pixels.
    pub height: usize,
    /// Principal point, as a pixel offset from the top-left corner.
    pub ppx: f32,
    pub ppy: f32,
    /// Focal length, in multiples of pixel width/height.
    pub fx: f32,
    pub fy: f32,
    pub model: DistortionModel,
    /// Brown-Conrady coefficients `[k1, k2, p1, p2, k3]`.
    pub coeffs: [f32; 5],
}

/// Rigid transform from a source camera frame to a target camera frame.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Extrinsics {
    pub rotation: Matrix3<f32>,
    pub translation: Vector3<f32>,
}

impl Extrinsics {
    pub fn identity() -> Self {
        Self {
            rotation: Matrix3::identity(),
            translation: Vector3::zeros(),
        }
    }

    /// Build from calibration storage: a column-major 3x3 rotation and a
    /// translation vector in metres.
    pub fn from_column_major(rotation: [f32; 9], translation: [f32; 3]) -> Self {
        Self {
            rotation: Matrix3::from_column_slice(&rotation),
            translation: Vector3::from_column_slice(&translation),
        }
    }

    #[inline]
    pub fn transform(&self, point: Vector3<f32>) -> Vector3<f32> {
        self.rotation * point + self.translation
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn column_major_rotation_layout() {
        // 90 degree rotation about z, column-major: columns are the images
        // of the basis vectors.
        let extrin = Extrinsics::from_column_major(
            [0.0, 1.0, 0.0, -1.0, 0.0, 0.0, 0.0, 0.0, 1.0],
            [0.0, 0.0, 0.0],
        );
        let p = extrin.transform(Vector3::new(1.0, 0.0, 0.0));
        assert_eq!(p, Vector3::new(0.0, 1.0, 0.0));
    }

    #[test]
    fn identity_is_a_fixed_point() {
        let extrin = Extrinsics::identity();
        let p = Vector3::new(0.3, -1.2, 4.5);
        assert_eq!(extrin.transform(p), p);
    }
}
