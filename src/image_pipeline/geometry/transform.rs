use nalgebra::Vector3;

use crate::image_pipeline::geometry::types::{DistortionModel, Intrinsics};

impl Intrinsics {
    /// Map a 3D point in this camera's frame to pixel coordinates.
    ///
    /// Cannot project to an inverse-distorted image; that precondition is
    /// caller-checked.
    pub fn project(&self, point: Vector3<f32>) -> [f32; 2] {
        debug_assert!(self.model != DistortionModel::InverseBrownConrady);
        let mut x = point.x / point.z;
        let mut y = point.y / point.z;
        if self.model == DistortionModel::ModifiedBrownConrady {
            let r2 = x * x + y * y;
            let f =
                1.0 + self.coeffs[0] * r2 + self.coeffs[1] * r2 * r2 + self.coeffs[4] * r2 * r2 * r2;
            x *= f;
            y *= f;
            let dx = x + 2.0 * self.coeffs[2] * x * y + self.coeffs[3] * (r2 + 2.0 * x * x);
            let dy = y + 2.0 * self.coeffs[3] * x * y + self.coeffs[2] * (r2 + 2.0 * y * y);
            x = dx;
            y = dy;
        }
        [x * self.fx + self.ppx, y * self.fy + self.ppy]
    }

    /// Map a pixel and a metric depth to a 3D point in this camera's frame.
    ///
    /// Cannot deproject from a forward-distorted image; that precondition
    /// is caller-checked.
    pub fn deproject(&self, pixel: [f32; 2], depth: f32) -> Vector3<f32> {
        debug_assert!(self.model != DistortionModel::ModifiedBrownConrady);
        let mut x = (pixel[0] - self.ppx) / self.fx;
        let mut y = (pixel[1] - self.ppy) / self.fy;
        if self.model == DistortionModel::InverseBrownConrady {
            let r2 = x * x + y * y;
            let f =
                1.0 + self.coeffs[0] * r2 + self.coeffs[1] * r2 * r2 + self.coeffs[4] * r2 * r2 * r2;
            let ux = x * f + 2.0 * self.coeffs[2] * x * y + self.coeffs[3] * (r2 + 2.0 * x * x);
            let uy = y * f + 2.0 * self.coeffs[3] * x * y + self.coeffs[2] * (r2 + 2.0 * y * y);
            x = ux;
            y = uy;
        }
        Vector3::new(depth * x, depth * y, depth)
    }
}
