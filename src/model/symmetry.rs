// src/model/symmetry.rs

use nalgebra::{Matrix3, Vector3};

/// One symmetry operation: rotation/reflection matrix plus translation.
#[derive(Clone, Debug, PartialEq)]
pub struct AffineOp {
    pub matrix: Matrix3<f64>,
    pub translation: Vector3<f64>,
}

impl AffineOp {
    pub fn new(matrix: Matrix3<f64>, translation: Vector3<f64>) -> Self {
        Self { matrix, translation }
    }

    #[cfg(test)]
    pub fn identity() -> Self {
        Self::new(Matrix3::identity(), Vector3::zeros())
    }

    /// Full operation, used for positions: `M * v + t`.
    pub fn apply(&self, v: [f64; 3]) -> [f64; 3] {
        let out = self.matrix * Vector3::from(v) + self.translation;
        [out.x, out.y, out.z]
    }

    /// Matrix part only. Moments are directions and never get translated.
    pub fn apply_linear(&self, v: [f64; 3]) -> [f64; 3] {
        let out = self.matrix * Vector3::from(v);
        [out.x, out.y, out.z]
    }
}
