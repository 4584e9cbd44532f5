use nalgebra::{Matrix3, Vector3};

const IDENTITY_TOLERANCE: f64 = 1e-9;

/// A symmetry operation acting on fractional coordinates: `x' = R·x + t`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SymOp {
    pub rotation: Matrix3<f64>,
    pub translation: Vector3<f64>,
}

impl SymOp {
    pub fn new(rotation: Matrix3<f64>, translation: Vector3<f64>) -> Self {
        Self {
            rotation,
            translation,
        }
    }

    pub fn identity() -> Self {
        Self::new(Matrix3::identity(), Vector3::zeros())
    }

    pub fn apply(&self, fractional: &Vector3<f64>) -> Vector3<f64> {
        self.rotation * fractional + self.translation
    }

    pub fn is_identity(&self) -> bool {
        (self.rotation - Matrix3::identity()).abs().max() < IDENTITY_TOLERANCE
            && self.translation.abs().max() < IDENTITY_TOLERANCE
    }
}

impl Default for SymOp {
    fn default() -> Self {
        Self::identity()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_leaves_coordinates_unchanged() {
        let op = SymOp::identity();
        let x = Vector3::new(0.1, 0.2, 0.3);
        assert_eq!(op.apply(&x), x);
        assert!(op.is_identity());
        assert!(SymOp::default().is_identity());
    }

    #[test]
    fn two_fold_screw_rotates_and_translates() {
        // -x, y+1/2, -z
        let op = SymOp::new(
            Matrix3::from_diagonal(&Vector3::new(-1.0, 1.0, -1.0)),
            Vector3::new(0.0, 0.5, 0.0),
        );
        let x = Vector3::new(0.1, 0.2, 0.3);
        let y = op.apply(&x);
        assert!((y - Vector3::new(-0.1, 0.7, -0.3)).norm() < 1e-12);
        assert!(!op.is_identity());
    }

    #[test]
    fn pure_translation_is_not_identity() {
        let op = SymOp::new(Matrix3::identity(), Vector3::new(0.5, 0.5, 0.0));
        assert!(!op.is_identity());
    }
}
