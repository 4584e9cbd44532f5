use super::SymmetryError;
use nalgebra::{Matrix3, Point3, Vector3};

/// Crystallographic unit cell with cached orthogonalization matrices.
///
/// Uses the PDB convention: `a` along x, `b` in the xy plane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UnitCell {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub alpha: f64,
    pub beta: f64,
    pub gamma: f64,
    volume: f64,
    orth: Matrix3<f64>,
    frac: Matrix3<f64>,
}

impl UnitCell {
    /// Builds a cell from edge lengths (Å) and angles (degrees).
    ///
    /// # Errors
    ///
    /// Returns [`SymmetryError::InvalidCell`] when a length is not positive, an
    /// angle lies outside (0, 180), or the angles cannot close a cell.
    pub fn new(
        a: f64,
        b: f64,
        c: f64,
        alpha: f64,
        beta: f64,
        gamma: f64,
    ) -> Result<Self, SymmetryError> {
        if !(a > 0.0 && b > 0.0 && c > 0.0) {
            return Err(SymmetryError::InvalidCell(
                "cell lengths must be positive".to_string(),
            ));
        }
        if ![alpha, beta, gamma]
            .iter()
            .all(|angle| *angle > 0.0 && *angle < 180.0)
        {
            return Err(SymmetryError::InvalidCell(
                "cell angles must be within (0, 180) degrees".to_string(),
            ));
        }

        let (ca, cb, cg) = (
            alpha.to_radians().cos(),
            beta.to_radians().cos(),
            gamma.to_radians().cos(),
        );
        let sg = gamma.to_radians().sin();
        let factor = 1.0 - ca * ca - cb * cb - cg * cg + 2.0 * ca * cb * cg;
        if factor <= 0.0 {
            return Err(SymmetryError::InvalidCell(format!(
                "angles ({}, {}, {}) do not form a cell",
                alpha, beta, gamma
            )));
        }
        let volume = a * b * c * factor.sqrt();

        #[rustfmt::skip]
        let orth = Matrix3::new(
            a,   b * cg, c * cb,
            0.0, b * sg, c * (ca - cb * cg) / sg,
            0.0, 0.0,    volume / (a * b * sg),
        );
        let frac = orth.try_inverse().ok_or_else(|| {
            SymmetryError::InvalidCell("orthogonalization matrix is singular".to_string())
        })?;

        Ok(Self {
            a,
            b,
            c,
            alpha,
            beta,
            gamma,
            volume,
            orth,
            frac,
        })
    }

    pub fn volume(&self) -> f64 {
        self.volume
    }

    pub fn orthogonalize(&self, fractional: &Vector3<f64>) -> Point3<f64> {
        Point3::from(self.orth * fractional)
    }

    pub fn fractionalize(&self, position: &Point3<f64>) -> Vector3<f64> {
        self.frac * position.coords
    }

    /// False for the 1 Å placeholder cell that cryo-EM and NMR entries carry.
    pub fn is_crystal(&self) -> bool {
        (self.a - 1.0).abs() > 1e-6
    }

    pub fn is_orthorhombic(&self) -> bool {
        [self.alpha, self.beta, self.gamma]
            .iter()
            .all(|angle| (angle - 90.0).abs() < 1e-4)
    }
}
