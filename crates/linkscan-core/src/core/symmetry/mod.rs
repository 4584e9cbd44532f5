//! # Crystallographic Symmetry
//!
//! The link search needs to know where copies of each atom sit once the
//! asymmetric unit is expanded by the space-group operations and unit-cell
//! translations. Space-group algebra itself is not done here: callers supply the
//! already-expanded list of operations, and this module only applies them.
//!
//! - [`cell`] - Unit cell geometry and fractional/Cartesian conversion
//! - [`ops`] - Symmetry operations on fractional coordinates
//!
//! [`SymmetryProvider`] is the seam the spatial index consumes. [`CrystalSymmetry`]
//! implements it for a cell plus operations; [`NoSymmetry`] for structures
//! without crystal information (NMR models, predictions).

pub mod cell;
pub mod ops;

use crate::core::utils::geometry::BoundingBox;
use cell::UnitCell;
use nalgebra::{Point3, Vector3};
use ops::SymOp;
use std::fmt;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum SymmetryError {
    #[error("Invalid unit cell: {0}")]
    InvalidCell(String),
}

/// Identifies one symmetry image: an operation index plus a lattice translation.
///
/// Operation 0 is always the identity, so `ImageKey::IDENTITY` is the atom in
/// its own asymmetric unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct ImageKey {
    pub op: usize,
    pub shift: [i32; 3],
}

impl ImageKey {
    pub const IDENTITY: ImageKey = ImageKey {
        op: 0,
        shift: [0, 0, 0],
    };

    pub fn new(op: usize, shift: [i32; 3]) -> Self {
        Self { op, shift }
    }

    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }
}

impl fmt::Display for ImageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [x, y, z] = self.shift;
        write!(f, "{}_{}{}{}", self.op + 1, 5 + x, 5 + y, 5 + z)
    }
}

/// A symmetry copy of a position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SymImage {
    pub key: ImageKey,
    pub position: Point3<f64>,
}

/// Source of symmetry images for the spatial index.
pub trait SymmetryProvider {
    /// Every image of `position` (the identity included) lying inside `region`.
    fn images_within(&self, position: &Point3<f64>, region: &BoundingBox) -> Vec<SymImage>;

    /// Maps `position` through the operation and translation named by `image`.
    ///
    /// Returns `None` if `image` does not belong to this provider.
    fn apply(&self, image: ImageKey, position: &Point3<f64>) -> Option<Point3<f64>>;
}

/// Provider for structures without crystal symmetry: only the identity image exists.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoSymmetry;

impl SymmetryProvider for NoSymmetry {
    fn images_within(&self, position: &Point3<f64>, region: &BoundingBox) -> Vec<SymImage> {
        if region.contains(position) {
            vec![SymImage {
                key: ImageKey::IDENTITY,
                position: *position,
            }]
        } else {
            Vec::new()
        }
    }

    fn apply(&self, image: ImageKey, position: &Point3<f64>) -> Option<Point3<f64>> {
        image.is_identity().then_some(*position)
    }
}

/// Images generated from a unit cell and a list of symmetry operations.
#[derive(Debug, Clone)]
pub struct CrystalSymmetry {
    cell: UnitCell,
    ops: Vec<SymOp>,
}

impl CrystalSymmetry {
    /// Creates the provider, moving the identity operation to index 0 (and
    /// inserting it when the list lacks one).
    pub fn new(cell: UnitCell, ops: &[SymOp]) -> Self {
        let mut ordered = Vec::with_capacity(ops.len() + 1);
        ordered.push(SymOp::identity());
        ordered.extend(ops.iter().filter(|op| !op.is_identity()).copied());
        Self { cell, ops: ordered }
    }

    pub fn cell(&self) -> &UnitCell {
        &self.cell
    }

    pub fn operations(&self) -> &[SymOp] {
        &self.ops
    }

    fn fractional_bounds(&self, region: &BoundingBox) -> (Vector3<f64>, Vector3<f64>) {
        let corners = region.corners().map(|c| self.cell.fractionalize(&c));
        let mut lo = corners[0];
        let mut hi = corners[0];
        for corner in &corners[1..] {
            lo = lo.inf(corner);
            hi = hi.sup(corner);
        }
        (lo, hi)
    }
}

impl SymmetryProvider for CrystalSymmetry {
    fn images_within(&self, position: &Point3<f64>, region: &BoundingBox) -> Vec<SymImage> {
        let (lo, hi) = self.fractional_bounds(region);
        let frac = self.cell.fractionalize(position);
        let mut images = Vec::new();

        for (op_idx, op) in self.ops.iter().enumerate() {
            let moved = op.apply(&frac);
            let first = (lo - moved).map(|v| v.ceil() as i32);
            let last = (hi - moved).map(|v| v.floor() as i32);

            for nx in first.x..=last.x {
                for ny in first.y..=last.y {
                    for nz in first.z..=last.z {
                        let shifted = moved + Vector3::new(nx as f64, ny as f64, nz as f64);
                        let image_pos = self.cell.orthogonalize(&shifted);
                        if region.contains(&image_pos) {
                            images.push(SymImage {
                                key: ImageKey::new(op_idx, [nx, ny, nz]),
                                position: image_pos,
                            });
                        }
                    }
                }
            }
        }
        images
    }

    fn apply(&self, image: ImageKey, position: &Point3<f64>) -> Option<Point3<f64>> {
        let op = self.ops.get(image.op)?;
        let [x, y, z] = image.shift;
        let moved =
            op.apply(&self.cell.fractionalize(position)) + Vector3::new(x as f64, y as f64, z as f64);
        Some(self.cell.orthogonalize(&moved))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Matrix3;

    fn cubic_p1(edge: f64) -> CrystalSymmetry {
        let cell = UnitCell::new(edge, edge, edge, 90.0, 90.0, 90.0).unwrap();
        CrystalSymmetry::new(cell, &[SymOp::identity()])
    }

    #[test]
    fn image_key_identity_is_op_zero_without_shift() {
        assert!(ImageKey::IDENTITY.is_identity());
        assert!(ImageKey::default().is_identity());
        assert!(!ImageKey::new(0, [1, 0, 0]).is_identity());
        assert!(!ImageKey::new(1, [0, 0, 0]).is_identity());
    }

    #[test]
    fn image_key_display_uses_pdb_style_code() {
        assert_eq!(ImageKey::IDENTITY.to_string(), "1_555");
        assert_eq!(ImageKey::new(2, [1, -1, 0]).to_string(), "3_645");
    }

    #[test]
    fn no_symmetry_yields_only_identity() {
        let region = BoundingBox::new(Point3::origin(), Point3::new(5.0, 5.0, 5.0));
        let p = Point3::new(1.0, 1.0, 1.0);
        let images = NoSymmetry.images_within(&p, &region);
        assert_eq!(images.len(), 1);
        assert!(images[0].key.is_identity());
        assert_eq!(NoSymmetry.apply(ImageKey::IDENTITY, &p), Some(p));
        assert_eq!(NoSymmetry.apply(ImageKey::new(0, [1, 0, 0]), &p), None);
    }

    #[test]
    fn constructor_puts_identity_first_and_drops_duplicates() {
        let cell = UnitCell::new(10.0, 10.0, 10.0, 90.0, 90.0, 90.0).unwrap();
        let inversion = SymOp::new(-Matrix3::identity(), Vector3::zeros());
        let sym = CrystalSymmetry::new(cell, &[inversion, SymOp::identity()]);
        assert_eq!(sym.operations().len(), 2);
        assert!(sym.operations()[0].is_identity());
        assert_eq!(sym.operations()[1], inversion);
    }

    #[test]
    fn p1_translations_reach_across_cell_faces() {
        let sym = cubic_p1(10.0);
        let p = Point3::new(0.5, 5.0, 5.0);
        let region = BoundingBox::new(Point3::new(-1.0, 0.0, 0.0), Point3::new(11.0, 10.0, 10.0));

        let images = sym.images_within(&p, &region);
        assert_eq!(images.len(), 2);
        assert!(images.iter().any(|i| i.key.is_identity()));
        let shifted = images.iter().find(|i| !i.key.is_identity()).unwrap();
        assert_eq!(shifted.key, ImageKey::new(0, [1, 0, 0]));
        assert!((shifted.position - Point3::new(10.5, 5.0, 5.0)).norm() < 1e-9);
    }

    #[test]
    fn every_returned_image_lies_inside_region() {
        let cell = UnitCell::new(12.0, 15.0, 9.0, 90.0, 104.0, 90.0).unwrap();
        let two_fold = SymOp::new(
            Matrix3::from_diagonal(&Vector3::new(-1.0, 1.0, -1.0)),
            Vector3::new(0.0, 0.5, 0.0),
        );
        let sym = CrystalSymmetry::new(cell, &[SymOp::identity(), two_fold]);
        let region = BoundingBox::new(Point3::new(-5.0, -5.0, -5.0), Point3::new(20.0, 20.0, 20.0));
        let p = Point3::new(3.0, 4.0, 2.0);

        let images = sym.images_within(&p, &region);
        assert!(images.iter().any(|i| i.key.is_identity()));
        assert!(images.iter().any(|i| i.key.op == 1));
        for image in &images {
            assert!(region.contains(&image.position));
            let recomputed = sym.apply(image.key, &p).unwrap();
            assert!((recomputed - image.position).norm() < 1e-9);
        }
    }

    #[test]
    fn apply_rejects_unknown_operation() {
        let sym = cubic_p1(10.0);
        assert!(sym.apply(ImageKey::new(3, [0, 0, 0]), &Point3::origin()).is_none());
    }
}
