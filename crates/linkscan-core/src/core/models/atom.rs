use super::ids::ResidueId;
use crate::core::chemistry::element::Element;
use nalgebra::Point3;

/// A single atom site as read from a coordinate file.
///
/// Atom names are only unique within a residue and conformer; alternate
/// conformers of the same atom share a name and differ in `altloc`.
#[derive(Debug, Clone, PartialEq)]
pub struct Atom {
    /// The name of the atom (e.g., "CA", "SG", "ZN").
    pub name: String,
    /// The ID of the parent residue this atom belongs to.
    pub residue_id: ResidueId,
    pub element: Element,
    /// The 3D coordinates of the atom in Angstroms.
    pub position: Point3<f64>,
    /// Fractional occupancy in (0, 1].
    pub occupancy: f64,
    /// Alternate-location code; `None` when the atom has a single conformer.
    pub altloc: Option<char>,
}

impl Atom {
    /// Creates a fully occupied atom without an alternate-location code.
    ///
    /// # Arguments
    ///
    /// * `name` - The name of the atom.
    /// * `residue_id` - The ID of the residue this atom belongs to.
    /// * `element` - The chemical element.
    /// * `position` - The 3D coordinates of the atom.
    pub fn new(name: &str, residue_id: ResidueId, element: Element, position: Point3<f64>) -> Self {
        Self {
            name: name.to_string(),
            residue_id,
            element,
            position,
            occupancy: 1.0,
            altloc: None,
        }
    }

    pub fn with_altloc(mut self, altloc: char, occupancy: f64) -> Self {
        self.altloc = Some(altloc);
        self.occupancy = occupancy;
        self
    }

    /// True when this atom can coexist with an atom of conformer `altloc`.
    ///
    /// Blank codes on either side are compatible with everything.
    pub fn is_compatible_conformer(&self, altloc: Option<char>) -> bool {
        match (self.altloc, altloc) {
            (Some(mine), Some(other)) => mine == other,
            _ => true,
        }
    }
}
