use super::connection::Connection;
use super::ids::AtomRef;
use super::model::Model;
use crate::core::symmetry::cell::UnitCell;
use crate::core::symmetry::ops::SymOp;
use crate::core::symmetry::{CrystalSymmetry, ImageKey, NoSymmetry, SymImage, SymmetryProvider};
use crate::core::utils::geometry::BoundingBox;
use nalgebra::Point3;

/// A parsed coordinate file: its models, crystal information and declared connections.
#[derive(Debug, Clone, Default)]
pub struct Structure {
    pub name: String,
    pub models: Vec<Model>,
    pub cell: Option<UnitCell>,
    /// Hermann-Mauguin symbol, informational only.
    pub spacegroup_hm: String,
    /// Fully expanded operations of the space group, in fractional coordinates.
    pub symmetry_ops: Vec<SymOp>,
    pub connections: Vec<Connection>,
}

impl Structure {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Self::default()
        }
    }

    pub fn with_model(mut self, model: Model) -> Self {
        self.models.push(model);
        self
    }

    pub fn with_crystal(mut self, cell: UnitCell, spacegroup_hm: &str, ops: Vec<SymOp>) -> Self {
        self.cell = Some(cell);
        self.spacegroup_hm = spacegroup_hm.to_string();
        self.symmetry_ops = ops;
        self
    }

    pub fn add_connection(&mut self, connection: Connection) {
        self.connections.push(connection);
    }

    pub fn first_model(&self) -> Option<&Model> {
        self.models.first()
    }

    /// Symmetry images available for this structure.
    ///
    /// Without a unit cell, or with the 1 Å placeholder cell, only the identity
    /// exists. A cell with no operations is treated as P1.
    pub fn symmetry(&self) -> StructureSymmetry {
        match self.cell {
            Some(cell) if cell.is_crystal() => {
                StructureSymmetry::Crystal(CrystalSymmetry::new(cell, &self.symmetry_ops))
            }
            _ => StructureSymmetry::None(NoSymmetry),
        }
    }

    /// The first declared connection joining `a` and `b`, in either order.
    pub fn find_connection(&self, a: &AtomRef, b: &AtomRef) -> Option<&Connection> {
        self.connections.iter().find(|conn| conn.links(a, b))
    }
}

/// Symmetry provider chosen from the crystal information of a [`Structure`].
#[derive(Debug, Clone)]
pub enum StructureSymmetry {
    None(NoSymmetry),
    Crystal(CrystalSymmetry),
}

impl SymmetryProvider for StructureSymmetry {
    fn images_within(&self, position: &Point3<f64>, region: &BoundingBox) -> Vec<SymImage> {
        match self {
            StructureSymmetry::None(provider) => provider.images_within(position, region),
            StructureSymmetry::Crystal(provider) => provider.images_within(position, region),
        }
    }

    fn apply(&self, image: ImageKey, position: &Point3<f64>) -> Option<Point3<f64>> {
        match self {
            StructureSymmetry::None(provider) => provider.apply(image, position),
            StructureSymmetry::Crystal(provider) => provider.apply(image, position),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::chemistry::element::Element;
    use crate::core::models::atom::Atom;
    use crate::core::models::connection::ConnectionKind;

    fn two_atom_structure() -> (Structure, AtomRef, AtomRef) {
        let mut model = Model::new();
        let chain = model.add_chain("A");
        let cys = model.add_residue(chain, 12, None, "CYS").unwrap();
        let zn = model.add_residue(chain, 501, None, "ZN").unwrap();
        let sg = model
            .add_atom_to_residue(cys, Atom::new("SG", cys, Element::S, Point3::origin()))
            .unwrap();
        let zn_atom = model
            .add_atom_to_residue(zn, Atom::new("ZN", zn, Element::Zn, Point3::new(2.3, 0.0, 0.0)))
            .unwrap();
        let sg_ref = model.atom_ref(sg).unwrap();
        let zn_ref = model.atom_ref(zn_atom).unwrap();
        (Structure::new("test").with_model(model), sg_ref, zn_ref)
    }

    #[test]
    fn first_model_is_none_for_empty_structure() {
        assert!(Structure::new("empty").first_model().is_none());
    }

    #[test]
    fn symmetry_without_cell_is_identity_only() {
        let (structure, _, _) = two_atom_structure();
        assert!(matches!(structure.symmetry(), StructureSymmetry::None(_)));
    }

    #[test]
    fn symmetry_with_cell_and_no_ops_behaves_as_p1() {
        let cell = UnitCell::new(10.0, 10.0, 10.0, 90.0, 90.0, 90.0).unwrap();
        let (structure, _, _) = two_atom_structure();
        let structure = structure.with_crystal(cell, "P 1", Vec::new());
        let symmetry = structure.symmetry();
        let region = BoundingBox::new(Point3::new(-1.0, -1.0, -1.0), Point3::new(11.0, 11.0, 11.0));
        let images = symmetry.images_within(&Point3::new(0.5, 0.5, 0.5), &region);
        assert!(images.iter().any(|i| i.key.is_identity()));
        assert!(images.iter().any(|i| i.key == ImageKey::new(0, [1, 1, 1])));
    }

    #[test]
    fn placeholder_cell_yields_identity_image_only() {
        let placeholder = UnitCell::new(1.0, 1.0, 1.0, 90.0, 90.0, 90.0).unwrap();
        let (structure, _, _) = two_atom_structure();
        let structure = structure.with_crystal(placeholder, "P 1", vec![SymOp::identity()]);
        let symmetry = structure.symmetry();
        assert!(matches!(symmetry, StructureSymmetry::None(_)));

        let region = BoundingBox::new(Point3::new(-5.0, -5.0, -5.0), Point3::new(65.0, 65.0, 65.0));
        let images = symmetry.images_within(&Point3::origin(), &region);
        assert_eq!(images.len(), 1);
        assert!(images[0].key.is_identity());
    }

    #[test]
    fn find_connection_matches_either_order() {
        let (mut structure, sg, zn) = two_atom_structure();
        assert!(structure.find_connection(&sg, &zn).is_none());
        structure.add_connection(Connection::new("metalc1", ConnectionKind::MetalCoordination, zn, sg));
        assert_eq!(structure.find_connection(&sg, &zn).unwrap().id, "metalc1");
        assert_eq!(structure.find_connection(&zn, &sg).unwrap().id, "metalc1");
    }
}
