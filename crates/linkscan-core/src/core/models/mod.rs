//! # Core Models Module
//!
//! Data structures describing a macromolecular structure as the link search sees it.
//!
//! ## Key Components
//!
//! - [`atom`] - Atom sites with element, coordinates and conformer code
//! - [`residue`] - Residues identified by sequence number and insertion code
//! - [`chain`] - Chains holding residues in file order
//! - [`model`] - One model of the structure, owning atoms, residues and chains
//! - [`structure`] - Models plus unit cell, symmetry operations and declared connections
//! - [`connection`] - Bonds declared by the file (LINK / `struct_conn` records)
//! - [`ids`] - Slot-map keys, stable atom references and ordinal atom addresses
//!
//! ## Usage
//!
//! ```ignore
//! use linkscan::core::models::{atom::Atom, model::Model, structure::Structure};
//!
//! let mut model = Model::new();
//! let chain_id = model.add_chain("A");
//! let residue_id = model.add_residue(chain_id, 12, None, "CYS").unwrap();
//! model.add_atom_to_residue(residue_id, Atom::new("SG", residue_id, Element::S, position));
//!
//! let structure = Structure::new("1abc").with_model(model);
//! ```

pub mod atom;
pub mod chain;
pub mod connection;
pub mod ids;
pub mod model;
pub mod residue;
pub mod structure;
