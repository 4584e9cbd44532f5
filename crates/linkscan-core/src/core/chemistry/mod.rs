//! Chemistry reference data consumed by the link search.
//!
//! - [`element`] - Element identities and covalent radii
//! - [`residues`] - Residue-name classification (amino acid, nucleic acid, sugar, ...)
//! - [`chemlink`] - Link templates: side constraints, bond and chirality restraints

pub mod chemlink;
pub mod element;
pub mod residues;
