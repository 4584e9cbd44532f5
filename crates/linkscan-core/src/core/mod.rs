//! # Core Module
//!
//! Stateless building blocks for link detection.
//!
//! - **Structure representation** ([`models`]) - Atoms, residues, chains, models and declared connections
//! - **Chemical knowledge** ([`chemistry`]) - Elements, residue classification and link templates
//! - **Crystal symmetry** ([`symmetry`]) - Unit cells, symmetry operations and image generation
//! - **Geometry** ([`utils`]) - Distances, chiral volumes and bounding boxes
//!
//! Nothing in this layer knows about searching; the [`engine`](crate::engine)
//! builds its indices on top of these types.

pub mod chemistry;
pub mod models;
pub mod symmetry;
pub mod utils;
