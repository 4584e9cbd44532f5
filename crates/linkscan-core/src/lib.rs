//! # Linkscan Core Library
//!
//! Finds chemical links between atoms of a macromolecular structure that the
//! coordinate file does not record: metal coordination, disulfide bridges,
//! glycosidic and other inter-residue bonds. Candidates come from a
//! symmetry-aware neighbour search and are checked against a library of link
//! templates (bond length, residue constraints, chirality), with a
//! covalent-radius fallback for pairs no template describes.
//!
//! ## Architecture
//!
//! - **[`core`]: The Foundation.** Stateless data: the structure model, element and
//!   residue chemistry, link templates, crystal symmetry and geometry helpers.
//!
//! - **[`engine`]: The Logic Core.** The spatial cell index, the template index and the
//!   per-atom matcher, together with configuration, errors and progress reporting.
//!
//! - **[`workflows`]: The Public API.** [`workflows::link_search::find_possible_links`]
//!   runs the search end to end.
//!
//! ## Usage
//!
//! ```ignore
//! use linkscan::core::chemistry::{chemlink::ChemLinkLibrary, residues::ResidueCatalog};
//! use linkscan::engine::{matcher::LinkMatcher, template_index::{ReachPolicy, TemplateIndex}};
//!
//! let library = ChemLinkLibrary::load(Path::new("links.toml"))?;
//! let catalog = ResidueCatalog::standard();
//! let index = TemplateIndex::new(&library, &catalog, ReachPolicy::default());
//!
//! for m in LinkMatcher::new(&index).find_possible_links(&structure, 1.1, 1.2)? {
//!     println!("{}", m.describe(structure.first_model().unwrap()));
//! }
//! ```

pub mod core;
pub mod engine;
pub mod workflows;
