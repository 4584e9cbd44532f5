//! # Workflows Module
//!
//! Top-level entry points that run a complete procedure on a structure.
//!
//! - **Link Search** ([`link_search`]) - Builds the spatial and template indices,
//!   scans every eligible atom and cross-references the proposed links against
//!   the connections the structure already declares.

pub mod link_search;
