//! # Engine Module
//!
//! The link search itself: the indices built once per run and the per-atom
//! matching that runs on top of them.
//!
//! - **Configuration** ([`config`]) - Bond and radius margins, cutoff floor, tie-break policy
//! - **Error Handling** ([`error`]) - Failures raised at the search boundary
//! - **Progress Monitoring** ([`progress`]) - Optional callback for phase and task events
//! - **Spatial Index** ([`subcells`]) - Uniform grid over atoms and their symmetry images
//! - **Template Index** ([`template_index`]) - Name-pair lookup, per-atom reach and residue groups
//! - **Matching** ([`matcher`]) - Dedup rules, orientation, chirality, tie-break and radius fallback
//!
//! Both indices are immutable once built, so the per-atom scan may run on
//! several threads with the `parallel` feature.

pub mod config;
pub mod error;
pub mod matcher;
pub mod progress;
pub mod subcells;
pub mod template_index;
