use thiserror::Error;

use super::config::ConfigError;
use crate::core::symmetry::SymmetryError;

#[derive(Debug, Error)]
pub enum LinkError {
    #[error("Structure contains no models")]
    EmptyStructure,

    #[error("Invalid link search configuration: {source}")]
    Config {
        #[from]
        source: ConfigError,
    },

    #[error("Symmetry setup failed: {source}")]
    Symmetry {
        #[from]
        source: SymmetryError,
    },
}
