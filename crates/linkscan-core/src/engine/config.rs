use thiserror::Error;

/// Smallest spatial-index cutoff used regardless of the template library.
pub const DEFAULT_MIN_CUTOFF: f64 = 5.0;

#[derive(Debug, Error, PartialEq, Clone)]
pub enum ConfigError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),

    #[error("Parameter '{name}' must be a positive finite number, got {value}")]
    InvalidParameter { name: &'static str, value: f64 },
}

/// How to choose one template when several pass for the same atom pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TieBreak {
    /// Prefer templates pinned to more residue names, then the smallest
    /// deviation from the ideal bond length, then the smallest template id.
    #[default]
    MostSpecific,
    /// Keep whichever passing template was enumerated last.
    LastEnumerated,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LinkSearchConfig {
    /// Multiplier on template bond lengths (and on per-atom reach).
    pub bond_margin: f64,
    /// Multiplier on the covalent-radius sum for template-less contacts.
    pub radius_margin: f64,
    pub min_cutoff: f64,
    pub tie_break: TieBreak,
}

impl LinkSearchConfig {
    /// Spatial-index cutoff for a library whose longest bond is `global_max_dist`.
    pub fn cutoff(&self, global_max_dist: f64) -> f64 {
        self.min_cutoff.max(global_max_dist * self.bond_margin)
    }
}

#[derive(Default)]
pub struct LinkSearchConfigBuilder {
    bond_margin: Option<f64>,
    radius_margin: Option<f64>,
    min_cutoff: Option<f64>,
    tie_break: Option<TieBreak>,
}

impl LinkSearchConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bond_margin(mut self, margin: f64) -> Self {
        self.bond_margin = Some(margin);
        self
    }
    pub fn radius_margin(mut self, margin: f64) -> Self {
        self.radius_margin = Some(margin);
        self
    }
    pub fn min_cutoff(mut self, cutoff: f64) -> Self {
        self.min_cutoff = Some(cutoff);
        self
    }
    pub fn tie_break(mut self, tie_break: TieBreak) -> Self {
        self.tie_break = Some(tie_break);
        self
    }

    pub fn build(self) -> Result<LinkSearchConfig, ConfigError> {
        let bond_margin = positive(
            "bond_margin",
            self.bond_margin
                .ok_or(ConfigError::MissingParameter("bond_margin"))?,
        )?;
        let radius_margin = positive(
            "radius_margin",
            self.radius_margin
                .ok_or(ConfigError::MissingParameter("radius_margin"))?,
        )?;
        let min_cutoff = positive("min_cutoff", self.min_cutoff.unwrap_or(DEFAULT_MIN_CUTOFF))?;

        Ok(LinkSearchConfig {
            bond_margin,
            radius_margin,
            min_cutoff,
            tie_break: self.tie_break.unwrap_or_default(),
        })
    }
}

fn positive(name: &'static str, value: f64) -> Result<f64, ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(ConfigError::InvalidParameter { name, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_with_required_parameters_uses_defaults_for_the_rest() {
        let config = LinkSearchConfigBuilder::new()
            .bond_margin(1.1)
            .radius_margin(1.2)
            .build()
            .unwrap();
        assert_eq!(config.bond_margin, 1.1);
        assert_eq!(config.radius_margin, 1.2);
        assert_eq!(config.min_cutoff, DEFAULT_MIN_CUTOFF);
        assert_eq!(config.tie_break, TieBreak::MostSpecific);
    }

    #[test]
    fn build_fails_without_bond_margin() {
        let result = LinkSearchConfigBuilder::new().radius_margin(1.2).build();
        assert_eq!(result, Err(ConfigError::MissingParameter("bond_margin")));
    }

    #[test]
    fn build_fails_without_radius_margin() {
        let result = LinkSearchConfigBuilder::new().bond_margin(1.1).build();
        assert_eq!(result, Err(ConfigError::MissingParameter("radius_margin")));
    }

    #[test]
    fn build_rejects_non_positive_or_non_finite_values() {
        let zero = LinkSearchConfigBuilder::new()
            .bond_margin(0.0)
            .radius_margin(1.2)
            .build();
        assert!(matches!(
            zero,
            Err(ConfigError::InvalidParameter { name: "bond_margin", .. })
        ));

        let nan = LinkSearchConfigBuilder::new()
            .bond_margin(1.1)
            .radius_margin(f64::NAN)
            .build();
        assert!(matches!(
            nan,
            Err(ConfigError::InvalidParameter { name: "radius_margin", .. })
        ));

        let negative_cutoff = LinkSearchConfigBuilder::new()
            .bond_margin(1.1)
            .radius_margin(1.2)
            .min_cutoff(-3.0)
            .build();
        assert!(matches!(
            negative_cutoff,
            Err(ConfigError::InvalidParameter { name: "min_cutoff", .. })
        ));
    }

    #[test]
    fn cutoff_never_drops_below_minimum() {
        let config = LinkSearchConfigBuilder::new()
            .bond_margin(1.1)
            .radius_margin(1.2)
            .build()
            .unwrap();
        assert_eq!(config.cutoff(2.34), 5.0);
        assert!((config.cutoff(5.0) - 5.5).abs() < 1e-12);
    }

    #[test]
    fn tie_break_can_be_overridden() {
        let config = LinkSearchConfigBuilder::new()
            .bond_margin(1.1)
            .radius_margin(1.2)
            .tie_break(TieBreak::LastEnumerated)
            .build()
            .unwrap();
        assert_eq!(config.tie_break, TieBreak::LastEnumerated);
    }
}
