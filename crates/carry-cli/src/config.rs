//! CLI configuration file.
//!
//! Every section is optional; a missing default file means built-in
//! defaults. Command-line flags override file values.
//!
//! ```toml
//! [bond]
//! face_value = 100.0
//! frequency = 2
//!
//! [conventions]
//! reference_yield = 0.06
//! repo_basis = "act360"
//!
//! [solver]
//! method = "newton"
//! initial_guess = 0.03
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::info;

use carry_bonds::bond::DEFAULT_FACE_VALUE;
use carry_bonds::YieldSolverConfig;
use carry_core::types::Frequency;
use carry_futures::FuturesConventions;

use crate::error::{CliError, CliResult};

/// Bond defaults applied when a flag is omitted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BondDefaults {
    /// Face value.
    #[serde(default = "default_face_value")]
    pub face_value: f64,
    /// Coupon frequency.
    #[serde(default)]
    pub frequency: Frequency,
}

fn default_face_value() -> f64 {
    DEFAULT_FACE_VALUE
}

impl Default for BondDefaults {
    fn default() -> Self {
        Self {
            face_value: DEFAULT_FACE_VALUE,
            frequency: Frequency::default(),
        }
    }
}

/// Effective CLI configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Bond defaults.
    #[serde(default)]
    pub bond: BondDefaults,
    /// Futures contract conventions.
    #[serde(default)]
    pub conventions: FuturesConventions,
    /// Yield solver settings.
    #[serde(default)]
    pub solver: YieldSolverConfig,
}

impl AppConfig {
    /// Loads configuration from `path`, or from the default location.
    ///
    /// An explicit path must exist; the default file is optional.
    pub fn load(path: Option<&Path>) -> CliResult<Self> {
        match path {
            Some(path) if !path.exists() => Err(CliError::ConfigNotFound(path.to_path_buf())),
            Some(path) => Self::from_file(path),
            None => match default_path() {
                Some(path) if path.exists() => Self::from_file(&path),
                _ => Ok(Self::default()),
            },
        }
    }

    /// Loads and validates configuration from a TOML file.
    pub fn from_file(path: &Path) -> CliResult<Self> {
        info!("Loading configuration from {}", path.display());
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)
            .map_err(|e| CliError::Config(format!("{}: {e}", path.display())))?;
        config.validate()?;
        Ok(config)
    }

    /// Checks every section.
    pub fn validate(&self) -> CliResult<()> {
        if !self.bond.face_value.is_finite() || self.bond.face_value <= 0.0 {
            return Err(CliError::Config(format!(
                "bond.face_value must be positive, got {}",
                self.bond.face_value
            )));
        }
        self.conventions
            .validate()
            .map_err(|e| CliError::Config(e.to_string()))?;
        self.solver
            .validate()
            .map_err(|e| CliError::Config(e.to_string()))?;
        Ok(())
    }

    /// Renders the configuration as TOML.
    pub fn to_toml(&self) -> CliResult<String> {
        toml::to_string_pretty(self).map_err(|e| CliError::Config(e.to_string()))
    }
}

/// `<config dir>/carry/config.toml`, if the platform has a config dir.
pub fn default_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("carry").join("config.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use carry_bonds::SolverMethod;
    use carry_core::daycounts::DayCountBasis;

    #[test]
    fn test_empty_file_is_default() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_partial_sections() {
        let config: AppConfig = toml::from_str(
            r#"
            [bond]
            frequency = 4

            [conventions]
            repo_basis = "act365"

            [solver]
            method = "secant"
            "#,
        )
        .unwrap();

        assert_eq!(config.bond.frequency, Frequency::Quarterly);
        assert_eq!(config.bond.face_value, 100.0);
        assert_eq!(config.conventions.repo_basis, DayCountBasis::Act365);
        assert_eq!(config.conventions.reference_yield, 0.06);
        assert_eq!(config.solver.method, SolverMethod::Secant);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_values_rejected() {
        let config: AppConfig = toml::from_str("[bond]\nface_value = -1.0\n").unwrap();
        assert!(matches!(config.validate(), Err(CliError::Config(_))));

        let config: AppConfig = toml::from_str("[solver]\nmax_iterations = 0\n").unwrap();
        assert!(config.validate().is_err());

        assert!(toml::from_str::<AppConfig>("[bond]\nfrequency = 3\n").is_err());
    }

    #[test]
    fn test_round_trips_through_toml() {
        let config = AppConfig::default();
        let text = config.to_toml().unwrap();
        let parsed: AppConfig = toml::from_str(&text).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_explicit_missing_path() {
        let result = AppConfig::load(Some(Path::new("/nonexistent/carry.toml")));
        assert!(matches!(result, Err(CliError::ConfigNotFound(_))));
    }
}
