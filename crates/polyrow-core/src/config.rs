use serde::{Deserialize, Serialize};
use thiserror::Error as ThisError;

///
/// ConfigError
///

#[derive(Debug, ThisError)]
pub enum ConfigError {
    #[error("invalid mapper configuration: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("keyspace separator must not be empty")]
    EmptySeparator,
}

///
/// MapperConfig
///
/// Mapper-wide settings shared by every descriptor built through one
/// [`StatementManager`](crate::manager::StatementManager).
///
/// ```toml
/// [keyspace]
/// prefix = "staging"
/// separator = "_"
///
/// [validation]
/// mode = "first"
/// ```
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct MapperConfig {
    pub keyspace: KeyspaceConfig,
    pub validation: ValidationConfig,
}

impl MapperConfig {
    /// Parse and check a TOML document. Missing sections take their defaults.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(source)?;
        config.check()?;

        Ok(config)
    }

    fn check(&self) -> Result<(), ConfigError> {
        if self.keyspace.separator.is_empty() {
            return Err(ConfigError::EmptySeparator);
        }

        Ok(())
    }
}

///
/// KeyspaceConfig
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct KeyspaceConfig {
    /// Prepended to every keyspace base name, e.g. per environment.
    pub prefix: Option<String>,

    /// Joins the prefix, the base name and every resolved suffix.
    pub separator: String,
}

impl Default for KeyspaceConfig {
    fn default() -> Self {
        Self {
            prefix: None,
            separator: "_".to_string(),
        }
    }
}

///
/// ValidationConfig
///

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct ValidationConfig {
    pub mode: ValidationMode,
}

///
/// ValidationMode
///
/// How many cross-validation violations a type entity reports before its
/// construction is aborted.
///

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationMode {
    /// Collect every violation and report them together.
    #[default]
    All,

    /// Stop at the first violation.
    First,
}

///
/// TESTS
///
