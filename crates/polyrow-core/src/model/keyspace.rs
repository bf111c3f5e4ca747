use crate::{config::KeyspaceConfig, model::ConversionError};

///
/// KeyspaceModel
///
/// Keyspace annotation: a base name plus the ordered suffix types that
/// parameterize it. Each suffix type is filled from the keyspace key field
/// declaring that type.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct KeyspaceModel {
    name: &'static str,
    suffixes: Vec<&'static str>,
}

impl KeyspaceModel {
    #[must_use]
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            suffixes: Vec::new(),
        }
    }

    /// Append a suffix type; suffixes are applied in declaration order.
    #[must_use]
    pub fn suffix(mut self, suffix_type: &'static str) -> Self {
        self.suffixes.push(suffix_type);
        self
    }

    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    #[must_use]
    pub fn suffixes(&self) -> &[&'static str] {
        &self.suffixes
    }

    /// Keyspace name before suffix resolution, with the configured prefix.
    #[must_use]
    pub fn base_name(&self, config: &KeyspaceConfig) -> String {
        match config.prefix.as_deref() {
            Some(prefix) if !prefix.is_empty() => {
                format!("{prefix}{}{}", config.separator, self.name)
            }
            _ => self.name.to_string(),
        }
    }

    /// Resolve the full keyspace name, asking `suffix_value` for the raw value
    /// of each suffix type in order.
    pub fn resolve<F>(
        &self,
        config: &KeyspaceConfig,
        mut suffix_value: F,
    ) -> Result<String, ConversionError>
    where
        F: FnMut(&'static str) -> Result<String, ConversionError>,
    {
        let mut name = self.base_name(config);

        for &suffix_type in &self.suffixes {
            let value = suffix_value(suffix_type)?;
            name.push_str(&config.separator);
            name.push_str(&sanitize(&value));
        }

        Ok(name)
    }
}

/// Map a raw suffix value onto the keyspace identifier alphabet.
#[must_use]
pub fn sanitize(value: &str) -> String {
    value
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_lowercase()
            } else {
                '_'
            }
        })
        .collect()
}

///
/// TESTS
///
