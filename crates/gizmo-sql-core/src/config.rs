//! Generator configuration.

use serde::Deserialize;

use crate::dialect::Dialect;
use crate::error::Result;

/// Settings a host passes when it sets up a [`Generator`](crate::Generator).
///
/// ```rust
/// use gizmo_sql_core::config::GeneratorConfig;
/// use gizmo_sql_core::dialect::Dialect;
///
/// let config = GeneratorConfig::from_json(r#"{ "dialect": "mssql" }"#).unwrap();
/// assert_eq!(config.dialect, Dialect::SqlServer);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GeneratorConfig {
    /// Target dialect.
    pub dialect: Dialect,
}

impl GeneratorConfig {
    /// Creates a configuration for `dialect`.
    #[must_use]
    pub const fn new(dialect: Dialect) -> Self {
        Self { dialect }
    }

    /// Parses a JSON configuration document.
    ///
    /// # Errors
    ///
    /// Returns [`GizmoError::Config`](crate::GizmoError::Config) if the
    /// document is malformed or names an unknown dialect.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
