//! SQL dialect support.
//!
//! Dialects differ in how identifiers are quoted and in how an UPSERT is
//! expressed. The set of dialects is closed and selected by configuration.
//!
//! - **Generic**: ANSI double quotes, no UPSERT.
//! - **MySQL**: backtick quotes, UPSERT as
//!   `INSERT ... AS alias ON DUPLICATE KEY UPDATE`.
//! - **SQL Server**: double quotes, UPSERT as `MERGE ... WITH (HOLDLOCK)`.
//! - **Oracle**: double quotes around upper-cased identifiers, no UPSERT.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::GizmoError;

/// How a dialect renders an UPSERT.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertStrategy {
    /// The dialect has no UPSERT form.
    Unsupported,
    /// `INSERT ... ON DUPLICATE KEY UPDATE` against the table's unique keys.
    DuplicateKey,
    /// `MERGE` joined on the key columns named by the method.
    Merge,
}

/// A target SQL dialect.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    /// ANSI SQL.
    #[default]
    Generic,
    /// MySQL 8.0.19 or later.
    #[serde(alias = "mariadb")]
    MySql,
    /// Microsoft SQL Server.
    #[serde(alias = "mssql")]
    SqlServer,
    /// Oracle Database.
    Oracle,
}

impl Dialect {
    /// All dialects.
    pub const ALL: [Self; 4] = [Self::Generic, Self::MySql, Self::SqlServer, Self::Oracle];

    /// Returns the name of the dialect.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Generic => "generic",
            Self::MySql => "mysql",
            Self::SqlServer => "sqlserver",
            Self::Oracle => "oracle",
        }
    }

    /// Returns the identifier quote character.
    #[must_use]
    pub const fn identifier_quote(self) -> char {
        match self {
            Self::MySql => '`',
            Self::Generic | Self::SqlServer | Self::Oracle => '"',
        }
    }

    /// Returns whether resolved identifiers are upper-cased before quoting.
    #[must_use]
    pub const fn upper_cases_identifiers(self) -> bool {
        matches!(self, Self::Oracle)
    }

    /// Returns the UPSERT strategy of the dialect.
    #[must_use]
    pub const fn upsert_strategy(self) -> UpsertStrategy {
        match self {
            Self::MySql => UpsertStrategy::DuplicateKey,
            Self::SqlServer => UpsertStrategy::Merge,
            Self::Generic | Self::Oracle => UpsertStrategy::Unsupported,
        }
    }

    /// Returns whether the dialect supports UPSERT.
    #[must_use]
    pub const fn supports_upsert(self) -> bool {
        !matches!(self.upsert_strategy(), UpsertStrategy::Unsupported)
    }

    /// Quotes a table, schema or column name.
    ///
    /// Embedded quote characters are doubled.
    #[must_use]
    pub fn quote_identifier(self, name: &str) -> String {
        let quote = self.identifier_quote();
        let name = if self.upper_cases_identifiers() {
            name.to_uppercase()
        } else {
            name.to_string()
        };
        let mut escaped = String::with_capacity(name.len() + 2);
        escaped.push(quote);
        for c in name.chars() {
            if c == quote {
                escaped.push(quote);
            }
            escaped.push(c);
        }
        escaped.push(quote);
        escaped
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Dialect {
    type Err = GizmoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "generic" | "ansi" => Ok(Self::Generic),
            "mysql" | "mariadb" => Ok(Self::MySql),
            "sqlserver" | "mssql" => Ok(Self::SqlServer),
            "oracle" => Ok(Self::Oracle),
            _ => Err(GizmoError::UnknownDialect(s.to_string())),
        }
    }
}
