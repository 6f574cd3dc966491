//! Error types for statement generation.

use thiserror::Error;

/// Errors raised while generating a statement.
///
/// All of these describe a mapping definition the engine cannot serve; none
/// are transient.
#[derive(Debug, Error)]
pub enum GizmoError {
    /// An UPDATE has neither condition columns in its name nor extra arguments.
    #[error(
        "unable to add conditions to UPDATE '{method}': name the properties in the method \
         (e.g. 'updateByIdAndName(record)') or add parameters (e.g. 'update(record, id, name)')"
    )]
    MissingCondition {
        /// The mapper method identifier.
        method: String,
    },

    /// A merge-based UPSERT names no key column.
    #[error("UPSERT '{method}' requires key column name(s) after 'On' (e.g. 'upsertRecordOnId')")]
    MissingKeyColumn {
        /// The mapper method identifier.
        method: String,
    },

    /// A merge-based UPSERT keys on a name that is not an insert-eligible field.
    #[error("UPSERT '{method}' keys on '{key}', which is not an insert-eligible field")]
    UnknownKeyColumn {
        /// The mapper method identifier.
        method: String,
        /// The key name taken from the identifier.
        key: String,
    },

    /// The mapper method declares no parameters.
    #[error("mapper method '{method}' must declare at least one parameter")]
    NoArguments {
        /// The mapper method identifier.
        method: String,
    },

    /// The method identifier starts with none of `insert`, `update`, `upsert`.
    #[error("unsupported mapper method: {0}")]
    UnsupportedMethod(String),

    /// The selected dialect has no UPSERT strategy.
    #[error("the {dialect} dialect does not support UPSERT")]
    UnsupportedUpsert {
        /// The dialect name.
        dialect: &'static str,
    },

    /// A dialect name did not match any known dialect.
    #[error("unknown dialect: {0}")]
    UnknownDialect(String),

    /// Generator configuration could not be parsed.
    #[error("invalid configuration: {0}")]
    Config(#[from] serde_json::Error),
}

/// Result type alias for statement generation.
pub type Result<T> = std::result::Result<T, GizmoError>;
