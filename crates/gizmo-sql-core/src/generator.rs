//! Statement generation entry point.
//!
//! The [`Generator`] is what a host runtime calls for each mapper method
//! invocation: it looks up the record's fields in its catalog, parses the
//! method identifier and renders the statement in its configured dialect.

use std::any::type_name;
use std::sync::Arc;

use tracing::debug;

use crate::builder::StatementBuilder;
use crate::call::MapperCall;
use crate::catalog::FieldCatalog;
use crate::config::GeneratorConfig;
use crate::dialect::Dialect;
use crate::error::{GizmoError, Result};
use crate::intent::{MethodIntent, OperationFamily};
use crate::schema::Record;

/// Generates INSERT, UPDATE and UPSERT statements for record types.
///
/// Cloning is cheap and clones share the field catalog.
#[derive(Debug, Clone)]
pub struct Generator {
    dialect: Dialect,
    catalog: Arc<FieldCatalog>,
}

impl Generator {
    /// Creates a generator with a fresh catalog.
    #[must_use]
    pub fn new(dialect: Dialect) -> Self {
        Self::with_catalog(dialect, Arc::new(FieldCatalog::new()))
    }

    /// Creates a generator sharing an existing catalog.
    #[must_use]
    pub const fn with_catalog(dialect: Dialect, catalog: Arc<FieldCatalog>) -> Self {
        Self { dialect, catalog }
    }

    /// Creates a generator from configuration.
    #[must_use]
    pub const fn from_config(config: &GeneratorConfig, catalog: Arc<FieldCatalog>) -> Self {
        Self::with_catalog(config.dialect, catalog)
    }

    /// The configured dialect.
    #[must_use]
    pub const fn dialect(&self) -> Dialect {
        self.dialect
    }

    /// The field catalog.
    #[must_use]
    pub fn catalog(&self) -> &FieldCatalog {
        &self.catalog
    }

    /// Generates the statement the call's method identifier asks for.
    ///
    /// # Errors
    ///
    /// - [`GizmoError::UnsupportedMethod`] if the identifier names no operation.
    /// - [`GizmoError::NoArguments`] if the method declares no parameters.
    /// - The errors of [`Self::update`] and [`Self::upsert`].
    pub fn generate<R: Record>(&self, call: &MapperCall) -> Result<String> {
        let intent = MethodIntent::parse(call.method())?;
        self.render::<R>(call, &intent)
    }

    /// Generates an INSERT for `R`.
    ///
    /// # Errors
    ///
    /// Returns [`GizmoError::NoArguments`] if the method declares no parameters.
    pub fn insert<R: Record>(&self, call: &MapperCall) -> Result<String> {
        self.render::<R>(call, &MethodIntent::for_family(OperationFamily::Insert, call.method()))
    }

    /// Generates an UPDATE for `R`.
    ///
    /// # Errors
    ///
    /// - [`GizmoError::NoArguments`] if the method declares no parameters.
    /// - [`GizmoError::MissingCondition`] if no WHERE predicate can be derived.
    pub fn update<R: Record>(&self, call: &MapperCall) -> Result<String> {
        self.render::<R>(call, &MethodIntent::for_family(OperationFamily::Update, call.method()))
    }

    /// Generates an UPSERT for `R`.
    ///
    /// # Errors
    ///
    /// - [`GizmoError::NoArguments`] if the method declares no parameters.
    /// - [`GizmoError::UnsupportedUpsert`] if the dialect has no UPSERT form.
    /// - [`GizmoError::MissingKeyColumn`] if a merge UPSERT names no key.
    /// - [`GizmoError::UnknownKeyColumn`] if a merge UPSERT key is not an
    ///   insert-eligible field.
    pub fn upsert<R: Record>(&self, call: &MapperCall) -> Result<String> {
        self.render::<R>(call, &MethodIntent::for_family(OperationFamily::Upsert, call.method()))
    }

    fn render<R: Record>(&self, call: &MapperCall, intent: &MethodIntent) -> Result<String> {
        if call.parameters().is_empty() {
            return Err(GizmoError::NoArguments {
                method: call.method().to_string(),
            });
        }

        let fields = self.catalog.fields::<R>();
        let builder = StatementBuilder::new(self.dialect, R::record_def(), &fields);
        debug!(
            record = type_name::<R>(),
            method = call.method(),
            operation = %intent.family,
            dialect = %self.dialect,
            "generating statement"
        );
        match intent.family {
            OperationFamily::Insert => Ok(builder.insert()),
            OperationFamily::Update => builder.update(call, &intent.tokens),
            OperationFamily::Upsert => builder.upsert(call, &intent.tokens),
        }
    }
}

impl Default for Generator {
    fn default() -> Self {
        Self::new(Dialect::default())
    }
}
