//! Statement rendering.
//!
//! A [`StatementBuilder`] pairs a dialect with a record declaration and its
//! catalog fields, and renders INSERT, UPDATE and UPSERT text with `#{name}`
//! placeholders. Placeholder values are never interpolated; the host binds
//! them when the statement runs.
//!
//! # Example
//!
//! ```rust
//! use gizmo_sql_core::builder::StatementBuilder;
//! use gizmo_sql_core::catalog::FieldCatalog;
//! use gizmo_sql_core::dialect::Dialect;
//! use gizmo_sql_core::schema::{FieldDef, Record, RecordDef};
//!
//! struct User;
//!
//! impl Record for User {
//!     fn record_def() -> &'static RecordDef {
//!         static FIELDS: &[FieldDef] = &[FieldDef::new("id"), FieldDef::new("name")];
//!         static DEF: RecordDef = RecordDef::new("User").fields(FIELDS);
//!         &DEF
//!     }
//! }
//!
//! let catalog = FieldCatalog::new();
//! let fields = catalog.fields::<User>();
//! let sql = StatementBuilder::new(Dialect::MySql, User::record_def(), &fields).insert();
//!
//! assert_eq!(sql, "insert into `user` (`id`, `name`) values (#{id}, #{name})");
//! ```

mod insert;
mod update;
mod upsert;

use crate::catalog::{FieldDescriptor, catalog_or_schema, condition_column, table_name};
use crate::dialect::Dialect;
use crate::schema::RecordDef;

/// Renders statements for one record type in one dialect.
#[derive(Debug, Clone, Copy)]
pub struct StatementBuilder<'a> {
    dialect: Dialect,
    record: &'a RecordDef,
    fields: &'a [FieldDescriptor],
}

impl<'a> StatementBuilder<'a> {
    /// Creates a builder over `fields`, the catalog list for `record`.
    #[must_use]
    pub const fn new(dialect: Dialect, record: &'a RecordDef, fields: &'a [FieldDescriptor]) -> Self {
        Self {
            dialect,
            record,
            fields,
        }
    }

    /// The dialect statements are rendered in.
    #[must_use]
    pub const fn dialect(&self) -> Dialect {
        self.dialect
    }

    /// The escaped, optionally qualified table reference.
    #[must_use]
    pub fn table_ref(&self) -> String {
        let table = self.dialect.quote_identifier(&table_name(self.record));
        match catalog_or_schema(self.record) {
            Some(qualifier) => format!("{}.{table}", self.dialect.quote_identifier(qualifier)),
            None => table,
        }
    }

    fn insertable(&self) -> impl Iterator<Item = &'a FieldDescriptor> {
        self.fields.iter().filter(|field| field.insertable())
    }

    fn updatable(&self) -> impl Iterator<Item = &'a FieldDescriptor> {
        self.fields.iter().filter(|field| field.updatable())
    }

    fn quote(&self, column: &str) -> String {
        self.dialect.quote_identifier(column)
    }

    /// The escaped column for a condition or key name.
    fn condition_column(&self, name: &str) -> String {
        self.quote(&condition_column(self.fields, name))
    }
}

/// Renders a `#{name}` or `#{prefix.name}` placeholder.
#[must_use]
pub fn placeholder(prefix: Option<&str>, name: &str) -> String {
    match prefix {
        Some(prefix) => format!("#{{{prefix}.{name}}}"),
        None => format!("#{{{name}}}"),
    }
}
