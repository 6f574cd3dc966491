//! # gizmo-sql-core
//!
//! Convention-driven SQL statement generation for mapper methods.
//!
//! Given a record type and the identifier of the mapper method being called,
//! this crate synthesizes INSERT, UPDATE and dialect-specific UPSERT text with
//! `#{name}` placeholders, so that no SQL has to be written per operation.
//!
//! - Field names are converted to columns (`lastName` → `last_name`) unless
//!   the record declares explicit names.
//! - `insert*` methods insert every insert-eligible field.
//! - `update*` methods set every update-eligible field and take their WHERE
//!   columns from the words the identifier separates with `By` and `And`
//!   (`updateByIdAndLastName`) or, failing that, from the parameters
//!   following the record.
//! - `upsert*` methods render MySQL `on duplicate key update` or SQL Server
//!   `merge`, the latter joined on the words separated by `On` and `And`
//!   (`upsertCompanyOnId`).
//!
//! ## Example
//!
//! ```rust
//! use gizmo_sql_core::{Dialect, Generator, MapperCall};
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
//! let generator = Generator::new(Dialect::MySql);
//! let call = MapperCall::new("updateByIdAndLastName").param("user");
//! let sql = generator.generate::<User>(&call).unwrap();
//!
//! assert_eq!(
//!     sql,
//!     "update `user` set `id` = #{id}, `name` = #{name} \
//!      where `id` = #{id} and `last_name` = #{lastName}"
//! );
//! ```
//!
//! Records are normally declared with `#[derive(Record)]` from
//! `gizmo-sql-derive`.

pub mod builder;
pub mod call;
pub mod catalog;
pub mod config;
pub mod dialect;
mod error;
pub mod generator;
pub mod intent;
pub mod naming;
pub mod schema;

pub use call::{Binding, MapperCall};
pub use catalog::{FieldCatalog, FieldDescriptor};
pub use config::GeneratorConfig;
pub use dialect::{Dialect, UpsertStrategy};
pub use error::{GizmoError, Result};
pub use generator::Generator;
pub use intent::{MethodIntent, OperationFamily};
pub use schema::{ColumnAttrs, FieldDef, Record, RecordDef, TableAttrs, ValueShape};
