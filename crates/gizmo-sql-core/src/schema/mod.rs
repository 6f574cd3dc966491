//! Record declarations.
//!
//! This module provides the trait implemented by the `#[derive(Record)]`
//! macro. A record type exposes a static declaration table: its simple type
//! name, optional table-level overrides, and its fields in declaration order
//! together with any per-field overrides. The field catalog turns that table
//! into resolved column descriptors.
//!
//! Records can also be declared by hand:
//!
//! ```rust
//! use gizmo_sql_core::schema::{FieldDef, Record, RecordDef, TableAttrs};
//!
//! struct Company {
//!     id: i64,
//!     name: String,
//! }
//!
//! impl Record for Company {
//!     fn record_def() -> &'static RecordDef {
//!         static FIELDS: &[FieldDef] = &[FieldDef::new("id"), FieldDef::new("name").updatable(false)];
//!         static DEF: RecordDef = RecordDef::new("Company")
//!             .table(TableAttrs::new().schema("crm"))
//!             .fields(FIELDS);
//!         &DEF
//!     }
//! }
//!
//! assert_eq!(Company::record_def().fields.len(), 2);
//! ```

/// A data-holding type whose fields map to database columns.
pub trait Record: 'static {
    /// Returns the static declaration of this record type.
    fn record_def() -> &'static RecordDef;
}

/// The declared shape of a record type.
#[derive(Debug, Clone, Copy)]
pub struct RecordDef {
    /// The simple (unqualified) type name, e.g. `UserAccount`.
    pub name: &'static str,
    /// Table-level overrides.
    pub table: TableAttrs,
    /// Fields declared directly on this type, in declaration order.
    pub fields: &'static [FieldDef],
    /// The type this record extends, whose fields follow this type's own.
    pub parent: Option<fn() -> &'static RecordDef>,
}

impl RecordDef {
    /// Creates a declaration with no fields and no overrides.
    #[must_use]
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            table: TableAttrs::new(),
            fields: &[],
            parent: None,
        }
    }

    /// Sets the table-level overrides.
    #[must_use]
    pub const fn table(mut self, table: TableAttrs) -> Self {
        self.table = table;
        self
    }

    /// Sets the directly declared fields.
    #[must_use]
    pub const fn fields(mut self, fields: &'static [FieldDef]) -> Self {
        self.fields = fields;
        self
    }

    /// Declares the parent record type.
    #[must_use]
    pub const fn extends(mut self, parent: fn() -> &'static RecordDef) -> Self {
        self.parent = Some(parent);
        self
    }

    /// Iterates over this declaration followed by its ancestors.
    pub fn lineage(&self) -> impl Iterator<Item = &RecordDef> {
        std::iter::successors(Some(self), |def| def.parent.map(|parent| parent()))
    }
}

/// Explicit table name, catalog and schema for a record type.
///
/// Empty strings are treated as absent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TableAttrs {
    /// Explicit table name.
    pub name: Option<&'static str>,
    /// Explicit catalog qualifier. Takes precedence over `schema`.
    pub catalog: Option<&'static str>,
    /// Explicit schema qualifier.
    pub schema: Option<&'static str>,
}

impl TableAttrs {
    /// Creates attributes with no overrides.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            name: None,
            catalog: None,
            schema: None,
        }
    }

    /// Sets the table name.
    #[must_use]
    pub const fn name(mut self, name: &'static str) -> Self {
        self.name = Some(name);
        self
    }

    /// Sets the catalog qualifier.
    #[must_use]
    pub const fn catalog(mut self, catalog: &'static str) -> Self {
        self.catalog = Some(catalog);
        self
    }

    /// Sets the schema qualifier.
    #[must_use]
    pub const fn schema(mut self, schema: &'static str) -> Self {
        self.schema = Some(schema);
        self
    }
}

/// What kind of value a field holds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ValueShape {
    /// A single value (number, text, optional value, nested scalar type).
    #[default]
    Scalar,
    /// A list or set of values.
    Sequence,
    /// A keyed collection.
    Mapping,
}

impl ValueShape {
    /// Returns whether values of this shape can be bound to a single column.
    #[must_use]
    pub const fn is_scalar(self) -> bool {
        matches!(self, Self::Scalar)
    }
}

/// Per-field column overrides.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnAttrs {
    /// Explicit column name.
    pub name: Option<&'static str>,
    /// Whether the column takes part in INSERT statements.
    pub insertable: bool,
    /// Whether the column takes part in UPDATE statements.
    pub updatable: bool,
}

impl ColumnAttrs {
    /// Creates attributes with no explicit name, eligible for insert and update.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            name: None,
            insertable: true,
            updatable: true,
        }
    }
}

impl Default for ColumnAttrs {
    fn default() -> Self {
        Self::new()
    }
}

/// A field declared on a record type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDef {
    /// The field name as written on the record (camel case).
    pub name: &'static str,
    /// The shape of the field's value.
    pub shape: ValueShape,
    /// Column overrides.
    pub column: ColumnAttrs,
    /// Excludes the field from the catalog altogether.
    pub skip: bool,
}

impl FieldDef {
    /// Declares a scalar field with default column attributes.
    #[must_use]
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            shape: ValueShape::Scalar,
            column: ColumnAttrs::new(),
            skip: false,
        }
    }

    /// Sets the value shape.
    #[must_use]
    pub const fn shape(mut self, shape: ValueShape) -> Self {
        self.shape = shape;
        self
    }

    /// Sets an explicit column name.
    #[must_use]
    pub const fn column(mut self, name: &'static str) -> Self {
        self.column.name = Some(name);
        self
    }

    /// Sets insert eligibility.
    #[must_use]
    pub const fn insertable(mut self, insertable: bool) -> Self {
        self.column.insertable = insertable;
        self
    }

    /// Sets update eligibility.
    #[must_use]
    pub const fn updatable(mut self, updatable: bool) -> Self {
        self.column.updatable = updatable;
        self
    }

    /// Marks the field as not persisted.
    #[must_use]
    pub const fn skip(mut self) -> Self {
        self.skip = true;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    static BASE_FIELDS: &[FieldDef] = &[FieldDef::new("createdAt"), FieldDef::new("version")];
    static BASE: RecordDef = RecordDef::new("Entity").fields(BASE_FIELDS);

    fn base() -> &'static RecordDef {
        &BASE
    }

    static CHILD_FIELDS: &[FieldDef] = &[FieldDef::new("id"), FieldDef::new("total")];
    static CHILD: RecordDef = RecordDef::new("Invoice").fields(CHILD_FIELDS).extends(base);

    #[test]
    fn test_field_def_defaults() {
        let field = FieldDef::new("name");
        assert_eq!(field.shape, ValueShape::Scalar);
        assert_eq!(field.column, ColumnAttrs::new());
        assert!(field.column.insertable);
        assert!(field.column.updatable);
        assert!(!field.skip);
    }

    #[test]
    fn test_field_def_overrides() {
        let field = FieldDef::new("id").column("invoice_id").updatable(false);
        assert_eq!(field.column.name, Some("invoice_id"));
        assert!(field.column.insertable);
        assert!(!field.column.updatable);
    }

    #[test]
    fn test_lineage_walks_parents() {
        let names: Vec<&str> = CHILD.lineage().map(|def| def.name).collect();
        assert_eq!(names, ["Invoice", "Entity"]);
    }

    #[test]
    fn test_table_attrs_builder() {
        let attrs = TableAttrs::new().name("users").schema("app");
        assert_eq!(attrs.name, Some("users"));
        assert_eq!(attrs.catalog, None);
        assert_eq!(attrs.schema, Some("app"));
    }
}
