//! Field catalog and column resolution.
//!
//! The catalog turns a record declaration into an ordered list of
//! [`FieldDescriptor`]s, one per persistable field, and memoizes the list per
//! record type. Fields declared on the type come first, followed by the fields
//! of each ancestor in turn. Insert and update views are filtered from the
//! same cached list.

use std::any::{TypeId, type_name};
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use tracing::{debug, trace};

use crate::naming::to_column_form;
use crate::schema::{FieldDef, Record, RecordDef, ValueShape};

/// A persistable field with its resolved column name and eligibility.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
    name: &'static str,
    column: String,
    shape: ValueShape,
    insertable: bool,
    updatable: bool,
}

impl FieldDescriptor {
    /// Resolves a declared field.
    ///
    /// Sequence and mapping fields are never insertable or updatable.
    #[must_use]
    pub fn resolve(field: &FieldDef) -> Self {
        let column = non_empty(field.column.name)
            .map_or_else(|| to_column_form(field.name), str::to_string);
        let scalar = field.shape.is_scalar();
        Self {
            name: field.name,
            column,
            shape: field.shape,
            insertable: scalar && field.column.insertable,
            updatable: scalar && field.column.updatable,
        }
    }

    /// The field name, used as the placeholder name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// The resolved column name, before dialect escaping.
    #[must_use]
    pub fn column(&self) -> &str {
        &self.column
    }

    /// The declared value shape.
    #[must_use]
    pub const fn shape(&self) -> ValueShape {
        self.shape
    }

    /// Whether the field takes part in INSERT statements.
    #[must_use]
    pub const fn insertable(&self) -> bool {
        self.insertable
    }

    /// Whether the field takes part in UPDATE statements.
    #[must_use]
    pub const fn updatable(&self) -> bool {
        self.updatable
    }
}

/// Memoized field lists keyed by record type.
///
/// Entries are written once and never modified, so concurrent callers only
/// ever observe complete lists. Two callers racing on the same new type may
/// both compute it; the first insert wins.
#[derive(Debug, Default)]
pub struct FieldCatalog {
    inner: RwLock<HashMap<TypeId, Arc<[FieldDescriptor]>>>,
}

impl FieldCatalog {
    /// Creates an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns every persistable field of `R` in catalog order.
    pub fn fields<R: Record>(&self) -> Arc<[FieldDescriptor]> {
        let key = TypeId::of::<R>();
        {
            let map = self.inner.read().unwrap_or_else(PoisonError::into_inner);
            if let Some(fields) = map.get(&key) {
                trace!(record = type_name::<R>(), "field catalog hit");
                return Arc::clone(fields);
            }
        }

        let computed: Arc<[FieldDescriptor]> = collect_fields(R::record_def()).into();
        debug!(
            record = type_name::<R>(),
            fields = computed.len(),
            "field catalog entry computed"
        );

        let mut map = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(map.entry(key).or_insert(computed))
    }

    /// Returns the fields of `R` accepted by `filter`, in catalog order.
    pub fn fields_where<R, F>(&self, filter: F) -> Vec<FieldDescriptor>
    where
        R: Record,
        F: Fn(&FieldDescriptor) -> bool,
    {
        self.fields::<R>()
            .iter()
            .filter(|field| filter(*field))
            .cloned()
            .collect()
    }

    /// Returns the insert-eligible fields of `R`.
    pub fn insertable<R: Record>(&self) -> Vec<FieldDescriptor> {
        self.fields_where::<R, _>(FieldDescriptor::insertable)
    }

    /// Returns the update-eligible fields of `R`.
    pub fn updatable<R: Record>(&self) -> Vec<FieldDescriptor> {
        self.fields_where::<R, _>(FieldDescriptor::updatable)
    }

    /// Returns the number of record types cached so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Returns whether no record type has been cached yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Collects the persistable fields of `def` and its ancestors.
#[must_use]
pub fn collect_fields(def: &RecordDef) -> Vec<FieldDescriptor> {
    def.lineage()
        .flat_map(|def| def.fields.iter())
        .filter(|field| !field.skip)
        .map(FieldDescriptor::resolve)
        .collect()
}

/// Returns the table name: the explicit name, else the converted type name.
#[must_use]
pub fn table_name(def: &RecordDef) -> String {
    non_empty(def.table.name).map_or_else(|| to_column_form(def.name), str::to_string)
}

/// Returns the table qualifier: the catalog if set, else the schema if set.
#[must_use]
pub fn catalog_or_schema(def: &RecordDef) -> Option<&'static str> {
    non_empty(def.table.catalog).or_else(|| non_empty(def.table.schema))
}

/// Resolves a condition or key name to a column.
///
/// A name matching a catalog field takes that field's column, so explicit
/// column names apply; any other name is converted to column form.
#[must_use]
pub fn condition_column(fields: &[FieldDescriptor], name: &str) -> String {
    fields
        .iter()
        .find(|field| field.name == name)
        .map_or_else(|| to_column_form(name), |field| field.column.clone())
}

fn non_empty(value: Option<&'static str>) -> Option<&'static str> {
    value.filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::TableAttrs;

    struct Plain;

    impl Record for Plain {
        fn record_def() -> &'static RecordDef {
            static DEF: RecordDef = RecordDef::new("Plain");
            &DEF
        }
    }

    struct Audited;

    impl Record for Audited {
        fn record_def() -> &'static RecordDef {
            static FIELDS: &[FieldDef] = &[
                FieldDef::new("createdBy"),
                FieldDef::new("tags").shape(ValueShape::Sequence),
            ];
            static DEF: RecordDef = RecordDef::new("Audited").fields(FIELDS);
            &DEF
        }
    }

    struct UserAccount;

    impl Record for UserAccount {
        fn record_def() -> &'static RecordDef {
            static FIELDS: &[FieldDef] = &[
                FieldDef::new("id").updatable(false),
                FieldDef::new("lastName").column("surname"),
                FieldDef::new("password").insertable(false),
                FieldDef::new("session").skip(),
                FieldDef::new("attributes").shape(ValueShape::Mapping),
            ];
            static DEF: RecordDef = RecordDef::new("UserAccount")
                .table(TableAttrs::new().schema("app"))
                .fields(FIELDS)
                .extends(Audited::record_def);
            &DEF
        }
    }

    fn names(fields: &[FieldDescriptor]) -> Vec<&'static str> {
        fields.iter().map(FieldDescriptor::name).collect()
    }

    #[test]
    fn test_empty_record_yields_empty_list() {
        let catalog = FieldCatalog::new();
        assert!(catalog.fields::<Plain>().is_empty());
        assert!(catalog.insertable::<Plain>().is_empty());
    }

    #[test]
    fn test_subtype_fields_precede_supertype_fields() {
        let catalog = FieldCatalog::new();
        assert_eq!(
            names(&catalog.fields::<UserAccount>()),
            ["id", "lastName", "password", "attributes", "createdBy", "tags"]
        );
    }

    #[test]
    fn test_collections_are_never_eligible() {
        let catalog = FieldCatalog::new();
        let fields = catalog.fields::<UserAccount>();
        let tags = fields.iter().find(|f| f.name() == "tags").unwrap();
        assert!(!tags.insertable());
        assert!(!tags.updatable());
        let attributes = fields.iter().find(|f| f.name() == "attributes").unwrap();
        assert_eq!(attributes.shape(), ValueShape::Mapping);
        assert!(!attributes.insertable());
    }

    #[test]
    fn test_insert_and_update_views() {
        let catalog = FieldCatalog::new();
        assert_eq!(
            names(&catalog.insertable::<UserAccount>()),
            ["id", "lastName", "createdBy"]
        );
        assert_eq!(
            names(&catalog.updatable::<UserAccount>()),
            ["lastName", "password", "createdBy"]
        );
    }

    #[test]
    fn test_column_override_and_conversion() {
        let catalog = FieldCatalog::new();
        let fields = catalog.fields::<UserAccount>();
        let columns: Vec<&str> = fields.iter().map(FieldDescriptor::column).collect();
        assert_eq!(
            columns,
            ["id", "surname", "password", "attributes", "created_by", "tags"]
        );
    }

    #[test]
    fn test_entries_are_memoized() {
        let catalog = FieldCatalog::new();
        assert!(catalog.is_empty());
        let first = catalog.fields::<UserAccount>();
        let second = catalog.fields::<UserAccount>();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(catalog.len(), 1);
        catalog.fields::<Plain>();
        assert_eq!(catalog.len(), 2);
    }

    #[test]
    fn test_concurrent_population() {
        let catalog = Arc::new(FieldCatalog::new());
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let catalog = Arc::clone(&catalog);
                std::thread::spawn(move || catalog.fields::<UserAccount>().len())
            })
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), 6);
        }
        assert_eq!(catalog.len(), 1);
    }

    #[test]
    fn test_table_name_and_qualifier() {
        let def = UserAccount::record_def();
        assert_eq!(table_name(def), "user_account");
        assert_eq!(catalog_or_schema(def), Some("app"));
        assert_eq!(catalog_or_schema(Plain::record_def()), None);
    }

    #[test]
    fn test_catalog_takes_precedence_over_schema() {
        let def = RecordDef::new("Order").table(
            TableAttrs::new()
                .name("orders")
                .catalog("sales")
                .schema("dbo"),
        );
        assert_eq!(table_name(&def), "orders");
        assert_eq!(catalog_or_schema(&def), Some("sales"));
    }

    #[test]
    fn test_empty_overrides_are_absent() {
        let def =
            RecordDef::new("LineItem").table(TableAttrs::new().name("").catalog("").schema("erp"));
        assert_eq!(table_name(&def), "line_item");
        assert_eq!(catalog_or_schema(&def), Some("erp"));
    }

    #[test]
    fn test_condition_column_prefers_field_override() {
        let catalog = FieldCatalog::new();
        let fields = catalog.fields::<UserAccount>();
        assert_eq!(condition_column(&fields, "lastName"), "surname");
        assert_eq!(condition_column(&fields, "createdBy"), "created_by");
        assert_eq!(condition_column(&fields, "tenantId"), "tenant_id");
    }
}
