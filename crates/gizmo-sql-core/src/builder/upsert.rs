//! UPSERT rendering.
//!
//! MySQL re-uses the INSERT and appends an `on duplicate key update` clause
//! reading from the inserted row's alias. SQL Server merges a one-row derived
//! table into the destination, joined on the key columns named by the method.

use super::{StatementBuilder, placeholder};
use crate::call::MapperCall;
use crate::dialect::UpsertStrategy;
use crate::error::{GizmoError, Result};

/// Alias of the inserted row in a MySQL upsert.
const NEW_ROW: &str = "newrow";
/// Alias of the derived source row in a merge.
const SOURCE: &str = "srctbl";
/// Alias of the destination table in a merge.
const DESTINATION: &str = "desttbl";

impl StatementBuilder<'_> {
    /// Renders the dialect's UPSERT.
    ///
    /// `keys` are the key field names parsed from the method identifier.
    ///
    /// # Errors
    ///
    /// - [`GizmoError::UnsupportedUpsert`] if the dialect has no UPSERT form.
    /// - [`GizmoError::MissingKeyColumn`] if a merge has no key column.
    /// - [`GizmoError::UnknownKeyColumn`] if a merge key is not an
    ///   insert-eligible field.
    pub fn upsert(&self, call: &MapperCall, keys: &[String]) -> Result<String> {
        match self.dialect.upsert_strategy() {
            UpsertStrategy::DuplicateKey => Ok(self.duplicate_key_upsert()),
            UpsertStrategy::Merge => self.merge_upsert(call, keys),
            UpsertStrategy::Unsupported => Err(GizmoError::UnsupportedUpsert {
                dialect: self.dialect.name(),
            }),
        }
    }

    fn duplicate_key_upsert(&self) -> String {
        let alias = self.quote(NEW_ROW);
        let assignments: Vec<String> = self
            .updatable()
            .map(|field| {
                let column = self.quote(field.column());
                format!("{column} = {alias}.{column}")
            })
            .collect();
        format!(
            "{} as {alias} on duplicate key update {}",
            self.insert(),
            assignments.join(", ")
        )
    }

    fn merge_upsert(&self, call: &MapperCall, keys: &[String]) -> Result<String> {
        if keys.is_empty() {
            return Err(GizmoError::MissingKeyColumn {
                method: call.method().to_string(),
            });
        }

        let src = self.quote(SOURCE);
        let dest = self.quote(DESTINATION);
        let key_columns: Vec<String> = keys.iter().map(|key| self.condition_column(key)).collect();

        let mut selected = Vec::new();
        let mut assignments = Vec::new();
        let mut columns = Vec::new();
        let mut values = Vec::new();
        for field in self.insertable() {
            let column = self.quote(field.column());
            selected.push(format!("{} as {column}", placeholder(None, field.name())));
            if field.updatable() && !key_columns.contains(&column) {
                assignments.push(format!("{column} = {src}.{column}"));
            }
            values.push(format!("{src}.{column}"));
            columns.push(column);
        }
        if let Some((key, _)) = keys
            .iter()
            .zip(&key_columns)
            .find(|(_, column)| !columns.contains(column))
        {
            return Err(GizmoError::UnknownKeyColumn {
                method: call.method().to_string(),
                key: key.clone(),
            });
        }
        let join: Vec<String> = key_columns
            .iter()
            .map(|key| format!("{dest}.{key} = {src}.{key}"))
            .collect();

        let mut sql = format!(
            "merge into {} with (holdlock) as {dest} using (select {}) as {src} on ({})",
            self.table_ref(),
            selected.join(", "),
            join.join(" and ")
        );
        if !assignments.is_empty() {
            sql.push_str(" when matched then update set ");
            sql.push_str(&assignments.join(", "));
        }
        sql.push_str(" when not matched then insert (");
        sql.push_str(&columns.join(", "));
        sql.push_str(") values (");
        sql.push_str(&values.join(", "));
        sql.push_str(");");
        Ok(sql)
    }
}
