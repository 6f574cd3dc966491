//! INSERT rendering.

use super::{StatementBuilder, placeholder};

impl StatementBuilder<'_> {
    /// Renders an INSERT over the insert-eligible fields.
    ///
    /// Placeholders name the fields directly. A record without eligible
    /// fields renders empty column and value lists.
    #[must_use]
    pub fn insert(&self) -> String {
        let (columns, values): (Vec<String>, Vec<String>) = self
            .insertable()
            .map(|field| (self.quote(field.column()), placeholder(None, field.name())))
            .unzip();
        format!(
            "insert into {} ({}) values ({})",
            self.table_ref(),
            columns.join(", "),
            values.join(", ")
        )
    }
}

#[cfg(test)]
mod tests {
    use crate::builder::StatementBuilder;
    use crate::catalog::collect_fields;
    use crate::dialect::Dialect;
    use crate::schema::{FieldDef, RecordDef, TableAttrs, ValueShape};

    static USER_FIELDS: &[FieldDef] = &[FieldDef::new("id"), FieldDef::new("name")];

    #[test]
    fn test_insert_mysql() {
        let def = RecordDef::new("User").fields(USER_FIELDS);
        let fields = collect_fields(&def);
        assert_eq!(
            StatementBuilder::new(Dialect::MySql, &def, &fields).insert(),
            "insert into `user` (`id`, `name`) values (#{id}, #{name})"
        );
    }

    #[test]
    fn test_insert_oracle() {
        let def = RecordDef::new("User").fields(USER_FIELDS);
        let fields = collect_fields(&def);
        assert_eq!(
            StatementBuilder::new(Dialect::Oracle, &def, &fields).insert(),
            "insert into \"USER\" (\"ID\", \"NAME\") values (#{id}, #{name})"
        );
    }

    #[test]
    fn test_insert_skips_ineligible_fields() {
        static FIELDS: &[FieldDef] = &[
            FieldDef::new("id").insertable(false),
            FieldDef::new("lastName"),
            FieldDef::new("firstName").column("firstname"),
            FieldDef::new("roles").shape(ValueShape::Sequence),
        ];
        let def = RecordDef::new("User")
            .table(TableAttrs::new().name("user_table"))
            .fields(FIELDS);
        let fields = collect_fields(&def);
        assert_eq!(
            StatementBuilder::new(Dialect::SqlServer, &def, &fields).insert(),
            "insert into \"user_table\" (\"last_name\", \"firstname\") values (#{lastName}, #{firstName})"
        );
    }

    #[test]
    fn test_insert_empty_record() {
        let def = RecordDef::new("Marker");
        assert_eq!(
            StatementBuilder::new(Dialect::Generic, &def, &[]).insert(),
            "insert into \"marker\" () values ()"
        );
    }
}
