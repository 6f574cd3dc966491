//! UPDATE rendering.

use super::{StatementBuilder, placeholder};
use crate::call::MapperCall;
use crate::error::{GizmoError, Result};

impl StatementBuilder<'_> {
    /// Renders an UPDATE over the update-eligible fields.
    ///
    /// The WHERE clause comes from `conditions`, the field names parsed from
    /// the method identifier, when there are any. Their placeholders go
    /// through the record parameter unless a top-level argument of the same
    /// name is bound. Without conditions, every parameter after the record
    /// becomes an equality predicate on its own unqualified placeholder.
    ///
    /// # Errors
    ///
    /// - [`GizmoError::NoArguments`] if the method declares no parameters.
    /// - [`GizmoError::MissingCondition`] if neither source yields a predicate.
    pub fn update(&self, call: &MapperCall, conditions: &[String]) -> Result<String> {
        if call.parameters().is_empty() {
            return Err(GizmoError::NoArguments {
                method: call.method().to_string(),
            });
        }

        let record_param = call.record_param();
        let predicates: Vec<String> = if conditions.is_empty() {
            call.extra_params()
                .iter()
                .map(|param| format!("{} = {}", self.condition_column(param), placeholder(None, param)))
                .collect()
        } else {
            conditions
                .iter()
                .map(|name| {
                    let prefix = record_param.filter(|_| !call.has_named_argument(name));
                    format!("{} = {}", self.condition_column(name), placeholder(prefix, name))
                })
                .collect()
        };
        if predicates.is_empty() {
            return Err(GizmoError::MissingCondition {
                method: call.method().to_string(),
            });
        }

        let assignments: Vec<String> = self
            .updatable()
            .map(|field| {
                format!(
                    "{} = {}",
                    self.quote(field.column()),
                    placeholder(record_param, field.name())
                )
            })
            .collect();

        Ok(format!(
            "update {} set {} where {}",
            self.table_ref(),
            assignments.join(", "),
            predicates.join(" and ")
        ))
    }
}

#[cfg(test)]
mod tests {
    use crate::builder::StatementBuilder;
    use crate::call::MapperCall;
    use crate::catalog::collect_fields;
    use crate::dialect::Dialect;
    use crate::error::GizmoError;
    use crate::schema::{FieldDef, RecordDef};

    static USER_FIELDS: &[FieldDef] = &[FieldDef::new("id"), FieldDef::new("name")];
    static USER: RecordDef = RecordDef::new("User").fields(USER_FIELDS);

    fn update(dialect: Dialect, call: &MapperCall, conditions: &[&str]) -> Result<String, GizmoError> {
        let fields = collect_fields(&USER);
        let conditions: Vec<String> = conditions.iter().map(ToString::to_string).collect();
        StatementBuilder::new(dialect, &USER, &fields).update(call, &conditions)
    }

    #[test]
    fn test_conditions_single_bare_arg() {
        let call = MapperCall::new("updateByIdAndLastName").param("user");
        assert_eq!(
            update(Dialect::MySql, &call, &["id", "lastName"]).unwrap(),
            "update `user` set `id` = #{id}, `name` = #{name} where `id` = #{id} and `last_name` = #{lastName}"
        );
    }

    #[test]
    fn test_conditions_single_named_arg() {
        let call = MapperCall::new("updateByIdAndLastName").param("user").named();
        assert_eq!(
            update(Dialect::MySql, &call, &["id", "lastName"]).unwrap(),
            "update `user` set `id` = #{user.id}, `name` = #{user.name} \
             where `id` = #{user.id} and `last_name` = #{user.lastName}"
        );
    }

    #[test]
    fn test_conditions_prefer_top_level_arguments() {
        let call = MapperCall::new("updateByIdAndLastName").params(["user", "id", "lastName"]);
        assert_eq!(
            update(Dialect::MySql, &call, &["id", "lastName"]).unwrap(),
            "update `user` set `id` = #{user.id}, `name` = #{user.name} where `id` = #{id} and `last_name` = #{lastName}"
        );
    }

    #[test]
    fn test_conditions_mixed_sources() {
        let call = MapperCall::new("updateByIdAndName").params(["user", "id"]);
        assert_eq!(
            update(Dialect::MySql, &call, &["id", "name"]).unwrap(),
            "update `user` set `id` = #{user.id}, `name` = #{user.name} where `id` = #{id} and `name` = #{user.name}"
        );
    }

    #[test]
    fn test_extra_arguments_as_conditions() {
        let call = MapperCall::new("update").params(["user", "id"]);
        assert_eq!(
            update(Dialect::Oracle, &call, &[]).unwrap(),
            "update \"USER\" set \"ID\" = #{user.id}, \"NAME\" = #{user.name} where \"ID\" = #{id}"
        );
    }

    #[test]
    fn test_extra_arguments_keep_declared_order() {
        let call = MapperCall::new("update").params(["user", "tenantId", "id"]);
        assert_eq!(
            update(Dialect::Generic, &call, &[]).unwrap(),
            "update \"user\" set \"id\" = #{user.id}, \"name\" = #{user.name} \
             where \"tenant_id\" = #{tenantId} and \"id\" = #{id}"
        );
    }

    #[test]
    fn test_missing_condition() {
        let call = MapperCall::new("update").param("user");
        assert!(matches!(
            update(Dialect::MySql, &call, &[]),
            Err(GizmoError::MissingCondition { method }) if method == "update"
        ));

        let named = MapperCall::new("updateUser").param("user").named();
        assert!(matches!(
            update(Dialect::MySql, &named, &[]),
            Err(GizmoError::MissingCondition { .. })
        ));
    }

    #[test]
    fn test_no_arguments() {
        let call = MapperCall::new("updateById");
        assert!(matches!(
            update(Dialect::MySql, &call, &["id"]),
            Err(GizmoError::NoArguments { method }) if method == "updateById"
        ));
    }
}
