//! Naming conventions shared by tables, columns and condition tokens.
//!
//! Record fields are written in camel case (`lastName`) while database
//! identifiers use snake case (`last_name`). The same conversion is applied
//! to type names, field names and the fragments recovered from a mapper
//! method identifier, so a token such as `LastName` in `updateByLastName`
//! resolves to the same column as the `lastName` field.

/// Converts a camel-case identifier to its column form.
///
/// Every upper-case letter except a leading one is preceded by `_`, and all
/// letters are lower-cased. Acronyms get no special treatment.
///
/// ```rust
/// use gizmo_sql_core::naming::to_column_form;
///
/// assert_eq!(to_column_form("lastName"), "last_name");
/// assert_eq!(to_column_form("User"), "user");
/// assert_eq!(to_column_form("ID"), "i_d");
/// ```
#[must_use]
pub fn to_column_form(identifier: &str) -> String {
    let mut result = String::with_capacity(identifier.len() + 4);
    for (i, c) in identifier.chars().enumerate() {
        if c.is_uppercase() {
            if i > 0 {
                result.push('_');
            }
            result.extend(c.to_lowercase());
        } else {
            result.push(c);
        }
    }
    result
}

/// Lower-cases the first character of `token`, leaving the rest unchanged.
///
/// ```rust
/// use gizmo_sql_core::naming::decapitalize;
///
/// assert_eq!(decapitalize("LastName"), "lastName");
/// assert_eq!(decapitalize("id"), "id");
/// ```
#[must_use]
pub fn decapitalize(token: &str) -> String {
    let mut chars = token.chars();
    match chars.next() {
        Some(first) if first.is_uppercase() => first.to_lowercase().chain(chars).collect(),
        _ => token.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_column_form_simple() {
        assert_eq!(to_column_form("id"), "id");
        assert_eq!(to_column_form("lastName"), "last_name");
        assert_eq!(to_column_form("firstMiddleName"), "first_middle_name");
    }

    #[test]
    fn test_column_form_leading_capital() {
        assert_eq!(to_column_form("Company"), "company");
        assert_eq!(to_column_form("UserAccount"), "user_account");
    }

    #[test]
    fn test_column_form_acronym_splits_every_capital() {
        assert_eq!(to_column_form("ID"), "i_d");
        assert_eq!(to_column_form("userURL"), "user_u_r_l");
    }

    #[test]
    fn test_column_form_keeps_snake_case() {
        assert_eq!(to_column_form("last_name"), "last_name");
        assert_eq!(to_column_form(""), "");
    }

    #[test]
    fn test_column_form_digits() {
        assert_eq!(to_column_form("address2Line"), "address2_line");
    }

    #[test]
    fn test_decapitalize() {
        assert_eq!(decapitalize("Id"), "id");
        assert_eq!(decapitalize("LastName"), "lastName");
        assert_eq!(decapitalize("URL"), "uRL");
        assert_eq!(decapitalize("name"), "name");
        assert_eq!(decapitalize(""), "");
    }

    proptest! {
        #[test]
        fn column_form_is_deterministic(ident in "[a-z][a-zA-Z0-9]{0,24}") {
            prop_assert_eq!(to_column_form(&ident), to_column_form(&ident));
        }

        #[test]
        fn column_form_is_stable_on_snake_case(ident in "[a-z][a-z0-9_]{0,24}") {
            prop_assert_eq!(to_column_form(&ident), ident);
        }

        #[test]
        fn column_form_has_no_capitals(ident in "[a-zA-Z][a-zA-Z0-9]{0,24}") {
            let column = to_column_form(&ident);
            prop_assert!(!column.chars().any(char::is_uppercase));
        }
    }
}
