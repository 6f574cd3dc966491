//! Mapper method identifier parsing.
//!
//! The operation is taken from the identifier's prefix. The identifier is then
//! split on every `By`/`And` (UPDATE) or `On`/`And` (UPSERT) boundary; the
//! first segment is the method's own name and each later segment names a
//! condition or key column:
//!
//! | identifier                   | family | tokens             |
//! |------------------------------|--------|--------------------|
//! | `insertUser`                 | Insert | -                  |
//! | `updateByIdAndLastName`      | Update | `id`, `lastName`   |
//! | `updateBrandAndModelById`    | Update | `model`, `id`      |
//! | `updateUser`                 | Update | -                  |
//! | `upsertCompanyOnId`          | Upsert | `id`               |
//! | `upsertCompanyAndBranchOnId` | Upsert | `branch`, `id`     |
//!
//! A keyword only counts as a boundary when an upper-case letter follows it,
//! so `updateByte` or `upsertOnline` carry no tokens.

use std::fmt;

use crate::error::{GizmoError, Result};
use crate::naming::decapitalize;

/// The kind of statement a mapper method asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationFamily {
    /// INSERT statement.
    Insert,
    /// UPDATE statement.
    Update,
    /// Dialect-specific insert-or-update statement.
    Upsert,
}

impl OperationFamily {
    /// Maps a method identifier to the statement it dispatches to.
    ///
    /// Prefixes are matched case-sensitively in the order `insert`, `upsert`,
    /// `update`. Returns `None` for any other identifier.
    #[must_use]
    pub fn of(method: &str) -> Option<Self> {
        if method.starts_with("insert") {
            Some(Self::Insert)
        } else if method.starts_with("upsert") {
            Some(Self::Upsert)
        } else if method.starts_with("update") {
            Some(Self::Update)
        } else {
            None
        }
    }

    /// Returns the lower-case verb of this family.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Insert => "insert",
            Self::Update => "update",
            Self::Upsert => "upsert",
        }
    }
}

impl fmt::Display for OperationFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The operation and condition tokens recovered from a method identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodIntent {
    /// The requested operation.
    pub family: OperationFamily,
    /// Field names named by the identifier, in order of appearance.
    pub tokens: Vec<String>,
}

impl MethodIntent {
    /// Parses a mapper method identifier.
    ///
    /// # Errors
    ///
    /// Returns [`GizmoError::UnsupportedMethod`] when the identifier starts
    /// with none of the known verbs.
    pub fn parse(method: &str) -> Result<Self> {
        let family = OperationFamily::of(method)
            .ok_or_else(|| GizmoError::UnsupportedMethod(method.to_string()))?;
        Ok(Self::for_family(family, method))
    }

    /// Reads the tokens of `method` as `family` would, whatever its prefix.
    #[must_use]
    pub fn for_family(family: OperationFamily, method: &str) -> Self {
        let tokens = match family {
            OperationFamily::Insert => Vec::new(),
            OperationFamily::Update => condition_tokens(method, &["By", "And"]),
            OperationFamily::Upsert => condition_tokens(method, &["On", "And"]),
        };
        Self { family, tokens }
    }

    /// Returns whether the identifier named any condition or key column.
    #[must_use]
    pub fn has_tokens(&self) -> bool {
        !self.tokens.is_empty()
    }
}

/// Splits `method` on `separators` and returns every segment but the first.
fn condition_tokens(method: &str, separators: &[&str]) -> Vec<String> {
    split_at_boundaries(method, separators)
        .into_iter()
        .skip(1)
        .filter(|segment| !segment.is_empty())
        .map(decapitalize)
        .collect()
}

fn split_at_boundaries<'a>(text: &'a str, keywords: &[&str]) -> Vec<&'a str> {
    let mut segments = Vec::new();
    let mut start = 0;
    for (i, _) in text.char_indices() {
        if i < start {
            continue;
        }
        if let Some(keyword) = keywords.iter().find(|kw| is_boundary(text, i, kw)) {
            segments.push(&text[start..i]);
            start = i + keyword.len();
        }
    }
    segments.push(&text[start..]);
    segments
}

fn is_boundary(text: &str, at: usize, keyword: &str) -> bool {
    text[at..]
        .strip_prefix(keyword)
        .and_then(|rest| rest.chars().next())
        .is_some_and(char::is_uppercase)
}
