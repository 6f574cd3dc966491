//! Mapper method call metadata.
//!
//! The host runtime describes each call by the invoked method's identifier,
//! its declared parameter names in order, and whether the arguments are bound
//! by name. The record is always the first parameter. Values never reach the
//! engine; generated placeholders are resolved by the host at execution time.

/// How the host binds the call's arguments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Binding {
    /// The record itself is the only bound value; placeholders name its fields.
    Bare,
    /// Arguments are addressable by parameter name; record fields are reached
    /// through the record parameter (`#{user.id}`).
    Named,
}

/// A single invocation of a mapper method.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MapperCall {
    method: String,
    parameters: Vec<String>,
    named: bool,
}

impl MapperCall {
    /// Starts describing a call to `method`.
    #[must_use]
    pub fn new(method: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            parameters: Vec::new(),
            named: false,
        }
    }

    /// Appends a declared parameter.
    #[must_use]
    pub fn param(mut self, name: impl Into<String>) -> Self {
        self.parameters.push(name.into());
        self
    }

    /// Appends several declared parameters.
    #[must_use]
    pub fn params<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.parameters.extend(names.into_iter().map(Into::into));
        self
    }

    /// Binds a single-parameter call by name, as an explicit parameter name
    /// annotation would.
    #[must_use]
    pub fn named(mut self) -> Self {
        self.named = true;
        self
    }

    /// The invoked method identifier.
    #[must_use]
    pub fn method(&self) -> &str {
        &self.method
    }

    /// Declared parameter names, in order.
    #[must_use]
    pub fn parameters(&self) -> &[String] {
        &self.parameters
    }

    /// How arguments are bound. Calls with several parameters are always named.
    #[must_use]
    pub fn binding(&self) -> Binding {
        if self.named || self.parameters.len() > 1 {
            Binding::Named
        } else {
            Binding::Bare
        }
    }

    /// The record parameter's name when arguments are bound by name.
    #[must_use]
    pub fn record_param(&self) -> Option<&str> {
        match self.binding() {
            Binding::Named => self.parameters.first().map(String::as_str),
            Binding::Bare => None,
        }
    }

    /// Parameters declared after the record, in order.
    #[must_use]
    pub fn extra_params(&self) -> &[String] {
        self.parameters.get(1..).unwrap_or_default()
    }

    /// Whether a top-level argument named `name` is bound.
    #[must_use]
    pub fn has_named_argument(&self, name: &str) -> bool {
        self.binding() == Binding::Named && self.parameters.iter().any(|p| p == name)
    }
}
