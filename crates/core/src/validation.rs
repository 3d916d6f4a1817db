//! Field-level validation accumulator.
//!
//! Form input is validated once at the boundary, before any write is
//! attempted. Failures are reported field-by-field so the caller can keep the
//! form open and show per-field messages.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A map of field name → human-readable problem.
///
/// BTreeMap so serialized output (and test assertions) are deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, String>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a problem for a field. Later pushes for the same field win.
    pub fn push(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.insert(field.into(), message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// `Ok(value)` when no problems were recorded, `Err(self)` otherwise.
    pub fn into_result<T>(self, value: T) -> Result<T, FieldErrors> {
        if self.is_empty() { Ok(value) } else { Err(self) }
    }
}

impl core::fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let mut first = true;
        for (field, message) in self.iter() {
            if !first {
                write!(f, "; ")?;
            }
            write!(f, "{field}: {message}")?;
            first = false;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_errors_pass_value_through() {
        let errors = FieldErrors::new();
        assert_eq!(errors.into_result(42), Ok(42));
    }

    #[test]
    fn recorded_errors_fail_the_result() {
        let mut errors = FieldErrors::new();
        errors.push("quantity", "must be positive");
        errors.push("unit_price", "must be positive");

        let err = errors.clone().into_result(()).unwrap_err();
        assert_eq!(err.len(), 2);
        assert_eq!(err.get("quantity"), Some("must be positive"));
        assert_eq!(
            err.to_string(),
            "quantity: must be positive; unit_price: must be positive"
        );
    }
}
