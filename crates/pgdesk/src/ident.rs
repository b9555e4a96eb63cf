//! SQL identifier validation.
//!
//! DDL helpers interpolate table, column, constraint and type names directly
//! into generated SQL. Every such name must first pass [`validate_identifier`],
//! which accepts only plain unquoted identifiers: `[A-Za-z_][A-Za-z0-9_]*`.
//!
//! The statement builder does **not** call this; its fragments are accepted
//! verbatim.

use crate::error::{DeskError, DeskResult};
use std::sync::OnceLock;

fn ident_regex() -> &'static regex::Regex {
    static IDENT_RE: OnceLock<regex::Regex> = OnceLock::new();
    IDENT_RE.get_or_init(|| {
        regex::Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("invalid built-in identifier regex")
    })
}

/// Returns `true` if `name` is a plain SQL identifier.
pub fn is_identifier(name: &str) -> bool {
    ident_regex().is_match(name)
}

/// Validate a single identifier.
///
/// # Errors
/// - [`DeskError::Validation`] if `name` is empty
/// - [`DeskError::InvalidIdentifier`] if it does not match `[A-Za-z_][A-Za-z0-9_]*`
pub fn validate_identifier(name: &str) -> DeskResult<()> {
    if name.is_empty() {
        return Err(DeskError::validation("identifier cannot be empty"));
    }
    if !is_identifier(name) {
        return Err(DeskError::InvalidIdentifier(name.to_string()));
    }
    Ok(())
}

/// Validate every identifier in `names`, stopping at the first failure.
pub fn validate_identifiers<'a>(names: impl IntoIterator<Item = &'a str>) -> DeskResult<()> {
    names.into_iter().try_for_each(validate_identifier)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_plain_identifiers() {
        for name in ["products", "_tmp", "Order2", "a_b_c", "X"] {
            assert!(validate_identifier(name).is_ok(), "{name}");
        }
    }

    #[test]
    fn rejects_everything_else() {
        for name in ["1abc", "has space", "semi;colon", "dash-ed", "\"quoted\"", "public.users", "$x"] {
            let err = validate_identifier(name).unwrap_err();
            assert!(matches!(err, DeskError::InvalidIdentifier(_)), "{name}");
        }
    }

    #[test]
    fn empty_is_a_validation_error() {
        assert!(matches!(
            validate_identifier(""),
            Err(DeskError::Validation(_))
        ));
    }

    #[test]
    fn validate_many_stops_on_first_bad_name() {
        let err = validate_identifiers(["ok", "bad name", "also bad!"]).unwrap_err();
        assert!(matches!(err, DeskError::InvalidIdentifier(n) if n == "bad name"));
    }
}
