//! Structural validation of incoming strategy payloads.
//!
//! Runs before any I/O; the uniqueness precondition (which consults the
//! projection) only fires once these checks pass.

use common::Strategy;

use crate::error::FieldViolation;

/// Human-readable form of the allowed name pattern, used in error messages.
pub const NAME_FORMAT: &str = "^[0-9a-zA-Z\\.\\-]+$";

fn is_allowed_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '.' || c == '-'
}

/// Checks the structural rules for a new strategy payload.
///
/// Rules, in order: `name` must be non-empty, and must consist solely of
/// characters from `[0-9a-zA-Z.-]`. All failed rules are reported, not just
/// the first; an empty name therefore yields both violations.
pub fn validate_new_strategy(strategy: &Strategy) -> Result<(), Vec<FieldViolation>> {
    let mut violations = Vec::new();

    if strategy.name.is_empty() {
        violations.push(FieldViolation::new("name", "Name is required"));
    }
    if !strategy.name.chars().all(is_allowed_name_char) || strategy.name.is_empty() {
        violations.push(FieldViolation::new(
            "name",
            format!("Name must match format {NAME_FORMAT}"),
        ));
    }

    if violations.is_empty() {
        Ok(())
    } else {
        Err(violations)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_names_from_the_allowed_character_set() {
        for name in ["gradualRollout", "remote-address.v2", "A1", "-", "."] {
            assert!(
                validate_new_strategy(&Strategy::named(name)).is_ok(),
                "expected {name:?} to validate"
            );
        }
    }

    #[test]
    fn rejects_empty_name_with_both_violations() {
        let violations = validate_new_strategy(&Strategy::named("")).unwrap_err();
        assert_eq!(violations.len(), 2);
        assert_eq!(violations[0].message, "Name is required");
        assert!(violations[1].message.starts_with("Name must match format"));
    }

    #[test]
    fn rejects_names_with_forbidden_characters() {
        for name in ["has space", "under_score", "sla/sh", "ünïcode", "semi;colon"] {
            let violations = validate_new_strategy(&Strategy::named(name)).unwrap_err();
            assert_eq!(violations.len(), 1, "expected one violation for {name:?}");
            assert_eq!(violations[0].field, "name");
        }
    }

    #[test]
    fn other_fields_are_not_validated() {
        let strategy = Strategy::named("ok")
            .with_description("anything at all — descriptions are free-form")
            .with_attribute("weird?!", serde_json::json!(null));
        assert!(validate_new_strategy(&strategy).is_ok());
    }
}
