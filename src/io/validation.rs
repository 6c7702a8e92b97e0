//! Upload validation and sanitization.
//!
//! Turns decoded [`RawRecord`]s into clean [`Record`]s and reports what
//! sanitization changed.

use crate::models::{RawRecord, Record, RecordField};

/// Severity of a validation issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationSeverity {
    /// Warning: issue noted but the record is kept.
    Warning,
    /// Error: the record is skipped.
    Error,
}

/// A validation issue found for one entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationIssue {
    /// The field that has an issue.
    pub field: RecordField,
    /// Description of the issue.
    pub message: String,
    /// Severity of the issue.
    pub severity: ValidationSeverity,
}

impl ValidationIssue {
    /// Creates a warning issue.
    #[must_use]
    pub fn warning(field: RecordField, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
            severity: ValidationSeverity::Warning,
        }
    }

    /// Creates an error issue.
    #[must_use]
    pub fn error(field: RecordField, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
            severity: ValidationSeverity::Error,
        }
    }
}

/// Result of validating one raw entry.
#[derive(Debug, Clone)]
pub struct ValidationResult {
    /// Whether the record may be stored.
    pub is_valid: bool,
    /// Issues found during validation.
    pub issues: Vec<ValidationIssue>,
    /// The sanitized record.
    pub record: Record,
}

impl ValidationResult {
    /// Returns the first error message, if any.
    #[must_use]
    pub fn error_message(&self) -> Option<&str> {
        self.issues
            .iter()
            .find(|i| i.severity == ValidationSeverity::Error)
            .map(|i| i.message.as_str())
    }
}

/// Validates decoded entries.
///
/// Sanitization itself never fails. The only hard rule is that the id must
/// keep at least one digit; everything else produces warnings.
#[derive(Debug, Clone, Copy, Default)]
pub struct RecordValidator;

impl RecordValidator {
    /// Creates a new validator.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Validates and sanitizes a raw entry.
    #[must_use]
    pub fn validate(&self, raw: &RawRecord) -> ValidationResult {
        let record = Record::from(raw.clone());
        let mut issues = Vec::new();

        let originals = [&raw.id, &raw.name, &raw.address, &raw.phone];
        for ((field, cleaned), original) in record.fields().into_iter().zip(originals) {
            match original.as_deref() {
                None if field == RecordField::Id => {
                    issues.push(ValidationIssue::error(field, "missing id"));
                },
                None => issues.push(ValidationIssue::warning(field, format!("missing {field}"))),
                Some(value) if value.trim() != cleaned => issues.push(ValidationIssue::warning(
                    field,
                    format!("{field} sanitized from {value:?} to {cleaned:?}"),
                )),
                Some(_) => {},
            }
        }

        if raw.id.is_some() && record.id().is_empty() {
            issues.push(ValidationIssue::error(
                RecordField::Id,
                format!(
                    "id {:?} contains no digits",
                    raw.id.as_deref().unwrap_or_default()
                ),
            ));
        }

        let is_valid = !issues
            .iter()
            .any(|i| i.severity == ValidationSeverity::Error);
        ValidationResult {
            is_valid,
            issues,
            record,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_clean_record() {
        let raw = RawRecord::new("1", "Anne Rice", "23 Vampire Ave", "66666666");
        let result = RecordValidator::new().validate(&raw);

        assert!(result.is_valid);
        assert!(result.issues.is_empty());
        assert_eq!(result.record.name(), "Anne Rice");
    }

    #[test]
    fn test_validate_reports_sanitized_fields() {
        let raw = RawRecord::new("1", "Anne Rice", "23 Vampire Ave, NY-12512", "dgj66666666dgjf");
        let result = RecordValidator::new().validate(&raw);

        assert!(result.is_valid);
        assert_eq!(result.record.address(), "23 Vampire Ave  NY 12512");
        assert_eq!(result.record.phone(), "66666666");
        let fields: Vec<RecordField> = result.issues.iter().map(|i| i.field).collect();
        assert_eq!(fields, [RecordField::Address, RecordField::Phone]);
        assert!(
            result
                .issues
                .iter()
                .all(|i| i.severity == ValidationSeverity::Warning)
        );
    }

    #[test]
    fn test_validate_id_without_digits_is_error() {
        let raw = RawRecord::new("abc", "Anne", "Here", "5");
        let result = RecordValidator::new().validate(&raw);

        assert!(!result.is_valid);
        assert!(result.error_message().unwrap().contains("no digits"));
    }

    #[test]
    fn test_validate_missing_id_is_error() {
        let raw = RawRecord {
            name: Some("Anne".to_string()),
            ..RawRecord::default()
        };
        let result = RecordValidator::new().validate(&raw);

        assert!(!result.is_valid);
        assert_eq!(result.error_message(), Some("missing id"));
    }

    #[test]
    fn test_validate_missing_optional_fields_warn() {
        let raw = RawRecord {
            id: Some("7".to_string()),
            ..RawRecord::default()
        };
        let result = RecordValidator::new().validate(&raw);

        assert!(result.is_valid);
        assert_eq!(result.issues.len(), 3);
        assert_eq!(result.record.name(), "");
    }
}
