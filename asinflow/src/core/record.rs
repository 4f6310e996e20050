//! The per-identifier output record.

use serde::{Deserialize, Serialize};

use super::RecordStatus;
use crate::extract::ProductFields;

/// Final structured output for one identifier.
///
/// Every string field is present (possibly empty) so rows are fixed-width.
/// Records are created through [`Record::success`] or [`Record::failed`],
/// which keep status and error consistent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// The identifier as submitted.
    pub identifier: String,
    /// Terminal status.
    pub status: RecordStatus,
    /// Extracted fields; all empty on failure.
    #[serde(flatten)]
    pub fields: ProductFields,
    /// Wall time spent on this identifier, in seconds.
    pub elapsed_seconds: f64,
    /// Failed attempts before success, or the full budget on failure.
    pub retries: u32,
    /// Last attempt error; empty on success.
    pub error: String,
}

impl Record {
    /// Creates a successful record.
    #[must_use]
    pub fn success(
        identifier: impl Into<String>,
        fields: ProductFields,
        retries: u32,
        elapsed_seconds: f64,
    ) -> Self {
        Self {
            identifier: identifier.into(),
            status: RecordStatus::Success,
            fields,
            elapsed_seconds,
            retries,
            error: String::new(),
        }
    }

    /// Creates a failed record.
    ///
    /// A blank error is replaced so a failed record never has an empty
    /// error column.
    #[must_use]
    pub fn failed(
        identifier: impl Into<String>,
        error: impl Into<String>,
        retries: u32,
        elapsed_seconds: f64,
    ) -> Self {
        let mut error = error.into();
        if error.trim().is_empty() {
            error = "Unknown error".to_string();
        }
        Self {
            identifier: identifier.into(),
            status: RecordStatus::Failed,
            fields: ProductFields::default(),
            elapsed_seconds,
            retries,
            error,
        }
    }

    /// Whether the record is a success.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status == RecordStatus::Success
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_success_has_empty_error() {
        let fields = ProductFields {
            title: "Kettle".to_string(),
            ..Default::default()
        };
        let record = Record::success("B000123456", fields, 0, 0.42);
        assert!(record.is_success());
        assert_eq!(record.error, "");
        assert_eq!(record.fields.title, "Kettle");
    }

    #[test]
    fn test_failed_never_blank_error() {
        let record = Record::failed("B000ABCDEF", "   ", 2, 1.0);
        assert_eq!(record.status, RecordStatus::Failed);
        assert_eq!(record.error, "Unknown error");
        assert_eq!(record.fields, ProductFields::default());

        let record = Record::failed("B000ABCDEF", "Captcha detected", 2, 1.0);
        assert_eq!(record.error, "Captcha detected");
    }

    #[test]
    fn test_serialization_flattens_fields() {
        let record = Record::failed("B000ABCDEF", "timeout", 2, 1.5);
        let value = serde_json::to_value(&record).expect("serialize");
        assert_eq!(value["identifier"], "B000ABCDEF");
        assert_eq!(value["status"], "Failed");
        assert_eq!(value["title"], "");
        assert_eq!(value["retries"], 2);
    }
}
