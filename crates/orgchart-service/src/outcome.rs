//! Structured write results
//!
//! Callers render per-operation feedback, so write paths return
//! `{success, value?, error?}` rather than throwing across the boundary.

use serde::Serialize;

/// Result of one write operation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WriteOutcome<T> {
    /// Whether the operation took effect
    pub success: bool,
    /// Operation payload on success
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<T>,
    /// Failure message on error
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> WriteOutcome<T> {
    /// Successful outcome carrying a value
    #[inline]
    #[must_use]
    pub fn success(value: T) -> Self {
        Self {
            success: true,
            value: Some(value),
            error: None,
        }
    }

    /// Failed outcome carrying a message
    #[inline]
    #[must_use]
    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            value: None,
            error: Some(error.into()),
        }
    }

    /// True on success
    #[inline]
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.success
    }
}

impl<T, E: std::fmt::Display> From<Result<T, E>> for WriteOutcome<T> {
    fn from(result: Result<T, E>) -> Self {
        match result {
            Ok(value) => Self::success(value),
            Err(e) => Self::failure(e.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn serializes_without_empty_fields() {
        let ok: WriteOutcome<String> = WriteOutcome::success("310-004".to_string());
        assert_eq!(
            serde_json::to_value(&ok).unwrap(),
            serde_json::json!({"success": true, "value": "310-004"})
        );

        let err: WriteOutcome<String> = WriteOutcome::failure("not found: 999-999");
        assert_eq!(
            serde_json::to_value(&err).unwrap(),
            serde_json::json!({"success": false, "error": "not found: 999-999"})
        );
    }

    #[test]
    fn from_result() {
        let outcome: WriteOutcome<u32> = Ok::<_, std::fmt::Error>(7).into();
        assert!(outcome.is_success());
        assert_eq!(outcome.value, Some(7));
    }
}
