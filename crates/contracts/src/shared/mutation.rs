//! Результат мутирующих запросов (create/update/delete).
//!
//! The server reports success in two different ways: an explicit
//! `success: true`, or a localized `message` that contains the word
//! "успешно" with no `success` field at all. [`MutationOutcome`] folds both
//! into a single discriminated result so callers never inspect strings.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Localized marker the server puts into success messages
pub const SUCCESS_MARKER: &str = "успешно";

/// Raw reply body of a mutation endpoint
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MutationReply {
    #[serde(default)]
    pub success: Option<bool>,
    #[serde(default)]
    pub message: Option<String>,
    /// FastAPI-style error payload, either a string or a list of issues
    #[serde(default)]
    pub detail: Option<Value>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MutationOutcome {
    Succeeded { message: Option<String> },
    Rejected { message: Option<String> },
}

impl MutationOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, MutationOutcome::Succeeded { .. })
    }

    pub fn message(&self) -> Option<&str> {
        match self {
            MutationOutcome::Succeeded { message } | MutationOutcome::Rejected { message } => {
                message.as_deref()
            }
        }
    }
}

impl From<MutationReply> for MutationOutcome {
    fn from(reply: MutationReply) -> Self {
        let marked = reply
            .message
            .as_deref()
            .map(|m| m.to_lowercase().contains(SUCCESS_MARKER))
            .unwrap_or(false);

        if reply.success == Some(true) || marked {
            return MutationOutcome::Succeeded {
                message: reply.message,
            };
        }

        let message = reply.message.or_else(|| {
            reply.detail.map(|d| match d {
                Value::String(s) => s,
                other => other.to_string(),
            })
        });
        MutationOutcome::Rejected { message }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outcome(json: &str) -> MutationOutcome {
        serde_json::from_str::<MutationReply>(json).unwrap().into()
    }

    #[test]
    fn test_explicit_success_flag() {
        assert!(outcome(r#"{"success": true}"#).is_success());
    }

    #[test]
    fn test_message_marker_without_flag() {
        let result = outcome(r#"{"message": "Заказ успешно обновлён"}"#);
        assert_eq!(
            result,
            MutationOutcome::Succeeded {
                message: Some("Заказ успешно обновлён".to_string())
            }
        );
    }

    #[test]
    fn test_marker_is_case_insensitive() {
        assert!(outcome(r#"{"message": "Промокод УСПЕШНО удалён"}"#).is_success());
    }

    #[test]
    fn test_explicit_failure_wins_over_nothing() {
        let result = outcome(r#"{"success": false, "message": "Заказ не найден"}"#);
        assert!(!result.is_success());
        assert_eq!(result.message(), Some("Заказ не найден"));
    }

    #[test]
    fn test_empty_body_is_rejected() {
        assert_eq!(outcome("{}"), MutationOutcome::Rejected { message: None });
    }

    #[test]
    fn test_detail_used_as_rejection_message() {
        let result = outcome(r#"{"detail": "Invalid token"}"#);
        assert_eq!(result.message(), Some("Invalid token"));
    }
}
