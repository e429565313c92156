//! Tool implementations
//!
//! Both tools are deterministic given their input; the password reset only
//! simulates a backing system and is gated solely by the email format check.

use std::time::Duration;

use chat_core::extract::is_valid_email;
use chat_core::ToolDescriptor;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use sha2::{Digest, Sha256};
use tracing::info;

use crate::error::{Result, ToolServiceError};

pub const ADD: &str = "add";
pub const RESET_CAMAS_PASSWORD: &str = "reset_camas_password";

pub const RESET_EXPIRY: &str = "24 hours";

#[derive(Debug, Deserialize)]
struct AddArgs {
    a: i64,
    b: i64,
}

#[derive(Debug, Deserialize)]
struct ResetArgs {
    email: String,
}

/// Outcome of `reset_camas_password`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResetResult {
    pub success: bool,
    pub message: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reset_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_in: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
}

/// Return a + b
pub fn add(a: i64, b: i64) -> Result<i64> {
    a.checked_add(b).ok_or(ToolServiceError::Overflow { a, b })
}

/// Simulate a CAMAS password reset for `email`
pub async fn reset_camas_password(email: &str, latency: Duration) -> ResetResult {
    if !is_valid_email(email) {
        return ResetResult {
            success: false,
            message: "Invalid email address format".to_string(),
            email: email.to_string(),
            reset_token: None,
            expires_in: None,
            timestamp: None,
        };
    }

    tokio::time::sleep(latency).await;

    let now = Utc::now();
    info!("Password reset initiated for {}", email);

    ResetResult {
        success: true,
        message: format!("Password reset initiated for {}", email),
        email: email.to_string(),
        reset_token: Some(reset_token(email, now)),
        expires_in: Some(RESET_EXPIRY.to_string()),
        timestamp: Some(now.to_rfc3339()),
    }
}

/// `rst_<unix seconds>_<first 12 hex chars of sha256(email)>`
pub fn reset_token(email: &str, at: DateTime<Utc>) -> String {
    let mut hasher = Sha256::new();
    hasher.update(email.as_bytes());
    let digest = hex::encode(hasher.finalize());
    format!("rst_{}_{}", at.timestamp(), &digest[..12])
}

/// Dispatch a named tool with JSON arguments
pub async fn invoke(name: &str, args: Value, reset_latency: Duration) -> Result<Value> {
    match name {
        ADD => {
            let args: AddArgs = serde_json::from_value(args)
                .map_err(|e| ToolServiceError::invalid_arguments(ADD, e))?;
            Ok(json!(add(args.a, args.b)?))
        }
        RESET_CAMAS_PASSWORD => {
            let args: ResetArgs = serde_json::from_value(args)
                .map_err(|e| ToolServiceError::invalid_arguments(RESET_CAMAS_PASSWORD, e))?;
            let result = reset_camas_password(&args.email, reset_latency).await;
            Ok(serde_json::to_value(result)?)
        }
        other => Err(ToolServiceError::UnknownTool(other.to_string())),
    }
}

/// Tools advertised on `GET /tools`
pub fn descriptors() -> Vec<ToolDescriptor> {
    vec![
        ToolDescriptor {
            name: ADD.to_string(),
            description: "Return a + b".to_string(),
            parameters: json!({
                "type": "object",
                "properties": {
                    "a": { "type": "integer" },
                    "b": { "type": "integer" }
                },
                "required": ["a", "b"]
            }),
        },
        ToolDescriptor {
            name: RESET_CAMAS_PASSWORD.to_string(),
            description: "Reset the CAMAS password for the account registered to an email address"
                .to_string(),
            parameters: json!({
                "type": "object",
                "properties": {
                    "email": { "type": "string", "format": "email" }
                },
                "required": ["email"]
            }),
        },
    ]
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn test_add() {
        assert_eq!(add(25, 17).unwrap(), 42);
        assert_eq!(add(-5, 3).unwrap(), -2);
        assert!(matches!(
            add(i64::MAX, 1),
            Err(ToolServiceError::Overflow { .. })
        ));
    }

    #[tokio::test]
    async fn test_reset_rejects_invalid_email() {
        let result = reset_camas_password("not-an-email", Duration::ZERO).await;
        assert!(!result.success);
        assert_eq!(result.message, "Invalid email address format");
        assert!(result.reset_token.is_none());
    }

    #[tokio::test]
    async fn test_reset_valid_email() {
        let result = reset_camas_password("user@example.com", Duration::ZERO).await;
        assert!(result.success);
        assert!(result.reset_token.unwrap().starts_with("rst_"));
        assert_eq!(result.expires_in.as_deref(), Some("24 hours"));
        assert!(result.timestamp.is_some());
    }

    #[tokio::test]
    async fn test_reset_accepts_address_without_tld() {
        let result = reset_camas_password("unknown@nowhere", Duration::ZERO).await;
        assert!(result.success, "{}", result.message);
        assert_eq!(result.email, "unknown@nowhere");
        assert!(result.reset_token.unwrap().starts_with("rst_"));
    }

    #[test]
    fn test_reset_token_is_deterministic() {
        let at = Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap();
        let token = reset_token("user@example.com", at);
        assert_eq!(token, reset_token("user@example.com", at));
        assert_ne!(token, reset_token("other@example.com", at));
        assert!(token.starts_with(&format!("rst_{}_", at.timestamp())));
        assert_eq!(token.len(), format!("rst_{}_", at.timestamp()).len() + 12);
    }

    #[tokio::test]
    async fn test_invoke_dispatch() {
        let sum = invoke(ADD, json!({ "a": 2, "b": 3 }), Duration::ZERO)
            .await
            .unwrap();
        assert_eq!(sum, json!(5));

        let err = invoke(ADD, json!({ "a": "two" }), Duration::ZERO)
            .await
            .unwrap_err();
        assert!(matches!(err, ToolServiceError::InvalidArguments { .. }));

        let err = invoke("subtract", json!({}), Duration::ZERO).await.unwrap_err();
        assert_eq!(err.to_string(), "Tool 'subtract' not found");
    }

    #[test]
    fn test_descriptors() {
        let names: Vec<String> = descriptors().into_iter().map(|d| d.name).collect();
        assert_eq!(names, vec!["add", "reset_camas_password"]);
    }
}
