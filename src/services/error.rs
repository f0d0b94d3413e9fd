// ============================================================================
// API ERROR - failure taxonomy shared by every store action
// ============================================================================

use std::fmt;

/// Classified outcome of a failed backend call. Every store action returns
/// `Result<_, ApiError>`, so callers pattern-match instead of juggling a
/// boolean/exception mix.
#[derive(Clone, PartialEq, Debug)]
pub enum ApiError {
    /// 401. `auth_endpoint` records whether the failing request targeted
    /// an `/auth/`-scoped path; only those invalidate the session.
    Unauthorized {
        auth_endpoint: bool,
        detail: Option<String>,
    },
    /// 403.
    Forbidden,
    /// 404.
    NotFound,
    /// 422 with field-level messages, surfaced one by one.
    Validation(Vec<String>),
    /// 5xx.
    Server,
    /// The request never produced a response.
    Network(String),
    /// The response body could not be encoded/decoded.
    Decode(String),
    /// Any other status; carries the backend-provided message when present.
    Unexpected {
        status: u16,
        message: Option<String>,
    },
}

impl ApiError {
    /// Build an `ApiError` from an HTTP status and raw response body.
    pub fn from_status(status: u16, auth_endpoint: bool, body: &str) -> Self {
        match status {
            401 => ApiError::Unauthorized {
                auth_endpoint,
                detail: extract_message(body),
            },
            403 => ApiError::Forbidden,
            404 => ApiError::NotFound,
            422 => ApiError::Validation(extract_validation_messages(body)),
            500..=599 => ApiError::Server,
            _ => ApiError::Unexpected {
                status,
                message: extract_message(body),
            },
        }
    }

    /// True when the backend rejected a login because the account's email
    /// address has not been verified yet. The backend signals this with a
    /// 400 whose error text mentions email verification.
    pub fn is_unverified_email(&self) -> bool {
        match self {
            ApiError::Unexpected {
                status: 400,
                message: Some(message),
            } => {
                let message = message.to_lowercase();
                message.contains("verify") && message.contains("email")
            }
            _ => false,
        }
    }

    /// Whether this failure invalidates the persisted session.
    pub fn clears_session(&self) -> bool {
        matches!(
            self,
            ApiError::Unauthorized {
                auth_endpoint: true,
                ..
            }
        )
    }

    /// The single user-visible message for this failure. Validation errors
    /// are the exception: they surface one toast per message instead.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Unauthorized {
                auth_endpoint: true,
                ..
            } => "Session expired. Please login again.".to_string(),
            ApiError::Unauthorized {
                auth_endpoint: false,
                ..
            } => "Authentication error. Please try again.".to_string(),
            ApiError::Forbidden => {
                "You do not have permission to perform this action.".to_string()
            }
            ApiError::NotFound => "Resource not found.".to_string(),
            ApiError::Validation(messages) => messages
                .first()
                .cloned()
                .unwrap_or_else(|| "Validation failed. Please check your input.".to_string()),
            ApiError::Server => "Server error. Please try again later.".to_string(),
            ApiError::Network(_) => "Network error. Please check your connection.".to_string(),
            ApiError::Decode(_) => "An unexpected error occurred.".to_string(),
            ApiError::Unexpected { message, .. } => message
                .clone()
                .unwrap_or_else(|| "An unexpected error occurred.".to_string()),
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.user_message())
    }
}

/// Pull a human-readable message out of an error body: the conventional
/// `error` / `message` / `detail` keys, else nothing.
fn extract_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    for key in ["error", "message", "detail"] {
        if let Some(message) = value.get(key).and_then(|v| v.as_str()) {
            return Some(message.to_string());
        }
    }
    None
}

/// Flatten a `{field: [messages]}` validation body into its messages.
fn extract_validation_messages(body: &str) -> Vec<String> {
    let Ok(serde_json::Value::Object(map)) = serde_json::from_str(body) else {
        return Vec::new();
    };

    let mut messages = Vec::new();
    for value in map.values() {
        match value {
            serde_json::Value::String(message) => messages.push(message.clone()),
            serde_json::Value::Array(items) => {
                for item in items {
                    if let Some(message) = item.as_str() {
                        messages.push(message.to_string());
                    }
                }
            }
            _ => {}
        }
    }
    messages
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_the_status_taxonomy() {
        assert_eq!(
            ApiError::from_status(403, false, ""),
            ApiError::Forbidden
        );
        assert_eq!(ApiError::from_status(404, false, ""), ApiError::NotFound);
        assert_eq!(ApiError::from_status(500, false, ""), ApiError::Server);
        assert_eq!(ApiError::from_status(503, false, ""), ApiError::Server);

        let unauthorized = ApiError::from_status(401, true, r#"{"detail":"bad token"}"#);
        assert!(unauthorized.clears_session());
        let unauthorized = ApiError::from_status(401, false, "");
        assert!(!unauthorized.clears_session());
    }

    #[test]
    fn validation_body_flattens_to_messages() {
        let err = ApiError::from_status(
            422,
            false,
            r#"{"email":["Enter a valid email address."],"password":["Too short."]}"#,
        );
        assert_eq!(
            err,
            ApiError::Validation(vec![
                "Enter a valid email address.".to_string(),
                "Too short.".to_string()
            ])
        );
    }

    #[test]
    fn unverified_email_login_is_distinguishable() {
        let err = ApiError::from_status(
            400,
            true,
            r#"{"error":"Please verify your email address before logging in."}"#,
        );
        assert!(err.is_unverified_email());
        assert!(!err.clears_session());

        let err = ApiError::from_status(400, true, r#"{"error":"Invalid credentials."}"#);
        assert!(!err.is_unverified_email());

        let err = ApiError::from_status(401, true, "");
        assert!(!err.is_unverified_email());
    }

    #[test]
    fn unexpected_errors_prefer_backend_message() {
        let err = ApiError::from_status(409, false, r#"{"message":"Slug already taken."}"#);
        assert_eq!(err.user_message(), "Slug already taken.");

        let err = ApiError::from_status(418, false, "not json");
        assert_eq!(err.user_message(), "An unexpected error occurred.");
    }
}
