//!
//! # Error Taxonomy
//!
//! This module defines the closed set of domain failures, `DomainError`, used
//! throughout the authentication core. Every expected failure condition is one
//! variant of this enum, carrying a stable machine-readable code and a fixed
//! HTTP status, so the mapping from failure to response is exhaustive and
//! switch-checkable.
//!
//! `DomainError` implements `actix_web::error::ResponseError`, rendering each
//! failure as a uniform envelope:
//!
//! ```json
//! {"success": false, "error": {"code": "...", "message": "...", "metadata": {...}}}
//! ```
//!
//! `metadata` carries internal detail and is only included when development
//! mode is enabled (see [`set_development_mode`]). Internal errors are logged
//! server-side in full; the client only ever sees a generic message.

use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};
use serde_json::json;
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use validator::ValidationErrors;

static DEVELOPMENT_MODE: AtomicBool = AtomicBool::new(false);

/// Enables or disables inclusion of internal detail (`metadata`) in error
/// responses. Set once at startup from configuration; off by default.
pub fn set_development_mode(enabled: bool) {
    DEVELOPMENT_MODE.store(enabled, Ordering::Relaxed);
}

fn development_mode() -> bool {
    DEVELOPMENT_MODE.load(Ordering::Relaxed)
}

/// All classified failures of the authentication core.
///
/// Variants carrying a `String` hold internal detail that is never shown to
/// the client outside development mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Username/password pair did not authenticate (HTTP 401).
    /// Deliberately identical for "no such user" and "wrong password".
    InvalidCredentials,
    /// Token missing, malformed, or signature invalid (HTTP 401).
    InvalidToken(String),
    /// Token structurally valid and correctly signed but past expiry (HTTP 401).
    TokenExpired,
    /// Uniqueness violation on username (HTTP 409).
    UsernameAlreadyExists,
    /// Uniqueness violation on email (HTTP 409).
    EmailAlreadyExists,
    /// The store rejected an insert for a reason other than uniqueness (HTTP 400).
    UserCreationFailed(String),
    /// Request body failed field validation (HTTP 422).
    Validation(String),
    /// Unexpected/unclassified failure (HTTP 500). Detail is logged, never rendered.
    Internal(String),
}

impl DomainError {
    /// Stable machine-readable code for this failure kind.
    pub fn code(&self) -> &'static str {
        match self {
            DomainError::InvalidCredentials => "A1",
            DomainError::InvalidToken(_) => "A2",
            DomainError::TokenExpired => "A3",
            DomainError::EmailAlreadyExists => "U6",
            DomainError::UsernameAlreadyExists => "U7",
            DomainError::UserCreationFailed(_) => "U-create",
            DomainError::Validation(_) => "V1",
            DomainError::Internal(_) => "internal",
        }
    }

    /// Message safe to show to any client, development mode or not.
    fn public_message(&self) -> String {
        match self {
            DomainError::InvalidCredentials => "Invalid credentials".into(),
            DomainError::InvalidToken(msg) => msg.clone(),
            DomainError::TokenExpired => "Token expired".into(),
            DomainError::UsernameAlreadyExists => "Username already taken".into(),
            DomainError::EmailAlreadyExists => "Email already registered".into(),
            DomainError::UserCreationFailed(_) => "Could not create user".into(),
            DomainError::Validation(msg) => msg.clone(),
            DomainError::Internal(_) => "Internal server error".into(),
        }
    }

    /// Internal detail, if any. Only rendered under development mode.
    fn detail(&self) -> Option<&str> {
        match self {
            DomainError::UserCreationFailed(d) | DomainError::Internal(d) => Some(d),
            _ => None,
        }
    }
}

impl fmt::Display for DomainError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            DomainError::InvalidCredentials => write!(f, "Invalid credentials"),
            DomainError::InvalidToken(msg) => write!(f, "Invalid token: {}", msg),
            DomainError::TokenExpired => write!(f, "Token expired"),
            DomainError::UsernameAlreadyExists => write!(f, "Username already exists"),
            DomainError::EmailAlreadyExists => write!(f, "Email already exists"),
            DomainError::UserCreationFailed(d) => write!(f, "User creation failed: {}", d),
            DomainError::Validation(msg) => write!(f, "Validation error: {}", msg),
            DomainError::Internal(d) => write!(f, "Internal error: {}", d),
        }
    }
}

/// Converts `DomainError` variants into `HttpResponse` envelopes.
///
/// This lets Actix Web translate `DomainError` results from handlers and
/// middleware into the uniform `{success, error}` body with the right status.
impl ResponseError for DomainError {
    fn status_code(&self) -> StatusCode {
        match self {
            DomainError::InvalidCredentials
            | DomainError::InvalidToken(_)
            | DomainError::TokenExpired => StatusCode::UNAUTHORIZED,
            DomainError::UsernameAlreadyExists | DomainError::EmailAlreadyExists => {
                StatusCode::CONFLICT
            }
            DomainError::UserCreationFailed(_) => StatusCode::BAD_REQUEST,
            DomainError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            DomainError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        if let DomainError::Internal(detail) = self {
            // Full detail stays server-side.
            log::error!("internal error: {}", detail);
        }

        let mut error = json!({
            "code": self.code(),
            "message": self.public_message(),
        });
        if development_mode() {
            if let Some(detail) = self.detail() {
                error["metadata"] = json!({ "detail": detail });
            }
        }

        HttpResponse::build(self.status_code()).json(json!({
            "success": false,
            "error": error,
        }))
    }
}

/// Converts `validator::ValidationErrors` into `DomainError::Validation`.
///
/// The detailed validation messages describe the client's own input and are
/// safe to return.
impl From<ValidationErrors> for DomainError {
    fn from(error: ValidationErrors) -> DomainError {
        DomainError::Validation(error.to_string())
    }
}
