pub mod middleware;
pub mod session;

use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct FirebaseErrorDetails {
    pub code: u16,
    pub message: String,
    pub status: Option<String>,
    pub errors: Option<Vec<FirebaseSubError>>,
}

#[derive(Debug, Deserialize)]
pub struct FirebaseSubError {
    pub message: String,
    pub domain: Option<String>,
    pub reason: Option<String>,
}

// Identity Toolkit and Storage wrap errors in a structured object; the
// Realtime Database REST surface answers `{"error": "Permission denied"}`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum FirebaseErrorResponse {
    Structured { error: FirebaseErrorDetails },
    Plain { error: String },
}

impl FirebaseErrorResponse {
    pub fn display_message(&self) -> String {
        match self {
            FirebaseErrorResponse::Structured { error } => {
                format!("{} (code: {})", error.message, error.code)
            }
            FirebaseErrorResponse::Plain { error } => error.clone(),
        }
    }

    /// The bare error message, without the code suffix.
    pub fn message(&self) -> &str {
        match self {
            FirebaseErrorResponse::Structured { error } => &error.message,
            FirebaseErrorResponse::Plain { error } => error,
        }
    }
}

pub async fn parse_error_response(response: reqwest::Response, default_msg: &str) -> String {
    let status = response.status();
    match response.json::<FirebaseErrorResponse>().await {
        Ok(error_resp) => error_resp.display_message(),
        Err(_) => format!("{}: {}", default_msg, status),
    }
}

/// Logs a failed operation with its context, then hands the error back so
/// callers can keep propagating it. Every gateway operation routes its
/// failures through here exactly once.
pub(crate) fn log_failure<E: std::fmt::Display>(context: &str, err: E) -> E {
    tracing::error!("{}: {}", context, err);
    err
}
