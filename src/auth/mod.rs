//! Email/password authentication against the Identity Toolkit API.
//!
//! Signing in stores the returned ID token in the shared [`SessionHandle`];
//! from then on every database and storage request carries it. Signing out
//! only clears that slot. The backend keeps no session of its own.

pub mod models;


use chrono::{Duration, Utc};
use reqwest::header;
use reqwest_middleware::ClientWithMiddleware;
use thiserror::Error;

use crate::auth::models::{SignInRequest, SignInResponse, UserRecord};
use crate::core::session::{Session, SessionHandle};
use crate::core::{log_failure, FirebaseErrorResponse};

const IDENTITY_TOOLKIT_V1_API: &str = "https://identitytoolkit.googleapis.com/v1";

// Identity Toolkit signals bad credentials through the error message body,
// not the status code. First token of the message is the error code.
const CREDENTIAL_ERRORS: [&str; 4] = [
    "EMAIL_NOT_FOUND",
    "INVALID_PASSWORD",
    "INVALID_LOGIN_CREDENTIALS",
    "USER_DISABLED",
];

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("HTTP Request failed: {0}")]
    RequestError(#[from] reqwest::Error),
    #[error("Middleware error: {0}")]
    MiddlewareError(#[from] reqwest_middleware::Error),
    #[error("API error: {0}")]
    ApiError(String),
    #[error("Invalid email or password")]
    InvalidCredentials,
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

/// Client for the email/password sign-in surface.
#[derive(Clone)]
pub struct FirebaseAuth {
    client: ClientWithMiddleware,
    base_url: String,
    api_key: String,
    session: SessionHandle,
}

impl FirebaseAuth {
    pub(crate) fn new(client: ClientWithMiddleware, api_key: String, session: SessionHandle) -> Self {
        Self {
            client,
            base_url: IDENTITY_TOOLKIT_V1_API.to_string(),
            api_key,
            session,
        }
    }

    #[cfg(test)]
    pub(crate) fn new_with_client(
        client: ClientWithMiddleware,
        base_url: String,
        api_key: String,
        session: SessionHandle,
    ) -> Self {
        Self {
            client,
            base_url,
            api_key,
            session,
        }
    }

    /// Signs a user in with email and password.
    ///
    /// On success the session slot shared with the database and storage
    /// clients holds the new ID token, and the authenticated-user record is
    /// returned. Fails fast; there is no retry and no token refresh.
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<UserRecord, AuthError> {
        let url = format!("{}/accounts:signInWithPassword", self.base_url);
        let request = SignInRequest {
            email,
            password,
            return_secure_token: true,
        };

        let response = self
            .client
            .post(&url)
            .query(&[("key", self.api_key.as_str())])
            .header(header::CONTENT_TYPE, "application/json")
            .body(serde_json::to_vec(&request)?)
            .send()
            .await
            .map_err(|e| log_failure("Sign in failed", e))?;

        if !response.status().is_success() {
            let status = response.status();
            let err = match response.json::<FirebaseErrorResponse>().await {
                Ok(body) if is_credential_error(body.message()) => AuthError::InvalidCredentials,
                Ok(body) => AuthError::ApiError(body.display_message()),
                Err(_) => AuthError::ApiError(format!("Sign in failed: {}", status)),
            };
            return Err(log_failure("Sign in failed", err));
        }

        let signed_in: SignInResponse = response
            .json()
            .await
            .map_err(|e| log_failure("Sign in failed", e))?;

        self.session.establish(session_from(&signed_in)).await;

        Ok(UserRecord::from(signed_in))
    }

    /// Signs the current user out by clearing the shared session slot.
    ///
    /// Purely local, mirroring the web SDK's `signOut`; requests issued
    /// afterwards go out unauthenticated.
    pub async fn sign_out(&self) {
        self.session.clear().await;
    }

    /// The session established by the last [`sign_in`](Self::sign_in), if
    /// any.
    pub async fn current_session(&self) -> Option<Session> {
        self.session.current().await
    }
}

fn is_credential_error(message: &str) -> bool {
    match message.split_whitespace().next() {
        Some(code) => CREDENTIAL_ERRORS.contains(&code),
        None => false,
    }
}

fn session_from(response: &SignInResponse) -> Session {
    // Expiries too large for the date math leave the session without a
    // recorded deadline.
    let expires_at = response
        .expires_in
        .as_deref()
        .and_then(|s| s.parse::<i64>().ok())
        .and_then(Duration::try_seconds)
        .and_then(|ttl| Utc::now().checked_add_signed(ttl));

    Session {
        local_id: response.local_id.clone(),
        email: response.email.clone(),
        display_name: response.display_name.clone(),
        id_token: response.id_token.clone(),
        refresh_token: response.refresh_token.clone(),
        expires_at,
    }
}
