use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

/// A signed-in user's credentials, held for the lifetime of the sign-in.
///
/// `expires_at` is bookkeeping only: the SDK never refreshes tokens on its
/// own. Callers observing an expired session sign in again.
#[derive(Debug, Clone)]
pub struct Session {
    pub local_id: String,
    pub email: Option<String>,
    pub display_name: Option<String>,
    pub id_token: String,
    pub refresh_token: Option<String>,
    pub expires_at: Option<DateTime<Utc>>,
}

impl Session {
    pub fn is_expired(&self) -> bool {
        match self.expires_at {
            Some(at) => Utc::now() >= at,
            None => false,
        }
    }
}

/// Shared slot holding at most one [`Session`] per connection context.
///
/// Cloning shares the slot: the middleware reads tokens from the same slot
/// the auth client writes to.
#[derive(Debug, Clone, Default)]
pub struct SessionHandle {
    inner: Arc<RwLock<Option<Session>>>,
}

impl SessionHandle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the current session, if any.
    pub async fn establish(&self, session: Session) {
        *self.inner.write().await = Some(session);
    }

    pub async fn clear(&self) {
        *self.inner.write().await = None;
    }

    pub async fn current(&self) -> Option<Session> {
        self.inner.read().await.clone()
    }

    pub async fn id_token(&self) -> Option<String> {
        self.inner
            .read()
            .await
            .as_ref()
            .map(|s| s.id_token.clone())
    }

    pub async fn is_authenticated(&self) -> bool {
        self.inner.read().await.is_some()
    }
}
