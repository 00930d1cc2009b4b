use http::Extensions;
use reqwest::{header, Request, Response};
use reqwest_middleware::{Middleware, Next};

use crate::core::session::SessionHandle;

/// Attaches the signed-in user's ID token to every outgoing request.
///
/// The two backend surfaces expect the token in different places: the
/// Realtime Database REST surface (node addresses end in `.json`) takes an
/// `auth` query parameter, while Storage takes an `Authorization: Firebase`
/// header. Requests issued while signed out pass through untouched.
#[derive(Clone)]
pub struct SessionMiddleware {
    session: SessionHandle,
}

impl SessionMiddleware {
    pub fn new(session: SessionHandle) -> Self {
        Self { session }
    }
}

#[async_trait::async_trait]
impl Middleware for SessionMiddleware {
    async fn handle(
        &self,
        mut req: Request,
        extensions: &mut Extensions,
        next: Next<'_>,
    ) -> reqwest_middleware::Result<Response> {
        if let Some(token) = self.session.id_token().await {
            if req.url().path().ends_with(".json") {
                req.url_mut()
                    .query_pairs_mut()
                    .append_pair("auth", &token);
            } else {
                let value = header::HeaderValue::from_str(&format!("Firebase {}", token))
                    .map_err(|e| {
                        reqwest_middleware::Error::Middleware(anyhow::anyhow!(
                            "Failed to build authorization header: {}",
                            e
                        ))
                    })?;
                req.headers_mut().insert(header::AUTHORIZATION, value);
            }
        }

        next.run(req, extensions).await
    }
}
