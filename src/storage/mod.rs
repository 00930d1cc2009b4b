//! Image uploads to Firebase Storage.
//!
//! Talks to the Storage v0 surface, the same endpoints the web SDK's
//! `put` and `getDownloadURL` drive. Uploaded files land under `images/`
//! with a millisecond timestamp prefixed to the original file name, and
//! [`FirebaseStorage::upload_image`] hands back a durable download URL
//! ready to drop into an article body.
//!
//! # Examples
//!
//! ```rust,no_run
//! # use blog_admin_sdk::FirebaseApp;
//! # async fn run(app: FirebaseApp) {
//! let storage = app.storage();
//! let bytes = std::fs::read("cover.png").unwrap();
//! let url = storage
//!     .upload_image("cover.png", "image/png", bytes)
//!     .await
//!     .unwrap();
//! # }
//! ```

pub mod models;


use chrono::Utc;
use reqwest::header;
use reqwest_middleware::ClientWithMiddleware;
use thiserror::Error;

use crate::core::{log_failure, parse_error_response};
use crate::storage::models::UploadMetadata;

const STORAGE_V0_API: &str = "https://firebasestorage.googleapis.com/v0";

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("HTTP Request failed: {0}")]
    RequestError(#[from] reqwest::Error),
    #[error("Middleware error: {0}")]
    MiddlewareError(#[from] reqwest_middleware::Error),
    #[error("API error: {0}")]
    ApiError(String),
    #[error("Upload succeeded but no download token was issued")]
    MissingDownloadToken,
}

/// Client for the image bucket of the blog's Firebase project.
#[derive(Clone)]
pub struct FirebaseStorage {
    client: ClientWithMiddleware,
    base_url: String,
    bucket: String,
}

impl FirebaseStorage {
    pub(crate) fn new(client: ClientWithMiddleware, bucket: String) -> Self {
        Self {
            client,
            base_url: STORAGE_V0_API.to_string(),
            bucket,
        }
    }

    #[cfg(test)]
    pub(crate) fn new_with_client(
        client: ClientWithMiddleware,
        base_url: String,
        bucket: String,
    ) -> Self {
        Self {
            client,
            base_url,
            bucket,
        }
    }

    /// The bucket this client writes to.
    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    // Object names contain '/', which must be encoded into a single path
    // segment on the v0 surface.
    fn object_url(&self, object_name: &str) -> String {
        let encoded = url::form_urlencoded::byte_serialize(object_name.as_bytes())
            .collect::<String>();
        format!("{}/b/{}/o/{}", self.base_url, self.bucket, encoded)
    }

    /// Uploads an image and returns its public download URL.
    ///
    /// The object is stored as `images/<timestamp>_<file_name>`, so two
    /// uploads of the same file never collide. The returned URL carries the
    /// download token issued by the backend and stays valid after sign-out.
    pub async fn upload_image(
        &self,
        file_name: &str,
        content_type: &str,
        data: impl Into<reqwest::Body>,
    ) -> Result<String, StorageError> {
        let context = "Uploading image failed";
        let object_name = object_name_for(file_name);

        let result: Result<String, StorageError> = async {
            let response = self
                .client
                .post(format!("{}/b/{}/o", self.base_url, self.bucket))
                .query(&[("name", object_name.as_str())])
                .header(header::CONTENT_TYPE, content_type)
                .body(data)
                .send()
                .await?;

            if !response.status().is_success() {
                return Err(StorageError::ApiError(
                    parse_error_response(response, context).await,
                ));
            }

            let metadata = response.json::<UploadMetadata>().await?;
            let token = metadata
                .download_tokens
                .as_deref()
                .and_then(|tokens| tokens.split(',').next())
                .filter(|token| !token.is_empty())
                .map(str::to_string)
                .ok_or(StorageError::MissingDownloadToken)?;

            // The backend may normalize the object name; prefer what it
            // echoed back.
            let stored_name = metadata.name.as_deref().unwrap_or(&object_name);

            Ok(format!(
                "{}?alt=media&token={}",
                self.object_url(stored_name),
                token
            ))
        }
        .await;

        result.map_err(|e| log_failure(context, e))
    }

    /// Deletes an uploaded object by its full name, e.g.
    /// `images/1700000000000_cover.png`.
    pub async fn delete_image(&self, object_name: &str) -> Result<(), StorageError> {
        let context = "Deleting image failed";

        let result: Result<(), StorageError> = async {
            let response = self
                .client
                .delete(self.object_url(object_name))
                .send()
                .await?;

            if !response.status().is_success() {
                return Err(StorageError::ApiError(
                    parse_error_response(response, context).await,
                ));
            }

            Ok(())
        }
        .await;

        result.map_err(|e| log_failure(context, e))
    }
}

fn object_name_for(file_name: &str) -> String {
    format!("images/{}_{}", Utc::now().timestamp_millis(), file_name)
}
