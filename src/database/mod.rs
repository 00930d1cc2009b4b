//! Blog content storage over the Realtime Database REST surface.
//!
//! Nodes are addressed as `<database_url>/<path>.json`. Collections come
//! back as JSON objects keyed by server-generated push IDs; an absent node
//! reads as JSON `null`. Every operation here is a single call into the
//! backend, whose atomicity is inherited rather than re-implemented.
//! Identity is assigned exclusively by the backend: a record without an
//! `id` is created under a fresh push key, a record with one is updated in
//! place.
//!
//! # Examples
//!
//! ```rust,no_run
//! # use blog_admin_sdk::database::models::Article;
//! # use blog_admin_sdk::FirebaseApp;
//! # async fn run(app: FirebaseApp) {
//! let db = app.database();
//!
//! let article = Article {
//!     title: Some("Hello".to_string()),
//!     content: Some("<p>First post.</p>".to_string()),
//!     ..Default::default()
//! };
//! let id = db.save_article(&article).await.unwrap();
//! let stored = db.get_article(&id).await.unwrap();
//! # let _ = stored;
//! # }
//! ```

pub mod models;

#[cfg(test)]
mod tests;

use std::collections::BTreeMap;

use reqwest::header;
use reqwest_middleware::ClientWithMiddleware;
use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

use crate::core::{log_failure, parse_error_response};
use crate::database::models::{Article, Comment, PushKey, Settings};

#[derive(Error, Debug)]
pub enum DatabaseError {
    #[error("HTTP Request failed: {0}")]
    RequestError(#[from] reqwest::Error),
    #[error("Middleware error: {0}")]
    MiddlewareError(#[from] reqwest_middleware::Error),
    #[error("API error: {0}")]
    ApiError(String),
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

/// Client for the article, comment and settings records of the blog.
#[derive(Clone)]
pub struct FirebaseDatabase {
    client: ClientWithMiddleware,
    base_url: String,
}

impl FirebaseDatabase {
    pub(crate) fn new(client: ClientWithMiddleware, database_url: String) -> Self {
        Self {
            client,
            base_url: database_url.trim_end_matches('/').to_string(),
        }
    }

    fn node_url(&self, path: &str) -> String {
        format!("{}/{}.json", self.base_url, path)
    }

    /// Reads a node. Absent nodes come back as `None`, matching the
    /// backend's `null` read semantics.
    async fn read_node<T: DeserializeOwned>(
        &self,
        path: &str,
        context: &'static str,
    ) -> Result<Option<T>, DatabaseError> {
        let result: Result<Option<T>, DatabaseError> = async {
            let response = self.client.get(self.node_url(path)).send().await?;
            if !response.status().is_success() {
                return Err(DatabaseError::ApiError(
                    parse_error_response(response, context).await,
                ));
            }
            Ok(response.json().await?)
        }
        .await;
        result.map_err(|e| log_failure(context, e))
    }

    /// Appends a record under a server-generated push key and returns that
    /// key.
    async fn push_node<T: Serialize>(
        &self,
        path: &str,
        record: &T,
        context: &'static str,
    ) -> Result<String, DatabaseError> {
        let result: Result<String, DatabaseError> = async {
            let response = self
                .client
                .post(self.node_url(path))
                .header(header::CONTENT_TYPE, "application/json")
                .body(serde_json::to_vec(record)?)
                .send()
                .await?;
            if !response.status().is_success() {
                return Err(DatabaseError::ApiError(
                    parse_error_response(response, context).await,
                ));
            }
            let key: PushKey = response.json().await?;
            Ok(key.name)
        }
        .await;
        result.map_err(|e| log_failure(context, e))
    }

    /// Partially updates the record at `path`: only the fields present in
    /// `record` are written.
    async fn patch_node<T: Serialize>(
        &self,
        path: &str,
        record: &T,
        context: &'static str,
    ) -> Result<(), DatabaseError> {
        let result: Result<(), DatabaseError> = async {
            let response = self
                .client
                .patch(self.node_url(path))
                .header(header::CONTENT_TYPE, "application/json")
                .body(serde_json::to_vec(record)?)
                .send()
                .await?;
            if !response.status().is_success() {
                return Err(DatabaseError::ApiError(
                    parse_error_response(response, context).await,
                ));
            }
            Ok(())
        }
        .await;
        result.map_err(|e| log_failure(context, e))
    }

    /// Overwrites the record at `path` wholesale.
    async fn put_node<T: Serialize>(
        &self,
        path: &str,
        record: &T,
        context: &'static str,
    ) -> Result<(), DatabaseError> {
        let result: Result<(), DatabaseError> = async {
            let response = self
                .client
                .put(self.node_url(path))
                .header(header::CONTENT_TYPE, "application/json")
                .body(serde_json::to_vec(record)?)
                .send()
                .await?;
            if !response.status().is_success() {
                return Err(DatabaseError::ApiError(
                    parse_error_response(response, context).await,
                ));
            }
            Ok(())
        }
        .await;
        result.map_err(|e| log_failure(context, e))
    }

    async fn delete_node(&self, path: &str, context: &'static str) -> Result<(), DatabaseError> {
        let result: Result<(), DatabaseError> = async {
            let response = self.client.delete(self.node_url(path)).send().await?;
            if !response.status().is_success() {
                return Err(DatabaseError::ApiError(
                    parse_error_response(response, context).await,
                ));
            }
            Ok(())
        }
        .await;
        result.map_err(|e| log_failure(context, e))
    }

    /// Fetches every article, in creation order.
    ///
    /// Push keys sort chronologically, so ascending key order is creation
    /// order. An empty or absent collection yields an empty vector.
    pub async fn get_articles(&self) -> Result<Vec<Article>, DatabaseError> {
        let nodes: Option<BTreeMap<String, Article>> =
            self.read_node("articles", "Getting articles failed").await?;
        Ok(nodes
            .unwrap_or_default()
            .into_iter()
            .map(|(key, mut article)| {
                article.id = Some(key);
                article
            })
            .collect())
    }

    /// Fetches a single article. `None` means the backend holds nothing at
    /// that key; a deleted record and one that never existed read the same.
    pub async fn get_article(&self, id: &str) -> Result<Option<Article>, DatabaseError> {
        let node: Option<Article> = self
            .read_node(&format!("articles/{}", id), "Getting article failed")
            .await?;
        Ok(node.map(|mut article| {
            article.id = Some(id.to_string());
            article
        }))
    }

    /// Saves an article and returns its effective id.
    ///
    /// With an `id` the record is partially updated in place; without one it
    /// is appended under a newly generated key. The `id` field itself never
    /// reaches the wire in either case.
    pub async fn save_article(&self, article: &Article) -> Result<String, DatabaseError> {
        match &article.id {
            Some(id) => {
                self.patch_node(
                    &format!("articles/{}", id),
                    article,
                    "Saving article failed",
                )
                .await?;
                Ok(id.clone())
            }
            None => {
                self.push_node("articles", article, "Saving article failed")
                    .await
            }
        }
    }

    pub async fn delete_article(&self, id: &str) -> Result<(), DatabaseError> {
        self.delete_node(&format!("articles/{}", id), "Deleting article failed")
            .await
    }

    /// Fetches the comments of one article, in creation order.
    pub async fn get_comments(&self, article_id: &str) -> Result<Vec<Comment>, DatabaseError> {
        let nodes: Option<BTreeMap<String, Comment>> = self
            .read_node(
                &format!("comments/{}", article_id),
                "Getting comments failed",
            )
            .await?;
        Ok(nodes
            .unwrap_or_default()
            .into_iter()
            .map(|(key, mut comment)| {
                comment.id = Some(key);
                comment.article_id = Some(article_id.to_string());
                comment
            })
            .collect())
    }

    /// Appends a comment under the article's scope and returns the generated
    /// id.
    pub async fn add_comment(
        &self,
        article_id: &str,
        comment: &Comment,
    ) -> Result<String, DatabaseError> {
        self.push_node(
            &format!("comments/{}", article_id),
            comment,
            "Adding comment failed",
        )
        .await
    }

    pub async fn delete_comment(
        &self,
        article_id: &str,
        comment_id: &str,
    ) -> Result<(), DatabaseError> {
        self.delete_node(
            &format!("comments/{}/{}", article_id, comment_id),
            "Deleting comment failed",
        )
        .await
    }

    /// Fetches the single settings record; a never-written record reads as
    /// the empty default, not as an error.
    pub async fn get_settings(&self) -> Result<Settings, DatabaseError> {
        let node: Option<Settings> = self.read_node("settings", "Getting settings failed").await?;
        Ok(node.unwrap_or_default())
    }

    /// Overwrites the settings record wholesale.
    pub async fn save_settings(&self, settings: &Settings) -> Result<(), DatabaseError> {
        self.put_node("settings", settings, "Saving settings failed")
            .await
    }
}
