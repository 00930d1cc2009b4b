//! Client SDK for a Firebase-backed blog admin panel.
//!
//! Two halves. The service clients are thin typed passthroughs that fail
//! fast and log every failure: email/password sign-in in [`auth`], the
//! articles/comments/settings tree in [`database`], image uploads in
//! [`storage`]. The [`editor`] module is the other half, the dispatcher
//! behind the admin page's rich text toolbar.
//!
//! Everything hangs off one [`FirebaseApp`] built from the project's
//! configuration record. Sub-clients share the app's HTTP client and its
//! session slot, so one `sign_in` authenticates them all.
//!
//! # Examples
//!
//! ```rust,no_run
//! use blog_admin_sdk::{FirebaseApp, FirebaseConfig};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let config = FirebaseConfig::from_json(
//!     r#"{
//!         "apiKey": "AIza...",
//!         "authDomain": "my-blog.firebaseapp.com",
//!         "databaseURL": "https://my-blog.firebaseio.com",
//!         "projectId": "my-blog",
//!         "storageBucket": "my-blog.appspot.com",
//!         "messagingSenderId": "123456789"
//!     }"#,
//! )?;
//!
//! let app = FirebaseApp::new(config);
//! app.auth().sign_in("admin@example.com", "hunter2").await?;
//!
//! for article in app.database().get_articles().await? {
//!     println!("{:?}", article.title);
//! }
//! # Ok(())
//! # }
//! ```

pub mod auth;
pub mod core;
pub mod database;
pub mod editor;
pub mod storage;

use reqwest::Client;
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use serde::{Deserialize, Serialize};

use crate::auth::FirebaseAuth;
use crate::core::middleware::SessionMiddleware;
use crate::core::session::SessionHandle;
use crate::database::FirebaseDatabase;
use crate::storage::FirebaseStorage;

/// The configuration record a Firebase project hands out at setup time.
///
/// Field names follow the JSON the console generates, so the same record a
/// web page embeds deserializes directly. `auth_domain`, `project_id`,
/// `messaging_sender_id` and `app_id` are carried for config-file
/// compatibility; nothing in this crate reads them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FirebaseConfig {
    pub api_key: String,
    pub auth_domain: String,
    // The console spells this one databaseURL, not databaseUrl.
    #[serde(rename = "databaseURL")]
    pub database_url: String,
    pub project_id: String,
    pub storage_bucket: String,
    pub messaging_sender_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub app_id: Option<String>,
}

impl FirebaseConfig {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// Connection handle for one Firebase project.
///
/// Owns the HTTP client and the session slot. Both are created exactly
/// once here; every sub-client and every clone of the app shares them.
#[derive(Clone)]
pub struct FirebaseApp {
    config: FirebaseConfig,
    client: ClientWithMiddleware,
    session: SessionHandle,
}

impl FirebaseApp {
    pub fn new(config: FirebaseConfig) -> Self {
        let session = SessionHandle::new();
        let client = ClientBuilder::new(Client::new())
            .with(SessionMiddleware::new(session.clone()))
            .build();

        Self {
            config,
            client,
            session,
        }
    }

    /// Client for email/password sign-in.
    pub fn auth(&self) -> FirebaseAuth {
        FirebaseAuth::new(
            self.client.clone(),
            self.config.api_key.clone(),
            self.session.clone(),
        )
    }

    /// Client for the articles/comments/settings tree.
    pub fn database(&self) -> FirebaseDatabase {
        FirebaseDatabase::new(self.client.clone(), self.config.database_url.clone())
    }

    /// Client for the image bucket.
    pub fn storage(&self) -> FirebaseStorage {
        FirebaseStorage::new(self.client.clone(), self.config.storage_bucket.clone())
    }

    pub fn config(&self) -> &FirebaseConfig {
        &self.config
    }

    /// The session slot shared by all sub-clients of this app.
    pub fn session(&self) -> SessionHandle {
        self.session.clone()
    }
}
