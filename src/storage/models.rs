use serde::Deserialize;

/// Object metadata returned by the Storage v0 upload endpoint.
///
/// `download_tokens` is a comma-separated list; the first token is the one
/// the download URL is built from.
#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct UploadMetadata {
    pub name: Option<String>,
    pub bucket: Option<String>,
    pub content_type: Option<String>,
    pub size: Option<String>,
    pub time_created: Option<String>,
    pub download_tokens: Option<String>,
}
