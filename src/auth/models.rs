use serde::{Deserialize, Serialize};

/// The authenticated-user record handed back to callers after sign-in.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    pub local_id: String,
    pub email: Option<String>,
    pub display_name: Option<String>,
    pub registered: Option<bool>,
}

impl From<SignInResponse> for UserRecord {
    fn from(response: SignInResponse) -> Self {
        Self {
            local_id: response.local_id,
            email: response.email,
            display_name: response.display_name,
            registered: response.registered,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignInRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
    pub return_secure_token: bool,
}

// `expiresIn` arrives as a decimal string, per the Identity Toolkit wire
// format.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignInResponse {
    pub local_id: String,
    pub email: Option<String>,
    pub display_name: Option<String>,
    pub id_token: String,
    pub refresh_token: Option<String>,
    pub expires_in: Option<String>,
    pub registered: Option<bool>,
}
