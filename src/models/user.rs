use serde::{Deserialize, Serialize};

/// Authenticated user attached to a request by the authentication middleware.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub role: String,
    #[serde(skip)]
    pub access_token: Option<String>,
}
