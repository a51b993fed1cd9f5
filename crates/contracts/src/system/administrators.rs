use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Administrator {
    pub name: String,
    pub login: String,
}

/// Body of `fetch_administrators`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AdministratorsResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub administrators: Option<Vec<Administrator>>,
    /// Login of the admin who owns the current session
    #[serde(default)]
    pub current_login_admin: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateAdministratorDto {
    pub name: String,
    pub login: String,
    pub secret_key: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteAdministratorDto {
    pub login: String,
}
