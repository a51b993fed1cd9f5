use serde::{Deserialize, Serialize};

/// Пара токенов текущей сессии администратора.
///
/// Both values are issued together by `signin_admin` and are only ever
/// stored, sent and cleared together.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credential {
    pub access_token: String,
    pub created_at_token: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignInRequest {
    pub login: String,
    pub secret_key: String,
}

/// 200 body of `signin_admin`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignInResponse {
    pub access_token: String,
    pub created_at_token: String,
}

impl From<SignInResponse> for Credential {
    fn from(response: SignInResponse) -> Self {
        Self {
            access_token: response.access_token,
            created_at_token: response.created_at_token,
        }
    }
}

/// Non-200 body of `signin_admin`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SignInFailure {
    #[serde(default)]
    pub detail: Option<String>,
}

/// Body of endpoints that take nothing but the credential
/// (`out`, `check_validate_token`, the `fetch_*` family).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NoBody {}

/// Request body with the session credential embedded next to the payload.
///
/// The API has no header-based auth: every protected endpoint expects
/// `token` and `created_at_token` as top-level JSON fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Authed<T> {
    pub token: String,
    pub created_at_token: String,
    #[serde(flatten)]
    pub body: T,
}

impl<T> Authed<T> {
    pub fn new(credential: &Credential, body: T) -> Self {
        Self {
            token: credential.access_token.clone(),
            created_at_token: credential.created_at_token.clone(),
            body,
        }
    }
}
