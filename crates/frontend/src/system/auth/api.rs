//! Вход, выход и проверка токена.
//!
//! These calls run outside the usual protected-call path: sign-in has no
//! credential yet, and sign-out must not loop back into itself on a 401.

use contracts::system::auth::{Authed, Credential, NoBody, SignInFailure, SignInRequest, SignInResponse};

use super::client::AuthClient;
use super::session::HOME_PATH;
use super::transport::{HttpRequest, Method};
use crate::shared::error::ApiError;

pub const SIGN_IN_FAILED: &str = "Ошибка авторизации";
pub const CONNECTION_FAILED: &str = "Произошла ошибка при подключении к серверу";

/// Exchange login + secret key for a credential and store it.
///
/// The error is the text shown under the sign-in form.
pub async fn sign_in(client: &AuthClient, login: &str, secret_key: &str) -> Result<Credential, String> {
    let request = SignInRequest {
        login: login.to_string(),
        secret_key: secret_key.to_string(),
    };
    let body = serde_json::to_string(&request).map_err(|e| {
        log::error!("signin_admin: {}", e);
        SIGN_IN_FAILED.to_string()
    })?;

    let reply = client
        .transport()
        .send(HttpRequest {
            method: Method::Post,
            url: client.url("signin_admin"),
            body: Some(body),
        })
        .await
        .map_err(|e| {
            log::error!("signin_admin: {}", e);
            CONNECTION_FAILED.to_string()
        })?;

    if reply.status != 200 {
        let detail = reply.json::<SignInFailure>().ok().and_then(|f| f.detail);
        log::warn!("signin_admin: HTTP {}", reply.status);
        return Err(detail.unwrap_or_else(|| SIGN_IN_FAILED.to_string()));
    }

    let credential: Credential = reply
        .json::<SignInResponse>()
        .map_err(|e| {
            log::error!("signin_admin: {}", e);
            CONNECTION_FAILED.to_string()
        })?
        .into();
    client.session().set(&credential);
    log::info!("Signed in as {}", login);
    Ok(credential)
}

/// Sign-in page entry: an existing session goes straight to the console
pub fn skip_sign_in_if_signed_in(client: &AuthClient) -> bool {
    if client.session().current().is_some() {
        client.session().navigator().go_to(HOME_PATH);
        true
    } else {
        false
    }
}

/// Best-effort `DELETE out`, then local sign-out regardless of its result
pub async fn sign_out(client: &AuthClient) {
    if let Some(credential) = client.session().current() {
        match serde_json::to_string(&Authed::new(&credential, NoBody {})) {
            Ok(body) => {
                let sent = client
                    .transport()
                    .send(HttpRequest {
                        method: Method::Delete,
                        url: client.url("out"),
                        body: Some(body),
                    })
                    .await;
                if let Err(e) = sent {
                    log::warn!("out: {}", e);
                }
            }
            Err(e) => log::warn!("out: {}", e),
        }
    }
    client.session().clear();
    client.session().navigator().go_to_sign_in();
}

/// Ask the server whether the stored token is still valid; signs out if not
pub async fn check_token(client: &AuthClient) -> Result<(), ApiError> {
    let reply = client
        .send(Method::Post, "check_validate_token", &NoBody {})
        .await?;
    if reply.status == 200 {
        return Ok(());
    }
    log::warn!("check_validate_token: HTTP {}", reply.status);
    sign_out(client).await;
    Err(ApiError::AuthExpired)
}
