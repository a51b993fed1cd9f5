use contracts::shared::mutation::{MutationOutcome, MutationReply};
use contracts::system::auth::Authed;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::rc::Rc;

use super::session::Session;
use super::transport::{GlooTransport, HttpReply, HttpRequest, Method, Transport, STATUS_UNAUTHORIZED};
use crate::shared::api_utils::api_url;
use crate::shared::config::AppConfig;
use crate::shared::error::ApiError;

/// Клиент API, подставляющий токены сессии в каждый запрос.
///
/// An Unauthorized reply from any endpoint expires the session (clear +
/// redirect to sign-in), but the caller still gets
/// `Err(ApiError::AuthExpired)` back and has to stop on it.
#[derive(Clone)]
pub struct AuthClient {
    session: Session,
    transport: Rc<dyn Transport>,
    api_base: String,
}

impl AuthClient {
    pub fn new(session: Session, transport: Rc<dyn Transport>, api_base: &str) -> Self {
        Self {
            session,
            transport,
            api_base: api_base.to_string(),
        }
    }

    pub fn browser(config: &AppConfig) -> Self {
        Self::new(Session::browser(), Rc::new(GlooTransport), &config.api_server)
    }

    /// Client for a page that requires a signed-in admin.
    ///
    /// `None` means the page has already been redirected to sign-in.
    pub fn for_page() -> Option<Self> {
        let client = Self::browser(&AppConfig::current());
        client.session.require().map(|_| client)
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn transport(&self) -> &dyn Transport {
        self.transport.as_ref()
    }

    pub fn url(&self, endpoint: &str) -> String {
        api_url(&self.api_base, endpoint)
    }

    /// Send `body` with the credential embedded and return the raw reply
    pub async fn send<B: Serialize>(
        &self,
        method: Method,
        endpoint: &str,
        body: &B,
    ) -> Result<HttpReply, ApiError> {
        let Some(credential) = self.session.current() else {
            log::warn!("{}: no credential stored", endpoint);
            self.session.expire();
            return Err(ApiError::AuthExpired);
        };

        let payload = serde_json::to_string(&Authed::new(&credential, body))
            .map_err(|e| ApiError::Decode(format!("Failed to serialize request: {}", e)))?;

        self.dispatch(
            endpoint,
            HttpRequest {
                method,
                url: self.url(endpoint),
                body: Some(payload),
            },
        )
        .await
    }

    /// Authenticated call decoding a 2xx JSON reply
    pub async fn call<B, T>(&self, method: Method, endpoint: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize,
        T: DeserializeOwned,
    {
        let reply = self.send(method, endpoint, body).await?;
        Self::decode(endpoint, reply)
    }

    /// Bodiless GET (the list endpoints of the catalog pages)
    pub async fn get<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T, ApiError> {
        let reply = self
            .dispatch(
                endpoint,
                HttpRequest {
                    method: Method::Get,
                    url: self.url(endpoint),
                    body: None,
                },
            )
            .await?;
        Self::decode(endpoint, reply)
    }

    /// Mutation whose reply uses the `success` / "успешно" contract
    pub async fn mutation<B: Serialize>(
        &self,
        method: Method,
        endpoint: &str,
        body: &B,
    ) -> Result<Option<String>, ApiError> {
        let reply: MutationReply = self.call(method, endpoint, body).await?;
        match MutationOutcome::from(reply) {
            MutationOutcome::Succeeded { message } => Ok(message),
            MutationOutcome::Rejected { message } => {
                let reason = message.unwrap_or_else(|| "Unknown error".to_string());
                log::error!("{} failed: {}", endpoint, reason);
                Err(ApiError::Rejected(reason))
            }
        }
    }

    /// Mutation where any 2xx counts as done and the body is ignored
    pub async fn command<B: Serialize>(
        &self,
        method: Method,
        endpoint: &str,
        body: &B,
    ) -> Result<(), ApiError> {
        let reply = self.send(method, endpoint, body).await?;
        if reply.is_ok() {
            Ok(())
        } else {
            let reason = reply.failure_reason();
            log::error!("{} failed: {}", endpoint, reason);
            Err(ApiError::Rejected(reason))
        }
    }

    async fn dispatch(&self, endpoint: &str, request: HttpRequest) -> Result<HttpReply, ApiError> {
        let reply = self.transport.send(request).await.map_err(|e| {
            log::error!("{}: {}", endpoint, e);
            e
        })?;

        if reply.status == STATUS_UNAUTHORIZED {
            log::warn!("{}: unauthorized", endpoint);
            self.session.expire();
            return Err(ApiError::AuthExpired);
        }
        Ok(reply)
    }

    fn decode<T: DeserializeOwned>(endpoint: &str, reply: HttpReply) -> Result<T, ApiError> {
        if !reply.is_ok() {
            let reason = reply.failure_reason();
            log::error!("{} failed: {}", endpoint, reason);
            return Err(ApiError::Rejected(reason));
        }
        reply.json().map_err(|e| {
            log::error!("{}: {}", endpoint, e);
            e
        })
    }
}
