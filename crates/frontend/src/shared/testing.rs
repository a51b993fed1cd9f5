//! Test doubles for the browser-facing seams (transport, storage,
//! navigation, timers).

use async_trait::async_trait;
use contracts::system::auth::Credential;
use serde_json::Value;
use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;
use std::time::Duration;

use super::error::ApiError;
use super::scheduler::{LocalTask, Scheduler};
use crate::system::auth::client::AuthClient;
use crate::system::auth::session::{RecordingNavigator, Session};
use crate::system::auth::storage::MemoryStore;
use crate::system::auth::transport::{HttpReply, HttpRequest, Transport};

pub const TEST_API_BASE: &str = "http://api.test/";

pub fn credential() -> Credential {
    Credential {
        access_token: "access-1".into(),
        created_at_token: "2024-01-01T09:00:00".into(),
    }
}

/// Signed-in client over `transport`
pub fn scripted_client(transport: &ScriptedTransport) -> (AuthClient, Rc<RecordingNavigator>) {
    let navigator = Rc::new(RecordingNavigator::default());
    let session = Session::new(
        Rc::new(MemoryStore::with_credential(&credential())),
        navigator.clone(),
    );
    let client = AuthClient::new(session, Rc::new(transport.clone()), TEST_API_BASE);
    (client, navigator)
}

struct Scripted {
    delay: Duration,
    outcome: Result<HttpReply, ApiError>,
}

#[derive(Default)]
struct Script {
    replies: VecDeque<Scripted>,
    requests: Vec<HttpRequest>,
}

/// Replies with queued responses in call order and keeps every request
#[derive(Clone, Default)]
pub struct ScriptedTransport {
    inner: Rc<RefCell<Script>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reply(&self, status: u16, body: Value) {
        self.reply_after(Duration::ZERO, status, body);
    }

    pub fn reply_after(&self, delay: Duration, status: u16, body: Value) {
        self.push(delay, Ok(HttpReply { status, body: body.to_string() }));
    }

    pub fn reply_raw(&self, status: u16, body: &str) {
        self.push(
            Duration::ZERO,
            Ok(HttpReply {
                status,
                body: body.to_string(),
            }),
        );
    }

    pub fn fail(&self, reason: &str) {
        self.push(Duration::ZERO, Err(ApiError::Network(reason.to_string())));
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.inner.borrow().requests.clone()
    }

    /// Request bodies parsed as JSON (`Null` for bodiless requests)
    pub fn bodies(&self) -> Vec<Value> {
        self.requests()
            .iter()
            .map(|r| {
                r.body
                    .as_deref()
                    .and_then(|b| serde_json::from_str(b).ok())
                    .unwrap_or(Value::Null)
            })
            .collect()
    }

    fn push(&self, delay: Duration, outcome: Result<HttpReply, ApiError>) {
        self.inner
            .borrow_mut()
            .replies
            .push_back(Scripted { delay, outcome });
    }
}

#[async_trait(?Send)]
impl Transport for ScriptedTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpReply, ApiError> {
        let next = {
            let mut script = self.inner.borrow_mut();
            script.requests.push(request);
            script.replies.pop_front()
        };
        let Some(next) = next else {
            return Err(ApiError::Network("no scripted reply".into()));
        };
        if !next.delay.is_zero() {
            tokio::time::sleep(next.delay).await;
        }
        next.outcome
    }
}

/// Tokio timers; `spawn` needs to run inside a `LocalSet`
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioScheduler;

impl Scheduler for TokioScheduler {
    fn sleep(&self, duration: Duration) -> LocalTask {
        Box::pin(tokio::time::sleep(duration))
    }

    fn spawn(&self, task: LocalTask) {
        tokio::task::spawn_local(task);
    }
}
