//! In-process mail relay for exercising real HTTP notifiers without network access.
//!
//! The relay accepts `POST /send` with any JSON body, records it together with
//! the `api-key` header, and answers `201 Created` unless told to fail.

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use http::{HeaderMap, StatusCode};
use serde_json::Value;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// One message as received by the relay.
#[derive(Debug, Clone)]
pub struct ReceivedMail {
    pub api_key: Option<String>,
    pub body: Value,
}

impl ReceivedMail {
    /// First recipient address, if the payload has the expected shape.
    pub fn recipient(&self) -> Option<&str> {
        self.body["to"][0]["email"].as_str()
    }

    pub fn html(&self) -> Option<&str> {
        self.body["htmlContent"].as_str()
    }
}

#[derive(Clone, Default)]
struct RelayState {
    received: Arc<Mutex<Vec<ReceivedMail>>>,
    failure: Arc<Mutex<Option<StatusCode>>>,
}

async fn accept(
    State(relay): State<RelayState>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> StatusCode {
    let api_key = headers
        .get("api-key")
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned);
    relay
        .received
        .lock()
        .unwrap()
        .push(ReceivedMail { api_key, body });
    relay.failure.lock().unwrap().unwrap_or(StatusCode::CREATED)
}

/// Fake mail relay bound to an ephemeral localhost port. Stops on drop.
pub struct MockMailRelay {
    addr: SocketAddr,
    state: RelayState,
    handle: JoinHandle<()>,
}

impl MockMailRelay {
    pub async fn start() -> Self {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind mock mail relay");
        let addr = listener.local_addr().expect("mock mail relay has no address");

        let state = RelayState::default();
        let app = Router::new()
            .route("/send", post(accept))
            .with_state(state.clone());
        let handle = tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        Self {
            addr,
            state,
            handle,
        }
    }

    /// Endpoint to configure as the notifier's API URL.
    pub fn url(&self) -> String {
        format!("http://{}/send", self.addr)
    }

    /// Answer every following message with `status` (still recording it).
    pub fn fail_with(&self, status: StatusCode) {
        *self.state.failure.lock().unwrap() = Some(status);
    }

    pub fn received(&self) -> Vec<ReceivedMail> {
        self.state.received.lock().unwrap().clone()
    }
}

impl Drop for MockMailRelay {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
