//! In-process registry double that records every request it receives

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::extract::State;
use axum::http::{HeaderMap, Method, StatusCode, Uri};
use axum::Router;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// A request as seen by the registry
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: Method,
    pub path: String,
    pub headers: HeaderMap,
    pub body: String,
}

impl RecordedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    pub fn json(&self) -> serde_json::Value {
        serde_json::from_str(&self.body).expect("request body should be JSON")
    }
}

#[derive(Clone, Default)]
struct MockState {
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
    statuses: Arc<Mutex<HashMap<Method, StatusCode>>>,
}

pub struct MockRegistry {
    pub base_url: String,
    state: MockState,
    handle: JoinHandle<()>,
}

impl MockRegistry {
    /// Start a registry that answers `201` to POST and `204` to DELETE
    pub async fn start() -> Self {
        Self::start_with_prefix("").await
    }

    /// Start a registry whose base URL carries a path prefix
    pub async fn start_with_prefix(prefix: &str) -> Self {
        let state = MockState::default();
        {
            let mut statuses = state.statuses.lock().unwrap();
            statuses.insert(Method::POST, StatusCode::CREATED);
            statuses.insert(Method::DELETE, StatusCode::NO_CONTENT);
        }

        let app = Router::new().fallback(record).with_state(state.clone());
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url: format!("http://{}{}", addr, prefix),
            state,
            handle,
        }
    }

    /// Answer requests with `method` using `status` from now on
    pub fn respond(&self, method: Method, status: StatusCode) {
        self.state.statuses.lock().unwrap().insert(method, status);
    }

    /// Requests received so far, in arrival order
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.requests.lock().unwrap().clone()
    }
}

impl Drop for MockRegistry {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

async fn record(
    State(state): State<MockState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: String,
) -> (StatusCode, String) {
    let status = state
        .statuses
        .lock()
        .unwrap()
        .get(&method)
        .copied()
        .unwrap_or(StatusCode::METHOD_NOT_ALLOWED);

    let reply = if status.is_success() {
        body.clone()
    } else {
        format!("{{\"error\":\"{}\"}}", status.canonical_reason().unwrap_or("unknown"))
    };

    state.requests.lock().unwrap().push(RecordedRequest {
        method,
        path: uri.path().to_string(),
        headers,
        body,
    });

    (status, reply)
}
