//! In-process stand-in for a Nominatim `/reverse` endpoint.

#![allow(dead_code)]

use axum::extract::{Query, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

/// What the stub saw on its most recent request.
#[derive(Debug, Clone, Default)]
pub struct SeenRequest {
    pub query: HashMap<String, String>,
    pub user_agent: Option<String>,
}

#[derive(Clone)]
struct StubState {
    status: u16,
    body: String,
    seen: Arc<Mutex<Option<SeenRequest>>>,
}

pub struct Stub {
    pub base_url: String,
    seen: Arc<Mutex<Option<SeenRequest>>>,
}

impl Stub {
    pub fn last_request(&self) -> SeenRequest {
        self.seen.lock().unwrap().clone().expect("stub received no request")
    }
}

async fn stub_reverse(
    State(state): State<StubState>,
    Query(query): Query<HashMap<String, String>>,
    headers: HeaderMap,
) -> Response {
    let user_agent = headers
        .get(header::USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    *state.seen.lock().unwrap() = Some(SeenRequest { query, user_agent });

    let status = StatusCode::from_u16(state.status).unwrap();
    (status, [(header::CONTENT_TYPE, "application/json")], state.body).into_response()
}

/// Serve `router` on a fresh loopback port from a background thread.
pub fn serve_in_background(router: Router) -> SocketAddr {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    listener.set_nonblocking(true).unwrap();
    let addr = listener.local_addr().unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async move {
            let listener = tokio::net::TcpListener::from_std(listener).unwrap();
            axum::serve(listener, router).await.unwrap();
        });
    });

    addr
}

/// Start a stub that answers every `/reverse` request with `status` and `body`.
pub fn spawn_stub(status: u16, body: &str) -> Stub {
    let seen = Arc::new(Mutex::new(None));
    let state = StubState {
        status,
        body: body.to_string(),
        seen: seen.clone(),
    };
    let router = Router::new()
        .route("/reverse", get(stub_reverse))
        .with_state(state);
    let addr = serve_in_background(router);

    Stub {
        base_url: format!("http://{}", addr),
        seen,
    }
}

/// A base URL on which nothing is listening.
pub fn dead_base_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}
