//! In-process stand-in for the Messages API.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::{
    Router,
    extract::{Path, State},
    http::{HeaderMap, StatusCode, header},
    routing::post,
};
use tokio::net::TcpListener;

#[derive(Debug, Clone)]
pub struct Recorded {
    pub account_sid: String,
    pub authorization: Option<String>,
    pub content_type: Option<String>,
    pub form: Vec<(String, String)>,
}

#[derive(Clone)]
pub struct Stub {
    pub base_url: String,
    recorded: Arc<Mutex<Vec<Recorded>>>,
    status: StatusCode,
    body: &'static str,
    delay: Option<Duration>,
}

impl Stub {
    pub fn requests(&self) -> Vec<Recorded> {
        self.recorded.lock().unwrap().clone()
    }
}

pub async fn spawn_stub(status: StatusCode, body: &'static str) -> Stub {
    spawn(status, body, None).await
}

/// Stub that waits `delay` before answering.
pub async fn spawn_slow_stub(delay: Duration) -> Stub {
    spawn(StatusCode::CREATED, r#"{"sid":"SMslow"}"#, Some(delay)).await
}

async fn spawn(status: StatusCode, body: &'static str, delay: Option<Duration>) -> Stub {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let stub = Stub {
        base_url: format!("http://{addr}"),
        recorded: Arc::new(Mutex::new(Vec::new())),
        status,
        body,
        delay,
    };

    let app = Router::new()
        .route(
            "/2010-04-01/Accounts/{sid}/Messages.json",
            post(create_message),
        )
        .with_state(stub.clone());
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    stub
}

/// Base URL on which nothing is listening.
pub async fn refused_base_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}")
}

async fn create_message(
    State(stub): State<Stub>,
    Path(sid): Path<String>,
    headers: HeaderMap,
    body: String,
) -> (StatusCode, [(header::HeaderName, &'static str); 1], &'static str) {
    let header_value = |name: header::HeaderName| {
        headers
            .get(name)
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned)
    };
    stub.recorded.lock().unwrap().push(Recorded {
        account_sid: sid,
        authorization: header_value(header::AUTHORIZATION),
        content_type: header_value(header::CONTENT_TYPE),
        form: url::form_urlencoded::parse(body.as_bytes())
            .into_owned()
            .collect(),
    });

    if let Some(delay) = stub.delay {
        tokio::time::sleep(delay).await;
    }

    (
        stub.status,
        [(header::CONTENT_TYPE, "application/json")],
        stub.body,
    )
}
