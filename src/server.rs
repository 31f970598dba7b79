//! Inbound HTTP surface.
//!
//! - `GET /` → `hello world`
//! - `POST /hello` → TwiML greeting
//! - `POST /sendTestSMS` → sends the configured test message and relays the Message resource

use axum::{
    Json, Router,
    extract::State,
    http::{StatusCode, header},
    response::IntoResponse,
    routing::{get, post},
};
use tokio::net::TcpListener;
use tracing::{error, info};

use crate::client::TwilioClient;
use crate::config::TestSmsConfig;
use crate::domain::MessageResult;
use crate::voice::VoiceResponse;

#[derive(Clone)]
pub struct AppState {
    pub client: TwilioClient,
    pub test_sms: TestSmsConfig,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/hello", post(hello))
        .route("/sendTestSMS", post(send_test_sms))
        .with_state(state)
}

/// Serve until Ctrl-C.
pub async fn serve(listener: TcpListener, state: AppState) -> Result<(), std::io::Error> {
    if let Ok(addr) = listener.local_addr() {
        info!(%addr, "listening");
    }
    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("shutting down");
    }
}

async fn index() -> &'static str {
    "hello world"
}

async fn hello() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, VoiceResponse::CONTENT_TYPE)],
        VoiceResponse::greeting().to_xml(),
    )
}

async fn send_test_sms(State(state): State<AppState>) -> Result<Json<MessageResult>, StatusCode> {
    let message = state.test_sms.message().map_err(|err| {
        error!(error = %err, "test SMS is not configured");
        StatusCode::INTERNAL_SERVER_ERROR
    })?;

    match state.client.send(&message).await {
        Ok(result) => {
            info!(sid = ?result.sid, status = ?result.status, "test SMS relayed");
            Ok(Json(result))
        }
        Err(err) => {
            error!(error = %err, "test SMS failed");
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}
