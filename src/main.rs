use anyhow::{Context, Result};
use tokio::net::TcpListener;
use tracing::info;

use twilio_relay::config::AppConfig;
use twilio_relay::server::{self, AppState};
use twilio_relay::{TwilioClient, logging};

#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env file is fine.
    let _ = dotenvy::dotenv();

    let config = AppConfig::load().context("failed to load configuration")?;
    logging::init(&config.logging);

    let builder = TwilioClient::builder(config.twilio.credentials())
        .base_url(config.twilio.base_url.as_str())
        .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")));
    let builder = match config.twilio.timeout() {
        Some(timeout) => builder.timeout(timeout),
        None => builder.no_timeout(),
    };
    let client = builder.build().context("failed to build Twilio client")?;
    info!(endpoint = client.messages_endpoint(), "Twilio client ready");

    let addr = config.server.bind_address();
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    server::serve(
        listener,
        AppState {
            client,
            test_sms: config.test_sms,
        },
    )
    .await
    .context("server error")
}
