//! Twilio relay: a typed client for the Twilio Messages API plus the small HTTP service
//! built on it.
//!
//! The crate is layered: a domain layer of strong types, a transport layer for wire-format
//! details, and a client layer issuing the request. The `server` module exposes the client
//! over HTTP together with a TwiML voice greeting.
//!
//! ```rust,no_run
//! use twilio_relay::{Credentials, OutboundMessage, TwilioClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), twilio_relay::TwilioError> {
//!     let client = TwilioClient::new(Credentials::new("AC...", "..."))?;
//!     let msg = OutboundMessage::text("+15551234567", "+15557654321", "hello")?;
//!     let result = client.send(&msg).await?;
//!     println!("{:?} {:?}", result.sid, result.status);
//!     Ok(())
//! }
//! ```
#![forbid(unsafe_code)]

pub mod client;
pub mod config;
pub mod domain;
pub mod logging;
pub mod server;
mod transport;
pub mod voice;

pub use client::{Credentials, TwilioClient, TwilioClientBuilder, TwilioError};
pub use domain::{
    AccountSid, AuthToken, MediaUrl, MessageBody, MessageResult, MessagingServiceSid,
    OutboundMessage, PhoneNumber, RawPhoneNumber, ValidationError,
};
pub use voice::{Say, VoiceResponse};
