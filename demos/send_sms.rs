use std::io;

use twilio_relay::{Credentials, OutboundMessage, TwilioClient};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let _ = dotenvy::dotenv();

    let required = |name: &str| {
        std::env::var(name).map_err(|_| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("{name} environment variable is required"),
            )
        })
    };

    let credentials = Credentials::new(
        required("TWILIO_ACCOUNT_SID")?,
        required("TWILIO_AUTH_TOKEN")?,
    );
    let to = required("TO_TEST")?;
    let from = required("TWILIO_NUMBER")?;
    let body = std::env::var("SMS_BODY").unwrap_or_else(|_| "Hello from twilio-relay.".to_owned());

    let client = TwilioClient::new(credentials)?;
    let message = OutboundMessage::text(to, from, body)?;

    let result = client.send(&message).await?;
    println!(
        "sid: {:?}, status: {:?}, error_code: {:?}",
        result.sid, result.status, result.error_code
    );

    Ok(())
}
