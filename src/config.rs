//! Layered service configuration.
//!
//! Sources, lowest precedence first:
//! 1. built-in defaults,
//! 2. `config/default`, `config/{RUN_MODE}` and `config/local` files (any format the
//!    `config` crate understands, all optional),
//! 3. `RELAY__<SECTION>__<KEY>` environment variables,
//! 4. the conventional variables `TWILIO_ACCOUNT_SID`, `TWILIO_AUTH_TOKEN`, `TO_TEST`,
//!    `TWILIO_NUMBER` and `PORT`.

use std::env;
use std::fmt;
use std::time::Duration;

use config::{Config, ConfigError, Environment, File, Map};
use serde::{Deserialize, Serialize};

use crate::client::Credentials;
use crate::domain::{OutboundMessage, ValidationError};

const ENV_PREFIX: &str = "RELAY";

/// Conventional variable name → configuration key.
const WELL_KNOWN_VARS: [(&str, &str); 5] = [
    ("TWILIO_ACCOUNT_SID", "twilio.account_sid"),
    ("TWILIO_AUTH_TOKEN", "twilio.auth_token"),
    ("TO_TEST", "test_sms.recipient"),
    ("TWILIO_NUMBER", "test_sms.sender"),
    ("PORT", "server.port"),
];

/// Application configuration
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub twilio: TwilioConfig,
    pub test_sms: TestSmsConfig,
    pub logging: LoggingConfig,
}

/// Listener configuration
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServerConfig {
    /// Bind host (default: 0.0.0.0)
    pub host: String,
    /// Bind port (default: 5000)
    pub port: u16,
}

/// Twilio account and API settings
#[derive(Deserialize, Serialize, Clone)]
pub struct TwilioConfig {
    /// Account SID; empty when unset
    pub account_sid: String,
    /// Auth token; empty when unset
    pub auth_token: String,
    /// API base URL (default: https://api.twilio.com)
    pub base_url: String,
    /// Whole-request timeout in seconds (default: 10); 0 disables the timeout
    pub timeout_seconds: u64,
}

/// The message sent by `POST /sendTestSMS`
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct TestSmsConfig {
    pub recipient: String,
    pub sender: String,
    /// default: "Test SMS"
    pub body: String,
}

/// Logging configuration
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct LoggingConfig {
    /// Level or `EnvFilter` directive used when `RUST_LOG` is unset (default: info)
    pub level: String,
    /// compact, pretty or json (default: compact)
    pub format: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
        }
    }
}

impl Default for TwilioConfig {
    fn default() -> Self {
        Self {
            account_sid: String::new(),
            auth_token: String::new(),
            base_url: "https://api.twilio.com".to_string(),
            timeout_seconds: 10,
        }
    }
}

impl Default for TestSmsConfig {
    fn default() -> Self {
        Self {
            recipient: String::new(),
            sender: String::new(),
            body: "Test SMS".to_string(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "compact".to_string(),
        }
    }
}

impl fmt::Debug for TwilioConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TwilioConfig")
            .field("account_sid", &self.account_sid)
            .field("auth_token", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("timeout_seconds", &self.timeout_seconds)
            .finish()
    }
}

impl ServerConfig {
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl TwilioConfig {
    pub fn credentials(&self) -> Credentials {
        Credentials::new(self.account_sid.as_str(), self.auth_token.as_str())
    }

    /// Request timeout, `None` when `timeout_seconds` is 0.
    pub fn timeout(&self) -> Option<Duration> {
        Some(self.timeout_seconds)
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
    }
}

impl TestSmsConfig {
    /// Build the outbound test message; fails if recipient or sender is unset.
    pub fn message(&self) -> Result<OutboundMessage, ValidationError> {
        OutboundMessage::text(
            self.recipient.as_str(),
            self.sender.as_str(),
            self.body.as_str(),
        )
    }
}

impl AppConfig {
    /// Load configuration from files and the process environment.
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());
        Self::load_from(&run_mode, env::vars().collect())
    }

    /// Same as [`AppConfig::load`], with an explicit variable map instead of the process
    /// environment.
    pub fn load_from(run_mode: &str, vars: Map<String, String>) -> Result<Self, ConfigError> {
        let mut builder = Config::builder()
            .add_source(Config::try_from(&AppConfig::default())?)
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            .add_source(File::with_name("config/local").required(false))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .source(Some(vars.clone())),
            );

        for (var, key) in WELL_KNOWN_VARS {
            builder = builder.set_override_option(key, vars.get(var).cloned())?;
        }

        builder.build()?.try_deserialize()
    }
}
