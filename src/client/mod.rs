//! Client layer: orchestrates transport calls and maps transport ↔ domain.

use std::error::Error as StdError;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};

use crate::domain::{AccountSid, AuthToken, MessageResult, OutboundMessage, ValidationError};

const DEFAULT_BASE_URL: &str = "https://api.twilio.com";
const API_VERSION: &str = "2010-04-01";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

#[derive(Debug, Clone)]
struct HttpResponse {
    status: u16,
    body: String,
}

trait HttpTransport: Send + Sync {
    fn post_form<'a>(
        &'a self,
        url: &'a str,
        credentials: &'a Credentials,
        params: Vec<(String, String)>,
    ) -> BoxFuture<'a, Result<HttpResponse, Box<dyn StdError + Send + Sync>>>;
}

#[derive(Debug, Clone)]
struct ReqwestTransport {
    client: reqwest::Client,
}

impl HttpTransport for ReqwestTransport {
    fn post_form<'a>(
        &'a self,
        url: &'a str,
        credentials: &'a Credentials,
        params: Vec<(String, String)>,
    ) -> BoxFuture<'a, Result<HttpResponse, Box<dyn StdError + Send + Sync>>> {
        Box::pin(async move {
            let response = self
                .client
                .post(url)
                .basic_auth(
                    credentials.account_sid.as_str(),
                    Some(credentials.auth_token.expose()),
                )
                .form(&params)
                .send()
                .await?;
            let status = response.status().as_u16();
            let body = response.text().await?;
            Ok(HttpResponse { status, body })
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Account SID and auth token used for HTTP Basic authentication.
///
/// Empty values are accepted; Twilio answers such requests with an authentication error.
pub struct Credentials {
    account_sid: AccountSid,
    auth_token: AuthToken,
}

impl Credentials {
    pub fn new(account_sid: impl Into<String>, auth_token: impl Into<String>) -> Self {
        Self {
            account_sid: AccountSid::new(account_sid),
            auth_token: AuthToken::new(auth_token),
        }
    }

    pub fn account_sid(&self) -> &AccountSid {
        &self.account_sid
    }

    pub fn auth_token(&self) -> &AuthToken {
        &self.auth_token
    }

    fn is_incomplete(&self) -> bool {
        self.account_sid.is_empty() || self.auth_token.is_empty()
    }
}

#[derive(Debug, thiserror::Error)]
/// Errors returned by [`TwilioClient`].
pub enum TwilioError {
    /// The message failed the pre-send check, or a domain constructor rejected a value.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// HTTP client / transport failure (DNS, TLS, connect, timeout, body read).
    #[error("transport error: {0}")]
    Transport(#[source] Box<dyn StdError + Send + Sync>),

    /// Response body is not JSON or does not have the Message resource shape.
    #[error("decode error: {0}")]
    Decode(#[source] Box<dyn StdError + Send + Sync>),

    /// The configured API base URL cannot carry the Messages resource path.
    #[error("invalid API base url: {0}")]
    InvalidBaseUrl(String),
}

#[derive(Debug, Clone)]
/// Builder for [`TwilioClient`].
///
/// Use this to point the client at a different host (a stub server, a regional edge)
/// or to change the request timeout and user-agent.
pub struct TwilioClientBuilder {
    credentials: Credentials,
    base_url: String,
    timeout: Option<Duration>,
    user_agent: Option<String>,
}

impl TwilioClientBuilder {
    /// Create a builder with the public API host and a 10 second timeout.
    pub fn new(credentials: Credentials) -> Self {
        Self {
            credentials,
            base_url: DEFAULT_BASE_URL.to_owned(),
            timeout: Some(DEFAULT_TIMEOUT),
            user_agent: None,
        }
    }

    /// Override the API base URL (`https://api.twilio.com` by default).
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set the timeout applied to the entire request.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Remove the request timeout, leaving only reqwest's own defaults.
    pub fn no_timeout(mut self) -> Self {
        self.timeout = None;
        self
    }

    /// Override the HTTP `User-Agent` header.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    pub fn build(self) -> Result<TwilioClient, TwilioError> {
        let messages_endpoint = messages_endpoint(&self.base_url, &self.credentials.account_sid)?;

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        if let Some(user_agent) = self.user_agent {
            builder = builder.user_agent(user_agent);
        }

        let client = builder
            .build()
            .map_err(|err| TwilioError::Transport(Box::new(err)))?;

        if self.credentials.is_incomplete() {
            warn!("Twilio credentials are empty; requests will be rejected by the API");
        }

        Ok(TwilioClient {
            credentials: self.credentials,
            messages_endpoint,
            http: Arc::new(ReqwestTransport { client }),
        })
    }
}

fn messages_endpoint(base_url: &str, account_sid: &AccountSid) -> Result<String, TwilioError> {
    let invalid = || TwilioError::InvalidBaseUrl(base_url.to_owned());

    let mut url = url::Url::parse(base_url).map_err(|_| invalid())?;
    url.path_segments_mut()
        .map_err(|()| invalid())?
        .pop_if_empty()
        .extend([API_VERSION, "Accounts", account_sid.as_str(), "Messages.json"]);
    Ok(url.into())
}

#[derive(Clone)]
/// Twilio Messages API client.
///
/// Every [`TwilioClient::send`] is one form-encoded `POST` to
/// `{base}/2010-04-01/Accounts/{AccountSid}/Messages.json` with Basic auth. There is no
/// retry, caching or deduplication. Clones share the underlying connection pool, and a
/// single client may serve concurrent sends.
pub struct TwilioClient {
    credentials: Credentials,
    messages_endpoint: String,
    http: Arc<dyn HttpTransport>,
}

impl TwilioClient {
    /// Create a client for the public API host with default settings.
    ///
    /// For more customization, use [`TwilioClient::builder`].
    pub fn new(credentials: Credentials) -> Result<Self, TwilioError> {
        TwilioClientBuilder::new(credentials).build()
    }

    pub fn builder(credentials: Credentials) -> TwilioClientBuilder {
        TwilioClientBuilder::new(credentials)
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Fully resolved Messages resource URL for this account.
    pub fn messages_endpoint(&self) -> &str {
        &self.messages_endpoint
    }

    /// Send one message and return the created Message resource.
    ///
    /// The HTTP status is only logged: whatever body comes back is decoded. An API error
    /// document (numeric `status`, `code`, `message`) is not a Message resource and fails
    /// with [`TwilioError::Decode`].
    ///
    /// Errors:
    /// - [`TwilioError::Validation`] when [`OutboundMessage::validate`] fails (nothing is sent),
    /// - [`TwilioError::Transport`] when the request or body read fails,
    /// - [`TwilioError::Decode`] when the body is not a JSON Message resource.
    pub async fn send(&self, message: &OutboundMessage) -> Result<MessageResult, TwilioError> {
        message.validate()?;

        let params = crate::transport::encode_send_message_form(message);
        debug!(
            endpoint = %self.messages_endpoint,
            to = message.to().raw(),
            "sending message"
        );

        let response = self
            .http
            .post_form(&self.messages_endpoint, &self.credentials, params)
            .await
            .map_err(TwilioError::Transport)?;

        if !(200..=299).contains(&response.status) {
            warn!(
                status = response.status,
                "Messages API returned a non-success status"
            );
        }

        let result = crate::transport::decode_message_json_response(&response.body)
            .map_err(|err| TwilioError::Decode(Box::new(err)))?;

        debug!(sid = ?result.sid, status = ?result.status, "message accepted");
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use std::io;
    use std::sync::Mutex;

    use crate::domain::{MediaUrl, MessageBody, MessagingServiceSid, RawPhoneNumber};

    use super::*;

    #[derive(Debug, Clone)]
    struct FakeTransport {
        state: Arc<Mutex<FakeTransportState>>,
    }

    #[derive(Debug)]
    struct FakeTransportState {
        calls: usize,
        last_url: Option<String>,
        last_auth: Option<(String, String)>,
        last_params: Vec<(String, String)>,
        response: Result<(u16, String), io::ErrorKind>,
    }

    impl FakeTransport {
        fn new(response_status: u16, response_body: impl Into<String>) -> Self {
            Self::with_response(Ok((response_status, response_body.into())))
        }

        fn failing(kind: io::ErrorKind) -> Self {
            Self::with_response(Err(kind))
        }

        fn with_response(response: Result<(u16, String), io::ErrorKind>) -> Self {
            Self {
                state: Arc::new(Mutex::new(FakeTransportState {
                    calls: 0,
                    last_url: None,
                    last_auth: None,
                    last_params: Vec::new(),
                    response,
                })),
            }
        }

        fn calls(&self) -> usize {
            self.state.lock().unwrap().calls
        }

        fn last_request(
            &self,
        ) -> (Option<String>, Option<(String, String)>, Vec<(String, String)>) {
            let state = self.state.lock().unwrap();
            (
                state.last_url.clone(),
                state.last_auth.clone(),
                state.last_params.clone(),
            )
        }
    }

    impl HttpTransport for FakeTransport {
        fn post_form<'a>(
            &'a self,
            url: &'a str,
            credentials: &'a Credentials,
            params: Vec<(String, String)>,
        ) -> BoxFuture<'a, Result<HttpResponse, Box<dyn StdError + Send + Sync>>> {
            Box::pin(async move {
                let response = {
                    let mut state = self.state.lock().unwrap();
                    state.calls += 1;
                    state.last_url = Some(url.to_owned());
                    state.last_auth = Some((
                        credentials.account_sid().as_str().to_owned(),
                        credentials.auth_token().expose().to_owned(),
                    ));
                    state.last_params = params;
                    state.response.clone()
                };
                match response {
                    Ok((status, body)) => Ok(HttpResponse { status, body }),
                    Err(kind) => {
                        Err(Box::new(io::Error::from(kind)) as Box<dyn StdError + Send + Sync>)
                    }
                }
            })
        }
    }

    fn make_client(credentials: Credentials, transport: FakeTransport) -> TwilioClient {
        let messages_endpoint =
            messages_endpoint("https://example.invalid", &credentials.account_sid).unwrap();
        TwilioClient {
            credentials,
            messages_endpoint,
            http: Arc::new(transport),
        }
    }

    fn test_message() -> OutboundMessage {
        OutboundMessage::text("+15551234567", "+15557654321", "Test SMS").unwrap()
    }

    #[tokio::test]
    async fn send_posts_form_with_credentials_and_parses_response() {
        let json = r#"
        {
          "sid": "SM123",
          "status": "queued",
          "to": "+15551234567",
          "from": "+15557654321",
          "body": "Test SMS"
        }
        "#;
        let transport = FakeTransport::new(201, json);
        let client = make_client(Credentials::new("AC123", "token"), transport.clone());

        let result = client.send(&test_message()).await.unwrap();
        assert_eq!(result.sid.as_deref(), Some("SM123"));
        assert_eq!(result.status.as_deref(), Some("queued"));
        assert_eq!(result.to.as_deref(), Some("+15551234567"));
        assert_eq!(result.from.as_deref(), Some("+15557654321"));
        assert_eq!(result.body.as_deref(), Some("Test SMS"));

        let (url, auth, params) = transport.last_request();
        assert_eq!(
            url.as_deref(),
            Some("https://example.invalid/2010-04-01/Accounts/AC123/Messages.json")
        );
        assert_eq!(auth, Some(("AC123".to_owned(), "token".to_owned())));
        assert_eq!(
            params,
            vec![
                ("To".to_owned(), "+15551234567".to_owned()),
                ("From".to_owned(), "+15557654321".to_owned()),
                ("Body".to_owned(), "Test SMS".to_owned()),
            ]
        );
        assert_eq!(transport.calls(), 1);
    }

    #[tokio::test]
    async fn send_forwards_service_sid_and_media_url() {
        let transport = FakeTransport::new(201, r#"{"sid":"MM1"}"#);
        let client = make_client(Credentials::new("AC123", "token"), transport.clone());
        let message = OutboundMessage::new(
            RawPhoneNumber::new("+15551234567").unwrap(),
            MessageBody::new("owl").unwrap(),
        )
        .with_messaging_service_sid(MessagingServiceSid::new("MG9").unwrap())
        .with_media_url(MediaUrl::new("https://demo.twilio.com/owl.png").unwrap());

        client.send(&message).await.unwrap();

        let (_, _, params) = transport.last_request();
        assert!(params.contains(&("MessagingServiceSid".to_owned(), "MG9".to_owned())));
        assert!(params.contains(&(
            "MediaUrl".to_owned(),
            "https://demo.twilio.com/owl.png".to_owned()
        )));
        assert!(!params.iter().any(|(k, _)| k == "From"));
    }

    #[tokio::test]
    async fn send_rejects_invalid_message_without_network_call() {
        let transport = FakeTransport::new(201, "{}");
        let client = make_client(Credentials::new("AC123", "token"), transport.clone());
        let message = OutboundMessage::new(
            RawPhoneNumber::new("+15551234567").unwrap(),
            MessageBody::new("hi").unwrap(),
        );

        let err = client.send(&message).await.unwrap_err();
        assert!(matches!(
            err,
            TwilioError::Validation(ValidationError::MissingSender)
        ));
        assert_eq!(transport.calls(), 0);
    }

    #[tokio::test]
    async fn send_decodes_message_returned_with_non_success_status() {
        let transport = FakeTransport::new(400, r#"{"sid":"SM9","status":"failed"}"#);
        let client = make_client(Credentials::new("AC123", "token"), transport);

        let result = client.send(&test_message()).await.unwrap();
        assert_eq!(result.sid.as_deref(), Some("SM9"));
        assert_eq!(result.status.as_deref(), Some("failed"));
    }

    #[tokio::test]
    async fn send_maps_api_error_document_to_decode_error() {
        let json = r#"{"code":20003,"message":"Authenticate","more_info":"https://www.twilio.com/docs/errors/20003","status":401}"#;
        let transport = FakeTransport::new(401, json);
        let client = make_client(Credentials::new("", ""), transport.clone());

        let err = client.send(&test_message()).await.unwrap_err();
        assert!(matches!(err, TwilioError::Decode(_)));
        assert_eq!(transport.calls(), 1);
    }

    #[tokio::test]
    async fn send_maps_invalid_json_to_decode_error() {
        let transport = FakeTransport::new(200, "{ not json }");
        let client = make_client(Credentials::new("AC123", "token"), transport);

        let err = client.send(&test_message()).await.unwrap_err();
        assert!(matches!(err, TwilioError::Decode(_)));
    }

    #[tokio::test]
    async fn send_maps_transport_failure_without_retry() {
        let transport = FakeTransport::failing(io::ErrorKind::ConnectionRefused);
        let client = make_client(Credentials::new("AC123", "token"), transport.clone());

        let err = client.send(&test_message()).await.unwrap_err();
        assert!(matches!(err, TwilioError::Transport(_)));
        assert_eq!(transport.calls(), 1);
    }

    #[test]
    fn builder_resolves_messages_endpoint() {
        let client = TwilioClient::builder(Credentials::new("AC42", "t"))
            .base_url("http://127.0.0.1:8080/")
            .timeout(Duration::from_secs(2))
            .build()
            .unwrap();
        assert_eq!(
            client.messages_endpoint(),
            "http://127.0.0.1:8080/2010-04-01/Accounts/AC42/Messages.json"
        );

        let client = TwilioClient::new(Credentials::new("AC42", "t")).unwrap();
        assert_eq!(
            client.messages_endpoint(),
            "https://api.twilio.com/2010-04-01/Accounts/AC42/Messages.json"
        );
    }

    #[test]
    fn builder_percent_encodes_account_sid_segment() {
        let client = TwilioClient::builder(Credentials::new("AC/../x", "t"))
            .base_url("https://example.invalid")
            .build()
            .unwrap();
        assert_eq!(
            client.messages_endpoint(),
            "https://example.invalid/2010-04-01/Accounts/AC%2F..%2Fx/Messages.json"
        );
    }

    #[test]
    fn builder_rejects_unusable_base_url() {
        let err = TwilioClient::builder(Credentials::new("AC1", "t"))
            .base_url("not a url")
            .build()
            .err()
            .unwrap();
        assert!(matches!(err, TwilioError::InvalidBaseUrl(_)));

        let err = TwilioClient::builder(Credentials::new("AC1", "t"))
            .base_url("mailto:ops@example.com")
            .build()
            .err()
            .unwrap();
        assert!(matches!(err, TwilioError::InvalidBaseUrl(_)));
    }

    #[test]
    fn client_is_shareable_across_tasks() {
        fn assert_send_sync<T: Send + Sync + Clone>() {}
        assert_send_sync::<TwilioClient>();
    }
}
