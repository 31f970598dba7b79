use std::collections::BTreeMap;

use serde::Deserialize;

use super::scalar::TransportText;
use crate::domain::{MediaUrl, MessageBody, MessageResult, MessagingServiceSid, OutboundMessage};

#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("invalid JSON response: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Deserialize)]
struct MessageJsonResponse {
    #[serde(default)]
    account_sid: Option<String>,
    #[serde(default)]
    api_version: Option<String>,
    #[serde(default)]
    body: Option<String>,
    #[serde(default)]
    date_created: Option<String>,
    #[serde(default)]
    date_sent: Option<String>,
    #[serde(default)]
    date_updated: Option<String>,
    #[serde(default)]
    direction: Option<String>,
    #[serde(default)]
    error_code: Option<TransportText>,
    #[serde(default)]
    error_message: Option<String>,
    #[serde(default)]
    from: Option<String>,
    #[serde(default)]
    messaging_service_sid: Option<String>,
    #[serde(default)]
    num_media: Option<TransportText>,
    #[serde(default)]
    num_segments: Option<TransportText>,
    #[serde(default)]
    price: Option<TransportText>,
    #[serde(default)]
    price_unit: Option<String>,
    #[serde(default)]
    sid: Option<String>,
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    subresource_uris: Option<BTreeMap<String, String>>,
    #[serde(default)]
    to: Option<String>,
    #[serde(default)]
    uri: Option<String>,
}

/// Form body for `POST /2010-04-01/Accounts/{AccountSid}/Messages.json`.
///
/// Optional parameters are only present when set on the message. Earlier versions of this
/// relay silently dropped `MessagingServiceSid` and `MediaUrl`; both are now sent on purpose.
pub fn encode_send_message_form(message: &OutboundMessage) -> Vec<(String, String)> {
    let mut params = Vec::<(String, String)>::with_capacity(5);

    params.push((
        OutboundMessage::TO_FIELD.to_owned(),
        message.to().raw().to_owned(),
    ));
    if let Some(from) = message.from() {
        params.push((OutboundMessage::FROM_FIELD.to_owned(), from.raw().to_owned()));
    }
    if let Some(sid) = message.messaging_service_sid() {
        params.push((MessagingServiceSid::FIELD.to_owned(), sid.as_str().to_owned()));
    }
    params.push((
        MessageBody::FIELD.to_owned(),
        message.body().as_str().to_owned(),
    ));
    if let Some(media) = message.media_url() {
        params.push((MediaUrl::FIELD.to_owned(), media.as_str().to_owned()));
    }

    params
}

pub fn decode_message_json_response(json: &str) -> Result<MessageResult, DecodeError> {
    let parsed: MessageJsonResponse = serde_json::from_str(json)?;
    Ok(MessageResult {
        account_sid: parsed.account_sid,
        api_version: parsed.api_version,
        body: parsed.body,
        date_created: parsed.date_created,
        date_sent: parsed.date_sent,
        date_updated: parsed.date_updated,
        direction: parsed.direction,
        error_code: parsed.error_code.and_then(TransportText::into_option),
        error_message: parsed.error_message,
        from: parsed.from,
        messaging_service_sid: parsed.messaging_service_sid,
        num_media: parsed.num_media.and_then(TransportText::into_option),
        num_segments: parsed.num_segments.and_then(TransportText::into_option),
        price: parsed.price.and_then(TransportText::into_option),
        price_unit: parsed.price_unit,
        sid: parsed.sid,
        status: parsed.status,
        subresource_uris: parsed.subresource_uris.unwrap_or_default(),
        to: parsed.to,
        uri: parsed.uri,
    })
}
