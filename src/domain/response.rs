use std::collections::BTreeMap;

use serde::Serialize;

/// Message resource returned by `POST .../Messages.json`.
///
/// Values are passed through as received: timestamps, prices and counters stay textual,
/// and JSON `null` or a missing key both become `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MessageResult {
    pub account_sid: Option<String>,
    pub api_version: Option<String>,
    pub body: Option<String>,
    pub date_created: Option<String>,
    pub date_sent: Option<String>,
    pub date_updated: Option<String>,
    pub direction: Option<String>,
    pub error_code: Option<String>,
    pub error_message: Option<String>,
    pub from: Option<String>,
    pub messaging_service_sid: Option<String>,
    pub num_media: Option<String>,
    pub num_segments: Option<String>,
    pub price: Option<String>,
    pub price_unit: Option<String>,
    pub sid: Option<String>,
    pub status: Option<String>,
    pub subresource_uris: BTreeMap<String, String>,
    pub to: Option<String>,
    pub uri: Option<String>,
}
