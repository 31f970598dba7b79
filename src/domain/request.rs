use crate::domain::validation::ValidationError;
use crate::domain::value::{MediaUrl, MessageBody, MessagingServiceSid, RawPhoneNumber};

/// One outbound SMS/MMS, built fresh for each send.
///
/// Field-level invariants are enforced by the value types; [`OutboundMessage::validate`]
/// checks the rules that span fields and runs before every send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundMessage {
    to: RawPhoneNumber,
    from: Option<RawPhoneNumber>,
    messaging_service_sid: Option<MessagingServiceSid>,
    body: MessageBody,
    media_url: Option<MediaUrl>,
}

impl OutboundMessage {
    /// Form field name for the recipient (`To`).
    pub const TO_FIELD: &'static str = "To";
    /// Form field name for the sender (`From`).
    pub const FROM_FIELD: &'static str = "From";

    pub fn new(to: RawPhoneNumber, body: MessageBody) -> Self {
        Self {
            to,
            from: None,
            messaging_service_sid: None,
            body,
            media_url: None,
        }
    }

    /// Shorthand for the common `To`/`From`/`Body` triple from raw strings.
    pub fn text(
        to: impl Into<String>,
        from: impl Into<String>,
        body: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let message = Self::new(RawPhoneNumber::new(to)?, MessageBody::new(body)?)
            .with_from(RawPhoneNumber::new(from)?);
        message.validate()?;
        Ok(message)
    }

    pub fn with_from(mut self, from: RawPhoneNumber) -> Self {
        self.from = Some(from);
        self
    }

    pub fn with_messaging_service_sid(mut self, sid: MessagingServiceSid) -> Self {
        self.messaging_service_sid = Some(sid);
        self
    }

    pub fn with_media_url(mut self, url: MediaUrl) -> Self {
        self.media_url = Some(url);
        self
    }

    pub fn to(&self) -> &RawPhoneNumber {
        &self.to
    }

    pub fn from(&self) -> Option<&RawPhoneNumber> {
        self.from.as_ref()
    }

    pub fn messaging_service_sid(&self) -> Option<&MessagingServiceSid> {
        self.messaging_service_sid.as_ref()
    }

    pub fn body(&self) -> &MessageBody {
        &self.body
    }

    pub fn media_url(&self) -> Option<&MediaUrl> {
        self.media_url.as_ref()
    }

    /// Pre-send check.
    ///
    /// A sender is required (`From` or `MessagingServiceSid`), and `To` must not equal `From`.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.from.is_none() && self.messaging_service_sid.is_none() {
            return Err(ValidationError::MissingSender);
        }
        if let Some(from) = self.from.as_ref().filter(|from| **from == self.to) {
            return Err(ValidationError::SenderIsRecipient {
                number: from.raw().to_owned(),
            });
        }
        Ok(())
    }
}
