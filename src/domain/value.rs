use std::fmt;

use phonenumber::country;

use crate::domain::validation::ValidationError;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Twilio Account SID (`AC...`), used both as the Basic auth user and in the resource path.
///
/// Kept verbatim, like [`AuthToken`]: the credential pair is opaque. An empty SID is
/// accepted and left for the API to reject.
pub struct AccountSid(String);

impl AccountSid {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Borrow the SID.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[derive(Clone, PartialEq, Eq, Hash)]
/// Twilio auth token, the Basic auth password.
///
/// The value is kept verbatim and never printed by `Debug`.
pub struct AuthToken(String);

impl AuthToken {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Borrow the secret.
    pub fn expose(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AuthToken(<redacted>)")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Messaging Service SID (`MG...`), an alternative to a `From` number.
///
/// Invariant: non-empty after trimming.
pub struct MessagingServiceSid(String);

impl MessagingServiceSid {
    /// Form field name used by Twilio (`MessagingServiceSid`).
    pub const FIELD: &'static str = "MessagingServiceSid";

    /// Create a validated [`MessagingServiceSid`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(trimmed.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// SMS body text (`Body`).
///
/// Invariant: non-empty after trimming and at most [`MessageBody::MAX_CHARS`] characters.
/// The original value (including whitespace) is preserved.
pub struct MessageBody(String);

impl MessageBody {
    /// Form field name used by Twilio (`Body`).
    pub const FIELD: &'static str = "Body";

    /// Longest body the Messages API accepts, counted in characters.
    pub const MAX_CHARS: usize = 1600;

    /// Create a validated message body.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        let chars = value.chars().count();
        if chars > Self::MAX_CHARS {
            return Err(ValidationError::TooLong {
                field: Self::FIELD,
                max: Self::MAX_CHARS,
                actual: chars,
            });
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Publicly reachable media attachment (`MediaUrl`).
///
/// Invariant: absolute `http` or `https` URL.
pub struct MediaUrl(url::Url);

impl MediaUrl {
    /// Form field name used by Twilio (`MediaUrl`).
    pub const FIELD: &'static str = "MediaUrl";

    pub fn new(value: impl AsRef<str>) -> Result<Self, ValidationError> {
        let raw = value.as_ref().trim();
        if raw.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        let parsed = url::Url::parse(raw).map_err(|_| ValidationError::InvalidMediaUrl {
            input: raw.to_owned(),
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ValidationError::InvalidMediaUrl {
                input: raw.to_owned(),
            });
        }
        Ok(Self(parsed))
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// Address as sent to Twilio in `To` or `From`.
///
/// Invariant: non-empty after trimming. No normalization happens here, so channel
/// prefixes (`whatsapp:+1...`), short codes and alphanumeric sender ids pass through.
/// Parse into [`PhoneNumber`] and convert when E.164 normalization is wanted.
pub struct RawPhoneNumber(String);

impl RawPhoneNumber {
    pub const FIELD: &'static str = "phone number";

    /// Create a validated (non-empty) raw address.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Raw (trimmed) value as sent to Twilio.
    pub fn raw(&self) -> &str {
        &self.0
    }
}

impl From<PhoneNumber> for RawPhoneNumber {
    fn from(value: PhoneNumber) -> Self {
        Self(value.e164)
    }
}

#[derive(Debug, Clone)]
/// Phone number parsed with `phonenumber` and normalized to E.164.
///
/// Equality is based on the E.164 form.
pub struct PhoneNumber {
    e164: String,
    parsed: phonenumber::PhoneNumber,
}

impl PhoneNumber {
    /// Parse a number, using `default_region` when the input has no `+<country>` prefix.
    ///
    /// Numbers that parse but are not assignable in their region (per libphonenumber
    /// metadata) are rejected as well.
    pub fn parse(
        default_region: Option<country::Id>,
        input: impl AsRef<str>,
    ) -> Result<Self, ValidationError> {
        let raw = input.as_ref().trim();
        if raw.is_empty() {
            return Err(ValidationError::Empty {
                field: RawPhoneNumber::FIELD,
            });
        }

        let parsed = phonenumber::parse(default_region, raw)
            .ok()
            .filter(|number| phonenumber::is_valid(number))
            .ok_or_else(|| ValidationError::InvalidPhoneNumber {
                input: raw.to_owned(),
            })?;

        let e164 = phonenumber::format(&parsed)
            .mode(phonenumber::Mode::E164)
            .to_string();

        Ok(Self { e164, parsed })
    }

    pub fn e164(&self) -> &str {
        &self.e164
    }

    pub fn parsed(&self) -> &phonenumber::PhoneNumber {
        &self.parsed
    }
}

impl PartialEq for PhoneNumber {
    fn eq(&self, other: &Self) -> bool {
        self.e164 == other.e164
    }
}

impl Eq for PhoneNumber {}
