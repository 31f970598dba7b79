use serde::Deserialize;
use serde::de::Error as DeError;

/// Scalar field that Twilio emits as a JSON string, a number or `null` (`error_code`, `price`,
/// media and segment counters).
///
/// Numbers keep their raw token (`-0.00750` stays `"-0.00750"`, `21211` stays `"21211"`),
/// so the value can be relayed without formatting drift.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportText(Option<String>);

impl TransportText {
    pub fn into_option(self) -> Option<String> {
        self.0
    }
}

impl<'de> Deserialize<'de> for TransportText {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw: Box<serde_json::value::RawValue> = Deserialize::deserialize(deserializer)?;
        let token = raw.get();

        match token.as_bytes().first().copied() {
            Some(b'"') => {
                let parsed = serde_json::from_str::<String>(token).map_err(D::Error::custom)?;
                Ok(Self(Some(parsed)))
            }
            Some(b'-' | b'0'..=b'9') => Ok(Self(Some(token.to_owned()))),
            Some(b'n') if token == "null" => Ok(Self(None)),
            _ => Err(D::Error::custom(
                "expected JSON string, number or null for scalar field",
            )),
        }
    }
}
