//! TwiML voice response document.

use std::fmt::Write;

/// One spoken prompt (`<say>`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Say(String);

impl Say {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn text(&self) -> &str {
        &self.0
    }
}

/// `<Response>` root holding the prompts in speaking order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VoiceResponse {
    says: Vec<Say>,
}

impl VoiceResponse {
    pub const CONTENT_TYPE: &'static str = "application/xml; charset=utf-8";

    pub fn new() -> Self {
        Self::default()
    }

    /// The canned greeting served on `POST /hello`.
    pub fn greeting() -> Self {
        Self::new()
            .say("Hello, World!")
            .say("Welcome to my Twilio App!")
    }

    pub fn say(mut self, text: impl Into<String>) -> Self {
        self.says.push(Say::new(text));
        self
    }

    pub fn says(&self) -> &[Say] {
        &self.says
    }

    pub fn to_xml(&self) -> String {
        let mut out = String::from("<Response>");
        for say in &self.says {
            // Writing into a String cannot fail.
            let _ = write!(out, "<say>{}</say>", escape_text(say.text()));
        }
        out.push_str("</Response>");
        out
    }
}

fn escape_text(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            other => escaped.push(other),
        }
    }
    escaped
}
