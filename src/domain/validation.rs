use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    Empty { field: &'static str },
    TooLong { field: &'static str, max: usize, actual: usize },
    InvalidPhoneNumber { input: String },
    InvalidMediaUrl { input: String },
    MissingSender,
    SenderIsRecipient { number: String },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty { field } => write!(f, "{field} must not be empty"),
            Self::TooLong { field, max, actual } => {
                write!(f, "{field} is too long: {actual} characters (max {max})")
            }
            Self::InvalidPhoneNumber { input } => write!(f, "invalid phone number: {input}"),
            Self::InvalidMediaUrl { input } => write!(f, "invalid media url: {input}"),
            Self::MissingSender => write!(f, "either From or MessagingServiceSid must be set"),
            Self::SenderIsRecipient { number } => {
                write!(f, "To and From must differ (both are {number})")
            }
        }
    }
}

impl std::error::Error for ValidationError {}
