//! Domain layer: strong types with validation and invariants (no I/O).

mod request;
mod response;
mod validation;
mod value;

pub use request::OutboundMessage;
pub use response::MessageResult;
pub use validation::ValidationError;
pub use value::{
    AccountSid, AuthToken, MediaUrl, MessageBody, MessagingServiceSid, PhoneNumber,
    RawPhoneNumber,
};
