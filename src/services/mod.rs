//! Outbound side: push transport and user messaging.

pub mod push;
pub mod transport;

pub use push::PushService;
pub use transport::{HttpTransport, Transport};
