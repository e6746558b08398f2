//! Data models for users, events, requests and pushes.

pub mod event;
pub mod push;
pub mod request;
pub mod user;

pub use event::*;
pub use push::*;
pub use request::*;
pub use user::*;
