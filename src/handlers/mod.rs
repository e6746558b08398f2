//! HTTP handlers for the gateway callback surface.

pub mod http;

pub use http::{gateway, health, push, AppState, PushMessage};
