//! Page markup: escaping and element builders.

pub mod builder;
pub mod escape;

pub use builder::*;
pub use escape::{
    escape, escape_bytes, escape_string, escape_string_not_br, escape_string_yes_br, EscapePolicy,
    BR,
};
