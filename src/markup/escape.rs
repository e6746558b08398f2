//! Markup-safe escaping of arbitrary text for the mini-apps page dialect.
//!
//! One linear pass: untouched runs are copied as whole slices, every escapable
//! or out-of-range code point is replaced in place.

use std::borrow::Cow;

/// Literal line-break tag.
pub const BR: &str = "<br/>";

const ESC_QUOT: &str = "&#34;"; // shorter than "&quot;"
const ESC_APOS: &str = "&#39;"; // shorter than "&apos;"
const ESC_AMP: &str = "&amp;";
const ESC_LT: &str = "&lt;";
const ESC_GT: &str = "&gt;";
const ESC_TAB: &str = "&#x9;";
const ESC_NL: &str = "&#xA;";
const ESC_CR: &str = "&#xD;";
const ESC_FFFD: &str = "\u{FFFD}";

/// How a newline is written out. Everything else escapes identically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EscapePolicy {
    /// Newline becomes `&#xA;`.
    #[default]
    Default,
    /// Newline is left verbatim.
    NotBr,
    /// Newline becomes a `<br/>` tag.
    YesBr,
}

impl EscapePolicy {
    fn newline(self) -> Option<&'static str> {
        match self {
            EscapePolicy::Default => Some(ESC_NL),
            EscapePolicy::NotBr => None,
            EscapePolicy::YesBr => Some(BR),
        }
    }
}

/// Accepted code points. The `0xDF77` upper bound is what gateways expect; keep it.
pub fn is_in_character_range(c: u32) -> bool {
    c == 0x09
        || c == 0x0A
        || c == 0x0D
        || (0x20..=0xDF77).contains(&c)
        || (0xE000..=0xFFFD).contains(&c)
        || (0x10000..=0x10FFFF).contains(&c)
}

fn substitution(c: char, policy: EscapePolicy) -> Option<&'static str> {
    match c {
        '"' => Some(ESC_QUOT),
        '\'' => Some(ESC_APOS),
        '&' => Some(ESC_AMP),
        '<' => Some(ESC_LT),
        '>' => Some(ESC_GT),
        '\t' => Some(ESC_TAB),
        '\n' => policy.newline(),
        '\r' => Some(ESC_CR),
        c if !is_in_character_range(c as u32) => Some(ESC_FFFD),
        _ => None,
    }
}

fn escape_into(out: &mut String, s: &str, policy: EscapePolicy) {
    let mut last = 0;
    for (i, c) in s.char_indices() {
        if let Some(esc) = substitution(c, policy) {
            out.push_str(&s[last..i]);
            out.push_str(esc);
            last = i + c.len_utf8();
        }
    }
    out.push_str(&s[last..]);
}

/// Escape `s` under `policy`. Borrows the input when nothing needs replacing.
pub fn escape(s: &str, policy: EscapePolicy) -> Cow<'_, str> {
    let mut out: Option<String> = None;
    let mut last = 0;
    for (i, c) in s.char_indices() {
        if let Some(esc) = substitution(c, policy) {
            let buf = out.get_or_insert_with(|| String::with_capacity(s.len() + s.len() / 8));
            buf.push_str(&s[last..i]);
            buf.push_str(esc);
            last = i + c.len_utf8();
        }
    }
    match out {
        Some(mut buf) => {
            buf.push_str(&s[last..]);
            Cow::Owned(buf)
        }
        None => Cow::Borrowed(s),
    }
}

/// [`escape`] with [`EscapePolicy::Default`].
pub fn escape_string(s: &str) -> String {
    escape(s, EscapePolicy::Default).into_owned()
}

/// [`escape`] with [`EscapePolicy::NotBr`].
pub fn escape_string_not_br(s: &str) -> String {
    escape(s, EscapePolicy::NotBr).into_owned()
}

/// [`escape`] with [`EscapePolicy::YesBr`].
pub fn escape_string_yes_br(s: &str) -> String {
    escape(s, EscapePolicy::YesBr).into_owned()
}

/// Escape raw bytes. Each byte that does not start a valid UTF-8 sequence
/// becomes one replacement character.
pub fn escape_bytes(bytes: &[u8], policy: EscapePolicy) -> String {
    let mut out = String::with_capacity(bytes.len());
    for chunk in bytes.utf8_chunks() {
        escape_into(&mut out, chunk.valid(), policy);
        for _ in chunk.invalid() {
            out.push_str(ESC_FFFD);
        }
    }
    out
}
