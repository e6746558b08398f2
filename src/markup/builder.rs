//! Page markup assembly. Plain string templates: callers escape untrusted text first.

use super::escape::{escape, EscapePolicy};

/// XML declaration prepended to every page.
pub const XML_HEADER: &str = "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n";

const PAGE_VERSION: &str = "version=\"2.0\"";

fn format_element(element: &str, s: &str) -> String {
    format!("<{element}>{s}</{element}>")
}

fn format_construct(cons: &str, args: &str, text: &str) -> String {
    format!("<{}>{}</{}>", join(cons, args), text, cons)
}

fn join(s1: &str, s2: &str) -> String {
    if s2.is_empty() {
        s1.to_string()
    } else {
        format!("{s1} {s2}")
    }
}

pub fn bold(s: &[&str]) -> String {
    format_element("b", &s.join(" "))
}

pub fn italic(s: &[&str]) -> String {
    format_element("i", &s.join(" "))
}

pub fn code(s: &[&str]) -> String {
    format_element("code", &s.join(" "))
}

/// `<a href="...">` inline link.
pub fn href(href: &str, s: &[&str]) -> String {
    format!("<a href=\"{}\">{}</a>", href, s.join(" "))
}

/// CDATA section.
pub fn cdata(s: &str) -> String {
    format!("<![CDATA[{s}]]>")
}

/// Full document: XML header plus `<page version="2.0" ...>`.
pub fn page(args: &str, text: &[&str]) -> String {
    format!(
        "{}{}",
        XML_HEADER,
        format_construct("page", &join(PAGE_VERSION, args), &text.join(" "))
    )
}

pub fn div(args: &str, text: &[&str]) -> String {
    format_construct("div", args, &text.join(" "))
}

pub fn title(args: &str, text: &[&str]) -> String {
    format_construct("title", args, &text.join(" "))
}

pub fn navigation(args: &str, text: &[&str]) -> String {
    format_construct("navigation", args, &text.join(" "))
}

/// `<link pageId="...">` navigation entry; `access_key` is the link body.
pub fn link(args: &str, page_id: &str, access_key: &str) -> String {
    format_construct("link", &join(&format_attr("pageId", page_id), args), access_key)
}

/// Self-closing input field.
pub fn input(navigation_id: &str, field_name: &str, title: &str) -> String {
    format!(
        "<input {} {} {}/>",
        format_attr("navigationId", navigation_id),
        format_attr("name", field_name),
        format_attr("title", title)
    )
}

/// `key="val"`.
pub fn format_attr(key: &str, val: &str) -> String {
    format!("{key}=\"{val}\"")
}

pub fn attr_protocol(s: &str) -> String {
    format_attr("protocol", s)
}

/// `attributes="a; b; c"`.
pub fn attributes(s: &[&str]) -> String {
    format_attr("attributes", &s.join("; "))
}

/// Unquoted `key: val` entry, used inside [`attributes`].
pub fn attr_arg(key: &str, val: &str) -> String {
    format!("{key}: {val}")
}

pub fn telegram_links_realignment_threshold(count: i32) -> String {
    attr_arg("telegram.links.realignment.threshold", &count.to_string())
}

pub fn telegram_links_realignment_enabled(flag: bool) -> String {
    attr_arg("telegram.links.realignment.enabled", if flag { "true" } else { "false" })
}

/// Minimal `page > div` document around freeform text, escaped once.
pub fn only_text_default(text: &str) -> String {
    page("", &[&div("", &[&escape(text, EscapePolicy::Default)])])
}

/// Like [`only_text_default`] but escaped twice; Telegram interprets markup once more.
pub fn only_text_telegram(text: &str) -> String {
    let once = escape(text, EscapePolicy::Default);
    page("", &[&div("", &[&escape(&once, EscapePolicy::Default)])])
}
