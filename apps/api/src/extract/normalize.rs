//! Post-extraction text cleanup.
//!
//! PDF text layers and converted documents leave artifacts behind: literal
//! `\uXXXX` escape sequences, run-on spaces, and towers of blank lines. The
//! cleaned text is what gets sent to the extraction service.

use std::sync::OnceLock;

use regex::Regex;

fn unicode_escape_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\\u[0-9a-fA-F]{4}").expect("valid regex"))
}

fn spaces_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[ \t]{2,}").expect("valid regex"))
}

fn newlines_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\n{3,}").expect("valid regex"))
}

/// Normalizes extracted text: strips `\uXXXX` escape artifacts, collapses
/// runs of spaces to one, and caps consecutive blank lines at one (3+
/// newlines become exactly two).
pub fn clean_text(raw: &str) -> String {
    let unified = raw.replace("\r\n", "\n").replace('\r', "\n");
    let stripped = unicode_escape_re().replace_all(&unified, "");
    let spaced = spaces_re().replace_all(&stripped, " ");
    let collapsed = newlines_re().replace_all(&spaced, "\n\n");
    collapsed.trim().to_string()
}
