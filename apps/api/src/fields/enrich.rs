//! Locally derived record fields.

use std::sync::OnceLock;

use regex::Regex;

const VOWELS: &str = "AEIOUY";

fn phone_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\d{2}(?:[\s.\-]?\d{2}){4}").expect("valid regex"))
}

fn age_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)(\d{2})\s*(?:ans|years?)\b").expect("valid regex"))
}

fn email_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"[a-zA-Z0-9_.+\-]+@[a-zA-Z0-9\-]+\.[a-zA-Z0-9\-.]+").expect("valid regex")
    })
}

/// Initials code: first letter of the first name plus the first two
/// consonants of the last name (spaces stripped, so compound names like
/// "De La Tour" read as one word). Example: Cédric Gobert → CGB.
pub fn trigram(first_name: &str, last_name: &str) -> String {
    let mut code = String::new();
    if let Some(initial) = first_name.trim().chars().next() {
        code.extend(initial.to_uppercase());
    }
    let consonants: String = last_name
        .to_uppercase()
        .chars()
        .filter(|c| c.is_alphabetic() && !VOWELS.contains(*c))
        .take(2)
        .collect();
    code.push_str(&consonants);
    code
}

/// Finds a phone number in the source text and normalizes it.
pub fn find_phone(text: &str) -> Option<String> {
    phone_re().find(text).map(|m| format_phone(m.as_str()))
}

/// Strips separators from a matched phone string; exactly 10 digits are
/// regrouped as `XX.XX.XX.XX.XX`, anything else passes through unchanged.
pub fn format_phone(raw: &str) -> String {
    let digits: Vec<char> = raw.chars().filter(char::is_ascii_digit).collect();
    if digits.len() != 10 {
        return raw.to_string();
    }
    digits
        .chunks(2)
        .map(|pair| pair.iter().collect::<String>())
        .collect::<Vec<_>>()
        .join(".")
}

/// Birth year from an age mention ("47 ans" / "47 years") in the source
/// text. Returns `None` when no age is found.
pub fn birth_year(text: &str, current_year: i32) -> Option<i32> {
    let captures = age_re().captures(text)?;
    let age: i32 = captures.get(1)?.as_str().parse().ok()?;
    Some(current_year - age)
}

/// First `local@domain` shaped address in the source text.
pub fn find_email(text: &str) -> Option<String> {
    email_re().find(text).map(|m| m.as_str().to_string())
}
