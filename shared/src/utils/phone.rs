//! Phone number utilities

use once_cell::sync::Lazy;
use regex::Regex;

// E.164: '+', a non-zero leading digit, 7 to 15 digits in total
static E164_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\+[1-9]\d{6,14}$").unwrap());

/// Strip the formatting characters people type into phone fields
pub fn strip_formatting(phone: &str) -> String {
    phone
        .trim()
        .chars()
        .filter(|c| !matches!(c, ' ' | '-' | '(' | ')' | '.' | '\t'))
        .collect()
}

/// Check whether a number is already in E.164 form
pub fn is_valid_e164(phone: &str) -> bool {
    E164_REGEX.is_match(phone)
}

/// Canonicalize a phone number to E.164.
///
/// A national trunk prefix `0` is replaced by `calling_code`; any other
/// number lacking a `+` is assumed to already start with its country code.
/// Returns `None` when the result is not valid E.164.
pub fn to_e164(raw: &str, calling_code: &str) -> Option<String> {
    let stripped = strip_formatting(raw);
    let candidate = if let Some(national) = stripped.strip_prefix('0') {
        format!("{}{}", calling_code, national)
    } else if stripped.starts_with('+') {
        stripped
    } else {
        format!("+{}", stripped)
    };

    is_valid_e164(&candidate).then_some(candidate)
}

/// Mask a phone number for display (e.g., +84****5678)
pub fn mask_phone_number(phone: &str) -> String {
    let normalized = strip_formatting(phone);
    if normalized.len() >= 7 && normalized.is_ascii() {
        format!(
            "{}****{}",
            &normalized[0..3],
            &normalized[normalized.len() - 4..]
        )
    } else {
        "****".to_string()
    }
}
