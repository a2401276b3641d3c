//! Email address utilities

/// Canonical form used for cache keys and directory lookups:
/// surrounding whitespace trimmed and the address lower-cased.
/// Returns `None` unless the address has exactly one `@` with
/// non-empty local and domain parts and no inner whitespace.
pub fn normalize_email(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    let (local, domain) = trimmed.split_once('@')?;
    if local.is_empty()
        || domain.is_empty()
        || domain.contains('@')
        || !domain.contains('.')
        || domain.starts_with('.')
        || domain.ends_with('.')
        || trimmed.chars().any(char::is_whitespace)
    {
        return None;
    }
    Some(canonical_email(trimmed))
}

/// Case-folded form for comparing addresses, without any shape check.
/// Stored addresses may predate normalization, so lookups compare both
/// sides through this.
pub fn canonical_email(raw: &str) -> String {
    raw.trim().to_lowercase()
}

pub fn is_valid_email(raw: &str) -> bool {
    normalize_email(raw).is_some()
}

/// Mask an email for logs (e.g., jo***@example.com)
pub fn mask_email(email: &str) -> String {
    match email.split_once('@') {
        Some((local, domain)) => {
            let visible: String = local.chars().take(2).collect();
            format!("{}***@{}", visible, domain)
        }
        None => "***".to_string(),
    }
}
