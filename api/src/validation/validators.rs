//! Field validators for callback data
//!
//! Small predicates the rule sets are built from. Each returns `true` when
//! the value FAILS the check. Lengths are counted in UTF-16 code units,
//! the unit browsers and wallet front-ends use, so a character outside the
//! Basic Multilingual Plane counts as two.

/// Length of a value in UTF-16 code units.
pub fn utf16_len(value: &str) -> usize {
    value.encode_utf16().count()
}

/// Missing, or shorter than `min` units.
pub fn is_missing_or_shorter_than(value: Option<&str>, min: usize) -> bool {
    match value {
        Some(v) => utf16_len(v) < min,
        None => true,
    }
}

/// Present and non-empty, but shorter than `min` units.
pub fn is_present_and_shorter_than(value: Option<&str>, min: usize) -> bool {
    match value {
        Some(v) if !v.is_empty() => utf16_len(v) < min,
        _ => false,
    }
}

/// Missing, or not exactly `len` units.
pub fn is_missing_or_not_length(value: Option<&str>, len: usize) -> bool {
    match value {
        Some(v) => utf16_len(v) != len,
        None => true,
    }
}

/// Email ends with one of the given `@domain` suffixes (case-sensitive).
pub fn has_blocked_email_suffix(email: &str, suffixes: &[&str]) -> bool {
    suffixes.iter().any(|suffix| email.ends_with(suffix))
}

/// Email lacks an `@` or a `.` anywhere.
pub fn is_malformed_email(email: &str) -> bool {
    !email.contains('@') || !email.contains('.')
}

/// Country code is exactly one of the blocked codes (case-sensitive).
pub fn is_blocked_country(country_code: Option<&str>, blocked: &[&str]) -> bool {
    match country_code {
        Some(code) => blocked.contains(&code),
        None => false,
    }
}
