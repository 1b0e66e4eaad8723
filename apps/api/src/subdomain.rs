//! Subdomain Generator — derives a URL-safe slug from a person's display name.

use chrono::Utc;

/// Derives a slug from the name and the current millisecond timestamp.
///
/// No uniqueness check happens here; collision avoidance relies on the
/// 4-digit suffix, and the generate flow re-rolls when the store rejects a
/// duplicate subdomain.
pub fn generate_subdomain(name: &str) -> String {
    slug_with_timestamp(name, Utc::now().timestamp_millis())
}

/// Lowercases the name, strips every character outside `[a-z0-9]`, truncates
/// the cleaned form to at most 10 characters, and appends the last 4 digits
/// of the decimal millisecond timestamp.
pub fn slug_with_timestamp(name: &str, timestamp_ms: i64) -> String {
    let cleaned: String = name
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
        .take(10)
        .collect();

    let millis = timestamp_ms.to_string();
    let suffix = &millis[millis.len().saturating_sub(4)..];
    format!("{cleaned}{suffix}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slug_is_deterministic_for_name_and_timestamp() {
        assert_eq!(slug_with_timestamp("Jane Doe", 1755900001234), "janedoe1234");
    }

    #[test]
    fn test_slug_truncates_cleaned_name_to_ten_chars() {
        // "alexjohnson" is 11 chars cleaned; only the first 10 survive.
        assert_eq!(
            slug_with_timestamp("Alex Johnson", 1755900001234),
            "alexjohnso1234"
        );
    }

    #[test]
    fn test_slug_strips_non_alphanumerics() {
        assert_eq!(
            slug_with_timestamp("O'Brien, Jr.", 1755900005678),
            "obrienjr5678"
        );
    }

    #[test]
    fn test_slug_keeps_digits_from_name() {
        assert_eq!(
            slug_with_timestamp("Agent 007", 1755900009999),
            "agent0079999"
        );
    }

    #[test]
    fn test_slug_from_empty_cleaned_name_is_suffix_only() {
        assert_eq!(slug_with_timestamp("!!!", 1755900004321), "4321");
    }

    #[test]
    fn test_generate_subdomain_shape() {
        let slug = generate_subdomain("Jane Doe");
        assert!(slug.starts_with("janedoe"));
        assert_eq!(slug.len(), "janedoe".len() + 4);
        assert!(slug.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit()));
    }
}
