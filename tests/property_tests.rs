//! Property-based tests for costctl
//!
//! These tests use proptest to generate random inputs and verify that
//! naming and grouping properties hold across a wide range of scenarios.

use costctl::naming::{group_key, resolve_name};
use proptest::prelude::*;

proptest! {
    #[test]
    fn test_group_key_never_ends_with_digit(name in "[a-zA-Z0-9_-]{0,24}") {
        let key = group_key(&name);
        if let Some(last) = key.chars().last() {
            assert!(!last.is_ascii_digit());
        }
    }

    #[test]
    fn test_group_key_is_idempotent(name in "[a-zA-Z0-9_-]{0,24}") {
        let key = group_key(&name);
        assert_eq!(group_key(&key), key);
    }

    #[test]
    fn test_group_key_ignores_trailing_digit_suffix(
        name in "[a-zA-Z_-]{1,16}",
        suffix in 0u32..100_000u32
    ) {
        // Appending digits to a digit-free name never changes the group
        let numbered = format!("{}{}", name, suffix);
        assert_eq!(group_key(&numbered), group_key(&name));
    }

    #[test]
    fn test_group_key_is_prefix_of_name(name in "[a-zA-Z0-9_-]{0,24}") {
        let key = group_key(&name);
        assert!(name.starts_with(&key));
    }

    #[test]
    fn test_nonempty_name_tag_always_wins(
        value in "[a-zA-Z0-9_-]{1,24}",
        ordinal in 0usize..64usize
    ) {
        let tags = vec![("Name".to_string(), value.clone())];
        let resolved = resolve_name(&tags, ordinal);
        assert!(!resolved.is_synthesized());
        assert_eq!(resolved.as_str(), value);
    }

    #[test]
    fn test_missing_name_tag_uses_ordinal(ordinal in 0usize..64usize) {
        let tags = vec![("Environment".to_string(), "prod".to_string())];
        let resolved = resolve_name(&tags, ordinal);
        assert!(resolved.is_synthesized());
        assert_eq!(resolved.as_str(), format!("unknown{}", ordinal));
    }
}
