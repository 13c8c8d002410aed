//! Instance name and group resolution
//!
//! Instances are clustered by a naming convention: the Name tag minus its
//! trailing digits is the group key ("validator12" and "validator3" both
//! land in "validator"). Instances without a usable Name tag get a
//! synthesized positional name; those never join a named group and are
//! collected into the unnamed bucket by the aggregator instead.

/// Prefix for synthesized names of instances with no usable Name tag
pub const FALLBACK_PREFIX: &str = "unknown";

/// Outcome of name resolution for one instance.
///
/// Keeping the two cases distinct means group assignment never has to
/// compare against a sentinel string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedName {
    /// Non-empty value of the instance's Name tag
    Tagged(String),
    /// Positional fallback, e.g. "unknown3" for the instance at ordinal 3
    /// within its reservation
    Synthesized(String),
}

impl ResolvedName {
    pub fn as_str(&self) -> &str {
        match self {
            ResolvedName::Tagged(name) | ResolvedName::Synthesized(name) => name,
        }
    }

    pub fn is_synthesized(&self) -> bool {
        matches!(self, ResolvedName::Synthesized(_))
    }
}

/// Resolve an instance's display name from its tag set.
///
/// The first tag with key "Name" and a non-empty value wins. Everything else
/// falls back to the positional name for `ordinal`, the instance's index
/// within its reservation.
pub fn resolve_name(tags: &[(String, String)], ordinal: usize) -> ResolvedName {
    for (key, value) in tags {
        if key == "Name" && !value.is_empty() {
            return ResolvedName::Tagged(value.clone());
        }
    }
    ResolvedName::Synthesized(format!("{}{}", FALLBACK_PREFIX, ordinal))
}

/// Derive the group key from a resolved name by stripping the maximal
/// trailing run of ASCII digits.
///
/// A name that is entirely digits reduces to the empty string, which forms
/// its own group.
pub fn group_key(name: &str) -> String {
    name.trim_end_matches(|c: char| c.is_ascii_digit())
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tags(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_resolve_name_from_tag() {
        let t = tags(&[("Environment", "prod"), ("Name", "validator7")]);
        assert_eq!(
            resolve_name(&t, 0),
            ResolvedName::Tagged("validator7".to_string())
        );
    }

    #[test]
    fn test_resolve_name_empty_tag_falls_back() {
        let t = tags(&[("Name", "")]);
        let resolved = resolve_name(&t, 3);
        assert_eq!(resolved, ResolvedName::Synthesized("unknown3".to_string()));
        assert!(resolved.is_synthesized());
    }

    #[test]
    fn test_resolve_name_no_tags_falls_back() {
        let resolved = resolve_name(&[], 0);
        assert_eq!(resolved.as_str(), "unknown0");
        assert!(resolved.is_synthesized());
    }

    #[test]
    fn test_group_key_strips_trailing_digits() {
        assert_eq!(group_key("validator12"), "validator");
        assert_eq!(group_key("node12"), "node");
        assert_eq!(group_key("node1a2"), "node1a");
    }

    #[test]
    fn test_group_key_idempotent_without_digits() {
        assert_eq!(group_key("gateway"), "gateway");
        assert_eq!(group_key(group_key("gateway").as_str()), "gateway");
    }

    #[test]
    fn test_group_key_all_digits_is_empty() {
        assert_eq!(group_key("12345"), "");
    }

    #[test]
    fn test_group_key_ignores_interior_digits() {
        assert_eq!(group_key("net4-relay"), "net4-relay");
    }
}
