//! Static lookup tables driving the CSP rule engine.
//!
//! All tables are read-only after first use and safe to share across
//! concurrent evaluations without synchronization.

use std::sync::OnceLock;

use regex::Regex;

use crate::models::evaluation::DirectiveCategory;

/// Metadata about one known CSP Level 3 directive.
#[derive(Debug)]
pub struct DirectiveCatalogEntry {
    pub name: &'static str,
    pub category: DirectiveCategory,
    /// Structurally required: its absence is reported as a missing critical
    /// directive.
    pub required: bool,
    /// Recommended for a strong policy.
    pub recommended: bool,
}

pub const DIRECTIVE_CATALOG: &[DirectiveCatalogEntry] = &[
    entry("default-src", DirectiveCategory::Fetch, true, true),
    entry("script-src", DirectiveCategory::Fetch, true, true),
    entry("style-src", DirectiveCategory::Fetch, false, true),
    entry("img-src", DirectiveCategory::Fetch, false, true),
    entry("connect-src", DirectiveCategory::Fetch, false, true),
    entry("font-src", DirectiveCategory::Fetch, false, false),
    entry("media-src", DirectiveCategory::Fetch, false, false),
    entry("object-src", DirectiveCategory::Fetch, true, true),
    entry("frame-src", DirectiveCategory::Fetch, false, false),
    entry("child-src", DirectiveCategory::Fetch, false, false),
    entry("worker-src", DirectiveCategory::Fetch, false, false),
    entry("manifest-src", DirectiveCategory::Fetch, false, false),
    entry("script-src-elem", DirectiveCategory::Fetch, false, false),
    entry("script-src-attr", DirectiveCategory::Fetch, false, false),
    entry("style-src-elem", DirectiveCategory::Fetch, false, false),
    entry("style-src-attr", DirectiveCategory::Fetch, false, false),
    entry("base-uri", DirectiveCategory::Document, true, true),
    entry("sandbox", DirectiveCategory::Document, false, false),
    entry("form-action", DirectiveCategory::Navigation, false, true),
    entry("frame-ancestors", DirectiveCategory::Navigation, false, true),
    entry("navigate-to", DirectiveCategory::Navigation, false, false),
    entry("report-uri", DirectiveCategory::Reporting, false, false),
    entry("report-to", DirectiveCategory::Reporting, false, true),
    entry("upgrade-insecure-requests", DirectiveCategory::Other, false, true),
    entry("block-all-mixed-content", DirectiveCategory::Other, false, false),
    entry("trusted-types", DirectiveCategory::Other, false, false),
    entry("require-trusted-types-for", DirectiveCategory::Other, false, false),
];

const fn entry(
    name: &'static str,
    category: DirectiveCategory,
    required: bool,
    recommended: bool,
) -> DirectiveCatalogEntry {
    DirectiveCatalogEntry {
        name,
        category,
        required,
        recommended,
    }
}

/// Category lookup; unknown or custom directives default to `other`.
pub fn category_of(name: &str) -> DirectiveCategory {
    DIRECTIVE_CATALOG
        .iter()
        .find(|entry| entry.name == name)
        .map(|entry| entry.category)
        .unwrap_or(DirectiveCategory::Other)
}

/// The structurally-required directive names, in table order.
pub fn critical_directives() -> impl Iterator<Item = &'static str> {
    DIRECTIVE_CATALOG
        .iter()
        .filter(|entry| entry.required)
        .map(|entry| entry.name)
}

/// A source-token pattern known to weaken a policy.
#[derive(Debug)]
pub struct InsecureSourcePattern {
    /// Label used in warnings and in the `unsafeSources` dedup list.
    pub label: &'static str,
    /// Anchored regex tested against each source token.
    pub pattern: &'static str,
    pub description: &'static str,
}

/// Patterns are anchored to the whole token: the bare `http:` entry matches
/// only the literal token `http:`, never `https:` or full http:// origins.
pub const INSECURE_SOURCE_PATTERNS: &[InsecureSourcePattern] = &[
    InsecureSourcePattern {
        label: "'unsafe-inline'",
        pattern: r"^'unsafe-inline'$",
        description: "allows execution of inline scripts and event handlers",
    },
    InsecureSourcePattern {
        label: "'unsafe-eval'",
        pattern: r"^'unsafe-eval'$",
        description: "allows eval() and other dynamic code execution",
    },
    InsecureSourcePattern {
        label: "data:",
        pattern: r"^data:$",
        description: "allows loading resources from data: URIs, a common XSS vector",
    },
    InsecureSourcePattern {
        label: "*",
        pattern: r"^\*$",
        description: "wildcard allows loading resources from any origin",
    },
    InsecureSourcePattern {
        label: "http:",
        pattern: r"^http:$",
        description: "allows loading resources over unencrypted HTTP",
    },
];

fn compiled_patterns() -> &'static [Regex] {
    static COMPILED: OnceLock<Vec<Regex>> = OnceLock::new();
    COMPILED.get_or_init(|| {
        INSECURE_SOURCE_PATTERNS
            .iter()
            .map(|pattern| {
                // Table patterns are compile-time constants, validated by tests.
                Regex::new(pattern.pattern).unwrap_or_else(|err| {
                    panic!("invalid insecure-source pattern {}: {err}", pattern.label)
                })
            })
            .collect()
    })
}

/// All insecure-source patterns matching `token`, in table order.
///
/// Patterns are not mutually exclusive: one token may match several.
pub fn insecure_matches(token: &str) -> Vec<&'static InsecureSourcePattern> {
    compiled_patterns()
        .iter()
        .zip(INSECURE_SOURCE_PATTERNS)
        .filter(|(regex, _)| regex.is_match(token))
        .map(|(_, pattern)| pattern)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_patterns_compile() {
        assert_eq!(compiled_patterns().len(), INSECURE_SOURCE_PATTERNS.len());
    }

    #[test]
    fn category_lookup_defaults_to_other() {
        assert_eq!(category_of("script-src"), DirectiveCategory::Fetch);
        assert_eq!(category_of("base-uri"), DirectiveCategory::Document);
        assert_eq!(category_of("frame-ancestors"), DirectiveCategory::Navigation);
        assert_eq!(category_of("report-uri"), DirectiveCategory::Reporting);
        assert_eq!(category_of("x-custom-directive"), DirectiveCategory::Other);
    }

    #[test]
    fn critical_directives_are_the_required_four() {
        let critical: Vec<&str> = critical_directives().collect();
        assert_eq!(
            critical,
            vec!["default-src", "script-src", "object-src", "base-uri"]
        );
    }

    #[test]
    fn unsafe_inline_token_matches() {
        let matches = insecure_matches("'unsafe-inline'");
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].label, "'unsafe-inline'");
    }

    #[test]
    fn bare_http_matches_only_exact_token() {
        assert_eq!(insecure_matches("http:").len(), 1);
        assert!(insecure_matches("https:").is_empty());
        assert!(insecure_matches("http://example.com").is_empty());
    }

    #[test]
    fn wildcard_matches_only_bare_star() {
        assert_eq!(insecure_matches("*").len(), 1);
        assert!(insecure_matches("https://*.example.com").is_empty());
    }

    #[test]
    fn safe_tokens_match_nothing() {
        assert!(insecure_matches("'self'").is_empty());
        assert!(insecure_matches("'none'").is_empty());
        assert!(insecure_matches("'nonce-abc123'").is_empty());
        assert!(insecure_matches("https://cdn.example.com").is_empty());
    }
}
