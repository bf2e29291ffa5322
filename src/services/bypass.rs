//! Known CSP bypass heuristics.
//!
//! A fixed table of named predicates over the parsed directive map. The set
//! is closed and versioned with this crate; new heuristics are added to the
//! table, not plugged in at runtime.

use crate::models::evaluation::Severity;
use crate::parsers::csp::DirectiveMap;

/// One named bypass heuristic.
#[derive(Debug)]
pub struct KnownBypass {
    pub name: &'static str,
    pub severity: Severity,
    pub description: &'static str,
    check: fn(&DirectiveMap) -> bool,
}

impl KnownBypass {
    pub fn triggered_by(&self, directives: &DirectiveMap) -> bool {
        (self.check)(directives)
    }

    /// The formatted entry appended to the bypass list.
    pub fn describe(&self) -> String {
        format!("{}: {}", self.name, self.description)
    }
}

pub const KNOWN_BYPASSES: &[KnownBypass] = &[
    KnownBypass {
        name: "JSONP Bypass",
        severity: Severity::Medium,
        description: "whitelisted Google domains expose JSONP endpoints that execute attacker-controlled callbacks",
        check: jsonp_endpoints_whitelisted,
    },
    KnownBypass {
        name: "Angular Template Injection",
        severity: Severity::Medium,
        description: "whitelisted CDNs host AngularJS builds usable for template injection",
        check: angular_cdn_whitelisted,
    },
    KnownBypass {
        name: "object-src Missing",
        severity: Severity::Medium,
        description: "plugin content is not restricted, allowing Flash/Java-based injection",
        check: object_src_missing,
    },
    KnownBypass {
        name: "base-uri Missing",
        severity: Severity::Medium,
        description: "base tag injection can redirect relative script URLs",
        check: base_uri_missing,
    },
    KnownBypass {
        name: "strict-dynamic with unsafe-inline",
        severity: Severity::Medium,
        description: "unsafe-inline alongside strict-dynamic keeps inline injection viable in older browsers",
        check: strict_dynamic_with_unsafe_inline,
    },
];

/// Heuristics triggered by the parsed policy, in table order, with their
/// table metadata.
pub fn triggered(directives: &DirectiveMap) -> Vec<&'static KnownBypass> {
    KNOWN_BYPASSES
        .iter()
        .filter(|bypass| bypass.triggered_by(directives))
        .collect()
}

/// The triggered heuristics as formatted bypass-list entries.
pub fn detect(directives: &DirectiveMap) -> Vec<String> {
    triggered(directives)
        .into_iter()
        .map(KnownBypass::describe)
        .collect()
}

fn jsonp_endpoints_whitelisted(directives: &DirectiveMap) -> bool {
    let script_src = directives.effective_script_src();
    ["googleapis.com", "ajax.googleapis.com", "gstatic.com"]
        .iter()
        .any(|domain| script_src.contains(domain))
}

fn angular_cdn_whitelisted(directives: &DirectiveMap) -> bool {
    directives
        .get("script-src")
        .is_some_and(|src| src.contains("cdnjs.cloudflare.com") || src.contains("unpkg.com"))
}

// Fires even when default-src is 'none' (which already blocks plugins);
// inherited condition, kept for output parity.
fn object_src_missing(directives: &DirectiveMap) -> bool {
    if directives.contains("object-src") {
        return false;
    }
    match directives.get("default-src") {
        None => true,
        Some(default_src) => default_src.contains("'none'"),
    }
}

fn base_uri_missing(directives: &DirectiveMap) -> bool {
    !directives.contains("base-uri")
}

fn strict_dynamic_with_unsafe_inline(directives: &DirectiveMap) -> bool {
    directives
        .get("script-src")
        .is_some_and(|src| src.contains("'strict-dynamic'") && src.contains("'unsafe-inline'"))
}
