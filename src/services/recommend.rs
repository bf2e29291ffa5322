//! Recommendation generator.
//!
//! A deterministic rule list evaluated in a fixed order; output order is part
//! of the wire contract, so rules never reorder.

use crate::models::evaluation::PolicyEvaluation;

pub const IMPLEMENT_CSP: &str =
    "Implement a Content-Security-Policy header to prevent XSS attacks";
pub const START_REPORT_ONLY: &str =
    "Start with report-only mode: Content-Security-Policy-Report-Only";
pub const ENFORCE_IN_ADDITION_TO_REPORT_ONLY: &str =
    "Consider enforcing CSP in addition to report-only mode";

const WEAK_POLICY: &str = "CSP policy is weak - avoid using unsafe-inline and wildcards";
const USE_NONCES: &str =
    "Replace unsafe-inline with nonce-based or hash-based source allowances";
const ADD_UPGRADE_INSECURE: &str =
    "Add upgrade-insecure-requests to upgrade HTTP subresource requests to HTTPS";
const ADD_FRAME_ANCESTORS: &str = "Add frame-ancestors to prevent clickjacking";
const ADD_FORM_ACTION: &str = "Add form-action to restrict form submission targets";

/// Emitted when neither CSP header is present; the generator short-circuits
/// after these two.
pub fn no_policy() -> Vec<String> {
    vec![IMPLEMENT_CSP.to_string(), START_REPORT_ONLY.to_string()]
}

/// Remediation advice for an absent critical directive, shared between the
/// missing-directive findings and the recommendation list.
pub fn missing_directive_advice(name: &str) -> &'static str {
    match name {
        "default-src" => "Add default-src as a fallback for unspecified resource types",
        "script-src" => "Add script-src to control script execution",
        "object-src" => "Set object-src 'none' to block plugin content",
        "base-uri" => "Add base-uri to prevent base tag hijacking",
        _ => "Add this directive explicitly",
    }
}

/// Rules that read the enforced policy, in their fixed order.
pub fn for_policy(policy: &PolicyEvaluation) -> Vec<String> {
    let mut recommendations = Vec::new();

    if policy.score < 50 {
        recommendations.push(WEAK_POLICY.to_string());
    }

    for name in ["default-src", "script-src", "object-src", "base-uri"] {
        if policy.missing_directives.iter().any(|missing| missing == name) {
            recommendations.push(missing_directive_advice(name).to_string());
        }
    }

    let uses_unsafe_inline = policy
        .unsafe_sources
        .iter()
        .any(|label| label == "'unsafe-inline'");
    if uses_unsafe_inline && !policy.raw_policy.contains("'nonce-") {
        recommendations.push(USE_NONCES.to_string());
    }

    if !policy.raw_policy.contains("upgrade-insecure-requests") {
        recommendations.push(ADD_UPGRADE_INSECURE.to_string());
    }
    if !policy.raw_policy.contains("frame-ancestors") {
        recommendations.push(ADD_FRAME_ANCESTORS.to_string());
    }
    if !policy.raw_policy.contains("form-action") {
        recommendations.push(ADD_FORM_ACTION.to_string());
    }

    recommendations
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::evaluator::evaluate_policy;

    #[test]
    fn no_policy_emits_exactly_two() {
        let recommendations = no_policy();
        assert_eq!(recommendations.len(), 2);
        assert_eq!(recommendations[0], IMPLEMENT_CSP);
        assert_eq!(recommendations[1], START_REPORT_ONLY);
    }

    #[test]
    fn weak_policy_leads_the_list() {
        let policy = evaluate_policy("script-src 'unsafe-inline'");
        let recommendations = for_policy(&policy);

        assert_eq!(recommendations[0], WEAK_POLICY);
        assert!(recommendations.contains(&USE_NONCES.to_string()));
    }

    #[test]
    fn nonce_advice_suppressed_when_nonce_present() {
        let policy = evaluate_policy("script-src 'unsafe-inline' 'nonce-abc123'");
        let recommendations = for_policy(&policy);

        assert!(!recommendations.contains(&USE_NONCES.to_string()));
    }

    #[test]
    fn missing_directive_advice_follows_fixed_order() {
        let policy = evaluate_policy("style-src 'self'");
        let recommendations = for_policy(&policy);

        let default_pos = recommendations
            .iter()
            .position(|r| r == missing_directive_advice("default-src"))
            .unwrap();
        let base_uri_pos = recommendations
            .iter()
            .position(|r| r == missing_directive_advice("base-uri"))
            .unwrap();
        assert!(default_pos < base_uri_pos);
    }

    #[test]
    fn hardened_policy_gets_no_advice() {
        let policy = evaluate_policy(
            "default-src 'none'; script-src 'self'; style-src 'self'; img-src 'self'; \
             connect-src 'self'; object-src 'none'; base-uri 'self'; \
             frame-ancestors 'self'; form-action 'self'; upgrade-insecure-requests",
        );
        assert!(for_policy(&policy).is_empty());
    }
}
