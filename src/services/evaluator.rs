//! CSP evaluation rule engine.
//!
//! Pure, synchronous, and deterministic: per-directive analysis, a weighted
//! point score, bypass and framework detection, and aggregation of the
//! enforced and report-only headers into one result.

use std::sync::OnceLock;

use regex::Regex;

use crate::models::evaluation::{
    CspEvaluation, DirectiveEvaluation, Effectiveness, Finding, FindingKind, PolicyEvaluation,
    ReportOnlyEvaluation, Severity,
};
use crate::models::scan::{ScanHeaders, ScanReport};
use crate::parsers::csp::{parse_policy, DirectiveMap};
use crate::services::{bypass, catalog, framework, recommend};

const CSP_HEADER: &str = "content-security-policy";
const CSP_REPORT_ONLY_HEADER: &str = "content-security-policy-report-only";

/// Directives granted the smaller presence bonus.
const COMMON_DIRECTIVES: &[&str] = &[
    "default-src",
    "script-src",
    "style-src",
    "img-src",
    "connect-src",
];

/// Hardening directives granted the larger presence bonus.
const HARDENING_DIRECTIVES: &[&str] = &["object-src", "base-uri", "frame-ancestors"];

/// Point values for the additive/subtractive score.
///
/// The defaults are canonical; tests pin the resulting scores exactly.
#[derive(Debug, Clone)]
pub struct ScoreWeights {
    /// Granted for having any policy at all.
    pub base: i32,
    pub common_directive: i32,
    pub hardening_directive: i32,
    /// A secure directive whose source list contains 'none'.
    pub none_bonus: i32,
    /// A secure directive with no unsafe source token.
    pub secure_bonus: i32,
    /// unsafe-inline in the effective script source, without nonce or hash.
    pub unsafe_inline_penalty: i32,
    pub unsafe_eval_penalty: i32,
    pub wildcard_penalty: i32,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            base: 10,
            common_directive: 6,
            hardening_directive: 10,
            none_bonus: 5,
            secure_bonus: 3,
            unsafe_inline_penalty: 20,
            unsafe_eval_penalty: 15,
            wildcard_penalty: 25,
        }
    }
}

/// Evaluate one directive name/value pair.
///
/// A directive is secure when its source list contains the literal `'none'`,
/// or when the list is non-empty and no token matches an insecure pattern.
/// An empty list without `'none'` is not secure.
pub fn evaluate_directive(name: &str, value: &str) -> DirectiveEvaluation {
    let name = name.to_lowercase();
    let sources: Vec<String> = value.split_whitespace().map(str::to_string).collect();

    let mut warnings = Vec::new();
    let mut has_insecure_source = false;
    for token in &sources {
        for pattern in catalog::insecure_matches(token) {
            has_insecure_source = true;
            warnings.push(format!("{} detected: {}", pattern.label, pattern.description));
        }
    }

    let has_none = sources.iter().any(|token| token == "'none'");
    let is_secure = has_none || (!sources.is_empty() && !has_insecure_source);
    let category = catalog::category_of(&name);

    DirectiveEvaluation {
        directive: name,
        value: value.to_string(),
        sources,
        is_secure,
        warnings,
        category,
    }
}

/// Additive/subtractive point score, clamped to 0-100.
pub fn compute_score(
    evaluations: &[DirectiveEvaluation],
    directives: &DirectiveMap,
    weights: &ScoreWeights,
) -> u8 {
    let mut score = weights.base;

    for name in COMMON_DIRECTIVES {
        if directives.contains(name) {
            score += weights.common_directive;
        }
    }
    for name in HARDENING_DIRECTIVES {
        if directives.contains(name) {
            score += weights.hardening_directive;
        }
    }

    for evaluation in evaluations {
        let has_none = evaluation.sources.iter().any(|token| token == "'none'");
        if evaluation.is_secure && has_none {
            score += weights.none_bonus;
        } else if evaluation.is_secure
            && !evaluation.sources.iter().any(|token| token.contains("unsafe"))
        {
            score += weights.secure_bonus;
        }
    }

    let script_src = directives.effective_script_src();
    if script_src.contains("'unsafe-inline'")
        && !script_src.contains("'nonce-")
        && !script_src.contains("'sha256-")
    {
        score -= weights.unsafe_inline_penalty;
    }
    if script_src.contains("'unsafe-eval'") {
        score -= weights.unsafe_eval_penalty;
    }
    if script_src.contains('*') {
        score -= weights.wildcard_penalty;
    }

    score.clamp(0, 100) as u8
}

/// Tier boundaries: 80 and above is strong, 50 and above is moderate.
pub fn effectiveness_of(score: u8) -> Effectiveness {
    if score >= 80 {
        Effectiveness::Strong
    } else if score >= 50 {
        Effectiveness::Moderate
    } else {
        Effectiveness::Weak
    }
}

/// Evaluate one raw Content-Security-Policy header value.
pub fn evaluate_policy(raw: &str) -> PolicyEvaluation {
    let directives = parse_policy(raw);
    evaluate_parsed(raw, &directives)
}

fn evaluate_parsed(raw: &str, directives: &DirectiveMap) -> PolicyEvaluation {
    let mut evaluations = Vec::new();
    let mut findings = Vec::new();
    let mut unsafe_sources: Vec<String> = Vec::new();

    for (name, value) in directives.iter() {
        let evaluation = evaluate_directive(name, value);

        for warning in &evaluation.warnings {
            findings.push(Finding {
                kind: FindingKind::Warning,
                severity: Severity::Medium,
                message: warning.clone(),
                directive: Some(name.to_string()),
                recommendation: None,
            });
        }
        if evaluation.is_secure && evaluation.sources.iter().any(|token| token == "'none'") {
            findings.push(Finding {
                kind: FindingKind::Success,
                severity: Severity::Info,
                message: format!("{name} is restricted to 'none'"),
                directive: Some(name.to_string()),
                recommendation: None,
            });
        }

        // Distinct insecure-source labels, first-seen order across the policy.
        for token in &evaluation.sources {
            for pattern in catalog::insecure_matches(token) {
                if !unsafe_sources.iter().any(|label| label == pattern.label) {
                    unsafe_sources.push(pattern.label.to_string());
                }
            }
        }

        evaluations.push(evaluation);
    }

    let mut missing_directives = Vec::new();
    for name in catalog::critical_directives() {
        if directives.contains(name) {
            continue;
        }
        missing_directives.push(name.to_string());
        let severity = match name {
            "default-src" | "script-src" => Severity::High,
            _ => Severity::Medium,
        };
        findings.push(Finding {
            kind: FindingKind::Warning,
            severity,
            message: format!("{name} directive is missing"),
            directive: Some(name.to_string()),
            recommendation: Some(recommend::missing_directive_advice(name).to_string()),
        });
    }

    let mut bypasses = Vec::new();
    for known in bypass::triggered(directives) {
        let message = known.describe();
        findings.push(Finding {
            kind: FindingKind::Warning,
            severity: known.severity,
            message: message.clone(),
            directive: None,
            recommendation: None,
        });
        bypasses.push(message);
    }

    let score = compute_score(&evaluations, directives, &ScoreWeights::default());
    let effectiveness = effectiveness_of(score);
    tracing::debug!(score, effectiveness = %effectiveness, "CSP policy evaluated");

    PolicyEvaluation {
        raw_policy: raw.to_string(),
        directives: evaluations,
        findings,
        score,
        effectiveness,
        missing_directives,
        unsafe_sources,
        bypasses,
    }
}

fn report_only_evaluation(raw: &str) -> ReportOnlyEvaluation {
    static REPORT_URI: OnceLock<Regex> = OnceLock::new();
    static REPORT_TO: OnceLock<Regex> = OnceLock::new();

    let report_uri = REPORT_URI.get_or_init(|| Regex::new(r"report-uri\s+([^;]+)").unwrap());
    let report_to = REPORT_TO.get_or_init(|| Regex::new(r"report-to\s+([^;]+)").unwrap());

    ReportOnlyEvaluation {
        enabled: true,
        report_uri: extract_first_capture(report_uri, raw),
        report_to: extract_first_capture(report_to, raw),
    }
}

fn extract_first_capture(regex: &Regex, raw: &str) -> Option<String> {
    regex
        .captures(raw)
        .and_then(|captures| captures.get(1))
        .map(|capture| capture.as_str().trim().to_string())
}

/// Evaluate the full header set of one completed scan.
///
/// Header lookup is case-insensitive; with duplicate headers the first match
/// wins. When neither CSP header is present the result stays at score 0 with
/// `none` effectiveness — a normal outcome, not an error.
pub fn evaluate(headers: &ScanHeaders) -> CspEvaluation {
    let mut result = CspEvaluation {
        enforced_policy: None,
        report_only: None,
        overall_score: 0,
        overall_effectiveness: Effectiveness::None,
        recommendations: Vec::new(),
        bypass_techniques: Vec::new(),
        framework_compatibility: Vec::new(),
    };

    if let Some(raw) = headers.get(CSP_HEADER) {
        let directives = parse_policy(raw);
        let policy = evaluate_parsed(raw, &directives);

        result.overall_score = policy.score;
        result.overall_effectiveness = policy.effectiveness;
        result.bypass_techniques = policy.bypasses.clone();
        result.framework_compatibility = framework::detect_frameworks(&directives);
        result.enforced_policy = Some(policy);
    }

    if let Some(raw) = headers.get(CSP_REPORT_ONLY_HEADER) {
        result.report_only = Some(report_only_evaluation(raw));
        if result.enforced_policy.is_none() {
            // 'none' is reserved for scans with neither header present; a
            // report-only policy enforces nothing, so the tier follows the
            // unchanged score of 0.
            result.overall_effectiveness = effectiveness_of(result.overall_score);
            result
                .recommendations
                .push(recommend::ENFORCE_IN_ADDITION_TO_REPORT_ONLY.to_string());
        }
    }

    match &result.enforced_policy {
        Some(policy) => result.recommendations.extend(recommend::for_policy(policy)),
        None if result.report_only.is_none() => {
            result.recommendations.extend(recommend::no_policy());
        }
        None => {}
    }

    tracing::debug!(
        overall_score = result.overall_score,
        overall_effectiveness = %result.overall_effectiveness,
        "scan headers evaluated"
    );
    result
}

/// Evaluate directly from a parsed scanner report.
pub fn evaluate_report(report: &ScanReport) -> CspEvaluation {
    evaluate(&report.headers())
}
