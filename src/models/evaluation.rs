//! Evaluation result models with enums shared across the CSP rule engine.

use serde::{Deserialize, Serialize};

// -- Enums matching the JSON wire contract --

/// Functional category of a CSP directive.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DirectiveCategory {
    Fetch,
    Document,
    Navigation,
    Reporting,
    Other,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum FindingKind {
    Error,
    Warning,
    Info,
    Success,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    High,
    Medium,
    Low,
    Info,
}

/// Coarse classification derived from the numeric score.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Effectiveness {
    None,
    Weak,
    Moderate,
    Strong,
}

impl std::fmt::Display for Effectiveness {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::None => write!(f, "none"),
            Self::Weak => write!(f, "weak"),
            Self::Moderate => write!(f, "moderate"),
            Self::Strong => write!(f, "strong"),
        }
    }
}

// -- Per-evaluation records --

/// A structured observation accumulated during policy evaluation.
///
/// Findings keep insertion order: per-directive warnings first, then
/// missing-directive warnings, then bypass warnings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Finding {
    pub kind: FindingKind,
    pub severity: Severity,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub directive: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recommendation: Option<String>,
}

/// Result of evaluating a single directive present in the parsed policy.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DirectiveEvaluation {
    /// Lower-cased directive name.
    pub directive: String,
    /// Raw value string, verbatim from the header.
    pub value: String,
    /// Whitespace-tokenized source list, verbatim tokens.
    pub sources: Vec<String>,
    pub is_secure: bool,
    pub warnings: Vec<String>,
    pub category: DirectiveCategory,
}

/// Evaluation of exactly one Content-Security-Policy header value.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PolicyEvaluation {
    pub raw_policy: String,
    pub directives: Vec<DirectiveEvaluation>,
    pub findings: Vec<Finding>,
    /// 0-100 inclusive.
    pub score: u8,
    pub effectiveness: Effectiveness,
    pub missing_directives: Vec<String>,
    /// Distinct insecure-source labels, first-seen order.
    pub unsafe_sources: Vec<String>,
    pub bypasses: Vec<String>,
}

/// Lightweight record for a Content-Security-Policy-Report-Only header.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportOnlyEvaluation {
    pub enabled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report_uri: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report_to: Option<String>,
}

/// Compatibility signal for one known front-end framework.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FrameworkCompatibility {
    pub framework: String,
    pub detected: bool,
    pub directives_checked: Vec<String>,
}

/// Top-level aggregate returned to the caller for one scanned URL.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CspEvaluation {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enforced_policy: Option<PolicyEvaluation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report_only: Option<ReportOnlyEvaluation>,
    pub overall_score: u8,
    pub overall_effectiveness: Effectiveness,
    pub recommendations: Vec<String>,
    pub bypass_techniques: Vec<String>,
    pub framework_compatibility: Vec<FrameworkCompatibility>,
}

impl CspEvaluation {
    /// `none` effectiveness means neither CSP header was present on the scan.
    pub fn has_policy(&self) -> bool {
        self.enforced_policy.is_some() || self.report_only.is_some()
    }
}
