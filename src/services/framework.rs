//! Front-end framework compatibility heuristics.
//!
//! Each known framework has a fixed rule over the parsed directive map; the
//! detector always emits one row per framework, detected or not, so the
//! output shape is stable for consumers.

use crate::models::evaluation::FrameworkCompatibility;
use crate::parsers::csp::DirectiveMap;

struct FrameworkRule {
    name: &'static str,
    directives_checked: &'static [&'static str],
    check: fn(&DirectiveMap) -> bool,
}

const FRAMEWORK_RULES: &[FrameworkRule] = &[
    FrameworkRule {
        name: "React",
        directives_checked: &["script-src", "style-src"],
        check: react_compatible,
    },
    FrameworkRule {
        name: "Angular",
        directives_checked: &["script-src"],
        check: angular_compatible,
    },
    FrameworkRule {
        name: "Vue.js",
        directives_checked: &["script-src", "style-src"],
        check: vue_compatible,
    },
];

/// Always three rows, in order React, Angular, Vue.js.
pub fn detect_frameworks(directives: &DirectiveMap) -> Vec<FrameworkCompatibility> {
    FRAMEWORK_RULES
        .iter()
        .map(|rule| FrameworkCompatibility {
            framework: rule.name.to_string(),
            detected: (rule.check)(directives),
            directives_checked: rule
                .directives_checked
                .iter()
                .map(|name| name.to_string())
                .collect(),
        })
        .collect()
}

fn directive_allows(directives: &DirectiveMap, name: &str, needles: &[&str]) -> bool {
    directives
        .get(name)
        .is_some_and(|value| needles.iter().any(|needle| value.contains(needle)))
}

fn react_compatible(directives: &DirectiveMap) -> bool {
    let needles = ["'nonce-", "'unsafe-inline'"];
    directive_allows(directives, "script-src", &needles)
        && directive_allows(directives, "style-src", &needles)
}

fn angular_compatible(directives: &DirectiveMap) -> bool {
    directive_allows(directives, "script-src", &["'self'", "'unsafe-eval'"])
}

fn vue_compatible(directives: &DirectiveMap) -> bool {
    let needles = ["'self'", "'unsafe-eval'"];
    directive_allows(directives, "script-src", &needles)
        && directive_allows(directives, "style-src", &needles)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsers::csp::parse_policy;

    fn detected(raw: &str) -> Vec<bool> {
        detect_frameworks(&parse_policy(raw))
            .iter()
            .map(|row| row.detected)
            .collect()
    }

    #[test]
    fn rows_are_stable_even_when_nothing_detected() {
        let rows = detect_frameworks(&parse_policy("img-src *"));

        let names: Vec<&str> = rows.iter().map(|row| row.framework.as_str()).collect();
        assert_eq!(names, vec!["React", "Angular", "Vue.js"]);
        assert!(rows.iter().all(|row| !row.detected));
        assert_eq!(rows[1].directives_checked, vec!["script-src"]);
    }

    #[test]
    fn react_needs_both_script_and_style_src() {
        assert_eq!(
            detected("script-src 'nonce-abc'; style-src 'unsafe-inline'"),
            vec![true, false, false]
        );
        assert_eq!(
            detected("script-src 'nonce-abc'"),
            vec![false, false, false]
        );
    }

    #[test]
    fn angular_needs_only_script_src() {
        assert_eq!(detected("script-src 'unsafe-eval'"), vec![false, true, false]);
    }

    #[test]
    fn vue_needs_self_or_unsafe_eval_in_both() {
        assert_eq!(
            detected("script-src 'self'; style-src 'self'"),
            vec![false, true, true]
        );
        assert_eq!(detected("script-src 'self'"), vec![false, true, false]);
    }
}
