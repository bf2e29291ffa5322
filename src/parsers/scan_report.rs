//! Parser for the JSON report emitted by the header-scanning executable.

use crate::errors::ReportError;
use crate::models::scan::ScanReport;

/// Deserialize one scan report blob.
///
/// Malformed input surfaces as a [`ReportError`]; the evaluator itself never
/// fails, so this is the crate's only fallible surface.
pub fn parse_report(data: &[u8]) -> Result<ScanReport, ReportError> {
    if data.is_empty() {
        return Err(ReportError::Empty);
    }
    Ok(serde_json::from_slice(data)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_minimal_report() {
        let blob = br#"{
            "targetUrl": "https://example.com",
            "presentHeaders": {
                "Content-Security-Policy": "default-src 'self'",
                "X-Content-Type-Options": "nosniff"
            },
            "missingHeaders": ["Strict-Transport-Security"]
        }"#;

        let report = parse_report(blob).unwrap();
        assert_eq!(report.target_url, "https://example.com");
        assert_eq!(report.missing_headers, vec!["Strict-Transport-Security"]);
        assert_eq!(
            report.headers().get("content-security-policy"),
            Some("default-src 'self'")
        );
    }

    #[test]
    fn optional_sections_default_to_empty() {
        let blob = br#"{"targetUrl": "https://example.com", "presentHeaders": {}}"#;

        let report = parse_report(blob).unwrap();
        assert!(report.missing_headers.is_empty());
        assert!(report.information_disclosure.is_empty());
        assert!(report.caching_headers.is_empty());
        assert!(report.scanned_at.is_none());
    }

    #[test]
    fn duplicate_header_names_resolve_in_report_order() {
        // Case-variant duplicates: lookup must deterministically return the
        // value that appeared first in the report.
        let blob = br#"{
            "targetUrl": "https://example.com",
            "presentHeaders": {
                "Content-Security-Policy": "default-src 'self'",
                "content-security-policy": "default-src *"
            }
        }"#;

        let report = parse_report(blob).unwrap();
        assert_eq!(
            report.present_headers,
            vec![
                (
                    "Content-Security-Policy".to_string(),
                    "default-src 'self'".to_string()
                ),
                (
                    "content-security-policy".to_string(),
                    "default-src *".to_string()
                ),
            ]
        );
        assert_eq!(
            report.headers().get("content-security-policy"),
            Some("default-src 'self'")
        );
    }

    #[test]
    fn empty_input_is_rejected() {
        assert!(matches!(parse_report(b""), Err(ReportError::Empty)));
    }

    #[test]
    fn malformed_json_is_rejected() {
        assert!(matches!(
            parse_report(b"not json"),
            Err(ReportError::Json(_))
        ));
    }
}
