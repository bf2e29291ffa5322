//! Parsers turning raw input into typed records.
//!
//! `csp` handles the policy header value itself; `scan_report` handles the
//! JSON blob produced by the external header-scanning executable.

pub mod csp;
pub mod scan_report;
