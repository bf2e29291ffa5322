pub mod errors;
pub mod models;
pub mod parsers;
pub mod services;

pub use models::evaluation::{CspEvaluation, Effectiveness, PolicyEvaluation};
pub use models::scan::{ScanHeaders, ScanReport};
pub use services::evaluator::{evaluate, evaluate_policy, evaluate_report};
