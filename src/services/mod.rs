//! CSP evaluation logic.

pub mod bypass;
pub mod catalog;
pub mod evaluator;
pub mod framework;
pub mod recommend;
