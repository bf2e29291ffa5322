//! Value types for scan input and evaluation output.

pub mod evaluation;
pub mod scan;
