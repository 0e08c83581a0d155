//! CLI command implementations

pub mod check;
pub mod landmarks;
pub mod run;
