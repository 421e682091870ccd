//! Application Services (Use Cases)
//!
//! Orchestrate domain operations with concrete adapters.

mod analysis_service;

pub use analysis_service::{ActionOutput, AnalysisService};

#[cfg(test)]
pub(crate) use analysis_service::testing;
