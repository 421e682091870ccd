//! Domain Entities
//!
//! Pure domain models without infrastructure dependencies.
//! - AnalysisRequest: Inbound text + action
//! - CompletionResult: Parsed model output
//! - Document: Stored record augmented with an embedding
//! - VectorizeReport: Outcome of a batch vectorization pass

mod analysis;
mod document;
mod report;

pub use analysis::*;
pub use document::*;
pub use report::*;
