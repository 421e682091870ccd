//! Service Ports
//!
//! Abstract interfaces for external services.

mod completion;
mod embedding;

pub use completion::*;
pub use embedding::*;
