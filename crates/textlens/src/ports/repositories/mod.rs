//! Repository Ports
//!
//! Abstract interfaces for data persistence.

mod document_store;

pub use document_store::*;
