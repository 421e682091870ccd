//! Infrastructure Adapters
//!
//! Implementations of domain ports for external systems.

pub mod openai;
pub mod store;

// Re-exports
pub use openai::{OpenAiCompletionClient, OpenAiEmbeddingClient};
pub use store::open_store;
