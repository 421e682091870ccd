//! TextLens Domain Library
//!
//! Core domain types and interfaces for forwarding free text to hosted
//! completion and embedding endpoints.
//!
//! # Architecture
//!
//! This crate follows Clean Architecture / Hexagonal Architecture principles:
//!
//! - **Domain Layer** (`domain/`): Pure entities and logic
//!   - `entities/`: Requests, results, documents, batch reports
//!   - `value_objects/`: Immutable value types (Action, Sentiment, EmbeddingVector)
//!   - `errors/`: Domain-specific error types
//!
//! - **Ports** (`ports/`): Abstract interfaces (traits)
//!   - `repositories/`: Document store interface
//!   - `services/`: Completion and embedding endpoint interfaces
//!
//! - **Services** (`services/`): Pure functions over domain types
//!   (prompt templates, model output parsing)
//!
//! - **Application** (`application/`): Use cases built on the ports
//!   (batch vectorization)
//!
//! # Usage
//!
//! ```rust,ignore
//! use textlens::{Action, BatchVectorizer, DocumentStore, EmbeddingService};
//! ```

pub mod application;
pub mod domain;
pub mod ports;
pub mod services;

// Re-export commonly used types
pub use application::BatchVectorizer;
pub use domain::{
    Action, AnalysisRequest, CompletionResult, Document, DocumentId, DomainError,
    EmbeddingVector, ItemFailure, Sentiment, SentimentResult, VectorizeReport,
};
pub use ports::{
    ChatMessage, CompletionOptions, CompletionService, DocumentStore, EmbeddingService,
    MessageRole,
};
pub use services::{build_prompt, parse_sentiment, strip_code_fences, PromptTask};
