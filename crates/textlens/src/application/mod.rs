//! Application Layer (Use Cases)
//!
//! Orchestrates domain operations across ports.

mod vectorizer;

pub use vectorizer::BatchVectorizer;
