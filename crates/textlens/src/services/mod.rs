//! Domain Services
//!
//! Pure functions over domain types: prompt construction and
//! normalization of model output.

pub mod prompt;
pub mod response_parser;

pub use prompt::{build_prompt, PromptTask};
pub use response_parser::{parse_sentiment, strip_code_fences};
