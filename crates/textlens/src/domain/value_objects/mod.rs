//! Value Objects
//!
//! Immutable objects defined by their attributes rather than identity.

mod action;
mod embedding;
mod sentiment;

pub use action::*;
pub use embedding::*;
pub use sentiment::*;
