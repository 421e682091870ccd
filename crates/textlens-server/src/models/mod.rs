//! TextLens API Models
//!
//! Request/response DTOs for the HTTP surface.

mod analyze;

pub use analyze::*;
