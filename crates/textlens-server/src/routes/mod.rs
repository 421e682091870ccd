//! TextLens API Routes
//!
//! - / - Input form (HTML)
//! - /analyze - Form or JSON entry point dispatching on `action`
//! - /api/{analyze,summarize,search,vectorize} - One route per action (JSON)

pub mod analyze;
pub mod api;
pub mod form;
pub mod swagger;
