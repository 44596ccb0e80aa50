// src/dom/mod.rs
pub mod clean;
pub mod tree;

// Re-export key document types for convenience
pub use clean::clean_html;
pub use tree::{Document, NodeId};
