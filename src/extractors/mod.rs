// src/extractors/mod.rs
pub mod measurements;
pub mod patterns;
pub mod section;
pub mod species;

// Re-export key extraction types for convenience
pub use section::{ScanMode, SectionExtractor};
