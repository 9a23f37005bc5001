//! Extraction pipeline: plan, then write.

pub mod engine;
pub mod write;

pub use engine::ExtractionEngine;
