//! coscientist-common — Shared types, errors, and configuration used across all Co-Scientist crates.

pub mod error;
pub mod models;
pub mod config;

// Re-export commonly used types
pub use config::{ClientConfig, ElementIds, EndpointConfig, OverlapPolicy, SubmissionConfig};
pub use models::{AnalysisMeta, AnalysisResult, Entry, Hypothesis, Query, Task};
