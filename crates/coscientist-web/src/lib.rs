//! coscientist-web — Analysis client for the Co-Scientist service.
//! Provides the submit/render cycle behind the search page:
//!   - In-memory document model and the `Document` seam
//!   - Status controller
//!   - Generic list renderer and card formatters
//!   - HTTP transport for `/api/analyze`
//!   - Submission orchestrator with an explicit phase machine

pub mod dom;
pub mod status;
pub mod cards;
pub mod render;
pub mod state;
pub mod error;
pub mod transport;
pub mod submit;
pub mod page;
