//! Harmony response post-processing.
//!
//! Models served with Harmony formatting emit several segments per turn,
//! each labeled with a channel. Only the `final` channel is meant for the
//! user; `analysis` and `commentary` carry internal reasoning and tool calls.

mod extract;
pub mod markers;

pub use extract::{Extraction, Extractor, MISSING_FINAL_NOTICE, extract_output};
