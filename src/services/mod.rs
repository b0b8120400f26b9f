//! Services module.

pub mod orchestrator;

pub use orchestrator::{ChatOutcome, EmbedOutcome, RagOrchestrator};
