// src/lib.rs
// Public library surface for integration tests (and embedding callers).

pub mod api;
pub mod classify;
pub mod clutter;
pub mod config;
pub mod email;
pub mod frequency;
pub mod pipeline;
pub mod priority;
pub mod summarize;

// ---- Re-exports for stable public API ----
pub use crate::api::{create_router, AppState};
pub use crate::classify::classify;
pub use crate::clutter::{aggregate, aggregate_with_params, ClutterParams};
pub use crate::config::KeywordConfig;
pub use crate::email::{ClutterEntry, EmailRecord, Label, ScoredEmail, Suggestion};
pub use crate::frequency::{sender_frequencies, SenderFrequencyMap};
pub use crate::pipeline::{process_batch, BatchReport};
pub use crate::priority::score;
pub use crate::summarize::{
    build_summarizer_from_config, AbstractiveBackend, DynSummarizer, ExtractiveSummarizer,
    ModelSummarizer, Summarize, SummarizerConfig,
};
