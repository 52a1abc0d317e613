//! Summarizer capability: trait object + deterministic extractive fallback.
//!
//! The pipeline always holds a non-null `Arc<dyn Summarize>`. The extractive
//! implementation is the shipped default; an abstractive provider can be
//! plugged in through `AbstractiveBackend`, and every failure of that path
//! degrades silently to a truncated-text result. No summarization error ever
//! reaches the caller.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::sync::Arc;

/// Inputs shorter than this many words skip summarization entirely.
const SHORT_INPUT_WORDS: usize = 20;
/// Truncation length for short inputs and the no-boundary fallback.
const SHORT_TRUNCATE: usize = 120;
/// Truncation length when an abstractive backend fails mid-flight.
const FALLBACK_TRUNCATE: usize = 150;
const ELLIPSIS: &str = "...";

/// Target lengths handed to abstractive backends.
const DEFAULT_MAX_LENGTH: usize = 60;
const DEFAULT_MIN_LENGTH: usize = 15;

/// First `.`/`!`/`?` followed by whitespace ends a sentence.
static SENTENCE_BOUNDARY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[.!?]\s").expect("sentence boundary regex"));

/// Capability used by the pipeline. Implementations never fail.
pub trait Summarize: Send + Sync {
    fn summarize(&self, body: &str) -> String;
    /// Implementation name for diagnostics.
    fn name(&self) -> &'static str;
}

/// Shared handle held by pipeline and app state.
pub type DynSummarizer = Arc<dyn Summarize>;

/// Trim, flatten newlines to spaces, cut to `limit` chars, mark truncation.
fn truncate_flat(text: &str, limit: usize) -> String {
    let flat = text.trim().replace('\n', " ");
    let mut out: String = flat.chars().take(limit).collect();
    out.push_str(ELLIPSIS);
    out
}

fn is_short(text: &str) -> bool {
    text.split_whitespace().count() < SHORT_INPUT_WORDS
}

// ------------------------------------------------------------
// Extractive (always available, deterministic)
// ------------------------------------------------------------

/// Selects existing text instead of generating new text: the first sentence
/// of the body, or a flattened truncation when no boundary exists.
#[derive(Debug, Clone, Default)]
pub struct ExtractiveSummarizer;

impl Summarize for ExtractiveSummarizer {
    fn summarize(&self, body: &str) -> String {
        if body.trim().is_empty() || is_short(body) {
            return truncate_flat(body, SHORT_TRUNCATE);
        }
        let trimmed = body.trim();
        match SENTENCE_BOUNDARY.find(trimmed) {
            // `start()` is the byte index of the ASCII terminator.
            Some(m) => trimmed[..=m.start()].trim().to_string(),
            None => truncate_flat(trimmed, SHORT_TRUNCATE),
        }
    }

    fn name(&self) -> &'static str {
        "extractive"
    }
}

// ------------------------------------------------------------
// Abstractive wrapper (optional)
// ------------------------------------------------------------

/// Contract for a pluggable abstractive model. Implementations may fail;
/// `ModelSummarizer` swallows those failures.
pub trait AbstractiveBackend: Send + Sync {
    fn generate(&self, text: &str, max_length: usize, min_length: usize)
        -> anyhow::Result<String>;
    fn name(&self) -> &'static str;
}

/// Wraps a fallible abstractive backend. Short inputs take the same short
/// path as the extractive summarizer; backend errors and blank outputs
/// degrade to a flattened truncation.
pub struct ModelSummarizer {
    backend: Box<dyn AbstractiveBackend>,
    max_length: usize,
    min_length: usize,
}

impl ModelSummarizer {
    pub fn new(backend: Box<dyn AbstractiveBackend>) -> Self {
        Self {
            backend,
            max_length: DEFAULT_MAX_LENGTH,
            min_length: DEFAULT_MIN_LENGTH,
        }
    }

    pub fn with_max_length(mut self, max_length: usize) -> Self {
        self.max_length = max_length.max(self.min_length);
        self
    }
}

impl Summarize for ModelSummarizer {
    fn summarize(&self, body: &str) -> String {
        if body.trim().is_empty() || is_short(body) {
            return truncate_flat(body, SHORT_TRUNCATE);
        }
        match self.backend.generate(body, self.max_length, self.min_length) {
            Ok(out) if !out.trim().is_empty() => out,
            // Generation failed or produced nothing: recover silently.
            _ => {
                tracing::debug!(target: "triage", backend = self.backend.name(),
                                "abstractive generation failed; using truncation fallback");
                truncate_flat(body, FALLBACK_TRUNCATE)
            }
        }
    }

    fn name(&self) -> &'static str {
        "model"
    }
}

// ------------------------------------------------------------
// Config + factory
// ------------------------------------------------------------

/// Loaded from `config/summarizer.json`. If reading/parsing fails, returns
/// `SummarizerConfig::default()` (disabled → extractive).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummarizerConfig {
    pub enabled: bool,
    /// Named abstractive provider; none are bundled today.
    pub provider: Option<String>,
    pub max_length: Option<usize>,
}

impl Default for SummarizerConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            provider: None,
            max_length: Some(DEFAULT_MAX_LENGTH),
        }
    }
}

pub fn load_summarizer_config() -> SummarizerConfig {
    let path = Path::new("config/summarizer.json");
    match fs::read_to_string(path) {
        Ok(s) => serde_json::from_str(&s).unwrap_or_default(),
        Err(_) => SummarizerConfig::default(),
    }
}

/// Factory: build a summarizer according to config and environment.
///
/// * If `SUMMARIZER_TEST_MODE=mock`, returns a deterministic mock-backed
///   `ModelSummarizer`.
/// * Else if disabled, or the named provider is not bundled, returns the
///   extractive summarizer.
pub fn build_summarizer_from_config(config: &SummarizerConfig) -> DynSummarizer {
    if std::env::var("SUMMARIZER_TEST_MODE")
        .map(|v| v == "mock")
        .unwrap_or(false)
    {
        let model = ModelSummarizer::new(Box::new(MockBackend))
            .with_max_length(config.max_length.unwrap_or(DEFAULT_MAX_LENGTH));
        return Arc::new(model);
    }

    if !config.enabled {
        return Arc::new(ExtractiveSummarizer);
    }

    // No abstractive provider ships with the crate; any configured name
    // degrades to the deterministic path rather than failing startup.
    Arc::new(ExtractiveSummarizer)
}

/// Convenience used by the binary: read config from disk and build.
pub fn build_summarizer() -> DynSummarizer {
    let cfg = load_summarizer_config();
    build_summarizer_from_config(&cfg)
}

/// Deterministic stand-in backend for tests.
struct MockBackend;

impl AbstractiveBackend for MockBackend {
    fn generate(&self, _text: &str, _max: usize, _min: usize) -> anyhow::Result<String> {
        Ok("Mock summary.".to_string())
    }

    fn name(&self) -> &'static str {
        "mock"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LONG_BODY: &str = "The quarterly report is attached for your review today. \
Please read the appendix before the meeting because several figures changed \
and the totals moved again last week.";

    #[test]
    fn empty_body_yields_bare_marker() {
        assert_eq!(ExtractiveSummarizer.summarize(""), "...");
    }

    #[test]
    fn short_body_is_flattened_and_bounded() {
        let s = ExtractiveSummarizer.summarize("line one\nline two\nline three");
        assert_eq!(s, "line one line two line three...");
        assert!(!s.contains('\n'));
        assert!(s.chars().count() <= SHORT_TRUNCATE + ELLIPSIS.len());
    }

    #[test]
    fn short_body_truncates_at_120_chars() {
        // 19 words, each 9 chars: short path, > 120 chars total.
        let body = vec!["abcdefghi"; 19].join(" ");
        let s = ExtractiveSummarizer.summarize(&body);
        assert_eq!(s.chars().count(), SHORT_TRUNCATE + ELLIPSIS.len());
        assert!(s.ends_with(ELLIPSIS));
    }

    #[test]
    fn long_body_returns_first_sentence() {
        let s = ExtractiveSummarizer.summarize(LONG_BODY);
        assert_eq!(s, "The quarterly report is attached for your review today.");
    }

    #[test]
    fn question_and_exclamation_end_sentences_too() {
        let body = "Did you see the draft yet today friend? It still needs numbers checked \
plus two more sections rewritten before Friday obviously.";
        let s = ExtractiveSummarizer.summarize(body);
        assert_eq!(s, "Did you see the draft yet today friend?");
    }

    #[test]
    fn long_body_without_boundary_truncates() {
        let body = vec!["word"; 40].join(" ");
        let s = ExtractiveSummarizer.summarize(&body);
        assert!(s.ends_with(ELLIPSIS));
        assert!(s.chars().count() <= SHORT_TRUNCATE + ELLIPSIS.len());
    }

    #[test]
    fn model_passes_backend_output_through() {
        let m = ModelSummarizer::new(Box::new(MockBackend));
        assert_eq!(m.summarize(LONG_BODY), "Mock summary.");
    }

    #[test]
    fn model_short_input_skips_backend() {
        let m = ModelSummarizer::new(Box::new(MockBackend));
        assert_eq!(m.summarize("tiny note"), "tiny note...");
    }

    struct FailingBackend;
    impl AbstractiveBackend for FailingBackend {
        fn generate(&self, _t: &str, _x: usize, _n: usize) -> anyhow::Result<String> {
            anyhow::bail!("model exploded")
        }
        fn name(&self) -> &'static str {
            "failing"
        }
    }

    #[test]
    fn model_failure_degrades_to_truncation() {
        let m = ModelSummarizer::new(Box::new(FailingBackend));
        let s = m.summarize(LONG_BODY);
        assert!(s.ends_with(ELLIPSIS));
        assert!(s.starts_with("The quarterly report"));
        assert!(s.chars().count() <= FALLBACK_TRUNCATE + ELLIPSIS.len());
    }

    struct BlankBackend;
    impl AbstractiveBackend for BlankBackend {
        fn generate(&self, _t: &str, _x: usize, _n: usize) -> anyhow::Result<String> {
            Ok("   ".to_string())
        }
        fn name(&self) -> &'static str {
            "blank"
        }
    }

    #[test]
    fn blank_backend_output_degrades_to_truncation() {
        let m = ModelSummarizer::new(Box::new(BlankBackend));
        assert!(m.summarize(LONG_BODY).ends_with(ELLIPSIS));
    }

    #[test]
    fn disabled_config_builds_extractive() {
        let s = build_summarizer_from_config(&SummarizerConfig::default());
        assert_eq!(s.name(), "extractive");
    }

    #[test]
    fn unbundled_provider_degrades_to_extractive() {
        let cfg = SummarizerConfig {
            enabled: true,
            provider: Some("distilbart-cnn-12-6".into()),
            max_length: None,
        };
        assert_eq!(build_summarizer_from_config(&cfg).name(), "extractive");
    }
}
