//! Batch orchestration: frequency map first, per-email stages, aggregation
//! last. Stateless across runs: two calls on the same batch produce the same
//! report.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::classify::classify;
use crate::clutter::aggregate;
use crate::config::KeywordConfig;
use crate::email::{ClutterEntry, EmailRecord, Label, ScoredEmail, Suggestion};
use crate::frequency::sender_frequencies;
use crate::priority::score;
use crate::summarize::Summarize;

/// Full output of one batch run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchReport {
    pub emails: Vec<ScoredEmail>,
    pub clutter: Vec<ClutterEntry>,
}

/// Run the whole pipeline over one batch.
///
/// Order matters: the frequency map is computed over the complete batch
/// before any email is scored, so every record sees the same snapshot.
/// Per-email stages are independent of each other; aggregation consumes the
/// full scored table at the end.
pub fn process_batch(
    records: &[EmailRecord],
    kw: &KeywordConfig,
    summarizer: &dyn Summarize,
) -> BatchReport {
    let frequencies = sender_frequencies(records);

    let emails: Vec<ScoredEmail> = records
        .iter()
        .map(|record| {
            let label = classify(&record.subject, &record.body, &record.sender, kw);
            let priority_score = score(record, label, &frequencies, kw);
            let summary = summarizer.summarize(&record.body);
            // Raw subject/body never hit the logs; hash the identity instead.
            debug!(
                target: "triage",
                id = %anon_hash(if record.id.is_empty() { &record.sender } else { &record.id }),
                ?label,
                priority_score,
            );
            ScoredEmail {
                record: record.clone(),
                label,
                priority_score,
                summary,
            }
        })
        .collect();

    let clutter = aggregate(&emails);

    info!(
        target: "triage",
        batch = records.len(),
        senders = clutter.len(),
        important = emails.iter().filter(|e| e.label == Label::Important).count(),
        promotional = emails.iter().filter(|e| e.label == Label::Promotional).count(),
        suggested = clutter
            .iter()
            .filter(|c| c.suggestion == Suggestion::Suggested)
            .count(),
        summarizer = summarizer.name(),
        "batch processed"
    );

    BatchReport { emails, clutter }
}

/// Short anonymized id for log lines (first 6 bytes of SHA-256, hex).
pub(crate) fn anon_hash(text: &str) -> String {
    use sha2::{Digest, Sha256};
    let mut hasher = Sha256::new();
    hasher.update(text.as_bytes());
    let digest = hasher.finalize();
    let mut out = String::with_capacity(12);
    for b in digest.iter().take(6) {
        use std::fmt::Write as _;
        let _ = write!(&mut out, "{:02x}", b);
    }
    out
}
