//! email.rs: boundary types for the triage pipeline.
//!
//! Input records are deliberately lenient: every field defaults to an empty
//! string, so a partially filled upload never rejects a record. Output types
//! are the stable shape consumed by UI/export callers.

use serde::{Deserialize, Serialize};

/// Raw email record as supplied by the caller.
///
/// Unknown extra fields in the source JSON are ignored; missing fields become
/// empty strings. `date` is opaque text; the pipeline never parses it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmailRecord {
    pub id: String,
    pub sender: String,
    pub subject: String,
    pub body: String,
    pub date: String,
}

impl EmailRecord {
    /// Convenience constructor for tests and embedding callers.
    pub fn new(
        id: impl Into<String>,
        sender: impl Into<String>,
        subject: impl Into<String>,
        body: impl Into<String>,
        date: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            sender: sender.into(),
            subject: subject.into(),
            body: body.into(),
            date: date.into(),
        }
    }
}

/// Category assigned to an email by the classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Label {
    Important,
    Promotional,
    Notification,
    Personal,
}

impl Label {
    /// Promotional and Notification count as low-value for the clutter report.
    pub fn is_low_value(self) -> bool {
        matches!(self, Label::Promotional | Label::Notification)
    }
}

/// Per-email pipeline result: the input record plus label, score, and summary.
/// Created once per record and immutable thereafter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredEmail {
    #[serde(flatten)]
    pub record: EmailRecord,
    pub label: Label,
    /// In [0.0, 1.0], rounded to 2 decimals.
    pub priority_score: f32,
    pub summary: String,
}

/// Per-sender recommendation in the clutter report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Suggestion {
    Suggested,
    Keep,
}

/// Aggregated per-sender row of the clutter report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClutterEntry {
    pub sender: String,
    pub total_emails: usize,
    pub low_priority_count: usize,
    /// 0–100.
    pub low_priority_percentage: f32,
    pub suggestion: Suggestion,
}
