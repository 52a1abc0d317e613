//! # Clutter Aggregator
//! Pure, testable logic that maps a scored batch → per-sender report rows.
//! No I/O, recomputed fresh for every batch.
//!
//! Policy: a sender is flagged when it is both high-volume (at least
//! `min_emails` in the batch) and low-value (at least `low_value_pct` of its
//! mail labeled Promotional or Notification). Rows are ordered by volume,
//! then low-value share, then sender name so output order is total.

use crate::email::{ClutterEntry, ScoredEmail, Suggestion};
use std::cmp::Ordering;
use std::collections::HashMap;

/// Tunable thresholds for the suggestion rule.
#[derive(Clone, Copy, Debug)]
pub struct ClutterParams {
    /// Minimum emails from a sender before a suggestion is possible.
    pub min_emails: usize,
    /// Minimum share (0–100) of low-value mail.
    pub low_value_pct: f32,
}

impl Default for ClutterParams {
    fn default() -> Self {
        Self {
            min_emails: 3,
            low_value_pct: 70.0,
        }
    }
}

/// Aggregate with the default thresholds (3 emails, 70%).
pub fn aggregate(scored: &[ScoredEmail]) -> Vec<ClutterEntry> {
    aggregate_with_params(scored, ClutterParams::default())
}

/// One entry per distinct sender in the batch; empty batch → empty vec.
pub fn aggregate_with_params(scored: &[ScoredEmail], params: ClutterParams) -> Vec<ClutterEntry> {
    // (total, low-value) tallies per exact sender string.
    let mut tallies: HashMap<&str, (usize, usize)> = HashMap::new();
    for email in scored {
        let entry = tallies.entry(email.record.sender.as_str()).or_insert((0, 0));
        entry.0 += 1;
        if email.label.is_low_value() {
            entry.1 += 1;
        }
    }

    let mut entries: Vec<ClutterEntry> = tallies
        .into_iter()
        .map(|(sender, (total, low))| {
            // total >= 1 structurally; a zero total is defined as 0%.
            let pct = if total > 0 {
                100.0 * low as f32 / total as f32
            } else {
                0.0
            };
            let suggestion = if total >= params.min_emails && pct >= params.low_value_pct {
                Suggestion::Suggested
            } else {
                Suggestion::Keep
            };
            ClutterEntry {
                sender: sender.to_string(),
                total_emails: total,
                low_priority_count: low,
                low_priority_percentage: pct,
                suggestion,
            }
        })
        .collect();

    // Volume desc, low-value share desc, sender asc as the final tiebreak.
    entries.sort_by(|a, b| {
        b.total_emails
            .cmp(&a.total_emails)
            .then(
                b.low_priority_percentage
                    .partial_cmp(&a.low_priority_percentage)
                    .unwrap_or(Ordering::Equal),
            )
            .then_with(|| a.sender.cmp(&b.sender))
    });
    entries
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::email::{EmailRecord, Label};

    fn scored(sender: &str, label: Label) -> ScoredEmail {
        ScoredEmail {
            record: EmailRecord {
                sender: sender.to_string(),
                ..Default::default()
            },
            label,
            priority_score: 0.5,
            summary: String::new(),
        }
    }

    #[test]
    fn empty_batch_yields_empty_report() {
        assert!(aggregate(&[]).is_empty());
    }

    #[test]
    fn suggestion_boundary_three_emails_seventy_percent() {
        // Exactly 3 emails, exactly ~66.7% low value: below the percentage bar.
        let below = vec![
            scored("s", Label::Promotional),
            scored("s", Label::Notification),
            scored("s", Label::Personal),
        ];
        assert_eq!(aggregate(&below)[0].suggestion, Suggestion::Keep);

        // Exactly 3 emails, 100%: both bars met.
        let at = vec![
            scored("s", Label::Promotional),
            scored("s", Label::Promotional),
            scored("s", Label::Notification),
        ];
        assert_eq!(aggregate(&at)[0].suggestion, Suggestion::Suggested);

        // 2 emails at 100%: volume bar missed.
        let few = vec![scored("s", Label::Promotional), scored("s", Label::Promotional)];
        assert_eq!(aggregate(&few)[0].suggestion, Suggestion::Keep);
    }

    #[test]
    fn seventy_percent_is_inclusive() {
        // 7 of 10 low value → exactly 70.0%.
        let mut batch = Vec::new();
        for _ in 0..7 {
            batch.push(scored("s", Label::Promotional));
        }
        for _ in 0..3 {
            batch.push(scored("s", Label::Personal));
        }
        let report = aggregate(&batch);
        assert!((report[0].low_priority_percentage - 70.0).abs() < 1e-4);
        assert_eq!(report[0].suggestion, Suggestion::Suggested);
    }

    #[test]
    fn ordering_volume_then_share_then_sender() {
        let batch = vec![
            // b: 2 emails, 50% low value
            scored("b", Label::Promotional),
            scored("b", Label::Personal),
            // a: 2 emails, 100% low value → ahead of b on share
            scored("a", Label::Notification),
            scored("a", Label::Promotional),
            // c: 3 emails → first on volume
            scored("c", Label::Personal),
            scored("c", Label::Personal),
            scored("c", Label::Personal),
            // d: ties b on volume and share → sender tiebreak keeps b first
            scored("d", Label::Promotional),
            scored("d", Label::Personal),
        ];
        let report = aggregate(&batch);
        let senders: Vec<&str> = report.iter().map(|e| e.sender.as_str()).collect();
        assert_eq!(senders, vec!["c", "a", "b", "d"]);
    }

    #[test]
    fn worked_example_deals_sender() {
        let batch = vec![
            scored("deals@x.com", Label::Promotional),
            scored("deals@x.com", Label::Promotional),
            scored("deals@x.com", Label::Promotional),
            scored("deals@x.com", Label::Notification),
        ];
        let report = aggregate(&batch);
        assert_eq!(report.len(), 1);
        let row = &report[0];
        assert_eq!(row.total_emails, 4);
        assert_eq!(row.low_priority_count, 4);
        assert!((row.low_priority_percentage - 100.0).abs() < 1e-6);
        assert_eq!(row.suggestion, Suggestion::Suggested);
    }

    #[test]
    fn custom_params_move_the_bars() {
        let batch = vec![scored("s", Label::Promotional), scored("s", Label::Promotional)];
        let loose = ClutterParams {
            min_emails: 2,
            low_value_pct: 50.0,
        };
        assert_eq!(
            aggregate_with_params(&batch, loose)[0].suggestion,
            Suggestion::Suggested
        );
    }
}
