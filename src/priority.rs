//! Priority scoring.
//!
//! Two normalized components blended into a bounded score:
//! - W1 label base : fixed lookup per label (urgency/value of the category)
//! - W2 rarity     : log-scaled penalty for frequent senders,
//!                   `1 - ln(1+f)/3`, clamped to [0,1]
//!
//! score = 0.7*W1 + 0.3*W2, then a critical-phrase override can force 1.0.
//! The result is clamped to <=1.0 and rounded to 2 decimals. Deterministic
//! given the record and its batch's frequency map.

use crate::config::{contains_any, KeywordConfig};
use crate::email::{EmailRecord, Label};
use crate::frequency::SenderFrequencyMap;

/// Blend weights: 70% label base, 30% sender rarity.
pub const W_LABEL: f32 = 0.7;
pub const W_RARITY: f32 = 0.3;

/// Frequency assumed for a sender absent from the map.
const DEFAULT_FREQUENCY: usize = 1;

/// W1: label base score.
fn label_base(label: Label) -> f32 {
    match label {
        Label::Important => 0.8,
        Label::Notification => 0.5,
        Label::Personal => 0.4,
        Label::Promotional => 0.1,
    }
}

/// W2: rarity weight for a sender seen `frequency` times in the batch.
/// Non-increasing in `frequency`; 0 once `ln(1+f) >= 3` (f >= ~19).
pub fn rarity_weight(frequency: usize) -> f32 {
    let penalty = (frequency as f32).ln_1p() / 3.0;
    (1.0 - penalty).clamp(0.0, 1.0)
}

/// Compute the priority score for one email.
///
/// Infallible: an absent sender defaults to frequency 1, and the override
/// check works on lowercased subject+body only (sender excluded, as the
/// critical phrases are message content).
pub fn score(
    email: &EmailRecord,
    label: Label,
    frequencies: &SenderFrequencyMap,
    kw: &KeywordConfig,
) -> f32 {
    let w1 = label_base(label);

    let frequency = frequencies
        .get(&email.sender)
        .copied()
        .unwrap_or(DEFAULT_FREQUENCY);
    let w2 = rarity_weight(frequency);

    let mut combined = W_LABEL * w1 + W_RARITY * w2;

    let text = format!("{} {}", email.subject, email.body).to_lowercase();
    if contains_any(&text, &kw.critical) {
        combined = 1.0;
    }

    round2(combined.min(1.0))
}

/// Round half away from zero to 2 decimals.
pub fn round2(x: f32) -> f32 {
    (x * 100.0).round() / 100.0
}
