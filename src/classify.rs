//! Label classifier: an explicit ordered rule chain, first match wins.
//!
//! Precedence is a data structure (`RULE_CHAIN`), not nested control flow, so
//! tests can assert the order directly. Each rule is a `Signal` predicate over
//! a pre-lowercased haystack paired with the label it assigns; an email that
//! matches nothing is Personal.

use crate::config::{contains_any, KeywordConfig};
use crate::email::Label;

/// Sender marker that, combined with promotional wording, marks bulk mail.
const NO_REPLY_MARKER: &str = "no-reply";
/// Subject marker treated as promotional on its own.
const NEWSLETTER_MARKER: &str = "newsletter";

/// One predicate of the classification chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signal {
    /// Urgent keyword anywhere in subject, body, or sender.
    UrgentKeyword,
    /// "no-reply" sender carrying promotional wording.
    NoReplyPromotion,
    /// Promotional wording anywhere, or "newsletter" in the subject.
    PromotionOrNewsletter,
    /// Transactional/notification wording anywhere.
    NotificationKeyword,
}

/// Evaluation order. Urgency outranks promotion: an email containing both an
/// urgent and a promotional keyword classifies Important.
pub const RULE_CHAIN: &[(Signal, Label)] = &[
    (Signal::UrgentKeyword, Label::Important),
    (Signal::NoReplyPromotion, Label::Promotional),
    (Signal::PromotionOrNewsletter, Label::Promotional),
    (Signal::NotificationKeyword, Label::Notification),
];

/// Lowercased views of the fields each signal inspects.
struct Haystack {
    /// subject + body + sender, space-joined.
    text: String,
    subject: String,
    sender: String,
}

impl Haystack {
    fn new(subject: &str, body: &str, sender: &str) -> Self {
        Self {
            text: format!("{} {} {}", subject, body, sender).to_lowercase(),
            subject: subject.to_lowercase(),
            sender: sender.to_lowercase(),
        }
    }
}

impl Signal {
    fn holds(self, hay: &Haystack, kw: &KeywordConfig) -> bool {
        match self {
            Signal::UrgentKeyword => contains_any(&hay.text, &kw.urgent),
            Signal::NoReplyPromotion => {
                hay.sender.contains(NO_REPLY_MARKER) && contains_any(&hay.text, &kw.promotional)
            }
            Signal::PromotionOrNewsletter => {
                contains_any(&hay.text, &kw.promotional)
                    || hay.subject.contains(NEWSLETTER_MARKER)
            }
            Signal::NotificationKeyword => contains_any(&hay.text, &kw.notification),
        }
    }
}

/// Assign a label to one email. Pure; never fails; missing fields are empty
/// strings on the caller's side.
pub fn classify(subject: &str, body: &str, sender: &str, kw: &KeywordConfig) -> Label {
    let hay = Haystack::new(subject, body, sender);
    for (signal, label) in RULE_CHAIN {
        if signal.holds(&hay, kw) {
            return *label;
        }
    }
    Label::Personal
}
