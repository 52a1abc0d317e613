//! # Keyword Configuration
//!
//! Keyword lists driving classification and the critical-phrase override,
//! loaded from TOML with a built-in seed as fallback.
//!
//! - Loads from `config/keywords.toml` (override via `MAILMIND_KEYWORDS_PATH`).
//! - Any read/parse error falls back to `default_seed()`; the service never
//!   refuses to start over a keyword file.
//! - All phrases are lowercased at load time; matching is plain substring
//!   `contains` over lowercased input, so lookups stay allocation-free.

use serde::Deserialize;
use std::{fs, path::Path};
use tracing::warn;

pub const DEFAULT_KEYWORDS_PATH: &str = "config/keywords.toml";
pub const ENV_KEYWORDS_PATH: &str = "MAILMIND_KEYWORDS_PATH";

/// Keyword lists for the rule chain and the score override.
#[derive(Debug, Clone, Deserialize)]
pub struct KeywordConfig {
    /// Any hit anywhere in subject/body/sender → Important.
    #[serde(default = "default_urgent")]
    pub urgent: Vec<String>,
    /// Marketing phrases → Promotional (alone or combined with "no-reply").
    #[serde(default = "default_promotional")]
    pub promotional: Vec<String>,
    /// Transactional phrases → Notification.
    #[serde(default = "default_notification")]
    pub notification: Vec<String>,
    /// Phrases that force the priority score to 1.0 regardless of label.
    #[serde(default = "default_critical")]
    pub critical: Vec<String>,
}

fn default_urgent() -> Vec<String> {
    to_owned(&[
        "urgent",
        "asap",
        "important",
        "interview",
        "password",
        "login",
        "suspicious",
        "deadline",
        "overdue",
    ])
}

fn default_promotional() -> Vec<String> {
    to_owned(&[
        "sale",
        "discount",
        "offer",
        "promo",
        "unsubscribe",
        "deal",
        "coupon",
    ])
}

fn default_notification() -> Vec<String> {
    to_owned(&[
        "reminder",
        "alert",
        "notification",
        "update",
        "delivery",
        "receipt",
    ])
}

fn default_critical() -> Vec<String> {
    to_owned(&["password reset", "unauthorized transaction", "critical error"])
}

fn to_owned(xs: &[&str]) -> Vec<String> {
    xs.iter().map(|s| s.to_string()).collect()
}

impl Default for KeywordConfig {
    fn default() -> Self {
        Self::default_seed()
    }
}

impl KeywordConfig {
    /// Built-in seed used when no config file is present or readable.
    pub fn default_seed() -> Self {
        Self {
            urgent: default_urgent(),
            promotional: default_promotional(),
            notification: default_notification(),
            critical: default_critical(),
        }
    }

    /// Load configuration from a TOML file.
    /// Falls back to `default_seed()` on error (logged, never fatal).
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        let cfg = match fs::read_to_string(path) {
            Ok(s) => match toml::from_str::<KeywordConfig>(&s) {
                Ok(cfg) => cfg,
                Err(e) => {
                    warn!(target: "triage", path = %path.display(), error = %e,
                          "invalid keywords file; using built-in seed");
                    Self::default_seed()
                }
            },
            Err(_) => Self::default_seed(),
        };
        cfg.normalized()
    }

    /// Resolve the config path from the environment and load it.
    pub fn from_env() -> Self {
        let path = std::env::var(ENV_KEYWORDS_PATH)
            .unwrap_or_else(|_| DEFAULT_KEYWORDS_PATH.to_string());
        Self::load_from_file(path)
    }

    /// Lowercase all phrases and drop empties so matching is a plain
    /// `contains` against lowercased input.
    fn normalized(mut self) -> Self {
        for list in [
            &mut self.urgent,
            &mut self.promotional,
            &mut self.notification,
            &mut self.critical,
        ] {
            for p in list.iter_mut() {
                *p = p.trim().to_lowercase();
            }
            list.retain(|p| !p.is_empty());
        }
        self
    }
}

/// True if any phrase occurs in `text`. Phrases are pre-lowercased; callers
/// pass lowercased text.
pub(crate) fn contains_any(text: &str, phrases: &[String]) -> bool {
    phrases.iter().any(|p| text.contains(p.as_str()))
}
