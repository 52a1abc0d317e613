//! Sender frequency counter: one pass over the batch, exact-string keys.

use crate::email::EmailRecord;
use std::collections::HashMap;

/// Occurrences of each sender within a single batch. Built before scoring so
/// every email sees the same final snapshot; discarded with the batch.
pub type SenderFrequencyMap = HashMap<String, usize>;

/// Count sender occurrences across the whole batch. Empty batch → empty map.
pub fn sender_frequencies(batch: &[EmailRecord]) -> SenderFrequencyMap {
    let mut map = SenderFrequencyMap::with_capacity(batch.len());
    for record in batch {
        *map.entry(record.sender.clone()).or_insert(0) += 1;
    }
    map
}
