//! Deduplicated reporting of unsupported sentence types

use std::collections::HashSet;
use tracing::{debug, info};

/// Remembers which unsupported sentence types have already been reported
#[derive(Debug, Clone, Default)]
pub struct UnknownSentenceLog {
    seen: HashSet<String>,
}

impl UnknownSentenceLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Report a sentence type; returns true the first time the type is seen.
    pub fn observe(&mut self, talker: &str, sentence_type: &str) -> bool {
        if self.seen.insert(sentence_type.to_string()) {
            info!(
                sentence_type,
                talker, "Received unknown NMEA message type, only logging once"
            );
            true
        } else {
            debug!(sentence_type, talker, "Received unknown NMEA message type, ignoring");
            false
        }
    }

    pub fn contains(&self, sentence_type: &str) -> bool {
        self.seen.contains(sentence_type)
    }

    pub fn len(&self) -> usize {
        self.seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}
