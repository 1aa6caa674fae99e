//! Regex-based entity detection

use super::bank::PatternBank;
use crate::domain::{EntityLabel, EntitySpan};
use std::sync::Arc;

/// Regex-based entity detector
///
/// Applies every bank rule to the input text, producing one candidate span
/// per non-overlapping match, in bank order. Overlaps across rules (and
/// against NER output) are resolved later by the conflict resolver. Pure:
/// no matches yields an empty set, nothing else can fail.
pub struct RegexDetector {
    bank: Arc<PatternBank>,
}

impl RegexDetector {
    /// Create a detector over a shared pattern bank
    pub fn new(bank: Arc<PatternBank>) -> Self {
        Self { bank }
    }

    /// Detect candidate spans: primary bank pass plus suffix recovery
    pub fn detect(&self, text: &str) -> Vec<EntitySpan> {
        let mut spans = Vec::new();

        for rule in self.bank.rules() {
            for m in rule.regex.find_iter(text) {
                spans.push(EntitySpan::new(
                    m.as_str(),
                    rule.label.clone(),
                    m.start(),
                    m.end(),
                ));
            }
        }

        spans.extend(self.detect_trailing_suffix(text));
        spans
    }

    /// Secondary pass recovering the digits of "ending in 1234" as their
    /// own candidate. The primary pass already yields the full cue match;
    /// both enter conflict resolution, where the earlier-starting full
    /// match wins.
    fn detect_trailing_suffix(&self, text: &str) -> Vec<EntitySpan> {
        let rule = match self.bank.rule(&EntityLabel::CardSuffix) {
            Some(rule) => rule,
            None => return Vec::new(),
        };

        rule.regex
            .captures_iter(text)
            .filter_map(|caps| caps.get(1))
            .map(|m| EntitySpan::new(m.as_str(), EntityLabel::CardSuffix, m.start(), m.end()))
            .collect()
    }
}
