//! Context-sensitive label refinement

use super::bank::PatternBank;
use crate::domain::{EntityLabel, EntitySpan};
use regex::Regex;

/// Replaceable context policy for the classifier
///
/// Window sizes are measured in characters, not bytes, and clamp at the
/// start of text. Swapping keyword lists or window sizes (e.g. for another
/// locale) must not touch the conflict resolver.
#[derive(Debug, Clone)]
pub struct ContextPolicy {
    /// Honorific pattern matched against the end of the preceding window
    pub honorific: Regex,
    /// Characters of context inspected before an ORG span
    pub honorific_window: usize,
    /// Lowercase cue substrings that legitimize a bank-account match
    pub account_cues: Vec<String>,
    /// Characters of context inspected before a bank-account span
    pub cue_window: usize,
}

impl Default for ContextPolicy {
    fn default() -> Self {
        Self {
            honorific: Regex::new(r"(?i)\b(?:dr|mr|mrs|ms)\.?\s*$")
                .expect("Failed to compile default honorific pattern"),
            honorific_window: 5,
            account_cues: ["account", "a/c", "acct", "acc", "bank"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            cue_window: 20,
        }
    }
}

/// Context classifier
///
/// Refines raw candidate labels using bounded local context, in three
/// rules applied in order:
///
/// 1. an `ORG` span preceded by an honorific becomes `PERSON`;
/// 2. a `BANK_ACCOUNT` span of exactly 10 characters whose text fully
///    matches the bank's PHONE rule becomes `PHONE`;
/// 3. a span still labeled `BANK_ACCOUNT` with no account cue in the
///    preceding window is dropped.
///
/// Rules are independent per span and never change offsets, so a second
/// pass over already-classified spans changes nothing.
pub struct ContextClassifier {
    policy: ContextPolicy,
    // Anchored form of the bank's PHONE rule; absent when the bank has no
    // such rule, which leaves rule 2 inert.
    anchored_phone: Option<Regex>,
}

impl ContextClassifier {
    /// Create a classifier with the default policy
    pub fn new(bank: &PatternBank) -> Self {
        Self::with_policy(bank, ContextPolicy::default())
    }

    /// Create a classifier with a custom policy
    pub fn with_policy(bank: &PatternBank, policy: ContextPolicy) -> Self {
        let anchored_phone = bank
            .rule(&EntityLabel::Phone)
            .and_then(|rule| Regex::new(&format!("^(?:{})$", rule.regex.as_str())).ok());

        Self {
            policy,
            anchored_phone,
        }
    }

    /// Apply the classification rules to a candidate set
    pub fn classify(&self, mut spans: Vec<EntitySpan>, text: &str) -> Vec<EntitySpan> {
        for span in spans.iter_mut() {
            if span.label == EntityLabel::Org && self.has_honorific_prefix(text, span.start) {
                span.label = EntityLabel::Person;
            }
        }

        for span in spans.iter_mut() {
            if span.label == EntityLabel::BankAccount
                && span.text.chars().count() == 10
                && self.is_phone_shaped(&span.text)
            {
                span.label = EntityLabel::Phone;
            }
        }

        spans.retain(|span| {
            span.label != EntityLabel::BankAccount || self.has_account_cue(text, span.start)
        });

        spans
    }

    fn has_honorific_prefix(&self, text: &str, start: usize) -> bool {
        let window = window_before(text, start, self.policy.honorific_window);
        self.policy.honorific.is_match(window)
    }

    fn has_account_cue(&self, text: &str, start: usize) -> bool {
        let window = window_before(text, start, self.policy.cue_window).to_lowercase();
        self.policy
            .account_cues
            .iter()
            .any(|cue| window.contains(cue.as_str()))
    }

    fn is_phone_shaped(&self, text: &str) -> bool {
        self.anchored_phone
            .as_ref()
            .is_some_and(|rx| rx.is_match(text))
    }
}

/// The last `chars` characters before byte offset `start`, clamped at the
/// beginning of text. `start` must lie on a character boundary.
fn window_before(text: &str, start: usize, chars: usize) -> &str {
    let head = &text[..start];
    if chars == 0 {
        return "";
    }
    let begin = head
        .char_indices()
        .rev()
        .nth(chars - 1)
        .map_or(0, |(i, _)| i);
    &head[begin..]
}
