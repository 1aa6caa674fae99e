//! Detection pipeline
//!
//! Composes the per-request detection stages: regex detection, context
//! classification, conflict resolution, redaction and highlighting. The
//! pipeline is synchronous and pure; NER spans come from the async
//! adapter and are passed in by the caller.

use super::{
    bank::PatternBank,
    classifier::{ContextClassifier, ContextPolicy},
    detector::RegexDetector,
    highlighter, merger, redactor,
};
use crate::domain::EntitySpan;
use std::sync::Arc;

/// Result of one detection pass over a prompt
#[derive(Debug, Clone)]
pub struct RedactionOutcome {
    /// Final merged spans, pairwise non-overlapping, ascending by start
    pub entities: Vec<EntitySpan>,
    /// Original text with each span replaced by its `[[LABEL]]` placeholder
    pub redacted_text: String,
    /// Original text with each span wrapped in a labeled `<mark>`
    pub highlighted_text: String,
}

impl RedactionOutcome {
    /// Whether any entity survived conflict resolution
    pub fn pii_detected(&self) -> bool {
        !self.entities.is_empty()
    }
}

/// Detection pipeline
///
/// Holds the immutable pattern bank plus the detector and classifier
/// built over it. Stateless with respect to requests: `run` borrows the
/// pipeline immutably, so one instance is shared across concurrent
/// requests via `Arc` without locking.
pub struct DetectionPipeline {
    bank: Arc<PatternBank>,
    detector: RegexDetector,
    classifier: ContextClassifier,
}

impl DetectionPipeline {
    /// Create a pipeline with the default context policy
    pub fn new(bank: Arc<PatternBank>) -> Self {
        let classifier = ContextClassifier::new(&bank);
        Self::with_classifier(bank, classifier)
    }

    /// Create a pipeline with a custom context policy
    pub fn with_policy(bank: Arc<PatternBank>, policy: ContextPolicy) -> Self {
        let classifier = ContextClassifier::with_policy(&bank, policy);
        Self::with_classifier(bank, classifier)
    }

    fn with_classifier(bank: Arc<PatternBank>, classifier: ContextClassifier) -> Self {
        let detector = RegexDetector::new(Arc::clone(&bank));
        Self {
            bank,
            detector,
            classifier,
        }
    }

    /// Run detection over `text` with externally supplied NER spans
    ///
    /// Candidate order is NER spans first, then regex candidates in bank
    /// order, then recovered suffix spans; the resolver's stable sort
    /// turns that order into the deterministic tie-breaker for equal
    /// (start, priority) pairs.
    pub fn run(&self, text: &str, ner_spans: Vec<EntitySpan>) -> RedactionOutcome {
        let mut candidates = ner_spans;
        candidates.extend(self.detector.detect(text));

        let classified = self.classifier.classify(candidates, text);
        let entities = merger::resolve_conflicts(classified, &self.bank);

        let redacted_text = redactor::redact(text, &entities);
        let highlighted_text = highlighter::highlight(text, &entities);

        RedactionOutcome {
            entities,
            redacted_text,
            highlighted_text,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::EntityLabel;

    fn pipeline() -> DetectionPipeline {
        DetectionPipeline::new(Arc::new(PatternBank::built_in().unwrap()))
    }

    #[test]
    fn test_email_and_phone_scenario() {
        let outcome = pipeline().run("Contact me at john@x.com or 9876543210", Vec::new());

        assert_eq!(outcome.entities.len(), 2);
        assert_eq!(outcome.entities[0].label, EntityLabel::Email);
        assert_eq!(outcome.entities[1].label, EntityLabel::Phone);
        assert_eq!(outcome.redacted_text, "Contact me at [[EMAIL]] or [[PHONE]]");
        assert!(outcome.pii_detected());
    }

    #[test]
    fn test_clean_text_detects_nothing() {
        let outcome = pipeline().run("The weather is lovely today", Vec::new());
        assert!(outcome.entities.is_empty());
        assert!(!outcome.pii_detected());
        assert_eq!(outcome.redacted_text, "The weather is lovely today");
        assert_eq!(outcome.highlighted_text, "The weather is lovely today");
    }

    #[test]
    fn test_ner_spans_join_the_candidate_set() {
        let text = "Alice paid via 192.168.0.1";
        let ner = vec![EntitySpan::new("Alice", EntityLabel::Person, 0, 5)];
        let outcome = pipeline().run(text, ner);

        assert_eq!(outcome.entities.len(), 2);
        assert_eq!(outcome.entities[0].label, EntityLabel::Person);
        assert_eq!(outcome.entities[1].label, EntityLabel::IpAddress);
        assert_eq!(outcome.redacted_text, "[[PERSON]] paid via [[IP_ADDRESS]]");
    }

    #[test]
    fn test_classifier_feeds_merger() {
        // The ORG span is reclassified to PERSON before resolution, so the
        // placeholder carries the refined label.
        let text = "Dr. Smith emailed a@b.co";
        let ner = vec![EntitySpan::new("Smith", EntityLabel::Org, 4, 9)];
        let outcome = pipeline().run(text, ner);

        assert_eq!(outcome.redacted_text, "Dr. [[PERSON]] emailed [[EMAIL]]");
    }
}
