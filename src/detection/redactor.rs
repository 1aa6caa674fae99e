//! Placeholder redaction

use crate::domain::EntitySpan;

/// Replace each span's substring with a `[[LABEL]]` placeholder
///
/// Spans must be pairwise non-overlapping (the resolver's output).
/// Substitution runs in descending start order so earlier offsets stay
/// valid while the text length changes. Placeholders are not themselves
/// re-scanned.
pub fn redact(text: &str, spans: &[EntitySpan]) -> String {
    let mut ordered: Vec<&EntitySpan> = spans.iter().collect();
    ordered.sort_by(|a, b| b.start.cmp(&a.start));

    let mut redacted = text.to_string();
    for span in ordered {
        redacted.replace_range(span.start..span.end, &format!("[[{}]]", span.label));
    }

    redacted
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::EntityLabel;

    #[test]
    fn test_redact_two_spans() {
        let text = "Contact me at john@x.com or 9876543210";
        let spans = vec![
            EntitySpan::new("john@x.com", EntityLabel::Email, 14, 24),
            EntitySpan::new("9876543210", EntityLabel::Phone, 28, 38),
        ];
        assert_eq!(
            redact(text, &spans),
            "Contact me at [[EMAIL]] or [[PHONE]]"
        );
    }

    #[test]
    fn test_redact_no_spans_returns_original() {
        assert_eq!(redact("nothing here", &[]), "nothing here");
    }

    #[test]
    fn test_redact_span_at_text_boundaries() {
        let text = "john@x.com wrote back";
        let spans = vec![EntitySpan::new("john@x.com", EntityLabel::Email, 0, 10)];
        assert_eq!(redact(text, &spans), "[[EMAIL]] wrote back");

        let text = "reply to john@x.com";
        let spans = vec![EntitySpan::new("john@x.com", EntityLabel::Email, 9, 19)];
        assert_eq!(redact(text, &spans), "reply to [[EMAIL]]");
    }

    #[test]
    fn test_redact_adjacent_spans() {
        let text = "ab";
        let spans = vec![
            EntitySpan::new("a", EntityLabel::Person, 0, 1),
            EntitySpan::new("b", EntityLabel::Org, 1, 2),
        ];
        assert_eq!(redact(text, &spans), "[[PERSON]][[ORG]]");
    }

    #[test]
    fn test_redact_unordered_input() {
        let text = "a 9876543210 b john@x.com c";
        let spans = vec![
            EntitySpan::new("john@x.com", EntityLabel::Email, 15, 25),
            EntitySpan::new("9876543210", EntityLabel::Phone, 2, 12),
        ];
        assert_eq!(redact(text, &spans), "a [[PHONE]] b [[EMAIL]] c");
    }

    #[test]
    fn test_redact_preserves_other_labels() {
        let text = "met NORP folks";
        let spans = vec![EntitySpan::new(
            "NORP",
            EntityLabel::Other("NORP".to_string()),
            4,
            8,
        )];
        assert_eq!(redact(text, &spans), "met [[NORP]] folks");
    }
}
