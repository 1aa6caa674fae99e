//! Display-safe highlighting

use crate::domain::EntitySpan;

/// HTML-escape a string for safe display
///
/// Ampersand first, so already-escaped sequences are not double-escaped
/// out of order.
pub fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Render the original text with each span wrapped in a labeled `<mark>`
///
/// Literal gaps are HTML-escaped and the label appears both as visible
/// tooltip and machine-readable attribute. Spans must be pairwise
/// non-overlapping (the resolver's output); they are processed in
/// ascending start order. Zero spans yields the fully escaped original.
pub fn highlight(text: &str, spans: &[EntitySpan]) -> String {
    let mut ordered: Vec<&EntitySpan> = spans.iter().collect();
    ordered.sort_by_key(|s| s.start);

    let mut out = String::with_capacity(text.len());
    let mut last = 0;
    for span in ordered {
        out.push_str(&escape_html(&text[last..span.start]));
        out.push_str(&format!(
            "<mark title='{label}' data-label='{label}'>{}</mark>",
            escape_html(&span.text),
            label = span.label,
        ));
        last = span.end;
    }
    out.push_str(&escape_html(&text[last..]));

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::EntityLabel;

    #[test]
    fn test_escape_html_all_specials() {
        assert_eq!(
            escape_html(r#"5 < 6 & x > y "quote" 'tick'"#),
            "5 &lt; 6 &amp; x &gt; y &quot;quote&quot; &#39;tick&#39;"
        );
    }

    #[test]
    fn test_escape_ampersand_first() {
        assert_eq!(escape_html("&<"), "&amp;&lt;");
    }

    #[test]
    fn test_no_spans_escapes_everything() {
        assert_eq!(highlight("a < b", &[]), "a &lt; b");
    }

    #[test]
    fn test_single_span_with_gaps() {
        let text = "Contact me at john@x.com please";
        let spans = vec![EntitySpan::new("john@x.com", EntityLabel::Email, 14, 24)];
        assert_eq!(
            highlight(text, &spans),
            "Contact me at <mark title='EMAIL' data-label='EMAIL'>john@x.com</mark> please"
        );
    }

    #[test]
    fn test_span_text_is_escaped() {
        let text = "id <42> here";
        let spans = vec![EntitySpan::new(
            "<42>",
            EntityLabel::Other("TAG".to_string()),
            3,
            7,
        )];
        assert_eq!(
            highlight(text, &spans),
            "id <mark title='TAG' data-label='TAG'>&lt;42&gt;</mark> here"
        );
    }

    #[test]
    fn test_unordered_spans_render_in_text_order() {
        let text = "a@b.co and 9876543210";
        let spans = vec![
            EntitySpan::new("9876543210", EntityLabel::Phone, 11, 21),
            EntitySpan::new("a@b.co", EntityLabel::Email, 0, 6),
        ];
        assert_eq!(
            highlight(text, &spans),
            "<mark title='EMAIL' data-label='EMAIL'>a@b.co</mark> and \
             <mark title='PHONE' data-label='PHONE'>9876543210</mark>"
        );
    }

    #[test]
    fn test_trailing_gap_escaped() {
        let text = "a@b.co & co";
        let spans = vec![EntitySpan::new("a@b.co", EntityLabel::Email, 0, 6)];
        assert_eq!(
            highlight(text, &spans),
            "<mark title='EMAIL' data-label='EMAIL'>a@b.co</mark> &amp; co"
        );
    }

    #[test]
    fn test_stripping_marks_and_unescaping_restores_original() {
        // Literal `<` and `&` in the text get escaped, so the mark tags are
        // the only real tags in the output and stripping them is unambiguous.
        let text = "send <notes> to a@b.co & José at 10.0.0.1";
        let spans = vec![
            EntitySpan::new("a@b.co", EntityLabel::Email, 16, 22),
            EntitySpan::new("10.0.0.1", EntityLabel::IpAddress, 34, 42),
        ];

        let rendered = highlight(text, &spans);

        let tag = regex::Regex::new(r"</?mark[^>]*>").unwrap();
        let stripped = tag.replace_all(&rendered, "");
        let restored = stripped
            .replace("&#39;", "'")
            .replace("&quot;", "\"")
            .replace("&gt;", ">")
            .replace("&lt;", "<")
            .replace("&amp;", "&");

        assert_eq!(restored, text);
    }
}
