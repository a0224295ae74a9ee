//! Overlap-safe inline highlighting
//!
//! The renderer works on an explicit span list instead of progressively
//! mutating the text: escape first, collect every pattern match over the
//! escaped text as `(range, kind)` tuples, resolve overlaps into a flat
//! non-overlapping list, then emit the markup in a single pass.
//!
//! Overlap policy: matches are applied in catalog order, then pattern order
//! within a category; a later-applied match owns any contested region
//! ("last-applied wins visually"). This order is a documented presentation
//! default, localized in [`resolve_overlaps`].
//!
//! Round-trip guarantee: stripping every `<mark>` wrapper from the rendered
//! output reproduces the escaped input exactly.

use once_cell::sync::Lazy;
use regex::Regex;
use std::ops::Range;

use super::catalog::{catalog, SignalKind};

/// A single pattern match over the text
///
/// Ephemeral: recomputed on every classification pass, never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchSpan {
    /// Byte range into the scanned text (`end > start`)
    pub range: Range<usize>,
    pub kind: SignalKind,
}

/// Neutralize markup-significant characters before any match wrapping
pub fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Collect every pattern match in application order
/// (catalog order, then pattern order within a category)
pub fn match_spans(text: &str) -> Vec<MatchSpan> {
    let mut spans = Vec::new();

    for category in catalog() {
        for pattern in &category.patterns {
            for m in pattern.find_iter(text) {
                if m.end() > m.start() {
                    spans.push(MatchSpan {
                        range: m.start()..m.end(),
                        kind: category.kind,
                    });
                }
            }
        }
    }

    spans
}

/// Resolve overlapping matches into a flat, sorted, non-overlapping list
///
/// Spans are painted over the text in application order, so a later span
/// owns any bytes it shares with an earlier one; the non-contested remainder
/// of the earlier span survives as its own piece.
pub fn resolve_overlaps(spans: &[MatchSpan], text_len: usize) -> Vec<MatchSpan> {
    if spans.is_empty() || text_len == 0 {
        return Vec::new();
    }

    // Byte-level ownership map, indexed by application order
    let mut owner: Vec<Option<usize>> = vec![None; text_len];
    for (idx, span) in spans.iter().enumerate() {
        let end = span.range.end.min(text_len);
        let start = span.range.start.min(end);
        for slot in &mut owner[start..end] {
            *slot = Some(idx);
        }
    }

    let mut resolved = Vec::new();
    let mut cursor = 0;
    while cursor < text_len {
        let Some(idx) = owner[cursor] else {
            cursor += 1;
            continue;
        };
        let start = cursor;
        while cursor < text_len && owner[cursor] == Some(idx) {
            cursor += 1;
        }
        resolved.push(MatchSpan {
            range: start..cursor,
            kind: spans[idx].kind,
        });
    }

    resolved
}

/// Resolved spans over raw (unescaped) text, for surfaces that style spans
/// directly instead of embedding markup
pub fn resolved_spans(text: &str) -> Vec<MatchSpan> {
    resolve_overlaps(&match_spans(text), text.len())
}

/// Render text with every matched span wrapped for visual emphasis
///
/// The input is escaped before matching, so matched substrings cannot inject
/// structure. Empty text renders empty; text with no matches renders as the
/// escaped input unchanged.
pub fn render(text: &str) -> String {
    let escaped = escape(text);
    let spans = resolve_overlaps(&match_spans(&escaped), escaped.len());
    if spans.is_empty() {
        return escaped;
    }

    let mut out = String::with_capacity(escaped.len() + spans.len() * 32);
    let mut last_end = 0;
    for span in &spans {
        if span.range.start > last_end {
            out.push_str(&escaped[last_end..span.range.start]);
        }
        out.push_str("<mark class=\"");
        out.push_str(span.kind.category().highlight_class);
        out.push_str("\">");
        out.push_str(&escaped[span.range.clone()]);
        out.push_str("</mark>");
        last_end = span.range.end;
    }
    if last_end < escaped.len() {
        out.push_str(&escaped[last_end..]);
    }

    out
}

static MARK_TAG: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"</?mark[^>]*>").expect("valid mark tag regex"));

/// Remove every emphasis wrapper, recovering the escaped text
///
/// Safe because `escape` leaves no raw `<` in the text, so the only angle
/// brackets in rendered output belong to inserted wrappers.
pub fn strip_marks(rendered: &str) -> String {
    MARK_TAG.replace_all(rendered, "").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_escape_neutralizes_markup() {
        assert_eq!(escape(r#"<b> & "x""#), "&lt;b&gt; &amp; &quot;x&quot;");
    }

    #[test]
    fn test_empty_text_renders_empty() {
        assert_eq!(render(""), "");
    }

    #[test]
    fn test_no_match_renders_escaped_input() {
        let text = "қалың қалай <дос>";
        assert_eq!(render(text), escape(text));
    }

    #[test]
    fn test_match_is_wrapped() {
        let rendered = render("срочно переведи");
        assert!(rendered.contains(r#"<mark class="hl-urgency">срочно</mark>"#));
    }

    #[test]
    fn test_injection_attempt_stays_inert() {
        let rendered = render("<mark>ақша</mark>");
        assert!(rendered.starts_with("&lt;mark&gt;"));
        assert!(rendered.contains(r#"<mark class="hl-money">ақша</mark>"#));
    }

    #[test]
    fn test_resolve_partial_overlap_later_wins() {
        let spans = vec![
            MatchSpan {
                range: 0..10,
                kind: SignalKind::Urgency,
            },
            MatchSpan {
                range: 5..15,
                kind: SignalKind::Money,
            },
        ];
        let resolved = resolve_overlaps(&spans, 20);
        assert_eq!(
            resolved,
            vec![
                MatchSpan {
                    range: 0..5,
                    kind: SignalKind::Urgency
                },
                MatchSpan {
                    range: 5..15,
                    kind: SignalKind::Money
                },
            ]
        );
    }

    #[test]
    fn test_resolve_containment_splits_outer() {
        let spans = vec![
            MatchSpan {
                range: 0..12,
                kind: SignalKind::Secrecy,
            },
            MatchSpan {
                range: 4..8,
                kind: SignalKind::Code,
            },
        ];
        let resolved = resolve_overlaps(&spans, 12);
        assert_eq!(
            resolved,
            vec![
                MatchSpan {
                    range: 0..4,
                    kind: SignalKind::Secrecy
                },
                MatchSpan {
                    range: 4..8,
                    kind: SignalKind::Code
                },
                MatchSpan {
                    range: 8..12,
                    kind: SignalKind::Secrecy
                },
            ]
        );
    }

    #[test]
    fn test_resolved_spans_are_sorted_and_disjoint() {
        let spans = resolved_spans("Дереу ақша аудар, вот ссылка и код");
        for pair in spans.windows(2) {
            assert!(pair[0].range.end <= pair[1].range.start);
        }
        assert!(spans.iter().any(|s| s.kind == SignalKind::Urgency));
        assert!(spans.iter().any(|s| s.kind == SignalKind::Money));
        assert!(spans.iter().any(|s| s.kind == SignalKind::Code));
    }

    #[test]
    fn test_round_trip_on_product_fixture() {
        let text = r#"Срочно аудар ақша, никому не говори, код "1234""#;
        assert_eq!(strip_marks(&render(text)), escape(text));
    }

    proptest! {
        #[test]
        fn prop_strip_marks_round_trips(text in "\\PC{0,200}") {
            prop_assert_eq!(strip_marks(&render(&text)), escape(&text));
        }

        #[test]
        fn prop_render_never_panics(text in any::<String>()) {
            let _ = render(&text);
        }
    }
}
