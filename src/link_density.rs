//! Link and text density measurements.
//!
//! Both ratios drive removal decisions: link-heavy sections are probably
//! navigation or related-article boxes, and sections whose text lives mostly
//! in headings carry no body prose. Measurements are read-only.

use crate::dom::{Document, NodeId};
use crate::patterns::HASH_URL;

/// Character count of `node`'s trimmed, whitespace-collapsed text.
#[must_use]
pub fn text_len(doc: &Document, node: NodeId) -> usize {
    doc.inner_text(node, true).chars().count()
}

/// Ratio of anchor text to total text under `node`, `0.0` when there is no
/// text. Anchors whose `href` only jumps within the page (`#...`) count at
/// a 0.3 coefficient so tables of contents do not read as link farms.
#[must_use]
pub fn link_density(doc: &Document, node: NodeId) -> f64 {
    let text_length = text_len(doc, node);
    if text_length == 0 {
        return 0.0;
    }

    let mut link_length = 0.0;
    for anchor in doc.elements_by_tag(node, &["a"]) {
        let coefficient = match doc.attribute(anchor, "href") {
            Some(href) if HASH_URL.is_match(href) => 0.3,
            _ => 1.0,
        };
        link_length += text_len(doc, anchor) as f64 * coefficient;
    }
    link_length / text_length as f64
}

/// Ratio of text inside descendants tagged with one of `locals` to all text
/// under `node`, `0.0` when there is no text.
#[must_use]
pub fn text_density(doc: &Document, node: NodeId, locals: &[&str]) -> f64 {
    let text_length = text_len(doc, node);
    if text_length == 0 {
        return 0.0;
    }

    let tagged_length: usize = doc
        .elements_by_tag(node, locals)
        .iter()
        .map(|&tagged| text_len(doc, tagged))
        .sum();
    tagged_length as f64 / text_length as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;

    fn first_div(doc: &Document) -> NodeId {
        doc.elements_by_tag(doc.root(), &["div"])[0]
    }

    #[test]
    fn test_no_links_zero_density() {
        let doc = parse("<div><p>Plain prose with no links at all.</p></div>", "about:blank");
        assert!((link_density(&doc, first_div(&doc))).abs() < f64::EPSILON);
    }

    #[test]
    fn test_all_links_full_density() {
        let doc = parse(
            "<div><a href=\"/x\">every single word is anchor text</a></div>",
            "about:blank",
        );
        assert!((link_density(&doc, first_div(&doc)) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_half_link_text() {
        // 20 chars of anchor text out of 40 total.
        let doc = parse(
            "<div><a href=\"/x\">aaaaaaaaaaaaaaaaaaaa</a>bbbbbbbbbbbbbbbbbbbb</div>",
            "about:blank",
        );
        let density = link_density(&doc, first_div(&doc));
        assert!((density - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_hash_links_count_reduced() {
        let doc = parse(
            "<div><a href=\"#section\">aaaaaaaaaaaaaaaaaaaa</a>bbbbbbbbbbbbbbbbbbbb</div>",
            "about:blank",
        );
        let density = link_density(&doc, first_div(&doc));
        assert!((density - 0.15).abs() < 1e-9);
    }

    #[test]
    fn test_empty_node_zero_density() {
        let doc = parse("<div></div>", "about:blank");
        assert!(link_density(&doc, first_div(&doc)).abs() < f64::EPSILON);
    }

    #[test]
    fn test_text_density_headings() {
        // 10 heading chars out of 20 total.
        let doc = parse(
            "<div><h2>aaaaaaaaaa</h2><p>bbbbbbbbbb</p></div>",
            "about:blank",
        );
        let density = text_density(&doc, first_div(&doc), &["h1", "h2", "h3", "h4", "h5", "h6"]);
        assert!((density - 0.5).abs() < 1e-9);
    }
}
