//! Cheap "is it worth extracting" pre-check.
//!
//! Shares the keyword tables and tree-walking primitives with the scoring
//! engine but mutates nothing: a single walk over paragraph-shaped nodes,
//! summing `sqrt(text_len - min_content_length)` for every visible node
//! that clears the length bar, with an early exit once the sum passes
//! `min_score`.

use crate::dom::{Document, NodeId};
use crate::options::{ReaderableOptions, VisibilityCheckerFn};
use crate::patterns::{MAYBE_CANDIDATE, UNLIKELY_CANDIDATES};

/// Attribute-based visibility guess: inline `display:none` or
/// `visibility:hidden`, the `hidden` attribute, and `aria-hidden="true"`
/// all hide a node. Math fallback images stay visible despite
/// `aria-hidden` so formula-heavy pages keep their content.
pub(crate) fn is_probably_visible(doc: &Document, node: NodeId) -> bool {
    if let Some(style) = doc.attribute(node, "style") {
        if style_declares(style, "display", "none") || style_declares(style, "visibility", "hidden")
        {
            return false;
        }
    }
    if doc.has_attribute(node, "hidden") {
        return false;
    }
    if doc.attribute(node, "aria-hidden") == Some("true")
        && !doc.class_name(node).contains("fallback-image")
    {
        return false;
    }
    true
}

fn style_declares(style: &str, property: &str, value: &str) -> bool {
    style.split(';').any(|declaration| {
        let mut parts = declaration.splitn(2, ':');
        match (parts.next(), parts.next()) {
            (Some(name), Some(val)) => {
                name.trim().eq_ignore_ascii_case(property) && val.trim().eq_ignore_ascii_case(value)
            }
            _ => false,
        }
    })
}

/// Decides whether `doc` looks like it carries enough prose to be worth a
/// full extraction pass.
#[must_use]
pub fn is_probably_readerable(doc: &Document, options: &ReaderableOptions) -> bool {
    let mut score = 0.0_f64;

    for node in candidate_nodes(doc) {
        let visible = match &options.visibility_checker {
            Some(checker) => checker(doc, node),
            None => is_probably_visible(doc, node),
        };
        if !visible {
            continue;
        }

        let match_string = format!("{} {}", doc.class_name(node), doc.element_id(node));
        if UNLIKELY_CANDIDATES.is_match(&match_string) && !MAYBE_CANDIDATE.is_match(&match_string)
        {
            continue;
        }

        // List items hold navigation and metadata more often than prose.
        if doc.is_tag(node, "p") && doc.has_ancestor_tag(node, "li", 0) {
            continue;
        }

        let length = doc.text_content(node).trim().chars().count();
        if length < options.min_content_length {
            continue;
        }

        score += ((length - options.min_content_length) as f64).sqrt();
        if score > options.min_score {
            return true;
        }
    }
    false
}

/// Same check with a bare visibility predicate in place of the options
/// record.
#[must_use]
pub fn is_probably_readerable_with(doc: &Document, checker: VisibilityCheckerFn) -> bool {
    is_probably_readerable(doc, &ReaderableOptions::with_visibility_checker(checker))
}

/// Candidate set: every `p`, `pre`, and `article`, plus any `div` with a
/// direct `br` child (prose broken by line breaks instead of paragraph
/// tags). A matched `article` counts as one candidate covering its whole
/// subtree; the walk does not descend into it.
fn candidate_nodes(doc: &Document) -> Vec<NodeId> {
    let mut nodes = Vec::new();
    let mut cursor = doc.document_element();

    while let Some(node) = cursor {
        let local = doc.local_name(node).unwrap_or("");
        if local == "article" {
            nodes.push(node);
            cursor = doc.next_element_in_tree(node, true);
            continue;
        }
        if local == "p" || local == "pre" {
            nodes.push(node);
        } else if local == "div"
            && doc
                .element_children(node)
                .any(|child| doc.is_tag(child, "br"))
        {
            nodes.push(node);
        }
        cursor = doc.next_element_in_tree(node, false);
    }
    nodes
}
