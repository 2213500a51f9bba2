//! Markup serialization and text extraction over the node arena.
//!
//! Serialization is the inverse of parser-side entity decoding: the five
//! reserved characters come back out in named-entity form, in text content
//! and attribute values alike.

use super::{Document, NodeId, NodeKind};
use crate::entities;
use crate::patterns;

impl Document {
    /// Serializes `id` and its subtree to markup.
    ///
    /// Elements are written with their lowercase names; void elements with
    /// no children close as `<br/>`. Comments are preserved verbatim.
    #[must_use]
    pub fn serialize_node(&self, id: NodeId) -> String {
        let mut out = String::new();
        self.write_node(id, &mut out);
        out
    }

    /// Serializes only the children of `id`, concatenated.
    #[must_use]
    pub fn inner_html(&self, id: NodeId) -> String {
        let mut out = String::new();
        for child in self.children(id) {
            self.write_node(child, &mut out);
        }
        out
    }

    fn write_node(&self, id: NodeId, out: &mut String) {
        match self.kind(id) {
            NodeKind::Document => {
                for child in self.children(id) {
                    self.write_node(child, out);
                }
            }
            NodeKind::Element(el) => {
                out.push('<');
                out.push_str(&el.local_name);
                for attr in self.attributes(id) {
                    out.push(' ');
                    out.push_str(&attr.name);
                    out.push_str("=\"");
                    out.push_str(&entities::escape(&attr.value));
                    out.push('"');
                }
                let void = patterns::VOID_ELEMENTS.contains(&el.local_name.as_str());
                if void && self.first_child(id).is_none() {
                    out.push_str("/>");
                    return;
                }
                out.push('>');
                for child in self.children(id) {
                    self.write_node(child, out);
                }
                out.push_str("</");
                out.push_str(&el.local_name);
                out.push('>');
            }
            NodeKind::Text(text) => out.push_str(&entities::escape(text)),
            NodeKind::Comment(text) => {
                out.push_str("<!--");
                out.push_str(text);
                out.push_str("-->");
            }
        }
    }

    /// Concatenated decoded text of `id` and its descendants. Comments
    /// contribute nothing.
    #[must_use]
    pub fn text_content(&self, id: NodeId) -> String {
        let mut out = String::new();
        self.collect_text(id, &mut out);
        out
    }

    fn collect_text(&self, id: NodeId, out: &mut String) {
        match self.kind(id) {
            NodeKind::Text(text) => out.push_str(text),
            NodeKind::Comment(_) => {}
            NodeKind::Document | NodeKind::Element(_) => {
                for child in self.children(id) {
                    self.collect_text(child, out);
                }
            }
        }
    }

    /// Trimmed text content, optionally with interior whitespace runs
    /// collapsed to single spaces.
    #[must_use]
    pub fn inner_text(&self, id: NodeId, normalize_spaces: bool) -> String {
        let text = self.text_content(id);
        let trimmed = text.trim();
        if normalize_spaces {
            patterns::NORMALIZE.replace_all(trimmed, " ").into_owned()
        } else {
            trimmed.to_owned()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture() -> (Document, NodeId) {
        let mut doc = Document::new("about:blank");
        let root = doc.root();
        let div = doc.create_element("div");
        doc.set_attribute(div, "id", "main");
        doc.append_child(root, div);
        (doc, div)
    }

    #[test]
    fn serializes_elements_with_attributes() {
        let (mut doc, div) = fixture();
        let text = doc.create_text("a < b");
        doc.append_child(div, text);
        assert_eq!(doc.serialize_node(div), r#"<div id="main">a &lt; b</div>"#);
    }

    #[test]
    fn void_elements_self_close_only_when_empty() {
        let (mut doc, div) = fixture();
        let br = doc.create_element("br");
        doc.append_child(div, br);
        let input = doc.create_element("input");
        doc.append_child(div, input);
        let p = doc.create_element("p");
        doc.append_child(input, p);
        assert_eq!(
            doc.serialize_node(div),
            r#"<div id="main"><br/><input><p></p></input></div>"#
        );
    }

    #[test]
    fn escapes_all_five_entities_in_text_and_attributes() {
        let (mut doc, div) = fixture();
        doc.set_attribute(div, "title", "\"quoted\" & 'single'");
        let text = doc.create_text("<&>\"'");
        doc.append_child(div, text);
        let html = doc.serialize_node(div);
        assert!(html.contains(r#"title="&quot;quoted&quot; &amp; &apos;single&apos;""#));
        assert!(html.contains("&lt;&amp;&gt;&quot;&apos;"));
    }

    #[test]
    fn comments_round_trip_verbatim() {
        let (mut doc, div) = fixture();
        let comment = doc.create_comment(" keep <this> ");
        doc.append_child(div, comment);
        assert!(doc.serialize_node(div).contains("<!-- keep <this> -->"));
        assert_eq!(doc.text_content(div), "");
    }

    #[test]
    fn inner_text_normalizes_whitespace() {
        let (mut doc, div) = fixture();
        let text = doc.create_text("  hello\n\n   world  ");
        doc.append_child(div, text);
        assert_eq!(doc.inner_text(div, true), "hello world");
        assert_eq!(doc.inner_text(div, false), "hello\n\n   world");
    }
}
