//! Lenient HTML parsing.
//!
//! A single forward scan over the input builds the node tree directly,
//! maintaining an explicit open-element stack. There is no tokenizer state
//! machine and no implied structure: the tree contains exactly the elements
//! the markup names, so `<p>hi</p>` parses to a document whose only child
//! is the `<p>`.
//!
//! Malformed markup degrades instead of failing: unknown close tags are
//! dropped, unbalanced close tags pop intervening elements, void elements
//! written with a separate close tag adopt the nodes parsed in between, and
//! end of input closes whatever is still open. Every recovery is recorded
//! as a [`ParseIssue`](crate::dom::ParseIssue) on the document.

use crate::dom::{Document, NodeId};
use crate::entities;
use crate::patterns::VOID_ELEMENTS;

/// Parses `html` into a [`Document`] rooted at `document_uri`.
///
/// Never fails; recoverable problems are collected on
/// [`Document::issues`].
#[must_use]
pub fn parse(html: &str, document_uri: &str) -> Document {
    Parser::new(html, document_uri).run()
}

struct Parser<'a> {
    html: &'a str,
    bytes: &'a [u8],
    pos: usize,
    doc: Document,
    /// Open elements, innermost last: (node, lowercased local name).
    stack: Vec<(NodeId, String)>,
}

impl<'a> Parser<'a> {
    fn new(html: &'a str, document_uri: &str) -> Self {
        Self {
            html,
            bytes: html.as_bytes(),
            pos: 0,
            doc: Document::new(document_uri),
            stack: Vec::new(),
        }
    }

    fn run(mut self) -> Document {
        while self.pos < self.bytes.len() {
            match self.find(b'<', self.pos) {
                Some(lt) => {
                    if lt > self.pos {
                        self.flush_text(self.pos, lt);
                    }
                    self.pos = lt;
                    self.dispatch_tag();
                }
                None => {
                    self.flush_text(self.pos, self.bytes.len());
                    break;
                }
            }
        }
        // Unclosed elements are implicitly closed in LIFO order; dropping
        // the stack is all that takes.
        self.doc
    }

    fn find(&self, byte: u8, from: usize) -> Option<usize> {
        self.bytes[from..]
            .iter()
            .position(|&b| b == byte)
            .map(|i| from + i)
    }

    fn find_str(&self, needle: &str, from: usize) -> Option<usize> {
        self.html.get(from..)?.find(needle).map(|i| from + i)
    }

    fn starts_with(&self, prefix: &[u8]) -> bool {
        self.bytes[self.pos..].starts_with(prefix)
    }

    fn current_parent(&self) -> NodeId {
        self.stack
            .last()
            .map_or_else(|| self.doc.root(), |entry| entry.0)
    }

    fn flush_text(&mut self, start: usize, end: usize) {
        let raw = &self.html[start..end];
        if raw.is_empty() {
            return;
        }
        let decoded = entities::decode(raw).into_owned();
        let parent = self.current_parent();
        let text = self.doc.create_text(decoded);
        self.doc.append_child(parent, text);
    }

    /// `self.pos` is at `<`. Routes to the right tag reader.
    fn dispatch_tag(&mut self) {
        if self.starts_with(b"<!--") {
            self.read_comment();
        } else if self.starts_with(b"<!") {
            // DOCTYPE or other declaration: discarded.
            self.pos = self.find(b'>', self.pos).map_or(self.bytes.len(), |g| g + 1);
        } else if self.starts_with(b"<?") {
            // Processing instruction: discarded.
            self.pos = match self.find_str("?>", self.pos) {
                Some(end) => end + 2,
                None => self.find(b'>', self.pos).map_or(self.bytes.len(), |g| g + 1),
            };
        } else if self.starts_with(b"</") {
            self.read_close_tag();
        } else if self
            .bytes
            .get(self.pos + 1)
            .is_some_and(u8::is_ascii_alphabetic)
        {
            self.read_open_tag();
        } else {
            // A lone '<' in running text; keep it as text up to the next tag.
            self.doc.push_issue("expected a tag name after '<'", self.pos);
            let next = self.find(b'<', self.pos + 1).unwrap_or(self.bytes.len());
            self.flush_text(self.pos, next);
            self.pos = next;
        }
    }

    fn read_comment(&mut self) {
        let content_start = self.pos + 4;
        let (content_end, resume) = match self.find_str("-->", content_start) {
            Some(end) => (end, end + 3),
            None => {
                self.doc.push_issue("unterminated comment", self.pos);
                (self.bytes.len(), self.bytes.len())
            }
        };
        let content = self.html[content_start..content_end].to_owned();
        let parent = self.current_parent();
        let comment = self.doc.create_comment(content);
        self.doc.append_child(parent, comment);
        self.pos = resume;
    }

    fn read_tag_name(&mut self) -> String {
        let start = self.pos;
        while self.pos < self.bytes.len() {
            let b = self.bytes[self.pos];
            if b.is_ascii_whitespace() || b == b'/' || b == b'>' {
                break;
            }
            self.pos += 1;
        }
        self.html[start..self.pos].to_owned()
    }

    fn skip_whitespace(&mut self) {
        while self
            .bytes
            .get(self.pos)
            .is_some_and(u8::is_ascii_whitespace)
        {
            self.pos += 1;
        }
    }

    fn read_open_tag(&mut self) {
        let tag_start = self.pos;
        self.pos += 1;
        let name = self.read_tag_name();
        let element = self.doc.create_element(&name);

        let mut self_closing = false;
        loop {
            self.skip_whitespace();
            match self.bytes.get(self.pos) {
                None => {
                    self.doc.push_issue("unterminated tag", tag_start);
                    break;
                }
                Some(b'>') => {
                    self.pos += 1;
                    break;
                }
                Some(b'/') if self.bytes.get(self.pos + 1) == Some(&b'>') => {
                    self_closing = true;
                    self.pos += 2;
                    break;
                }
                Some(b'/') => {
                    self.pos += 1;
                }
                Some(_) => self.read_attribute(element),
            }
        }

        let parent = self.current_parent();
        self.doc.append_child(parent, element);

        // There is exactly one effective <base href>; Document ignores
        // later ones.
        let local = self
            .doc
            .local_name(element)
            .map(str::to_owned)
            .unwrap_or_default();
        if local == "base" {
            if let Some(href) = self.doc.attribute(element, "href").map(str::to_owned) {
                self.doc.set_base_href(&href);
            }
        }

        if self_closing || VOID_ELEMENTS.contains(&local.as_str()) {
            return;
        }
        if local == "script" || local == "style" {
            self.read_raw_text(element, &local);
            return;
        }
        self.stack.push((element, local));
    }

    fn read_attribute(&mut self, element: NodeId) {
        let start = self.pos;
        while self.pos < self.bytes.len() {
            let b = self.bytes[self.pos];
            if b.is_ascii_whitespace() || b == b'=' || b == b'>' {
                break;
            }
            if b == b'/' && self.bytes.get(self.pos + 1) == Some(&b'>') {
                break;
            }
            self.pos += 1;
        }
        let name = self.html[start..self.pos].to_owned();
        if name.is_empty() {
            // Junk byte inside a tag; step over it so the loop advances.
            self.pos += 1;
            return;
        }

        self.skip_whitespace();
        let value = if self.bytes.get(self.pos) == Some(&b'=') {
            self.pos += 1;
            self.skip_whitespace();
            self.read_attribute_value()
        } else {
            String::new()
        };
        // Duplicate names within one tag: last write wins.
        self.doc.set_attribute(element, &name, value);
    }

    fn read_attribute_value(&mut self) -> String {
        match self.bytes.get(self.pos) {
            Some(&quote @ (b'"' | b'\'')) => {
                let start = self.pos + 1;
                match self.find(quote, start) {
                    Some(end) => {
                        self.pos = end + 1;
                        entities::decode(&self.html[start..end]).into_owned()
                    }
                    None => {
                        self.doc.push_issue("unterminated attribute value", self.pos);
                        let end = self.find(b'>', start).unwrap_or(self.bytes.len());
                        self.pos = end;
                        entities::decode(&self.html[start..end]).into_owned()
                    }
                }
            }
            _ => {
                let start = self.pos;
                while self.pos < self.bytes.len() {
                    let b = self.bytes[self.pos];
                    if b.is_ascii_whitespace() || b == b'>' {
                        break;
                    }
                    if b == b'/' && self.bytes.get(self.pos + 1) == Some(&b'>') {
                        break;
                    }
                    self.pos += 1;
                }
                entities::decode(&self.html[start..self.pos]).into_owned()
            }
        }
    }

    fn read_close_tag(&mut self) {
        let tag_start = self.pos;
        self.pos += 2;
        let name = self.read_tag_name();
        // Tolerate whitespace or junk before '>'.
        self.pos = self.find(b'>', self.pos).map_or(self.bytes.len(), |g| g + 1);

        let local_part = name.rsplit(':').next().unwrap_or(&name);
        let local = local_part.to_ascii_lowercase();
        if local.is_empty() {
            self.doc.push_issue("empty close tag", tag_start);
            return;
        }

        if let Some(index) = self.stack.iter().rposition(|(_, open)| *open == local) {
            if index + 1 != self.stack.len() {
                self.doc.push_issue(
                    format!("mismatched close tag </{local}> closed {} open element(s)",
                        self.stack.len() - index - 1),
                    tag_start,
                );
            }
            self.stack.truncate(index);
        } else if VOID_ELEMENTS.contains(&local.as_str()) {
            self.delayed_close(&local, tag_start);
        } else {
            self.doc
                .push_issue(format!("ignored stray close tag </{local}>"), tag_start);
        }
    }

    /// A close tag for a void element that was (correctly) never pushed.
    /// If the current parent recently produced that element, treat it as
    /// having been open all along: the siblings parsed since move inside.
    fn delayed_close(&mut self, local: &str, at: usize) {
        let parent = self.current_parent();
        let mut target = None;
        let mut cursor = self.doc.last_child(parent);
        while let Some(node) = cursor {
            if self.doc.local_name(node) == Some(local) {
                target = Some(node);
                break;
            }
            cursor = self.doc.prev_sibling(node);
        }

        let Some(target) = target else {
            self.doc
                .push_issue(format!("ignored stray close tag </{local}>"), at);
            return;
        };

        let trailing: Vec<NodeId> = {
            let mut nodes = Vec::new();
            let mut cursor = self.doc.next_sibling(target);
            while let Some(node) = cursor {
                nodes.push(node);
                cursor = self.doc.next_sibling(node);
            }
            nodes
        };
        for node in trailing {
            self.doc.append_child(target, node);
        }
        self.doc
            .push_issue(format!("recovered delayed close of <{local}>"), at);
    }

    /// Consumes `<script>`/`<style>` interiors as opaque text. Only the
    /// literal matching close tag ends the scan; `<!--...-->` and `<?...>`
    /// spans are skipped without contributing text, and every other `<` is
    /// literal content. Entities decode as text, never as markup.
    fn read_raw_text(&mut self, element: NodeId, local: &str) {
        let mut raw = String::new();
        loop {
            let Some(lt) = self.find(b'<', self.pos) else {
                raw.push_str(&self.html[self.pos..]);
                self.pos = self.bytes.len();
                break;
            };
            raw.push_str(&self.html[self.pos..lt]);
            self.pos = lt;

            if self.is_raw_close(lt, local) {
                self.pos = self.find(b'>', lt).map_or(self.bytes.len(), |g| g + 1);
                break;
            }
            if self.starts_with(b"<!--") {
                self.pos = match self.find_str("-->", lt + 4) {
                    Some(end) => end + 3,
                    None => self.bytes.len(),
                };
            } else if self.starts_with(b"<?") || self.starts_with(b"<!") {
                self.pos = self.find(b'>', lt + 2).map_or(self.bytes.len(), |g| g + 1);
            } else {
                raw.push('<');
                self.pos += 1;
            }
        }

        if !raw.is_empty() {
            let decoded = entities::decode(&raw).into_owned();
            let text = self.doc.create_text(decoded);
            self.doc.append_child(element, text);
        }
    }

    /// True when `lt` starts the literal close tag for `local`
    /// (`</local` followed by `>`, whitespace, or `/`).
    fn is_raw_close(&self, lt: usize, local: &str) -> bool {
        let name_start = lt + 2;
        let name_end = name_start + local.len();
        if !self.bytes[lt..].starts_with(b"</") || name_end > self.bytes.len() {
            return false;
        }
        if !self.bytes[name_start..name_end].eq_ignore_ascii_case(local.as_bytes()) {
            return false;
        }
        match self.bytes.get(name_end) {
            None | Some(b'>' | b'/') => true,
            Some(b) => b.is_ascii_whitespace(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::NodeKind;

    #[test]
    fn builds_exactly_the_named_structure() {
        let doc = parse("<html><body><p>hi</p></body></html>", "http://fakehost/");
        let root = doc.root();
        assert_eq!(doc.child_count(root), 1);
        let html = doc.first_child(root).unwrap();
        assert_eq!(doc.local_name(html), Some("html"));
        assert_eq!(doc.element_count(), 3);
        assert_eq!(doc.document_element(), Some(html));
    }

    #[test]
    fn script_interior_never_produces_elements() {
        let doc = parse(
            "<div id=\"foo\">With a <script>With &lt; fancy \" characters in it because</script> that is fun.</div>",
            "about:blank",
        );
        let div = doc.first_child(doc.root()).unwrap();
        let script = doc
            .descendants(div)
            .find(|&n| doc.is_tag(n, "script"))
            .unwrap();
        assert_eq!(doc.child_count(script), 1);
        assert_eq!(doc.element_child_count(script), 0);
        assert_eq!(
            doc.text_content(script),
            "With < fancy \" characters in it because"
        );
    }

    #[test]
    fn script_question_mark_spans_are_stripped() {
        let doc = parse("<script><?Silly test <img src=\"test\"></script>", "about:blank");
        let script = doc.first_child(doc.root()).unwrap();
        assert_eq!(doc.tag_name(script), Some("SCRIPT"));
        assert_eq!(doc.child_count(script), 0);
        assert_eq!(doc.text_content(script), "");
    }

    #[test]
    fn script_comment_spans_hide_close_tags() {
        let doc = parse(
            "<script><!--Silly test > <script src=\"foo.js\"></script>--></script>",
            "about:blank",
        );
        assert_eq!(doc.child_count(doc.root()), 1);
        let script = doc.first_child(doc.root()).unwrap();
        assert_eq!(doc.child_count(script), 0);
        assert_eq!(doc.text_content(script), "");
    }

    #[test]
    fn script_entities_decode_as_text_only() {
        let doc = parse(
            "<script>&lt;div>Hello, I'm not really in a &lt;/div></script>",
            "about:blank",
        );
        let script = doc.first_child(doc.root()).unwrap();
        assert_eq!(doc.child_count(script), 1);
        assert_eq!(
            doc.text_content(script),
            "<div>Hello, I'm not really in a </div>"
        );
    }

    #[test]
    fn script_partial_close_fragments_stay_text() {
        let doc = parse(
            "<script>const x = '&lt;script>Hi&lt;' + '/script>';</script>",
            "about:blank",
        );
        let script = doc.first_child(doc.root()).unwrap();
        assert_eq!(
            doc.text_content(script),
            "const x = '<script>Hi<' + '/script>';"
        );
    }

    #[test]
    fn tag_names_case_and_prefix_handling() {
        let doc = parse("<DIV><svG><clippath/></svG></DIV>", "about:blank");
        let div = doc.first_child(doc.root()).unwrap();
        assert_eq!(doc.tag_name(div), Some("DIV"));
        assert_eq!(doc.local_name(div), Some("div"));
        let svg = doc.first_child(div).unwrap();
        assert_eq!(doc.tag_name(svg), Some("SVG"));
        let clippath = doc.first_child(svg).unwrap();
        assert_eq!(doc.tag_name(clippath), Some("CLIPPATH"));
        assert_eq!(doc.local_name(clippath), Some("clippath"));
    }

    #[test]
    fn namespace_prefixes_are_stripped_everywhere() {
        let doc = parse(
            "<a0:html><a0:body><a0:DIV><a0:svG><a0:clippath/></a0:svG></a0:DIV></a0:body></a0:html>",
            "about:blank",
        );
        let html = doc.first_child(doc.root()).unwrap();
        assert_eq!(doc.local_name(html), Some("html"));
        assert_eq!(doc.document_element(), Some(html));
        let body = doc.first_child(html).unwrap();
        assert_eq!(doc.body(), Some(body));
        let div = doc.first_child(body).unwrap();
        assert_eq!(doc.tag_name(div), Some("DIV"));
    }

    #[test]
    fn delayed_close_adopts_intervening_nodes() {
        let doc = parse(
            "<div><input><p>I'm in an input</p></input></div>",
            "about:blank",
        );
        let div = doc.first_child(doc.root()).unwrap();
        assert_eq!(doc.local_name(div), Some("div"));
        assert_eq!(doc.child_count(div), 1);
        let input = doc.first_child(div).unwrap();
        assert_eq!(doc.local_name(input), Some("input"));
        assert_eq!(doc.child_count(input), 1);
        let p = doc.first_child(input).unwrap();
        assert_eq!(doc.local_name(p), Some("p"));
    }

    #[test]
    fn base_href_variants_resolve_against_document_uri() {
        let check = |base: &str, expected: &str| {
            let html =
                format!("<html><head><base href='{base}'></base></head><body/></html>");
            let doc = parse(&html, "http://fakehost/some/dir/");
            assert_eq!(doc.base_uri(), expected, "base: {base}");
        };
        check("relative/path", "http://fakehost/some/dir/relative/path");
        check("/path", "http://fakehost/path");
        check("http://absolute/", "http://absolute/");
        check("//absolute/path", "http://absolute/path");
    }

    #[test]
    fn attributes_parse_quoted_unquoted_and_duplicate() {
        let doc = parse(
            "<a class=\"someclass\" href='#' target=_blank href=\"/second\">x</a>",
            "about:blank",
        );
        let a = doc.first_child(doc.root()).unwrap();
        assert_eq!(doc.attribute(a, "class"), Some("someclass"));
        assert_eq!(doc.attribute(a, "target"), Some("_blank"));
        // Last write during the same open tag wins.
        assert_eq!(doc.attribute(a, "href"), Some("/second"));
        assert_eq!(doc.attributes(a).len(), 3);
    }

    #[test]
    fn entity_references_decode_in_text() {
        let doc = parse("<p>&#32;&#x20;</p>", "about:blank");
        let p = doc.first_child(doc.root()).unwrap();
        assert_eq!(doc.text_content(p), "  ");

        let doc = parse(
            "<p>Hello, everyone &amp; all their friends, &lt;this&gt; is a &quot; test with &apos; quotes.</p>",
            "about:blank",
        );
        let p = doc.first_child(doc.root()).unwrap();
        assert_eq!(
            doc.text_content(p),
            "Hello, everyone & all their friends, <this> is a \" test with ' quotes."
        );
    }

    #[test]
    fn comments_become_nodes_and_pis_are_discarded() {
        let doc = parse("<div><!-- note --><?php echo; ?>text</div>", "about:blank");
        let div = doc.first_child(doc.root()).unwrap();
        let kinds: Vec<_> = doc
            .children(div)
            .map(|c| match doc.kind(c) {
                NodeKind::Comment(_) => "comment",
                NodeKind::Text(_) => "text",
                _ => "other",
            })
            .collect();
        assert_eq!(kinds, vec!["comment", "text"]);
        assert_eq!(doc.text_content(div), "text");
    }

    #[test]
    fn unclosed_elements_close_implicitly_without_issue() {
        let doc = parse("<div><p>open ended", "about:blank");
        let div = doc.first_child(doc.root()).unwrap();
        let p = doc.first_child(div).unwrap();
        assert_eq!(doc.text_content(p), "open ended");
        assert!(doc.issues().is_empty());
    }

    #[test]
    fn stray_close_tags_are_ignored_with_issue() {
        let doc = parse("<div>a</span>b</div>", "about:blank");
        let div = doc.first_child(doc.root()).unwrap();
        assert_eq!(doc.text_content(div), "ab");
        assert_eq!(doc.issues().len(), 1);
        assert!(doc.issues()[0].message.contains("</span>"));
    }

    #[test]
    fn mismatched_close_pops_through_ancestors() {
        let doc = parse("<div><b>bold<i>both</div>after", "about:blank");
        let div = doc.first_child(doc.root()).unwrap();
        // </div> pops i and b on its way out.
        assert!(!doc.issues().is_empty());
        let b = doc.first_element_child(div).unwrap();
        assert_eq!(doc.local_name(b), Some("b"));
        let after = doc.last_child(doc.root()).unwrap();
        assert_eq!(doc.text(after), Some("after"));
    }

    #[test]
    fn doctype_is_discarded() {
        let doc = parse("<!DOCTYPE html><html><body/></html>", "about:blank");
        assert_eq!(doc.child_count(doc.root()), 1);
        let html = doc.first_child(doc.root()).unwrap();
        assert_eq!(doc.local_name(html), Some("html"));
    }

    #[test]
    fn lone_angle_bracket_stays_text() {
        let doc = parse("<p>a < b</p>", "about:blank");
        let p = doc.first_child(doc.root()).unwrap();
        assert_eq!(doc.text_content(p), "a < b");
        assert!(!doc.issues().is_empty());
    }
}
