//! Arena-based HTML node tree.
//!
//! All nodes live in a contiguous `Vec<NodeData>` owned by the [`Document`]
//! and are referenced by [`NodeId`], a newtype over `NonZeroU32`. Navigation
//! links (parent, children, siblings) are plain ids, so the parent/child and
//! sibling/sibling cycles of a DOM never become ownership cycles: dropping
//! the `Document` frees everything, and detaching a node is a link rewrite.
//!
//! Two sibling chains are maintained per node: the full chain over all
//! children, and a filtered chain linking only Element children. Every
//! mutation keeps the two consistent.

mod serialize;

use std::num::NonZeroU32;

use crate::url_utils;

/// A typed index into the document's node arena.
///
/// Never zero, so `Option<NodeId>` is pointer-sized (niche optimization).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct NodeId(NonZeroU32);

impl NodeId {
    /// Creates a `NodeId` from a raw arena index.
    ///
    /// # Panics
    ///
    /// Panics if `index` is 0 (index 0 is the arena placeholder).
    #[allow(clippy::expect_used, clippy::cast_possible_truncation)]
    fn from_index(index: usize) -> Self {
        Self(NonZeroU32::new(index as u32).expect("NodeId index must be non-zero"))
    }

    fn as_index(self) -> usize {
        self.0.get() as usize
    }
}

/// An attribute on an element. Name casing is preserved as parsed; values
/// are stored fully decoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    /// Attribute name as written in the source.
    pub name: String,
    /// Decoded attribute value.
    pub value: String,
}

/// Element payload: names plus the ordered attribute map.
#[derive(Debug, Clone)]
pub struct ElementData {
    /// Uppercased, prefix-stripped tag name (`DIV`, `SVG`).
    pub tag_name: String,
    /// Lowercased, prefix-stripped tag name (`div`, `svg`).
    pub local_name: String,
    attributes: Vec<Attribute>,
}

/// What a node is, together with its payload.
#[derive(Debug, Clone)]
pub enum NodeKind {
    /// The document root. Exactly one per tree, never a child.
    Document,
    /// An element with names and attributes.
    Element(ElementData),
    /// A text run (decoded).
    Text(String),
    /// A comment (`<!-- ... -->` interior, undecoded).
    Comment(String),
}

/// A non-fatal problem recorded while parsing.
///
/// Parsing never fails a document over recoverable structure; issues are
/// collected here for callers that want diagnostics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseIssue {
    /// Human-readable description of the problem.
    pub message: String,
    /// Byte offset into the input where the problem was seen.
    pub position: usize,
}

/// Storage for a single node in the arena.
#[derive(Debug, Clone)]
struct NodeData {
    kind: NodeKind,
    parent: Option<NodeId>,
    first_child: Option<NodeId>,
    last_child: Option<NodeId>,
    prev_sibling: Option<NodeId>,
    next_sibling: Option<NodeId>,
    first_element_child: Option<NodeId>,
    last_element_child: Option<NodeId>,
    prev_element_sibling: Option<NodeId>,
    next_element_sibling: Option<NodeId>,
}

impl NodeData {
    fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            parent: None,
            first_child: None,
            last_child: None,
            prev_sibling: None,
            next_sibling: None,
            first_element_child: None,
            last_element_child: None,
            prev_element_sibling: None,
            next_element_sibling: None,
        }
    }
}

/// An HTML document: the node arena plus document-level state.
///
/// All tree operations go through `&Document` (navigation) or
/// `&mut Document` (mutation). Cloning the document clones the whole tree,
/// which is how the extraction pipeline snapshots state between retries.
#[derive(Debug, Clone)]
pub struct Document {
    /// Node arena. Index 0 is an unused placeholder so ids stay non-zero.
    nodes: Vec<NodeData>,
    root: NodeId,
    document_uri: String,
    base_uri: String,
    base_resolved: bool,
    issues: Vec<ParseIssue>,
}

impl Document {
    /// Creates an empty document whose `document_uri` and `base_uri` both
    /// start as `document_uri`.
    #[must_use]
    pub fn new(document_uri: &str) -> Self {
        let mut nodes = Vec::with_capacity(64);
        nodes.push(NodeData::new(NodeKind::Document)); // placeholder
        nodes.push(NodeData::new(NodeKind::Document));
        Self {
            nodes,
            root: NodeId::from_index(1),
            document_uri: document_uri.to_owned(),
            base_uri: document_uri.to_owned(),
            base_resolved: false,
            issues: Vec::new(),
        }
    }

    fn node(&self, id: NodeId) -> &NodeData {
        &self.nodes[id.as_index()]
    }

    fn node_mut(&mut self, id: NodeId) -> &mut NodeData {
        &mut self.nodes[id.as_index()]
    }

    /// The document root node.
    #[must_use]
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// URI the markup was loaded from.
    #[must_use]
    pub fn document_uri(&self) -> &str {
        &self.document_uri
    }

    /// Base URI for resolving relative references. Equals
    /// [`document_uri`](Self::document_uri) unless a `<base href>` was seen.
    #[must_use]
    pub fn base_uri(&self) -> &str {
        &self.base_uri
    }

    /// Applies a `<base href>`. Only the first call takes effect; later base
    /// elements are ignored, matching browser behavior.
    pub fn set_base_href(&mut self, href: &str) {
        if self.base_resolved {
            return;
        }
        if let Some(resolved) = url_utils::resolve(&self.document_uri, href) {
            self.base_uri = resolved;
            self.base_resolved = true;
        }
    }

    /// Problems recorded during parsing, in input order.
    #[must_use]
    pub fn issues(&self) -> &[ParseIssue] {
        &self.issues
    }

    pub(crate) fn push_issue(&mut self, message: impl Into<String>, position: usize) {
        self.issues.push(ParseIssue {
            message: message.into(),
            position,
        });
    }

    // --- Node creation ---

    fn create_node(&mut self, kind: NodeKind) -> NodeId {
        let id = NodeId::from_index(self.nodes.len());
        self.nodes.push(NodeData::new(kind));
        id
    }

    /// Creates a detached element. `name` may carry a namespace prefix
    /// (`a0:svg`), which is stripped from both stored names.
    pub fn create_element(&mut self, name: &str) -> NodeId {
        let local_part = name.rsplit(':').next().unwrap_or(name);
        self.create_node(NodeKind::Element(ElementData {
            tag_name: local_part.to_ascii_uppercase(),
            local_name: local_part.to_ascii_lowercase(),
            attributes: Vec::new(),
        }))
    }

    /// Creates a detached text node.
    pub fn create_text(&mut self, text: impl Into<String>) -> NodeId {
        self.create_node(NodeKind::Text(text.into()))
    }

    /// Creates a detached comment node.
    pub fn create_comment(&mut self, text: impl Into<String>) -> NodeId {
        self.create_node(NodeKind::Comment(text.into()))
    }

    // --- Node inspection ---

    /// The node's kind and payload.
    #[must_use]
    pub fn kind(&self, id: NodeId) -> &NodeKind {
        &self.node(id).kind
    }

    /// True for Element nodes.
    #[must_use]
    pub fn is_element(&self, id: NodeId) -> bool {
        matches!(self.node(id).kind, NodeKind::Element(_))
    }

    /// Uppercased tag name for elements, `None` otherwise.
    #[must_use]
    pub fn tag_name(&self, id: NodeId) -> Option<&str> {
        match &self.node(id).kind {
            NodeKind::Element(el) => Some(&el.tag_name),
            _ => None,
        }
    }

    /// Lowercased tag name for elements, `None` otherwise.
    #[must_use]
    pub fn local_name(&self, id: NodeId) -> Option<&str> {
        match &self.node(id).kind {
            NodeKind::Element(el) => Some(&el.local_name),
            _ => None,
        }
    }

    /// True when `id` is an element whose local name is `local`.
    #[must_use]
    pub fn is_tag(&self, id: NodeId, local: &str) -> bool {
        self.local_name(id) == Some(local)
    }

    /// Raw payload of Text and Comment nodes.
    #[must_use]
    pub fn text(&self, id: NodeId) -> Option<&str> {
        match &self.node(id).kind {
            NodeKind::Text(t) | NodeKind::Comment(t) => Some(t),
            _ => None,
        }
    }

    /// Replaces the payload of a Text node. No-op for other kinds.
    pub fn set_text(&mut self, id: NodeId, text: impl Into<String>) {
        if let NodeKind::Text(t) = &mut self.node_mut(id).kind {
            *t = text.into();
        }
    }

    // --- Attributes ---

    /// Attribute value by name (ASCII case-insensitive lookup).
    #[must_use]
    pub fn attribute(&self, id: NodeId, name: &str) -> Option<&str> {
        match &self.node(id).kind {
            NodeKind::Element(el) => el
                .attributes
                .iter()
                .find(|a| a.name.eq_ignore_ascii_case(name))
                .map(|a| a.value.as_str()),
            _ => None,
        }
    }

    /// True when the element carries the attribute.
    #[must_use]
    pub fn has_attribute(&self, id: NodeId, name: &str) -> bool {
        self.attribute(id, name).is_some()
    }

    /// Ordered attribute list of an element.
    #[must_use]
    pub fn attributes(&self, id: NodeId) -> &[Attribute] {
        match &self.node(id).kind {
            NodeKind::Element(el) => &el.attributes,
            _ => &[],
        }
    }

    /// Sets an attribute. Keys are unique (ASCII case-insensitive); a
    /// repeated name overwrites the value and keeps the first-seen casing.
    pub fn set_attribute(&mut self, id: NodeId, name: &str, value: impl Into<String>) {
        if let NodeKind::Element(el) = &mut self.node_mut(id).kind {
            if let Some(existing) = el
                .attributes
                .iter_mut()
                .find(|a| a.name.eq_ignore_ascii_case(name))
            {
                existing.value = value.into();
            } else {
                el.attributes.push(Attribute {
                    name: name.to_owned(),
                    value: value.into(),
                });
            }
        }
    }

    /// Removes an attribute if present.
    pub fn remove_attribute(&mut self, id: NodeId, name: &str) {
        if let NodeKind::Element(el) = &mut self.node_mut(id).kind {
            el.attributes.retain(|a| !a.name.eq_ignore_ascii_case(name));
        }
    }

    /// Drops every attribute except those named in `keep` (lowercase).
    pub fn retain_attributes(&mut self, id: NodeId, keep: &[&str]) {
        if let NodeKind::Element(el) = &mut self.node_mut(id).kind {
            el.attributes
                .retain(|a| keep.contains(&a.name.to_ascii_lowercase().as_str()));
        }
    }

    /// The `class` attribute, or `""`.
    #[must_use]
    pub fn class_name(&self, id: NodeId) -> &str {
        self.attribute(id, "class").unwrap_or("")
    }

    /// The `id` attribute, or `""`.
    #[must_use]
    pub fn element_id(&self, id: NodeId) -> &str {
        self.attribute(id, "id").unwrap_or("")
    }

    // --- Navigation ---

    /// Parent node, if attached.
    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).parent
    }

    /// First child in the full chain.
    #[must_use]
    pub fn first_child(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).first_child
    }

    /// Last child in the full chain.
    #[must_use]
    pub fn last_child(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).last_child
    }

    /// Previous sibling in the full chain.
    #[must_use]
    pub fn prev_sibling(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).prev_sibling
    }

    /// Next sibling in the full chain.
    #[must_use]
    pub fn next_sibling(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).next_sibling
    }

    /// First Element child (filtered chain).
    #[must_use]
    pub fn first_element_child(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).first_element_child
    }

    /// Last Element child (filtered chain).
    #[must_use]
    pub fn last_element_child(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).last_element_child
    }

    /// Previous Element sibling (filtered chain).
    #[must_use]
    pub fn prev_element_sibling(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).prev_element_sibling
    }

    /// Next Element sibling (filtered chain).
    #[must_use]
    pub fn next_element_sibling(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).next_element_sibling
    }

    /// Number of children in the full chain.
    #[must_use]
    pub fn child_count(&self, id: NodeId) -> usize {
        self.children(id).count()
    }

    /// Number of Element children.
    #[must_use]
    pub fn element_child_count(&self, id: NodeId) -> usize {
        self.element_children(id).count()
    }

    /// Iterates children in the full chain.
    #[must_use]
    pub fn children(&self, id: NodeId) -> Children<'_> {
        Children {
            doc: self,
            next: self.node(id).first_child,
        }
    }

    /// Iterates Element children via the filtered chain.
    #[must_use]
    pub fn element_children(&self, id: NodeId) -> ElementChildren<'_> {
        ElementChildren {
            doc: self,
            next: self.node(id).first_element_child,
        }
    }

    /// Iterates `id` and then its ancestors up to the root.
    #[must_use]
    pub fn ancestors(&self, id: NodeId) -> Ancestors<'_> {
        Ancestors {
            doc: self,
            next: Some(id),
        }
    }

    /// Depth-first iterator over `id` and all its descendants.
    #[must_use]
    pub fn descendants(&self, id: NodeId) -> Descendants<'_> {
        Descendants {
            doc: self,
            root: id,
            next: Some(id),
        }
    }

    /// True when `maybe_ancestor` is `id` itself or one of its ancestors.
    #[must_use]
    pub fn has_ancestor(&self, id: NodeId, maybe_ancestor: NodeId) -> bool {
        self.ancestors(id).any(|a| a == maybe_ancestor)
    }

    /// The element after `id` in document order: its first element child
    /// (unless `ignore_self_and_kids`), else the next element sibling,
    /// climbing ancestors until one has a next sibling.
    #[must_use]
    pub fn next_element_in_tree(&self, id: NodeId, ignore_self_and_kids: bool) -> Option<NodeId> {
        if !ignore_self_and_kids {
            if let Some(child) = self.first_element_child(id) {
                return Some(child);
            }
        }
        if let Some(sibling) = self.next_element_sibling(id) {
            return Some(sibling);
        }
        let mut current = self.parent(id);
        while let Some(node) = current {
            if let Some(sibling) = self.next_element_sibling(node) {
                return Some(sibling);
            }
            current = self.parent(node);
        }
        None
    }

    /// True when an ancestor within `max_depth` levels (0 = unlimited) has
    /// local name `local`. The node itself is not considered.
    #[must_use]
    pub fn has_ancestor_tag(&self, id: NodeId, local: &str, max_depth: usize) -> bool {
        let mut depth = 0;
        let mut current = self.parent(id);
        while let Some(node) = current {
            depth += 1;
            if max_depth != 0 && depth > max_depth {
                return false;
            }
            if self.is_tag(node, local) {
                return true;
            }
            current = self.parent(node);
        }
        false
    }

    /// The `<html>` element, or the first element child of the root.
    #[must_use]
    pub fn document_element(&self) -> Option<NodeId> {
        self.element_children(self.root)
            .find(|&el| self.is_tag(el, "html"))
            .or_else(|| self.first_element_child(self.root))
    }

    /// The first `<body>` element in document order, if any.
    #[must_use]
    pub fn body(&self) -> Option<NodeId> {
        self.descendants(self.root)
            .find(|&n| self.is_tag(n, "body"))
    }

    /// Counts Element nodes in the whole document.
    #[must_use]
    pub fn element_count(&self) -> usize {
        self.descendants(self.root)
            .filter(|&n| self.is_element(n))
            .count()
    }

    /// All elements strictly below `scope` whose local name is in `locals`,
    /// in document order. `scope` itself is never included.
    #[must_use]
    pub fn elements_by_tag(&self, scope: NodeId, locals: &[&str]) -> Vec<NodeId> {
        self.descendants(scope)
            .filter(|&n| {
                n != scope
                    && self
                        .local_name(n)
                        .is_some_and(|local| locals.contains(&local))
            })
            .collect()
    }

    /// The only element child of `id`, returned when its local name is
    /// `local` and no sibling text node carries real content.
    #[must_use]
    pub fn single_tagged_child(&self, id: NodeId, local: &str) -> Option<NodeId> {
        if self.element_child_count(id) != 1 {
            return None;
        }
        let only = self.first_element_child(id)?;
        if !self.is_tag(only, local) {
            return None;
        }
        let has_text = self
            .children(id)
            .any(|child| matches!(self.kind(child), NodeKind::Text(t) if !t.trim().is_empty()));
        (!has_text).then_some(only)
    }

    // --- Mutation ---

    /// Appends `child` as the last child of `parent`, detaching it from any
    /// previous parent first (DOM move semantics).
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        debug_assert!(
            !self.has_ancestor(parent, child),
            "appending a node under itself would create a cycle"
        );
        self.detach(child);
        self.node_mut(child).parent = Some(parent);

        if let Some(last) = self.node(parent).last_child {
            self.node_mut(last).next_sibling = Some(child);
            self.node_mut(child).prev_sibling = Some(last);
            self.node_mut(parent).last_child = Some(child);
        } else {
            self.node_mut(parent).first_child = Some(child);
            self.node_mut(parent).last_child = Some(child);
        }

        if self.is_element(child) {
            self.link_element_chain(parent, child);
        }
    }

    /// Inserts `new_child` before `reference` in `reference`'s parent,
    /// detaching it from any previous parent first. No-op when `reference`
    /// is detached or the two are the same node.
    pub fn insert_before(&mut self, reference: NodeId, new_child: NodeId) {
        if reference == new_child {
            return;
        }
        let Some(parent) = self.node(reference).parent else {
            return;
        };
        debug_assert!(
            !self.has_ancestor(parent, new_child),
            "inserting a node under itself would create a cycle"
        );
        self.detach(new_child);
        self.node_mut(new_child).parent = Some(parent);

        if let Some(prev) = self.node(reference).prev_sibling {
            self.node_mut(prev).next_sibling = Some(new_child);
            self.node_mut(new_child).prev_sibling = Some(prev);
        } else {
            self.node_mut(parent).first_child = Some(new_child);
        }
        self.node_mut(new_child).next_sibling = Some(reference);
        self.node_mut(reference).prev_sibling = Some(new_child);

        if self.is_element(new_child) {
            self.link_element_chain(parent, new_child);
        }
    }

    /// Removes `child` from `parent`. No-op if `child` is not a child of
    /// `parent`. The detached subtree stays intact and reusable.
    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) {
        if self.node(child).parent == Some(parent) {
            self.detach(child);
        }
    }

    /// Replaces `old` with `new` in `old`'s parent, rewiring both sibling
    /// chains. `old` ends up fully detached; its subtree stays intact.
    pub fn replace_child(&mut self, new: NodeId, old: NodeId) {
        if new == old || self.node(old).parent.is_none() {
            return;
        }
        self.insert_before(old, new);
        self.detach(old);
    }

    /// Detaches a node from its parent, severing parent and both sibling
    /// chains. The node's own subtree is untouched.
    pub fn detach(&mut self, id: NodeId) {
        let Some(parent) = self.node(id).parent else {
            return;
        };

        let prev = self.node(id).prev_sibling;
        let next = self.node(id).next_sibling;
        match prev {
            Some(p) => self.node_mut(p).next_sibling = next,
            None => self.node_mut(parent).first_child = next,
        }
        match next {
            Some(n) => self.node_mut(n).prev_sibling = prev,
            None => self.node_mut(parent).last_child = prev,
        }

        if self.is_element(id) {
            let prev_el = self.node(id).prev_element_sibling;
            let next_el = self.node(id).next_element_sibling;
            match prev_el {
                Some(p) => self.node_mut(p).next_element_sibling = next_el,
                None => self.node_mut(parent).first_element_child = next_el,
            }
            match next_el {
                Some(n) => self.node_mut(n).prev_element_sibling = prev_el,
                None => self.node_mut(parent).last_element_child = prev_el,
            }
            self.node_mut(id).prev_element_sibling = None;
            self.node_mut(id).next_element_sibling = None;
        }

        self.node_mut(id).parent = None;
        self.node_mut(id).prev_sibling = None;
        self.node_mut(id).next_sibling = None;
    }

    /// Moves every child of `from` to the end of `to`, preserving order.
    pub fn reparent_children(&mut self, from: NodeId, to: NodeId) {
        while let Some(child) = self.first_child(from) {
            self.append_child(to, child);
        }
    }

    /// Replaces `old` with a fresh element of tag `name`, moving all of
    /// `old`'s children and attributes onto the new element. Returns the
    /// new element's id.
    pub fn change_tag(&mut self, old: NodeId, name: &str) -> NodeId {
        let replacement = self.create_element(name);
        let attrs = self.attributes(old).to_vec();
        for attr in attrs {
            self.set_attribute(replacement, &attr.name, attr.value);
        }
        if self.parent(old).is_some() {
            self.replace_child(replacement, old);
        }
        self.reparent_children(old, replacement);
        replacement
    }

    /// Wires a just-attached element into the filtered chain. The full
    /// chain must already be linked; nearest element neighbors are found by
    /// walking it outward.
    fn link_element_chain(&mut self, parent: NodeId, id: NodeId) {
        let mut prev_el = None;
        let mut cursor = self.node(id).prev_sibling;
        while let Some(n) = cursor {
            if self.is_element(n) {
                prev_el = Some(n);
                break;
            }
            cursor = self.node(n).prev_sibling;
        }
        let mut next_el = None;
        let mut cursor = self.node(id).next_sibling;
        while let Some(n) = cursor {
            if self.is_element(n) {
                next_el = Some(n);
                break;
            }
            cursor = self.node(n).next_sibling;
        }

        self.node_mut(id).prev_element_sibling = prev_el;
        self.node_mut(id).next_element_sibling = next_el;
        match prev_el {
            Some(p) => self.node_mut(p).next_element_sibling = Some(id),
            None => self.node_mut(parent).first_element_child = Some(id),
        }
        match next_el {
            Some(n) => self.node_mut(n).prev_element_sibling = Some(id),
            None => self.node_mut(parent).last_element_child = Some(id),
        }
    }
}

// --- Iterators ---

/// Iterator over the children of a node (full chain).
pub struct Children<'a> {
    doc: &'a Document,
    next: Option<NodeId>,
}

impl Iterator for Children<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = self.doc.node(current).next_sibling;
        Some(current)
    }
}

/// Iterator over the Element children of a node (filtered chain).
pub struct ElementChildren<'a> {
    doc: &'a Document,
    next: Option<NodeId>,
}

impl Iterator for ElementChildren<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = self.doc.node(current).next_element_sibling;
        Some(current)
    }
}

/// Iterator over a node and its ancestors.
pub struct Ancestors<'a> {
    doc: &'a Document,
    next: Option<NodeId>,
}

impl Iterator for Ancestors<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = self.doc.node(current).parent;
        Some(current)
    }
}

/// Depth-first iterator over a node and all its descendants.
pub struct Descendants<'a> {
    doc: &'a Document,
    root: NodeId,
    next: Option<NodeId>,
}

impl Iterator for Descendants<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;

        if let Some(child) = self.doc.first_child(current) {
            self.next = Some(child);
            return Some(current);
        }
        if current == self.root {
            self.next = None;
            return Some(current);
        }
        if let Some(sibling) = self.doc.next_sibling(current) {
            self.next = Some(sibling);
            return Some(current);
        }

        let mut ancestor = self.doc.parent(current);
        while let Some(anc) = ancestor {
            if anc == self.root {
                break;
            }
            if let Some(sibling) = self.doc.next_sibling(anc) {
                self.next = Some(sibling);
                return Some(current);
            }
            ancestor = self.doc.parent(anc);
        }
        self.next = None;
        Some(current)
    }
}
