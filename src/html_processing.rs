//! Cleanup passes over parsed trees.
//!
//! Document-level passes run before scoring: noscript image recovery,
//! script and style removal, `<br>` run normalization and redundant
//! wrapper unwrapping. Article-level passes run on the selected subtree:
//! presentational attribute stripping, conditional boilerplate removal,
//! relative URI rewriting and class stripping.

use std::collections::HashSet;

use crate::dom::{Document, NodeId, NodeKind};
use crate::link_density::{link_density, text_density};
use crate::options::ExtractionOptions;
use crate::patterns::{
    AD_WORDS, B64_DATA_URL, DEFAULT_CLASSES_TO_PRESERVE, DEPRECATED_SIZE_ATTRIBUTE_ELEMS,
    EMBED_ELEMENTS, IMAGE_EXTENSION, LAZY_SRCSET_VALUE, LAZY_SRC_VALUE,
    LOADING_WORDS, PRESENTATIONAL_ATTRIBUTES, SHARE_ELEMENTS, VIDEOS,
};
use crate::scoring::{
    class_weight, is_element_without_content, is_phrasing_content, remove_and_get_next,
    trim_trailing_whitespace, ScoreFlags,
};
use crate::url_utils;

/// Share widgets shorter than this many characters of text are chrome,
/// not quoted content, and get removed from the article children.
const SHARE_ELEMENT_THRESHOLD: usize = 500;

/// Base64 `src` payloads shorter than this are placeholder images.
const B64_PLACEHOLDER_MAX_LEN: usize = 133;

// --- Document preparation ---

/// Drops every `script` and `noscript` element in the document.
pub(crate) fn remove_scripts(doc: &mut Document) {
    for node in doc.elements_by_tag(doc.root(), &["script", "noscript"]) {
        doc.detach(node);
    }
}

/// Promotes images hidden behind `<noscript>` fallbacks.
///
/// Placeholder `<img>` elements without a usable source are dropped first
/// so they cannot shadow the real image. Then every `<noscript>` that
/// holds a single image and directly follows a single-image sibling
/// replaces that sibling with its own content, carrying over any
/// source-bearing attributes the placeholder had.
pub(crate) fn unwrap_noscript_images(doc: &mut Document) {
    for img in doc.elements_by_tag(doc.root(), &["img"]) {
        let has_source = doc.attributes(img).iter().any(|attr| {
            matches!(
                attr.name.as_str(),
                "src" | "srcset" | "data-src" | "data-srcset"
            ) || IMAGE_EXTENSION.is_match(&attr.value)
        });
        if !has_source {
            doc.detach(img);
        }
    }

    for noscript in doc.elements_by_tag(doc.root(), &["noscript"]) {
        if !is_single_image(doc, noscript) {
            continue;
        }
        let Some(prev) = doc.prev_element_sibling(noscript) else {
            continue;
        };
        if !is_single_image(doc, prev) {
            continue;
        }
        let (Some(prev_img), Some(new_img)) = (first_image(doc, prev), first_image(doc, noscript))
        else {
            continue;
        };

        let carried: Vec<(String, String)> = doc
            .attributes(prev_img)
            .iter()
            .map(|attr| (attr.name.clone(), attr.value.clone()))
            .collect();
        for (name, value) in carried {
            if value.is_empty() {
                continue;
            }
            if name != "src" && name != "srcset" && !IMAGE_EXTENSION.is_match(&value) {
                continue;
            }
            if doc.attribute(new_img, &name) == Some(value.as_str()) {
                continue;
            }
            // Keep both values when they disagree; the placeholder's copy
            // moves aside under a data- prefix.
            let target = if doc.has_attribute(new_img, &name) {
                format!("data-old-{name}")
            } else {
                name
            };
            doc.set_attribute(new_img, &target, value);
        }

        if let Some(content) = doc.first_element_child(noscript) {
            doc.replace_child(content, prev);
        }
    }
}

/// True when `node` is an `<img>`, or wraps exactly one element and no
/// text on the way down to one.
fn is_single_image(doc: &Document, node: NodeId) -> bool {
    if doc.is_tag(node, "img") {
        return true;
    }
    if doc.element_child_count(node) != 1 || !doc.text_content(node).trim().is_empty() {
        return false;
    }
    doc.first_element_child(node)
        .is_some_and(|child| is_single_image(doc, child))
}

fn first_image(doc: &Document, node: NodeId) -> Option<NodeId> {
    if doc.is_tag(node, "img") {
        return Some(node);
    }
    doc.elements_by_tag(node, &["img"]).into_iter().next()
}

/// Normalizes the document before scoring: styles go, `<br>` runs become
/// paragraphs, and redundant single-child wrappers collapse.
pub(crate) fn prep_document(doc: &mut Document) {
    for style in doc.elements_by_tag(doc.root(), &["style"]) {
        doc.detach(style);
    }

    if let Some(scope) = doc.body().or_else(|| doc.document_element()) {
        replace_brs(doc, scope);
    }

    unwrap_redundant_wrappers(doc);
}

/// Replaces two or more consecutive `<br>` elements with a `<p>` that
/// absorbs the phrasing content following them, so that
/// `foo<br>bar<br> <br><br>abc` ends up as `foo<br>bar<p>abc</p>`.
fn replace_brs(doc: &mut Document, scope: NodeId) {
    for br in doc.elements_by_tag(scope, &["br"]) {
        if doc.parent(br).is_none() {
            continue;
        }

        // Every <br> in the run after the first is dropped; whitespace
        // between them does not interrupt the run.
        let mut next = doc.next_sibling(br);
        let mut replaced = false;
        while let Some(candidate) = next_skipping_whitespace(doc, next) {
            if !doc.is_tag(candidate, "br") {
                break;
            }
            replaced = true;
            next = doc.next_sibling(candidate);
            doc.detach(candidate);
        }
        if !replaced {
            continue;
        }

        let paragraph = doc.create_element("p");
        doc.replace_child(paragraph, br);

        let mut cursor = doc.next_sibling(paragraph);
        while let Some(node) = cursor {
            // A second run of <br><br> ends the paragraph.
            if doc.is_tag(node, "br") {
                let after = next_skipping_whitespace(doc, doc.next_sibling(node));
                if after.is_some_and(|a| doc.is_tag(a, "br")) {
                    break;
                }
            }
            if !is_phrasing_content(doc, node) {
                break;
            }
            cursor = doc.next_sibling(node);
            doc.append_child(paragraph, node);
        }
        trim_trailing_whitespace(doc, paragraph);

        if let Some(parent) = doc.parent(paragraph) {
            if doc.is_tag(parent, "p") {
                doc.change_tag(parent, "div");
            }
        }
    }
}

/// Collapses `<div>` and `<font>` wrappers that hold exactly one element
/// and no text of their own. Runs bottom-up so nested wrapper chains
/// disappear in one pass; any `<font>` left over becomes a `<span>`.
fn unwrap_redundant_wrappers(doc: &mut Document) {
    let wrappers = doc.elements_by_tag(doc.root(), &["div", "font"]);
    for &node in wrappers.iter().rev() {
        if doc.parent(node).is_none() {
            continue;
        }
        if let Some(only) = doc.first_element_child(node) {
            let has_text = doc
                .children(node)
                .any(|child| matches!(doc.kind(child), NodeKind::Text(t) if !t.trim().is_empty()));
            if doc.element_child_count(node) == 1 && !has_text {
                doc.replace_child(only, node);
                continue;
            }
        }
        if doc.is_tag(node, "font") {
            doc.change_tag(node, "span");
        }
    }
}

/// First node at or after `from` that is an element or contentful text.
/// Whitespace-only text and comments are skipped.
fn next_skipping_whitespace(doc: &Document, from: Option<NodeId>) -> Option<NodeId> {
    let mut cursor = from;
    while let Some(node) = cursor {
        match doc.kind(node) {
            NodeKind::Text(t) | NodeKind::Comment(t) if t.trim().is_empty() => {
                cursor = doc.next_sibling(node);
            }
            _ => return Some(node),
        }
    }
    None
}

// --- Article preparation ---

/// Cleans the selected article subtree in place: presentational markup,
/// forms, embeds, share widgets, link-heavy blocks and empty paragraphs
/// all go, data tables and allowed videos stay.
pub(crate) fn prep_article(
    doc: &mut Document,
    article: NodeId,
    options: &ExtractionOptions,
    flags: ScoreFlags,
) {
    clean_styles(doc, article);

    // Data tables are marked before conditional cleaning so their cells
    // are never judged in isolation.
    let data_tables = detect_data_tables(doc, article);
    fix_lazy_images(doc, article);

    clean_conditionally(doc, article, "form", options, flags, &data_tables);
    clean_conditionally(doc, article, "fieldset", options, flags, &data_tables);
    clean(doc, article, "object", options);
    clean(doc, article, "embed", options);
    clean(doc, article, "footer", options);
    clean(doc, article, "link", options);
    clean(doc, article, "aside", options);

    // Share widgets survive only when they carry enough text to plausibly
    // be quoted content rather than buttons.
    let children: Vec<NodeId> = doc.element_children(article).collect();
    for child in children {
        clean_matched_nodes(doc, child, |doc, node, match_string| {
            SHARE_ELEMENTS.is_match(match_string)
                && doc.text_content(node).chars().count() < SHARE_ELEMENT_THRESHOLD
        });
    }

    clean(doc, article, "iframe", options);
    clean(doc, article, "input", options);
    clean(doc, article, "textarea", options);
    clean(doc, article, "select", options);
    clean(doc, article, "button", options);
    clean_headers(doc, article, flags);

    clean_conditionally(doc, article, "table", options, flags, &data_tables);
    clean_conditionally(doc, article, "ul", options, flags, &data_tables);
    clean_conditionally(doc, article, "div", options, flags, &data_tables);

    for h1 in doc.elements_by_tag(article, &["h1"]) {
        doc.change_tag(h1, "h2");
    }

    remove_matching(doc, article, &["p"], |doc, paragraph| {
        doc.elements_by_tag(paragraph, &["img", "embed", "object", "iframe"])
            .is_empty()
            && doc.inner_text(paragraph, false).is_empty()
    });

    for br in doc.elements_by_tag(article, &["br"]) {
        if doc.parent(br).is_none() {
            continue;
        }
        let next = next_skipping_whitespace(doc, doc.next_sibling(br));
        if next.is_some_and(|n| doc.is_tag(n, "p")) {
            doc.detach(br);
        }
    }

    // A table holding nothing but a single cell is a wrapper in disguise.
    for table in doc.elements_by_tag(article, &["table"]) {
        if doc.parent(table).is_none() {
            continue;
        }
        let tbody = doc.single_tagged_child(table, "tbody").unwrap_or(table);
        let Some(row) = doc.single_tagged_child(tbody, "tr") else {
            continue;
        };
        let Some(cell) = doc.single_tagged_child(row, "td") else {
            continue;
        };
        let all_phrasing = doc
            .children(cell)
            .all(|child| is_phrasing_content(doc, child));
        let cell = doc.change_tag(cell, if all_phrasing { "p" } else { "div" });
        doc.replace_child(cell, table);
    }
}

/// Strips presentational attributes from `node` and everything under it.
/// Inline SVG subtrees are left exactly as parsed.
fn clean_styles(doc: &mut Document, node: NodeId) {
    if !doc.is_element(node) || doc.is_tag(node, "svg") {
        return;
    }

    for attr in PRESENTATIONAL_ATTRIBUTES {
        doc.remove_attribute(node, attr);
    }
    let sized = doc
        .local_name(node)
        .is_some_and(|local| DEPRECATED_SIZE_ATTRIBUTE_ELEMS.contains(&local));
    if sized {
        doc.remove_attribute(node, "width");
        doc.remove_attribute(node, "height");
    }

    let mut cursor = doc.first_element_child(node);
    while let Some(child) = cursor {
        cursor = doc.next_element_sibling(child);
        clean_styles(doc, child);
    }
}

/// Finds the tables under `root` that hold tabular data rather than
/// layout, using presentational hints first and size as a fallback.
fn detect_data_tables(doc: &Document, root: NodeId) -> HashSet<NodeId> {
    let mut data_tables = HashSet::new();
    for table in doc.elements_by_tag(root, &["table"]) {
        if doc.attribute(table, "role") == Some("presentation") {
            continue;
        }
        if doc.attribute(table, "datatable") == Some("0") {
            continue;
        }
        if doc
            .attribute(table, "summary")
            .is_some_and(|s| !s.is_empty())
        {
            data_tables.insert(table);
            continue;
        }

        let caption = doc.elements_by_tag(table, &["caption"]).into_iter().next();
        if caption.is_some_and(|c| doc.child_count(c) > 0) {
            data_tables.insert(table);
            continue;
        }

        if !doc
            .elements_by_tag(table, &["col", "colgroup", "tfoot", "thead", "th"])
            .is_empty()
        {
            data_tables.insert(table);
            continue;
        }

        // Nested tables mean layout.
        if !doc.elements_by_tag(table, &["table"]).is_empty() {
            continue;
        }

        let (rows, columns) = row_and_column_count(doc, table);
        if rows >= 10 || columns > 4 || rows * columns > 10 {
            data_tables.insert(table);
        }
    }
    data_tables
}

/// Row and column counts honoring `rowspan`/`colspan`.
fn row_and_column_count(doc: &Document, table: NodeId) -> (usize, usize) {
    let mut rows = 0;
    let mut columns = 0;
    for tr in doc.elements_by_tag(table, &["tr"]) {
        rows += span_value(doc, tr, "rowspan");
        let row_columns: usize = doc
            .elements_by_tag(tr, &["td"])
            .iter()
            .map(|&td| span_value(doc, td, "colspan"))
            .sum();
        columns = columns.max(row_columns);
    }
    (rows, columns)
}

fn span_value(doc: &Document, node: NodeId, attr: &str) -> usize {
    doc.attribute(node, attr)
        .and_then(|v| v.parse::<usize>().ok())
        .unwrap_or(1)
        .max(1)
}

/// Recovers image sources stashed in lazy-loading attributes.
///
/// Tiny base64 `src` placeholders are removed when a real source hides in
/// another attribute; then any attribute value that looks like an image
/// URL (or srcset) is copied into `src`/`srcset` on images lacking one.
fn fix_lazy_images(doc: &mut Document, root: NodeId) {
    for node in doc.elements_by_tag(root, &["img", "picture", "figure"]) {
        let src = doc.attribute(node, "src").map(str::to_owned);
        if let Some(src) = &src {
            if let Some(caps) = B64_DATA_URL.captures(src) {
                // Inline SVGs can legitimately be tiny.
                if &caps[1] != "image/svg+xml" {
                    let has_other_source = doc
                        .attributes(node)
                        .iter()
                        .any(|attr| attr.name != "src" && IMAGE_EXTENSION.is_match(&attr.value));
                    let payload = src.len() - caps.get(0).map_or(0, |m| m.end());
                    if has_other_source && payload < B64_PLACEHOLDER_MAX_LEN {
                        doc.remove_attribute(node, "src");
                    }
                }
            }
        }

        let has_src = doc.attribute(node, "src").is_some_and(|v| !v.is_empty());
        let has_srcset = doc
            .attribute(node, "srcset")
            .is_some_and(|v| !v.is_empty() && v != "null");
        let lazy_class = doc.class_name(node).to_lowercase().contains("lazy");
        if (has_src || has_srcset) && !lazy_class {
            continue;
        }

        let candidates: Vec<(String, String)> = doc
            .attributes(node)
            .iter()
            .filter(|attr| !matches!(attr.name.as_str(), "src" | "srcset" | "alt"))
            .map(|attr| (attr.name.clone(), attr.value.clone()))
            .collect();
        for (_, value) in candidates {
            let copy_to = if LAZY_SRCSET_VALUE.is_match(&value) {
                "srcset"
            } else if LAZY_SRC_VALUE.is_match(&value) {
                "src"
            } else {
                continue;
            };

            if doc.is_tag(node, "img") || doc.is_tag(node, "picture") {
                doc.set_attribute(node, copy_to, value);
            } else if doc.is_tag(node, "figure")
                && doc.elements_by_tag(node, &["img", "picture"]).is_empty()
            {
                // The figure lost its image somewhere along the way;
                // rebuild one so the content is not lost.
                let img = doc.create_element("img");
                doc.set_attribute(img, copy_to, value);
                doc.append_child(node, img);
            }
        }
    }
}

/// Removes every `local` element under `root`, except embeds whose
/// attributes or source mark them as an allowed video.
fn clean(doc: &mut Document, root: NodeId, local: &str, options: &ExtractionOptions) {
    let is_embed = EMBED_ELEMENTS.contains(&local);
    let allowed = options.allowed_video_regex.as_ref().unwrap_or(&VIDEOS);
    remove_matching(doc, root, &[local], |doc, node| {
        if is_embed {
            let is_video = doc
                .attributes(node)
                .iter()
                .any(|attr| allowed.is_match(&attr.value))
                || (doc.is_tag(node, "object") && allowed.is_match(&doc.inner_html(node)));
            if is_video {
                return false;
            }
        }
        true
    });
}

/// Removes `local` elements under `root` that look like boilerplate:
/// negatively classed, link-dense, form-heavy or image-stuffed blocks.
/// Data tables, code samples and allowed videos are kept. Inactive when
/// the conditional-cleaning flag has been relaxed.
#[allow(clippy::too_many_lines)]
fn clean_conditionally(
    doc: &mut Document,
    root: NodeId,
    local: &str,
    options: &ExtractionOptions,
    flags: ScoreFlags,
    data_tables: &HashSet<NodeId>,
) {
    if !flags.clean_conditionally {
        return;
    }
    let allowed = options.allowed_video_regex.as_ref().unwrap_or(&VIDEOS);

    remove_matching(doc, root, &[local], |doc, node| {
        let mut is_list = local == "ul" || local == "ol";
        if !is_list {
            let total = doc.inner_text(node, true).chars().count();
            if total > 0 {
                let in_lists: usize = doc
                    .elements_by_tag(node, &["ul", "ol"])
                    .iter()
                    .map(|&list| doc.inner_text(list, true).chars().count())
                    .sum();
                #[allow(clippy::cast_precision_loss)]
                {
                    is_list = in_lists as f64 / total as f64 > 0.9;
                }
            }
        }

        if local == "table" && data_tables.contains(&node) {
            return false;
        }
        if doc
            .ancestors(node)
            .skip(1)
            .any(|a| doc.is_tag(a, "table") && data_tables.contains(&a))
        {
            return false;
        }
        if doc.has_ancestor_tag(node, "code", 3) {
            return false;
        }
        if doc
            .elements_by_tag(node, &["table"])
            .iter()
            .any(|t| data_tables.contains(t))
        {
            return false;
        }

        let weight = class_weight(doc, node, flags);
        if weight < 0.0 {
            return true;
        }

        let text = doc.inner_text(node, true);
        if text.matches(',').count() >= 10 {
            return false;
        }

        let p_count = doc.elements_by_tag(node, &["p"]).len();
        let img_count = doc.elements_by_tag(node, &["img"]).len();
        let input_count = doc.elements_by_tag(node, &["input"]).len();
        let heading_density = text_density(doc, node, &["h1", "h2", "h3", "h4", "h5", "h6"]);

        let mut embed_count = 0usize;
        for embed in doc.elements_by_tag(node, &EMBED_ELEMENTS) {
            let is_video = doc
                .attributes(embed)
                .iter()
                .any(|attr| allowed.is_match(&attr.value))
                || (doc.is_tag(embed, "object") && allowed.is_match(&doc.inner_html(embed)));
            if is_video {
                return false;
            }
            embed_count += 1;
        }

        if AD_WORDS.is_match(&text) || LOADING_WORDS.is_match(&text) {
            return true;
        }

        let content_length = text.chars().count();
        let density = link_density(doc, node);
        let is_figure_child = doc.has_ancestor_tag(node, "figure", 3);

        #[allow(clippy::cast_precision_loss)]
        let have_to_remove = (img_count > 1
            && (p_count as f64) / (img_count as f64) < 0.5
            && !is_figure_child)
            || (!is_list && list_item_excess(doc, node) > p_count as isize)
            || (input_count as f64 > (p_count as f64 / 3.0).floor())
            || (!is_list
                && heading_density < 0.9
                && content_length < 25
                && (img_count == 0 || img_count > 2)
                && !is_figure_child)
            || (!is_list && weight < 25.0 && density > 0.2)
            || (weight >= 25.0 && density > 0.5)
            || (embed_count == 1 && content_length < 75)
            || embed_count > 1;

        // Lists of images (galleries) stay even when flagged.
        if is_list && have_to_remove {
            for child in doc.element_children(node) {
                if doc.element_child_count(child) > 1 {
                    return true;
                }
            }
            if img_count == doc.elements_by_tag(node, &["li"]).len() {
                return false;
            }
        }
        have_to_remove
    });
}

/// `<li>` count offset so that a handful of stray items never outweighs
/// real paragraphs on its own.
#[allow(clippy::cast_possible_wrap)]
fn list_item_excess(doc: &Document, node: NodeId) -> isize {
    doc.elements_by_tag(node, &["li"]).len() as isize - 100
}

/// Removes headers whose class weight marks them as boilerplate.
fn clean_headers(doc: &mut Document, root: NodeId, flags: ScoreFlags) {
    remove_matching(doc, root, &["h1", "h2"], |doc, node| {
        class_weight(doc, node, flags) < 0.0
    });
}

/// Collects every `locals` element under `root` and removes the ones the
/// predicate flags. Iteration runs in reverse document order so inner
/// matches are judged before the subtrees holding them.
fn remove_matching<F>(doc: &mut Document, root: NodeId, locals: &[&str], mut predicate: F)
where
    F: FnMut(&Document, NodeId) -> bool,
{
    let nodes = doc.elements_by_tag(root, locals);
    for &node in nodes.iter().rev() {
        if doc.parent(node).is_none() {
            continue;
        }
        if predicate(doc, node) {
            doc.detach(node);
        }
    }
}

/// Walks every element below `scope` and removes those whose class/id
/// string the predicate matches. Removal skips the matched subtree.
fn clean_matched_nodes<F>(doc: &mut Document, scope: NodeId, mut predicate: F)
where
    F: FnMut(&Document, NodeId, &str) -> bool,
{
    let end = doc.next_element_in_tree(scope, true);
    let mut cursor = doc.next_element_in_tree(scope, false);
    while let Some(node) = cursor {
        if end == Some(node) {
            break;
        }
        let match_string = format!("{} {}", doc.class_name(node), doc.element_id(node));
        if predicate(doc, node, &match_string) {
            cursor = remove_and_get_next(doc, node);
        } else {
            cursor = doc.next_element_in_tree(node, false);
        }
    }
}

// --- Post-processing ---

/// Final fixups on the extracted article: relative URIs become absolute,
/// nested single-child wrappers collapse, and class attributes are
/// dropped except for an allowlist.
pub(crate) fn post_process(doc: &mut Document, article: NodeId, options: &ExtractionOptions) {
    fix_relative_uris(doc, article);
    simplify_nested_elements(doc, article);

    if !options.keep_classes {
        let mut preserve: Vec<&str> = DEFAULT_CLASSES_TO_PRESERVE.to_vec();
        preserve.extend(options.classes_to_preserve.iter().map(String::as_str));
        clean_classes(doc, article, &preserve);
    }
}

/// Rewrites link and media URLs against the document base. Fragment-only
/// links stay untouched when the base equals the document URI, and
/// `javascript:` links are flattened to their text.
fn fix_relative_uris(doc: &mut Document, article: NodeId) {
    let base = doc.base_uri().to_owned();
    let keep_hash_links = base == doc.document_uri();

    for link in doc.elements_by_tag(article, &["a"]) {
        let Some(href) = doc.attribute(link, "href").map(str::to_owned) else {
            continue;
        };
        if href.is_empty() {
            continue;
        }
        if href.starts_with("javascript:") {
            let children: Vec<NodeId> = doc.children(link).collect();
            if children.len() == 1 && matches!(doc.kind(children[0]), NodeKind::Text(_)) {
                let text = doc.create_text(doc.text_content(link));
                doc.replace_child(text, link);
            } else {
                let span = doc.create_element("span");
                doc.reparent_children(link, span);
                doc.replace_child(span, link);
            }
        } else if let Some(absolute) = resolve_for_output(&base, keep_hash_links, &href) {
            doc.set_attribute(link, "href", absolute);
        }
    }

    let media = doc.elements_by_tag(
        article,
        &["img", "picture", "figure", "video", "audio", "source"],
    );
    for node in media {
        for attr in ["src", "poster"] {
            if let Some(value) = doc.attribute(node, attr).map(str::to_owned) {
                if let Some(absolute) = resolve_for_output(&base, keep_hash_links, &value) {
                    doc.set_attribute(node, attr, absolute);
                }
            }
        }
        let srcset = doc
            .attribute(node, "srcset")
            .filter(|v| !v.is_empty())
            .map(str::to_owned);
        if let Some(srcset) = srcset {
            let rewritten = url_utils::rewrite_srcset(&base, &srcset);
            doc.set_attribute(node, "srcset", rewritten);
        }
    }
}

/// `None` means "leave the attribute as it is".
fn resolve_for_output(base: &str, keep_hash_links: bool, reference: &str) -> Option<String> {
    if keep_hash_links && reference.trim_start().starts_with('#') {
        return None;
    }
    url_utils::resolve(base, reference)
}

/// Unwraps `div`/`section` elements that hold nothing or exactly one
/// other `div`/`section`, merging attributes downward. The synthetic
/// page wrapper is exempt.
fn simplify_nested_elements(doc: &mut Document, article: NodeId) {
    let mut cursor = Some(article);
    while let Some(node) = cursor {
        let simplifiable = doc.parent(node).is_some()
            && (doc.is_tag(node, "div") || doc.is_tag(node, "section"))
            && !doc.element_id(node).starts_with("readability");
        if simplifiable {
            if is_element_without_content(doc, node) {
                cursor = remove_and_get_next(doc, node);
                continue;
            }
            let single = doc
                .single_tagged_child(node, "div")
                .or_else(|| doc.single_tagged_child(node, "section"));
            if let Some(child) = single {
                let attrs: Vec<(String, String)> = doc
                    .attributes(node)
                    .iter()
                    .map(|attr| (attr.name.clone(), attr.value.clone()))
                    .collect();
                for (name, value) in attrs {
                    doc.set_attribute(child, &name, value);
                }
                doc.replace_child(child, node);
                cursor = Some(child);
                continue;
            }
        }
        cursor = doc.next_element_in_tree(node, false);
    }
}

/// Strips `class` attributes below `node`, keeping only classes on the
/// preserve list.
fn clean_classes(doc: &mut Document, node: NodeId, preserve: &[&str]) {
    let kept = doc
        .class_name(node)
        .split_whitespace()
        .filter(|class| preserve.contains(class))
        .collect::<Vec<_>>()
        .join(" ");
    if kept.is_empty() {
        doc.remove_attribute(node, "class");
    } else {
        doc.set_attribute(node, "class", kept);
    }

    let mut cursor = doc.first_element_child(node);
    while let Some(child) = cursor {
        cursor = doc.next_element_sibling(child);
        clean_classes(doc, child, preserve);
    }
}
