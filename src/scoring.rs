//! Candidate scoring and main-content selection.
//!
//! The engine walks the tree once to strip obvious boilerplate and collect
//! content-bearing elements, scores those elements by prose density (commas,
//! text length, class/id keywords) with decaying propagation to ancestors,
//! then picks the best-scoring subtree and merges qualifying siblings into a
//! fresh container.
//!
//! Extraction runs against a clone of the parsed document, so a too-short
//! result can retry from pristine markup with one heuristic fewer each time:
//! first unlikely-candidate stripping goes, then class weighting, then
//! conditional cleaning.

use std::collections::HashMap;

use crate::dom::{Document, NodeId, NodeKind};
use crate::error::{Error, Result};
use crate::html_processing;
use crate::link_density::{link_density, text_len};
use crate::options::ExtractionOptions;
use crate::patterns::{
    ALTER_TO_DIV_EXCEPTIONS, BYLINE, COMMAS, DIV_TO_P_ELEMS, MAYBE_CANDIDATE, NEGATIVE,
    PHRASING_ELEMS, POSITIVE, TAGS_TO_SCORE, TOKENIZE, UNLIKELY_CANDIDATES, UNLIKELY_ROLES,
};
use crate::readerable::is_probably_visible;

/// Elements shorter than this contribute no score.
const MIN_SCORED_TEXT_LEN: usize = 25;
/// A sibling of the winner joins the output once its score reaches
/// `max(SIBLING_SCORE_FLOOR, fraction * winner)`.
const SIBLING_SCORE_FLOOR: f64 = 10.0;
const SIBLING_SCORE_FRACTION: f64 = 0.2;
/// Link-density ceilings for merged siblings.
const SIBLING_LINK_DENSITY_P: f64 = 0.25;
const SIBLING_LINK_DENSITY_OTHER: f64 = 0.5;
/// Runners-up scoring at least this fraction of the leader count as
/// alternatives when probing for a better shared ancestor.
const ALTERNATIVE_SCORE_FRACTION: f64 = 0.75;
const MINIMUM_ALTERNATIVES: usize = 3;

/// Heuristic toggles, dropped one at a time by the retry loop.
#[derive(Debug, Clone, Copy)]
pub(crate) struct ScoreFlags {
    pub strip_unlikelys: bool,
    pub weight_classes: bool,
    pub clean_conditionally: bool,
}

impl ScoreFlags {
    pub(crate) fn all() -> Self {
        Self {
            strip_unlikelys: true,
            weight_classes: true,
            clean_conditionally: true,
        }
    }

    /// Disables the most aggressive heuristic still active. Returns false
    /// once nothing is left to relax.
    fn relax(&mut self) -> bool {
        if self.strip_unlikelys {
            self.strip_unlikelys = false;
        } else if self.weight_classes {
            self.weight_classes = false;
        } else if self.clean_conditionally {
            self.clean_conditionally = false;
        } else {
            return false;
        }
        true
    }
}

/// What the winning attempt produced: a working document mutated down to
/// the article, the article container inside it, and everything the walk
/// learned on the way.
pub(crate) struct GrabOutcome {
    pub doc: Document,
    pub article: NodeId,
    pub used_alternatives: bool,
    pub byline: Option<String>,
    pub dir: Option<String>,
    pub lang: Option<String>,
}

struct Attempt {
    doc: Document,
    article: NodeId,
    length: usize,
    byline: Option<String>,
    dir: Option<String>,
    lang: Option<String>,
}

/// Per-attempt working state.
struct GrabContext<'a> {
    options: &'a ExtractionOptions,
    title: &'a str,
    flags: ScoreFlags,
    byline: Option<String>,
    dir: Option<String>,
    lang: Option<String>,
    synthetic_winner: bool,
}

/// Selects the main content subtree of `source`, retrying with fewer
/// heuristics until the result reaches `char_threshold` characters. Falls
/// back to the longest attempt when every retry comes up short.
pub(crate) fn extract_main_content(
    source: &Document,
    title: &str,
    options: &ExtractionOptions,
) -> Result<GrabOutcome> {
    let mut flags = ScoreFlags::all();
    let mut attempts: Vec<Attempt> = Vec::new();
    let mut relaxed = false;

    loop {
        let mut doc = source.clone();
        let mut ctx = GrabContext {
            options,
            title,
            flags,
            byline: None,
            dir: None,
            lang: None,
            synthetic_winner: false,
        };
        let Some(article) = grab_once(&mut doc, &mut ctx) else {
            return Err(Error::NoBody);
        };

        let length = text_len(&doc, article);
        if length >= options.char_threshold {
            return Ok(GrabOutcome {
                doc,
                article,
                used_alternatives: relaxed || ctx.synthetic_winner,
                byline: ctx.byline,
                dir: ctx.dir,
                lang: ctx.lang,
            });
        }

        if options.debug {
            eprintln!("attempt produced {length} chars, under threshold; relaxing heuristics");
        }
        attempts.push(Attempt {
            doc,
            article,
            length,
            byline: ctx.byline,
            dir: ctx.dir,
            lang: ctx.lang,
        });
        if flags.relax() {
            relaxed = true;
            continue;
        }

        // Out of heuristics to drop: surface the longest attempt instead.
        let mut best: Option<Attempt> = None;
        for attempt in attempts {
            if best.as_ref().is_none_or(|b| attempt.length > b.length) {
                best = Some(attempt);
            }
        }
        let Some(best) = best.filter(|b| b.length > 0) else {
            return Err(Error::NoContent);
        };
        return Ok(GrabOutcome {
            doc: best.doc,
            article: best.article,
            used_alternatives: true,
            byline: best.byline,
            dir: best.dir,
            lang: best.lang,
        });
    }
}

fn grab_once(doc: &mut Document, ctx: &mut GrabContext<'_>) -> Option<NodeId> {
    let page = doc.body().or_else(|| doc.document_element())?;

    let elements_to_score = prescore_walk(doc, ctx, page);
    let (mut scores, order) = score_candidates(doc, ctx, &elements_to_score);
    Some(select_article(doc, ctx, page, &mut scores, &order))
}

/// First phase of an attempt: one pre-order walk that strips hidden nodes,
/// bylines, title-duplicating headings, and (flag-gated) unlikely
/// candidates, converts paragraph-shaped divs, and collects the elements
/// worth scoring.
fn prescore_walk(doc: &mut Document, ctx: &mut GrabContext<'_>, page: NodeId) -> Vec<NodeId> {
    let mut elements_to_score = Vec::new();
    let mut cursor = doc.document_element().or(Some(page));

    while let Some(node) = cursor {
        let local = match doc.local_name(node) {
            Some(name) => name.to_owned(),
            None => {
                cursor = doc.next_element_in_tree(node, false);
                continue;
            }
        };

        if local == "html" {
            if let Some(lang) = doc.attribute(node, "lang") {
                ctx.lang = Some(lang.to_owned());
            }
        }

        let match_string = format!("{} {}", doc.class_name(node), doc.element_id(node));

        if !is_probably_visible(doc, node) {
            if ctx.options.debug {
                eprintln!("removing hidden node: {match_string}");
            }
            cursor = remove_and_get_next(doc, node);
            continue;
        }

        // Dialog overlays cover the page; their text is not article prose.
        if doc.attribute(node, "aria-modal") == Some("true")
            && doc.attribute(node, "role") == Some("dialog")
        {
            cursor = remove_and_get_next(doc, node);
            continue;
        }

        if check_byline(doc, node, &match_string, ctx) {
            cursor = remove_and_get_next(doc, node);
            continue;
        }

        if header_duplicates_title(doc, node, ctx.title) {
            if ctx.options.debug {
                eprintln!("removing heading duplicating the title");
            }
            cursor = remove_and_get_next(doc, node);
            continue;
        }

        if ctx.flags.strip_unlikelys {
            if UNLIKELY_CANDIDATES.is_match(&match_string)
                && !MAYBE_CANDIDATE.is_match(&match_string)
                && !doc.has_ancestor_tag(node, "table", 3)
                && !doc.has_ancestor_tag(node, "code", 3)
                && local != "body"
                && local != "a"
            {
                if ctx.options.debug {
                    eprintln!("removing unlikely candidate: {match_string}");
                }
                cursor = remove_and_get_next(doc, node);
                continue;
            }
            if let Some(role) = doc.attribute(node, "role") {
                if UNLIKELY_ROLES.contains(&role) {
                    cursor = remove_and_get_next(doc, node);
                    continue;
                }
            }
        }

        if matches!(
            local.as_str(),
            "div" | "section" | "header" | "h1" | "h2" | "h3" | "h4" | "h5" | "h6"
        ) && is_element_without_content(doc, node)
        {
            cursor = remove_and_get_next(doc, node);
            continue;
        }

        if TAGS_TO_SCORE.contains(&local.as_str()) {
            elements_to_score.push(node);
        }

        if local == "div" {
            wrap_phrasing_runs(doc, node);

            if let Some(only_paragraph) = doc.single_tagged_child(node, "p") {
                if link_density(doc, node) < 0.25 {
                    doc.replace_child(only_paragraph, node);
                    elements_to_score.push(only_paragraph);
                    cursor = doc.next_element_in_tree(only_paragraph, false);
                    continue;
                }
            } else if !has_child_block_element(doc, node) {
                let paragraph = doc.change_tag(node, "p");
                elements_to_score.push(paragraph);
                cursor = doc.next_element_in_tree(paragraph, false);
                continue;
            }
        }

        cursor = doc.next_element_in_tree(node, false);
    }

    elements_to_score
}

/// Second phase: each collected element contributes
/// `commas + min(len/100, 3)` to itself, its parent in full, its
/// grandparent at half, and each further ancestor at half the previous
/// share, down to nothing at the document root.
fn score_candidates(
    doc: &Document,
    ctx: &GrabContext<'_>,
    elements: &[NodeId],
) -> (HashMap<NodeId, f64>, Vec<NodeId>) {
    let mut scores: HashMap<NodeId, f64> = HashMap::new();
    let mut order: Vec<NodeId> = Vec::new();

    for &element in elements {
        // Conversions during the walk can leave detached entries behind.
        if doc.parent(element).is_none() {
            continue;
        }
        let text = doc.inner_text(element, true);
        let length = text.chars().count();
        if length < MIN_SCORED_TEXT_LEN {
            continue;
        }

        let commas = COMMAS.find_iter(&text).count();
        let delta = commas as f64 + ((length / 100).min(3)) as f64;

        add_score(doc, ctx, &mut scores, &mut order, element, delta);

        let mut level = 0u32;
        let mut ancestor = doc.parent(element);
        while let Some(node) = ancestor {
            // The document element itself never collects score.
            if !doc.is_element(node) || doc.parent(node).is_none_or(|p| !doc.is_element(p)) {
                break;
            }
            let divider = if level == 0 {
                1.0
            } else {
                f64::from(1u32 << level.min(30))
            };
            add_score(doc, ctx, &mut scores, &mut order, node, delta / divider);
            level += 1;
            ancestor = doc.parent(node);
        }
    }

    (scores, order)
}

fn add_score(
    doc: &Document,
    ctx: &GrabContext<'_>,
    scores: &mut HashMap<NodeId, f64>,
    order: &mut Vec<NodeId>,
    node: NodeId,
    delta: f64,
) {
    let entry = scores.entry(node).or_insert_with(|| {
        order.push(node);
        initial_score(doc, node, ctx.flags)
    });
    *entry += delta;
}

/// Tag-table base plus class/id keyword weight.
fn initial_score(doc: &Document, node: NodeId, flags: ScoreFlags) -> f64 {
    let base = match doc.local_name(node).unwrap_or("") {
        "pre" | "td" | "blockquote" => 3.0,
        "address" | "ol" | "ul" | "dl" | "dd" | "dt" | "li" | "form" => -3.0,
        "th" | "h1" | "h2" | "h3" | "h4" | "h5" | "h6" => -5.0,
        _ => 0.0,
    };
    base + class_weight(doc, node, flags)
}

/// Keyword classification of class and id, each worth plus or minus 25.
/// Inactive (0) once the weight-classes flag has been relaxed away.
pub(crate) fn class_weight(doc: &Document, node: NodeId, flags: ScoreFlags) -> f64 {
    if !flags.weight_classes {
        return 0.0;
    }
    let mut weight = 0.0;
    let class = doc.class_name(node);
    if !class.is_empty() {
        if NEGATIVE.is_match(class) {
            weight -= 25.0;
        }
        if POSITIVE.is_match(class) {
            weight += 25.0;
        }
    }
    let id = doc.element_id(node);
    if !id.is_empty() {
        if NEGATIVE.is_match(id) {
            weight -= 25.0;
        }
        if POSITIVE.is_match(id) {
            weight += 25.0;
        }
    }
    weight
}

/// Third phase: scale every candidate by `1 - link_density`, rank them,
/// promote the winner towards better-scoring or shared ancestors, then
/// merge qualifying siblings into a fresh container and run the article
/// cleanup passes over it.
fn select_article(
    doc: &mut Document,
    ctx: &mut GrabContext<'_>,
    page: NodeId,
    scores: &mut HashMap<NodeId, f64>,
    order: &[NodeId],
) -> NodeId {
    let limit = ctx.options.nb_top_candidates.max(1);
    let mut top_candidates: Vec<NodeId> = Vec::new();
    for &candidate in order {
        let scaled = scores[&candidate] * (1.0 - link_density(doc, candidate));
        scores.insert(candidate, scaled);
        if ctx.options.debug {
            eprintln!(
                "candidate <{}> [{} {}] score {scaled:.3}",
                doc.local_name(candidate).unwrap_or("?"),
                doc.class_name(candidate),
                doc.element_id(candidate),
            );
        }
        for index in 0..limit {
            let beats = match top_candidates.get(index) {
                None => true,
                Some(&holder) => scaled > scores[&holder],
            };
            if beats {
                top_candidates.insert(index, candidate);
                if top_candidates.len() > limit {
                    top_candidates.pop();
                }
                break;
            }
        }
    }

    let leader = top_candidates.first().copied();
    let mut top_candidate = match leader {
        Some(node) if node != page && scores.get(&node).copied().unwrap_or(0.0) > 0.0 => node,
        _ => {
            // Nothing scored positive: wrap everything under the page node
            // and let the cleanup passes sort it out.
            let wrapper = doc.create_element("div");
            doc.reparent_children(page, wrapper);
            doc.append_child(page, wrapper);
            scores.insert(wrapper, initial_score(doc, wrapper, ctx.flags));
            ctx.synthetic_winner = true;
            wrapper
        }
    };

    if !ctx.synthetic_winner {
        top_candidate = promote_shared_ancestor(doc, page, scores, &top_candidates, top_candidate);
        if !scores.contains_key(&top_candidate) {
            scores.insert(top_candidate, initial_score(doc, top_candidate, ctx.flags));
        }
        top_candidate = climb_rising_scores(doc, page, scores, top_candidate);
        top_candidate = promote_single_child_parents(doc, page, top_candidate);
        if !scores.contains_key(&top_candidate) {
            scores.insert(top_candidate, initial_score(doc, top_candidate, ctx.flags));
        }
    }
    if ctx.options.debug {
        eprintln!(
            "top candidate <{}> [{} {}]",
            doc.local_name(top_candidate).unwrap_or("?"),
            doc.class_name(top_candidate),
            doc.element_id(top_candidate),
        );
    }

    let article = doc.create_element("div");
    let parent_of_top = doc.parent(top_candidate).unwrap_or(page);
    let winner_score = scores.get(&top_candidate).copied().unwrap_or(0.0);
    let sibling_threshold = SIBLING_SCORE_FLOOR.max(winner_score * SIBLING_SCORE_FRACTION);
    let top_class = doc.class_name(top_candidate).to_owned();

    let siblings: Vec<NodeId> = doc.element_children(parent_of_top).collect();
    for sibling in siblings {
        let local = doc.local_name(sibling).unwrap_or("").to_owned();
        let mut append = sibling == top_candidate;

        if !append {
            if let Some(&score) = scores.get(&sibling) {
                if score >= sibling_threshold {
                    let cutoff = if local == "p" {
                        SIBLING_LINK_DENSITY_P
                    } else {
                        SIBLING_LINK_DENSITY_OTHER
                    };
                    if link_density(doc, sibling) < cutoff {
                        append = true;
                    }
                }
            }
        }
        if !append && local == "p" {
            let content = doc.inner_text(sibling, true);
            let length = content.chars().count();
            let density = link_density(doc, sibling);
            if length > ctx.options.char_threshold {
                if density < SIBLING_LINK_DENSITY_P {
                    append = true;
                }
            } else if length > 0 && density == 0.0 && ends_in_sentence(&content) {
                append = true;
            }
        }
        if !append && !top_class.is_empty() && doc.class_name(sibling) == top_class {
            append = true;
        }

        if append {
            if ctx.options.debug {
                eprintln!("merging sibling <{local}>");
            }
            let merged = if ALTER_TO_DIV_EXCEPTIONS.contains(&local.as_str()) {
                sibling
            } else {
                doc.change_tag(sibling, "div")
            };
            doc.append_child(article, merged);
        }
    }

    html_processing::prep_article(doc, article, ctx.options, ctx.flags);

    if ctx.synthetic_winner {
        doc.set_attribute(top_candidate, "id", "readability-page-1");
        doc.set_attribute(top_candidate, "class", "page");
    } else {
        let page_div = doc.create_element("div");
        doc.set_attribute(page_div, "id", "readability-page-1");
        doc.set_attribute(page_div, "class", "page");
        doc.reparent_children(article, page_div);
        doc.append_child(article, page_div);
    }

    // Nearest dir and lang over the winner's former chain. The html
    // element sits at the end of that chain, so its lang (captured during
    // the walk) only holds when nothing nearer declares one.
    let mut chain = vec![parent_of_top, top_candidate];
    chain.extend(doc.ancestors(parent_of_top).skip(1));
    let mut chain_dir: Option<String> = None;
    let mut chain_lang: Option<String> = None;
    for node in chain {
        if !doc.is_element(node) {
            continue;
        }
        if chain_dir.is_none() {
            if let Some(dir) = doc.attribute(node, "dir").filter(|d| !d.is_empty()) {
                chain_dir = Some(dir.to_owned());
            }
        }
        if chain_lang.is_none() {
            if let Some(lang) = doc.attribute(node, "lang").filter(|l| !l.is_empty()) {
                chain_lang = Some(lang.to_owned());
            }
        }
        if chain_dir.is_some() && chain_lang.is_some() {
            break;
        }
    }
    if chain_dir.is_some() {
        ctx.dir = chain_dir;
    }
    if chain_lang.is_some() {
        ctx.lang = chain_lang;
    }

    article
}

fn ends_in_sentence(content: &str) -> bool {
    content.contains(". ") || content.ends_with('.')
}

/// When several runners-up score close to the leader, a shared ancestor of
/// at least three of them is a better pick than the leader alone.
fn promote_shared_ancestor(
    doc: &Document,
    page: NodeId,
    scores: &HashMap<NodeId, f64>,
    top_candidates: &[NodeId],
    top_candidate: NodeId,
) -> NodeId {
    let top_score = scores.get(&top_candidate).copied().unwrap_or(0.0);
    if top_score <= 0.0 {
        return top_candidate;
    }

    let mut alternative_ancestor_lists: Vec<Vec<NodeId>> = Vec::new();
    for &candidate in top_candidates.iter().skip(1) {
        if scores.get(&candidate).copied().unwrap_or(0.0) / top_score >= ALTERNATIVE_SCORE_FRACTION
        {
            alternative_ancestor_lists.push(doc.ancestors(candidate).skip(1).collect());
        }
    }
    if alternative_ancestor_lists.len() < MINIMUM_ALTERNATIVES {
        return top_candidate;
    }

    let mut parent = doc.parent(top_candidate);
    while let Some(node) = parent {
        if node == page || !doc.is_element(node) {
            break;
        }
        let lists_containing = alternative_ancestor_lists
            .iter()
            .filter(|list| list.contains(&node))
            .count();
        if lists_containing >= MINIMUM_ALTERNATIVES {
            return node;
        }
        parent = doc.parent(node);
    }
    top_candidate
}

/// Scores rising on the way up the tree hint that sibling content belongs
/// together further out; climb while they rise, stop when they sink below
/// a third of the start.
fn climb_rising_scores(
    doc: &Document,
    page: NodeId,
    scores: &HashMap<NodeId, f64>,
    mut top_candidate: NodeId,
) -> NodeId {
    let mut last_score = scores.get(&top_candidate).copied().unwrap_or(0.0);
    let score_threshold = last_score / 3.0;

    let mut parent = doc.parent(top_candidate);
    while let Some(node) = parent {
        if node == page || !doc.is_element(node) {
            break;
        }
        let Some(&parent_score) = scores.get(&node) else {
            parent = doc.parent(node);
            continue;
        };
        if parent_score < score_threshold {
            break;
        }
        if parent_score > last_score {
            top_candidate = node;
            break;
        }
        last_score = parent_score;
        parent = doc.parent(node);
    }
    top_candidate
}

/// An only child and its parent cover the same content; prefer the parent
/// so the sibling merge can see adjacent content.
fn promote_single_child_parents(doc: &Document, page: NodeId, mut top_candidate: NodeId) -> NodeId {
    let mut parent = doc.parent(top_candidate);
    while let Some(node) = parent {
        if node == page || !doc.is_element(node) || doc.element_child_count(node) != 1 {
            break;
        }
        top_candidate = node;
        parent = doc.parent(node);
    }
    top_candidate
}

pub(crate) fn remove_and_get_next(doc: &mut Document, node: NodeId) -> Option<NodeId> {
    let next = doc.next_element_in_tree(node, true);
    doc.detach(node);
    next
}

fn check_byline(
    doc: &Document,
    node: NodeId,
    match_string: &str,
    ctx: &mut GrabContext<'_>,
) -> bool {
    if ctx.byline.is_some() {
        return false;
    }
    let rel_author = doc.attribute(node, "rel") == Some("author");
    let itemprop_author = doc
        .attribute(node, "itemprop")
        .is_some_and(|value| value.contains("author"));
    if !(rel_author || itemprop_author || BYLINE.is_match(match_string)) {
        return false;
    }

    let text = doc.text_content(node);
    let text = text.trim();
    if !text.is_empty() && text.chars().count() < 100 {
        ctx.byline = Some(text.to_owned());
        return true;
    }
    false
}

fn header_duplicates_title(doc: &Document, node: NodeId, title: &str) -> bool {
    if !(doc.is_tag(node, "h1") || doc.is_tag(node, "h2")) {
        return false;
    }
    if title.trim().is_empty() {
        return false;
    }
    text_similarity(title, &doc.inner_text(node, false)) > 0.75
}

/// Token-overlap similarity: 1 minus the share of `text_b` (by joined
/// length) made of tokens absent from `text_a`.
pub(crate) fn text_similarity(text_a: &str, text_b: &str) -> f64 {
    let lower_a = text_a.to_lowercase();
    let lower_b = text_b.to_lowercase();
    let tokens_a: Vec<&str> = TOKENIZE.split(&lower_a).filter(|t| !t.is_empty()).collect();
    let tokens_b: Vec<&str> = TOKENIZE.split(&lower_b).filter(|t| !t.is_empty()).collect();
    if tokens_a.is_empty() || tokens_b.is_empty() {
        return 0.0;
    }
    let unique_b: Vec<&str> = tokens_b
        .iter()
        .copied()
        .filter(|token| !tokens_a.contains(token))
        .collect();
    let distance =
        unique_b.join(" ").chars().count() as f64 / tokens_b.join(" ").chars().count() as f64;
    1.0 - distance
}

pub(crate) fn is_element_without_content(doc: &Document, node: NodeId) -> bool {
    if !doc.text_content(node).trim().is_empty() {
        return false;
    }
    let child_elements = doc.element_child_count(node);
    child_elements == 0 || child_elements == doc.elements_by_tag(node, &["br", "hr"]).len()
}

/// Wraps runs of phrasing content directly under `div` into fresh `<p>`
/// elements, so loose text gets scored like the paragraphs around it.
fn wrap_phrasing_runs(doc: &mut Document, div: NodeId) {
    let mut paragraph: Option<NodeId> = None;
    let mut cursor = doc.first_child(div);

    while let Some(child) = cursor {
        let next = doc.next_sibling(child);
        if is_phrasing_content(doc, child) {
            if let Some(p) = paragraph {
                doc.append_child(p, child);
            } else if !is_whitespace_node(doc, child) {
                let p = doc.create_element("p");
                doc.insert_before(child, p);
                doc.append_child(p, child);
                paragraph = Some(p);
            }
        } else if let Some(p) = paragraph {
            trim_trailing_whitespace(doc, p);
            paragraph = None;
        }
        cursor = next;
    }
    if let Some(p) = paragraph {
        trim_trailing_whitespace(doc, p);
    }
}

pub(crate) fn trim_trailing_whitespace(doc: &mut Document, node: NodeId) {
    while let Some(last) = doc.last_child(node) {
        if is_whitespace_node(doc, last) {
            doc.detach(last);
        } else {
            break;
        }
    }
}

pub(crate) fn is_whitespace_node(doc: &Document, node: NodeId) -> bool {
    match doc.kind(node) {
        NodeKind::Text(text) => text.trim().is_empty(),
        NodeKind::Element(_) => doc.is_tag(node, "br"),
        _ => false,
    }
}

pub(crate) fn is_phrasing_content(doc: &Document, node: NodeId) -> bool {
    match doc.kind(node) {
        NodeKind::Text(_) => true,
        NodeKind::Element(_) => {
            let local = doc.local_name(node).unwrap_or("");
            PHRASING_ELEMS.contains(&local)
                || (matches!(local, "a" | "del" | "ins")
                    && doc
                        .children(node)
                        .all(|child| is_phrasing_content(doc, child)))
        }
        _ => false,
    }
}

fn has_child_block_element(doc: &Document, node: NodeId) -> bool {
    doc.children(node).any(|child| {
        doc.local_name(child)
            .is_some_and(|local| DIV_TO_P_ELEMS.contains(&local))
            || has_child_block_element(doc, child)
    })
}
