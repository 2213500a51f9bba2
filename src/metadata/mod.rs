//! Article metadata extraction.
//!
//! Each field resolves through a priority chain: schema.org JSON-LD
//! Article data first, then Open Graph / Twitter / Dublin Core meta
//! tags, then document heuristics (the `<title>` element, a lone
//! `<h1>`, the first paragraph of the extracted content).

pub(crate) mod json_ld;
pub(crate) mod meta_tags;

use chrono::{DateTime, NaiveDate};

use crate::dom::Document;
use crate::entities;
use crate::patterns::TITLE_SEPARATOR;

/// Longest excerpt built from body text when no description meta exists.
const EXCERPT_MAX_LEN: usize = 250;

/// Everything known about the article before content assembly.
#[derive(Debug, Clone, Default)]
pub(crate) struct ArticleMetadata {
    pub title: String,
    pub byline: Option<String>,
    pub excerpt: Option<String>,
    pub site_name: Option<String>,
    pub published_time: Option<String>,
}

/// Resolves the per-field priority chains. `json_ld` holds whatever an
/// embedded Article object provided; scripts may already be gone from
/// the tree by the time this runs.
pub(crate) fn extract_metadata(
    doc: &Document,
    json_ld: &json_ld::JsonLdMetadata,
) -> ArticleMetadata {
    let values = meta_tags::harvest(doc);
    let pick = |keys: &[&str]| keys.iter().find_map(|key| values.get(*key).cloned());

    let mut title = json_ld
        .title
        .clone()
        .or_else(|| {
            pick(&[
                "dc:title",
                "dcterm:title",
                "og:title",
                "weibo:article:title",
                "weibo:webpage:title",
                "title",
                "twitter:title",
                "parsely-title",
            ])
        })
        .unwrap_or_default();
    if title.trim().is_empty() {
        title = article_title(doc);
    }
    let title = strip_title_suffix(&title);

    let byline = json_ld.byline.clone().or_else(|| {
        pick(&["dc:creator", "dcterm:creator", "author", "parsely-author"])
    });
    let excerpt = json_ld.excerpt.clone().or_else(|| {
        pick(&[
            "dc:description",
            "dcterm:description",
            "og:description",
            "weibo:article:description",
            "weibo:webpage:description",
            "description",
            "twitter:description",
        ])
    });
    let site_name = json_ld
        .site_name
        .clone()
        .or_else(|| pick(&["og:site_name"]));
    let published_time = pick_published_time(json_ld.date_published.as_deref(), &pick);

    // Meta values are often escaped a second time at the source; one more
    // decode pass mirrors what a browser-read attribute would hold.
    ArticleMetadata {
        title: entities::decode(&title).into_owned(),
        byline: byline.map(|v| entities::decode(&v).into_owned()),
        excerpt: excerpt.map(|v| entities::decode(&v).into_owned()),
        site_name: site_name.map(|v| entities::decode(&v).into_owned()),
        published_time: published_time.map(|v| entities::decode(&v).into_owned()),
    }
}

/// Document-level fallback title: the `<title>` element, replaced by a
/// lone `<h1>` when implausibly short or long.
pub(crate) fn article_title(doc: &Document) -> String {
    let mut title = doc
        .elements_by_tag(doc.root(), &["title"])
        .first()
        .map(|&t| doc.inner_text(t, true))
        .unwrap_or_default();

    let len = title.chars().count();
    if len > 150 || len < 15 {
        let h1s = doc.elements_by_tag(doc.root(), &["h1"]);
        if let [only] = h1s.as_slice() {
            title = doc.inner_text(*only, true);
        }
    }
    title
}

/// Drops a trailing site-name segment (`Title - Site`, `Title | Site`,
/// `Title: Site`) when what remains is at least half the original.
fn strip_title_suffix(title: &str) -> String {
    let title = title.trim();
    let Some(last) = TITLE_SEPARATOR.find_iter(title).last() else {
        return title.to_string();
    };
    let prefix = title[..last.start()].trim_end();
    if prefix.chars().count() * 2 >= title.chars().count() {
        prefix.to_string()
    } else {
        title.to_string()
    }
}

/// Among the date candidates, the first one chrono can actually parse
/// wins; a lone unparseable candidate is still surfaced verbatim.
fn pick_published_time(
    json_ld_date: Option<&str>,
    pick: &impl Fn(&[&str]) -> Option<String>,
) -> Option<String> {
    let mut candidates: Vec<String> = Vec::new();
    if let Some(date) = json_ld_date {
        candidates.push(date.to_string());
    }
    if let Some(date) = pick(&["article:published_time"]) {
        candidates.push(date);
    }
    if let Some(date) = pick(&["parsely-pub-date"]) {
        candidates.push(date);
    }
    candidates.retain(|c| !c.trim().is_empty());

    if let Some(parseable) = candidates.iter().find(|c| parses_as_date(c)) {
        return Some(parseable.clone());
    }
    candidates.into_iter().next()
}

fn parses_as_date(value: &str) -> bool {
    let value = value.trim();
    DateTime::parse_from_rfc3339(value).is_ok()
        || DateTime::parse_from_rfc2822(value).is_ok()
        || NaiveDate::parse_from_str(value, "%Y-%m-%d").is_ok()
}

/// Builds an excerpt from body text, cutting at a sentence end when one
/// fits, else at a word boundary.
pub(crate) fn excerpt_from_text(text: &str) -> String {
    let text = text.trim();
    if text.chars().count() <= EXCERPT_MAX_LEN {
        return text.to_string();
    }
    let cut: String = text.chars().take(EXCERPT_MAX_LEN).collect();
    if let Some(pos) = cut.rfind(". ") {
        return cut[..=pos].trim_end().to_string();
    }
    match cut.rfind(char::is_whitespace) {
        Some(pos) => format!("{}\u{2026}", cut[..pos].trim_end()),
        None => cut,
    }
}
