//! Schema.org JSON-LD parsing.
//!
//! Reads `application/ld+json` scripts looking for an Article-typed
//! object, either at the top level or inside an `@graph` array. Only the
//! first script that yields one is used.

use serde_json::Value;

use crate::dom::Document;
use crate::patterns::{JSONLD_ARTICLE_TYPES, SCHEMA_DOT_ORG};
use crate::scoring::text_similarity;

/// Fields an Article object can contribute to the metadata chain.
#[derive(Debug, Clone, Default)]
pub(crate) struct JsonLdMetadata {
    pub title: Option<String>,
    pub byline: Option<String>,
    pub excerpt: Option<String>,
    pub site_name: Option<String>,
    pub date_published: Option<String>,
}

/// Scans the document's JSON-LD scripts. Must run while scripts are
/// still in the tree.
pub(crate) fn extract(doc: &Document) -> JsonLdMetadata {
    for script in doc.elements_by_tag(doc.root(), &["script"]) {
        if doc.attribute(script, "type") != Some("application/ld+json") {
            continue;
        }
        let raw = doc.text_content(script);
        let raw = raw.trim();
        let raw = raw.strip_prefix("<![CDATA[").unwrap_or(raw);
        let raw = raw.strip_suffix("]]>").unwrap_or(raw);
        let Ok(parsed) = serde_json::from_str::<Value>(raw) else {
            continue;
        };
        if let Some(metadata) = article_object(doc, &parsed) {
            return metadata;
        }
    }
    JsonLdMetadata::default()
}

/// Interprets one parsed JSON-LD value. `None` when it is not a
/// schema.org Article (the caller moves on to the next script).
fn article_object(doc: &Document, parsed: &Value) -> Option<JsonLdMetadata> {
    let context = parsed.get("@context").and_then(Value::as_str)?;
    if !SCHEMA_DOT_ORG.is_match(context.trim()) {
        return None;
    }

    let node = if parsed.get("@type").is_some() {
        parsed
    } else {
        parsed.get("@graph")?.as_array()?.iter().find(|item| {
            item.get("@type")
                .and_then(Value::as_str)
                .is_some_and(|t| JSONLD_ARTICLE_TYPES.is_match(t))
        })?
    };

    let article_type = node.get("@type").and_then(Value::as_str)?;
    if !JSONLD_ARTICLE_TYPES.is_match(article_type) {
        return None;
    }

    let mut metadata = JsonLdMetadata::default();

    let name = node.get("name").and_then(Value::as_str);
    let headline = node.get("headline").and_then(Value::as_str);
    metadata.title = match (name, headline) {
        (Some(name), Some(headline)) if name != headline => {
            // Some publishers put the site name in "name" and the real
            // title in "headline". Prefer whichever resembles the
            // document title.
            let doc_title = super::article_title(doc);
            let name_matches = text_similarity(name, &doc_title) > 0.75;
            let headline_matches = text_similarity(headline, &doc_title) > 0.75;
            if headline_matches && !name_matches {
                Some(headline.trim().to_string())
            } else {
                Some(name.trim().to_string())
            }
        }
        (Some(name), _) => Some(name.trim().to_string()),
        (None, Some(headline)) => Some(headline.trim().to_string()),
        (None, None) => None,
    };

    metadata.byline = author_names(node.get("author"));
    metadata.excerpt = node
        .get("description")
        .and_then(Value::as_str)
        .map(|v| v.trim().to_string());
    metadata.site_name = node
        .get("publisher")
        .and_then(|p| p.get("name"))
        .and_then(Value::as_str)
        .map(|v| v.trim().to_string());
    metadata.date_published = node
        .get("datePublished")
        .and_then(Value::as_str)
        .map(|v| v.trim().to_string());

    Some(metadata)
}

/// A single author object's name, or every name in an author array
/// joined with commas.
fn author_names(author: Option<&Value>) -> Option<String> {
    match author? {
        Value::Object(map) => map
            .get("name")
            .and_then(Value::as_str)
            .map(|name| name.trim().to_string()),
        Value::Array(authors) => {
            let first_has_name = authors
                .first()
                .is_some_and(|a| a.get("name").and_then(Value::as_str).is_some());
            if !first_has_name {
                return None;
            }
            let names: Vec<&str> = authors
                .iter()
                .filter_map(|a| a.get("name").and_then(Value::as_str))
                .map(str::trim)
                .collect();
            Some(names.join(", "))
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser;

    fn doc_with_script(json: &str) -> Document {
        let html = format!(
            "<html><head><script type=\"application/ld+json\">{json}</script></head>\
             <body><p>content</p></body></html>",
        );
        parser::parse(&html, "http://fakehost/test/page.html")
    }

    #[test]
    fn article_fields_are_extracted() {
        let doc = doc_with_script(
            r#"{
                "@context": "https://schema.org",
                "@type": "NewsArticle",
                "headline": "Ships Sighted Off The Coast",
                "author": {"@type": "Person", "name": "A. Correspondent"},
                "description": "Several ships were sighted.",
                "publisher": {"@type": "Organization", "name": "Coastal Times"},
                "datePublished": "2024-03-01T08:00:00Z"
            }"#,
        );
        let metadata = extract(&doc);
        assert_eq!(metadata.title.as_deref(), Some("Ships Sighted Off The Coast"));
        assert_eq!(metadata.byline.as_deref(), Some("A. Correspondent"));
        assert_eq!(metadata.excerpt.as_deref(), Some("Several ships were sighted."));
        assert_eq!(metadata.site_name.as_deref(), Some("Coastal Times"));
        assert_eq!(
            metadata.date_published.as_deref(),
            Some("2024-03-01T08:00:00Z")
        );
    }

    #[test]
    fn graph_arrays_are_searched_for_articles() {
        let doc = doc_with_script(
            r#"{
                "@context": "http://schema.org",
                "@graph": [
                    {"@type": "WebSite", "name": "Coastal Times"},
                    {"@type": "BlogPosting", "headline": "From The Graph"}
                ]
            }"#,
        );
        let metadata = extract(&doc);
        assert_eq!(metadata.title.as_deref(), Some("From The Graph"));
    }

    #[test]
    fn non_schema_contexts_are_ignored() {
        let doc = doc_with_script(
            r#"{"@context": "https://example.com/vocab", "@type": "Article", "headline": "Nope"}"#,
        );
        assert!(extract(&doc).title.is_none());
    }

    #[test]
    fn non_article_types_are_ignored() {
        let doc = doc_with_script(
            r#"{"@context": "https://schema.org", "@type": "WebSite", "name": "Coastal Times"}"#,
        );
        assert!(extract(&doc).site_name.is_none());
    }

    #[test]
    fn author_arrays_join_names() {
        let doc = doc_with_script(
            r#"{
                "@context": "https://schema.org",
                "@type": "Article",
                "author": [
                    {"@type": "Person", "name": "First Author"},
                    {"@type": "Person", "name": "Second Author"}
                ]
            }"#,
        );
        assert_eq!(
            extract(&doc).byline.as_deref(),
            Some("First Author, Second Author")
        );
    }

    #[test]
    fn malformed_json_is_skipped() {
        let doc = doc_with_script("{not json at all");
        assert!(extract(&doc).title.is_none());
    }

    #[test]
    fn cdata_wrappers_are_stripped() {
        let doc = doc_with_script(
            r#"<![CDATA[{"@context": "https://schema.org", "@type": "Article", "headline": "Wrapped"}]]>"#,
        );
        assert_eq!(extract(&doc).title.as_deref(), Some("Wrapped"));
    }

    #[test]
    fn headline_beats_site_name_in_name_field() {
        let html = concat!(
            "<html><head><title>The Actual Headline Of This Piece</title>",
            "<script type=\"application/ld+json\">",
            r#"{"@context": "https://schema.org", "@type": "Article", "name": "Coastal Times", "headline": "The Actual Headline Of This Piece"}"#,
            "</script></head><body></body></html>",
        );
        let doc = parser::parse(html, "http://fakehost/test/page.html");
        assert_eq!(
            extract(&doc).title.as_deref(),
            Some("The Actual Headline Of This Piece")
        );
    }
}
