//! # legible
//!
//! Pulls the main readable content out of web pages: the article text,
//! cleaned of navigation, advertising, and other boilerplate, along with
//! the metadata a reader view wants (title, byline, excerpt, site name,
//! language, publication time).
//!
//! The pipeline parses markup into an arena-backed tree, scores
//! paragraph-bearing candidates by text shape and class hints, picks the
//! best subtree (retrying with fewer heuristics when the result is too
//! thin), then cleans and serializes just that subtree.
//!
//! ## Quick Start
//!
//! ```rust
//! let html = r#"<html><head><title>A Walk To Remember</title></head>
//! <body><div>
//! <p>The first paragraph of the article, long enough that the scorer
//! counts it, with commas, clauses, and a full stop at the end.</p>
//! <p>A second paragraph keeps the prose going well past the point
//! where a navigation block would have given up.</p>
//! </div></body></html>"#;
//!
//! let result = legible::extract(html, "https://example.com/article")?;
//! assert_eq!(result.title, "A Walk To Remember");
//! assert!(result.content.contains("first paragraph"));
//! # Ok::<(), legible::Error>(())
//! ```
//!
//! ## Features
//!
//! - **Content extraction**: finds the subtree holding the article
//! - **Metadata**: JSON-LD, Open Graph, Twitter cards, meta tag fallbacks
//! - **Quick pre-check**: [`is_probably_readerable`] without a full run
//! - **Byte input**: charset sniffing and transcoding via [`extract_bytes`]
//! - **Pluggable**: custom serializers and visibility checkers

mod entities;
mod extract;
mod html_processing;
mod link_density;
mod metadata;
mod options;
mod parser;
mod patterns;
mod readerable;
mod result;
mod scoring;

/// Arena-backed document tree with browser-shaped traversal accessors.
pub mod dom;

/// Byte payload decoding (BOM and meta charset sniffing).
pub mod encoding;

/// Error and result types.
pub mod error;

/// Subprocess wrapper around the HTML Tidy normalizer.
pub mod tidy;

/// URL resolution against the document base.
pub mod url_utils;

// Public API - re-exports
pub use dom::{Document, NodeId};
pub use error::{Error, Result};
pub use extract::extract_from_document;
pub use options::{ExtractionOptions, ReaderableOptions, SerializerFn, VisibilityCheckerFn};
pub use readerable::{is_probably_readerable, is_probably_readerable_with};
pub use result::ExtractionResult;

/// Parses markup into a document tree.
///
/// Parsing is lenient and never fails: malformed input is recovered
/// from, and anything noteworthy lands in [`Document::issues`]. The
/// `document_uri` seeds link resolution; a `<base href>` in the markup
/// overrides it for relative references.
///
/// # Example
///
/// ```rust
/// let doc = legible::parse("<p>hello</p>", "https://example.com/");
/// let p = doc.elements_by_tag(doc.root(), &["p"])[0];
/// assert_eq!(doc.text_content(p), "hello");
/// ```
#[must_use]
pub fn parse(html: &str, document_uri: &str) -> Document {
    parser::parse(html, document_uri)
}

/// Extracts the main content of `html` using default options.
///
/// # Errors
/// [`Error::NoBody`] when the markup holds no elements at all,
/// [`Error::NoContent`] when nothing article-shaped can be found. The
/// element ceiling and serializer errors cannot occur with defaults.
pub fn extract(html: &str, document_uri: &str) -> Result<ExtractionResult> {
    extract_with_options(html, document_uri, &ExtractionOptions::default())
}

/// Extracts the main content of `html` with custom options.
///
/// ```rust
/// use legible::ExtractionOptions;
///
/// let html = "<html><body><div><p>Short but real article text, \
///             with just enough in it to score.</p></div></body></html>";
/// let options = ExtractionOptions {
///     char_threshold: 20,
///     ..ExtractionOptions::default()
/// };
/// let result = legible::extract_with_options(html, "https://example.com/", &options)?;
/// assert!(result.text_content.contains("real article text"));
/// # Ok::<(), legible::Error>(())
/// ```
///
/// # Errors
/// Everything [`extract_from_document`] can return.
pub fn extract_with_options(
    html: &str,
    document_uri: &str,
    options: &ExtractionOptions,
) -> Result<ExtractionResult> {
    let mut doc = parser::parse(html, document_uri);
    extract::extract_from_document(&mut doc, options)
}

/// Extracts from raw bytes, sniffing the charset first (BOM, then meta
/// declarations, then UTF-8 as the fallback).
///
/// ```rust
/// let html: &[u8] = b"<html><head><meta charset=\"ISO-8859-1\"></head>\
/// <body><div><p>Une promenade au caf\xE9 du coin, suivie d'une longue \
/// discussion sur le sens des virgules, des phrases.</p></div></body></html>";
/// let result = legible::extract_bytes(html, "https://example.com/")?;
/// assert!(result.text_content.contains("café"));
/// # Ok::<(), legible::Error>(())
/// ```
///
/// # Errors
/// Same as [`extract`]; decoding itself never fails.
pub fn extract_bytes(html: &[u8], document_uri: &str) -> Result<ExtractionResult> {
    extract_bytes_with_options(html, document_uri, &ExtractionOptions::default())
}

/// Byte-input variant of [`extract_with_options`].
///
/// # Errors
/// Same as [`extract_with_options`]; decoding itself never fails.
pub fn extract_bytes_with_options(
    html: &[u8],
    document_uri: &str,
    options: &ExtractionOptions,
) -> Result<ExtractionResult> {
    let decoded = encoding::decode(html);
    extract_with_options(&decoded, document_uri, options)
}
