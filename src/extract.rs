//! The extraction pipeline.
//!
//! Order is load-bearing: noscript image recovery and JSON-LD reads run
//! while scripts are still in the tree, metadata resolves before the
//! grab (the walk compares headers against the title), and
//! post-processing touches only the winning subtree. The element-count
//! ceiling is checked up front so an oversized document fails before any
//! mutation.

use crate::dom::Document;
use crate::error::{Error, Result};
use crate::html_processing;
use crate::metadata::{self, json_ld};
use crate::options::ExtractionOptions;
use crate::result::ExtractionResult;
use crate::scoring;

/// Runs the full pipeline against an already parsed document.
///
/// The document is mutated in place (scripts dropped, `<br>` runs
/// folded, wrappers collapsed); the returned content comes from a
/// per-attempt working copy, so the input tree is never the output tree.
///
/// # Errors
/// `TooManyElements` when the document exceeds the configured ceiling,
/// `NoBody` for documents without any element, `NoContent` when every
/// scoring attempt comes up empty, `Serialization` from a
/// caller-supplied serializer.
pub fn extract_from_document(
    doc: &mut Document,
    options: &ExtractionOptions,
) -> Result<ExtractionResult> {
    if options.max_elems_to_parse > 0 {
        let found = doc.element_count();
        if found > options.max_elems_to_parse {
            return Err(Error::TooManyElements {
                found,
                limit: options.max_elems_to_parse,
            });
        }
    }

    html_processing::unwrap_noscript_images(doc);

    // Structured data has to be read before the scripts carrying it go.
    let json_ld = if options.disable_json_ld {
        json_ld::JsonLdMetadata::default()
    } else {
        json_ld::extract(doc)
    };

    html_processing::remove_scripts(doc);
    html_processing::prep_document(doc);

    let metadata = metadata::extract_metadata(doc, &json_ld);
    if options.debug {
        eprintln!("[extract] resolved title: {:?}", metadata.title);
    }

    let mut outcome = scoring::extract_main_content(doc, &metadata.title, options)?;
    if options.debug && outcome.used_alternatives {
        eprintln!("[extract] used relaxed heuristics or a synthetic container");
    }

    html_processing::post_process(&mut outcome.doc, outcome.article, options);

    let text_content = outcome.doc.inner_text(outcome.article, true);
    let length = text_content.chars().count();

    let excerpt = metadata
        .excerpt
        .filter(|e| !e.trim().is_empty())
        .or_else(|| {
            outcome
                .doc
                .elements_by_tag(outcome.article, &["p"])
                .first()
                .map(|&p| metadata::excerpt_from_text(&outcome.doc.inner_text(p, true)))
        });

    let content = match &options.serializer {
        Some(serialize) => {
            serialize(&outcome.doc, outcome.article).map_err(Error::Serialization)?
        }
        None => outcome.doc.inner_html(outcome.article),
    };

    Ok(ExtractionResult {
        title: metadata.title,
        byline: metadata.byline.or(outcome.byline),
        dir: outcome.dir,
        lang: outcome.lang,
        content,
        text_content,
        length,
        excerpt,
        site_name: metadata.site_name,
        published_time: metadata.published_time,
    })
}
