//! Configuration for extraction and the readerability check.
//!
//! Both structs are plain data with public fields; use `Default::default()`
//! for standard settings and struct update syntax to override individual
//! fields.

use std::fmt;
use std::sync::Arc;

use regex::Regex;

use crate::dom::{Document, NodeId};

/// Pluggable serializer for the selected content subtree.
///
/// Receives the document and the node to serialize; an `Err` aborts the
/// extraction with [`Error::Serialization`](crate::Error::Serialization).
pub type SerializerFn =
    Arc<dyn Fn(&Document, NodeId) -> Result<String, String> + Send + Sync>;

/// Pluggable node-visibility predicate for
/// [`is_probably_readerable`](crate::is_probably_readerable).
pub type VisibilityCheckerFn = Arc<dyn Fn(&Document, NodeId) -> bool + Send + Sync>;

/// Configuration options for content extraction.
///
/// # Example
///
/// ```rust
/// use legible::ExtractionOptions;
///
/// // Use defaults
/// let options = ExtractionOptions::default();
///
/// // Customize specific fields
/// let options = ExtractionOptions {
///     char_threshold: 250,
///     keep_classes: true,
///     ..ExtractionOptions::default()
/// };
/// ```
#[derive(Clone)]
pub struct ExtractionOptions {
    /// Print scoring and cleaning decisions to stderr while extracting.
    ///
    /// Default: `false`
    pub debug: bool,

    /// Abort with [`Error::TooManyElements`](crate::Error::TooManyElements)
    /// when the parsed document holds more elements than this. `0` means
    /// unlimited.
    ///
    /// Default: `0`
    pub max_elems_to_parse: usize,

    /// How many top-scored candidates to consider when looking for the
    /// best common ancestor.
    ///
    /// Default: `5`
    pub nb_top_candidates: usize,

    /// Minimum article text length. Extraction retries with progressively
    /// fewer heuristics until the result reaches this many characters.
    ///
    /// Default: `500`
    pub char_threshold: usize,

    /// Class names to keep when class attributes are stripped from the
    /// output. `"page"` is always preserved.
    ///
    /// Default: empty
    pub classes_to_preserve: Vec<String>,

    /// Keep every class attribute in the output instead of stripping them.
    ///
    /// Default: `false`
    pub keep_classes: bool,

    /// Skip JSON-LD metadata parsing.
    ///
    /// Default: `false`
    pub disable_json_ld: bool,

    /// Video embed URLs matching this pattern survive conditional cleaning.
    /// `None` uses the built-in pattern (YouTube, Vimeo, and friends).
    ///
    /// Default: `None`
    pub allowed_video_regex: Option<Regex>,

    /// Custom serializer for the extracted content. `None` uses the
    /// built-in markup serializer.
    ///
    /// Default: `None`
    pub serializer: Option<SerializerFn>,
}

impl Default for ExtractionOptions {
    fn default() -> Self {
        Self {
            debug: false,
            max_elems_to_parse: 0,
            nb_top_candidates: 5,
            char_threshold: 500,
            classes_to_preserve: Vec::new(),
            keep_classes: false,
            disable_json_ld: false,
            allowed_video_regex: None,
            serializer: None,
        }
    }
}

impl fmt::Debug for ExtractionOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExtractionOptions")
            .field("debug", &self.debug)
            .field("max_elems_to_parse", &self.max_elems_to_parse)
            .field("nb_top_candidates", &self.nb_top_candidates)
            .field("char_threshold", &self.char_threshold)
            .field("classes_to_preserve", &self.classes_to_preserve)
            .field("keep_classes", &self.keep_classes)
            .field("disable_json_ld", &self.disable_json_ld)
            .field("allowed_video_regex", &self.allowed_video_regex)
            .field("serializer", &self.serializer.as_ref().map(|_| "<fn>"))
            .finish()
    }
}

/// Configuration for [`is_probably_readerable`](crate::is_probably_readerable).
#[derive(Clone)]
pub struct ReaderableOptions {
    /// Minimum text length a paragraph-like node needs before it
    /// contributes to the score.
    ///
    /// Default: `140`
    pub min_content_length: usize,

    /// Score the accumulated `sqrt` contributions must exceed.
    ///
    /// Default: `20.0`
    pub min_score: f64,

    /// Overrides the built-in visibility guess (inline `display:none`,
    /// `hidden`, `aria-hidden`).
    ///
    /// Default: `None`
    pub visibility_checker: Option<VisibilityCheckerFn>,
}

impl ReaderableOptions {
    /// Default thresholds with a custom visibility predicate, for callers
    /// that only want to swap the visibility check.
    #[must_use]
    pub fn with_visibility_checker(checker: VisibilityCheckerFn) -> Self {
        Self {
            visibility_checker: Some(checker),
            ..Self::default()
        }
    }
}

impl Default for ReaderableOptions {
    fn default() -> Self {
        Self {
            min_content_length: 140,
            min_score: 20.0,
            visibility_checker: None,
        }
    }
}

impl fmt::Debug for ReaderableOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReaderableOptions")
            .field("min_content_length", &self.min_content_length)
            .field("min_score", &self.min_score)
            .field(
                "visibility_checker",
                &self.visibility_checker.as_ref().map(|_| "<fn>"),
            )
            .finish()
    }
}
