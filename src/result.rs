//! Result type for extraction output.
//!
//! The fields mirror what reader views consume: the cleaned content in
//! both HTML and plain-text form plus the document metadata that survived
//! the priority chain (JSON-LD, then meta tags, then the tree itself).

use serde::Serialize;

/// Result of extracting the main readable content from a document.
///
/// Optional fields are `None` when the document offered nothing for them;
/// serialized output renders them as `null` under camelCase keys.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractionResult {
    /// Article title.
    pub title: String,

    /// Author byline.
    pub byline: Option<String>,

    /// Text direction of the content (`ltr` or `rtl`).
    pub dir: Option<String>,

    /// Content language declared by the document.
    pub lang: Option<String>,

    /// Serialized markup of the extracted content.
    pub content: String,

    /// Extracted content as plain text with collapsed whitespace.
    pub text_content: String,

    /// Character count of `text_content`.
    pub length: usize,

    /// Short description or first-paragraph excerpt.
    pub excerpt: Option<String>,

    /// Name of the publishing site.
    pub site_name: Option<String>,

    /// Publication time as the document declared it.
    pub published_time: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_with_camel_case_keys_and_nulls() {
        let result = ExtractionResult {
            title: "A title".to_owned(),
            content: "<div><p>body</p></div>".to_owned(),
            text_content: "body".to_owned(),
            length: 4,
            site_name: Some("Example".to_owned()),
            ..ExtractionResult::default()
        };
        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(value["title"], "A title");
        assert_eq!(value["textContent"], "body");
        assert_eq!(value["length"], 4);
        assert_eq!(value["siteName"], "Example");
        assert!(value["byline"].is_null());
        assert!(value["publishedTime"].is_null());
    }
}
