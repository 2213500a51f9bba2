//! Meta tag harvesting.
//!
//! Collects `<meta>` content into a flat map keyed by the normalized
//! `property` or `name` attribute (lowercased, whitespace removed, dots
//! folded to colons), so the priority chains can look values up without
//! caring which spelling the page used.

use std::collections::HashMap;

use crate::dom::Document;
use crate::patterns::{META_NAME, META_PROPERTY};

/// One pass over every `<meta>` in the document. Later duplicates of the
/// same key overwrite earlier ones.
pub(crate) fn harvest(doc: &Document) -> HashMap<String, String> {
    let mut values = HashMap::new();

    for meta in doc.elements_by_tag(doc.root(), &["meta"]) {
        let Some(content) = doc.attribute(meta, "content") else {
            continue;
        };
        if content.is_empty() {
            continue;
        }

        let mut matched_property = false;
        if let Some(property) = doc.attribute(meta, "property") {
            if let Some(found) = META_PROPERTY.find(property) {
                matched_property = true;
                let key: String = found
                    .as_str()
                    .to_lowercase()
                    .split_whitespace()
                    .collect();
                values.insert(key, content.trim().to_string());
            }
        }

        if !matched_property {
            if let Some(name) = doc.attribute(meta, "name") {
                if META_NAME.is_match(name) {
                    let key = name
                        .to_lowercase()
                        .split_whitespace()
                        .collect::<String>()
                        .replace('.', ":");
                    values.insert(key, content.trim().to_string());
                }
            }
        }
    }

    values
}
