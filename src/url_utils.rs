//! URI resolution helpers.
//!
//! Used for `<base href>` handling and for rewriting relative `href`/`src`/
//! `srcset` values in selected content against the document's base URI.

use url::Url;

use crate::patterns;

/// Resolves a URI reference against `base` using standard reference
/// resolution: absolute references pass through unchanged, root-relative
/// paths replace the base path, and relative paths resolve against the
/// base directory.
///
/// Returns `None` when neither the reference nor the base yields a usable
/// absolute URI.
#[must_use]
pub fn resolve(base: &str, reference: &str) -> Option<String> {
    let reference = reference.trim();
    if reference.is_empty() {
        return None;
    }

    // Pseudo-URIs travel as-is; joining would only mangle them.
    let lower = reference.to_ascii_lowercase();
    if lower.starts_with("data:")
        || lower.starts_with("javascript:")
        || lower.starts_with("mailto:")
        || lower.starts_with("tel:")
    {
        return Some(reference.to_owned());
    }

    if Url::parse(reference).is_ok() {
        return Some(reference.to_owned());
    }

    let base = Url::parse(base).ok()?;
    base.join(reference).ok().map(Into::into)
}

/// Rewrites each candidate URL inside a `srcset` value against `base`,
/// keeping density/width descriptors and separators in place.
#[must_use]
pub fn rewrite_srcset(base: &str, srcset: &str) -> String {
    patterns::SRCSET_URL
        .replace_all(srcset, |caps: &regex::Captures<'_>| {
            let descriptor = caps.get(2).map_or("", |m| m.as_str());
            let terminator = caps.get(3).map_or("", |m| m.as_str());
            match resolve(base, &caps[1]) {
                Some(absolute) => format!("{absolute}{descriptor}{terminator}"),
                None => caps[0].to_string(),
            }
        })
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "http://fakehost/some/dir/page.html";

    #[test]
    fn relative_paths_resolve_against_base_directory() {
        assert_eq!(
            resolve(BASE, "fakerelative"),
            Some("http://fakehost/some/dir/fakerelative".to_owned())
        );
    }

    #[test]
    fn root_relative_paths_replace_the_path() {
        assert_eq!(
            resolve(BASE, "/rooted/path"),
            Some("http://fakehost/rooted/path".to_owned())
        );
    }

    #[test]
    fn scheme_relative_references_keep_the_base_scheme() {
        assert_eq!(
            resolve(BASE, "//otherhost/x"),
            Some("http://otherhost/x".to_owned())
        );
    }

    #[test]
    fn absolute_references_pass_through() {
        assert_eq!(
            resolve(BASE, "https://absolute/"),
            Some("https://absolute/".to_owned())
        );
    }

    #[test]
    fn pseudo_uris_are_preserved_verbatim() {
        assert_eq!(
            resolve(BASE, "javascript:void(0)"),
            Some("javascript:void(0)".to_owned())
        );
        assert_eq!(
            resolve(BASE, "data:image/gif;base64,AAAA"),
            Some("data:image/gif;base64,AAAA".to_owned())
        );
    }

    #[test]
    fn unusable_references_return_none() {
        assert_eq!(resolve("not a uri", "also relative"), None);
        assert_eq!(resolve(BASE, "   "), None);
    }

    #[test]
    fn srcset_urls_rewrite_and_keep_descriptors() {
        let rewritten = rewrite_srcset(BASE, "small.jpg 1x, imgs/big.jpg 2x");
        assert_eq!(
            rewritten,
            "http://fakehost/some/dir/small.jpg 1x, http://fakehost/some/dir/imgs/big.jpg 2x"
        );
    }
}
