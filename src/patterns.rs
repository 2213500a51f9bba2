//! Compiled regex patterns and tag tables for content extraction.
//!
//! All patterns are compiled once at startup using `LazyLock`. Keeping the
//! heuristic data here, away from the tree-walking code, keeps it
//! declarative and testable in isolation.

#![allow(clippy::expect_used)]

use std::sync::LazyLock;

use regex::Regex;

// =============================================================================
// Candidate classification
// =============================================================================

/// Class/id keywords marking a node as probable boilerplate, eligible for
/// early removal.
pub static UNLIKELY_CANDIDATES: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)-ad-|ai2html|banner|breadcrumbs|combx|comment|community|cover-wrap|disqus|extra|footer|gdpr|header|legends|menu|related|remark|replies|rss|shoutbox|sidebar|skyscraper|social|sponsor|supplemental|ad-break|agegate|pagination|pager|popup|yom-remote",
    )
    .expect("UNLIKELY_CANDIDATES regex")
});

/// Exceptions to the unlikely-candidate rule: keywords that rescue a node
/// even when it also matches [`UNLIKELY_CANDIDATES`].
pub static MAYBE_CANDIDATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)and|article|body|column|content|main|shadow").expect("MAYBE_CANDIDATE regex")
});

/// Class/id keywords that raise a candidate's score.
pub static POSITIVE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)article|body|content|entry|hentry|h-entry|main|page|pagination|post|text|blog|story")
        .expect("POSITIVE regex")
});

/// Class/id keywords that lower a candidate's score.
pub static NEGATIVE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)-ad-|hidden|^hid$|\shid$|\shid\s|^hid\s|banner|combx|comment|com-|contact|footer|gdpr|masthead|media|meta|outbrain|promo|related|scroll|share|shoutbox|sidebar|skyscraper|sponsor|shopping|tags|widget",
    )
    .expect("NEGATIVE regex")
});

/// ARIA roles that mark a subtree as non-content.
pub const UNLIKELY_ROLES: &[&str] = &[
    "menu",
    "menubar",
    "complementary",
    "navigation",
    "alert",
    "alertdialog",
    "dialog",
];

/// Byline markers checked against class/id/rel/itemprop values.
pub static BYLINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)byline|author|dateline|writtenby|p-author").expect("BYLINE regex")
});

/// Share widgets removed from selected content.
pub static SHARE_ELEMENTS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(\b|_)(share|sharedaddy)(\b|_)").expect("SHARE_ELEMENTS regex")
});

/// Default allowlist for embed/iframe sources worth keeping.
pub static VIDEOS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)//(www\.)?((dailymotion|youtube|youtube-nocookie|player\.vimeo|v\.qq)\.com|(archive|upload\.wikimedia)\.org|player\.twitch\.tv)",
    )
    .expect("VIDEOS regex")
});

/// Whole-text ad labels in several languages; a container holding nothing
/// else is an ad slot.
pub static AD_WORDS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(ad(vertising|vertisement)?|pub(licité)?|werb(ung)?|广告|реклама|anuncio)$")
        .expect("AD_WORDS regex")
});

/// Whole-text loading placeholders left behind by scripted pages.
pub static LOADING_WORDS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^((loading|正在加载|загрузка|chargement|cargando)(…|\.\.\.)?)$")
        .expect("LOADING_WORDS regex")
});

// =============================================================================
// Text measurement
// =============================================================================

/// Comma characters across scripts, counted when scoring prose density.
pub static COMMAS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new("[,\u{060C}\u{FE50}\u{FE51}\u{FF0C}\u{FF64}]").expect("COMMAS regex")
});

/// Whitespace runs collapsed to a single space by normalized text getters.
pub static NORMALIZE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("NORMALIZE regex"));

/// Word-boundary splitter used when comparing headings against the title.
pub static TOKENIZE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\W+").expect("TOKENIZE regex"));

/// Anchor href values that only jump within the page.
pub static HASH_URL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^#.+").expect("HASH_URL regex"));

/// One candidate URL inside a `srcset` attribute value.
pub static SRCSET_URL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\S+)(\s+[\d.]+[xw])?(\s*(?:,|$))").expect("SRCSET_URL regex"));

/// Base64 `data:` URI prefix; capture 1 is the MIME type.
pub static B64_DATA_URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^data:\s*([^\s;,]+)\s*;\s*base64\s*,").expect("B64_DATA_URL regex")
});

/// An image-file extension anywhere in an attribute value.
pub static IMAGE_EXTENSION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\.(jpg|jpeg|png|webp)").expect("IMAGE_EXTENSION regex"));

/// An image URL followed by a size descriptor, the shape of a `srcset`
/// entry stashed in a lazy-loading data attribute.
pub static LAZY_SRCSET_VALUE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\.(jpg|jpeg|png|webp)\s+\d").expect("LAZY_SRCSET_VALUE regex")
});

/// A single bare image URL, the shape of a `src` stashed in a lazy-loading
/// data attribute.
pub static LAZY_SRC_VALUE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\s*\S+\.(jpg|jpeg|png|webp)\S*\s*$").expect("LAZY_SRC_VALUE regex")
});

// =============================================================================
// Metadata
// =============================================================================

/// Separators between an article title and a trailing site-name suffix.
/// Dashes and pipes need whitespace on both sides; a colon only needs it
/// after, so `Title: Site` splits while `12:30` stays intact.
pub static TITLE_SEPARATOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:\s+[\|\-–—]\s+|:\s+)").expect("TITLE_SEPARATOR regex"));

/// `<meta property="...">` values worth collecting (og/twitter/dc families).
pub static META_PROPERTY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\s*(article|dc|dcterm|og|twitter)\s*:\s*(author|creator|published_time|description|title|site_name)\s*")
        .expect("META_PROPERTY regex")
});

/// `<meta name="...">` values worth collecting.
pub static META_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^\s*(?:(dc|dcterm|og|twitter|parsely|weibo:(article|webpage))\s*[-\.:]\s*)?(author|creator|pub-date|description|title|site_name)\s*$",
    )
    .expect("META_NAME regex")
});

/// Accepted `@context` values marking a block as schema.org JSON-LD.
pub static SCHEMA_DOT_ORG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^https?://schema\.org/?$").expect("SCHEMA_DOT_ORG regex"));

/// Schema.org types treated as article-like when reading JSON-LD.
pub static JSONLD_ARTICLE_TYPES: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(Article|AdvertiserContentArticle|NewsArticle|AnalysisNewsArticle|AskPublicNewsArticle|BackgroundNewsArticle|OpinionNewsArticle|ReportageNewsArticle|ReviewNewsArticle|Report|SatiricalArticle|ScholarlyArticle|MedicalScholarlyArticle|SocialMediaPosting|BlogPosting|LiveBlogPosting|DiscussionForumPosting|TechArticle|APIReference)$",
    )
    .expect("JSONLD_ARTICLE_TYPES regex")
});

// =============================================================================
// Tag tables
// =============================================================================

/// Elements that never take children and never go on the open stack.
pub const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param", "source",
    "track", "wbr",
];

/// Tags eligible for direct scoring (content-bearing tags).
pub const TAGS_TO_SCORE: &[&str] = &["p", "div", "td", "pre", "blockquote", "article"];

/// Block-level tags whose presence stops a `<div>` from collapsing to `<p>`.
pub const DIV_TO_P_ELEMS: &[&str] = &[
    "blockquote", "dl", "div", "img", "ol", "p", "pre", "table", "ul",
];

/// Tags a synthetic top candidate is allowed to keep instead of `<div>`.
pub const ALTER_TO_DIV_EXCEPTIONS: &[&str] = &["div", "article", "section", "p"];

/// Attributes that only affect presentation, stripped from selected content.
pub const PRESENTATIONAL_ATTRIBUTES: &[&str] = &[
    "align",
    "background",
    "bgcolor",
    "border",
    "cellpadding",
    "cellspacing",
    "frame",
    "hspace",
    "rules",
    "style",
    "valign",
    "vspace",
];

/// Elements whose `width`/`height` attributes are legacy presentation.
pub const DEPRECATED_SIZE_ATTRIBUTE_ELEMS: &[&str] = &["table", "th", "td", "hr", "pre"];

/// Phrasing-content tags (inline flow); used when rebuilding paragraphs.
pub const PHRASING_ELEMS: &[&str] = &[
    "abbr", "audio", "b", "bdo", "br", "button", "cite", "code", "data", "datalist", "dfn", "em",
    "embed", "i", "img", "input", "kbd", "label", "mark", "math", "meter", "noscript", "object",
    "output", "progress", "q", "ruby", "samp", "script", "select", "small", "span", "strong",
    "sub", "sup", "textarea", "time", "var", "wbr",
];

/// Embedded-media tags subject to the video allowlist.
pub const EMBED_ELEMENTS: &[&str] = &["object", "embed", "iframe"];

/// Class values preserved by default when class stripping is on.
pub const DEFAULT_CLASSES_TO_PRESERVE: &[&str] = &["page"];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unlikely_candidates_flag_boilerplate_classes() {
        assert!(UNLIKELY_CANDIDATES.is_match("sidebar-widget"));
        assert!(UNLIKELY_CANDIDATES.is_match("comment-thread"));
        assert!(UNLIKELY_CANDIDATES.is_match("site footer"));
        assert!(!UNLIKELY_CANDIDATES.is_match("article-text"));
    }

    #[test]
    fn maybe_candidate_rescues_content_containers() {
        assert!(MAYBE_CANDIDATE.is_match("main-column"));
        assert!(MAYBE_CANDIDATE.is_match("article-footer"));
        assert!(!MAYBE_CANDIDATE.is_match("sidebar"));
    }

    #[test]
    fn class_weights_split_positive_and_negative() {
        assert!(POSITIVE.is_match("post-body"));
        assert!(POSITIVE.is_match("h-entry"));
        assert!(NEGATIVE.is_match("share-tools"));
        assert!(NEGATIVE.is_match("com-widget"));
        assert!(!NEGATIVE.is_match("story"));
    }

    #[test]
    fn videos_allowlist_matches_hosted_players() {
        assert!(VIDEOS.is_match("https://www.youtube.com/embed/abc123"));
        assert!(VIDEOS.is_match("//player.vimeo.com/video/99"));
        assert!(!VIDEOS.is_match("https://evil.example.com/embed"));
    }

    #[test]
    fn commas_cover_fullwidth_and_arabic_forms() {
        assert_eq!(COMMAS.find_iter("a, b\u{060C} c\u{FF0C} d").count(), 3);
    }

    #[test]
    fn meta_name_accepts_bare_and_prefixed_forms() {
        assert!(META_NAME.is_match("author"));
        assert!(META_NAME.is_match("dc:creator"));
        assert!(META_NAME.is_match("twitter:description"));
        assert!(META_NAME.is_match("weibo:article:title"));
        assert!(!META_NAME.is_match("viewport"));
    }

    #[test]
    fn jsonld_types_anchor_exactly() {
        assert!(JSONLD_ARTICLE_TYPES.is_match("NewsArticle"));
        assert!(JSONLD_ARTICLE_TYPES.is_match("BlogPosting"));
        assert!(!JSONLD_ARTICLE_TYPES.is_match("NewsArticleFoo"));
        assert!(!JSONLD_ARTICLE_TYPES.is_match("WebSite"));
    }

    #[test]
    fn srcset_url_captures_descriptors() {
        let caps: Vec<_> = SRCSET_URL
            .captures_iter("a.jpg 1x, b.jpg 2x")
            .map(|c| c[1].to_string())
            .collect();
        assert_eq!(caps, vec!["a.jpg", "b.jpg"]);
    }
}
