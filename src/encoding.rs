//! Byte payload decoding.
//!
//! Web pages arrive as bytes in whatever encoding the server felt like.
//! Detection order: byte-order mark, then charset declarations in the
//! first kilobyte of markup, then the UTF-8 default. Decoding never
//! fails; malformed sequences become replacement characters.

#![allow(clippy::expect_used)]

use std::sync::LazyLock;

use encoding_rs::{Encoding, UTF_8};
use regex::Regex;

/// How far into the payload charset declarations are looked for.
const DETECTION_WINDOW: usize = 1024;

/// `<meta charset="...">`, quoted or bare.
static META_CHARSET: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<meta[^>]+charset\s*=\s*["']?([^"'\s;>]+)"#).expect("META_CHARSET regex")
});

/// `<meta http-equiv="Content-Type" content="...; charset=...">`.
static META_HTTP_EQUIV: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?i)<meta[^>]+http-equiv\s*=\s*["']?content-type["']?[^>]+content\s*=\s*["']?[^"'>]*;\s*charset\s*=\s*([^"'\s>]+)"#,
    )
    .expect("META_HTTP_EQUIV regex")
});

/// Picks the encoding the payload advertises. The `charset` attribute
/// form wins over the `http-equiv` form when both appear; unknown labels
/// fall through to UTF-8.
#[must_use]
pub fn detect(bytes: &[u8]) -> &'static Encoding {
    if let Some((encoding, _)) = Encoding::for_bom(bytes) {
        return encoding;
    }

    let window = &bytes[..bytes.len().min(DETECTION_WINDOW)];
    let head = String::from_utf8_lossy(window);

    for pattern in [&META_CHARSET, &META_HTTP_EQUIV] {
        let label = pattern
            .captures(&head)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str());
        if let Some(encoding) = label.and_then(|l| Encoding::for_label(l.as_bytes())) {
            return encoding;
        }
    }

    UTF_8
}

/// Decodes the payload to a UTF-8 string, dropping any leading BOM.
#[must_use]
pub fn decode(bytes: &[u8]) -> String {
    let encoding = detect(bytes);
    let (decoded, _, _) = encoding.decode(bytes);
    decoded.into_owned()
}
