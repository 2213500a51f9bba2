//! Character-reference decoding and serialize-side escaping.
//!
//! The parser decodes named and numeric references in text and attribute
//! values; the serializer re-encodes the five reserved characters so that
//! `&amp;`, `&lt;`, `&gt;`, `&quot;`, and `&apos;` round-trip in named form.

use std::borrow::Cow;

/// Longest reference body we will scan for before giving up on a `&`.
/// Named entities top out well below this; numeric references fit too.
const MAX_REFERENCE_LEN: usize = 10;

/// Decode all character references in `raw`.
///
/// Unknown or malformed references are left as literal text, matching the
/// lenient parsing contract: a stray `&` never fails a document.
#[must_use]
pub fn decode(raw: &str) -> Cow<'_, str> {
    if !raw.contains('&') {
        return Cow::Borrowed(raw);
    }

    let mut out = String::with_capacity(raw.len());
    let mut rest = raw;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        rest = &rest[amp..];

        // Reference body sits between '&' and a nearby ';'. Byte scan keeps
        // the slice endpoints on ASCII, so char boundaries are never split.
        let mut semi = None;
        for (i, &b) in rest.as_bytes().iter().enumerate().skip(1) {
            if i > MAX_REFERENCE_LEN + 1 {
                break;
            }
            if b == b';' {
                semi = Some(i);
                break;
            }
        }
        match semi.and_then(|end| decode_reference(&rest[1..end]).map(|d| (end, d))) {
            Some((end, decoded)) => {
                out.push_str(&decoded);
                rest = &rest[end + 1..];
            }
            None => {
                out.push('&');
                rest = &rest[1..];
            }
        }
    }
    out.push_str(rest);
    Cow::Owned(out)
}

/// Escape the five reserved characters for markup output.
///
/// Used for both text content and attribute values so the two sides of the
/// pipeline stay symmetric.
#[must_use]
pub fn escape(text: &str) -> Cow<'_, str> {
    if !text.contains(['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(text);
    }

    let mut out = String::with_capacity(text.len() + 8);
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    Cow::Owned(out)
}

/// Decode one reference body (the part between `&` and `;`).
fn decode_reference(body: &str) -> Option<String> {
    if let Some(numeric) = body.strip_prefix('#') {
        return decode_numeric(numeric).map(String::from);
    }
    named(body).map(str::to_owned)
}

/// Decode a numeric reference body (`123` or `x1F4A9` / `X1F4A9`).
fn decode_numeric(body: &str) -> Option<char> {
    let code = if let Some(hex) = body.strip_prefix(['x', 'X']) {
        u32::from_str_radix(hex, 16).ok()?
    } else {
        body.parse::<u32>().ok()?
    };
    // Rejects surrogates and out-of-range values; NUL renders unusably.
    match char::from_u32(code) {
        Some('\0') | None => None,
        Some(c) => Some(c),
    }
}

/// The common named-entity table: the five reserved characters plus the
/// typographic and symbol names that show up constantly in article markup.
fn named(name: &str) -> Option<&'static str> {
    let decoded = match name {
        "amp" => "&",
        "lt" => "<",
        "gt" => ">",
        "quot" => "\"",
        "apos" => "'",
        "nbsp" => "\u{a0}",
        "shy" => "\u{ad}",
        "iexcl" => "¡",
        "cent" => "¢",
        "pound" => "£",
        "curren" => "¤",
        "yen" => "¥",
        "sect" => "§",
        "copy" => "©",
        "laquo" => "«",
        "raquo" => "»",
        "reg" => "®",
        "deg" => "°",
        "plusmn" => "±",
        "sup2" => "²",
        "sup3" => "³",
        "micro" => "µ",
        "para" => "¶",
        "middot" => "·",
        "frac14" => "¼",
        "frac12" => "½",
        "frac34" => "¾",
        "iquest" => "¿",
        "times" => "×",
        "divide" => "÷",
        "szlig" => "ß",
        "ndash" => "–",
        "mdash" => "—",
        "lsquo" => "\u{2018}",
        "rsquo" => "\u{2019}",
        "sbquo" => "\u{201a}",
        "ldquo" => "\u{201c}",
        "rdquo" => "\u{201d}",
        "bdquo" => "\u{201e}",
        "dagger" => "†",
        "Dagger" => "‡",
        "bull" => "•",
        "hellip" => "…",
        "permil" => "‰",
        "prime" => "′",
        "Prime" => "″",
        "lsaquo" => "‹",
        "rsaquo" => "›",
        "euro" => "€",
        "trade" => "™",
        _ => return None,
    };
    Some(decoded)
}
