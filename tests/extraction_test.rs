use legible::{extract, extract_bytes, extract_with_options, Error, ExtractionOptions};

const BASE: &str = "http://fakehost/test/page.html";

/// A page with one obvious article container surrounded by chrome. The
/// paragraphs are long enough to clear the default character threshold
/// on the first scoring attempt.
fn page(extra_head: &str, article_body: &str) -> String {
    format!(
        "<html><head><title>The Grand Experiment - Example Site</title>{extra_head}</head>\
         <body>\
         <nav class=\"navigation\"><a href=\"/\">NAV-NOISE home</a><a href=\"/archive\">archive</a></nav>\
         <div id=\"main\">{article_body}</div>\
         <aside class=\"sidebar\">SIDEBAR-NOISE <a href=\"/a\">one</a> <a href=\"/b\">two</a></aside>\
         <footer class=\"footer\">FOOTER-NOISE all rights reserved</footer>\
         </body></html>"
    )
}

fn paragraphs() -> String {
    let filler = "The instruments had been recording all night, quietly, \
                  patiently, and by morning the curve on the chart told a \
                  story nobody in the observatory had expected to read. "
        .repeat(2);
    format!(
        "<p>ALPHA-MARKER {filler}</p>\
         <p>BETA-MARKER {filler}</p>\
         <p>GAMMA-MARKER {filler}</p>"
    )
}

#[test]
fn chrome_is_stripped_from_around_the_article() {
    let html = page("", &paragraphs());
    let result = extract(&html, BASE).unwrap();

    assert!(result.content.contains("ALPHA-MARKER"));
    assert!(result.content.contains("GAMMA-MARKER"));
    assert!(!result.content.contains("NAV-NOISE"));
    assert!(!result.content.contains("SIDEBAR-NOISE"));
    assert!(!result.content.contains("FOOTER-NOISE"));
    assert_eq!(result.length, result.text_content.chars().count());
}

#[test]
fn title_is_resolved_with_the_site_suffix_removed() {
    let result = extract(&page("", &paragraphs()), BASE).unwrap();
    assert_eq!(result.title, "The Grand Experiment");
}

#[test]
fn content_in_unlikely_containers_returns_after_relaxing() {
    // Everything lives under a "comment" class, which the first scoring
    // attempt strips; the retry loop has to put it back.
    let html = format!(
        "<html><head><title>An Adequately Long Page Title</title></head><body>\
         <div class=\"comment\"><div>{}</div></div></body></html>",
        paragraphs()
    );
    let result = extract(&html, BASE).unwrap();
    assert!(result.text_content.contains("BETA-MARKER"));
}

#[test]
fn relative_links_and_images_become_absolute() {
    let body = format!(
        "{}<p>A <a href=\"/other/page\">link</a> and an \
         <img src=\"image.png\" srcset=\"img-480.png 480w, img-800.png 800w\"> here.</p>",
        paragraphs()
    );
    let result = extract(&page("", &body), BASE).unwrap();

    assert!(result.content.contains("href=\"http://fakehost/other/page\""));
    assert!(result.content.contains("src=\"http://fakehost/test/image.png\""));
    assert!(result.content.contains("http://fakehost/test/img-480.png 480w"));
    assert!(result.content.contains("http://fakehost/test/img-800.png 800w"));
}

#[test]
fn hash_links_stay_put_when_no_base_overrides_the_uri() {
    let body = format!(
        "{}<p>Jump to the <a href=\"#appendix\">appendix</a> below.</p>",
        paragraphs()
    );
    let result = extract(&page("", &body), BASE).unwrap();
    assert!(result.content.contains("href=\"#appendix\""));
}

#[test]
fn javascript_links_flatten_to_their_text() {
    let body = format!(
        "{}<p>Click <a href=\"javascript:void(0)\">JS-LINK-TEXT</a> to expand.</p>",
        paragraphs()
    );
    let result = extract(&page("", &body), BASE).unwrap();

    assert!(result.content.contains("JS-LINK-TEXT"));
    assert!(!result.content.contains("javascript:"));
}

#[test]
fn double_break_runs_become_paragraphs() {
    let body = format!(
        "{}BEFORE-BREAK text that sits outside any paragraph.<br><br>\
         AFTER-BREAK text that should land in its own paragraph.",
        paragraphs()
    );
    let result = extract(&page("", &body), BASE).unwrap();

    assert!(result.text_content.contains("AFTER-BREAK"));
    assert!(!result.content.contains("<br><br>"));
}

#[test]
fn lazy_image_sources_are_promoted() {
    let body = format!(
        "{}<p><img class=\"lazy-loaded\" data-src=\"/img/plot.jpg\" alt=\"plot\"></p>",
        paragraphs()
    );
    let result = extract(&page("", &body), BASE).unwrap();
    assert!(result.content.contains("src=\"http://fakehost/img/plot.jpg\""));
}

#[test]
fn data_tables_survive_while_layout_tables_unwrap() {
    let body = format!(
        "{}<table><tr><th>Reading</th><th>Value</th></tr>\
         <tr><td>DATA-CELL pressure</td><td>101.3</td></tr></table>\
         <table><tr><td>LAYOUT-CELL a single framed remark</td></tr></table>",
        paragraphs()
    );
    let result = extract(&page("", &body), BASE).unwrap();

    assert!(result.content.contains("<table"));
    assert!(result.content.contains("DATA-CELL"));
    // The single-cell table is gone but its text survives outside one.
    assert!(result.text_content.contains("LAYOUT-CELL"));
    assert_eq!(result.content.matches("<table").count(), 1);
}

#[test]
fn heading_duplicating_the_title_is_dropped_and_h1_demotes() {
    let body = format!(
        "<h1>The Grand Experiment</h1>{}<h1>Another Section Heading</h1>\
         <p>A short closing remark, nothing more, placed after the heading.</p>",
        paragraphs()
    );
    let result = extract(&page("", &body), BASE).unwrap();

    assert!(!result.content.contains("<h1"));
    assert!(result.content.contains("<h2>Another Section Heading</h2>"));
    assert!(!result.text_content.contains("The Grand Experiment"));
}

#[test]
fn share_widgets_are_removed() {
    let body = format!(
        "{}<div class=\"share-buttons\">SHARE-NOISE tweet this post</div>",
        paragraphs()
    );
    let result = extract(&page("", &body), BASE).unwrap();
    assert!(!result.content.contains("SHARE-NOISE"));
}

#[test]
fn byte_input_honors_the_declared_charset() {
    let mut bytes = Vec::new();
    bytes.extend_from_slice(b"<html><head><meta charset=\"ISO-8859-1\"></head><body><div>");
    let paragraph = paragraphs().replace("ALPHA-MARKER", "CAF\u{c9}-MARKER");
    // Encode the single non-ASCII byte the Latin-1 way.
    for ch in paragraph.chars() {
        if ch == '\u{c9}' {
            bytes.push(0xC9);
        } else {
            let mut buf = [0u8; 4];
            bytes.extend_from_slice(ch.encode_utf8(&mut buf).as_bytes());
        }
    }
    bytes.extend_from_slice(b"</div></body></html>");

    let result = extract_bytes(&bytes, BASE).unwrap();
    assert!(result.text_content.contains("CAFÉ-MARKER"));
}

#[test]
fn empty_documents_report_no_content() {
    let html = "<html><head><title>Nothing Here</title></head>\
                <body><div></div></body></html>";
    let err = extract(html, BASE).unwrap_err();
    assert!(matches!(err, Error::NoContent));
}

#[test]
fn short_articles_surface_through_the_fallback() {
    // Far below the default threshold; the longest attempt is returned
    // rather than an error.
    let html = "<html><head><title>An Adequately Long Page Title</title></head>\
                <body><div><p>TINY-MARKER just a line, with a comma.</p></div></body></html>";
    let result = extract(html, BASE).unwrap();
    assert!(result.text_content.contains("TINY-MARKER"));
}

#[test]
fn extraction_is_deterministic() {
    let html = page("", &paragraphs());
    let first = extract_with_options(&html, BASE, &ExtractionOptions::default()).unwrap();
    let second = extract_with_options(&html, BASE, &ExtractionOptions::default()).unwrap();
    assert_eq!(first.content, second.content);
    assert_eq!(first.text_content, second.text_content);
    assert_eq!(first.title, second.title);
}
