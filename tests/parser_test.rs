use legible::dom::NodeKind;
use legible::parse;

const BASE: &str = "http://fakehost/test/page.html";

#[test]
fn script_content_is_isolated_from_the_tree() {
    let doc = parse(r#"<script><?Silly test <img src="test"></script>"#, BASE);

    let scripts = doc.elements_by_tag(doc.root(), &["script"]);
    assert_eq!(scripts.len(), 1, "expected exactly one script element");
    assert_eq!(doc.child_count(scripts[0]), 0);
    // The pseudo-comment span is scanned past, not parsed.
    assert_eq!(doc.text_content(scripts[0]), "");
    assert!(doc.elements_by_tag(doc.root(), &["img"]).is_empty());
}

#[test]
fn markup_looking_script_code_stays_text() {
    let doc = parse("<script>if (a < b) { render('<img src=x>'); }</script>", BASE);

    let scripts = doc.elements_by_tag(doc.root(), &["script"]);
    assert_eq!(scripts.len(), 1);
    assert_eq!(doc.element_child_count(scripts[0]), 0);
    let code = doc.text_content(scripts[0]);
    assert!(code.contains("if (a < b)"));
    assert!(doc.elements_by_tag(doc.root(), &["img"]).is_empty());
}

#[test]
fn void_elements_never_hold_children() {
    let doc = parse("<div><input><p>INPUT_SIBLING_TEXT</p></div>", BASE);

    let inputs = doc.elements_by_tag(doc.root(), &["input"]);
    let paragraphs = doc.elements_by_tag(doc.root(), &["p"]);
    assert_eq!(inputs.len(), 1);
    assert_eq!(paragraphs.len(), 1);

    assert_eq!(doc.child_count(inputs[0]), 0);
    assert_eq!(doc.parent(paragraphs[0]), doc.parent(inputs[0]));
    assert_eq!(doc.text_content(paragraphs[0]), "INPUT_SIBLING_TEXT");
}

#[test]
fn unclosed_elements_recover_at_the_enclosing_close() {
    let doc = parse("<div><p>FIRST_PARA</div><p>SECOND_PARA", BASE);

    let divs = doc.elements_by_tag(doc.root(), &["div"]);
    let paragraphs = doc.elements_by_tag(doc.root(), &["p"]);
    assert_eq!(divs.len(), 1);
    assert_eq!(paragraphs.len(), 2);

    // The open <p> closed when </div> arrived, so the second <p> lands
    // outside the div.
    assert_eq!(doc.parent(paragraphs[0]), Some(divs[0]));
    assert_eq!(doc.parent(paragraphs[1]), doc.parent(divs[0]));
    assert_eq!(doc.text_content(paragraphs[1]), "SECOND_PARA");
    assert!(doc
        .issues()
        .iter()
        .any(|issue| issue.message.contains("recovered delayed close")));
}

#[test]
fn no_structure_is_implied_for_fragments() {
    let doc = parse("<p>hello</p>", BASE);

    assert!(doc.body().is_none(), "fragments gain no synthetic body");
    let paragraphs = doc.elements_by_tag(doc.root(), &["p"]);
    assert_eq!(paragraphs.len(), 1);
    assert_eq!(doc.document_element(), Some(paragraphs[0]));
    assert_eq!(doc.parent(paragraphs[0]), Some(doc.root()));
}

#[test]
fn base_href_overrides_the_document_uri() {
    let html = r#"<head><base href="https://cdn.example.org/assets/"></head><body></body>"#;
    let doc = parse(html, BASE);

    assert_eq!(doc.document_uri(), BASE);
    assert_eq!(doc.base_uri(), "https://cdn.example.org/assets/");
}

#[test]
fn names_are_case_normalized_but_values_are_not() {
    let doc = parse(r#"<DiV ID="MixedCase">x</DiV>"#, BASE);

    let divs = doc.elements_by_tag(doc.root(), &["div"]);
    assert_eq!(divs.len(), 1);
    assert_eq!(doc.tag_name(divs[0]), Some("DIV"));
    assert_eq!(doc.local_name(divs[0]), Some("div"));
    assert_eq!(doc.attribute(divs[0], "id"), Some("MixedCase"));
}

#[test]
fn entities_decode_on_parse_and_reencode_on_output() {
    let doc = parse("<p>a &amp;lt; b &amp; c</p>", BASE);

    let p = doc.elements_by_tag(doc.root(), &["p"])[0];
    // One round of decoding: &amp;lt; is the literal text "&lt;".
    assert_eq!(doc.text_content(p), "a &lt; b & c");
    assert_eq!(doc.serialize_node(p), "<p>a &amp;lt; b &amp; c</p>");
}

#[test]
fn comments_are_kept_as_comment_nodes() {
    let doc = parse("<div><!-- marker -->text</div>", BASE);

    let div = doc.elements_by_tag(doc.root(), &["div"])[0];
    let first = doc.first_child(div).unwrap();
    assert!(matches!(doc.kind(first), NodeKind::Comment(text) if text == " marker "));
    assert_eq!(doc.element_child_count(div), 0);
    assert_eq!(doc.text_content(div), "text");
    assert!(doc.serialize_node(div).contains("<!-- marker -->"));
}

#[test]
fn stray_close_tags_are_reported_not_fatal() {
    let doc = parse("<div>CONTENT</span></div>", BASE);

    let divs = doc.elements_by_tag(doc.root(), &["div"]);
    assert_eq!(divs.len(), 1);
    assert_eq!(doc.text_content(divs[0]), "CONTENT");
    assert!(
        doc.issues()
            .iter()
            .any(|issue| issue.message.contains("stray close tag")),
        "expected a diagnostic for the stray </span>, got {:?}",
        doc.issues()
    );
}

#[test]
fn serialized_markup_reparses_to_the_same_text() {
    let html = r#"<div id="wrap" title="a &quot;b&quot;"><p>x &amp; y</p><br><!--c--></div>"#;
    let doc = parse(html, BASE);
    let div = doc.elements_by_tag(doc.root(), &["div"])[0];
    let first_pass = doc.serialize_node(div);

    let doc2 = parse(&first_pass, BASE);
    let div2 = doc2.elements_by_tag(doc2.root(), &["div"])[0];
    assert_eq!(doc2.serialize_node(div2), first_pass);
    assert_eq!(doc2.text_content(div2), doc.text_content(div));
    assert_eq!(doc2.attribute(div2, "title"), Some(r#"a "b""#));
}

#[test]
fn rawtext_style_blocks_swallow_markup() {
    let doc = parse("<style>div > p { color: red; }</style><p>AFTER_STYLE</p>", BASE);

    let styles = doc.elements_by_tag(doc.root(), &["style"]);
    assert_eq!(styles.len(), 1);
    assert_eq!(doc.text_content(styles[0]), "div > p { color: red; }");
    assert_eq!(doc.elements_by_tag(doc.root(), &["p"]).len(), 1);
}

#[test]
fn unterminated_tag_at_eof_is_reported() {
    let doc = parse("<div>text<span", BASE);

    assert_eq!(doc.elements_by_tag(doc.root(), &["div"]).len(), 1);
    assert!(!doc.issues().is_empty());
    assert!(doc.issues()[0].position <= "<div>text<span".len());
}
