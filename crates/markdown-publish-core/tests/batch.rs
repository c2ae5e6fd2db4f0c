use markdown_publish_core::{compile, DocRequest, NamedStyle, ParagraphKind, StyleOp};

const SAMPLE: &str = "# Report\n\nAn **important** finding with *nuance*.\n\n\
## Details\n\nFirst line\nsecond line.\n\nClosing paragraph.";

#[test]
fn plain_paragraphs_produce_only_inserts() {
    let batch = compile("One paragraph.\n\nAnother paragraph.", 1);
    // Two content inserts plus a trailing newline each.
    assert_eq!(batch.inserts.len(), 4);
    let text_styles = batch
        .styles
        .iter()
        .filter(|style| matches!(style, StyleOp::Text(_)))
        .count();
    assert_eq!(text_styles, 0);
}

#[test]
fn first_insert_sits_at_start_offset() {
    let batch = compile(SAMPLE, 1);
    assert_eq!(batch.inserts[0].offset, 1);
    assert_ne!(batch.inserts[0].text, "\n\n");

    let appended = compile(SAMPLE, 57);
    assert_eq!(appended.inserts[0].offset, 57);
    assert_eq!(appended.inserts[0].text, "\n\n");
    assert_eq!(appended.inserts[1].offset, 59);
}

#[test]
fn every_insert_precedes_every_style_request() {
    let requests = compile(SAMPLE, 1).to_requests();
    let first_style = requests
        .iter()
        .position(|request| !matches!(request, DocRequest::InsertText(_)));
    if let Some(boundary) = first_style {
        assert!(requests[boundary..]
            .iter()
            .all(|request| !matches!(request, DocRequest::InsertText(_))));
    }
}

#[test]
fn style_ranges_are_nonempty_and_within_inserted_span() {
    for start in [1usize, 9, 100] {
        let batch = compile(SAMPLE, start);
        let end = start + batch.inserted_chars();
        for style in &batch.styles {
            let (lo, hi) = match style {
                StyleOp::Text(range) => (range.start, range.end),
                StyleOp::Paragraph(range) => (range.start, range.end),
            };
            assert!(lo < hi, "empty range {lo}..{hi}");
            assert!(lo >= start && hi <= end, "range {lo}..{hi} outside {start}..{end}");
        }
    }
}

#[test]
fn inserted_char_total_matches_cursor_advance() {
    // Each insert's offset is the cursor at emission time, so the last
    // insert's offset plus its length is the final cursor.
    for start in [1usize, 5, 314] {
        let batch = compile(SAMPLE, start);
        let last = batch.inserts.last().expect("sample produces inserts");
        let final_cursor = last.offset + last.text.chars().count();
        assert_eq!(batch.inserted_chars(), final_cursor - start);
    }
}

#[test]
fn heading_tiers_map_in_order() {
    let batch = compile("# One\n\n## Two\n\n### Three\n\n#### Four", 1);
    let named: Vec<_> = batch
        .styles
        .iter()
        .filter_map(|style| match style {
            StyleOp::Paragraph(range) => match range.kind {
                ParagraphKind::Named(named) => Some(named),
                ParagraphKind::SpaceBelow => None,
            },
            _ => None,
        })
        .collect();
    assert_eq!(
        named,
        vec![
            NamedStyle::Heading1,
            NamedStyle::Heading2,
            NamedStyle::Heading3,
            NamedStyle::NormalText,
        ]
    );
}

#[test]
fn soft_break_advances_cursor_by_one() {
    let batch = compile("alpha\nbeta", 1);
    let texts: Vec<&str> = batch.inserts.iter().map(|op| op.text.as_str()).collect();
    assert_eq!(texts, vec!["alpha", " ", "beta", "\n"]);
    assert_eq!(batch.inserted_chars(), "alpha".len() + 1 + "beta".len() + 1);
}

#[test]
fn emphasis_across_soft_break_leaves_the_space_unstyled() {
    let batch = compile("**first\nsecond**", 1);
    let styled: Vec<_> = batch
        .styles
        .iter()
        .filter_map(|style| match style {
            StyleOp::Text(range) => Some((range.start, range.end)),
            _ => None,
        })
        .collect();
    // "first" at 1..6, the break's space at 6, "second" at 7..13.
    assert_eq!(styled, vec![(1, 6), (7, 13)]);
}

#[test]
fn batch_renders_to_wire_json() {
    let requests = compile("# Title", 1).to_requests();
    let value = serde_json::to_value(&requests).expect("serialize requests");
    assert_eq!(
        value,
        serde_json::json!([
            {"insertText": {"location": {"index": 1}, "text": "Title"}},
            {"insertText": {"location": {"index": 6}, "text": "\n"}},
            {"updateParagraphStyle": {
                "range": {"startIndex": 1, "endIndex": 6},
                "paragraphStyle": {"namedStyleType": "HEADING_1"},
                "fields": "namedStyleType"
            }}
        ])
    );
}
