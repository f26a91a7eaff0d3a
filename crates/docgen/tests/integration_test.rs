//! Integration tests for document generation
//!
//! Drawing real glyphs needs font files on disk, which these tests avoid;
//! the full draw path is exercised by the render_attestation example. What
//! is covered here: template parsing, resolution behavior through the public
//! API, page-bounds handling, and the fatal/non-fatal error split.

#[macro_use]
extern crate lopdf;

use docgen::{
    generate_document, parse_template, resolve, suggested_filename, DataContext, Field,
    RenderError, RenderWarning, System,
};
use pretty_assertions::assert_eq;

/// Create a minimal valid PDF with the given number of A4 pages
fn create_template_pdf(page_count: usize) -> Vec<u8> {
    let mut doc = lopdf::Document::new();

    let pages_id = doc.add_object(lopdf::Object::Dictionary(lopdf::dictionary! {
        "Type" => "Pages",
        "Count" => page_count as i64,
        "Kids" => vec![],
    }));

    let mut kids = Vec::new();
    for _ in 0..page_count {
        let contents_id = doc.add_object(lopdf::Object::Stream(lopdf::Stream::new(
            lopdf::dictionary! {},
            vec![],
        )));
        let page_id = doc.add_object(lopdf::Object::Dictionary(lopdf::dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "MediaBox" => vec![0.into(), 0.into(), 595.28.into(), 841.89.into()],
            "Resources" => lopdf::dictionary! {},
            "Contents" => contents_id,
        }));
        kids.push(lopdf::Object::Reference(page_id));
    }

    let mut pages_dict = doc.get_object(pages_id).unwrap().as_dict().unwrap().clone();
    pages_dict.set("Kids", lopdf::Object::Array(kids));
    doc.objects.insert(pages_id, pages_dict.into());

    let catalog_id = doc.add_object(lopdf::Object::Dictionary(lopdf::dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    }));
    doc.trailer.set("Root", catalog_id);

    let mut buffer = Vec::new();
    doc.save_to(&mut buffer).unwrap();
    buffer
}

fn region_json(page: usize, source: &str) -> String {
    format!(
        r#"{{
            "page": {page},
            "box": {{ "x": 50, "y": 100, "width": 200, "height": 40 }},
            "font": {{ "family": "body" }},
            "fontSize": 12,
            "source": {source}
        }}"#
    )
}

#[test]
fn test_parse_full_template() {
    let json = format!(
        r#"{{
            "version": "1.0",
            "fonts": [{{ "id": "body", "regular": "fonts/DejaVuSans.ttf" }}],
            "regions": [{}, {}]
        }}"#,
        region_json(1, r#"{ "bound": "lastName" }"#),
        region_json(2, r#"{ "raw": "Issued by <organizationName>" }"#),
    );

    let template = parse_template(&json).unwrap();
    assert_eq!(template.regions.len(), 2);
    assert_eq!(template.fonts.len(), 1);
}

#[test]
fn test_out_of_range_region_is_skipped_and_document_serializes() {
    // Scenario: a region on page 99 of a 3-page template
    let json = format!(
        r#"{{ "version": "1.0", "regions": [{}] }}"#,
        region_json(99, r#"{ "raw": "never drawn" }"#)
    );
    let template = parse_template(&json).unwrap();

    let output = generate_document(&create_template_pdf(3), &template, &DataContext::default())
        .expect("render should succeed");

    assert!(!output.bytes.is_empty());
    assert_eq!(
        output.warnings,
        vec![RenderWarning::PageOutOfRange {
            region: 0,
            page: 99,
            page_count: 3
        }]
    );

    // The produced bytes are still a loadable document
    assert!(lopdf::Document::load_mem(&output.bytes).is_ok());
}

#[test]
fn test_empty_region_is_skipped_without_fonts() {
    // Whitespace-only text resolves to empty after sanitization, so the
    // region is skipped before any font is needed.
    let json = format!(
        r#"{{ "version": "1.0", "regions": [{}] }}"#,
        region_json(1, r#"{ "raw": "   " }"#)
    );
    let template = parse_template(&json).unwrap();

    let output =
        generate_document(&create_template_pdf(1), &template, &DataContext::default()).unwrap();
    assert!(output.warnings.is_empty());
}

#[test]
fn test_corrupt_template_bytes_are_fatal() {
    let template = parse_template(r#"{ "version": "1.0", "regions": [] }"#).unwrap();
    let result = generate_document(b"not a pdf", &template, &DataContext::default());
    assert!(matches!(result, Err(RenderError::TemplateLoad(_))));
}

#[test]
fn test_unreadable_font_source_is_fatal() {
    let json = r#"{
        "version": "1.0",
        "fonts": [{ "id": "body", "regular": "/nonexistent/font.ttf" }],
        "regions": []
    }"#;
    let template = parse_template(json).unwrap();

    let result = generate_document(&create_template_pdf(1), &template, &DataContext::default());
    assert!(matches!(result, Err(RenderError::Font(_))));
}

#[test]
fn test_missing_subject_field_resolves_to_placeholder() {
    // Scenario: one region bound to a missing Subject field
    let resolution = resolve(&Field::LastName.token(), &DataContext::default());
    assert_eq!(resolution.text, "[Last name not available]");
    assert_eq!(resolution.warnings.len(), 1);
}

#[test]
fn test_name_tokens_resolve_in_order() {
    let mut ctx = DataContext::default();
    ctx.subject.last_name = Some("Martin".to_string());
    ctx.subject.first_name = Some("Alice".to_string());

    let resolution = resolve("<lastName> <firstName>", &ctx);
    assert_eq!(resolution.text, "Martin Alice");
}

#[test]
fn test_system_fields_resolve() {
    let mut ctx = DataContext::default();
    ctx.system = System::from_date(chrono::NaiveDate::from_ymd_opt(2026, 3, 15).unwrap());

    let resolution = resolve("generated <generatedDate>, valid until <validUntil>", &ctx);
    assert_eq!(
        resolution.text,
        "generated 15/03/2026, valid until 15/03/2027"
    );
}

#[test]
fn test_suggested_filename_uses_subject_and_date() {
    let mut ctx = DataContext::default();
    ctx.subject.last_name = Some("Du Pont".to_string());
    ctx.subject.first_name = Some("Léa".to_string());
    ctx.system.generated_date = Some("01/02/2026".to_string());

    assert_eq!(
        suggested_filename(&ctx),
        "attestation_du-pont_l-a_01-02-2026.pdf"
    );
}
