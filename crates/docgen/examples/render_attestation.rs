//! Render a sample attestation against a blank A4 template
//!
//! Demonstrates the full pipeline: template definition with a font table,
//! a populated data context, generation, and the suggested filename.
//!
//! Run with:
//!   cargo run --example render_attestation -p docgen -- \
//!       fonts/DejaVuSans.ttf fonts/DejaVuSans-Bold.ttf

#[macro_use]
extern crate lopdf;

use docgen::{
    generate_document, parse_template, suggested_filename, DataContext, System,
};

fn main() -> anyhow::Result<()> {
    let mut args = std::env::args().skip(1);
    let regular = args
        .next()
        .unwrap_or_else(|| "fonts/DejaVuSans.ttf".to_string());
    let bold = args
        .next()
        .unwrap_or_else(|| "fonts/DejaVuSans-Bold.ttf".to_string());

    let template_json = format!(
        r#"{{
        "version": "1.0",
        "fonts": [
            {{ "id": "body", "regular": "{regular}", "bold": "{bold}" }}
        ],
        "regions": [
            {{
                "page": 1,
                "box": {{ "x": 60, "y": 80, "width": 475, "height": 30 }},
                "font": {{ "family": "body", "weight": "bold" }},
                "fontSize": 22,
                "textAlign": "center",
                "source": {{ "raw": "Attestation" }}
            }},
            {{
                "page": 1,
                "box": {{ "x": 60, "y": 180, "width": 475, "height": 120 }},
                "font": {{ "family": "body" }},
                "fontSize": 12,
                "source": {{ "raw": "<organizationName> certifies that <title> <firstName> <lastName> completed an engagement at <companyName> in <companyCity>, from <startDate> to <endDate>, on the topic of <engagementTopic>." }}
            }},
            {{
                "page": 1,
                "box": {{ "x": 60, "y": 700, "width": 220, "height": 40 }},
                "font": {{ "family": "body" }},
                "fontSize": 10,
                "verticalAlign": "bottom",
                "source": {{ "bound": "generatedDate" }}
            }},
            {{
                "page": 1,
                "box": {{ "x": 315, "y": 700, "width": 220, "height": 40 }},
                "font": {{ "family": "body" }},
                "fontSize": 10,
                "textAlign": "right",
                "verticalAlign": "bottom",
                "source": {{ "bound": "organizationDirector" }}
            }}
        ]
    }}"#
    );
    let template = parse_template(&template_json)?;

    let mut context = DataContext::default();
    context.subject.title = Some("Ms".to_string());
    context.subject.first_name = Some("Alice".to_string());
    context.subject.last_name = Some("Martin".to_string());
    context.engagement.start_date = Some("02/02/2026".to_string());
    context.engagement.end_date = Some("26/06/2026".to_string());
    context.engagement.topic = Some("embedded systems development".to_string());
    context.counterparty.name = Some("Acme Industries".to_string());
    context.counterparty.city = Some("Lyon".to_string());
    context.organization.name = Some("Institut Polytechnique".to_string());
    context.organization.director = Some("J. Bernard".to_string());
    context.system = System::now();

    let template_bytes = blank_a4_pdf()?;
    let output = generate_document(&template_bytes, &template, &context)?;

    for warning in &output.warnings {
        eprintln!("warning: {warning}");
    }

    std::fs::create_dir_all("output")?;
    let filename = format!("output/{}", suggested_filename(&context));
    std::fs::write(&filename, &output.bytes)?;
    println!("wrote {filename} ({} bytes)", output.bytes.len());

    Ok(())
}

/// Build a blank single-page A4 document to stand in for a real template
fn blank_a4_pdf() -> anyhow::Result<Vec<u8>> {
    let mut doc = lopdf::Document::new();

    let pages_id = doc.add_object(lopdf::Object::Dictionary(lopdf::dictionary! {
        "Type" => "Pages",
        "Count" => 1,
        "Kids" => vec![],
    }));

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

    let mut pages_dict = doc
        .get_object(pages_id)?
        .as_dict()
        .map_err(|e| anyhow::anyhow!("pages dict: {e}"))?
        .clone();
    pages_dict.set("Kids", lopdf::Object::Array(vec![page_id.into()]));
    doc.objects.insert(pages_id, pages_dict.into());

    let catalog_id = doc.add_object(lopdf::Object::Dictionary(lopdf::dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    }));
    doc.trailer.set("Root", catalog_id);

    let mut buffer = Vec::new();
    doc.save_to(&mut buffer)?;
    Ok(buffer)
}
