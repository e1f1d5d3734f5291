//! End-to-end tests: style sheets, list styles and images through export

use richtext_export::{
    export_html_bytes, ExportFlags, HtmlExportOptions, HtmlExporter, MemoryImageSink,
};
use richtext_model::{
    AttributeSet, BulletStyle, Colour, ImageData, Paragraph, RichTextBuffer, StyleDefinition,
    StyleSheet, StyleSheetChain, TextEffects, LIST_LEVEL_COUNT,
};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn to_string(bytes: Vec<u8>) -> String {
    String::from_utf8(bytes).expect("utf-8 output")
}

fn fragment_options() -> HtmlExportOptions {
    HtmlExportOptions::new().with_flags(ExportFlags::NO_HEADER_FOOTER)
}

fn document_sheet() -> StyleSheet {
    let mut sheet = StyleSheet::new("document");
    sheet.add_style(
        StyleDefinition::paragraph("Normal")
            .with_style(AttributeSet::new().with_font_face("Georgia")),
    );
    sheet.add_style(
        StyleDefinition::paragraph("Warning")
            .with_base_style("Normal")
            .with_style(AttributeSet::new().with_text_colour(Colour::RED)),
    );
    sheet.add_style(
        StyleDefinition::character("Emphasis").with_style(AttributeSet::new().with_italic(true)),
    );

    let mut numbered = StyleDefinition::list("Numbered");
    for level in 0..3 {
        numbered
            .set_list_attributes(level, (level as i32 + 1) * 60, 60, BulletStyle::ARABIC | BulletStyle::PERIOD, "")
            .unwrap();
    }
    sheet.add_style(numbered);

    let mut dashes = StyleDefinition::list("Dashes");
    for level in 0..LIST_LEVEL_COUNT {
        dashes
            .set_list_attributes(level, (level as i32 + 1) * 60, 60, BulletStyle::SYMBOL, "-")
            .unwrap();
    }
    sheet.add_style(dashes);
    sheet
}

fn list_paragraph(list: &str, indent: i32, text: &str) -> Paragraph {
    Paragraph::new()
        .with_attributes(AttributeSet::new().with_list_style_name(list).with_left_indent(indent, 0))
        .with_text(text)
}

#[test]
fn test_numbered_list_then_plain_paragraph() {
    init_tracing();
    let mut buffer = RichTextBuffer::new();
    buffer.add_paragraph("Before");
    buffer.push_paragraph(
        Paragraph::new()
            .with_attributes(
                AttributeSet::new()
                    .with_left_indent(60, 0)
                    .with_bullet_style(BulletStyle::ARABIC | BulletStyle::PERIOD),
            )
            .with_text("First"),
    );
    buffer.add_paragraph("After");

    let html = to_string(export_html_bytes(&buffer, None, &fragment_options()).unwrap());
    assert!(html.contains("<ol type=\"1\"><li>First</li>"));
    let close = html.find("</ol>").unwrap();
    let after = html.find("<p align=\"left\">After").unwrap();
    assert!(close < after);
}

#[test]
fn test_red_run_font_tag() {
    init_tracing();
    let mut buffer = RichTextBuffer::new();
    buffer.push_paragraph(
        Paragraph::new()
            .with_text("plain ")
            .with_run("red", AttributeSet::new().with_text_colour(Colour::RED))
            .with_text(" plain"),
    );

    let html = to_string(export_html_bytes(&buffer, None, &fragment_options()).unwrap());
    assert_eq!(
        html,
        "<p align=\"left\">plain <font style=\"color:#FF0000\">red</font> plain</p>\n"
    );
}

#[test]
fn test_named_styles_resolve_through_sheet() {
    init_tracing();
    let sheet = document_sheet();
    let mut buffer = RichTextBuffer::new();
    buffer.push_paragraph(
        Paragraph::new()
            .with_attributes(AttributeSet::new().with_paragraph_style_name("Warning"))
            .with_text("Careful ")
            .with_run("now", AttributeSet::new().with_character_style_name("Emphasis")),
    );

    let html = to_string(export_html_bytes(&buffer, Some(&sheet), &fragment_options()).unwrap());
    assert_eq!(
        html,
        "<p align=\"left\"><font face=\"Georgia\" style=\"color:#FF0000\">Careful <i>now</i></font></p>\n"
    );

    let unstyled = to_string(export_html_bytes(&buffer, None, &fragment_options()).unwrap());
    assert_eq!(unstyled, "<p align=\"left\">Careful now</p>\n");
}

#[test]
fn test_list_styles_drive_nesting() {
    init_tracing();
    let sheet = document_sheet();
    let mut buffer = RichTextBuffer::new();
    buffer.push_paragraph(list_paragraph("Numbered", 60, "one"));
    buffer.push_paragraph(list_paragraph("Numbered", 130, "one.one"));
    buffer.push_paragraph(list_paragraph("Numbered", 60, "two"));
    buffer.push_paragraph(list_paragraph("Dashes", 60, "dash"));
    buffer.add_paragraph("end");

    let html = to_string(export_html_bytes(&buffer, Some(&sheet), &fragment_options()).unwrap());
    assert_eq!(
        html,
        "<ol type=\"1\"><li>one</li>\n\
         <ol type=\"1\"><li>one.one</li>\n\
         </ol>\n\
         <li>two</li>\n\
         <li>dash</li>\n\
         </ol>\n\
         <p align=\"left\">end</p>\n"
    );
}

#[test]
fn test_chained_sheets_supply_base_styles() {
    init_tracing();
    let mut local = StyleSheet::new("local");
    local.add_style(
        StyleDefinition::paragraph("Note")
            .with_base_style("Body")
            .with_style(AttributeSet::new().with_effects(TextEffects::STRIKETHROUGH)),
    );
    let mut shared = StyleSheet::new("shared");
    shared.add_style(StyleDefinition::paragraph("Body").with_style(AttributeSet::new().with_bold(true)));

    let mut chain = StyleSheetChain::new();
    let local_id = chain.add_sheet(local);
    let shared_id = chain.add_sheet(shared);
    chain.append_sheet(shared_id, local_id).unwrap();
    let view = chain.view(local_id).unwrap();

    let mut buffer = RichTextBuffer::new();
    buffer.push_paragraph(
        Paragraph::new()
            .with_attributes(AttributeSet::new().with_paragraph_style_name("Note"))
            .with_text("old"),
    );

    let html = to_string(export_html_bytes(&buffer, Some(&view), &fragment_options()).unwrap());
    assert_eq!(html, "<p align=\"left\"><b><del>old</del></b></p>\n");
}

#[test]
fn test_images_saved_to_memory() {
    init_tracing();
    let registry = MemoryImageSink::new();
    let options = HtmlExportOptions::new().with_flags(ExportFlags::SAVE_IMAGES_TO_MEMORY | ExportFlags::NO_HEADER_FOOTER);
    let mut exporter = HtmlExporter::new(options).with_image_sink(registry.clone());

    let mut buffer = RichTextBuffer::new();
    buffer.push_paragraph(Paragraph::new().with_image(ImageData::new(b"BM-not-really".to_vec())));

    let html = to_string(exporter.export_to_bytes(&buffer, None).unwrap());
    assert_eq!(html, "<p align=\"left\"><img src=\"memory:image1.bmp\" /></p>\n");
    assert_eq!(registry.get("image1.bmp").unwrap().mime_type, "image/bmp");
}

#[test]
fn test_images_saved_to_files() {
    init_tracing();
    let dir = tempfile::tempdir().unwrap();
    let options = HtmlExportOptions::new()
        .with_flags(ExportFlags::SAVE_IMAGES_TO_FILES)
        .with_temp_dir(dir.path());
    let mut exporter = HtmlExporter::new(options);

    let png = {
        let mut data = b"\x89PNG\r\n\x1a\n\x00\x00\x00\x0dIHDR".to_vec();
        data.extend_from_slice(&16u32.to_be_bytes());
        data.extend_from_slice(&8u32.to_be_bytes());
        data
    };
    let mut buffer = RichTextBuffer::new();
    buffer.push_paragraph(
        Paragraph::new()
            .with_image(ImageData::new(png.clone()))
            .with_image(ImageData::new(png.clone())),
    );

    let html = to_string(exporter.export_to_bytes(&buffer, None).unwrap());
    assert!(html.starts_with("<html><head></head><body>\n"));
    assert!(html.contains("image1.png\" width=\"16\" height=\"8\" />"));
    assert!(html.contains("<img src=\"file:///"));
    assert_eq!(std::fs::read(dir.path().join("image2.png")).unwrap(), png);
    assert_eq!(exporter.image_locations(), ["image1.png", "image2.png"]);

    assert_eq!(exporter.delete_temporary_images().unwrap(), 2);
    assert!(!dir.path().join("image1.png").exists());
}

#[test]
fn test_latin1_output() {
    init_tracing();
    let mut buffer = RichTextBuffer::new();
    buffer.add_paragraph("\u{e9}t\u{e9} \u{2013} \u{20ac}");

    let options = fragment_options().with_encoding("ISO-8859-1");
    let bytes = export_html_bytes(&buffer, None, &options).unwrap();

    let mut expected = b"<p align=\"left\">".to_vec();
    expected.extend_from_slice(&[0xE9, b't', 0xE9, b' ']);
    expected.extend_from_slice(b"&#8211; &#8364;</p>\n");
    assert_eq!(bytes, expected);
}

#[test]
fn test_unknown_encoding_falls_back_to_utf8() {
    init_tracing();
    let mut buffer = RichTextBuffer::new();
    buffer.add_paragraph("\u{20ac}");
    let options = fragment_options().with_encoding("no-such-encoding");
    let html = to_string(export_html_bytes(&buffer, None, &options).unwrap());
    assert_eq!(html, "<p align=\"left\">\u{20ac}</p>\n");
}
