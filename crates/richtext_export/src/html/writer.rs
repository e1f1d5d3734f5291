//! HTML Writer - walks a buffer and emits HTML
//!
//! The writer keeps the state of one export: the paragraph and character
//! styles last emitted, the stack of open list levels, the stack of open
//! inline tags, and whether a paragraph font or layout table is open.
//! Runs are written by diffing the tags their style needs against the tags
//! already open, so unchanged formatting produces no markup.

use super::encoding::OutputEncoding;
use super::images::ImagePersister;
use super::options::{ExportFlags, HtmlExportOptions};
use crate::ExportResult;
use richtext_model::{
    Alignment, AttributeSet, Block, BulletStyle, Colour, ImageRun, Inline, Paragraph,
    RichTextBuffer, StyleLookup, Table, TextEffects,
};
use std::io::Write;

const HEADER: &str = "<html><head></head><body>\n";
const FOOTER: &str = "</body></html>\n";
const PAGE_BREAK: &str = "<div style=\"page-break-after:always\"></div>\n";

/// Hanging indent represented by one `&nbsp;` in non-CSS output
const SYMBOLIC_INDENT_STEP: u32 = 20;

/// Most `&nbsp;`s written for one hanging indent
const MAX_SYMBOLIC_INDENT: usize = 256;

// =============================================================================
// Tags
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ListType {
    Ordered,
    Unordered,
}

impl ListType {
    fn close_tag(&self) -> &'static str {
        match self {
            ListType::Ordered => "</ol>\n",
            ListType::Unordered => "</ul>\n",
        }
    }
}

/// Opening tag and list type for a bullet style
fn list_open_tag(style: BulletStyle) -> (&'static str, ListType) {
    if style.contains(BulletStyle::ARABIC) {
        ("<ol type=\"1\">", ListType::Ordered)
    } else if style.contains(BulletStyle::LETTERS_UPPER) {
        ("<ol type=\"A\">", ListType::Ordered)
    } else if style.contains(BulletStyle::LETTERS_LOWER) {
        ("<ol type=\"a\">", ListType::Ordered)
    } else if style.contains(BulletStyle::ROMAN_UPPER) {
        ("<ol type=\"I\">", ListType::Ordered)
    } else if style.contains(BulletStyle::ROMAN_LOWER) {
        ("<ol type=\"i\">", ListType::Ordered)
    } else {
        ("<ul>", ListType::Unordered)
    }
}

#[derive(Debug, Clone, Copy)]
struct OpenList {
    indent: i32,
    list_type: ListType,
}

/// Properties of a `<font>` tag; absent ones are left out of the tag
#[derive(Debug, Clone, Default, PartialEq)]
struct FontTag {
    face: Option<String>,
    size: Option<u32>,
    colour: Option<Colour>,
    background: Option<Colour>,
}

impl FontTag {
    fn is_empty(&self) -> bool {
        self.face.is_none() && self.size.is_none() && self.colour.is_none() && self.background.is_none()
    }

    fn open_tag(&self) -> String {
        let mut tag = String::from("<font");
        if let Some(face) = &self.face {
            tag.push_str(&format!(" face=\"{}\"", escape_attribute(face)));
        }
        if let Some(size) = self.size {
            tag.push_str(&format!(" size=\"{}\"", size));
        }

        let mut style = Vec::new();
        if let Some(colour) = self.colour {
            style.push(format!("color:{}", colour.to_html()));
        }
        if let Some(background) = self.background {
            style.push(format!("background-color:{}", background.to_html()));
        }
        if !style.is_empty() {
            tag.push_str(&format!(" style=\"{}\"", style.join(";")));
        }

        tag.push('>');
        tag
    }
}

/// An inline formatting tag, in nesting order
#[derive(Debug, Clone, PartialEq)]
enum InlineTag {
    Font(FontTag),
    Bold,
    Italic,
    Underline,
    Link(String),
    Del,
    Sup,
    Sub,
}

impl InlineTag {
    fn open_tag(&self) -> String {
        match self {
            InlineTag::Font(font) => font.open_tag(),
            InlineTag::Bold => "<b>".to_string(),
            InlineTag::Italic => "<i>".to_string(),
            InlineTag::Underline => "<u>".to_string(),
            InlineTag::Link(url) => format!("<a href=\"{}\">", escape_attribute(url)),
            InlineTag::Del => "<del>".to_string(),
            InlineTag::Sup => "<sup>".to_string(),
            InlineTag::Sub => "<sub>".to_string(),
        }
    }

    fn close_tag(&self) -> &'static str {
        match self {
            InlineTag::Font(_) => "</font>",
            InlineTag::Bold => "</b>",
            InlineTag::Italic => "</i>",
            InlineTag::Underline => "</u>",
            InlineTag::Link(_) => "</a>",
            InlineTag::Del => "</del>",
            InlineTag::Sup => "</sup>",
            InlineTag::Sub => "</sub>",
        }
    }
}

// =============================================================================
// Escaping and Formatting Helpers
// =============================================================================

/// Escape text content. Line breaks become `<br>`, tabs four spaces.
pub(crate) fn escape_text(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\n' | '\u{1D}' => escaped.push_str("<br>"),
            '\t' => escaped.push_str("&nbsp;&nbsp;&nbsp;&nbsp;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

pub(crate) fn escape_attribute(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn alignment_name(alignment: Option<Alignment>) -> &'static str {
    match alignment {
        Some(Alignment::Center) => "center",
        Some(Alignment::Right) => "right",
        Some(Alignment::Justify) => "justify",
        Some(Alignment::Left) | None => "left",
    }
}

/// Tenths of a millimetre as a CSS length
fn mm(tenths: i32) -> String {
    format!("{:.2}mm", tenths as f64 / 10.0)
}

/// CSS declarations for paragraph spacing
fn spacing_css(attr: &AttributeSet) -> Vec<String> {
    let mut parts = Vec::new();
    if let Some(before) = attr.paragraph_spacing_before {
        parts.push(format!("margin-top:{}", mm(before)));
    }
    if let Some(after) = attr.paragraph_spacing_after {
        parts.push(format!("margin-bottom:{}", mm(after)));
    }
    parts
}

fn style_attribute(parts: &[String]) -> String {
    if parts.is_empty() {
        String::new()
    } else {
        format!(" style=\"{}\"", parts.join("; "))
    }
}

// =============================================================================
// Writer
// =============================================================================

/// State of a single export
pub(crate) struct HtmlWriter<'a, W: Write> {
    out: W,
    options: &'a HtmlExportOptions,
    encoding: OutputEncoding,
    lookup: Option<&'a dyn StyleLookup>,
    images: &'a mut ImagePersister,
    /// Last emitted run style
    current_character_style: AttributeSet,
    /// Style of the paragraph being written
    current_paragraph_style: AttributeSet,
    open_lists: Vec<OpenList>,
    open_tags: Vec<InlineTag>,
    in_layout_table: bool,
    in_list_item: bool,
    font_open: bool,
}

impl<'a, W: Write> HtmlWriter<'a, W> {
    pub(crate) fn new(
        out: W,
        options: &'a HtmlExportOptions,
        lookup: Option<&'a dyn StyleLookup>,
        images: &'a mut ImagePersister,
    ) -> Self {
        Self {
            out,
            options,
            encoding: OutputEncoding::from_name(&options.encoding),
            lookup,
            images,
            current_character_style: AttributeSet::default(),
            current_paragraph_style: AttributeSet::default(),
            open_lists: Vec::new(),
            open_tags: Vec::new(),
            in_layout_table: false,
            in_list_item: false,
            font_open: false,
        }
    }

    fn write_str(&mut self, s: &str) -> ExportResult<()> {
        self.encoding.write(&mut self.out, s)?;
        Ok(())
    }

    /// Write the whole document
    pub(crate) fn write_document(&mut self, buffer: &RichTextBuffer) -> ExportResult<()> {
        let framed = !self.options.has_flag(ExportFlags::NO_HEADER_FOOTER);
        if framed {
            self.write_str(HEADER)?;
        }

        for block in &buffer.blocks {
            match block {
                Block::Paragraph(paragraph) => self.write_paragraph(paragraph, &buffer.default_style)?,
                Block::Table(table) => self.write_table(table, &buffer.default_style)?,
            }
        }

        self.close_lists(None)?;
        if self.font_open {
            self.write_str("</font>")?;
            self.font_open = false;
        }

        if framed {
            self.write_str(FOOTER)?;
        }
        self.out.flush()?;
        Ok(())
    }

    fn write_paragraph(&mut self, paragraph: &Paragraph, base: &AttributeSet) -> ExportResult<()> {
        let attr = paragraph.combined_attributes(base, self.lookup);
        self.begin_paragraph(&attr)?;

        for inline in &paragraph.inlines {
            match inline {
                Inline::Text(run) => {
                    let run_attr = run.combined_attributes(&attr, self.lookup);
                    self.write_text(&run.text, &run_attr)?;
                }
                Inline::Image(image) => self.write_image(image)?,
            }
        }

        self.end_paragraph()
    }

    // -------------------------------------------------------------------------
    // Paragraphs and lists
    // -------------------------------------------------------------------------

    fn begin_paragraph(&mut self, attr: &AttributeSet) -> ExportResult<()> {
        if attr.page_break == Some(true) {
            self.write_str(PAGE_BREAK)?;
        }

        let indent = attr.left_indent.unwrap_or(0);
        let bullet = attr.bullet_style.filter(|style| !style.is_empty());
        tracing::trace!(indent, bullet = ?bullet, depth = self.open_lists.len(), "begin paragraph");

        match (indent != 0, bullet) {
            (true, Some(style)) => self.begin_list_item(indent, style)?,
            (true, None) => {
                self.close_lists(None)?;
                self.begin_indented_paragraph(attr)?;
            }
            (false, _) => {
                self.close_lists(None)?;
                let css = if self.options.uses_css() {
                    style_attribute(&spacing_css(attr))
                } else {
                    String::new()
                };
                self.write_str(&format!("<p align=\"{}\"{}>", alignment_name(attr.alignment), css))?;
            }
        }

        let font = FontTag {
            face: attr.font_face.clone(),
            size: attr.font_size.map(|size| self.options.pt_to_size(size)),
            colour: attr.text_colour,
            background: attr.background_colour,
        };
        if !font.is_empty() {
            self.write_str(&font.open_tag())?;
            self.font_open = true;
        }

        self.current_paragraph_style = attr.clone();
        self.current_character_style = AttributeSet::default();
        Ok(())
    }

    fn begin_list_item(&mut self, indent: i32, style: BulletStyle) -> ExportResult<()> {
        self.close_lists(Some(indent))?;

        let same_level = self.open_lists.last().is_some_and(|open| open.indent == indent);
        if !same_level {
            let (tag, list_type) = list_open_tag(style);
            self.write_str(tag)?;
            self.open_lists.push(OpenList { indent, list_type });
            tracing::trace!(indent, depth = self.open_lists.len(), "open list");
        }

        self.write_str("<li>")?;
        self.in_list_item = true;
        Ok(())
    }

    /// Close open lists deeper than `indent`, or all of them
    fn close_lists(&mut self, indent: Option<i32>) -> ExportResult<()> {
        while let Some(open) = self.open_lists.last().copied() {
            if indent.is_some_and(|indent| open.indent <= indent) {
                break;
            }
            self.open_lists.pop();
            self.write_str(open.list_type.close_tag())?;
            tracing::trace!(indent = open.indent, depth = self.open_lists.len(), "close list");
        }
        Ok(())
    }

    fn begin_indented_paragraph(&mut self, attr: &AttributeSet) -> ExportResult<()> {
        let left = attr.left_indent.unwrap_or(0);
        let sub = attr.left_sub_indent.unwrap_or(0);
        let margin = left.saturating_add(sub);
        let align = alignment_name(attr.alignment);

        if self.options.uses_css() {
            let mut parts = spacing_css(attr);
            if margin > 0 {
                parts.push(format!("margin-left:{}", mm(margin)));
            }
            if let Some(right) = attr.right_indent.filter(|&right| right > 0) {
                parts.push(format!("margin-right:{}", mm(right)));
            }
            if sub != 0 {
                parts.push(format!("text-indent:{}", mm(sub.saturating_neg())));
            }
            return self.write_str(&format!("<p align=\"{}\"{}>", align, style_attribute(&parts)));
        }

        self.write_str(&format!("<p align=\"{}\">", align))?;
        self.write_str(&format!(
            "<table border=\"0\" cellpadding=\"0\" cellspacing=\"0\"><tr><td width=\"{}\"></td><td>",
            (margin / 4).max(0)
        ))?;
        self.in_layout_table = true;

        if sub < 0 {
            let spaces = (sub.unsigned_abs() / SYMBOLIC_INDENT_STEP) as usize;
            self.write_str(&"&nbsp;".repeat(spaces.min(MAX_SYMBOLIC_INDENT)))?;
        }
        Ok(())
    }

    fn end_paragraph(&mut self) -> ExportResult<()> {
        self.transition_tags(Vec::new())?;

        if self.font_open {
            self.write_str("</font>")?;
            self.font_open = false;
        }

        if self.in_layout_table {
            self.in_layout_table = false;
            self.write_str("</td></tr></table></p>\n")
        } else if self.in_list_item {
            self.in_list_item = false;
            self.write_str("</li>\n")
        } else {
            self.write_str("</p>\n")
        }
    }

    // -------------------------------------------------------------------------
    // Runs
    // -------------------------------------------------------------------------

    /// Tags a run with `attr` needs inside the current paragraph
    fn inline_tags(&self, attr: &AttributeSet) -> Vec<InlineTag> {
        let para = &self.current_paragraph_style;
        let font = FontTag {
            face: attr.font_face.clone().filter(|face| para.font_face.as_ref() != Some(face)),
            size: attr
                .font_size
                .filter(|&size| para.font_size != Some(size))
                .map(|size| self.options.pt_to_size(size)),
            colour: attr.text_colour.filter(|&colour| para.text_colour != Some(colour)),
            background: attr
                .background_colour
                .filter(|&colour| para.background_colour != Some(colour)),
        };

        let mut tags = Vec::new();
        if !font.is_empty() {
            tags.push(InlineTag::Font(font));
        }
        if attr.is_bold() {
            tags.push(InlineTag::Bold);
        }
        if attr.is_italic() {
            tags.push(InlineTag::Italic);
        }
        if attr.is_underlined() {
            tags.push(InlineTag::Underline);
        }
        if let Some(url) = &attr.url {
            tags.push(InlineTag::Link(url.clone()));
        }
        if attr.has_effect(TextEffects::STRIKETHROUGH) {
            tags.push(InlineTag::Del);
        }
        if attr.has_effect(TextEffects::SUPERSCRIPT) {
            tags.push(InlineTag::Sup);
        }
        if attr.has_effect(TextEffects::SUBSCRIPT) {
            tags.push(InlineTag::Sub);
        }
        tags
    }

    /// Close the open tags that differ from `desired`, then open the rest
    fn transition_tags(&mut self, desired: Vec<InlineTag>) -> ExportResult<()> {
        let common = self
            .open_tags
            .iter()
            .zip(&desired)
            .take_while(|(open, wanted)| open == wanted)
            .count();

        while self.open_tags.len() > common {
            if let Some(tag) = self.open_tags.pop() {
                self.write_str(tag.close_tag())?;
            }
        }
        for tag in &desired[common..] {
            self.write_str(&tag.open_tag())?;
        }

        self.open_tags = desired;
        Ok(())
    }

    fn write_text(&mut self, text: &str, attr: &AttributeSet) -> ExportResult<()> {
        if *attr != self.current_character_style {
            let desired = self.inline_tags(attr);
            self.transition_tags(desired)?;
            self.current_character_style = attr.clone();
        }
        self.write_str(&escape_text(text))
    }

    fn write_image(&mut self, run: &ImageRun) -> ExportResult<()> {
        let src = self.images.persist(&run.image)?;
        let mut tag = format!("<img src=\"{}\"", escape_attribute(&src));
        if let Some(width) = run.image.width {
            tag.push_str(&format!(" width=\"{}\"", width));
        }
        if let Some(height) = run.image.height {
            tag.push_str(&format!(" height=\"{}\"", height));
        }
        tag.push_str(" />");
        self.write_str(&tag)
    }

    // -------------------------------------------------------------------------
    // Tables
    // -------------------------------------------------------------------------

    fn write_table(&mut self, table: &Table, base: &AttributeSet) -> ExportResult<()> {
        self.close_lists(None)?;
        self.write_str("<table border=\"1\" cellpadding=\"2\" cellspacing=\"0\">\n")?;

        let table_base = base.merge(&table.attributes);
        for row in &table.rows {
            self.write_str("<tr>")?;
            for cell in &row.cells {
                self.write_str("<td>")?;
                let cell_base = table_base.merge(&cell.attributes);
                for paragraph in &cell.paragraphs {
                    self.write_paragraph(paragraph, &cell_base)?;
                }
                self.close_lists(None)?;
                self.write_str("</td>")?;
            }
            self.write_str("</tr>\n")?;
        }

        self.write_str("</table>\n")
    }
}

// =============================================================================
// Tests
// =============================================================================
