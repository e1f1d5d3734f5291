//! Rich text buffer - the document tree consumed by exporters
//!
//! A buffer holds a sequence of blocks (paragraphs and tables). Paragraphs
//! contain inline text runs and images. Every node carries its own sparse
//! [`AttributeSet`]; the effective formatting of a node is computed by the
//! `combined_attributes` functions, which layer the buffer default style,
//! named styles from a [`StyleLookup`] and the node's own attributes.

use crate::{AttributeSet, ImageData, NodeId, StyleKind, StyleLookup};
use serde::{Deserialize, Serialize};

// =============================================================================
// Buffer
// =============================================================================

/// Root of a rich text document
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RichTextBuffer {
    id: NodeId,
    /// Attributes every paragraph starts from
    pub default_style: AttributeSet,
    pub blocks: Vec<Block>,
}

impl RichTextBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_default_style(mut self, style: AttributeSet) -> Self {
        self.default_style = style;
        self
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Append a paragraph, returning its id
    pub fn push_paragraph(&mut self, paragraph: Paragraph) -> NodeId {
        let id = paragraph.id();
        self.blocks.push(Block::Paragraph(paragraph));
        id
    }

    /// Append a paragraph holding a single unstyled run
    pub fn add_paragraph(&mut self, text: impl Into<String>) -> NodeId {
        self.push_paragraph(Paragraph::new().with_text(text))
    }

    pub fn push_table(&mut self, table: Table) -> NodeId {
        let id = table.id();
        self.blocks.push(Block::Table(table));
        id
    }

    /// Top-level paragraphs, skipping tables
    pub fn paragraphs(&self) -> impl Iterator<Item = &Paragraph> {
        self.blocks.iter().filter_map(|block| match block {
            Block::Paragraph(paragraph) => Some(paragraph),
            Block::Table(_) => None,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Plain text with paragraphs separated by newlines. Table cells are
    /// flattened in reading order.
    pub fn text(&self) -> String {
        let mut lines = Vec::new();
        for block in &self.blocks {
            match block {
                Block::Paragraph(paragraph) => lines.push(paragraph.text()),
                Block::Table(table) => {
                    for cell in table.rows.iter().flat_map(|row| row.cells.iter()) {
                        lines.extend(cell.paragraphs.iter().map(Paragraph::text));
                    }
                }
            }
        }
        lines.join("\n")
    }

    /// Effective attributes of a top-level paragraph
    pub fn combined_paragraph_attributes(
        &self,
        paragraph: &Paragraph,
        lookup: Option<&dyn StyleLookup>,
    ) -> AttributeSet {
        paragraph.combined_attributes(&self.default_style, lookup)
    }
}

/// A top-level or cell-level block
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Block {
    Paragraph(Paragraph),
    Table(Table),
}

// =============================================================================
// Paragraphs
// =============================================================================

/// A paragraph of inline content
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Paragraph {
    id: NodeId,
    pub attributes: AttributeSet,
    pub inlines: Vec<Inline>,
}

impl Paragraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_attributes(mut self, attributes: AttributeSet) -> Self {
        self.attributes = attributes;
        self
    }

    /// Append an unstyled run
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.push_text(text, AttributeSet::default());
        self
    }

    pub fn with_run(mut self, text: impl Into<String>, attributes: AttributeSet) -> Self {
        self.push_text(text, attributes);
        self
    }

    pub fn with_image(mut self, image: ImageData) -> Self {
        self.push_image(image, AttributeSet::default());
        self
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn push_text(&mut self, text: impl Into<String>, attributes: AttributeSet) -> NodeId {
        let run = TextRun::new(text).with_attributes(attributes);
        let id = run.id();
        self.inlines.push(Inline::Text(run));
        id
    }

    pub fn push_image(&mut self, image: ImageData, attributes: AttributeSet) -> NodeId {
        let run = ImageRun {
            id: NodeId::new(),
            image,
            attributes,
        };
        let id = run.id;
        self.inlines.push(Inline::Image(run));
        id
    }

    /// Concatenated text of all runs; images contribute nothing
    pub fn text(&self) -> String {
        self.inlines
            .iter()
            .filter_map(|inline| match inline {
                Inline::Text(run) => Some(run.text.as_str()),
                Inline::Image(_) => None,
            })
            .collect()
    }

    /// Effective paragraph attributes.
    ///
    /// Starts from `base`, then applies the named paragraph style merged
    /// with its bases and the paragraph's own attributes. When the result
    /// names a list style, the list level selected by the left indent is
    /// combined in and governs the indentation.
    pub fn combined_attributes(&self, base: &AttributeSet, lookup: Option<&dyn StyleLookup>) -> AttributeSet {
        let mut combined = base.clone();

        let own = match (lookup, self.attributes.paragraph_style_name.as_deref()) {
            (Some(styles), Some(name)) => match styles.find_style_of_kind(StyleKind::Paragraph, name) {
                Some(def) => def.style_merged_with_base(lookup).merge(&self.attributes),
                None => self.attributes.clone(),
            },
            _ => self.attributes.clone(),
        };

        let list_def = match (lookup, own.list_style_name.as_deref()) {
            (Some(styles), Some(name)) => styles.find_style_of_kind(StyleKind::List, name),
            _ => None,
        };

        match list_def {
            Some(def) => {
                let indent = own.left_indent.unwrap_or(0);
                match def.combine_with_paragraph_style(indent, &own, lookup) {
                    Some(list_combined) => combined.apply(&list_combined),
                    None => combined.apply(&own),
                }
            }
            None => combined.apply(&own),
        }

        combined
    }
}

/// Inline content of a paragraph
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Inline {
    Text(TextRun),
    Image(ImageRun),
}

impl Inline {
    pub fn attributes(&self) -> &AttributeSet {
        match self {
            Inline::Text(run) => &run.attributes,
            Inline::Image(run) => &run.attributes,
        }
    }

    /// Effective attributes of this inline within a paragraph whose
    /// combined attributes are `paragraph`
    pub fn combined_attributes(&self, paragraph: &AttributeSet, lookup: Option<&dyn StyleLookup>) -> AttributeSet {
        combine_character_attributes(paragraph, self.attributes(), lookup)
    }
}

fn combine_character_attributes(
    paragraph: &AttributeSet,
    own: &AttributeSet,
    lookup: Option<&dyn StyleLookup>,
) -> AttributeSet {
    let mut combined = paragraph.clone();
    if let (Some(styles), Some(name)) = (lookup, own.character_style_name.as_deref()) {
        if let Some(def) = styles.find_style_of_kind(StyleKind::Character, name) {
            combined.apply(&def.style_merged_with_base(lookup));
        }
    }
    combined.apply(own);
    combined
}

/// A run of text sharing one attribute set
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TextRun {
    id: NodeId,
    pub text: String,
    pub attributes: AttributeSet,
}

impl TextRun {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            id: NodeId::new(),
            text: text.into(),
            attributes: AttributeSet::default(),
        }
    }

    pub fn with_attributes(mut self, attributes: AttributeSet) -> Self {
        self.attributes = attributes;
        self
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Paragraph attributes, then the named character style, then the
    /// run's own attributes
    pub fn combined_attributes(&self, paragraph: &AttributeSet, lookup: Option<&dyn StyleLookup>) -> AttributeSet {
        combine_character_attributes(paragraph, &self.attributes, lookup)
    }
}

/// An embedded image
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageRun {
    id: NodeId,
    pub image: ImageData,
    pub attributes: AttributeSet,
}

impl ImageRun {
    pub fn new(image: ImageData) -> Self {
        Self {
            id: NodeId::new(),
            image,
            attributes: AttributeSet::default(),
        }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }
}

// =============================================================================
// Tables
// =============================================================================

/// A grid of cells, each holding paragraphs
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Table {
    id: NodeId,
    pub attributes: AttributeSet,
    pub rows: Vec<TableRow>,
}

impl Table {
    pub fn new() -> Self {
        Self::default()
    }

    /// Table of empty cells
    pub fn with_size(rows: usize, columns: usize) -> Self {
        Self {
            rows: (0..rows)
                .map(|_| TableRow {
                    cells: (0..columns).map(|_| TableCell::new()).collect(),
                })
                .collect(),
            ..Self::default()
        }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn push_row(&mut self, row: TableRow) {
        self.rows.push(row);
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Width of the widest row
    pub fn column_count(&self) -> usize {
        self.rows.iter().map(|row| row.cells.len()).max().unwrap_or(0)
    }

    pub fn cell(&self, row: usize, column: usize) -> Option<&TableCell> {
        self.rows.get(row)?.cells.get(column)
    }

    pub fn cell_mut(&mut self, row: usize, column: usize) -> Option<&mut TableCell> {
        self.rows.get_mut(row)?.cells.get_mut(column)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TableRow {
    pub cells: Vec<TableCell>,
}

impl TableRow {
    pub fn new(cells: Vec<TableCell>) -> Self {
        Self { cells }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TableCell {
    id: NodeId,
    pub attributes: AttributeSet,
    pub paragraphs: Vec<Paragraph>,
}

impl TableCell {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_paragraph(mut self, paragraph: Paragraph) -> Self {
        self.paragraphs.push(paragraph);
        self
    }

    pub fn id(&self) -> NodeId {
        self.id
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{BulletStyle, Colour, StyleDefinition, StyleSheet};

    fn sheet() -> StyleSheet {
        let mut sheet = StyleSheet::new("doc");
        sheet.add_style(
            StyleDefinition::paragraph("Normal")
                .with_style(AttributeSet::new().with_font_face("Times").with_font_size(12.0)),
        );
        sheet.add_style(
            StyleDefinition::paragraph("Quote")
                .with_base_style("Normal")
                .with_style(AttributeSet::new().with_italic(true).with_left_indent(100, 0)),
        );
        sheet.add_style(
            StyleDefinition::character("Strong").with_style(AttributeSet::new().with_bold(true)),
        );

        let mut numbers = StyleDefinition::list("Numbers")
            .with_style(AttributeSet::new().with_text_colour(Colour::GREEN));
        for level in 0..3 {
            numbers
                .set_list_attributes(level, (level as i32 + 1) * 60, 60, BulletStyle::ARABIC, "")
                .unwrap();
        }
        sheet.add_style(numbers);
        sheet
    }

    #[test]
    fn test_paragraph_without_lookup_uses_own_attributes() {
        let base = AttributeSet::new().with_font_size(10.0);
        let para = Paragraph::new().with_attributes(AttributeSet::new().with_paragraph_style_name("Quote"));
        let combined = para.combined_attributes(&base, None);
        assert_eq!(combined.font_size, Some(10.0));
        assert!(!combined.is_italic());
    }

    #[test]
    fn test_paragraph_named_style_then_own() {
        let sheet = sheet();
        let para = Paragraph::new().with_attributes(
            AttributeSet::new()
                .with_paragraph_style_name("Quote")
                .with_font_size(14.0),
        );
        let combined = para.combined_attributes(&AttributeSet::new(), Some(&sheet));
        assert_eq!(combined.font_face.as_deref(), Some("Times"));
        assert_eq!(combined.font_size, Some(14.0));
        assert!(combined.is_italic());
        assert_eq!(combined.left_indent, Some(100));
    }

    #[test]
    fn test_list_paragraph_takes_level_indent() {
        let sheet = sheet();
        let para = Paragraph::new().with_attributes(
            AttributeSet::new()
                .with_list_style_name("Numbers")
                .with_left_indent(125, 0)
                .with_bold(true),
        );
        let combined = para.combined_attributes(&AttributeSet::new(), Some(&sheet));
        assert_eq!(combined.left_indent, Some(120));
        assert_eq!(combined.left_sub_indent, Some(60));
        assert_eq!(combined.bullet_style, Some(BulletStyle::ARABIC));
        assert_eq!(combined.text_colour, Some(Colour::GREEN));
        assert!(combined.is_bold());
    }

    #[test]
    fn test_run_character_style() {
        let sheet = sheet();
        let para_attrs = AttributeSet::new().with_font_face("Arial");
        let run = TextRun::new("hi").with_attributes(
            AttributeSet::new()
                .with_character_style_name("Strong")
                .with_text_colour(Colour::RED),
        );
        let combined = run.combined_attributes(&para_attrs, Some(&sheet));
        assert_eq!(combined.font_face.as_deref(), Some("Arial"));
        assert!(combined.is_bold());
        assert_eq!(combined.text_colour, Some(Colour::RED));

        let unresolved = run.combined_attributes(&para_attrs, None);
        assert!(!unresolved.is_bold());
    }

    #[test]
    fn test_buffer_text_and_tables() {
        let mut buffer = RichTextBuffer::new();
        buffer.add_paragraph("first");
        let mut table = Table::with_size(1, 2);
        table
            .cell_mut(0, 1)
            .unwrap()
            .paragraphs
            .push(Paragraph::new().with_text("cell"));
        buffer.push_table(table);
        buffer.push_paragraph(Paragraph::new().with_run("last", AttributeSet::new().with_bold(true)));

        assert_eq!(buffer.paragraphs().count(), 2);
        assert_eq!(buffer.text(), "first\ncell\nlast");
    }

    #[test]
    fn test_table_dimensions() {
        let mut table = Table::with_size(2, 3);
        table.push_row(TableRow::new(vec![TableCell::new()]));
        assert_eq!(table.row_count(), 3);
        assert_eq!(table.column_count(), 3);
        assert!(table.cell(2, 1).is_none());
        assert!(table.cell(1, 2).is_some());
    }
}
