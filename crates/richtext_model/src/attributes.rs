//! Attribute sets - sparse character and paragraph formatting
//!
//! An [`AttributeSet`] is a bag of independently present formatting
//! properties. A property is present when its field is `Some`, and
//! [`AttributeSet::flags`] reports the presence mask. Merging is
//! right-biased: properties present in the source overwrite the
//! destination, absent ones leave the destination untouched.
//!
//! Indents and paragraph spacing are measured in tenths of a millimetre,
//! font sizes in points, line spacing in tenths of a line (10 = single).

use crate::{ModelError, Result};
use bitflags::bitflags;
use serde::{Deserialize, Serialize};

// =============================================================================
// Presence Flags
// =============================================================================

bitflags! {
    /// Which properties of an attribute set are present.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    pub struct AttrFlags: u64 {
        const FONT_FACE = 1 << 0;
        const FONT_SIZE = 1 << 1;
        const FONT_WEIGHT = 1 << 2;
        const FONT_STYLE = 1 << 3;
        const FONT_UNDERLINE = 1 << 4;
        const TEXT_COLOUR = 1 << 5;
        const BACKGROUND_COLOUR = 1 << 6;
        const TEXT_EFFECTS = 1 << 7;
        const URL = 1 << 8;
        const CHARACTER_STYLE_NAME = 1 << 9;

        const ALIGNMENT = 1 << 16;
        const TABS = 1 << 17;
        const LEFT_INDENT = 1 << 18;
        const LEFT_SUB_INDENT = 1 << 19;
        const RIGHT_INDENT = 1 << 20;
        const PARA_SPACING_BEFORE = 1 << 21;
        const PARA_SPACING_AFTER = 1 << 22;
        const LINE_SPACING = 1 << 23;
        const OUTLINE_LEVEL = 1 << 24;
        const BULLET_STYLE = 1 << 25;
        const BULLET_NUMBER = 1 << 26;
        const BULLET_TEXT = 1 << 27;
        const BULLET_NAME = 1 << 28;
        const PAGE_BREAK = 1 << 29;
        const PARAGRAPH_STYLE_NAME = 1 << 30;
        const LIST_STYLE_NAME = 1 << 31;

        const BOX_STYLE_NAME = 1 << 40;

        const FONT = Self::FONT_FACE.bits()
            | Self::FONT_SIZE.bits()
            | Self::FONT_WEIGHT.bits()
            | Self::FONT_STYLE.bits()
            | Self::FONT_UNDERLINE.bits();

        const CHARACTER = Self::FONT.bits()
            | Self::TEXT_COLOUR.bits()
            | Self::BACKGROUND_COLOUR.bits()
            | Self::TEXT_EFFECTS.bits()
            | Self::URL.bits()
            | Self::CHARACTER_STYLE_NAME.bits();

        const PARAGRAPH = Self::ALIGNMENT.bits()
            | Self::TABS.bits()
            | Self::LEFT_INDENT.bits()
            | Self::LEFT_SUB_INDENT.bits()
            | Self::RIGHT_INDENT.bits()
            | Self::PARA_SPACING_BEFORE.bits()
            | Self::PARA_SPACING_AFTER.bits()
            | Self::LINE_SPACING.bits()
            | Self::OUTLINE_LEVEL.bits()
            | Self::BULLET_STYLE.bits()
            | Self::BULLET_NUMBER.bits()
            | Self::BULLET_TEXT.bits()
            | Self::BULLET_NAME.bits()
            | Self::PAGE_BREAK.bits()
            | Self::PARAGRAPH_STYLE_NAME.bits()
            | Self::LIST_STYLE_NAME.bits();

        /// Box styles carry no properties of their own beyond the name
        const BOX = Self::BOX_STYLE_NAME.bits();
    }
}

bitflags! {
    /// Bullet style for list paragraphs.
    ///
    /// Left alignment of the bullet is the default and has no bit.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    pub struct BulletStyle: u32 {
        const ARABIC = 0x0001;
        const LETTERS_UPPER = 0x0002;
        const LETTERS_LOWER = 0x0004;
        const ROMAN_UPPER = 0x0008;
        const ROMAN_LOWER = 0x0010;
        const SYMBOL = 0x0020;
        const BITMAP = 0x0040;
        const PARENTHESES = 0x0080;
        const PERIOD = 0x0100;
        const STANDARD = 0x0200;
        const RIGHT_PARENTHESIS = 0x0400;
        const OUTLINE = 0x0800;
        const ALIGN_RIGHT = 0x1000;
        const ALIGN_CENTRE = 0x2000;
        const CONTINUATION = 0x4000;

        /// Bullet kinds that count upwards from item to item
        const NUMBERED = Self::ARABIC.bits()
            | Self::LETTERS_UPPER.bits()
            | Self::LETTERS_LOWER.bits()
            | Self::ROMAN_UPPER.bits()
            | Self::ROMAN_LOWER.bits();
    }
}

impl BulletStyle {
    /// Whether this bullet style produces an enumerable sequence
    pub fn is_numbered(&self) -> bool {
        self.intersects(Self::NUMBERED)
    }
}

bitflags! {
    /// Text effects applied to character runs.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    pub struct TextEffects: u32 {
        const CAPITALS = 0x0001;
        const SMALL_CAPITALS = 0x0002;
        const STRIKETHROUGH = 0x0004;
        const DOUBLE_STRIKETHROUGH = 0x0008;
        const SUPERSCRIPT = 0x0010;
        const SUBSCRIPT = 0x0020;
        const RTL = 0x0040;
        const SUPPRESS_HYPHENATION = 0x0080;
    }
}

// =============================================================================
// Value Types
// =============================================================================

/// An RGB colour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Colour {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Colour {
    pub const BLACK: Colour = Colour::new(0, 0, 0);
    pub const WHITE: Colour = Colour::new(255, 255, 255);
    pub const RED: Colour = Colour::new(255, 0, 0);
    pub const GREEN: Colour = Colour::new(0, 128, 0);
    pub const BLUE: Colour = Colour::new(0, 0, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// HTML syntax, `#RRGGBB` with upper-case hex digits
    pub fn to_html(&self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }

    /// Parse `#RRGGBB` or a basic colour name
    pub fn parse(text: &str) -> Result<Self> {
        let trimmed = text.trim();
        if let Some(hex) = trimmed.strip_prefix('#') {
            if hex.len() == 6 && hex.is_ascii() {
                let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&hex[range], 16);
                if let (Ok(r), Ok(g), Ok(b)) = (channel(0..2), channel(2..4), channel(4..6)) {
                    return Ok(Self::new(r, g, b));
                }
            }
            return Err(ModelError::InvalidColour(text.to_string()));
        }

        match trimmed.to_lowercase().as_str() {
            "black" => Ok(Self::BLACK),
            "white" => Ok(Self::WHITE),
            "red" => Ok(Self::RED),
            "green" => Ok(Self::GREEN),
            "blue" => Ok(Self::BLUE),
            "yellow" => Ok(Self::new(255, 255, 0)),
            "cyan" | "aqua" => Ok(Self::new(0, 255, 255)),
            "magenta" | "fuchsia" => Ok(Self::new(255, 0, 255)),
            "gray" | "grey" => Ok(Self::new(128, 128, 128)),
            _ => Err(ModelError::InvalidColour(text.to_string())),
        }
    }
}

impl std::str::FromStr for Colour {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl std::fmt::Display for Colour {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_html())
    }
}

/// Font weight on the CSS 100-900 scale
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FontWeight(pub u16);

impl FontWeight {
    pub const LIGHT: FontWeight = FontWeight(300);
    pub const NORMAL: FontWeight = FontWeight(400);
    pub const BOLD: FontWeight = FontWeight(700);

    pub fn is_bold(&self) -> bool {
        self.0 >= 600
    }
}

impl Default for FontWeight {
    fn default() -> Self {
        Self::NORMAL
    }
}

/// Font slant
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FontStyle {
    #[default]
    Normal,
    Italic,
    Slant,
}

/// Paragraph alignment
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Alignment {
    #[default]
    Left,
    Center,
    Right,
    Justify,
}

// =============================================================================
// Attribute Set
// =============================================================================

/// A sparse set of character and paragraph formatting properties
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AttributeSet {
    /// Font face name
    pub font_face: Option<String>,
    /// Font size in points
    pub font_size: Option<f32>,
    pub font_weight: Option<FontWeight>,
    pub font_style: Option<FontStyle>,
    pub font_underlined: Option<bool>,
    pub text_colour: Option<Colour>,
    pub background_colour: Option<Colour>,
    /// Effect bits; only bits inside `text_effect_mask` are specified.
    /// An empty mask means every bit is specified.
    pub text_effects: Option<TextEffects>,
    pub text_effect_mask: TextEffects,
    /// Hyperlink target
    pub url: Option<String>,
    /// Name of the character style that produced these attributes
    pub character_style_name: Option<String>,

    pub alignment: Option<Alignment>,
    /// Tab stop positions in tenths of a millimetre
    pub tabs: Option<Vec<i32>>,
    /// Left indent of the first line
    pub left_indent: Option<i32>,
    /// Indent of subsequent lines, relative to the left indent
    pub left_sub_indent: Option<i32>,
    pub right_indent: Option<i32>,
    pub paragraph_spacing_before: Option<i32>,
    pub paragraph_spacing_after: Option<i32>,
    /// Line spacing in tenths of a line
    pub line_spacing: Option<i32>,
    /// Outline level (0 = body text)
    pub outline_level: Option<u8>,
    pub bullet_style: Option<BulletStyle>,
    pub bullet_number: Option<i32>,
    /// Literal bullet symbol for symbol bullets
    pub bullet_text: Option<String>,
    /// Named bullet, e.g. "standard/circle"
    pub bullet_name: Option<String>,
    pub page_break: Option<bool>,
    /// Name of the paragraph style that produced these attributes
    pub paragraph_style_name: Option<String>,
    /// Name of the list style that produced these attributes
    pub list_style_name: Option<String>,

    /// Name of the box style that produced these attributes
    pub box_style_name: Option<String>,
}

/// Overwrite `dest` with `src` when `src` is present
fn take_over<T: Clone>(dest: &mut Option<T>, src: &Option<T>) {
    if let Some(value) = src {
        *dest = Some(value.clone());
    }
}

/// Clear `dest` when `other` is present
fn clear_if<T, U>(dest: &mut Option<T>, other: &Option<U>) {
    if other.is_some() {
        *dest = None;
    }
}

/// True when `other` is absent or `value` matches it
fn matches_if<T: PartialEq>(value: &Option<T>, other: &Option<T>) -> bool {
    other.is_none() || value == other
}

fn flag_if<T>(value: &Option<T>, flag: AttrFlags) -> AttrFlags {
    if value.is_some() {
        flag
    } else {
        AttrFlags::empty()
    }
}

impl AttributeSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Presence mask of this set
    pub fn flags(&self) -> AttrFlags {
        flag_if(&self.font_face, AttrFlags::FONT_FACE)
            | flag_if(&self.font_size, AttrFlags::FONT_SIZE)
            | flag_if(&self.font_weight, AttrFlags::FONT_WEIGHT)
            | flag_if(&self.font_style, AttrFlags::FONT_STYLE)
            | flag_if(&self.font_underlined, AttrFlags::FONT_UNDERLINE)
            | flag_if(&self.text_colour, AttrFlags::TEXT_COLOUR)
            | flag_if(&self.background_colour, AttrFlags::BACKGROUND_COLOUR)
            | flag_if(&self.text_effects, AttrFlags::TEXT_EFFECTS)
            | flag_if(&self.url, AttrFlags::URL)
            | flag_if(&self.character_style_name, AttrFlags::CHARACTER_STYLE_NAME)
            | flag_if(&self.alignment, AttrFlags::ALIGNMENT)
            | flag_if(&self.tabs, AttrFlags::TABS)
            | flag_if(&self.left_indent, AttrFlags::LEFT_INDENT)
            | flag_if(&self.left_sub_indent, AttrFlags::LEFT_SUB_INDENT)
            | flag_if(&self.right_indent, AttrFlags::RIGHT_INDENT)
            | flag_if(&self.paragraph_spacing_before, AttrFlags::PARA_SPACING_BEFORE)
            | flag_if(&self.paragraph_spacing_after, AttrFlags::PARA_SPACING_AFTER)
            | flag_if(&self.line_spacing, AttrFlags::LINE_SPACING)
            | flag_if(&self.outline_level, AttrFlags::OUTLINE_LEVEL)
            | flag_if(&self.bullet_style, AttrFlags::BULLET_STYLE)
            | flag_if(&self.bullet_number, AttrFlags::BULLET_NUMBER)
            | flag_if(&self.bullet_text, AttrFlags::BULLET_TEXT)
            | flag_if(&self.bullet_name, AttrFlags::BULLET_NAME)
            | flag_if(&self.page_break, AttrFlags::PAGE_BREAK)
            | flag_if(&self.paragraph_style_name, AttrFlags::PARAGRAPH_STYLE_NAME)
            | flag_if(&self.list_style_name, AttrFlags::LIST_STYLE_NAME)
            | flag_if(&self.box_style_name, AttrFlags::BOX_STYLE_NAME)
    }

    /// Whether every property in `flags` is present
    pub fn has(&self, flags: AttrFlags) -> bool {
        self.flags().contains(flags)
    }

    /// Check if no property is present
    pub fn is_empty(&self) -> bool {
        self.flags().is_empty()
    }

    /// Whether any character property is present
    pub fn is_character_style(&self) -> bool {
        self.flags().intersects(AttrFlags::CHARACTER)
    }

    /// Whether any paragraph property is present
    pub fn is_paragraph_style(&self) -> bool {
        self.flags().intersects(AttrFlags::PARAGRAPH)
    }

    /// Whether a box style back-reference is present
    pub fn is_box_style(&self) -> bool {
        self.flags().intersects(AttrFlags::BOX)
    }

    /// Whether any font property is present
    pub fn has_font(&self) -> bool {
        self.flags().intersects(AttrFlags::FONT)
    }

    pub fn is_bold(&self) -> bool {
        self.font_weight.is_some_and(|w| w.is_bold())
    }

    pub fn is_italic(&self) -> bool {
        matches!(self.font_style, Some(FontStyle::Italic | FontStyle::Slant))
    }

    pub fn is_underlined(&self) -> bool {
        self.font_underlined == Some(true)
    }

    /// Whether `effect` is switched on
    pub fn has_effect(&self, effect: TextEffects) -> bool {
        self.text_effects.is_some_and(|e| e.contains(effect))
    }

    /// Effect bits actually specified by this set
    pub fn effective_effect_mask(&self) -> TextEffects {
        match self.text_effects {
            None => TextEffects::empty(),
            Some(_) if self.text_effect_mask.is_empty() => TextEffects::all(),
            Some(_) => self.text_effect_mask,
        }
    }

    /// Apply `other` on top of this set.
    ///
    /// Every property present in `other` overwrites the value here; properties
    /// absent in `other` are left as they are.
    pub fn apply(&mut self, other: &AttributeSet) {
        take_over(&mut self.font_face, &other.font_face);
        take_over(&mut self.font_size, &other.font_size);
        take_over(&mut self.font_weight, &other.font_weight);
        take_over(&mut self.font_style, &other.font_style);
        take_over(&mut self.font_underlined, &other.font_underlined);
        take_over(&mut self.text_colour, &other.text_colour);
        take_over(&mut self.background_colour, &other.background_colour);
        take_over(&mut self.url, &other.url);
        take_over(&mut self.character_style_name, &other.character_style_name);

        if let Some(src) = other.text_effects {
            let mask = other.effective_effect_mask();
            let dest_mask = self.effective_effect_mask();
            let dest = self.text_effects.unwrap_or_default();
            self.text_effects = Some((dest & !mask) | (src & mask));
            self.text_effect_mask = dest_mask | mask;
        }

        take_over(&mut self.alignment, &other.alignment);
        take_over(&mut self.tabs, &other.tabs);
        take_over(&mut self.left_indent, &other.left_indent);
        take_over(&mut self.left_sub_indent, &other.left_sub_indent);
        take_over(&mut self.right_indent, &other.right_indent);
        take_over(&mut self.paragraph_spacing_before, &other.paragraph_spacing_before);
        take_over(&mut self.paragraph_spacing_after, &other.paragraph_spacing_after);
        take_over(&mut self.line_spacing, &other.line_spacing);
        take_over(&mut self.outline_level, &other.outline_level);
        take_over(&mut self.bullet_style, &other.bullet_style);
        take_over(&mut self.bullet_number, &other.bullet_number);
        take_over(&mut self.bullet_text, &other.bullet_text);
        take_over(&mut self.bullet_name, &other.bullet_name);
        take_over(&mut self.page_break, &other.page_break);
        take_over(&mut self.paragraph_style_name, &other.paragraph_style_name);
        take_over(&mut self.list_style_name, &other.list_style_name);
        take_over(&mut self.box_style_name, &other.box_style_name);
    }

    /// Merge another set on top of this one, returning the result
    pub fn merge(&self, other: &AttributeSet) -> AttributeSet {
        let mut merged = self.clone();
        merged.apply(other);
        merged
    }

    /// Clear every property that is present in `other`
    pub fn remove(&mut self, other: &AttributeSet) {
        clear_if(&mut self.font_face, &other.font_face);
        clear_if(&mut self.font_size, &other.font_size);
        clear_if(&mut self.font_weight, &other.font_weight);
        clear_if(&mut self.font_style, &other.font_style);
        clear_if(&mut self.font_underlined, &other.font_underlined);
        clear_if(&mut self.text_colour, &other.text_colour);
        clear_if(&mut self.background_colour, &other.background_colour);
        clear_if(&mut self.url, &other.url);
        clear_if(&mut self.character_style_name, &other.character_style_name);
        if other.text_effects.is_some() {
            self.text_effects = None;
            self.text_effect_mask = TextEffects::empty();
        }
        clear_if(&mut self.alignment, &other.alignment);
        clear_if(&mut self.tabs, &other.tabs);
        clear_if(&mut self.left_indent, &other.left_indent);
        clear_if(&mut self.left_sub_indent, &other.left_sub_indent);
        clear_if(&mut self.right_indent, &other.right_indent);
        clear_if(&mut self.paragraph_spacing_before, &other.paragraph_spacing_before);
        clear_if(&mut self.paragraph_spacing_after, &other.paragraph_spacing_after);
        clear_if(&mut self.line_spacing, &other.line_spacing);
        clear_if(&mut self.outline_level, &other.outline_level);
        clear_if(&mut self.bullet_style, &other.bullet_style);
        clear_if(&mut self.bullet_number, &other.bullet_number);
        clear_if(&mut self.bullet_text, &other.bullet_text);
        clear_if(&mut self.bullet_name, &other.bullet_name);
        clear_if(&mut self.page_break, &other.page_break);
        clear_if(&mut self.paragraph_style_name, &other.paragraph_style_name);
        clear_if(&mut self.list_style_name, &other.list_style_name);
        clear_if(&mut self.box_style_name, &other.box_style_name);
    }

    /// Check that every property present in `other` is present here with
    /// the same value. Properties absent in `other` are not compared.
    pub fn eq_partial(&self, other: &AttributeSet) -> bool {
        let effects_match = match other.text_effects {
            None => true,
            Some(src) => {
                let mask = other.effective_effect_mask();
                self.effective_effect_mask().contains(mask)
                    && self.text_effects.unwrap_or_default() & mask == src & mask
            }
        };

        effects_match
            && matches_if(&self.font_face, &other.font_face)
            && matches_if(&self.font_size, &other.font_size)
            && matches_if(&self.font_weight, &other.font_weight)
            && matches_if(&self.font_style, &other.font_style)
            && matches_if(&self.font_underlined, &other.font_underlined)
            && matches_if(&self.text_colour, &other.text_colour)
            && matches_if(&self.background_colour, &other.background_colour)
            && matches_if(&self.url, &other.url)
            && matches_if(&self.character_style_name, &other.character_style_name)
            && matches_if(&self.alignment, &other.alignment)
            && matches_if(&self.tabs, &other.tabs)
            && matches_if(&self.left_indent, &other.left_indent)
            && matches_if(&self.left_sub_indent, &other.left_sub_indent)
            && matches_if(&self.right_indent, &other.right_indent)
            && matches_if(&self.paragraph_spacing_before, &other.paragraph_spacing_before)
            && matches_if(&self.paragraph_spacing_after, &other.paragraph_spacing_after)
            && matches_if(&self.line_spacing, &other.line_spacing)
            && matches_if(&self.outline_level, &other.outline_level)
            && matches_if(&self.bullet_style, &other.bullet_style)
            && matches_if(&self.bullet_number, &other.bullet_number)
            && matches_if(&self.bullet_text, &other.bullet_text)
            && matches_if(&self.bullet_name, &other.bullet_name)
            && matches_if(&self.page_break, &other.page_break)
            && matches_if(&self.paragraph_style_name, &other.paragraph_style_name)
            && matches_if(&self.list_style_name, &other.list_style_name)
            && matches_if(&self.box_style_name, &other.box_style_name)
    }

    // -------------------------------------------------------------------------
    // Setters
    // -------------------------------------------------------------------------

    /// Set the left indent together with the sub-indent of following lines
    pub fn set_left_indent(&mut self, indent: i32, sub_indent: i32) {
        self.left_indent = Some(indent);
        self.left_sub_indent = Some(sub_indent);
    }

    /// Switch effects on or off, marking them as specified
    pub fn set_effects(&mut self, effects: TextEffects, enabled: bool) {
        let mask = self.effective_effect_mask();
        let mut current = self.text_effects.unwrap_or_default();
        current.set(effects, enabled);
        self.text_effects = Some(current);
        self.text_effect_mask = mask | effects;
    }

    // -------------------------------------------------------------------------
    // Builders
    // -------------------------------------------------------------------------

    pub fn with_font_face(mut self, face: impl Into<String>) -> Self {
        self.font_face = Some(face.into());
        self
    }

    pub fn with_font_size(mut self, points: f32) -> Self {
        self.font_size = Some(points);
        self
    }

    pub fn with_bold(mut self, bold: bool) -> Self {
        self.font_weight = Some(if bold { FontWeight::BOLD } else { FontWeight::NORMAL });
        self
    }

    pub fn with_italic(mut self, italic: bool) -> Self {
        self.font_style = Some(if italic { FontStyle::Italic } else { FontStyle::Normal });
        self
    }

    pub fn with_underline(mut self, underlined: bool) -> Self {
        self.font_underlined = Some(underlined);
        self
    }

    pub fn with_text_colour(mut self, colour: Colour) -> Self {
        self.text_colour = Some(colour);
        self
    }

    pub fn with_background_colour(mut self, colour: Colour) -> Self {
        self.background_colour = Some(colour);
        self
    }

    pub fn with_effects(mut self, effects: TextEffects) -> Self {
        self.set_effects(effects, true);
        self
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    pub fn with_alignment(mut self, alignment: Alignment) -> Self {
        self.alignment = Some(alignment);
        self
    }

    pub fn with_left_indent(mut self, indent: i32, sub_indent: i32) -> Self {
        self.set_left_indent(indent, sub_indent);
        self
    }

    pub fn with_right_indent(mut self, indent: i32) -> Self {
        self.right_indent = Some(indent);
        self
    }

    pub fn with_paragraph_spacing(mut self, before: i32, after: i32) -> Self {
        self.paragraph_spacing_before = Some(before);
        self.paragraph_spacing_after = Some(after);
        self
    }

    pub fn with_line_spacing(mut self, tenths: i32) -> Self {
        self.line_spacing = Some(tenths);
        self
    }

    pub fn with_bullet_style(mut self, style: BulletStyle) -> Self {
        self.bullet_style = Some(style);
        self
    }

    pub fn with_bullet_text(mut self, text: impl Into<String>) -> Self {
        self.bullet_text = Some(text.into());
        self
    }

    pub fn with_page_break(mut self, page_break: bool) -> Self {
        self.page_break = Some(page_break);
        self
    }

    pub fn with_paragraph_style_name(mut self, name: impl Into<String>) -> Self {
        self.paragraph_style_name = Some(name.into());
        self
    }

    pub fn with_character_style_name(mut self, name: impl Into<String>) -> Self {
        self.character_style_name = Some(name.into());
        self
    }

    pub fn with_list_style_name(mut self, name: impl Into<String>) -> Self {
        self.list_style_name = Some(name.into());
        self
    }
}

// =============================================================================
// Tests
// =============================================================================
