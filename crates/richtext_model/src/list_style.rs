//! List styles - ten indent/bullet levels and their combination with
//! paragraph formatting
//!
//! A list style is a paragraph-like [`StyleDefinition`] that additionally
//! carries one [`AttributeSet`] per level. A paragraph's physical left indent
//! selects the level; the level's indentation always wins over both the
//! general list style and the paragraph's own attributes.

use crate::{AttributeSet, BulletStyle, ModelError, Result, StyleDefinition, StyleLookup};
use serde::{Deserialize, Serialize};

/// Number of levels in every list style
pub const LIST_LEVEL_COUNT: usize = 10;

// =============================================================================
// List Levels
// =============================================================================

/// Per-level attributes of a list style
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ListLevels([AttributeSet; LIST_LEVEL_COUNT]);

impl ListLevels {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn level_count(&self) -> usize {
        LIST_LEVEL_COUNT
    }

    fn check_level(level: usize) -> Result<()> {
        if level < LIST_LEVEL_COUNT {
            Ok(())
        } else {
            Err(ModelError::LevelOutOfRange(level))
        }
    }

    /// Attributes of `level`, if in range
    pub fn level(&self, level: usize) -> Option<&AttributeSet> {
        self.0.get(level)
    }

    /// Replace the attributes of `level`
    pub fn set_level(&mut self, level: usize, attributes: AttributeSet) -> Result<()> {
        Self::check_level(level)?;
        self.0[level] = attributes;
        Ok(())
    }

    /// Build and store a level from indents and bullet settings.
    ///
    /// A non-empty `symbol` is stored as literal bullet text for symbol
    /// bullets and as a bullet name otherwise.
    pub fn set_attributes(
        &mut self,
        level: usize,
        left_indent: i32,
        left_sub_indent: i32,
        bullet_style: BulletStyle,
        symbol: &str,
    ) -> Result<()> {
        let mut attributes = AttributeSet::new();
        attributes.bullet_style = Some(bullet_style);
        attributes.set_left_indent(left_indent, left_sub_indent);

        if !symbol.is_empty() {
            if bullet_style.contains(BulletStyle::SYMBOL) {
                attributes.bullet_text = Some(symbol.to_string());
            } else {
                attributes.bullet_name = Some(symbol.to_string());
            }
        }

        self.set_level(level, attributes)
    }

    /// Level whose indentation range contains `indent`.
    ///
    /// Finds the first level whose left indent exceeds `indent` and returns
    /// the level before it, so boundaries resolve to the shallower level.
    /// An indent beyond every level maps to the last one.
    pub fn find_level_for_indent(&self, indent: i32) -> usize {
        self.0
            .iter()
            .position(|level| indent < level.left_indent.unwrap_or(0))
            .map(|crossing| crossing.saturating_sub(1))
            .unwrap_or(LIST_LEVEL_COUNT - 1)
    }

    /// Whether `level` uses an incrementing bullet (numbers, letters, roman)
    pub fn is_numbered(&self, level: usize) -> bool {
        self.level(level)
            .and_then(|attributes| attributes.bullet_style)
            .is_some_and(|style| style.is_numbered())
    }

    pub fn iter(&self) -> impl Iterator<Item = &AttributeSet> {
        self.0.iter()
    }
}

// =============================================================================
// List Style Operations
// =============================================================================

impl StyleDefinition {
    fn require_list_levels(&self) -> Result<&ListLevels> {
        self.list_levels()
            .ok_or_else(|| ModelError::NotAListStyle(self.name.clone()))
    }

    fn require_list_levels_mut(&mut self) -> Result<&mut ListLevels> {
        let name = self.name.clone();
        self.list_levels_mut().ok_or(ModelError::NotAListStyle(name))
    }

    /// Number of levels; zero for styles that are not list styles
    pub fn level_count(&self) -> usize {
        self.list_levels().map_or(0, ListLevels::level_count)
    }

    pub fn level_attributes(&self, level: usize) -> Option<&AttributeSet> {
        self.list_levels()?.level(level)
    }

    pub fn set_level_attributes(&mut self, level: usize, attributes: AttributeSet) -> Result<()> {
        self.require_list_levels_mut()?.set_level(level, attributes)
    }

    /// Configure a level from indents and bullet settings
    pub fn set_list_attributes(
        &mut self,
        level: usize,
        left_indent: i32,
        left_sub_indent: i32,
        bullet_style: BulletStyle,
        symbol: &str,
    ) -> Result<()> {
        self.require_list_levels_mut()?
            .set_attributes(level, left_indent, left_sub_indent, bullet_style, symbol)
    }

    pub fn find_level_for_indent(&self, indent: i32) -> Result<usize> {
        Ok(self.require_list_levels()?.find_level_for_indent(indent))
    }

    pub fn is_numbered(&self, level: usize) -> bool {
        self.list_levels().is_some_and(|levels| levels.is_numbered(level))
    }

    /// Level attributes overlaid with the whole list style merged with its
    /// bases. The level's indents are kept.
    pub fn combined_style_for_level(
        &self,
        level: usize,
        lookup: Option<&dyn StyleLookup>,
    ) -> Option<AttributeSet> {
        let mut attributes = self.level_attributes(level)?.clone();
        let left_indent = attributes.left_indent;
        let left_sub_indent = attributes.left_sub_indent;

        attributes.apply(&self.style_merged_with_base(lookup));

        attributes.left_indent = left_indent;
        attributes.left_sub_indent = left_sub_indent;
        Some(attributes)
    }

    /// Combined style for the level matching `indent`
    pub fn combined_style(&self, indent: i32, lookup: Option<&dyn StyleLookup>) -> Option<AttributeSet> {
        let level = self.find_level_for_indent(indent).ok()?;
        self.combined_style_for_level(level, lookup)
    }

    /// Combine the level matching `indent` with a paragraph's own attributes.
    ///
    /// Paragraph formatting wins over the list style except for the left
    /// indents, which stay governed by the level.
    pub fn combine_with_paragraph_style(
        &self,
        indent: i32,
        paragraph_style: &AttributeSet,
        lookup: Option<&dyn StyleLookup>,
    ) -> Option<AttributeSet> {
        let level = self.find_level_for_indent(indent).ok()?;
        let level_attributes = self.level_attributes(level)?;
        let left_indent = level_attributes.left_indent;
        let left_sub_indent = level_attributes.left_sub_indent;

        let mut attributes = self.combined_style_for_level(level, lookup)?;
        attributes.apply(paragraph_style);

        attributes.left_indent = left_indent;
        attributes.left_sub_indent = left_sub_indent;
        Some(attributes)
    }
}

// =============================================================================
// Tests
// =============================================================================
