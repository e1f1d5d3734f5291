//! Style definitions - named formatting bundles and base-style resolution
//!
//! A [`StyleDefinition`] is a named [`AttributeSet`] of one of four kinds
//! (character, paragraph, list, box). Definitions may name a base style;
//! [`StyleDefinition::style_merged_with_base`] walks that chain through a
//! [`StyleLookup`] and merges from the root ancestor down to the definition
//! itself, so closer styles win. Dangling and cyclic base references end the
//! chain silently.

use crate::{AttributeSet, ListLevels, StyleDefId};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

/// Open-ended key/value bag attached to styles and style sheets
pub type Properties = BTreeMap<String, serde_json::Value>;

// =============================================================================
// Style Kinds
// =============================================================================

/// The kind of a style definition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StyleKind {
    /// Applied to text runs
    Character,
    /// Applied to whole paragraphs
    Paragraph,
    /// Paragraph style with ten indent/bullet levels
    List,
    /// Applied to containers
    Box,
}

impl StyleKind {
    /// Order used by kind-agnostic lookups
    pub const LOOKUP_ORDER: [StyleKind; 4] = [
        StyleKind::List,
        StyleKind::Paragraph,
        StyleKind::Character,
        StyleKind::Box,
    ];

    /// Single-character tag used to disambiguate names across kinds
    pub fn suffix(&self) -> char {
        match self {
            StyleKind::Character => 'C',
            StyleKind::Paragraph => 'P',
            StyleKind::List => 'L',
            StyleKind::Box => 'B',
        }
    }

    pub fn from_suffix(suffix: char) -> Option<Self> {
        match suffix {
            'C' => Some(StyleKind::Character),
            'P' => Some(StyleKind::Paragraph),
            'L' => Some(StyleKind::List),
            'B' => Some(StyleKind::Box),
            _ => None,
        }
    }
}

impl std::fmt::Display for StyleKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            StyleKind::Character => "character",
            StyleKind::Paragraph => "paragraph",
            StyleKind::List => "list",
            StyleKind::Box => "box",
        };
        f.write_str(name)
    }
}

/// Kind-specific data of a style definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum StyleData {
    Character,
    Paragraph {
        /// Style for a new paragraph inserted after this one
        next_style: String,
    },
    List {
        next_style: String,
        levels: ListLevels,
    },
    Box,
}

impl StyleData {
    pub fn kind(&self) -> StyleKind {
        match self {
            StyleData::Character => StyleKind::Character,
            StyleData::Paragraph { .. } => StyleKind::Paragraph,
            StyleData::List { .. } => StyleKind::List,
            StyleData::Box => StyleKind::Box,
        }
    }

    fn empty(kind: StyleKind) -> Self {
        match kind {
            StyleKind::Character => StyleData::Character,
            StyleKind::Paragraph => StyleData::Paragraph {
                next_style: String::new(),
            },
            StyleKind::List => StyleData::List {
                next_style: String::new(),
                levels: ListLevels::default(),
            },
            StyleKind::Box => StyleData::Box,
        }
    }
}

// =============================================================================
// Style Lookup
// =============================================================================

/// Named style lookup capability.
///
/// Implemented by a single [`StyleSheet`](crate::StyleSheet) and by chained
/// sheet views that fall back to later sheets.
pub trait StyleLookup {
    /// Find the first style of `kind` named `name`
    fn find_style_of_kind(&self, kind: StyleKind, name: &str) -> Option<&StyleDefinition>;

    /// Find a style of any kind, trying list, paragraph, character and box
    /// styles in that order
    fn find_any_style(&self, name: &str) -> Option<&StyleDefinition> {
        StyleKind::LOOKUP_ORDER
            .iter()
            .find_map(|&kind| self.find_style_of_kind(kind, name))
    }
}

// =============================================================================
// Style Definition
// =============================================================================

/// A named, reusable bundle of formatting attributes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StyleDefinition {
    id: StyleDefId,
    /// Name, unique within its kind for reliable lookup
    pub name: String,
    /// Name of the base style, empty for none
    pub base_style: String,
    pub description: String,
    /// The style's own attributes, excluding anything inherited
    pub style: AttributeSet,
    pub properties: Properties,
    data: StyleData,
}

impl StyleDefinition {
    /// Create an empty definition of the given kind
    pub fn new(kind: StyleKind, name: impl Into<String>) -> Self {
        Self {
            id: StyleDefId::new(),
            name: name.into(),
            base_style: String::new(),
            description: String::new(),
            style: AttributeSet::default(),
            properties: Properties::new(),
            data: StyleData::empty(kind),
        }
    }

    /// Create a new character style
    pub fn character(name: impl Into<String>) -> Self {
        Self::new(StyleKind::Character, name)
    }

    /// Create a new paragraph style
    pub fn paragraph(name: impl Into<String>) -> Self {
        Self::new(StyleKind::Paragraph, name)
    }

    /// Create a new list style with ten empty levels
    pub fn list(name: impl Into<String>) -> Self {
        Self::new(StyleKind::List, name)
    }

    /// Create a new box style
    pub fn box_style(name: impl Into<String>) -> Self {
        Self::new(StyleKind::Box, name)
    }

    /// Set the base style
    pub fn with_base_style(mut self, base: impl Into<String>) -> Self {
        self.base_style = base.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the style's own attributes
    pub fn with_style(mut self, style: AttributeSet) -> Self {
        self.style = style;
        self
    }

    /// Set next style; ignored for kinds without one
    pub fn with_next_style(mut self, next: impl Into<String>) -> Self {
        self.set_next_style(next);
        self
    }

    pub fn with_property(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.properties.insert(key.into(), value);
        self
    }

    pub fn id(&self) -> StyleDefId {
        self.id
    }

    pub fn kind(&self) -> StyleKind {
        self.data.kind()
    }

    pub fn data(&self) -> &StyleData {
        &self.data
    }

    pub fn has_base_style(&self) -> bool {
        !self.base_style.is_empty()
    }

    /// Next style for paragraph and list styles
    pub fn next_style(&self) -> Option<&str> {
        match &self.data {
            StyleData::Paragraph { next_style } | StyleData::List { next_style, .. } => {
                Some(next_style.as_str())
            }
            _ => None,
        }
    }

    /// Set the next style. Returns false for kinds that have none.
    pub fn set_next_style(&mut self, next: impl Into<String>) -> bool {
        match &mut self.data {
            StyleData::Paragraph { next_style } | StyleData::List { next_style, .. } => {
                *next_style = next.into();
                true
            }
            _ => false,
        }
    }

    /// The ten level styles of a list style
    pub fn list_levels(&self) -> Option<&ListLevels> {
        match &self.data {
            StyleData::List { levels, .. } => Some(levels),
            _ => None,
        }
    }

    pub fn list_levels_mut(&mut self) -> Option<&mut ListLevels> {
        match &mut self.data {
            StyleData::List { levels, .. } => Some(levels),
            _ => None,
        }
    }

    /// Copy with a fresh identity, so it can be added next to the original
    pub fn duplicate(&self) -> Self {
        Self {
            id: StyleDefId::new(),
            ..self.clone()
        }
    }

    /// Compare everything except identity
    pub fn eq_definition(&self, other: &StyleDefinition) -> bool {
        self.name == other.name
            && self.base_style == other.base_style
            && self.description == other.description
            && self.style == other.style
            && self.properties == other.properties
            && self.data == other.data
    }

    pub(crate) fn set_style_name_reference(&mut self) {
        let name = Some(self.name.clone());
        match self.kind() {
            StyleKind::Character => self.style.character_style_name = name,
            StyleKind::Paragraph => self.style.paragraph_style_name = name,
            StyleKind::List => self.style.list_style_name = name,
            StyleKind::Box => self.style.box_style_name = name,
        }
    }

    /// Chain of definitions from this one back to its root ancestor.
    ///
    /// Base names are looked up among styles of the same kind. The chain ends
    /// at an empty base name, a name already visited, or a failed lookup.
    pub fn base_chain<'a>(&'a self, lookup: Option<&'a dyn StyleLookup>) -> Vec<&'a StyleDefinition> {
        let mut chain = vec![self];
        let Some(lookup) = lookup else {
            return chain;
        };

        let mut visited: HashSet<&str> = HashSet::new();
        visited.insert(self.name.as_str());

        let mut base = self.base_style.as_str();
        while !base.is_empty() {
            if !visited.insert(base) {
                tracing::debug!(style = %self.name, base, "base style cycle, truncating chain");
                break;
            }
            match lookup.find_style_of_kind(self.kind(), base) {
                Some(def) => {
                    chain.push(def);
                    base = def.base_style.as_str();
                }
                None => {
                    tracing::debug!(style = %self.name, base, kind = %self.kind(), "base style not found");
                    break;
                }
            }
        }

        chain
    }

    /// Effective attributes of this style, taking its base chain into account
    pub fn style_merged_with_base(&self, lookup: Option<&dyn StyleLookup>) -> AttributeSet {
        if !self.has_base_style() {
            return self.style.clone();
        }

        let chain = self.base_chain(lookup);
        let mut merged = AttributeSet::default();
        for def in chain.iter().rev() {
            merged.apply(&def.style);
        }
        merged
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Alignment, Colour, StyleSheet};

    fn sheet_with(defs: Vec<StyleDefinition>) -> StyleSheet {
        let mut sheet = StyleSheet::new("test");
        for def in defs {
            sheet.add_style(def);
        }
        sheet
    }

    #[test]
    fn test_no_base_returns_own_style() {
        let own = AttributeSet::new().with_bold(true);
        let def = StyleDefinition::paragraph("Body").with_style(own.clone());
        let sheet = StyleSheet::new("empty");

        assert_eq!(def.style_merged_with_base(Some(&sheet)), own);
        assert_eq!(def.style_merged_with_base(None), own);
    }

    #[test]
    fn test_three_level_chain_merges_root_first() {
        let sheet = sheet_with(vec![
            StyleDefinition::paragraph("C").with_style(
                AttributeSet::new()
                    .with_font_face("Times")
                    .with_font_size(10.0)
                    .with_alignment(Alignment::Left),
            ),
            StyleDefinition::paragraph("B")
                .with_base_style("C")
                .with_style(AttributeSet::new().with_font_size(12.0).with_bold(true)),
            StyleDefinition::paragraph("A")
                .with_base_style("B")
                .with_style(AttributeSet::new().with_bold(false)),
        ]);

        let a = sheet.find_paragraph_style("A").unwrap();
        let merged = a.style_merged_with_base(Some(&sheet));

        assert_eq!(merged.font_face.as_deref(), Some("Times"));
        assert_eq!(merged.font_size, Some(12.0));
        assert!(!merged.is_bold());
        assert_eq!(merged.alignment, Some(Alignment::Left));
        assert!(merged.text_colour.is_none());
    }

    #[test]
    fn test_cycle_terminates() {
        let sheet = sheet_with(vec![
            StyleDefinition::character("A")
                .with_base_style("B")
                .with_style(AttributeSet::new().with_text_colour(Colour::RED)),
            StyleDefinition::character("B")
                .with_base_style("A")
                .with_style(AttributeSet::new().with_text_colour(Colour::BLUE).with_italic(true)),
        ]);

        let a = sheet.find_character_style("A").unwrap();
        let chain: Vec<&str> = a.base_chain(Some(&sheet)).iter().map(|d| d.name.as_str()).collect();
        assert_eq!(chain, vec!["A", "B"]);

        let merged = a.style_merged_with_base(Some(&sheet));
        assert_eq!(merged.text_colour, Some(Colour::RED));
        assert!(merged.is_italic());

        let b = sheet.find_character_style("B").unwrap();
        assert_eq!(b.style_merged_with_base(Some(&sheet)).text_colour, Some(Colour::BLUE));
    }

    #[test]
    fn test_self_reference_terminates() {
        let sheet = sheet_with(vec![StyleDefinition::paragraph("Loop")
            .with_base_style("Loop")
            .with_style(AttributeSet::new().with_bold(true))]);
        let def = sheet.find_paragraph_style("Loop").unwrap();
        assert_eq!(def.base_chain(Some(&sheet)).len(), 1);
        assert!(def.style_merged_with_base(Some(&sheet)).is_bold());
    }

    #[test]
    fn test_dangling_base_is_ignored() {
        let sheet = sheet_with(vec![StyleDefinition::paragraph("Orphan")
            .with_base_style("Missing")
            .with_style(AttributeSet::new().with_italic(true))]);
        let def = sheet.find_paragraph_style("Orphan").unwrap();
        let merged = def.style_merged_with_base(Some(&sheet));
        assert!(merged.is_italic());
        assert_eq!(merged.flags(), def.style.flags());
    }

    #[test]
    fn test_wrong_kind_base_ends_chain() {
        let sheet = sheet_with(vec![
            StyleDefinition::paragraph("Body").with_style(AttributeSet::new().with_font_size(20.0)),
            StyleDefinition::character("Emphasis")
                .with_base_style("Body")
                .with_style(AttributeSet::new().with_italic(true)),
        ]);
        let def = sheet.find_character_style("Emphasis").unwrap();
        let merged = def.style_merged_with_base(Some(&sheet));
        assert!(merged.font_size.is_none());
        assert!(merged.is_italic());
    }

    #[test]
    fn test_next_style_only_for_paragraph_kinds() {
        let mut para = StyleDefinition::paragraph("Heading").with_next_style("Body");
        assert_eq!(para.next_style(), Some("Body"));
        assert!(para.set_next_style("Quote"));

        let mut character = StyleDefinition::character("Strong");
        assert!(!character.set_next_style("Body"));
        assert_eq!(character.next_style(), None);

        let list = StyleDefinition::list("Numbers").with_next_style("Numbers");
        assert_eq!(list.next_style(), Some("Numbers"));
        assert!(list.list_levels().is_some());
        assert!(para.list_levels().is_none());
    }

    #[test]
    fn test_duplicate_has_new_identity() {
        let def = StyleDefinition::box_style("Frame").with_description("framed");
        let copy = def.duplicate();
        assert_ne!(def.id(), copy.id());
        assert!(def.eq_definition(&copy));
        assert_ne!(def, copy);
    }

    #[test]
    fn test_suffix_round_trip() {
        for kind in StyleKind::LOOKUP_ORDER {
            assert_eq!(StyleKind::from_suffix(kind.suffix()), Some(kind));
        }
        assert_eq!(StyleKind::from_suffix('X'), None);
    }
}
