//! Style sheets - ordered, kind-partitioned collections of style definitions
//!
//! A sheet owns its definitions. Each kind keeps insertion order, which is
//! significant for iteration and for name lookups: when two definitions of
//! the same kind share a name, the first one added wins.

use crate::{Properties, StyleDefId, StyleDefinition, StyleKind, StyleLookup};
use serde::{Deserialize, Serialize};

/// An ordered collection of style definitions
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StyleSheet {
    pub name: String,
    pub description: String,
    pub properties: Properties,
    character_styles: Vec<StyleDefinition>,
    paragraph_styles: Vec<StyleDefinition>,
    list_styles: Vec<StyleDefinition>,
    box_styles: Vec<StyleDefinition>,
}

impl StyleSheet {
    /// Create a new empty style sheet
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    fn collection(&self, kind: StyleKind) -> &Vec<StyleDefinition> {
        match kind {
            StyleKind::Character => &self.character_styles,
            StyleKind::Paragraph => &self.paragraph_styles,
            StyleKind::List => &self.list_styles,
            StyleKind::Box => &self.box_styles,
        }
    }

    fn collection_mut(&mut self, kind: StyleKind) -> &mut Vec<StyleDefinition> {
        match kind {
            StyleKind::Character => &mut self.character_styles,
            StyleKind::Paragraph => &mut self.paragraph_styles,
            StyleKind::List => &mut self.list_styles,
            StyleKind::Box => &mut self.box_styles,
        }
    }

    // -------------------------------------------------------------------------
    // Adding
    // -------------------------------------------------------------------------

    /// Add a definition to the collection of the given kind.
    ///
    /// Adding a definition whose identity is already present is a no-op that
    /// still reports success. A definition of a different kind is rejected.
    fn add_of_kind(&mut self, kind: StyleKind, mut def: StyleDefinition) -> bool {
        if def.kind() != kind {
            tracing::debug!(style = %def.name, expected = %kind, actual = %def.kind(), "style kind mismatch");
            return false;
        }

        let styles = self.collection_mut(kind);
        if styles.iter().any(|existing| existing.id() == def.id()) {
            return true;
        }

        def.set_style_name_reference();
        styles.push(def);
        true
    }

    pub fn add_character_style(&mut self, def: StyleDefinition) -> bool {
        self.add_of_kind(StyleKind::Character, def)
    }

    pub fn add_paragraph_style(&mut self, def: StyleDefinition) -> bool {
        self.add_of_kind(StyleKind::Paragraph, def)
    }

    pub fn add_list_style(&mut self, def: StyleDefinition) -> bool {
        self.add_of_kind(StyleKind::List, def)
    }

    pub fn add_box_style(&mut self, def: StyleDefinition) -> bool {
        self.add_of_kind(StyleKind::Box, def)
    }

    /// Add a definition to the collection matching its kind
    pub fn add_style(&mut self, def: StyleDefinition) -> bool {
        self.add_of_kind(def.kind(), def)
    }

    // -------------------------------------------------------------------------
    // Removing
    // -------------------------------------------------------------------------

    fn remove_of_kind(&mut self, kind: StyleKind, id: StyleDefId) -> Option<StyleDefinition> {
        let styles = self.collection_mut(kind);
        let pos = styles.iter().position(|def| def.id() == id)?;
        Some(styles.remove(pos))
    }

    /// Remove a character style, handing ownership back to the caller
    pub fn remove_character_style(&mut self, id: StyleDefId) -> Option<StyleDefinition> {
        self.remove_of_kind(StyleKind::Character, id)
    }

    pub fn remove_paragraph_style(&mut self, id: StyleDefId) -> Option<StyleDefinition> {
        self.remove_of_kind(StyleKind::Paragraph, id)
    }

    pub fn remove_list_style(&mut self, id: StyleDefId) -> Option<StyleDefinition> {
        self.remove_of_kind(StyleKind::List, id)
    }

    pub fn remove_box_style(&mut self, id: StyleDefId) -> Option<StyleDefinition> {
        self.remove_of_kind(StyleKind::Box, id)
    }

    /// Remove a definition of any kind
    pub fn remove_style(&mut self, id: StyleDefId) -> Option<StyleDefinition> {
        StyleKind::LOOKUP_ORDER
            .iter()
            .find_map(|&kind| self.remove_of_kind(kind, id))
    }

    /// Remove and drop a definition of any kind. Returns false if not found.
    pub fn delete_style(&mut self, id: StyleDefId) -> bool {
        self.remove_style(id).is_some()
    }

    /// Drop every definition of every kind
    pub fn delete_styles(&mut self) {
        self.character_styles.clear();
        self.paragraph_styles.clear();
        self.list_styles.clear();
        self.box_styles.clear();
    }

    // -------------------------------------------------------------------------
    // Finding
    // -------------------------------------------------------------------------

    /// First definition of `kind` named `name`, in insertion order
    pub fn find_style_by_kind(&self, kind: StyleKind, name: &str) -> Option<&StyleDefinition> {
        self.collection(kind).iter().find(|def| def.name == name)
    }

    pub fn find_character_style(&self, name: &str) -> Option<&StyleDefinition> {
        self.find_style_by_kind(StyleKind::Character, name)
    }

    pub fn find_paragraph_style(&self, name: &str) -> Option<&StyleDefinition> {
        self.find_style_by_kind(StyleKind::Paragraph, name)
    }

    pub fn find_list_style(&self, name: &str) -> Option<&StyleDefinition> {
        self.find_style_by_kind(StyleKind::List, name)
    }

    pub fn find_box_style(&self, name: &str) -> Option<&StyleDefinition> {
        self.find_style_by_kind(StyleKind::Box, name)
    }

    /// Kind-agnostic lookup: list, paragraph, character, then box styles
    pub fn find_style(&self, name: &str) -> Option<&StyleDefinition> {
        self.find_any_style(name)
    }

    /// Definition by identity, of any kind
    pub fn style_by_id(&self, id: StyleDefId) -> Option<&StyleDefinition> {
        StyleKind::LOOKUP_ORDER
            .iter()
            .find_map(|&kind| self.collection(kind).iter().find(|def| def.id() == id))
    }

    pub fn style_by_id_mut(&mut self, id: StyleDefId) -> Option<&mut StyleDefinition> {
        let kind = self.style_by_id(id)?.kind();
        self.collection_mut(kind).iter_mut().find(|def| def.id() == id)
    }

    // -------------------------------------------------------------------------
    // Access
    // -------------------------------------------------------------------------

    /// Definitions of `kind` in insertion order
    pub fn styles(&self, kind: StyleKind) -> &[StyleDefinition] {
        self.collection(kind)
    }

    pub fn style_count(&self, kind: StyleKind) -> usize {
        self.collection(kind).len()
    }

    pub fn character_styles(&self) -> &[StyleDefinition] {
        &self.character_styles
    }

    pub fn paragraph_styles(&self) -> &[StyleDefinition] {
        &self.paragraph_styles
    }

    pub fn list_styles(&self) -> &[StyleDefinition] {
        &self.list_styles
    }

    pub fn box_styles(&self) -> &[StyleDefinition] {
        &self.box_styles
    }

    pub fn character_style(&self, index: usize) -> Option<&StyleDefinition> {
        self.character_styles.get(index)
    }

    pub fn paragraph_style(&self, index: usize) -> Option<&StyleDefinition> {
        self.paragraph_styles.get(index)
    }

    pub fn list_style(&self, index: usize) -> Option<&StyleDefinition> {
        self.list_styles.get(index)
    }

    pub fn box_style(&self, index: usize) -> Option<&StyleDefinition> {
        self.box_styles.get(index)
    }

    /// Total number of definitions across all kinds
    pub fn len(&self) -> usize {
        self.character_styles.len()
            + self.paragraph_styles.len()
            + self.list_styles.len()
            + self.box_styles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Replace the contents of this sheet with copies of `other`'s
    /// definitions. The copies get fresh identities.
    pub fn copy_from(&mut self, other: &StyleSheet) {
        self.delete_styles();
        self.name = other.name.clone();
        self.description = other.description.clone();
        self.properties = other.properties.clone();
        for kind in [StyleKind::Character, StyleKind::Paragraph, StyleKind::List, StyleKind::Box] {
            for def in other.collection(kind) {
                self.add_of_kind(kind, def.duplicate());
            }
        }
    }
}

impl StyleLookup for StyleSheet {
    fn find_style_of_kind(&self, kind: StyleKind, name: &str) -> Option<&StyleDefinition> {
        self.find_style_by_kind(kind, name)
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::AttributeSet;

    #[test]
    fn test_add_writes_name_back_reference() {
        let mut sheet = StyleSheet::new("sheet");
        assert!(sheet.add_character_style(StyleDefinition::character("Strong")));
        assert!(sheet.add_paragraph_style(StyleDefinition::paragraph("Body")));
        assert!(sheet.add_list_style(StyleDefinition::list("Bullets")));
        assert!(sheet.add_box_style(StyleDefinition::box_style("Frame")));

        assert_eq!(
            sheet.find_character_style("Strong").unwrap().style.character_style_name.as_deref(),
            Some("Strong")
        );
        assert_eq!(
            sheet.find_paragraph_style("Body").unwrap().style.paragraph_style_name.as_deref(),
            Some("Body")
        );
        assert_eq!(
            sheet.find_list_style("Bullets").unwrap().style.list_style_name.as_deref(),
            Some("Bullets")
        );
        assert_eq!(
            sheet.find_box_style("Frame").unwrap().style.box_style_name.as_deref(),
            Some("Frame")
        );
    }

    #[test]
    fn test_add_rejects_wrong_kind() {
        let mut sheet = StyleSheet::new("sheet");
        assert!(!sheet.add_paragraph_style(StyleDefinition::character("Strong")));
        assert!(sheet.is_empty());
    }

    #[test]
    fn test_identity_duplicate_is_no_op() {
        let mut sheet = StyleSheet::new("sheet");
        let def = StyleDefinition::paragraph("Body");
        assert!(sheet.add_style(def.clone()));
        assert!(sheet.add_style(def));
        assert_eq!(sheet.style_count(StyleKind::Paragraph), 1);
    }

    #[test]
    fn test_same_name_resolves_to_first_added() {
        let mut sheet = StyleSheet::new("sheet");
        let first = StyleDefinition::paragraph("Body").with_style(AttributeSet::new().with_bold(true));
        let first_id = first.id();
        sheet.add_style(first);
        sheet.add_style(StyleDefinition::paragraph("Body").with_style(AttributeSet::new().with_italic(true)));

        assert_eq!(sheet.style_count(StyleKind::Paragraph), 2);
        assert_eq!(sheet.find_paragraph_style("Body").unwrap().id(), first_id);
    }

    #[test]
    fn test_find_style_prefers_list_then_paragraph() {
        let mut sheet = StyleSheet::new("sheet");
        sheet.add_style(StyleDefinition::character("Shared"));
        sheet.add_style(StyleDefinition::paragraph("Shared"));
        assert_eq!(sheet.find_style("Shared").unwrap().kind(), StyleKind::Paragraph);

        sheet.add_style(StyleDefinition::list("Shared"));
        assert_eq!(sheet.find_style("Shared").unwrap().kind(), StyleKind::List);
        assert!(sheet.find_style("Missing").is_none());
    }

    #[test]
    fn test_remove_hands_back_ownership() {
        let mut sheet = StyleSheet::new("sheet");
        let def = StyleDefinition::character("Strong");
        let id = def.id();
        sheet.add_style(def);

        assert!(sheet.remove_paragraph_style(id).is_none());
        let removed = sheet.remove_character_style(id).unwrap();
        assert_eq!(removed.name, "Strong");
        assert!(sheet.remove_style(id).is_none());
        assert!(!sheet.delete_style(id));
    }

    #[test]
    fn test_delete_styles_clears_everything() {
        let mut sheet = StyleSheet::new("sheet");
        sheet.add_style(StyleDefinition::character("A"));
        sheet.add_style(StyleDefinition::list("B"));
        assert_eq!(sheet.len(), 2);
        sheet.delete_styles();
        assert!(sheet.is_empty());
    }

    #[test]
    fn test_insertion_order_is_preserved() {
        let mut sheet = StyleSheet::new("sheet");
        for name in ["Zeta", "Alpha", "Mid"] {
            sheet.add_style(StyleDefinition::paragraph(name));
        }
        let names: Vec<&str> = sheet.paragraph_styles().iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["Zeta", "Alpha", "Mid"]);
        assert_eq!(sheet.paragraph_style(1).unwrap().name, "Alpha");
    }

    #[test]
    fn test_copy_from_gives_fresh_identities() {
        let mut source = StyleSheet::new("source");
        source.add_style(StyleDefinition::paragraph("Body"));
        let original_id = source.find_paragraph_style("Body").unwrap().id();

        let mut copy = StyleSheet::new("copy");
        copy.add_style(StyleDefinition::character("Stale"));
        copy.copy_from(&source);

        assert_eq!(copy.name, "source");
        assert!(copy.find_character_style("Stale").is_none());
        let copied = copy.find_paragraph_style("Body").unwrap();
        assert_ne!(copied.id(), original_id);
        assert!(copied.eq_definition(source.find_paragraph_style("Body").unwrap()));
    }

    #[test]
    fn test_style_by_id_mut() {
        let mut sheet = StyleSheet::new("sheet");
        let def = StyleDefinition::box_style("Frame");
        let id = def.id();
        sheet.add_style(def);
        sheet.style_by_id_mut(id).unwrap().description = "edited".to_string();
        assert_eq!(sheet.style_by_id(id).unwrap().description, "edited");
    }
}
