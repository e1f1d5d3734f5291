//! Combined style lists with kind-suffixed display names
//!
//! When styles of several kinds are shown in one list, names can collide.
//! Each entry is therefore displayed as `name|K`, where `K` is the kind's
//! single-character suffix (`P`, `C`, `L` or `B`).

use crate::{StyleDefinition, StyleKind, StyleLookup, StyleSheet};
use serde::{Deserialize, Serialize};

const SEPARATOR: char = '|';

/// One row of a combined style list
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StyleListEntry {
    pub kind: StyleKind,
    pub name: String,
}

impl StyleListEntry {
    pub fn new(kind: StyleKind, name: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
        }
    }

    /// Name with the kind suffix appended, e.g. `Heading|P`
    pub fn display_name(&self) -> String {
        self.to_string()
    }

    /// Parse a display name. The suffix is taken from the last separator,
    /// so style names may themselves contain `|`.
    pub fn parse(display_name: &str) -> Option<Self> {
        let (name, suffix) = display_name.rsplit_once(SEPARATOR)?;
        let mut chars = suffix.chars();
        let kind = StyleKind::from_suffix(chars.next()?)?;
        if chars.next().is_some() {
            return None;
        }
        Some(Self::new(kind, name))
    }

    /// The definition this entry names
    pub fn resolve<'a>(&self, lookup: &'a dyn StyleLookup) -> Option<&'a StyleDefinition> {
        lookup.find_style_of_kind(self.kind, &self.name)
    }
}

impl std::fmt::Display for StyleListEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}{}", self.name, SEPARATOR, self.kind.suffix())
    }
}

impl StyleSheet {
    /// Entries for every style of the requested kinds.
    ///
    /// Kinds are listed paragraph, character, list, then box; with `sorted`
    /// the whole list is ordered by display name instead.
    pub fn style_list_entries(&self, kinds: &[StyleKind], sorted: bool) -> Vec<StyleListEntry> {
        const ORDER: [StyleKind; 4] = [
            StyleKind::Paragraph,
            StyleKind::Character,
            StyleKind::List,
            StyleKind::Box,
        ];

        let mut entries: Vec<StyleListEntry> = ORDER
            .iter()
            .filter(|kind| kinds.contains(*kind))
            .flat_map(|&kind| {
                self.styles(kind)
                    .iter()
                    .map(move |def| StyleListEntry::new(kind, def.name.clone()))
            })
            .collect();

        if sorted {
            entries.sort_by_key(|entry| entry.display_name().to_lowercase());
        }
        entries
    }
}
