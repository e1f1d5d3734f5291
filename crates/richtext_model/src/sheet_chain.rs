//! Style sheet chains - an arena of sheets linked for fallback lookup
//!
//! Sheets live in a [`StyleSheetChain`] and are addressed by [`SheetId`].
//! Each sheet has optional previous/next links; a lookup that misses in one
//! sheet can continue in the next. Every splice keeps the links symmetric
//! (`previous(next(s)) == s`) and detaches the sheet first, so the links
//! always form simple lists without cycles.

use crate::{ModelError, Result, StyleDefinition, StyleKind, StyleLookup, StyleSheet};
use serde::{Deserialize, Serialize};

/// Handle of a sheet inside a [`StyleSheetChain`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SheetId(usize);

impl SheetId {
    pub fn index(&self) -> usize {
        self.0
    }
}

impl std::fmt::Display for SheetId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "sheet#{}", self.0)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct SheetSlot {
    sheet: StyleSheet,
    previous: Option<SheetId>,
    next: Option<SheetId>,
}

/// Owning arena of style sheets and their chain links
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StyleSheetChain {
    slots: Vec<Option<SheetSlot>>,
}

impl StyleSheetChain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take ownership of a sheet. The sheet starts unlinked.
    pub fn add_sheet(&mut self, sheet: StyleSheet) -> SheetId {
        let id = SheetId(self.slots.len());
        self.slots.push(Some(SheetSlot {
            sheet,
            previous: None,
            next: None,
        }));
        id
    }

    /// Detach and return a sheet
    pub fn remove_sheet(&mut self, id: SheetId) -> Result<StyleSheet> {
        self.unlink(id)?;
        let slot = self
            .slots
            .get_mut(id.0)
            .and_then(Option::take)
            .ok_or(ModelError::SheetNotFound(id.0))?;
        Ok(slot.sheet)
    }

    fn slot(&self, id: SheetId) -> Result<&SheetSlot> {
        self.slots
            .get(id.0)
            .and_then(Option::as_ref)
            .ok_or(ModelError::SheetNotFound(id.0))
    }

    fn slot_mut(&mut self, id: SheetId) -> Result<&mut SheetSlot> {
        self.slots
            .get_mut(id.0)
            .and_then(Option::as_mut)
            .ok_or(ModelError::SheetNotFound(id.0))
    }

    pub fn get(&self, id: SheetId) -> Option<&StyleSheet> {
        self.slot(id).ok().map(|slot| &slot.sheet)
    }

    pub fn get_mut(&mut self, id: SheetId) -> Option<&mut StyleSheet> {
        self.slot_mut(id).ok().map(|slot| &mut slot.sheet)
    }

    pub fn previous(&self, id: SheetId) -> Option<SheetId> {
        self.slot(id).ok()?.previous
    }

    pub fn next(&self, id: SheetId) -> Option<SheetId> {
        self.slot(id).ok()?.next
    }

    /// Number of live sheets
    pub fn len(&self) -> usize {
        self.slots.iter().flatten().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Ids of all live sheets in insertion order
    pub fn ids(&self) -> impl Iterator<Item = SheetId> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, slot)| slot.is_some())
            .map(|(index, _)| SheetId(index))
    }

    fn check_pair(&self, this: SheetId, other: SheetId) -> Result<()> {
        self.slot(this)?;
        self.slot(other)?;
        if this == other {
            return Err(ModelError::SelfLink(this.0));
        }
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Splicing
    // -------------------------------------------------------------------------

    /// Detach `this` from its neighbours, joining them to each other
    pub fn unlink(&mut self, this: SheetId) -> Result<()> {
        let slot = self.slot_mut(this)?;
        let previous = slot.previous.take();
        let next = slot.next.take();

        if let Some(previous) = previous {
            self.slot_mut(previous)?.next = next;
        }
        if let Some(next) = next {
            self.slot_mut(next)?.previous = previous;
        }
        Ok(())
    }

    /// Place `this` immediately before `before`
    pub fn insert_sheet(&mut self, this: SheetId, before: SheetId) -> Result<()> {
        self.check_pair(this, before)?;
        self.unlink(this)?;

        let previous = self.slot(before)?.previous;
        if let Some(previous) = previous {
            self.slot_mut(previous)?.next = Some(this);
        }
        self.slot_mut(before)?.previous = Some(this);

        let slot = self.slot_mut(this)?;
        slot.previous = previous;
        slot.next = Some(before);

        tracing::debug!(sheet = %this, before = %before, "inserted style sheet");
        Ok(())
    }

    /// Place `this` immediately after `after`
    pub fn append_sheet(&mut self, this: SheetId, after: SheetId) -> Result<()> {
        self.check_pair(this, after)?;
        self.unlink(this)?;

        let next = self.slot(after)?.next;
        if let Some(next) = next {
            self.slot_mut(next)?.previous = Some(this);
        }
        self.slot_mut(after)?.next = Some(this);

        let slot = self.slot_mut(this)?;
        slot.previous = Some(after);
        slot.next = next;

        tracing::debug!(sheet = %this, after = %after, "appended style sheet");
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Lookup
    // -------------------------------------------------------------------------

    /// Sheets from `start` following next links
    pub fn walk(&self, start: SheetId) -> impl Iterator<Item = &StyleSheet> + '_ {
        std::iter::successors(self.slot(start).ok(), move |slot| {
            slot.next.and_then(|next| self.slot(next).ok())
        })
        .map(|slot| &slot.sheet)
    }

    /// Find a style of `kind` starting at `start`, continuing into later
    /// sheets when `recurse` is set
    pub fn find_style_of_kind(
        &self,
        start: SheetId,
        kind: StyleKind,
        name: &str,
        recurse: bool,
    ) -> Option<&StyleDefinition> {
        let limit = if recurse { usize::MAX } else { 1 };
        self.walk(start)
            .take(limit)
            .find_map(|sheet| sheet.find_style_by_kind(kind, name))
    }

    /// Kind-agnostic lookup, each sheet trying list, paragraph, character
    /// and box styles before moving on
    pub fn find_style(&self, start: SheetId, name: &str, recurse: bool) -> Option<&StyleDefinition> {
        let limit = if recurse { usize::MAX } else { 1 };
        self.walk(start)
            .take(limit)
            .find_map(|sheet| sheet.find_style(name))
    }

    /// Recursive lookup view starting at `id`
    pub fn view(&self, id: SheetId) -> Option<SheetView<'_>> {
        self.slot(id).ok()?;
        Some(SheetView { chain: self, id })
    }
}

/// A sheet together with the sheets chained after it
#[derive(Debug, Clone, Copy)]
pub struct SheetView<'a> {
    chain: &'a StyleSheetChain,
    id: SheetId,
}

impl<'a> SheetView<'a> {
    pub fn id(&self) -> SheetId {
        self.id
    }

    pub fn sheet(&self) -> Option<&'a StyleSheet> {
        self.chain.get(self.id)
    }
}

impl StyleLookup for SheetView<'_> {
    fn find_style_of_kind(&self, kind: StyleKind, name: &str) -> Option<&StyleDefinition> {
        self.chain.find_style_of_kind(self.id, kind, name, true)
    }

    fn find_any_style(&self, name: &str) -> Option<&StyleDefinition> {
        self.chain.find_style(self.id, name, true)
    }
}

// =============================================================================
// Tests
// =============================================================================
