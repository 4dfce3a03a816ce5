//! Row selection: a set of member ids plus the aggregate "select all" flag.
//!
//! The set is independent storage rather than a projection of the current view.
//! Changing the search query leaves hidden rows selected, so a bulk delete still
//! reaches them; only deletions (and explicit clearing) shrink it.

use std::collections::BTreeSet;

use crate::source::MemberId;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Selection {
    ids: BTreeSet<MemberId>,
    all: bool,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip membership of `id`. Deselecting anything drops the select-all flag.
    pub fn toggle_one(&mut self, id: &MemberId) {
        if !self.ids.remove(id) {
            self.ids.insert(id.clone());
        } else {
            self.all = false;
        }
    }

    /// Select exactly `visible` when `checked`, otherwise clear everything.
    pub fn toggle_all<I>(&mut self, checked: bool, visible: I)
    where
        I: IntoIterator<Item = MemberId>,
    {
        self.all = checked;
        self.ids = if checked {
            visible.into_iter().collect()
        } else {
            BTreeSet::new()
        };
    }

    pub fn is_selected(&self, id: &MemberId) -> bool {
        self.ids.contains(id)
    }

    /// Whether the aggregate checkbox shows as checked.
    pub fn all_checked(&self) -> bool {
        self.all
    }

    /// Forget `id` after its record was deleted.
    pub fn remove(&mut self, id: &MemberId) -> bool {
        let removed = self.ids.remove(id);
        if self.ids.is_empty() {
            self.all = false;
        }
        removed
    }

    pub fn clear(&mut self) {
        self.ids.clear();
        self.all = false;
    }

    pub fn ids(&self) -> &BTreeSet<MemberId> {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}
