//! Ids checked for a bulk action.

use std::collections::BTreeSet;

/// Set of record ids; iteration order is ascending so delete bodies are stable.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SelectionSet {
    ids: BTreeSet<i64>,
}

impl SelectionSet {
    /// Flip membership of one id.
    pub fn toggle(&mut self, id: i64) {
        if !self.ids.remove(&id) {
            self.ids.insert(id);
        }
    }

    /// Whether `id` is selected.
    #[must_use]
    pub fn contains(&self, id: i64) -> bool {
        self.ids.contains(&id)
    }

    /// Whether nothing is selected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Number of selected ids.
    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Header checkbox: checked selects exactly `visible`, unchecked empties.
    pub fn set_all(&mut self, visible: &[i64], checked: bool) {
        self.ids.clear();
        if checked {
            self.ids.extend(visible.iter().copied());
        }
    }

    /// Drop every id.
    pub fn clear(&mut self) {
        self.ids.clear();
    }

    /// Keep only ids that are still on screen.
    pub fn retain_visible(&mut self, visible: &[i64]) {
        self.ids.retain(|id| visible.contains(id));
    }

    /// Selected ids in ascending order.
    #[must_use]
    pub fn ids(&self) -> Vec<i64> {
        self.ids.iter().copied().collect()
    }

    /// Header checkbox state: every visible row is selected and there is at
    /// least one row.
    #[must_use]
    pub fn all_selected(&self, visible: &[i64]) -> bool {
        !visible.is_empty() && visible.iter().all(|id| self.ids.contains(id))
    }
}
