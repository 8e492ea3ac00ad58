//! Bulk selection across paginated, filtered lists.
//!
//! [`SelectionState`] holds identifiers only, so a selection survives
//! re-fetching and re-sorting. [`BulkSelection`] is the typed front end that
//! knows how to get the identifier of an item.
//!
//! "Select all filtered" has two outcomes. When every filtered item is already
//! on the client the selection becomes that explicit set. Otherwise the state
//! switches to [`SelectionScope::AllMatching`]: it records the serialized filter
//! the selection stands for, the server-side total, and the items the user
//! unticked afterwards. Actions are expected to send the filter to the server in
//! that case. Any change of filter drops such a selection.

use std::collections::BTreeSet;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SelectionScope {
    #[default]
    Explicit,
    AllMatching {
        filter_query: String,
        total: usize,
        excluded: BTreeSet<String>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckboxState {
    Unchecked,
    Checked,
    Indeterminate,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionState {
    selected: BTreeSet<String>,
    observed: BTreeSet<String>,
    scope: SelectionScope,
}

impl SelectionState {
    pub fn scope(&self) -> &SelectionScope {
        &self.scope
    }

    pub fn is_all_matching(&self) -> bool {
        matches!(self.scope, SelectionScope::AllMatching { .. })
    }

    pub fn selected_ids(&self) -> &BTreeSet<String> {
        &self.selected
    }

    /// Record ids that appeared in a fetched page
    pub fn observe_ids<'a>(&mut self, ids: impl IntoIterator<Item = &'a str>) {
        self.observed.extend(ids.into_iter().map(str::to_string));
    }

    pub fn is_id_selected(&self, id: &str) -> bool {
        match &self.scope {
            SelectionScope::Explicit => self.selected.contains(id),
            SelectionScope::AllMatching { excluded, .. } => {
                self.observed.contains(id) && !excluded.contains(id)
            }
        }
    }

    pub fn set_id_selected(&mut self, id: &str, selected: bool) {
        self.observed.insert(id.to_string());
        match &mut self.scope {
            SelectionScope::Explicit => {
                if selected {
                    self.selected.insert(id.to_string());
                } else {
                    self.selected.remove(id);
                }
            }
            SelectionScope::AllMatching { excluded, .. } => {
                if selected {
                    excluded.remove(id);
                } else {
                    excluded.insert(id.to_string());
                }
            }
        }
    }

    pub fn toggle_id(&mut self, id: &str) {
        let selected = self.is_id_selected(id);
        self.set_id_selected(id, !selected);
    }

    pub fn clear(&mut self) {
        self.selected.clear();
        self.scope = SelectionScope::Explicit;
    }

    /// Number of selected entities. In all-matching mode this is the server
    /// total minus the unticked ones.
    pub fn selected_count(&self) -> usize {
        match &self.scope {
            SelectionScope::Explicit => self.selected.len(),
            SelectionScope::AllMatching {
                total, excluded, ..
            } => total.saturating_sub(excluded.len()),
        }
    }

    /// Number of the given ids that are selected; stale ids do not count
    pub fn selected_count_in<'a>(&self, ids: impl IntoIterator<Item = &'a str>) -> usize {
        ids.into_iter()
            .filter(|id| self.is_id_selected(id))
            .count()
    }

    /// Drop an all-matching selection once the filter it stood for changes
    pub fn sync_filter(&mut self, filter_query: &str) {
        if let SelectionScope::AllMatching {
            filter_query: selected_for,
            ..
        } = &self.scope
        {
            if selected_for != filter_query {
                log::debug!("filter changed, dropping all-matching selection");
                self.clear();
            }
        }
    }

    fn select_all_ids(&mut self, ids: Vec<String>, total: usize, filter_query: &str) {
        self.observed.extend(ids.iter().cloned());
        if ids.len() >= total {
            self.scope = SelectionScope::Explicit;
            self.selected = ids.into_iter().collect();
        } else {
            self.selected.clear();
            self.scope = SelectionScope::AllMatching {
                filter_query: filter_query.to_string(),
                total,
                excluded: BTreeSet::new(),
            };
        }
    }
}

/// Typed selection operations; the identity function is fixed at creation
pub struct BulkSelection<T> {
    key_of: fn(&T) -> String,
}

impl<T> Clone for BulkSelection<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for BulkSelection<T> {}

impl<T> BulkSelection<T> {
    pub fn new(key_of: fn(&T) -> String) -> Self {
        Self { key_of }
    }

    pub fn key(&self, item: &T) -> String {
        (self.key_of)(item)
    }

    pub fn is_selected(&self, state: &SelectionState, item: &T) -> bool {
        state.is_id_selected(&self.key(item))
    }

    pub fn toggle(&self, state: &mut SelectionState, item: &T) {
        state.toggle_id(&self.key(item));
    }

    /// Select every item on the current page, keeping earlier selections
    pub fn select_page(&self, state: &mut SelectionState, page_items: &[T]) {
        for item in page_items {
            state.set_id_selected(&self.key(item), true);
        }
    }

    pub fn deselect_page(&self, state: &mut SelectionState, page_items: &[T]) {
        for item in page_items {
            state.set_id_selected(&self.key(item), false);
        }
    }

    /// Select everything the current filter matches.
    ///
    /// `filtered_items` is what the client holds, `total_filtered` what the
    /// server reports, `filter_query` the serialized filter (`q`) in effect.
    pub fn select_all_filtered(
        &self,
        state: &mut SelectionState,
        filtered_items: &[T],
        total_filtered: usize,
        filter_query: &str,
    ) {
        let ids = filtered_items.iter().map(|i| self.key(i)).collect();
        state.select_all_ids(ids, total_filtered, filter_query);
    }

    pub fn clear(&self, state: &mut SelectionState) {
        state.clear();
    }

    /// The given items that are selected, in their order
    pub fn selected_in<'a>(&self, state: &SelectionState, items: &'a [T]) -> Vec<&'a T> {
        items
            .iter()
            .filter(|i| self.is_selected(state, i))
            .collect()
    }

    /// Tri-state of a "select page" header checkbox
    pub fn header_state(&self, state: &SelectionState, page_items: &[T]) -> CheckboxState {
        if page_items.is_empty() {
            return CheckboxState::Unchecked;
        }
        let selected = page_items
            .iter()
            .filter(|i| self.is_selected(state, i))
            .count();
        if selected == 0 {
            CheckboxState::Unchecked
        } else if selected == page_items.len() {
            CheckboxState::Checked
        } else {
            CheckboxState::Indeterminate
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Row {
        id: &'static str,
        name: &'static str,
    }

    fn rows() -> Vec<Row> {
        vec![
            Row { id: "1", name: "a" },
            Row { id: "2", name: "b" },
            Row { id: "3", name: "c" },
        ]
    }

    fn selection() -> BulkSelection<Row> {
        BulkSelection::new(|r| r.id.to_string())
    }

    #[test]
    fn test_select_page_then_clear_is_empty() {
        let mut state = SelectionState::default();
        selection().select_page(&mut state, &rows());
        assert_eq!(state.selected_count(), 3);
        selection().clear(&mut state);
        assert_eq!(state.selected_count(), 0);
        assert!(state.selected_ids().is_empty());
    }

    #[test]
    fn test_toggle_twice_is_identity() {
        let mut state = SelectionState::default();
        let items = rows();
        selection().toggle(&mut state, &items[0]);
        let before = state.clone();
        selection().toggle(&mut state, &items[1]);
        selection().toggle(&mut state, &items[1]);
        assert_eq!(state.selected_ids(), before.selected_ids());
    }

    #[test]
    fn test_identity_survives_refetch() {
        let mut state = SelectionState::default();
        selection().toggle(&mut state, &Row { id: "2", name: "b" });
        // same entity, fresh object with changed fields
        let refetched = Row { id: "2", name: "renamed" };
        assert!(selection().is_selected(&state, &refetched));
    }

    #[test]
    fn test_header_state() {
        let mut state = SelectionState::default();
        let items = rows();
        assert_eq!(selection().header_state(&state, &items), CheckboxState::Unchecked);
        selection().toggle(&mut state, &items[0]);
        assert_eq!(selection().header_state(&state, &items), CheckboxState::Indeterminate);
        selection().select_page(&mut state, &items);
        assert_eq!(selection().header_state(&state, &items), CheckboxState::Checked);
        assert_eq!(selection().header_state(&state, &[]), CheckboxState::Unchecked);
    }

    #[test]
    fn test_selected_is_subset_of_observed() {
        let mut state = SelectionState::default();
        selection().select_page(&mut state, &rows());
        for id in state.selected_ids() {
            assert!(state.observed.contains(id));
        }
    }

    #[test]
    fn test_stale_ids_excluded_from_counts_in_page() {
        let mut state = SelectionState::default();
        let items = rows();
        selection().select_page(&mut state, &items);
        // entity "3" was deleted server-side
        let page: Vec<&str> = vec!["1", "2"];
        assert_eq!(state.selected_count_in(page), 2);
        assert_eq!(selection().selected_in(&state, &items[..2]).len(), 2);
    }

    #[test]
    fn test_select_all_filtered_when_everything_loaded() {
        let mut state = SelectionState::default();
        selection().select_all_filtered(&mut state, &rows(), 3, "name~a");
        assert!(!state.is_all_matching());
        assert_eq!(state.selected_count(), 3);
    }

    #[test]
    fn test_select_all_filtered_server_side() {
        let mut state = SelectionState::default();
        let items = rows();
        selection().select_all_filtered(&mut state, &items, 120, "name~a");
        assert!(state.is_all_matching());
        assert_eq!(state.selected_count(), 120);
        assert!(selection().is_selected(&state, &items[0]));

        selection().toggle(&mut state, &items[0]);
        assert!(!selection().is_selected(&state, &items[0]));
        assert_eq!(state.selected_count(), 119);

        state.sync_filter("name~a");
        assert!(state.is_all_matching());
        state.sync_filter("name~b");
        assert!(!state.is_all_matching());
        assert_eq!(state.selected_count(), 0);
    }
}
