use std::collections::BTreeMap;

use super::ExpandableVariant;

/// Expanded rows, keyed by item id. The value is the expanded cell for
/// compound expansion and `None` for single (whole row) expansion.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpansionState {
    expanded: BTreeMap<String, Option<String>>,
}

impl ExpansionState {
    pub fn from_map(variant: ExpandableVariant, mut map: BTreeMap<String, Option<String>>) -> Self {
        match variant {
            ExpandableVariant::Single => {
                map.retain(|_, cell| cell.is_none());
                // at most one expanded row
                let first = map.into_iter().next();
                Self {
                    expanded: first.into_iter().collect(),
                }
            }
            ExpandableVariant::Compound => {
                map.retain(|_, cell| cell.is_some());
                Self { expanded: map }
            }
        }
    }

    pub fn as_map(&self) -> &BTreeMap<String, Option<String>> {
        &self.expanded
    }

    pub fn is_empty(&self) -> bool {
        self.expanded.is_empty()
    }

    pub fn is_row_expanded(&self, id: &str) -> bool {
        self.expanded.contains_key(id)
    }

    pub fn expanded_cell(&self, id: &str) -> Option<&str> {
        self.expanded.get(id).and_then(|c| c.as_deref())
    }

    pub fn is_cell_expanded(&self, id: &str, column_key: &str) -> bool {
        self.expanded_cell(id) == Some(column_key)
    }

    /// Single variant: expanding a row collapses any other row
    pub fn toggle_row(&mut self, id: &str) {
        if self.expanded.remove(id).is_none() {
            self.expanded.clear();
            self.expanded.insert(id.to_string(), None);
        }
    }

    /// Compound variant: one expanded cell per row, rows independent
    pub fn set_cell_expanded(&mut self, id: &str, column_key: &str, expanded: bool) {
        if expanded {
            self.expanded
                .insert(id.to_string(), Some(column_key.to_string()));
        } else if self.is_cell_expanded(id, column_key) {
            self.expanded.remove(id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_keeps_one_row() {
        let mut state = ExpansionState::default();
        state.toggle_row("a");
        state.toggle_row("b");
        assert!(!state.is_row_expanded("a"));
        assert!(state.is_row_expanded("b"));
        state.toggle_row("b");
        assert!(state.is_empty());
    }

    #[test]
    fn test_compound_rows_independent() {
        let mut state = ExpansionState::default();
        state.set_cell_expanded("a", "vulnerabilities", true);
        state.set_cell_expanded("b", "identifier", true);
        assert!(state.is_cell_expanded("a", "vulnerabilities"));
        assert!(state.is_cell_expanded("b", "identifier"));

        // another cell of the same row replaces the first
        state.set_cell_expanded("a", "identifier", true);
        assert!(!state.is_cell_expanded("a", "vulnerabilities"));

        // collapsing a cell that is not expanded is a no-op
        state.set_cell_expanded("a", "vulnerabilities", false);
        assert!(state.is_cell_expanded("a", "identifier"));
    }

    #[test]
    fn test_from_map_enforces_variant() {
        let map: BTreeMap<String, Option<String>> = [
            ("a".to_string(), None),
            ("b".to_string(), None),
            ("c".to_string(), Some("x".to_string())),
        ]
        .into_iter()
        .collect();
        let single = ExpansionState::from_map(ExpandableVariant::Single, map.clone());
        assert_eq!(single.as_map().len(), 1);
        assert!(single.is_row_expanded("a"));

        let compound = ExpansionState::from_map(ExpandableVariant::Compound, map);
        assert_eq!(compound.as_map().len(), 1);
        assert!(compound.is_cell_expanded("c", "x"));
    }
}
