use std::collections::BTreeMap;

use super::{
    ActiveSort, ColumnState, ExpandableVariant, ExpansionState, FilterValue, PageState,
    TableControlConfig, TableControlError,
};
use super::pagination::checked_offset;
use crate::shared::selection::SelectionState;

/// Everything the user can change about one table.
///
/// Mutated only through the setters below, which check the request against
/// the configuration and keep the page reset rules.
#[derive(Debug, Clone, PartialEq)]
pub struct TableControlState {
    pub filter_values: BTreeMap<String, FilterValue>,
    pub active_sort: Option<ActiveSort>,
    pub page: PageState,
    pub columns: ColumnState,
    pub expansion: ExpansionState,
    pub selection: SelectionState,
}

impl TableControlState {
    pub fn new(config: &TableControlConfig) -> Self {
        let filter_values = config
            .initial_filter_values
            .iter()
            .filter(|(key, value)| {
                config
                    .filter_category(key)
                    .is_some_and(|c| c.accepts(value))
                    && !value.is_empty()
            })
            .map(|(key, value)| (key.clone(), value.clone().normalized()))
            .collect();
        Self {
            filter_values,
            active_sort: config
                .initial_sort
                .clone()
                .filter(|s| config.is_sortable(&s.column_key)),
            page: PageState::new(config.initial_items_per_page),
            columns: ColumnState::new(&config.columns, &config.initially_hidden_columns),
            expansion: ExpansionState::default(),
            selection: SelectionState::default(),
        }
    }

    pub fn filter_value(&self, category_key: &str) -> Option<&FilterValue> {
        self.filter_values.get(category_key)
    }

    pub fn has_active_filters(&self) -> bool {
        !self.filter_values.is_empty()
    }

    fn check_filter(
        config: &TableControlConfig,
        category_key: &str,
        value: &FilterValue,
    ) -> Result<(), TableControlError> {
        let category = config
            .filter_category(category_key)
            .ok_or_else(|| TableControlError::UnknownFilterCategory(category_key.to_string()))?;
        if !category.accepts(value) {
            return Err(TableControlError::FilterKindMismatch {
                category: category_key.to_string(),
                kind: value.kind(),
            });
        }
        if !value.is_valid() {
            return Err(TableControlError::InvalidFilterValue(category_key.to_string()));
        }
        Ok(())
    }

    /// Set or clear (`None` or an empty value) one category. Resets to page 1.
    pub fn set_filter_value(
        &mut self,
        config: &TableControlConfig,
        category_key: &str,
        value: Option<FilterValue>,
    ) -> Result<(), TableControlError> {
        if !config.is_filter_enabled {
            return Err(TableControlError::FeatureDisabled("Filtering"));
        }
        match value.map(FilterValue::normalized) {
            Some(value) if !value.is_empty() => {
                Self::check_filter(config, category_key, &value)?;
                self.filter_values.insert(category_key.to_string(), value);
            }
            _ => {
                if config.filter_category(category_key).is_none() {
                    return Err(TableControlError::UnknownFilterCategory(
                        category_key.to_string(),
                    ));
                }
                self.filter_values.remove(category_key);
            }
        }
        self.page.page_number = 1;
        Ok(())
    }

    /// Replace all filter values at once. Nothing changes when any value is rejected.
    pub fn set_filter_values(
        &mut self,
        config: &TableControlConfig,
        values: BTreeMap<String, FilterValue>,
    ) -> Result<(), TableControlError> {
        if !config.is_filter_enabled {
            return Err(TableControlError::FeatureDisabled("Filtering"));
        }
        let mut next = BTreeMap::new();
        for (key, value) in values {
            let value = value.normalized();
            if value.is_empty() {
                continue;
            }
            Self::check_filter(config, &key, &value)?;
            next.insert(key, value);
        }
        self.filter_values = next;
        self.page.page_number = 1;
        Ok(())
    }

    pub fn clear_filters(&mut self) {
        self.filter_values.clear();
        self.page.page_number = 1;
    }

    /// Page is left unchanged
    pub fn set_active_sort(
        &mut self,
        config: &TableControlConfig,
        sort: Option<ActiveSort>,
    ) -> Result<(), TableControlError> {
        if !config.is_sort_enabled {
            return Err(TableControlError::FeatureDisabled("Sorting"));
        }
        if let Some(sort) = &sort {
            if !config.has_column(&sort.column_key) {
                return Err(TableControlError::UnknownColumn(sort.column_key.clone()));
            }
            if !config.is_sortable(&sort.column_key) {
                return Err(TableControlError::NotSortable(sort.column_key.clone()));
            }
        }
        self.active_sort = sort;
        Ok(())
    }

    /// Ascending for a new column, flipped for the active one
    pub fn toggle_sort(
        &mut self,
        config: &TableControlConfig,
        column_key: &str,
    ) -> Result<(), TableControlError> {
        let next = match &self.active_sort {
            Some(active) if active.column_key == column_key => ActiveSort {
                column_key: active.column_key.clone(),
                direction: active.direction.reversed(),
            },
            _ => ActiveSort::asc(column_key),
        };
        self.set_active_sort(config, Some(next))
    }

    /// What a click on a sortable header does: toggle, then back to page 1
    pub fn apply_header_click(
        &mut self,
        config: &TableControlConfig,
        column_key: &str,
    ) -> Result<(), TableControlError> {
        self.toggle_sort(config, column_key)?;
        self.page.page_number = 1;
        Ok(())
    }

    pub fn set_page_number(
        &mut self,
        config: &TableControlConfig,
        page_number: usize,
    ) -> Result<(), TableControlError> {
        if !config.is_pagination_enabled {
            return Err(TableControlError::FeatureDisabled("Pagination"));
        }
        if checked_offset(page_number, self.page.items_per_page).is_none() {
            return Err(TableControlError::PageOutOfRange(page_number));
        }
        self.page.page_number = page_number.max(1);
        Ok(())
    }

    /// Resets to page 1
    pub fn set_items_per_page(
        &mut self,
        config: &TableControlConfig,
        items_per_page: usize,
    ) -> Result<(), TableControlError> {
        if !config.is_pagination_enabled {
            return Err(TableControlError::FeatureDisabled("Pagination"));
        }
        if items_per_page == 0 {
            return Err(TableControlError::ZeroPageSize);
        }
        self.page = PageState {
            page_number: 1,
            items_per_page,
        };
        Ok(())
    }

    /// Move back to the last page when the current one is past the end.
    /// Returns whether the page changed.
    pub fn clamp_to_total(&mut self, total_item_count: usize) -> bool {
        let last = self.page.last_page_number(total_item_count);
        if self.page.page_number > last {
            self.page.page_number = last;
            true
        } else {
            false
        }
    }

    pub fn set_column_visible(
        &mut self,
        column_key: &str,
        visible: bool,
    ) -> Result<(), TableControlError> {
        self.columns.set_visible(column_key, visible)
    }

    pub fn reset_columns(&mut self, config: &TableControlConfig) {
        self.columns = ColumnState::new(&config.columns, &config.initially_hidden_columns);
    }

    pub fn toggle_row_expanded(
        &mut self,
        config: &TableControlConfig,
        item_id: &str,
    ) -> Result<(), TableControlError> {
        if !config.is_expansion_enabled || config.expandable_variant != ExpandableVariant::Single
        {
            return Err(TableControlError::FeatureDisabled("Single expansion"));
        }
        self.expansion.toggle_row(item_id);
        Ok(())
    }

    pub fn set_cell_expanded(
        &mut self,
        config: &TableControlConfig,
        item_id: &str,
        column_key: &str,
        expanded: bool,
    ) -> Result<(), TableControlError> {
        if !config.is_expansion_enabled
            || config.expandable_variant != ExpandableVariant::Compound
        {
            return Err(TableControlError::FeatureDisabled("Compound expansion"));
        }
        if !config.has_column(column_key) {
            return Err(TableControlError::UnknownColumn(column_key.to_string()));
        }
        self.expansion
            .set_cell_expanded(item_id, column_key, expanded);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::table_controls::FilterCategory;
    use contracts::shared::hub::SortDirection;

    fn config() -> TableControlConfig {
        TableControlConfig::new("SBOMs", "sb")
            .column("name", "Name")
            .column("version", "Version")
            .column("published", "Published")
            .filter(FilterCategory::search("name", "Name"))
            .filter(FilterCategory::date_range("published", "Published"))
            .sortable(&["name", "published"])
            .paginated(10)
    }

    #[test]
    fn test_filter_resets_page() {
        let config = config();
        let mut state = TableControlState::new(&config);
        state.set_page_number(&config, 4).unwrap();
        state
            .set_filter_value(&config, "name", Some(FilterValue::text("quarkus")))
            .unwrap();
        assert_eq!(state.page.page_number, 1);
        assert_eq!(state.filter_value("name"), Some(&FilterValue::text("quarkus")));
    }

    #[test]
    fn test_sort_keeps_page() {
        let config = config();
        let mut state = TableControlState::new(&config);
        state.set_page_number(&config, 3).unwrap();
        state
            .set_active_sort(&config, Some(ActiveSort::desc("published")))
            .unwrap();
        assert_eq!(state.page.page_number, 3);
    }

    #[test]
    fn test_header_click_toggles_then_resets_page() {
        let config = config();
        let mut state = TableControlState::new(&config);
        state.set_page_number(&config, 3).unwrap();
        state.apply_header_click(&config, "name").unwrap();
        assert_eq!(state.active_sort, Some(ActiveSort::asc("name")));
        assert_eq!(state.page.page_number, 1);
        state.apply_header_click(&config, "name").unwrap();
        assert_eq!(
            state.active_sort.as_ref().map(|s| s.direction),
            Some(SortDirection::Desc)
        );
    }

    #[test]
    fn test_page_size_resets_page() {
        let config = config();
        let mut state = TableControlState::new(&config);
        state.set_page_number(&config, 2).unwrap();
        state.set_items_per_page(&config, 50).unwrap();
        assert_eq!(state.page, PageState { page_number: 1, items_per_page: 50 });
        assert_eq!(
            state.set_items_per_page(&config, 0),
            Err(TableControlError::ZeroPageSize)
        );
    }

    #[test]
    fn test_page_past_addressable_offset_rejected() {
        let config = config();
        let mut state = TableControlState::new(&config);
        state.set_page_number(&config, 2).unwrap();
        assert_eq!(
            state.set_page_number(&config, usize::MAX),
            Err(TableControlError::PageOutOfRange(usize::MAX))
        );
        assert_eq!(state.page.page_number, 2);
    }

    #[test]
    fn test_empty_value_removes_filter() {
        let config = config();
        let mut state = TableControlState::new(&config);
        state
            .set_filter_value(&config, "name", Some(FilterValue::text("a")))
            .unwrap();
        state
            .set_filter_value(&config, "name", Some(FilterValue::text("  ")))
            .unwrap();
        assert!(!state.has_active_filters());
    }

    #[test]
    fn test_rejected_filters() {
        let config = config();
        let mut state = TableControlState::new(&config);
        assert_eq!(
            state.set_filter_value(&config, "nope", Some(FilterValue::text("a"))),
            Err(TableControlError::UnknownFilterCategory("nope".to_string()))
        );
        assert!(matches!(
            state.set_filter_value(&config, "name", Some(FilterValue::multi(["a"]))),
            Err(TableControlError::FilterKindMismatch { .. })
        ));

        let disabled = TableControlConfig::new("Importers", "im").column("name", "Name");
        let mut state = TableControlState::new(&disabled);
        assert_eq!(
            state.set_filter_value(&disabled, "name", None),
            Err(TableControlError::FeatureDisabled("Filtering"))
        );
    }

    #[test]
    fn test_set_filter_values_is_all_or_nothing() {
        let config = config();
        let mut state = TableControlState::new(&config);
        state
            .set_filter_value(&config, "name", Some(FilterValue::text("keep")))
            .unwrap();
        let values = [
            ("name".to_string(), FilterValue::text("x")),
            ("bogus".to_string(), FilterValue::text("y")),
        ]
        .into_iter()
        .collect();
        assert!(state.set_filter_values(&config, values).is_err());
        assert_eq!(state.filter_value("name"), Some(&FilterValue::text("keep")));
    }

    #[test]
    fn test_unsortable_column() {
        let config = config();
        let mut state = TableControlState::new(&config);
        assert_eq!(
            state.set_active_sort(&config, Some(ActiveSort::asc("version"))),
            Err(TableControlError::NotSortable("version".to_string()))
        );
        state.set_active_sort(&config, None).unwrap();
        assert_eq!(state.active_sort, None);
    }

    #[test]
    fn test_clamp_to_total() {
        let config = config();
        let mut state = TableControlState::new(&config);
        state.set_page_number(&config, 5).unwrap();
        assert!(state.clamp_to_total(25));
        assert_eq!(state.page.page_number, 3);
        assert!(!state.clamp_to_total(25));
        assert!(state.clamp_to_total(0));
        assert_eq!(state.page.page_number, 1);
    }

    #[test]
    fn test_initial_values_checked_against_config() {
        let config = config()
            .initial_filter("name", FilterValue::text(" quarkus "))
            .initial_filter("unknown", FilterValue::text("x"))
            .initial_sort(ActiveSort::asc("version"));
        let state = TableControlState::new(&config);
        assert_eq!(state.filter_values.len(), 1);
        assert_eq!(state.filter_value("name"), Some(&FilterValue::text("quarkus")));
        assert_eq!(state.active_sort, None);
    }

    #[test]
    fn test_expansion_requires_matching_variant() {
        let config = config().expandable(ExpandableVariant::Compound);
        let mut state = TableControlState::new(&config);
        assert!(state.toggle_row_expanded(&config, "1").is_err());
        state.set_cell_expanded(&config, "1", "name", true).unwrap();
        assert!(state.expansion.is_cell_expanded("1", "name"));
    }
}
