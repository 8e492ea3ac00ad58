//! Render-ready values derived from config + state + fetched items.
//!
//! Nothing here mutates state. Click handlers live on the handle; these
//! structs only say what to draw.

use contracts::shared::hub::SortDirection;

use super::sort::sort_items;
use super::{
    ExpandableVariant, ItemAccessors, PageState, PaginationProps, TableControlConfig,
    TableControlState,
};
use crate::shared::selection::CheckboxState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AriaSort {
    Ascending,
    Descending,
    None,
}

impl AriaSort {
    pub fn as_str(&self) -> &'static str {
        match self {
            AriaSort::Ascending => "ascending",
            AriaSort::Descending => "descending",
            AriaSort::None => "none",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThProps {
    pub column_key: String,
    pub label: String,
    pub is_visible: bool,
    pub is_sortable: bool,
    /// Absent for columns that cannot be sorted
    pub aria_sort: Option<AriaSort>,
    pub active_direction: Option<SortDirection>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowProps {
    pub item_id: String,
    pub row_index: usize,
    pub is_selected: bool,
    pub is_expanded: bool,
    /// Only set on selectable tables
    pub aria_selected: Option<bool>,
    pub expanded_cell: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompoundExpandProps {
    pub item_id: String,
    pub column_key: String,
    pub is_expanded: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TdProps {
    pub column_key: String,
    pub data_label: String,
    pub compound_expand: Option<CompoundExpandProps>,
}

/// Header props; needs no items, so headers render before the first fetch
pub fn th_props(config: &TableControlConfig, state: &TableControlState, column_key: &str) -> ThProps {
    let is_sortable = config.is_sortable(column_key);
    let active_direction = state
        .active_sort
        .as_ref()
        .filter(|s| s.column_key == column_key)
        .map(|s| s.direction);
    let aria_sort = is_sortable.then(|| match active_direction {
        Some(SortDirection::Asc) => AriaSort::Ascending,
        Some(SortDirection::Desc) => AriaSort::Descending,
        None => AriaSort::None,
    });
    ThProps {
        column_key: column_key.to_string(),
        label: config.column_label(column_key).unwrap_or(column_key).to_string(),
        is_visible: state.columns.is_visible(column_key),
        is_sortable,
        aria_sort,
        active_direction,
    }
}

/// Fetch outcome for server-paginated tables
pub struct DerivationInput<'a, T> {
    /// `None` while nothing has been fetched yet
    pub current_page_items: Option<&'a [T]>,
    pub total_item_count: usize,
    pub is_loading: bool,
    pub fetch_error: Option<String>,
}

pub struct TableControls<'a, T> {
    pub config: &'a TableControlConfig,
    pub state: &'a TableControlState,
    accessors: ItemAccessors<T>,
    pub current_page_items: Vec<&'a T>,
    /// All items matching the filters; equals the page for server tables
    pub filtered_items: Vec<&'a T>,
    pub total_item_count: usize,
    pub is_loading: bool,
    pub is_error: bool,
    pub fetch_error: Option<String>,
    pub is_no_data: bool,
    pub num_rendered_columns: usize,
    pub pagination: PaginationProps,
}

fn count_rendered_columns(config: &TableControlConfig, state: &TableControlState) -> usize {
    let mut count = state.columns.visible_count();
    if config.is_selection_enabled {
        count += 1;
    }
    if config.is_expansion_enabled && config.expandable_variant == ExpandableVariant::Single {
        count += 1;
    }
    if config.has_actions_column {
        count += 1;
    }
    count
}

/// Helpers for a server-paginated table: the items are already the current page
pub fn derive_table_controls<'a, T>(
    config: &'a TableControlConfig,
    state: &'a TableControlState,
    accessors: ItemAccessors<T>,
    input: DerivationInput<'a, T>,
) -> TableControls<'a, T> {
    let items: Vec<&'a T> = input.current_page_items.unwrap_or_default().iter().collect();
    let is_error = input.fetch_error.is_some();
    let page = if config.is_pagination_enabled {
        state.page
    } else {
        PageState::new(input.total_item_count.max(1))
    };
    TableControls {
        config,
        state,
        accessors,
        filtered_items: items.clone(),
        current_page_items: items,
        total_item_count: input.total_item_count,
        is_loading: input.is_loading,
        is_error,
        fetch_error: input.fetch_error,
        is_no_data: !input.is_loading && !is_error && input.total_item_count == 0,
        num_rendered_columns: count_rendered_columns(config, state),
        pagination: PaginationProps::new(&page, input.total_item_count),
    }
}

/// Helpers for a table whose endpoint returns everything at once: filter,
/// sort and paginate on the client
pub fn derive_local_table_controls<'a, T>(
    config: &'a TableControlConfig,
    state: &'a TableControlState,
    accessors: ItemAccessors<T>,
    all_items: Option<&'a [T]>,
    is_loading: bool,
    fetch_error: Option<String>,
) -> TableControls<'a, T> {
    let mut filtered: Vec<&'a T> = all_items
        .unwrap_or_default()
        .iter()
        .filter(|item| {
            !config.is_filter_enabled
                || state.filter_values.iter().all(|(key, value)| {
                    let Some(category) = config.filter_category(key) else {
                        return true;
                    };
                    let values = (accessors.filter_values_of)(item, key);
                    value.matches(&values, category.logic_operator)
                })
        })
        .collect();

    if let Some(sort) = state.active_sort.as_ref().filter(|_| config.is_sort_enabled) {
        sort_items(&mut filtered, &sort.column_key, sort.direction, |item, column| {
            (accessors.sort_value_of)(*item, column)
        });
    }

    let total = filtered.len();
    let (page, current): (PageState, Vec<&'a T>) = if config.is_pagination_enabled {
        let page = state.page;
        let current = filtered
            .iter()
            .skip(page.offset())
            .take(page.items_per_page)
            .copied()
            .collect();
        (page, current)
    } else {
        (PageState::new(total.max(1)), filtered.clone())
    };

    let is_error = fetch_error.is_some();
    TableControls {
        config,
        state,
        accessors,
        current_page_items: current,
        filtered_items: filtered,
        total_item_count: total,
        is_loading,
        is_error,
        fetch_error,
        is_no_data: !is_loading && !is_error && total == 0,
        num_rendered_columns: count_rendered_columns(config, state),
        pagination: PaginationProps::new(&page, total),
    }
}

/// Owned render data of a table, cheap to compare in a memo
#[derive(Debug, Clone, PartialEq)]
pub struct TableSummary {
    pub pagination: PaginationProps,
    pub num_rendered_columns: usize,
    pub is_loading: bool,
    pub fetch_error: Option<String>,
    pub is_no_data: bool,
    pub header_checkbox: CheckboxState,
    pub total_item_count: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SnapshotRow<T> {
    pub props: RowProps,
    pub item: T,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TableSnapshot<T> {
    pub rows: Vec<SnapshotRow<T>>,
    /// Ids of every item matching the filters that is on the client
    pub filtered_ids: Vec<String>,
    pub summary: TableSummary,
}

impl<T> TableSnapshot<T> {
    pub fn page_ids(&self) -> Vec<String> {
        self.rows.iter().map(|r| r.props.item_id.clone()).collect()
    }
}

impl<'a, T> TableControls<'a, T> {
    pub fn item_id(&self, item: &T) -> String {
        (self.accessors.id_of)(item)
    }

    pub fn th_props(&self, column_key: &str) -> ThProps {
        th_props(self.config, self.state, column_key)
    }

    pub fn row_props(&self, item: &T, row_index: usize) -> RowProps {
        let item_id = self.item_id(item);
        let is_selected =
            self.config.is_selection_enabled && self.state.selection.is_id_selected(&item_id);
        RowProps {
            is_expanded: self.config.is_expansion_enabled
                && self.state.expansion.is_row_expanded(&item_id),
            expanded_cell: self
                .state
                .expansion
                .expanded_cell(&item_id)
                .map(str::to_string),
            aria_selected: self.config.is_selection_enabled.then_some(is_selected),
            is_selected,
            row_index,
            item_id,
        }
    }

    pub fn td_props(&self, column_key: &str, item: &T) -> TdProps {
        let compound_expand = self.config.is_compound_expandable(column_key).then(|| {
            let item_id = self.item_id(item);
            CompoundExpandProps {
                is_expanded: self.state.expansion.is_cell_expanded(&item_id, column_key),
                column_key: column_key.to_string(),
                item_id,
            }
        });
        TdProps {
            column_key: column_key.to_string(),
            data_label: self
                .config
                .column_label(column_key)
                .unwrap_or(column_key)
                .to_string(),
            compound_expand,
        }
    }

    /// Tri-state of the "select page" checkbox
    pub fn header_checkbox_state(&self) -> CheckboxState {
        if self.current_page_items.is_empty() {
            return CheckboxState::Unchecked;
        }
        let selected = self
            .current_page_items
            .iter()
            .filter(|item| self.state.selection.is_id_selected(&self.item_id(item)))
            .count();
        if selected == 0 {
            CheckboxState::Unchecked
        } else if selected == self.current_page_items.len() {
            CheckboxState::Checked
        } else {
            CheckboxState::Indeterminate
        }
    }

    pub fn snapshot(&self) -> TableSnapshot<T>
    where
        T: Clone,
    {
        TableSnapshot {
            rows: self
                .current_page_items
                .iter()
                .enumerate()
                .map(|(i, item)| SnapshotRow {
                    props: self.row_props(item, i),
                    item: (*item).clone(),
                })
                .collect(),
            filtered_ids: self.filtered_items.iter().map(|item| self.item_id(item)).collect(),
            summary: TableSummary {
                pagination: self.pagination.clone(),
                num_rendered_columns: self.num_rendered_columns,
                is_loading: self.is_loading,
                fetch_error: self.fetch_error.clone(),
                is_no_data: self.is_no_data,
                header_checkbox: self.header_checkbox_state(),
                total_item_count: self.total_item_count,
            },
        }
    }

    pub fn current_page_ids(&self) -> Vec<String> {
        self.current_page_items
            .iter()
            .map(|item| self.item_id(item))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::table_controls::{ActiveSort, FilterCategory, FilterValue, SortValue};

    #[derive(Debug, Clone, PartialEq)]
    struct Sbom {
        id: String,
        name: String,
    }

    fn sbom(id: &str, name: &str) -> Sbom {
        Sbom {
            id: id.to_string(),
            name: name.to_string(),
        }
    }

    fn accessors() -> ItemAccessors<Sbom> {
        ItemAccessors::new(|s: &Sbom| s.id.clone())
            .filter_by(|s, key| match key {
                "name" => vec![s.name.clone()],
                _ => Vec::new(),
            })
            .sort_by(|s, key| match key {
                "name" => SortValue::text(s.name.clone()),
                _ => SortValue::None,
            })
    }

    fn config() -> TableControlConfig {
        TableControlConfig::new("SBOMs", "sb")
            .column("name", "Name")
            .column("published", "Published")
            .filter(FilterCategory::search("name", "Name"))
            .sortable(&["name"])
            .hub_sort_field("name", "name")
            .paginated(10)
            .selectable()
            .with_actions_column()
    }

    #[test]
    fn test_local_filter_and_sort_scenario() {
        let config = config();
        let mut state = TableControlState::new(&config);
        state
            .set_filter_value(&config, "name", Some(FilterValue::text("quarkus")))
            .unwrap();
        state
            .set_active_sort(&config, Some(ActiveSort::asc("name")))
            .unwrap();
        let items = vec![
            sbom("1", "quarkus-vertx"),
            sbom("2", "spring-boot"),
            sbom("3", "Quarkus-arc"),
            sbom("4", "quarkus-core"),
        ];

        let controls =
            derive_local_table_controls(&config, &state, accessors(), Some(&items), false, None);
        let names: Vec<&str> = controls
            .current_page_items
            .iter()
            .map(|s| s.name.as_str())
            .collect();
        assert_eq!(names, vec!["Quarkus-arc", "quarkus-core", "quarkus-vertx"]);
        assert_eq!(controls.total_item_count, 3);
        assert_eq!(controls.pagination.range_text(), "1 - 3 of 3");
    }

    #[test]
    fn test_local_pagination() {
        let config = config();
        let mut state = TableControlState::new(&config);
        state.set_items_per_page(&config, 2).unwrap();
        state.set_page_number(&config, 2).unwrap();
        let items: Vec<Sbom> = (1..=5).map(|i| sbom(&i.to_string(), "x")).collect();
        let controls =
            derive_local_table_controls(&config, &state, accessors(), Some(&items), false, None);
        assert_eq!(controls.current_page_ids(), vec!["3", "4"]);
        assert_eq!(controls.filtered_items.len(), 5);
        assert_eq!(controls.pagination.total_pages, 3);
    }

    #[test]
    fn test_num_rendered_columns() {
        let config = config();
        let mut state = TableControlState::new(&config);
        // 2 visible + selection + actions
        assert_eq!(count_rendered_columns(&config, &state), 4);
        state.set_column_visible("published", false).unwrap();
        assert_eq!(count_rendered_columns(&config, &state), 3);

        let single = config.clone().expandable(ExpandableVariant::Single);
        assert_eq!(count_rendered_columns(&single, &state), 4);
        let compound = config.expandable_cells(&["name"]);
        assert_eq!(count_rendered_columns(&compound, &state), 3);
    }

    #[test]
    fn test_states_without_items() {
        let config = config();
        let state = TableControlState::new(&config);
        let loading = derive_table_controls(
            &config,
            &state,
            accessors(),
            DerivationInput {
                current_page_items: None,
                total_item_count: 0,
                is_loading: true,
                fetch_error: None,
            },
        );
        assert!(!loading.is_no_data);
        assert!(loading.current_page_items.is_empty());

        let failed = derive_table_controls(
            &config,
            &state,
            accessors(),
            DerivationInput {
                current_page_items: None,
                total_item_count: 0,
                is_loading: false,
                fetch_error: Some("HTTP 500".to_string()),
            },
        );
        assert!(failed.is_error);
        assert!(!failed.is_no_data);

        let empty = derive_table_controls(
            &config,
            &state,
            accessors(),
            DerivationInput {
                current_page_items: Some(&[]),
                total_item_count: 0,
                is_loading: false,
                fetch_error: None,
            },
        );
        assert!(empty.is_no_data);
    }

    #[test]
    fn test_th_props() {
        let config = config();
        let mut state = TableControlState::new(&config);
        state
            .set_active_sort(&config, Some(ActiveSort::desc("name")))
            .unwrap();
        let controls = derive_local_table_controls(&config, &state, accessors(), None, false, None);
        let name = controls.th_props("name");
        assert_eq!(name.aria_sort, Some(AriaSort::Descending));
        assert_eq!(name.label, "Name");
        let published = controls.th_props("published");
        assert_eq!(published.aria_sort, None);
        assert!(!published.is_sortable);
    }

    #[test]
    fn test_row_and_cell_props() {
        let config = config().expandable_cells(&["name"]);
        let mut state = TableControlState::new(&config);
        state.selection.toggle_id("2");
        state.set_cell_expanded(&config, "2", "name", true).unwrap();
        let items = vec![sbom("1", "a"), sbom("2", "b")];
        let controls =
            derive_local_table_controls(&config, &state, accessors(), Some(&items), false, None);

        let row = controls.row_props(&items[1], 1);
        assert!(row.is_selected);
        assert_eq!(row.aria_selected, Some(true));
        assert_eq!(row.expanded_cell.as_deref(), Some("name"));
        assert_eq!(controls.header_checkbox_state(), CheckboxState::Indeterminate);

        let td = controls.td_props("name", &items[1]);
        assert_eq!(td.data_label, "Name");
        assert!(td.compound_expand.is_some_and(|c| c.is_expanded));
        assert!(controls.td_props("published", &items[1]).compound_expand.is_none());
    }

    #[test]
    fn test_snapshot_carries_rows_and_summary() {
        let config = config();
        let mut state = TableControlState::new(&config);
        state.set_items_per_page(&config, 2).unwrap();
        state.selection.toggle_id("1");
        let items: Vec<Sbom> = (1..=3).map(|i| sbom(&i.to_string(), "x")).collect();
        let snapshot =
            derive_local_table_controls(&config, &state, accessors(), Some(&items), false, None)
                .snapshot();
        assert_eq!(snapshot.page_ids(), vec!["1", "2"]);
        assert_eq!(snapshot.filtered_ids, vec!["1", "2", "3"]);
        assert!(snapshot.rows[0].props.is_selected);
        assert_eq!(snapshot.summary.header_checkbox, CheckboxState::Indeterminate);
        assert_eq!(snapshot.summary.pagination.range_text(), "1 - 2 of 3");
    }
}
