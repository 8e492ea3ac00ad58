use std::collections::BTreeMap;

use super::filter::{FilterCategory, FilterValue};
use super::sort::{ActiveSort, SortValue};

/// Where a table keeps its state between mounts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PersistTarget {
    /// In memory only, gone on unmount
    #[default]
    State,
    /// Mirrored into the URL search params under the table prefix
    UrlParams,
    /// Stored in `localStorage` under `<prefix>_table_state_v1`
    LocalStorage,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExpandableVariant {
    #[default]
    Single,
    Compound,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnDef {
    pub key: String,
    pub label: String,
}

impl ColumnDef {
    pub fn new(key: &str, label: &str) -> Self {
        Self {
            key: key.to_string(),
            label: label.to_string(),
        }
    }
}

pub const DEFAULT_ITEMS_PER_PAGE: usize = 10;

/// Static description of one table instance
#[derive(Debug, Clone)]
pub struct TableControlConfig {
    pub table_name: String,
    /// Namespace for persisted keys, unique per table on a page
    pub persistence_key_prefix: String,
    pub persist_to: PersistTarget,
    pub columns: Vec<ColumnDef>,
    pub initially_hidden_columns: Vec<String>,

    pub is_filter_enabled: bool,
    pub filter_categories: Vec<FilterCategory>,
    pub initial_filter_values: BTreeMap<String, FilterValue>,

    pub is_sort_enabled: bool,
    pub sortable_columns: Vec<String>,
    pub initial_sort: Option<ActiveSort>,
    /// Column key -> field name the hub sorts by
    pub hub_sort_field_keys: BTreeMap<String, String>,

    pub is_pagination_enabled: bool,
    pub initial_items_per_page: usize,

    pub is_selection_enabled: bool,

    pub is_expansion_enabled: bool,
    pub expandable_variant: ExpandableVariant,
    /// Columns whose cells toggle compound expansion
    pub compound_expandable_columns: Vec<String>,

    pub has_actions_column: bool,
}

impl TableControlConfig {
    pub fn new(table_name: &str, persistence_key_prefix: &str) -> Self {
        Self {
            table_name: table_name.to_string(),
            persistence_key_prefix: persistence_key_prefix.to_string(),
            persist_to: PersistTarget::State,
            columns: Vec::new(),
            initially_hidden_columns: Vec::new(),
            is_filter_enabled: false,
            filter_categories: Vec::new(),
            initial_filter_values: BTreeMap::new(),
            is_sort_enabled: false,
            sortable_columns: Vec::new(),
            initial_sort: None,
            hub_sort_field_keys: BTreeMap::new(),
            is_pagination_enabled: false,
            initial_items_per_page: DEFAULT_ITEMS_PER_PAGE,
            is_selection_enabled: false,
            is_expansion_enabled: false,
            expandable_variant: ExpandableVariant::Single,
            compound_expandable_columns: Vec::new(),
            has_actions_column: false,
        }
    }

    pub fn persist_to(mut self, target: PersistTarget) -> Self {
        self.persist_to = target;
        self
    }

    pub fn column(mut self, key: &str, label: &str) -> Self {
        self.columns.push(ColumnDef::new(key, label));
        self
    }

    pub fn hidden_by_default(mut self, key: &str) -> Self {
        self.initially_hidden_columns.push(key.to_string());
        self
    }

    pub fn filter(mut self, category: FilterCategory) -> Self {
        self.is_filter_enabled = true;
        self.filter_categories.push(category);
        self
    }

    pub fn initial_filter(mut self, key: &str, value: FilterValue) -> Self {
        self.initial_filter_values.insert(key.to_string(), value);
        self
    }

    pub fn sortable(mut self, columns: &[&str]) -> Self {
        self.is_sort_enabled = true;
        self.sortable_columns = columns.iter().map(|c| c.to_string()).collect();
        self
    }

    pub fn initial_sort(mut self, sort: ActiveSort) -> Self {
        self.initial_sort = Some(sort);
        self
    }

    pub fn hub_sort_field(mut self, column: &str, field: &str) -> Self {
        self.hub_sort_field_keys
            .insert(column.to_string(), field.to_string());
        self
    }

    pub fn paginated(mut self, items_per_page: usize) -> Self {
        self.is_pagination_enabled = true;
        self.initial_items_per_page = items_per_page.max(1);
        self
    }

    pub fn selectable(mut self) -> Self {
        self.is_selection_enabled = true;
        self
    }

    pub fn expandable(mut self, variant: ExpandableVariant) -> Self {
        self.is_expansion_enabled = true;
        self.expandable_variant = variant;
        self
    }

    /// Compound expansion toggled from the cells of `columns`
    pub fn expandable_cells(mut self, columns: &[&str]) -> Self {
        self.is_expansion_enabled = true;
        self.expandable_variant = ExpandableVariant::Compound;
        self.compound_expandable_columns = columns.iter().map(|c| c.to_string()).collect();
        self
    }

    pub fn is_compound_expandable(&self, column: &str) -> bool {
        self.is_expansion_enabled
            && self.expandable_variant == ExpandableVariant::Compound
            && self.compound_expandable_columns.iter().any(|c| c == column)
    }

    pub fn with_actions_column(mut self) -> Self {
        self.has_actions_column = true;
        self
    }

    pub fn column_label(&self, key: &str) -> Option<&str> {
        self.columns
            .iter()
            .find(|c| c.key == key)
            .map(|c| c.label.as_str())
    }

    pub fn has_column(&self, key: &str) -> bool {
        self.columns.iter().any(|c| c.key == key)
    }

    pub fn filter_category(&self, key: &str) -> Option<&FilterCategory> {
        self.filter_categories
            .iter()
            .find(|c| c.category_key == key)
    }

    pub fn is_sortable(&self, column: &str) -> bool {
        self.is_sort_enabled && self.sortable_columns.iter().any(|c| c == column)
    }

    /// Persisted key for `name` under this table's prefix
    pub fn persistence_key(&self, name: &str) -> String {
        format!("{}_{}", self.persistence_key_prefix, name)
    }
}

/// How a table reads the items it renders. Plain function pointers so the
/// accessors can live in reactive storage.
pub struct ItemAccessors<T> {
    /// Identity of an item; selection and expansion are keyed by it
    pub id_of: fn(&T) -> String,
    /// Values an item exposes for a filter category (client-side filtering)
    pub filter_values_of: fn(&T, &str) -> Vec<String>,
    /// Value an item exposes for a sortable column (client-side sorting)
    pub sort_value_of: fn(&T, &str) -> SortValue,
}

impl<T> ItemAccessors<T> {
    pub fn new(id_of: fn(&T) -> String) -> Self {
        Self {
            id_of,
            filter_values_of: |_, _| Vec::new(),
            sort_value_of: |_, _| SortValue::None,
        }
    }

    pub fn filter_by(mut self, f: fn(&T, &str) -> Vec<String>) -> Self {
        self.filter_values_of = f;
        self
    }

    pub fn sort_by(mut self, f: fn(&T, &str) -> SortValue) -> Self {
        self.sort_value_of = f;
        self
    }
}

impl<T> Clone for ItemAccessors<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for ItemAccessors<T> {}
