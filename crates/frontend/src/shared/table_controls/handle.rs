//! Reactive owner of one table's state.
//!
//! The handle is `Copy` and passed to child components explicitly. Every
//! setter validates through [`TableControlState`], stores the result in the
//! signal and mirrors it to the configured persistence target.

use contracts::shared::hub::{HubPaginatedResult, HubRequestParams};
use leptos::prelude::*;
use wasm_bindgen::JsValue;

use super::hub_request_params::serialize_filters_for_hub;
use super::persistence;
use super::{
    derive_local_table_controls, derive_table_controls, get_hub_request_params, th_props,
    ActiveSort, DerivationInput, FilterValue, ItemAccessors, PersistTarget, TableControlConfig,
    TableControlError, TableControlState, TableSnapshot, ThProps,
};
use crate::shared::query::QueryState;
use crate::shared::selection::SelectionState;

#[derive(Clone, Copy)]
pub struct TableControlsHandle {
    pub config: StoredValue<TableControlConfig>,
    pub state: RwSignal<TableControlState>,
}

fn storage() -> Option<web_sys::Storage> {
    web_sys::window().and_then(|w| w.local_storage().ok().flatten())
}

fn current_search() -> String {
    web_sys::window()
        .and_then(|w| w.location().search().ok())
        .unwrap_or_default()
}

fn write_url_params(config: &TableControlConfig, state: &TableControlState) {
    let Some(window) = web_sys::window() else {
        return;
    };
    let search = current_search();
    let query = persistence::write_query_string(config, state, &search);
    if query == search.trim_start_matches('?') {
        return;
    }
    let pathname = window.location().pathname().unwrap_or_default();
    let new_url = if query.is_empty() {
        pathname
    } else {
        format!("{}?{}", pathname, query)
    };
    if let Ok(history) = window.history() {
        let _ = history.replace_state_with_url(&JsValue::NULL, "", Some(&new_url));
    }
}

fn load_state(config: &TableControlConfig) -> TableControlState {
    match config.persist_to {
        PersistTarget::State => TableControlState::new(config),
        PersistTarget::UrlParams => {
            persistence::read_params(config, &persistence::read_query_string(config, &current_search()))
        }
        PersistTarget::LocalStorage => storage()
            .and_then(|s| s.get_item(&persistence::storage_key(config)).ok().flatten())
            .map(|blob| persistence::from_storage_blob(config, &blob))
            .unwrap_or_else(|| TableControlState::new(config)),
    }
}

fn save_state(config: &TableControlConfig, state: &TableControlState) {
    match config.persist_to {
        PersistTarget::State => {}
        PersistTarget::UrlParams => write_url_params(config, state),
        PersistTarget::LocalStorage => {
            let Some(storage) = storage() else { return };
            let Some(blob) = persistence::to_storage_blob(config, state) else {
                return;
            };
            let _ = storage.set_item(&persistence::storage_key(config), &blob);
        }
    }
    log::debug!("{}: table state persisted", config.table_name);
}

/// Create the state of a table, hydrated from its persistence target
pub fn use_table_control_state(config: TableControlConfig) -> TableControlsHandle {
    let state = RwSignal::new(load_state(&config));
    let handle = TableControlsHandle {
        config: StoredValue::new(config),
        state,
    };

    // an "all matching" selection stands for one filter only
    let filter_query = Memo::new(move |_| serialize_filters_for_hub(&handle.hub_request_params().filters));
    Effect::new(move |_| {
        let q = filter_query.get();
        let stale = state.with_untracked(|s| {
            let mut selection = s.selection.clone();
            selection.sync_filter(&q);
            selection != s.selection
        });
        if stale {
            state.update(|s| s.selection.sync_filter(&q));
        }
    });

    handle
}

impl TableControlsHandle {
    fn apply(
        &self,
        action: &str,
        f: impl FnOnce(&TableControlConfig, &mut TableControlState) -> Result<(), TableControlError>,
    ) -> Result<(), TableControlError> {
        let config = self.config.get_value();
        let mut next = self.state.get_untracked();
        if let Err(e) = f(&config, &mut next) {
            log::warn!("{}: {} rejected: {}", config.table_name, action, e);
            return Err(e);
        }
        save_state(&config, &next);
        self.state.set(next);
        Ok(())
    }

    /// Tracked read of config and state together
    pub fn with<R>(&self, f: impl FnOnce(&TableControlConfig, &TableControlState) -> R) -> R {
        let state = self.state;
        self.config.with_value(|config| state.with(|s| f(config, s)))
    }

    pub fn th_props(&self, column_key: &str) -> ThProps {
        self.with(|c, s| th_props(c, s, column_key))
    }

    pub fn filter_value(&self, category_key: &str) -> Option<FilterValue> {
        self.state.with(|s| s.filter_value(category_key).cloned())
    }

    pub fn hub_request_params(&self) -> HubRequestParams {
        self.with(get_hub_request_params)
    }

    pub fn set_filter_value(
        &self,
        category_key: &str,
        value: Option<FilterValue>,
    ) -> Result<(), TableControlError> {
        self.apply("set filter", |c, s| s.set_filter_value(c, category_key, value))
    }

    pub fn clear_filters(&self) {
        let _ = self.apply("clear filters", |_, s| {
            s.clear_filters();
            Ok(())
        });
    }

    pub fn set_active_sort(&self, sort: Option<ActiveSort>) -> Result<(), TableControlError> {
        self.apply("set sort", |c, s| s.set_active_sort(c, sort))
    }

    /// Header click: toggle direction (or start ascending), back to page 1
    pub fn on_sort_click(&self, column_key: &str) {
        let _ = self.apply("sort click", |c, s| s.apply_header_click(c, column_key));
    }

    pub fn set_page_number(&self, page_number: usize) {
        let _ = self.apply("set page", |c, s| s.set_page_number(c, page_number));
    }

    pub fn set_items_per_page(&self, items_per_page: usize) {
        let _ = self.apply("set page size", |c, s| {
            s.set_items_per_page(c, items_per_page)
        });
    }

    /// Called once a fetch reports its total; pulls the page back in range
    pub fn clamp_to_total(&self, total_item_count: usize) {
        let past_end = self.state.with_untracked(|s| {
            s.page.page_number > s.page.last_page_number(total_item_count)
        });
        if past_end {
            let _ = self.apply("clamp page", |_, s| {
                s.clamp_to_total(total_item_count);
                Ok(())
            });
        }
    }

    pub fn set_column_visible(&self, column_key: &str, visible: bool) -> Result<(), TableControlError> {
        self.apply("set column visibility", |_, s| {
            s.set_column_visible(column_key, visible)
        })
    }

    pub fn reset_columns(&self) {
        let _ = self.apply("reset columns", |c, s| {
            s.reset_columns(c);
            Ok(())
        });
    }

    pub fn toggle_row_expanded(&self, item_id: &str) {
        let _ = self.apply("toggle row", |c, s| s.toggle_row_expanded(c, item_id));
    }

    pub fn set_cell_expanded(&self, item_id: &str, column_key: &str, expanded: bool) {
        let _ = self.apply("toggle cell", |c, s| {
            s.set_cell_expanded(c, item_id, column_key, expanded)
        });
    }

    /// Selection is never persisted, so it bypasses `apply`
    pub fn update_selection(&self, f: impl FnOnce(&mut SelectionState)) {
        let enabled = self.config.with_value(|c| c.is_selection_enabled);
        if !enabled {
            log::warn!("selection is not enabled for this table");
            return;
        }
        self.state.update(|s| f(&mut s.selection));
    }

    pub fn selected_count(&self) -> usize {
        self.state.with(|s| s.selection.selected_count())
    }
}

fn observe_page<T>(handle: TableControlsHandle, snapshot: Memo<TableSnapshot<T>>)
where
    T: Clone + PartialEq + Send + Sync + 'static,
{
    if !handle.config.with_value(|c| c.is_selection_enabled) {
        return;
    }
    Effect::new(move |_| {
        let ids = snapshot.with(|s| s.page_ids());
        if !ids.is_empty() {
            handle
                .state
                .update(|s| s.selection.observe_ids(ids.iter().map(String::as_str)));
        }
    });
}

/// Render data of a server-paginated table. Also pulls the page back in range
/// when a fetch reports fewer items than the page expects.
pub fn use_hub_table<T>(
    handle: TableControlsHandle,
    accessors: ItemAccessors<T>,
    query: QueryState<HubPaginatedResult<T>>,
) -> Memo<TableSnapshot<T>>
where
    T: Clone + PartialEq + Send + Sync + 'static,
{
    let snapshot = Memo::new(move |_| {
        let is_loading = query.is_loading.get() && query.data.with(Option::is_none);
        let fetch_error = query.error.get();
        query.data.with(|data| {
            handle.with(|config, state| {
                derive_table_controls(
                    config,
                    state,
                    accessors,
                    DerivationInput {
                        current_page_items: data.as_ref().map(|r| r.data.as_slice()),
                        total_item_count: data.as_ref().map_or(0, |r| r.total),
                        is_loading,
                        fetch_error,
                    },
                )
                .snapshot()
            })
        })
    });

    Effect::new(move |_| {
        if let Some(total) = query.data.with(|d| d.as_ref().map(|r| r.total)) {
            handle.clamp_to_total(total);
        }
    });
    observe_page(handle, snapshot);
    snapshot
}

/// Render data of a table whose endpoint returns every item at once
pub fn use_local_table<T>(
    handle: TableControlsHandle,
    accessors: ItemAccessors<T>,
    query: QueryState<Vec<T>>,
) -> Memo<TableSnapshot<T>>
where
    T: Clone + PartialEq + Send + Sync + 'static,
{
    let snapshot = Memo::new(move |_| {
        let is_loading = query.is_loading.get() && query.data.with(Option::is_none);
        let fetch_error = query.error.get();
        query.data.with(|data| {
            handle.with(|config, state| {
                derive_local_table_controls(
                    config,
                    state,
                    accessors,
                    data.as_deref(),
                    is_loading,
                    fetch_error,
                )
                .snapshot()
            })
        })
    });

    Effect::new(move |_| {
        let total = snapshot.with(|s| s.summary.total_item_count);
        if !query.is_loading.get() {
            handle.clamp_to_total(total);
        }
    });
    observe_page(handle, snapshot);
    snapshot
}
