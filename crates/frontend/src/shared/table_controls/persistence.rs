//! Flat key/value layout of a table's state, shared by URL and localStorage.
//!
//! Keys are namespaced by the table prefix (`sb_filters`, `sb_sort`, ...), so
//! several tables can share one URL. Only values that differ from the
//! configured defaults are written. Reading never fails: anything malformed
//! is dropped with a warning and the default is used instead.

use std::collections::BTreeMap;

use super::pagination::checked_offset;
use super::{
    ActiveSort, ColumnState, ExpansionState, FilterValue, TableControlConfig, TableControlState,
};

pub type UrlParamMap = BTreeMap<String, String>;

pub const FILTERS_KEY: &str = "filters";
pub const SORT_KEY: &str = "sort";
pub const PAGE_KEY: &str = "page";
pub const PAGE_SIZE_KEY: &str = "pageSize";
pub const HIDDEN_KEY: &str = "hidden";
pub const EXPANDED_KEY: &str = "expanded";

const ALL_KEYS: [&str; 6] = [
    FILTERS_KEY,
    SORT_KEY,
    PAGE_KEY,
    PAGE_SIZE_KEY,
    HIDDEN_KEY,
    EXPANDED_KEY,
];

/// localStorage key of a table's blob
pub fn storage_key(config: &TableControlConfig) -> String {
    config.persistence_key("table_state_v1")
}

fn set_or_remove(map: &mut UrlParamMap, key: String, value: Option<String>) {
    match value {
        Some(value) => {
            map.insert(key, value);
        }
        None => {
            map.remove(&key);
        }
    }
}

/// Write this table's keys into `map`, leaving keys of other tables untouched
pub fn write_params(config: &TableControlConfig, state: &TableControlState, map: &mut UrlParamMap) {
    let defaults = TableControlState::new(config);
    let key = |name: &str| config.persistence_key(name);

    let filters = (config.is_filter_enabled && state.filter_values != defaults.filter_values)
        .then(|| serde_json::to_string(&state.filter_values).ok())
        .flatten();
    set_or_remove(map, key(FILTERS_KEY), filters);

    let sort = (config.is_sort_enabled && state.active_sort != defaults.active_sort).then(|| {
        state
            .active_sort
            .as_ref()
            .map(ActiveSort::encode)
            .unwrap_or_default()
    });
    set_or_remove(map, key(SORT_KEY), sort);

    let paginated = config.is_pagination_enabled;
    set_or_remove(
        map,
        key(PAGE_KEY),
        (paginated && state.page.page_number != 1).then(|| state.page.page_number.to_string()),
    );
    set_or_remove(
        map,
        key(PAGE_SIZE_KEY),
        (paginated && state.page.items_per_page != defaults.page.items_per_page)
            .then(|| state.page.items_per_page.to_string()),
    );

    let hidden = state.columns.hidden_keys();
    set_or_remove(
        map,
        key(HIDDEN_KEY),
        (hidden != defaults.columns.hidden_keys()).then(|| hidden.join(",")),
    );

    let expanded = (config.is_expansion_enabled && !state.expansion.is_empty())
        .then(|| serde_json::to_string(state.expansion.as_map()).ok())
        .flatten();
    set_or_remove(map, key(EXPANDED_KEY), expanded);
}

fn read_filters(config: &TableControlConfig, raw: &str) -> Option<BTreeMap<String, FilterValue>> {
    let entries: BTreeMap<String, serde_json::Value> = match serde_json::from_str(raw) {
        Ok(entries) => entries,
        Err(e) => {
            log::warn!("{}: dropping malformed filters: {}", config.table_name, e);
            return None;
        }
    };
    let mut values = BTreeMap::new();
    for (category_key, value) in entries {
        let value = match serde_json::from_value::<FilterValue>(value) {
            Ok(value) => value.normalized(),
            Err(e) => {
                log::warn!(
                    "{}: dropping filter {:?}: {}",
                    config.table_name,
                    category_key,
                    e
                );
                continue;
            }
        };
        let accepted = config
            .filter_category(&category_key)
            .is_some_and(|c| c.accepts(&value));
        if !accepted || !value.is_valid() {
            log::warn!(
                "{}: dropping filter {:?} not valid for this table",
                config.table_name,
                category_key
            );
            continue;
        }
        if !value.is_empty() {
            values.insert(category_key, value);
        }
    }
    Some(values)
}

fn read_sort(config: &TableControlConfig, raw: &str) -> Option<Option<ActiveSort>> {
    if raw.is_empty() {
        return Some(None);
    }
    match ActiveSort::decode(raw) {
        Some(sort) if config.is_sortable(&sort.column_key) => Some(Some(sort)),
        _ => {
            log::warn!("{}: dropping sort {:?}", config.table_name, raw);
            None
        }
    }
}

fn read_positive(config: &TableControlConfig, name: &str, raw: &str) -> Option<usize> {
    match raw.parse::<usize>() {
        Ok(n) if n >= 1 => Some(n),
        _ => {
            log::warn!("{}: dropping {} {:?}", config.table_name, name, raw);
            None
        }
    }
}

fn read_hidden(config: &TableControlConfig, raw: &str) -> Option<ColumnState> {
    let hidden: Vec<String> = raw
        .split(',')
        .map(str::trim)
        .filter(|k| config.has_column(k))
        .map(str::to_string)
        .collect();
    let columns = ColumnState::new(&config.columns, &hidden);
    if !config.columns.is_empty() && hidden.len() == config.columns.len() {
        log::warn!("{}: ignoring hidden columns that hide everything", config.table_name);
        return None;
    }
    Some(columns)
}

fn read_expanded(config: &TableControlConfig, raw: &str) -> Option<ExpansionState> {
    match serde_json::from_str::<BTreeMap<String, Option<String>>>(raw) {
        Ok(map) => Some(ExpansionState::from_map(config.expandable_variant, map)),
        Err(e) => {
            log::warn!("{}: dropping expanded rows: {}", config.table_name, e);
            None
        }
    }
}

/// Rebuild the state from `map`; absent or malformed keys give defaults
pub fn read_params(config: &TableControlConfig, map: &UrlParamMap) -> TableControlState {
    let mut state = TableControlState::new(config);
    let get = |name: &str| map.get(&config.persistence_key(name)).map(String::as_str);

    if config.is_filter_enabled {
        if let Some(filters) = get(FILTERS_KEY).and_then(|raw| read_filters(config, raw)) {
            state.filter_values = filters;
        }
    }
    if config.is_sort_enabled {
        if let Some(sort) = get(SORT_KEY).and_then(|raw| read_sort(config, raw)) {
            state.active_sort = sort;
        }
    }
    if config.is_pagination_enabled {
        if let Some(page) = get(PAGE_KEY).and_then(|raw| read_positive(config, PAGE_KEY, raw)) {
            state.page.page_number = page;
        }
        if let Some(size) =
            get(PAGE_SIZE_KEY).and_then(|raw| read_positive(config, PAGE_SIZE_KEY, raw))
        {
            state.page.items_per_page = size;
        }
        if checked_offset(state.page.page_number, state.page.items_per_page).is_none() {
            log::warn!(
                "{}: dropping page {} out of range",
                config.table_name,
                state.page.page_number
            );
            state.page.page_number = 1;
        }
    }
    if let Some(columns) = get(HIDDEN_KEY).and_then(|raw| read_hidden(config, raw)) {
        state.columns = columns;
    }
    if config.is_expansion_enabled {
        if let Some(expansion) = get(EXPANDED_KEY).and_then(|raw| read_expanded(config, raw)) {
            state.expansion = expansion;
        }
    }
    state
}

/// Remove every key of this table from `map`
pub fn clear_params(config: &TableControlConfig, map: &mut UrlParamMap) {
    for name in ALL_KEYS {
        map.remove(&config.persistence_key(name));
    }
}

fn is_own_segment(config: &TableControlConfig, segment: &str) -> bool {
    let raw_key = segment.split('=').next().unwrap_or_default();
    let key = urlencoding::decode(raw_key)
        .map(|k| k.into_owned())
        .unwrap_or_else(|_| raw_key.to_string());
    ALL_KEYS
        .iter()
        .any(|name| config.persistence_key(name) == key)
}

fn split_query(search: &str) -> impl Iterator<Item = &str> {
    search
        .trim_start_matches('?')
        .split('&')
        .filter(|segment| !segment.is_empty())
}

/// This table's keys out of a raw query string. Segments of other tables
/// are never parsed, so they cannot make this one unreadable.
pub fn read_query_string(config: &TableControlConfig, search: &str) -> UrlParamMap {
    let own = split_query(search)
        .filter(|segment| is_own_segment(config, segment))
        .collect::<Vec<_>>()
        .join("&");
    serde_qs::from_str(&own).unwrap_or_else(|e| {
        log::warn!("{}: ignoring unreadable url params: {}", config.table_name, e);
        UrlParamMap::new()
    })
}

/// `search` with this table's keys replaced by `state`; every other segment
/// is kept verbatim and in place.
pub fn write_query_string(
    config: &TableControlConfig,
    state: &TableControlState,
    search: &str,
) -> String {
    let mut segments: Vec<String> = split_query(search)
        .filter(|segment| !is_own_segment(config, segment))
        .map(str::to_string)
        .collect();
    let mut own = UrlParamMap::new();
    write_params(config, state, &mut own);
    match serde_qs::to_string(&own) {
        Ok(query) if !query.is_empty() => segments.push(query),
        Ok(_) => {}
        Err(e) => log::warn!("{}: url params not written: {}", config.table_name, e),
    }
    segments.join("&")
}

pub fn to_storage_blob(config: &TableControlConfig, state: &TableControlState) -> Option<String> {
    let mut map = UrlParamMap::new();
    write_params(config, state, &mut map);
    serde_json::to_string(&map).ok()
}

pub fn from_storage_blob(config: &TableControlConfig, blob: &str) -> TableControlState {
    match serde_json::from_str::<UrlParamMap>(blob) {
        Ok(map) => read_params(config, &map),
        Err(e) => {
            log::warn!("{}: ignoring stored table state: {}", config.table_name, e);
            TableControlState::new(config)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::table_controls::{
        get_hub_request_params, serialize_request_params_for_hub, ExpandableVariant,
        FilterCategory, PersistTarget,
    };

    fn config() -> TableControlConfig {
        TableControlConfig::new("Advisories", "ad")
            .persist_to(PersistTarget::UrlParams)
            .column("identifier", "ID")
            .column("title", "Title")
            .column("severity", "Severity")
            .hidden_by_default("title")
            .filter(FilterCategory::search("", "Filter text"))
            .filter(FilterCategory::multiselect("severity", "Severity", Vec::new()))
            .sortable(&["identifier", "severity"])
            .initial_sort(ActiveSort::desc("identifier"))
            .paginated(10)
            .expandable(ExpandableVariant::Compound)
    }

    #[test]
    fn test_default_state_writes_nothing() {
        let config = config();
        let mut map = UrlParamMap::new();
        write_params(&config, &TableControlState::new(&config), &mut map);
        assert!(map.is_empty());
    }

    #[test]
    fn test_round_trip() {
        let config = config();
        let mut state = TableControlState::new(&config);
        state
            .set_filter_value(&config, "severity", Some(FilterValue::multi(["high", "critical"])))
            .unwrap();
        state
            .set_active_sort(&config, Some(ActiveSort::asc("severity")))
            .unwrap();
        state.set_items_per_page(&config, 20).unwrap();
        state.set_page_number(&config, 3).unwrap();
        state.set_column_visible("title", true).unwrap();
        state
            .set_cell_expanded(&config, "a1", "severity", true)
            .unwrap();

        let mut map = UrlParamMap::new();
        write_params(&config, &state, &mut map);
        assert_eq!(map.get("ad_sort").map(String::as_str), Some("severity:asc"));
        assert_eq!(map.get("ad_page").map(String::as_str), Some("3"));
        assert_eq!(map.get("ad_hidden").map(String::as_str), Some(""));

        assert_eq!(read_params(&config, &map), state);
    }

    #[test]
    fn test_cleared_sort_is_written_as_empty() {
        let config = config();
        let mut state = TableControlState::new(&config);
        state.set_active_sort(&config, None).unwrap();
        let mut map = UrlParamMap::new();
        write_params(&config, &state, &mut map);
        assert_eq!(map.get("ad_sort").map(String::as_str), Some(""));
        assert_eq!(read_params(&config, &map).active_sort, None);
    }

    #[test]
    fn test_other_prefixes_untouched() {
        let config = config();
        let mut map: UrlParamMap = [("sb_page".to_string(), "4".to_string())]
            .into_iter()
            .collect();
        let mut state = TableControlState::new(&config);
        state.set_page_number(&config, 2).unwrap();
        write_params(&config, &state, &mut map);
        clear_params(&config, &mut map);
        assert_eq!(map.len(), 1);
        assert_eq!(map.get("sb_page").map(String::as_str), Some("4"));
    }

    #[test]
    fn test_malformed_values_fall_back_per_field() {
        let config = config();
        let map: UrlParamMap = [
            ("ad_filters", r#"{"severity":{"kind":"multiSelect","values":["low"]},"":{"kind":"label"},"nope":{"kind":"string","value":"x"}}"#),
            ("ad_sort", "title:sideways"),
            ("ad_page", "0"),
            ("ad_pageSize", "abc"),
            ("ad_hidden", "identifier,title,severity"),
            ("ad_expanded", "not json"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

        let state = read_params(&config, &map);
        let defaults = TableControlState::new(&config);
        assert_eq!(state.filter_values.len(), 1);
        assert_eq!(state.filter_value("severity"), Some(&FilterValue::multi(["low"])));
        assert_eq!(state.active_sort, defaults.active_sort);
        assert_eq!(state.page, defaults.page);
        assert_eq!(state.columns, defaults.columns);
        assert!(state.expansion.is_empty());
    }

    #[test]
    fn test_page_past_addressable_offset_is_dropped() {
        let config = config();
        let map: UrlParamMap = [
            ("ad_page".to_string(), usize::MAX.to_string()),
            ("ad_pageSize".to_string(), "20".to_string()),
        ]
        .into_iter()
        .collect();

        let state = read_params(&config, &map);
        assert_eq!(state.page.page_number, 1);
        assert_eq!(state.page.items_per_page, 20);
        let params = get_hub_request_params(&config, &state);
        let pairs = serialize_request_params_for_hub(&params);
        assert!(pairs.contains(&("offset".to_string(), "0".to_string())));
    }

    #[test]
    fn test_query_string_keeps_foreign_segments() {
        let config = config();
        let mut state = TableControlState::new(&config);
        state.set_page_number(&config, 2).unwrap();

        let search = "?sb_page=4&x[0]=a&ad_page=7&q=a%26b";
        assert_eq!(read_query_string(&config, search).get("ad_page").map(String::as_str), Some("7"));

        let written = write_query_string(&config, &state, search);
        assert_eq!(written, "sb_page=4&x[0]=a&q=a%26b&ad_page=2");
        assert_eq!(read_query_string(&config, &written), {
            let mut map = UrlParamMap::new();
            write_params(&config, &state, &mut map);
            map
        });
    }

    #[test]
    fn test_query_string_round_trip_of_json_values() {
        let config = config();
        let mut state = TableControlState::new(&config);
        state
            .set_filter_value(&config, "", Some(FilterValue::text("a+b & [c] = d")))
            .unwrap();
        state
            .set_filter_value(&config, "severity", Some(FilterValue::multi(["high", "low|medium"])))
            .unwrap();
        state
            .set_cell_expanded(&config, "pkg:npm/%40x/y@1.0", "severity", true)
            .unwrap();

        let written = write_query_string(&config, &state, "");
        assert!(!written.contains(' '));
        assert_eq!(read_params(&config, &read_query_string(&config, &written)), state);
    }

    #[test]
    fn test_storage_blob() {
        let config = config().persist_to(PersistTarget::LocalStorage);
        let mut state = TableControlState::new(&config);
        state.set_page_number(&config, 2).unwrap();
        let blob = to_storage_blob(&config, &state).unwrap();
        assert_eq!(storage_key(&config), "ad_table_state_v1");
        assert_eq!(from_storage_blob(&config, &blob), state);
        assert_eq!(from_storage_blob(&config, "]["), TableControlState::new(&config));
    }
}
