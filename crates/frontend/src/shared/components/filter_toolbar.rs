//! Filter inputs, active filter chips and "clear all" for one table.
//!
//! One input is rendered per configured category, chosen by its filter type.
//! Every change goes through the handle, so the page resets to 1 and the
//! persisted state follows.

use std::collections::BTreeMap;

use gloo_timers::callback::Timeout;
use leptos::prelude::*;

use super::filter_panel::{FilterPanel, FilterTag};
use crate::shared::date_utils::parse_filter_date;
use crate::shared::list_utils::SearchInput;
use crate::shared::model_utils::split_string_as_key_value;
use crate::shared::table_controls::{
    FilterCategory, FilterChip, FilterSelectOption, FilterType, FilterValue, TableControlsHandle,
    FILTER_TEXT_CATEGORY_KEY,
};

pub const AUTOCOMPLETE_DEBOUNCE_MS: u32 = 400;

/// Options of async multiselect categories, by category key
pub type AsyncOptions = BTreeMap<String, Vec<FilterSelectOption>>;

fn set_filter(handle: TableControlsHandle, key: &str, value: Option<FilterValue>) {
    // rejected values are logged by the handle and leave the state untouched
    let _ = handle.set_filter_value(key, value);
}

#[component]
pub fn FilterToolbar(
    handle: TableControlsHandle,

    #[prop(optional, into)]
    async_options: Option<Signal<AsyncOptions>>,

    /// `key=value` suggestions for label categories
    #[prop(optional, into)]
    label_suggestions: Option<Signal<Vec<String>>>,

    #[prop(optional)]
    initially_expanded: bool,

    /// Leave out the free-text category when a shared search box drives it
    #[prop(optional)]
    omit_search: bool,
) -> impl IntoView {
    let categories = handle.config.with_value(|c| c.filter_categories.clone());
    let categories = categories
        .into_iter()
        .filter(|c| !(omit_search && c.category_key == FILTER_TEXT_CATEGORY_KEY));
    let is_expanded = RwSignal::new(initially_expanded);

    let active_count = Signal::derive(move || handle.state.with(|s| s.filter_values.len()));
    let chips = Signal::derive(move || {
        handle.with(|config, state| {
            state
                .filter_values
                .iter()
                .filter_map(|(key, value)| {
                    config
                        .filter_category(key)
                        .map(|category| (category.title.clone(), value.chips(category)))
                })
                .flat_map(|(title, chips)| chips.into_iter().map(move |chip| (title.clone(), chip)))
                .collect::<Vec<(String, FilterChip)>>()
        })
    });

    let controls = categories
        .map(|category| match category.filter_type {
            FilterType::Search => view! { <SearchFilter handle=handle category=category /> }.into_any(),
            FilterType::Multiselect => {
                let options = Signal::stored(category.select_options.clone());
                view! { <MultiselectFilter handle=handle category=category options=options /> }.into_any()
            }
            FilterType::AsyncMultiselect => {
                let key = category.category_key.clone();
                let options = Signal::derive(move || {
                    async_options
                        .map(|o| o.with(|map| map.get(&key).cloned().unwrap_or_default()))
                        .unwrap_or_default()
                });
                view! { <MultiselectFilter handle=handle category=category options=options /> }.into_any()
            }
            FilterType::DateRange => view! { <DateRangeFilter handle=handle category=category /> }.into_any(),
            FilterType::AutocompleteLabel => {
                let suggestions = Signal::derive(move || {
                    label_suggestions.map(|s| s.get()).unwrap_or_default()
                });
                view! { <LabelFilter handle=handle category=category suggestions=suggestions /> }.into_any()
            }
        })
        .collect_view();

    view! {
        <div class="filter-toolbar">
            <FilterPanel is_expanded=is_expanded active_filters_count=active_count>
                <div class="filter-toolbar__controls">{controls}</div>
            </FilterPanel>
            <Show when=move || { active_count.get() > 0 }>
                <div class="filter-toolbar__chips">
                    <For
                        each=move || chips.get()
                        key=|(_, chip)| (chip.category_key.clone(), chip.label.clone())
                        children=move |(title, chip)| {
                            let FilterChip { category_key, label, remaining } = chip;
                            view! {
                                <FilterTag
                                    category=title
                                    label=label
                                    on_remove=Callback::new(move |_| {
                                        set_filter(handle, &category_key, remaining.clone())
                                    })
                                />
                            }
                        }
                    />
                    <button class="button button--link" on:click=move |_| handle.clear_filters()>
                        "Clear all filters"
                    </button>
                </div>
            </Show>
        </div>
    }
}

#[component]
fn SearchFilter(handle: TableControlsHandle, category: FilterCategory) -> impl IntoView {
    let key = category.category_key.clone();
    let value = Signal::derive(move || match handle.filter_value(&key) {
        Some(FilterValue::String { value }) => value,
        _ => String::new(),
    });
    let key = category.category_key.clone();
    let on_change = Callback::new(move |text: String| {
        let value = (!text.trim().is_empty()).then(|| FilterValue::text(text));
        set_filter(handle, &key, value);
    });
    let placeholder = category
        .placeholder_text
        .clone()
        .unwrap_or_else(|| format!("Filter by {}", category.title.to_lowercase()));

    view! {
        <div class="filter-toolbar__item">
            <SearchInput value=value on_change=on_change placeholder=placeholder aria_label=category.title.clone() />
        </div>
    }
}

#[component]
fn MultiselectFilter(
    handle: TableControlsHandle,
    category: FilterCategory,
    #[prop(into)] options: Signal<Vec<FilterSelectOption>>,
) -> impl IntoView {
    let key = StoredValue::new(category.category_key.clone());
    let selected = Signal::derive(move || match handle.filter_value(&key.read_value()) {
        Some(FilterValue::MultiSelect { values }) => values,
        _ => Vec::new(),
    });

    let toggle = move |value: String, checked: bool| {
        let mut values = selected.get_untracked();
        if checked {
            values.push(value);
        } else {
            values.retain(|v| *v != value);
        }
        let next = (!values.is_empty()).then(|| FilterValue::multi(values));
        set_filter(handle, &key.read_value(), next);
    };

    let title = category.title.clone();
    view! {
        <details class="filter-toolbar__item filter-select">
            <summary class="filter-select__toggle">
                {title}
                <Show when=move || !selected.with(Vec::is_empty)>
                    <span class="badge badge--primary">{move || selected.with(Vec::len)}</span>
                </Show>
            </summary>
            <div class="filter-select__menu" role="listbox" aria-multiselectable="true">
                {move || {
                    let list = options.get();
                    if list.is_empty() {
                        return view! { <div class="filter-select__empty">"No options"</div> }.into_any();
                    }
                    list.into_iter()
                        .map(|option| {
                            let value = option.value.clone();
                            let value_for_checked = option.value.clone();
                            view! {
                                <label class="filter-select__option">
                                    <input
                                        type="checkbox"
                                        prop:checked=move || selected.with(|s| s.contains(&value_for_checked))
                                        on:change=move |ev| toggle(value.clone(), event_target_checked(&ev))
                                    />
                                    {option.label}
                                </label>
                            }
                        })
                        .collect_view()
                        .into_any()
                }}
            </div>
        </details>
    }
}

#[component]
fn DateRangeFilter(handle: TableControlsHandle, category: FilterCategory) -> impl IntoView {
    let key = StoredValue::new(category.category_key.clone());
    let range = Signal::derive(move || match handle.filter_value(&key.read_value()) {
        Some(FilterValue::DateRange { from, to }) => (from, to),
        _ => (None, None),
    });
    let error = RwSignal::new(None::<String>);

    let commit = move |from: Option<chrono::NaiveDate>, to: Option<chrono::NaiveDate>| {
        let value = FilterValue::DateRange { from, to };
        let next = (!value.is_empty()).then_some(value);
        match handle.set_filter_value(&key.read_value(), next) {
            Ok(()) => error.set(None),
            Err(_) => error.set(Some("The start date must not be after the end date".to_string())),
        }
    };
    let fmt = |d: Option<chrono::NaiveDate>| d.map(|d| d.format("%Y-%m-%d").to_string()).unwrap_or_default();

    view! {
        <div class="filter-toolbar__item filter-date-range">
            <span class="filter-date-range__title">{category.title.clone()}</span>
            <input
                type="date"
                aria-label="Interval start"
                prop:value=move || fmt(range.get().0)
                on:change=move |ev| commit(parse_filter_date(&event_target_value(&ev)), range.get_untracked().1)
            />
            <span>"to"</span>
            <input
                type="date"
                aria-label="Interval end"
                prop:value=move || fmt(range.get().1)
                on:change=move |ev| commit(range.get_untracked().0, parse_filter_date(&event_target_value(&ev)))
            />
            {move || error.get().map(|e| view! { <span class="filter-date-range__error">{e}</span> })}
        </div>
    }
}

#[component]
fn LabelFilter(
    handle: TableControlsHandle,
    category: FilterCategory,
    #[prop(into)] suggestions: Signal<Vec<String>>,
) -> impl IntoView {
    let key = StoredValue::new(category.category_key.clone());
    let input = RwSignal::new(String::new());
    let pending = StoredValue::new_local(None::<Timeout>);
    let list_id = format!("label-suggestions-{}", category.category_key);

    let commit = move |raw: String| {
        pending.set_value(None);
        let pair = split_string_as_key_value(&raw);
        if pair.key.is_empty() {
            return;
        }
        if set_filter_ok(handle, &key.read_value(), FilterValue::label(pair.key, pair.value)) {
            input.set(String::new());
        }
    };

    let on_input = move |raw: String| {
        input.set(raw.clone());
        // only complete pairs picked from the suggestions commit on their own
        if suggestions.with_untracked(|s| s.contains(&raw)) {
            pending.set_value(Some(Timeout::new(AUTOCOMPLETE_DEBOUNCE_MS, move || commit(raw))));
        }
    };

    let placeholder = category
        .placeholder_text
        .clone()
        .unwrap_or_else(|| "key=value".to_string());

    view! {
        <div class="filter-toolbar__item">
            <input
                type="text"
                class="search-input__field"
                list=list_id.clone()
                placeholder=placeholder
                aria-label=category.title.clone()
                prop:value=move || input.get()
                on:input=move |ev| on_input(event_target_value(&ev))
                on:keydown=move |ev| {
                    if ev.key() == "Enter" {
                        commit(input.get_untracked());
                    }
                }
            />
            <datalist id=list_id>
                {move || {
                    suggestions
                        .get()
                        .into_iter()
                        .map(|s| view! { <option value=s></option> })
                        .collect_view()
                }}
            </datalist>
        </div>
    }
}

fn set_filter_ok(handle: TableControlsHandle, key: &str, value: FilterValue) -> bool {
    handle.set_filter_value(key, Some(value)).is_ok()
}
