//! Small list page helpers: debounced search box, confirm dialog, sort indicator
use contracts::shared::hub::SortDirection;
use gloo_timers::callback::Timeout;
use leptos::prelude::*;

pub const SEARCH_DEBOUNCE_MS: u32 = 300;

/// Search box that reports its value after typing pauses
#[component]
pub fn SearchInput(
    /// Committed value, shown when it changes from outside (chip removed, clear all)
    #[prop(into)]
    value: Signal<String>,
    #[prop(into)]
    on_change: Callback<String>,
    #[prop(optional, into)]
    placeholder: String,
    #[prop(optional, into)]
    aria_label: String,
) -> impl IntoView {
    let placeholder = if placeholder.is_empty() {
        "Search".to_string()
    } else {
        placeholder
    };

    let (input_value, set_input_value) = signal(value.get_untracked());
    let pending = StoredValue::new_local(None::<Timeout>);

    Effect::new(move |_| {
        set_input_value.set(value.get());
    });

    let handle_input_change = move |new_value: String| {
        set_input_value.set(new_value.clone());
        // Dropping a Timeout cancels it
        pending.set_value(Some(Timeout::new(SEARCH_DEBOUNCE_MS, move || {
            on_change.run(new_value);
        })));
    };

    let clear = move |_| {
        pending.set_value(None);
        set_input_value.set(String::new());
        on_change.run(String::new());
    };

    view! {
        <div class="search-input">
            <input
                type="search"
                class="search-input__field"
                class:search-input__field--active=move || !value.get().trim().is_empty()
                placeholder=placeholder
                aria-label=aria_label
                prop:value=move || input_value.get()
                on:input=move |ev| handle_input_change(event_target_value(&ev))
                on:keydown=move |ev| {
                    if ev.key() == "Enter" {
                        pending.set_value(None);
                        on_change.run(input_value.get_untracked());
                    }
                }
            />
            <Show when=move || !input_value.get().is_empty()>
                <button class="search-input__clear" on:click=clear title="Clear">
                    {crate::shared::icons::icon("x")}
                </button>
            </Show>
        </div>
    }
}

/// Browser confirmation dialog; false when there is no window
pub fn confirm_action(message: &str) -> bool {
    web_sys::window()
        .and_then(|w| w.confirm_with_message(message).ok())
        .unwrap_or(false)
}

/// Sort indicator for a column header
pub fn get_sort_indicator(direction: Option<SortDirection>) -> &'static str {
    match direction {
        Some(SortDirection::Asc) => " ▲",
        Some(SortDirection::Desc) => " ▼",
        None => " ⇅",
    }
}

pub fn get_sort_class(direction: Option<SortDirection>) -> &'static str {
    if direction.is_some() {
        "table__sort-indicator table__sort-indicator--active"
    } else {
        "table__sort-indicator"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sort_indicator() {
        assert_eq!(get_sort_indicator(Some(SortDirection::Asc)), " ▲");
        assert_eq!(get_sort_indicator(Some(SortDirection::Desc)), " ▼");
        assert_eq!(get_sort_indicator(None), " ⇅");
        assert_eq!(get_sort_class(None), "table__sort-indicator");
    }
}
