use crate::shared::icons::icon;
use leptos::prelude::*;

/// Collapsible filter panel; children are the filter inputs
#[component]
pub fn FilterPanel(
    is_expanded: RwSignal<bool>,

    /// Shown as a badge next to the title
    #[prop(into)]
    active_filters_count: Signal<usize>,

    children: Children,
) -> impl IntoView {
    let toggle_expanded = move |_| {
        is_expanded.update(|e| *e = !*e);
    };

    view! {
        <div class="filter-panel">
            <div class="filter-panel-header">
                <div
                    class="filter-panel-header__left"
                    role="button"
                    aria-expanded=move || is_expanded.get().to_string()
                    on:click=toggle_expanded
                >
                    <span
                        class="filter-panel__chevron"
                        class:filter-panel__chevron--expanded=move || is_expanded.get()
                    >
                        {icon("chevron-down")}
                    </span>
                    {icon("filter")}
                    <span class="filter-panel__title">"Filters"</span>
                    <Show when=move || { active_filters_count.get() > 0 }>
                        <span class="badge badge--primary">{move || active_filters_count.get()}</span>
                    </Show>
                </div>
            </div>

            <div
                class="filter-panel__collapsible"
                class:filter-panel__collapsible--expanded=move || is_expanded.get()
                class:filter-panel__collapsible--collapsed=move || !is_expanded.get()
            >
                <div class="filter-panel-content">{children()}</div>
            </div>
        </div>
    }
}

/// Removable chip of one active filter part
#[component]
pub fn FilterTag(
    #[prop(into)] category: String,

    #[prop(into)] label: String,

    on_remove: Callback<()>,
) -> impl IntoView {
    let aria = format!("Remove filter {}: {}", category, label);
    view! {
        <div class="filter-tag">
            <span class="filter-tag__category">{category}</span>
            <span>{label}</span>
            <button
                class="filter-tag__remove"
                aria-label=aria
                on:click=move |e| {
                    e.stop_propagation();
                    on_remove.run(());
                }
            >
                {icon("x")}
            </button>
        </div>
    }
}
