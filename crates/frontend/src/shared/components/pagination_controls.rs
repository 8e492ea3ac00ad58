use crate::shared::icons::icon;
use crate::shared::table_controls::PaginationProps;
use leptos::prelude::*;

/// Pagination bar: range text, first/previous/next/last and page size.
///
/// Pages are 1-based, matching the table state.
#[component]
pub fn PaginationControls(
    #[prop(into)] props: Signal<PaginationProps>,

    /// Callback with the requested page number
    on_page_change: Callback<usize>,

    /// Callback with the requested page size
    on_page_size_change: Callback<usize>,

    /// Compact variant shown above the table
    #[prop(optional)]
    compact: bool,
) -> impl IntoView {
    let go_to = move |page: usize| on_page_change.run(page.max(1));

    view! {
        <div class="pagination-controls" class:pagination-controls--compact=compact>
            <span class="pagination-info">{move || props.with(|p| p.range_text())}</span>
            <button
                class="pagination-btn"
                on:click=move |_| go_to(1)
                disabled=move || !props.with(|p| p.has_previous)
                title="First page"
                aria-label="Go to first page"
            >
                {icon("chevrons-left")}
            </button>
            <button
                class="pagination-btn"
                on:click=move |_| go_to(props.with_untracked(|p| p.page.saturating_sub(1)))
                disabled=move || !props.with(|p| p.has_previous)
                title="Previous page"
                aria-label="Go to previous page"
            >
                {icon("chevron-left")}
            </button>
            <span class="pagination-info">
                {move || props.with(|p| format!("{} / {}", p.page, p.total_pages.max(1)))}
            </span>
            <button
                class="pagination-btn"
                on:click=move |_| go_to(props.with_untracked(|p| p.page + 1))
                disabled=move || !props.with(|p| p.has_next)
                title="Next page"
                aria-label="Go to next page"
            >
                {icon("chevron-right")}
            </button>
            <button
                class="pagination-btn"
                on:click=move |_| go_to(props.with_untracked(|p| p.total_pages))
                disabled=move || !props.with(|p| p.has_next)
                title="Last page"
                aria-label="Go to last page"
            >
                {icon("chevrons-right")}
            </button>
            <Show when=move || !compact>
                <select
                    class="page-size-select"
                    aria-label="Items per page"
                    on:change=move |ev| {
                        if let Ok(size) = event_target_value(&ev).parse::<usize>() {
                            on_page_size_change.run(size);
                        }
                    }
                    prop:value=move || props.with(|p| p.per_page.to_string())
                >
                    {move || {
                        props.with(|p| {
                            let current = p.per_page;
                            p.per_page_options
                                .iter()
                                .map(|&size| {
                                    view! {
                                        <option value=size.to_string() selected=size == current>
                                            {format!("{} per page", size)}
                                        </option>
                                    }
                                })
                                .collect_view()
                        })
                    }}
                </select>
            </Show>
        </div>
    }
}
