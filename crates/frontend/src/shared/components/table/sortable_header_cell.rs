//! Header cell for a table column.
//!
//! ```rust,ignore
//! <SortableHeaderCell
//!     props=Signal::derive(move || handle.th_props("name"))
//!     on_sort=Callback::new(move |key: String| handle.on_sort_click(&key))
//! />
//! ```

use crate::shared::list_utils::{get_sort_class, get_sort_indicator};
use crate::shared::table_controls::ThProps;
use leptos::prelude::*;
use thaw::*;

/// Renders the label, and for sortable columns the sort indicator and
/// `aria-sort`. Clicking a sortable header runs `on_sort` with its key.
#[component]
pub fn SortableHeaderCell(
    #[prop(into)] props: Signal<ThProps>,

    on_sort: Callback<String>,

    #[prop(optional, default = 100.0)]
    min_width: f64,

    /// left/right
    #[prop(optional, default = "left")]
    align: &'static str,
) -> impl IntoView {
    let handle_click = move |_| {
        let (key, sortable) = props.with_untracked(|p| (p.column_key.clone(), p.is_sortable));
        if sortable {
            on_sort.run(key);
        }
    };

    let header_style = if align == "right" {
        "justify-content: flex-end; padding-right: 12px;"
    } else {
        "padding-right: 12px;"
    };

    view! {
        <TableHeaderCell min_width=min_width>
            <div
                class="table__sortable-header"
                class:table__sortable-header--clickable=move || props.with(|p| p.is_sortable)
                style=header_style
                aria-sort=move || props.with(|p| p.aria_sort.map(|a| a.as_str()))
                on:click=handle_click
            >
                {move || props.with(|p| p.label.clone())}
                <Show when=move || props.with(|p| p.is_sortable)>
                    <span class=move || props.with(|p| get_sort_class(p.active_direction))>
                        {move || props.with(|p| get_sort_indicator(p.active_direction))}
                    </span>
                </Show>
            </div>
        </TableHeaderCell>
    }
}
