//! Row selection checkbox
//!
//! ```rust,ignore
//! <TableCellCheckbox
//!     item_id=row_id.clone()
//!     checked=Signal::derive(move || handle.state.with(|s| s.selection.is_id_selected(&id)))
//!     on_change=Callback::new(move |(id, checked)| { ... })
//! />
//! ```

use leptos::prelude::*;
use thaw::*;

/// Stops click propagation so a row click handler does not fire too
#[component]
pub fn TableCellCheckbox(
    #[prop(into)] item_id: String,

    #[prop(into)] checked: Signal<bool>,

    /// (item_id, checked)
    on_change: Callback<(String, bool)>,
) -> impl IntoView {
    let label = format!("Select row {}", item_id);

    view! {
        <TableCell class="fixed-checkbox-column" on:click=|e| e.stop_propagation()>
            <input
                type="checkbox"
                class="table__checkbox"
                aria-label=label
                prop:checked=move || checked.get()
                on:change=move |ev| {
                    on_change.run((item_id.clone(), event_target_checked(&ev)));
                }
            />
        </TableCell>
    }
}
