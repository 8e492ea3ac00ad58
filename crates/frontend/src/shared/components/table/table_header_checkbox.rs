//! Select-page checkbox in the table header
//!
//! ```rust,ignore
//! <TableHeaderCheckbox
//!     state=header_state
//!     on_change=Callback::new(move |check_all: bool| { ... })
//! />
//! ```

use crate::shared::selection::CheckboxState;
use leptos::prelude::*;
use thaw::*;

/// Three states: unchecked, checked, indeterminate.
/// `on_change(true)` selects the page, `on_change(false)` clears it.
#[component]
pub fn TableHeaderCheckbox(
    #[prop(into)] state: Signal<CheckboxState>,

    on_change: Callback<bool>,
) -> impl IntoView {
    let checkbox_ref = NodeRef::<leptos::html::Input>::new();

    // indeterminate only exists as a DOM property
    Effect::new(move |_| {
        let indeterminate = state.get() == CheckboxState::Indeterminate;
        if let Some(input) = checkbox_ref.get() {
            input.set_indeterminate(indeterminate);
        }
    });

    view! {
        <TableHeaderCell class="fixed-checkbox-column">
            <input
                node_ref=checkbox_ref
                type="checkbox"
                class="table__checkbox"
                aria-label="Select page"
                prop:checked=move || state.get() == CheckboxState::Checked
                on:change=move |ev| on_change.run(event_target_checked(&ev))
            />
        </TableHeaderCell>
    }
}
