use leptos::prelude::*;
use thaw::*;

use crate::shared::icons::icon;
use crate::shared::table_controls::TableControlsHandle;

/// Column visibility menu. The last visible column cannot be unchecked.
#[component]
pub fn ManageColumns(handle: TableControlsHandle) -> impl IntoView {
    let is_open = RwSignal::new(false);
    let columns = StoredValue::new(handle.config.with_value(|c| c.columns.clone()));

    let rows = move || {
        columns
            .get_value()
            .into_iter()
            .map(|column| {
                let key = StoredValue::new(column.key.clone());
                let visible = Signal::derive(move || {
                    handle.state.with(|s| s.columns.is_visible(&key.read_value()))
                });
                let is_last = Signal::derive(move || {
                    visible.get() && handle.state.with(|s| s.columns.visible_count() == 1)
                });
                view! {
                    <label class="manage-columns__option">
                        <input
                            type="checkbox"
                            prop:checked=move || visible.get()
                            disabled=move || is_last.get()
                            on:change=move |ev| {
                                let _ = handle.set_column_visible(&key.read_value(), event_target_checked(&ev));
                            }
                        />
                        {column.label}
                    </label>
                }
            })
            .collect_view()
    };

    view! {
        <div class="manage-columns">
            <Button
                appearance=ButtonAppearance::Subtle
                on_click=move |_| is_open.update(|o| *o = !*o)
            >
                {icon("columns")}
                " Manage columns"
            </Button>
            <Show when=move || is_open.get()>
                <div class="manage-columns__menu" role="dialog" aria-label="Manage columns">
                    <p class="manage-columns__hint">"Selected columns will be displayed in the table."</p>
                    {rows}
                    <div class="manage-columns__actions">
                        <Button appearance=ButtonAppearance::Secondary on_click=move |_| handle.reset_columns()>
                            "Restore defaults"
                        </Button>
                        <Button appearance=ButtonAppearance::Primary on_click=move |_| is_open.set(false)>
                            "Close"
                        </Button>
                    </div>
                </div>
            </Show>
        </div>
    }
}
