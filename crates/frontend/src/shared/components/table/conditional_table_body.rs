use leptos::prelude::*;
use thaw::*;

/// Table body that swaps its rows for a loading, error or empty row
#[component]
pub fn ConditionalTableBody(
    /// True while nothing has been fetched yet; refetches keep the old rows
    #[prop(into)]
    is_loading: Signal<bool>,

    /// Message of the last failed fetch
    #[prop(into)]
    fetch_error: Signal<Option<String>>,

    #[prop(into)] is_no_data: Signal<bool>,

    #[prop(into)] num_rendered_columns: Signal<usize>,

    #[prop(optional, into)]
    no_data_message: Option<String>,

    children: ChildrenFn,
) -> impl IntoView {
    let no_data_message = no_data_message.unwrap_or_else(|| "No results found".to_string());
    let colspan = move || num_rendered_columns.get().to_string();

    view! {
        <TableBody>
            {move || {
                if let Some(error) = fetch_error.get() {
                    view! {
                        <tr class="table__state-row table__state-row--error">
                            <td colspan=colspan>
                                <div class="table__state">
                                    <strong>"Unable to load data"</strong>
                                    <span>{error}</span>
                                </div>
                            </td>
                        </tr>
                    }
                        .into_any()
                } else if is_loading.get() {
                    view! {
                        <tr class="table__state-row">
                            <td colspan=colspan>
                                <div class="table__state">"Loading..."</div>
                            </td>
                        </tr>
                    }
                        .into_any()
                } else if is_no_data.get() {
                    let message = no_data_message.clone();
                    view! {
                        <tr class="table__state-row">
                            <td colspan=colspan>
                                <div class="table__state">{message}</div>
                            </td>
                        </tr>
                    }
                        .into_any()
                } else {
                    children().into_any()
                }
            }}
        </TableBody>
    }
}
