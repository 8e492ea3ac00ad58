pub mod state;

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::components::A;
use thaw::*;

use self::state::{accessors, create_table_config, items_imported, state_label, state_variant};
use crate::domain::a005_importer::model::{delete_importer, fetch_importers};
use crate::shared::components::filter_toolbar::FilterToolbar;
use crate::shared::components::pagination_controls::PaginationControls;
use crate::shared::components::table::{ConditionalTableBody, SortableHeaderCell};
use crate::shared::components::ui::badge::Badge;
use crate::shared::date_utils::format_datetime;
use crate::shared::icons::icon;
use crate::shared::list_utils::confirm_action;
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_LIST;
use crate::shared::query::use_query;
use crate::shared::table_controls::{use_local_table, use_table_control_state, SnapshotRow};

fn optional_datetime(value: Option<&String>) -> String {
    value.map(|v| format_datetime(v)).unwrap_or_default()
}

#[component]
pub fn ImporterList() -> impl IntoView {
    let handle = use_table_control_state(create_table_config());
    let query = use_query(|| (), |_| fetch_importers());
    let table = use_local_table(handle, accessors(), query);

    let delete_error = RwSignal::new(None::<String>);
    let on_delete = move |name: String| {
        if !confirm_action(&format!("Are you sure you want to delete the Importer {}?", name)) {
            return;
        }
        spawn_local(async move {
            match delete_importer(&name).await {
                Ok(()) => {
                    delete_error.set(None);
                    query.refetch();
                }
                Err(e) => {
                    log::warn!("delete importer {} failed: {}", name, e);
                    delete_error.set(Some(e.to_string()));
                }
            }
        });
    };

    let summary = Signal::derive(move || table.with(|t| t.summary.clone()));
    let pagination = Signal::derive(move || summary.with(|s| s.pagination.clone()));
    let on_page_change = Callback::new(move |p| handle.set_page_number(p));
    let on_page_size_change = Callback::new(move |n| handle.set_items_per_page(n));
    let th = move |key: &'static str| Signal::derive(move || handle.th_props(key));
    let on_sort = Callback::new(move |key: String| handle.on_sort_click(&key));
    let colspan = move || summary.with(|s| s.num_rendered_columns).to_string();

    view! {
        <PageFrame page_id="a005_importer--list" category=PAGE_CAT_LIST>
            <div class="page__header">
                <div class="page__header-left">
                    <h1 class="page__title">"Importers"</h1>
                    <Badge variant="primary">{move || summary.with(|s| s.total_item_count).to_string()}</Badge>
                </div>
                <div class="page__header-right">
                    <A href="/importers/create" attr:class="button button--primary">
                        {icon("plus")}
                        " Create Importer"
                    </A>
                </div>
            </div>
            <div class="page__content">
                <FilterToolbar handle=handle />

                {move || delete_error.get().map(|err| view! { <div class="alert alert--error">{err}</div> })}

                <div class="table-wrapper">
                    <Table attr:aria-label="Importer table" attr:style="width: 100%;">
                        <TableHeader>
                            <TableRow>
                                <TableHeaderCell min_width=40.0>""</TableHeaderCell>
                                <SortableHeaderCell props=th("name") on_sort=on_sort min_width=180.0 />
                                <SortableHeaderCell props=th("type") on_sort=on_sort />
                                <SortableHeaderCell props=th("description") on_sort=on_sort min_width=220.0 />
                                <SortableHeaderCell props=th("state") on_sort=on_sort />
                                <SortableHeaderCell props=th("start") on_sort=on_sort />
                                <SortableHeaderCell props=th("end") on_sort=on_sort />
                                <SortableHeaderCell props=th("itemsImported") on_sort=on_sort />
                                <TableHeaderCell min_width=60.0>""</TableHeaderCell>
                            </TableRow>
                        </TableHeader>
                        <ConditionalTableBody
                            is_loading=Signal::derive(move || summary.with(|s| s.is_loading))
                            fetch_error=Signal::derive(move || summary.with(|s| s.fetch_error.clone()))
                            is_no_data=Signal::derive(move || summary.with(|s| s.is_no_data))
                            num_rendered_columns=Signal::derive(move || summary.with(|s| s.num_rendered_columns))
                            no_data_message="No importers are configured"
                        >
                            <For
                                each=move || table.with(|t| t.rows.clone())
                                key=|row| row.props.item_id.clone()
                                children=move |row| {
                                    let SnapshotRow { props, item } = row;
                                    let name = StoredValue::new(props.item_id.clone());
                                    let is_expanded = Signal::derive(move || {
                                        handle.state.with(|s| name.with_value(|n| s.expansion.is_row_expanded(n)))
                                    });
                                    let values = item.configuration_values().cloned().unwrap_or_default();
                                    let description = values.description.unwrap_or_default();
                                    let source = StoredValue::new(values.source.unwrap_or_default());
                                    let period = StoredValue::new(values.period.unwrap_or_default());
                                    let last_error = StoredValue::new(item.last_error.clone());
                                    let edit_href = format!("/importers/{}/edit", urlencoding::encode(&item.name));
                                    let item_name = item.name.clone();
                                    let type_name = item.importer_type().map(|t| t.display_name()).unwrap_or_default();
                                    let variant = state_variant(&item);
                                    let label = state_label(&item);
                                    let start = optional_datetime(item.last_run.as_ref());
                                    let end = optional_datetime(item.last_success.as_ref());
                                    let imported = items_imported(&item);
                                    view! {
                                        <TableRow>
                                            <TableCell>
                                                <button
                                                    class="table__expand-toggle"
                                                    aria-label="Details"
                                                    aria-expanded=move || is_expanded.get().to_string()
                                                    on:click=move |_| name.with_value(|n| handle.toggle_row_expanded(n))
                                                >
                                                    {move || icon(if is_expanded.get() { "chevron-down" } else { "chevron-right" })}
                                                </button>
                                            </TableCell>
                                            <TableCell attr:data-label="Name">{item_name}</TableCell>
                                            <TableCell attr:data-label="Type">
                                                {type_name}
                                            </TableCell>
                                            <TableCell attr:data-label="Description">
                                                <TableCellLayout truncate=true>
                                                    {description}
                                                </TableCellLayout>
                                            </TableCell>
                                            <TableCell attr:data-label="State">
                                                <Badge variant=variant>{label}</Badge>
                                            </TableCell>
                                            <TableCell attr:data-label="Start">{start}</TableCell>
                                            <TableCell attr:data-label="End">{end}</TableCell>
                                            <TableCell attr:data-label="Items imported">{imported}</TableCell>
                                            <TableCell>
                                                <A href=edit_href attr:class="button button--subtle" attr:aria-label="Edit">
                                                    {icon("edit")}
                                                </A>
                                                <Button
                                                    appearance=ButtonAppearance::Subtle
                                                    attr:aria-label="Delete"
                                                    on_click=move |_| on_delete(name.get_value())
                                                >
                                                    {icon("trash")}
                                                </Button>
                                            </TableCell>
                                        </TableRow>
                                        <Show when=move || is_expanded.get()>
                                            <TableRow class="table__row--expanded-content">
                                                <td colspan=colspan>
                                                    <dl class="details__list">
                                                        <dt>"Source"</dt>
                                                        <dd>{source.get_value()}</dd>
                                                        <dt>"Period"</dt>
                                                        <dd>{period.get_value()}</dd>
                                                    </dl>
                                                    {last_error.get_value().map(|err| view! {
                                                        <div class="alert alert--error">{err}</div>
                                                    })}
                                                </td>
                                            </TableRow>
                                        </Show>
                                    }
                                }
                            />
                        </ConditionalTableBody>
                    </Table>
                </div>

                <PaginationControls
                    props=pagination
                    on_page_change=on_page_change
                    on_page_size_change=on_page_size_change
                />
            </div>
        </PageFrame>
    }
}
