pub mod state;

use contracts::domain::a002_package::dto::PurlSummary;
use contracts::shared::hub::{HubPaginatedResult, HubRequestParams};
use leptos::prelude::*;
use leptos_router::components::A;
use thaw::*;

use self::state::{accessors, create_table_config, PackageCells};
use crate::domain::a002_package::model::fetch_packages;
use crate::shared::components::filter_toolbar::FilterToolbar;
use crate::shared::components::manage_columns::ManageColumns;
use crate::shared::components::pagination_controls::PaginationControls;
use crate::shared::components::table::{
    ConditionalTableBody, SortableHeaderCell, TableCellCheckbox, TableHeaderCheckbox,
};
use crate::shared::components::ui::badge::Badge;
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_LIST;
use crate::shared::query::{use_query, QueryState};
use crate::shared::selection::BulkSelection;
use crate::shared::table_controls::{
    use_hub_table, use_table_control_state, SnapshotRow, TableControlsHandle, TableSnapshot,
};

#[derive(Clone, Copy)]
pub struct PackageListData {
    pub handle: TableControlsHandle,
    pub params: Memo<HubRequestParams>,
    pub query: QueryState<HubPaginatedResult<PurlSummary>>,
    pub table: Memo<TableSnapshot<PurlSummary>>,
}

impl PackageListData {
    pub fn total(&self) -> usize {
        self.table.with(|t| t.summary.total_item_count)
    }
}

pub fn use_package_list(is_selectable: bool) -> PackageListData {
    let handle = use_table_control_state(create_table_config(is_selectable));
    let params = Memo::new(move |_| handle.hub_request_params());
    let query = use_query(move || params.get(), fetch_packages);
    let table = use_hub_table(handle, accessors(), query);
    PackageListData {
        handle,
        params,
        query,
        table,
    }
}

#[component]
pub fn PackageList() -> impl IntoView {
    let data = use_package_list(true);
    let handle = data.handle;

    view! {
        <PageFrame page_id="a002_package--list" category=PAGE_CAT_LIST>
            <div class="page__header">
                <div class="page__header-left">
                    <h1 class="page__title">"Packages"</h1>
                    <Badge variant="primary">{move || data.total().to_string()}</Badge>
                </div>
                <div class="page__header-right">
                    <Show when=move || { handle.selected_count() > 0 }>
                        <span class="page__selection">
                            {move || format!("{} selected", handle.selected_count())}
                        </span>
                    </Show>
                    <ManageColumns handle=handle />
                </div>
            </div>
            <div class="page__content">
                <FilterToolbar handle=handle />
                <PackageTable data=data />
            </div>
        </PageFrame>
    }
}

#[component]
pub fn PackageTable(data: PackageListData) -> impl IntoView {
    let PackageListData { handle, table, .. } = data;
    let selection = BulkSelection::new(|p: &PurlSummary| p.uuid.clone());
    let is_selectable = handle.config.with_value(|c| c.is_selection_enabled);

    let summary = Signal::derive(move || table.with(|t| t.summary.clone()));
    let pagination = Signal::derive(move || summary.with(|s| s.pagination.clone()));
    let on_page_change = Callback::new(move |p| handle.set_page_number(p));
    let on_page_size_change = Callback::new(move |n| handle.set_items_per_page(n));
    let toggle_page = Callback::new(move |check_all: bool| {
        let rows = table.with_untracked(|t| t.rows.iter().map(|r| r.item.clone()).collect::<Vec<_>>());
        handle.update_selection(|s| {
            if check_all {
                selection.select_page(s, &rows);
            } else {
                selection.deselect_page(s, &rows);
            }
        });
    });

    let th = move |key: &'static str| Signal::derive(move || handle.th_props(key));
    let on_sort = Callback::new(move |key: String| handle.on_sort_click(&key));
    let visible = move |key: &'static str| move || handle.state.with(|s| s.columns.is_visible(key));

    view! {
        <div class="list-table">
            <PaginationControls
                props=pagination
                on_page_change=on_page_change
                on_page_size_change=on_page_size_change
                compact=true
            />
            <div class="table-wrapper">
                <Table attr:aria-label="Package table" attr:style="width: 100%;">
                    <TableHeader>
                        <TableRow>
                            <Show when=move || is_selectable>
                                <TableHeaderCheckbox
                                    state=Signal::derive(move || summary.with(|s| s.header_checkbox))
                                    on_change=toggle_page
                                />
                            </Show>
                            <Show when=visible("name")>
                                <SortableHeaderCell props=th("name") on_sort=on_sort min_width=180.0 />
                            </Show>
                            <Show when=visible("namespace")>
                                <SortableHeaderCell props=th("namespace") on_sort=on_sort />
                            </Show>
                            <Show when=visible("version")>
                                <SortableHeaderCell props=th("version") on_sort=on_sort />
                            </Show>
                            <Show when=visible("type")>
                                <SortableHeaderCell props=th("type") on_sort=on_sort />
                            </Show>
                            <Show when=visible("path")>
                                <SortableHeaderCell props=th("path") on_sort=on_sort />
                            </Show>
                            <Show when=visible("qualifiers")>
                                <SortableHeaderCell props=th("qualifiers") on_sort=on_sort />
                            </Show>
                        </TableRow>
                    </TableHeader>
                    <ConditionalTableBody
                        is_loading=Signal::derive(move || summary.with(|s| s.is_loading))
                        fetch_error=Signal::derive(move || summary.with(|s| s.fetch_error.clone()))
                        is_no_data=Signal::derive(move || summary.with(|s| s.is_no_data))
                        num_rendered_columns=Signal::derive(move || summary.with(|s| s.num_rendered_columns))
                    >
                        <For
                            each=move || table.with(|t| t.rows.clone())
                            key=|row| row.props.item_id.clone()
                            children=move |row| {
                                let SnapshotRow { props, item } = row;
                                let id = props.item_id.clone();
                                let href = StoredValue::new(format!("/packages/{}", urlencoding::encode(&id)));
                                let cells = StoredValue::new(PackageCells::from_summary(&item));
                                let cell = move |f: fn(&PackageCells) -> String| cells.with_value(f);
                                view! {
                                    <TableRow attr:aria-selected=props.aria_selected.map(|s| s.to_string())>
                                        <Show when=move || is_selectable>
                                            <TableCellCheckbox
                                                item_id=id.clone()
                                                checked=Signal::derive({
                                                    let id = id.clone();
                                                    move || handle.state.with(|s| s.selection.is_id_selected(&id))
                                                })
                                                on_change=Callback::new(move |(id, checked): (String, bool)| {
                                                    handle.update_selection(|s| s.set_id_selected(&id, checked))
                                                })
                                            />
                                        </Show>
                                        <Show when=visible("name")>
                                            <TableCell attr:data-label="Name">
                                                <A href=href.get_value()>{cell(|c| c.name.clone())}</A>
                                            </TableCell>
                                        </Show>
                                        <Show when=visible("namespace")>
                                            <TableCell attr:data-label="Namespace">{cell(|c| c.namespace.clone())}</TableCell>
                                        </Show>
                                        <Show when=visible("version")>
                                            <TableCell attr:data-label="Version">{cell(|c| c.version.clone())}</TableCell>
                                        </Show>
                                        <Show when=visible("type")>
                                            <TableCell attr:data-label="Type">{cell(|c| c.purl_type.clone())}</TableCell>
                                        </Show>
                                        <Show when=visible("path")>
                                            <TableCell attr:data-label="Path">{cell(|c| c.path.clone())}</TableCell>
                                        </Show>
                                        <Show when=visible("qualifiers")>
                                            <TableCell attr:data-label="Qualifiers">
                                                {cells
                                                    .with_value(|c| c.qualifiers.clone())
                                                    .into_iter()
                                                    .map(|q| view! { <span class="badge badge--neutral">{q}</span> })
                                                    .collect_view()}
                                            </TableCell>
                                        </Show>
                                    </TableRow>
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
    }
}
