pub mod state;

use contracts::domain::a004_vulnerability::dto::VulnerabilitySummary;
use contracts::shared::hub::{HubPaginatedResult, HubRequestParams};
use leptos::prelude::*;
use leptos_router::components::A;
use thaw::*;

use self::state::{accessors, create_table_config};
use crate::domain::a004_vulnerability::model::fetch_vulnerabilities;
use crate::shared::components::filter_toolbar::FilterToolbar;
use crate::shared::components::manage_columns::ManageColumns;
use crate::shared::components::pagination_controls::PaginationControls;
use crate::shared::components::table::{
    ConditionalTableBody, SortableHeaderCell, TableCellCheckbox, TableHeaderCheckbox,
};
use crate::shared::components::ui::badge::{Badge, SeverityBadge};
use crate::shared::date_utils::format_optional_date;
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_LIST;
use crate::shared::query::{use_query, QueryState};
use crate::shared::selection::BulkSelection;
use crate::shared::table_controls::{
    use_hub_table, use_table_control_state, SnapshotRow, TableControlsHandle, TableSnapshot,
};

#[derive(Clone, Copy)]
pub struct VulnerabilityListData {
    pub handle: TableControlsHandle,
    pub params: Memo<HubRequestParams>,
    pub query: QueryState<HubPaginatedResult<VulnerabilitySummary>>,
    pub table: Memo<TableSnapshot<VulnerabilitySummary>>,
}

impl VulnerabilityListData {
    pub fn total(&self) -> usize {
        self.table.with(|t| t.summary.total_item_count)
    }
}

pub fn use_vulnerability_list(is_selectable: bool) -> VulnerabilityListData {
    let handle = use_table_control_state(create_table_config(is_selectable));
    let params = Memo::new(move |_| handle.hub_request_params());
    let query = use_query(move || params.get(), fetch_vulnerabilities);
    let table = use_hub_table(handle, accessors(), query);
    VulnerabilityListData {
        handle,
        params,
        query,
        table,
    }
}

#[component]
pub fn VulnerabilityList() -> impl IntoView {
    let data = use_vulnerability_list(true);
    let handle = data.handle;

    view! {
        <PageFrame page_id="a004_vulnerability--list" category=PAGE_CAT_LIST>
            <div class="page__header">
                <div class="page__header-left">
                    <h1 class="page__title">"Vulnerabilities"</h1>
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
                <VulnerabilityTable data=data />
            </div>
        </PageFrame>
    }
}

#[component]
pub fn VulnerabilityTable(data: VulnerabilityListData) -> impl IntoView {
    let VulnerabilityListData { handle, table, .. } = data;
    let selection = BulkSelection::new(|v: &VulnerabilitySummary| v.identifier.clone());
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
                <Table attr:aria-label="Vulnerability table" attr:style="width: 100%;">
                    <TableHeader>
                        <TableRow>
                            <Show when=move || is_selectable>
                                <TableHeaderCheckbox
                                    state=Signal::derive(move || summary.with(|s| s.header_checkbox))
                                    on_change=toggle_page
                                />
                            </Show>
                            <Show when=visible("identifier")>
                                <SortableHeaderCell props=th("identifier") on_sort=on_sort min_width=150.0 />
                            </Show>
                            <Show when=visible("title")>
                                <SortableHeaderCell props=th("title") on_sort=on_sort min_width=260.0 />
                            </Show>
                            <Show when=visible("severity")>
                                <SortableHeaderCell props=th("severity") on_sort=on_sort />
                            </Show>
                            <Show when=visible("published")>
                                <SortableHeaderCell props=th("published") on_sort=on_sort />
                            </Show>
                            <Show when=visible("cwes")>
                                <SortableHeaderCell props=th("cwes") on_sort=on_sort />
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
                                let SnapshotRow { props, item: vuln } = row;
                                let id = props.item_id.clone();
                                let id_text = StoredValue::new(id.clone());
                                let href = StoredValue::new(format!("/vulnerabilities/{}", urlencoding::encode(&id)));
                                let title = StoredValue::new(vuln.title.clone().or_else(|| vuln.description.clone()).unwrap_or_default());
                                let severity = vuln.severity();
                                let score = vuln.average_score;
                                let published = StoredValue::new(format_optional_date(vuln.published.as_deref()));
                                let cwes = StoredValue::new(vuln.cwes.join(", "));
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
                                        <Show when=visible("identifier")>
                                            <TableCell attr:data-label="ID"><A href=href.get_value()>{id_text.get_value()}</A></TableCell>
                                        </Show>
                                        <Show when=visible("title")>
                                            <TableCell attr:data-label="Title">
                                                <TableCellLayout truncate=true>{title.get_value()}</TableCellLayout>
                                            </TableCell>
                                        </Show>
                                        <Show when=visible("severity")>
                                            <TableCell attr:data-label="CVSS">
                                                <SeverityBadge severity=severity score=score />
                                            </TableCell>
                                        </Show>
                                        <Show when=visible("published")>
                                            <TableCell attr:data-label="Date published">{published.get_value()}</TableCell>
                                        </Show>
                                        <Show when=visible("cwes")>
                                            <TableCell attr:data-label="CWE">{cwes.get_value()}</TableCell>
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
