pub mod state;

use contracts::domain::a003_advisory::dto::{AdvisorySummary, AdvisoryVulnerabilityRef};
use contracts::shared::hub::{HubPaginatedResult, HubRequestParams};
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::components::A;
use thaw::*;

use self::state::{accessors, create_table_config};
use crate::domain::a003_advisory::model::{delete_advisory, fetch_advisories};
use crate::shared::components::filter_toolbar::FilterToolbar;
use crate::shared::components::manage_columns::ManageColumns;
use crate::shared::components::pagination_controls::PaginationControls;
use crate::shared::components::table::{
    ConditionalTableBody, SortableHeaderCell, TableCellCheckbox, TableHeaderCheckbox,
};
use crate::shared::components::ui::badge::{Badge, LabelBadges, SeverityBadge};
use crate::shared::icons::icon;
use crate::shared::list_utils::confirm_action;
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_LIST;
use crate::shared::query::{use_query, QueryState};
use crate::shared::selection::BulkSelection;
use crate::shared::table_controls::{
    use_hub_table, use_table_control_state, SnapshotRow, TableControlsHandle, TableSnapshot,
};

const VULNERABILITIES_COLUMN: &str = "vulnerabilities";

#[derive(Clone, Copy)]
pub struct AdvisoryListData {
    pub handle: TableControlsHandle,
    pub params: Memo<HubRequestParams>,
    pub query: QueryState<HubPaginatedResult<AdvisorySummary>>,
    pub table: Memo<TableSnapshot<AdvisorySummary>>,
}

impl AdvisoryListData {
    pub fn total(&self) -> usize {
        self.table.with(|t| t.summary.total_item_count)
    }
}

pub fn use_advisory_list(is_selectable: bool) -> AdvisoryListData {
    let handle = use_table_control_state(create_table_config(is_selectable));
    let params = Memo::new(move |_| handle.hub_request_params());
    let query = use_query(move || params.get(), fetch_advisories);
    let table = use_hub_table(handle, accessors(), query);
    AdvisoryListData {
        handle,
        params,
        query,
        table,
    }
}

#[component]
pub fn AdvisoryList() -> impl IntoView {
    let data = use_advisory_list(true);
    let handle = data.handle;

    view! {
        <PageFrame page_id="a003_advisory--list" category=PAGE_CAT_LIST>
            <div class="page__header">
                <div class="page__header-left">
                    <h1 class="page__title">"Advisories"</h1>
                    <Badge variant="primary">{move || data.total().to_string()}</Badge>
                </div>
                <div class="page__header-right">
                    <Show when=move || { handle.selected_count() > 0 }>
                        <span class="page__selection">
                            {move || format!("{} selected", handle.selected_count())}
                        </span>
                    </Show>
                    <ManageColumns handle=handle />
                    <A href="/advisories/upload" attr:class="button button--primary">
                        {icon("upload")}
                        " Upload Advisory"
                    </A>
                </div>
            </div>
            <div class="page__content">
                <FilterToolbar handle=handle />
                <AdvisoryTable data=data />
            </div>
        </PageFrame>
    }
}

#[component]
pub fn VulnerabilityRefs(vulnerabilities: Vec<AdvisoryVulnerabilityRef>) -> impl IntoView {
    if vulnerabilities.is_empty() {
        return view! { <p class="table__expanded-empty">"No vulnerabilities"</p> }.into_any();
    }
    view! {
        <ul class="table__expanded-list">
            {vulnerabilities
                .into_iter()
                .map(|v| {
                    let href = format!("/vulnerabilities/{}", urlencoding::encode(&v.identifier));
                    view! {
                        <li>
                            <A href=href>{v.identifier.clone()}</A>
                            " "
                            <SeverityBadge severity=v.severity score=v.score />
                            <span class="table__expanded-title">{v.title.clone().unwrap_or_default()}</span>
                        </li>
                    }
                })
                .collect_view()}
        </ul>
    }
    .into_any()
}

#[component]
pub fn AdvisoryTable(data: AdvisoryListData) -> impl IntoView {
    let AdvisoryListData {
        handle,
        query,
        table,
        ..
    } = data;
    let selection = BulkSelection::new(|a: &AdvisorySummary| a.uuid.clone());
    let is_selectable = handle.config.with_value(|c| c.is_selection_enabled);

    let delete_error = RwSignal::new(None::<String>);
    let on_delete = move |id: String| {
        if !confirm_action("Delete this advisory? It cannot be recovered.") {
            return;
        }
        spawn_local(async move {
            match delete_advisory(&id).await {
                Ok(()) => {
                    delete_error.set(None);
                    handle.update_selection(|s| s.set_id_selected(&id, false));
                    query.refetch();
                }
                Err(e) => delete_error.set(Some(e.to_string())),
            }
        });
    };

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
    let colspan = move || summary.with(|s| s.num_rendered_columns).to_string();

    view! {
        <div class="list-table">
            <PaginationControls
                props=pagination
                on_page_change=on_page_change
                on_page_size_change=on_page_size_change
                compact=true
            />

            {move || delete_error.get().map(|err| view! { <div class="alert alert--error">{err}</div> })}

            <div class="table-wrapper">
                <Table attr:aria-label="Advisory table" attr:style="width: 100%;">
                    <TableHeader>
                        <TableRow>
                            <Show when=move || is_selectable>
                                <TableHeaderCheckbox
                                    state=Signal::derive(move || summary.with(|s| s.header_checkbox))
                                    on_change=toggle_page
                                />
                            </Show>
                            <Show when=visible("identifier")>
                                <SortableHeaderCell props=th("identifier") on_sort=on_sort min_width=160.0 />
                            </Show>
                            <Show when=visible("title")>
                                <SortableHeaderCell props=th("title") on_sort=on_sort min_width=260.0 />
                            </Show>
                            <Show when=visible("severity")>
                                <SortableHeaderCell props=th("severity") on_sort=on_sort />
                            </Show>
                            <Show when=visible("labels")>
                                <SortableHeaderCell props=th("labels") on_sort=on_sort />
                            </Show>
                            <Show when=visible(VULNERABILITIES_COLUMN)>
                                <SortableHeaderCell props=th(VULNERABILITIES_COLUMN) on_sort=on_sort />
                            </Show>
                            <TableHeaderCell min_width=60.0>""</TableHeaderCell>
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
                                let SnapshotRow { props, item: advisory } = row;
                                let id = StoredValue::new(props.item_id.clone());
                                let href = StoredValue::new(format!("/advisories/{}", urlencoding::encode(&props.item_id)));
                                let identifier = StoredValue::new(advisory.identifier.clone());
                                let title = StoredValue::new(advisory.title.clone().unwrap_or_default());
                                let severity = advisory.average_severity;
                                let score = advisory.average_score;
                                let labels = StoredValue::new(advisory.labels.clone());
                                let vulnerabilities = StoredValue::new(advisory.vulnerabilities.clone());
                                let vulnerability_count = advisory.vulnerabilities.len();

                                let is_expanded = Signal::derive(move || {
                                    handle.state.with(|s| {
                                        id.with_value(|id| s.expansion.is_cell_expanded(id, VULNERABILITIES_COLUMN))
                                    })
                                });
                                let toggle_expanded = move |_| {
                                    id.with_value(|id| {
                                        handle.set_cell_expanded(id, VULNERABILITIES_COLUMN, !is_expanded.get_untracked())
                                    })
                                };

                                view! {
                                    <TableRow attr:aria-selected=props.aria_selected.map(|s| s.to_string())>
                                        <Show when=move || is_selectable>
                                            <TableCellCheckbox
                                                item_id=id.get_value()
                                                checked=Signal::derive(move || {
                                                    handle.state.with(|s| id.with_value(|id| s.selection.is_id_selected(id)))
                                                })
                                                on_change=Callback::new(move |(id, checked): (String, bool)| {
                                                    handle.update_selection(|s| s.set_id_selected(&id, checked))
                                                })
                                            />
                                        </Show>
                                        <Show when=visible("identifier")>
                                            <TableCell attr:data-label="Identifier">
                                                <A href=href.get_value()>{identifier.get_value()}</A>
                                            </TableCell>
                                        </Show>
                                        <Show when=visible("title")>
                                            <TableCell attr:data-label="Title">
                                                <TableCellLayout truncate=true>{title.get_value()}</TableCellLayout>
                                            </TableCell>
                                        </Show>
                                        <Show when=visible("severity")>
                                            <TableCell attr:data-label="Severity">
                                                <SeverityBadge severity=severity score=score />
                                            </TableCell>
                                        </Show>
                                        <Show when=visible("labels")>
                                            <TableCell attr:data-label="Labels">
                                                <LabelBadges labels=labels.get_value() />
                                            </TableCell>
                                        </Show>
                                        <Show when=visible(VULNERABILITIES_COLUMN)>
                                            <TableCell attr:data-label="Vulnerabilities">
                                                <button
                                                    class="table__compound-toggle"
                                                    aria-expanded=move || is_expanded.get().to_string()
                                                    disabled=vulnerability_count == 0
                                                    on:click=toggle_expanded
                                                >
                                                    {format!("{} vulnerabilities", vulnerability_count)}
                                                </button>
                                            </TableCell>
                                        </Show>
                                        <TableCell>
                                            <Button
                                                appearance=ButtonAppearance::Subtle
                                                attr:aria-label="Delete"
                                                on_click=move |_| on_delete(id.get_value())
                                            >
                                                {icon("trash")}
                                            </Button>
                                        </TableCell>
                                    </TableRow>
                                    <Show when=move || is_expanded.get()>
                                        <TableRow class="table__row--expanded-content">
                                            <td colspan=colspan>
                                                <VulnerabilityRefs vulnerabilities=vulnerabilities.get_value() />
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
    }
}
