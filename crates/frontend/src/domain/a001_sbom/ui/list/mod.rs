pub mod state;

use contracts::domain::a001_sbom::dto::SbomSummary;
use contracts::shared::hub::{HubPaginatedResult, HubRequestParams};
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::components::A;
use thaw::*;

use self::state::{accessors, create_table_config, PACKAGE_SBOMS_TABLE_PREFIX};
use crate::domain::a001_sbom::model::{
    delete_sbom, fetch_licenses, fetch_sbom_labels, fetch_sboms, fetch_sboms_by_package,
};
use crate::shared::components::filter_toolbar::{AsyncOptions, FilterToolbar};
use crate::shared::components::manage_columns::ManageColumns;
use crate::shared::components::pagination_controls::PaginationControls;
use crate::shared::components::table::{
    ConditionalTableBody, SortableHeaderCell, TableCellCheckbox, TableHeaderCheckbox,
};
use crate::shared::components::ui::badge::{Badge, LabelBadges};
use crate::shared::date_utils::format_optional_date;
use crate::shared::icons::icon;
use crate::shared::list_utils::confirm_action;
use crate::shared::model_utils::join_key_value_as_string;
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_LIST;
use crate::shared::query::{use_query, QueryState};
use crate::shared::selection::BulkSelection;
use crate::shared::table_controls::{
    serialize_filters_for_hub, use_hub_table, use_table_control_state, FilterSelectOption,
    SnapshotRow, TableControlConfig, TableControlsHandle, TableSnapshot,
};

/// Table state, fetch and derived rows of one SBOM table
#[derive(Clone, Copy)]
pub struct SbomListData {
    pub handle: TableControlsHandle,
    pub params: Memo<HubRequestParams>,
    pub query: QueryState<HubPaginatedResult<SbomSummary>>,
    pub table: Memo<TableSnapshot<SbomSummary>>,
}

impl SbomListData {
    pub fn total(&self) -> usize {
        self.table.with(|t| t.summary.total_item_count)
    }
}

pub fn use_sbom_list(is_selectable: bool) -> SbomListData {
    let handle = use_table_control_state(create_table_config(is_selectable));
    let params = Memo::new(move |_| handle.hub_request_params());
    let query = use_query(move || params.get(), fetch_sboms);
    let table = use_hub_table(handle, accessors(), query);
    SbomListData {
        handle,
        params,
        query,
        table,
    }
}

/// SBOMs that contain one package, in a table of their own
pub fn use_sboms_by_package(package_id: String) -> SbomListData {
    let config = TableControlConfig {
        table_name: "package-sboms".to_string(),
        persistence_key_prefix: PACKAGE_SBOMS_TABLE_PREFIX.to_string(),
        ..create_table_config(false)
    };
    let handle = use_table_control_state(config);
    let params = Memo::new(move |_| handle.hub_request_params());
    let query = use_query(
        move || (package_id.clone(), params.get()),
        |(id, params)| fetch_sboms_by_package(id, params),
    );
    let table = use_hub_table(handle, accessors(), query);
    SbomListData {
        handle,
        params,
        query,
        table,
    }
}

/// License options and label suggestions for the SBOM filters
pub fn use_sbom_filter_options() -> (Signal<AsyncOptions>, Signal<Vec<String>>) {
    let licenses = use_query(String::new, fetch_licenses);
    let async_options = Signal::derive(move || {
        let options = licenses.data.with(|d| {
            d.iter()
                .flatten()
                .map(|l| FilterSelectOption::new(l.license.clone(), l.license.clone()))
                .collect::<Vec<_>>()
        });
        AsyncOptions::from([("license".to_string(), options)])
    });

    let labels = use_query(String::new, fetch_sbom_labels);
    let label_suggestions = Signal::derive(move || {
        labels.data.with(|d| {
            d.iter()
                .flatten()
                .map(|kv| join_key_value_as_string(&kv.key, &kv.value))
                .collect::<Vec<_>>()
        })
    });

    (async_options, label_suggestions)
}

#[component]
pub fn SbomList() -> impl IntoView {
    let data = use_sbom_list(true);
    let handle = data.handle;
    let (async_options, label_suggestions) = use_sbom_filter_options();
    let selection = BulkSelection::new(|s: &SbomSummary| s.id.clone());

    let select_all_matching = move |_: leptos::ev::MouseEvent| {
        let (rows, total) = data.table.with_untracked(|t| {
            let rows = t.rows.iter().map(|r| r.item.clone()).collect::<Vec<_>>();
            (rows, t.summary.total_item_count)
        });
        let q = data.params.with_untracked(|p| serialize_filters_for_hub(&p.filters));
        handle.update_selection(|s| selection.select_all_filtered(s, &rows, total, &q));
    };

    view! {
        <PageFrame page_id="a001_sbom--list" category=PAGE_CAT_LIST>
            <div class="page__header">
                <div class="page__header-left">
                    <h1 class="page__title">"SBOMs"</h1>
                    <Badge variant="primary">{move || data.total().to_string()}</Badge>
                </div>
                <div class="page__header-right">
                    <Show when=move || { handle.selected_count() > 0 }>
                        <span class="page__selection">
                            {move || format!("{} selected", handle.selected_count())}
                        </span>
                        <Button
                            appearance=ButtonAppearance::Subtle
                            on_click=move |_| handle.update_selection(|s| s.clear())
                        >
                            "Clear selection"
                        </Button>
                    </Show>
                    <Button appearance=ButtonAppearance::Secondary on_click=select_all_matching>
                        "Select all"
                    </Button>
                    <ManageColumns handle=handle />
                    <A href="/sboms/upload" attr:class="button button--primary">
                        {icon("upload")}
                        " Upload SBOM"
                    </A>
                </div>
            </div>

            <div class="page__content">
                <FilterToolbar
                    handle=handle
                    async_options=async_options
                    label_suggestions=label_suggestions
                />
                <SbomTable data=data />
            </div>
        </PageFrame>
    }
}

#[component]
pub fn SbomTable(data: SbomListData) -> impl IntoView {
    let SbomListData {
        handle,
        query,
        table,
        ..
    } = data;
    let selection = BulkSelection::new(|s: &SbomSummary| s.id.clone());
    let is_selectable = handle.config.with_value(|c| c.is_selection_enabled);

    let delete_error = RwSignal::new(None::<String>);
    let on_delete = move |id: String| {
        if !confirm_action("Delete this SBOM? It cannot be recovered.") {
            return;
        }
        spawn_local(async move {
            match delete_sbom(&id).await {
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
                <Table attr:aria-label="SBOM List" attr:style="width: 100%;">
                    <TableHeader>
                        <TableRow>
                            <Show when=move || is_selectable>
                                <TableHeaderCheckbox
                                    state=Signal::derive(move || summary.with(|s| s.header_checkbox))
                                    on_change=toggle_page
                                />
                            </Show>
                            <Show when=visible("name")>
                                <SortableHeaderCell props=th("name") on_sort=on_sort min_width=200.0 />
                            </Show>
                            <Show when=visible("version")>
                                <SortableHeaderCell props=th("version") on_sort=on_sort />
                            </Show>
                            <Show when=visible("supplier")>
                                <SortableHeaderCell props=th("supplier") on_sort=on_sort />
                            </Show>
                            <Show when=visible("labels")>
                                <SortableHeaderCell props=th("labels") on_sort=on_sort />
                            </Show>
                            <Show when=visible("published")>
                                <SortableHeaderCell props=th("published") on_sort=on_sort />
                            </Show>
                            <Show when=visible("packages")>
                                <SortableHeaderCell props=th("packages") on_sort=on_sort align="right" />
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
                                let SnapshotRow { props, item: sbom } = row;
                                let id = props.item_id.clone();
                                let id_for_checked = id.clone();
                                let href = StoredValue::new(format!("/sboms/{}", urlencoding::encode(&id)));
                                let name = StoredValue::new(sbom.name.clone());
                                let version = StoredValue::new(sbom.version().unwrap_or_default().to_string());
                                let suppliers = StoredValue::new(sbom.suppliers.join(", "));
                                let labels = StoredValue::new(sbom.labels.clone());
                                let published = StoredValue::new(format_optional_date(sbom.published.as_deref()));
                                let packages = StoredValue::new(sbom.number_of_packages.map(|n| n.to_string()).unwrap_or_default());
                                view! {
                                    <TableRow attr:aria-selected=props.aria_selected.map(|s| s.to_string())>
                                        <Show when=move || is_selectable>
                                            <TableCellCheckbox
                                                item_id=id_for_checked.clone()
                                                checked=Signal::derive({
                                                    let id = id_for_checked.clone();
                                                    move || handle.state.with(|s| s.selection.is_id_selected(&id))
                                                })
                                                on_change=Callback::new(move |(id, checked): (String, bool)| {
                                                    handle.update_selection(|s| s.set_id_selected(&id, checked))
                                                })
                                            />
                                        </Show>
                                        <Show when=visible("name")>
                                            <TableCell attr:data-label="Name">
                                                <TableCellLayout truncate=true>
                                                    <A href=href.get_value()>{name.get_value()}</A>
                                                </TableCellLayout>
                                            </TableCell>
                                        </Show>
                                        <Show when=visible("version")>
                                            <TableCell attr:data-label="Version">{version.get_value()}</TableCell>
                                        </Show>
                                        <Show when=visible("supplier")>
                                            <TableCell attr:data-label="Supplier">{suppliers.get_value()}</TableCell>
                                        </Show>
                                        <Show when=visible("labels")>
                                            <TableCell attr:data-label="Labels">
                                                <LabelBadges labels=labels.get_value() />
                                            </TableCell>
                                        </Show>
                                        <Show when=visible("published")>
                                            <TableCell attr:data-label="Created on">{published.get_value()}</TableCell>
                                        </Show>
                                        <Show when=visible("packages")>
                                            <TableCell attr:data-label="Dependencies" class="table__cell--right">
                                                {packages.get_value()}
                                            </TableCell>
                                        </Show>
                                        <TableCell>
                                            <Button
                                                appearance=ButtonAppearance::Subtle
                                                attr:aria-label="Delete"
                                                on_click=move |_| on_delete(id.clone())
                                            >
                                                {icon("trash")}
                                            </Button>
                                        </TableCell>
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
