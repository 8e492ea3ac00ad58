pub mod state;

use leptos::prelude::*;
use leptos_router::components::A;
use thaw::*;

use self::state::{
    accessors, affected_package_rows, count_vulnerabilities, create_table_config, importer_options,
    status_label, SbomVulnerability, AFFECTED_PACKAGES_COLUMN,
};
use crate::domain::a001_sbom::model::fetch_sbom_advisories;
use crate::shared::components::filter_toolbar::{AsyncOptions, FilterToolbar};
use crate::shared::components::pagination_controls::PaginationControls;
use crate::shared::components::table::{ConditionalTableBody, SortableHeaderCell};
use crate::shared::components::ui::badge::{Badge, SeverityBadge};
use crate::shared::date_utils::format_optional_date;
use crate::shared::query::use_query;
use crate::shared::table_controls::{use_local_table, use_table_control_state, SnapshotRow};

#[component]
pub fn SbomVulnerabilitiesTable(sbom_id: String) -> impl IntoView {
    let handle = use_table_control_state(create_table_config());
    let stored_id = StoredValue::new(sbom_id);
    let query = use_query(
        move || stored_id.get_value(),
        |id| async move {
            fetch_sbom_advisories(id)
                .await
                .map(|advisories| state::group_sbom_vulnerabilities(&advisories))
        },
    );
    let table = use_local_table(handle, accessors(), query);

    let async_options = Signal::derive(move || {
        let options = query.data.with(|d| d.as_deref().map(importer_options).unwrap_or_default());
        AsyncOptions::from([("importer".to_string(), options)])
    });
    let counts = Signal::derive(move || {
        query
            .data
            .with(|d| d.as_deref().map(count_vulnerabilities).unwrap_or_default())
    });

    let summary = Signal::derive(move || table.with(|t| t.summary.clone()));
    let pagination = Signal::derive(move || summary.with(|s| s.pagination.clone()));
    let on_page_change = Callback::new(move |p| handle.set_page_number(p));
    let on_page_size_change = Callback::new(move |n| handle.set_items_per_page(n));
    let th = move |key: &'static str| Signal::derive(move || handle.th_props(key));
    let on_sort = Callback::new(move |key: String| handle.on_sort_click(&key));
    let colspan = move || summary.with(|s| s.num_rendered_columns).to_string();

    view! {
        <div class="list-table">
            <p class="details__help">
                "Any found vulnerabilities related to this SBOM. Fixed vulnerabilities are not listed."
            </p>
            <div class="details__summary">
                <Badge variant="primary">{move || format!("{} total", counts.with(|c| c.total))}</Badge>
                {move || {
                    counts
                        .get()
                        .by_severity
                        .into_iter()
                        .rev()
                        .map(|(severity, n)| view! {
                            <span class="details__summary-item">
                                <SeverityBadge severity=Some(severity) />
                                {format!(" {}", n)}
                            </span>
                        })
                        .collect_view()
                }}
                {move || {
                    counts
                        .get()
                        .by_status
                        .into_iter()
                        .map(|(status, n)| view! {
                            <span class="details__summary-item">{format!("{}: {}", status_label(&status), n)}</span>
                        })
                        .collect_view()
                }}
            </div>

            <FilterToolbar handle=handle async_options=async_options initially_expanded=true />

            <div class="table-wrapper">
                <Table attr:aria-label="Vulnerability table" attr:style="width: 100%;">
                    <TableHeader>
                        <TableRow>
                            <SortableHeaderCell props=th("vulnerabilityId") on_sort=on_sort min_width=160.0 />
                            <SortableHeaderCell props=th("description") on_sort=on_sort min_width=260.0 />
                            <SortableHeaderCell props=th("severity") on_sort=on_sort />
                            <SortableHeaderCell props=th("status") on_sort=on_sort />
                            <SortableHeaderCell props=th(AFFECTED_PACKAGES_COLUMN) on_sort=on_sort />
                            <SortableHeaderCell props=th("published") on_sort=on_sort />
                            <SortableHeaderCell props=th("updated") on_sort=on_sort />
                        </TableRow>
                    </TableHeader>
                    <ConditionalTableBody
                        is_loading=Signal::derive(move || summary.with(|s| s.is_loading))
                        fetch_error=Signal::derive(move || summary.with(|s| s.fetch_error.clone()))
                        is_no_data=Signal::derive(move || summary.with(|s| s.is_no_data))
                        num_rendered_columns=Signal::derive(move || summary.with(|s| s.num_rendered_columns))
                        no_data_message="No vulnerabilities match the filters"
                    >
                        <For
                            each=move || table.with(|t| t.rows.clone())
                            key=|row| row.props.item_id.clone()
                            children=move |row| {
                                let SnapshotRow { props, item } = row;
                                let id = StoredValue::new(props.item_id.clone());
                                let is_expanded = Signal::derive(move || {
                                    handle.state.with(|s| {
                                        id.with_value(|id| s.expansion.is_cell_expanded(id, AFFECTED_PACKAGES_COLUMN))
                                    })
                                });
                                let toggle_expanded = move |_| {
                                    id.with_value(|id| {
                                        handle.set_cell_expanded(id, AFFECTED_PACKAGES_COLUMN, !is_expanded.get_untracked())
                                    })
                                };
                                let SbomVulnerability { identifier, description, published, modified, status, packages, .. } =
                                    item.clone();
                                let href = format!("/vulnerabilities/{}", urlencoding::encode(&identifier));
                                let package_count = packages.len();
                                let packages = StoredValue::new(packages);

                                view! {
                                    <TableRow>
                                        <TableCell attr:data-label="Vulnerability ID">
                                            <A href=href>{identifier}</A>
                                        </TableCell>
                                        <TableCell attr:data-label="Description">
                                            <TableCellLayout truncate=true>{description.unwrap_or_default()}</TableCellLayout>
                                        </TableCell>
                                        <TableCell attr:data-label="Severity">
                                            <SeverityBadge severity=item.severity() score=item.average_score />
                                        </TableCell>
                                        <TableCell attr:data-label="Status">{status_label(&status).to_string()}</TableCell>
                                        <TableCell attr:data-label="Affected packages">
                                            <button
                                                class="table__compound-toggle"
                                                aria-expanded=move || is_expanded.get().to_string()
                                                disabled=package_count == 0
                                                on:click=toggle_expanded
                                            >
                                                {package_count.to_string()}
                                            </button>
                                        </TableCell>
                                        <TableCell attr:data-label="Published">{format_optional_date(published.as_deref())}</TableCell>
                                        <TableCell attr:data-label="Updated">{format_optional_date(modified.as_deref())}</TableCell>
                                    </TableRow>
                                    <Show when=move || is_expanded.get()>
                                        <TableRow class="table__row--expanded-content">
                                            <td colspan=colspan>
                                                <AffectedPackages rows=affected_package_rows(&packages.get_value()) />
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

#[component]
fn AffectedPackages(rows: Vec<state::AffectedPackageRow>) -> impl IntoView {
    view! {
        <table class="table__nested" aria-label="Affected packages">
            <thead>
                <tr>
                    <th>"Type"</th>
                    <th>"Namespace"</th>
                    <th>"Name"</th>
                    <th>"Version"</th>
                    <th>"Path"</th>
                    <th>"Qualifiers"</th>
                </tr>
            </thead>
            <tbody>
                {rows
                    .into_iter()
                    .map(|row| {
                        let name = match row.purl_uuid.as_deref() {
                            Some(uuid) => {
                                let href = format!("/packages/{}", urlencoding::encode(uuid));
                                view! { <A href=href>{row.name.clone()}</A> }.into_any()
                            }
                            None => row.name.clone().into_any(),
                        };
                        view! {
                            <tr>
                                <td>{row.purl_type.unwrap_or_default()}</td>
                                <td>{row.namespace.unwrap_or_default()}</td>
                                <td>{name}</td>
                                <td>{row.version.unwrap_or_default()}</td>
                                <td>{row.path.unwrap_or_default()}</td>
                                <td>
                                    {row.qualifiers
                                        .into_iter()
                                        .map(|q| view! { <span class="badge badge--neutral">{q}</span> })
                                        .collect_view()}
                                </td>
                            </tr>
                        }
                    })
                    .collect_view()}
            </tbody>
        </table>
    }
}
