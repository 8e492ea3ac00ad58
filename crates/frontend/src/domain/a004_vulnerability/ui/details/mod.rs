pub mod state;

use contracts::domain::a004_vulnerability::dto::VulnerabilityDetails;
use leptos::prelude::*;
use leptos_router::components::A;
use thaw::*;

use self::state::{accessors, affected_count, create_table_config, purl_statuses};
use crate::domain::a001_sbom::ui::details::vulnerabilities::state::status_label;
use crate::domain::a004_vulnerability::model::fetch_vulnerability;
use crate::shared::components::filter_toolbar::FilterToolbar;
use crate::shared::components::not_found::NotFound;
use crate::shared::components::pagination_controls::PaginationControls;
use crate::shared::components::table::{ConditionalTableBody, SortableHeaderCell};
use crate::shared::components::ui::badge::SeverityBadge;
use crate::shared::date_utils::format_optional_date;
use crate::shared::icons::icon;
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_DETAIL;
use crate::shared::query::{use_query, QueryState};
use crate::shared::route_params::{use_required_param, PathParam};
use crate::shared::table_controls::{use_local_table, use_table_control_state, SnapshotRow};

#[component]
pub fn VulnerabilityDetailsPage() -> impl IntoView {
    let vulnerability_id = use_required_param(PathParam::VulnerabilityId);

    move || match vulnerability_id.get() {
        Ok(id) => view! { <VulnerabilityDetailsView id=id /> }.into_any(),
        Err(e) => {
            log::warn!("{}", e);
            view! { <NotFound /> }.into_any()
        }
    }
}

#[component]
fn VulnerabilityDetailsView(id: String) -> impl IntoView {
    let stored_id = StoredValue::new(id);
    let query = use_query(move || stored_id.get_value(), fetch_vulnerability);

    view! {
        <PageFrame page_id="a004_vulnerability--detail" category=PAGE_CAT_DETAIL>
            <div class="page__header">
                <div class="page__header-left">
                    <A href="/vulnerabilities" attr:class="page__back">"Vulnerabilities"</A>
                    <h1 class="page__title">{move || stored_id.get_value()}</h1>
                    {move || query.data.with(|d| d.as_ref().map(|v| v.severity())).map(|severity| view! {
                        <SeverityBadge severity=severity />
                    })}
                </div>
            </div>
            <div class="page__content">
                {move || query.error.get().map(|err| view! {
                    <div class="alert alert--error">{format!("Unable to load the vulnerability: {}", err)}</div>
                })}
                {move || query.data.get().map(|vulnerability| view! { <VulnerabilityInfo vulnerability=vulnerability /> })}
                <section class="details__section">
                    <h2 class="details__section-title">"Related advisories"</h2>
                    <RelatedAdvisories query=query />
                </section>
            </div>
        </PageFrame>
    }
}

#[component]
fn VulnerabilityInfo(vulnerability: VulnerabilityDetails) -> impl IntoView {
    let field = |label: &'static str, value: String| {
        view! {
            <div class="details__field">
                <dt>{label}</dt>
                <dd>{value}</dd>
            </div>
        }
    };

    view! {
        <dl class="details__grid">
            {field("Title", vulnerability.title.clone().unwrap_or_default())}
            {field("Reserved", format_optional_date(vulnerability.reserved.as_deref()))}
            {field("Published", format_optional_date(vulnerability.published.as_deref()))}
            {field("Last modified", format_optional_date(vulnerability.modified.as_deref()))}
            {field("Withdrawn", format_optional_date(vulnerability.withdrawn.as_deref()))}
            {field("CWE", vulnerability.cwes.join(", "))}
        </dl>
        <p class="details__description">{vulnerability.description.clone().unwrap_or_default()}</p>
    }
}

#[component]
fn RelatedAdvisories(query: QueryState<VulnerabilityDetails>) -> impl IntoView {
    let handle = use_table_control_state(create_table_config());
    let advisories = query.map(|v: &VulnerabilityDetails| v.advisories.clone());
    let table = use_local_table(handle, accessors(), advisories);

    let summary = Signal::derive(move || table.with(|t| t.summary.clone()));
    let pagination = Signal::derive(move || summary.with(|s| s.pagination.clone()));
    let on_page_change = Callback::new(move |p| handle.set_page_number(p));
    let on_page_size_change = Callback::new(move |n| handle.set_items_per_page(n));
    let th = move |key: &'static str| Signal::derive(move || handle.th_props(key));
    let on_sort = Callback::new(move |key: String| handle.on_sort_click(&key));
    let colspan = move || summary.with(|s| s.num_rendered_columns).to_string();

    view! {
        <div class="list-table">
            <FilterToolbar handle=handle />
            <div class="table-wrapper">
                <Table attr:aria-label="Related advisories" attr:style="width: 100%;">
                    <TableHeader>
                        <TableRow>
                            <TableHeaderCell min_width=40.0>""</TableHeaderCell>
                            <SortableHeaderCell props=th("identifier") on_sort=on_sort min_width=160.0 />
                            <SortableHeaderCell props=th("title") on_sort=on_sort min_width=240.0 />
                            <SortableHeaderCell props=th("issuer") on_sort=on_sort />
                            <SortableHeaderCell props=th("severity") on_sort=on_sort />
                            <SortableHeaderCell props=th("published") on_sort=on_sort />
                            <SortableHeaderCell props=th("affected") on_sort=on_sort />
                        </TableRow>
                    </TableHeader>
                    <ConditionalTableBody
                        is_loading=Signal::derive(move || summary.with(|s| s.is_loading))
                        fetch_error=Signal::derive(move || summary.with(|s| s.fetch_error.clone()))
                        is_no_data=Signal::derive(move || summary.with(|s| s.is_no_data))
                        num_rendered_columns=Signal::derive(move || summary.with(|s| s.num_rendered_columns))
                        no_data_message="No advisories mention this vulnerability"
                    >
                        <For
                            each=move || table.with(|t| t.rows.clone())
                            key=|row| row.props.item_id.clone()
                            children=move |row| {
                                let SnapshotRow { props, item } = row;
                                let id = StoredValue::new(props.item_id.clone());
                                let is_expanded = Signal::derive(move || {
                                    handle.state.with(|s| id.with_value(|id| s.expansion.is_row_expanded(id)))
                                });
                                let href = format!("/advisories/{}", urlencoding::encode(&item.uuid));
                                let issuer = item.issuer.as_ref().and_then(|i| i.name.clone()).unwrap_or_default();
                                let statuses = StoredValue::new(purl_statuses(&item));
                                let identifier = item.identifier.clone();
                                let title = item.title.clone().unwrap_or_default();
                                let severity = item.severity;
                                let score = item.score;
                                let published = format_optional_date(item.published.as_deref());
                                let affected = affected_count(&item).to_string();
                                view! {
                                    <TableRow>
                                        <TableCell>
                                            <button
                                                class="table__expand-toggle"
                                                aria-label="Details"
                                                aria-expanded=move || is_expanded.get().to_string()
                                                on:click=move |_| id.with_value(|id| handle.toggle_row_expanded(id))
                                            >
                                                {move || icon(if is_expanded.get() { "chevron-down" } else { "chevron-right" })}
                                            </button>
                                        </TableCell>
                                        <TableCell attr:data-label="ID">
                                            <A href=href>{identifier}</A>
                                        </TableCell>
                                        <TableCell attr:data-label="Title">
                                            <TableCellLayout truncate=true>{title}</TableCellLayout>
                                        </TableCell>
                                        <TableCell attr:data-label="Issuer">{issuer}</TableCell>
                                        <TableCell attr:data-label="Severity">
                                            <SeverityBadge severity=severity score=score />
                                        </TableCell>
                                        <TableCell attr:data-label="Published">
                                            {published}
                                        </TableCell>
                                        <TableCell attr:data-label="Affected packages">
                                            {affected}
                                        </TableCell>
                                    </TableRow>
                                    <Show when=move || is_expanded.get()>
                                        <TableRow class="table__row--expanded-content">
                                            <td colspan=colspan>
                                                <ul class="table__expanded-list">
                                                    {statuses
                                                        .get_value()
                                                        .into_iter()
                                                        .map(|(status, purl)| view! {
                                                            <li>
                                                                <span class="badge badge--neutral">{status_label(&status).to_string()}</span>
                                                                " "
                                                                <code>{purl}</code>
                                                            </li>
                                                        })
                                                        .collect_view()}
                                                </ul>
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
