pub mod state;

use leptos::prelude::*;
use leptos_router::components::A;
use thaw::*;

use self::state::{accessors, create_table_config, sboms_with_license_href};
use crate::domain::a006_license::model::fetch_license_page;
use crate::shared::components::filter_toolbar::FilterToolbar;
use crate::shared::components::pagination_controls::PaginationControls;
use crate::shared::components::table::{ConditionalTableBody, SortableHeaderCell};
use crate::shared::components::ui::badge::Badge;
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_LIST;
use crate::shared::query::use_query;
use crate::shared::table_controls::{use_hub_table, use_table_control_state, SnapshotRow};

#[component]
pub fn LicenseList() -> impl IntoView {
    let handle = use_table_control_state(create_table_config());
    let params = Memo::new(move |_| handle.hub_request_params());
    let query = use_query(move || params.get(), fetch_license_page);
    let table = use_hub_table(handle, accessors(), query);

    let summary = Signal::derive(move || table.with(|t| t.summary.clone()));
    let pagination = Signal::derive(move || summary.with(|s| s.pagination.clone()));
    let on_page_change = Callback::new(move |p| handle.set_page_number(p));
    let on_page_size_change = Callback::new(move |n| handle.set_items_per_page(n));
    let th = move |key: &'static str| Signal::derive(move || handle.th_props(key));
    let on_sort = Callback::new(move |key: String| handle.on_sort_click(&key));

    view! {
        <PageFrame page_id="a006_license--list" category=PAGE_CAT_LIST>
            <div class="page__header">
                <div class="page__header-left">
                    <h1 class="page__title">"Licenses"</h1>
                    <Badge variant="primary">{move || summary.with(|s| s.total_item_count).to_string()}</Badge>
                </div>
            </div>
            <div class="page__content">
                <FilterToolbar handle=handle />
                <PaginationControls
                    props=pagination
                    on_page_change=on_page_change
                    on_page_size_change=on_page_size_change
                    compact=true
                />
                <div class="table-wrapper">
                    <Table attr:aria-label="License table" attr:style="width: 100%;">
                        <TableHeader>
                            <TableRow>
                                <SortableHeaderCell props=th("license") on_sort=on_sort min_width=320.0 />
                                <SortableHeaderCell props=th("sboms") on_sort=on_sort />
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
                                    let SnapshotRow { item, .. } = row;
                                    let href = sboms_with_license_href(&item.license);
                                    view! {
                                        <TableRow>
                                            <TableCell attr:data-label="License"><code>{item.license.clone()}</code></TableCell>
                                            <TableCell attr:data-label="SBOMs">
                                                <A href=href>"View SBOMs"</A>
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
        </PageFrame>
    }
}
