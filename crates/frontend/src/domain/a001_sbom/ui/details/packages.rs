//! Packages of one SBOM, paginated on the server.

use contracts::domain::a002_package::dto::SbomPackageRow;
use leptos::prelude::*;
use thaw::*;

use crate::domain::a001_sbom::model::fetch_sbom_packages;
use crate::shared::components::filter_toolbar::FilterToolbar;
use crate::shared::components::pagination_controls::PaginationControls;
use crate::shared::components::table::{ConditionalTableBody, SortableHeaderCell};
use crate::shared::purl::DecomposedPurl;
use crate::shared::query::use_query;
use crate::shared::table_controls::{
    use_hub_table, use_table_control_state, FilterCategory, ItemAccessors, PersistTarget,
    SnapshotRow, TableControlConfig, FILTER_TEXT_CATEGORY_KEY,
};

pub const SBOM_PACKAGES_TABLE_PREFIX: &str = "spk";

pub fn create_table_config() -> TableControlConfig {
    TableControlConfig::new("sbom-packages", SBOM_PACKAGES_TABLE_PREFIX)
        .persist_to(PersistTarget::UrlParams)
        .column("name", "Name")
        .column("version", "Version")
        .column("purl", "Package URL")
        .column("licenses", "Licenses")
        .filter(FilterCategory::search(FILTER_TEXT_CATEGORY_KEY, "Filter text").with_placeholder("Search"))
        .sortable(&["name"])
        .hub_sort_field("name", "name")
        .paginated(10)
}

pub fn accessors() -> ItemAccessors<SbomPackageRow> {
    ItemAccessors::new(|p: &SbomPackageRow| p.id.clone())
}

/// Canonical purls of a package, unparsable ones as-is
fn purl_texts(row: &SbomPackageRow) -> Vec<String> {
    row.purl
        .iter()
        .map(|p| match DecomposedPurl::parse(&p.purl) {
            Ok(decomposed) => decomposed.to_string(),
            Err(e) => {
                log::debug!("keeping unparsable purl {}: {}", p.purl, e);
                p.purl.clone()
            }
        })
        .collect()
}

#[component]
pub fn SbomPackagesTable(sbom_id: String) -> impl IntoView {
    let handle = use_table_control_state(create_table_config());
    let params = Memo::new(move |_| handle.hub_request_params());
    let query = use_query(
        move || (sbom_id.clone(), params.get()),
        |(id, params)| fetch_sbom_packages(id, params),
    );
    let table = use_hub_table(handle, accessors(), query);

    let summary = Signal::derive(move || table.with(|t| t.summary.clone()));
    let th = move |key: &'static str| Signal::derive(move || handle.th_props(key));
    let on_sort = Callback::new(move |key: String| handle.on_sort_click(&key));

    view! {
        <section class="details__section">
            <h2 class="details__section-title">"Packages"</h2>
            <FilterToolbar handle=handle />
            <Table attr:aria-label="SBOM packages" attr:style="width: 100%;">
                <TableHeader>
                    <TableRow>
                        <SortableHeaderCell props=th("name") on_sort=on_sort min_width=200.0 />
                        <SortableHeaderCell props=th("version") on_sort=on_sort />
                        <SortableHeaderCell props=th("purl") on_sort=on_sort min_width=260.0 />
                        <SortableHeaderCell props=th("licenses") on_sort=on_sort />
                    </TableRow>
                </TableHeader>
                <ConditionalTableBody
                    is_loading=Signal::derive(move || summary.with(|s| s.is_loading))
                    fetch_error=Signal::derive(move || summary.with(|s| s.fetch_error.clone()))
                    is_no_data=Signal::derive(move || summary.with(|s| s.is_no_data))
                    num_rendered_columns=Signal::derive(move || summary.with(|s| s.num_rendered_columns))
                    no_data_message="This SBOM lists no packages"
                >
                    <For
                        each=move || table.with(|t| t.rows.clone())
                        key=|row| row.props.item_id.clone()
                        children=move |row| {
                            let SnapshotRow { item, .. } = row;
                            let purls = purl_texts(&item);
                            view! {
                                <TableRow>
                                    <TableCell attr:data-label="Name">{item.name.clone()}</TableCell>
                                    <TableCell attr:data-label="Version">
                                        {item.version.clone().unwrap_or_default()}
                                    </TableCell>
                                    <TableCell attr:data-label="Package URL">
                                        <ul class="details__list">
                                            {purls.into_iter().map(|p| view! { <li><code>{p}</code></li> }).collect_view()}
                                        </ul>
                                    </TableCell>
                                    <TableCell attr:data-label="Licenses">{item.licenses.join(", ")}</TableCell>
                                </TableRow>
                            }
                        }
                    />
                </ConditionalTableBody>
            </Table>
            <PaginationControls
                props=Signal::derive(move || summary.with(|s| s.pagination.clone()))
                on_page_change=Callback::new(move |p| handle.set_page_number(p))
                on_page_size_change=Callback::new(move |n| handle.set_items_per_page(n))
            />
        </section>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::a002_package::dto::PurlRef;

    #[test]
    fn test_purl_texts_keep_unparsable() {
        let row = SbomPackageRow {
            id: "p1".to_string(),
            name: "commons-io".to_string(),
            version: Some("2.11.0".to_string()),
            purl: vec![
                PurlRef {
                    uuid: None,
                    purl: "pkg:maven/commons-io/commons-io@2.11.0?type=jar".to_string(),
                },
                PurlRef {
                    uuid: None,
                    purl: "not-a-purl".to_string(),
                },
            ],
            cpe: Vec::new(),
            licenses: vec!["Apache-2.0".to_string()],
            labels: Default::default(),
        };
        assert_eq!(
            purl_texts(&row),
            vec![
                "pkg:maven/commons-io/commons-io@2.11.0?type=jar".to_string(),
                "not-a-purl".to_string(),
            ]
        );
    }

    #[test]
    fn test_packages_sort_by_name_only() {
        let config = create_table_config();
        assert!(config.is_sortable("name"));
        assert!(!config.is_sortable("purl"));
        assert_eq!(config.persistence_key("page"), "spk_page");
    }
}
