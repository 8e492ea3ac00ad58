use leptos::prelude::*;

use super::state::{search_filter, SearchTab};
use crate::domain::a001_sbom::ui::list::{use_sbom_filter_options, use_sbom_list, SbomTable};
use crate::domain::a002_package::ui::list::{use_package_list, PackageTable};
use crate::domain::a003_advisory::ui::list::{use_advisory_list, AdvisoryTable};
use crate::domain::a004_vulnerability::ui::list::{use_vulnerability_list, VulnerabilityTable};
use crate::shared::components::filter_toolbar::FilterToolbar;
use crate::shared::icons::icon;
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_USECASE;
use crate::shared::table_controls::{FilterValue, TableControlsHandle, FILTER_TEXT_CATEGORY_KEY};

/// One search box feeding the free-text filter of all four result tables
#[component]
pub fn SearchPage() -> impl IntoView {
    let sboms = use_sbom_list(false);
    let packages = use_package_list(false);
    let vulnerabilities = use_vulnerability_list(false);
    let advisories = use_advisory_list(false);
    let (license_options, label_suggestions) = use_sbom_filter_options();

    let handles: [TableControlsHandle; 4] = [
        sboms.handle,
        packages.handle,
        vulnerabilities.handle,
        advisories.handle,
    ];

    let initial = match sboms.handle.filter_value(FILTER_TEXT_CATEGORY_KEY) {
        Some(FilterValue::String { value }) => value,
        _ => String::new(),
    };
    let input = RwSignal::new(initial);
    let active_tab = RwSignal::new(SearchTab::default());

    let submit = move || {
        let value = search_filter(&input.get_untracked());
        for handle in handles {
            if let Err(e) = handle.set_filter_value(FILTER_TEXT_CATEGORY_KEY, value.clone()) {
                log::warn!("search filter rejected: {}", e);
            }
        }
    };

    let count_of = move |tab: SearchTab| match tab {
        SearchTab::Sboms => sboms.total(),
        SearchTab::Packages => packages.total(),
        SearchTab::Vulnerabilities => vulnerabilities.total(),
        SearchTab::Advisories => advisories.total(),
    };

    view! {
        <PageFrame page_id="u501_search--usecase" category=PAGE_CAT_USECASE>
            <div class="page__header">
                <div class="page__header-left">
                    <h1 class="page__title">"Search Results"</h1>
                </div>
            </div>
            <div class="page__content">
                <div class="search-bar">
                    <input
                        type="search"
                        class="search-input__field search-bar__field"
                        placeholder="Search for an SBOM, Package, or Vulnerability"
                        aria-label="Search"
                        prop:value=move || input.get()
                        on:input=move |ev| input.set(event_target_value(&ev))
                        on:keydown=move |ev| {
                            if ev.key() == "Enter" {
                                submit();
                            }
                        }
                    />
                    <button class="button button--primary" on:click=move |_| submit()>
                        {icon("search")}
                        " Search"
                    </button>
                </div>

                <div class="tabs" role="tablist">
                    {SearchTab::all()
                        .into_iter()
                        .map(|tab| {
                            view! {
                                <button
                                    role="tab"
                                    class=move || {
                                        if active_tab.get() == tab { "tabs__tab tabs__tab--active" } else { "tabs__tab" }
                                    }
                                    aria-selected=move || (active_tab.get() == tab).to_string()
                                    on:click=move |_| active_tab.set(tab)
                                >
                                    {icon(tab.icon())}
                                    " "
                                    {tab.label()}
                                    " "
                                    <span class="badge badge--neutral">{move || count_of(tab).to_string()}</span>
                                </button>
                            }
                        })
                        .collect_view()}
                </div>

                <div class="search__panel" role="tabpanel">
                    <div class="search__filters">
                        {move || {
                            let handle = match active_tab.get() {
                                SearchTab::Sboms => sboms.handle,
                                SearchTab::Packages => packages.handle,
                                SearchTab::Vulnerabilities => vulnerabilities.handle,
                                SearchTab::Advisories => advisories.handle,
                            };
                            view! {
                                <FilterToolbar
                                    handle=handle
                                    async_options=license_options
                                    label_suggestions=label_suggestions
                                    omit_search=true
                                    initially_expanded=true
                                />
                            }
                        }}
                    </div>
                    <div class="search__results">
                        <Show when=move || active_tab.get() == SearchTab::Sboms>
                            <SbomTable data=sboms />
                        </Show>
                        <Show when=move || active_tab.get() == SearchTab::Packages>
                            <PackageTable data=packages />
                        </Show>
                        <Show when=move || active_tab.get() == SearchTab::Vulnerabilities>
                            <VulnerabilityTable data=vulnerabilities />
                        </Show>
                        <Show when=move || active_tab.get() == SearchTab::Advisories>
                            <AdvisoryTable data=advisories />
                        </Show>
                    </div>
                </div>
            </div>
        </PageFrame>
    }
}
