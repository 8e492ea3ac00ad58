pub mod packages;
pub mod vulnerabilities;

use contracts::domain::a001_sbom::dto::SbomSummary;
use leptos::prelude::*;
use leptos_router::components::A;

use self::packages::SbomPackagesTable;
use self::vulnerabilities::SbomVulnerabilitiesTable;
use crate::domain::a001_sbom::model::fetch_sbom;
use crate::shared::components::not_found::NotFound;
use crate::shared::components::ui::badge::LabelBadges;
use crate::shared::date_utils::{format_datetime, format_optional_date};
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_DETAIL;
use crate::shared::query::use_query;
use crate::shared::route_params::{use_required_param, PathParam};

#[component]
pub fn SbomDetails() -> impl IntoView {
    let sbom_id = use_required_param(PathParam::SbomId);

    move || match sbom_id.get() {
        Ok(id) => view! { <SbomDetailsView id=id /> }.into_any(),
        Err(e) => {
            log::warn!("{}", e);
            view! { <NotFound /> }.into_any()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum SbomTab {
    #[default]
    Info,
    Packages,
    Vulnerabilities,
}

impl SbomTab {
    fn all() -> [SbomTab; 3] {
        [SbomTab::Info, SbomTab::Packages, SbomTab::Vulnerabilities]
    }

    fn label(&self) -> &'static str {
        match self {
            SbomTab::Info => "Info",
            SbomTab::Packages => "Packages",
            SbomTab::Vulnerabilities => "Vulnerabilities",
        }
    }
}

#[component]
fn SbomDetailsView(id: String) -> impl IntoView {
    let stored_id = StoredValue::new(id);
    let query = use_query(move || stored_id.get_value(), fetch_sbom);
    let active_tab = RwSignal::new(SbomTab::default());

    let title = move || {
        query
            .data
            .with(|d| d.as_ref().map(|s| s.name.clone()))
            .unwrap_or_else(|| stored_id.get_value())
    };

    view! {
        <PageFrame page_id="a001_sbom--detail" category=PAGE_CAT_DETAIL>
            <div class="page__header">
                <div class="page__header-left">
                    <A href="/sboms" attr:class="page__back">"SBOMs"</A>
                    <h1 class="page__title">{title}</h1>
                </div>
            </div>
            <div class="page__content">
                {move || query.error.get().map(|err| view! {
                    <div class="alert alert--error">{format!("Unable to load the SBOM: {}", err)}</div>
                })}
                <div class="tabs" role="tablist">
                    {SbomTab::all()
                        .into_iter()
                        .map(|tab| view! {
                            <button
                                role="tab"
                                class=move || {
                                    if active_tab.get() == tab { "tabs__tab tabs__tab--active" } else { "tabs__tab" }
                                }
                                aria-selected=move || (active_tab.get() == tab).to_string()
                                on:click=move |_| active_tab.set(tab)
                            >
                                {tab.label()}
                            </button>
                        })
                        .collect_view()}
                </div>
                <div class="details__panel" role="tabpanel">
                    <Show when=move || active_tab.get() == SbomTab::Info>
                        {move || query.data.get().map(|sbom| view! { <SbomInfo sbom=sbom /> })}
                    </Show>
                    <Show when=move || active_tab.get() == SbomTab::Packages>
                        <SbomPackagesTable sbom_id=stored_id.get_value() />
                    </Show>
                    <Show when=move || active_tab.get() == SbomTab::Vulnerabilities>
                        <SbomVulnerabilitiesTable sbom_id=stored_id.get_value() />
                    </Show>
                </div>
            </div>
        </PageFrame>
    }
}

#[component]
fn SbomInfo(sbom: SbomSummary) -> impl IntoView {
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
            {field("Name", sbom.name.clone())}
            {field("Version", sbom.version().unwrap_or_default().to_string())}
            {field("Authors", sbom.authors.join(", "))}
            {field("Suppliers", sbom.suppliers.join(", "))}
            {field("Created on", format_optional_date(sbom.published.as_deref()))}
            {field("Ingested", sbom.ingested.as_deref().map(format_datetime).unwrap_or_default())}
            {field("Dependencies", sbom.number_of_packages.map(|n| n.to_string()).unwrap_or_default())}
            <div class="details__field">
                <dt>"Labels"</dt>
                <dd><LabelBadges labels=sbom.labels.clone() /></dd>
            </div>
        </dl>
    }
}
