use contracts::domain::a002_package::dto::PurlSummary;
use leptos::prelude::*;
use leptos_router::components::A;

use crate::domain::a001_sbom::ui::list::{use_sboms_by_package, SbomTable};
use crate::domain::a002_package::model::fetch_package;
use crate::shared::components::not_found::NotFound;
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_DETAIL;
use crate::shared::purl::DecomposedPurl;
use crate::shared::query::use_query;
use crate::shared::route_params::{use_required_param, PathParam};

#[component]
pub fn PackageDetails() -> impl IntoView {
    let package_id = use_required_param(PathParam::PackageId);

    move || match package_id.get() {
        Ok(id) => view! { <PackageDetailsView id=id /> }.into_any(),
        Err(e) => {
            log::warn!("{}", e);
            view! { <NotFound /> }.into_any()
        }
    }
}

#[component]
fn PackageDetailsView(id: String) -> impl IntoView {
    let stored_id = StoredValue::new(id);
    let query = use_query(move || stored_id.get_value(), fetch_package);
    let sboms = use_sboms_by_package(stored_id.get_value());

    let decomposed = Memo::new(move |_| {
        query
            .data
            .with(|d| d.as_ref().and_then(|p| DecomposedPurl::parse(&p.purl).ok()))
    });
    let title = move || {
        decomposed
            .with(|d| d.as_ref().map(|p| p.name.clone()))
            .unwrap_or_else(|| stored_id.get_value())
    };

    view! {
        <PageFrame page_id="a002_package--detail" category=PAGE_CAT_DETAIL>
            <div class="page__header">
                <div class="page__header-left">
                    <A href="/packages" attr:class="page__back">"Packages"</A>
                    <h1 class="page__title">{title}</h1>
                    {move || decomposed.get().map(|p| view! {
                        <span class="badge badge--primary">{format!("type={}", p.purl_type)}</span>
                    })}
                </div>
            </div>
            <div class="page__content">
                {move || query.error.get().map(|err| view! {
                    <div class="alert alert--error">{format!("Unable to load the package: {}", err)}</div>
                })}
                {move || query.data.get().map(|pkg| view! { <PurlInfo pkg=pkg /> })}
                <section class="details__section">
                    <h2 class="details__section-title">"SBOMs"</h2>
                    <SbomTable data=sboms />
                </section>
            </div>
        </PageFrame>
    }
}

#[component]
fn PurlInfo(pkg: PurlSummary) -> impl IntoView {
    let Ok(purl) = DecomposedPurl::parse(&pkg.purl) else {
        return view! { <pre class="details__purl">{pkg.purl}</pre> }.into_any();
    };
    let row = |label: &'static str, value: String| {
        view! {
            <div class="details__field">
                <dt>{label}</dt>
                <dd>{value}</dd>
            </div>
        }
    };

    view! {
        <dl class="details__grid">
            {row("Package URL", pkg.purl.clone())}
            {row("Base", purl.base_purl())}
            {row("Namespace", purl.namespace.clone().unwrap_or_default())}
            {row("Version", purl.version.clone().unwrap_or_default())}
            {row("Path", purl.path.clone().unwrap_or_default())}
            {row("Qualifiers", purl.qualifier_strings().join(", "))}
        </dl>
    }
    .into_any()
}
