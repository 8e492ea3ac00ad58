use contracts::domain::a003_advisory::dto::AdvisorySummary;
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::components::A;
use leptos_router::hooks::use_navigate;
use thaw::*;

use crate::domain::a003_advisory::model::{delete_advisory, fetch_advisory};
use crate::domain::a003_advisory::ui::list::VulnerabilityRefs;
use crate::shared::components::not_found::NotFound;
use crate::shared::components::ui::badge::{LabelBadges, SeverityBadge};
use crate::shared::date_utils::format_optional_date;
use crate::shared::icons::icon;
use crate::shared::list_utils::confirm_action;
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_DETAIL;
use crate::shared::query::use_query;
use crate::shared::route_params::{use_required_param, PathParam};

#[component]
pub fn AdvisoryDetails() -> impl IntoView {
    let advisory_id = use_required_param(PathParam::AdvisoryId);

    move || match advisory_id.get() {
        Ok(id) => view! { <AdvisoryDetailsView id=id /> }.into_any(),
        Err(e) => {
            log::warn!("{}", e);
            view! { <NotFound /> }.into_any()
        }
    }
}

#[component]
fn AdvisoryDetailsView(id: String) -> impl IntoView {
    let stored_id = StoredValue::new(id);
    let query = use_query(move || stored_id.get_value(), fetch_advisory);
    let navigate = StoredValue::new_local(use_navigate());
    let delete_error = RwSignal::new(None::<String>);
    let is_deleting = RwSignal::new(false);

    let on_delete = move |_| {
        if !confirm_action("Delete this advisory? It cannot be recovered.") {
            return;
        }
        is_deleting.set(true);
        spawn_local(async move {
            match delete_advisory(&stored_id.get_value()).await {
                Ok(()) => navigate.with_value(|nav| nav("/advisories", Default::default())),
                Err(e) => delete_error.set(Some(e.to_string())),
            }
            is_deleting.set(false);
        });
    };

    let title = move || {
        query
            .data
            .with(|d| d.as_ref().map(|a| a.document_id.clone().unwrap_or_else(|| a.identifier.clone())))
            .unwrap_or_else(|| stored_id.get_value())
    };

    view! {
        <PageFrame page_id="a003_advisory--detail" category=PAGE_CAT_DETAIL>
            <div class="page__header">
                <div class="page__header-left">
                    <A href="/advisories" attr:class="page__back">"Advisories"</A>
                    <h1 class="page__title">{title}</h1>
                    {move || query.data.with(|d| d.as_ref().and_then(|a| a.labels.get("type").cloned()))
                        .map(|t| view! { <span class="badge badge--primary">{t}</span> })}
                </div>
                <div class="page__header-right">
                    <Button
                        appearance=ButtonAppearance::Secondary
                        disabled=Signal::derive(move || is_deleting.get())
                        on_click=on_delete
                    >
                        {icon("trash")}
                        " Delete"
                    </Button>
                </div>
            </div>
            <div class="page__content">
                {move || delete_error.get().map(|err| view! { <div class="alert alert--error">{err}</div> })}
                {move || query.error.get().map(|err| view! {
                    <div class="alert alert--error">{format!("Unable to load the advisory: {}", err)}</div>
                })}
                {move || query.data.get().map(|advisory| view! { <AdvisoryInfo advisory=advisory /> })}
            </div>
        </PageFrame>
    }
}

#[component]
fn AdvisoryInfo(advisory: AdvisorySummary) -> impl IntoView {
    let field = |label: &'static str, value: String| {
        view! {
            <div class="details__field">
                <dt>{label}</dt>
                <dd>{value}</dd>
            </div>
        }
    };
    let issuer = advisory
        .issuer
        .as_ref()
        .and_then(|i| i.name.clone())
        .unwrap_or_default();

    view! {
        <dl class="details__grid">
            {field("Identifier", advisory.identifier.clone())}
            {field("Title", advisory.title.clone().unwrap_or_default())}
            {field("Issuer", issuer)}
            {field("Published", format_optional_date(advisory.published.as_deref()))}
            {field("Modified", format_optional_date(advisory.modified.as_deref()))}
            <div class="details__field">
                <dt>"Severity"</dt>
                <dd><SeverityBadge severity=advisory.average_severity score=advisory.average_score /></dd>
            </div>
            <div class="details__field">
                <dt>"Labels"</dt>
                <dd><LabelBadges labels=advisory.labels.clone() /></dd>
            </div>
        </dl>
        <section class="details__section">
            <h2 class="details__section-title">"Vulnerabilities"</h2>
            <VulnerabilityRefs vulnerabilities=advisory.vulnerabilities.clone() />
        </section>
    }
}
