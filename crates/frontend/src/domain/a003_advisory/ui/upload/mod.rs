use leptos::prelude::*;
use leptos_router::components::A;

use crate::config::AppConfig;
use crate::domain::a003_advisory::model::ADVISORIES_PATH;
use crate::shared::components::file_uploader::FileUploader;
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_USECASE;

#[component]
pub fn AdvisoryUpload() -> impl IntoView {
    let upload_limit = use_context::<AppConfig>()
        .unwrap_or_default()
        .upload_limit_bytes();

    view! {
        <PageFrame page_id="a003_advisory--usecase" category=PAGE_CAT_USECASE>
            <div class="page__header">
                <div class="page__header-left">
                    <A href="/advisories" attr:class="page__back">"Advisories"</A>
                    <h1 class="page__title">"Upload Advisory"</h1>
                </div>
            </div>
            <div class="page__content">
                <p>"Upload a CSAF, CVE, or OSV Advisory."</p>
                <FileUploader endpoint=ADVISORIES_PATH upload_limit=upload_limit />
            </div>
        </PageFrame>
    }
}
