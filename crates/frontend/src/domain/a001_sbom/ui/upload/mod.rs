use leptos::prelude::*;
use leptos_router::components::A;

use crate::config::AppConfig;
use crate::domain::a001_sbom::model::SBOMS_PATH;
use crate::shared::components::file_uploader::FileUploader;
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_USECASE;

#[component]
pub fn SbomUpload() -> impl IntoView {
    let upload_limit = use_context::<AppConfig>()
        .unwrap_or_default()
        .upload_limit_bytes();

    view! {
        <PageFrame page_id="a001_sbom--usecase" category=PAGE_CAT_USECASE>
            <div class="page__header">
                <div class="page__header-left">
                    <A href="/sboms" attr:class="page__back">"SBOMs"</A>
                    <h1 class="page__title">"Upload SBOM"</h1>
                </div>
            </div>
            <div class="page__content">
                <p>"Upload a Software Bill of Materials (SBOM) document. We accept CycloneDX and SPDX formats."</p>
                <FileUploader endpoint=SBOMS_PATH upload_limit=upload_limit />
            </div>
        </PageFrame>
    }
}
