use leptos::prelude::*;
use leptos_router::components::A;

use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_SYSTEM;

#[component]
pub fn NotFound() -> impl IntoView {
    view! {
        <PageFrame page_id="not_found--system" category=PAGE_CAT_SYSTEM>
            <div class="page__header">
                <h1 class="page__title">"404: That's a problem"</h1>
            </div>
            <div class="page__content">
                <p>"We could not find the page you were looking for."</p>
                <A href="/">"Take me home"</A>
            </div>
        </PageFrame>
    }
}
