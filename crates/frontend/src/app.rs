use crate::config::AppConfig;
use crate::layout::global_context::AppGlobalContext;
use crate::routes::routes::AppRoutes;
use leptos::prelude::*;

#[component]
pub fn App() -> impl IntoView {
    provide_context(AppConfig::load());
    provide_context(AppGlobalContext::new());

    view! {
        <AppRoutes />
    }
}
