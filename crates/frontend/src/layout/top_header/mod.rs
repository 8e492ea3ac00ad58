//! Top bar: sidebar toggle, product title and a shortcut to search.

use crate::layout::global_context::use_global_context;
use crate::shared::icons::icon;
use leptos::prelude::*;
use leptos_router::components::A;

#[component]
pub fn TopHeader() -> impl IntoView {
    let ctx = use_global_context();
    let is_sidebar_visible = move || ctx.left_open.get();

    view! {
        <div class="top-header">
            <div class="top-header__brand">
                <button
                    class="top-header__icon-btn"
                    aria-label="Global navigation"
                    aria-expanded=move || is_sidebar_visible().to_string()
                    on:click=move |_| ctx.toggle_left()
                    title=move || if is_sidebar_visible() { "Hide navigation" } else { "Show navigation" }
                >
                    {icon("menu")}
                </button>
                <A href="/" attr:class="top-header__title">"Trustification"</A>
            </div>
            <div class="top-header__actions">
                <A href="/search" attr:class="top-header__icon-btn" attr:title="Search">
                    {icon("search")}
                </A>
            </div>
        </div>
    }
}
