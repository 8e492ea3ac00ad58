//! Root wrapper of every routed page.

use super::page_standard::*;
use leptos::prelude::*;

/// Sets the page id and `data-page-category` on the root element. Detail
/// pages get the `page--detail` modifier.
#[component]
pub fn PageFrame(
    /// `{entity}--{category}`, e.g. `"a003_advisory--detail"`
    page_id: &'static str,
    /// One of the `PAGE_CAT_*` constants
    category: &'static str,
    #[prop(optional)]
    class: &'static str,
    children: Children,
) -> impl IntoView {
    if !is_valid_page_id(page_id) {
        log::warn!("page id {} does not follow entity--category", page_id);
    }
    let base_class = match category {
        PAGE_CAT_DETAIL => "page page--detail",
        _ => "page",
    };
    let full_class = if class.is_empty() {
        base_class.to_string()
    } else {
        format!("{base_class} {class}")
    };

    view! {
        <div id=page_id class=full_class data-page-category=category>
            {children()}
        </div>
    }
}
