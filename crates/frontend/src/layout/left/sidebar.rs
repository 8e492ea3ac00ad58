//! Sidebar navigation grouped into sections

use crate::shared::icons::icon;
use leptos::prelude::*;
use leptos_router::components::A;
use leptos_router::hooks::use_location;

#[derive(Clone, Debug, PartialEq)]
struct MenuGroup {
    label: &'static str,
    items: Vec<(&'static str, &'static str, &'static str)>, // (href, label, icon)
}

fn get_menu_groups() -> Vec<MenuGroup> {
    vec![
        MenuGroup {
            label: "Explore",
            items: vec![
                ("/search", "Search", "search"),
                ("/sboms", "SBOMs", "sboms"),
                ("/packages", "Packages", "packages"),
                ("/vulnerabilities", "Vulnerabilities", "vulnerabilities"),
                ("/advisories", "Advisories", "advisories"),
                ("/licenses", "Licenses", "licenses"),
            ],
        },
        MenuGroup {
            label: "Administration",
            items: vec![("/importers", "Importers", "importers")],
        },
    ]
}

/// A menu entry stays highlighted on its nested pages (`/sboms/upload` keeps `/sboms`)
fn is_active_path(pathname: &str, href: &str) -> bool {
    pathname == href
        || pathname
            .strip_prefix(href)
            .is_some_and(|rest| rest.starts_with('/'))
}

#[component]
pub fn Sidebar() -> impl IntoView {
    let location = use_location();
    let pathname = location.pathname;

    view! {
        <nav class="app-sidebar__content" aria-label="Global">
            {get_menu_groups()
                .into_iter()
                .map(|group| {
                    view! {
                        <div class="app-sidebar__group">
                            <div class="app-sidebar__group-label">{group.label}</div>
                            {group
                                .items
                                .into_iter()
                                .map(|(href, label, icon_name)| {
                                    view! {
                                        <A
                                            href=href
                                            attr:class=move || {
                                                if pathname.with(|p| is_active_path(p, href)) {
                                                    "app-sidebar__item app-sidebar__item--active"
                                                } else {
                                                    "app-sidebar__item"
                                                }
                                            }
                                        >
                                            <div class="app-sidebar__item-content">
                                                {icon(icon_name)}
                                                <span>{label}</span>
                                            </div>
                                        </A>
                                    }
                                })
                                .collect_view()}
                        </div>
                    }
                })
                .collect_view()}
        </nav>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_active_path() {
        assert!(is_active_path("/sboms", "/sboms"));
        assert!(is_active_path("/sboms/upload", "/sboms"));
        assert!(!is_active_path("/sbomsx", "/sboms"));
        assert!(!is_active_path("/", "/sboms"));
    }

    #[test]
    fn test_menu_links_are_unique() {
        let mut hrefs: Vec<&str> = get_menu_groups()
            .into_iter()
            .flat_map(|g| g.items.into_iter().map(|(href, _, _)| href))
            .collect();
        let count = hrefs.len();
        hrefs.sort();
        hrefs.dedup();
        assert_eq!(hrefs.len(), count);
    }
}
