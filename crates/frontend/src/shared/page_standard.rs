//! Page categories.
//!
//! Every routed page declares an HTML `id` of the form `{entity}--{category}`
//! (e.g. `"a001_sbom--list"`) and one of the categories below as
//! `data-page-category`. The entity half matches the module directory, so an
//! id copied from the DOM inspector leads straight to the code.

/// Server-paginated or local table with filters
pub const PAGE_CAT_LIST: &str = "list";

/// One record with its related tables
pub const PAGE_CAT_DETAIL: &str = "detail";

/// Task page: uploads, search
pub const PAGE_CAT_USECASE: &str = "usecase";

/// Pages of the shell itself, such as not-found
pub const PAGE_CAT_SYSTEM: &str = "system";

pub const ALL_CATEGORIES: &[&str] = &[
    PAGE_CAT_LIST,
    PAGE_CAT_DETAIL,
    PAGE_CAT_USECASE,
    PAGE_CAT_SYSTEM,
];

pub fn is_valid_page_id(id: &str) -> bool {
    match id.split_once("--") {
        Some((entity, category)) => !entity.is_empty() && ALL_CATEGORIES.contains(&category),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_valid_page_id() {
        assert!(is_valid_page_id("a001_sbom--list"));
        assert!(is_valid_page_id("u501_search--usecase"));
        assert!(!is_valid_page_id("a001_sbom--grid"));
        assert!(!is_valid_page_id("--list"));
        assert!(!is_valid_page_id("a001_sbom"));
    }
}
