use crate::shared::table_controls::FilterValue;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchTab {
    #[default]
    Sboms,
    Packages,
    Vulnerabilities,
    Advisories,
}

impl SearchTab {
    pub fn all() -> [SearchTab; 4] {
        [
            SearchTab::Sboms,
            SearchTab::Packages,
            SearchTab::Vulnerabilities,
            SearchTab::Advisories,
        ]
    }

    pub fn label(&self) -> &'static str {
        match self {
            SearchTab::Sboms => "SBOMs",
            SearchTab::Packages => "Packages",
            SearchTab::Vulnerabilities => "Vulnerabilities",
            SearchTab::Advisories => "Advisories",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            SearchTab::Sboms => "sboms",
            SearchTab::Packages => "packages",
            SearchTab::Vulnerabilities => "vulnerabilities",
            SearchTab::Advisories => "advisories",
        }
    }
}

/// Free-text filter for the search box contents; blank input clears the filter
pub fn search_filter(raw: &str) -> Option<FilterValue> {
    let text = raw.trim();
    (!text.is_empty()).then(|| FilterValue::text(text))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_filter_trims_and_clears() {
        assert_eq!(search_filter("  quarkus "), Some(FilterValue::text("quarkus")));
        assert_eq!(search_filter("   "), None);
        assert_eq!(search_filter(""), None);
    }

    #[test]
    fn test_tabs_in_display_order() {
        let labels: Vec<&str> = SearchTab::all().iter().map(SearchTab::label).collect();
        assert_eq!(labels, vec!["SBOMs", "Packages", "Vulnerabilities", "Advisories"]);
        assert_eq!(SearchTab::default(), SearchTab::Sboms);
    }
}
