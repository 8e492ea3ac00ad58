use contracts::domain::a004_vulnerability::dto::VulnerabilitySummary;

use crate::domain::a003_advisory::ui::list::state::severity_options;
use crate::shared::table_controls::{
    FilterCategory, ItemAccessors, PersistTarget, TableControlConfig, FILTER_TEXT_CATEGORY_KEY,
};

pub const VULNERABILITY_TABLE_PREFIX: &str = "vn";

pub fn create_table_config(is_selectable: bool) -> TableControlConfig {
    let config = TableControlConfig::new("vulnerabilities", VULNERABILITY_TABLE_PREFIX)
        .persist_to(PersistTarget::UrlParams)
        .column("identifier", "ID")
        .column("title", "Title")
        .column("severity", "CVSS")
        .column("published", "Date published")
        .column("cwes", "CWE")
        .hidden_by_default("cwes")
        .filter(FilterCategory::search(FILTER_TEXT_CATEGORY_KEY, "Filter text").with_placeholder("Search"))
        .filter(
            FilterCategory::multiselect("average_severity", "CVSS", severity_options())
                .with_placeholder("Severity"),
        )
        .filter(FilterCategory::date_range("published", "Date published"))
        .sortable(&["identifier", "severity", "published"])
        .hub_sort_field("identifier", "id")
        .hub_sort_field("severity", "average_score")
        .hub_sort_field("published", "published")
        .paginated(10);
    if is_selectable {
        config.selectable()
    } else {
        config
    }
}

pub fn accessors() -> ItemAccessors<VulnerabilitySummary> {
    ItemAccessors::new(|v: &VulnerabilitySummary| v.identifier.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::table_controls::{
        get_hub_request_params, serialize_request_params_for_hub, FilterValue, TableControlState,
    };
    use chrono::NaiveDate;

    #[test]
    fn test_published_range_and_hidden_cwe() {
        let config = create_table_config(false);
        let mut state = TableControlState::new(&config);
        assert!(!state.columns.is_visible("cwes"));

        state
            .set_filter_value(
                &config,
                "published",
                Some(FilterValue::DateRange {
                    from: NaiveDate::from_ymd_opt(2024, 1, 1),
                    to: NaiveDate::from_ymd_opt(2024, 3, 31),
                }),
            )
            .unwrap();
        state.apply_header_click(&config, "identifier").unwrap();

        let pairs = serialize_request_params_for_hub(&get_hub_request_params(&config, &state));
        assert_eq!(pairs[0], ("q".to_string(), "published>=2024-01-01&published<=2024-03-31".to_string()));
        assert_eq!(pairs[1], ("sort".to_string(), "id:asc".to_string()));
    }
}
