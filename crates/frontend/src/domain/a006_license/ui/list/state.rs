use contracts::shared::license::LicenseSummary;

use crate::domain::a001_sbom::ui::list::state::create_table_config as sbom_table_config;
use crate::shared::table_controls::persistence::write_query_string;
use crate::shared::table_controls::{
    ActiveSort, FilterCategory, FilterValue, ItemAccessors, PersistTarget, TableControlConfig, TableControlState,
    FILTER_TEXT_CATEGORY_KEY,
};

pub const LICENSE_TABLE_PREFIX: &str = "li";

pub fn create_table_config() -> TableControlConfig {
    TableControlConfig::new("licenses", LICENSE_TABLE_PREFIX)
        .persist_to(PersistTarget::UrlParams)
        .column("license", "License")
        .column("sboms", "SBOMs")
        .filter(FilterCategory::search(FILTER_TEXT_CATEGORY_KEY, "Filter text").with_placeholder("Search"))
        .sortable(&["license"])
        .hub_sort_field("license", "license")
        .initial_sort(ActiveSort::asc("license"))
        .paginated(20)
}

pub fn accessors() -> ItemAccessors<LicenseSummary> {
    ItemAccessors::new(|l: &LicenseSummary| l.license.clone())
}

/// SBOM list pre-filtered to one license
pub fn sboms_with_license_href(license: &str) -> String {
    let config = sbom_table_config(true);
    let mut state = TableControlState::new(&config);
    if let Err(e) = state.set_filter_value(&config, "license", Some(FilterValue::multi([license]))) {
        log::warn!("license filter for {:?} rejected: {}", license, e);
        return "/sboms".to_string();
    }
    format!("/sboms?{}", write_query_string(&config, &state, ""))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::table_controls::persistence::{read_params, read_query_string};
    use crate::shared::table_controls::{get_hub_request_params, serialize_request_params_for_hub};

    #[test]
    fn test_hub_params_sort_by_license() {
        let config = create_table_config();
        let mut state = TableControlState::new(&config);
        state
            .set_filter_value(&config, FILTER_TEXT_CATEGORY_KEY, Some(FilterValue::text("apache")))
            .unwrap();
        let pairs = serialize_request_params_for_hub(&get_hub_request_params(&config, &state));
        assert_eq!(
            pairs,
            vec![
                ("q".to_string(), "apache".to_string()),
                ("sort".to_string(), "license:asc".to_string()),
                ("offset".to_string(), "0".to_string()),
                ("limit".to_string(), "20".to_string()),
            ]
        );
    }

    #[test]
    fn test_sbom_link_carries_license_filter() {
        let href = sboms_with_license_href("Apache-2.0 OR MIT");
        let query = href.strip_prefix("/sboms?").unwrap();

        let config = sbom_table_config(true);
        let state = read_params(&config, &read_query_string(&config, query));
        assert_eq!(
            state.filter_values.get("license"),
            Some(&FilterValue::multi(["Apache-2.0 OR MIT"]))
        );
    }
}
