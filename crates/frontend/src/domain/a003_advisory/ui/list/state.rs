use contracts::domain::a003_advisory::dto::AdvisorySummary;
use contracts::enums::Severity;

use crate::shared::table_controls::{
    FilterCategory, FilterSelectOption, ItemAccessors, PersistTarget, TableControlConfig,
    FILTER_TEXT_CATEGORY_KEY,
};

pub const ADVISORY_TABLE_PREFIX: &str = "ad";

pub fn severity_options() -> Vec<FilterSelectOption> {
    Severity::all()
        .into_iter()
        .map(|s| FilterSelectOption::new(s.code(), s.display_name()))
        .collect()
}

pub fn create_table_config(is_selectable: bool) -> TableControlConfig {
    let config = TableControlConfig::new("advisories", ADVISORY_TABLE_PREFIX)
        .persist_to(PersistTarget::UrlParams)
        .column("identifier", "Identifier")
        .column("title", "Title")
        .column("severity", "Severity")
        .column("labels", "Labels")
        .column("vulnerabilities", "Vulnerabilities")
        .filter(FilterCategory::search(FILTER_TEXT_CATEGORY_KEY, "Filter text").with_placeholder("Search"))
        .filter(
            FilterCategory::multiselect("average_severity", "Severity", severity_options())
                .with_placeholder("Severity"),
        )
        .sortable(&["identifier", "severity"])
        .hub_sort_field("identifier", "identifier")
        .hub_sort_field("severity", "average_score")
        .paginated(10)
        .expandable_cells(&["vulnerabilities"])
        .with_actions_column();
    if is_selectable {
        config.selectable()
    } else {
        config
    }
}

pub fn accessors() -> ItemAccessors<AdvisorySummary> {
    ItemAccessors::new(|a: &AdvisorySummary| a.uuid.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::table_controls::{
        get_hub_request_params, serialize_request_params_for_hub, FilterValue, TableControlState,
    };

    #[test]
    fn test_severity_sorts_by_average_score() {
        let config = create_table_config(true);
        let mut state = TableControlState::new(&config);
        state
            .set_filter_value(&config, "average_severity", Some(FilterValue::multi(["high", "critical"])))
            .unwrap();
        state.apply_header_click(&config, "severity").unwrap();
        state.apply_header_click(&config, "severity").unwrap();

        let pairs = serialize_request_params_for_hub(&get_hub_request_params(&config, &state));
        assert_eq!(
            pairs,
            vec![
                ("q".to_string(), "average_severity=critical|high".to_string()),
                ("sort".to_string(), "average_score:desc".to_string()),
                ("offset".to_string(), "0".to_string()),
                ("limit".to_string(), "10".to_string()),
            ]
        );
    }

    #[test]
    fn test_vulnerabilities_cell_is_compound() {
        let config = create_table_config(false);
        assert!(config.is_compound_expandable("vulnerabilities"));
        assert!(!config.is_compound_expandable("title"));
        assert_eq!(severity_options().len(), 5);
    }
}
