use contracts::domain::a001_sbom::dto::SbomSummary;

use crate::shared::model_utils::labels_as_strings;
use crate::shared::table_controls::{
    FilterCategory, ItemAccessors, PersistTarget, TableControlConfig, FILTER_TEXT_CATEGORY_KEY,
};

pub const SBOM_TABLE_PREFIX: &str = "sb";
pub const PACKAGE_SBOMS_TABLE_PREFIX: &str = "psb";

pub fn create_table_config(is_selectable: bool) -> TableControlConfig {
    let config = TableControlConfig::new("sbom", SBOM_TABLE_PREFIX)
        .persist_to(PersistTarget::UrlParams)
        .column("name", "Name")
        .column("version", "Version")
        .column("supplier", "Supplier")
        .column("labels", "Labels")
        .column("published", "Created on")
        .column("packages", "Dependencies")
        .filter(
            FilterCategory::search(FILTER_TEXT_CATEGORY_KEY, "Filter text").with_placeholder("Search"),
        )
        .filter(FilterCategory::date_range("published", "Created on"))
        .filter(FilterCategory::label("labels", "Label").with_placeholder("Filter results by label"))
        .filter(
            FilterCategory::async_multiselect("license", "License")
                .with_placeholder("Filter results by license"),
        )
        .sortable(&["name", "published"])
        .hub_sort_field("name", "name")
        .hub_sort_field("published", "published")
        .paginated(10)
        .with_actions_column();
    if is_selectable {
        config.selectable()
    } else {
        config
    }
}

pub fn accessors() -> ItemAccessors<SbomSummary> {
    ItemAccessors::new(|s: &SbomSummary| s.id.clone()).filter_by(|s, key| match key {
        FILTER_TEXT_CATEGORY_KEY => vec![s.name.clone()],
        "published" => s.published.iter().cloned().collect(),
        "labels" => labels_as_strings(&s.labels),
        _ => Vec::new(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::table_controls::{get_hub_request_params, serialize_request_params_for_hub, FilterValue, TableControlState};

    #[test]
    fn test_sbom_request_params() {
        let config = create_table_config(false);
        let mut state = TableControlState::new(&config);
        state
            .set_filter_value(&config, "labels", Some(FilterValue::label("type", "spdx")))
            .unwrap();
        state
            .set_filter_value(&config, "license", Some(FilterValue::multi(["MIT", "Apache-2.0"])))
            .unwrap();
        state.apply_header_click(&config, "published").unwrap();

        let pairs = serialize_request_params_for_hub(&get_hub_request_params(&config, &state));
        assert_eq!(
            pairs,
            vec![
                ("q".to_string(), "labels:type=spdx&license=Apache-2.0|MIT".to_string()),
                ("sort".to_string(), "published:asc".to_string()),
                ("offset".to_string(), "0".to_string()),
                ("limit".to_string(), "10".to_string()),
            ]
        );
    }
}
