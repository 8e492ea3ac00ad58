use contracts::domain::a005_importer::dto::{Importer, ImporterState};

use crate::shared::table_controls::{
    ExpandableVariant, FilterCategory, ItemAccessors, PersistTarget, SortValue, TableControlConfig,
};

pub const IMPORTER_TABLE_PREFIX: &str = "im";

pub fn create_table_config() -> TableControlConfig {
    TableControlConfig::new("importers-table", IMPORTER_TABLE_PREFIX)
        .persist_to(PersistTarget::LocalStorage)
        .column("name", "Name")
        .column("type", "Type")
        .column("description", "Description")
        .column("state", "State")
        .column("start", "Start")
        .column("end", "End")
        .column("itemsImported", "Items imported")
        .filter(FilterCategory::search("name", "Name").with_placeholder("Search by name..."))
        .sortable(&["name"])
        .paginated(10)
        .expandable(ExpandableVariant::Single)
        .with_actions_column()
}

pub fn accessors() -> ItemAccessors<Importer> {
    ItemAccessors::new(|i: &Importer| i.name.clone())
        .filter_by(|i, key| match key {
            "name" => vec![i.name.clone()],
            _ => Vec::new(),
        })
        .sort_by(|i, column| match column {
            "name" => SortValue::text(i.name.clone()),
            _ => SortValue::None,
        })
}

/// Text of the state cell. A disabled importer reads as disabled whatever it is doing.
pub fn state_label(importer: &Importer) -> &'static str {
    match importer.state {
        _ if !importer.is_enabled() => "Disabled",
        Some(ImporterState::Running) => "Running",
        Some(ImporterState::Waiting) => "Scheduled",
        None => "Unknown",
    }
}

pub fn state_variant(importer: &Importer) -> &'static str {
    match state_label(importer) {
        "Running" => "success",
        "Scheduled" => "primary",
        "Disabled" => "warning",
        _ => "neutral",
    }
}

pub fn items_imported(importer: &Importer) -> String {
    importer
        .progress
        .as_ref()
        .map(|p| match p.total {
            Some(total) => format!("{} / {}", p.current, total),
            None => p.current.to_string(),
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::table_controls::{
        derive_local_table_controls, ActiveSort, FilterValue, TableControlState,
    };

    fn importer(name: &str, json_config: &str, state: Option<&str>) -> Importer {
        let state = state.map(|s| format!(r#","state":"{}""#, s)).unwrap_or_default();
        serde_json::from_str(&format!(
            r#"{{"name":"{}","configuration":{}{}}}"#,
            name, json_config, state
        ))
        .unwrap()
    }

    #[test]
    fn test_local_name_filter_and_sort() {
        let config = create_table_config();
        let mut state = TableControlState::new(&config);
        state
            .set_filter_value(&config, "name", Some(FilterValue::text("CSAF")))
            .unwrap();
        state
            .set_active_sort(&config, Some(ActiveSort::asc("name")))
            .unwrap();
        let items = vec![
            importer("redhat-csaf", r#"{"csaf":{}}"#, None),
            importer("cve", r#"{"cve":{}}"#, None),
            importer("other-csaf", r#"{"csaf":{}}"#, None),
        ];

        let controls =
            derive_local_table_controls(&config, &state, accessors(), Some(&items), false, None);
        assert_eq!(controls.current_page_ids(), vec!["other-csaf", "redhat-csaf"]);
        assert_eq!(controls.total_item_count, 2);
    }

    #[test]
    fn test_state_label() {
        let running = importer("a", r#"{"sbom":{"disabled":false}}"#, Some("running"));
        let waiting = importer("b", r#"{"sbom":{"disabled":false}}"#, Some("waiting"));
        let disabled = importer("c", r#"{"sbom":{"disabled":true}}"#, Some("running"));
        assert_eq!(state_label(&running), "Running");
        assert_eq!(state_label(&waiting), "Scheduled");
        assert_eq!(state_label(&disabled), "Disabled");
        assert_eq!(state_variant(&disabled), "warning");
    }

    #[test]
    fn test_items_imported() {
        let mut item = importer("a", r#"{"cve":{}}"#, None);
        assert_eq!(items_imported(&item), "");
        item = serde_json::from_str(
            r#"{"name":"a","configuration":{"cve":{}},"progress":{"current":12,"total":40}}"#,
        )
        .unwrap();
        assert_eq!(items_imported(&item), "12 / 40");
    }

    #[test]
    fn test_single_expansion_adds_toggle_column() {
        let config = create_table_config();
        let state = TableControlState::new(&config);
        let controls =
            derive_local_table_controls::<Importer>(&config, &state, accessors(), None, false, None);
        // 7 columns + expand toggle + actions
        assert_eq!(controls.num_rendered_columns, 9);
        assert!(controls.is_no_data);
    }
}
