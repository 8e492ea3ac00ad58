use contracts::domain::a004_vulnerability::dto::VulnerabilityAdvisory;

use crate::domain::a001_sbom::ui::details::vulnerabilities::state::VULNERABILITY_STATUSES;
use crate::shared::date_utils::parse_date_prefix;
use crate::shared::table_controls::{
    ExpandableVariant, FilterCategory, ItemAccessors, PersistTarget, SortValue, TableControlConfig,
};

pub const VULNERABILITY_ADVISORY_TABLE_PREFIX: &str = "va";

pub fn create_table_config() -> TableControlConfig {
    TableControlConfig::new("vulnerability-advisories", VULNERABILITY_ADVISORY_TABLE_PREFIX)
        .persist_to(PersistTarget::State)
        .column("identifier", "ID")
        .column("title", "Title")
        .column("issuer", "Issuer")
        .column("severity", "Severity")
        .column("published", "Published")
        .column("affected", "Affected packages")
        .filter(FilterCategory::search("identifier", "ID").with_placeholder("Search by ID..."))
        .sortable(&["identifier", "severity", "published", "affected"])
        .paginated(10)
        .expandable(ExpandableVariant::Single)
}

pub fn affected_count(advisory: &VulnerabilityAdvisory) -> usize {
    advisory.purls.get("affected").map(Vec::len).unwrap_or(0)
}

pub fn accessors() -> ItemAccessors<VulnerabilityAdvisory> {
    ItemAccessors::new(|a: &VulnerabilityAdvisory| a.uuid.clone())
        .filter_by(|a, key| match key {
            "identifier" => vec![a.identifier.clone()],
            _ => Vec::new(),
        })
        .sort_by(|a, column| match column {
            "identifier" => SortValue::text(a.identifier.clone()),
            "severity" => SortValue::from(a.score),
            "published" => a
                .published
                .as_deref()
                .and_then(parse_date_prefix)
                .map(SortValue::Date)
                .unwrap_or(SortValue::None),
            "affected" => SortValue::Number(affected_count(a) as f64),
            _ => SortValue::None,
        })
}

/// `(status, purl)` pairs of an advisory, known statuses first in their usual order
pub fn purl_statuses(advisory: &VulnerabilityAdvisory) -> Vec<(String, String)> {
    let rank = |status: &str| {
        VULNERABILITY_STATUSES
            .iter()
            .position(|(code, _)| *code == status)
            .unwrap_or(VULNERABILITY_STATUSES.len())
    };
    let mut pairs: Vec<(String, String)> = advisory
        .purls
        .iter()
        .flat_map(|(status, purls)| {
            purls
                .iter()
                .filter_map(|p| p.purl())
                .map(move |purl| (status.clone(), purl.to_string()))
        })
        .collect();
    pairs.sort_by(|a, b| rank(&a.0).cmp(&rank(&b.0)).then_with(|| a.1.cmp(&b.1)));
    pairs
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::table_controls::{derive_local_table_controls, ActiveSort, TableControlState};

    fn advisories() -> Vec<VulnerabilityAdvisory> {
        serde_json::from_str(
            r#"[
                {"uuid": "u1", "identifier": "RHSA-2", "score": 5.0,
                 "purls": {"fixed": [{"base_purl": {"purl": "pkg:npm/b"}}],
                           "affected": [{"base_purl": {"purl": "pkg:npm/c"}}, {"base_purl": {"purl": "pkg:npm/a"}}]}},
                {"uuid": "u2", "identifier": "GHSA-1", "score": 9.0, "purls": {}}
            ]"#,
        )
        .unwrap()
    }

    #[test]
    fn test_purl_statuses_order() {
        let items = advisories();
        assert_eq!(
            purl_statuses(&items[0]),
            vec![
                ("affected".to_string(), "pkg:npm/a".to_string()),
                ("affected".to_string(), "pkg:npm/c".to_string()),
                ("fixed".to_string(), "pkg:npm/b".to_string()),
            ]
        );
        assert_eq!(affected_count(&items[0]), 2);
        assert_eq!(affected_count(&items[1]), 0);
    }

    #[test]
    fn test_sort_by_severity_score() {
        let items = advisories();
        let config = create_table_config();
        let mut state = TableControlState::new(&config);
        state
            .set_active_sort(&config, Some(ActiveSort::asc("severity")))
            .unwrap();
        let controls = derive_local_table_controls(&config, &state, accessors(), Some(&items), false, None);
        assert_eq!(controls.current_page_ids(), vec!["u1", "u2"]);
    }
}
