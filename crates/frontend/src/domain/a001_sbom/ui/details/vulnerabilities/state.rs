//! Vulnerabilities of one SBOM.
//!
//! The hub answers per advisory; rows here are per vulnerability and status,
//! with every advisory that states it and every package it applies to merged in.

use std::collections::{BTreeMap, HashMap};

use contracts::domain::a001_sbom::dto::{SbomAdvisory, SbomAdvisoryStatus, SbomPackage};
use contracts::enums::Severity;

use crate::shared::date_utils::parse_date_prefix;
use crate::shared::purl::DecomposedPurl;
use crate::shared::table_controls::{
    FilterCategory, FilterSelectOption, FilterValue, ItemAccessors, PersistTarget, SortValue,
    TableControlConfig,
};

pub const SBOM_VULNERABILITY_TABLE_PREFIX: &str = "sv";
pub const AFFECTED_PACKAGES_COLUMN: &str = "affectedPackages";

/// Statuses an advisory can state, in display order
pub const VULNERABILITY_STATUSES: [(&str, &str); 5] = [
    ("affected", "Affected"),
    ("under_investigation", "Under investigation"),
    ("known_not_affected", "Known not affected"),
    ("not_affected", "Not affected"),
    ("fixed", "Fixed"),
];

pub fn status_label(status: &str) -> &str {
    VULNERABILITY_STATUSES
        .iter()
        .find(|(code, _)| *code == status)
        .map(|(_, label)| *label)
        .unwrap_or(status)
}

#[derive(Debug, Clone, PartialEq)]
pub struct AdvisoryRef {
    pub uuid: String,
    pub identifier: String,
    pub title: Option<String>,
    /// Name of the importer that ingested the advisory, from its `importer` label
    pub importer: Option<String>,
}

impl From<&SbomAdvisory> for AdvisoryRef {
    fn from(advisory: &SbomAdvisory) -> Self {
        Self {
            uuid: advisory.uuid.clone(),
            identifier: advisory.identifier.clone(),
            title: advisory.title.clone(),
            importer: advisory.labels.get("importer").cloned(),
        }
    }
}

/// One vulnerability with one status, merged across advisories
#[derive(Debug, Clone, PartialEq)]
pub struct SbomVulnerability {
    pub identifier: String,
    pub title: Option<String>,
    pub description: Option<String>,
    pub average_severity: Option<Severity>,
    pub average_score: Option<f64>,
    pub published: Option<String>,
    pub modified: Option<String>,
    pub status: String,
    pub advisories: Vec<AdvisoryRef>,
    pub packages: Vec<SbomPackage>,
}

impl SbomVulnerability {
    fn new(status: &SbomAdvisoryStatus) -> Self {
        Self {
            identifier: status.identifier.clone(),
            title: status.title.clone(),
            description: status.description.clone(),
            average_severity: status.average_severity,
            average_score: status.average_score,
            published: status.published.clone(),
            modified: status.modified.clone(),
            status: status.status.clone(),
            advisories: Vec::new(),
            packages: Vec::new(),
        }
    }

    pub fn key(&self) -> String {
        format!("{}-{}", self.identifier, self.status)
    }

    pub fn severity(&self) -> Option<Severity> {
        self.average_severity
            .or_else(|| self.average_score.map(Severity::from_score))
    }

    pub fn importers(&self) -> Vec<String> {
        let mut importers: Vec<String> = self
            .advisories
            .iter()
            .filter_map(|a| a.importer.clone())
            .collect();
        importers.sort();
        importers.dedup();
        importers
    }
}

/// Rows in first-seen order; advisories deduplicated by uuid, packages by id
pub fn group_sbom_vulnerabilities(advisories: &[SbomAdvisory]) -> Vec<SbomVulnerability> {
    let mut rows: Vec<SbomVulnerability> = Vec::new();
    let mut index: HashMap<(String, String), usize> = HashMap::new();

    for advisory in advisories {
        for status in &advisory.status {
            let position = *index
                .entry((status.identifier.clone(), status.status.clone()))
                .or_insert_with(|| {
                    rows.push(SbomVulnerability::new(status));
                    rows.len() - 1
                });
            let row = &mut rows[position];
            if !row.advisories.iter().any(|a| a.uuid == advisory.uuid) {
                row.advisories.push(AdvisoryRef::from(advisory));
            }
            for package in &status.packages {
                if !row.packages.iter().any(|p| p.id == package.id) {
                    row.packages.push(package.clone());
                }
            }
        }
    }
    rows
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct VulnerabilityCounts {
    pub total: usize,
    pub by_severity: BTreeMap<Severity, usize>,
    pub by_status: BTreeMap<String, usize>,
}

/// Vulnerabilities without a severity count as `None`
pub fn count_vulnerabilities(rows: &[SbomVulnerability]) -> VulnerabilityCounts {
    let mut counts = VulnerabilityCounts {
        total: rows.len(),
        ..Default::default()
    };
    for row in rows {
        *counts
            .by_severity
            .entry(row.severity().unwrap_or(Severity::None))
            .or_default() += 1;
        *counts.by_status.entry(row.status.clone()).or_default() += 1;
    }
    counts
}

/// Line of the affected packages sub-table; one per package URL
#[derive(Debug, Clone, PartialEq)]
pub struct AffectedPackageRow {
    pub key: String,
    pub purl_uuid: Option<String>,
    pub purl_type: Option<String>,
    pub namespace: Option<String>,
    pub name: String,
    pub version: Option<String>,
    pub path: Option<String>,
    pub qualifiers: Vec<String>,
}

pub fn affected_package_rows(packages: &[SbomPackage]) -> Vec<AffectedPackageRow> {
    packages
        .iter()
        .flat_map(|package| {
            if package.purl.is_empty() {
                return vec![AffectedPackageRow {
                    key: package.id.clone(),
                    purl_uuid: None,
                    purl_type: None,
                    namespace: None,
                    name: package.name.clone(),
                    version: package.version.clone(),
                    path: None,
                    qualifiers: Vec::new(),
                }];
            }
            package
                .purl
                .iter()
                .map(|purl| match DecomposedPurl::parse(&purl.purl) {
                    Ok(parsed) => AffectedPackageRow {
                        key: format!("{}-{}", package.id, purl.purl),
                        purl_uuid: purl.uuid.clone(),
                        purl_type: Some(parsed.purl_type.clone()),
                        qualifiers: parsed.qualifier_strings(),
                        namespace: parsed.namespace,
                        name: parsed.name,
                        version: parsed.version,
                        path: parsed.path,
                    },
                    Err(e) => {
                        log::debug!("unparsable purl {:?}: {}", purl.purl, e);
                        AffectedPackageRow {
                            key: format!("{}-{}", package.id, purl.purl),
                            purl_uuid: purl.uuid.clone(),
                            purl_type: None,
                            namespace: None,
                            name: package.name.clone(),
                            version: package.version.clone(),
                            path: None,
                            qualifiers: Vec::new(),
                        }
                    }
                })
                .collect()
        })
        .collect()
}

pub fn status_options() -> Vec<FilterSelectOption> {
    VULNERABILITY_STATUSES
        .iter()
        .map(|(code, label)| FilterSelectOption::new(*code, *label))
        .collect()
}

/// Importer choices are known only once the advisories are loaded
pub fn importer_options(rows: &[SbomVulnerability]) -> Vec<FilterSelectOption> {
    let mut names: Vec<String> = rows.iter().flat_map(SbomVulnerability::importers).collect();
    names.sort();
    names.dedup();
    names
        .into_iter()
        .map(|n| FilterSelectOption::new(n.clone(), n))
        .collect()
}

pub fn create_table_config() -> TableControlConfig {
    TableControlConfig::new("vulnerability-table", SBOM_VULNERABILITY_TABLE_PREFIX)
        .persist_to(PersistTarget::UrlParams)
        .column("vulnerabilityId", "Vulnerability ID")
        .column("description", "Description")
        .column("severity", "Severity")
        .column("status", "Status")
        .column(AFFECTED_PACKAGES_COLUMN, "Affected packages")
        .column("published", "Published")
        .column("updated", "Updated")
        .filter(FilterCategory::search("vulnerabilityId", "Vulnerability ID").with_placeholder("Search by ID..."))
        .filter(FilterCategory::async_multiselect("importer", "Importer").with_placeholder("Importer"))
        .filter(FilterCategory::multiselect("status", "Status", status_options()).with_placeholder("Status"))
        .initial_filter("status", FilterValue::multi(["affected"]))
        .sortable(&["vulnerabilityId", AFFECTED_PACKAGES_COLUMN, "published", "updated"])
        .paginated(10)
        .expandable_cells(&[AFFECTED_PACKAGES_COLUMN])
}

fn date_value(value: Option<&String>) -> SortValue {
    value
        .and_then(|v| parse_date_prefix(v))
        .map(SortValue::Date)
        .unwrap_or(SortValue::None)
}

pub fn accessors() -> ItemAccessors<SbomVulnerability> {
    ItemAccessors::new(SbomVulnerability::key)
        .filter_by(|v, key| match key {
            "vulnerabilityId" => vec![v.identifier.clone()],
            "importer" => v.importers(),
            "status" => vec![v.status.clone()],
            _ => Vec::new(),
        })
        .sort_by(|v, column| match column {
            "vulnerabilityId" => SortValue::text(v.identifier.clone()),
            AFFECTED_PACKAGES_COLUMN => SortValue::Number(v.packages.len() as f64),
            "published" => date_value(v.published.as_ref()),
            "updated" => date_value(v.modified.as_ref()),
            _ => SortValue::None,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::table_controls::{derive_local_table_controls, ActiveSort, TableControlState};

    fn advisories() -> Vec<SbomAdvisory> {
        serde_json::from_str(
            r#"[
                {
                    "uuid": "a1",
                    "identifier": "RHSA-1",
                    "labels": {"importer": "redhat-csaf"},
                    "status": [
                        {"identifier": "CVE-1", "status": "affected", "average_score": 9.8, "published": "2024-03-01T00:00:00Z",
                         "packages": [{"id": "p1", "name": "openssl", "purl": [{"uuid": "u1", "purl": "pkg:rpm/redhat/openssl@3.0.7?arch=x86_64"}]}]},
                        {"identifier": "CVE-2", "status": "fixed", "average_severity": "low",
                         "packages": [{"id": "p2", "name": "zlib"}]}
                    ]
                },
                {
                    "uuid": "a2",
                    "identifier": "GHSA-1",
                    "labels": {"importer": "osv-github"},
                    "status": [
                        {"identifier": "CVE-1", "status": "affected", "average_score": 9.8, "published": "2024-03-01T00:00:00Z",
                         "packages": [
                            {"id": "p1", "name": "openssl", "purl": [{"uuid": "u1", "purl": "pkg:rpm/redhat/openssl@3.0.7?arch=x86_64"}]},
                            {"id": "p3", "name": "curl"}
                         ]}
                    ]
                }
            ]"#,
        )
        .unwrap()
    }

    #[test]
    fn test_grouping_merges_advisories_and_packages() {
        let rows = group_sbom_vulnerabilities(&advisories());
        assert_eq!(rows.iter().map(|r| r.key()).collect::<Vec<_>>(), vec!["CVE-1-affected", "CVE-2-fixed"]);

        let cve1 = &rows[0];
        assert_eq!(
            cve1.advisories.iter().map(|a| a.identifier.as_str()).collect::<Vec<_>>(),
            vec!["RHSA-1", "GHSA-1"]
        );
        assert_eq!(cve1.packages.iter().map(|p| p.id.as_str()).collect::<Vec<_>>(), vec!["p1", "p3"]);
        assert_eq!(cve1.importers(), vec!["osv-github", "redhat-csaf"]);
        assert_eq!(cve1.severity(), Some(Severity::Critical));
    }

    #[test]
    fn test_counts_by_status_and_severity() {
        let counts = count_vulnerabilities(&group_sbom_vulnerabilities(&advisories()));
        assert_eq!(counts.total, 2);
        assert_eq!(counts.by_status.get("affected"), Some(&1));
        assert_eq!(counts.by_status.get("fixed"), Some(&1));
        assert_eq!(counts.by_severity.get(&Severity::Critical), Some(&1));
        assert_eq!(counts.by_severity.get(&Severity::Low), Some(&1));
    }

    #[test]
    fn test_only_affected_rows_by_default() {
        let rows = group_sbom_vulnerabilities(&advisories());
        let config = create_table_config();
        let state = TableControlState::new(&config);
        let controls = derive_local_table_controls(&config, &state, accessors(), Some(&rows), false, None);
        assert_eq!(controls.current_page_ids(), vec!["CVE-1-affected"]);
    }

    #[test]
    fn test_sort_by_affected_package_count() {
        let rows = group_sbom_vulnerabilities(&advisories());
        let config = create_table_config();
        let mut state = TableControlState::new(&config);
        state.set_filter_value(&config, "status", None).unwrap();
        state
            .set_active_sort(&config, Some(ActiveSort::asc(AFFECTED_PACKAGES_COLUMN)))
            .unwrap();
        let controls = derive_local_table_controls(&config, &state, accessors(), Some(&rows), false, None);
        assert_eq!(controls.current_page_ids(), vec!["CVE-2-fixed", "CVE-1-affected"]);

        state
            .set_filter_value(&config, "importer", Some(FilterValue::multi(["osv-github"])))
            .unwrap();
        let controls = derive_local_table_controls(&config, &state, accessors(), Some(&rows), false, None);
        assert_eq!(controls.current_page_ids(), vec!["CVE-1-affected"]);
        assert_eq!(importer_options(&rows).len(), 2);
    }

    #[test]
    fn test_affected_package_rows_decompose_purls() {
        let rows = group_sbom_vulnerabilities(&advisories());
        let packages = affected_package_rows(&rows[0].packages);
        assert_eq!(packages.len(), 2);
        assert_eq!(packages[0].purl_type.as_deref(), Some("rpm"));
        assert_eq!(packages[0].namespace.as_deref(), Some("redhat"));
        assert_eq!(packages[0].name, "openssl");
        assert_eq!(packages[0].version.as_deref(), Some("3.0.7"));
        assert_eq!(packages[0].qualifiers, vec!["arch=x86_64"]);
        assert_eq!(packages[0].purl_uuid.as_deref(), Some("u1"));
        // no purl: falls back to the package's own name
        assert_eq!(packages[1].name, "curl");
        assert_eq!(packages[1].purl_type, None);
    }

    #[test]
    fn test_status_label() {
        assert_eq!(status_label("known_not_affected"), "Known not affected");
        assert_eq!(status_label("other"), "other");
    }
}
