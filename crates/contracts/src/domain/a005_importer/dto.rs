use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::shared::labels::Labels;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImporterType {
    Sbom,
    Csaf,
    Osv,
    Cve,
    Cwe,
    Quay,
}

impl ImporterType {
    pub fn code(&self) -> &'static str {
        match self {
            ImporterType::Sbom => "sbom",
            ImporterType::Csaf => "csaf",
            ImporterType::Osv => "osv",
            ImporterType::Cve => "cve",
            ImporterType::Cwe => "cwe",
            ImporterType::Quay => "quay",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            ImporterType::Sbom => "SBOM",
            ImporterType::Csaf => "CSAF",
            ImporterType::Osv => "OSV",
            ImporterType::Cve => "CVE",
            ImporterType::Cwe => "CWE",
            ImporterType::Quay => "Quay",
        }
    }

    pub fn all() -> Vec<ImporterType> {
        vec![
            ImporterType::Sbom,
            ImporterType::Csaf,
            ImporterType::Osv,
            ImporterType::Cve,
            ImporterType::Cwe,
            ImporterType::Quay,
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImporterState {
    Waiting,
    Running,
}

/// Settings of one importer. Type specific fields are left out of the
/// payload when unset so each kind only receives what it understands.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImporterConfigurationValues {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub period: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(default)]
    pub disabled: bool,
    #[serde(default, skip_serializing_if = "Labels::is_empty")]
    pub labels: Labels,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub v3_signatures: bool,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub ignore_missing: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fetch_retries: Option<u32>,
    /// Byte size such as `100MB`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size_limit: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub only_patterns: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub keys: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub branch: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub years: Vec<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_year: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub concurrency: Option<u32>,
}

/// Body of `POST`/`PUT /api/v2/importer/{name}`: the importer kind mapped to its settings
pub type ImporterConfiguration = BTreeMap<ImporterType, ImporterConfigurationValues>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImporterProgress {
    #[serde(default)]
    pub current: u64,
    #[serde(default)]
    pub total: Option<u64>,
    #[serde(default)]
    pub percent: Option<f64>,
}

/// Row of `GET /api/v2/importer` (the endpoint returns the whole list, unpaginated)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Importer {
    pub name: String,
    #[serde(default)]
    pub configuration: ImporterConfiguration,
    #[serde(default)]
    pub state: Option<ImporterState>,
    #[serde(default)]
    pub last_change: Option<String>,
    #[serde(default)]
    pub last_success: Option<String>,
    #[serde(default)]
    pub last_run: Option<String>,
    #[serde(default)]
    pub last_error: Option<String>,
    #[serde(default)]
    pub progress: Option<ImporterProgress>,
}

impl Importer {
    /// The first configured importer kind; an importer has exactly one in practice
    pub fn importer_type(&self) -> Option<ImporterType> {
        self.configuration.keys().next().copied()
    }

    pub fn configuration_values(&self) -> Option<&ImporterConfigurationValues> {
        self.configuration.values().next()
    }

    pub fn is_enabled(&self) -> bool {
        self.configuration_values()
            .map(|c| !c.disabled)
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_importer_type_and_enabled() {
        let json = r#"{
            "name": "redhat-csaf",
            "configuration": {"csaf": {"source": "https://redhat.com", "period": "1d", "disabled": false}},
            "state": "running"
        }"#;
        let importer: Importer = serde_json::from_str(json).unwrap();
        assert_eq!(importer.importer_type(), Some(ImporterType::Csaf));
        assert!(importer.is_enabled());
        assert_eq!(importer.state, Some(ImporterState::Running));
    }

    #[test]
    fn test_unset_type_specific_fields_are_omitted() {
        let mut configuration = ImporterConfiguration::new();
        configuration.insert(
            ImporterType::Cve,
            ImporterConfigurationValues {
                source: Some("https://github.com/CVEProject/cvelistV5".to_string()),
                period: Some("1h".to_string()),
                start_year: Some(2020),
                ..Default::default()
            },
        );
        assert_eq!(
            serde_json::to_string(&configuration).unwrap(),
            r#"{"cve":{"period":"1h","source":"https://github.com/CVEProject/cvelistV5","disabled":false,"startYear":2020}}"#
        );
    }
}
