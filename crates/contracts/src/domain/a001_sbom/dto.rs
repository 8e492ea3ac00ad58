use serde::{Deserialize, Serialize};

use crate::domain::a002_package::dto::PurlRef;
use crate::domain::a003_advisory::dto::AdvisoryIssuer;
use crate::enums::Severity;
use crate::shared::labels::Labels;

/// Package an SBOM describes (its top-level component)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SbomPackage {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub purl: Vec<PurlRef>,
    #[serde(default)]
    pub cpe: Vec<String>,
    #[serde(default)]
    pub licenses: Vec<String>,
}

/// Row of `GET /api/v2/sbom`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SbomSummary {
    pub id: String,
    #[serde(default)]
    pub document_id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub authors: Vec<String>,
    #[serde(default)]
    pub suppliers: Vec<String>,
    /// RFC 3339 timestamp
    #[serde(default)]
    pub published: Option<String>,
    #[serde(default)]
    pub ingested: Option<String>,
    #[serde(default)]
    pub described_by: Vec<SbomPackage>,
    #[serde(default)]
    pub number_of_packages: Option<u64>,
    #[serde(default)]
    pub labels: Labels,
}

impl SbomSummary {
    /// Version of the first described package, shown in the "Version" column
    pub fn version(&self) -> Option<&str> {
        self.described_by
            .first()
            .and_then(|p| p.version.as_deref())
    }
}

/// Response of `POST /api/v2/sbom`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SbomUploadResponse {
    pub id: String,
    #[serde(default)]
    pub document_id: Option<String>,
}

/// Entry of `GET /api/v2/sbom/{id}/advisory`: one advisory and the
/// vulnerability statuses it states for packages of the SBOM
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SbomAdvisory {
    pub uuid: String,
    pub identifier: String,
    #[serde(default)]
    pub document_id: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub issuer: Option<AdvisoryIssuer>,
    #[serde(default)]
    pub labels: Labels,
    #[serde(default)]
    pub status: Vec<SbomAdvisoryStatus>,
}

/// A vulnerability as one advisory sees it for this SBOM
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SbomAdvisoryStatus {
    pub identifier: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub average_severity: Option<Severity>,
    #[serde(default)]
    pub average_score: Option<f64>,
    #[serde(default)]
    pub published: Option<String>,
    #[serde(default)]
    pub modified: Option<String>,
    /// `affected`, `fixed`, `not_affected`, ...
    pub status: String,
    #[serde(default)]
    pub packages: Vec<SbomPackage>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_sbom_summary() {
        let json = r#"{
            "id": "urn:uuid:0193",
            "name": "quarkus-bom",
            "described_by": [{"id": "p1", "name": "quarkus-bom", "version": "2.13.8.Final"}],
            "labels": {"type": "spdx"}
        }"#;
        let sbom: SbomSummary = serde_json::from_str(json).unwrap();
        assert_eq!(sbom.version(), Some("2.13.8.Final"));
        assert_eq!(sbom.labels.get("type").map(String::as_str), Some("spdx"));
        assert!(sbom.published.is_none());
    }

    #[test]
    fn test_sbom_advisory_statuses() {
        let json = r#"[{
            "uuid": "a1",
            "identifier": "RHSA-2024:0001",
            "labels": {"importer": "redhat-csaf"},
            "status": [{
                "identifier": "CVE-2024-1",
                "average_score": 9.1,
                "status": "affected",
                "packages": [{"id": "p1", "name": "openssl", "purl": [{"purl": "pkg:rpm/redhat/openssl@3.0"}]}]
            }]
        }]"#;
        let advisories: Vec<SbomAdvisory> = serde_json::from_str(json).unwrap();
        let status = &advisories[0].status[0];
        assert_eq!(status.status, "affected");
        assert_eq!(status.packages[0].purl[0].purl, "pkg:rpm/redhat/openssl@3.0");
        assert!(advisories[0].issuer.is_none());
    }
}
