use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::domain::a002_package::dto::{PurlRef, PurlVersion};
use crate::domain::a003_advisory::dto::AdvisoryIssuer;
use crate::enums::Severity;

/// Row of `GET /api/v2/vulnerability`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VulnerabilitySummary {
    pub identifier: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub average_score: Option<f64>,
    #[serde(default)]
    pub average_severity: Option<Severity>,
    #[serde(default)]
    pub cwes: Vec<String>,
    #[serde(default)]
    pub published: Option<String>,
    #[serde(default)]
    pub modified: Option<String>,
    #[serde(default)]
    pub withdrawn: Option<String>,
}

impl VulnerabilitySummary {
    /// Severity from the server, or derived from the score when only that is present
    pub fn severity(&self) -> Option<Severity> {
        self.average_severity
            .or_else(|| self.average_score.map(Severity::from_score))
    }
}

/// Package a vulnerability advisory makes a statement about
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AffectedPurl {
    #[serde(default)]
    pub base_purl: Option<PurlRef>,
    #[serde(default)]
    pub version: Option<PurlVersion>,
}

impl AffectedPurl {
    /// Most specific purl known for the entry
    pub fn purl(&self) -> Option<&str> {
        self.version
            .as_ref()
            .map(|v| v.purl.as_str())
            .or_else(|| self.base_purl.as_ref().map(|b| b.purl.as_str()))
    }
}

/// Advisory embedded in a vulnerability's details
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VulnerabilityAdvisory {
    pub uuid: String,
    pub identifier: String,
    #[serde(default)]
    pub document_id: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub issuer: Option<AdvisoryIssuer>,
    #[serde(default)]
    pub published: Option<String>,
    #[serde(default)]
    pub modified: Option<String>,
    #[serde(default)]
    pub severity: Option<Severity>,
    #[serde(default)]
    pub score: Option<f64>,
    /// Status (`affected`, `fixed`, ...) -> packages it applies to
    #[serde(default)]
    pub purls: BTreeMap<String, Vec<AffectedPurl>>,
}

/// Response of `GET /api/v2/vulnerability/{id}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VulnerabilityDetails {
    pub identifier: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub average_score: Option<f64>,
    #[serde(default)]
    pub average_severity: Option<Severity>,
    #[serde(default)]
    pub cwes: Vec<String>,
    #[serde(default)]
    pub reserved: Option<String>,
    #[serde(default)]
    pub published: Option<String>,
    #[serde(default)]
    pub modified: Option<String>,
    #[serde(default)]
    pub withdrawn: Option<String>,
    #[serde(default)]
    pub advisories: Vec<VulnerabilityAdvisory>,
}

impl VulnerabilityDetails {
    pub fn severity(&self) -> Option<Severity> {
        self.average_severity
            .or_else(|| self.average_score.map(Severity::from_score))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_falls_back_to_score() {
        let vuln: VulnerabilitySummary =
            serde_json::from_str(r#"{"identifier":"CVE-2023-0001","average_score":7.5}"#).unwrap();
        assert_eq!(vuln.severity(), Some(Severity::High));
    }

    #[test]
    fn test_vulnerability_details_with_advisories() {
        let json = r#"{
            "identifier": "CVE-2024-1",
            "average_severity": "critical",
            "advisories": [{
                "uuid": "u1",
                "identifier": "RHSA-1",
                "issuer": {"name": "Red Hat"},
                "purls": {
                    "affected": [{"base_purl": {"purl": "pkg:npm/left-pad"}}],
                    "fixed": [{"version": {"purl": "pkg:npm/left-pad@1.3.0", "version": "1.3.0"}}]
                }
            }]
        }"#;
        let vuln: VulnerabilityDetails = serde_json::from_str(json).unwrap();
        assert_eq!(vuln.severity(), Some(Severity::Critical));
        let advisory = &vuln.advisories[0];
        assert_eq!(advisory.purls["affected"][0].purl(), Some("pkg:npm/left-pad"));
        assert_eq!(advisory.purls["fixed"][0].purl(), Some("pkg:npm/left-pad@1.3.0"));
    }
}
