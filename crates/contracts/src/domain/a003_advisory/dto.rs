use serde::{Deserialize, Serialize};

use crate::enums::Severity;
use crate::shared::labels::Labels;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdvisoryIssuer {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
}

/// Vulnerability entry embedded in an advisory row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdvisoryVulnerabilityRef {
    pub identifier: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub severity: Option<Severity>,
    #[serde(default)]
    pub score: Option<f64>,
}

/// Row of `GET /api/v2/advisory`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdvisorySummary {
    pub uuid: String,
    pub identifier: String,
    #[serde(default)]
    pub document_id: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub published: Option<String>,
    #[serde(default)]
    pub modified: Option<String>,
    #[serde(default)]
    pub issuer: Option<AdvisoryIssuer>,
    #[serde(default)]
    pub average_score: Option<f64>,
    #[serde(default)]
    pub average_severity: Option<Severity>,
    #[serde(default)]
    pub labels: Labels,
    #[serde(default)]
    pub vulnerabilities: Vec<AdvisoryVulnerabilityRef>,
}

/// Response of `POST /api/v2/advisory`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdvisoryUploadResponse {
    pub id: String,
    #[serde(default)]
    pub document_id: Option<String>,
}
