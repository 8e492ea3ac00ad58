use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::shared::labels::Labels;

/// Reference to a package URL by uuid
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PurlRef {
    #[serde(default)]
    pub uuid: Option<String>,
    pub purl: String,
}

/// Row of `GET /api/v2/purl`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PurlSummary {
    pub uuid: String,
    pub purl: String,
    #[serde(default)]
    pub base: Option<PurlRef>,
    #[serde(default)]
    pub version: Option<PurlVersion>,
    #[serde(default)]
    pub qualifiers: BTreeMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PurlVersion {
    #[serde(default)]
    pub uuid: Option<String>,
    pub purl: String,
    pub version: String,
}

/// Row of `GET /api/v2/sbom/{id}/packages`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SbomPackageRow {
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
    #[serde(default)]
    pub labels: Labels,
}
