use serde::{Deserialize, Serialize};

/// Row of `GET /api/v2/license`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LicenseSummary {
    pub license: String,
}
