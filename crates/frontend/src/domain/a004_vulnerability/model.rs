use contracts::domain::a004_vulnerability::dto::{VulnerabilityDetails, VulnerabilitySummary};
use contracts::shared::hub::{HubPaginatedResult, HubRequestParams};

use crate::shared::api_utils::{api_url, get_hub_paginated_result, get_json, ApiError};

pub const VULNERABILITIES_PATH: &str = "/vulnerability";

pub async fn fetch_vulnerabilities(
    params: HubRequestParams,
) -> Result<HubPaginatedResult<VulnerabilitySummary>, ApiError> {
    get_hub_paginated_result(VULNERABILITIES_PATH, &params, &[]).await
}

pub async fn fetch_vulnerability(id: String) -> Result<VulnerabilityDetails, ApiError> {
    get_json(&api_url(&format!("{}/{}", VULNERABILITIES_PATH, urlencoding::encode(&id)))).await
}
