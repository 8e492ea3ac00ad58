use contracts::domain::a003_advisory::dto::AdvisorySummary;
use contracts::shared::hub::{HubPaginatedResult, HubRequestParams};

use crate::shared::api_utils::{api_url, delete, get_hub_paginated_result, get_json, ApiError};

pub const ADVISORIES_PATH: &str = "/advisory";

pub async fn fetch_advisories(
    params: HubRequestParams,
) -> Result<HubPaginatedResult<AdvisorySummary>, ApiError> {
    get_hub_paginated_result(ADVISORIES_PATH, &params, &[]).await
}

pub async fn fetch_advisory(id: String) -> Result<AdvisorySummary, ApiError> {
    get_json(&api_url(&format!("{}/{}", ADVISORIES_PATH, urlencoding::encode(&id)))).await
}

pub async fn delete_advisory(id: &str) -> Result<(), ApiError> {
    delete(&format!("{}/{}", ADVISORIES_PATH, urlencoding::encode(id))).await
}
