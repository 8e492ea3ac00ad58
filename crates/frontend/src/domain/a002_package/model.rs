use contracts::domain::a002_package::dto::PurlSummary;
use contracts::shared::hub::{HubPaginatedResult, HubRequestParams};

use crate::shared::api_utils::{api_url, get_hub_paginated_result, get_json, ApiError};

pub const PACKAGES_PATH: &str = "/purl";

pub async fn fetch_packages(
    params: HubRequestParams,
) -> Result<HubPaginatedResult<PurlSummary>, ApiError> {
    get_hub_paginated_result(PACKAGES_PATH, &params, &[]).await
}

pub async fn fetch_package(id: String) -> Result<PurlSummary, ApiError> {
    get_json(&api_url(&format!("{}/{}", PACKAGES_PATH, urlencoding::encode(&id)))).await
}
