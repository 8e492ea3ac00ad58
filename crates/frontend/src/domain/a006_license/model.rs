use contracts::shared::hub::{HubPaginatedResult, HubRequestParams};
use contracts::shared::license::LicenseSummary;

use crate::shared::api_utils::{get_hub_paginated_result, ApiError};

pub const LICENSES_PATH: &str = "/license";

pub async fn fetch_license_page(
    params: HubRequestParams,
) -> Result<HubPaginatedResult<LicenseSummary>, ApiError> {
    get_hub_paginated_result(LICENSES_PATH, &params, &[]).await
}
