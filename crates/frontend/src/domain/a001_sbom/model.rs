use contracts::domain::a001_sbom::dto::{SbomAdvisory, SbomSummary};
use contracts::domain::a002_package::dto::SbomPackageRow;
use contracts::shared::hub::{HubPage, HubPaginatedResult, HubRequestParams, HubSort, SortDirection};
use contracts::shared::labels::KeyValue;
use contracts::shared::license::LicenseSummary;

use crate::shared::api_utils::{api_url, delete, get_hub_paginated_result, get_json, ApiError};
use crate::shared::table_controls::to_query_string;

pub const SBOMS_PATH: &str = "/sbom";

pub async fn fetch_sboms(params: HubRequestParams) -> Result<HubPaginatedResult<SbomSummary>, ApiError> {
    get_hub_paginated_result(SBOMS_PATH, &params, &[]).await
}

pub async fn fetch_sbom(id: String) -> Result<SbomSummary, ApiError> {
    get_json(&api_url(&format!("{}/{}", SBOMS_PATH, urlencoding::encode(&id)))).await
}

pub async fn fetch_sbom_packages(
    id: String,
    params: HubRequestParams,
) -> Result<HubPaginatedResult<SbomPackageRow>, ApiError> {
    let path = format!("{}/{}/packages", SBOMS_PATH, urlencoding::encode(&id));
    get_hub_paginated_result(&path, &params, &[]).await
}

/// Advisories with the vulnerability statuses they state for the SBOM's packages
pub async fn fetch_sbom_advisories(id: String) -> Result<Vec<SbomAdvisory>, ApiError> {
    get_json(&api_url(&format!("{}/{}/advisory", SBOMS_PATH, urlencoding::encode(&id)))).await
}

/// SBOMs that contain the given package
pub async fn fetch_sboms_by_package(
    package_id: String,
    params: HubRequestParams,
) -> Result<HubPaginatedResult<SbomSummary>, ApiError> {
    let path = format!("{}/by-package", SBOMS_PATH);
    get_hub_paginated_result(&path, &params, &[("id", package_id.as_str())]).await
}

pub async fn delete_sbom(id: &str) -> Result<(), ApiError> {
    delete(&format!("{}/{}", SBOMS_PATH, urlencoding::encode(id))).await
}

/// Label pairs for the label filter's suggestions
pub async fn fetch_sbom_labels(filter_text: String) -> Result<Vec<KeyValue>, ApiError> {
    let query = to_query_string(&[
        ("filter_text".to_string(), filter_text),
        ("limit".to_string(), "1000".to_string()),
    ]);
    get_json(&format!("{}?{}", api_url("/sbom-labels"), query)).await
}

/// First ten licenses matching `filter_text`, ascending
pub async fn fetch_licenses(filter_text: String) -> Result<Vec<LicenseSummary>, ApiError> {
    let params = HubRequestParams {
        filters: Vec::new(),
        sort: Some(HubSort {
            field: "license".to_string(),
            direction: SortDirection::Asc,
        }),
        page: Some(HubPage {
            page_number: 1,
            items_per_page: 10,
        }),
    };
    let extra = [("q", filter_text.as_str())];
    let extra: &[(&str, &str)] = if filter_text.is_empty() { &[] } else { &extra };
    Ok(get_hub_paginated_result("/license", &params, extra).await?.data)
}
