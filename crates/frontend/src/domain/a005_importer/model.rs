use contracts::domain::a005_importer::dto::{Importer, ImporterConfiguration};

use crate::shared::api_utils::{api_url, delete, get_json, post_json, put_json, ApiError};

pub const IMPORTERS_PATH: &str = "/importer";

fn importer_path(name: &str) -> String {
    format!("{}/{}", IMPORTERS_PATH, urlencoding::encode(name))
}

/// The importer endpoint is not paginated; the whole list comes back at once
pub async fn fetch_importers() -> Result<Vec<Importer>, ApiError> {
    get_json(&api_url(IMPORTERS_PATH)).await
}

pub async fn fetch_importer(name: String) -> Result<Importer, ApiError> {
    get_json(&api_url(&importer_path(&name))).await
}

pub async fn create_importer(name: &str, configuration: &ImporterConfiguration) -> Result<(), ApiError> {
    post_json(&importer_path(name), configuration).await
}

pub async fn update_importer(name: &str, configuration: &ImporterConfiguration) -> Result<(), ApiError> {
    put_json(&importer_path(name), configuration).await
}

pub async fn delete_importer(name: &str) -> Result<(), ApiError> {
    delete(&importer_path(name)).await
}
