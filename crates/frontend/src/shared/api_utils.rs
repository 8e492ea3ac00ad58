//! REST helpers for the hub API
//!
//! Every listing endpoint takes `q`, `sort`, `offset` and `limit` and answers
//! with `{ items, total }`.

use contracts::shared::hub::{HubPaginatedResult, HubRequestParams, PaginatedResponse};
use gloo_net::http::{Request, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

use crate::shared::table_controls::{query_key, serialize_request_params_for_hub, to_query_string};

pub const API_PREFIX: &str = "/api/v2";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    #[error("Network error: {0}")]
    Request(String),

    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },

    #[error("Unexpected response: {0}")]
    Decode(String),
}

/// Origin the client was served from; the API lives on the same origin
pub fn api_base() -> String {
    web_sys::window()
        .and_then(|w| w.location().origin().ok())
        .unwrap_or_default()
}

/// Full URL of an API path such as `/sbom`
pub fn api_url(path: &str) -> String {
    format!("{}{}{}", api_base(), API_PREFIX, path)
}

/// Query string of a listing request, extra params appended after the hub ones
pub fn list_query(params: &HubRequestParams, extra: &[(&str, &str)]) -> String {
    let mut pairs = serialize_request_params_for_hub(params);
    pairs.extend(extra.iter().map(|(k, v)| (k.to_string(), v.to_string())));
    to_query_string(&pairs)
}

async fn check(response: Response) -> Result<Response, ApiError> {
    if response.ok() {
        return Ok(response);
    }
    let status = response.status();
    let message = response
        .text()
        .await
        .ok()
        .filter(|t| !t.trim().is_empty())
        .unwrap_or_else(|| response.status_text());
    Err(ApiError::Http { status, message })
}

pub async fn get_json<T: DeserializeOwned>(url: &str) -> Result<T, ApiError> {
    log::debug!("GET {}", url);
    let response = Request::get(url)
        .send()
        .await
        .map_err(|e| ApiError::Request(e.to_string()))?;
    check(response)
        .await?
        .json::<T>()
        .await
        .map_err(|e| ApiError::Decode(e.to_string()))
}

pub async fn get_hub_paginated_result<T: DeserializeOwned>(
    path: &str,
    params: &HubRequestParams,
    extra: &[(&str, &str)],
) -> Result<HubPaginatedResult<T>, ApiError> {
    let query = list_query(params, extra);
    let url = if query.is_empty() {
        api_url(path)
    } else {
        format!("{}?{}", api_url(path), query)
    };
    log::debug!("list {}", query_key(path.trim_start_matches('/'), params));
    let page: PaginatedResponse<T> = get_json(&url).await?;
    Ok(HubPaginatedResult {
        data: page.items,
        total: page.total,
        params: params.clone(),
    })
}

/// POST a file as the raw request body
pub async fn upload_file<T: DeserializeOwned>(
    path: &str,
    file: web_sys::File,
    content_type: &str,
) -> Result<T, ApiError> {
    let url = api_url(path);
    log::debug!("POST {} ({})", url, content_type);
    let response = Request::post(&url)
        .header("Content-Type", content_type)
        .body(file)
        .map_err(|e| ApiError::Request(e.to_string()))?
        .send()
        .await
        .map_err(|e| ApiError::Request(e.to_string()))?;
    check(response)
        .await?
        .json::<T>()
        .await
        .map_err(|e| ApiError::Decode(e.to_string()))
}

async fn send_json<B: Serialize>(request: RequestBuilder, body: &B) -> Result<(), ApiError> {
    let response = request
        .json(body)
        .map_err(|e| ApiError::Request(e.to_string()))?
        .send()
        .await
        .map_err(|e| ApiError::Request(e.to_string()))?;
    check(response).await.map(|_| ())
}

/// POST a JSON body; the response body is ignored
pub async fn post_json<B: Serialize>(path: &str, body: &B) -> Result<(), ApiError> {
    let url = api_url(path);
    log::debug!("POST {}", url);
    send_json(Request::post(&url), body).await
}

/// PUT a JSON body; the response body is ignored
pub async fn put_json<B: Serialize>(path: &str, body: &B) -> Result<(), ApiError> {
    let url = api_url(path);
    log::debug!("PUT {}", url);
    send_json(Request::put(&url), body).await
}

pub async fn delete(path: &str) -> Result<(), ApiError> {
    let url = api_url(path);
    log::debug!("DELETE {}", url);
    let response = Request::delete(&url)
        .send()
        .await
        .map_err(|e| ApiError::Request(e.to_string()))?;
    check(response).await.map(|_| ())
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::shared::hub::HubPage;

    #[test]
    fn test_list_query_appends_extra_params() {
        let params = HubRequestParams {
            page: Some(HubPage {
                page_number: 2,
                items_per_page: 10,
            }),
            ..Default::default()
        };
        assert_eq!(
            list_query(&params, &[("id", "pkg:npm/a b")]),
            "offset=10&limit=10&id=pkg%3Anpm%2Fa%20b"
        );
        assert_eq!(list_query(&HubRequestParams::default(), &[]), "");
    }

    #[test]
    fn test_error_messages() {
        let err = ApiError::Http {
            status: 404,
            message: "Not Found".to_string(),
        };
        assert_eq!(err.to_string(), "HTTP 404: Not Found");
    }
}
