use leptos::prelude::*;
use leptos_router::hooks::use_params_map;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathParam {
    SbomId,
    AdvisoryId,
    PackageId,
    VulnerabilityId,
    ImporterName,
}

impl PathParam {
    /// Segment name used in route definitions (`/sboms/:sbom_id`)
    pub fn key(&self) -> &'static str {
        match self {
            PathParam::SbomId => "sbom_id",
            PathParam::AdvisoryId => "advisory_id",
            PathParam::PackageId => "package_id",
            PathParam::VulnerabilityId => "vulnerability_id",
            PathParam::ImporterName => "importer_name",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteParamError {
    #[error("required path parameter not set: {0}")]
    Missing(&'static str),
}

/// Non-empty value of a required parameter
pub fn required_param(value: Option<String>, param: PathParam) -> Result<String, RouteParamError> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or(RouteParamError::Missing(param.key()))
}

/// Reactive lookup of a required route parameter
pub fn use_required_param(param: PathParam) -> Memo<Result<String, RouteParamError>> {
    let params = use_params_map();
    Memo::new(move |_| required_param(params.read().get(param.key()), param))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_param() {
        assert_eq!(
            required_param(Some("urn:uuid:1".to_string()), PathParam::SbomId),
            Ok("urn:uuid:1".to_string())
        );
        assert_eq!(
            required_param(None, PathParam::SbomId),
            Err(RouteParamError::Missing("sbom_id"))
        );
        assert_eq!(
            required_param(Some(" ".to_string()), PathParam::AdvisoryId),
            Err(RouteParamError::Missing("advisory_id"))
        );
        assert_eq!(
            required_param(Some("CVE-2024-3094".to_string()), PathParam::VulnerabilityId),
            Ok("CVE-2024-3094".to_string())
        );
        assert_eq!(
            required_param(None, PathParam::ImporterName),
            Err(RouteParamError::Missing("importer_name"))
        );
    }
}
