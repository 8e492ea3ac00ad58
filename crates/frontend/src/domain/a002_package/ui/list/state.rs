use contracts::domain::a002_package::dto::PurlSummary;

use crate::shared::purl::DecomposedPurl;
use crate::shared::table_controls::{
    FilterCategory, FilterSelectOption, ItemAccessors, PersistTarget, TableControlConfig,
    FILTER_TEXT_CATEGORY_KEY,
};

pub const PACKAGE_TABLE_PREFIX: &str = "pk";

pub fn create_table_config(is_selectable: bool) -> TableControlConfig {
    let config = TableControlConfig::new("packages", PACKAGE_TABLE_PREFIX)
        .persist_to(PersistTarget::UrlParams)
        .column("name", "Name")
        .column("namespace", "Namespace")
        .column("version", "Version")
        .column("type", "Type")
        .column("path", "Path")
        .column("qualifiers", "Qualifiers")
        .filter(FilterCategory::search(FILTER_TEXT_CATEGORY_KEY, "Filter text").with_placeholder("Search"))
        .filter(
            FilterCategory::multiselect(
                "type",
                "Type",
                vec![
                    FilterSelectOption::new("maven", "Maven"),
                    FilterSelectOption::new("rpm", "RPM"),
                    FilterSelectOption::new("npm", "NPM"),
                    FilterSelectOption::new("oci", "OCI"),
                ],
            )
            .with_placeholder("Type"),
        )
        .filter(
            FilterCategory::multiselect(
                "arch",
                "Architecture",
                vec![
                    FilterSelectOption::new("x86_64", "AMD 64bit"),
                    FilterSelectOption::new("aarch64", "ARM 64bit"),
                    FilterSelectOption::new("ppc64le", "PowerPC"),
                    FilterSelectOption::new("s390x", "S390"),
                    FilterSelectOption::new("noarch", "No Arch"),
                ],
            )
            .with_placeholder("Architecture"),
        )
        .paginated(10);
    if is_selectable {
        config.selectable()
    } else {
        config
    }
}

pub fn accessors() -> ItemAccessors<PurlSummary> {
    ItemAccessors::new(|p: &PurlSummary| p.uuid.clone())
}

/// Package row with its purl taken apart for the columns
#[derive(Debug, Clone, PartialEq)]
pub struct PackageCells {
    pub name: String,
    pub namespace: String,
    pub version: String,
    pub purl_type: String,
    pub path: String,
    pub qualifiers: Vec<String>,
}

impl PackageCells {
    pub fn from_summary(summary: &PurlSummary) -> Self {
        match DecomposedPurl::parse(&summary.purl) {
            Ok(purl) => Self {
                qualifiers: purl.qualifier_strings(),
                name: purl.name,
                namespace: purl.namespace.unwrap_or_default(),
                version: purl.version.unwrap_or_default(),
                purl_type: purl.purl_type,
                path: purl.path.unwrap_or_default(),
            },
            Err(e) => {
                log::debug!("showing raw purl {}: {}", summary.purl, e);
                Self {
                    name: summary.purl.clone(),
                    namespace: String::new(),
                    version: summary
                        .version
                        .as_ref()
                        .map(|v| v.version.clone())
                        .unwrap_or_default(),
                    purl_type: String::new(),
                    path: String::new(),
                    qualifiers: Vec::new(),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::table_controls::{
        get_hub_request_params, serialize_request_params_for_hub, FilterValue, TableControlState,
    };
    use std::collections::BTreeMap;

    fn summary(purl: &str) -> PurlSummary {
        PurlSummary {
            uuid: "u1".to_string(),
            purl: purl.to_string(),
            base: None,
            version: None,
            qualifiers: BTreeMap::new(),
        }
    }

    #[test]
    fn test_cells_from_purl() {
        let cells = PackageCells::from_summary(&summary(
            "pkg:rpm/redhat/openssl@3.0.7-18.el9?arch=x86_64&distro=rhel-9",
        ));
        assert_eq!(cells.name, "openssl");
        assert_eq!(cells.namespace, "redhat");
        assert_eq!(cells.version, "3.0.7-18.el9");
        assert_eq!(cells.purl_type, "rpm");
        assert_eq!(cells.qualifiers, vec!["arch=x86_64", "distro=rhel-9"]);
    }

    #[test]
    fn test_cells_from_broken_purl() {
        let cells = PackageCells::from_summary(&summary("openssl"));
        assert_eq!(cells.name, "openssl");
        assert!(cells.purl_type.is_empty());
    }

    #[test]
    fn test_package_request_params() {
        let config = create_table_config(true);
        let mut state = TableControlState::new(&config);
        state
            .set_filter_value(&config, "type", Some(FilterValue::multi(["rpm", "maven"])))
            .unwrap();
        state
            .set_filter_value(&config, "arch", Some(FilterValue::multi(["noarch"])))
            .unwrap();

        let pairs = serialize_request_params_for_hub(&get_hub_request_params(&config, &state));
        assert_eq!(
            pairs,
            vec![
                ("q".to_string(), "arch=noarch&type=maven|rpm".to_string()),
                ("offset".to_string(), "0".to_string()),
                ("limit".to_string(), "10".to_string()),
            ]
        );
    }
}
