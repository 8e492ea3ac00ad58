//! Package URLs: `pkg:type/namespace/name@version?qualifiers#subpath`.

use std::collections::BTreeMap;
use std::fmt;

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PurlError {
    #[error("purl must start with \"pkg:\"")]
    MissingScheme,

    #[error("purl has no name")]
    MissingName,

    #[error("invalid percent-encoding in {0:?}")]
    InvalidEncoding(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecomposedPurl {
    pub purl_type: String,
    pub namespace: Option<String>,
    pub name: String,
    pub version: Option<String>,
    pub qualifiers: BTreeMap<String, String>,
    /// Subpath after `#`
    pub path: Option<String>,
}

fn decode(raw: &str) -> Result<String, PurlError> {
    urlencoding::decode(raw)
        .map(|s| s.into_owned())
        .map_err(|_| PurlError::InvalidEncoding(raw.to_string()))
}

fn non_empty(value: String) -> Option<String> {
    (!value.is_empty()).then_some(value)
}

impl DecomposedPurl {
    pub fn parse(purl: &str) -> Result<Self, PurlError> {
        let purl = purl.trim();
        let rest = match purl.split_once(':') {
            Some((scheme, rest)) if scheme.eq_ignore_ascii_case("pkg") => {
                rest.trim_start_matches('/')
            }
            _ => return Err(PurlError::MissingScheme),
        };

        let (rest, path) = match rest.split_once('#') {
            Some((rest, path)) => {
                let path = path
                    .split('/')
                    .filter(|s| !s.is_empty() && *s != "." && *s != "..")
                    .map(decode)
                    .collect::<Result<Vec<_>, _>>()?
                    .join("/");
                (rest, non_empty(path))
            }
            None => (rest, None),
        };

        let (rest, qualifiers) = match rest.split_once('?') {
            Some((rest, query)) => {
                let mut qualifiers = BTreeMap::new();
                for pair in query.split('&') {
                    let Some((key, value)) = pair.split_once('=') else {
                        continue;
                    };
                    let value = decode(value)?;
                    if !key.is_empty() && !value.is_empty() {
                        qualifiers.insert(key.to_lowercase(), value);
                    }
                }
                (rest, qualifiers)
            }
            None => (rest, BTreeMap::new()),
        };

        let (rest, version) = match rest.rsplit_once('@') {
            Some((rest, version)) => (rest, non_empty(decode(version)?)),
            None => (rest, None),
        };

        let rest = rest.trim_end_matches('/');
        let (purl_type, rest) = rest.split_once('/').ok_or(PurlError::MissingName)?;

        let mut segments = rest
            .split('/')
            .filter(|s| !s.is_empty())
            .map(decode)
            .collect::<Result<Vec<_>, _>>()?;
        let name = segments.pop().ok_or(PurlError::MissingName)?;
        let namespace = non_empty(segments.join("/"));

        Ok(Self {
            purl_type: purl_type.to_lowercase(),
            namespace,
            name,
            version,
            qualifiers,
            path,
        })
    }

    fn write_base(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "pkg:{}/", self.purl_type)?;
        if let Some(namespace) = &self.namespace {
            for segment in namespace.split('/') {
                write!(f, "{}/", urlencoding::encode(segment))?;
            }
        }
        write!(f, "{}", urlencoding::encode(&self.name))
    }

    /// Purl without version, qualifiers and subpath
    pub fn base_purl(&self) -> String {
        struct Base<'a>(&'a DecomposedPurl);
        impl fmt::Display for Base<'_> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.write_base(f)
            }
        }
        Base(self).to_string()
    }

    /// Qualifiers as `key=value` strings, ordered by key
    pub fn qualifier_strings(&self) -> Vec<String> {
        self.qualifiers
            .iter()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect()
    }
}

impl fmt::Display for DecomposedPurl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_base(f)?;
        if let Some(version) = &self.version {
            write!(f, "@{}", urlencoding::encode(version))?;
        }
        if !self.qualifiers.is_empty() {
            let query = self
                .qualifiers
                .iter()
                .map(|(k, v)| format!("{}={}", k, urlencoding::encode(v)))
                .collect::<Vec<_>>()
                .join("&");
            write!(f, "?{}", query)?;
        }
        if let Some(path) = &self.path {
            write!(f, "#{}", path)?;
        }
        Ok(())
    }
}

impl std::str::FromStr for DecomposedPurl {
    type Err = PurlError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full() {
        let purl = DecomposedPurl::parse(
            "pkg:maven/io.quarkus/quarkus-core@3.2.1?type=jar&repository_url=https%3A%2F%2Frepo#src/main",
        )
        .unwrap();
        assert_eq!(purl.purl_type, "maven");
        assert_eq!(purl.namespace.as_deref(), Some("io.quarkus"));
        assert_eq!(purl.name, "quarkus-core");
        assert_eq!(purl.version.as_deref(), Some("3.2.1"));
        assert_eq!(
            purl.qualifiers.get("repository_url").map(String::as_str),
            Some("https://repo")
        );
        assert_eq!(purl.path.as_deref(), Some("src/main"));
        assert_eq!(purl.base_purl(), "pkg:maven/io.quarkus/quarkus-core");
    }

    #[test]
    fn test_parse_minimal_and_display() {
        let purl: DecomposedPurl = "pkg:npm/%40angular/core@16.0.0".parse().unwrap();
        assert_eq!(purl.namespace.as_deref(), Some("@angular"));
        assert_eq!(purl.to_string(), "pkg:npm/%40angular/core@16.0.0");

        let rpm = DecomposedPurl::parse("pkg:rpm/openssl").unwrap();
        assert_eq!(rpm.namespace, None);
        assert_eq!(rpm.version, None);
        assert_eq!(rpm.to_string(), "pkg:rpm/openssl");
    }

    #[test]
    fn test_qualifiers_are_ordered() {
        let purl = DecomposedPurl::parse("pkg:rpm/redhat/openssl@3.0?arch=x86_64&distro=rhel-9").unwrap();
        assert_eq!(purl.qualifier_strings(), vec!["arch=x86_64", "distro=rhel-9"]);
        assert_eq!(
            purl.to_string(),
            "pkg:rpm/redhat/openssl@3.0?arch=x86_64&distro=rhel-9"
        );
    }

    #[test]
    fn test_errors() {
        assert_eq!(DecomposedPurl::parse("maven/a/b"), Err(PurlError::MissingScheme));
        assert_eq!(DecomposedPurl::parse("pkg:maven"), Err(PurlError::MissingName));
        assert_eq!(DecomposedPurl::parse("pkg:maven/"), Err(PurlError::MissingName));
    }
}
