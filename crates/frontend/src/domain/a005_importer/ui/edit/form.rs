//! Importer form: values as the user typed them, validation per step and the
//! configuration payload built from them.

use contracts::domain::a005_importer::dto::{
    Importer, ImporterConfiguration, ImporterConfigurationValues, ImporterType,
};
use contracts::shared::labels::Labels;
use thiserror::Error;

use crate::shared::model_utils::{labels_as_strings, split_string_as_key_value};

pub const PERIOD_UNITS: [&str; 7] = ["s", "m", "h", "days", "weeks", "months", "years"];
pub const SIZE_LIMIT_UNITS: [&str; 7] = ["B", "KB", "KiB", "MB", "MiB", "GB", "GiB"];

pub const NAME_MIN_LEN: usize = 3;
pub const NAME_MAX_LEN: usize = 120;
pub const DESCRIPTION_MAX_LEN: usize = 250;
pub const SOURCE_MIN_LEN: usize = 3;
pub const SOURCE_MAX_LEN: usize = 250;

/// Settings only some importer kinds understand
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigField {
    FetchRetries,
    IgnoreMissing,
    Keys,
    OnlyPatterns,
    SizeLimit,
    V3Signatures,
    Branch,
    Path,
    StartYear,
    Years,
    ApiToken,
    Namespace,
    Concurrency,
}

pub fn type_fields(importer_type: ImporterType) -> &'static [ConfigField] {
    use ConfigField::*;
    match importer_type {
        ImporterType::Sbom => &[FetchRetries, IgnoreMissing, Keys, OnlyPatterns, SizeLimit, V3Signatures],
        ImporterType::Csaf => &[FetchRetries, IgnoreMissing, OnlyPatterns, V3Signatures],
        ImporterType::Osv => &[Branch, Path, StartYear, Years],
        ImporterType::Cve => &[StartYear, Years],
        ImporterType::Cwe => &[],
        ImporterType::Quay => &[ApiToken, Namespace, SizeLimit, Concurrency],
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// First message reported for `field`
pub fn error_of(errors: &[FieldError], field: &str) -> Option<String> {
    errors
        .iter()
        .find(|e| e.field == field)
        .map(|e| e.message.clone())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormStep {
    #[default]
    General,
    Configuration,
    Review,
}

impl FormStep {
    pub fn all() -> [FormStep; 3] {
        [FormStep::General, FormStep::Configuration, FormStep::Review]
    }

    pub fn label(&self) -> &'static str {
        match self {
            FormStep::General => "General information",
            FormStep::Configuration => "Configuration",
            FormStep::Review => "Review",
        }
    }

    pub fn next(&self) -> Option<FormStep> {
        match self {
            FormStep::General => Some(FormStep::Configuration),
            FormStep::Configuration => Some(FormStep::Review),
            FormStep::Review => None,
        }
    }

    pub fn previous(&self) -> Option<FormStep> {
        match self {
            FormStep::General => None,
            FormStep::Configuration => Some(FormStep::General),
            FormStep::Review => Some(FormStep::Configuration),
        }
    }
}

/// Non-empty trimmed entries, one per line or comma
fn entries(text: &str) -> Vec<String> {
    text.split(|c| c == '\n' || c == ',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn optional(text: &str) -> Option<String> {
    let text = text.trim();
    (!text.is_empty()).then(|| text.to_string())
}

/// `60s` -> (`60`, `s`); long and short unit spellings map onto [`PERIOD_UNITS`]
pub fn split_period(period: &str) -> Option<(String, String)> {
    let period = period.trim();
    let digits = period.find(|c: char| !c.is_ascii_digit()).unwrap_or(period.len());
    let (value, unit) = period.split_at(digits);
    if value.is_empty() {
        return None;
    }
    let unit = match unit.trim() {
        "s" | "sec" | "secs" | "second" | "seconds" => "s",
        "m" | "min" | "mins" | "minute" | "minutes" => "m",
        "h" | "hr" | "hrs" | "hour" | "hours" => "h",
        "d" | "day" | "days" => "days",
        "w" | "week" | "weeks" => "weeks",
        "M" | "month" | "months" => "months",
        "y" | "year" | "years" => "years",
        _ => return None,
    };
    Some((value.to_string(), unit.to_string()))
}

/// `100 MB` or `100MB` -> (`100`, `MB`); a bare number is in bytes
pub fn split_size_limit(size: &str) -> Option<(String, String)> {
    let size = size.trim();
    let end = size
        .find(|c: char| !(c.is_ascii_digit() || c == '.'))
        .unwrap_or(size.len());
    let (value, unit) = size.split_at(end);
    if value.is_empty() {
        return None;
    }
    let unit = unit.trim();
    let unit = if unit.is_empty() {
        "B"
    } else {
        SIZE_LIMIT_UNITS
            .iter()
            .find(|u| u.eq_ignore_ascii_case(unit))
            .copied()?
    };
    Some((value.to_string(), unit.to_string()))
}

fn is_decimal(value: &str) -> bool {
    !value.is_empty()
        && value.chars().all(|c| c.is_ascii_digit() || c == '.')
        && value.parse::<f64>().is_ok()
}

fn is_url(value: &str) -> bool {
    ["http://", "https://"]
        .iter()
        .any(|scheme| value.len() > scheme.len() && value.starts_with(scheme))
}

#[derive(Debug, Clone, PartialEq)]
pub struct ImporterForm {
    pub importer_type: Option<ImporterType>,
    pub name: String,
    pub description: String,
    pub enabled: bool,
    /// `key=value`, one per line
    pub labels: String,

    pub source: String,
    pub period_value: String,
    pub period_unit: String,
    pub v3_signatures: bool,
    pub ignore_missing: bool,
    pub fetch_retries: String,
    pub size_limit_value: String,
    pub size_limit_unit: String,
    pub only_patterns: String,
    pub keys: String,
    pub branch: String,
    pub path: String,
    pub years: String,
    pub start_year: String,
    pub api_token: String,
    pub namespace: String,
    pub concurrency: String,
}

impl Default for ImporterForm {
    fn default() -> Self {
        Self {
            importer_type: None,
            name: String::new(),
            description: String::new(),
            enabled: true,
            labels: String::new(),
            source: String::new(),
            period_value: "60".to_string(),
            period_unit: "s".to_string(),
            v3_signatures: false,
            ignore_missing: false,
            fetch_retries: String::new(),
            size_limit_value: String::new(),
            size_limit_unit: "MB".to_string(),
            only_patterns: String::new(),
            keys: String::new(),
            branch: String::new(),
            path: String::new(),
            years: String::new(),
            start_year: String::new(),
            api_token: String::new(),
            namespace: String::new(),
            concurrency: String::new(),
        }
    }
}

impl ImporterForm {
    pub fn from_importer(importer: &Importer) -> Self {
        let defaults = Self::default();
        let values = importer.configuration_values().cloned().unwrap_or_default();
        let (period_value, period_unit) = values
            .period
            .as_deref()
            .and_then(split_period)
            .unwrap_or((defaults.period_value.clone(), defaults.period_unit.clone()));
        let (size_limit_value, size_limit_unit) = values
            .size_limit
            .as_deref()
            .and_then(split_size_limit)
            .unwrap_or((String::new(), defaults.size_limit_unit.clone()));
        let number = |n: Option<u32>| n.map(|n| n.to_string()).unwrap_or_default();

        Self {
            importer_type: importer.importer_type(),
            name: importer.name.clone(),
            description: values.description.unwrap_or_default(),
            enabled: !values.disabled,
            labels: labels_as_strings(&values.labels).join("\n"),
            source: values.source.unwrap_or_default(),
            period_value,
            period_unit,
            v3_signatures: values.v3_signatures,
            ignore_missing: values.ignore_missing,
            fetch_retries: number(values.fetch_retries),
            size_limit_value,
            size_limit_unit,
            only_patterns: values.only_patterns.join("\n"),
            keys: values.keys.join("\n"),
            branch: values.branch.unwrap_or_default(),
            path: values.path.unwrap_or_default(),
            years: values
                .years
                .iter()
                .map(u16::to_string)
                .collect::<Vec<_>>()
                .join(", "),
            start_year: values.start_year.map(|y| y.to_string()).unwrap_or_default(),
            api_token: values.api_token.unwrap_or_default(),
            namespace: values.namespace.unwrap_or_default(),
            concurrency: number(values.concurrency),
        }
    }

    pub fn has_field(&self, field: ConfigField) -> bool {
        self.importer_type
            .map(|t| type_fields(t).contains(&field))
            .unwrap_or(false)
    }

    /// Type and name are fixed once an importer exists, so editing skips their checks
    pub fn validate_general(&self, existing_names: &[String], is_edit: bool) -> Vec<FieldError> {
        let mut errors = Vec::new();
        if !is_edit {
            if self.importer_type.is_none() {
                errors.push(FieldError::new("type", "Type is required"));
            }
            let name = self.name.trim();
            let length = name.chars().count();
            if name.is_empty() {
                errors.push(FieldError::new("name", "Name is required"));
            } else if !(NAME_MIN_LEN..=NAME_MAX_LEN).contains(&length) {
                errors.push(FieldError::new(
                    "name",
                    format!("Name must be between {} and {} characters", NAME_MIN_LEN, NAME_MAX_LEN),
                ));
            } else if existing_names.iter().any(|n| n == name) {
                errors.push(FieldError::new(
                    "name",
                    "An importer with this name already exists. Use a different name.",
                ));
            }
        }
        if self.description.chars().count() > DESCRIPTION_MAX_LEN {
            errors.push(FieldError::new(
                "description",
                format!("Description must be at most {} characters", DESCRIPTION_MAX_LEN),
            ));
        }
        if entries(&self.labels)
            .iter()
            .any(|l| split_string_as_key_value(l).key.is_empty())
        {
            errors.push(FieldError::new("labels", "Labels must look like key=value"));
        }
        errors
    }

    pub fn validate_configuration(&self) -> Vec<FieldError> {
        let mut errors = Vec::new();
        let source = self.source.trim();
        let length = source.chars().count();
        if source.is_empty() {
            errors.push(FieldError::new("source", "Source is required"));
        } else if !(SOURCE_MIN_LEN..=SOURCE_MAX_LEN).contains(&length) {
            errors.push(FieldError::new(
                "source",
                format!("Source must be between {} and {} characters", SOURCE_MIN_LEN, SOURCE_MAX_LEN),
            ));
        }

        match self.period_value.trim().parse::<u32>() {
            Ok(n) if n >= 1 => {}
            _ => errors.push(FieldError::new("period", "Period must be a whole number of at least 1")),
        }
        if !PERIOD_UNITS.contains(&self.period_unit.as_str()) {
            errors.push(FieldError::new("period", "Unknown period unit"));
        }

        if self.has_field(ConfigField::FetchRetries)
            && !self.fetch_retries.trim().is_empty()
            && self.fetch_retries.trim().parse::<u32>().is_err()
        {
            errors.push(FieldError::new("fetchRetries", "Fetch retries must be a whole number"));
        }
        if self.has_field(ConfigField::SizeLimit) {
            let value = self.size_limit_value.trim();
            if !value.is_empty() && !is_decimal(value) {
                errors.push(FieldError::new("sizeLimit", "Size limit must be a number"));
            }
            if !SIZE_LIMIT_UNITS.contains(&self.size_limit_unit.as_str()) {
                errors.push(FieldError::new("sizeLimit", "Unknown size unit"));
            }
        }
        if self.has_field(ConfigField::Keys) && entries(&self.keys).iter().any(|k| !is_url(k)) {
            errors.push(FieldError::new("keys", "Keys must be http(s) URLs"));
        }
        if self.has_field(ConfigField::StartYear)
            && !self.start_year.trim().is_empty()
            && self.start_year.trim().parse::<u16>().is_err()
        {
            errors.push(FieldError::new("startYear", "Start year must be a year"));
        }
        if self.has_field(ConfigField::Years) && entries(&self.years).iter().any(|y| y.parse::<u16>().is_err()) {
            errors.push(FieldError::new("years", "Years must be a list of years"));
        }
        if self.has_field(ConfigField::Concurrency) && !self.concurrency.trim().is_empty() {
            match self.concurrency.trim().parse::<u32>() {
                Ok(n) if n >= 1 => {}
                _ => errors.push(FieldError::new("concurrency", "Concurrency must be at least 1")),
            }
        }
        errors
    }

    /// Errors that keep the user on `step`; the review step rechecks everything
    pub fn validate_step(&self, step: FormStep, existing_names: &[String], is_edit: bool) -> Vec<FieldError> {
        match step {
            FormStep::General => self.validate_general(existing_names, is_edit),
            FormStep::Configuration => self.validate_configuration(),
            FormStep::Review => {
                let mut errors = self.validate_general(existing_names, is_edit);
                errors.extend(self.validate_configuration());
                errors
            }
        }
    }

    fn labels_map(&self) -> Labels {
        entries(&self.labels)
            .iter()
            .map(|l| split_string_as_key_value(l))
            .map(|kv| (kv.key, kv.value))
            .collect()
    }

    /// Payload for the importer endpoint. Assumes a validated form; fields
    /// that fail to parse are left unset.
    pub fn to_configuration(&self) -> Option<ImporterConfiguration> {
        let importer_type = self.importer_type?;
        let has = |field| self.has_field(field);
        let mut values = ImporterConfigurationValues {
            description: optional(&self.description),
            period: Some(format!("{}{}", self.period_value.trim(), self.period_unit)),
            source: optional(&self.source),
            disabled: !self.enabled,
            labels: self.labels_map(),
            ..Default::default()
        };

        if has(ConfigField::FetchRetries) {
            values.fetch_retries = self.fetch_retries.trim().parse().ok();
        }
        if has(ConfigField::IgnoreMissing) {
            values.ignore_missing = self.ignore_missing;
        }
        if has(ConfigField::V3Signatures) {
            values.v3_signatures = self.v3_signatures;
        }
        if has(ConfigField::Keys) {
            values.keys = entries(&self.keys);
        }
        if has(ConfigField::OnlyPatterns) {
            values.only_patterns = entries(&self.only_patterns);
        }
        if has(ConfigField::SizeLimit) {
            values.size_limit = optional(&self.size_limit_value)
                .map(|value| format!("{}{}", value, self.size_limit_unit));
        }
        if has(ConfigField::Branch) {
            values.branch = optional(&self.branch);
        }
        if has(ConfigField::Path) {
            values.path = optional(&self.path);
        }
        if has(ConfigField::StartYear) {
            values.start_year = self.start_year.trim().parse().ok();
        }
        if has(ConfigField::Years) {
            values.years = entries(&self.years).iter().filter_map(|y| y.parse().ok()).collect();
        }
        if has(ConfigField::ApiToken) {
            values.api_token = optional(&self.api_token);
        }
        if has(ConfigField::Namespace) {
            values.namespace = optional(&self.namespace);
        }
        if has(ConfigField::Concurrency) {
            values.concurrency = self.concurrency.trim().parse().ok();
        }

        Some(ImporterConfiguration::from([(importer_type, values)]))
    }

    /// Label/value pairs shown on the review step
    pub fn review_entries(&self) -> Vec<(&'static str, String)> {
        let yes_no = |b: bool| (if b { "Yes" } else { "No" }).to_string();
        let mut rows = vec![
            ("Type", self.importer_type.map(|t| t.display_name()).unwrap_or_default().to_string()),
            ("Name", self.name.trim().to_string()),
            ("Description", self.description.trim().to_string()),
            ("Enabled", yes_no(self.enabled)),
            ("Labels", entries(&self.labels).join(", ")),
            ("Source", self.source.trim().to_string()),
            ("Period", format!("{}{}", self.period_value.trim(), self.period_unit)),
        ];
        let Some(importer_type) = self.importer_type else {
            return rows;
        };
        for field in type_fields(importer_type) {
            let row = match field {
                ConfigField::FetchRetries => ("Fetch retries", self.fetch_retries.trim().to_string()),
                ConfigField::IgnoreMissing => ("Ignore missing", yes_no(self.ignore_missing)),
                ConfigField::Keys => ("Keys", entries(&self.keys).join(", ")),
                ConfigField::OnlyPatterns => ("Only patterns", entries(&self.only_patterns).join(", ")),
                ConfigField::SizeLimit => (
                    "Size limit",
                    optional(&self.size_limit_value)
                        .map(|v| format!("{} {}", v, self.size_limit_unit))
                        .unwrap_or_default(),
                ),
                ConfigField::V3Signatures => ("v3 signatures", yes_no(self.v3_signatures)),
                ConfigField::Branch => ("Branch", self.branch.trim().to_string()),
                ConfigField::Path => ("Path", self.path.trim().to_string()),
                ConfigField::StartYear => ("Start year", self.start_year.trim().to_string()),
                ConfigField::Years => ("Years", entries(&self.years).join(", ")),
                // never echo the token back
                ConfigField::ApiToken => (
                    "API token",
                    (if self.api_token.trim().is_empty() { "" } else { "********" }).to_string(),
                ),
                ConfigField::Namespace => ("Namespace", self.namespace.trim().to_string()),
                ConfigField::Concurrency => ("Concurrency", self.concurrency.trim().to_string()),
            };
            rows.push(row);
        }
        rows
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sbom_form() -> ImporterForm {
        ImporterForm {
            importer_type: Some(ImporterType::Sbom),
            name: "  quarkus-sboms ".to_string(),
            description: "Quarkus SBOMs".to_string(),
            labels: "team=quarkus\nsource=redhat".to_string(),
            source: "https://access.redhat.com/security/data/sbom/beta/".to_string(),
            period_value: "1".to_string(),
            period_unit: "days".to_string(),
            v3_signatures: true,
            fetch_retries: "3".to_string(),
            size_limit_value: "100".to_string(),
            keys: "https://access.redhat.com/security/data/97f5eac4.txt".to_string(),
            branch: "ignored for sbom".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_name_rules() {
        let existing = vec!["quarkus-sboms".to_string()];
        let form = sbom_form();
        assert_eq!(
            error_of(&form.validate_general(&existing, false), "name").as_deref(),
            Some("An importer with this name already exists. Use a different name.")
        );
        // editing keeps the name it already has
        assert!(form.validate_general(&existing, true).is_empty());

        let short = ImporterForm {
            name: "ab".to_string(),
            ..sbom_form()
        };
        assert_eq!(
            error_of(&short.validate_general(&[], false), "name").as_deref(),
            Some("Name must be between 3 and 120 characters")
        );

        let untyped = ImporterForm {
            importer_type: None,
            ..sbom_form()
        };
        assert!(error_of(&untyped.validate_general(&[], false), "type").is_some());
    }

    #[test]
    fn test_description_and_labels() {
        let form = ImporterForm {
            description: "x".repeat(251),
            labels: "=nokey".to_string(),
            ..sbom_form()
        };
        let errors = form.validate_general(&[], false);
        assert!(error_of(&errors, "description").is_some());
        assert_eq!(error_of(&errors, "labels").as_deref(), Some("Labels must look like key=value"));
    }

    #[test]
    fn test_configuration_rules() {
        assert!(sbom_form().validate_configuration().is_empty());

        let form = ImporterForm {
            source: "ab".to_string(),
            period_value: "0".to_string(),
            size_limit_value: "1e3".to_string(),
            keys: "ftp://keys".to_string(),
            ..sbom_form()
        };
        let errors = form.validate_configuration();
        let fields: Vec<&str> = errors.iter().map(|e| e.field).collect();
        assert_eq!(fields, vec!["source", "period", "sizeLimit", "keys"]);

        // years only matter for kinds that use them
        let cve = ImporterForm {
            importer_type: Some(ImporterType::Cve),
            years: "2020, 20x1".to_string(),
            ..sbom_form()
        };
        assert_eq!(error_of(&cve.validate_configuration(), "years").as_deref(), Some("Years must be a list of years"));
        let sbom = ImporterForm {
            years: "20x1".to_string(),
            ..sbom_form()
        };
        assert!(sbom.validate_configuration().is_empty());
    }

    #[test]
    fn test_review_step_checks_everything() {
        let form = ImporterForm {
            source: String::new(),
            ..sbom_form()
        };
        assert!(form.validate_step(FormStep::General, &[], false).is_empty());
        assert_eq!(form.validate_step(FormStep::Review, &[], false).len(), 1);
        assert_eq!(FormStep::General.next(), Some(FormStep::Configuration));
        assert_eq!(FormStep::Review.next(), None);
        assert_eq!(FormStep::General.previous(), None);
    }

    #[test]
    fn test_sbom_configuration_payload() {
        let configuration = sbom_form().to_configuration().unwrap();
        assert_eq!(
            serde_json::to_value(&configuration).unwrap(),
            serde_json::json!({
                "sbom": {
                    "description": "Quarkus SBOMs",
                    "period": "1days",
                    "source": "https://access.redhat.com/security/data/sbom/beta/",
                    "disabled": false,
                    "labels": {"source": "redhat", "team": "quarkus"},
                    "v3Signatures": true,
                    "fetchRetries": 3,
                    "sizeLimit": "100MB",
                    "keys": ["https://access.redhat.com/security/data/97f5eac4.txt"]
                }
            })
        );
    }

    #[test]
    fn test_osv_payload_keeps_only_its_fields() {
        let form = ImporterForm {
            importer_type: Some(ImporterType::Osv),
            enabled: false,
            branch: "main".to_string(),
            start_year: "2022".to_string(),
            years: "2020\n2021".to_string(),
            ..sbom_form()
        };
        let configuration = form.to_configuration().unwrap();
        let values = &configuration[&ImporterType::Osv];
        assert!(values.disabled);
        assert_eq!(values.branch.as_deref(), Some("main"));
        assert_eq!(values.start_year, Some(2022));
        assert_eq!(values.years, vec![2020, 2021]);
        assert!(values.keys.is_empty());
        assert_eq!(values.fetch_retries, None);
        assert!(!values.v3_signatures);
        assert_eq!(values.size_limit, None);
    }

    #[test]
    fn test_period_and_size_parsing() {
        assert_eq!(split_period("60s"), Some(("60".to_string(), "s".to_string())));
        assert_eq!(split_period("1d"), Some(("1".to_string(), "days".to_string())));
        assert_eq!(split_period("2hours"), Some(("2".to_string(), "h".to_string())));
        assert_eq!(split_period("soon"), None);
        assert_eq!(split_period("5 fortnights"), None);

        assert_eq!(split_size_limit("100 MB"), Some(("100".to_string(), "MB".to_string())));
        assert_eq!(split_size_limit("1.5gib"), Some(("1.5".to_string(), "GiB".to_string())));
        assert_eq!(split_size_limit("512"), Some(("512".to_string(), "B".to_string())));
        assert_eq!(split_size_limit("10 parsecs"), None);
    }

    #[test]
    fn test_edit_form_from_importer() {
        let importer: Importer = serde_json::from_str(
            r#"{"name":"cve","configuration":{"cve":{
                "source":"https://github.com/CVEProject/cvelistV5","period":"1h",
                "disabled":true,"startYear":2015,"years":[2019,2020],"labels":{"a":"b"}
            }}}"#,
        )
        .unwrap();
        let form = ImporterForm::from_importer(&importer);
        assert_eq!(form.importer_type, Some(ImporterType::Cve));
        assert!(!form.enabled);
        assert_eq!(form.period_value, "1");
        assert_eq!(form.period_unit, "h");
        assert_eq!(form.start_year, "2015");
        assert_eq!(form.years, "2019, 2020");
        assert_eq!(form.labels, "a=b");
        assert_eq!(form.size_limit_unit, "MB");

        // saving an untouched form sends back what was loaded
        let configuration = form.to_configuration().unwrap();
        assert_eq!(configuration[&ImporterType::Cve], importer.configuration[&ImporterType::Cve]);
    }

    #[test]
    fn test_review_hides_api_token() {
        let form = ImporterForm {
            importer_type: Some(ImporterType::Quay),
            api_token: "secret".to_string(),
            ..Default::default()
        };
        let rows = form.review_entries();
        assert!(rows.contains(&("API token", "********".to_string())));
        assert!(!rows.iter().any(|(_, v)| v.contains("secret")));
    }
}
