use chrono::NaiveDate;
use contracts::shared::hub::LogicOperator;
use serde::{Deserialize, Serialize};

use crate::shared::date_utils::parse_date_prefix;
use crate::shared::model_utils::split_string_as_key_value;

/// Category key of the free-text search box. Serialized as a bare `q` term.
pub const FILTER_TEXT_CATEGORY_KEY: &str = "";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterType {
    Search,
    Multiselect,
    DateRange,
    AutocompleteLabel,
    AsyncMultiselect,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterSelectOption {
    pub value: String,
    pub label: String,
}

impl FilterSelectOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

/// A facet a list page can be filtered by
#[derive(Debug, Clone, PartialEq)]
pub struct FilterCategory {
    pub category_key: String,
    pub title: String,
    pub filter_type: FilterType,
    pub placeholder_text: Option<String>,
    /// Field name on the hub when it differs from `category_key`
    pub server_filter_field: Option<String>,
    /// How several selected values of this category combine
    pub logic_operator: LogicOperator,
    pub select_options: Vec<FilterSelectOption>,
}

impl FilterCategory {
    fn new(key: &str, title: &str, filter_type: FilterType) -> Self {
        Self {
            category_key: key.to_string(),
            title: title.to_string(),
            filter_type,
            placeholder_text: None,
            server_filter_field: None,
            logic_operator: LogicOperator::Or,
            select_options: Vec::new(),
        }
    }

    pub fn search(key: &str, title: &str) -> Self {
        Self::new(key, title, FilterType::Search)
    }

    pub fn multiselect(key: &str, title: &str, options: Vec<FilterSelectOption>) -> Self {
        let mut category = Self::new(key, title, FilterType::Multiselect);
        category.select_options = options;
        category
    }

    pub fn date_range(key: &str, title: &str) -> Self {
        Self::new(key, title, FilterType::DateRange)
    }

    pub fn label(key: &str, title: &str) -> Self {
        Self::new(key, title, FilterType::AutocompleteLabel)
    }

    pub fn async_multiselect(key: &str, title: &str) -> Self {
        Self::new(key, title, FilterType::AsyncMultiselect)
    }

    pub fn with_placeholder(mut self, text: &str) -> Self {
        self.placeholder_text = Some(text.to_string());
        self
    }

    pub fn with_server_field(mut self, field: &str) -> Self {
        self.server_filter_field = Some(field.to_string());
        self
    }

    pub fn with_logic_operator(mut self, operator: LogicOperator) -> Self {
        self.logic_operator = operator;
        self
    }

    pub fn server_field(&self) -> &str {
        self.server_filter_field
            .as_deref()
            .unwrap_or(&self.category_key)
    }

    /// Whether a value of this shape can be stored under this category
    pub fn accepts(&self, value: &FilterValue) -> bool {
        match (self.filter_type, value) {
            (FilterType::Search, FilterValue::String { .. }) => true,
            (FilterType::Multiselect, FilterValue::MultiSelect { .. }) => true,
            (FilterType::AsyncMultiselect, FilterValue::MultiSelect { .. }) => true,
            (FilterType::DateRange, FilterValue::DateRange { .. }) => true,
            (FilterType::AutocompleteLabel, FilterValue::Label { .. }) => true,
            _ => false,
        }
    }
}

/// An active filter part shown in the toolbar; removing it leaves `remaining`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterChip {
    pub category_key: String,
    pub label: String,
    pub remaining: Option<FilterValue>,
}

/// Current value of one filter category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum FilterValue {
    String {
        value: String,
    },
    DateRange {
        #[serde(default)]
        from: Option<NaiveDate>,
        #[serde(default)]
        to: Option<NaiveDate>,
    },
    MultiSelect {
        values: Vec<String>,
    },
    Label {
        key: String,
        #[serde(default)]
        value: String,
    },
}

impl FilterValue {
    pub fn text(value: impl Into<String>) -> Self {
        FilterValue::String {
            value: value.into(),
        }
    }

    pub fn multi<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        FilterValue::MultiSelect {
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    pub fn label(key: impl Into<String>, value: impl Into<String>) -> Self {
        FilterValue::Label {
            key: key.into(),
            value: value.into(),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            FilterValue::String { .. } => "string",
            FilterValue::DateRange { .. } => "dateRange",
            FilterValue::MultiSelect { .. } => "multiSelect",
            FilterValue::Label { .. } => "label",
        }
    }

    /// An empty value means "no filter" and is removed from the state
    pub fn is_empty(&self) -> bool {
        match self {
            FilterValue::String { value } => value.trim().is_empty(),
            FilterValue::DateRange { from, to } => from.is_none() && to.is_none(),
            FilterValue::MultiSelect { values } => values.is_empty(),
            FilterValue::Label { key, .. } => key.trim().is_empty(),
        }
    }

    pub fn is_valid(&self) -> bool {
        match self {
            FilterValue::DateRange {
                from: Some(from),
                to: Some(to),
            } => from <= to,
            _ => true,
        }
    }

    /// Canonical form: trimmed text, sorted and deduplicated selections.
    /// Two logically equal values normalize to the same value.
    pub fn normalized(self) -> Self {
        match self {
            FilterValue::String { value } => FilterValue::String {
                value: value.trim().to_string(),
            },
            FilterValue::MultiSelect { mut values } => {
                values.retain(|v| !v.is_empty());
                values.sort();
                values.dedup();
                FilterValue::MultiSelect { values }
            }
            FilterValue::Label { key, value } => FilterValue::Label {
                key: key.trim().to_string(),
                value: value.trim().to_string(),
            },
            range @ FilterValue::DateRange { .. } => range,
        }
    }

    /// Human readable chip text for the toolbar
    pub fn display(&self) -> String {
        match self {
            FilterValue::String { value } => value.clone(),
            FilterValue::DateRange { from, to } => {
                let fmt = |d: &Option<NaiveDate>| {
                    d.map(|d| d.format("%Y-%m-%d").to_string())
                        .unwrap_or_default()
                };
                format!("{} - {}", fmt(from), fmt(to))
            }
            FilterValue::MultiSelect { values } => values.join(", "),
            FilterValue::Label { key, value } => {
                crate::shared::model_utils::join_key_value_as_string(key, value)
            }
        }
    }

    /// One chip per removable part; multiselect values get a chip each
    pub fn chips(&self, category: &FilterCategory) -> Vec<FilterChip> {
        match self {
            FilterValue::MultiSelect { values } => values
                .iter()
                .map(|v| {
                    let label = category
                        .select_options
                        .iter()
                        .find(|o| &o.value == v)
                        .map_or_else(|| v.clone(), |o| o.label.clone());
                    let rest: Vec<String> = values.iter().filter(|x| *x != v).cloned().collect();
                    FilterChip {
                        category_key: category.category_key.clone(),
                        label,
                        remaining: (!rest.is_empty()).then(|| FilterValue::MultiSelect { values: rest }),
                    }
                })
                .collect(),
            other => vec![FilterChip {
                category_key: category.category_key.clone(),
                label: other.display(),
                remaining: None,
            }],
        }
    }

    /// Client-side match against the values an item exposes for this category.
    pub fn matches(&self, item_values: &[String], logic: LogicOperator) -> bool {
        match self {
            FilterValue::String { value } => {
                let needle = value.to_lowercase();
                item_values
                    .iter()
                    .any(|v| v.to_lowercase().contains(&needle))
            }
            FilterValue::MultiSelect { values } => match logic {
                LogicOperator::Or => values.iter().any(|v| item_values.contains(v)),
                LogicOperator::And => values.iter().all(|v| item_values.contains(v)),
            },
            FilterValue::DateRange { from, to } => item_values.iter().any(|v| {
                let Some(date) = parse_date_prefix(v) else {
                    return false;
                };
                from.map_or(true, |f| date >= f) && to.map_or(true, |t| date <= t)
            }),
            FilterValue::Label { key, value } => item_values.iter().any(|v| {
                let pair = split_string_as_key_value(v);
                pair.key == *key && (value.is_empty() || pair.value == *value)
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_accepts_matches_type_tag() {
        let search = FilterCategory::search("name", "Name");
        assert!(search.accepts(&FilterValue::text("a")));
        assert!(!search.accepts(&FilterValue::multi(["a"])));

        let license = FilterCategory::async_multiselect("license", "License");
        assert!(license.accepts(&FilterValue::multi(["MIT"])));

        let labels = FilterCategory::label("labels", "Label");
        assert!(labels.accepts(&FilterValue::label("type", "spdx")));
        assert!(!labels.accepts(&FilterValue::text("type=spdx")));
    }

    #[test]
    fn test_tagged_json_shape() {
        let json = serde_json::to_string(&FilterValue::text("quarkus")).unwrap();
        assert_eq!(json, r#"{"kind":"string","value":"quarkus"}"#);

        let range: FilterValue =
            serde_json::from_str(r#"{"kind":"dateRange","from":"2024-01-01"}"#).unwrap();
        assert_eq!(
            range,
            FilterValue::DateRange {
                from: Some(date("2024-01-01")),
                to: None
            }
        );
    }

    #[test]
    fn test_normalized_sorts_and_dedups() {
        let value = FilterValue::multi(["high", "low", "high", ""]).normalized();
        assert_eq!(value, FilterValue::multi(["high", "low"]));
    }

    #[test]
    fn test_empty_and_invalid() {
        assert!(FilterValue::text("   ").is_empty());
        assert!(FilterValue::multi(Vec::<String>::new()).is_empty());
        let inverted = FilterValue::DateRange {
            from: Some(date("2024-02-01")),
            to: Some(date("2024-01-01")),
        };
        assert!(!inverted.is_valid());
    }

    #[test]
    fn test_string_match_is_case_insensitive_substring() {
        let value = FilterValue::text("Quark");
        assert!(value.matches(&["io.quarkus:quarkus-core".to_string()], LogicOperator::Or));
        assert!(!value.matches(&["spring-boot".to_string()], LogicOperator::Or));
    }

    #[test]
    fn test_multiselect_logic_operator() {
        let value = FilterValue::multi(["high", "critical"]);
        let item = vec!["high".to_string()];
        assert!(value.matches(&item, LogicOperator::Or));
        assert!(!value.matches(&item, LogicOperator::And));
    }

    #[test]
    fn test_date_range_bounds_inclusive() {
        let value = FilterValue::DateRange {
            from: Some(date("2024-01-01")),
            to: Some(date("2024-01-31")),
        };
        assert!(value.matches(&["2024-01-31T23:00:00Z".to_string()], LogicOperator::Or));
        assert!(!value.matches(&["2024-02-01T00:00:00Z".to_string()], LogicOperator::Or));
        assert!(!value.matches(&["not a date".to_string()], LogicOperator::Or));
    }

    #[test]
    fn test_label_match_with_and_without_value() {
        let item = vec!["type=spdx".to_string(), "product=ubi".to_string()];
        assert!(FilterValue::label("type", "spdx").matches(&item, LogicOperator::Or));
        assert!(FilterValue::label("product", "").matches(&item, LogicOperator::Or));
        assert!(!FilterValue::label("type", "cyclonedx").matches(&item, LogicOperator::Or));
    }

    #[test]
    fn test_chips_per_multiselect_value() {
        let category = FilterCategory::multiselect(
            "type",
            "Type",
            vec![
                FilterSelectOption::new("maven", "Maven"),
                FilterSelectOption::new("npm", "NPM"),
            ],
        );
        let chips = FilterValue::multi(["maven", "npm"]).chips(&category);
        assert_eq!(chips.len(), 2);
        assert_eq!(chips[0].label, "Maven");
        assert_eq!(chips[0].remaining, Some(FilterValue::multi(["npm"])));

        let single = FilterValue::multi(["npm"]).chips(&category);
        assert_eq!(single[0].remaining, None);

        let search = FilterCategory::search("", "Filter text");
        let chips = FilterValue::text("openssl").chips(&search);
        assert_eq!(chips[0].label, "openssl");
        assert_eq!(chips[0].remaining, None);
    }
}
