//! Table state -> hub request params -> query string.
//!
//! `q` grammar: terms joined by `&`. A term is `field<op>value`, or just
//! `value` when the field is empty (free text). `|` separates alternatives of
//! one term; an AND list becomes one term per value. `\`, `&` and `|` inside
//! values are backslash escaped; free text also escapes the operator
//! characters `=`, `~`, `<`, `>` and `!` so it never reads as a field filter.

use contracts::shared::hub::{
    HubFilter, HubFilterValue, HubOperator, HubPage, HubRequestParams, HubSort, LogicOperator,
};

use super::pagination::checked_offset;
use super::{FilterCategory, FilterType, FilterValue, TableControlConfig, TableControlState};

fn filters_for_category(category: &FilterCategory, value: &FilterValue) -> Vec<HubFilter> {
    let field = category.server_field().to_string();
    match value {
        FilterValue::String { value } => vec![HubFilter {
            operator: (!field.is_empty()).then_some(HubOperator::Like),
            field,
            value: HubFilterValue::Text(value.clone()),
        }],
        FilterValue::MultiSelect { values } => vec![HubFilter {
            field,
            operator: Some(HubOperator::Eq),
            value: HubFilterValue::List {
                list: values.clone(),
                operator: category.logic_operator,
            },
        }],
        FilterValue::DateRange { from, to } => {
            let mut filters = Vec::new();
            if let Some(from) = from {
                filters.push(HubFilter {
                    field: field.clone(),
                    operator: Some(HubOperator::Gte),
                    value: HubFilterValue::Text(from.format("%Y-%m-%d").to_string()),
                });
            }
            if let Some(to) = to {
                filters.push(HubFilter {
                    field,
                    operator: Some(HubOperator::Lte),
                    value: HubFilterValue::Text(to.format("%Y-%m-%d").to_string()),
                });
            }
            filters
        }
        FilterValue::Label { key, value } if value.is_empty() => vec![HubFilter {
            field,
            operator: Some(HubOperator::Like),
            value: HubFilterValue::Text(key.clone()),
        }],
        FilterValue::Label { key, value } => vec![HubFilter {
            field: format!("{field}:{key}"),
            operator: Some(HubOperator::Eq),
            value: HubFilterValue::Text(value.clone()),
        }],
    }
}

/// Hub params for the current state. Filters come out ordered by category
/// key, so equal states give equal params.
pub fn get_hub_request_params(
    config: &TableControlConfig,
    state: &TableControlState,
) -> HubRequestParams {
    let mut params = HubRequestParams::default();

    if config.is_filter_enabled {
        for (key, value) in &state.filter_values {
            let Some(category) = config.filter_category(key) else {
                continue;
            };
            if !category.accepts(value) || value.is_empty() {
                continue;
            }
            params.filters.extend(filters_for_category(category, value));
        }
    }

    if config.is_sort_enabled {
        params.sort = state.active_sort.as_ref().and_then(|sort| {
            config
                .hub_sort_field_keys
                .get(&sort.column_key)
                .map(|field| HubSort {
                    field: field.clone(),
                    direction: sort.direction,
                })
        });
    }

    if config.is_pagination_enabled {
        params.page = Some(HubPage {
            page_number: state.page.page_number,
            items_per_page: state.page.items_per_page,
        });
    }

    params
}

fn escape_value(value: &str, free_text: bool) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        let operator_char = free_text && matches!(c, '=' | '~' | '<' | '>' | '!');
        if operator_char || matches!(c, '\\' | '&' | '|') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

fn filter_terms(filter: &HubFilter) -> Vec<String> {
    let free_text = filter.field.is_empty();
    let prefix = if filter.field.is_empty() {
        String::new()
    } else {
        let operator = filter.operator.unwrap_or(HubOperator::Eq);
        format!("{}{}", filter.field, operator.as_str())
    };
    match &filter.value {
        HubFilterValue::Text(text) => vec![format!("{prefix}{}", escape_value(text, free_text))],
        HubFilterValue::Number(number) => vec![format!("{prefix}{number}")],
        HubFilterValue::List {
            list,
            operator: LogicOperator::Or,
        } => {
            if list.is_empty() {
                return Vec::new();
            }
            let joined = list
                .iter()
                .map(|v| escape_value(v, free_text))
                .collect::<Vec<_>>()
                .join("|");
            vec![format!("{prefix}{joined}")]
        }
        HubFilterValue::List {
            list,
            operator: LogicOperator::And,
        } => list
            .iter()
            .map(|v| format!("{prefix}{}", escape_value(v, free_text)))
            .collect(),
    }
}

/// The `q` value alone; empty when there are no filters
pub fn serialize_filters_for_hub(filters: &[HubFilter]) -> String {
    filters
        .iter()
        .flat_map(filter_terms)
        .collect::<Vec<_>>()
        .join("&")
}

/// Ordered `q`, `sort`, `offset`, `limit` pairs; absent parts are omitted
pub fn serialize_request_params_for_hub(params: &HubRequestParams) -> Vec<(String, String)> {
    let mut out = Vec::new();

    let q = serialize_filters_for_hub(&params.filters);
    if !q.is_empty() {
        out.push(("q".to_string(), q));
    }

    if let Some(sort) = &params.sort {
        out.push((
            "sort".to_string(),
            format!("{}:{}", sort.field, sort.direction.as_str()),
        ));
    }

    if let Some(page) = &params.page {
        let offset = checked_offset(page.page_number, page.items_per_page).unwrap_or(usize::MAX);
        out.push(("offset".to_string(), offset.to_string()));
        out.push(("limit".to_string(), page.items_per_page.to_string()));
    }

    out
}

/// Percent-encoded `k=v&k=v`
pub fn to_query_string(pairs: &[(String, String)]) -> String {
    pairs
        .iter()
        .map(|(k, v)| format!("{}={}", k, urlencoding::encode(v)))
        .collect::<Vec<_>>()
        .join("&")
}

/// Cache key of a listing request, e.g. `sbom?q=name~quarkus&offset=0&limit=10`
pub fn query_key(entity_kind: &str, params: &HubRequestParams) -> String {
    format!(
        "{}?{}",
        entity_kind,
        to_query_string(&serialize_request_params_for_hub(params))
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::table_controls::{ActiveSort, FilterSelectOption, FILTER_TEXT_CATEGORY_KEY};
    use chrono::NaiveDate;

    fn pairs(list: &[(&str, &str)]) -> Vec<(String, String)> {
        list.iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn config() -> TableControlConfig {
        TableControlConfig::new("SBOMs", "sb")
            .column("name", "Name")
            .column("published", "Published")
            .filter(FilterCategory::search(FILTER_TEXT_CATEGORY_KEY, "Filter text"))
            .filter(FilterCategory::search("name", "Name"))
            .filter(FilterCategory::date_range("published", "Published"))
            .filter(FilterCategory::label("labels", "Label"))
            .filter(
                FilterCategory::multiselect(
                    "severity",
                    "Severity",
                    vec![
                        FilterSelectOption::new("high", "High"),
                        FilterSelectOption::new("low", "Low"),
                    ],
                )
                .with_server_field("average_severity"),
            )
            .filter(
                FilterCategory::async_multiselect("license", "License")
                    .with_logic_operator(LogicOperator::And),
            )
            .sortable(&["name", "published"])
            .hub_sort_field("name", "name")
            .paginated(10)
    }

    #[test]
    fn test_search_and_sort_scenario() {
        let config = config();
        let mut state = TableControlState::new(&config);
        state
            .set_filter_value(&config, "name", Some(FilterValue::text("quarkus")))
            .unwrap();
        state
            .set_active_sort(&config, Some(ActiveSort::asc("name")))
            .unwrap();
        let params = get_hub_request_params(&config, &state);
        assert_eq!(
            serialize_request_params_for_hub(&params),
            pairs(&[
                ("q", "name~quarkus"),
                ("sort", "name:asc"),
                ("offset", "0"),
                ("limit", "10"),
            ])
        );
    }

    #[test]
    fn test_empty_params_serialize_to_nothing() {
        assert!(serialize_request_params_for_hub(&HubRequestParams::default()).is_empty());
    }

    #[test]
    fn test_offset_from_page() {
        let params = HubRequestParams {
            page: Some(HubPage {
                page_number: 3,
                items_per_page: 20,
            }),
            ..Default::default()
        };
        assert_eq!(
            serialize_request_params_for_hub(&params),
            pairs(&[("offset", "40"), ("limit", "20")])
        );
    }

    #[test]
    fn test_every_filter_kind() {
        let config = config();
        let mut state = TableControlState::new(&config);
        let date = |s| NaiveDate::parse_from_str(s, "%Y-%m-%d").ok();
        state
            .set_filter_value(&config, "", Some(FilterValue::text("openssl")))
            .unwrap();
        state
            .set_filter_value(
                &config,
                "published",
                Some(FilterValue::DateRange {
                    from: date("2024-01-01"),
                    to: date("2024-01-31"),
                }),
            )
            .unwrap();
        state
            .set_filter_value(&config, "labels", Some(FilterValue::label("type", "spdx")))
            .unwrap();
        state
            .set_filter_value(&config, "severity", Some(FilterValue::multi(["low", "high"])))
            .unwrap();
        state
            .set_filter_value(&config, "license", Some(FilterValue::multi(["MIT", "Apache-2.0"])))
            .unwrap();

        let params = get_hub_request_params(&config, &state);
        assert_eq!(
            serialize_filters_for_hub(&params.filters),
            "openssl&labels:type=spdx&license=Apache-2.0&license=MIT\
             &published>=2024-01-01&published<=2024-01-31&average_severity=high|low"
        );
    }

    #[test]
    fn test_insertion_order_does_not_matter() {
        let config = config();
        let mut a = TableControlState::new(&config);
        a.set_filter_value(&config, "name", Some(FilterValue::text("x"))).unwrap();
        a.set_filter_value(&config, "severity", Some(FilterValue::multi(["high", "low"])))
            .unwrap();
        let mut b = TableControlState::new(&config);
        b.set_filter_value(&config, "severity", Some(FilterValue::multi(["low", "high"])))
            .unwrap();
        b.set_filter_value(&config, "name", Some(FilterValue::text("x"))).unwrap();
        assert_eq!(
            query_key("sbom", &get_hub_request_params(&config, &a)),
            query_key("sbom", &get_hub_request_params(&config, &b))
        );
    }

    #[test]
    fn test_values_are_escaped() {
        let filters = vec![HubFilter {
            field: "name".to_string(),
            operator: None,
            value: HubFilterValue::List {
                list: vec!["a&b".to_string(), "c|d\\e".to_string()],
                operator: LogicOperator::Or,
            },
        }];
        assert_eq!(serialize_filters_for_hub(&filters), r"name=a\&b|c\|d\\e");
    }

    #[test]
    fn test_free_text_operators_are_escaped() {
        let filters = vec![
            HubFilter {
                field: String::new(),
                operator: None,
                value: HubFilterValue::Text("a=b~c<d>e!f".to_string()),
            },
            HubFilter {
                field: "name".to_string(),
                operator: Some(HubOperator::Like),
                value: HubFilterValue::Text("x=y".to_string()),
            },
        ];
        assert_eq!(
            serialize_filters_for_hub(&filters),
            r"a\=b\~c\<d\>e\!f&name~x=y"
        );
    }

    #[test]
    fn test_unmapped_sort_column_is_omitted() {
        let config = config();
        let mut state = TableControlState::new(&config);
        state
            .set_active_sort(&config, Some(ActiveSort::desc("published")))
            .unwrap();
        assert_eq!(get_hub_request_params(&config, &state).sort, None);
    }

    #[test]
    fn test_query_string_is_percent_encoded() {
        let query = to_query_string(&pairs(&[("q", "name~a b&c"), ("limit", "10")]));
        assert_eq!(query, "q=name~a%20b%26c&limit=10");
    }
}
