use serde::{Deserialize, Serialize};

/// Comparison operator of a single hub filter term.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HubOperator {
    #[serde(rename = "=")]
    Eq,
    #[serde(rename = "!=")]
    NotEq,
    #[serde(rename = "~")]
    Like,
    #[serde(rename = ">")]
    Gt,
    #[serde(rename = ">=")]
    Gte,
    #[serde(rename = "<")]
    Lt,
    #[serde(rename = "<=")]
    Lte,
}

impl HubOperator {
    /// Textual form used inside the `q` expression
    pub fn as_str(&self) -> &'static str {
        match self {
            HubOperator::Eq => "=",
            HubOperator::NotEq => "!=",
            HubOperator::Like => "~",
            HubOperator::Gt => ">",
            HubOperator::Gte => ">=",
            HubOperator::Lt => "<",
            HubOperator::Lte => "<=",
        }
    }
}

/// How the members of a list value combine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LogicOperator {
    And,
    #[default]
    Or,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum HubFilterValue {
    Text(String),
    Number(i64),
    List {
        list: Vec<String>,
        #[serde(default)]
        operator: LogicOperator,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HubFilter {
    /// Server-side field name. Empty means free-text search.
    pub field: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operator: Option<HubOperator>,
    pub value: HubFilterValue,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "asc" => Some(SortDirection::Asc),
            "desc" => Some(SortDirection::Desc),
            _ => None,
        }
    }

    pub fn reversed(&self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HubSort {
    pub field: String,
    pub direction: SortDirection,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HubPage {
    /// 1-indexed
    pub page_number: usize,
    pub items_per_page: usize,
}

/// Filter/sort/page description a listing request is built from.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HubRequestParams {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub filters: Vec<HubFilter>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort: Option<HubSort>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<HubPage>,
}

/// Response envelope of every paginated listing endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginatedResponse<T> {
    #[serde(default = "Vec::new")]
    pub items: Vec<T>,
    #[serde(default)]
    pub total: usize,
}

/// A fetched page together with the params that produced it
#[derive(Debug, Clone, PartialEq)]
pub struct HubPaginatedResult<T> {
    pub data: Vec<T>,
    pub total: usize,
    pub params: HubRequestParams,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operator_wire_form() {
        let json = serde_json::to_string(&HubOperator::Gte).unwrap();
        assert_eq!(json, "\">=\"");
        assert_eq!(HubOperator::Like.as_str(), "~");
    }

    #[test]
    fn test_paginated_response_tolerates_missing_fields() {
        let resp: PaginatedResponse<String> = serde_json::from_str("{}").unwrap();
        assert!(resp.items.is_empty());
        assert_eq!(resp.total, 0);
    }

    #[test]
    fn test_list_value_defaults_to_or() {
        let value: HubFilterValue = serde_json::from_str(r#"{"list":["a","b"]}"#).unwrap();
        assert_eq!(
            value,
            HubFilterValue::List {
                list: vec!["a".into(), "b".into()],
                operator: LogicOperator::Or
            }
        );
    }
}
