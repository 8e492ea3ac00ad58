use chrono::NaiveDate;
use contracts::shared::hub::SortDirection;
use std::cmp::Ordering;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveSort {
    pub column_key: String,
    pub direction: SortDirection,
}

impl ActiveSort {
    pub fn asc(column_key: &str) -> Self {
        Self {
            column_key: column_key.to_string(),
            direction: SortDirection::Asc,
        }
    }

    pub fn desc(column_key: &str) -> Self {
        Self {
            column_key: column_key.to_string(),
            direction: SortDirection::Desc,
        }
    }

    /// `name:asc`
    pub fn encode(&self) -> String {
        format!("{}:{}", self.column_key, self.direction.as_str())
    }

    pub fn decode(raw: &str) -> Option<Self> {
        let (column, direction) = raw.rsplit_once(':')?;
        if column.is_empty() {
            return None;
        }
        Some(Self {
            column_key: column.to_string(),
            direction: SortDirection::from_code(direction)?,
        })
    }
}

/// Value an item exposes for client-side sorting of one column.
///
/// Missing values sort before everything else; text compares case-insensitively.
#[derive(Debug, Clone, PartialEq)]
pub enum SortValue {
    None,
    Text(String),
    Number(f64),
    Date(NaiveDate),
}

impl SortValue {
    pub fn text(value: impl Into<String>) -> Self {
        SortValue::Text(value.into())
    }

    fn rank(&self) -> u8 {
        match self {
            SortValue::None => 0,
            SortValue::Number(_) => 1,
            SortValue::Date(_) => 2,
            SortValue::Text(_) => 3,
        }
    }

    pub fn compare(&self, other: &Self) -> Ordering {
        match (self, other) {
            (SortValue::Text(a), SortValue::Text(b)) => a
                .to_lowercase()
                .cmp(&b.to_lowercase())
                .then_with(|| a.cmp(b)),
            (SortValue::Number(a), SortValue::Number(b)) => a.total_cmp(b),
            (SortValue::Date(a), SortValue::Date(b)) => a.cmp(b),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

impl From<Option<String>> for SortValue {
    fn from(value: Option<String>) -> Self {
        value.map(SortValue::Text).unwrap_or(SortValue::None)
    }
}

impl From<Option<f64>> for SortValue {
    fn from(value: Option<f64>) -> Self {
        value.map(SortValue::Number).unwrap_or(SortValue::None)
    }
}

/// Stable sort of `items` by the value `sort_value_of` returns for `column`
pub fn sort_items<T>(
    items: &mut [T],
    column: &str,
    direction: SortDirection,
    sort_value_of: impl Fn(&T, &str) -> SortValue,
) {
    items.sort_by(|a, b| {
        let cmp = sort_value_of(a, column).compare(&sort_value_of(b, column));
        match direction {
            SortDirection::Asc => cmp,
            SortDirection::Desc => cmp.reverse(),
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_decode() {
        let sort = ActiveSort::desc("report.endDate");
        assert_eq!(sort.encode(), "report.endDate:desc");
        assert_eq!(ActiveSort::decode("report.endDate:desc"), Some(sort));
        assert_eq!(ActiveSort::decode("name:sideways"), None);
        assert_eq!(ActiveSort::decode(":asc"), None);
        assert_eq!(ActiveSort::decode("name"), None);
    }

    #[test]
    fn test_text_compare_ignores_case() {
        let a = SortValue::text("alpha");
        let b = SortValue::text("Beta");
        assert_eq!(a.compare(&b), Ordering::Less);
    }

    #[test]
    fn test_missing_values_first() {
        assert_eq!(SortValue::None.compare(&SortValue::Number(0.0)), Ordering::Less);
        assert_eq!(SortValue::text("").compare(&SortValue::None), Ordering::Greater);
    }

    #[test]
    fn test_sort_items_desc() {
        let mut items = vec![3.0, 1.0, 2.0];
        sort_items(&mut items, "n", SortDirection::Desc, |v, _| SortValue::Number(*v));
        assert_eq!(items, vec![3.0, 2.0, 1.0]);
    }
}
