//! Indicator Table Model
//! Per-entity rows of per-year numeric values.

use std::collections::HashMap;

/// Convert a raw cell to a number.
///
/// Whitespace is trimmed before parsing. Text that is not a number, as well
/// as an empty or missing cell, yields `NaN` instead of an error.
pub fn parse_value(raw: Option<&str>) -> f64 {
    raw.map(str::trim)
        .filter(|s| !s.is_empty())
        .and_then(|s| s.parse::<f64>().ok())
        .unwrap_or(f64::NAN)
}

/// One entity's values, keyed by column name (usually a year).
#[derive(Debug, Clone, PartialEq)]
pub struct IndicatorRow {
    pub entity: String,
    pub values: HashMap<String, f64>,
}

impl IndicatorRow {
    pub fn new(entity: impl Into<String>) -> Self {
        Self {
            entity: entity.into(),
            values: HashMap::new(),
        }
    }

    /// Builder-style insert, mostly handy for tests.
    pub fn with_value(mut self, column: impl Into<String>, value: f64) -> Self {
        self.values.insert(column.into(), value);
        self
    }

    /// Value of a column; `NaN` when the column does not exist.
    pub fn value(&self, column: &str) -> f64 {
        self.values.get(column).copied().unwrap_or(f64::NAN)
    }
}

/// A loaded dataset: header order plus rows in source order.
#[derive(Debug, Clone, Default)]
pub struct IndicatorTable {
    pub key_column: String,
    /// Non-key columns in header order.
    pub columns: Vec<String>,
    pub rows: Vec<IndicatorRow>,
}

impl IndicatorTable {
    pub fn new(key_column: impl Into<String>, columns: Vec<String>, rows: Vec<IndicatorRow>) -> Self {
        Self {
            key_column: key_column.into(),
            columns,
            rows,
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn has_column(&self, column: &str) -> bool {
        self.columns.iter().any(|c| c == column)
    }

    /// First row whose entity name matches exactly.
    pub fn find(&self, entity: &str) -> Option<&IndicatorRow> {
        self.rows.iter().find(|row| row.entity == entity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_parse_value_numbers() {
        assert_eq!(parse_value(Some("100")), 100.0);
        assert_eq!(parse_value(Some(" 72.5 ")), 72.5);
        assert_eq!(parse_value(Some("-3e2")), -300.0);
    }

    #[test]
    fn test_parse_value_non_numeric_is_nan() {
        assert!(parse_value(Some("abc")).is_nan());
        assert!(parse_value(Some("12k")).is_nan());
        assert!(parse_value(Some("")).is_nan());
        assert!(parse_value(Some("   ")).is_nan());
        assert!(parse_value(None).is_nan());
    }

    #[test]
    fn test_row_missing_column_is_nan() {
        let row = IndicatorRow::new("A").with_value("2000", 1.0);
        assert_eq!(row.value("2000"), 1.0);
        assert!(row.value("1999").is_nan());
    }

    #[test]
    fn test_find_returns_first_match() {
        let table = IndicatorTable::new(
            "country",
            vec!["2000".into()],
            vec![
                IndicatorRow::new("A").with_value("2000", 1.0),
                IndicatorRow::new("A").with_value("2000", 2.0),
            ],
        );
        assert_eq!(table.find("A").map(|r| r.value("2000")), Some(1.0));
        assert!(table.find("a").is_none());
        assert!(table.has_column("2000"));
        assert!(!table.has_column("country"));
    }

    proptest! {
        #[test]
        fn test_parse_value_matches_standard_parsing(v in any::<f64>().prop_filter("finite", |v| v.is_finite())) {
            let text = v.to_string();
            prop_assert_eq!(parse_value(Some(&text)), v);
        }

        #[test]
        fn test_parse_value_text_is_nan(s in "[a-zA-Z]{1,8}") {
            prop_assume!(s.parse::<f64>().is_err());
            prop_assert!(parse_value(Some(&s)).is_nan());
        }
    }
}
