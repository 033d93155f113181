//! Table Join Module
//! Left join of the first indicator table against the second by entity name.

use crate::data::table::{IndicatorRow, IndicatorTable};
use std::collections::HashMap;

/// One entity paired with its rows in both tables.
///
/// `second` is `None` when the entity has no row in the second table.
#[derive(Debug, Clone, Copy)]
pub struct JoinedRecord<'a> {
    pub entity: &'a str,
    pub first: &'a IndicatorRow,
    pub second: Option<&'a IndicatorRow>,
}

impl JoinedRecord<'_> {
    pub fn first_value(&self, column: &str) -> f64 {
        self.first.value(column)
    }

    /// `NaN` for a missing column or a missing second row.
    pub fn second_value(&self, column: &str) -> f64 {
        self.second.map_or(f64::NAN, |row| row.value(column))
    }
}

/// Join driven by the first table's membership and order.
///
/// Names match exactly (case-sensitive). When the second table repeats a
/// name, the first occurrence wins. Entities found only in the second
/// table are dropped.
pub fn join_tables<'a>(first: &'a IndicatorTable, second: &'a IndicatorTable) -> Vec<JoinedRecord<'a>> {
    let mut index: HashMap<&str, &IndicatorRow> = HashMap::with_capacity(second.len());
    for row in &second.rows {
        index.entry(row.entity.as_str()).or_insert(row);
    }

    first
        .rows
        .iter()
        .map(|row| JoinedRecord {
            entity: row.entity.as_str(),
            first: row,
            second: index.get(row.entity.as_str()).copied(),
        })
        .collect()
}

/// Entities that found no partner in the second table.
pub fn unmatched<'a>(records: &[JoinedRecord<'a>]) -> Vec<&'a str> {
    records
        .iter()
        .filter(|r| r.second.is_none())
        .map(|r| r.entity)
        .collect()
}
