//! Monthly and yearly sums over the incident table.
//!
//! Missing cells contribute nothing to a sum. Values are otherwise summed
//! as they appear in the file, sentinel codes included.

use crate::{
    dataset::{numeric_value, IncidentTable},
    error::AnalysisResult,
    types::{Month, MonthKey, Year},
};
use std::collections::{BTreeMap, HashMap};

/// Killed plus wounded across every incident in (year, month).
pub fn harmed_monthly(table: &IncidentTable, year: Year, month: Month) -> f64 {
    let mut killed = 0.0;
    let mut wounded = 0.0;
    for r in in_month(table, year, month) {
        killed += r.nkill.unwrap_or(0.0);
        wounded += r.nwound.unwrap_or(0.0);
    }
    killed + wounded
}

/// Total property value recorded for (year, month).
pub fn prop_value_monthly(table: &IncidentTable, year: Year, month: Month) -> f64 {
    in_month(table, year, month)
        .filter_map(|r| r.propvalue)
        .sum()
}

/// Total property value recorded for a whole year.
pub fn prop_value_by_year(table: &IncidentTable, year: Year) -> f64 {
    table
        .records()
        .iter()
        .filter(|r| r.iyear == year)
        .filter_map(|r| r.propvalue)
        .sum()
}

/// Occurrence count of each distinct value in `column`.
///
/// Numeric cells are keyed by parsed value, so `1`, `1.0` and ` 1 ` share
/// the key `"1"`. Every NA marker shares the key `"NaN"`. Any other text
/// is its own key.
pub fn unique_counts(table: &IncidentTable, column: &str) -> AnalysisResult<BTreeMap<String, usize>> {
    let mut counts = BTreeMap::new();
    for value in table.column_values(column)? {
        *counts.entry(count_key(value)).or_insert(0) += 1;
    }
    Ok(counts)
}

fn count_key(cell: &str) -> String {
    match numeric_value(cell) {
        Ok(Some(v)) => v.to_string(),
        Ok(None) => "NaN".to_string(),
        Err(()) => cell.to_string(),
    }
}

fn in_month(
    table: &IncidentTable,
    year: Year,
    month: Month,
) -> impl Iterator<Item = &crate::dataset::IncidentRecord> {
    table
        .records()
        .iter()
        .filter(move |r| r.iyear == year && r.imonth == month)
}

/// Raw sums for one month.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MonthTotals {
    pub killed:     f64,
    pub wounded:    f64,
    pub prop_value: f64,
}

impl MonthTotals {
    pub fn harmed(&self) -> f64 {
        self.killed + self.wounded
    }
}

/// Every month's totals, built in a single pass over the table.
///
/// `get` agrees with `harmed_monthly` / `prop_value_monthly` for every
/// key, including months with no incidents (all zero).
#[derive(Debug, Clone, Default)]
pub struct MonthlyTotals {
    by_month: HashMap<MonthKey, MonthTotals>,
}

impl MonthlyTotals {
    pub fn build(table: &IncidentTable) -> Self {
        let mut by_month: HashMap<MonthKey, MonthTotals> = HashMap::new();
        for r in table.records() {
            let entry = by_month.entry(MonthKey::new(r.iyear, r.imonth)).or_default();
            entry.killed += r.nkill.unwrap_or(0.0);
            entry.wounded += r.nwound.unwrap_or(0.0);
            entry.prop_value += r.propvalue.unwrap_or(0.0);
        }
        log::debug!("Indexed {} distinct months", by_month.len());
        Self { by_month }
    }

    pub fn get(&self, key: MonthKey) -> MonthTotals {
        self.by_month.get(&key).copied().unwrap_or_default()
    }

    pub fn harmed(&self, year: Year, month: Month) -> f64 {
        self.get(MonthKey::new(year, month)).harmed()
    }

    pub fn prop_value(&self, year: Year, month: Month) -> f64 {
        self.get(MonthKey::new(year, month)).prop_value
    }
}
