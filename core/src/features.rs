//! Feature assembly: monthly totals become (harmed, property_value) points.
//!
//! Each series keeps only its own positive months, so the two columns are
//! filtered independently and the i-th harmed value need not come from the
//! same month as the i-th property value.

use crate::{
    aggregate::MonthlyTotals,
    dataset::IncidentTable,
    error::{AnalysisError, AnalysisResult},
    types::{Month, Year},
};
use serde::{Deserialize, Serialize};

pub const MONTHS: std::ops::RangeInclusive<Month> = 1..=12;

/// Inclusive range of years to scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct YearRange {
    pub start: Year,
    pub end:   Year,
}

impl Default for YearRange {
    fn default() -> Self {
        Self { start: 1970, end: 2016 }
    }
}

impl YearRange {
    pub fn years(&self) -> std::ops::RangeInclusive<Year> {
        self.start..=self.end
    }
}

/// Half-open slice `[skip, end)` applied to each filtered series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeatureWindow {
    pub skip: usize,
    pub end:  usize,
}

impl Default for FeatureWindow {
    fn default() -> Self {
        Self { skip: 1, end: 300 }
    }
}

impl FeatureWindow {
    /// Clip `series` to the window. Bounds past the end are clamped.
    pub fn apply(&self, series: &[f64]) -> Vec<f64> {
        let end = self.end.min(series.len());
        let start = self.skip.min(end);
        series[start..end].to_vec()
    }

    pub fn capacity(&self) -> usize {
        self.end.saturating_sub(self.skip)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FeatureTable {
    pub harmed:         Vec<f64>,
    pub property_value: Vec<f64>,
}

impl FeatureTable {
    pub fn len(&self) -> usize {
        self.harmed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.harmed.is_empty()
    }

    /// Rows as `[harmed, property_value]`.
    pub fn points(&self) -> Vec<[f64; 2]> {
        self.harmed
            .iter()
            .zip(&self.property_value)
            .map(|(&h, &p)| [h, p])
            .collect()
    }
}

/// Scan every month of `years`, keep positive totals per series, clip each
/// series to `window` and pair them up.
pub fn build_feature_table(
    table: &IncidentTable,
    years: YearRange,
    window: FeatureWindow,
) -> AnalysisResult<FeatureTable> {
    let totals = MonthlyTotals::build(table);

    let mut harmed = Vec::new();
    let mut property = Vec::new();
    for year in years.years() {
        for month in MONTHS {
            let prop_value = totals.prop_value(year, month);
            let harmed_total = totals.harmed(year, month);
            if prop_value > 0.0 {
                property.push(prop_value);
            }
            if harmed_total > 0.0 {
                harmed.push(harmed_total);
            }
        }
    }
    log::info!(
        "{} months with harm, {} months with property damage in {}..={}",
        harmed.len(),
        property.len(),
        years.start,
        years.end
    );

    let harmed = window.apply(&harmed);
    let property_value = window.apply(&property);

    if harmed.len() != property_value.len() {
        return Err(AnalysisError::FeatureLengthMismatch {
            harmed: harmed.len(),
            property_value: property_value.len(),
        });
    }
    if harmed.is_empty() {
        return Err(AnalysisError::EmptyFeatureTable);
    }

    Ok(FeatureTable { harmed, property_value })
}
