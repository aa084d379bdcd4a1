//! Shared primitive types used across the analysis.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Calendar year of an incident (`iyear`).
pub type Year = i32;

/// Calendar month of an incident (`imonth`), 1-based. The source data
/// uses 0 for "unknown month".
pub type Month = u32;

/// A (year, month) bucket. Orders chronologically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct MonthKey {
    pub year:  Year,
    pub month: Month,
}

impl MonthKey {
    pub fn new(year: Year, month: Month) -> Self {
        Self { year, month }
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}
