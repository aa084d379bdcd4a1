//! Incident record loading.
//!
//! The source file is Latin-1 encoded. Only five columns matter:
//! `iyear`, `imonth`, `nkill`, `nwound`, `propvalue`. Everything else in
//! the row is carried through untouched so `column_values` can still
//! look at it.

use crate::{
    error::{AnalysisError, AnalysisResult},
    types::{Month, Year},
};
use csv::{ByteRecord, ReaderBuilder};
use std::{fs::File, io::Read, path::Path};

pub const COL_YEAR: &str = "iyear";
pub const COL_MONTH: &str = "imonth";
pub const COL_KILLED: &str = "nkill";
pub const COL_WOUNDED: &str = "nwound";
pub const COL_PROPERTY: &str = "propvalue";

/// One incident row. Numeric cells that were blank in the file are `None`.
#[derive(Debug, Clone, PartialEq)]
pub struct IncidentRecord {
    pub iyear:     Year,
    pub imonth:    Month,
    pub nkill:     Option<f64>,
    pub nwound:    Option<f64>,
    pub propvalue: Option<f64>,
}

#[derive(Debug, Clone)]
pub struct IncidentTable {
    headers: Vec<String>,
    records: Vec<IncidentRecord>,
    raw_rows: Vec<Vec<String>>,
}

/// Positions of the required columns in the header row.
struct ColumnIndex {
    year:     usize,
    month:    usize,
    killed:   usize,
    wounded:  usize,
    property: usize,
}

impl ColumnIndex {
    fn resolve(headers: &[String]) -> AnalysisResult<Self> {
        let find = |name: &str| {
            headers
                .iter()
                .position(|h| h.trim() == name)
                .ok_or_else(|| AnalysisError::MissingColumn { column: name.to_string() })
        };
        Ok(Self {
            year:     find(COL_YEAR)?,
            month:    find(COL_MONTH)?,
            killed:   find(COL_KILLED)?,
            wounded:  find(COL_WOUNDED)?,
            property: find(COL_PROPERTY)?,
        })
    }
}

impl IncidentTable {
    /// Read a CSV file from disk.
    pub fn load<P: AsRef<Path>>(path: P) -> AnalysisResult<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| AnalysisError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let table = Self::from_reader(file)?;
        log::info!("Loaded {} incident records from {}", table.len(), path.display());
        Ok(table)
    }

    /// Read CSV data from any byte source.
    pub fn from_reader<R: Read>(reader: R) -> AnalysisResult<Self> {
        let mut reader = ReaderBuilder::new().flexible(true).from_reader(reader);

        let headers: Vec<String> = reader.byte_headers()?.iter().map(decode_latin1).collect();
        let index = ColumnIndex::resolve(&headers)?;

        let mut records = Vec::new();
        let mut raw_rows = Vec::new();
        let mut row = ByteRecord::new();
        while reader.read_byte_record(&mut row)? {
            let line = row.position().map(|p| p.line()).unwrap_or(0);
            let fields: Vec<String> = row.iter().map(decode_latin1).collect();
            let cell = |i: usize| fields.get(i).map(String::as_str).unwrap_or("");

            records.push(IncidentRecord {
                iyear:     parse_integer(cell(index.year), line, COL_YEAR)?,
                imonth:    parse_integer(cell(index.month), line, COL_MONTH)?,
                nkill:     parse_number(cell(index.killed), line, COL_KILLED)?,
                nwound:    parse_number(cell(index.wounded), line, COL_WOUNDED)?,
                propvalue: parse_number(cell(index.property), line, COL_PROPERTY)?,
            });
            raw_rows.push(fields);
        }

        Ok(Self { headers, records, raw_rows })
    }

    pub fn records(&self) -> &[IncidentRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Raw decoded text of `column` for every row, in file order.
    /// Short rows yield an empty string.
    pub fn column_values(&self, column: &str) -> AnalysisResult<Vec<&str>> {
        let idx = self
            .headers
            .iter()
            .position(|h| h.trim() == column)
            .ok_or_else(|| AnalysisError::MissingColumn { column: column.to_string() })?;
        Ok(self
            .raw_rows
            .iter()
            .map(|row| row.get(idx).map(String::as_str).unwrap_or(""))
            .collect())
    }
}

/// ISO-8859-1: every byte is the code point of the same value.
fn decode_latin1(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| char::from(b)).collect()
}

/// Cell texts pandas' `read_csv` treats as missing by default.
pub const NA_MARKERS: [&str; 19] = [
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND",
    "1.#QNAN", "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

pub fn is_missing(cell: &str) -> bool {
    NA_MARKERS.contains(&cell.trim())
}

/// Parse a numeric cell: `Ok(None)` for NA markers and NaN, `Err(())` for
/// anything that is not a number.
pub(crate) fn numeric_value(cell: &str) -> Result<Option<f64>, ()> {
    if is_missing(cell) {
        return Ok(None);
    }
    let value = cell.trim().parse::<f64>().map_err(|_| ())?;
    Ok(if value.is_nan() { None } else { Some(value) })
}

fn parse_number(cell: &str, line: u64, column: &str) -> AnalysisResult<Option<f64>> {
    numeric_value(cell).map_err(|_| invalid(cell.trim(), line, column))
}

/// Integer columns may come out of a spreadsheet as `1970.0`.
fn parse_integer<T>(cell: &str, line: u64, column: &str) -> AnalysisResult<T>
where
    T: std::str::FromStr + TryFrom<i64>,
{
    let cell = cell.trim();
    if let Ok(v) = cell.parse::<T>() {
        return Ok(v);
    }
    let as_float = cell.parse::<f64>().map_err(|_| invalid(cell, line, column))?;
    if as_float.fract() != 0.0 || !as_float.is_finite() {
        return Err(invalid(cell, line, column));
    }
    T::try_from(as_float as i64).map_err(|_| invalid(cell, line, column))
}

fn invalid(cell: &str, line: u64, column: &str) -> AnalysisError {
    AnalysisError::InvalidValue {
        line,
        column: column.to_string(),
        value: cell.to_string(),
    }
}
