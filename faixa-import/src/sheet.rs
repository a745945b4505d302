//! Workbook reading.
//!
//! Every sheet is read in full before segmentation starts. The first row of
//! a sheet is its column header and is skipped; the remaining rows are
//! mapped positionally onto [`RawRow`].

use std::path::Path;

use calamine::{Data, Range, Reader, open_workbook_auto};
use faixa_catalog::RawRow;

use crate::run::ImportError;

/// Column positions in the price list.
const COL_MODEL: usize = 0;
const COL_COLOR: usize = 1;
const COL_PART: usize = 2;
const COL_ELEMENT: usize = 3;
const COL_PRICE: usize = 4;
const COL_LOCATION: usize = 5;
const COL_REFERENCE: usize = 6;

/// A fully loaded workbook.
#[derive(Debug, Clone, Default)]
pub struct Workbook {
    pub sheets: Vec<Sheet>,
}

/// One sheet's data rows, header excluded.
#[derive(Debug, Clone, Default)]
pub struct Sheet {
    pub name: String,
    pub rows: Vec<RawRow>,
}

/// Counters from reading and segmenting sheets.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SheetStats {
    pub sheets: usize,
    pub rows: usize,
    pub blocks: usize,
    pub brand_headers: usize,
    /// Price cells that were not a non-negative number and became `0.0`.
    pub malformed_prices: usize,
}

/// Read every sheet of the workbook at `path`.
///
/// Failing to open the workbook or a sheet is fatal.
pub fn read_workbook(path: &Path) -> Result<(Workbook, SheetStats), ImportError> {
    let mut workbook = open_workbook_auto(path)?;
    let mut stats = SheetStats::default();
    let mut sheets = Vec::new();

    for name in workbook.sheet_names() {
        let range = workbook.worksheet_range(&name)?;
        let (rows, malformed) = rows_from_range(&range);
        log::debug!("Read sheet '{}': {} row(s)", name, rows.len());

        stats.sheets += 1;
        stats.rows += rows.len();
        stats.malformed_prices += malformed;
        sheets.push(Sheet { name, rows });
    }

    Ok((Workbook { sheets }, stats))
}

/// Convert a sheet range into rows, skipping the header row.
///
/// Ranges start at their first used cell, so column positions are taken
/// relative to the range origin. Returns the rows and the number of
/// malformed price cells.
pub fn rows_from_range(range: &Range<Data>) -> (Vec<RawRow>, usize) {
    let (start_row, start_col) = range.start().unwrap_or((0, 0));
    let header_rows = if start_row == 0 { 1 } else { 0 };
    let mut malformed = 0;

    let rows = range
        .rows()
        .skip(header_rows)
        .map(|cells| {
            let cell = |col: usize| {
                col.checked_sub(start_col as usize)
                    .and_then(|i| cells.get(i))
            };
            let text = |col: usize| cell(col).map(cell_text).unwrap_or_default();
            let (price, ok) = cell(COL_PRICE).map_or((None, true), parse_price);
            if !ok {
                malformed += 1;
            }
            RawRow {
                model: text(COL_MODEL),
                color: text(COL_COLOR),
                part: text(COL_PART),
                element: text(COL_ELEMENT),
                price,
                location: text(COL_LOCATION),
                reference: text(COL_REFERENCE),
            }
        })
        .collect();
    (rows, malformed)
}

/// Render a cell as trimmed text. Integral numbers drop the fraction.
fn cell_text(cell: &Data) -> String {
    match cell {
        Data::String(s) => s.trim().to_string(),
        Data::Float(f) => format_number(*f),
        Data::Int(i) => i.to_string(),
        Data::DateTimeIso(s) | Data::DurationIso(s) => s.trim().to_string(),
        _ => String::new(),
    }
}

fn format_number(f: f64) -> String {
    if f.fract() == 0.0 && f.abs() < 1e15 {
        format!("{}", f as i64)
    } else {
        f.to_string()
    }
}

/// Parse a price cell. Returns the price and whether the cell was well-formed.
///
/// Empty cells are absent. Text is accepted when it reads as a number,
/// with either decimal separator; anything else, and any negative value,
/// becomes `0.0`.
fn parse_price(cell: &Data) -> (Option<f64>, bool) {
    let value = match cell {
        Data::Empty => return (None, true),
        Data::Float(f) => Some(*f),
        Data::Int(i) => Some(*i as f64),
        Data::String(s) if s.trim().is_empty() => return (None, true),
        Data::String(s) => parse_decimal(s),
        _ => None,
    };

    match value {
        Some(v) if v.is_finite() && v >= 0.0 => (Some(v), true),
        _ => (Some(0.0), false),
    }
}

fn parse_decimal(s: &str) -> Option<f64> {
    let cleaned = s.trim().trim_start_matches("R$").trim();
    cleaned
        .parse::<f64>()
        .ok()
        .or_else(|| cleaned.replace('.', "").replace(',', ".").parse().ok())
}
