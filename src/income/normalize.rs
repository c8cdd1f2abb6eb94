// src/income/normalize.rs

use rayon::prelude::*;
use std::{fs, path::Path};
use tracing::{debug, info, trace};

use super::{household::HouseholdTypeMap, raw::RawRecord};
use crate::error::{PickstatError, Result};

/// A dense, typed income row.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedRow {
    pub year: i32,
    /// Canonical display label.
    pub household_type: String,
    pub gross: f64,
    pub net: f64,
    /// `(gross - net) / gross * 100`, one decimal.
    pub tax_rate: f64,
    pub household_count: String,
    pub count_flag: String,
    pub gross_flag: String,
    pub net_flag: String,
}

/// Why a line produced no row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Skip {
    Blank,
    Separator,
    Malformed,
    /// Year or household type not seen yet.
    NoContext,
    NonNumeric,
    ZeroGross,
}

/// Scan state for decoding the sparse table: the last non-blank year and
/// household type seen. Blank and separator lines leave it untouched.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CarryForward {
    pub year: Option<i32>,
    pub household_type: Option<String>,
}

impl CarryForward {
    /// Feed one line. On success returns the effective (year, raw type)
    /// together with the split record.
    pub fn advance<'l>(
        &mut self,
        line: &'l str,
    ) -> std::result::Result<(i32, String, RawRecord<'l>), Skip> {
        let line = line.trim();
        if line.is_empty() {
            return Err(Skip::Blank);
        }
        if line.chars().all(|c| c == '_') {
            return Err(Skip::Separator);
        }
        let rec = RawRecord::split(line).ok_or(Skip::Malformed)?;

        if let Some(y) = rec.year_value() {
            self.year = Some(y);
        }
        if !rec.household_type.is_empty() {
            self.household_type = Some(rec.household_type.to_string());
        }

        match (self.year, &self.household_type) {
            (Some(y), Some(t)) => Ok((y, t.clone(), rec)),
            _ => Err(Skip::NoContext),
        }
    }
}

fn parse_amount(s: &str) -> Option<f64> {
    s.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// One decimal, ties to even.
pub(crate) fn round1(v: f64) -> f64 {
    (v * 10.0).round_ties_even() / 10.0
}

fn to_row(
    year: i32,
    household_type: &str,
    rec: &RawRecord<'_>,
    labels: &HouseholdTypeMap,
) -> std::result::Result<NormalizedRow, Skip> {
    let gross = parse_amount(rec.gross_income).ok_or(Skip::NonNumeric)?;
    let net = parse_amount(rec.net_income).ok_or(Skip::NonNumeric)?;
    if gross == 0.0 {
        return Err(Skip::ZeroGross);
    }
    Ok(NormalizedRow {
        year,
        household_type: labels.canonical(household_type).to_string(),
        gross,
        net,
        tax_rate: round1((gross - net) / gross * 100.0),
        household_count: rec.household_count.to_string(),
        count_flag: rec.count_flag.to_string(),
        gross_flag: rec.gross_flag.to_string(),
        net_flag: rec.net_flag.to_string(),
    })
}

/// Lazily normalize data lines (preamble already removed).
pub fn parse<I>(lines: I) -> impl Iterator<Item = NormalizedRow>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    let labels = HouseholdTypeMap::standard();
    let mut state = CarryForward::default();
    lines
        .into_iter()
        .enumerate()
        .filter_map(move |(idx, line)| {
            let out = state
                .advance(line.as_ref())
                .and_then(|(year, ty, rec)| to_row(year, &ty, &rec, labels));
            match out {
                Ok(row) => Some(row),
                Err(reason) => {
                    trace!(line = idx, ?reason, "skipped line");
                    None
                }
            }
        })
}

/// Normalize and collect; zero rows is an `EmptyResult` for `source`.
pub fn normalize_lines<I>(lines: I, source: &str) -> Result<Vec<NormalizedRow>>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    let rows: Vec<NormalizedRow> = parse(lines).collect();
    if rows.is_empty() {
        return Err(PickstatError::EmptyResult(source.to_string()));
    }
    debug!(source, rows = rows.len(), "normalized");
    Ok(rows)
}

/// Read an income file (UTF-8, optional BOM), skip `preamble` header lines
/// and normalize the rest.
#[tracing::instrument(level = "info", skip(path), fields(path = %path.as_ref().display()))]
pub fn load_income_file<P: AsRef<Path>>(path: P, preamble: usize) -> Result<Vec<NormalizedRow>> {
    let path = path.as_ref();
    let bytes = fs::read(path).map_err(|e| PickstatError::data_load(path, e))?;
    let text = String::from_utf8(bytes).map_err(|e| PickstatError::data_load(path, e))?;
    let text = text.strip_prefix('\u{feff}').unwrap_or(&text);

    let rows = normalize_lines(text.lines().skip(preamble), &path.display().to_string())?;
    info!(rows = rows.len(), "loaded income data");
    Ok(rows)
}

/// Normalize several independent files in parallel, one result per path.
pub fn load_income_files<P>(paths: &[P], preamble: usize) -> Vec<Result<Vec<NormalizedRow>>>
where
    P: AsRef<Path> + Sync,
{
    paths
        .par_iter()
        .map(|p| load_income_file(p, preamble))
        .collect()
}
