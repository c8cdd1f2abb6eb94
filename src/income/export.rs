// src/income/export.rs

use csv::WriterBuilder;
use serde::Serialize;
use std::{
    fs::File,
    io::Write,
    path::{Path, PathBuf},
};
use tracing::info;

use super::{
    normalize::{round1, NormalizedRow},
    table::View,
};
use crate::error::{PickstatError, Result};

/// A row as shown in the data table and written to the download.
#[derive(Debug, Serialize, PartialEq)]
pub struct DisplayRow<'a> {
    #[serde(rename = "Year")]
    pub year: i32,
    #[serde(rename = "Household Type")]
    pub household_type: &'a str,
    #[serde(rename = "Gross Income (€)")]
    pub gross: i64,
    #[serde(rename = "Net Income (€)")]
    pub net: i64,
    #[serde(rename = "Tax Rate (%)")]
    pub tax_rate: f64,
}

impl<'a> From<&'a NormalizedRow> for DisplayRow<'a> {
    fn from(r: &'a NormalizedRow) -> Self {
        Self {
            year: r.year,
            household_type: &r.household_type,
            gross: r.gross.round_ties_even() as i64,
            net: r.net.round_ties_even() as i64,
            tax_rate: round1(r.tax_rate),
        }
    }
}

pub fn display_rows<'a>(view: &View<'a>) -> Vec<DisplayRow<'a>> {
    view.rows().iter().map(|&r| DisplayRow::from(r)).collect()
}

/// `german_household_income_<min>_<max>.csv` over the selected years.
pub fn export_file_name(view: &View<'_>) -> Option<String> {
    let years = &view.selection().years;
    let (min, max) = (years.first()?, years.last()?);
    Some(format!("german_household_income_{}_{}.csv", min, max))
}

/// Write the view as comma-delimited text with a header line.
pub fn write_csv<W: Write>(view: &View<'_>, out: W) -> Result<()> {
    let mut wtr = WriterBuilder::new().has_headers(true).from_writer(out);
    for row in display_rows(view) {
        wtr.serialize(row)?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn to_csv_string(view: &View<'_>) -> Result<String> {
    let mut buf = Vec::new();
    write_csv(view, &mut buf)?;
    String::from_utf8(buf).map_err(|e| PickstatError::Io(std::io::Error::other(e)))
}

/// Write the view into `dir` under its export file name.
#[tracing::instrument(level = "info", skip(view, dir), fields(dir = %dir.as_ref().display()))]
pub fn export_to_dir<P: AsRef<Path>>(view: &View<'_>, dir: P) -> Result<PathBuf> {
    let name = export_file_name(view).ok_or(PickstatError::EmptySelection)?;
    let path = dir.as_ref().join(name);
    let file = File::create(&path)?;
    write_csv(view, file)?;
    info!(path = %path.display(), rows = view.rows().len(), "exported");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::income::{normalize::parse, table::IncomeTable};
    use anyhow::Result;
    use std::fs;
    use tempfile::tempdir;

    fn table() -> IncomeTable {
        IncomeTable::new(
            parse([
                "2012;Total;1;;45000.6;;33000.4;",
                ";Persons living alone;1;;3000;;2000;",
                "2014;Total;1;;1000;;800;",
            ])
            .collect(),
        )
    }

    #[test]
    fn writes_header_and_rounded_values() -> Result<()> {
        let t = table();
        let sel = t.select_all();
        let csv = to_csv_string(&t.view(&sel)?)?;
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(
            lines[0],
            "Year,Household Type,Gross Income (€),Net Income (€),Tax Rate (%)"
        );
        assert_eq!(lines[1], "2012,Total,45001,33000,26.7");
        assert_eq!(lines[2], "2012,Single person,3000,2000,33.3");
        assert_eq!(lines[3], "2014,Total,1000,800,20.0");
        assert_eq!(lines.len(), 4);
        Ok(())
    }

    #[test]
    fn whole_euro_ties_round_to_even() -> Result<()> {
        let t = IncomeTable::new(parse(["2016;Total;1;;45000.5;;33001.5;"]).collect());
        let sel = t.select_all();
        let rows = display_rows(&t.view(&sel)?);
        assert_eq!(rows[0].gross, 45000);
        assert_eq!(rows[0].net, 33002);
        Ok(())
    }

    #[test]
    fn file_name_spans_selected_years() -> Result<()> {
        let t = table();
        let sel = t.select_all();
        let view = t.view(&sel)?;
        assert_eq!(
            export_file_name(&view).as_deref(),
            Some("german_household_income_2012_2014.csv")
        );
        Ok(())
    }

    #[test]
    fn exports_into_directory() -> Result<()> {
        let t = table();
        let mut sel = t.select_all();
        sel.years.remove(&2014);
        let view = t.view(&sel)?;

        let dir = tempdir()?;
        let path = export_to_dir(&view, dir.path())?;
        assert_eq!(
            path.file_name().unwrap().to_string_lossy(),
            "german_household_income_2012_2012.csv"
        );
        let text = fs::read_to_string(&path)?;
        assert_eq!(text.lines().count(), 3);
        Ok(())
    }
}
