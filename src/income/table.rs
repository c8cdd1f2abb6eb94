// src/income/table.rs

use std::collections::BTreeSet;
use tracing::debug;

use super::{
    chart::{Bar, ChartData, ChartKind, IncomeKind, Series},
    normalize::NormalizedRow,
};
use crate::error::{PickstatError, Result};

/// All normalized rows of one income file.
#[derive(Debug, Clone, Default)]
pub struct IncomeTable {
    rows: Vec<NormalizedRow>,
}

/// Dataset-wide counts shown next to the filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Overview {
    pub total_records: usize,
    pub years_covered: usize,
    pub household_types: usize,
}

/// Chosen years and household types. Both must be non-empty to chart.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    pub years: BTreeSet<i32>,
    pub household_types: BTreeSet<String>,
}

/// Averages over a filtered view.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KeyMetrics {
    pub avg_gross: f64,
    pub avg_net: f64,
    pub avg_tax_rate: f64,
    /// `avg_gross - avg_net`
    pub avg_income_gap: f64,
}

impl IncomeTable {
    pub fn new(rows: Vec<NormalizedRow>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[NormalizedRow] {
        &self.rows
    }

    pub fn available_years(&self) -> Vec<i32> {
        let set: BTreeSet<i32> = self.rows.iter().map(|r| r.year).collect();
        set.into_iter().collect()
    }

    pub fn available_household_types(&self) -> Vec<String> {
        let set: BTreeSet<&str> = self
            .rows
            .iter()
            .map(|r| r.household_type.as_str())
            .collect();
        set.into_iter().map(str::to_string).collect()
    }

    pub fn overview(&self) -> Overview {
        Overview {
            total_records: self.rows.len(),
            years_covered: self.available_years().len(),
            household_types: self.available_household_types().len(),
        }
    }

    /// Everything selected; the dashboard's initial state.
    pub fn select_all(&self) -> Selection {
        Selection {
            years: self.available_years().into_iter().collect(),
            household_types: self.available_household_types().into_iter().collect(),
        }
    }

    /// Rows matching `sel`, in source order.
    pub fn view<'a>(&'a self, sel: &'a Selection) -> Result<View<'a>> {
        if sel.years.is_empty() || sel.household_types.is_empty() {
            return Err(PickstatError::EmptySelection);
        }
        let rows: Vec<&NormalizedRow> = self
            .rows
            .iter()
            .filter(|r| {
                sel.years.contains(&r.year) && sel.household_types.contains(&r.household_type)
            })
            .collect();
        debug!(
            years = sel.years.len(),
            types = sel.household_types.len(),
            rows = rows.len(),
            "filtered"
        );
        Ok(View {
            selection: sel,
            rows,
        })
    }
}

/// A filtered slice of the table.
#[derive(Debug, Clone)]
pub struct View<'a> {
    selection: &'a Selection,
    rows: Vec<&'a NormalizedRow>,
}

impl<'a> View<'a> {
    pub fn rows(&self) -> &[&'a NormalizedRow] {
        &self.rows
    }

    pub fn selection(&self) -> &Selection {
        self.selection
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// None when nothing matched the selection.
    pub fn metrics(&self) -> Option<KeyMetrics> {
        if self.rows.is_empty() {
            return None;
        }
        let n = self.rows.len() as f64;
        let mean =
            |f: fn(&NormalizedRow) -> f64| self.rows.iter().map(|&r| f(r)).sum::<f64>() / n;
        let avg_gross = mean(|r| r.gross);
        let avg_net = mean(|r| r.net);
        Some(KeyMetrics {
            avg_gross,
            avg_net,
            avg_tax_rate: mean(|r| r.tax_rate),
            avg_income_gap: avg_gross - avg_net,
        })
    }

    /// Gross and net lines per household type, points ordered by year.
    pub fn income_comparison(&self) -> Vec<Series> {
        let mut out = Vec::new();
        for ty in &self.selection.household_types {
            for kind in [IncomeKind::Gross, IncomeKind::Net] {
                let mut points: Vec<(i32, f64)> = self
                    .rows
                    .iter()
                    .filter(|r| &r.household_type == ty)
                    .map(|r| (r.year, kind.amount(r)))
                    .collect();
                if points.is_empty() {
                    continue;
                }
                points.sort_by_key(|p| p.0);
                out.push(Series {
                    household_type: ty.clone(),
                    kind,
                    points,
                });
            }
        }
        out
    }

    pub fn tax_rates(&self) -> Vec<Bar> {
        self.bars(|r| r.tax_rate)
    }

    pub fn income_gaps(&self) -> Vec<Bar> {
        self.bars(|r| r.gross - r.net)
    }

    fn bars(&self, value: impl Fn(&NormalizedRow) -> f64) -> Vec<Bar> {
        self.rows
            .iter()
            .map(|&r| Bar {
                year: r.year,
                household_type: r.household_type.clone(),
                value: value(r),
            })
            .collect()
    }

    /// Data for the charts `kind` asks for, in display order.
    pub fn charts(&self, kind: ChartKind) -> Vec<ChartData> {
        kind.expand()
            .iter()
            .map(|k| match k {
                ChartKind::TaxRate => ChartData::TaxRate(self.tax_rates()),
                ChartKind::IncomeGap => ChartData::IncomeGap(self.income_gaps()),
                ChartKind::IncomeComparison | ChartKind::All => {
                    ChartData::IncomeComparison(self.income_comparison())
                }
            })
            .collect()
    }
}
