use std::{fmt, str::FromStr};

use super::normalize::NormalizedRow;

/// Which analysis to show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChartKind {
    IncomeComparison,
    TaxRate,
    IncomeGap,
    #[default]
    All,
}

impl ChartKind {
    /// The concrete charts this selection stands for.
    pub fn expand(self) -> &'static [ChartKind] {
        match self {
            ChartKind::IncomeComparison => &[ChartKind::IncomeComparison],
            ChartKind::TaxRate => &[ChartKind::TaxRate],
            ChartKind::IncomeGap => &[ChartKind::IncomeGap],
            ChartKind::All => &[
                ChartKind::IncomeComparison,
                ChartKind::TaxRate,
                ChartKind::IncomeGap,
            ],
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            ChartKind::IncomeComparison => "Income Comparison",
            ChartKind::TaxRate => "Tax Rate Analysis",
            ChartKind::IncomeGap => "Income Gap Analysis",
            ChartKind::All => "All Charts",
        }
    }
}

impl FromStr for ChartKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "income" | "income comparison" => Ok(ChartKind::IncomeComparison),
            "tax" | "tax rate" | "tax rate analysis" => Ok(ChartKind::TaxRate),
            "gap" | "income gap" | "income gap analysis" => Ok(ChartKind::IncomeGap),
            "all" | "all charts" => Ok(ChartKind::All),
            other => Err(format!("unknown chart type '{}'", other)),
        }
    }
}

impl fmt::Display for ChartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IncomeKind {
    Gross,
    Net,
}

impl IncomeKind {
    pub fn amount(&self, row: &NormalizedRow) -> f64 {
        match self {
            IncomeKind::Gross => row.gross,
            IncomeKind::Net => row.net,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            IncomeKind::Gross => "gross",
            IncomeKind::Net => "net",
        }
    }
}

/// One line of the income comparison chart.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub household_type: String,
    pub kind: IncomeKind,
    /// (year, EUR/year), ordered by year.
    pub points: Vec<(i32, f64)>,
}

/// One bar, grouped by year and coloured by household type.
#[derive(Debug, Clone, PartialEq)]
pub struct Bar {
    pub year: i32,
    pub household_type: String,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ChartData {
    IncomeComparison(Vec<Series>),
    TaxRate(Vec<Bar>),
    IncomeGap(Vec<Bar>),
}

impl ChartData {
    pub fn title(&self) -> &str {
        match self {
            ChartData::IncomeComparison(_) => "Gross vs Net Income by Household Type and Year",
            ChartData::TaxRate(_) => "Effective Tax Rate by Household Type and Year",
            ChartData::IncomeGap(_) => "Income Gap (Gross - Net) by Household Type and Year",
        }
    }

    pub fn y_label(&self) -> &str {
        match self {
            ChartData::IncomeComparison(_) => "Income (EUR/year)",
            ChartData::TaxRate(_) => "Tax Rate (%)",
            ChartData::IncomeGap(_) => "Income Gap (EUR/year)",
        }
    }
}
