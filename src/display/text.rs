// src/display/text.rs

use std::io::{self, Write};

use super::{DisplaySurface, Level};
use crate::income::{export::DisplayRow, ChartData, KeyMetrics, Overview};

const RULE: &str = "----------------------------------------";

/// Plain-text surface for terminals and logs.
pub struct TextSurface<W: Write> {
    out: W,
}

impl<W: Write> TextSurface<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

/// `12345.6` → `12,346`
fn thousands(v: f64) -> String {
    let n = v.round() as i64;
    let digits = n.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    if n < 0 {
        out.insert(0, '-');
    }
    out
}

impl<W: Write> DisplaySurface for TextSurface<W> {
    fn question(&mut self, category: &str, text: &str) -> io::Result<()> {
        writeln!(self.out, "{}", RULE)?;
        writeln!(self.out, "[{}]", category)?;
        writeln!(self.out, "  {}", text)?;
        writeln!(self.out, "{}", RULE)
    }

    fn notice(&mut self, level: Level, message: &str) -> io::Result<()> {
        let tag = match level {
            Level::Info => "info",
            Level::Success => "ok",
            Level::Warning => "warning",
            Level::Error => "error",
        };
        writeln!(self.out, "{}: {}", tag, message)
    }

    fn overview(&mut self, o: &Overview) -> io::Result<()> {
        writeln!(self.out, "Total Records:   {}", thousands(o.total_records as f64))?;
        writeln!(self.out, "Years Covered:   {}", o.years_covered)?;
        writeln!(self.out, "Household Types: {}", o.household_types)
    }

    fn metrics(&mut self, metrics: Option<&KeyMetrics>) -> io::Result<()> {
        let Some(m) = metrics else {
            return writeln!(self.out, "no rows match the selection");
        };
        writeln!(self.out, "Average Gross Income: €{}", thousands(m.avg_gross))?;
        writeln!(self.out, "Average Net Income:   €{}", thousands(m.avg_net))?;
        writeln!(self.out, "Average Tax Rate:     {:.1}%", m.avg_tax_rate)?;
        writeln!(self.out, "Average Income Gap:   €{}", thousands(m.avg_income_gap))
    }

    fn chart(&mut self, chart: &ChartData) -> io::Result<()> {
        writeln!(self.out, "{}", chart.title())?;
        writeln!(self.out, "  y: {}", chart.y_label())?;
        match chart {
            ChartData::IncomeComparison(series) => {
                for s in series {
                    let pts: Vec<String> = s
                        .points
                        .iter()
                        .map(|(y, v)| format!("{}={}", y, thousands(*v)))
                        .collect();
                    writeln!(
                        self.out,
                        "  {} ({}): {}",
                        s.household_type,
                        s.kind.as_str(),
                        pts.join(" ")
                    )?;
                }
            }
            ChartData::TaxRate(bars) => {
                for b in bars {
                    writeln!(self.out, "  {} {}: {:.1}", b.year, b.household_type, b.value)?;
                }
            }
            ChartData::IncomeGap(bars) => {
                for b in bars {
                    writeln!(
                        self.out,
                        "  {} {}: {}",
                        b.year,
                        b.household_type,
                        thousands(b.value)
                    )?;
                }
            }
        }
        Ok(())
    }

    fn table(&mut self, rows: &[DisplayRow<'_>]) -> io::Result<()> {
        let width = rows
            .iter()
            .map(|r| r.household_type.chars().count())
            .max()
            .unwrap_or(0)
            .max("Household Type".len());
        writeln!(
            self.out,
            "Year  {:<width$}  {:>16}  {:>14}  {:>12}",
            "Household Type",
            "Gross Income (€)",
            "Net Income (€)",
            "Tax Rate (%)",
            width = width
        )?;
        for r in rows {
            writeln!(
                self.out,
                "{:<4}  {:<width$}  {:>16}  {:>14}  {:>12.1}",
                r.year,
                r.household_type,
                r.gross,
                r.net,
                r.tax_rate,
                width = width
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::income::{chart::Bar, export::DisplayRow};

    fn render(f: impl FnOnce(&mut TextSurface<Vec<u8>>) -> io::Result<()>) -> String {
        let mut s = TextSurface::new(Vec::new());
        f(&mut s).unwrap();
        String::from_utf8(s.into_inner()).unwrap()
    }

    #[test]
    fn groups_thousands() {
        assert_eq!(thousands(0.0), "0");
        assert_eq!(thousands(999.4), "999");
        assert_eq!(thousands(1234567.0), "1,234,567");
        assert_eq!(thousands(-45000.0), "-45,000");
    }

    #[test]
    fn renders_question_block() {
        let out = render(|s| s.question("Fun", "Cats or dogs?"));
        assert!(out.contains("[Fun]"));
        assert!(out.contains("  Cats or dogs?"));
    }

    #[test]
    fn renders_metrics_and_placeholder() {
        let m = KeyMetrics {
            avg_gross: 45000.4,
            avg_net: 33000.0,
            avg_tax_rate: 26.66,
            avg_income_gap: 12000.4,
        };
        let out = render(|s| s.metrics(Some(&m)));
        assert!(out.contains("€45,000"));
        assert!(out.contains("26.7%"));
        let out = render(|s| s.metrics(None));
        assert!(out.contains("no rows"));
    }

    #[test]
    fn renders_bars() {
        let chart = ChartData::TaxRate(vec![Bar {
            year: 2010,
            household_type: "Total".into(),
            value: 20.0,
        }]);
        let out = render(|s| s.chart(&chart));
        assert!(out.starts_with("Effective Tax Rate"));
        assert!(out.contains("2010 Total: 20.0"));
    }

    #[test]
    fn renders_table_header_and_rows() {
        let rows = [DisplayRow {
            year: 2012,
            household_type: "Single person",
            gross: 30000,
            net: 20000,
            tax_rate: 33.3,
        }];
        let out = render(|s| s.table(&rows));
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("Year  Household Type"));
        assert!(lines[0].ends_with("Tax Rate (%)"));
        assert!(lines[1].starts_with("2012  Single person "));
        assert!(lines[1].contains("30000"));
        assert!(lines[1].ends_with("33.3"));

        let out = render(|s| s.table(&[]));
        assert_eq!(out.lines().count(), 1);
    }
}
