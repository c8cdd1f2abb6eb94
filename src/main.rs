use anyhow::{Context, Result};
use pickstat::{
    config::{Config, CONFIG_FILE},
    display::{DisplaySurface, Level, TextSurface},
    income::{self, export, ChartKind, IncomeTable, Selection},
    PickstatError,
};
use std::{
    collections::BTreeSet,
    io::{self, BufRead},
};
use tracing::{error, info, warn};
use tracing_subscriber::{fmt, EnvFilter};

const HELP: &str = "commands: years <y..|all>, types <a, b..|all>, \
chart <income|tax|gap|all>, table, export, help, quit";

/// What the user currently has selected.
struct Controls {
    selection: Selection,
    chart: ChartKind,
    show_table: bool,
}

fn main() -> Result<()> {
    // ─── 1) init logging ─────────────────────────────────────────────
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_writer(io::stderr)
        .init();
    info!("startup");

    let stdout = io::stdout();
    let mut surface = TextSurface::new(stdout.lock());

    // ─── 2) config + data ────────────────────────────────────────────
    let cfg = match Config::load(CONFIG_FILE) {
        Ok(c) => c,
        Err(e) => {
            error!("config: {}", e);
            surface.notice(Level::Error, &e.to_string())?;
            return Ok(());
        }
    };

    let rows = match income::load_income_file(&cfg.income_path, cfg.income_preamble_lines) {
        Ok(rows) => rows,
        Err(e) => {
            error!("load failed: {}", e);
            surface.notice(Level::Error, &format!("Failed to load data: {}", e))?;
            surface.notice(
                Level::Error,
                &format!(
                    "Please make sure the CSV file is in the correct location: {}",
                    cfg.income_path.display()
                ),
            )?;
            return Ok(());
        }
    };
    let table = IncomeTable::new(rows);

    let mut controls = Controls {
        selection: table.select_all(),
        chart: ChartKind::All,
        show_table: false,
    };
    render(&mut surface, &table, &controls)?;
    surface.notice(Level::Info, HELP)?;

    // ─── 3) command loop ─────────────────────────────────────────────
    for line in io::stdin().lock().lines() {
        let line = line.context("reading stdin")?;
        let (cmd, arg) = match line.trim().split_once(' ') {
            Some((c, a)) => (c, a.trim()),
            None => (line.trim(), ""),
        };
        match cmd {
            "" => continue,
            "quit" | "exit" => break,
            "help" => {
                surface.notice(Level::Info, HELP)?;
                continue;
            }
            "years" => match parse_years(arg, &table) {
                Ok(years) => controls.selection.years = years,
                Err(msg) => {
                    surface.notice(Level::Warning, &msg)?;
                    continue;
                }
            },
            "types" => {
                controls.selection.household_types = if arg.eq_ignore_ascii_case("all") {
                    table.available_household_types().into_iter().collect()
                } else {
                    arg.split(',')
                        .map(str::trim)
                        .filter(|s| !s.is_empty())
                        .map(str::to_string)
                        .collect()
                }
            }
            "chart" => match arg.parse::<ChartKind>() {
                Ok(kind) => controls.chart = kind,
                Err(msg) => {
                    surface.notice(Level::Warning, &msg)?;
                    continue;
                }
            },
            "table" => controls.show_table = !controls.show_table,
            "export" => {
                match table
                    .view(&controls.selection)
                    .and_then(|v| export::export_to_dir(&v, &cfg.export_dir))
                {
                    Ok(path) => surface.notice(
                        Level::Success,
                        &format!("Data exported to {}", path.display()),
                    )?,
                    Err(e) => report(&mut surface, &e)?,
                }
                continue;
            }
            other => {
                surface.notice(Level::Warning, &format!("unknown command '{}'", other))?;
                continue;
            }
        }
        render(&mut surface, &table, &controls)?;
    }

    info!("bye");
    Ok(())
}

fn parse_years(arg: &str, table: &IncomeTable) -> std::result::Result<BTreeSet<i32>, String> {
    if arg.eq_ignore_ascii_case("all") {
        return Ok(table.available_years().into_iter().collect());
    }
    arg.split(|c: char| c == ',' || c.is_whitespace())
        .filter(|s| !s.is_empty())
        .map(|s| s.parse::<i32>().map_err(|_| format!("not a year: '{}'", s)))
        .collect()
}

fn report<S: DisplaySurface>(surface: &mut S, e: &PickstatError) -> io::Result<()> {
    if e.is_recoverable() {
        warn!("{}", e);
        surface.notice(Level::Warning, &e.to_string())
    } else {
        error!("{}", e);
        surface.notice(Level::Error, &e.to_string())
    }
}

fn render<S: DisplaySurface>(
    surface: &mut S,
    table: &IncomeTable,
    c: &Controls,
) -> io::Result<()> {
    surface.overview(&table.overview())?;

    let view = match table.view(&c.selection) {
        Ok(v) => v,
        Err(PickstatError::EmptySelection) => {
            return surface.notice(
                Level::Warning,
                "Please select at least one year and one household type to view the charts.",
            )
        }
        Err(e) => return report(surface, &e),
    };

    surface.metrics(view.metrics().as_ref())?;
    for chart in view.charts(c.chart) {
        surface.chart(&chart)?;
    }
    if c.show_table {
        surface.table(&export::display_rows(&view))?;
    }
    Ok(())
}
