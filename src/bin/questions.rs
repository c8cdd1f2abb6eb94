use anyhow::{Context, Result};
use pickstat::{
    config::{Config, CONFIG_FILE},
    display::{DisplaySurface, Level, TextSurface},
    picker::{load_questions, QuestionBank, SessionState},
    PickstatError,
};
use std::io::{self, BufRead};
use tracing::{error, info, warn};
use tracing_subscriber::{fmt, EnvFilter};

const HELP: &str = "commands: categories, select <name|number>, draw, reset, help, quit";

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

    // ─── 2) config + questions ───────────────────────────────────────
    let loaded = Config::load(CONFIG_FILE).and_then(|cfg| load_questions(&cfg.questions_path));
    let bank = match loaded {
        Ok(b) => b,
        Err(e) => {
            error!("{}", e);
            surface.notice(Level::Error, &e.to_string())?;
            return Ok(());
        }
    };

    let mut session = SessionState::new();
    match bank.categories().first() {
        Some(first) => {
            session.select_category(&bank, first);
        }
        None => {
            surface.notice(Level::Error, "the questions file has no rows")?;
            return Ok(());
        }
    }
    list_categories(&mut surface, &bank, &session)?;
    surface.notice(Level::Info, HELP)?;

    // ─── 3) command loop ─────────────────────────────────────────────
    for line in io::stdin().lock().lines() {
        let line = line.context("reading stdin")?;
        let (cmd, arg) = match line.trim().split_once(' ') {
            Some((c, a)) => (c, a.trim()),
            None => (line.trim(), ""),
        };
        match cmd {
            "" => {}
            "quit" | "exit" => break,
            "help" => surface.notice(Level::Info, HELP)?,
            "categories" => list_categories(&mut surface, &bank, &session)?,
            "select" => match resolve_category(&bank, arg) {
                Some(cat) => {
                    session.select_category(&bank, &cat);
                    surface.notice(
                        Level::Info,
                        &format!("{}: {} questions left", cat, session.remaining_count()),
                    )?;
                }
                None => surface.notice(Level::Warning, &format!("no category '{}'", arg))?,
            },
            "reset" => {
                session.reset(&bank);
                surface.notice(Level::Success, "Questions reset for this category!")?;
            }
            "draw" => match session.draw() {
                Ok(q) => surface.question(session.active_category().unwrap_or_default(), &q)?,
                Err(e @ PickstatError::EmptyPool(_)) => {
                    warn!("{}", e);
                    surface.notice(Level::Warning, "No more questions in this category!")?;
                }
                Err(e) => surface.notice(Level::Error, &e.to_string())?,
            },
            other => surface.notice(Level::Warning, &format!("unknown command '{}'", other))?,
        }
    }

    info!("bye");
    Ok(())
}

/// Accept a category name or its 1-based number from the listing.
fn resolve_category(bank: &QuestionBank, arg: &str) -> Option<String> {
    let cats = bank.categories();
    if let Some(c) = cats.iter().find(|c| c.as_str() == arg) {
        return Some(c.clone());
    }
    let idx: usize = arg.parse().ok()?;
    cats.get(idx.checked_sub(1)?).cloned()
}

fn list_categories<S: DisplaySurface>(
    surface: &mut S,
    bank: &QuestionBank,
    session: &SessionState,
) -> io::Result<()> {
    for (i, c) in bank.categories().iter().enumerate() {
        let marker = if session.active_category() == Some(c.as_str()) {
            "*"
        } else {
            " "
        };
        surface.notice(
            Level::Info,
            &format!("{}{} {} ({})", marker, i + 1, c, bank.pool(c).len()),
        )?;
    }
    Ok(())
}
