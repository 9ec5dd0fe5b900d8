mod app;
mod config;
mod domain;
mod error;
mod input;
mod logging;
mod planner;
mod timeline;
mod ui;

use anyhow::{Context, Result};
use app::{AppState, POLL_INTERVAL};
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use domain::{done_badge, minute_of_day, parse_date, time_range_text};
use logging::{init_tracing, LogTarget};
use planner::Planner;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::path::PathBuf;
use timeline::layout_tasks;
use tracing::info;

#[derive(Parser)]
#[command(name = "dayplan")]
#[command(about = "A terminal day planner with a month calendar and a zoomable day timeline", long_about = None)]
struct Cli {
    /// Configuration directory. Defaults to $DAYPLAN_HOME, then the platform config dir.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the demo agenda for a date with its timeline columns
    Agenda {
        /// Date to print (YYYY-MM-DD format). Defaults to today.
        #[arg(short, long)]
        date: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Agenda { date }) => {
            init_tracing(cli.verbose, LogTarget::Stderr)?;
            let date = match date {
                Some(text) => parse_date(&text)?,
                None => Local::now().date_naive(),
            };
            print_agenda(date);
            Ok(())
        }
        None => run_tui(cli.config, cli.verbose),
    }
}

/// Print the seeded tasks of `date` in display order
fn print_agenda(date: NaiveDate) {
    let today = Local::now().date_naive();
    let planner = Planner::with_demo_data(today);
    planner.select_date(date);
    let snapshot = planner.snapshot();
    let tasks = &snapshot.tasks_for_selected_date;

    println!("{}", date.format("%A, %-d %B %Y"));
    if tasks.is_empty() {
        println!("  No tasks");
        return;
    }

    for layout in layout_tasks(tasks) {
        let task = layout.task;
        println!(
            "  {} {:<13}  {:<24} column {}/{}",
            done_badge(task),
            time_range_text(task),
            task.title,
            layout.column + 1,
            layout.columns_in_group,
        );
    }
}

fn run_tui(config_override: Option<PathBuf>, verbose: u8) -> Result<()> {
    let dir = config::config_dir(config_override.as_deref())?;
    config::ensure_dir(&dir)
        .with_context(|| format!("Failed to create config directory: {}", dir.display()))?;
    init_tracing(verbose, LogTarget::File(&config::log_file(&dir)))?;

    let settings_path = config::settings_file(&dir);
    let settings = config::load_settings(&settings_path)
        .with_context(|| format!("Failed to load settings: {}", settings_path.display()))?;

    let now = Local::now();
    let today = now.date_naive();
    let planner = Planner::with_demo_data(today);
    let mut app = AppState::new(planner, settings, Some(settings_path), today, minute_of_day(now.time()));
    info!(dir = %dir.display(), %today, "starting dayplan");

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = &result {
        tracing::error!(error = %err, "dayplan exited with an error");
    }
    result
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut AppState) -> Result<()> {
    loop {
        app.refresh();
        terminal.draw(|f| ui::render(f, app))?;

        if event::poll(POLL_INTERVAL)? {
            if let Event::Key(key) = event::read()? {
                // Only process key press events (ignore key release)
                if key.kind == KeyEventKind::Press && input::handle_key(app, key)? {
                    return Ok(());
                }
            }
        }
    }
}
