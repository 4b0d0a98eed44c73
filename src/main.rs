mod app;
mod commands;
mod domain;
mod error;
mod input;
mod logging;
mod notifications;
mod persistence;
mod store;
mod ticker;
mod ui;

use anyhow::{Context, Result};
use app::AppState;
use clap::{Parser, Subcommand};
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use domain::Filter;
use notifications::{DesktopNotifier, DisabledNotifier, Notifier};
use persistence::{
    ensure_data_dir, init_local_data_dir, load_settings, save_settings, settings_file, FileSlot,
    Settings,
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::path::{Path, PathBuf};
use store::TaskStore;

#[derive(Parser)]
#[command(name = "tend")]
#[command(
    about = "A small terminal to-do list with filters, due dates and reminders",
    long_about = None
)]
struct Cli {
    /// Data directory. Defaults to the nearest .tend directory, then ~/.tend
    #[arg(long, global = true, env = "TEND_DIR")]
    dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a local .tend directory in the current directory
    Init,
    /// Add a task
    Add {
        /// Task text
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
        /// Due date (YYYY-MM-DD)
        #[arg(short, long)]
        due: Option<String>,
    },
    /// List tasks; numbers are positions in the full list
    List {
        #[arg(short, long, value_enum, default_value_t = Filter::All)]
        filter: Filter,
    },
    /// Toggle a task between done and not done
    Done { number: usize },
    /// Replace a task's text and due date (resets completion)
    Edit {
        number: usize,
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
        /// Due date (YYYY-MM-DD)
        #[arg(short, long)]
        due: Option<String>,
    },
    /// Delete a task
    Rm { number: usize },
    /// Delete every completed task
    ClearCompleted,
    /// Send notifications for open tasks due today
    Remind,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(Commands::Init) = cli.command {
        let current_dir = std::env::current_dir().context("Could not determine current directory")?;
        let data_dir = init_local_data_dir(&current_dir)?;
        save_settings(settings_file(&data_dir), &Settings::default())?;
        println!("Initialized tend directory: {}", data_dir.display());
        println!();
        println!("tend will now use this local directory for task storage.");
        return Ok(());
    }

    let data_dir = ensure_data_dir(cli.dir.as_deref())?;
    let settings = load_settings(settings_file(&data_dir))?;
    let _log_guard = logging::init_logging(&data_dir, &settings.log_level)?;
    tracing::debug!(dir = %data_dir.display(), "using data directory");

    let mut store = open_store(&data_dir, &settings);
    let today = ticker::today();

    match cli.command {
        None => run_tui(store, today),
        Some(Commands::Init) => Ok(()),
        Some(Commands::Add { text, due }) => {
            println!("{}", commands::add(&mut store, &text.join(" "), due.as_deref())?);
            Ok(())
        }
        Some(Commands::List { filter }) => {
            let rows = commands::list(&mut store, filter, today);
            if rows.is_empty() {
                println!("No tasks.");
            }
            for row in rows {
                println!("{}", row);
            }
            Ok(())
        }
        Some(Commands::Done { number }) => {
            println!("{}", commands::toggle(&mut store, number)?);
            Ok(())
        }
        Some(Commands::Edit { number, text, due }) => {
            println!("{}", commands::edit(&mut store, number, &text.join(" "), due.as_deref())?);
            Ok(())
        }
        Some(Commands::Rm { number }) => {
            println!("{}", commands::remove(&mut store, number)?);
            Ok(())
        }
        Some(Commands::ClearCompleted) => {
            println!("{}", commands::clear_completed(&mut store)?);
            Ok(())
        }
        Some(Commands::Remind) => {
            println!("{}", commands::remind(&store, today));
            Ok(())
        }
    }
}

/// Build the store over the configured slot and notifier
fn open_store(data_dir: &Path, settings: &Settings) -> TaskStore {
    let slot = FileSlot::new(data_dir, &settings.slot);
    tracing::debug!(path = %slot.path().display(), "task slot");
    let notifier: Box<dyn Notifier> = if settings.reminders {
        Box::new(DesktopNotifier::new())
    } else {
        Box::new(DisabledNotifier)
    };
    TaskStore::load(Box::new(slot), notifier)
}

fn run_tui(store: TaskStore, today: chrono::NaiveDate) -> Result<()> {
    let mut app = AppState::new(store, today);
    app.remind();

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

    // Last chance for a write that failed earlier
    if let Err(e) = app.store.flush() {
        eprintln!("Error saving tasks: {:#}", e);
    }

    if let Err(err) = result {
        eprintln!("Error: {}", err);
    }

    Ok(())
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut AppState,
) -> Result<()> {
    let tick_rate = ticker::tick_duration();

    loop {
        terminal.draw(|f| ui::render(f, app))?;

        if event::poll(tick_rate)? {
            if let Event::Key(key) = event::read()? {
                // Only process key press events (ignore key release)
                if key.kind == KeyEventKind::Press && input::handle_key(app, key)? {
                    return Ok(());
                }
            }
        }

        app.tick(ticker::today());
    }
}
