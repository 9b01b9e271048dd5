mod input;
mod ui;

use crossterm::event::{self, Event, KeyEventKind};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use fillstat::build_info;
use fillstat::catalog::Catalog;
use fillstat::cli::{parse_args, Command, HELP_TEXT};
use fillstat::core::constants::{AUTOSAVE_INTERVAL_SECONDS, LOG_FILE};
use fillstat::session::{self, Session, SessionConfig};
use fillstat::utils::persistence::fillstat_dir;
use input::{handle_editor_input, EditorState, InputResult};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

/// File-only logging; stderr would corrupt the terminal UI.
fn setup_logging() -> io::Result<()> {
    let dir = fillstat_dir()?;
    let file_appender = tracing_appender::rolling::never(&dir, LOG_FILE);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = EnvFilter::try_from_env("FILLSTAT_LOG")
        .unwrap_or_else(|_| EnvFilter::new("fillstat=info"));
    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking)
        .with_ansi(false);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .init();

    // Keep the writer alive for the whole process
    std::mem::forget(guard);
    tracing::info!(version = %build_info::version_line(), "logging initialized");
    Ok(())
}

fn print_saved_formula() {
    let Some(saved) = session::load_saved_session() else {
        println!("No autosaved session.");
        return;
    };
    let settings = saved.snapshot.settings;
    println!(
        "{} | start {} pot | recipe {} | saved {} UTC",
        settings.item_kind.name(),
        settings.starting_potential,
        settings.recipe_potential,
        saved.saved_at_display()
    );
    match Session::auto_load(Arc::new(Catalog::default()), saved.snapshot) {
        Ok(session) => {
            for line in session.formula_display_lines() {
                println!("{}", line);
            }
            println!("Success rate: {}%", session.success_rate());
        }
        Err(e) => println!("Autosave cannot be replayed: {}", e),
    }
}

fn start_session(config: SessionConfig, resume: bool) -> io::Result<Session> {
    let catalog = Arc::new(Catalog::default());
    if resume {
        if let Some(session) = session::restore_session(Arc::clone(&catalog)) {
            tracing::info!(steps = session.formula().len(), "resumed autosaved session");
            return Ok(session);
        }
        println!("No usable autosave found; starting a new session.");
    }
    Session::new(catalog, config).map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))
}

fn main() -> io::Result<()> {
    let command = match parse_args(std::env::args().skip(1)) {
        Ok(command) => command,
        Err(e) => {
            eprintln!("{}", e);
            eprintln!("Run 'fillstat --help' for usage.");
            std::process::exit(1);
        }
    };

    let (config, resume, budget) = match command {
        Command::Version => {
            println!("{}", build_info::version_line());
            return Ok(());
        }
        Command::Help => {
            println!("{}", HELP_TEXT);
            return Ok(());
        }
        Command::Show => {
            print_saved_formula();
            return Ok(());
        }
        Command::Run {
            config,
            resume,
            budget,
        } => (config, resume, budget),
    };

    if let Err(e) = setup_logging() {
        eprintln!("Logging disabled: {}", e);
    }

    let mut session = match start_session(config, resume) {
        Ok(session) => session,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    };
    let mut editor = EditorState::new();

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    stdout.execute(EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut last_autosave = Instant::now();
    let mut dirty = false;
    let mut edited = false;

    loop {
        terminal.draw(|frame| ui::draw_editor(frame, &session, &editor, &budget))?;

        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    match handle_editor_input(key, &mut session, &mut editor) {
                        InputResult::Continue => {}
                        InputResult::NeedsSave => {
                            dirty = true;
                            edited = true;
                        }
                        InputResult::Quit => break,
                    }
                }
            }
        }

        // Auto-save every 30 seconds
        if dirty && last_autosave.elapsed() >= Duration::from_secs(AUTOSAVE_INTERVAL_SECONDS) {
            if let Err(e) = session::save_session(&session) {
                tracing::warn!(error = %e, "autosave failed");
            }
            last_autosave = Instant::now();
            dirty = false;
        }
    }

    // Cleanup
    disable_raw_mode()?;
    terminal.backend_mut().execute(LeaveAlternateScreen)?;

    if session::should_save_on_exit(&session, edited) {
        if let Err(e) = session::save_session(&session) {
            eprintln!("Failed to save session: {}", e);
        }
    }
    Ok(())
}
