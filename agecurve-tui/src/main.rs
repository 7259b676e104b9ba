//! AgeCurve TUI — search bar and outlier lists beside two charts.
//!
//! Layout:
//! - Search — live name lookup with suggestions
//! - Over / Under — ranked outliers, Enter plots the highlighted player
//! - Population — the aging curve with the league-average line
//! - Player — history, forecast, projection and backtest marker

use std::fs::{self, File};
use std::io::{self, stdout};
use std::path::PathBuf;
use std::sync::{mpsc, Mutex};
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use crossterm::event::{self, Event};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tracing::info;
use tracing_subscriber::EnvFilter;

use agecurve_core::{AppConfig, Session};
use agecurve_tui::app::{AppState, ErrorCategory};
use agecurve_tui::{input, ui, worker};

#[derive(Parser, Debug)]
#[command(name = "agecurve-tui", about = "Explore player aging curves in the terminal")]
struct Args {
    /// Config file (default: <config_dir>/agecurve/config.toml when present)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Verbose logging to the log file
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    // Install a panic hook that restores the terminal before printing the panic.
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stderr(), LeaveAlternateScreen);
        default_hook(info);
    }));

    // A broken config must not keep the UI from starting.
    let (config, config_error) = match AppConfig::discover(args.config.as_deref()) {
        Ok(config) => (config, None),
        Err(e) => (AppConfig::default(), Some(e)),
    };

    let (tx, rx) = mpsc::channel();
    let mut app = AppState::new(Session::new(&config), rx);
    if let Some(e) = config_error {
        app.push_error(
            ErrorCategory::Config,
            format!("{e}; using defaults"),
            "configuration".into(),
        );
    }

    info!(
        "loading curve from {} and players from {}",
        config.sources.curve, config.sources.players
    );
    // The loader is left to finish on its own; quitting does not wait for it.
    let _loader = worker::spawn_loader(config.sources.clone(), tx)?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut AppState,
) -> Result<()> {
    loop {
        // 1. Render
        terminal.draw(|f| ui::draw(f, app))?;

        // 2. Apply finished loads (non-blocking)
        app.drain_loader();

        // 3. Poll for input events (50ms timeout for ~20 FPS tick)
        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                input::handle_key(app, key);
            }
        }

        // 4. Check quit
        if !app.running {
            break;
        }
    }
    Ok(())
}

/// Logs go to `<cache_dir>/agecurve/agecurve.log`; stdout belongs to the UI.
fn init_logging(verbose: bool) {
    let Some(dir) = dirs::cache_dir().map(|d| d.join("agecurve")) else {
        return;
    };
    if fs::create_dir_all(&dir).is_err() {
        return;
    }
    let Ok(file) = File::create(dir.join("agecurve.log")) else {
        return;
    };
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init();
}
