//! TsxView TUI — four-panel terminal interface with vim-style navigation.
//!
//! Panels:
//! 1. Universe — ticker list, fetch progress, dataset summary
//! 2. Settings — price ceiling, pinned ticker, pagination knobs
//! 3. Chart — adjusted-close line chart, one page of tickers at a time
//! 4. Help — keyboard shortcuts and documentation

mod app;
mod input;
mod persistence;
mod theme;
mod ui;
mod worker;

use std::io::{self, stdout};
use std::path::PathBuf;
use std::sync::mpsc;
use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use tsxview_core::TidyFrame;

use crate::app::{AppState, ErrorCategory, Overlay};
use crate::worker::{WorkerCommand, WorkerResponse};

fn main() -> Result<()> {
    // Install a panic hook that restores the terminal before printing the panic.
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stderr(), LeaveAlternateScreen);
        default_hook(info);
    }));

    let state_path = dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("tsxview")
        .join("state.json");

    // Load persisted state
    let persisted = persistence::load(&state_path);

    // Worker channels
    let (cmd_tx, cmd_rx) = mpsc::channel();
    let (resp_tx, resp_rx) = mpsc::channel();

    // Spawn worker
    let worker_handle = worker::spawn_worker(cmd_rx, resp_tx);

    // Build app state
    let mut app = AppState::new(cmd_tx.clone(), resp_rx, state_path.clone());

    // Apply persisted state; a first run has nothing to apply
    match persisted {
        Some(state) => persistence::apply(&mut app, state),
        None => app.overlay = Overlay::Welcome,
    }

    // Load the ticker universe in the background
    let _ = cmd_tx.send(WorkerCommand::LoadUniverse {
        csv: app.config.ticker_csv_path(),
    });

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Run the main event loop
    let result = run_app(&mut terminal, &mut app);

    // Save state before exit
    let persisted = persistence::extract(&app);
    let _ = persistence::save(&state_path, &persisted);

    // Shutdown worker
    let _ = cmd_tx.send(WorkerCommand::Shutdown);
    let _ = worker_handle.join();

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

        // 2. Drain worker responses (non-blocking)
        while let Ok(resp) = app.worker_rx.try_recv() {
            handle_worker_response(app, resp);
        }

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

fn handle_worker_response(app: &mut AppState, resp: WorkerResponse) {
    match resp {
        WorkerResponse::UniverseLoaded { universe } => {
            let count = universe.len();
            let source = universe.source_label();
            let warning = universe.warning.clone();
            app.universe.universe = Some(universe);
            app.universe.cursor = app.universe.cursor.min(count.saturating_sub(1));
            if let Some(warning) = warning {
                app.push_error(ErrorCategory::Data, warning, "universe".into());
            } else if !app.universe.fetch_in_progress {
                app.set_status(format!("Universe: {count} tickers from {source}"));
            }
        }
        WorkerResponse::FetchProgress {
            symbol,
            index,
            total,
        } => {
            app.universe.fetch_current_symbol = Some(symbol);
            app.universe.fetch_done = index;
            app.universe.fetch_total = total;
        }
        WorkerResponse::FetchSymbolDone {
            symbol,
            success,
            error,
        } => {
            app.universe.fetch_status.insert(symbol.clone(), success);
            if let Some(err) = error {
                app.push_error(
                    ErrorCategory::Network,
                    format!("Failed to fetch: {err}"),
                    symbol,
                );
            }
            app.universe.fetch_done += 1;
        }
        WorkerResponse::FetchBatchDone { succeeded, failed } => {
            app.universe.fetch_current_symbol = None;
            if failed == 0 {
                app.set_status(format!("Fetch complete: {succeeded} symbols downloaded"));
            } else {
                app.set_warning(format!("Fetch done: {succeeded} ok, {failed} failed"));
            }
        }
        WorkerResponse::FetchComplete {
            table,
            failures,
            memo_hit,
        } => {
            app.universe.fetch_in_progress = false;
            app.universe.fetch_current_symbol = None;
            app.universe.last_failures = failures;
            let width = table.width();
            let height = table.height();
            app.dataset.frame = Some(TidyFrame::from_wide(&table));
            app.dataset.table = Some(table);
            app.dataset.fetched_at = Some(chrono::Local::now().naive_local());
            app.dataset.memo_hit = memo_hit;
            app.chart.page = 1;
            let cache_note = if memo_hit { " (session cache)" } else { "" };
            app.set_status(format!(
                "Dataset ready{cache_note}: {width} tickers, {height} rows"
            ));
        }
        WorkerResponse::FetchFailed { error } => {
            app.universe.fetch_in_progress = false;
            app.universe.fetch_current_symbol = None;
            app.push_error(ErrorCategory::Data, error, "fetch".into());
        }
        WorkerResponse::ExportDone { wide, tidy } => {
            app.set_status(format!("Exported {} and {}", wide.display(), tidy.display()));
        }
        WorkerResponse::Error {
            category,
            message,
            context,
        } => {
            let cat = match category.as_str() {
                "network" => ErrorCategory::Network,
                "data" => ErrorCategory::Data,
                "artifact" => ErrorCategory::Artifact,
                _ => ErrorCategory::Other,
            };
            app.push_error(cat, message, context);
        }
    }
}
