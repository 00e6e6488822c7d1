//! Background worker thread — network and disk work runs here.
//!
//! Communication with the TUI main thread is via `mpsc` channels. The
//! worker owns the session memo tables, so a fetch repeated with the
//! same window, universe, and provider is served from memory.

use std::path::{Path, PathBuf};
use std::sync::mpsc::{Receiver, Sender};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use tsxview_core::artifacts;
use tsxview_core::data::{
    DataError, DownloadProgress, PriceProvider, SyntheticProvider, YahooProvider,
};
use tsxview_core::session::FetchOutcome;
use tsxview_core::{PriceTable, Session, TidyFrame, Universe};

/// Commands sent from the TUI to the worker.
#[derive(Debug)]
pub enum WorkerCommand {
    LoadUniverse {
        csv: Option<PathBuf>,
    },
    FetchPrices {
        csv: Option<PathBuf>,
        years: u32,
        synthetic: bool,
    },
    ExportDataset {
        dir: PathBuf,
    },
    Shutdown,
}

/// Responses sent from the worker back to the TUI.
#[derive(Debug, Clone)]
pub enum WorkerResponse {
    UniverseLoaded {
        universe: Universe,
    },

    // Download progress
    FetchProgress {
        symbol: String,
        index: usize,
        total: usize,
    },
    FetchSymbolDone {
        symbol: String,
        success: bool,
        error: Option<String>,
    },
    FetchBatchDone {
        succeeded: usize,
        failed: usize,
    },

    // Download outcome
    FetchComplete {
        table: PriceTable,
        failures: Vec<String>,
        memo_hit: bool,
    },
    FetchFailed {
        error: String,
    },

    // Artifact export
    ExportDone {
        wide: PathBuf,
        tidy: PathBuf,
    },

    // General errors
    Error {
        category: String,
        message: String,
        context: String,
    },
}

/// Spawn the background worker thread.
pub fn spawn_worker(rx: Receiver<WorkerCommand>, tx: Sender<WorkerResponse>) -> JoinHandle<()> {
    thread::Builder::new()
        .name("tsxview-worker".into())
        .spawn(move || {
            worker_loop(rx, tx);
        })
        .expect("failed to spawn worker thread")
}

fn worker_loop(rx: Receiver<WorkerCommand>, tx: Sender<WorkerResponse>) {
    let mut session = Session::new();
    let mut last_outcome: Option<Arc<FetchOutcome>> = None;

    loop {
        match rx.recv() {
            Ok(WorkerCommand::Shutdown) | Err(_) => break,
            Ok(cmd) => handle_command(cmd, &mut session, &mut last_outcome, &tx),
        }
    }
}

fn handle_command(
    cmd: WorkerCommand,
    session: &mut Session,
    last_outcome: &mut Option<Arc<FetchOutcome>>,
    tx: &Sender<WorkerResponse>,
) {
    match cmd {
        WorkerCommand::LoadUniverse { csv } => {
            let universe = session.load_universe(csv.as_deref());
            let _ = tx.send(WorkerResponse::UniverseLoaded { universe });
        }
        WorkerCommand::FetchPrices {
            csv,
            years,
            synthetic,
        } => {
            handle_fetch(csv, years, synthetic, session, last_outcome, tx);
        }
        WorkerCommand::ExportDataset { dir } => {
            handle_export(&dir, last_outcome.as_deref(), tx);
        }
        WorkerCommand::Shutdown => {} // handled in loop
    }
}

fn handle_fetch(
    csv: Option<PathBuf>,
    years: u32,
    synthetic: bool,
    session: &mut Session,
    last_outcome: &mut Option<Arc<FetchOutcome>>,
    tx: &Sender<WorkerResponse>,
) {
    let universe = session.load_universe(csv.as_deref());
    let _ = tx.send(WorkerResponse::UniverseLoaded {
        universe: universe.clone(),
    });

    if universe.is_empty() {
        let _ = tx.send(WorkerResponse::FetchFailed {
            error: format!("ticker universe is empty ({})", universe.source_label()),
        });
        return;
    }

    let end = chrono::Local::now().date_naive();
    let start = end - chrono::Duration::days(i64::from(years.max(1)) * 365);

    let provider: Box<dyn PriceProvider> = if synthetic {
        Box::new(SyntheticProvider)
    } else {
        Box::new(YahooProvider::new())
    };
    let progress = ChannelProgress { tx: tx.clone() };

    let (outcome, memo_hit) =
        session.fetch_prices(provider.as_ref(), &universe.tickers, start, end, &progress);

    if outcome.table.is_empty() {
        let _ = tx.send(WorkerResponse::FetchFailed {
            error: format!(
                "no price data for any of {} tickers between {start} and {end}",
                universe.len()
            ),
        });
        return;
    }

    let _ = tx.send(WorkerResponse::FetchComplete {
        table: outcome.table.clone(),
        failures: outcome.report.failure_lines(),
        memo_hit,
    });
    *last_outcome = Some(outcome);
}

fn handle_export(dir: &Path, last_outcome: Option<&FetchOutcome>, tx: &Sender<WorkerResponse>) {
    let Some(outcome) = last_outcome else {
        let _ = tx.send(WorkerResponse::Error {
            category: "artifact".into(),
            message: "nothing fetched yet; press f first".into(),
            context: "export".into(),
        });
        return;
    };

    let frame = TidyFrame::from_wide(&outcome.table);
    match artifacts::write_dataset(&outcome.table, &frame, dir) {
        Ok(paths) => {
            let _ = tx.send(WorkerResponse::ExportDone {
                wide: paths.wide,
                tidy: paths.tidy,
            });
        }
        Err(e) => {
            let _ = tx.send(WorkerResponse::Error {
                category: "artifact".into(),
                message: e.to_string(),
                context: dir.display().to_string(),
            });
        }
    }
}

/// DownloadProgress implementation that sends messages through a channel.
struct ChannelProgress {
    tx: Sender<WorkerResponse>,
}

impl DownloadProgress for ChannelProgress {
    fn on_start(&self, symbol: &str, index: usize, total: usize) {
        let _ = self.tx.send(WorkerResponse::FetchProgress {
            symbol: symbol.to_string(),
            index,
            total,
        });
    }

    fn on_complete(
        &self,
        symbol: &str,
        _index: usize,
        _total: usize,
        result: &Result<(), DataError>,
    ) {
        let _ = self.tx.send(WorkerResponse::FetchSymbolDone {
            symbol: symbol.to_string(),
            success: result.is_ok(),
            error: result.as_ref().err().map(|e| e.to_string()),
        });
    }

    fn on_batch_complete(&self, succeeded: usize, failed: usize, _total: usize) {
        let _ = self.tx.send(WorkerResponse::FetchBatchDone { succeeded, failed });
    }
}
