//! Application state — single-owner, main-thread only.
//!
//! All TUI state lives here. The worker thread communicates via channels.

use std::collections::{HashMap, VecDeque};
use std::path::PathBuf;
use std::sync::mpsc::{Receiver, Sender};

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use tsxview_core::view::{build_page_view, PageView};
use tsxview_core::{PriceTable, TidyFrame, Universe, ViewerConfig};

use crate::worker::{WorkerCommand, WorkerResponse};

/// Which panel is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Panel {
    Universe,
    Settings,
    Chart,
    Help,
}

impl Panel {
    pub fn index(self) -> usize {
        match self {
            Panel::Universe => 0,
            Panel::Settings => 1,
            Panel::Chart => 2,
            Panel::Help => 3,
        }
    }

    pub fn from_index(i: usize) -> Option<Self> {
        match i {
            0 => Some(Panel::Universe),
            1 => Some(Panel::Settings),
            2 => Some(Panel::Chart),
            3 => Some(Panel::Help),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Panel::Universe => "Universe",
            Panel::Settings => "Settings",
            Panel::Chart => "Chart",
            Panel::Help => "Help",
        }
    }

    pub fn next(self) -> Panel {
        Panel::from_index((self.index() + 1) % 4).unwrap()
    }

    pub fn prev(self) -> Panel {
        Panel::from_index((self.index() + 3) % 4).unwrap()
    }
}

/// Status message severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Warning,
    Error,
}

/// An error record for the error history overlay.
#[derive(Debug, Clone)]
pub struct ErrorRecord {
    pub timestamp: NaiveDateTime,
    pub category: ErrorCategory,
    pub message: String,
    pub context: String,
}

/// Error category for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Data,
    Artifact,
    Other,
}

impl ErrorCategory {
    pub fn label(self) -> &'static str {
        match self {
            ErrorCategory::Network => "NET",
            ErrorCategory::Data => "DATA",
            ErrorCategory::Artifact => "ART",
            ErrorCategory::Other => "ERR",
        }
    }
}

/// Universe panel state.
#[derive(Debug)]
pub struct UniversePanelState {
    pub universe: Option<Universe>,
    /// Cursor into the ticker list.
    pub cursor: usize,
    pub fetch_in_progress: bool,
    pub fetch_current_symbol: Option<String>,
    pub fetch_done: usize,
    pub fetch_total: usize,
    /// Per-symbol outcome of the last download (true = fetched).
    pub fetch_status: HashMap<String, bool>,
    /// Display lines for the failed symbols of the last download.
    pub last_failures: Vec<String>,
}

impl UniversePanelState {
    pub fn new() -> Self {
        Self {
            universe: None,
            cursor: 0,
            fetch_in_progress: false,
            fetch_current_symbol: None,
            fetch_done: 0,
            fetch_total: 0,
            fetch_status: HashMap::new(),
            last_failures: Vec::new(),
        }
    }

    pub fn ticker_count(&self) -> usize {
        self.universe.as_ref().map_or(0, |u| u.len())
    }
}

/// Settings panel state.
#[derive(Debug)]
pub struct SettingsPanelState {
    pub cursor: usize,
}

impl SettingsPanelState {
    pub fn new() -> Self {
        Self { cursor: 0 }
    }

    /// Number of settings rows.
    pub fn setting_count(&self) -> usize {
        6 // csv path, years, price ceiling, pinned ticker, page size,
          // tickers per row
    }
}

/// Chart panel state.
#[derive(Debug)]
pub struct ChartPanelState {
    /// Current 1-based page.
    pub page: usize,
}

impl ChartPanelState {
    pub fn new() -> Self {
        Self { page: 1 }
    }
}

/// The last fetched dataset, shared by the chart and the exporter.
#[derive(Debug, Default)]
pub struct DatasetState {
    pub table: Option<PriceTable>,
    pub frame: Option<TidyFrame>,
    pub fetched_at: Option<NaiveDateTime>,
    /// True when the last fetch was served from the session memo.
    pub memo_hit: bool,
}

impl DatasetState {
    pub fn is_loaded(&self) -> bool {
        self.table.is_some()
    }
}

/// Which overlay (if any) is shown on top.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Overlay {
    None,
    Welcome,
    ErrorHistory,
}

/// Top-level application state.
pub struct AppState {
    // Navigation
    pub active_panel: Panel,
    pub running: bool,

    // Viewer settings, adjustable from the Settings panel
    pub config: ViewerConfig,

    // Panel states
    pub universe: UniversePanelState,
    pub settings: SettingsPanelState,
    pub chart: ChartPanelState,
    pub dataset: DatasetState,

    // Worker communication
    pub worker_tx: Sender<WorkerCommand>,
    pub worker_rx: Receiver<WorkerResponse>,

    // Cross-cutting
    pub status_message: Option<(String, StatusLevel)>,
    pub error_history: VecDeque<ErrorRecord>,
    pub error_scroll: usize,
    pub overlay: Overlay,

    #[allow(dead_code)]
    pub state_path: PathBuf,
}

impl AppState {
    pub fn new(
        worker_tx: Sender<WorkerCommand>,
        worker_rx: Receiver<WorkerResponse>,
        state_path: PathBuf,
    ) -> Self {
        Self {
            active_panel: Panel::Universe,
            running: true,
            config: ViewerConfig::load_default(),
            universe: UniversePanelState::new(),
            settings: SettingsPanelState::new(),
            chart: ChartPanelState::new(),
            dataset: DatasetState::default(),
            worker_tx,
            worker_rx,
            status_message: None,
            error_history: VecDeque::with_capacity(50),
            error_scroll: 0,
            overlay: Overlay::None,
            state_path,
        }
    }

    /// The filtered, paginated view of the current dataset for the
    /// current settings and page. `None` until a dataset is loaded.
    pub fn page_view(&self) -> Option<PageView> {
        let frame = self.dataset.frame.as_ref()?;
        Some(build_page_view(
            frame,
            self.config.max_price,
            Some(&self.config.keep),
            self.config.page_size,
            self.chart.page,
        ))
    }

    /// Push an error to the history, capping at 50.
    pub fn push_error(&mut self, category: ErrorCategory, message: String, context: String) {
        let record = ErrorRecord {
            timestamp: chrono::Local::now().naive_local(),
            category,
            message: message.clone(),
            context,
        };
        self.error_history.push_front(record);
        if self.error_history.len() > 50 {
            self.error_history.pop_back();
        }
        self.status_message = Some((message, StatusLevel::Error));
    }

    /// Set an info status message.
    pub fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = Some((msg.into(), StatusLevel::Info));
    }

    /// Set a warning status message.
    pub fn set_warning(&mut self, msg: impl Into<String>) {
        self.status_message = Some((msg.into(), StatusLevel::Warning));
    }
}
