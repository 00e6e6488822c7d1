//! App state persistence — JSON save/load across restarts.

use std::path::Path;

use serde::{Deserialize, Serialize};

use tsxview_core::ViewerConfig;

use crate::app::{AppState, Overlay, Panel};

/// Serializable subset of app state that persists across restarts.
#[derive(Debug, Serialize, Deserialize)]
pub struct PersistedState {
    pub years: u32,
    pub max_price: f64,
    pub keep: String,
    pub page_size: usize,
    pub tickers_per_row: usize,
    pub page: usize,
    pub active_panel: Panel,
    pub welcome_dismissed: bool,
}

impl Default for PersistedState {
    fn default() -> Self {
        let config = ViewerConfig::default();
        Self {
            years: config.years,
            max_price: config.max_price,
            keep: config.keep,
            page_size: config.page_size,
            tickers_per_row: config.tickers_per_row,
            page: 1,
            active_panel: Panel::Universe,
            welcome_dismissed: false,
        }
    }
}

/// Load persisted state from disk. Returns `None` if the file is missing
/// or corrupt; the config-file settings then stand unmodified.
pub fn load(path: &Path) -> Option<PersistedState> {
    let content = std::fs::read_to_string(path).ok()?;
    serde_json::from_str(&content).ok()
}

/// Save persisted state to disk. Creates parent directories if needed.
pub fn save(path: &Path, state: &PersistedState) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(state)?;
    std::fs::write(path, json)?;
    Ok(())
}

/// Extract persisted state from AppState.
pub fn extract(app: &AppState) -> PersistedState {
    PersistedState {
        years: app.config.years,
        max_price: app.config.max_price,
        keep: app.config.keep.clone(),
        page_size: app.config.page_size,
        tickers_per_row: app.config.tickers_per_row,
        page: app.chart.page,
        active_panel: app.active_panel,
        welcome_dismissed: app.overlay != Overlay::Welcome,
    }
}

/// Apply persisted state to AppState.
pub fn apply(app: &mut AppState, state: PersistedState) {
    app.config.years = state.years;
    app.config.max_price = state.max_price;
    app.config.keep = state.keep;
    app.config.page_size = state.page_size;
    app.config.tickers_per_row = state.tickers_per_row;
    app.config = app.config.clone().normalized();
    app.chart.page = state.page.max(1);
    app.active_panel = state.active_panel;
    if !state.welcome_dismissed {
        app.overlay = Overlay::Welcome;
    }
}
