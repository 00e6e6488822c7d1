//! Keyboard input dispatch — global keys → overlays → panel-specific handlers.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use tsxview_core::config::{PAGE_SIZE_MAX, PAGE_SIZE_MIN, YEARS_MAX, YEARS_MIN};

use crate::app::{AppState, Overlay, Panel};
use crate::worker::WorkerCommand;

/// Handle a key event.
pub fn handle_key(app: &mut AppState, key: KeyEvent) {
    // Only handle key press events (Windows sends both Press and Release).
    if key.kind != KeyEventKind::Press {
        return;
    }

    // 1. Overlays consume input first.
    match &app.overlay {
        Overlay::Welcome => {
            app.overlay = Overlay::None;
            return;
        }
        Overlay::ErrorHistory => {
            handle_error_overlay(app, key);
            return;
        }
        Overlay::None => {}
    }

    // 2. Global keys (always available).
    match key.code {
        KeyCode::Char('q') => {
            app.running = false;
            return;
        }
        KeyCode::Char('1') => { app.active_panel = Panel::Universe; return; }
        KeyCode::Char('2') => { app.active_panel = Panel::Settings; return; }
        KeyCode::Char('3') => { app.active_panel = Panel::Chart; return; }
        KeyCode::Char('4') => { app.active_panel = Panel::Help; return; }
        KeyCode::Tab => {
            if key.modifiers.contains(KeyModifiers::SHIFT) {
                app.active_panel = app.active_panel.prev();
            } else {
                app.active_panel = app.active_panel.next();
            }
            return;
        }
        KeyCode::BackTab => {
            app.active_panel = app.active_panel.prev();
            return;
        }
        KeyCode::Char('f') => {
            start_fetch(app);
            return;
        }
        KeyCode::Char('e') => {
            start_export(app);
            return;
        }
        KeyCode::Char('E') => {
            app.overlay = Overlay::ErrorHistory;
            app.error_scroll = 0;
            return;
        }
        _ => {}
    }

    // 3. Panel-specific keys.
    match app.active_panel {
        Panel::Universe => handle_universe_key(app, key),
        Panel::Settings => handle_settings_key(app, key),
        Panel::Chart => handle_chart_key(app, key),
        Panel::Help => {} // display only
    }
}

fn handle_error_overlay(app: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('E') => {
            app.overlay = Overlay::None;
        }
        KeyCode::Char('j') | KeyCode::Down => {
            if app.error_scroll + 1 < app.error_history.len() {
                app.error_scroll += 1;
            }
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.error_scroll = app.error_scroll.saturating_sub(1);
        }
        _ => {}
    }
}

fn handle_universe_key(app: &mut AppState, key: KeyEvent) {
    let ticker_count = app.universe.ticker_count();

    match key.code {
        KeyCode::Char('j') | KeyCode::Down => {
            if ticker_count > 0 && app.universe.cursor + 1 < ticker_count {
                app.universe.cursor += 1;
            }
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.universe.cursor = app.universe.cursor.saturating_sub(1);
        }
        _ => {}
    }
}

fn handle_settings_key(app: &mut AppState, key: KeyEvent) {
    let setting_count = app.settings.setting_count();

    match key.code {
        KeyCode::Char('j') | KeyCode::Down => {
            if app.settings.cursor + 1 < setting_count {
                app.settings.cursor += 1;
            }
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.settings.cursor = app.settings.cursor.saturating_sub(1);
        }
        KeyCode::Char('h') | KeyCode::Left => {
            adjust_setting(app, -1);
        }
        KeyCode::Char('l') | KeyCode::Right => {
            adjust_setting(app, 1);
        }
        _ => {}
    }
}

fn adjust_setting(app: &mut AppState, direction: i32) {
    let c = &mut app.config;
    let d = direction as f64;
    match app.settings.cursor {
        0 => {} // ticker CSV path — set via config file or CLI, not editable here
        1 => {
            c.years =
                (c.years as i32 + direction).clamp(YEARS_MIN as i32, YEARS_MAX as i32) as u32;
        }
        2 => c.max_price = (c.max_price + 50.0 * d).max(0.0),
        3 => cycle_keep(app, direction),
        4 => {
            c.page_size = (c.page_size as i32 + direction)
                .clamp(PAGE_SIZE_MIN as i32, PAGE_SIZE_MAX as i32) as usize;
        }
        5 => c.tickers_per_row = (c.tickers_per_row as i32 + direction).clamp(1, 16) as usize,
        _ => {}
    }
}

/// Cycle the pinned ticker through the loaded universe.
fn cycle_keep(app: &mut AppState, direction: i32) {
    let Some(universe) = &app.universe.universe else {
        return;
    };
    let tickers = &universe.tickers;
    if tickers.is_empty() {
        return;
    }
    let len = tickers.len();
    let next = match tickers.iter().position(|t| *t == app.config.keep) {
        Some(i) if direction > 0 => (i + 1) % len,
        Some(i) => (i + len - 1) % len,
        None => 0,
    };
    app.config.keep = tickers[next].clone();
}

fn handle_chart_key(app: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Char('h') | KeyCode::Left => step_page(app, -1),
        KeyCode::Char('l') | KeyCode::Right => step_page(app, 1),
        _ => {}
    }
}

fn step_page(app: &mut AppState, delta: i32) {
    let Some(view) = app.page_view() else {
        return;
    };
    app.chart.page = if delta > 0 {
        (view.page + 1).min(view.total_pages)
    } else {
        view.page.saturating_sub(1).max(1)
    };
}

fn start_fetch(app: &mut AppState) {
    if app.universe.fetch_in_progress {
        return;
    }
    app.universe.fetch_in_progress = true;
    app.universe.fetch_current_symbol = None;
    app.universe.fetch_done = 0;
    app.universe.fetch_total = 0;
    app.universe.fetch_status.clear();
    app.universe.last_failures.clear();
    let _ = app.worker_tx.send(WorkerCommand::FetchPrices {
        csv: app.config.ticker_csv_path(),
        years: app.config.years,
        synthetic: false,
    });
    app.set_status("Fetching prices...");
}

fn start_export(app: &mut AppState) {
    if !app.dataset.is_loaded() {
        app.set_warning("Nothing fetched yet");
        return;
    }
    let _ = app.worker_tx.send(WorkerCommand::ExportDataset {
        dir: app.config.dataset_dir.clone(),
    });
    app.set_status("Exporting dataset...");
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;
    use tsxview_core::data::{PricePoint, PriceSeries};
    use tsxview_core::{PriceTable, TidyFrame};

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn test_app() -> AppState {
        let (cmd_tx, _cmd_rx) = mpsc::channel();
        let (_resp_tx, resp_rx) = mpsc::channel();
        AppState::new(cmd_tx, resp_rx, std::path::PathBuf::from("/tmp/unused.json"))
    }

    fn series(symbol: &str, price: f64) -> PriceSeries {
        let date = chrono::NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
        PriceSeries {
            symbol: symbol.to_string(),
            points: vec![PricePoint {
                date,
                adj_close: price,
            }],
        }
    }

    #[test]
    fn q_quits() {
        let mut app = test_app();
        assert!(app.running);
        handle_key(&mut app, press(KeyCode::Char('q')));
        assert!(!app.running);
    }

    #[test]
    fn number_keys_switch_panels() {
        let mut app = test_app();
        handle_key(&mut app, press(KeyCode::Char('3')));
        assert_eq!(app.active_panel, Panel::Chart);
        handle_key(&mut app, press(KeyCode::Char('2')));
        assert_eq!(app.active_panel, Panel::Settings);
    }

    #[test]
    fn welcome_overlay_dismisses_on_any_key() {
        let mut app = test_app();
        app.overlay = Overlay::Welcome;
        handle_key(&mut app, press(KeyCode::Char('x')));
        assert_eq!(app.overlay, Overlay::None);
        // The key is consumed by the overlay, not forwarded.
        assert!(app.running);
    }

    #[test]
    fn years_adjustment_clamps_at_bounds() {
        let mut app = test_app();
        app.active_panel = Panel::Settings;
        app.settings.cursor = 1;
        app.config.years = YEARS_MAX;
        handle_key(&mut app, press(KeyCode::Char('l')));
        assert_eq!(app.config.years, YEARS_MAX);
        app.config.years = YEARS_MIN;
        handle_key(&mut app, press(KeyCode::Char('h')));
        assert_eq!(app.config.years, YEARS_MIN);
    }

    #[test]
    fn price_ceiling_never_goes_negative() {
        let mut app = test_app();
        app.active_panel = Panel::Settings;
        app.settings.cursor = 2;
        app.config.max_price = 25.0;
        handle_key(&mut app, press(KeyCode::Char('h')));
        assert_eq!(app.config.max_price, 0.0);
    }

    #[test]
    fn page_stepping_clamps_to_valid_range() {
        let mut app = test_app();
        app.config.max_price = 1000.0;
        app.config.keep = "AAA.TO".to_string();
        app.config.page_size = 2;
        let table = PriceTable::from_series(vec![
            series("AAA.TO", 10.0),
            series("BBB.TO", 20.0),
            series("CCC.TO", 30.0),
        ]);
        app.dataset.frame = Some(TidyFrame::from_wide(&table));
        app.dataset.table = Some(table);
        app.active_panel = Panel::Chart;

        // Two pages total: {AAA, BBB} and {AAA, CCC}.
        handle_key(&mut app, press(KeyCode::Char('l')));
        assert_eq!(app.chart.page, 2);
        handle_key(&mut app, press(KeyCode::Char('l')));
        assert_eq!(app.chart.page, 2);
        handle_key(&mut app, press(KeyCode::Char('h')));
        assert_eq!(app.chart.page, 1);
        handle_key(&mut app, press(KeyCode::Char('h')));
        assert_eq!(app.chart.page, 1);
    }

    #[test]
    fn export_without_dataset_warns() {
        use crate::app::StatusLevel;

        let mut app = test_app();
        handle_key(&mut app, press(KeyCode::Char('e')));
        let (msg, level) = app.status_message.clone().unwrap();
        assert!(msg.contains("Nothing fetched yet"));
        assert_eq!(level, StatusLevel::Warning);
    }
}
