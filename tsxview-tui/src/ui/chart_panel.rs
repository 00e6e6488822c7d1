//! Panel 3 — Chart: adjusted-close line chart for the current page of tickers.

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::symbols;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Axis, Chart, Dataset, GraphType, Paragraph};

use tsxview_core::view::{format_ticker_rows, PageView};
use tsxview_core::PriceTable;

use crate::app::AppState;
use crate::theme;

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    match (&app.dataset.table, app.page_view()) {
        (Some(table), Some(view)) if !view.selected.is_empty() => {
            render_chart(f, area, app, table, &view)
        }
        (Some(_), Some(view)) => render_all_filtered(f, area, app, &view),
        _ => render_empty(f, area),
    }
}

fn render_empty(f: &mut Frame, area: Rect) {
    let lines = vec![
        Line::from(""),
        Line::from(""),
        Line::from(Span::styled(
            "No dataset yet. Press f to fetch prices.",
            theme::muted(),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Adjust years of history in Settings (press 2) before fetching.",
            theme::muted(),
        )),
    ];
    f.render_widget(Paragraph::new(lines), area);
}

fn render_all_filtered(f: &mut Frame, area: Rect, app: &AppState, view: &PageView) {
    let lines = vec![
        Line::from(""),
        Line::from(""),
        Line::from(Span::styled(
            format!(
                "All {} tickers are above the ${:.0} ceiling.",
                view.removed.len(),
                app.config.max_price
            ),
            theme::warning(),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Raise the price ceiling in Settings (press 2).",
            theme::muted(),
        )),
    ];
    f.render_widget(Paragraph::new(lines), area);
}

fn render_chart(f: &mut Frame, area: Rect, app: &AppState, table: &PriceTable, view: &PageView) {
    // One series per ticker on this page. The pinned ticker is always red;
    // the rest cycle the palette.
    let mut palette_slot = 0usize;
    let series: Vec<(String, Color, Vec<(f64, f64)>)> = view
        .selected
        .iter()
        .map(|ticker| {
            let points: Vec<(f64, f64)> = table
                .column(ticker)
                .map(|col| {
                    col.values
                        .iter()
                        .enumerate()
                        .filter_map(|(i, v)| v.map(|price| (i as f64, price)))
                        .collect()
                })
                .unwrap_or_default();
            let color = if *ticker == app.config.keep {
                theme::PINNED
            } else {
                let c = theme::series_color(palette_slot);
                palette_slot += 1;
                c
            };
            (ticker.clone(), color, points)
        })
        .collect();

    let mut min_y = f64::INFINITY;
    let mut max_y = f64::NEG_INFINITY;
    for (_, _, points) in &series {
        for &(_, y) in points {
            min_y = min_y.min(y);
            max_y = max_y.max(y);
        }
    }
    if min_y > max_y {
        render_all_filtered(f, area, app, view);
        return;
    }

    let padding = (max_y - min_y).abs() * 0.05;
    let y_min = min_y - padding;
    let y_max = max_y + padding;
    let x_max = table.height().saturating_sub(1) as f64;

    let row_lines = format_ticker_rows(&view.selected, app.config.tickers_per_row);
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(3),
            Constraint::Length(row_lines.len() as u16 + 1),
        ])
        .split(area);

    // Header line
    let mut header = vec![
        Span::styled(
            format!("page {}/{}", view.page, view.total_pages),
            theme::accent_bold(),
        ),
        Span::styled(
            format!("  {} tickers", view.selected.len()),
            theme::muted(),
        ),
        Span::styled("  pinned: ", theme::muted()),
        Span::styled(app.config.keep.clone(), theme::pinned()),
    ];
    if !view.removed.is_empty() {
        header.push(Span::styled(
            format!(
                "  filtered out {} above ${:.0}",
                view.removed.len(),
                app.config.max_price
            ),
            theme::warning(),
        ));
    }
    header.push(Span::styled("  [h/l]page", theme::muted()));
    f.render_widget(Paragraph::new(Line::from(header)), chunks[0]);

    // Chart
    let datasets: Vec<Dataset> = series
        .iter()
        .map(|(ticker, color, points)| {
            Dataset::default()
                .name(ticker.as_str())
                .marker(symbols::Marker::Braille)
                .style(Style::default().fg(*color))
                .graph_type(GraphType::Line)
                .data(points)
        })
        .collect();

    let first_label = table
        .first_date()
        .map(|d| d.to_string())
        .unwrap_or_default();
    let last_label = table
        .last_date()
        .map(|d| d.to_string())
        .unwrap_or_default();

    let chart = Chart::new(datasets)
        .x_axis(
            Axis::default()
                .style(theme::muted())
                .bounds([0.0, x_max.max(1.0)])
                .labels(vec![
                    Span::styled(first_label, theme::muted()),
                    Span::styled(last_label, theme::muted()),
                ]),
        )
        .y_axis(
            Axis::default()
                .title(Span::styled("Adj Close", theme::muted()))
                .style(theme::muted())
                .bounds([y_min, y_max])
                .labels(vec![
                    Span::styled(format!("{y_min:.0}"), theme::muted()),
                    Span::styled(format!("{y_max:.0}"), theme::muted()),
                ]),
        );
    f.render_widget(chart, chunks[1]);

    // Ticker rows for this page, grouped the way the CLI prints them
    let mut lines: Vec<Line> = vec![Line::from("")];
    for row in &row_lines {
        lines.push(Line::from(Span::styled(row.clone(), theme::muted())));
    }
    f.render_widget(Paragraph::new(lines), chunks[2]);
}
