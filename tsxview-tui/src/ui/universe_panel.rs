//! Panel 1 — Universe: ticker list, fetch progress, dataset summary.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Modifier;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::app::AppState;
use crate::theme;

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let u = &app.universe;
    let mut lines: Vec<Line> = Vec::new();

    let Some(universe) = &u.universe else {
        lines.push(Line::from(Span::styled(
            "Loading ticker universe...",
            theme::muted(),
        )));
        f.render_widget(Paragraph::new(lines), area);
        return;
    };

    // Header
    lines.push(Line::from(vec![
        Span::styled("Tickers: ", theme::muted()),
        Span::styled(format!("{}", universe.len()), theme::accent()),
        Span::styled(format!(" from {}", universe.source_label()), theme::muted()),
        Span::styled("  [j/k]scroll [f]etch [e]xport", theme::muted()),
    ]));
    if let Some(warning) = &universe.warning {
        lines.push(Line::from(Span::styled(
            format!("WARNING: {warning}"),
            theme::warning(),
        )));
    }
    lines.push(Line::from(""));

    // Fetch progress
    if u.fetch_in_progress {
        let sym = u.fetch_current_symbol.as_deref().unwrap_or("...");
        lines.push(Line::from(vec![
            Span::styled("Fetching ", theme::warning()),
            Span::styled(sym, theme::accent()),
            Span::styled(
                format!("... [{}/{}]", u.fetch_done, u.fetch_total),
                theme::muted(),
            ),
        ]));
        lines.push(Line::from(""));
    }

    // Dataset summary
    if let Some(table) = &app.dataset.table {
        let mut spans = vec![
            Span::styled("Dataset: ", theme::muted()),
            Span::styled(
                format!("{} tickers, {} rows", table.width(), table.height()),
                theme::accent(),
            ),
        ];
        if let Some(fetched_at) = app.dataset.fetched_at {
            spans.push(Span::styled(
                format!("  fetched {}", fetched_at.format("%H:%M:%S")),
                theme::muted(),
            ));
        }
        if app.dataset.memo_hit {
            spans.push(Span::styled(" (session cache)", theme::warning()));
        }
        lines.push(Line::from(spans));
        lines.push(Line::from(""));
    }

    // Last fetch failures, truncated
    if !u.last_failures.is_empty() {
        lines.push(Line::from(Span::styled(
            format!("Failures ({}):", u.last_failures.len()),
            theme::negative(),
        )));
        for failure in u.last_failures.iter().take(5) {
            lines.push(Line::from(Span::styled(
                format!("  {failure}"),
                theme::negative(),
            )));
        }
        if u.last_failures.len() > 5 {
            lines.push(Line::from(Span::styled(
                format!("  ... and {} more", u.last_failures.len() - 5),
                theme::muted(),
            )));
        }
        lines.push(Line::from(""));
    }

    // Ticker list, windowed so the cursor stays visible
    let visible_height = (area.height as usize).saturating_sub(lines.len()).max(1);
    let start = u.cursor.saturating_sub(visible_height - 1);
    let end = (start + visible_height).min(universe.tickers.len());

    for (i, ticker) in universe.tickers[start..end].iter().enumerate() {
        let row = start + i;
        let is_cursor = row == u.cursor;
        let is_pinned = *ticker == app.config.keep;

        let dot = match u.fetch_status.get(ticker) {
            Some(true) => Span::styled(" ●", theme::positive()),
            Some(false) => Span::styled(" ✗", theme::negative()),
            None => Span::styled(" ○", theme::muted()),
        };

        let ticker_style = if is_cursor {
            theme::accent().add_modifier(Modifier::REVERSED)
        } else if is_pinned {
            theme::pinned()
        } else {
            theme::muted()
        };

        let mut spans = vec![
            Span::raw("  "),
            Span::styled(format!("{ticker:<12}"), ticker_style),
            dot,
        ];
        if is_pinned {
            spans.push(Span::styled("  pinned", theme::pinned()));
        }
        lines.push(Line::from(spans));
    }

    let para = Paragraph::new(lines);
    f.render_widget(para, area);
}
