//! Panel 2 — Settings: viewer knobs with sliders for the bounded ones.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Modifier;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use tsxview_core::config::{PAGE_SIZE_MAX, PAGE_SIZE_MIN, YEARS_MAX, YEARS_MIN};

use crate::app::AppState;
use crate::theme;

const SETTING_LABELS: [&str; 6] = [
    "Ticker CSV",
    "Years of history",
    "Price ceiling",
    "Pinned ticker",
    "Page size",
    "Tickers per row",
];

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let s = &app.settings;
    let c = &app.config;
    let mut lines: Vec<Line> = Vec::new();

    lines.push(Line::from(Span::styled(
        "[j/k]navigate [h/l]adjust",
        theme::muted(),
    )));
    lines.push(Line::from(""));

    let values: Vec<String> = vec![
        c.ticker_csv_path()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "built-in fallback list".into()),
        format!("{} years", c.years),
        format!("${:.0}", c.max_price),
        c.keep.clone(),
        c.page_size.to_string(),
        c.tickers_per_row.to_string(),
    ];

    for (i, (label, value)) in SETTING_LABELS.iter().zip(values.iter()).enumerate() {
        let is_active = i == s.cursor;

        let style = if is_active {
            theme::accent().add_modifier(Modifier::REVERSED)
        } else {
            theme::muted()
        };

        // Render sliders for the bounded integer knobs
        if i == 1 || i == 4 {
            let frac = if i == 1 {
                (c.years.saturating_sub(YEARS_MIN)) as f64 / (YEARS_MAX - YEARS_MIN) as f64
            } else {
                (c.page_size.saturating_sub(PAGE_SIZE_MIN)) as f64
                    / (PAGE_SIZE_MAX - PAGE_SIZE_MIN) as f64
            };
            let frac = frac.clamp(0.0, 1.0);
            let bar_width: usize = 30;
            let filled = (frac * bar_width as f64).round() as usize;
            let empty = bar_width.saturating_sub(filled);
            let bar = format!("[{}{}]", "=".repeat(filled), " ".repeat(empty));

            lines.push(Line::from(vec![
                Span::styled(format!("{:>18}: ", label), style),
                Span::styled(bar, if is_active { theme::accent() } else { theme::muted() }),
                Span::styled(format!(" {value}"), style),
            ]));
        } else {
            lines.push(Line::from(vec![
                Span::styled(format!("{:>18}: ", label), style),
                Span::styled(value.as_str(), style),
            ]));
        }
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Price ceiling, pinned ticker, page size and row width apply immediately.",
        theme::muted(),
    )));
    lines.push(Line::from(Span::styled(
        "Years of history applies to the next fetch [f].",
        theme::muted(),
    )));

    let para = Paragraph::new(lines);
    f.render_widget(para, area);
}
