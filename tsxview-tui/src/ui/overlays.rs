//! Overlay widgets — welcome and error history.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Modifier;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use crate::app::AppState;
use crate::theme;
use crate::ui::centered_rect;

/// First-run welcome overlay.
pub fn render_welcome(f: &mut Frame, area: Rect) {
    let popup = centered_rect(60, 40, area);
    f.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::accent())
        .title(" Welcome to TsxView ")
        .title_style(theme::accent_bold());

    let text = vec![
        Line::from(""),
        Line::from(Span::styled(
            "Getting started:",
            theme::accent_bold(),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "  1. Press f to fetch prices for the ticker universe",
            theme::muted(),
        )),
        Line::from(Span::styled(
            "  2. Press 3 to browse pages of the price chart",
            theme::muted(),
        )),
        Line::from(Span::styled(
            "  3. Press 2 to tune the ceiling, pinned ticker, and page size",
            theme::muted(),
        )),
        Line::from(Span::styled(
            "  4. Press e to export the wide and tidy CSV artifacts",
            theme::muted(),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Press any key to dismiss...",
            theme::neutral(),
        )),
    ];

    let para = Paragraph::new(text).block(block).wrap(Wrap { trim: true });
    f.render_widget(para, popup);
}

/// Error history overlay.
pub fn render_error_history(f: &mut Frame, area: Rect, app: &AppState) {
    let popup = centered_rect(80, 70, area);
    f.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::negative())
        .title(format!(
            " Error History ({}) [Esc]close [j/k]scroll ",
            app.error_history.len()
        ))
        .title_style(theme::negative());

    let inner = block.inner(popup);
    f.render_widget(block, popup);

    if app.error_history.is_empty() {
        let text = Paragraph::new(Span::styled("No errors recorded.", theme::muted()));
        f.render_widget(text, inner);
        return;
    }

    let visible_height = inner.height as usize;
    let start = app.error_scroll;
    let end = (start + visible_height).min(app.error_history.len());

    let mut lines: Vec<Line> = Vec::new();
    for i in start..end {
        let err = &app.error_history[i];
        let is_active = i == app.error_scroll;
        let style = if is_active {
            theme::negative().add_modifier(Modifier::BOLD)
        } else {
            theme::muted()
        };

        lines.push(Line::from(vec![
            Span::styled(
                format!("[{}] ", err.timestamp.format("%H:%M:%S")),
                theme::muted(),
            ),
            Span::styled(
                format!("[{}] ", err.category.label()),
                theme::warning(),
            ),
            Span::styled(&err.message, style),
        ]));

        if !err.context.is_empty() {
            lines.push(Line::from(vec![
                Span::raw("  "),
                Span::styled(&err.context, theme::muted()),
            ]));
        }
    }

    let para = Paragraph::new(lines);
    f.render_widget(para, inner);
}
