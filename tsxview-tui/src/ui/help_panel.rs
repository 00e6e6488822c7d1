//! Panel 4 — Help: keyboard shortcuts and viewer notes.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use tsxview_core::artifacts::{TIDY_CSV, WIDE_CSV};

use crate::app::AppState;
use crate::theme;

pub fn render(f: &mut Frame, area: Rect, _app: &AppState) {
    let mut lines: Vec<Line> = Vec::new();

    section(&mut lines, "Global Navigation");
    key(&mut lines, "1-4", "Switch to panel by number");
    key(&mut lines, "Tab / Shift+Tab", "Cycle panels forward / back");
    key(&mut lines, "f", "Fetch prices for the ticker universe");
    key(&mut lines, "e", "Export wide + tidy CSV artifacts");
    key(&mut lines, "E", "Open error history overlay");
    key(&mut lines, "q", "Quit");
    lines.push(Line::from(""));

    section(&mut lines, "Panel 1 — Universe");
    key(&mut lines, "j / k", "Scroll the ticker list");
    lines.push(Line::from(""));

    section(&mut lines, "Panel 2 — Settings");
    key(&mut lines, "j / k", "Navigate settings");
    key(&mut lines, "h / l", "Adjust setting value");
    lines.push(Line::from(""));

    section(&mut lines, "Panel 3 — Chart");
    key(&mut lines, "h / l", "Previous / next page of tickers");
    key(&mut lines, "Left / Right", "Same as h / l");
    lines.push(Line::from(""));

    section(&mut lines, "Notes");
    key(&mut lines, "Pinned ticker", "Drawn in red and kept on every page");
    key(&mut lines, "Price ceiling", "Tickers whose maximum close exceeds it are hidden");
    key(&mut lines, "Export", &format!("Writes {WIDE_CSV} and {TIDY_CSV}"));
    key(&mut lines, "Fetch", "Repeating an identical fetch reuses the session cache");

    let para = Paragraph::new(lines);
    f.render_widget(para, area);
}

fn section<'a>(lines: &mut Vec<Line<'a>>, title: &str) {
    lines.push(Line::from(Span::styled(title.to_string(), theme::accent_bold())));
}

fn key<'a>(lines: &mut Vec<Line<'a>>, keys: &str, desc: &str) {
    lines.push(Line::from(vec![
        Span::styled(format!("  {:>20}  ", keys), theme::accent()),
        Span::styled(desc.to_string(), theme::muted()),
    ]));
}
