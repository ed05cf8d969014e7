//! Message log widget, newest entry first.

use client_frontend_core::UiFrame;
use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

use crate::presentation::theme::Theme;

pub fn render(frame: &mut Frame, area: Rect, ui: &UiFrame) {
    let lines: Vec<Line> = ui
        .messages
        .iter()
        .map(|entry| {
            let stamp = entry
                .at
                .map(|at| format!("[{:>6.1}s] ", at.0 as f64 / 1000.0))
                .unwrap_or_default();
            Line::from(vec![
                Span::styled(stamp, Theme::dim()),
                Span::styled(entry.text.clone(), Theme::message(entry.level)),
            ])
        })
        .collect();

    let paragraph = Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title(" Messages "));
    frame.render_widget(paragraph, area);
}
