//! Footer widget with ledger status and the controls help.

use client_frontend_core::{LedgerStatus, UiFrame};
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::presentation::theme::Theme;

pub fn render(frame: &mut Frame, area: Rect, ui: &UiFrame) {
    let mut lines = vec![ledger_line(&ui.ledger)];
    if ui.show_help {
        lines.push(Line::from(Span::styled(
            "Move: WASD / arrows   Attack: Space   Quit: Q / Esc",
            Theme::dim(),
        )));
    }

    let paragraph = Paragraph::new(lines).block(Block::default().borders(Borders::TOP));
    frame.render_widget(paragraph, area);
}

fn ledger_line(status: &LedgerStatus) -> Line<'static> {
    let (text, color) = match status {
        LedgerStatus::Idle => ("Ledger: idle".to_string(), Color::DarkGray),
        LedgerStatus::Submitting { room } => (
            format!("Ledger: recording room {} ...", room + 1),
            Color::Yellow,
        ),
        LedgerStatus::Confirmed {
            transaction: Some(tx),
        } => (format!("Ledger: confirmed ({tx})"), Color::Green),
        LedgerStatus::Confirmed { transaction: None } => {
            ("Ledger: confirmed".to_string(), Color::Green)
        }
        LedgerStatus::Failed { reason } => (format!("Ledger: failed ({reason})"), Color::Red),
    };
    Line::from(Span::styled(text, Style::default().fg(color)))
}
