//! UI rendering entry point.
//!
//! Composes the widgets into the full screen: header, room, messages, and
//! footer.
use anyhow::Result;
use client_frontend_core::UiFrame;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    widgets::{Block, Borders, Paragraph},
};

use crate::config::UiConfig;
use crate::presentation::{terminal::Tui, widgets};

/// Draws `frame`, or a placeholder before the first snapshot arrives.
pub fn render(terminal: &mut Tui, frame: Option<&UiFrame>, config: &UiConfig) -> Result<()> {
    terminal.draw(|f| match frame {
        Some(ui) => render_game(f, ui, config),
        None => render_loading(f),
    })?;
    Ok(())
}

fn render_game(f: &mut Frame, ui: &UiFrame, config: &UiConfig) {
    let footer_height = if ui.show_help { 4 } else { 3 };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),                           // Header
            Constraint::Min(8),                              // Room
            Constraint::Length(config.message_panel_height), // Messages
            Constraint::Length(footer_height),               // Footer
        ])
        .split(f.area());

    widgets::header::render(f, chunks[0], ui);
    widgets::room::render(f, chunks[1], ui);
    widgets::messages::render(f, chunks[2], ui);
    widgets::footer::render(f, chunks[3], ui);

    if let Some(banner) = &ui.banner {
        widgets::banner::render(f, centered_rect(60, 20, chunks[1]), banner);
    }
}

fn render_loading(f: &mut Frame) {
    let paragraph = Paragraph::new("Connecting to the room...")
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title(" Vivi "));
    f.render_widget(paragraph, f.area());
}

/// Rect of `percent_x` by `percent_y` centered in `area`.
pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}
