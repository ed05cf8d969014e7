//! Header widget displaying wallet, room, and health.

use client_frontend_core::{UiFrame, health_bar};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph},
};

use crate::presentation::theme::Theme;

/// Render the header panel: wallet and room on the left, health on the right.
pub fn render(frame: &mut Frame, area: Rect, ui: &UiFrame) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(area);

    let wallet = ui.address.as_deref().unwrap_or("guest");
    let text = Line::from(vec![
        Span::styled(ui.room_label.clone(), Theme::accent()),
        Span::raw(" | Wallet: "),
        Span::styled(wallet.to_string(), Style::default().fg(Color::LightMagenta)),
    ]);
    let paragraph =
        Paragraph::new(text).block(Block::default().borders(Borders::ALL).title(" Vivi "));
    frame.render_widget(paragraph, chunks[0]);

    let label = format!(
        "{} {}/{}",
        health_bar(ui.health_ratio, 10),
        ui.health,
        ui.max_health
    );
    let gauge = Gauge::default()
        .block(Block::default().borders(Borders::ALL).title(" Health "))
        .gauge_style(Theme::health(ui.health_ratio))
        .ratio(f64::from(ui.health_ratio.clamp(0.0, 1.0)))
        .label(label);
    frame.render_widget(gauge, chunks[1]);
}
