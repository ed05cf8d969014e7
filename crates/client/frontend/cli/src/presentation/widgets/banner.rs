//! Centered overlay for loading and game-over prompts.

use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

use crate::presentation::theme::Theme;

pub fn render(frame: &mut Frame, area: Rect, text: &str) {
    let paragraph = Paragraph::new(text.to_string())
        .alignment(Alignment::Center)
        .style(Theme::banner())
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL));

    frame.render_widget(Clear, area);
    frame.render_widget(paragraph, area);
}
