//! Colors and styles for the terminal UI.
use client_frontend_core::MessageLevel;
use ratatui::style::{Color, Modifier, Style};

/// Consistent color scheme for every widget.
pub struct Theme;

impl Theme {
    pub fn player(attacking: bool) -> Style {
        let style = Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD);
        if attacking {
            style.add_modifier(Modifier::REVERSED)
        } else {
            style
        }
    }

    pub fn enemy_color(alive: bool, hit: bool) -> Color {
        match (alive, hit) {
            (false, _) => Color::DarkGray,
            (true, true) => Color::White,
            (true, false) => Color::LightRed,
        }
    }

    pub fn door_color(open: bool) -> Color {
        if open { Color::Green } else { Color::Gray }
    }

    pub fn room_border(damage_flash: bool) -> Style {
        if damage_flash {
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        }
    }

    pub fn health(ratio: f32) -> Style {
        let color = if ratio > 0.6 {
            Color::Green
        } else if ratio > 0.3 {
            Color::Yellow
        } else {
            Color::Red
        };
        Style::default().fg(color)
    }

    pub fn message(level: MessageLevel) -> Style {
        match level {
            MessageLevel::Info => Style::default().fg(Color::White),
            MessageLevel::Warning => Style::default().fg(Color::Yellow),
            MessageLevel::Error => Style::default().fg(Color::LightRed),
        }
    }

    pub fn accent() -> Style {
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
    }

    pub fn dim() -> Style {
        Style::default().fg(Color::DarkGray)
    }

    pub fn banner() -> Style {
        Style::default()
            .fg(Color::Black)
            .bg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    }
}
