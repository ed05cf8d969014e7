//! Ratatui rendering for the terminal client.
pub mod terminal;
pub mod theme;
pub mod ui;
mod widgets;
