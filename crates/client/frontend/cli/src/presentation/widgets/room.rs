//! Room widget drawing the play area on a braille canvas.
//!
//! Game coordinates put the origin at the top-left with y growing down;
//! the canvas grows up, so every box is flipped on the way in.

use client_frontend_core::UiFrame;
use game_core::{Facing, GameConfig};
use ratatui::{
    Frame,
    layout::Rect,
    style::Stylize,
    symbols::Marker,
    text::Span,
    widgets::{
        Block, Borders,
        canvas::{Canvas, Context, Rectangle},
    },
};

use crate::presentation::theme::Theme;

pub fn render(frame: &mut Frame, area: Rect, ui: &UiFrame) {
    let width = f64::from(ui.play_area.width);
    let height = f64::from(ui.play_area.height);

    let title = if ui.door_open {
        " Room (door open) "
    } else {
        " Room "
    };

    let canvas = Canvas::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Theme::room_border(ui.damage_flash))
                .title(title),
        )
        .marker(Marker::Braille)
        .x_bounds([0.0, width])
        .y_bounds([0.0, height])
        .paint(move |ctx| paint(ctx, ui, height));

    frame.render_widget(canvas, area);
}

fn paint(ctx: &mut Context, ui: &UiFrame, height: f64) {
    let door_y = f64::from(ui.play_area.height * GameConfig::DOOR_HEIGHT_RATIO);
    let half_span = f64::from(GameConfig::DOOR_HALF_SPAN);
    ctx.draw(&Rectangle {
        x: 0.0,
        y: height - (door_y + half_span),
        width: f64::from(GameConfig::DOOR_WIDTH),
        height: half_span * 2.0,
        color: Theme::door_color(ui.door_open),
    });

    for enemy in &ui.enemies {
        let size = f64::from(GameConfig::ENEMY_SIZE);
        let x = f64::from(enemy.position.x);
        let y = height - f64::from(enemy.position.y) - size;
        let color = Theme::enemy_color(enemy.alive, enemy.hit);
        ctx.draw(&Rectangle {
            x,
            y,
            width: size,
            height: size,
            color,
        });
        let glyph = if enemy.alive { "E" } else { "x" };
        ctx.print(x + size / 2.0, y + size / 2.0, Span::from(glyph).fg(color));
    }

    ctx.layer();

    let size = f64::from(GameConfig::PLAYER_SIZE);
    let x = f64::from(ui.player.x);
    let y = height - f64::from(ui.player.y) - size;
    let style = Theme::player(ui.attacking);
    if let Some(color) = style.fg {
        ctx.draw(&Rectangle {
            x,
            y,
            width: size,
            height: size,
            color,
        });
    }
    let glyph = match ui.facing {
        Facing::Left => "<@",
        Facing::Right => "@>",
    };
    ctx.print(x + size / 2.0, y + size / 2.0, Span::styled(glyph, style));
}
