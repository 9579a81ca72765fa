use glam::Vec2;

use super::{BLUE, DARK_BLUE, GRAY, WHITE};
use crate::game::entities::PLAYER_HEALTH;
use crate::game::geometry::{Aabb, ARENA_WIDTH};
use crate::game::Session;
use crate::platform::{Surface, TextAnchor};

pub const HEALTH_BAR_WIDTH: f32 = 275.0;
const HEALTH_BAR_HEIGHT: f32 = 8.0;
const HEALTH_BAR_TOP: f32 = 20.0;
const HEALTH_BAR_BORDER: f32 = 2.0;

/// Health bar, FPS counter and wave status. Never shaken.
pub fn render_hud(surface: &mut impl Surface, session: &Session, fps: f32) {
    render_health_bar(surface, session.world().player.health);

    surface.draw_text(
        &format!("FPS: {}", fps as u32),
        Vec2::new(10.0, 10.0),
        WHITE,
        TextAnchor::TopLeft,
    );

    let world = session.world();
    let status = format!("Wave {}  Enemies {}", world.waves.wave(), world.enemies.len());
    surface.draw_text(&status, Vec2::new(ARENA_WIDTH - 10.0, 10.0), GRAY, TextAnchor::TopRight);
}

fn render_health_bar(surface: &mut impl Surface, health: u32) {
    let x = ARENA_WIDTH / 2.0 - HEALTH_BAR_WIDTH / 2.0;
    let frame = Aabb::new(
        x - HEALTH_BAR_BORDER,
        HEALTH_BAR_TOP - HEALTH_BAR_BORDER,
        HEALTH_BAR_WIDTH + HEALTH_BAR_BORDER * 2.0,
        HEALTH_BAR_HEIGHT + HEALTH_BAR_BORDER * 2.0,
    );
    surface.draw_rect(frame, DARK_BLUE, true);

    if health > 0 {
        let ratio = health as f32 / PLAYER_HEALTH as f32;
        let fill = Aabb::new(x, HEALTH_BAR_TOP, HEALTH_BAR_WIDTH * ratio, HEALTH_BAR_HEIGHT);
        surface.draw_rect(fill, BLUE, true);
    }
}
