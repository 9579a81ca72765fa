pub mod hud;

use glam::Vec2;
use ratatui::style::Color;

use crate::game::entities::{Body, BULLET_SIZE, ENEMY_SIZE, PLAYER_SIZE};
use crate::game::geometry::{rotate_screen, Aabb, ARENA_HEIGHT, ARENA_WIDTH};
use crate::game::{Session, SessionState};
use crate::platform::{Surface, TextAnchor};

pub const WHITE: Color = Color::Rgb(255, 255, 255);
pub const RED: Color = Color::Rgb(200, 50, 50);
pub const GREEN: Color = Color::Rgb(50, 200, 50);
pub const BLACK: Color = Color::Rgb(0, 0, 0);
pub const GRAY: Color = Color::Rgb(100, 100, 100);
pub const BLUE: Color = Color::Rgb(50, 150, 255);
pub const DARK_BLUE: Color = Color::Rgb(10, 30, 60);

const ENEMY_BAR_HEIGHT: f32 = 5.0;
const ENEMY_BAR_GAP: f32 = 4.0;

/// Draws one frame: the shaken world layer, then the steady HUD and overlays.
pub fn render(surface: &mut impl Surface, session: &Session, fps: f32) {
    surface.clear(BLACK);

    let offset = session.shake_offset().as_vec2();
    render_world(surface, session, offset);

    hud::render_hud(surface, session, fps);
    render_overlay(surface, session);
}

fn render_world(surface: &mut impl Surface, session: &Session, offset: Vec2) {
    let world = session.world();

    // Blink every tenth of a second while invincible.
    let blink_off = session.player_invincible() && (session.elapsed() * 10.0) as i64 % 2 == 0;
    if !blink_off && !world.player.is_dead() {
        surface.draw_polygon(&ship_outline(world.player.pos + offset, world.player.facing), GREEN);
    }

    for enemy in &world.enemies {
        let body = Aabb::from_center(enemy.pos + offset, ENEMY_SIZE);
        surface.draw_rect(body, RED, true);

        let bar = Aabb::new(
            body.min.x,
            body.min.y - ENEMY_BAR_HEIGHT - ENEMY_BAR_GAP,
            ENEMY_SIZE.x,
            ENEMY_BAR_HEIGHT,
        );
        surface.draw_rect(bar, GRAY, true);
        let fill = Aabb::new(bar.min.x, bar.min.y, ENEMY_SIZE.x * enemy.health_ratio(), ENEMY_BAR_HEIGHT);
        surface.draw_rect(fill, GREEN, true);
    }

    for bullet in &world.bullets {
        let outline = rect_outline(bullet.position() + offset, BULLET_SIZE, bullet.angle());
        surface.draw_polygon(&outline, WHITE);
    }

    for particle in world.particles.iter().filter(|p| p.is_alive()) {
        surface.draw_circle(particle.pos + offset, particle.radius, RED);
    }
}

fn render_overlay(surface: &mut impl Surface, session: &Session) {
    let center = Vec2::new(ARENA_WIDTH / 2.0, ARENA_HEIGHT / 2.0);
    match session.state() {
        SessionState::GameOver => {
            surface.draw_text("GAME OVER", center, RED, TextAnchor::Center);
            let reached = format!("You reached wave {}", session.world().waves.wave());
            surface.draw_text(&reached, center + Vec2::new(0.0, 40.0), WHITE, TextAnchor::Center);
            surface.draw_text("Q to quit", center + Vec2::new(0.0, 80.0), GRAY, TextAnchor::Center);
        }
        SessionState::Paused => {
            surface.draw_text("PAUSED", center, WHITE, TextAnchor::Center);
        }
        SessionState::Running => {}
    }
}

/// Triangle pointing along +x before rotation: nose at the right edge of the
/// 40x40 sprite, tail corners at the left.
fn ship_outline(center: Vec2, facing: f32) -> [Vec2; 3] {
    let half = PLAYER_SIZE * 0.5;
    [
        Vec2::new(-half.x, -half.y),
        Vec2::new(half.x, 0.0),
        Vec2::new(-half.x, half.y),
    ]
    .map(|p| center + rotate_screen(p, facing))
}

fn rect_outline(center: Vec2, size: Vec2, degrees: f32) -> [Vec2; 4] {
    let h = size * 0.5;
    [
        Vec2::new(-h.x, -h.y),
        Vec2::new(h.x, -h.y),
        Vec2::new(h.x, h.y),
        Vec2::new(-h.x, h.y),
    ]
    .map(|p| center + rotate_screen(p, degrees))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::entities::{Enemy, PLAYER_HEALTH};
    use crate::game::world::World;
    use crate::platform::{DisplayList, DrawCommand};

    fn session_with_enemy() -> Session {
        let mut world = World::empty(1);
        world.enemies.push(Enemy::new(Vec2::new(100.0, 100.0)));
        Session::with_world(world)
    }

    fn draw(session: &Session) -> DisplayList {
        let mut list = DisplayList::default();
        render(&mut list, session, 60.0);
        list
    }

    #[test]
    fn running_frame_has_no_overlay() {
        let list = draw(&session_with_enemy());
        assert!(!list.has_text("PAUSED"));
        assert!(!list.has_text("GAME OVER"));
        assert!(list.has_text("FPS: 60"));
        assert!(list.has_text("Wave 1"));
    }

    #[test]
    fn paused_overlay() {
        let mut session = session_with_enemy();
        session.toggle_pause();
        let list = draw(&session);
        assert!(list.has_text("PAUSED"));
    }

    #[test]
    fn game_over_overlay_replaces_pause() {
        let mut world = World::empty(1);
        world.player.health = 1;
        let p = world.player.pos;
        world.enemies.push(Enemy::new(p));
        let mut session = Session::with_world(world);
        session.update(&Default::default(), 0.016);

        let list = draw(&session);
        assert!(list.has_text("GAME OVER"));
        assert!(list.has_text("wave 1"));
        assert!(!list.has_text("PAUSED"));
    }

    #[test]
    fn enemy_health_bar_tracks_health() {
        let mut session = session_with_enemy();
        session.world_mut().enemies[0].health = 1;
        let list = draw(&session);
        let greens: Vec<f32> = list
            .commands
            .iter()
            .filter_map(|cmd| match cmd {
                DrawCommand::Rect { rect, color, .. } if *color == GREEN => Some(rect.size().x),
                _ => None,
            })
            .collect();
        assert_eq!(greens.len(), 1);
        assert!((greens[0] - ENEMY_SIZE.x / 3.0).abs() < 1e-3);
    }

    #[test]
    fn ship_points_at_its_facing() {
        let outline = ship_outline(Vec2::new(100.0, 100.0), 90.0);
        assert!((outline[1] - Vec2::new(100.0, 80.0)).length() < 1e-3);
    }

    #[test]
    fn player_health_bar_is_full_at_start() {
        let session = session_with_enemy();
        assert_eq!(session.world().player.health, PLAYER_HEALTH);
        let list = draw(&session);
        let blue = list.commands.iter().find_map(|cmd| match cmd {
            DrawCommand::Rect { rect, color, .. } if *color == BLUE => Some(rect.size().x),
            _ => None,
        });
        assert_eq!(blue, Some(hud::HEALTH_BAR_WIDTH));
    }
}
