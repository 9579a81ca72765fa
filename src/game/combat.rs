//! Bullet/enemy and player/enemy collision resolution.
//!
//! Removal is mark-then-sweep: hits only mark bullets and enemies, the
//! collections are compacted once the pass is over.

use super::entities::{Body, Hit, Particle};
use super::shake::{DAMAGE_SHAKE, HIT_SHAKE};
use super::world::World;

pub const PARTICLES_PER_HIT: usize = 5;

/// What happened during one collision pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CombatReport {
    pub enemies_hit: u32,
    pub enemies_destroyed: u32,
    pub player_hits: u32,
    pub fatal: bool,
}

impl CombatReport {
    /// Folds one pass into a running total.
    pub fn absorb(&mut self, pass: CombatReport) {
        self.enemies_hit += pass.enemies_hit;
        self.enemies_destroyed += pass.enemies_destroyed;
        self.player_hits += pass.player_hits;
        self.fatal |= pass.fatal;
    }
}

pub fn resolve(world: &mut World, now: f64) -> CombatReport {
    let mut report = CombatReport::default();
    resolve_bullet_hits(world, &mut report);
    resolve_player_contacts(world, now, &mut report);
    report
}

/// Bullets outer, enemies inner: a bullet damages the first live enemy it
/// overlaps in enemy order and is consumed.
fn resolve_bullet_hits(world: &mut World, report: &mut CombatReport) {
    for bullet in world.bullets.iter_mut().filter(|b| !b.spent) {
        let bounds = bullet.bounds();
        let Some(enemy) = world
            .enemies
            .iter_mut()
            .find(|e| !e.is_dead() && e.bounds().intersects(&bounds))
        else {
            continue;
        };

        enemy.health = enemy.health.saturating_sub(1);
        bullet.spent = true;
        report.enemies_hit += 1;

        for _ in 0..PARTICLES_PER_HIT {
            world.particles.push(Particle::burst(enemy.pos, &mut world.rng));
        }
        world.shake.trigger(HIT_SHAKE.0, HIT_SHAKE.1);

        if enemy.is_dead() {
            report.enemies_destroyed += 1;
            log::debug!("enemy destroyed at ({:.0}, {:.0})", enemy.pos.x, enemy.pos.y);
        }
    }

    world.bullets.retain(|b| !b.spent);
    world.enemies.retain(|e| !e.is_dead());
}

fn resolve_player_contacts(world: &mut World, now: f64, report: &mut CombatReport) {
    let player_box = world.player.bounds();
    for enemy in world.enemies.iter().filter(|e| e.bounds().intersects(&player_box)) {
        match world.player.take_damage(now, enemy.pos) {
            Hit::Ignored => {}
            hit => {
                report.player_hits += 1;
                world.shake.trigger(DAMAGE_SHAKE.0, DAMAGE_SHAKE.1);
                log::debug!("player hit, {} health left", world.player.health);
                if hit == Hit::Fatal {
                    report.fatal = true;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::entities::{Bullet, Enemy, ENEMY_HEALTH, PLAYER_HEALTH};
    use glam::Vec2;

    fn world_with(enemies: &[Vec2]) -> World {
        let mut world = World::empty(5);
        world.enemies = enemies.iter().copied().map(Enemy::new).collect();
        world
    }

    fn bullet_at(pos: Vec2) -> Bullet {
        Bullet::fire(pos, Vec2::X).expect("non-zero direction")
    }

    #[test]
    fn bullet_hits_only_first_overlapping_enemy() {
        let spot = Vec2::new(100.0, 100.0);
        let mut world = world_with(&[spot, spot + Vec2::new(2.0, 0.0)]);
        world.bullets.push(bullet_at(spot));

        let report = resolve(&mut world, 0.0);

        assert_eq!(report.enemies_hit, 1);
        assert!(world.bullets.is_empty());
        assert_eq!(world.enemies[0].health, ENEMY_HEALTH - 1);
        assert_eq!(world.enemies[1].health, ENEMY_HEALTH);
        assert_eq!(world.particles.len(), PARTICLES_PER_HIT);
        assert_eq!(world.shake.magnitude(), HIT_SHAKE.0);
    }

    #[test]
    fn enemy_at_zero_health_is_removed_same_pass() {
        let spot = Vec2::new(100.0, 100.0);
        let mut world = world_with(&[spot]);
        world.enemies[0].health = 1;
        world.bullets.push(bullet_at(spot));
        world.bullets.push(bullet_at(spot));

        let report = resolve(&mut world, 0.0);

        assert_eq!(report.enemies_destroyed, 1);
        assert!(world.enemies.is_empty());
        // The second bullet had nothing left to hit.
        assert_eq!(world.bullets.len(), 1);
    }

    #[test]
    fn simultaneous_contacts_cost_one_health() {
        let p = world_with(&[]).player.pos;
        let mut world = world_with(&[p + Vec2::new(10.0, 0.0), p - Vec2::new(10.0, 0.0)]);

        let report = resolve(&mut world, 3.0);

        assert_eq!(report.player_hits, 1);
        assert_eq!(world.player.health, PLAYER_HEALTH - 1);
        assert_eq!(world.shake.magnitude(), DAMAGE_SHAKE.0);
        assert!(!report.fatal);

        let again = resolve(&mut world, 3.5);
        assert_eq!(again.player_hits, 0);
        assert_eq!(world.player.health, PLAYER_HEALTH - 1);
    }

    #[test]
    fn last_contact_reports_fatal() {
        let p = world_with(&[]).player.pos;
        let mut world = world_with(&[p]);
        world.player.health = 1;
        assert!(resolve(&mut world, 0.0).fatal);
    }

    #[test]
    fn distant_enemies_do_nothing() {
        let mut world = world_with(&[Vec2::new(10.0, 10.0)]);
        world.bullets.push(bullet_at(Vec2::new(700.0, 500.0)));
        let report = resolve(&mut world, 0.0);
        assert_eq!(report, CombatReport::default());
    }

    #[test]
    fn absorb_sums_passes() {
        let mut totals = CombatReport::default();
        totals.absorb(CombatReport {
            enemies_hit: 2,
            enemies_destroyed: 1,
            player_hits: 0,
            fatal: false,
        });
        totals.absorb(CombatReport {
            enemies_hit: 1,
            enemies_destroyed: 0,
            player_hits: 1,
            fatal: true,
        });
        assert_eq!(
            totals,
            CombatReport {
                enemies_hit: 3,
                enemies_destroyed: 1,
                player_hits: 1,
                fatal: true,
            }
        );
        assert_eq!(world.bullets.len(), 1);
        assert_eq!(world.enemies.len(), 1);
    }
}
