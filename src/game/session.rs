//! Top-level per-frame orchestration and the running/paused/game-over
//! state machine.

use glam::{IVec2, Vec2};

use super::combat::{self, CombatReport};
use super::entities::{Body, Bullet, PlayerInput};
use super::world::World;
use crate::platform::HeldKeys;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionState {
    Running,
    Paused,
    /// Terminal. Nothing brings the session back.
    GameOver,
}

/// Per-frame continuous input.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FrameInput {
    pub keys: HeldKeys,
    pub pointer: Vec2,
}

#[derive(Clone, Debug)]
pub struct Session {
    world: World,
    state: SessionState,
    /// Simulated seconds. Only advances while running, so pausing also
    /// freezes the invincibility window.
    elapsed: f64,
    shake_offset: IVec2,
    frames: u64,
}

impl Session {
    pub fn new(seed: u64) -> Self {
        Self::with_world(World::new(seed))
    }

    pub fn with_world(world: World) -> Self {
        Self {
            world,
            state: SessionState::Running,
            elapsed: 0.0,
            shake_offset: IVec2::ZERO,
            frames: 0,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    #[cfg(test)]
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    /// Simulated frames so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Render offset for this frame from the screen shake.
    pub fn shake_offset(&self) -> IVec2 {
        self.shake_offset
    }

    pub fn player_invincible(&self) -> bool {
        self.world.player.is_invincible(self.elapsed)
    }

    /// Running and Paused swap; GameOver stays put.
    pub fn toggle_pause(&mut self) {
        self.state = match self.state {
            SessionState::Running => SessionState::Paused,
            SessionState::Paused => SessionState::Running,
            SessionState::GameOver => SessionState::GameOver,
        };
        log::info!("session {:?}", self.state);
    }

    /// Fires a bullet from the player's center towards `target`. Ignored
    /// unless running, and when the target is the player's center.
    pub fn fire(&mut self, target: Vec2) -> bool {
        if self.state != SessionState::Running {
            return false;
        }
        let origin = self.world.player.position();
        match Bullet::fire(origin, target - origin) {
            Some(bullet) => {
                self.world.bullets.push(bullet);
                true
            }
            None => false,
        }
    }

    /// Advances the simulation by `dt` seconds. Does nothing unless running.
    pub fn update(&mut self, input: &FrameInput, dt: f32) -> Option<CombatReport> {
        if self.state != SessionState::Running {
            return None;
        }
        let dt = dt.max(0.0);
        self.elapsed += f64::from(dt);
        self.frames += 1;

        let world = &mut self.world;
        world.shake.tick(dt);

        let player_input = PlayerInput {
            keys: input.keys,
            pointer: input.pointer,
        };
        world.player.update(&player_input, dt);

        for bullet in &mut world.bullets {
            bullet.update(dt);
        }
        world.bullets.retain(|b| !b.spent);

        let target = world.player.pos;
        for enemy in &mut world.enemies {
            enemy.update(target, dt);
        }

        let report = combat::resolve(world, self.elapsed);
        if report.fatal {
            self.state = SessionState::GameOver;
            log::info!(
                "game over on wave {} after {:.1}s",
                world.waves.wave(),
                self.elapsed
            );
        } else {
            world.waves.advance_if_cleared(&mut world.enemies, &mut world.rng);
        }

        for particle in &mut world.particles {
            particle.update(dt);
        }
        world.particles.retain(|p| p.is_alive());

        self.shake_offset = world.shake.offset(&mut world.rng);
        Some(report)
    }
}
