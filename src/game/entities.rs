//! Player, enemies, bullets and particles with their per-frame update rules.

use glam::Vec2;
use rand::Rng;

use super::geometry::{self, Aabb, ARENA, ARENA_HEIGHT, ARENA_WIDTH};
use crate::platform::HeldKeys;

pub const PLAYER_SPEED: f32 = 300.0;
pub const PLAYER_HEALTH: u32 = 5;
pub const PLAYER_SIZE: Vec2 = Vec2::new(40.0, 40.0);
pub const INVINCIBILITY_DURATION: f64 = 1.0;
pub const KNOCKBACK_STRENGTH: f32 = 150.0;
/// Per-frame multiplier applied to knockback velocity.
pub const KNOCKBACK_DECAY: f32 = 0.9;

pub const ENEMY_SPEED: f32 = 100.0;
pub const ENEMY_HEALTH: u32 = 3;
pub const ENEMY_SIZE: Vec2 = Vec2::new(30.0, 30.0);

pub const BULLET_SPEED: f32 = 600.0;
pub const BULLET_SIZE: Vec2 = Vec2::new(20.0, 6.0);

pub const PARTICLE_SPEED: f32 = 100.0;

/// Anything that occupies space in the arena.
pub trait Body {
    fn position(&self) -> Vec2;
    fn size(&self) -> Vec2;

    fn bounds(&self) -> Aabb {
        Aabb::from_center(self.position(), self.size())
    }
}

/// Everything the player reads each frame.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PlayerInput {
    pub keys: HeldKeys,
    /// Pointer in arena coordinates.
    pub pointer: Vec2,
}

/// Outcome of a contact against the player.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Hit {
    /// Still invincible from an earlier hit.
    Ignored,
    Wounded,
    Fatal,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Player {
    pub pos: Vec2,
    /// Knockback velocity, decays every frame.
    pub velocity: Vec2,
    /// Degrees, counter-clockwise from +x on screen.
    pub facing: f32,
    pub health: u32,
    pub last_hit: f64,
}

impl Player {
    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            velocity: Vec2::ZERO,
            facing: 0.0,
            health: PLAYER_HEALTH,
            last_hit: -INVINCIBILITY_DURATION,
        }
    }

    pub fn update(&mut self, input: &PlayerInput, dt: f32) {
        self.pos += self.velocity * dt;
        self.velocity *= KNOCKBACK_DECAY;

        let movement = input.keys.direction().normalize_or_zero();
        self.pos += movement * PLAYER_SPEED * dt;
        self.pos = ARENA.clamp_center(self.pos, PLAYER_SIZE);

        self.facing = geometry::heading_degrees(self.pos, input.pointer);
    }

    pub fn is_invincible(&self, now: f64) -> bool {
        now - self.last_hit < INVINCIBILITY_DURATION
    }

    pub fn is_dead(&self) -> bool {
        self.health == 0
    }

    /// Applies one point of damage from a contact at `source` unless the
    /// invincibility window from the previous hit is still open.
    pub fn take_damage(&mut self, now: f64, source: Vec2) -> Hit {
        if self.is_invincible(now) {
            return Hit::Ignored;
        }
        self.health = self.health.saturating_sub(1);
        self.last_hit = now;
        self.velocity += geometry::direction_to(source, self.pos) * KNOCKBACK_STRENGTH;

        if self.is_dead() {
            Hit::Fatal
        } else {
            Hit::Wounded
        }
    }
}

impl Body for Player {
    fn position(&self) -> Vec2 {
        self.pos
    }

    fn size(&self) -> Vec2 {
        PLAYER_SIZE
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Enemy {
    pub pos: Vec2,
    pub health: u32,
}

impl Enemy {
    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            health: ENEMY_HEALTH,
        }
    }

    /// Uniformly random center anywhere in the arena, edges included.
    pub fn spawn<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let x = rng.gen_range(0.0..=ARENA_WIDTH);
        let y = rng.gen_range(0.0..=ARENA_HEIGHT);
        Self::new(Vec2::new(x, y))
    }

    /// Straight-line pursuit. No overshoot protection.
    pub fn update(&mut self, target: Vec2, dt: f32) {
        self.pos += geometry::direction_to(self.pos, target) * ENEMY_SPEED * dt;
    }

    pub fn is_dead(&self) -> bool {
        self.health == 0
    }

    pub fn health_ratio(&self) -> f32 {
        self.health as f32 / ENEMY_HEALTH as f32
    }
}

impl Body for Enemy {
    fn position(&self) -> Vec2 {
        self.pos
    }

    fn size(&self) -> Vec2 {
        ENEMY_SIZE
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Bullet {
    pub pos: Vec2,
    pub velocity: Vec2,
    /// Set once the bullet left the arena or hit something.
    pub spent: bool,
}

impl Bullet {
    /// A bullet leaving `origin` along `direction`, or `None` when the
    /// direction has no length.
    pub fn fire(origin: Vec2, direction: Vec2) -> Option<Self> {
        let dir = direction.try_normalize()?;
        Some(Self {
            pos: origin,
            velocity: dir * BULLET_SPEED,
            spent: false,
        })
    }

    pub fn update(&mut self, dt: f32) {
        self.pos += self.velocity * dt;
        if !self.bounds().intersects(&ARENA) {
            self.spent = true;
        }
    }

    /// Rotation of the sprite in screen degrees.
    pub fn angle(&self) -> f32 {
        (-self.velocity.y).atan2(self.velocity.x).to_degrees()
    }
}

impl Body for Bullet {
    fn position(&self) -> Vec2 {
        self.pos
    }

    fn size(&self) -> Vec2 {
        geometry::rotated_extent(BULLET_SIZE, self.angle())
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
    pub pos: Vec2,
    pub velocity: Vec2,
    /// Seconds left.
    pub lifetime: f32,
    pub radius: f32,
}

impl Particle {
    pub fn burst<R: Rng + ?Sized>(pos: Vec2, rng: &mut R) -> Self {
        let velocity = Vec2::new(rng.gen_range(-1.0..=1.0), rng.gen_range(-1.0..=1.0)) * PARTICLE_SPEED;
        Self {
            pos,
            velocity,
            lifetime: rng.gen_range(0.3..=0.6),
            radius: rng.gen_range(2..=4) as f32,
        }
    }

    pub fn update(&mut self, dt: f32) {
        self.lifetime -= dt;
        self.pos += self.velocity * dt;
    }

    pub fn is_alive(&self) -> bool {
        self.lifetime > 0.0
    }
}
