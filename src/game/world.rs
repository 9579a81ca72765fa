use glam::Vec2;
use rand::rngs::StdRng;
use rand::SeedableRng;

use super::entities::{Bullet, Enemy, Particle, Player};
use super::geometry::{ARENA_HEIGHT, ARENA_WIDTH};
use super::shake::ScreenShake;
use super::waves::WaveSpawner;

/// Every piece of mutable simulation state, owned in one place.
#[derive(Clone, Debug)]
pub struct World {
    pub player: Player,
    pub enemies: Vec<Enemy>,
    pub bullets: Vec<Bullet>,
    pub particles: Vec<Particle>,
    pub waves: WaveSpawner,
    pub shake: ScreenShake,
    pub rng: StdRng,
}

impl World {
    /// Player in the middle of the arena, nothing else spawned yet.
    pub fn empty(seed: u64) -> Self {
        Self {
            player: Player::new(Vec2::new(ARENA_WIDTH / 2.0, ARENA_HEIGHT / 2.0)),
            enemies: Vec::new(),
            bullets: Vec::new(),
            particles: Vec::new(),
            waves: WaveSpawner::default(),
            shake: ScreenShake::default(),
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// A fresh world with the first wave already on the field.
    pub fn new(seed: u64) -> Self {
        let mut world = Self::empty(seed);
        world.waves.start(&mut world.enemies, &mut world.rng);
        world
    }
}
