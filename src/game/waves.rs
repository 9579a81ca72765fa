use rand::Rng;

use super::entities::Enemy;

pub const FIRST_WAVE_SIZE: u32 = 5;
pub const WAVE_SIZE_INCREMENT: u32 = 2;

/// Wave bookkeeping. Every cleared wave is followed by a bigger one, with no
/// upper bound.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WaveSpawner {
    wave: u32,
    total_enemies: u32,
    spawned_enemies: u32,
}

impl Default for WaveSpawner {
    fn default() -> Self {
        Self {
            wave: 1,
            total_enemies: FIRST_WAVE_SIZE,
            spawned_enemies: 0,
        }
    }
}

impl WaveSpawner {
    pub fn wave(&self) -> u32 {
        self.wave
    }

    #[cfg(test)]
    pub fn total_enemies(&self) -> u32 {
        self.total_enemies
    }

    pub fn spawned_enemies(&self) -> u32 {
        self.spawned_enemies
    }

    /// Spawns the first wave.
    pub fn start<R: Rng + ?Sized>(&mut self, enemies: &mut Vec<Enemy>, rng: &mut R) {
        self.spawn(enemies, rng);
    }

    /// Starts the next wave if nothing is left alive. Returns whether it did.
    pub fn advance_if_cleared<R: Rng + ?Sized>(
        &mut self,
        enemies: &mut Vec<Enemy>,
        rng: &mut R,
    ) -> bool {
        if !enemies.is_empty() {
            return false;
        }
        self.wave += 1;
        self.total_enemies += WAVE_SIZE_INCREMENT;
        self.spawn(enemies, rng);
        true
    }

    fn spawn<R: Rng + ?Sized>(&mut self, enemies: &mut Vec<Enemy>, rng: &mut R) {
        enemies.extend((0..self.total_enemies).map(|_| Enemy::spawn(rng)));
        self.spawned_enemies += self.total_enemies;
        log::info!(
            "wave {} spawned with {} enemies ({} total so far)",
            self.wave,
            self.total_enemies,
            self.spawned_enemies
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn waves_escalate_by_two() {
        let mut rng = StdRng::seed_from_u64(99);
        let mut enemies = Vec::new();
        let mut waves = WaveSpawner::default();

        waves.start(&mut enemies, &mut rng);
        assert_eq!((waves.wave(), waves.total_enemies()), (1, 5));
        assert_eq!(enemies.len(), 5);

        assert!(!waves.advance_if_cleared(&mut enemies, &mut rng));
        assert_eq!(waves.wave(), 1);

        enemies.clear();
        assert!(waves.advance_if_cleared(&mut enemies, &mut rng));
        assert_eq!((waves.wave(), waves.total_enemies()), (2, 7));
        assert_eq!(enemies.len(), 7);
        assert_eq!(waves.spawned_enemies(), 12);

        enemies.clear();
        waves.advance_if_cleared(&mut enemies, &mut rng);
        assert_eq!((waves.wave(), waves.total_enemies()), (3, 9));
        assert_eq!(waves.spawned_enemies(), 21);
    }
}
