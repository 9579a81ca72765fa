use glam::IVec2;
use rand::Rng;

/// Shake on a bullet hitting an enemy.
pub const HIT_SHAKE: (i32, f32) = (3, 0.1);
/// Shake on the player taking damage.
pub const DAMAGE_SHAKE: (i32, f32) = (5, 0.2);

/// Timed jitter applied to the rendered frame.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ScreenShake {
    remaining: f32,
    magnitude: i32,
}

impl ScreenShake {
    /// Replaces whatever shake is running. The latest trigger always wins.
    pub fn trigger(&mut self, magnitude: i32, duration: f32) {
        self.magnitude = magnitude.abs();
        self.remaining = duration;
    }

    pub fn tick(&mut self, dt: f32) {
        if self.remaining > 0.0 {
            self.remaining -= dt;
        }
    }

    pub fn is_active(&self) -> bool {
        self.remaining > 0.0
    }

    #[cfg(test)]
    pub fn remaining(&self) -> f32 {
        self.remaining
    }

    #[cfg(test)]
    pub fn magnitude(&self) -> i32 {
        self.magnitude
    }

    /// Fresh random offset per call while active, zero otherwise.
    pub fn offset<R: Rng + ?Sized>(&self, rng: &mut R) -> IVec2 {
        if !self.is_active() {
            return IVec2::ZERO;
        }
        let m = self.magnitude;
        IVec2::new(rng.gen_range(-m..=m), rng.gen_range(-m..=m))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn idle_shake_has_no_offset() {
        let mut rng = StdRng::seed_from_u64(3);
        assert_eq!(ScreenShake::default().offset(&mut rng), IVec2::ZERO);
    }

    #[test]
    fn later_trigger_overwrites() {
        let mut shake = ScreenShake::default();
        shake.trigger(5, 0.2);
        shake.trigger(3, 0.1);
        assert_eq!(shake.magnitude(), 3);
        assert!((shake.remaining() - 0.1).abs() < 1e-6);
    }

    #[test]
    fn offset_stays_within_magnitude_until_expiry() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut shake = ScreenShake::default();
        shake.trigger(5, 0.2);
        for _ in 0..100 {
            let o = shake.offset(&mut rng);
            assert!(o.x.abs() <= 5 && o.y.abs() <= 5);
        }
        shake.tick(0.15);
        assert!(shake.is_active());
        shake.tick(0.05);
        assert!(!shake.is_active());
        assert_eq!(shake.offset(&mut rng), IVec2::ZERO);
    }
}
