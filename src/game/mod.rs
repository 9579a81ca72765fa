//! Simulation core: entities, combat, waves, feedback and the session loop.
//!
//! Nothing in here talks to the terminal. Input arrives as plain values and
//! all randomness comes from the session's seeded RNG.

pub mod combat;
pub mod entities;
pub mod geometry;
pub mod session;
pub mod shake;
pub mod waves;
pub mod world;

pub use geometry::{Aabb, ARENA_HEIGHT, ARENA_WIDTH};
pub use session::{FrameInput, Session, SessionState};
