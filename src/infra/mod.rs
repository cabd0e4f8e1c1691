//! Infrastructure around the engine:
//! - RNG implementations and per-hand seeds;
//! - id generation;
//! - engine configuration loading.

pub mod config;
pub mod ids;
pub mod rng;
pub mod rng_seed;

pub use config::EngineConfig;
pub use ids::IdGenerator;
pub use rng::{DeterministicRng, StackedRng, SystemRng};
pub use rng_seed::RngSeed;
