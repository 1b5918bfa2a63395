pub mod rng;
pub mod time;
pub mod burst;
pub mod particle;
pub mod field;
