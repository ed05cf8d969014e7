//! Environment oracles the simulation draws on.
//!
//! The only ambient input the rules need is randomness for enemy spawns. It is
//! injected through [`RngOracle`] so spawns are reproducible from a seed.
mod rng;

pub use rng::{PcgRng, RngOracle, ScriptedRng, unit_to_u32};
