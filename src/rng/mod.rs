//! Seeded pseudo-random streams for reproducible worlds and clutches

mod minstd;

pub use minstd::{Prng, MODULUS, MULTIPLIER};
