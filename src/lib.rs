//! Morph Genetics - heritable traits, breeding and valuation for hognose snakes
//!
//! The engine behind discovery, breeding and the snake market: a seeded
//! MINSTD stream, the gene catalog, phenotype resolution, Punnett odds and
//! clutch generation, pricing, and deterministic wild encounters.

pub mod breeding;
pub mod core;
pub mod creature;
pub mod encounter;
pub mod genetics;
pub mod persistence;
pub mod rng;
pub mod rules;
pub mod valuation;
