//! Breeding - offspring odds and clutch generation
//!
//! Both halves are stateless. Prediction is a pure query safe to call before
//! committing; `breed` is the one operation that consumes stream draws.

pub mod clutch;
pub mod punnett;

pub use clutch::{breed, offspring_genotype};
pub use punnett::{expression_odds, predict_offspring, GenePrediction, OffspringOutcome};
