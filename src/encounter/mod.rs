//! Encounters - wild snakes and where they are found

pub mod layout;
pub mod wild;

pub use layout::{EncounterSite, WorldLayout};
pub use wild::{generate_wild, EncounterSeed, WildEncounter};
