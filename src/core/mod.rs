pub mod config;
pub mod error;
pub mod types;

pub use config::{EncounterConfig, PricingRules, RarityMultipliers, WorldConfig, DEFAULT_WORLD_SEED};
pub use error::{GeneticsError, Result};
pub use types::{CreatureId, Origin, Rarity, Sex};
