use thiserror::Error;

use crate::core::types::CreatureId;
use crate::genetics::SpeciesId;

#[derive(Error, Debug)]
pub enum GeneticsError {
    #[error("Cannot breed across species: {first:?} x {second:?}")]
    SpeciesMismatch { first: SpeciesId, second: SpeciesId },

    #[error("Species not in catalog: {0:?}")]
    UnknownSpecies(SpeciesId),

    #[error("Creature not found: {0:?}")]
    CreatureNotFound(CreatureId),

    #[error("Cannot pair a snake with itself: {0:?}")]
    SelfPairing(CreatureId),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Catalog parse error: {0}")]
    CatalogParse(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, GeneticsError>;
