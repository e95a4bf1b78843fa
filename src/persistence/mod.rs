//! Save files - the durable form of a collection
//!
//! Only identity and genetic state are written. Phenotype, price and tier are
//! recomputed after loading, so catalog rebalances re-rate old saves.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::error::Result;
use crate::creature::{Collection, Snake};

/// Current save format version
pub const SAVE_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaveFile {
    pub version: u32,
    pub snakes: Vec<Snake>,
}

impl SaveFile {
    pub fn new(snakes: Vec<Snake>) -> Self {
        Self {
            version: SAVE_VERSION,
            snakes,
        }
    }

    pub fn from_collection(collection: &Collection) -> Self {
        Self::new(collection.snakes().to_vec())
    }

    pub fn into_collection(self) -> Collection {
        Collection::from_snakes(self.snakes)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let file: SaveFile = serde_json::from_str(json)?;
        if file.version > SAVE_VERSION {
            tracing::warn!(
                "Save version {} is newer than {}; unknown fields are ignored",
                file.version,
                SAVE_VERSION
            );
        }
        Ok(file)
    }

    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        std::fs::write(path, self.to_json()?)?;
        tracing::info!("Saved {} snakes to {}", self.snakes.len(), path.display());
        Ok(())
    }

    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let file = Self::from_json(&content)?;
        tracing::info!("Loaded {} snakes from {}", file.snakes.len(), path.display());
        Ok(file)
    }
}
