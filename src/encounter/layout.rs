//! World layout - placing discoverable snakes from one root stream
//!
//! The layout owns the world's root `Prng`. Every site's encounter seed,
//! species, rarity target and position is drawn from it in a fixed order, so
//! resetting the stream and drawing again rebuilds the same world without
//! persisting anything but the root seed.

use serde::Serialize;

use crate::core::config::{EncounterConfig, WorldConfig};
use crate::core::error::{GeneticsError, Result};
use crate::core::types::Rarity;
use crate::genetics::{GeneCatalog, SpeciesId};
use crate::rng::{Prng, MODULUS};

use super::wild::{generate_wild, EncounterSeed, WildEncounter};

/// One discoverable snake placed in the world
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EncounterSite {
    pub index: usize,
    /// (x, z) in world units, within `[-extent, extent)` on both axes
    pub position: (f64, f64),
    pub encounter: EncounterSeed,
}

/// Deterministic set of encounter sites for a world seed
#[derive(Debug, Clone)]
pub struct WorldLayout {
    prng: Prng,
    config: WorldConfig,
    species: Vec<SpeciesId>,
    sites: Vec<EncounterSite>,
}

impl WorldLayout {
    /// Lay out `config.encounter_count` sites, drawing species from `species`
    pub fn generate(config: WorldConfig, species: &[SpeciesId]) -> Result<Self> {
        config.validate().map_err(GeneticsError::InvalidConfig)?;
        if species.is_empty() {
            return Err(GeneticsError::InvalidConfig(
                "world layout needs at least one species".into(),
            ));
        }

        let mut layout = Self {
            prng: Prng::new(config.root_seed),
            config,
            species: species.to_vec(),
            sites: Vec::new(),
        };
        layout.draw_sites();

        tracing::info!(
            "Laid out {} encounter sites from root seed {}",
            layout.sites.len(),
            layout.prng.seed()
        );
        Ok(layout)
    }

    /// Reset the root stream and draw every site again
    pub fn regenerate(&mut self) {
        self.prng.reset();
        self.draw_sites();
    }

    pub fn root_seed(&self) -> u64 {
        self.prng.seed()
    }

    pub fn config(&self) -> &WorldConfig {
        &self.config
    }

    pub fn sites(&self) -> &[EncounterSite] {
        &self.sites
    }

    /// Generate the snake waiting at a site, `None` for an index out of range
    pub fn encounter(&self, index: usize, catalog: &GeneCatalog, config: &EncounterConfig) -> Option<WildEncounter> {
        self.sites
            .get(index)
            .map(|site| generate_wild(site.encounter, catalog, config))
    }

    fn draw_sites(&mut self) {
        let extent = self.config.extent;
        let mut sites = Vec::with_capacity(self.config.encounter_count);

        for index in 0..self.config.encounter_count {
            let x = self.prng.float(-extent, extent);
            let z = self.prng.float(-extent, extent);
            let seed = self.prng.int(1, MODULUS as i64 - 1) as u64;
            let Some(species) = self.prng.pick(&self.species).copied() else {
                break;
            };
            let rarity_target = weighted_rarity(&self.config.rarity_weights, &mut self.prng);

            sites.push(EncounterSite {
                index,
                position: (x, z),
                encounter: EncounterSeed {
                    seed,
                    species,
                    rarity_target,
                },
            });
        }

        self.sites = sites;
    }
}

/// One draw against cumulative weights for rarity 1 through 5
fn weighted_rarity(weights: &[u32; 5], prng: &mut Prng) -> Rarity {
    let total: u32 = weights.iter().sum();
    let roll = prng.float(0.0, f64::from(total));

    let mut cumulative = 0.0;
    for (rarity, weight) in Rarity::ALL.iter().zip(weights) {
        cumulative += f64::from(*weight);
        if roll < cumulative {
            return *rarity;
        }
    }
    // Only reachable through float rounding at the top of the range
    Rarity::ALL
        .iter()
        .zip(weights)
        .rev()
        .find(|(_, w)| **w > 0)
        .map(|(r, _)| *r)
        .unwrap_or(Rarity::Common)
}
