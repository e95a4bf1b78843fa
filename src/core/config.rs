//! Tunable configuration with documented constants
//!
//! All magic numbers for pricing, wild encounters and world layout are
//! collected here. Every config is passed explicitly to the functions that
//! need it; there is no global instance.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::core::types::{Rarity, Sex};
use crate::genetics::SpeciesId;

/// Root seed used when a world is created without an explicit seed
pub const DEFAULT_WORLD_SEED: u64 = 12345;

/// Per-rarity price multipliers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RarityMultipliers {
    pub common: f64,
    pub uncommon: f64,
    pub rare: f64,
    pub very_rare: f64,
    pub legendary: f64,
}

impl RarityMultipliers {
    pub fn get(&self, rarity: Rarity) -> f64 {
        match rarity {
            Rarity::Common => self.common,
            Rarity::Uncommon => self.uncommon,
            Rarity::Rare => self.rare,
            Rarity::VeryRare => self.very_rare,
            Rarity::Legendary => self.legendary,
        }
    }
}

impl Default for RarityMultipliers {
    fn default() -> Self {
        Self {
            common: 1.2,
            uncommon: 1.5,
            rare: 2.0,
            very_rare: 3.0,
            legendary: 5.0,
        }
    }
}

/// Rules for turning a phenotype into a price
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PricingRules {
    /// Multiplier by sex key ("male", "female"); missing keys count as 1.0
    pub sex_multipliers: BTreeMap<String, f64>,

    /// Applied once per expressed trait, by that trait's rarity
    pub rarity_multipliers: RarityMultipliers,

    /// Each het (carrier) gene adds this fraction to the price
    ///
    /// At 0.1, a snake carrying three hidden recessives is worth 30% more.
    pub het_gene_bonus_rate: f64,

    /// Multiplier for snakes that have produced at least one clutch
    pub proven_breeder_bonus: f64,

    /// Multiplier by species key; missing keys count as 1.0
    pub species_multipliers: BTreeMap<String, f64>,

    /// Minimum price for uncommon, rare, very-rare and legendary tiers
    ///
    /// Must be strictly ascending.
    pub rarity_thresholds: [u64; 4],
}

impl Default for PricingRules {
    fn default() -> Self {
        let mut sex_multipliers = BTreeMap::new();
        sex_multipliers.insert(Sex::Male.as_str().to_string(), 1.0);
        sex_multipliers.insert(Sex::Female.as_str().to_string(), 1.2);

        let mut species_multipliers = BTreeMap::new();
        species_multipliers.insert(SpeciesId::SouthernHognose.as_str().to_string(), 1.1);

        Self {
            sex_multipliers,
            rarity_multipliers: RarityMultipliers::default(),
            het_gene_bonus_rate: 0.1,
            proven_breeder_bonus: 1.25,
            species_multipliers,
            rarity_thresholds: [300, 800, 2000, 5000],
        }
    }
}

impl PricingRules {
    pub fn sex_multiplier(&self, sex: Sex) -> f64 {
        self.sex_multipliers.get(sex.as_str()).copied().unwrap_or(1.0)
    }

    pub fn species_multiplier(&self, species: SpeciesId) -> f64 {
        self.species_multipliers
            .get(species.as_str())
            .copied()
            .unwrap_or(1.0)
    }

    /// Validate rules for internal consistency
    ///
    /// Beyond basic sanity, rarity multipliers must never fall below
    /// `1 + het_gene_bonus_rate`: a het gene turning visual loses its carrier
    /// bonus, and the trait multiplier has to cover that loss.
    pub fn validate(&self) -> Result<(), String> {
        if !self.rarity_thresholds.windows(2).all(|w| w[0] < w[1]) {
            return Err(format!(
                "rarity_thresholds ({:?}) must be strictly ascending",
                self.rarity_thresholds
            ));
        }

        if self.het_gene_bonus_rate < 0.0 {
            return Err("het_gene_bonus_rate must not be negative".into());
        }

        if self.proven_breeder_bonus < 1.0 {
            return Err(format!(
                "proven_breeder_bonus ({}) must be >= 1.0",
                self.proven_breeder_bonus
            ));
        }

        for (key, value) in self.sex_multipliers.iter().chain(self.species_multipliers.iter()) {
            if *value <= 0.0 {
                return Err(format!("multiplier for '{}' must be positive", key));
            }
        }

        let floor = 1.0 + self.het_gene_bonus_rate;
        let mut previous = floor;
        for rarity in Rarity::ALL {
            let multiplier = self.rarity_multipliers.get(rarity);
            if multiplier < previous {
                return Err(format!(
                    "{} multiplier ({}) must be >= {:.2} and non-decreasing by tier",
                    rarity, multiplier, previous
                ));
            }
            previous = multiplier;
        }

        Ok(())
    }
}

/// Tuning for the wild-encounter generator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EncounterConfig {
    /// Chance per allele slot of a mutant copy at rarity target 1,
    /// before the gene's own rarity weight is applied
    pub base_mutant_chance: f64,

    /// Added to the per-allele chance for each rarity target step above 1
    pub mutant_chance_per_tier: f64,

    /// Upper bound on the per-allele chance
    pub max_mutant_chance: f64,
}

impl Default for EncounterConfig {
    fn default() -> Self {
        Self {
            base_mutant_chance: 0.04,
            mutant_chance_per_tier: 0.06,
            max_mutant_chance: 0.6,
        }
    }
}

impl EncounterConfig {
    /// Per-allele mutant chance for a rarity target, before gene weighting
    pub fn mutant_chance(&self, target: Rarity) -> f64 {
        let steps = f64::from(target.ordinal() - 1);
        (self.base_mutant_chance + self.mutant_chance_per_tier * steps).min(self.max_mutant_chance)
    }

    pub fn validate(&self) -> Result<(), String> {
        let in_unit = |v: f64| (0.0..=1.0).contains(&v);
        if !in_unit(self.base_mutant_chance) || !in_unit(self.max_mutant_chance) {
            return Err("mutant chances must lie in [0, 1]".into());
        }
        if self.mutant_chance_per_tier < 0.0 {
            return Err("mutant_chance_per_tier must not be negative".into());
        }
        Ok(())
    }
}

/// Configuration for deterministic world layout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// Root seed of the world stream; same seed, same encounters
    pub root_seed: u64,

    /// Number of discoverable snakes placed in the world
    pub encounter_count: usize,

    /// Half-width of the square world, in world units
    pub extent: f64,

    /// Relative weights of rarity targets 1 (common) through 5 (legendary)
    pub rarity_weights: [u32; 5],
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            root_seed: DEFAULT_WORLD_SEED,
            encounter_count: 40,
            extent: 500.0,
            rarity_weights: [50, 25, 15, 7, 3],
        }
    }
}

impl WorldConfig {
    pub fn validate(&self) -> Result<(), String> {
        if self.extent <= 0.0 {
            return Err(format!("extent ({}) must be positive", self.extent));
        }
        if self.rarity_weights.iter().all(|w| *w == 0) {
            return Err("rarity_weights must not all be zero".into());
        }
        Ok(())
    }
}
