//! Load the gene catalog and tuning from TOML files

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::core::config::{EncounterConfig, PricingRules, WorldConfig};
use crate::core::error::{GeneticsError, Result};
use crate::core::types::Rarity;
use crate::genetics::{
    ComboMorph, GeneCatalog, GeneDefinition, Inheritance, SpeciesDefinition, SpeciesId, SuperForm, TraitId,
    UnlockRequirement,
};

/// Load a gene catalog from a TOML file
pub fn load_catalog(path: &Path) -> Result<GeneCatalog> {
    let content = fs::read_to_string(path)?;
    let catalog = parse_catalog(&content)?;
    tracing::info!(
        "Loaded catalog from {}: {} genes, {} combos, {} species",
        path.display(),
        catalog.genes().len(),
        catalog.combos().len(),
        catalog.all_species().len()
    );
    Ok(catalog)
}

/// Parse a gene catalog
///
/// Entries naming genes, traits or species this build doesn't know are
/// skipped with a warning. Structural problems are errors.
pub fn parse_catalog(content: &str) -> Result<GeneCatalog> {
    let data: TomlCatalog =
        toml::from_str(content).map_err(|e| GeneticsError::CatalogParse(format!("Invalid TOML: {}", e)))?;

    let mut catalog = GeneCatalog::new();
    for species in data.species {
        if let Some(definition) = species.to_definition() {
            catalog.add_species(definition);
        }
    }
    for gene in data.genes {
        if let Some(definition) = gene.to_definition() {
            catalog.add_gene(definition);
        }
    }
    for combo in data.combos {
        if let Some(definition) = combo.to_definition() {
            catalog.add_combo(definition);
        }
    }

    catalog.validate().map_err(GeneticsError::CatalogParse)?;
    Ok(catalog)
}

pub fn load_pricing(path: &Path) -> Result<PricingRules> {
    let content = fs::read_to_string(path)?;
    let rules = parse_pricing(&content)?;
    tracing::info!("Loaded pricing rules from {}", path.display());
    Ok(rules)
}

/// Parse pricing rules; omitted keys keep their defaults
pub fn parse_pricing(content: &str) -> Result<PricingRules> {
    let rules: PricingRules =
        toml::from_str(content).map_err(|e| GeneticsError::InvalidConfig(format!("Invalid TOML: {}", e)))?;
    rules.validate().map_err(GeneticsError::InvalidConfig)?;
    Ok(rules)
}

/// Encounter and world tuning, read together from one file
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct WorldSettings {
    pub encounter: EncounterConfig,
    pub world: WorldConfig,
}

pub fn load_world_settings(path: &Path) -> Result<WorldSettings> {
    let content = fs::read_to_string(path)?;
    let settings = parse_world_settings(&content)?;
    tracing::info!("Loaded world settings from {}", path.display());
    Ok(settings)
}

pub fn parse_world_settings(content: &str) -> Result<WorldSettings> {
    let settings: WorldSettings =
        toml::from_str(content).map_err(|e| GeneticsError::InvalidConfig(format!("Invalid TOML: {}", e)))?;
    settings.encounter.validate().map_err(GeneticsError::InvalidConfig)?;
    settings.world.validate().map_err(GeneticsError::InvalidConfig)?;
    Ok(settings)
}

// Intermediate file shapes. Ids stay strings here so an unknown one can be
// reported and skipped instead of failing the whole file.

#[derive(Debug, Deserialize)]
struct TomlCatalog {
    #[serde(default)]
    genes: Vec<TomlGene>,
    #[serde(default)]
    combos: Vec<TomlCombo>,
    #[serde(default)]
    species: Vec<TomlSpecies>,
}

#[derive(Debug, Deserialize)]
struct TomlGene {
    id: String,
    name: String,
    inheritance: Inheritance,
    rarity: Rarity,
    species: Vec<String>,
    super_form: Option<TomlSuperForm>,
}

#[derive(Debug, Deserialize)]
struct TomlSuperForm {
    id: String,
    name: String,
    rarity: Rarity,
}

#[derive(Debug, Deserialize)]
struct TomlCombo {
    id: String,
    name: String,
    requires: Vec<String>,
    base_price: u64,
    spawn_chance: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct TomlSpecies {
    id: String,
    name: String,
    base_value: u64,
    clutch_min: u32,
    clutch_max: u32,
    unlock: Option<UnlockRequirement>,
}

impl TomlGene {
    fn to_definition(&self) -> Option<GeneDefinition> {
        let Ok(id) = self.id.parse::<TraitId>() else {
            tracing::warn!("Skipping unknown gene '{}'", self.id);
            return None;
        };

        let super_form = match &self.super_form {
            Some(form) => {
                let Ok(super_id) = form.id.parse::<TraitId>() else {
                    tracing::warn!("Skipping gene '{}': unknown super form '{}'", self.id, form.id);
                    return None;
                };
                Some(SuperForm {
                    id: super_id,
                    name: form.name.clone(),
                    rarity: form.rarity,
                })
            }
            None => None,
        };

        let species = self
            .species
            .iter()
            .filter_map(|s| match s.parse::<SpeciesId>() {
                Ok(species) => Some(species),
                Err(_) => {
                    tracing::warn!("Gene '{}': ignoring unknown species '{}'", self.id, s);
                    None
                }
            })
            .collect();

        Some(GeneDefinition {
            id,
            name: self.name.clone(),
            inheritance: self.inheritance,
            rarity: self.rarity,
            species,
            super_form,
        })
    }
}

impl TomlCombo {
    fn to_definition(&self) -> Option<ComboMorph> {
        let mut requires = Vec::with_capacity(self.requires.len());
        for raw in &self.requires {
            match raw.parse::<TraitId>() {
                Ok(id) => requires.push(id),
                Err(_) => {
                    // It could never match
                    tracing::warn!("Skipping combo '{}': unknown trait '{}'", self.id, raw);
                    return None;
                }
            }
        }

        Some(ComboMorph {
            id: self.id.clone(),
            name: self.name.clone(),
            requires,
            base_price: self.base_price,
            spawn_chance: self.spawn_chance,
        })
    }
}

impl TomlSpecies {
    fn to_definition(&self) -> Option<SpeciesDefinition> {
        let Ok(id) = self.id.parse::<SpeciesId>() else {
            tracing::warn!("Skipping unknown species '{}'", self.id);
            return None;
        };
        Some(SpeciesDefinition {
            id,
            name: self.name.clone(),
            base_value: self.base_value,
            clutch_min: self.clutch_min,
            clutch_max: self.clutch_max,
            unlock: self.unlock,
        })
    }
}
