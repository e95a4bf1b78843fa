//! Gene, combo-morph and species catalog
//!
//! Read-only after construction. Catalog order is significant: it fixes the
//! order of phenotype traits and the first-match rule for combo morphs.

use std::hash::{Hash, Hasher};

use ahash::AHasher;
use serde::{Deserialize, Serialize};

use crate::core::types::Rarity;
use crate::genetics::{Inheritance, SpeciesId, TraitId};

/// Trait expressed by two copies of an incomplete-dominant gene
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuperForm {
    pub id: TraitId,
    pub name: String,
    pub rarity: Rarity,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneDefinition {
    pub id: TraitId,
    pub name: String,
    pub inheritance: Inheritance,
    pub rarity: Rarity,
    /// Species this gene occurs in
    pub species: Vec<SpeciesId>,
    /// Only for incomplete-dominant genes
    pub super_form: Option<SuperForm>,
}

impl GeneDefinition {
    pub fn applies_to(&self, species: SpeciesId) -> bool {
        self.species.contains(&species)
    }
}

/// Named presentation of several traits expressed together
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComboMorph {
    pub id: String,
    pub name: String,
    /// Every trait here must be in the phenotype for the combo to match
    pub requires: Vec<TraitId>,
    /// Price floor when this combo matches
    pub base_price: u64,
    /// Direct chance of forcing this combo onto a wild snake
    pub spawn_chance: Option<f64>,
}

/// Progress a player needs before a species becomes available
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum UnlockRequirement {
    OwnedSnakes(usize),
    CollectionValue(u64),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpeciesDefinition {
    pub id: SpeciesId,
    pub name: String,
    pub base_value: u64,
    pub clutch_min: u32,
    pub clutch_max: u32,
    pub unlock: Option<UnlockRequirement>,
}

/// Catalog of genes, combo morphs and species
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GeneCatalog {
    genes: Vec<GeneDefinition>,
    combos: Vec<ComboMorph>,
    species: Vec<SpeciesDefinition>,
}

impl GeneCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Built-in hognose catalog
    pub fn with_defaults() -> Self {
        use Inheritance::*;
        use SpeciesId::*;

        let mut catalog = Self::new();

        let gene = |id: TraitId, name: &str, inheritance, rarity, species: &[SpeciesId]| GeneDefinition {
            id,
            name: name.into(),
            inheritance,
            rarity,
            species: species.to_vec(),
            super_form: None,
        };
        let with_super = |mut def: GeneDefinition, id: TraitId, name: &str, rarity| {
            def.super_form = Some(SuperForm { id, name: name.into(), rarity });
            def
        };

        let all = [WesternHognose, EasternHognose, SouthernHognose];

        // Recessive
        catalog.add_gene(gene(TraitId::Albino, "Albino", Recessive, Rarity::Uncommon, &all));
        catalog.add_gene(gene(TraitId::Axanthic, "Axanthic", Recessive, Rarity::Uncommon, &[WesternHognose, EasternHognose]));
        catalog.add_gene(gene(TraitId::Toffee, "Toffee", Recessive, Rarity::Rare, &[WesternHognose]));
        catalog.add_gene(gene(TraitId::Lavender, "Lavender", Recessive, Rarity::VeryRare, &[WesternHognose]));
        catalog.add_gene(gene(TraitId::PinkPastel, "Pink Pastel", Recessive, Rarity::Rare, &[WesternHognose]));
        catalog.add_gene(gene(TraitId::Sable, "Sable", Recessive, Rarity::Rare, &[WesternHognose]));
        catalog.add_gene(gene(TraitId::LemonGhost, "Lemon Ghost", Recessive, Rarity::Legendary, &[WesternHognose]));

        // Incomplete dominant
        catalog.add_gene(with_super(
            gene(TraitId::Anaconda, "Anaconda", IncompleteDominant, Rarity::Uncommon, &[WesternHognose]),
            TraitId::Superconda,
            "Superconda",
            Rarity::Rare,
        ));
        catalog.add_gene(with_super(
            gene(TraitId::Arctic, "Arctic", IncompleteDominant, Rarity::Rare, &[WesternHognose, EasternHognose]),
            TraitId::SuperArctic,
            "Super Arctic",
            Rarity::VeryRare,
        ));
        catalog.add_gene(with_super(
            gene(TraitId::Frosted, "Frosted", IncompleteDominant, Rarity::VeryRare, &[WesternHognose]),
            TraitId::SuperFrosted,
            "Super Frosted",
            Rarity::Legendary,
        ));

        // Dominant
        catalog.add_gene(gene(TraitId::Pastel, "Pastel", Dominant, Rarity::Common, &all));
        catalog.add_gene(gene(TraitId::Melanistic, "Melanistic", Dominant, Rarity::Rare, &[EasternHognose, SouthernHognose]));

        // Polygenic
        catalog.add_gene(gene(TraitId::ExtremeRed, "Extreme Red", Polygenic, Rarity::Uncommon, &[WesternHognose]));
        catalog.add_gene(gene(TraitId::Patternless, "Patternless", Polygenic, Rarity::VeryRare, &[EasternHognose, SouthernHognose]));

        // Combos, most valuable first so a richer match is never shadowed
        catalog.add_combo(ComboMorph {
            id: "snow_superconda".into(),
            name: "Snow Superconda".into(),
            requires: vec![TraitId::Albino, TraitId::Axanthic, TraitId::Superconda],
            base_price: 6000,
            spawn_chance: Some(0.0005),
        });
        catalog.add_combo(ComboMorph {
            id: "lavender_arctic".into(),
            name: "Lavender Arctic".into(),
            requires: vec![TraitId::Lavender, TraitId::Arctic],
            base_price: 3200,
            spawn_chance: None,
        });
        catalog.add_combo(ComboMorph {
            id: "midnight".into(),
            name: "Midnight".into(),
            requires: vec![TraitId::Melanistic, TraitId::Patternless],
            base_price: 2500,
            spawn_chance: Some(0.002),
        });
        catalog.add_combo(ComboMorph {
            id: "snow".into(),
            name: "Snow".into(),
            requires: vec![TraitId::Albino, TraitId::Axanthic],
            base_price: 1500,
            spawn_chance: None,
        });
        catalog.add_combo(ComboMorph {
            id: "toffeeconda".into(),
            name: "Toffeeconda".into(),
            requires: vec![TraitId::Toffee, TraitId::Anaconda],
            base_price: 900,
            spawn_chance: None,
        });

        catalog.add_species(SpeciesDefinition {
            id: WesternHognose,
            name: "Western Hognose".into(),
            base_value: 150,
            clutch_min: 8,
            clutch_max: 25,
            unlock: None,
        });
        catalog.add_species(SpeciesDefinition {
            id: EasternHognose,
            name: "Eastern Hognose".into(),
            base_value: 250,
            clutch_min: 10,
            clutch_max: 30,
            unlock: Some(UnlockRequirement::OwnedSnakes(5)),
        });
        catalog.add_species(SpeciesDefinition {
            id: SouthernHognose,
            name: "Southern Hognose".into(),
            base_value: 400,
            clutch_min: 6,
            clutch_max: 14,
            unlock: Some(UnlockRequirement::CollectionValue(10_000)),
        });

        catalog
    }

    /// Add a gene; a later definition with the same id replaces the earlier one in place
    pub fn add_gene(&mut self, gene: GeneDefinition) {
        match self.genes.iter_mut().find(|g| g.id == gene.id) {
            Some(existing) => *existing = gene,
            None => self.genes.push(gene),
        }
    }

    pub fn add_combo(&mut self, combo: ComboMorph) {
        self.combos.push(combo);
    }

    pub fn add_species(&mut self, species: SpeciesDefinition) {
        match self.species.iter_mut().find(|s| s.id == species.id) {
            Some(existing) => *existing = species,
            None => self.species.push(species),
        }
    }

    /// All genes in catalog order
    pub fn genes(&self) -> &[GeneDefinition] {
        &self.genes
    }

    pub fn gene(&self, id: TraitId) -> Option<&GeneDefinition> {
        self.genes.iter().find(|g| g.id == id)
    }

    /// Genes that occur in a species, in catalog order
    pub fn genes_for(&self, species: SpeciesId) -> impl Iterator<Item = &GeneDefinition> {
        self.genes.iter().filter(move |g| g.applies_to(species))
    }

    pub fn combos(&self) -> &[ComboMorph] {
        &self.combos
    }

    pub fn all_species(&self) -> &[SpeciesDefinition] {
        &self.species
    }

    pub fn species(&self, id: SpeciesId) -> Option<&SpeciesDefinition> {
        self.species.iter().find(|s| s.id == id)
    }

    /// Display name of a gene or super form
    pub fn trait_name(&self, id: TraitId) -> Option<&str> {
        self.genes.iter().find_map(|g| {
            if g.id == id {
                Some(g.name.as_str())
            } else {
                g.super_form.as_ref().filter(|s| s.id == id).map(|s| s.name.as_str())
            }
        })
    }

    /// Rarity of a gene or super form
    pub fn trait_rarity(&self, id: TraitId) -> Option<Rarity> {
        self.genes.iter().find_map(|g| {
            if g.id == id {
                Some(g.rarity)
            } else {
                g.super_form.as_ref().filter(|s| s.id == id).map(|s| s.rarity)
            }
        })
    }

    /// Fingerprint of everything phenotype resolution reads
    ///
    /// Covers gene order, inheritance and super forms. Names, rarities and
    /// combos do not change which traits a genotype expresses.
    pub fn expression_fingerprint(&self) -> u64 {
        let mut hasher = AHasher::default();
        for gene in &self.genes {
            gene.id.hash(&mut hasher);
            gene.inheritance.hash(&mut hasher);
            gene.super_form.as_ref().map(|s| s.id).hash(&mut hasher);
        }
        hasher.finish()
    }

    /// The gene whose expression produces `id`, and whether `id` is its super form
    pub fn source_gene(&self, id: TraitId) -> Option<(&GeneDefinition, bool)> {
        self.genes.iter().find_map(|g| {
            if g.id == id {
                Some((g, false))
            } else if g.super_form.as_ref().is_some_and(|s| s.id == id) {
                Some((g, true))
            } else {
                None
            }
        })
    }

    /// Validate catalog for internal consistency
    pub fn validate(&self) -> Result<(), String> {
        for gene in &self.genes {
            let is_incomplete = gene.inheritance == Inheritance::IncompleteDominant;
            if is_incomplete && gene.super_form.is_none() {
                return Err(format!("incomplete-dominant gene '{}' has no super form", gene.id));
            }
            if !is_incomplete && gene.super_form.is_some() {
                return Err(format!("gene '{}' has a super form but is not incomplete-dominant", gene.id));
            }
        }

        for species in &self.species {
            if species.clutch_min == 0 || species.clutch_min > species.clutch_max {
                return Err(format!(
                    "{}: clutch range [{}, {}] is invalid",
                    species.id, species.clutch_min, species.clutch_max
                ));
            }
        }

        for combo in &self.combos {
            if combo.requires.is_empty() {
                return Err(format!("combo '{}' requires no traits", combo.id));
            }
            if let Some(chance) = combo.spawn_chance {
                if !(0.0..=1.0).contains(&chance) {
                    return Err(format!("combo '{}' spawn_chance {} outside [0, 1]", combo.id, chance));
                }
            }
        }

        // First match wins, so a later combo must not out-price an earlier one
        if let Some(pair) = self.combos.windows(2).find(|w| w[0].base_price < w[1].base_price) {
            return Err(format!(
                "combo '{}' ({}) is listed after cheaper combo '{}' ({}); list combos most valuable first",
                pair[1].id, pair[1].base_price, pair[0].id, pair[0].base_price
            ));
        }

        Ok(())
    }
}
