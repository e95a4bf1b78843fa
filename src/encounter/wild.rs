//! Wild-encounter generation
//!
//! Each encounter owns a short-lived stream seeded from its own seed, so the
//! result depends only on (seed, species, rarity target, catalog, config),
//! never on call order or any shared stream.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::config::EncounterConfig;
use crate::core::types::{Rarity, Sex};
use crate::creature::Snake;
use crate::genetics::{Allele, AllelePair, ComboMorph, GeneCatalog, Genotype, Inheritance, SpeciesId, TraitId};
use crate::rng::Prng;

/// What the world layout hands over for one discoverable snake
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncounterSeed {
    pub seed: u64,
    pub species: SpeciesId,
    pub rarity_target: Rarity,
}

/// A generated wild snake, before it is caught
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WildEncounter {
    pub species: SpeciesId,
    pub sex: Sex,
    pub genotype: Genotype,
    /// Combo morph forced by its spawn-chance override, if one fired
    pub forced_combo: Option<String>,
}

impl WildEncounter {
    /// Catch the snake
    pub fn into_snake(self, caught_at: DateTime<Utc>) -> Snake {
        Snake::wild(self.species, self.sex, self.genotype, caught_at)
    }
}

/// Generate the genotype and sex of a wild snake
///
/// Draw order: two allele rolls per species gene in catalog order, one roll
/// per spawn-chance combo (stopping at the first that fires), then sex.
pub fn generate_wild(encounter: EncounterSeed, catalog: &GeneCatalog, config: &EncounterConfig) -> WildEncounter {
    let mut prng = Prng::new(encounter.seed);
    let chance = config.mutant_chance(encounter.rarity_target);

    let mut genotype = Genotype::new();
    for gene in catalog.genes_for(encounter.species) {
        // Rarer genes are proportionally harder to roll
        let p = chance / f64::from(gene.rarity.ordinal());
        let first = roll_allele(gene.id, p, &mut prng);
        let second = roll_allele(gene.id, p, &mut prng);
        genotype.insert(gene.id, AllelePair::new(first, second));
    }

    let mut forced_combo = None;
    for combo in catalog.combos() {
        let Some(spawn_chance) = combo.spawn_chance else {
            continue;
        };
        if !combo_possible(combo, encounter.species, catalog) {
            continue;
        }
        if prng.bool(spawn_chance) {
            force_combo(&mut genotype, combo, catalog);
            forced_combo = Some(combo.id.clone());
            break;
        }
    }

    let sex = if prng.bool(0.5) { Sex::Female } else { Sex::Male };

    tracing::debug!(
        "Wild {} (seed {}, target {}): {} genes, combo {:?}",
        encounter.species,
        encounter.seed,
        encounter.rarity_target,
        genotype.len(),
        forced_combo
    );

    WildEncounter {
        species: encounter.species,
        sex,
        genotype,
        forced_combo,
    }
}

fn roll_allele(gene: TraitId, p: f64, prng: &mut Prng) -> Allele {
    if prng.bool(p) {
        Allele::Mutant(gene)
    } else {
        Allele::Wild
    }
}

/// Every required trait comes from a gene that occurs in the species
fn combo_possible(combo: &ComboMorph, species: SpeciesId, catalog: &GeneCatalog) -> bool {
    combo.requires.iter().all(|id| {
        catalog
            .source_gene(*id)
            .is_some_and(|(gene, _)| gene.applies_to(species))
    })
}

/// Rewrite the genotype so every trait the combo requires is expressed
fn force_combo(genotype: &mut Genotype, combo: &ComboMorph, catalog: &GeneCatalog) {
    for id in &combo.requires {
        let Some((gene, is_super)) = catalog.source_gene(*id) else {
            continue;
        };
        let current = genotype.get(gene.id).copied().unwrap_or_else(AllelePair::wild);

        let pair = match gene.inheritance {
            Inheritance::Recessive => AllelePair::homozygous(gene.id),
            Inheritance::IncompleteDominant if is_super => AllelePair::homozygous(gene.id),
            // Exactly one copy; two would show the super form instead
            Inheritance::IncompleteDominant => AllelePair::het(gene.id),
            Inheritance::Dominant | Inheritance::Polygenic => {
                if current.non_wild_count() > 0 {
                    current
                } else {
                    AllelePair::het(gene.id)
                }
            }
        };
        genotype.insert(gene.id, pair);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::genetics::{matching_combo, resolve_phenotype};

    fn seed(seed: u64, species: SpeciesId, rarity_target: Rarity) -> EncounterSeed {
        EncounterSeed {
            seed,
            species,
            rarity_target,
        }
    }

    #[test]
    fn test_same_seed_same_snake() {
        let catalog = GeneCatalog::with_defaults();
        let config = EncounterConfig::default();
        let input = seed(777, SpeciesId::WesternHognose, Rarity::Rare);
        assert_eq!(generate_wild(input, &catalog, &config), generate_wild(input, &catalog, &config));
    }

    #[test]
    fn test_only_species_genes_present() {
        let catalog = GeneCatalog::with_defaults();
        let config = EncounterConfig::default();
        let wild = generate_wild(seed(5, SpeciesId::SouthernHognose, Rarity::Legendary), &catalog, &config);
        let genes: Vec<TraitId> = wild.genotype.iter().map(|(id, _)| id).collect();
        assert_eq!(
            genes,
            vec![TraitId::Albino, TraitId::Pastel, TraitId::Melanistic, TraitId::Patternless]
        );
    }

    #[test]
    fn test_higher_target_yields_more_mutant_alleles() {
        let catalog = GeneCatalog::with_defaults();
        let config = EncounterConfig::default();
        let count = |target: Rarity| -> usize {
            (1..=300)
                .map(|s| generate_wild(seed(s, SpeciesId::WesternHognose, target), &catalog, &config))
                .map(|w| w.genotype.iter().map(|(_, pair)| pair.non_wild_count()).sum::<usize>())
                .sum()
        };
        assert!(count(Rarity::Legendary) > count(Rarity::Common));
    }

    #[test]
    fn test_zero_chance_gives_all_wild() {
        let catalog = GeneCatalog::with_defaults();
        let config = EncounterConfig {
            base_mutant_chance: 0.0,
            mutant_chance_per_tier: 0.0,
            max_mutant_chance: 0.0,
        };
        for s in 1..50 {
            let wild = generate_wild(seed(s, SpeciesId::WesternHognose, Rarity::Legendary), &catalog, &config);
            if wild.forced_combo.is_none() {
                assert!(wild.genotype.iter().all(|(_, pair)| pair.non_wild_count() == 0));
            }
        }
    }

    #[test]
    fn test_certain_combo_is_forced_and_expressed() {
        let mut catalog = GeneCatalog::new();
        let defaults = GeneCatalog::with_defaults();
        for gene in defaults.genes() {
            catalog.add_gene(gene.clone());
        }
        for species in defaults.all_species() {
            catalog.add_species(species.clone());
        }
        catalog.add_combo(ComboMorph {
            id: "snow_superconda".into(),
            name: "Snow Superconda".into(),
            requires: vec![TraitId::Albino, TraitId::Axanthic, TraitId::Superconda],
            base_price: 6000,
            spawn_chance: Some(1.0),
        });

        let config = EncounterConfig::default();
        let wild = generate_wild(seed(9, SpeciesId::WesternHognose, Rarity::Common), &catalog, &config);
        assert_eq!(wild.forced_combo.as_deref(), Some("snow_superconda"));

        let phenotype = resolve_phenotype(&wild.genotype, &catalog);
        assert_eq!(matching_combo(&phenotype, &catalog).map(|c| c.id.as_str()), Some("snow_superconda"));
    }

    #[test]
    fn test_combo_impossible_for_species_is_skipped() {
        let catalog = GeneCatalog::with_defaults();
        let snow_superconda = &catalog.combos()[0];
        assert!(combo_possible(snow_superconda, SpeciesId::WesternHognose, &catalog));
        assert!(!combo_possible(snow_superconda, SpeciesId::SouthernHognose, &catalog));
    }

    #[test]
    fn test_into_snake_is_wild() {
        let catalog = GeneCatalog::with_defaults();
        let wild = generate_wild(seed(3, SpeciesId::EasternHognose, Rarity::Uncommon), &catalog, &EncounterConfig::default());
        let genotype = wild.genotype.clone();
        let snake = wild.into_snake(Utc::now());
        assert_eq!(snake.origin(), crate::core::types::Origin::Wild);
        assert_eq!(snake.genotype(), &genotype);
    }
}
