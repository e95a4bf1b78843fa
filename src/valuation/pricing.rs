//! Price calculation from phenotype
//!
//! The adjustments run in a fixed order so the rounded result is reproducible:
//! sex -> per-trait rarity -> combo floor -> het bonus -> proven breeder -> species.

use crate::core::config::PricingRules;
use crate::core::types::{Rarity, Sex};
use crate::creature::Snake;
use crate::genetics::{matching_combo, GeneCatalog, Phenotype, SpeciesId};

/// Everything the price depends on, detached from any snake
#[derive(Debug, Clone, Copy)]
pub struct PriceFactors<'a> {
    pub species: SpeciesId,
    pub sex: Sex,
    pub phenotype: &'a Phenotype,
    pub het_gene_count: usize,
    pub clutches_produced: u32,
}

/// Price of a snake in whole coins
pub fn calculate_price(snake: &Snake, catalog: &GeneCatalog, rules: &PricingRules) -> u64 {
    let het_gene_count = snake.het_genes(catalog).len();
    let phenotype = snake.phenotype(catalog);
    price_from_factors(
        PriceFactors {
            species: snake.species(),
            sex: snake.sex(),
            phenotype: &phenotype,
            het_gene_count,
            clutches_produced: snake.stats().clutches_produced,
        },
        catalog,
        rules,
    )
}

/// Price from detached factors
///
/// A species missing from the catalog has no base value and prices at zero.
pub fn price_from_factors(factors: PriceFactors<'_>, catalog: &GeneCatalog, rules: &PricingRules) -> u64 {
    let base = match catalog.species(factors.species) {
        Some(species) => species.base_value,
        None => {
            tracing::debug!("No catalog entry for {:?}, pricing at zero", factors.species);
            0
        }
    };

    let mut price = base as f64;

    price *= rules.sex_multiplier(factors.sex);

    for id in factors.phenotype.traits() {
        if let Some(rarity) = catalog.trait_rarity(*id) {
            price *= rules.rarity_multipliers.get(rarity);
        }
    }

    // Floor replacement, not a multiplier
    if let Some(combo) = matching_combo(factors.phenotype, catalog) {
        price = price.max(combo.base_price as f64);
    }

    price *= 1.0 + factors.het_gene_count as f64 * rules.het_gene_bonus_rate;

    if factors.clutches_produced > 0 {
        price *= rules.proven_breeder_bonus;
    }

    price *= rules.species_multiplier(factors.species);

    price.round() as u64
}

/// Map a price onto the five rarity tiers
pub fn rarity_tier(price: u64, rules: &PricingRules) -> Rarity {
    let passed = rules
        .rarity_thresholds
        .iter()
        .take_while(|threshold| price >= **threshold)
        .count();
    Rarity::ALL[passed]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::genetics::TraitId;

    fn factors(phenotype: &Phenotype) -> PriceFactors<'_> {
        PriceFactors {
            species: SpeciesId::WesternHognose,
            sex: Sex::Male,
            phenotype,
            het_gene_count: 0,
            clutches_produced: 0,
        }
    }

    #[test]
    fn test_normal_male_is_base_value() {
        let catalog = GeneCatalog::with_defaults();
        let rules = PricingRules::default();
        let phenotype = Phenotype::default();
        assert_eq!(price_from_factors(factors(&phenotype), &catalog, &rules), 150);
    }

    #[test]
    fn test_sex_multiplier_applied() {
        let catalog = GeneCatalog::with_defaults();
        let rules = PricingRules::default();
        let phenotype = Phenotype::default();
        let female = PriceFactors {
            sex: Sex::Female,
            ..factors(&phenotype)
        };
        // 150 * 1.2 = 180
        assert_eq!(price_from_factors(female, &catalog, &rules), 180);
    }

    #[test]
    fn test_trait_multipliers_compound() {
        let catalog = GeneCatalog::with_defaults();
        let rules = PricingRules::default();
        // Albino (uncommon 1.5) x Pastel (common 1.2): 150 * 1.5 * 1.2 = 270
        let phenotype = Phenotype::from(vec![TraitId::Albino, TraitId::Pastel]);
        assert_eq!(price_from_factors(factors(&phenotype), &catalog, &rules), 270);
    }

    #[test]
    fn test_combo_is_a_floor() {
        let catalog = GeneCatalog::with_defaults();
        let rules = PricingRules::default();
        // 150 * 1.5 * 1.5 = 337.5, raised to the Snow floor of 1500
        let phenotype = Phenotype::from(vec![TraitId::Albino, TraitId::Axanthic]);
        assert_eq!(price_from_factors(factors(&phenotype), &catalog, &rules), 1500);
    }

    #[test]
    fn test_combo_floor_does_not_lower_price() {
        let catalog = GeneCatalog::with_defaults();
        let mut rules = PricingRules::default();
        rules.rarity_multipliers.uncommon = 20.0;
        rules.rarity_multipliers.rare = 20.0;
        rules.rarity_multipliers.very_rare = 20.0;
        rules.rarity_multipliers.legendary = 20.0;
        // 150 * 20 * 20 = 60000, well above the Snow floor
        let phenotype = Phenotype::from(vec![TraitId::Albino, TraitId::Axanthic]);
        assert_eq!(price_from_factors(factors(&phenotype), &catalog, &rules), 60_000);
    }

    #[test]
    fn test_het_and_breeder_bonuses() {
        let catalog = GeneCatalog::with_defaults();
        let rules = PricingRules::default();
        let phenotype = Phenotype::default();
        let proven = PriceFactors {
            het_gene_count: 2,
            clutches_produced: 1,
            ..factors(&phenotype)
        };
        // 150 * 1.2 * 1.25 = 225
        assert_eq!(price_from_factors(proven, &catalog, &rules), 225);
    }

    #[test]
    fn test_species_multiplier_and_base() {
        let catalog = GeneCatalog::with_defaults();
        let rules = PricingRules::default();
        let phenotype = Phenotype::default();
        let southern = PriceFactors {
            species: SpeciesId::SouthernHognose,
            ..factors(&phenotype)
        };
        // 400 * 1.1 = 440
        assert_eq!(price_from_factors(southern, &catalog, &rules), 440);
    }

    #[test]
    fn test_unknown_species_prices_at_zero() {
        let catalog = GeneCatalog::new();
        let rules = PricingRules::default();
        let phenotype = Phenotype::default();
        assert_eq!(price_from_factors(factors(&phenotype), &catalog, &rules), 0);
    }

    #[test]
    fn test_rarity_tiers() {
        let rules = PricingRules::default();
        assert_eq!(rarity_tier(0, &rules), Rarity::Common);
        assert_eq!(rarity_tier(299, &rules), Rarity::Common);
        assert_eq!(rarity_tier(300, &rules), Rarity::Uncommon);
        assert_eq!(rarity_tier(800, &rules), Rarity::Rare);
        assert_eq!(rarity_tier(1999, &rules), Rarity::Rare);
        assert_eq!(rarity_tier(2000, &rules), Rarity::VeryRare);
        assert_eq!(rarity_tier(5000, &rules), Rarity::Legendary);
        assert_eq!(rarity_tier(u64::MAX, &rules), Rarity::Legendary);
    }
}
