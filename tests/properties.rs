//! Property tests for the genetics engine

use chrono::Utc;
use morph_genetics::breeding::{breed, predict_offspring};
use morph_genetics::core::config::{EncounterConfig, PricingRules};
use morph_genetics::core::types::{Rarity, Sex};
use morph_genetics::creature::Snake;
use morph_genetics::encounter::{generate_wild, EncounterSeed};
use morph_genetics::genetics::{resolve_phenotype, Allele, AllelePair, GeneCatalog, Genotype, SpeciesId, TraitId};
use morph_genetics::rng::Prng;
use morph_genetics::valuation::calculate_price;
use proptest::prelude::*;

fn western_genes() -> Vec<TraitId> {
    GeneCatalog::with_defaults()
        .genes_for(SpeciesId::WesternHognose)
        .map(|g| g.id)
        .collect()
}

/// Any genotype over the western gene set, each slot wild or the gene's own allele
fn western_genotype() -> impl Strategy<Value = Genotype> {
    let genes = western_genes();
    proptest::collection::vec(any::<(bool, bool)>(), genes.len()).prop_map(move |slots| {
        genes
            .iter()
            .zip(slots)
            .fold(Genotype::new(), |genotype, (gene, (a, b))| {
                let allele = |mutant: bool| if mutant { Allele::Mutant(*gene) } else { Allele::Wild };
                genotype.with(*gene, AllelePair::new(allele(a), allele(b)))
            })
    })
}

fn species() -> impl Strategy<Value = SpeciesId> {
    prop::sample::select(SpeciesId::ALL.to_vec())
}

fn rarity() -> impl Strategy<Value = Rarity> {
    prop::sample::select(Rarity::ALL.to_vec())
}

fn sex() -> impl Strategy<Value = Sex> {
    prop_oneof![Just(Sex::Male), Just(Sex::Female)]
}

proptest! {
    #[test]
    fn prop_wild_generation_is_deterministic(seed in any::<u64>(), species in species(), target in rarity()) {
        let catalog = GeneCatalog::with_defaults();
        let config = EncounterConfig::default();
        let input = EncounterSeed { seed, species, rarity_target: target };
        prop_assert_eq!(generate_wild(input, &catalog, &config), generate_wild(input, &catalog, &config));
    }

    #[test]
    fn prop_punnett_outcomes_sum_to_one(first in western_genotype(), second in western_genotype()) {
        let catalog = GeneCatalog::with_defaults();
        for prediction in predict_offspring(&first, &second, &catalog) {
            prop_assert!((prediction.total_probability() - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn prop_phenotype_is_idempotent(genotype in western_genotype()) {
        let catalog = GeneCatalog::with_defaults();
        prop_assert_eq!(resolve_phenotype(&genotype, &catalog), resolve_phenotype(&genotype, &catalog));
    }

    #[test]
    fn prop_clutch_size_within_species_range(
        seed in any::<u64>(),
        first in western_genotype(),
        second in western_genotype(),
    ) {
        let catalog = GeneCatalog::with_defaults();
        let male = Snake::wild(SpeciesId::WesternHognose, Sex::Male, first, Utc::now());
        let female = Snake::wild(SpeciesId::WesternHognose, Sex::Female, second, Utc::now());
        let clutch = breed(&male, &female, &catalog, &mut Prng::new(seed), Utc::now()).unwrap();
        prop_assert!((8..=25).contains(&clutch.len()));
    }

    #[test]
    fn prop_expressing_another_trait_never_lowers_price(
        genotype in western_genotype(),
        index in any::<prop::sample::Index>(),
        sex in sex(),
        clutches in 0u32..3,
    ) {
        let catalog = GeneCatalog::with_defaults();
        let rules = PricingRules::default();

        // Only genes with no copies at all, so no carrier bonus is traded away
        let absent: Vec<TraitId> = genotype
            .iter()
            .filter(|(_, pair)| pair.non_wild_count() == 0)
            .map(|(id, _)| id)
            .collect();
        prop_assume!(!absent.is_empty());
        let gene = *index.get(&absent);

        let mut before = Snake::wild(SpeciesId::WesternHognose, sex, genotype.clone(), Utc::now());
        let mut after = Snake::wild(
            SpeciesId::WesternHognose,
            sex,
            genotype.with(gene, AllelePair::homozygous(gene)),
            Utc::now(),
        );
        for _ in 0..clutches {
            before.record_clutch();
            after.record_clutch();
        }

        prop_assert!(after.phenotype(&catalog).len() > before.phenotype(&catalog).len());
        prop_assert!(calculate_price(&after, &catalog, &rules) >= calculate_price(&before, &catalog, &rules));
    }

    #[test]
    fn prop_round_trip_keeps_phenotype_and_price(genotype in western_genotype(), sex in sex()) {
        let catalog = GeneCatalog::with_defaults();
        let rules = PricingRules::default();
        let snake = Snake::wild(SpeciesId::WesternHognose, sex, genotype, Utc::now());

        let json = serde_json::to_string(&snake).unwrap();
        let restored: Snake = serde_json::from_str(&json).unwrap();

        prop_assert_eq!(restored.phenotype(&catalog), snake.phenotype(&catalog));
        prop_assert_eq!(calculate_price(&restored, &catalog, &rules), calculate_price(&snake, &catalog, &rules));
    }

    #[test]
    fn prop_int_stays_in_inclusive_range(seed in any::<u64>(), min in -1000i64..1000, span in 0i64..1000) {
        let mut prng = Prng::new(seed);
        for _ in 0..50 {
            let value = prng.int(min, min + span);
            prop_assert!(value >= min && value <= min + span);
        }
    }

    #[test]
    fn prop_shuffle_is_a_permutation(seed in any::<u64>(), items in proptest::collection::vec(any::<u16>(), 0..40)) {
        let mut prng = Prng::new(seed);
        let mut shuffled = prng.shuffle(&items);
        let mut sorted = items.clone();
        shuffled.sort_unstable();
        sorted.sort_unstable();
        prop_assert_eq!(shuffled, sorted);
    }
}
