//! Benchmarks for breeding and appraisal

use chrono::Utc;
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use morph_genetics::breeding::{breed, predict_offspring};
use morph_genetics::core::config::{EncounterConfig, PricingRules, WorldConfig};
use morph_genetics::core::types::Sex;
use morph_genetics::creature::{Collection, Snake};
use morph_genetics::encounter::{generate_wild, WorldLayout};
use morph_genetics::genetics::{AllelePair, GeneCatalog, Genotype, SpeciesId, TraitId};
use morph_genetics::rng::Prng;

fn multi_het() -> Genotype {
    [
        TraitId::Albino,
        TraitId::Axanthic,
        TraitId::Toffee,
        TraitId::Anaconda,
        TraitId::Arctic,
        TraitId::Pastel,
    ]
    .into_iter()
    .fold(Genotype::new(), |g, id| g.with(id, AllelePair::het(id)))
}

fn bench_breeding(c: &mut Criterion) {
    let catalog = GeneCatalog::with_defaults();
    let male = Snake::purchased(SpeciesId::WesternHognose, Sex::Male, multi_het(), Utc::now());
    let female = Snake::purchased(SpeciesId::WesternHognose, Sex::Female, multi_het(), Utc::now());

    c.bench_function("predict_offspring", |b| {
        b.iter(|| predict_offspring(black_box(male.genotype()), black_box(female.genotype()), &catalog))
    });

    let mut prng = Prng::new(1);
    c.bench_function("breed_clutch", |b| {
        b.iter(|| breed(black_box(&male), black_box(&female), &catalog, &mut prng, Utc::now()))
    });
}

fn bench_world(c: &mut Criterion) {
    let catalog = GeneCatalog::with_defaults();
    let config = EncounterConfig::default();
    let layout = match WorldLayout::generate(WorldConfig::default(), &SpeciesId::ALL) {
        Ok(layout) => layout,
        Err(e) => panic!("layout failed: {}", e),
    };

    c.bench_function("generate_wild_x40", |b| {
        b.iter(|| {
            layout
                .sites()
                .iter()
                .map(|site| generate_wild(black_box(site.encounter), &catalog, &config))
                .count()
        })
    });
}

fn bench_appraisal(c: &mut Criterion) {
    let catalog = GeneCatalog::with_defaults();
    let rules = PricingRules::default();
    let layout = match WorldLayout::generate(
        WorldConfig {
            encounter_count: 2000,
            ..WorldConfig::default()
        },
        &SpeciesId::ALL,
    ) {
        Ok(layout) => layout,
        Err(e) => panic!("layout failed: {}", e),
    };

    let config = EncounterConfig::default();
    let mut collection = Collection::new();
    for site in layout.sites() {
        collection.add(generate_wild(site.encounter, &catalog, &config).into_snake(Utc::now()));
    }

    c.bench_function("appraise_all_2000", |b| {
        b.iter(|| collection.appraise_all(black_box(&catalog), &rules))
    });
}

criterion_group!(benches, bench_breeding, bench_world, bench_appraisal);
criterion_main!(benches);
