//! morphs - command-line front end for the genetics engine
//!
//! Roll wild snakes, lay out a world, show breeding odds, hatch clutches and
//! appraise saved collections. Catalog and tuning come from the built-in
//! defaults unless TOML overrides are given.

use std::path::PathBuf;

use chrono::Utc;
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use morph_genetics::breeding::{expression_odds, predict_offspring};
use morph_genetics::core::config::{EncounterConfig, PricingRules, WorldConfig};
use morph_genetics::core::error::Result;
use morph_genetics::core::types::{Rarity, Sex};
use morph_genetics::creature::{Collection, Snake};
use morph_genetics::encounter::{generate_wild, EncounterSeed, WorldLayout};
use morph_genetics::genetics::{Allele, AllelePair, GeneCatalog, Genotype, SpeciesId, TraitId};
use morph_genetics::persistence::SaveFile;
use morph_genetics::rng::Prng;
use morph_genetics::rules;
use morph_genetics::valuation::{appraise, Appraisal};

/// Hognose morph genetics: wild encounters, breeding odds and prices
#[derive(Parser, Debug)]
#[command(name = "morphs")]
#[command(about = "Explore hognose genetics, breeding and valuation")]
struct Args {
    /// Gene catalog TOML (defaults to the built-in catalog)
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    /// Pricing rules TOML (defaults to the built-in rules)
    #[arg(long, global = true)]
    pricing: Option<PathBuf>,

    /// Encounter and world settings TOML
    #[arg(long, global = true)]
    world: Option<PathBuf>,

    /// Print JSON instead of text
    #[arg(long, global = true, default_value_t = false)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate the wild snake for one encounter seed
    Wild {
        #[arg(long)]
        seed: u64,

        #[arg(long, default_value = "western_hognose")]
        species: SpeciesId,

        /// Rarity target, 1 (common) to 5 (legendary)
        #[arg(long, default_value = "1", value_parser = parse_rarity)]
        rarity: Rarity,
    },

    /// Lay out the world's encounter sites from a root seed
    Layout {
        /// Root seed (defaults to the configured world seed)
        #[arg(long)]
        seed: Option<u64>,

        /// Number of sites (defaults to the configured count)
        #[arg(long)]
        count: Option<usize>,

        /// Also generate and appraise the snake at each site
        #[arg(long, default_value_t = false)]
        reveal: bool,
    },

    /// Show per-gene offspring odds for two genotypes
    ///
    /// Genotypes are written as `gene:allele/allele,...`, e.g.
    /// `albino:albino/+,anaconda:anaconda/+`.
    Predict {
        #[arg(long, value_parser = parse_genotype)]
        first: Genotype,

        #[arg(long, value_parser = parse_genotype)]
        second: Genotype,
    },

    /// Hatch one clutch from two genotypes
    Breed {
        #[arg(long, value_parser = parse_genotype)]
        first: Genotype,

        #[arg(long, value_parser = parse_genotype)]
        second: Genotype,

        #[arg(long, default_value = "western_hognose")]
        species: SpeciesId,

        #[arg(long, default_value_t = 42)]
        seed: u64,

        /// Write parents and clutch to a save file
        #[arg(long)]
        save: Option<PathBuf>,
    },

    /// Appraise every snake in a save file
    Appraise { save: PathBuf },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("morph_genetics=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let catalog = match &args.catalog {
        Some(path) => rules::load_catalog(path)?,
        None => GeneCatalog::with_defaults(),
    };
    let pricing = match &args.pricing {
        Some(path) => rules::load_pricing(path)?,
        None => PricingRules::default(),
    };
    let settings = match &args.world {
        Some(path) => rules::load_world_settings(path)?,
        None => rules::WorldSettings::default(),
    };

    match args.command {
        Command::Wild { seed, species, rarity } => {
            let encounter = EncounterSeed {
                seed,
                species,
                rarity_target: rarity,
            };
            let snake = generate_wild(encounter, &catalog, &settings.encounter).into_snake(Utc::now());
            let report = SnakeReport::new(&snake, &catalog, &pricing);
            if args.json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print_report(&report);
            }
        }

        Command::Layout { seed, count, reveal } => {
            let config = WorldConfig {
                root_seed: seed.unwrap_or(settings.world.root_seed),
                encounter_count: count.unwrap_or(settings.world.encounter_count),
                ..settings.world.clone()
            };
            run_layout(config, reveal, args.json, &catalog, &pricing, &settings.encounter)?;
        }

        Command::Predict { first, second } => {
            let predictions = predict_offspring(&first, &second, &catalog);
            if args.json {
                println!("{}", serde_json::to_string_pretty(&predictions)?);
                return Ok(());
            }
            if predictions.is_empty() {
                println!("No genes in common");
            }
            for prediction in &predictions {
                println!("{}", catalog.trait_name(prediction.gene).unwrap_or(prediction.gene.as_str()));
                for outcome in &prediction.outcomes {
                    let note = match (outcome.expresses, outcome.carrier) {
                        (Some(id), _) => catalog.trait_name(id).unwrap_or(id.as_str()).to_string(),
                        (None, true) => "het".to_string(),
                        (None, false) => String::new(),
                    };
                    println!("  {:<28} {:>6.1}%  {}", outcome.label, outcome.probability * 100.0, note);
                }
            }
            let visual: Vec<TraitId> = TraitId::ALL
                .iter()
                .copied()
                .filter(|id| expression_odds(&predictions, *id) > 0.0)
                .collect();
            for id in visual {
                println!(
                    "P(visual {}) = {:.1}%",
                    catalog.trait_name(id).unwrap_or(id.as_str()),
                    expression_odds(&predictions, id) * 100.0
                );
            }
        }

        Command::Breed {
            first,
            second,
            species,
            seed,
            save,
        } => {
            let now = Utc::now();
            let mut collection = Collection::new();
            let male = collection.add(Snake::purchased(species, Sex::Male, first, now));
            let female = collection.add(Snake::purchased(species, Sex::Female, second, now));

            let mut prng = Prng::new(seed);
            let clutch = collection.breed(male, female, &catalog, &mut prng, now)?;

            let reports: Vec<SnakeReport> = clutch
                .iter()
                .filter_map(|id| collection.get(*id))
                .map(|snake| SnakeReport::new(snake, &catalog, &pricing))
                .collect();
            if args.json {
                println!("{}", serde_json::to_string_pretty(&reports)?);
            } else {
                println!("Clutch of {}", reports.len());
                for report in &reports {
                    print_report(report);
                }
            }

            if let Some(path) = save {
                SaveFile::from_collection(&collection).save_to_path(&path)?;
            }
        }

        Command::Appraise { save } => {
            let collection = SaveFile::load_from_path(&save)?.into_collection();
            let appraisals = collection.appraise_all(&catalog, &pricing);
            let total = collection.total_value(&catalog, &pricing);
            let unlocked = collection.unlocked_species(&catalog, &pricing);

            if args.json {
                let summary = CollectionSummary {
                    appraisals,
                    total_value: total,
                    unlocked_species: unlocked,
                };
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else {
                for appraisal in &appraisals {
                    println!(
                        "{}  {:<24} ${:<8} {}",
                        appraisal.id, appraisal.display_name, appraisal.price, appraisal.tier
                    );
                }
                println!("Total value: ${}", total);
                let names: Vec<&str> = unlocked.iter().map(|s| s.as_str()).collect();
                println!("Unlocked species: {}", names.join(", "));
            }
        }
    }

    Ok(())
}

fn run_layout(
    config: WorldConfig,
    reveal: bool,
    json: bool,
    catalog: &GeneCatalog,
    pricing: &PricingRules,
    encounter: &EncounterConfig,
) -> Result<()> {
    let species: Vec<SpeciesId> = catalog.all_species().iter().map(|s| s.id).collect();
    let layout = WorldLayout::generate(config, &species)?;

    if json && !reveal {
        println!("{}", serde_json::to_string_pretty(layout.sites())?);
        return Ok(());
    }

    let mut revealed = Vec::new();
    for site in layout.sites() {
        let report = reveal
            .then(|| layout.encounter(site.index, catalog, encounter))
            .flatten()
            .map(|wild| SnakeReport::new(&wild.into_snake(Utc::now()), catalog, pricing));

        if json {
            revealed.push(SiteReport { site: *site, snake: report });
            continue;
        }

        let (x, z) = site.position;
        print!(
            "#{:<3} ({:>7.1}, {:>7.1})  {:<17} target {:<10} seed {}",
            site.index, x, z, site.encounter.species, site.encounter.rarity_target, site.encounter.seed
        );
        match report {
            Some(r) => println!("  -> {} ${}", r.appraisal.display_name, r.appraisal.price),
            None => println!(),
        }
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&revealed)?);
    }
    Ok(())
}

#[derive(Debug, Serialize)]
struct SnakeReport {
    species: SpeciesId,
    sex: Sex,
    genotype: Genotype,
    appraisal: Appraisal,
}

impl SnakeReport {
    fn new(snake: &Snake, catalog: &GeneCatalog, pricing: &PricingRules) -> Self {
        Self {
            species: snake.species(),
            sex: snake.sex(),
            genotype: snake.genotype().clone(),
            appraisal: appraise(snake, catalog, pricing),
        }
    }
}

#[derive(Debug, Serialize)]
struct SiteReport {
    site: morph_genetics::encounter::EncounterSite,
    snake: Option<SnakeReport>,
}

#[derive(Debug, Serialize)]
struct CollectionSummary {
    appraisals: Vec<Appraisal>,
    total_value: u64,
    unlocked_species: Vec<SpeciesId>,
}

fn print_report(report: &SnakeReport) {
    let genes: Vec<String> = report
        .genotype
        .iter()
        .filter(|(_, pair)| pair.non_wild_count() > 0)
        .map(|(id, pair)| format!("{}:{}", id, pair.label()))
        .collect();
    println!(
        "{} {} {:<24} ${:<8} {:<10} [{}]",
        report.species,
        report.sex.as_str(),
        report.appraisal.display_name,
        report.appraisal.price,
        report.appraisal.tier,
        genes.join(", ")
    );
}

fn parse_rarity(s: &str) -> std::result::Result<Rarity, String> {
    let ordinal: u8 = s.parse().map_err(|_| format!("'{}' is not a number", s))?;
    Rarity::from_ordinal(ordinal).ok_or_else(|| format!("rarity must be 1-5, got {}", ordinal))
}

/// `gene:allele/allele` entries separated by commas; `+` is the wild allele
fn parse_genotype(s: &str) -> std::result::Result<Genotype, String> {
    let mut genotype = Genotype::new();
    for entry in s.split(',').map(str::trim).filter(|e| !e.is_empty()) {
        let (gene, alleles) = entry
            .split_once(':')
            .ok_or_else(|| format!("'{}': expected gene:allele/allele", entry))?;
        let gene: TraitId = gene.trim().parse()?;
        let (a, b) = alleles
            .split_once('/')
            .ok_or_else(|| format!("'{}': expected two alleles separated by '/'", entry))?;
        let a: Allele = a.trim().parse()?;
        let b: Allele = b.trim().parse()?;
        genotype.insert(gene, AllelePair::new(a, b));
    }
    Ok(genotype)
}
