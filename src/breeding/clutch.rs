//! Clutch generation - turning two parents into concrete offspring

use chrono::{DateTime, Utc};

use crate::core::error::{GeneticsError, Result};
use crate::core::types::Sex;
use crate::creature::Snake;
use crate::genetics::{Allele, AllelePair, GeneCatalog, Genotype};
use crate::rng::Prng;

/// Breed two snakes into a full clutch
///
/// Fails before touching the stream if the parents differ in species or the
/// species is missing from the catalog. Otherwise draws, in order: clutch
/// size, then per offspring one allele from each parent for every gene of
/// `parent1` (gene key order), then sex.
///
/// Parents are not modified; bookkeeping such as clutch counters belongs to
/// whoever owns them.
pub fn breed(
    parent1: &Snake,
    parent2: &Snake,
    catalog: &GeneCatalog,
    prng: &mut Prng,
    now: DateTime<Utc>,
) -> Result<Vec<Snake>> {
    if parent1.species() != parent2.species() {
        return Err(GeneticsError::SpeciesMismatch {
            first: parent1.species(),
            second: parent2.species(),
        });
    }

    let species = catalog
        .species(parent1.species())
        .ok_or(GeneticsError::UnknownSpecies(parent1.species()))?;

    let clutch_size = prng.int(i64::from(species.clutch_min), i64::from(species.clutch_max)) as usize;
    tracing::debug!("Clutch of {} {}", clutch_size, species.name);

    let parents = [parent1.id(), parent2.id()];
    let clutch = (0..clutch_size)
        .map(|_| {
            let genotype = offspring_genotype(parent1.genotype(), parent2.genotype(), prng);
            let sex = if prng.bool(0.5) { Sex::Female } else { Sex::Male };
            Snake::bred(species.id, sex, genotype, parents, now)
        })
        .collect();

    Ok(clutch)
}

/// One offspring genotype; genes missing from `parent2` inherit as wild
pub fn offspring_genotype(parent1: &Genotype, parent2: &Genotype, prng: &mut Prng) -> Genotype {
    let mut genotype = Genotype::new();
    for (gene, first) in parent1.iter() {
        let second = parent2.get(gene).copied().unwrap_or_else(AllelePair::wild);
        let from_first = draw_allele(first, prng);
        let from_second = draw_allele(&second, prng);
        genotype.insert(gene, AllelePair::new(from_first, from_second));
    }
    genotype
}

/// Uniform pick of one of the pair's two slots
fn draw_allele(pair: &AllelePair, prng: &mut Prng) -> Allele {
    let slot = prng.int(0, 1) as usize;
    pair.alleles()[slot]
}
