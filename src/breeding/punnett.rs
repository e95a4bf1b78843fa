//! Punnett prediction - offspring odds per gene, without building offspring

use serde::Serialize;

use crate::genetics::{het_genes, resolve_phenotype, AllelePair, GeneCatalog, Genotype, TraitId};

/// One possible allele pair for a gene and its chance
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OffspringOutcome {
    /// Normalized pair, mutant copies first
    pub pair: AllelePair,
    /// e.g. "albino/+"
    pub label: String,
    pub probability: f64,
    /// Trait this pair expresses on its own, if any
    pub expresses: Option<TraitId>,
    /// Hidden single copy of a recessive gene
    pub carrier: bool,
}

/// Outcome distribution for one gene
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenePrediction {
    pub gene: TraitId,
    pub outcomes: Vec<OffspringOutcome>,
}

impl GenePrediction {
    /// Sum over all outcomes; always 1.0 up to rounding
    pub fn total_probability(&self) -> f64 {
        self.outcomes.iter().map(|o| o.probability).sum()
    }

    pub fn probability_of(&self, label: &str) -> f64 {
        self.outcomes
            .iter()
            .filter(|o| o.label == label)
            .map(|o| o.probability)
            .sum()
    }
}

/// Per-gene offspring distributions for every gene both parents have
///
/// Each parent contributes either of its two alleles with equal chance, so
/// every gene has four equally likely combinations; identical pairs are
/// merged. Catalog genes come first in catalog order, then any shared genes
/// the catalog doesn't define.
pub fn predict_offspring(parent1: &Genotype, parent2: &Genotype, catalog: &GeneCatalog) -> Vec<GenePrediction> {
    let mut shared: Vec<TraitId> = catalog
        .genes()
        .iter()
        .map(|g| g.id)
        .filter(|id| parent1.contains(*id) && parent2.contains(*id))
        .collect();
    shared.extend(
        parent1
            .iter()
            .map(|(id, _)| id)
            .filter(|id| parent2.contains(*id) && catalog.gene(*id).is_none()),
    );

    shared
        .into_iter()
        .filter_map(|gene| {
            let first = parent1.get(gene)?;
            let second = parent2.get(gene)?;
            Some(predict_gene(gene, first, second, catalog))
        })
        .collect()
}

fn predict_gene(gene: TraitId, first: &AllelePair, second: &AllelePair, catalog: &GeneCatalog) -> GenePrediction {
    let mut outcomes: Vec<OffspringOutcome> = Vec::with_capacity(4);

    for a in first.alleles() {
        for b in second.alleles() {
            let pair = AllelePair::new(*a, *b).normalized();
            match outcomes.iter_mut().find(|o| o.pair == pair) {
                Some(existing) => existing.probability += 0.25,
                None => outcomes.push(describe(gene, pair, catalog)),
            }
        }
    }

    GenePrediction { gene, outcomes }
}

fn describe(gene: TraitId, pair: AllelePair, catalog: &GeneCatalog) -> OffspringOutcome {
    let genotype = Genotype::new().with(gene, pair);
    let phenotype = resolve_phenotype(&genotype, catalog);
    let carrier = !het_genes(&genotype, &phenotype, catalog).is_empty();

    OffspringOutcome {
        pair,
        label: pair.label(),
        probability: 0.25,
        expresses: phenotype.traits().first().copied(),
        carrier,
    }
}

/// Chance an offspring visibly expresses `id`, from a set of predictions
pub fn expression_odds(predictions: &[GenePrediction], id: TraitId) -> f64 {
    predictions
        .iter()
        .flat_map(|p| p.outcomes.iter())
        .filter(|o| o.expresses == Some(id))
        .map(|o| o.probability)
        .sum()
}
