//! Phenotype resolution - which traits a genotype visibly expresses
//!
//! Everything here is a pure function of genotype + catalog. Bad input never
//! fails; it just expresses nothing.

use serde::Serialize;

use crate::genetics::{ComboMorph, GeneCatalog, Genotype, Inheritance, TraitId};

/// Display name of a snake with no expressed traits
pub const NORMAL: &str = "Normal";

/// Expressed traits in catalog order
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
pub struct Phenotype(Vec<TraitId>);

impl Phenotype {
    pub fn traits(&self) -> &[TraitId] {
        &self.0
    }

    pub fn contains(&self, id: TraitId) -> bool {
        self.0.contains(&id)
    }

    /// True when every trait in `required` is expressed
    pub fn contains_all(&self, required: &[TraitId]) -> bool {
        required.iter().all(|id| self.contains(*id))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<TraitId>> for Phenotype {
    fn from(traits: Vec<TraitId>) -> Self {
        Self(traits)
    }
}

/// Resolve the traits a genotype expresses
///
/// Genes are visited in catalog order, which is also the order of the result.
/// Genes the catalog doesn't know are skipped.
pub fn resolve_phenotype(genotype: &Genotype, catalog: &GeneCatalog) -> Phenotype {
    let mut traits = Vec::new();

    for gene in catalog.genes() {
        let Some(pair) = genotype.get(gene.id) else {
            continue;
        };

        match gene.inheritance {
            Inheritance::Recessive => {
                if pair.copies_of(gene.id) == 2 {
                    traits.push(gene.id);
                }
            }
            Inheritance::IncompleteDominant => match pair.non_wild_count() {
                1 => traits.push(gene.id),
                2 => {
                    // Super form replaces the base trait; without one, fall back to the base
                    let id = gene.super_form.as_ref().map(|s| s.id).unwrap_or(gene.id);
                    traits.push(id);
                }
                _ => {}
            },
            Inheritance::Dominant | Inheritance::Polygenic => {
                if pair.non_wild_count() > 0 {
                    traits.push(gene.id);
                }
            }
        }
    }

    Phenotype(traits)
}

/// Recessive genes carried as a single hidden copy
pub fn het_genes(genotype: &Genotype, phenotype: &Phenotype, catalog: &GeneCatalog) -> Vec<TraitId> {
    catalog
        .genes()
        .iter()
        .filter(|gene| gene.inheritance == Inheritance::Recessive)
        .filter(|gene| !phenotype.contains(gene.id))
        .filter(|gene| {
            genotype
                .get(gene.id)
                .is_some_and(|pair| pair.copies_of(gene.id) == 1)
        })
        .map(|gene| gene.id)
        .collect()
}

/// First combo morph, in catalog order, fully satisfied by the phenotype
pub fn matching_combo<'a>(phenotype: &Phenotype, catalog: &'a GeneCatalog) -> Option<&'a ComboMorph> {
    if phenotype.is_empty() {
        return None;
    }
    catalog
        .combos()
        .iter()
        .find(|combo| phenotype.contains_all(&combo.requires))
}

/// Name shown for a phenotype: combo name, else trait names, else "Normal"
pub fn display_name(phenotype: &Phenotype, catalog: &GeneCatalog) -> String {
    if phenotype.is_empty() {
        return NORMAL.to_string();
    }

    if let Some(combo) = matching_combo(phenotype, catalog) {
        return combo.name.clone();
    }

    phenotype
        .traits()
        .iter()
        .map(|id| catalog.trait_name(*id).unwrap_or(id.as_str()))
        .collect::<Vec<_>>()
        .join(" ")
}
