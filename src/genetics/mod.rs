//! Gene data model and phenotype resolution
//!
//! A genotype maps genes to allele pairs. The catalog says how each gene's
//! pair is expressed, and the resolver turns the two into the ordered list of
//! visible traits that naming, pricing and breeding odds build on.

pub mod catalog;
pub mod genotype;
pub mod phenotype;
pub mod traits;

pub use catalog::{ComboMorph, GeneCatalog, GeneDefinition, SpeciesDefinition, SuperForm, UnlockRequirement};
pub use genotype::{Allele, AllelePair, Genotype};
pub use phenotype::{display_name, het_genes, matching_combo, resolve_phenotype, Phenotype, NORMAL};
pub use traits::{Inheritance, SpeciesId, TraitId};
