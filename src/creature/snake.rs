//! Snake - one owned or encountered creature

use std::borrow::Cow;
use std::sync::OnceLock;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::types::{CreatureId, Origin, Sex};
use crate::genetics::{
    display_name, het_genes, resolve_phenotype, GeneCatalog, Genotype, Phenotype, SpeciesId, TraitId,
};

/// Mutable condition of a snake
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnakeStats {
    /// Health (0.0-1.0, default 1.0)
    pub health: f32,
    /// Fertility (0.0-1.0, default 1.0)
    pub fertility: f32,
    /// Clutches this snake has parented
    pub clutches_produced: u32,
}

impl Default for SnakeStats {
    fn default() -> Self {
        Self {
            health: 1.0,
            fertility: 1.0,
            clutches_produced: 0,
        }
    }
}

/// A snake and its genetic identity
///
/// The genotype is fixed at construction, so the phenotype is resolved once
/// and cached alongside the fingerprint of the catalog it came from. The
/// cache is never persisted; a reloaded snake re-resolves against whatever
/// catalog it is queried with.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snake {
    id: CreatureId,
    species: SpeciesId,
    sex: Sex,
    genotype: Genotype,
    origin: Origin,
    #[serde(default)]
    parent_ids: Option<[CreatureId; 2]>,
    birth_date: DateTime<Utc>,
    #[serde(default)]
    stats: SnakeStats,
    #[serde(skip)]
    phenotype: OnceLock<(u64, Phenotype)>,
}

impl Snake {
    fn build(
        species: SpeciesId,
        sex: Sex,
        genotype: Genotype,
        origin: Origin,
        parent_ids: Option<[CreatureId; 2]>,
        birth_date: DateTime<Utc>,
    ) -> Self {
        Self {
            id: CreatureId::new(),
            species,
            sex,
            genotype,
            origin,
            parent_ids,
            birth_date,
            stats: SnakeStats::default(),
            phenotype: OnceLock::new(),
        }
    }

    /// A snake caught in the world
    pub fn wild(species: SpeciesId, sex: Sex, genotype: Genotype, birth_date: DateTime<Utc>) -> Self {
        Self::build(species, sex, genotype, Origin::Wild, None, birth_date)
    }

    /// A snake bought from a shop
    pub fn purchased(species: SpeciesId, sex: Sex, genotype: Genotype, birth_date: DateTime<Utc>) -> Self {
        Self::build(species, sex, genotype, Origin::Purchased, None, birth_date)
    }

    /// A snake hatched from a clutch of two known parents
    pub fn bred(
        species: SpeciesId,
        sex: Sex,
        genotype: Genotype,
        parents: [CreatureId; 2],
        birth_date: DateTime<Utc>,
    ) -> Self {
        Self::build(species, sex, genotype, Origin::Bred, Some(parents), birth_date)
    }

    pub fn id(&self) -> CreatureId {
        self.id
    }

    pub fn species(&self) -> SpeciesId {
        self.species
    }

    pub fn sex(&self) -> Sex {
        self.sex
    }

    pub fn genotype(&self) -> &Genotype {
        &self.genotype
    }

    pub fn origin(&self) -> Origin {
        self.origin
    }

    pub fn parent_ids(&self) -> Option<[CreatureId; 2]> {
        self.parent_ids
    }

    pub fn birth_date(&self) -> DateTime<Utc> {
        self.birth_date
    }

    pub fn stats(&self) -> &SnakeStats {
        &self.stats
    }

    pub fn stats_mut(&mut self) -> &mut SnakeStats {
        &mut self.stats
    }

    /// Count one more clutch for this snake
    pub fn record_clutch(&mut self) {
        self.stats.clutches_produced += 1;
    }

    /// Expressed traits, resolved on first use
    ///
    /// The first catalog passed in is cached. A catalog with different
    /// expression rules gets a freshly resolved phenotype instead.
    pub fn phenotype(&self, catalog: &GeneCatalog) -> Cow<'_, Phenotype> {
        let fingerprint = catalog.expression_fingerprint();
        let (cached_for, phenotype) = self
            .phenotype
            .get_or_init(|| (fingerprint, resolve_phenotype(&self.genotype, catalog)));
        if *cached_for == fingerprint {
            Cow::Borrowed(phenotype)
        } else {
            tracing::trace!("Phenotype cache for {:?} built from another catalog", self.id);
            Cow::Owned(resolve_phenotype(&self.genotype, catalog))
        }
    }

    pub fn het_genes(&self, catalog: &GeneCatalog) -> Vec<TraitId> {
        het_genes(&self.genotype, &self.phenotype(catalog), catalog)
    }

    pub fn display_name(&self, catalog: &GeneCatalog) -> String {
        display_name(&self.phenotype(catalog), catalog)
    }
}

/// Equality over durable identity; the phenotype cache is ignored
impl PartialEq for Snake {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
            && self.species == other.species
            && self.sex == other.sex
            && self.genotype == other.genotype
            && self.origin == other.origin
            && self.parent_ids == other.parent_ids
            && self.birth_date == other.birth_date
            && self.stats == other.stats
    }
}
