//! Trait and species identifiers
//!
//! Gene ids and super-form ids share one closed enumeration so a phenotype
//! can hold either. Anything outside this set is unknown and gets skipped.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Expressible trait: a gene, or the super form of an incomplete-dominant gene
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TraitId {
    // === RECESSIVE ===
    Albino,
    Axanthic,
    Toffee,
    Lavender,
    PinkPastel,
    Sable,
    LemonGhost,

    // === INCOMPLETE DOMINANT ===
    Anaconda,
    Arctic,
    Frosted,

    // === DOMINANT ===
    Pastel,
    Melanistic,

    // === POLYGENIC ===
    ExtremeRed,
    Patternless,

    // === SUPER FORMS ===
    Superconda,
    SuperArctic,
    SuperFrosted,
}

impl TraitId {
    pub const ALL: [TraitId; 17] = [
        TraitId::Albino,
        TraitId::Axanthic,
        TraitId::Toffee,
        TraitId::Lavender,
        TraitId::PinkPastel,
        TraitId::Sable,
        TraitId::LemonGhost,
        TraitId::Anaconda,
        TraitId::Arctic,
        TraitId::Frosted,
        TraitId::Pastel,
        TraitId::Melanistic,
        TraitId::ExtremeRed,
        TraitId::Patternless,
        TraitId::Superconda,
        TraitId::SuperArctic,
        TraitId::SuperFrosted,
    ];

    /// Stable key used in save files and catalog data
    pub fn as_str(&self) -> &'static str {
        match self {
            TraitId::Albino => "albino",
            TraitId::Axanthic => "axanthic",
            TraitId::Toffee => "toffee",
            TraitId::Lavender => "lavender",
            TraitId::PinkPastel => "pink_pastel",
            TraitId::Sable => "sable",
            TraitId::LemonGhost => "lemon_ghost",
            TraitId::Anaconda => "anaconda",
            TraitId::Arctic => "arctic",
            TraitId::Frosted => "frosted",
            TraitId::Pastel => "pastel",
            TraitId::Melanistic => "melanistic",
            TraitId::ExtremeRed => "extreme_red",
            TraitId::Patternless => "patternless",
            TraitId::Superconda => "superconda",
            TraitId::SuperArctic => "super_arctic",
            TraitId::SuperFrosted => "super_frosted",
        }
    }
}

impl FromStr for TraitId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TraitId::ALL
            .iter()
            .copied()
            .find(|id| id.as_str() == s)
            .ok_or_else(|| format!("unknown trait id '{}'", s))
    }
}

impl std::fmt::Display for TraitId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a gene's two alleles map to expression
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Inheritance {
    /// Visible only with two copies of the mutant allele
    Recessive,
    /// One copy shows the gene, two copies show its super form
    IncompleteDominant,
    /// Visible with any mutant copy
    Dominant,
    /// Expressed like dominant; kept apart for graded intensity later
    Polygenic,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpeciesId {
    WesternHognose,
    EasternHognose,
    SouthernHognose,
}

impl SpeciesId {
    pub const ALL: [SpeciesId; 3] = [
        SpeciesId::WesternHognose,
        SpeciesId::EasternHognose,
        SpeciesId::SouthernHognose,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SpeciesId::WesternHognose => "western_hognose",
            SpeciesId::EasternHognose => "eastern_hognose",
            SpeciesId::SouthernHognose => "southern_hognose",
        }
    }
}

impl FromStr for SpeciesId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SpeciesId::ALL
            .iter()
            .copied()
            .find(|id| id.as_str() == s)
            .ok_or_else(|| format!("unknown species id '{}'", s))
    }
}

impl std::fmt::Display for SpeciesId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
