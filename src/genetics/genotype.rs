//! Alleles, allele pairs and genotypes

use std::collections::BTreeMap;
use std::str::FromStr;

use serde::de::Deserializer;
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::genetics::TraitId;

/// One inherited copy of a gene
///
/// `Mutant` names the gene whose mutant allele this is. A pair normally only
/// holds its own gene's id, but foreign ids from bad data are kept and count
/// as non-wild.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Allele {
    Wild,
    Mutant(TraitId),
}

impl Allele {
    pub fn is_wild(&self) -> bool {
        matches!(self, Allele::Wild)
    }

    /// Save-file spelling: "wild" or the gene key
    pub fn key(&self) -> &'static str {
        match self {
            Allele::Wild => "wild",
            Allele::Mutant(id) => id.as_str(),
        }
    }

    /// Compact spelling used in Punnett labels
    fn symbol(&self) -> &'static str {
        match self {
            Allele::Wild => "+",
            Allele::Mutant(id) => id.as_str(),
        }
    }
}

impl FromStr for Allele {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "+" | "wild" => Ok(Allele::Wild),
            other => other.parse::<TraitId>().map(Allele::Mutant),
        }
    }
}

impl Serialize for Allele {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.key())
    }
}

impl<'de> Deserialize<'de> for Allele {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Exactly two alleles for one gene; slot order carries no meaning
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AllelePair(pub [Allele; 2]);

impl AllelePair {
    pub fn new(first: Allele, second: Allele) -> Self {
        Self([first, second])
    }

    pub fn wild() -> Self {
        Self([Allele::Wild, Allele::Wild])
    }

    /// One mutant copy of `gene`
    pub fn het(gene: TraitId) -> Self {
        Self([Allele::Mutant(gene), Allele::Wild])
    }

    /// Two mutant copies of `gene`
    pub fn homozygous(gene: TraitId) -> Self {
        Self([Allele::Mutant(gene), Allele::Mutant(gene)])
    }

    pub fn alleles(&self) -> &[Allele; 2] {
        &self.0
    }

    /// Copies that are not wild, whatever gene they name
    pub fn non_wild_count(&self) -> usize {
        self.0.iter().filter(|a| !a.is_wild()).count()
    }

    /// Copies of exactly this gene's mutant allele
    pub fn copies_of(&self, gene: TraitId) -> usize {
        self.0.iter().filter(|a| **a == Allele::Mutant(gene)).count()
    }

    /// Canonical slot order: mutant copies first
    pub fn normalized(&self) -> Self {
        let [a, b] = self.0;
        if a >= b {
            Self([a, b])
        } else {
            Self([b, a])
        }
    }

    /// Human-readable form such as "albino/+"
    pub fn label(&self) -> String {
        let [a, b] = self.normalized().0;
        format!("{}/{}", a.symbol(), b.symbol())
    }
}

/// A creature's gene -> allele-pair mapping
///
/// Entries that could not be understood when loading (unknown gene key, wrong
/// arity, null or unreadable allele, a value that is not a list) are kept
/// verbatim in a side table so they survive a save round-trip, but nothing
/// ever computes with them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Genotype {
    genes: BTreeMap<TraitId, AllelePair>,
    unrecognized: BTreeMap<String, Value>,
}

impl Genotype {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    pub fn with(mut self, gene: TraitId, pair: AllelePair) -> Self {
        self.insert(gene, pair);
        self
    }

    pub fn insert(&mut self, gene: TraitId, pair: AllelePair) {
        self.unrecognized.remove(gene.as_str());
        self.genes.insert(gene, pair);
    }

    pub fn get(&self, gene: TraitId) -> Option<&AllelePair> {
        self.genes.get(&gene)
    }

    pub fn contains(&self, gene: TraitId) -> bool {
        self.genes.contains_key(&gene)
    }

    pub fn iter(&self) -> impl Iterator<Item = (TraitId, &AllelePair)> {
        self.genes.iter().map(|(id, pair)| (*id, pair))
    }

    pub fn len(&self) -> usize {
        self.genes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.genes.is_empty()
    }

    /// Raw entries preserved from save data but ignored by every computation
    pub fn unrecognized(&self) -> &BTreeMap<String, Value> {
        &self.unrecognized
    }

    /// Build from raw save values, sorting malformed entries aside
    pub fn from_raw(raw: BTreeMap<String, Value>) -> Self {
        let mut genotype = Self::new();
        for (key, value) in raw {
            match parse_entry(&key, &value) {
                Some((gene, pair)) => {
                    genotype.genes.insert(gene, pair);
                }
                None => {
                    tracing::debug!("Keeping unrecognized genotype entry '{}' = {}", key, value);
                    genotype.unrecognized.insert(key, value);
                }
            }
        }
        genotype
    }
}

fn parse_entry(key: &str, value: &Value) -> Option<(TraitId, AllelePair)> {
    let gene = key.parse::<TraitId>().ok()?;
    match value.as_array()?.as_slice() {
        [a, b] => {
            let first = a.as_str()?.parse().ok()?;
            let second = b.as_str()?.parse().ok()?;
            Some((gene, AllelePair::new(first, second)))
        }
        _ => None,
    }
}

impl Serialize for Genotype {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.genes.len() + self.unrecognized.len()))?;
        for (gene, pair) in &self.genes {
            map.serialize_entry(gene.as_str(), pair)?;
        }
        for (key, value) in &self.unrecognized {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Genotype {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = BTreeMap::<String, Value>::deserialize(deserializer)?;
        Ok(Genotype::from_raw(raw))
    }
}
