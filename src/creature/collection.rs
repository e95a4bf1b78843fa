//! Collection - the snakes a player owns

use ahash::AHashMap;
use chrono::{DateTime, Utc};
use rayon::prelude::*;

use crate::breeding;
use crate::core::config::PricingRules;
use crate::core::error::{GeneticsError, Result};
use crate::core::types::CreatureId;
use crate::genetics::{GeneCatalog, SpeciesId, UnlockRequirement};
use crate::rng::Prng;
use crate::valuation::{appraise, calculate_price, Appraisal};

use super::Snake;

/// Owned snakes in acquisition order, indexed by id
#[derive(Debug, Clone, Default)]
pub struct Collection {
    snakes: Vec<Snake>,
    index: AHashMap<CreatureId, usize>,
}

impl Collection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from snakes in order; a repeated id keeps the later snake
    pub fn from_snakes(snakes: Vec<Snake>) -> Self {
        let mut collection = Self::new();
        for snake in snakes {
            collection.add(snake);
        }
        collection
    }

    /// Add a snake, replacing any snake with the same id in place
    pub fn add(&mut self, snake: Snake) -> CreatureId {
        let id = snake.id();
        match self.index.get(&id) {
            Some(&i) => self.snakes[i] = snake,
            None => {
                self.index.insert(id, self.snakes.len());
                self.snakes.push(snake);
            }
        }
        id
    }

    pub fn get(&self, id: CreatureId) -> Option<&Snake> {
        self.index.get(&id).map(|&i| &self.snakes[i])
    }

    pub fn get_mut(&mut self, id: CreatureId) -> Option<&mut Snake> {
        self.index.get(&id).map(|&i| &mut self.snakes[i])
    }

    /// Remove a snake (sold, released), keeping the order of the rest
    pub fn remove(&mut self, id: CreatureId) -> Option<Snake> {
        let i = self.index.remove(&id)?;
        let snake = self.snakes.remove(i);
        for slot in self.index.values_mut() {
            if *slot > i {
                *slot -= 1;
            }
        }
        Some(snake)
    }

    pub fn len(&self) -> usize {
        self.snakes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snakes.is_empty()
    }

    pub fn snakes(&self) -> &[Snake] {
        &self.snakes
    }

    pub fn into_snakes(self) -> Vec<Snake> {
        self.snakes
    }

    /// Breed two owned snakes and keep the whole clutch
    ///
    /// Both parents get a clutch counted and every hatchling joins the
    /// collection. On error nothing changes. Returns the hatchling ids.
    /// Pairing a snake with itself is rejected.
    pub fn breed(
        &mut self,
        first: CreatureId,
        second: CreatureId,
        catalog: &GeneCatalog,
        prng: &mut Prng,
        now: DateTime<Utc>,
    ) -> Result<Vec<CreatureId>> {
        if first == second {
            return Err(GeneticsError::SelfPairing(first));
        }
        let parent1 = self.get(first).ok_or(GeneticsError::CreatureNotFound(first))?;
        let parent2 = self.get(second).ok_or(GeneticsError::CreatureNotFound(second))?;
        let clutch = breeding::breed(parent1, parent2, catalog, prng, now)?;

        for parent in [first, second] {
            if let Some(snake) = self.get_mut(parent) {
                snake.record_clutch();
            }
        }

        let ids = clutch.into_iter().map(|baby| self.add(baby)).collect();
        Ok(ids)
    }

    /// Summed price of every snake
    pub fn total_value(&self, catalog: &GeneCatalog, rules: &PricingRules) -> u64 {
        self.snakes
            .par_iter()
            .map(|snake| calculate_price(snake, catalog, rules))
            .sum()
    }

    /// Appraisal of every snake, in collection order
    pub fn appraise_all(&self, catalog: &GeneCatalog, rules: &PricingRules) -> Vec<Appraisal> {
        self.snakes
            .par_iter()
            .map(|snake| appraise(snake, catalog, rules))
            .collect()
    }

    /// Species whose unlock requirement this collection meets, in catalog order
    pub fn unlocked_species(&self, catalog: &GeneCatalog, rules: &PricingRules) -> Vec<SpeciesId> {
        let mut value = None;
        let mut unlocked = Vec::new();

        for species in catalog.all_species() {
            let open = match species.unlock {
                None => true,
                Some(UnlockRequirement::OwnedSnakes(n)) => self.len() >= n,
                Some(UnlockRequirement::CollectionValue(v)) => {
                    *value.get_or_insert_with(|| self.total_value(catalog, rules)) >= v
                }
            };
            if open {
                unlocked.push(species.id);
            }
        }
        unlocked
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::Sex;
    use crate::genetics::{AllelePair, Genotype, TraitId};

    fn western(sex: Sex, genotype: Genotype) -> Snake {
        Snake::wild(SpeciesId::WesternHognose, sex, genotype, Utc::now())
    }

    #[test]
    fn test_add_get_remove_keeps_order() {
        let mut collection = Collection::new();
        let a = collection.add(western(Sex::Male, Genotype::new()));
        let b = collection.add(western(Sex::Female, Genotype::new()));
        let c = collection.add(western(Sex::Male, Genotype::new()));

        assert_eq!(collection.len(), 3);
        assert!(collection.remove(b).is_some());
        assert!(collection.get(b).is_none());
        assert_eq!(collection.get(c).map(|s| s.id()), Some(c));

        let order: Vec<CreatureId> = collection.snakes().iter().map(|s| s.id()).collect();
        assert_eq!(order, vec![a, c]);
        assert!(collection.remove(b).is_none());
    }

    #[test]
    fn test_breed_updates_parents_and_adds_clutch() {
        let catalog = GeneCatalog::with_defaults();
        let mut collection = Collection::new();
        let het = Genotype::new().with(TraitId::Albino, AllelePair::het(TraitId::Albino));
        let male = collection.add(western(Sex::Male, het.clone()));
        let female = collection.add(western(Sex::Female, het));

        let clutch = collection
            .breed(male, female, &catalog, &mut Prng::new(11), Utc::now())
            .unwrap();

        assert!((8..=25).contains(&clutch.len()));
        assert_eq!(collection.len(), 2 + clutch.len());
        assert_eq!(collection.get(male).unwrap().stats().clutches_produced, 1);
        assert_eq!(collection.get(female).unwrap().stats().clutches_produced, 1);
        for id in &clutch {
            assert_eq!(collection.get(*id).unwrap().parent_ids(), Some([male, female]));
        }
    }

    #[test]
    fn test_breed_missing_parent() {
        let catalog = GeneCatalog::with_defaults();
        let mut collection = Collection::new();
        let male = collection.add(western(Sex::Male, Genotype::new()));
        let ghost = CreatureId::new();

        let result = collection.breed(male, ghost, &catalog, &mut Prng::new(1), Utc::now());
        assert!(matches!(result, Err(GeneticsError::CreatureNotFound(id)) if id == ghost));
        assert_eq!(collection.get(male).unwrap().stats().clutches_produced, 0);
    }

    #[test]
    fn test_breed_with_itself_is_rejected() {
        let catalog = GeneCatalog::with_defaults();
        let mut collection = Collection::new();
        let female = collection.add(western(Sex::Female, Genotype::new()));
        let mut prng = Prng::new(1);

        let result = collection.breed(female, female, &catalog, &mut prng, Utc::now());
        assert!(matches!(result, Err(GeneticsError::SelfPairing(id)) if id == female));
        assert_eq!(collection.len(), 1);
        assert_eq!(collection.get(female).unwrap().stats().clutches_produced, 0);
        assert_eq!(prng.state(), Prng::new(1).state());
    }

    #[test]
    fn test_breed_species_mismatch_leaves_collection_untouched() {
        let catalog = GeneCatalog::with_defaults();
        let mut collection = Collection::new();
        let male = collection.add(western(Sex::Male, Genotype::new()));
        let female = collection.add(Snake::wild(
            SpeciesId::EasternHognose,
            Sex::Female,
            Genotype::new(),
            Utc::now(),
        ));

        let result = collection.breed(male, female, &catalog, &mut Prng::new(1), Utc::now());
        assert!(matches!(result, Err(GeneticsError::SpeciesMismatch { .. })));
        assert_eq!(collection.len(), 2);
        assert_eq!(collection.get(male).unwrap().stats().clutches_produced, 0);
    }

    #[test]
    fn test_total_value_and_appraisals() {
        let catalog = GeneCatalog::with_defaults();
        let rules = PricingRules::default();
        let mut collection = Collection::new();
        collection.add(western(Sex::Male, Genotype::new()));
        collection.add(western(Sex::Female, Genotype::new()));

        assert_eq!(collection.total_value(&catalog, &rules), 150 + 180);
        let prices: Vec<u64> = collection
            .appraise_all(&catalog, &rules)
            .iter()
            .map(|a| a.price)
            .collect();
        assert_eq!(prices, vec![150, 180]);
    }

    #[test]
    fn test_unlocks_follow_requirements() {
        let catalog = GeneCatalog::with_defaults();
        let rules = PricingRules::default();
        let mut collection = Collection::new();
        assert_eq!(collection.unlocked_species(&catalog, &rules), vec![SpeciesId::WesternHognose]);

        for _ in 0..5 {
            collection.add(western(Sex::Male, Genotype::new()));
        }
        assert_eq!(
            collection.unlocked_species(&catalog, &rules),
            vec![SpeciesId::WesternHognose, SpeciesId::EasternHognose]
        );

        let lemon = Genotype::new().with(TraitId::LemonGhost, AllelePair::homozygous(TraitId::LemonGhost));
        for _ in 0..20 {
            collection.add(western(Sex::Male, lemon.clone()));
        }
        assert!(collection
            .unlocked_species(&catalog, &rules)
            .contains(&SpeciesId::SouthernHognose));
    }
}
