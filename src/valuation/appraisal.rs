//! Appraisal - everything presentation code shows for one snake

use serde::Serialize;

use crate::core::config::PricingRules;
use crate::core::types::{CreatureId, Rarity};
use crate::creature::Snake;
use crate::genetics::{GeneCatalog, TraitId};
use crate::valuation::pricing::{calculate_price, rarity_tier};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Appraisal {
    pub id: CreatureId,
    pub display_name: String,
    pub traits: Vec<TraitId>,
    pub het_genes: Vec<TraitId>,
    pub price: u64,
    pub tier: Rarity,
}

pub fn appraise(snake: &Snake, catalog: &GeneCatalog, rules: &PricingRules) -> Appraisal {
    let price = calculate_price(snake, catalog, rules);
    Appraisal {
        id: snake.id(),
        display_name: snake.display_name(catalog),
        traits: snake.phenotype(catalog).traits().to_vec(),
        het_genes: snake.het_genes(catalog),
        price,
        tier: rarity_tier(price, rules),
    }
}
