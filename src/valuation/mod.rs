//! Valuation - turning phenotype into price and rarity tier

pub mod appraisal;
pub mod pricing;

pub use appraisal::{appraise, Appraisal};
pub use pricing::{calculate_price, price_from_factors, rarity_tier, PriceFactors};
