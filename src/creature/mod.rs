//! Creatures - individual snakes and the collections that own them

pub mod collection;
pub mod snake;

pub use collection::Collection;
pub use snake::{Snake, SnakeStats};
