//! Runtime catalog and tuning loaded from TOML

mod loader;

pub use loader::{
    load_catalog, load_pricing, load_world_settings, parse_catalog, parse_pricing, parse_world_settings,
    WorldSettings,
};
