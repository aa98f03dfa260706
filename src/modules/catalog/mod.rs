pub mod config;
pub mod infrastructure;

pub use config::CatalogConfig;
pub use infrastructure::{PokeTcgClient, SearchCache};
