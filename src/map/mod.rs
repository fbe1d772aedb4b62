//! Static map data.
//!
//! Contains the territory and continent definitions and the symmetric
//! adjacency graph. All data is compile-time `static`; nothing in this
//! module is mutable at runtime.

pub mod adjacency;
pub mod territory;

pub use adjacency::{is_adjacent, neighbors_of, ADJACENCY_COUNT};
pub use territory::{
    Continent, ContinentInfo, Territory, TerritoryInfo, ALL_CONTINENTS, ALL_TERRITORIES,
    CONTINENT_COUNT, CONTINENT_INFO, TERRITORY_COUNT, TERRITORY_INFO,
};
