//! Adjacency graph for the standard conquest map.
//!
//! Each territory has a static slice of neighbors. The graph is undirected
//! and symmetric: if A lists B then B lists A. Territories connect across
//! continent boundaries (e.g. Alaska-Kamchatka, Brazil-North Africa), so
//! the full graph is a single connected component.

use super::territory::{Territory, TERRITORY_COUNT};

/// Alias territory names for readability in the table below.
use Territory::*;

/// Total number of directed adjacency entries (twice the undirected edge count).
pub const ADJACENCY_COUNT: usize = 166;

/// Neighbor table: index by `Territory as usize`.
///
/// Entries are grouped by continent in map order; each slice lists the
/// territory's neighbors in no particular order.
static NEIGHBORS: [&[Territory]; TERRITORY_COUNT] = [
    // 0: Afghanistan
    &[Ukraine, Ural, China, India, MiddleEast],
    // 1: Alaska
    &[NorthwestTerritory, Alberta, Kamchatka],
    // 2: Alberta
    &[Alaska, NorthwestTerritory, Ontario, WesternUnitedStates],
    // 3: Argentina
    &[Peru, Brazil],
    // 4: Brazil
    &[Venezuela, Peru, Argentina, NorthAfrica],
    // 5: Central America
    &[WesternUnitedStates, EasternUnitedStates, Venezuela],
    // 6: China
    &[Ural, Siberia, Mongolia, Siam, India, Afghanistan],
    // 7: Congo
    &[NorthAfrica, EastAfrica, SouthAfrica],
    // 8: East Africa
    &[Egypt, MiddleEast, Madagascar, SouthAfrica, Congo, NorthAfrica],
    // 9: Eastern Australia
    &[WesternAustralia, NewGuinea],
    // 10: Eastern United States
    &[Quebec, Ontario, WesternUnitedStates, CentralAmerica],
    // 11: Egypt
    &[NorthAfrica, SouthernEurope, MiddleEast, EastAfrica],
    // 12: Great Britain
    &[Iceland, Scandinavia, NorthernEurope, WesternEurope],
    // 13: Greenland
    &[NorthwestTerritory, Ontario, Quebec, Iceland],
    // 14: Iceland
    &[Greenland, GreatBritain, Scandinavia],
    // 15: India
    &[Afghanistan, China, Siam, MiddleEast],
    // 16: Indonesia
    &[Siam, NewGuinea, WesternAustralia],
    // 17: Irkutsk
    &[Siberia, Yakutsk, Kamchatka, Mongolia],
    // 18: Japan
    &[Kamchatka, Mongolia],
    // 19: Kamchatka
    &[Yakutsk, Irkutsk, Mongolia, Japan, Alaska],
    // 20: Madagascar
    &[EastAfrica, SouthAfrica],
    // 21: Middle East
    &[Ukraine, Afghanistan, India, EastAfrica, Egypt, SouthernEurope],
    // 22: Mongolia
    &[Siberia, Irkutsk, Kamchatka, Japan, China],
    // 23: New Guinea
    &[Indonesia, WesternAustralia, EasternAustralia],
    // 24: North Africa
    &[Brazil, WesternEurope, SouthernEurope, Egypt, EastAfrica, Congo],
    // 25: Northern Europe
    &[GreatBritain, Scandinavia, Ukraine, SouthernEurope, WesternEurope],
    // 26: Northwest Territory
    &[Alaska, Alberta, Ontario, Greenland],
    // 27: Ontario
    &[NorthwestTerritory, Alberta, Quebec, WesternUnitedStates, EasternUnitedStates, Greenland],
    // 28: Peru
    &[Venezuela, Brazil, Argentina],
    // 29: Quebec
    &[Ontario, Greenland, EasternUnitedStates],
    // 30: Scandinavia
    &[Iceland, GreatBritain, NorthernEurope, Ukraine],
    // 31: Siam
    &[India, China, Indonesia],
    // 32: Siberia
    &[Ural, Yakutsk, Irkutsk, Mongolia, China],
    // 33: South Africa
    &[Congo, EastAfrica, Madagascar],
    // 34: Southern Europe
    &[WesternEurope, NorthernEurope, Ukraine, MiddleEast, Egypt, NorthAfrica],
    // 35: Ukraine
    &[Scandinavia, Ural, Afghanistan, MiddleEast, SouthernEurope, NorthernEurope],
    // 36: Ural
    &[Ukraine, Siberia, Afghanistan, China],
    // 37: Venezuela
    &[CentralAmerica, Peru, Brazil],
    // 38: Western Australia
    &[Indonesia, NewGuinea, EasternAustralia],
    // 39: Western Europe
    &[GreatBritain, NorthernEurope, SouthernEurope, NorthAfrica],
    // 40: Western United States
    &[Alberta, Ontario, EasternUnitedStates, CentralAmerica],
    // 41: Yakutsk
    &[Siberia, Kamchatka, Irkutsk],
];

/// Returns the neighbors of a territory.
pub fn neighbors_of(territory: Territory) -> &'static [Territory] {
    NEIGHBORS[territory as usize]
}

/// Returns true if the two territories share a border.
pub fn is_adjacent(a: Territory, b: Territory) -> bool {
    NEIGHBORS[a as usize].contains(&b)
}
