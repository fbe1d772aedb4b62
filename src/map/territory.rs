//! Territory and continent definitions for the standard conquest map.
//!
//! All 42 territories are enumerated in alphabetical order by their
//! kebab-case string id. Territory metadata (id, display name, continent)
//! is stored in a compile-time lookup table indexed by the `Territory`
//! enum discriminant, and continent metadata (bonus value, member
//! territories) in a parallel table indexed by `Continent`.

/// The number of territories on the standard map.
pub const TERRITORY_COUNT: usize = 42;

/// The number of continents on the standard map.
pub const CONTINENT_COUNT: usize = 6;

/// A territory on the standard conquest map.
///
/// Variants are in alphabetical order by string id.
/// The `#[repr(u8)]` attribute enables use as an array index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Territory {
    Afghanistan = 0,
    Alaska = 1,
    Alberta = 2,
    Argentina = 3,
    Brazil = 4,
    CentralAmerica = 5,
    China = 6,
    Congo = 7,
    EastAfrica = 8,
    EasternAustralia = 9,
    EasternUnitedStates = 10,
    Egypt = 11,
    GreatBritain = 12,
    Greenland = 13,
    Iceland = 14,
    India = 15,
    Indonesia = 16,
    Irkutsk = 17,
    Japan = 18,
    Kamchatka = 19,
    Madagascar = 20,
    MiddleEast = 21,
    Mongolia = 22,
    NewGuinea = 23,
    NorthAfrica = 24,
    NorthernEurope = 25,
    NorthwestTerritory = 26,
    Ontario = 27,
    Peru = 28,
    Quebec = 29,
    Scandinavia = 30,
    Siam = 31,
    Siberia = 32,
    SouthAfrica = 33,
    SouthernEurope = 34,
    Ukraine = 35,
    Ural = 36,
    Venezuela = 37,
    WesternAustralia = 38,
    WesternEurope = 39,
    WesternUnitedStates = 40,
    Yakutsk = 41,
}

/// All territory variants in index order.
pub const ALL_TERRITORIES: [Territory; TERRITORY_COUNT] = [
    Territory::Afghanistan,
    Territory::Alaska,
    Territory::Alberta,
    Territory::Argentina,
    Territory::Brazil,
    Territory::CentralAmerica,
    Territory::China,
    Territory::Congo,
    Territory::EastAfrica,
    Territory::EasternAustralia,
    Territory::EasternUnitedStates,
    Territory::Egypt,
    Territory::GreatBritain,
    Territory::Greenland,
    Territory::Iceland,
    Territory::India,
    Territory::Indonesia,
    Territory::Irkutsk,
    Territory::Japan,
    Territory::Kamchatka,
    Territory::Madagascar,
    Territory::MiddleEast,
    Territory::Mongolia,
    Territory::NewGuinea,
    Territory::NorthAfrica,
    Territory::NorthernEurope,
    Territory::NorthwestTerritory,
    Territory::Ontario,
    Territory::Peru,
    Territory::Quebec,
    Territory::Scandinavia,
    Territory::Siam,
    Territory::Siberia,
    Territory::SouthAfrica,
    Territory::SouthernEurope,
    Territory::Ukraine,
    Territory::Ural,
    Territory::Venezuela,
    Territory::WesternAustralia,
    Territory::WesternEurope,
    Territory::WesternUnitedStates,
    Territory::Yakutsk,
];

impl Territory {
    /// Returns the kebab-case string id for this territory.
    pub const fn id(self) -> &'static str {
        TERRITORY_INFO[self as usize].id
    }

    /// Returns the full display name for this territory.
    pub const fn name(self) -> &'static str {
        TERRITORY_INFO[self as usize].name
    }

    /// Returns the continent this territory belongs to.
    pub const fn continent(self) -> Continent {
        TERRITORY_INFO[self as usize].continent
    }

    /// Looks up a territory by its kebab-case string id.
    pub fn from_id(id: &str) -> Option<Territory> {
        ALL_TERRITORIES.iter().find(|t| t.id() == id).copied()
    }
}

/// A continent: a fixed grouping of territories granting a reinforcement
/// bonus when wholly controlled by one player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Continent {
    NorthAmerica = 0,
    SouthAmerica = 1,
    Europe = 2,
    Africa = 3,
    Asia = 4,
    Australia = 5,
}

/// All continent variants in index order.
pub const ALL_CONTINENTS: [Continent; CONTINENT_COUNT] = [
    Continent::NorthAmerica,
    Continent::SouthAmerica,
    Continent::Europe,
    Continent::Africa,
    Continent::Asia,
    Continent::Australia,
];

impl Continent {
    /// Returns the kebab-case string id for this continent.
    pub const fn id(self) -> &'static str {
        CONTINENT_INFO[self as usize].id
    }

    /// Returns the full display name for this continent.
    pub const fn name(self) -> &'static str {
        CONTINENT_INFO[self as usize].name
    }

    /// Returns the reinforcement bonus granted for full control.
    pub const fn bonus(self) -> u32 {
        CONTINENT_INFO[self as usize].bonus
    }

    /// Returns the member territories of this continent.
    pub const fn territories(self) -> &'static [Territory] {
        CONTINENT_INFO[self as usize].territories
    }

    /// Looks up a continent by its kebab-case string id.
    pub fn from_id(id: &str) -> Option<Continent> {
        ALL_CONTINENTS.iter().find(|c| c.id() == id).copied()
    }
}

/// Static metadata for a territory.
pub struct TerritoryInfo {
    pub id: &'static str,
    pub name: &'static str,
    pub continent: Continent,
}

/// Compile-time lookup table: index by `Territory as usize`.
pub static TERRITORY_INFO: [TerritoryInfo; TERRITORY_COUNT] = [
    // 0
    TerritoryInfo { id: "afghanistan", name: "Afghanistan", continent: Continent::Asia },
    // 1
    TerritoryInfo { id: "alaska", name: "Alaska", continent: Continent::NorthAmerica },
    // 2
    TerritoryInfo { id: "alberta", name: "Alberta", continent: Continent::NorthAmerica },
    // 3
    TerritoryInfo { id: "argentina", name: "Argentina", continent: Continent::SouthAmerica },
    // 4
    TerritoryInfo { id: "brazil", name: "Brazil", continent: Continent::SouthAmerica },
    // 5
    TerritoryInfo { id: "central-america", name: "Central America", continent: Continent::NorthAmerica },
    // 6
    TerritoryInfo { id: "china", name: "China", continent: Continent::Asia },
    // 7
    TerritoryInfo { id: "congo", name: "Congo", continent: Continent::Africa },
    // 8
    TerritoryInfo { id: "east-africa", name: "East Africa", continent: Continent::Africa },
    // 9
    TerritoryInfo { id: "eastern-australia", name: "Eastern Australia", continent: Continent::Australia },
    // 10
    TerritoryInfo { id: "eastern-united-states", name: "Eastern United States", continent: Continent::NorthAmerica },
    // 11
    TerritoryInfo { id: "egypt", name: "Egypt", continent: Continent::Africa },
    // 12
    TerritoryInfo { id: "great-britain", name: "Great Britain", continent: Continent::Europe },
    // 13
    TerritoryInfo { id: "greenland", name: "Greenland", continent: Continent::NorthAmerica },
    // 14
    TerritoryInfo { id: "iceland", name: "Iceland", continent: Continent::Europe },
    // 15
    TerritoryInfo { id: "india", name: "India", continent: Continent::Asia },
    // 16
    TerritoryInfo { id: "indonesia", name: "Indonesia", continent: Continent::Australia },
    // 17
    TerritoryInfo { id: "irkutsk", name: "Irkutsk", continent: Continent::Asia },
    // 18
    TerritoryInfo { id: "japan", name: "Japan", continent: Continent::Asia },
    // 19
    TerritoryInfo { id: "kamchatka", name: "Kamchatka", continent: Continent::Asia },
    // 20
    TerritoryInfo { id: "madagascar", name: "Madagascar", continent: Continent::Africa },
    // 21
    TerritoryInfo { id: "middle-east", name: "Middle East", continent: Continent::Asia },
    // 22
    TerritoryInfo { id: "mongolia", name: "Mongolia", continent: Continent::Asia },
    // 23
    TerritoryInfo { id: "new-guinea", name: "New Guinea", continent: Continent::Australia },
    // 24
    TerritoryInfo { id: "north-africa", name: "North Africa", continent: Continent::Africa },
    // 25
    TerritoryInfo { id: "northern-europe", name: "Northern Europe", continent: Continent::Europe },
    // 26
    TerritoryInfo { id: "northwest-territory", name: "Northwest Territory", continent: Continent::NorthAmerica },
    // 27
    TerritoryInfo { id: "ontario", name: "Ontario", continent: Continent::NorthAmerica },
    // 28
    TerritoryInfo { id: "peru", name: "Peru", continent: Continent::SouthAmerica },
    // 29
    TerritoryInfo { id: "quebec", name: "Quebec", continent: Continent::NorthAmerica },
    // 30
    TerritoryInfo { id: "scandinavia", name: "Scandinavia", continent: Continent::Europe },
    // 31
    TerritoryInfo { id: "siam", name: "Siam", continent: Continent::Asia },
    // 32
    TerritoryInfo { id: "siberia", name: "Siberia", continent: Continent::Asia },
    // 33
    TerritoryInfo { id: "south-africa", name: "South Africa", continent: Continent::Africa },
    // 34
    TerritoryInfo { id: "southern-europe", name: "Southern Europe", continent: Continent::Europe },
    // 35
    TerritoryInfo { id: "ukraine", name: "Ukraine", continent: Continent::Europe },
    // 36
    TerritoryInfo { id: "ural", name: "Ural", continent: Continent::Asia },
    // 37
    TerritoryInfo { id: "venezuela", name: "Venezuela", continent: Continent::SouthAmerica },
    // 38
    TerritoryInfo { id: "western-australia", name: "Western Australia", continent: Continent::Australia },
    // 39
    TerritoryInfo { id: "western-europe", name: "Western Europe", continent: Continent::Europe },
    // 40
    TerritoryInfo { id: "western-united-states", name: "Western United States", continent: Continent::NorthAmerica },
    // 41
    TerritoryInfo { id: "yakutsk", name: "Yakutsk", continent: Continent::Asia },
];

/// Static metadata for a continent.
pub struct ContinentInfo {
    pub id: &'static str,
    pub name: &'static str,
    pub bonus: u32,
    pub territories: &'static [Territory],
}

/// Compile-time lookup table: index by `Continent as usize`.
pub static CONTINENT_INFO: [ContinentInfo; CONTINENT_COUNT] = [
    ContinentInfo {
        id: "north-america",
        name: "North America",
        bonus: 5,
        territories: &[
            Territory::Alaska,
            Territory::Alberta,
            Territory::CentralAmerica,
            Territory::EasternUnitedStates,
            Territory::Greenland,
            Territory::NorthwestTerritory,
            Territory::Ontario,
            Territory::Quebec,
            Territory::WesternUnitedStates,
        ],
    },
    ContinentInfo {
        id: "south-america",
        name: "South America",
        bonus: 2,
        territories: &[
            Territory::Argentina,
            Territory::Brazil,
            Territory::Peru,
            Territory::Venezuela,
        ],
    },
    ContinentInfo {
        id: "europe",
        name: "Europe",
        bonus: 5,
        territories: &[
            Territory::GreatBritain,
            Territory::Iceland,
            Territory::NorthernEurope,
            Territory::Scandinavia,
            Territory::SouthernEurope,
            Territory::Ukraine,
            Territory::WesternEurope,
        ],
    },
    ContinentInfo {
        id: "africa",
        name: "Africa",
        bonus: 3,
        territories: &[
            Territory::Congo,
            Territory::EastAfrica,
            Territory::Egypt,
            Territory::Madagascar,
            Territory::NorthAfrica,
            Territory::SouthAfrica,
        ],
    },
    ContinentInfo {
        id: "asia",
        name: "Asia",
        bonus: 7,
        territories: &[
            Territory::Afghanistan,
            Territory::China,
            Territory::India,
            Territory::Irkutsk,
            Territory::Japan,
            Territory::Kamchatka,
            Territory::MiddleEast,
            Territory::Mongolia,
            Territory::Siam,
            Territory::Siberia,
            Territory::Ural,
            Territory::Yakutsk,
        ],
    },
    ContinentInfo {
        id: "australia",
        name: "Australia",
        bonus: 2,
        territories: &[
            Territory::EasternAustralia,
            Territory::Indonesia,
            Territory::NewGuinea,
            Territory::WesternAustralia,
        ],
    },
];
