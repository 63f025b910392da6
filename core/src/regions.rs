//! Routing values for the Riot API hosts.
//!
//! Regional routes serve account-wide data (`americas.api.riotgames.com`),
//! platform routes serve game-specific data (`na1.api.riotgames.com`).

use std::fmt;
use std::str::FromStr;

/// Regional routing value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Region {
    Americas,
    Asia,
    Europe,
    Sea,
}

impl Region {
    pub const ALL: [Region; 4] = [Region::Americas, Region::Asia, Region::Europe, Region::Sea];

    pub fn as_str(&self) -> &'static str {
        match self {
            Region::Americas => "americas",
            Region::Asia => "asia",
            Region::Europe => "europe",
            Region::Sea => "sea",
        }
    }
}

/// Platform routing value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Platform {
    Br1,
    La1,
    La2,
    Na1,
    Jp1,
    Kr,
    Eun1,
    Euw1,
    Tr1,
    Ru,
    Oc1,
    Ph2,
    Sg2,
    Th2,
    Tw2,
    Vn2,
}

impl Platform {
    pub const ALL: [Platform; 16] = [
        Platform::Br1,
        Platform::La1,
        Platform::La2,
        Platform::Na1,
        Platform::Jp1,
        Platform::Kr,
        Platform::Eun1,
        Platform::Euw1,
        Platform::Tr1,
        Platform::Ru,
        Platform::Oc1,
        Platform::Ph2,
        Platform::Sg2,
        Platform::Th2,
        Platform::Tw2,
        Platform::Vn2,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Br1 => "br1",
            Platform::La1 => "la1",
            Platform::La2 => "la2",
            Platform::Na1 => "na1",
            Platform::Jp1 => "jp1",
            Platform::Kr => "kr",
            Platform::Eun1 => "eun1",
            Platform::Euw1 => "euw1",
            Platform::Tr1 => "tr1",
            Platform::Ru => "ru",
            Platform::Oc1 => "oc1",
            Platform::Ph2 => "ph2",
            Platform::Sg2 => "sg2",
            Platform::Th2 => "th2",
            Platform::Tw2 => "tw2",
            Platform::Vn2 => "vn2",
        }
    }

    /// The regional route that serves account data for this platform.
    pub fn region(&self) -> Region {
        match self {
            Platform::Br1 | Platform::La1 | Platform::La2 | Platform::Na1 => Region::Americas,
            Platform::Jp1 | Platform::Kr => Region::Asia,
            Platform::Eun1 | Platform::Euw1 | Platform::Tr1 | Platform::Ru => Region::Europe,
            Platform::Oc1
            | Platform::Ph2
            | Platform::Sg2
            | Platform::Th2
            | Platform::Tw2
            | Platform::Vn2 => Region::Sea,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown routing value: {0}")]
pub struct UnknownRoute(pub String);

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Region {
    type Err = UnknownRoute;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Region::ALL
            .into_iter()
            .find(|region| region.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownRoute(s.to_string()))
    }
}

impl FromStr for Platform {
    type Err = UnknownRoute;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Platform::ALL
            .into_iter()
            .find(|platform| platform.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownRoute(s.to_string()))
    }
}
