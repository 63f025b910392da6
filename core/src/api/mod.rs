//! Endpoint wrappers, grouped the way the Riot API routes them.
//!
//! Each wrapper fixes the endpoint path and its diagnostic tag, then hands
//! the request to the shared [`Client`] pipeline.

pub mod account;
pub mod champion;
pub mod championmastery;

use crate::client::{Client, ClientConfig};
use crate::regions::{Platform, Region};

/// APIs served from a regional route, e.g. `europe.api.riotgames.com`.
#[derive(Debug, Clone)]
pub struct RegionClient {
    pub account: account::AccountClient,
}

impl RegionClient {
    pub fn new(region: Region, config: &ClientConfig) -> Self {
        let client = config.client(region);
        Self {
            account: account::AccountClient::new(client),
        }
    }
}

/// APIs served from a platform route, e.g. `euw1.api.riotgames.com`.
#[derive(Debug, Clone)]
pub struct PlatformClient {
    pub champion: champion::ChampionClient,
    pub champion_mastery: championmastery::ChampionMasteryClient,
}

impl PlatformClient {
    pub fn new(platform: Platform, config: &ClientConfig) -> Self {
        let client = config.client(platform);
        Self {
            champion: champion::ChampionClient::new(client.clone()),
            champion_mastery: championmastery::ChampionMasteryClient::new(client),
        }
    }
}

/// Percent-encodes one path segment.
pub(crate) fn segment(value: &str) -> std::borrow::Cow<'_, str> {
    urlencoding::encode(value)
}
