//! ACCOUNT-V1: Riot accounts and the shards/regions they play on.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::segment;
use crate::client::Client;
use crate::context::Context;
use crate::error::Error;
use crate::options::{merge_options, PublicOption, RequestOption};

pub const METHOD_GET_ACTIVE_REGION_BY_PUUID: &str = "Account.GetActiveRegionByPUUID";
pub const METHOD_GET_ACTIVE_SHARD_BY_PUUID: &str = "Account.GetActiveShardByPUUID";
pub const METHOD_GET_BY_PUUID: &str = "Account.GetByPUUID";
pub const METHOD_GET_BY_RIOT_ID: &str = "Account.GetByRiotID";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub puuid: String,
    pub game_name: String,
    pub tag_line: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActiveShard {
    pub puuid: String,
    pub game: String,
    pub active_shard: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActiveRegion {
    pub puuid: String,
    pub game: String,
    pub region: String,
}

/// Games that report an active shard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShardGame {
    Valorant,
    LegendsOfRuneterra,
    TwoXko,
}

impl ShardGame {
    pub fn as_str(&self) -> &'static str {
        match self {
            ShardGame::Valorant => "val",
            ShardGame::LegendsOfRuneterra => "lor",
            ShardGame::TwoXko => "2xko",
        }
    }
}

impl fmt::Display for ShardGame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Games that report an active region.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegionGame {
    LeagueOfLegends,
    Teamfight,
}

impl RegionGame {
    pub fn as_str(&self) -> &'static str {
        match self {
            RegionGame::LeagueOfLegends => "lol",
            RegionGame::Teamfight => "tft",
        }
    }
}

impl fmt::Display for RegionGame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone)]
pub struct AccountClient {
    client: Client,
}

impl AccountClient {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &Client {
        &self.client
    }

    /// Looks up an account by game name and tag line.
    pub async fn get_by_riot_id(
        &self,
        ctx: &Context,
        game_name: &str,
        tag_line: &str,
        opts: &[PublicOption],
    ) -> Result<Account, Error> {
        let endpoint = format!(
            "/riot/account/v1/accounts/by-riot-id/{}/{}",
            segment(game_name),
            segment(tag_line)
        );
        self.get(ctx, &endpoint, METHOD_GET_BY_RIOT_ID, opts).await
    }

    pub async fn get_by_puuid(
        &self,
        ctx: &Context,
        puuid: &str,
        opts: &[PublicOption],
    ) -> Result<Account, Error> {
        let endpoint = format!("/riot/account/v1/accounts/by-puuid/{}", segment(puuid));
        self.get(ctx, &endpoint, METHOD_GET_BY_PUUID, opts).await
    }

    pub async fn get_active_shard_by_puuid(
        &self,
        ctx: &Context,
        game: ShardGame,
        puuid: &str,
        opts: &[PublicOption],
    ) -> Result<ActiveShard, Error> {
        let endpoint = format!(
            "/riot/account/v1/active-shards/by-game/{game}/by-puuid/{}",
            segment(puuid)
        );
        self.get(ctx, &endpoint, METHOD_GET_ACTIVE_SHARD_BY_PUUID, opts)
            .await
    }

    pub async fn get_active_region_by_puuid(
        &self,
        ctx: &Context,
        game: RegionGame,
        puuid: &str,
        opts: &[PublicOption],
    ) -> Result<ActiveRegion, Error> {
        let endpoint = format!(
            "/riot/account/v1/region/by-game/{game}/by-puuid/{}",
            segment(puuid)
        );
        self.get(ctx, &endpoint, METHOD_GET_ACTIVE_REGION_BY_PUUID, opts)
            .await
    }

    async fn get<T>(
        &self,
        ctx: &Context,
        endpoint: &str,
        method: &str,
        opts: &[PublicOption],
    ) -> Result<T, Error>
    where
        T: serde::de::DeserializeOwned,
    {
        let options = merge_options(vec![RequestOption::api_method(method)], opts);
        self.client
            .request(ctx, &self.client.url(endpoint), options)
            .await
    }
}
