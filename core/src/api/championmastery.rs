//! CHAMPION-MASTERY-V4: per-champion mastery for a player.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::segment;
use crate::client::Client;
use crate::context::Context;
use crate::error::Error;
use crate::options::{merge_options, PublicOption, RequestOption};

pub const METHOD_GET_BY_PUUID: &str = "ChampionMastery.GetByPUUID";
pub const METHOD_GET_BY_PUUID_TOP: &str = "ChampionMastery.GetByPUUIDTop";
pub const METHOD_GET_BY_PUUID_BY_CHAMPION: &str = "ChampionMastery.GetByPUUIDByChampion";
pub const METHOD_GET_SCORE_BY_PUUID: &str = "ChampionMastery.GetScoreByPUUID";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Mastery {
    pub puuid: String,
    pub champion_id: i64,
    pub champion_level: i32,
    pub champion_points: i64,
    pub champion_points_since_last_level: i64,
    pub champion_points_until_next_level: i64,
    pub last_play_time: i64,
    pub chest_granted: bool,
    pub mark_required_for_next_level: i32,
    pub champion_season_milestone: i32,
    pub next_season_milestone: NextSeasonMilestone,
    pub tokens_earned: i32,
    pub milestone_grades: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NextSeasonMilestone {
    pub require_grade_counts: HashMap<String, i32>,
    pub reward_marks: i32,
    pub bonus: bool,
    pub reward_config: RewardConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RewardConfig {
    pub reward_value: String,
    pub reward_type: String,
    pub maximum_reward: i32,
}

/// Query options accepted by [`ChampionMasteryClient::get_by_puuid_top`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TopOption {
    /// Number of entries to return. The API defaults to 3.
    Count(u32),
}

impl TopOption {
    pub fn count(count: u32) -> Self {
        TopOption::Count(count)
    }

    fn into_request_option(self) -> RequestOption {
        match self {
            TopOption::Count(count) => RequestOption::param("count", count),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ChampionMasteryClient {
    client: Client,
}

impl ChampionMasteryClient {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &Client {
        &self.client
    }

    /// Every champion mastery entry for the player, sorted by points.
    pub async fn get_by_puuid(
        &self,
        ctx: &Context,
        puuid: &str,
        opts: &[PublicOption],
    ) -> Result<Vec<Mastery>, Error> {
        let endpoint = format!(
            "/lol/champion-mastery/v4/champion-masteries/by-puuid/{}",
            segment(puuid)
        );
        let options = merge_options(vec![RequestOption::api_method(METHOD_GET_BY_PUUID)], opts);
        self.client
            .request(ctx, &self.client.url(&endpoint), options)
            .await
    }

    /// The player's top entries, `count` controlled through [`TopOption`].
    pub async fn get_by_puuid_top(
        &self,
        ctx: &Context,
        puuid: &str,
        endpoint_opts: &[TopOption],
        opts: &[PublicOption],
    ) -> Result<Vec<Mastery>, Error> {
        let endpoint = format!(
            "/lol/champion-mastery/v4/champion-masteries/by-puuid/{}/top",
            segment(puuid)
        );
        let mut defaults = vec![RequestOption::api_method(METHOD_GET_BY_PUUID_TOP)];
        defaults.extend(endpoint_opts.iter().cloned().map(TopOption::into_request_option));
        self.client
            .request(ctx, &self.client.url(&endpoint), merge_options(defaults, opts))
            .await
    }

    pub async fn get_by_puuid_by_champion(
        &self,
        ctx: &Context,
        puuid: &str,
        champion_id: i64,
        opts: &[PublicOption],
    ) -> Result<Mastery, Error> {
        let endpoint = format!(
            "/lol/champion-mastery/v4/champion-masteries/by-puuid/{}/by-champion/{champion_id}",
            segment(puuid)
        );
        let options = merge_options(
            vec![RequestOption::api_method(METHOD_GET_BY_PUUID_BY_CHAMPION)],
            opts,
        );
        self.client
            .request(ctx, &self.client.url(&endpoint), options)
            .await
    }

    /// Sum of the player's champion mastery levels.
    pub async fn get_score_by_puuid(
        &self,
        ctx: &Context,
        puuid: &str,
        opts: &[PublicOption],
    ) -> Result<i64, Error> {
        let endpoint = format!(
            "/lol/champion-mastery/v4/scores/by-puuid/{}",
            segment(puuid)
        );
        let options = merge_options(
            vec![RequestOption::api_method(METHOD_GET_SCORE_BY_PUUID)],
            opts,
        );
        self.client
            .request(ctx, &self.client.url(&endpoint), options)
            .await
    }
}
