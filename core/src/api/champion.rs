//! CHAMPION-V3: the weekly free champion rotation.

use serde::{Deserialize, Serialize};

use crate::client::Client;
use crate::context::Context;
use crate::error::Error;
use crate::options::{merge_options, PublicOption, RequestOption};

pub const METHOD_GET_ROTATION: &str = "Champion.GetRotation";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rotation {
    pub max_new_player_level: i32,
    pub free_champion_ids_for_new_players: Vec<i64>,
    pub free_champion_ids: Vec<i64>,
}

#[derive(Debug, Clone)]
pub struct ChampionClient {
    client: Client,
}

impl ChampionClient {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &Client {
        &self.client
    }

    /// Current free champion rotation.
    pub async fn get_rotation(
        &self,
        ctx: &Context,
        opts: &[PublicOption],
    ) -> Result<Rotation, Error> {
        let uri = self.client.url("/lol/platform/v3/champion-rotations");
        let options = merge_options(vec![RequestOption::api_method(METHOD_GET_ROTATION)], opts);
        self.client.request(ctx, &uri, options).await
    }
}
