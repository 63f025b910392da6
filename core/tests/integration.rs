//! End-to-end run against the live mock server.
//!
//! # Design
//! Starts the mock server on a random port, points a client at it with the
//! default reqwest transport, and exercises every endpoint wrapper over real
//! HTTP. Validates request building, auth placement and response decoding
//! against an actual server rather than a scripted transport.

use leago::api::account::{RegionGame, ShardGame};
use leago::api::championmastery::TopOption;
use leago::{
    ClientConfig, Context, ErrorKind, Platform, PlatformClient, Region, RegionClient,
    RequestOption,
};
use serde::Deserialize;

const KEY: &str = "integration-key";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SeededAccount {
    puuid: String,
}

async fn start_server() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move { mock_server::run(listener, KEY).await });
    format!("http://{addr}")
}

/// Seeds one player through the unauthenticated mock route, using the
/// pipeline's body and method options.
async fn seed_player(base_url: &str) -> String {
    let client = ClientConfig::new(KEY)
        .with_base_url(base_url)
        .client("mock");
    let payload = serde_json::json!({
        "gameName": "Faker",
        "tagLine": "KR1",
        "activeShard": "kr",
        "region": "kr",
        "masteries": [
            {"championId": 7, "championLevel": 10, "championPoints": 90000},
            {"championId": 157, "championLevel": 40, "championPoints": 700000},
            {"championId": 4, "championLevel": 5, "championPoints": 12000},
            {"championId": 61, "championLevel": 20, "championPoints": 300000}
        ]
    });
    let options = || {
        vec![
            RequestOption::http_method("POST"),
            RequestOption::body(&payload),
            RequestOption::api_method("Mock.SeedAccount"),
        ]
    };

    // The mock answers 201, which only the no-content path accepts.
    client
        .execute(&Context::background(), &client.url("/mock/accounts"), options())
        .await
        .unwrap();
    let err = client
        .request::<SeededAccount>(&Context::background(), &client.url("/mock/accounts"), options())
        .await
        .unwrap_err();
    assert_eq!(err.status_code(), Some(201));

    let account: SeededAccount = serde_json::from_str(match &err {
        leago::Error::RemoteApi { body, .. } => body,
        other => panic!("unexpected error: {other:?}"),
    })
    .unwrap();
    account.puuid
}

#[tokio::test]
async fn account_endpoints_round_trip() {
    let base_url = start_server().await;
    let puuid = seed_player(&base_url).await;
    let config = ClientConfig::new(KEY).with_base_url(&base_url);
    let asia = RegionClient::new(Region::Asia, &config);
    let ctx = Context::background();

    let account = asia
        .account
        .get_by_riot_id(&ctx, "Faker", "KR1", &[])
        .await
        .unwrap();
    assert_eq!(account.game_name, "Faker");
    assert!(!account.puuid.is_empty());

    let by_puuid = asia
        .account
        .get_by_puuid(&ctx, &puuid, &[])
        .await
        .unwrap();
    assert_eq!(by_puuid.puuid, puuid);
    assert_eq!(by_puuid.tag_line, "KR1");

    let shard = asia
        .account
        .get_active_shard_by_puuid(&ctx, ShardGame::Valorant, &puuid, &[])
        .await
        .unwrap();
    assert_eq!(shard.active_shard, "kr");
    assert_eq!(shard.game, "val");

    let region = asia
        .account
        .get_active_region_by_puuid(&ctx, RegionGame::LeagueOfLegends, &puuid, &[])
        .await
        .unwrap();
    assert_eq!(region.region, "kr");

    let err = asia
        .account
        .get_by_puuid(&ctx, "nobody", &[])
        .await
        .unwrap_err();
    assert_eq!(err.status_code(), Some(404));
    assert!(err.to_string().contains("Data not found"));
}

#[tokio::test]
async fn platform_endpoints_round_trip() {
    let base_url = start_server().await;
    let puuid = seed_player(&base_url).await;
    let config = ClientConfig::new(KEY).with_base_url(&base_url);
    let kr = PlatformClient::new(Platform::Kr, &config);
    let ctx = Context::background();

    let rotation = kr.champion.get_rotation(&ctx, &[]).await.unwrap();
    assert_eq!(rotation.max_new_player_level, 10);
    assert!(!rotation.free_champion_ids.is_empty());

    let all = kr
        .champion_mastery
        .get_by_puuid(&ctx, &puuid, &[])
        .await
        .unwrap();
    assert_eq!(all.len(), 4);
    assert_eq!(all[0].champion_id, 157);

    let top = kr
        .champion_mastery
        .get_by_puuid_top(&ctx, &puuid, &[TopOption::count(2)], &[])
        .await
        .unwrap();
    let ids: Vec<i64> = top.iter().map(|m| m.champion_id).collect();
    assert_eq!(ids, vec![157, 61]);

    let default_top = kr
        .champion_mastery
        .get_by_puuid_top(&ctx, &puuid, &[], &[])
        .await
        .unwrap();
    assert_eq!(default_top.len(), 3);

    let one = kr
        .champion_mastery
        .get_by_puuid_by_champion(&ctx, &puuid, 61, &[])
        .await
        .unwrap();
    assert_eq!(one.champion_points, 300000);

    let score = kr
        .champion_mastery
        .get_score_by_puuid(&ctx, &puuid, &[])
        .await
        .unwrap();
    assert_eq!(score, 75);
}

#[tokio::test]
async fn wrong_key_is_rejected_by_server() {
    let base_url = start_server().await;
    let config = ClientConfig::new("wrong-key").with_base_url(&base_url);
    let na1 = PlatformClient::new(Platform::Na1, &config);

    let err = na1
        .champion
        .get_rotation(&Context::background(), &[])
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::RemoteApi);
    assert_eq!(err.status_code(), Some(401));
}

#[tokio::test]
async fn key_in_query_param_is_accepted() {
    let base_url = start_server().await;
    let client = ClientConfig::new("wrong-key")
        .with_base_url(&base_url)
        .client(Platform::Na1);

    let rotation: leago::api::champion::Rotation = client
        .request(
            &Context::background(),
            &client.url("/lol/platform/v3/champion-rotations"),
            vec![RequestOption::param("api_key", KEY)],
        )
        .await
        .unwrap();
    assert_eq!(rotation.max_new_player_level, 10);
}

#[tokio::test]
async fn unreachable_host_is_a_transport_failure() {
    // Bind then drop to get a port nothing listens on.
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let config = ClientConfig::new(KEY).with_base_url(format!("http://{addr}"));
    let na1 = PlatformClient::new(Platform::Na1, &config);
    let err = na1
        .champion
        .get_rotation(&Context::background(), &[])
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Transport);
}
