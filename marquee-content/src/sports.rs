// Third-party standings and roster lookups with a short-lived cache

use crate::client::ClientConfig;
use crate::error::{ContentError, Result};
use marquee_core::cache::{Clock, DEFAULT_TTL, SystemClock, TtlCache};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;
use url::Url;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamStanding {
    pub team_id: String,
    pub name: String,
    #[serde(default)]
    pub played: u32,
    #[serde(default)]
    pub wins: u32,
    #[serde(default)]
    pub draws: u32,
    #[serde(default)]
    pub losses: u32,
    #[serde(default)]
    pub points: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Standings {
    pub league: String,
    pub season: String,
    #[serde(default)]
    pub teams: Vec<TeamStanding>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub position: Option<String>,
    #[serde(default)]
    pub number: Option<u32>,
}

type SeasonKey = (String, String);

pub struct SportsClient {
    http: Client,
    base_url: Url,
    standings: TtlCache<SeasonKey, Standings>,
    players: TtlCache<SeasonKey, Vec<Player>>,
}

impl SportsClient {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    pub fn with_clock(config: &ClientConfig, clock: Arc<dyn Clock>) -> Result<Self> {
        Ok(Self {
            http: config.build_http()?,
            base_url: config.endpoint.clone(),
            standings: TtlCache::with_clock(DEFAULT_TTL, Arc::clone(&clock)),
            players: TtlCache::with_clock(DEFAULT_TTL, clock),
        })
    }

    fn url(&self, segments: &[&str], query: &[(&str, &str)]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ContentError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        url.query_pairs_mut().extend_pairs(query);
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T> {
        debug!("GET {}", url);
        let response = self.http.get(url.clone()).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ContentError::StatusError {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }
        Ok(response.json::<T>().await?)
    }

    pub async fn standings(&self, league: &str, season: &str) -> Result<Arc<Standings>> {
        let key = (league.to_string(), season.to_string());
        self.standings
            .get_or_try_insert_with(key, move || async move {
                let url = self.url(&["standings"], &[("league", league), ("season", season)])?;
                self.get_json::<Standings>(url).await
            })
            .await
    }

    pub async fn players(&self, team_id: &str, season: &str) -> Result<Arc<Vec<Player>>> {
        let key = (team_id.to_string(), season.to_string());
        self.players
            .get_or_try_insert_with(key, move || async move {
                let url = self.url(&["teams", team_id, "players"], &[("season", season)])?;
                self.get_json::<Vec<Player>>(url).await
            })
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use marquee_core::cache::ManualClock;
    use serde_json::json;
    use std::time::Duration;
    use wiremock::{
        Mock, MockServer, ResponseTemplate,
        matchers::{method, path, query_param},
    };

    fn client_for(server: &MockServer, clock: Arc<ManualClock>) -> SportsClient {
        let config = ClientConfig::parse(&format!("{}/v1/", server.uri())).unwrap();
        SportsClient::with_clock(&config, clock).unwrap()
    }

    async fn mount_standings(server: &MockServer, expected_calls: u64) {
        Mock::given(method("GET"))
            .and(path("/v1/standings"))
            .and(query_param("league", "premier"))
            .and(query_param("season", "2025"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "league": "premier",
                "season": "2025",
                "teams": [ { "team_id": "t1", "name": "Rovers", "wins": 3, "points": 9 } ]
            })))
            .expect(expected_calls)
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn test_standings_cached_within_ttl() {
        let server = MockServer::start().await;
        mount_standings(&server, 1).await;

        let clock = Arc::new(ManualClock::new());
        let client = client_for(&server, clock.clone());

        let first = client.standings("premier", "2025").await.unwrap();
        clock.advance(Duration::from_secs(120));
        let second = client.standings("premier", "2025").await.unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(first.teams[0].points, 9);
    }

    #[tokio::test]
    async fn test_standings_refetched_once_after_ttl() {
        let server = MockServer::start().await;
        mount_standings(&server, 2).await;

        let clock = Arc::new(ManualClock::new());
        let client = client_for(&server, clock.clone());

        let first = client.standings("premier", "2025").await.unwrap();
        clock.advance(Duration::from_secs(301));
        let second = client.standings("premier", "2025").await.unwrap();
        let third = client.standings("premier", "2025").await.unwrap();

        assert!(!Arc::ptr_eq(&first, &second));
        assert!(Arc::ptr_eq(&second, &third));
    }

    #[tokio::test]
    async fn test_players_path_and_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/teams/t1/players"))
            .and(query_param("season", "2025"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                { "id": "p1", "name": "Alex", "position": "GK", "number": 1 }
            ])))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/v1/teams/t2/players"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let client = client_for(&server, Arc::new(ManualClock::new()));
        let players = client.players("t1", "2025").await.unwrap();
        assert_eq!(players[0].number, Some(1));

        let err = client.players("t2", "2025").await.unwrap_err();
        assert!(matches!(err, ContentError::StatusError { status: 404, .. }));
    }
}
