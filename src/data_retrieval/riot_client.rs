use crate::data_retrieval::api::{ApiError, PageRequest, StatsApi};
use crate::match_stats::{
    MatchDetail, MatchSummary, Outcome, Participant, PlayerIdentity, Side, Team,
};
use crate::settings::Settings;
use crate::types::{AccountId, GameId, Region};
use async_trait::async_trait;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_repr::Deserialize_repr;
use std::convert::TryFrom;
use std::time::Duration;

const TOKEN_HEADER: &str = "X-Riot-Token";

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SummonerDto {
    account_id: String,
    name: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct MatchlistDto {
    #[serde(default)]
    matches: Vec<MatchReferenceDto>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct MatchReferenceDto {
    game_id: u64,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct MatchDto {
    game_id: u64,
    participant_identities: Vec<ParticipantIdentityDto>,
    teams: Vec<TeamStatsDto>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ParticipantIdentityDto {
    participant_id: u8,
    player: PlayerDto,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PlayerDto {
    #[serde(default)]
    account_id: String,
    #[serde(default)]
    summoner_name: String,
}

#[derive(Deserialize_repr, Clone, Copy)]
#[repr(u16)]
enum TeamId {
    Blue = 100,
    Red = 200,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct TeamStatsDto {
    team_id: TeamId,
    win: String,
}

impl From<TeamStatsDto> for Team {
    fn from(dto: TeamStatsDto) -> Team {
        Team {
            side: match dto.team_id {
                TeamId::Blue => Side::Blue,
                TeamId::Red => Side::Red,
            },
            outcome: if dto.win == "Win" {
                Outcome::Win
            } else {
                Outcome::Loss
            },
        }
    }
}

impl TryFrom<MatchDto> for MatchDetail {
    type Error = ApiError;

    fn try_from(dto: MatchDto) -> Result<MatchDetail, ApiError> {
        let game_id = dto.game_id.to_string();
        let participants = dto
            .participant_identities
            .into_iter()
            .map(|p| Participant {
                account_id: p.player.account_id,
                name: p.player.summoner_name,
                slot: p.participant_id,
            })
            .collect();
        let mut teams = dto.teams.into_iter().map(Team::from);
        let teams = match (teams.next(), teams.next(), teams.next()) {
            (Some(first), Some(second), None) => [first, second],
            _ => {
                return Err(ApiError::Malformed(format!(
                    "match {} does not have exactly two teams",
                    game_id
                )))
            }
        };
        MatchDetail::new(game_id.clone(), participants, teams).ok_or_else(|| {
            ApiError::Malformed(format!("match {} teams play on the same side", game_id))
        })
    }
}

/// Struct which handles all communication with the Riot api.
pub struct RiotClient {
    http: reqwest::Client,
    api_host: String,
    api_key: String,
}

impl RiotClient {
    /// `api_host` may contain a `{region}` placeholder, filled in per request.
    pub fn new(api_host: String, api_key: String, timeout: Duration) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            api_host,
            api_key,
        })
    }

    pub fn from_settings(settings: &Settings) -> Result<Self, ApiError> {
        if settings.api_key.is_empty() {
            warn!("No api key configured, requests will most likely be rejected.");
        }
        RiotClient::new(
            settings.api_host.clone(),
            settings.api_key.clone(),
            settings.request_timeout(),
        )
    }

    fn url(&self, region: &Region, path: &str) -> String {
        format!("{}{}", self.api_host.replace("{region}", region), path)
    }

    /// Sends authorized get request. 404 is reported as `NotFound`, any other
    /// non-success status as `Status`.
    async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, String)],
    ) -> Result<T, ApiError> {
        let response = self
            .http
            .get(url)
            .header(TOKEN_HEADER, &self.api_key)
            .query(query)
            .send()
            .await?;
        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(ApiError::NotFound(url.to_string()));
        }
        if !status.is_success() {
            warn!("Request to {} failed with status {}", url, status);
            return Err(ApiError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }
        let body = response.text().await?;
        match serde_json::from_str(&body) {
            Ok(parsed) => Ok(parsed),
            Err(e) => {
                warn!("Unable to parse response at url: {}", url);
                Err(ApiError::Decode(e))
            }
        }
    }
}

#[async_trait]
impl StatsApi for RiotClient {
    async fn lookup_player_by_name(
        &self,
        region: &Region,
        name: &str,
    ) -> Result<PlayerIdentity, ApiError> {
        info!("Fetching summoner: {}", name);
        let url = self.url(
            region,
            &format!("/lol/summoner/v4/summoners/by-name/{}", name),
        );
        let summoner: SummonerDto = match self.get_json(&url, &[]).await {
            Err(ApiError::NotFound(_)) => return Err(ApiError::NotFound(name.to_string())),
            other => other?,
        };
        Ok(PlayerIdentity {
            account_id: summoner.account_id,
            name: summoner.name,
        })
    }

    /// Uses the matchlists/by-account endpoint, windowed with beginIndex/endIndex.
    async fn list_recent_matches(
        &self,
        region: &Region,
        account_id: &AccountId,
        page: PageRequest,
    ) -> Result<Vec<MatchSummary>, ApiError> {
        info!(
            "Fetching matches {}..{} of account: {}",
            page.begin_index(),
            page.end_index(),
            account_id
        );
        let url = self.url(
            region,
            &format!("/lol/match/v4/matchlists/by-account/{}", account_id),
        );
        let query = [
            ("beginIndex", page.begin_index().to_string()),
            ("endIndex", page.end_index().to_string()),
        ];
        let matchlist: MatchlistDto = self.get_json(&url, &query).await?;
        Ok(matchlist
            .matches
            .into_iter()
            .map(|m| MatchSummary {
                game_id: m.game_id.to_string(),
            })
            .collect())
    }

    async fn get_match_detail(
        &self,
        region: &Region,
        game_id: &GameId,
    ) -> Result<MatchDetail, ApiError> {
        debug!("Fetching match info: {}", game_id);
        let url = self.url(region, &format!("/lol/match/v4/matches/{}", game_id));
        let match_dto: MatchDto = self.get_json(&url, &[]).await?;
        MatchDetail::try_from(match_dto)
    }
}
