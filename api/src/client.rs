use crate::date::GameDate;
use crate::types::{DaySchedule, GameLanding, ScheduleResponse};
use reqwest::Client as HttpClient;
use std::fmt;
use std::time::Duration;

pub type ApiResult<T> = Result<T, ApiError>;

const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8080";
const BASE_URL_ENV: &str = "RINKSIDE_API_URL";
const REQUEST_TIMEOUT_SECS: u64 = 10;

#[derive(Debug)]
pub enum ApiError {
    Network(reqwest::Error, String),
    Api(reqwest::Error, String),
    Parsing(reqwest::Error, String),
    NotFound(String),
    Other(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Network(e, url) => write!(f, "Network error for {url}: {e}"),
            ApiError::Api(e, url) => write!(f, "API error for {url}: {e}"),
            ApiError::Parsing(e, url) => write!(f, "Parse error for {url}: {e}"),
            ApiError::NotFound(msg) => write!(f, "Not found: {msg}"),
            ApiError::Other(msg) => write!(f, "Error: {msg}"),
        }
    }
}

impl std::error::Error for ApiError {}

/// Client for the fan-site backend REST API.
#[derive(Debug, Clone)]
pub struct Client {
    http: HttpClient,
    base_url: String,
    timeout: Duration,
}

impl Client {
    /// Build a client against the configured backend. The base URL comes
    /// from `RINKSIDE_API_URL` when set, otherwise the local default.
    pub fn new() -> ApiResult<Self> {
        let base_url = std::env::var(BASE_URL_ENV).unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        Ok(Self::with_base_url(base_url))
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        let base_url = base_url.trim_end_matches('/').to_string();
        Self {
            http: HttpClient::builder()
                .user_agent(concat!("rinkside/", env!("CARGO_PKG_VERSION")))
                .build()
                .unwrap_or_default(),
            base_url,
            timeout: Duration::from_secs(REQUEST_TIMEOUT_SECS),
        }
    }

    /// Fetch the schedule for one day. The backend returns a `gameWeek`
    /// spanning several days; only the requested day's games are kept.
    pub async fn daily_schedule(&self, date: Option<GameDate>) -> ApiResult<DaySchedule> {
        let date = date.unwrap_or_else(GameDate::today);
        let date_str = date.to_api_string();
        let url = format!("{}/api/schedule/{}", self.base_url, date_str);
        let raw: ScheduleResponse = self.get(&url).await?;

        let games = raw
            .game_week
            .into_iter()
            .find(|day| day.date == date_str)
            .map(|day| day.games)
            .unwrap_or_default();

        Ok(DaySchedule {
            date: date_str,
            number_of_games: games.len(),
            games,
        })
    }

    /// Fetch the landing payload for one game, authoritative for live
    /// clock and intermission fields.
    pub async fn landing(&self, game_id: i64) -> ApiResult<GameLanding> {
        let url = format!("{}/api/gamecenter/{}/landing", self.base_url, game_id);
        self.get(&url).await
    }

    async fn get<T: serde::de::DeserializeOwned>(&self, url: &str) -> ApiResult<T> {
        let response = self
            .http
            .get(url)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| ApiError::Network(e, url.to_owned()))?;

        match response.error_for_status() {
            Ok(res) => res
                .json::<T>()
                .await
                .map_err(|e| ApiError::Parsing(e, url.to_owned())),
            Err(e) => Err(ApiError::Api(e, url.to_owned())),
        }
    }
}
