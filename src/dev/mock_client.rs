/// Mock backend client for development and testing
use crate::data_provider::RinkDataProvider;
use crate::fixtures;
use async_trait::async_trait;
use rink_api::{ApiError, DaySchedule, GameDate, GameLanding};
use tracing::info;

/// Mock client that returns fixture data instead of making real API calls
pub struct MockClient;

impl MockClient {
    pub fn new() -> Self {
        info!("Creating MockClient for development mode");
        Self
    }
}

impl Default for MockClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RinkDataProvider for MockClient {
    async fn daily_schedule(&self, date: Option<GameDate>) -> Result<DaySchedule, ApiError> {
        info!("MockClient: Returning mock schedule for date: {:?}", date);
        Ok(fixtures::create_schedule(date))
    }

    async fn landing(&self, game_id: i64) -> Result<GameLanding, ApiError> {
        info!("MockClient: Returning mock landing for game {}", game_id);
        Ok(fixtures::create_landing(game_id))
    }
}
