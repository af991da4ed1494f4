/// Trait for providing backend data, abstracting over the real API client
/// and mock implementations
use async_trait::async_trait;
use rink_api::{ApiError, DaySchedule, GameDate, GameLanding};

/// Data provider for the scoreboard, implemented by both the real Client
/// and MockClient
#[async_trait]
pub trait RinkDataProvider: Send + Sync {
    /// Get the schedule for a specific date (today when None)
    async fn daily_schedule(&self, date: Option<GameDate>) -> Result<DaySchedule, ApiError>;

    /// Get the landing payload for one game (authoritative clock/score)
    async fn landing(&self, game_id: i64) -> Result<GameLanding, ApiError>;
}

#[async_trait]
impl RinkDataProvider for rink_api::Client {
    async fn daily_schedule(&self, date: Option<GameDate>) -> Result<DaySchedule, ApiError> {
        self.daily_schedule(date).await
    }

    async fn landing(&self, game_id: i64) -> Result<GameLanding, ApiError> {
        self.landing(game_id).await
    }
}
