pub mod background;
pub mod cache;
pub mod clock;
pub mod commands;
pub mod config;
pub mod data_provider;
pub mod fixtures;
pub mod formatting;
pub mod reconcile;
pub mod snapshot;
pub mod team_abbrev;
pub mod tui;

#[cfg(any(test, feature = "development"))]
pub mod dev;

use crate::reconcile::ScoreboardState;
use rink_api::{DaySchedule, GameDate};
use std::sync::Arc;
use std::time::{Duration, Instant, SystemTime};
use tokio::sync::RwLock;

/// Backoff bookkeeping for the single-game view, surfaced so the UI can
/// show a countdown to the next retry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryState {
    pub next_attempt: Instant,
    pub delay: Duration,
    pub consecutive_failures: u32,
}

impl RetryState {
    /// Whole seconds until the next retry, clamped at zero.
    pub fn seconds_until_retry(&self) -> u64 {
        self.next_attempt
            .saturating_duration_since(Instant::now())
            .as_secs()
    }
}

/// View-model state shared between the poll loops and the UI.
pub struct SharedData {
    pub config: config::Config,
    pub game_date: GameDate,
    /// Card ordering and per-game rows for the selected date.
    pub schedule: Option<DaySchedule>,
    pub scoreboard: ScoreboardState,
    /// True once the first schedule fetch for the current date succeeded.
    /// Later poll failures are silent; before this flips, a failure is a
    /// visible error state.
    pub loaded: bool,
    pub error_message: Option<String>,
    pub last_refresh: Option<SystemTime>,
    pub retry: Option<RetryState>,
    seq: u64,
}

impl Default for SharedData {
    fn default() -> Self {
        SharedData {
            config: config::Config::default(),
            game_date: GameDate::today(),
            schedule: None,
            scoreboard: ScoreboardState::new(),
            loaded: false,
            error_message: None,
            last_refresh: None,
            retry: None,
            seq: 0,
        }
    }
}

impl SharedData {
    /// Hand out the next poll-tick sequence number. Monotonic across
    /// every session sharing this state, so a slow old tick can never
    /// overwrite a newer one (see `ScoreboardState::apply`).
    pub fn next_seq(&mut self) -> u64 {
        self.seq += 1;
        self.seq
    }

    /// Switch to another date: the old date's cards are gone, so their
    /// display states and load status go with them.
    pub fn set_date(&mut self, date: GameDate) {
        self.game_date = date;
        self.schedule = None;
        self.scoreboard.clear();
        self.loaded = false;
        self.error_message = None;
        self.retry = None;
    }
}

pub type SharedDataHandle = Arc<RwLock<SharedData>>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seq_is_monotonic() {
        let mut shared = SharedData::default();
        let a = shared.next_seq();
        let b = shared.next_seq();
        assert!(b > a);
    }

    #[test]
    fn test_set_date_resets_view_state() {
        let mut shared = SharedData::default();
        shared.loaded = true;
        shared.error_message = Some("boom".into());
        shared
            .scoreboard
            .apply(1, &snapshot::GameSnapshot { id: 1, ..Default::default() });

        shared.set_date(GameDate::today().add_days(1));
        assert!(!shared.loaded);
        assert!(shared.error_message.is_none());
        assert!(shared.scoreboard.is_empty());
    }

    #[test]
    fn test_retry_countdown_clamps_at_zero() {
        let retry = RetryState {
            next_attempt: Instant::now() - Duration::from_secs(5),
            delay: Duration::from_secs(10),
            consecutive_failures: 1,
        };
        assert_eq!(retry.seconds_until_retry(), 0);
    }
}
