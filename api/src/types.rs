//! Wire types for the fan-site backend.
//!
//! The backend proxies a public sports-data service, and field presence is
//! best-effort: everything the scoreboard depends on is optional here and
//! resolved downstream. Unknown enum values deserialize to a catch-all
//! rather than failing the whole payload.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Default)]
pub enum GameState {
    #[serde(rename = "FUT")]
    #[default]
    Future,
    #[serde(rename = "PRE")]
    PreGame,
    #[serde(rename = "LIVE")]
    Live,
    #[serde(rename = "CRIT")]
    Critical,
    #[serde(rename = "FINAL")]
    Final,
    #[serde(rename = "OFF")]
    Off,
    #[serde(rename = "UNKNOWN")]
    Other,
}

impl<'de> Deserialize<'de> for GameState {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(GameState::from_state_text(&s))
    }
}

impl GameState {
    /// Map the upstream state text. The service occasionally emits
    /// decorated final states ("FINAL/OT" has been observed), so
    /// anything starting with "final" counts as finished.
    pub fn from_state_text(s: &str) -> Self {
        match s {
            "FUT" => GameState::Future,
            "PRE" => GameState::PreGame,
            "LIVE" => GameState::Live,
            "CRIT" => GameState::Critical,
            "OFF" => GameState::Off,
            _ => {
                if s.get(..5).is_some_and(|p| p.eq_ignore_ascii_case("final")) {
                    GameState::Final
                } else {
                    GameState::Other
                }
            }
        }
    }
    /// In progress: the only states whose clock/period fields are
    /// authoritative and worth polling for.
    pub fn is_live(&self) -> bool {
        matches!(self, GameState::Live | GameState::Critical)
    }

    pub fn is_finished(&self) -> bool {
        matches!(self, GameState::Final | GameState::Off)
    }

    pub fn is_scheduled(&self) -> bool {
        matches!(self, GameState::Future | GameState::PreGame)
    }

    pub fn has_started(&self) -> bool {
        self.is_live() || self.is_finished()
    }
}

impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            GameState::Future => "FUT",
            GameState::PreGame => "PRE",
            GameState::Live => "LIVE",
            GameState::Critical => "CRIT",
            GameState::Final => "FINAL",
            GameState::Off => "OFF",
            GameState::Other => "UNKNOWN",
        };
        write!(f, "{}", s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PeriodType {
    #[serde(rename = "REG")]
    Regulation,
    #[serde(rename = "OT")]
    Overtime,
    #[serde(rename = "SO")]
    Shootout,
    #[serde(other)]
    Other,
}

impl PeriodType {
    /// Short label shown next to the period number, when one applies.
    /// Regulation periods are labeled by the caller ("Period {n}").
    pub fn label(&self) -> Option<&'static str> {
        match self {
            PeriodType::Overtime => Some("OT"),
            PeriodType::Shootout => Some("SO"),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodDescriptor {
    pub number: Option<i32>,
    pub period_type: Option<PeriodType>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameClock {
    pub time_remaining: Option<String>,
    pub seconds_remaining: Option<u32>,
    #[serde(default)]
    pub in_intermission: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LocalizedString {
    pub default: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameTeam {
    pub id: Option<i64>,
    pub abbrev: Option<String>,
    pub score: Option<i32>,
    pub sog: Option<i32>,
    pub place_name: Option<LocalizedString>,
    pub common_name: Option<LocalizedString>,
    pub record: Option<String>,
}

/// One game row from the day-schedule payload. Clock data here is less
/// authoritative than the per-game landing payload.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleGame {
    pub id: i64,
    #[serde(default)]
    pub game_state: GameState,
    pub game_schedule_state: Option<String>,
    pub start_time_utc: Option<String>,
    #[serde(default)]
    pub away_team: GameTeam,
    #[serde(default)]
    pub home_team: GameTeam,
    pub period_descriptor: Option<PeriodDescriptor>,
    pub clock: Option<GameClock>,
    pub clock_text: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameDay {
    pub date: String,
    #[serde(default)]
    pub games: Vec<ScheduleGame>,
}

/// Raw `/api/schedule/{date}` body: a week of days, from which the client
/// selects the requested day.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleResponse {
    #[serde(default)]
    pub game_week: Vec<GameDay>,
}

/// The requested day, flattened.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DaySchedule {
    pub date: String,
    pub number_of_games: usize,
    pub games: Vec<ScheduleGame>,
}

/// `/api/gamecenter/{id}/landing`: authoritative for a single game's
/// clock, period, intermission flag, and scores.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameLanding {
    pub id: i64,
    pub game_state: Option<GameState>,
    pub start_time_utc: Option<String>,
    pub away_team: Option<GameTeam>,
    pub home_team: Option<GameTeam>,
    pub period_descriptor: Option<PeriodDescriptor>,
    pub clock: Option<GameClock>,
    pub clock_text: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schedule_game_tolerates_missing_fields() {
        let json = r#"{"id": 2025020001}"#;
        let game: ScheduleGame = serde_json::from_str(json).unwrap();
        assert_eq!(game.id, 2025020001);
        assert_eq!(game.game_state, GameState::Future);
        assert!(game.clock.is_none());
        assert!(game.away_team.abbrev.is_none());
    }

    #[test]
    fn test_live_schedule_game_parses_clock() {
        let json = r#"{
            "id": 2025020002,
            "gameState": "LIVE",
            "awayTeam": {"abbrev": "BOS", "score": 2},
            "homeTeam": {"abbrev": "MTL", "score": 1},
            "periodDescriptor": {"number": 2, "periodType": "REG"},
            "clock": {"timeRemaining": "12:34", "secondsRemaining": 754, "inIntermission": false}
        }"#;
        let game: ScheduleGame = serde_json::from_str(json).unwrap();
        assert!(game.game_state.is_live());
        let clock = game.clock.unwrap();
        assert_eq!(clock.seconds_remaining, Some(754));
        assert_eq!(clock.time_remaining.as_deref(), Some("12:34"));
        assert!(!clock.in_intermission);
        let pd = game.period_descriptor.unwrap();
        assert_eq!(pd.number, Some(2));
        assert_eq!(pd.period_type, Some(PeriodType::Regulation));
    }

    #[test]
    fn test_unknown_game_state_is_other() {
        let json = r#"{"id": 1, "gameState": "POSTPONED"}"#;
        let game: ScheduleGame = serde_json::from_str(json).unwrap();
        assert_eq!(game.game_state, GameState::Other);
        assert!(!game.game_state.has_started());
    }

    #[test]
    fn test_decorated_final_state_texts_count_as_final() {
        assert_eq!(GameState::from_state_text("FINAL"), GameState::Final);
        assert_eq!(GameState::from_state_text("FINAL/OT"), GameState::Final);
        assert_eq!(GameState::from_state_text("Final Overtime"), GameState::Final);
        assert_eq!(GameState::from_state_text("finals"), GameState::Final);
        assert_eq!(GameState::from_state_text("FIN"), GameState::Other);
    }

    #[test]
    fn test_landing_without_clock_or_teams() {
        let json = r#"{"id": 2025020003, "gameState": "LIVE"}"#;
        let landing: GameLanding = serde_json::from_str(json).unwrap();
        assert_eq!(landing.game_state, Some(GameState::Live));
        assert!(landing.clock.is_none());
        assert!(landing.home_team.is_none());
    }

    #[test]
    fn test_state_predicates() {
        assert!(GameState::Critical.is_live());
        assert!(GameState::Off.is_finished());
        assert!(GameState::PreGame.is_scheduled());
        assert!(!GameState::PreGame.has_started());
        assert!(GameState::Final.has_started());
    }

    #[test]
    fn test_period_type_labels() {
        assert_eq!(PeriodType::Overtime.label(), Some("OT"));
        assert_eq!(PeriodType::Shootout.label(), Some("SO"));
        assert_eq!(PeriodType::Regulation.label(), None);
    }
}
