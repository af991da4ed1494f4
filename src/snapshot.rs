//! Normalized view of one game's upstream payloads.
//!
//! Both the schedule row and the landing payload describe the same game
//! with overlapping, optionally-present fields. Everything downstream
//! (formatter, reconciler, rendering) works from this one struct so the
//! fallback chains live in a single place.

use rink_api::{GameLanding, GameState, GameTeam, PeriodType, ScheduleGame};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct GameSnapshot {
    pub id: i64,
    pub state: GameState,
    pub start_time_utc: Option<String>,
    pub away_abbrev: Option<String>,
    pub home_abbrev: Option<String>,
    pub away_score: Option<i32>,
    pub home_score: Option<i32>,
    pub away_sog: Option<i32>,
    pub home_sog: Option<i32>,
    pub period_number: Option<i32>,
    pub period_type: Option<PeriodType>,
    pub seconds_remaining: Option<u32>,
    /// Free-text clock, already collapsed from `clock.timeRemaining` and
    /// the payload-level `clockText` fallback. Empty strings become None.
    pub clock_text: Option<String>,
    pub in_intermission: bool,
}

fn non_empty(s: Option<String>) -> Option<String> {
    s.filter(|t| !t.trim().is_empty())
}

impl GameSnapshot {
    pub fn from_schedule(game: &ScheduleGame) -> Self {
        let clock = game.clock.clone().unwrap_or_default();
        let pd = game.period_descriptor.clone().unwrap_or_default();
        Self {
            id: game.id,
            state: game.game_state,
            start_time_utc: game.start_time_utc.clone(),
            away_abbrev: team_abbrev(&game.away_team),
            home_abbrev: team_abbrev(&game.home_team),
            away_score: game.away_team.score,
            home_score: game.home_team.score,
            away_sog: game.away_team.sog,
            home_sog: game.home_team.sog,
            period_number: pd.number,
            period_type: pd.period_type,
            seconds_remaining: clock.seconds_remaining,
            clock_text: non_empty(clock.time_remaining).or_else(|| non_empty(game.clock_text.clone())),
            in_intermission: clock.in_intermission,
        }
    }

    pub fn from_landing(landing: &GameLanding) -> Self {
        let clock = landing.clock.clone().unwrap_or_default();
        let pd = landing.period_descriptor.clone().unwrap_or_default();
        let away = landing.away_team.clone().unwrap_or_default();
        let home = landing.home_team.clone().unwrap_or_default();
        Self {
            id: landing.id,
            state: landing.game_state.unwrap_or_default(),
            start_time_utc: landing.start_time_utc.clone(),
            away_abbrev: team_abbrev(&away),
            home_abbrev: team_abbrev(&home),
            away_score: away.score,
            home_score: home.score,
            away_sog: away.sog,
            home_sog: home.sog,
            period_number: pd.number,
            period_type: pd.period_type,
            seconds_remaining: clock.seconds_remaining,
            clock_text: non_empty(clock.time_remaining)
                .or_else(|| non_empty(landing.clock_text.clone())),
            in_intermission: clock.in_intermission,
        }
    }

    /// Overlay a landing payload on a schedule row. The landing endpoint
    /// is authoritative for live games, so its fields win wherever
    /// present; schedule values fill the gaps.
    pub fn merged(game: &ScheduleGame, landing: &GameLanding) -> Self {
        let base = Self::from_schedule(game);
        let over = Self::from_landing(landing);
        Self {
            id: base.id,
            state: if landing.game_state.is_some() { over.state } else { base.state },
            start_time_utc: over.start_time_utc.or(base.start_time_utc),
            away_abbrev: over.away_abbrev.or(base.away_abbrev),
            home_abbrev: over.home_abbrev.or(base.home_abbrev),
            away_score: over.away_score.or(base.away_score),
            home_score: over.home_score.or(base.home_score),
            away_sog: over.away_sog.or(base.away_sog),
            home_sog: over.home_sog.or(base.home_sog),
            period_number: over.period_number.or(base.period_number),
            period_type: over.period_type.or(base.period_type),
            seconds_remaining: over.seconds_remaining.or(base.seconds_remaining),
            clock_text: over.clock_text.or(base.clock_text),
            in_intermission: if landing.clock.is_some() {
                over.in_intermission
            } else {
                base.in_intermission
            },
        }
    }
}

fn team_abbrev(team: &GameTeam) -> Option<String> {
    team.abbrev.clone().filter(|a| !a.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rink_api::{GameClock, PeriodDescriptor};

    fn schedule_game() -> ScheduleGame {
        ScheduleGame {
            id: 7,
            game_state: GameState::Live,
            away_team: GameTeam {
                abbrev: Some("TOR".into()),
                score: Some(1),
                ..Default::default()
            },
            home_team: GameTeam {
                abbrev: Some("OTT".into()),
                score: Some(2),
                ..Default::default()
            },
            period_descriptor: Some(PeriodDescriptor {
                number: Some(1),
                period_type: Some(PeriodType::Regulation),
            }),
            clock: Some(GameClock {
                time_remaining: Some("08:15".into()),
                seconds_remaining: None,
                in_intermission: false,
            }),
            ..Default::default()
        }
    }

    #[test]
    fn test_from_schedule_collapses_clock_text() {
        let snap = GameSnapshot::from_schedule(&schedule_game());
        assert_eq!(snap.clock_text.as_deref(), Some("08:15"));
        assert_eq!(snap.seconds_remaining, None);
        assert_eq!(snap.away_abbrev.as_deref(), Some("TOR"));
    }

    #[test]
    fn test_blank_clock_text_becomes_none() {
        let mut game = schedule_game();
        game.clock = Some(GameClock {
            time_remaining: Some("   ".into()),
            ..Default::default()
        });
        let snap = GameSnapshot::from_schedule(&game);
        assert_eq!(snap.clock_text, None);
    }

    #[test]
    fn test_merged_landing_fields_win() {
        let game = schedule_game();
        let landing = GameLanding {
            id: 7,
            game_state: Some(GameState::Live),
            clock: Some(GameClock {
                time_remaining: None,
                seconds_remaining: Some(125),
                in_intermission: true,
            }),
            period_descriptor: Some(PeriodDescriptor {
                number: Some(2),
                period_type: Some(PeriodType::Regulation),
            }),
            home_team: Some(GameTeam {
                abbrev: Some("OTT".into()),
                score: Some(3),
                sog: Some(18),
                ..Default::default()
            }),
            ..Default::default()
        };
        let snap = GameSnapshot::merged(&game, &landing);
        assert_eq!(snap.seconds_remaining, Some(125));
        assert!(snap.in_intermission);
        assert_eq!(snap.period_number, Some(2));
        assert_eq!(snap.home_score, Some(3));
        assert_eq!(snap.home_sog, Some(18));
        // Schedule fills the gaps the landing left.
        assert_eq!(snap.away_score, Some(1));
        assert_eq!(snap.away_abbrev.as_deref(), Some("TOR"));
        // Landing clock present, so its free text (absent) replaces nothing
        // but schedule free text still survives as the fallback.
        assert_eq!(snap.clock_text.as_deref(), Some("08:15"));
    }

    #[test]
    fn test_merged_without_landing_clock_keeps_schedule_intermission() {
        let mut game = schedule_game();
        game.clock = Some(GameClock {
            in_intermission: true,
            ..Default::default()
        });
        let landing = GameLanding {
            id: 7,
            game_state: Some(GameState::Live),
            ..Default::default()
        };
        let snap = GameSnapshot::merged(&game, &landing);
        assert!(snap.in_intermission);
    }
}
