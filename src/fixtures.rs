/// Deterministic fixture data for tests, benches, and development mode
///
/// One fixture day covering every lifecycle state the scoreboard
/// handles: future, pregame, live, live-in-intermission, and final.
/// The schedule rows deliberately carry weaker clock data than the
/// landing payloads, mirroring the real backend: the intermission game
/// only reveals its intermission through the landing fetch.
use chrono::NaiveDate;
use rink_api::{
    DaySchedule, GameClock, GameDate, GameLanding, GameState, GameTeam, LocalizedString,
    PeriodDescriptor, PeriodType, ScheduleGame,
};

pub const FUTURE_GAME_ID: i64 = 2026020001;
pub const PREGAME_GAME_ID: i64 = 2026020002;
pub const LIVE_GAME_ID: i64 = 2026020003;
pub const INTERMISSION_GAME_ID: i64 = 2026020004;
pub const FINAL_GAME_ID: i64 = 2026020005;

pub fn fixture_date() -> GameDate {
    GameDate::Date(NaiveDate::from_ymd_opt(2026, 1, 7).unwrap())
}

fn team(abbrev: &str, name: &str, score: Option<i32>) -> GameTeam {
    GameTeam {
        id: Some(abbrev.chars().map(|c| c as i64).sum()),
        abbrev: Some(abbrev.to_string()),
        score,
        sog: None,
        place_name: Some(LocalizedString {
            default: name.split_whitespace().next().unwrap_or(name).to_string(),
        }),
        common_name: Some(LocalizedString {
            default: name
                .split_whitespace()
                .skip(1)
                .collect::<Vec<_>>()
                .join(" "),
        }),
        record: None,
    }
}

fn schedule_game(
    id: i64,
    away: GameTeam,
    home: GameTeam,
    state: GameState,
    period_number: Option<i32>,
) -> ScheduleGame {
    ScheduleGame {
        id,
        game_state: state,
        game_schedule_state: None,
        start_time_utc: Some("2026-01-08T00:00:00Z".to_string()),
        away_team: away,
        home_team: home,
        period_descriptor: period_number.map(|number| PeriodDescriptor {
            number: Some(number),
            period_type: Some(PeriodType::Regulation),
        }),
        clock: None,
        clock_text: None,
    }
}

pub fn create_schedule(date: Option<GameDate>) -> DaySchedule {
    let date = date.unwrap_or_else(fixture_date);
    let games = vec![
        schedule_game(
            FUTURE_GAME_ID,
            team("BOS", "Boston Bruins", None),
            team("MTL", "Montreal Canadiens", None),
            GameState::Future,
            None,
        ),
        schedule_game(
            PREGAME_GAME_ID,
            team("NYR", "New York Rangers", None),
            team("NJD", "New Jersey Devils", None),
            GameState::PreGame,
            None,
        ),
        schedule_game(
            LIVE_GAME_ID,
            team("TOR", "Toronto Maple Leafs", Some(2)),
            team("OTT", "Ottawa Senators", Some(1)),
            GameState::Live,
            Some(2),
        ),
        schedule_game(
            INTERMISSION_GAME_ID,
            team("EDM", "Edmonton Oilers", Some(1)),
            team("VAN", "Vancouver Canucks", Some(1)),
            GameState::Live,
            Some(1),
        ),
        schedule_game(
            FINAL_GAME_ID,
            team("CAR", "Carolina Hurricanes", Some(4)),
            team("VGK", "Vegas Golden Knights", Some(3)),
            GameState::Final,
            Some(4),
        ),
    ];

    DaySchedule {
        date: date.to_api_string(),
        number_of_games: games.len(),
        games,
    }
}

pub fn create_landing(game_id: i64) -> GameLanding {
    match game_id {
        FUTURE_GAME_ID => GameLanding {
            id: game_id,
            game_state: Some(GameState::Future),
            start_time_utc: Some("2026-01-08T00:00:00Z".to_string()),
            away_team: Some(team("BOS", "Boston Bruins", None)),
            home_team: Some(team("MTL", "Montreal Canadiens", None)),
            ..Default::default()
        },
        PREGAME_GAME_ID => GameLanding {
            id: game_id,
            game_state: Some(GameState::PreGame),
            start_time_utc: Some("2026-01-08T00:00:00Z".to_string()),
            away_team: Some(team("NYR", "New York Rangers", None)),
            home_team: Some(team("NJD", "New Jersey Devils", None)),
            ..Default::default()
        },
        LIVE_GAME_ID => GameLanding {
            id: game_id,
            game_state: Some(GameState::Live),
            away_team: Some(GameTeam {
                sog: Some(18),
                ..team("TOR", "Toronto Maple Leafs", Some(2))
            }),
            home_team: Some(GameTeam {
                sog: Some(11),
                ..team("OTT", "Ottawa Senators", Some(1))
            }),
            period_descriptor: Some(PeriodDescriptor {
                number: Some(2),
                period_type: Some(PeriodType::Regulation),
            }),
            clock: Some(GameClock {
                time_remaining: Some("05:30".to_string()),
                seconds_remaining: Some(330),
                in_intermission: false,
            }),
            ..Default::default()
        },
        INTERMISSION_GAME_ID => GameLanding {
            id: game_id,
            game_state: Some(GameState::Live),
            away_team: Some(GameTeam {
                sog: Some(9),
                ..team("EDM", "Edmonton Oilers", Some(1))
            }),
            home_team: Some(GameTeam {
                sog: Some(14),
                ..team("VAN", "Vancouver Canucks", Some(1))
            }),
            period_descriptor: Some(PeriodDescriptor {
                number: Some(1),
                period_type: Some(PeriodType::Regulation),
            }),
            clock: Some(GameClock {
                time_remaining: Some("12:34".to_string()),
                seconds_remaining: Some(754),
                in_intermission: true,
            }),
            ..Default::default()
        },
        FINAL_GAME_ID => GameLanding {
            id: game_id,
            game_state: Some(GameState::Final),
            away_team: Some(GameTeam {
                sog: Some(31),
                ..team("CAR", "Carolina Hurricanes", Some(4))
            }),
            home_team: Some(GameTeam {
                sog: Some(28),
                ..team("VGK", "Vegas Golden Knights", Some(3))
            }),
            period_descriptor: Some(PeriodDescriptor {
                number: Some(4),
                period_type: Some(PeriodType::Overtime),
            }),
            ..Default::default()
        },
        _ => GameLanding {
            id: game_id,
            game_state: Some(GameState::Final),
            away_team: Some(team("CHI", "Chicago Blackhawks", Some(2))),
            home_team: Some(team("STL", "St. Louis Blues", Some(5))),
            period_descriptor: Some(PeriodDescriptor {
                number: Some(3),
                period_type: Some(PeriodType::Regulation),
            }),
            ..Default::default()
        },
    }
}
