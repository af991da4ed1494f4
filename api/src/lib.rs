pub mod client;
mod date;
mod types;

pub use client::{ApiError, ApiResult, Client};
pub use date::GameDate;
pub use types::{
    DaySchedule, GameClock, GameDay, GameLanding, GameState, GameTeam, LocalizedString,
    PeriodDescriptor, PeriodType, ScheduleGame, ScheduleResponse,
};
