use crate::cache;
use crate::clock::format_clock;
use crate::commands::parse_game_date;
use crate::data_provider::RinkDataProvider;
use crate::reconcile::{final_label, StatusBadge};
use crate::snapshot::GameSnapshot;
use anyhow::{Context, Result};

// Layout Constants
/// Inner width of a game box
const BOX_WIDTH: usize = 58;

/// Width of header separator line
const HEADER_SEPARATOR_WIDTH: usize = 60;

pub async fn run(client: &dyn RinkDataProvider, date: Option<String>) -> Result<()> {
    let game_date = parse_game_date(date)?;

    let schedule = cache::fetch_schedule_cached(client, game_date)
        .await
        .context("Failed to fetch schedule")?;

    println!("\n{}", "═".repeat(HEADER_SEPARATOR_WIDTH));
    println!("SCORES - {}", schedule.date);
    println!("{}\n", "═".repeat(HEADER_SEPARATOR_WIDTH));

    if schedule.number_of_games == 0 {
        println!("No games scheduled for this date.\n");
        return Ok(());
    }

    for (i, game) in schedule.games.iter().enumerate() {
        if i > 0 {
            println!();
        }

        // Two-tier: the landing payload carries the authoritative clock
        // for anything in progress; fall back to the schedule row.
        let snap = if game.game_state.is_live() {
            match cache::fetch_game_cached(client, game.id).await {
                Ok(landing) => GameSnapshot::merged(game, &landing),
                Err(_) => GameSnapshot::from_schedule(game),
            }
        } else {
            GameSnapshot::from_schedule(game)
        };

        display_game(&snap);
    }

    println!();

    Ok(())
}

fn display_game(snap: &GameSnapshot) {
    let away = snap.away_abbrev.as_deref().unwrap_or("???");
    let home = snap.home_abbrev.as_deref().unwrap_or("???");

    println!("┌{:─<width$}┐", "", width = BOX_WIDTH);

    let score_line = match (snap.away_score, snap.home_score) {
        (Some(away_score), Some(home_score)) => {
            format!("{:<12} {:>2}        {:>2}  {:<12}", away, away_score, home_score, home)
        }
        _ => format!("{:<12}  @  {:<12}", away, home),
    };
    println!("│ {:<width$} │", score_line, width = BOX_WIDTH - 2);
    println!("│ {:<width$} │", status_line(snap), width = BOX_WIDTH - 2);

    println!("└{:─<width$}┘", "", width = BOX_WIDTH);
}

/// One-line status in the card footer, derived entirely from the
/// snapshot (the one-shot command has no previous render to preserve).
fn status_line(snap: &GameSnapshot) -> String {
    match StatusBadge::from_snapshot(snap) {
        StatusBadge::Final => final_label(snap.period_type).to_string(),
        StatusBadge::Live | StatusBadge::Intermission => {
            let display = format_clock(snap);
            match (display.period_text.is_empty(), display.clock_text.is_empty()) {
                (false, false) => format!("{} - {}", display.period_text, display.clock_text),
                (false, true) => display.period_text,
                (true, false) => display.clock_text,
                (true, true) => "Live".to_string(),
            }
        }
        StatusBadge::Pregame => match &snap.start_time_utc {
            Some(start) => format!("Pregame - {}", start),
            None => "Pregame".to_string(),
        },
        StatusBadge::Scheduled => match &snap.start_time_utc {
            Some(start) => format!("Scheduled: {}", start),
            None => "Scheduled".to_string(),
        },
    }
}
