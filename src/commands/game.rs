use crate::cache;
use crate::clock::format_clock;
use crate::data_provider::RinkDataProvider;
use crate::reconcile::{final_label, StatusBadge};
use crate::snapshot::GameSnapshot;
use crate::team_abbrev::abbrev_to_team_name;
use anyhow::{Context, Result};

pub async fn run(client: &dyn RinkDataProvider, game_id: i64) -> Result<()> {
    let landing = cache::fetch_game_cached(client, game_id)
        .await
        .context("Failed to fetch game")?;
    let snap = GameSnapshot::from_landing(&landing);

    for line in build_summary(&snap) {
        println!("{}", line);
    }

    Ok(())
}

fn team_line(abbrev: Option<&str>, score: Option<i32>, sog: Option<i32>) -> String {
    let abbrev = abbrev.unwrap_or("???");
    let name = abbrev_to_team_name(abbrev).unwrap_or(abbrev);
    let score = score.map_or("-".to_string(), |s| s.to_string());
    let sog = sog.map_or(String::new(), |s| format!("  (SOG {})", s));
    format!("{:<24} {:>2}{}", name, score, sog)
}

fn build_summary(snap: &GameSnapshot) -> Vec<String> {
    let mut lines = Vec::new();

    lines.push(team_line(
        snap.away_abbrev.as_deref(),
        snap.away_score,
        snap.away_sog,
    ));
    lines.push(team_line(
        snap.home_abbrev.as_deref(),
        snap.home_score,
        snap.home_sog,
    ));

    let badge = StatusBadge::from_snapshot(snap);
    match badge {
        StatusBadge::Final => {
            lines.push(format!("Status: {}", final_label(snap.period_type)));
        }
        StatusBadge::Live | StatusBadge::Intermission => {
            lines.push(format!("Status: {}", badge.label()));
            let display = format_clock(snap);
            if !display.period_text.is_empty() {
                lines.push(format!("Period: {}", display.period_text));
            }
            if !display.clock_text.is_empty() {
                lines.push(format!("Clock:  {}", display.clock_text));
            }
        }
        StatusBadge::Pregame | StatusBadge::Scheduled => {
            lines.push(format!("Status: {}", badge.label()));
            if let Some(start) = &snap.start_time_utc {
                lines.push(format!("Starts: {}", start));
            }
        }
    }

    lines
}
