//! Clock and period text derivation.
//!
//! Pure functions from a [`GameSnapshot`] to the strings the scoreboard
//! shows. Precedence among the competing clock sources lives entirely
//! here: numeric seconds-remaining beats free text, free text beats
//! nothing, and finished games never show a clock.

use crate::snapshot::GameSnapshot;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClockDisplay {
    pub clock_text: String,
    pub period_text: String,
}

/// Format whole seconds as `m:ss`.
pub fn format_seconds(secs: u32) -> String {
    format!("{}:{:02}", secs / 60, secs % 60)
}

/// Derive the displayable clock and period text for one snapshot.
///
/// Rules, in priority order:
/// 1. finished game: both fields empty, whatever the payload says;
/// 2. numeric `secondsRemaining`: authoritative, formatted `m:ss`.
///    A bare zero with no free-text corroboration is treated as "no
///    clock information" rather than shown as `0:00`;
/// 3. non-empty free-text clock, verbatim;
/// 4. nothing.
pub fn format_clock(snap: &GameSnapshot) -> ClockDisplay {
    if snap.state.is_finished() {
        return ClockDisplay::default();
    }

    let clock_text = match snap.seconds_remaining {
        Some(0) if snap.clock_text.is_none() => String::new(),
        Some(secs) => format_seconds(secs),
        None => snap.clock_text.clone().unwrap_or_default(),
    };

    let period_text = if snap.in_intermission {
        match snap.period_number {
            Some(n) => format!("Intermission {}", n),
            None => "Intermission".to_string(),
        }
    } else if snap.state.is_live() {
        match (snap.period_number, snap.period_type.and_then(|t| t.label())) {
            (Some(n), Some(label)) => format!("{} {}", label, n),
            (Some(n), None) => format!("Period {}", n),
            _ => String::new(),
        }
    } else {
        String::new()
    };

    ClockDisplay {
        clock_text,
        period_text,
    }
}
