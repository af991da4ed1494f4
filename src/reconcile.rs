//! Display-state reconciliation.
//!
//! Each visible game keeps a [`DisplayState`]: the last values actually
//! rendered for it. A fresh poll produces a [`GameSnapshot`], and
//! [`reconcile`] decides, field by field, whether the new data
//! overwrites, preserves, or blanks what is on screen. The headline
//! invariant is anti-flicker: a payload that momentarily omits clock or
//! score data must not blank values we previously showed.

use crate::clock::format_clock;
use crate::snapshot::GameSnapshot;
use rink_api::{GameState, PeriodType};
use std::collections::HashMap;

/// Badge family for a game card. Recomputed from scratch on every poll;
/// only the textual clock/period parts carry preservation semantics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusBadge {
    #[default]
    Scheduled,
    Pregame,
    Live,
    Intermission,
    Final,
}

impl StatusBadge {
    pub fn from_snapshot(snap: &GameSnapshot) -> Self {
        if snap.state.is_finished() {
            StatusBadge::Final
        } else if snap.state.is_live() {
            if snap.in_intermission {
                StatusBadge::Intermission
            } else {
                StatusBadge::Live
            }
        } else if snap.state == GameState::PreGame {
            StatusBadge::Pregame
        } else {
            StatusBadge::Scheduled
        }
    }

    /// Live and Intermission are the in-progress superstate: the only
    /// badge family whose games are worth a per-game detail fetch.
    pub fn is_in_progress(&self) -> bool {
        matches!(self, StatusBadge::Live | StatusBadge::Intermission)
    }

    /// Short label, e.g. for the final line of a card.
    pub fn label(&self) -> &'static str {
        match self {
            StatusBadge::Scheduled => "Scheduled",
            StatusBadge::Pregame => "Pregame",
            StatusBadge::Live => "Live",
            StatusBadge::Intermission => "Intermission",
            StatusBadge::Final => "Final",
        }
    }
}

/// "Final", with the overtime/shootout suffix the site shows.
pub fn final_label(period_type: Option<PeriodType>) -> &'static str {
    match period_type {
        Some(PeriodType::Overtime) => "Final/OT",
        Some(PeriodType::Shootout) => "Final/SO",
        _ => "Final",
    }
}

/// Last-rendered representation of one game.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayState {
    pub away_abbrev: String,
    pub home_abbrev: String,
    pub away_score: Option<i32>,
    pub home_score: Option<i32>,
    pub away_sog: Option<i32>,
    pub home_sog: Option<i32>,
    pub clock_text: String,
    pub period_text: String,
    /// False once a game is finished: the clock region is hidden rather
    /// than rendered as empty strings.
    pub show_clock: bool,
    pub badge: StatusBadge,
    pub final_text: &'static str,
    pub start_time_utc: Option<String>,
}

impl Default for DisplayState {
    fn default() -> Self {
        DisplayState {
            away_abbrev: String::new(),
            home_abbrev: String::new(),
            away_score: None,
            home_score: None,
            away_sog: None,
            home_sog: None,
            clock_text: String::new(),
            period_text: String::new(),
            show_clock: true,
            badge: StatusBadge::Scheduled,
            final_text: "Final",
            start_time_utc: None,
        }
    }
}

/// Which display fields changed in one reconciliation, for minimal
/// re-rendering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FieldChanges {
    pub scores: bool,
    pub clock: bool,
    pub period: bool,
    pub badge: bool,
}

impl FieldChanges {
    pub fn any(&self) -> bool {
        self.scores || self.clock || self.period || self.badge
    }
}

/// Merge a fresh snapshot into the previously displayed state.
///
/// Per-field contract:
/// - scores (and shots on goal): overwritten when present, preserved
///   when the payload omits them, never blanked;
/// - clock/period text: the formatter's non-empty output overwrites;
///   empty output preserves the previous value unless the game is
///   finished, in which case both are force-cleared and the clock
///   region is hidden;
/// - badge: always recomputed from the snapshot.
pub fn reconcile(prev: &DisplayState, snap: &GameSnapshot) -> (DisplayState, FieldChanges) {
    let mut next = prev.clone();

    if let Some(abbrev) = &snap.away_abbrev {
        next.away_abbrev = abbrev.clone();
    }
    if let Some(abbrev) = &snap.home_abbrev {
        next.home_abbrev = abbrev.clone();
    }
    if let Some(start) = &snap.start_time_utc {
        next.start_time_utc = Some(start.clone());
    }

    if let Some(score) = snap.away_score {
        next.away_score = Some(score);
    }
    if let Some(score) = snap.home_score {
        next.home_score = Some(score);
    }
    if let Some(sog) = snap.away_sog {
        next.away_sog = Some(sog);
    }
    if let Some(sog) = snap.home_sog {
        next.home_sog = Some(sog);
    }

    let display = format_clock(snap);
    if snap.state.is_finished() {
        next.clock_text.clear();
        next.period_text.clear();
        next.show_clock = false;
        next.final_text = final_label(snap.period_type);
    } else {
        next.show_clock = true;
        if !display.clock_text.is_empty() {
            next.clock_text = display.clock_text;
        }
        if !display.period_text.is_empty() {
            next.period_text = display.period_text;
        }
    }

    next.badge = StatusBadge::from_snapshot(snap);

    let changes = FieldChanges {
        scores: next.away_score != prev.away_score
            || next.home_score != prev.home_score
            || next.away_sog != prev.away_sog
            || next.home_sog != prev.home_sog,
        clock: next.clock_text != prev.clock_text || next.show_clock != prev.show_clock,
        period: next.period_text != prev.period_text,
        badge: next.badge != prev.badge,
    };

    (next, changes)
}

#[derive(Debug, Clone, Default)]
struct GameSlot {
    display: DisplayState,
    last_seq: u64,
}

/// Display states for every game currently on screen, keyed by game id.
///
/// Applications carry the poll tick's sequence number; a snapshot that
/// arrives with an older sequence than the last one applied to its game
/// is dropped, so a slow early fetch cannot overwrite a faster later
/// one. Equal sequences apply normally (fan-out within a tick,
/// re-application of the same snapshot).
#[derive(Debug, Default)]
pub struct ScoreboardState {
    slots: HashMap<i64, GameSlot>,
}

impl ScoreboardState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reconcile one snapshot in. Returns the changed fields, or None
    /// when the snapshot was stale and ignored.
    pub fn apply(&mut self, seq: u64, snap: &GameSnapshot) -> Option<FieldChanges> {
        let slot = self.slots.entry(snap.id).or_default();
        if seq < slot.last_seq {
            tracing::debug!(
                game_id = snap.id,
                seq,
                last_seq = slot.last_seq,
                "dropping stale snapshot"
            );
            return None;
        }
        let (next, changes) = reconcile(&slot.display, snap);
        slot.display = next;
        slot.last_seq = seq;
        Some(changes)
    }

    pub fn display(&self, game_id: i64) -> Option<&DisplayState> {
        self.slots.get(&game_id).map(|slot| &slot.display)
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Drop every slot, e.g. when navigating to another date.
    pub fn clear(&mut self) {
        self.slots.clear();
    }
}
