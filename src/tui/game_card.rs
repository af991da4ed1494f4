use crate::config::DisplayConfig;
use crate::formatting::fit_to_width;
use crate::reconcile::{DisplayState, StatusBadge};
use crate::tui::StandaloneWidget;
/// GameCard widget - one game's score box in the scoreboard grid
///
/// Rendering is a pure function of the game's DisplayState; the card
/// never reads anything back from the screen.
use ratatui::{buffer::Buffer, layout::Rect, style::Style};

pub const CARD_WIDTH: u16 = 28;
pub const CARD_HEIGHT: u16 = 5;

const INNER_WIDTH: usize = (CARD_WIDTH - 4) as usize;
const HEADER_WIDTH: usize = (CARD_WIDTH - 1) as usize;

#[derive(Debug, Clone)]
pub struct GameCard {
    pub display: DisplayState,
    pub selected: bool,
}

impl GameCard {
    pub fn new(display: DisplayState, selected: bool) -> Self {
        GameCard { display, selected }
    }

    /// Header line above the box: badge-dependent status text.
    fn header(&self) -> String {
        let d = &self.display;
        match d.badge {
            StatusBadge::Final => d.final_text.to_string(),
            StatusBadge::Live | StatusBadge::Intermission => {
                match (d.period_text.is_empty(), d.clock_text.is_empty()) {
                    (false, false) => format!("{} - {}", d.period_text, d.clock_text),
                    (false, true) => d.period_text.clone(),
                    (true, false) => d.clock_text.clone(),
                    (true, true) => d.badge.label().to_string(),
                }
            }
            StatusBadge::Pregame => match start_time_label(d) {
                Some(start) => format!("Pregame - {}", start),
                None => "Pregame".to_string(),
            },
            StatusBadge::Scheduled => start_time_label(d).unwrap_or_else(|| "Scheduled".to_string()),
        }
    }

    fn header_style(&self, config: &DisplayConfig) -> Style {
        let fg = match self.display.badge {
            StatusBadge::Live => config.live_fg,
            StatusBadge::Intermission => config.intermission_fg,
            StatusBadge::Pregame | StatusBadge::Scheduled => config.scheduled_fg,
            StatusBadge::Final => config.final_fg,
        };
        Style::default().fg(fg)
    }

    fn border_style(&self, config: &DisplayConfig) -> Style {
        if self.selected {
            Style::default().fg(config.selection_fg)
        } else {
            Style::default()
        }
    }

    fn team_row(abbrev: &str, score: Option<i32>) -> String {
        let score = score.map_or("-".to_string(), |s| s.to_string());
        format!("{} {:>3}", fit_to_width(abbrev, INNER_WIDTH - 4), score)
    }
}

impl StandaloneWidget for GameCard {
    fn render(&self, area: Rect, buf: &mut Buffer, config: &DisplayConfig) {
        if area.width < CARD_WIDTH || area.height < CARD_HEIGHT {
            return; // Not enough space
        }

        let border = self.border_style(config);
        let chars = &config.box_chars;
        let inner = (CARD_WIDTH - 2) as usize;
        let mut y = area.y;

        let header = format!(" {}", fit_to_width(&self.header(), HEADER_WIDTH));
        buf.set_string(area.x, y, &header, self.header_style(config));
        y += 1;

        let top = format!(
            "{}{}{}",
            chars.top_left,
            chars.horizontal.repeat(inner),
            chars.top_right
        );
        buf.set_string(area.x, y, &top, border);
        y += 1;

        let away = format!(
            "{} {} {}",
            chars.vertical,
            Self::team_row(&self.display.away_abbrev, self.display.away_score),
            chars.vertical
        );
        buf.set_string(area.x, y, &away, border);
        y += 1;

        let home = format!(
            "{} {} {}",
            chars.vertical,
            Self::team_row(&self.display.home_abbrev, self.display.home_score),
            chars.vertical
        );
        buf.set_string(area.x, y, &home, border);
        y += 1;

        let bottom = format!(
            "{}{}{}",
            chars.bottom_left,
            chars.horizontal.repeat(inner),
            chars.bottom_right
        );
        buf.set_string(area.x, y, &bottom, border);
    }
}

/// Start time shown for games that have not begun: the UTC wall time of
/// the payload's ISO timestamp, or None when absent/unparseable.
fn start_time_label(display: &DisplayState) -> Option<String> {
    let raw = display.start_time_utc.as_deref()?;
    let parsed = chrono::DateTime::parse_from_rfc3339(raw).ok()?;
    Some(parsed.format("%H:%M UTC").to_string())
}
