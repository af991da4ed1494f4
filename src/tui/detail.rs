use crate::config::DisplayConfig;
use crate::reconcile::{DisplayState, StatusBadge};
use crate::team_abbrev::abbrev_to_team_name;
use crate::tui::StandaloneWidget;
use crate::RetryState;
use ratatui::{buffer::Buffer, layout::Rect, style::Style};

/// Single-game panel: score, shots, status, and the clock region.
///
/// The clock region is dropped entirely for finished games instead of
/// being rendered as empty lines.
pub struct DetailView<'a> {
    pub display: &'a DisplayState,
    pub retry: Option<RetryState>,
    pub error_message: Option<&'a str>,
}

fn team_name(abbrev: &str) -> &str {
    abbrev_to_team_name(abbrev).unwrap_or(abbrev)
}

fn score_text(score: Option<i32>) -> String {
    score.map_or("-".to_string(), |s| s.to_string())
}

impl DetailView<'_> {
    fn badge_style(&self, config: &DisplayConfig) -> Style {
        let fg = match self.display.badge {
            StatusBadge::Live => config.live_fg,
            StatusBadge::Intermission => config.intermission_fg,
            StatusBadge::Pregame | StatusBadge::Scheduled => config.scheduled_fg,
            StatusBadge::Final => config.final_fg,
        };
        Style::default().fg(fg)
    }
}

impl StandaloneWidget for DetailView<'_> {
    fn render(&self, area: Rect, buf: &mut Buffer, config: &DisplayConfig) {
        let x = area.x + 1;
        let mut y = area.y;
        let plain = Style::default();

        if let Some(error) = self.error_message {
            buf.set_string(x, y, error, Style::default().fg(config.error_fg));
            y += 1;
        }

        if y >= area.bottom() {
            return;
        }

        let d = self.display;
        let matchup = format!(
            "{} {}  -  {} {}",
            team_name(&d.away_abbrev),
            score_text(d.away_score),
            score_text(d.home_score),
            team_name(&d.home_abbrev),
        );
        buf.set_string(x, y, &matchup, plain);
        y += 1;

        if let (Some(away_sog), Some(home_sog)) = (d.away_sog, d.home_sog) {
            if y < area.bottom() {
                let shots = format!("SOG {}  -  {}", away_sog, home_sog);
                buf.set_string(x, y, &shots, plain);
                y += 1;
            }
        }

        if y < area.bottom() {
            let label = if d.badge == StatusBadge::Final {
                d.final_text
            } else {
                d.badge.label()
            };
            buf.set_string(x, y, label, self.badge_style(config));
            y += 1;
        }

        if d.show_clock {
            if !d.clock_text.is_empty() && y < area.bottom() {
                buf.set_string(x, y, &d.clock_text, plain);
                y += 1;
            }
            if !d.period_text.is_empty() && y < area.bottom() {
                buf.set_string(x, y, &d.period_text, plain);
                y += 1;
            }
        }

        if let Some(retry) = self.retry {
            if y < area.bottom() {
                let line = format!(
                    "Retrying in {}s (attempt {})",
                    retry.seconds_until_retry(),
                    retry.consecutive_failures + 1
                );
                buf.set_string(x, y, &line, Style::default().fg(config.error_fg));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::testing::{buffer_lines, render_widget};
    use std::time::{Duration, Instant};

    fn live_display() -> DisplayState {
        DisplayState {
            away_abbrev: "TOR".into(),
            home_abbrev: "OTT".into(),
            away_score: Some(2),
            home_score: Some(1),
            away_sog: Some(18),
            home_sog: Some(11),
            clock_text: "5:30".into(),
            period_text: "Period 2".into(),
            badge: StatusBadge::Live,
            ..Default::default()
        }
    }

    #[test]
    fn test_live_detail_shows_clock_region() {
        let display = live_display();
        let view = DetailView {
            display: &display,
            retry: None,
            error_message: None,
        };
        let buf = render_widget(&view, 50, 8);
        let lines = buffer_lines(&buf);
        assert!(lines[0].contains("Toronto Maple Leafs 2  -  1 Ottawa Senators"));
        assert!(lines[1].contains("SOG 18  -  11"));
        assert!(lines[2].contains("Live"));
        assert!(lines[3].contains("5:30"));
        assert!(lines[4].contains("Period 2"));
    }

    #[test]
    fn test_final_detail_hides_clock_region() {
        let mut display = live_display();
        display.badge = StatusBadge::Final;
        display.final_text = "Final/SO";
        display.show_clock = false;
        display.clock_text.clear();
        display.period_text.clear();
        let view = DetailView {
            display: &display,
            retry: None,
            error_message: None,
        };
        let buf = render_widget(&view, 50, 8);
        let lines = buffer_lines(&buf);
        assert!(lines[2].contains("Final/SO"));
        assert!(!lines.iter().any(|l| l.contains("5:30")));
        assert!(!lines.iter().any(|l| l.contains("Period")));
    }

    #[test]
    fn test_retry_countdown_is_rendered() {
        let display = live_display();
        let view = DetailView {
            display: &display,
            retry: Some(RetryState {
                next_attempt: Instant::now() + Duration::from_secs(19),
                delay: Duration::from_secs(20),
                consecutive_failures: 2,
            }),
            error_message: None,
        };
        let buf = render_widget(&view, 50, 8);
        let lines = buffer_lines(&buf);
        assert!(lines.iter().any(|l| l.contains("Retrying in 1") && l.contains("(attempt 3)")));
    }

    #[test]
    fn test_error_message_renders_first() {
        let display = live_display();
        let view = DetailView {
            display: &display,
            retry: None,
            error_message: Some("Failed to load game"),
        };
        let buf = render_widget(&view, 50, 8);
        assert!(buffer_lines(&buf)[0].contains("Failed to load game"));
    }
}
