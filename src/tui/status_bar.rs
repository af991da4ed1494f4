use crate::config::DisplayConfig;
use crate::tui::StandaloneWidget;
use chrono::{DateTime, Local};
use ratatui::{buffer::Buffer, layout::Rect, style::Style};
use std::time::SystemTime;

/// Bottom bar: date, last refresh time, key hints.
pub struct StatusBar<'a> {
    pub date: &'a str,
    pub last_refresh: Option<SystemTime>,
    pub time_format: &'a str,
    pub hints: &'a str,
}

impl StatusBar<'_> {
    fn refresh_text(&self) -> String {
        match self.last_refresh {
            Some(at) => {
                let local: DateTime<Local> = at.into();
                format!("updated {}", local.format(self.time_format))
            }
            None => "waiting for data".to_string(),
        }
    }
}

impl StandaloneWidget for StatusBar<'_> {
    fn render(&self, area: Rect, buf: &mut Buffer, _config: &DisplayConfig) {
        if area.height == 0 {
            return;
        }
        let line = format!("{} │ {} │ {}", self.date, self.refresh_text(), self.hints);
        buf.set_string(area.x + 1, area.y, line, Style::default());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::testing::{buffer_lines, render_widget};

    #[test]
    fn test_status_bar_without_refresh() {
        let bar = StatusBar {
            date: "2026-01-07",
            last_refresh: None,
            time_format: "%H:%M:%S",
            hints: "q:quit  r:refresh",
        };
        let buf = render_widget(&bar, 60, 1);
        let line = &buffer_lines(&buf)[0];
        assert!(line.contains("2026-01-07"));
        assert!(line.contains("waiting for data"));
        assert!(line.contains("q:quit"));
    }

    #[test]
    fn test_status_bar_with_refresh_time() {
        let bar = StatusBar {
            date: "2026-01-07",
            last_refresh: Some(SystemTime::now()),
            time_format: "%H:%M:%S",
            hints: "",
        };
        let buf = render_widget(&bar, 60, 1);
        assert!(buffer_lines(&buf)[0].contains("updated "));
    }
}
