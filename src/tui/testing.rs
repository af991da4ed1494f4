//! Test utilities for TUI widget rendering.

use crate::config::{Config, DisplayConfig};
use crate::tui::StandaloneWidget;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;

/// Default display config for tests (unicode borders, default theme).
pub fn test_config() -> DisplayConfig {
    Config::default().display()
}

/// Render a widget into a fresh buffer of the given size.
pub fn render_widget(widget: &impl StandaloneWidget, width: u16, height: u16) -> Buffer {
    let mut buf = Buffer::empty(Rect::new(0, 0, width, height));
    let config = test_config();
    widget.render(buf.area, &mut buf, &config);
    buf
}

/// Extract the buffer's rows as strings.
pub fn buffer_lines(buf: &Buffer) -> Vec<String> {
    let area = buf.area();
    (0..area.height)
        .map(|y| {
            (0..area.width)
                .map(|x| buf[(x, y)].symbol())
                .collect::<String>()
        })
        .collect()
}

/// Compare rendered rows against expected rows, ignoring trailing
/// whitespace. Expected may omit trailing blank rows.
pub fn assert_buffer(buf: &Buffer, expected: &[&str]) {
    let actual = buffer_lines(buf);
    assert!(
        expected.len() <= actual.len(),
        "Expected {} lines but buffer has {}",
        expected.len(),
        actual.len()
    );
    for (i, expected_line) in expected.iter().enumerate() {
        assert_eq!(
            actual[i].trim_end(),
            expected_line.trim_end(),
            "Line {} mismatch:\nExpected: '{}'\nActual:   '{}'",
            i,
            expected_line,
            actual[i]
        );
    }
    for (i, line) in actual.iter().enumerate().skip(expected.len()) {
        assert_eq!(
            line.trim_end(),
            "",
            "Line {} expected blank but was '{}'",
            i,
            line
        );
    }
}
