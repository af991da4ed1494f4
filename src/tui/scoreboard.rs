use crate::config::DisplayConfig;
use crate::reconcile::DisplayState;
use crate::tui::game_card::{GameCard, CARD_HEIGHT, CARD_WIDTH};
use crate::tui::StandaloneWidget;
use ratatui::{buffer::Buffer, layout::Rect, style::Style};

/// Gap between cards when displayed side-by-side
const CARD_GAP: u16 = 2;

/// Grid of game cards for one day.
pub struct ScoreboardView<'a> {
    pub cards: &'a [(i64, DisplayState)],
    pub selected: usize,
    pub loaded: bool,
    pub error_message: Option<&'a str>,
}

/// Number of card columns that fit in `width`.
pub fn columns_for_width(width: u16) -> u16 {
    (width / (CARD_WIDTH + CARD_GAP)).max(1)
}

impl ScoreboardView<'_> {
    fn render_message(&self, area: Rect, buf: &mut Buffer, text: &str, style: Style) {
        if area.height > 0 {
            buf.set_string(area.x + 1, area.y, text, style);
        }
    }
}

impl StandaloneWidget for ScoreboardView<'_> {
    fn render(&self, area: Rect, buf: &mut Buffer, config: &DisplayConfig) {
        if let Some(error) = self.error_message {
            self.render_message(area, buf, error, Style::default().fg(config.error_fg));
            return;
        }
        if !self.loaded {
            self.render_message(area, buf, "Loading games...", Style::default());
            return;
        }
        if self.cards.is_empty() {
            self.render_message(area, buf, "No games scheduled for this date.", Style::default());
            return;
        }

        let columns = columns_for_width(area.width);
        for (i, (_, display)) in self.cards.iter().enumerate() {
            let col = (i as u16) % columns;
            let row = (i as u16) / columns;
            let x = area.x + col * (CARD_WIDTH + CARD_GAP);
            let y = area.y + row * (CARD_HEIGHT + 1);
            if y + CARD_HEIGHT > area.bottom() {
                break; // Below the visible area
            }
            let card_area = Rect::new(x, y, CARD_WIDTH, CARD_HEIGHT);
            GameCard::new(display.clone(), i == self.selected).render(card_area, buf, config);
        }
    }
}
