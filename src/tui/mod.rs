pub mod app;
pub mod detail;
pub mod game_card;
pub mod scoreboard;
pub mod status_bar;

#[cfg(test)]
pub mod testing;

pub use app::App;

use crate::config::{Config, DisplayConfig};
use crate::data_provider::RinkDataProvider;
use crate::{SharedData, SharedDataHandle};
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, buffer::Buffer, layout::Rect, Terminal};
use std::io;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

/// Widgets that render straight into a buffer region.
pub trait StandaloneWidget {
    fn render(&self, area: Rect, buf: &mut Buffer, config: &DisplayConfig);
}

/// Main entry point for TUI mode
pub async fn run(client: Arc<dyn RinkDataProvider>, config: Config) -> Result<(), io::Error> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let shared: SharedDataHandle = Arc::new(RwLock::new(SharedData {
        config: config.clone(),
        ..Default::default()
    }));

    let mut app = App::new(client, shared, config);
    app.start_schedule_polling();

    let result = run_loop(&mut terminal, &mut app).await;

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

async fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> io::Result<()> {
    loop {
        let model = app.render_model().await;
        terminal.draw(|f| {
            let area = f.area();
            app.draw(&model, area, f.buffer_mut());
        })?;

        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press && app.handle_key(key).await == app::KeyOutcome::Quit {
                    return Ok(());
                }
            }
        }
    }
}
