use crate::background::{poll_game_loop, poll_schedule_loop, PollSession};
use crate::config::{Config, DisplayConfig};
use crate::data_provider::RinkDataProvider;
use crate::reconcile::DisplayState;
use crate::tui::detail::DetailView;
use crate::tui::scoreboard::ScoreboardView;
use crate::tui::status_bar::StatusBar;
use crate::tui::StandaloneWidget;
use crate::{RetryState, SharedDataHandle};
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{buffer::Buffer, layout::Rect};
use std::sync::Arc;
use std::time::SystemTime;
use tokio::sync::mpsc;

/// Buffer size for manual refresh trigger channels
const REFRESH_CHANNEL_BUFFER_SIZE: usize = 10;

const SCOREBOARD_HINTS: &str = "q:quit  \u{2190}/\u{2192}:date  t:today  \u{2191}/\u{2193}:select  enter:game  r:refresh";
const DETAIL_HINTS: &str = "esc:back  r:refresh  q:quit";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    Continue,
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ViewMode {
    Scoreboard,
    Detail(i64),
}

/// Everything `draw` needs, copied out of the shared state so rendering
/// itself stays synchronous.
pub struct RenderModel {
    pub date: String,
    pub loaded: bool,
    pub error_message: Option<String>,
    pub last_refresh: Option<SystemTime>,
    pub retry: Option<RetryState>,
    pub cards: Vec<(i64, DisplayState)>,
    pub detail: Option<DisplayState>,
}

/// Owns the view state and, per the at-most-one-session rule, the poll
/// sessions driving it. Navigation restarts or stops sessions; nothing
/// else touches the timers.
pub struct App {
    client: Arc<dyn RinkDataProvider>,
    shared: SharedDataHandle,
    config: Config,
    display_config: DisplayConfig,
    view: ViewMode,
    selected: usize,
    schedule_session: PollSession,
    game_session: PollSession,
    schedule_refresh_tx: Option<mpsc::Sender<()>>,
    game_refresh_tx: Option<mpsc::Sender<()>>,
}

impl App {
    pub fn new(client: Arc<dyn RinkDataProvider>, shared: SharedDataHandle, config: Config) -> Self {
        let display_config = config.display();
        App {
            client,
            shared,
            config,
            display_config,
            view: ViewMode::Scoreboard,
            selected: 0,
            schedule_session: PollSession::new("schedule"),
            game_session: PollSession::new("game"),
            schedule_refresh_tx: None,
            game_refresh_tx: None,
        }
    }

    /// (Re)start the schedule-view session. Any previous session for
    /// this view is cancelled first.
    pub fn start_schedule_polling(&mut self) {
        let (tx, rx) = mpsc::channel::<()>(REFRESH_CHANNEL_BUFFER_SIZE);
        self.schedule_refresh_tx = Some(tx);
        self.schedule_session.start(poll_schedule_loop(
            Arc::clone(&self.client),
            Arc::clone(&self.shared),
            self.config.schedule_refresh_interval as u64,
            rx,
        ));
    }

    fn open_detail(&mut self, game_id: i64) {
        self.view = ViewMode::Detail(game_id);
        let (tx, rx) = mpsc::channel::<()>(REFRESH_CHANNEL_BUFFER_SIZE);
        self.game_refresh_tx = Some(tx);
        self.game_session.start(poll_game_loop(
            Arc::clone(&self.client),
            Arc::clone(&self.shared),
            game_id,
            self.config.live_refresh_interval as u64,
            rx,
        ));
    }

    async fn close_detail(&mut self) {
        self.view = ViewMode::Scoreboard;
        self.game_session.stop();
        self.game_refresh_tx = None;
        self.shared.write().await.retry = None;
    }

    async fn change_date(&mut self, days: i64) {
        let date = {
            let mut s = self.shared.write().await;
            let date = s.game_date.add_days(days);
            s.set_date(date.clone());
            date
        };
        tracing::debug!("navigated to {}", date);
        self.selected = 0;
        self.start_schedule_polling();
    }

    async fn goto_today(&mut self) {
        {
            let mut s = self.shared.write().await;
            s.set_date(rink_api::GameDate::today());
        }
        self.selected = 0;
        self.start_schedule_polling();
    }

    fn manual_refresh(&self) {
        let tx = match self.view {
            ViewMode::Scoreboard => self.schedule_refresh_tx.as_ref(),
            ViewMode::Detail(_) => self.game_refresh_tx.as_ref(),
        };
        if let Some(tx) = tx {
            let _ = tx.try_send(());
        }
    }

    pub async fn render_model(&mut self) -> RenderModel {
        let s = self.shared.read().await;
        let cards: Vec<(i64, DisplayState)> = s
            .schedule
            .as_ref()
            .map(|schedule| {
                schedule
                    .games
                    .iter()
                    .map(|game| {
                        (
                            game.id,
                            s.scoreboard.display(game.id).cloned().unwrap_or_default(),
                        )
                    })
                    .collect()
            })
            .unwrap_or_default();

        if !cards.is_empty() && self.selected >= cards.len() {
            self.selected = cards.len() - 1;
        }

        let detail = match self.view {
            ViewMode::Detail(game_id) => {
                Some(s.scoreboard.display(game_id).cloned().unwrap_or_default())
            }
            ViewMode::Scoreboard => None,
        };

        RenderModel {
            date: s.game_date.to_api_string(),
            loaded: s.loaded,
            error_message: s.error_message.clone(),
            last_refresh: s.last_refresh,
            retry: s.retry,
            cards,
            detail,
        }
    }

    pub fn draw(&self, model: &RenderModel, area: Rect, buf: &mut Buffer) {
        if area.height < 2 {
            return;
        }
        let content = Rect::new(area.x, area.y, area.width, area.height - 1);
        let bottom = Rect::new(area.x, area.bottom() - 1, area.width, 1);

        match (&self.view, &model.detail) {
            (ViewMode::Detail(_), Some(display)) => {
                DetailView {
                    display,
                    retry: model.retry,
                    error_message: model.error_message.as_deref(),
                }
                .render(content, buf, &self.display_config);
            }
            _ => {
                ScoreboardView {
                    cards: &model.cards,
                    selected: self.selected,
                    loaded: model.loaded,
                    error_message: model.error_message.as_deref(),
                }
                .render(content, buf, &self.display_config);
            }
        }

        StatusBar {
            date: &model.date,
            last_refresh: model.last_refresh,
            time_format: &self.config.time_format,
            hints: match self.view {
                ViewMode::Scoreboard => SCOREBOARD_HINTS,
                ViewMode::Detail(_) => DETAIL_HINTS,
            },
        }
        .render(bottom, buf, &self.display_config);
    }

    pub async fn handle_key(&mut self, key: KeyEvent) -> KeyOutcome {
        match key.code {
            KeyCode::Char('q') => return KeyOutcome::Quit,
            KeyCode::Char('r') => self.manual_refresh(),
            KeyCode::Esc => match self.view {
                ViewMode::Detail(_) => self.close_detail().await,
                ViewMode::Scoreboard => return KeyOutcome::Quit,
            },
            _ => {}
        }

        if self.view == ViewMode::Scoreboard {
            match key.code {
                KeyCode::Left => self.change_date(-1).await,
                KeyCode::Right => self.change_date(1).await,
                KeyCode::Char('t') => self.goto_today().await,
                KeyCode::Up => {
                    self.selected = self.selected.saturating_sub(1);
                }
                KeyCode::Down => {
                    let count = self.card_count().await;
                    if self.selected + 1 < count {
                        self.selected += 1;
                    }
                }
                KeyCode::Enter => {
                    if let Some(game_id) = self.selected_game_id().await {
                        self.open_detail(game_id);
                    }
                }
                _ => {}
            }
        }

        KeyOutcome::Continue
    }

    async fn card_count(&self) -> usize {
        self.shared
            .read()
            .await
            .schedule
            .as_ref()
            .map_or(0, |schedule| schedule.games.len())
    }

    async fn selected_game_id(&self) -> Option<i64> {
        self.shared
            .read()
            .await
            .schedule
            .as_ref()
            .and_then(|schedule| schedule.games.get(self.selected))
            .map(|game| game.id)
    }
}
