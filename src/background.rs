//! Poll sessions and the fetch/reconcile loops behind them.
//!
//! One `PollSession` per view, at most. The schedule view runs a
//! two-tier tick: the day's schedule once, then a landing fetch for
//! every in-progress game, since the list payload's clock fields are
//! less authoritative than the per-game endpoint. The single-game view
//! polls one landing with exponential backoff on consecutive failures.
//! Errors never escape a tick; the timers keep running.

use crate::cache;
use crate::data_provider::RinkDataProvider;
use crate::snapshot::GameSnapshot;
use crate::{RetryState, SharedDataHandle};
use futures::future::join_all;
use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant, SystemTime};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

/// Retry delay ceiling for the single-game view.
pub const RETRY_CAP: Duration = Duration::from_secs(300);

/// One recurring fetch/reconcile cycle bound to a view. Owns its timer
/// task; starting a session cancels whatever the view was running
/// before, so a view never has two concurrent timers.
#[derive(Debug)]
pub struct PollSession {
    name: &'static str,
    handle: Option<JoinHandle<()>>,
}

impl PollSession {
    pub fn new(name: &'static str) -> Self {
        PollSession { name, handle: None }
    }

    /// Replace any running loop with `fut`.
    pub fn start<F>(&mut self, fut: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        self.stop();
        tracing::debug!(session = self.name, "starting poll session");
        self.handle = Some(tokio::spawn(fut));
    }

    /// Cancel the running loop. Safe to call when nothing is running.
    pub fn stop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
            tracing::debug!(session = self.name, "stopped poll session");
        }
    }

    pub fn is_running(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }
}

impl Drop for PollSession {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Consecutive-failure backoff: the delay doubles from the base up to a
/// cap, and any success resets it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Backoff {
    base: Duration,
    cap: Duration,
    consecutive_failures: u32,
}

impl Backoff {
    pub fn new(base: Duration, cap: Duration) -> Self {
        Backoff {
            base,
            cap,
            consecutive_failures: 0,
        }
    }

    /// Record a failure and return how long to wait before retrying.
    pub fn record_failure(&mut self) -> Duration {
        self.consecutive_failures += 1;
        self.current_delay()
    }

    pub fn current_delay(&self) -> Duration {
        if self.consecutive_failures == 0 {
            return self.base;
        }
        let exp = (self.consecutive_failures - 1).min(16);
        self.base.saturating_mul(1u32 << exp).min(self.cap)
    }

    pub fn reset(&mut self) {
        self.consecutive_failures = 0;
    }

    pub fn failures(&self) -> u32 {
        self.consecutive_failures
    }
}

/// One schedule-view tick: fetch the day, fan out landing fetches for
/// the in-progress games, reconcile everything into the scoreboard.
/// Failures are contained here; an errored tick contributes no update.
pub async fn run_schedule_tick(client: &dyn RinkDataProvider, shared: &SharedDataHandle) {
    let (date, seq) = {
        let mut s = shared.write().await;
        (s.game_date.clone(), s.next_seq())
    };

    let schedule = match client.daily_schedule(Some(date)).await {
        Ok(schedule) => schedule,
        Err(e) => {
            let mut s = shared.write().await;
            if s.loaded {
                tracing::debug!("schedule poll failed, keeping previous render: {}", e);
            } else {
                s.error_message = Some(format!("Failed to load schedule: {}", e));
            }
            return;
        }
    };

    let fetches = schedule
        .games
        .iter()
        .filter(|game| game.game_state.is_live())
        .map(|game| {
            let id = game.id;
            async move { (id, client.landing(id).await) }
        });
    let landings = join_all(fetches).await;

    let mut s = shared.write().await;
    if s.game_date.to_api_string() != schedule.date {
        // Navigated away mid-fetch; the cards this tick targeted are gone.
        return;
    }
    for game in &schedule.games {
        s.scoreboard.apply(seq, &GameSnapshot::from_schedule(game));
    }
    for (id, result) in landings {
        match result {
            Ok(landing) => {
                if let Some(game) = schedule.games.iter().find(|g| g.id == id) {
                    s.scoreboard.apply(seq, &GameSnapshot::merged(game, &landing));
                }
            }
            Err(e) => {
                // The schedule row already rendered; this game just gets
                // no landing-grade update until the next tick.
                tracing::debug!(game_id = id, "landing fetch failed: {}", e);
            }
        }
    }
    s.schedule = Some(schedule);
    s.loaded = true;
    s.error_message = None;
    s.last_refresh = Some(SystemTime::now());
}

/// Schedule-view loop: immediate first tick, then one per interval, with
/// a manual-refresh channel that fires a tick early.
pub async fn poll_schedule_loop(
    client: Arc<dyn RinkDataProvider>,
    shared: SharedDataHandle,
    interval_secs: u64,
    mut refresh_rx: mpsc::Receiver<()>,
) {
    let mut interval_timer = tokio::time::interval(Duration::from_secs(interval_secs));
    interval_timer.set_missed_tick_behavior(MissedTickBehavior::Delay);
    interval_timer.tick().await; // first tick completes immediately

    loop {
        run_schedule_tick(client.as_ref(), &shared).await;

        tokio::select! {
            _ = interval_timer.tick() => {}
            _ = refresh_rx.recv() => {}
        }
    }
}

/// One single-game tick. Returns whether the game is now finished.
pub async fn run_game_tick(
    client: &dyn RinkDataProvider,
    shared: &SharedDataHandle,
    game_id: i64,
) -> Result<bool, rink_api::ApiError> {
    let seq = shared.write().await.next_seq();
    let landing = cache::refresh_game(client, game_id).await?;
    let snap = GameSnapshot::from_landing(&landing);
    let finished = snap.state.is_finished();

    let mut s = shared.write().await;
    s.scoreboard.apply(seq, &snap);
    s.retry = None;
    s.last_refresh = Some(SystemTime::now());
    Ok(finished)
}

/// Single-game loop: immediate first tick, interval cadence while
/// healthy, doubling backoff (up to [`RETRY_CAP`]) on consecutive
/// failures, and a clean stop once the game is final.
pub async fn poll_game_loop(
    client: Arc<dyn RinkDataProvider>,
    shared: SharedDataHandle,
    game_id: i64,
    interval_secs: u64,
    mut refresh_rx: mpsc::Receiver<()>,
) {
    let base = Duration::from_secs(interval_secs);
    let mut backoff = Backoff::new(base, RETRY_CAP);
    let mut interval_timer = tokio::time::interval(base);
    interval_timer.set_missed_tick_behavior(MissedTickBehavior::Delay);
    interval_timer.tick().await; // first tick completes immediately

    loop {
        match run_game_tick(client.as_ref(), &shared, game_id).await {
            Ok(true) => {
                // Terminal state: no further legitimate transitions.
                tracing::info!(game_id, "game is final, stopping poll loop");
                break;
            }
            Ok(false) => {
                backoff.reset();
                tokio::select! {
                    _ = interval_timer.tick() => {}
                    _ = refresh_rx.recv() => {}
                }
            }
            Err(e) => {
                let delay = backoff.record_failure();
                tracing::warn!(
                    game_id,
                    failures = backoff.failures(),
                    delay_secs = delay.as_secs(),
                    "game fetch failed: {}",
                    e
                );
                {
                    let mut s = shared.write().await;
                    s.retry = Some(RetryState {
                        next_attempt: Instant::now() + delay,
                        delay,
                        consecutive_failures: backoff.failures(),
                    });
                    if !s.loaded {
                        s.error_message = Some(format!("Failed to load game: {}", e));
                    }
                }
                tokio::select! {
                    _ = tokio::time::sleep(delay) => {}
                    _ = refresh_rx.recv() => {}
                }
                interval_timer.reset();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dev::mock_client::MockClient;
    use crate::SharedData;
    use async_trait::async_trait;
    use rink_api::{ApiError, DaySchedule, GameDate, GameLanding, GameState};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio::sync::RwLock;

    struct FailingClient;

    #[async_trait]
    impl RinkDataProvider for FailingClient {
        async fn daily_schedule(&self, _date: Option<GameDate>) -> Result<DaySchedule, ApiError> {
            Err(ApiError::Other("injected schedule failure".into()))
        }

        async fn landing(&self, _game_id: i64) -> Result<GameLanding, ApiError> {
            Err(ApiError::Other("injected landing failure".into()))
        }
    }

    /// Always reports the game as final.
    struct FinalClient;

    #[async_trait]
    impl RinkDataProvider for FinalClient {
        async fn daily_schedule(&self, date: Option<GameDate>) -> Result<DaySchedule, ApiError> {
            MockClient::new().daily_schedule(date).await
        }

        async fn landing(&self, game_id: i64) -> Result<GameLanding, ApiError> {
            Ok(GameLanding {
                id: game_id,
                game_state: Some(GameState::Final),
                ..Default::default()
            })
        }
    }

    fn shared() -> SharedDataHandle {
        Arc::new(RwLock::new(SharedData {
            game_date: crate::fixtures::fixture_date(),
            ..Default::default()
        }))
    }

    #[test]
    fn test_backoff_doubles_to_cap_and_resets() {
        let mut backoff = Backoff::new(Duration::from_secs(10), RETRY_CAP);
        assert_eq!(backoff.record_failure(), Duration::from_secs(10));
        assert_eq!(backoff.record_failure(), Duration::from_secs(20));
        assert_eq!(backoff.record_failure(), Duration::from_secs(40));
        assert_eq!(backoff.record_failure(), Duration::from_secs(80));
        assert_eq!(backoff.record_failure(), Duration::from_secs(160));
        assert_eq!(backoff.record_failure(), Duration::from_secs(300));
        assert_eq!(backoff.record_failure(), Duration::from_secs(300));

        backoff.reset();
        assert_eq!(backoff.failures(), 0);
        assert_eq!(backoff.record_failure(), Duration::from_secs(10));
    }

    #[test]
    fn test_backoff_never_exceeds_cap_under_many_failures() {
        let mut backoff = Backoff::new(Duration::from_secs(10), RETRY_CAP);
        for _ in 0..64 {
            assert!(backoff.record_failure() <= RETRY_CAP);
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_second_start_replaces_first_session() {
        let first = Arc::new(AtomicUsize::new(0));
        let second = Arc::new(AtomicUsize::new(0));

        let mut session = PollSession::new("test");
        let counter = Arc::clone(&first);
        session.start(async move {
            let mut timer = tokio::time::interval(Duration::from_secs(1));
            loop {
                timer.tick().await;
                counter.fetch_add(1, Ordering::SeqCst);
            }
        });
        tokio::task::yield_now().await;

        let counter = Arc::clone(&second);
        session.start(async move {
            let mut timer = tokio::time::interval(Duration::from_secs(1));
            loop {
                timer.tick().await;
                counter.fetch_add(1, Ordering::SeqCst);
            }
        });

        for _ in 0..5 {
            tokio::time::advance(Duration::from_secs(1)).await;
            tokio::task::yield_now().await;
        }

        // The first loop was cancelled by the second start: it saw at
        // most its immediate tick, while the replacement kept ticking.
        assert!(first.load(Ordering::SeqCst) <= 1);
        assert!(second.load(Ordering::SeqCst) >= 3);
        assert!(session.is_running());
        session.stop();
        assert!(!session.is_running());
    }

    #[tokio::test]
    async fn test_stop_is_idempotent() {
        let mut session = PollSession::new("test");
        session.stop();
        session.start(async {
            tokio::time::sleep(Duration::from_secs(3600)).await;
        });
        session.stop();
        session.stop();
        assert!(!session.is_running());
    }

    #[tokio::test]
    async fn test_schedule_tick_populates_scoreboard() {
        let client = MockClient::new();
        let shared = shared();
        run_schedule_tick(&client, &shared).await;

        let s = shared.read().await;
        assert!(s.loaded);
        assert!(s.error_message.is_none());
        assert!(s.schedule.is_some());
        assert_eq!(s.scoreboard.len(), s.schedule.as_ref().unwrap().games.len());

        // The live game got landing-grade clock data on the same tick.
        let live = s.scoreboard.display(crate::fixtures::LIVE_GAME_ID).unwrap();
        assert_eq!(live.clock_text, "5:30");
        assert_eq!(live.period_text, "Period 2");
    }

    #[tokio::test]
    async fn test_schedule_tick_failure_before_first_load_is_visible() {
        let shared = shared();
        run_schedule_tick(&FailingClient, &shared).await;

        let s = shared.read().await;
        assert!(!s.loaded);
        assert!(s.error_message.is_some());
        assert!(s.scoreboard.is_empty());
    }

    #[tokio::test]
    async fn test_schedule_tick_failure_after_load_is_silent() {
        let shared = shared();
        run_schedule_tick(&MockClient::new(), &shared).await;
        let before = {
            let s = shared.read().await;
            s.scoreboard.display(crate::fixtures::LIVE_GAME_ID).cloned()
        };

        run_schedule_tick(&FailingClient, &shared).await;
        let s = shared.read().await;
        assert!(s.loaded);
        assert!(s.error_message.is_none());
        assert_eq!(s.scoreboard.display(crate::fixtures::LIVE_GAME_ID), before.as_ref());
    }

    #[tokio::test]
    async fn test_game_tick_failure_leaves_display_untouched() {
        let shared = shared();
        run_schedule_tick(&MockClient::new(), &shared).await;
        let before = {
            let s = shared.read().await;
            s.scoreboard.display(crate::fixtures::LIVE_GAME_ID).cloned()
        };

        let result = run_game_tick(&FailingClient, &shared, crate::fixtures::LIVE_GAME_ID).await;
        assert!(result.is_err());
        let s = shared.read().await;
        assert_eq!(s.scoreboard.display(crate::fixtures::LIVE_GAME_ID), before.as_ref());
    }

    #[tokio::test(start_paused = true)]
    async fn test_game_loop_stops_once_final() {
        let shared = shared();
        let (_tx, rx) = mpsc::channel(1);
        let client: Arc<dyn RinkDataProvider> = Arc::new(FinalClient);

        // The loop's first tick sees FINAL and breaks on its own.
        let result = tokio::time::timeout(
            Duration::from_secs(60),
            poll_game_loop(client, Arc::clone(&shared), 4242, 10, rx),
        )
        .await;
        assert!(result.is_ok(), "loop should stop after a final snapshot");

        let s = shared.read().await;
        let display = s.scoreboard.display(4242).unwrap();
        assert!(!display.show_clock);
        assert_eq!(display.badge, crate::reconcile::StatusBadge::Final);
    }
}
