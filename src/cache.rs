use crate::data_provider::RinkDataProvider;
use cached::proc_macro::cached;
use rink_api::{ApiError, DaySchedule, GameDate, GameLanding};

pub use cached::Cached;

#[cfg(test)]
pub async fn clear_all_caches() {
    SCHEDULE_CACHE.lock().await.cache_clear();
    GAME_CACHE.lock().await.cache_clear();
}

#[cfg(test)]
#[derive(Debug)]
pub struct CacheStats {
    pub schedule_entries: usize,
    pub game_entries: usize,
}

#[cfg(test)]
pub async fn cache_stats() -> CacheStats {
    CacheStats {
        schedule_entries: SCHEDULE_CACHE.lock().await.cache_size(),
        game_entries: GAME_CACHE.lock().await.cache_size(),
    }
}

#[cached(
    name = "SCHEDULE_CACHE",
    type = "cached::TimedSizedCache<String, DaySchedule>",
    create = "{ cached::TimedSizedCache::with_size_and_lifespan(14, 60) }",
    convert = r#"{ format!("{}", date) }"#,
    result = true
)]
pub async fn fetch_schedule_cached(
    client: &dyn RinkDataProvider,
    date: GameDate,
) -> Result<DaySchedule, ApiError> {
    client.daily_schedule(Some(date)).await
}

#[cached(
    name = "GAME_CACHE",
    type = "cached::TimedSizedCache<i64, GameLanding>",
    create = "{ cached::TimedSizedCache::with_size_and_lifespan(100, 30) }",
    convert = r#"{ game_id }"#,
    result = true
)]
pub async fn fetch_game_cached(
    client: &dyn RinkDataProvider,
    game_id: i64,
) -> Result<GameLanding, ApiError> {
    client.landing(game_id).await
}

/// Invalidate-then-fetch, used by the live poll path so a tick never
/// serves a stale entry.
pub async fn refresh_game(
    client: &dyn RinkDataProvider,
    game_id: i64,
) -> Result<GameLanding, ApiError> {
    GAME_CACHE.lock().await.cache_remove(&game_id);
    fetch_game_cached(client, game_id).await
}

pub async fn refresh_schedule(
    client: &dyn RinkDataProvider,
    date: GameDate,
) -> Result<DaySchedule, ApiError> {
    let key = format!("{}", date);
    SCHEDULE_CACHE.lock().await.cache_remove(&key);
    fetch_schedule_cached(client, date).await
}
