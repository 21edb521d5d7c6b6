use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{Mutex, RwLock};
use tokio::time::Instant;
use uuid::Uuid;

use crate::core::config::MapSessionConfig;
use crate::core::error::{AppError, Result};
use crate::features::locations::LonLat;
use crate::features::map::dtos::MapSessionDto;
use crate::features::map::models::ViewportSize;
use crate::features::map::services::MapSession;
use crate::features::routing::RoutePlanner;

type SharedSession = Arc<Mutex<MapSession>>;

/// Owns every open map session and runs their debounced route searches
pub struct MapSessionService {
    planner: Arc<RoutePlanner>,
    debounce: Duration,
    limits: MapSessionConfig,
    sessions: RwLock<HashMap<Uuid, SharedSession>>,
}

impl MapSessionService {
    pub fn new(planner: Arc<RoutePlanner>, debounce: Duration, limits: MapSessionConfig) -> Self {
        Self {
            planner,
            debounce,
            limits,
            sessions: RwLock::new(HashMap::new()),
        }
    }

    pub async fn create(&self, size: ViewportSize) -> Result<MapSessionDto> {
        let mut sessions = self.sessions.write().await;
        if sessions.len() >= self.limits.max_sessions {
            evict_idle_sessions(&mut sessions, self.limits.idle_ttl);
        }
        if sessions.len() >= self.limits.max_sessions {
            return Err(AppError::RateLimitExceeded(
                "Too many open map sessions".to_string(),
            ));
        }

        let id = Uuid::now_v7();
        let session = MapSession::new(id, self.planner.catalog(), size);
        let dto = MapSessionDto::from(&session);
        sessions.insert(id, Arc::new(Mutex::new(session)));

        tracing::info!("Opened map session {} ({} open)", id, sessions.len());
        Ok(dto)
    }

    #[cfg(test)]
    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    /// Tear down every session idle for longer than the configured TTL
    pub async fn evict_idle(&self) -> usize {
        let mut sessions = self.sessions.write().await;
        evict_idle_sessions(&mut sessions, self.limits.idle_ttl)
    }

    /// Periodically evict idle sessions; runs until the process exits
    pub async fn run_idle_sweeper(&self) {
        tracing::info!(
            "Starting map session sweeper (idle TTL {:?}, every {:?})",
            self.limits.idle_ttl,
            self.limits.sweep_interval
        );

        let mut interval = tokio::time::interval(self.limits.sweep_interval);

        loop {
            interval.tick().await;
            self.evict_idle().await;
        }
    }

    async fn session(&self, id: Uuid) -> Result<SharedSession> {
        self.sessions
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("Map session {} not found", id)))
    }

    pub async fn get(&self, id: Uuid) -> Result<MapSessionDto> {
        let session = self.session(id).await?;
        let mut state = session.lock().await;
        state.touch();
        Ok(MapSessionDto::from(&*state))
    }

    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let session = self
            .sessions
            .write()
            .await
            .remove(&id)
            .ok_or_else(|| AppError::NotFound(format!("Map session {} not found", id)))?;

        session.lock().await.teardown();
        tracing::info!("Closed map session {}", id);
        Ok(())
    }

    pub async fn set_start(&self, id: Uuid, text: String) -> Result<MapSessionDto> {
        self.edit(id, |state| state.set_start(text)).await
    }

    pub async fn set_end(&self, id: Uuid, text: String) -> Result<MapSessionDto> {
        self.edit(id, |state| state.set_end(text)).await
    }

    pub async fn update_location(&self, id: Uuid, lon_lat: LonLat) -> Result<MapSessionDto> {
        self.edit(id, |state| state.set_device_location(lon_lat))
            .await
    }

    pub async fn toggle_route_mode(&self, id: Uuid) -> Result<MapSessionDto> {
        self.edit(id, |state| {
            state.toggle_route_mode();
        })
        .await
    }

    pub async fn toggle_view_mode(&self, id: Uuid) -> Result<MapSessionDto> {
        let session = self.session(id).await?;
        let mut state = session.lock().await;
        state.touch();
        state.toggle_view_mode();
        Ok(MapSessionDto::from(&*state))
    }

    pub async fn select_route(&self, id: Uuid, route_id: usize) -> Result<MapSessionDto> {
        let session = self.session(id).await?;
        let mut state = session.lock().await;
        state.touch();
        state.select_route(route_id)?;
        Ok(MapSessionDto::from(&*state))
    }

    pub async fn confirm(&self, id: Uuid) -> Result<MapSessionDto> {
        let session = self.session(id).await?;
        let mut state = session.lock().await;
        state.touch();
        state.confirm(&self.planner)?;

        tracing::info!(
            "Map session {}: confirmed route {:?}",
            id,
            state.selected_route_id()
        );
        Ok(MapSessionDto::from(&*state))
    }

    /// Apply a search-affecting edit and restart the debounce
    async fn edit<F>(&self, id: Uuid, apply: F) -> Result<MapSessionDto>
    where
        F: FnOnce(&mut MapSession),
    {
        let session = self.session(id).await?;
        let mut state = session.lock().await;
        state.touch();
        apply(&mut *state);
        self.schedule_search(&session, &mut *state);
        Ok(MapSessionDto::from(&*state))
    }

    fn schedule_search(&self, session: &SharedSession, state: &mut MapSession) {
        let generation = state.begin_search();

        if !state.query().is_ready() {
            state.close_options();
            return;
        }

        let query = state.query().clone();
        let planner = Arc::clone(&self.planner);
        let debounce = self.debounce;
        let session = Arc::clone(session);
        let id = state.id();

        let handle = tokio::spawn(async move {
            tokio::time::sleep(debounce).await;

            let Some(endpoints) = planner.resolve(&query) else {
                tracing::debug!(
                    "Map session {}: '{}' -> '{}' does not resolve, no search issued",
                    id,
                    query.start,
                    query.end
                );
                let mut state = session.lock().await;
                if state.is_current_search(generation) {
                    state.close_options();
                }
                return;
            };

            let result = planner.alternatives(endpoints, query.profile).await;
            session.lock().await.apply_search_result(generation, result);
        });

        state.set_pending_search(handle);
    }
}

/// Sessions whose lock is held are in use and never count as idle
fn evict_idle_sessions(sessions: &mut HashMap<Uuid, SharedSession>, idle_ttl: Duration) -> usize {
    let now = Instant::now();
    let before = sessions.len();

    sessions.retain(|id, session| match session.try_lock() {
        Ok(mut state) if state.idle_for(now) >= idle_ttl => {
            state.teardown();
            tracing::debug!("Evicted idle map session {}", id);
            false
        }
        _ => true,
    });

    let evicted = before - sessions.len();
    if evicted > 0 {
        tracing::info!("Evicted {} idle map sessions ({} open)", evicted, sessions.len());
    }
    evicted
}
