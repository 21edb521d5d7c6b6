use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::Instant;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::locations::{LocationCatalog, LonLat};
use crate::features::map::models::{BaseLayer, MapView, ViewportSize};
use crate::features::routing::{
    RouteOption, RoutePlanner, RouteQuery, TravelProfile, TurnByTurnDirection,
};

/// Server-held state of one interactive map: search boxes, route alternatives,
/// selection and what is drawn on the map
#[derive(Debug)]
pub struct MapSession {
    id: Uuid,
    query: RouteQuery,
    view: MapView,
    route_options: Vec<RouteOption>,
    selected_route_id: Option<usize>,
    options_open: bool,
    directions: Vec<TurnByTurnDirection>,
    search_generation: u64,
    pending_search: Option<JoinHandle<()>>,
    last_touched: Instant,
}

impl MapSession {
    pub fn new(id: Uuid, catalog: &LocationCatalog, size: ViewportSize) -> Self {
        Self {
            id,
            query: RouteQuery::default(),
            view: MapView::new(catalog, size),
            route_options: Vec::new(),
            selected_route_id: None,
            options_open: false,
            directions: Vec::new(),
            search_generation: 0,
            pending_search: None,
            last_touched: Instant::now(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn query(&self) -> &RouteQuery {
        &self.query
    }

    pub fn view(&self) -> &MapView {
        &self.view
    }

    pub fn route_options(&self) -> &[RouteOption] {
        &self.route_options
    }

    pub fn selected_route_id(&self) -> Option<usize> {
        self.selected_route_id
    }

    pub fn options_open(&self) -> bool {
        self.options_open
    }

    pub fn directions(&self) -> &[TurnByTurnDirection] {
        &self.directions
    }

    /// Mark the session as in use by its client
    pub fn touch(&mut self) {
        self.last_touched = Instant::now();
    }

    pub fn idle_for(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.last_touched)
    }

    pub fn set_start(&mut self, text: String) {
        self.query.start = text;
    }

    pub fn set_end(&mut self, text: String) {
        self.query.end = text;
    }

    /// Record a device fix and move the user marker there
    pub fn set_device_location(&mut self, lon_lat: LonLat) {
        self.query.device_location = Some(lon_lat);
        self.view.set_user_position(lon_lat);
    }

    pub fn toggle_route_mode(&mut self) -> TravelProfile {
        self.query.profile = self.query.profile.toggled();
        self.query.profile
    }

    pub fn toggle_view_mode(&mut self) -> BaseLayer {
        self.view.toggle_base_layer()
    }

    /// Supersede any pending search and return the generation of the next one
    pub fn begin_search(&mut self) -> u64 {
        if let Some(handle) = self.pending_search.take() {
            handle.abort();
        }
        self.search_generation += 1;
        self.search_generation
    }

    pub fn set_pending_search(&mut self, handle: JoinHandle<()>) {
        self.pending_search = Some(handle);
    }

    pub fn is_current_search(&self, generation: u64) -> bool {
        self.search_generation == generation
    }

    pub fn close_options(&mut self) {
        self.route_options.clear();
        self.selected_route_id = None;
        self.options_open = false;
    }

    /// Store the outcome of search `generation`. Results of superseded searches are
    /// dropped and `false` is returned.
    pub fn apply_search_result(
        &mut self,
        generation: u64,
        result: Result<Vec<RouteOption>>,
    ) -> bool {
        if !self.is_current_search(generation) {
            return false;
        }

        match result {
            Ok(options) if !options.is_empty() => {
                self.selected_route_id = options.first().map(|o| o.id);
                self.route_options = options;
                self.options_open = true;
            }
            Ok(_) => {
                tracing::info!("Map session {}: no route found", self.id);
                self.close_options();
            }
            Err(e) => {
                tracing::error!("Map session {}: route search failed: {}", self.id, e);
                self.close_options();
            }
        }
        true
    }

    pub fn select_route(&mut self, route_id: usize) -> Result<()> {
        if !self.route_options.iter().any(|o| o.id == route_id) {
            return Err(AppError::BadRequest(format!(
                "Route {} is not one of the current options",
                route_id
            )));
        }
        self.selected_route_id = Some(route_id);
        Ok(())
    }

    /// Draw the selected route with its start/end markers and fill the directions
    pub fn confirm(&mut self, planner: &RoutePlanner) -> Result<()> {
        let selected = self
            .selected_route_id
            .and_then(|id| self.route_options.iter().find(|o| o.id == id))
            .cloned()
            .ok_or_else(|| AppError::BadRequest("Please select a route to start.".to_string()))?;

        self.view.clear_routes();
        self.directions.clear();

        let start = planner.resolve_start(&self.query).ok_or_else(|| {
            AppError::BadRequest(
                "Unable to determine your current location. Please enter a start location."
                    .to_string(),
            )
        })?;
        let end = planner
            .resolve_end(&self.query)
            .ok_or_else(|| AppError::BadRequest("Please enter a valid end location".to_string()))?;

        self.view
            .annotate_route(start, end, &selected, self.query.profile);
        self.directions = selected.directions();
        self.options_open = false;

        Ok(())
    }

    /// Cancel the pending search; late results of it are ignored
    pub fn teardown(&mut self) {
        self.begin_search();
        self.pending_search = None;
    }
}
