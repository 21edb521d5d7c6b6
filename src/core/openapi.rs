use utoipa::{Modify, OpenApi};

use crate::features::auth::{dtos as auth_dtos, handlers as auth_handlers};
use crate::features::locations::{dtos as locations_dtos, handlers as locations_handlers};
use crate::features::map::{dtos as map_dtos, handlers as map_handlers, models as map_models};
use crate::features::routing::{
    dtos as routing_dtos, handlers as routing_handlers, StepKind, TravelProfile,
    TurnByTurnDirection,
};
use crate::features::users::{dtos as users_dtos, handlers as users_handlers};
use crate::shared::types::{ApiResponse, Meta};

#[derive(OpenApi)]
#[openapi(
    paths(
        // Auth (public)
        auth_handlers::signup,
        auth_handlers::login,
        // Users
        users_handlers::get_profile,
        users_handlers::save_profile,
        users_handlers::save_profile_for_username,
        // Locations
        locations_handlers::list_locations,
        locations_handlers::suggest_locations,
        // Routes
        routing_handlers::plan_routes,
        // Map sessions
        map_handlers::create_map_session,
        map_handlers::get_map_session,
        map_handlers::delete_map_session,
        map_handlers::set_start,
        map_handlers::set_end,
        map_handlers::update_location,
        map_handlers::toggle_route_mode,
        map_handlers::toggle_view_mode,
        map_handlers::select_route,
        map_handlers::confirm_route,
    ),
    components(
        schemas(
            Meta,
            // Auth
            auth_dtos::SignupRequestDto,
            auth_dtos::LoginRequestDto,
            auth_dtos::UserResponseDto,
            ApiResponse<auth_dtos::UserResponseDto>,
            // Users
            users_dtos::SaveProfileRequestDto,
            users_dtos::UserProfileResponseDto,
            ApiResponse<users_dtos::UserProfileResponseDto>,
            // Locations
            locations_dtos::LocationResponseDto,
            ApiResponse<Vec<locations_dtos::LocationResponseDto>>,
            // Routes
            TravelProfile,
            StepKind,
            TurnByTurnDirection,
            routing_dtos::PlanRouteRequestDto,
            routing_dtos::RouteOptionDto,
            ApiResponse<Vec<routing_dtos::RouteOptionDto>>,
            // Map sessions
            map_models::BaseLayer,
            map_dtos::CreateMapSessionDto,
            map_dtos::UpdateSearchTextDto,
            map_dtos::UpdateLocationDto,
            map_dtos::SelectRouteDto,
            map_dtos::MapFeatureDto,
            map_dtos::ViewportDto,
            map_dtos::MapSessionDto,
            ApiResponse<map_dtos::MapSessionDto>,
        )
    ),
    tags(
        (name = "auth", description = "Account signup and login"),
        (name = "users", description = "Accessibility profiles"),
        (name = "locations", description = "Campus location catalog (public)"),
        (name = "routes", description = "Walking and wheelchair route alternatives"),
        (name = "map", description = "Interactive map sessions"),
    ),
    info(
        title = "Campus Access Map API",
        version = "0.1.0",
        description = "API documentation for the campus accessibility map",
    )
)]
pub struct ApiDoc;

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}
