pub mod bracket;
pub mod config;
pub mod database;
pub mod entity;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod seed;
pub mod standings;
pub mod state;

use utoipa::OpenApi;
use utoipa_axum::router::OpenApiRouter;
use utoipa_scalar::{Scalar, Servable as ScalarServable};
use utoipa_swagger_ui::SwaggerUi;

use crate::state::AppState;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Interclass Games API",
        version = "1.0.0",
        description = "Administration API for the school interclass games: teams, modalities, bracket matches, dance placements, bonus/penalty points and the ranking"
    ),
    tags(
        (name = "Tournaments", description = "Tournament CRUD operations"),
        (name = "Teams", description = "Team CRUD operations"),
        (name = "Modalities", description = "Modality (sport/event) configuration"),
        (name = "Matches", description = "Bracket match lifecycle: create, edit, close, reopen"),
        (name = "Dance", description = "Dance performances and placements"),
        (name = "Points", description = "Bonus and penalty point entries"),
        (name = "Standings", description = "Ranking views"),
    ),
)]
struct ApiDoc;

/// Build the application router.
pub fn build_router(state: AppState) -> axum::Router {
    let (router, api) = OpenApiRouter::with_openapi(ApiDoc::openapi())
        .nest("/api", routes::api_routes(&state.config))
        .split_for_parts();

    router
        .with_state(state)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", api.clone()))
        .merge(Scalar::with_url("/scalar", api))
}
