use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::handlers;
use crate::state::AppState;

pub fn routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .nest("/tournaments", tournament_routes())
        .nest("/teams", team_routes())
        .nest("/modalities", modality_routes())
}

fn tournament_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(
            handlers::tournament::list_tournaments,
            handlers::tournament::create_tournament
        ))
        .routes(routes!(
            handlers::tournament::get_tournament,
            handlers::tournament::update_tournament,
            handlers::tournament::delete_tournament
        ))
        .routes(routes!(handlers::standings::get_standings))
        .routes(routes!(handlers::standings::get_modality_standings))
        .nest("/{id}/matches", match_routes())
        .nest("/{id}/dances", dance_routes())
        .nest("/{id}/points", point_entry_routes())
}

fn match_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(
            handlers::bracket_match::list_matches,
            handlers::bracket_match::create_match
        ))
        .routes(routes!(
            handlers::bracket_match::get_match,
            handlers::bracket_match::update_match
        ))
        .routes(routes!(handlers::bracket_match::close_match))
        .routes(routes!(handlers::bracket_match::reopen_match))
}

fn dance_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(
            handlers::dance::list_dances,
            handlers::dance::create_dance
        ))
        .routes(routes!(
            handlers::dance::update_dance,
            handlers::dance::delete_dance
        ))
}

fn point_entry_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(
            handlers::point_entry::list_point_entries,
            handlers::point_entry::create_point_entry
        ))
        .routes(routes!(
            handlers::point_entry::update_point_entry,
            handlers::point_entry::delete_point_entry
        ))
}

fn team_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(
            handlers::team::list_teams,
            handlers::team::create_team
        ))
        .routes(routes!(
            handlers::team::get_team,
            handlers::team::update_team,
            handlers::team::delete_team
        ))
}

fn modality_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(
            handlers::modality::list_modalities,
            handlers::modality::create_modality
        ))
        .routes(routes!(
            handlers::modality::get_modality,
            handlers::modality::update_modality,
            handlers::modality::delete_modality
        ))
}
