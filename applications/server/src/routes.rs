/// Router construction
use crate::{api, middleware, state::AppState};
use axum::{
    middleware as axum_middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, TraceLayer},
};

pub fn create_router(app_state: AppState) -> Router {
    // Public routes (no caller identity needed)
    let public_routes = Router::new()
        .route("/health", get(api::health::health))
        .route("/auth/login", post(api::auth::login))
        .route("/auth/refresh", post(api::auth::refresh));

    // Catalog routes (bearer token optional, required for votes)
    let catalog_routes = Router::new()
        // Artists
        .route(
            "/artists",
            get(api::artists::list_artists).post(api::artists::create_artist),
        )
        .route(
            "/artists/:id",
            get(api::artists::get_artist)
                .patch(api::artists::update_artist)
                .delete(api::artists::delete_artist),
        )
        // Albums
        .route(
            "/albums",
            get(api::albums::list_albums).post(api::albums::create_album),
        )
        .route(
            "/albums/:id",
            get(api::albums::get_album).delete(api::albums::delete_album),
        )
        // Songs
        .route("/songs", get(api::songs::list_songs))
        .route(
            "/songs/:id",
            get(api::songs::get_song).delete(api::songs::delete_song),
        )
        // Lyrics
        .route(
            "/lyrics",
            get(api::lyrics::list_lyrics).post(api::lyrics::create_lyric),
        )
        .route("/lyrics/random", get(api::lyrics::random_lyric))
        .route(
            "/lyrics/:id",
            get(api::lyrics::get_lyric)
                .patch(api::lyrics::update_lyric)
                .delete(api::lyrics::delete_lyric),
        )
        .route("/lyrics/:id/vote-up", post(api::lyrics::vote_up))
        .route("/lyrics/:id/vote-down", post(api::lyrics::vote_down))
        .layer(axum_middleware::from_fn_with_state(
            Arc::clone(&app_state.auth_service),
            middleware::auth_middleware,
        ));

    public_routes
        .merge(catalog_routes)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::default().include_headers(true)),
        )
        .layer(CorsLayer::permissive())
        .with_state(app_state)
}
