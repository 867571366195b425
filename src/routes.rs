use axum::{
    handler::Handler,
    http::HeaderValue,
    middleware,
    routing::{get, post, put},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};

use crate::config::AppConfig;
use crate::handlers;
use crate::middleware::{jwt_auth_middleware, require_admin};
use crate::state::AppState;

/// Build the full router: public routes, token-gated game routes and global layers.
pub fn app(state: AppState, config: &AppConfig) -> Router {
    let router = Router::new()
        // Public
        .route("/health", get(handlers::public::health))
        .merge(auth_public_routes())
        // Protected
        .merge(game_routes(state.clone()))
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()));

    let router = match cors_layer(config) {
        Some(cors) => router.layer(cors),
        None => router,
    };

    router.with_state(state)
}

fn auth_public_routes() -> Router<AppState> {
    use handlers::public::auth;

    Router::new().route("/api/login", post(auth::login_post))
}

fn game_routes(state: AppState) -> Router<AppState> {
    use handlers::protected::games;

    Router::new()
        .route(
            "/api/games",
            get(games::collection_get)
                .post(games::collection_post.layer(middleware::from_fn(require_admin))),
        )
        .route(
            "/api/games/:id",
            put(games::record_put).delete(games::record_delete),
        )
        // route_layer: unknown paths stay 404 instead of demanding a token
        .route_layer(middleware::from_fn_with_state(state, jwt_auth_middleware))
}

fn cors_layer(config: &AppConfig) -> Option<CorsLayer> {
    if !config.security.enable_cors {
        return None;
    }

    if config.security.cors_origins.is_empty() {
        return Some(CorsLayer::permissive());
    }

    let origins: Vec<HeaderValue> = config
        .security
        .cors_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    Some(
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods(Any)
            .allow_headers(Any),
    )
}
