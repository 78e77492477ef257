//! Route configuration.

use axum::{middleware, Router};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::handlers::{
    auth_routes, chatbot_routes, complaint_routes, eda_routes, health_routes, revalidate_routes,
    user_routes,
};
use crate::api::middleware::session_middleware;
use crate::api::openapi::ApiDoc;
use crate::api::state::AppState;

/// Create the main router with all routes.
pub fn create_router(state: AppState) -> Router {
    // Everything except login/logout and the health probe requires the
    // session cookie.
    let protected = Router::new()
        .nest("/users", user_routes())
        .nest("/complaints", complaint_routes())
        .nest("/eda", eda_routes())
        .nest("/chatbot", chatbot_routes())
        .nest("/revalidate", revalidate_routes())
        .route_layer(middleware::from_fn(session_middleware));

    let api_v1 = Router::new().nest("/auth", auth_routes()).merge(protected);

    Router::new()
        .nest("/health", health_routes())
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .nest("/api/v1", api_v1)
        .with_state(state)
}
