use axum::{
    http::Method,
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;

use crate::rest::{self, AppState};
use crate::web;

/// Assemble the full application router: JSON API under /api, the HTML
/// surface at the root, and the static asset directory.
pub fn build(state: AppState) -> Router {
    let api_acronyms = Router::new()
        .route("/", get(rest::list_acronyms).post(rest::create_acronym))
        .route("/search", get(rest::search_acronyms))
        .route("/first", get(rest::first_acronym))
        .route("/sorted", get(rest::sorted_acronyms))
        .route(
            "/:id",
            get(rest::get_acronym)
                .put(rest::update_acronym)
                .delete(rest::delete_acronym),
        )
        .route("/:id/user", get(rest::acronym_user));

    let api_users = Router::new()
        .route("/", get(rest::list_users).post(rest::create_user))
        .route("/:id", get(rest::get_user));

    let web_routes = Router::new()
        .route("/", get(web::index))
        .route(
            "/acronyms/create",
            get(web::create_form).post(web::create_submit),
        )
        .route("/acronyms/:id", get(web::show))
        .route(
            "/acronyms/:id/edit",
            get(web::edit_form).post(web::edit_submit),
        )
        .route("/acronyms/:id/delete", post(web::delete_submit));

    // CORS setup so browser clients elsewhere can call the JSON API
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers(Any);

    Router::new()
        .route("/hello", get(|| async { "Hello, world!" }))
        .nest("/api/acronym", api_acronyms)
        .nest("/api/users", api_users)
        .merge(web_routes)
        .nest_service("/static", ServeDir::new("static"))
        .layer(cors)
        .with_state(state)
}
