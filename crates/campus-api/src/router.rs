//! Route definitions for the Campus Connect HTTP API.
//!
//! All routes are organized by resource and mounted under `/api`. The
//! router receives `AppState` and passes it to all handlers via Axum's
//! `State` extractor. Everything except the auth and health endpoints
//! requires a bearer token, enforced per-handler by the `AuthUser`
//! extractor.

use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware as axum_middleware,
    routing::{delete, get, post, put},
};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware;
use crate::state::AppState;

/// Build the complete Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let max_body = state.config.server.max_body_size_bytes as usize;

    let api_routes = Router::new()
        .merge(auth_routes())
        .merge(user_routes())
        .merge(course_routes())
        .merge(attendance_routes())
        .merge(performance_routes())
        .merge(community_routes())
        .merge(event_routes())
        .merge(health_routes());

    let cors = middleware::cors::build_cors_layer(&state.config.server.cors);

    Router::new()
        .nest("/api", api_routes)
        .fallback(handlers::not_found)
        .method_not_allowed_fallback(handlers::method_not_allowed)
        .layer(DefaultBodyLimit::max(max_body))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(axum_middleware::from_fn(
            middleware::logging::request_logging,
        ))
        .with_state(state)
}

/// Auth endpoints: register, login, verify, logout
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(handlers::auth::register))
        .route("/auth/login", post(handlers::auth::login))
        .route("/auth/verify", get(handlers::auth::verify))
        .route("/auth/logout", post(handlers::auth::logout))
}

/// User CRUD, profiles, and password changes
fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/users", get(handlers::user::list_users))
        .route("/users", post(handlers::user::create_user))
        .route("/users/{id}", get(handlers::user::get_user))
        .route("/users/{id}", put(handlers::user::update_user))
        .route("/users/{id}", delete(handlers::user::delete_user))
        .route("/users/{id}/profile", get(handlers::user::get_profile))
        .route("/users/{id}/password", put(handlers::user::change_password))
}

/// Course CRUD, enrollment, and rosters
fn course_routes() -> Router<AppState> {
    Router::new()
        .route("/courses", get(handlers::course::list_courses))
        .route("/courses", post(handlers::course::create_course))
        .route("/courses/{id}", get(handlers::course::get_course))
        .route("/courses/{id}", put(handlers::course::update_course))
        .route("/courses/{id}", delete(handlers::course::delete_course))
        .route("/courses/{id}/enroll", post(handlers::course::enroll_student))
        .route(
            "/courses/{id}/students",
            get(handlers::course::enrolled_students),
        )
}

/// Attendance CRUD and statistics
fn attendance_routes() -> Router<AppState> {
    Router::new()
        .route("/attendance", get(handlers::attendance::list_records))
        .route("/attendance", post(handlers::attendance::create_record))
        .route("/attendance/{id}", get(handlers::attendance::get_record))
        .route("/attendance/{id}", put(handlers::attendance::update_record))
        .route(
            "/attendance/{id}",
            delete(handlers::attendance::delete_record),
        )
        .route(
            "/attendance/students/{id}/stats",
            get(handlers::attendance::student_stats),
        )
        .route(
            "/attendance/courses/{id}/stats",
            get(handlers::attendance::course_stats),
        )
}

/// Performance CRUD and statistics
fn performance_routes() -> Router<AppState> {
    Router::new()
        .route("/performance", get(handlers::performance::list_records))
        .route("/performance", post(handlers::performance::create_record))
        .route("/performance/{id}", get(handlers::performance::get_record))
        .route(
            "/performance/{id}",
            put(handlers::performance::update_record),
        )
        .route(
            "/performance/{id}",
            delete(handlers::performance::delete_record),
        )
        .route(
            "/performance/students/{id}/stats",
            get(handlers::performance::student_stats),
        )
}

/// Community posts, likes, and comments
fn community_routes() -> Router<AppState> {
    Router::new()
        .route("/community/posts", get(handlers::community::list_posts))
        .route("/community/posts", post(handlers::community::create_post))
        .route("/community/posts/{id}", get(handlers::community::get_post))
        .route(
            "/community/posts/{id}",
            put(handlers::community::update_post),
        )
        .route(
            "/community/posts/{id}",
            delete(handlers::community::delete_post),
        )
        .route(
            "/community/posts/{id}/like",
            post(handlers::community::toggle_like),
        )
        .route(
            "/community/posts/{id}/comments",
            get(handlers::community::list_comments),
        )
        .route(
            "/community/posts/{id}/comments",
            post(handlers::community::add_comment),
        )
}

/// Event CRUD, registration, and attendee listings
fn event_routes() -> Router<AppState> {
    Router::new()
        .route("/events", get(handlers::event::list_events))
        .route("/events", post(handlers::event::create_event))
        .route("/events/upcoming", get(handlers::event::upcoming_events))
        .route("/events/{id}", get(handlers::event::get_event))
        .route("/events/{id}", put(handlers::event::update_event))
        .route("/events/{id}", delete(handlers::event::delete_event))
        .route(
            "/events/{id}/register",
            post(handlers::event::register_for_event),
        )
        .route(
            "/events/{id}/registrations",
            get(handlers::event::event_registrations),
        )
}

/// Health check endpoint (no auth required)
fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health_check))
}
