use crate::handlers;
use crate::state::AppState;
use axum::{routing::{get, post}, Router};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/habits", post(handlers::form_add))
        .route("/habits/:id/toggle", post(handlers::form_toggle))
        .route("/habits/:id/delete", post(handlers::form_delete))
        .route("/api/habits", get(handlers::get_habits).post(handlers::create_habit))
        .route("/api/habits/:id", axum::routing::delete(handlers::delete_habit))
        .route("/api/habits/:id/toggle", post(handlers::toggle_habit))
        .route("/api/stats", get(handlers::get_stats))
        .route("/api/moods", get(handlers::get_moods).post(handlers::create_mood))
        .route(
            "/api/reflections",
            get(handlers::get_reflections).post(handlers::create_reflection),
        )
        .with_state(state)
}
