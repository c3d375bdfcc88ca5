pub mod admin_routes;
pub mod health;
pub mod invitations;
pub mod likes;
pub mod matches;
pub mod reports;

use axum::middleware::from_fn;
use axum::routing::{delete, get, post, put};
use axum::Router;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use campus_shared::middleware::metrics_middleware;

use crate::AppState;

pub fn router(state: Arc<AppState>) -> Router {
    let admin_routes = Router::new()
        .route("/reports", get(admin_routes::list_reports))
        .route("/reports/:id", delete(admin_routes::delete_report))
        .route("/reports/:id/resolve", put(admin_routes::resolve_report));

    Router::new()
        .route("/health", get(health::health_check))
        .route("/metrics", get(health::metrics))
        .route("/likes", get(likes::list_my_likes))
        .route("/likes/top", get(likes::top_liked))
        .route("/likes/count/:student_id", get(likes::like_count))
        .route("/likes/:target_id", post(likes::toggle_like))
        .route("/likes/:target_id/status", get(likes::like_status))
        .route("/invitations", post(invitations::send_invitation))
        .route("/invitations/sent", get(invitations::list_sent))
        .route("/invitations/received", get(invitations::list_received))
        .route("/invitations/:id/respond", put(invitations::respond_invitation))
        .route("/matches", get(matches::list_matches))
        .route("/reports", post(reports::create_report))
        .nest("/admin", admin_routes)
        .route_layer(from_fn(metrics_middleware))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
