use std::sync::Arc;

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers;
use crate::state::AppState;

pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/health", get(handlers::health::health))
        .route("/api/services", get(handlers::catalog::list_services))
        .route("/api/salons", get(handlers::salons::list_salons))
        .route("/api/salons/:id", get(handlers::salons::get_salon))
        .route(
            "/api/salons/:id/availability",
            get(handlers::availability::get_availability),
        )
        .route(
            "/api/salons/:id/reviews",
            get(handlers::reviews::list_reviews).post(handlers::reviews::create_review),
        )
        .route("/api/bookings", post(handlers::bookings::create_booking))
        .route("/api/bookings/:id", get(handlers::bookings::get_booking))
        .route(
            "/api/manager/salons",
            get(handlers::manager::list_salons).post(handlers::manager::create_salon),
        )
        .route("/api/manager/salons/:id", put(handlers::manager::update_salon))
        .route(
            "/api/manager/salons/:id/bookings",
            get(handlers::manager::list_salon_bookings),
        )
        .route(
            "/api/manager/salons/:id/services",
            get(handlers::manager::list_salon_services).post(handlers::manager::add_salon_service),
        )
        .route(
            "/api/manager/salons/:id/services/:offering_id",
            put(handlers::manager::update_salon_service)
                .delete(handlers::manager::delete_salon_service),
        )
        .route(
            "/api/manager/salons/:id/opening-hours",
            get(handlers::manager::get_opening_hours).put(handlers::manager::replace_opening_hours),
        )
        .route(
            "/api/manager/bookings/:id/status",
            put(handlers::manager::update_booking_status),
        )
        .route(
            "/api/manager/bookings/:id",
            axum::routing::delete(handlers::manager::delete_booking),
        )
        .with_state(state)
}
