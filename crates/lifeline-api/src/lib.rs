//! Lifeline HTTP API
//!
//! Thin axum surface over the [`lifeline_core`] facade.
//!
//! # Endpoints
//!
//! ## Health
//! - `GET /health` - Liveness probe
//!
//! ## Profiles
//! - `POST /profile` - Create the caller's profile
//! - `GET /profile` - Caller's profile with its role extension
//! - `PUT /profile` - Update contact fields
//!
//! ## Donors
//! - `POST /donors` - Register the caller's donor record
//! - `GET /donors?blood_group&city&available` - Search verified donors
//! - `GET /donors/:id` - Donor by id
//! - `PUT /donors/:id` - Owner update
//! - `POST /donations` - Log a completed donation
//!
//! ## Blood banks
//! - `POST /blood-banks` - Register the caller's blood bank
//! - `GET /blood-banks?city&blood_group` - Search verified banks
//! - `GET /blood-banks/:id` - Bank with stock table
//! - `PUT /blood-banks/:id` - Owner update
//! - `PUT /blood-stock` - Overwrite one stock row of the caller's bank
//!
//! ## Requests
//! - `POST /blood-requests` - Post to the board
//! - `GET /blood-requests?status&blood_group&city` - Urgency-ranked feed
//! - `GET /blood-requests/:id` - Request with requester contacts
//! - `PUT /blood-requests/:id` - Settle or cancel (owner only)
//!
//! ## Admin
//! - `GET /admin/reports` - Platform counts
//! - `GET /admin/users?user_type` - Profile listing
//! - `POST /admin/verify` - Grant/revoke verification
//! - `POST /admin/promote` - Bootstrap the first admin
//!
//! Identity arrives as the `x-principal-id` header from the upstream auth
//! proxy. Search endpoints are public reads; everything else requires it.

pub mod error;
pub mod extract;
pub mod routes;

use std::sync::Arc;

use axum::routing::{get, post, put};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use lifeline_core::Lifeline;

pub use error::{ApiError, ApiResult};
pub use extract::{Principal, PRINCIPAL_HEADER};

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub lifeline: Arc<Lifeline>,
}

impl AppState {
    pub fn new(lifeline: Lifeline) -> Self {
        Self {
            lifeline: Arc::new(lifeline),
        }
    }
}

/// Build the full route table.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(routes::health))
        // Profiles
        .route(
            "/profile",
            post(routes::profile::create)
                .get(routes::profile::view)
                .put(routes::profile::update),
        )
        // Donors
        .route(
            "/donors",
            post(routes::donors::register).get(routes::donors::search),
        )
        .route(
            "/donors/:id",
            get(routes::donors::get).put(routes::donors::update),
        )
        .route("/donations", post(routes::donors::record_donation))
        // Blood banks
        .route(
            "/blood-banks",
            post(routes::banks::register).get(routes::banks::search),
        )
        .route(
            "/blood-banks/:id",
            get(routes::banks::get).put(routes::banks::update),
        )
        .route("/blood-stock", put(routes::banks::set_stock))
        // Request board
        .route(
            "/blood-requests",
            post(routes::requests::create).get(routes::requests::list),
        )
        .route(
            "/blood-requests/:id",
            get(routes::requests::get).put(routes::requests::update_status),
        )
        // Admin
        .route("/admin/reports", get(routes::admin::reports))
        .route("/admin/users", get(routes::admin::users))
        .route("/admin/verify", post(routes::admin::verify))
        .route("/admin/promote", post(routes::admin::promote))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
