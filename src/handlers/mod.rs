use std::sync::Arc;

use axum::{
    routing::{get, patch, post, put},
    Router,
};

use crate::state::AppState;

pub mod auth;
pub mod dashboard;
pub mod donations;
pub mod medicines;

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/auth/signup", post(auth::sign_up))
        .route("/auth/signin", post(auth::sign_in))
        .route("/auth/signout", post(auth::sign_out))
        .route("/auth/me", get(auth::me))
        .route("/medicines", get(medicines::list).post(medicines::create))
        .route("/medicines/:id", patch(medicines::update).delete(medicines::remove))
        .route("/medicines/:id/donation", put(medicines::set_donation))
        .route("/dashboard", get(dashboard::stats))
        .route("/donations", get(donations::overview))
        .route("/donation-centers", get(donations::list_centers))
        .with_state(state)
}
