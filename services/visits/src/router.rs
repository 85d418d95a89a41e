use axum::{
    Router,
    routing::{get, post},
};

use magicbank_core::health::health_routes;
use magicbank_core::middleware::with_common_layers;

use crate::handlers::{
    status::banner,
    visit::{redeem_visit, request_visit},
};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let router = Router::new()
        // Health
        .route("/", get(banner))
        .merge(health_routes())
        // Visits
        .route("/visita/solicitar", post(request_visit))
        .route("/visita/validar", post(redeem_visit))
        .with_state(state);
    with_common_layers(router)
}
