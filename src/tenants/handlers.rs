use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use tracing::{error, instrument};

use crate::{planner::Tenant, state::AppState};

pub fn tenant_routes() -> Router<AppState> {
    Router::new().route("/restaurants", get(list_restaurants))
}

#[instrument(skip(state))]
pub async fn list_restaurants(
    State(state): State<AppState>,
) -> Result<Json<Vec<Tenant>>, (StatusCode, String)> {
    let tenants = state.tenants.list().await.map_err(|e| {
        error!(error = %e, "list restaurants failed");
        (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
    })?;
    Ok(Json(tenants))
}
