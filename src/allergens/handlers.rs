use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use tracing::{error, instrument};

use crate::{planner::Allergen, state::AppState};

pub fn allergen_routes() -> Router<AppState> {
    Router::new().route("/allergens", get(list_allergens))
}

#[instrument(skip(state))]
pub async fn list_allergens(
    State(state): State<AppState>,
) -> Result<Json<Vec<Allergen>>, (StatusCode, String)> {
    let allergens = state.allergens.list().await.map_err(|e| {
        error!(error = %e, "list allergens failed");
        (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
    })?;
    Ok(Json(allergens))
}
