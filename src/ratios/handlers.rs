use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use tracing::{error, instrument};

use crate::{planner::MacroRatio, state::AppState};

pub fn ratio_routes() -> Router<AppState> {
    Router::new().route("/macro-ratios", get(list_ratios))
}

#[instrument(skip(state))]
pub async fn list_ratios(
    State(state): State<AppState>,
) -> Result<Json<Vec<MacroRatio>>, (StatusCode, String)> {
    let ratios = state.ratios.list().await.map_err(|e| {
        error!(error = %e, "list macro ratios failed");
        (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
    })?;
    Ok(Json(ratios))
}

#[cfg(test)]
mod tests {
    use axum::{
        body::{to_bytes, Body},
        http::Request,
    };
    use tower::ServiceExt;

    use crate::app::build_app;
    use crate::state::AppState;

    #[tokio::test]
    async fn lists_seeded_ratios() {
        let res = build_app(AppState::fake())
            .oneshot(Request::builder().uri("/api/v1/macro-ratios").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert!(res.status().is_success());
        let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();
        let ratios: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(ratios.as_array().map(Vec::len), Some(10));
    }
}
