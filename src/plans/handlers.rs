use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use tracing::{error, instrument, warn};
use uuid::Uuid;

use super::dto::{GeneratePlanRequest, Pagination, PlanDetails, PlanResponse};
use super::extractors::Caller;
use super::repo_types::PlanSummary;
use super::services::{self, ServiceError};
use crate::{planner::Tenant, state::AppState};

pub fn plan_routes() -> Router<AppState> {
    Router::new()
        .route("/:tenant/plans", get(list_plans).post(generate_plan))
        .route("/:tenant/plans/:id", get(get_plan))
}

async fn resolve_tenant(state: &AppState, slug: &str) -> Result<Tenant, (StatusCode, String)> {
    match state.tenants.find_by_slug(slug).await {
        Ok(Some(t)) => Ok(t),
        Ok(None) => {
            warn!(%slug, "unknown restaurant");
            Err((StatusCode::NOT_FOUND, "Restaurant not found".into()))
        }
        Err(e) => {
            error!(error = %e, %slug, "tenant lookup failed");
            Err((StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))
        }
    }
}

fn reject(e: ServiceError) -> (StatusCode, String) {
    if e.status().is_server_error() {
        error!(error = %e, "plan request failed");
    }
    e.into()
}

#[instrument(skip(state, body))]
pub async fn generate_plan(
    State(state): State<AppState>,
    Path(tenant): Path<String>,
    Caller(caller): Caller,
    Json(body): Json<GeneratePlanRequest>,
) -> Result<Json<PlanResponse>, (StatusCode, String)> {
    let tenant = resolve_tenant(&state, &tenant).await?;
    let now = state.config.local_now();
    let plan = services::generate_plan(&state, Some(&tenant), caller, body, now)
        .await
        .map_err(reject)?;
    Ok(Json(plan))
}

#[instrument(skip(state))]
pub async fn list_plans(
    State(state): State<AppState>,
    Path(tenant): Path<String>,
    caller: Caller,
    Query(p): Query<Pagination>,
) -> Result<Json<Vec<PlanSummary>>, (StatusCode, String)> {
    let user_id = caller.required()?;
    let tenant = resolve_tenant(&state, &tenant).await?;
    let plans = services::list_plans(&state, &tenant, user_id, p.limit, p.offset)
        .await
        .map_err(reject)?;
    Ok(Json(plans))
}

#[instrument(skip(state))]
pub async fn get_plan(
    State(state): State<AppState>,
    Path((tenant, id)): Path<(String, Uuid)>,
    caller: Caller,
) -> Result<Json<PlanDetails>, (StatusCode, String)> {
    let user_id = caller.required()?;
    let tenant = resolve_tenant(&state, &tenant).await?;
    let plan = services::get_plan(&state, &tenant, user_id, id)
        .await
        .map_err(reject)?;
    Ok(Json(plan))
}

#[cfg(test)]
mod tests {
    use axum::{
        body::{to_bytes, Body},
        http::Request,
    };
    use tower::ServiceExt;

    use super::*;
    use crate::app::build_app;
    use crate::plans::extractors::CALLER_HEADER;

    fn generate_request(body: serde_json::Value, caller: Option<Uuid>) -> Request<Body> {
        let mut req = Request::builder()
            .method("POST")
            .uri("/api/v1/demo-kitchen/plans")
            .header("content-type", "application/json");
        if let Some(id) = caller {
            req = req.header(CALLER_HEADER, id.to_string());
        }
        req.body(Body::from(body.to_string())).unwrap()
    }

    fn valid_body() -> serde_json::Value {
        serde_json::json!({
            "age": 41,
            "gender": "F",
            "weight": 68.0,
            "height": 165.0,
            "activity_level": "light",
            "macro_ratio_id": 2,
            "is_vegetarian": true,
            "seed": 12
        })
    }

    #[tokio::test]
    async fn generate_returns_a_week() {
        let app = build_app(AppState::fake());
        let res = app.oneshot(generate_request(valid_body(), None)).await.unwrap();
        assert_eq!(res.status(), StatusCode::OK);

        let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json["success"], true);
        assert_eq!(json["days"].as_array().map(Vec::len), Some(7));
        assert!(json["saved_plan_id"].is_null());
        assert_eq!(json["daily_calories"].as_u64().map(|c| c % 50), Some(0));
    }

    #[tokio::test]
    async fn out_of_range_age_is_bad_request() {
        let app = build_app(AppState::fake());
        let mut body = valid_body();
        body["age"] = serde_json::json!(7);
        let res = app.oneshot(generate_request(body, None)).await.unwrap();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn unknown_restaurant_is_not_found() {
        let app = build_app(AppState::fake());
        let req = Request::builder()
            .method("POST")
            .uri("/api/v1/nowhere/plans")
            .header("content-type", "application/json")
            .body(Body::from(valid_body().to_string()))
            .unwrap();
        let res = app.oneshot(req).await.unwrap();
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn history_requires_caller() {
        let app = build_app(AppState::fake());
        let req = Request::builder()
            .uri("/api/v1/demo-kitchen/plans")
            .body(Body::empty())
            .unwrap();
        let res = app.oneshot(req).await.unwrap();
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn saved_plan_shows_up_in_history() {
        let state = AppState::fake();
        let user = Uuid::new_v4();

        let res = build_app(state.clone())
            .oneshot(generate_request(valid_body(), Some(user)))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        let id = json["saved_plan_id"].as_str().expect("saved id").to_string();

        let req = Request::builder()
            .uri("/api/v1/demo-kitchen/plans")
            .header(CALLER_HEADER, user.to_string())
            .body(Body::empty())
            .unwrap();
        let res = build_app(state.clone()).oneshot(req).await.unwrap();
        let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();
        let list: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(list[0]["id"], id.as_str());

        let req = Request::builder()
            .uri(format!("/api/v1/demo-kitchen/plans/{id}"))
            .header(CALLER_HEADER, user.to_string())
            .body(Body::empty())
            .unwrap();
        let res = build_app(state).oneshot(req).await.unwrap();
        assert_eq!(res.status(), StatusCode::OK);
    }
}
