use axum::http::StatusCode;
use rand::rngs::StdRng;
use rand::SeedableRng;
use thiserror::Error;
use time::OffsetDateTime;
use tracing::{error, info, instrument};
use uuid::Uuid;

use super::dto::{GeneratePlanRequest, PlanDetails, PlanResponse};
use super::repo_types::{NewPlan, PlanSummary};
use crate::planner::{LegacyCatalog, PlanError, PlanRequest, Tenant};
use crate::state::AppState;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Plan(#[from] PlanError),
    #[error("{0} not found")]
    NotFound(&'static str),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl ServiceError {
    pub fn status(&self) -> StatusCode {
        match self {
            ServiceError::Plan(PlanError::Validation { .. }) => StatusCode::BAD_REQUEST,
            ServiceError::Plan(PlanError::Configuration(_)) => StatusCode::INTERNAL_SERVER_ERROR,
            ServiceError::NotFound(_) => StatusCode::NOT_FOUND,
            ServiceError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<ServiceError> for (StatusCode, String) {
    fn from(e: ServiceError) -> Self {
        (e.status(), e.to_string())
    }
}

/// Generates a plan for `tenant` and, when a caller is known, stores it.
///
/// A storage failure is logged and the plan is still returned, without an id.
#[instrument(skip(state, request, tenant), fields(tenant = ?tenant.map(|t| t.slug.as_str())))]
pub async fn generate_plan(
    state: &AppState,
    tenant: Option<&Tenant>,
    caller: Option<Uuid>,
    request: GeneratePlanRequest,
    now: OffsetDateTime,
) -> Result<PlanResponse, ServiceError> {
    let tenant = tenant.ok_or_else(PlanError::missing_tenant)?;
    let input = request.validate()?;

    let macro_ratio = state.ratios.get(input.macro_ratio_id).await?.ok_or_else(|| {
        PlanError::invalid(
            "macro_ratio_id",
            format!("unknown macro ratio {}", input.macro_ratio_id),
        )
    })?;
    let requested = &input.constraints.excluded_allergens;
    if !requested.is_empty() {
        let known = state.allergens.existing(requested).await?;
        let unknown: Vec<String> = requested
            .difference(&known)
            .map(|id| id.0.to_string())
            .collect();
        if !unknown.is_empty() {
            return Err(PlanError::invalid(
                "allergens",
                format!("unknown allergen ids {}", unknown.join(", ")),
            )
            .into());
        }
    }
    let catalog = state.dishes.snapshot(tenant.id).await?;

    let request = PlanRequest {
        profile: input.profile,
        macro_ratio,
        constraints: input.constraints,
    };
    let plan = {
        let mut rng = match input.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        if state.config.dietary_filters {
            state.planner.generate(&request, Some(tenant), &catalog, now, &mut rng)?
        } else {
            state
                .planner
                .generate(&request, Some(tenant), &LegacyCatalog(catalog), now, &mut rng)?
        }
    };

    let saved_plan_id = match caller {
        Some(user_id) => {
            let new = NewPlan {
                user_id,
                macro_ratio_id: request.macro_ratio.id,
                profile: &request.profile,
                plan: &plan,
            };
            match state.plans.store(&new).await {
                Ok(id) => {
                    info!(%user_id, plan_id = %id, "meal plan saved");
                    Some(id)
                }
                Err(e) => {
                    error!(error = %e, %user_id, "saving meal plan failed");
                    None
                }
            }
        }
        None => None,
    };

    Ok(PlanResponse::new(plan, saved_plan_id))
}

#[instrument(skip(state))]
pub async fn list_plans(
    state: &AppState,
    tenant: &Tenant,
    user_id: Uuid,
    limit: i64,
    offset: i64,
) -> Result<Vec<PlanSummary>, ServiceError> {
    let limit = limit.clamp(1, 100);
    let offset = offset.max(0);
    Ok(state
        .plans
        .list_for_user(user_id, tenant.id, limit, offset)
        .await?)
}

#[instrument(skip(state))]
pub async fn get_plan(
    state: &AppState,
    tenant: &Tenant,
    user_id: Uuid,
    id: Uuid,
) -> Result<PlanDetails, ServiceError> {
    state
        .plans
        .get(user_id, tenant.id, id)
        .await?
        .map(PlanDetails::from)
        .ok_or(ServiceError::NotFound("meal plan"))
}
