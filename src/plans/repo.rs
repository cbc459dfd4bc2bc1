use std::sync::Mutex;

use anyhow::{anyhow, Context};
use async_trait::async_trait;
use sqlx::{types::Json, PgPool};
use time::OffsetDateTime;
use uuid::Uuid;

use super::repo_types::{NewPlan, PlanRow, PlanSummary, StoredPlan};
use crate::planner::TenantId;

#[async_trait]
pub trait PlanRepository: Send + Sync {
    /// Stores a generated plan and returns its id.
    async fn store(&self, new: &NewPlan<'_>) -> anyhow::Result<Uuid>;

    /// A user's plans at one tenant, newest first.
    async fn list_for_user(
        &self,
        user_id: Uuid,
        tenant: TenantId,
        limit: i64,
        offset: i64,
    ) -> anyhow::Result<Vec<PlanSummary>>;

    async fn get(&self, user_id: Uuid, tenant: TenantId, id: Uuid) -> anyhow::Result<Option<StoredPlan>>;
}

#[derive(Clone)]
pub struct PgPlanRepo {
    db: PgPool,
}

impl PgPlanRepo {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl PlanRepository for PgPlanRepo {
    async fn store(&self, new: &NewPlan<'_>) -> anyhow::Result<Uuid> {
        let plan = new.plan;
        let profile = new.profile;
        let id: Uuid = sqlx::query_scalar(
            r#"
            INSERT INTO meal_plans (
                id, user_id, tenant_id, macro_ratio_id,
                daily_calories, protein_g, carbs_g, fat_g, fiber_g, bmi,
                age, gender, weight, height, target_weight, activity_level,
                snapshot
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17)
            RETURNING id
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(new.user_id)
        .bind(plan.tenant_id.0)
        .bind(new.macro_ratio_id)
        .bind(i32::try_from(plan.daily_calories)?)
        .bind(i32::try_from(plan.targets.protein_g)?)
        .bind(i32::try_from(plan.targets.carbs_g)?)
        .bind(i32::try_from(plan.targets.fat_g)?)
        .bind(i32::try_from(plan.targets.fiber_g)?)
        .bind(plan.bmi)
        .bind(i32::try_from(profile.age)?)
        .bind(profile.gender.as_str())
        .bind(profile.weight_kg)
        .bind(profile.height_cm)
        .bind(profile.target_weight_kg)
        .bind(profile.activity.map(|a| a.as_str()))
        .bind(Json(plan))
        .fetch_one(&self.db)
        .await
        .with_context(|| format!("store meal plan for user {}", new.user_id))?;
        Ok(id)
    }

    async fn list_for_user(
        &self,
        user_id: Uuid,
        tenant: TenantId,
        limit: i64,
        offset: i64,
    ) -> anyhow::Result<Vec<PlanSummary>> {
        let rows = sqlx::query_as::<_, PlanSummary>(
            r#"
            SELECT id, macro_ratio_id, daily_calories, bmi, activity_level, created_at
            FROM meal_plans
            WHERE user_id = $1 AND tenant_id = $2
            ORDER BY created_at DESC
            LIMIT $3 OFFSET $4
            "#,
        )
        .bind(user_id)
        .bind(tenant.0)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.db)
        .await
        .with_context(|| format!("list meal plans for user {user_id}"))?;
        Ok(rows)
    }

    async fn get(&self, user_id: Uuid, tenant: TenantId, id: Uuid) -> anyhow::Result<Option<StoredPlan>> {
        let row = sqlx::query_as::<_, PlanRow>(
            r#"
            SELECT id, user_id, macro_ratio_id, age, gender, weight, height,
                   target_weight, activity_level, snapshot, created_at
            FROM meal_plans
            WHERE id = $1 AND user_id = $2 AND tenant_id = $3
            "#,
        )
        .bind(id)
        .bind(user_id)
        .bind(tenant.0)
        .fetch_optional(&self.db)
        .await
        .with_context(|| format!("load meal plan {id}"))?;
        row.map(StoredPlan::try_from).transpose()
    }
}

#[derive(Debug, Default)]
pub struct MemoryPlanRepo {
    plans: Mutex<Vec<StoredPlan>>,
}

impl MemoryPlanRepo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.plans.lock().map(|p| p.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl PlanRepository for MemoryPlanRepo {
    async fn store(&self, new: &NewPlan<'_>) -> anyhow::Result<Uuid> {
        let id = Uuid::new_v4();
        let mut plans = self.plans.lock().map_err(|_| anyhow!("plan store poisoned"))?;
        plans.push(StoredPlan {
            id,
            user_id: new.user_id,
            macro_ratio_id: new.macro_ratio_id,
            profile: new.profile.clone(),
            plan: new.plan.clone(),
            created_at: OffsetDateTime::now_utc(),
        });
        Ok(id)
    }

    async fn list_for_user(
        &self,
        user_id: Uuid,
        tenant: TenantId,
        limit: i64,
        offset: i64,
    ) -> anyhow::Result<Vec<PlanSummary>> {
        let plans = self.plans.lock().map_err(|_| anyhow!("plan store poisoned"))?;
        let skip = usize::try_from(offset.max(0))?;
        let take = usize::try_from(limit.max(0))?;
        Ok(plans
            .iter()
            .rev()
            .filter(|p| p.user_id == user_id && p.plan.tenant_id == tenant)
            .skip(skip)
            .take(take)
            .map(PlanSummary::from)
            .collect())
    }

    async fn get(&self, user_id: Uuid, tenant: TenantId, id: Uuid) -> anyhow::Result<Option<StoredPlan>> {
        let plans = self.plans.lock().map_err(|_| anyhow!("plan store poisoned"))?;
        Ok(plans
            .iter()
            .find(|p| p.id == id && p.user_id == user_id && p.plan.tenant_id == tenant)
            .cloned())
    }
}
