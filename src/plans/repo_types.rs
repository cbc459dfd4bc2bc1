use anyhow::anyhow;
use serde::Serialize;
use sqlx::{types::Json, FromRow};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::planner::{Gender, GeneratedPlan, Profile};

/// Plan handed to storage right after generation.
#[derive(Debug)]
pub struct NewPlan<'a> {
    pub user_id: Uuid,
    pub macro_ratio_id: i64,
    pub profile: &'a Profile,
    pub plan: &'a GeneratedPlan,
}

#[derive(Debug, Clone)]
pub struct StoredPlan {
    pub id: Uuid,
    pub user_id: Uuid,
    pub macro_ratio_id: i64,
    pub profile: Profile,
    pub plan: GeneratedPlan,
    pub created_at: OffsetDateTime,
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct PlanSummary {
    pub id: Uuid,
    pub macro_ratio_id: i64,
    pub daily_calories: i32,
    pub bmi: Option<f64>,
    pub activity_level: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl From<&StoredPlan> for PlanSummary {
    fn from(p: &StoredPlan) -> Self {
        Self {
            id: p.id,
            macro_ratio_id: p.macro_ratio_id,
            daily_calories: i32::try_from(p.plan.daily_calories).unwrap_or(i32::MAX),
            bmi: p.plan.bmi,
            activity_level: p.profile.activity.map(|a| a.as_str().to_string()),
            created_at: p.created_at,
        }
    }
}

#[derive(Debug, FromRow)]
pub struct PlanRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub macro_ratio_id: i64,
    pub age: i32,
    pub gender: String,
    pub weight: f64,
    pub height: Option<f64>,
    pub target_weight: Option<f64>,
    pub activity_level: Option<String>,
    pub snapshot: Json<GeneratedPlan>,
    pub created_at: OffsetDateTime,
}

impl TryFrom<PlanRow> for StoredPlan {
    type Error = anyhow::Error;

    fn try_from(r: PlanRow) -> Result<Self, Self::Error> {
        let gender = match r.gender.as_str() {
            "M" => Gender::Male,
            "F" => Gender::Female,
            other => return Err(anyhow!("plan {}: unknown gender '{other}'", r.id)),
        };
        Ok(Self {
            id: r.id,
            user_id: r.user_id,
            macro_ratio_id: r.macro_ratio_id,
            profile: Profile {
                age: u32::try_from(r.age).map_err(|_| anyhow!("plan {}: negative age", r.id))?,
                gender,
                weight_kg: r.weight,
                height_cm: r.height,
                activity: r.activity_level.and_then(|a| a.parse().ok()),
                target_weight_kg: r.target_weight,
            },
            plan: r.snapshot.0,
            created_at: r.created_at,
        })
    }
}
