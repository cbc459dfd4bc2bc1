use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use tracing::warn;
use uuid::Uuid;

use crate::planner::{
    ActivityLevel, AllergenId, DayPlan, DietaryConstraints, Gender, GeneratedPlan, PlanError,
    Profile,
};

use super::repo_types::StoredPlan;

const AGE_RANGE: RangeInclusive<u32> = 15..=100;
const WEIGHT_RANGE: RangeInclusive<f64> = 30.0..=300.0;
const HEIGHT_RANGE: RangeInclusive<f64> = 100.0..=250.0;

/// Body of `POST /:tenant/plans`.
#[derive(Debug, Clone, Deserialize)]
pub struct GeneratePlanRequest {
    pub age: u32,
    pub gender: Gender,
    pub weight: f64,
    #[serde(default)]
    pub height: Option<f64>,
    #[serde(default)]
    pub target_weight: Option<f64>,
    pub activity_level: String,
    pub macro_ratio_id: i64,
    #[serde(default)]
    pub is_vegan: bool,
    #[serde(default)]
    pub is_vegetarian: bool,
    #[serde(default)]
    pub is_raw_vegan: bool,
    #[serde(default)]
    pub is_gluten_free: bool,
    #[serde(default)]
    pub is_lactose_free: bool,
    #[serde(default)]
    pub allergens: Vec<i64>,
    /// Fixes the random choices so the same request gives the same plan.
    #[serde(default)]
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedRequest {
    pub profile: Profile,
    pub constraints: DietaryConstraints,
    pub macro_ratio_id: i64,
    pub seed: Option<u64>,
}

fn check_weight(field: &'static str, value: f64) -> Result<f64, PlanError> {
    if value.is_finite() && WEIGHT_RANGE.contains(&value) {
        Ok(value)
    } else {
        Err(PlanError::invalid(field, "must be between 30 and 300 kg"))
    }
}

impl GeneratePlanRequest {
    pub fn validate(self) -> Result<ValidatedRequest, PlanError> {
        if !AGE_RANGE.contains(&self.age) {
            return Err(PlanError::invalid("age", "must be between 15 and 100"));
        }
        let weight_kg = check_weight("weight", self.weight)?;
        let target_weight_kg = self
            .target_weight
            .map(|w| check_weight("target_weight", w))
            .transpose()?;
        if let Some(h) = self.height {
            if !(h.is_finite() && HEIGHT_RANGE.contains(&h)) {
                return Err(PlanError::invalid("height", "must be between 100 and 250 cm"));
            }
        }

        let activity = match self.activity_level.parse::<ActivityLevel>() {
            Ok(level) => Some(level),
            Err(e) => {
                warn!(error = %e, "falling back to default activity multiplier");
                None
            }
        };

        Ok(ValidatedRequest {
            profile: Profile {
                age: self.age,
                gender: self.gender,
                weight_kg,
                height_cm: self.height,
                activity,
                target_weight_kg,
            },
            constraints: DietaryConstraints {
                vegan: self.is_vegan,
                vegetarian: self.is_vegetarian,
                raw_vegan: self.is_raw_vegan,
                gluten_free: self.is_gluten_free,
                lactose_free: self.is_lactose_free,
                excluded_allergens: self.allergens.into_iter().map(AllergenId).collect(),
            },
            macro_ratio_id: self.macro_ratio_id,
            seed: self.seed,
        })
    }
}

#[derive(Debug, Serialize)]
pub struct PlanResponse {
    pub success: bool,
    pub message: String,
    pub daily_calories: u32,
    pub bmi: Option<f64>,
    pub protein_g: u32,
    pub carbs_g: u32,
    pub fat_g: u32,
    pub fiber_g: u32,
    pub days: Vec<DayPlan>,
    pub saved_plan_id: Option<Uuid>,
}

impl PlanResponse {
    pub fn new(plan: GeneratedPlan, saved_plan_id: Option<Uuid>) -> Self {
        Self {
            success: true,
            message: "Your personalised meal plan is ready.".into(),
            daily_calories: plan.daily_calories,
            bmi: plan.bmi,
            protein_g: plan.targets.protein_g,
            carbs_g: plan.targets.carbs_g,
            fat_g: plan.targets.fat_g,
            fiber_g: plan.targets.fiber_g,
            days: plan.days,
            saved_plan_id,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PlanDetails {
    pub id: Uuid,
    pub macro_ratio_id: i64,
    pub profile: Profile,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    pub plan: GeneratedPlan,
}

impl From<StoredPlan> for PlanDetails {
    fn from(p: StoredPlan) -> Self {
        Self {
            id: p.id,
            macro_ratio_id: p.macro_ratio_id,
            profile: p.profile,
            created_at: p.created_at,
            plan: p.plan,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct Pagination {
    #[serde(default = "default_limit")]
    pub limit: i64,
    #[serde(default)]
    pub offset: i64,
}
fn default_limit() -> i64 { 10 }

#[cfg(test)]
mod tests {
    use super::*;

    fn body() -> GeneratePlanRequest {
        serde_json::from_value(serde_json::json!({
            "age": 30,
            "gender": "M",
            "weight": 80.0,
            "height": 180.0,
            "activity_level": "moderate",
            "macro_ratio_id": 1,
            "is_raw_vegan": true,
            "allergens": [2, 5]
        }))
        .expect("valid body")
    }

    #[test]
    fn valid_body_maps_to_profile_and_constraints() {
        let v = body().validate().expect("valid");
        assert_eq!(v.profile.activity, Some(ActivityLevel::Moderate));
        assert_eq!(v.profile.target_weight_kg, None);
        assert!(v.constraints.raw_vegan);
        // Implications are applied by the planner, not here.
        assert!(!v.constraints.vegan);
        assert_eq!(v.constraints.excluded_allergens.len(), 2);
    }

    #[test]
    fn out_of_range_fields_are_reported_by_name() {
        let mut b = body();
        b.age = 12;
        assert!(matches!(b.validate(), Err(PlanError::Validation { field: "age", .. })));

        let mut b = body();
        b.weight = f64::NAN;
        assert!(matches!(b.validate(), Err(PlanError::Validation { field: "weight", .. })));

        let mut b = body();
        b.height = Some(40.0);
        assert!(matches!(b.validate(), Err(PlanError::Validation { field: "height", .. })));

        let mut b = body();
        b.target_weight = Some(500.0);
        assert!(matches!(
            b.validate(),
            Err(PlanError::Validation { field: "target_weight", .. })
        ));
    }

    #[test]
    fn unknown_activity_is_not_an_error() {
        let mut b = body();
        b.activity_level = "marathoner".into();
        assert_eq!(b.validate().expect("valid").profile.activity, None);
    }

    #[test]
    fn non_numeric_age_is_rejected_by_deserialization() {
        let res: Result<GeneratePlanRequest, _> = serde_json::from_value(serde_json::json!({
            "age": "thirty",
            "gender": "F",
            "weight": 60.0,
            "activity_level": "light",
            "macro_ratio_id": 1
        }));
        assert!(res.is_err());
    }
}
