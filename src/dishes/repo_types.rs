use anyhow::anyhow;
use sqlx::FromRow;
use uuid::Uuid;

use crate::planner::{AllergenId, DietFlags, Dish, Nutrients, TenantId, TenantScope};

#[derive(Debug, Clone, FromRow)]
pub struct DishRow {
    pub id: Uuid,
    pub tenant_id: Option<Uuid>,
    pub name: String,
    pub meal_slot: String,
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
    pub fiber: f64,
    pub is_vegan: bool,
    pub is_vegetarian: bool,
    pub is_raw_vegan: bool,
    pub is_gluten_free: bool,
    pub is_lactose_free: bool,
    pub is_active: bool,
    pub allergens: Vec<i64>,
}

impl TryFrom<DishRow> for Dish {
    type Error = anyhow::Error;

    fn try_from(r: DishRow) -> Result<Self, Self::Error> {
        let slot = r
            .meal_slot
            .parse()
            .map_err(|e: String| anyhow!("dish {}: {e}", r.id))?;
        Ok(Self {
            id: r.id,
            name: r.name,
            slot,
            per_100g: Nutrients {
                calories: r.calories,
                protein: r.protein,
                carbs: r.carbs,
                fat: r.fat,
                fiber: r.fiber,
            },
            diet: DietFlags {
                vegan: r.is_vegan,
                vegetarian: r.is_vegetarian,
                raw_vegan: r.is_raw_vegan,
                gluten_free: r.is_gluten_free,
                lactose_free: r.is_lactose_free,
            },
            allergens: r.allergens.into_iter().map(AllergenId).collect(),
            active: r.is_active,
            scope: r
                .tenant_id
                .map_or(TenantScope::Global, |id| TenantScope::Tenant(TenantId(id))),
        })
    }
}
