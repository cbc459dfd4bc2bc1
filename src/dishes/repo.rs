use anyhow::Context;
use async_trait::async_trait;
use sqlx::PgPool;
use tracing::{debug, warn};

use super::repo_types::DishRow;
use crate::planner::{Dish, InMemoryCatalog, TenantId};

#[async_trait]
pub trait DishRepository: Send + Sync {
    /// Active dishes visible to `tenant`, copied out as one catalog snapshot.
    /// Dishes changed after the snapshot is taken do not affect a running
    /// generation.
    async fn snapshot(&self, tenant: TenantId) -> anyhow::Result<InMemoryCatalog>;
}

fn into_catalog(dishes: impl IntoIterator<Item = Dish>) -> InMemoryCatalog {
    let mut catalog = InMemoryCatalog::new();
    for dish in dishes {
        let name = dish.name.clone();
        if let Err(e) = catalog.insert(dish) {
            warn!(error = %e, %name, "skipping duplicate dish");
        }
    }
    catalog
}

#[derive(Clone)]
pub struct PgDishRepo {
    db: PgPool,
}

impl PgDishRepo {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl DishRepository for PgDishRepo {
    async fn snapshot(&self, tenant: TenantId) -> anyhow::Result<InMemoryCatalog> {
        let rows = sqlx::query_as::<_, DishRow>(
            r#"
            SELECT d.id, d.tenant_id, d.name, d.meal_slot,
                   d.calories, d.protein, d.carbs, d.fat, d.fiber,
                   d.is_vegan, d.is_vegetarian, d.is_raw_vegan,
                   d.is_gluten_free, d.is_lactose_free, d.is_active,
                   COALESCE(
                       array_agg(da.allergen_id) FILTER (WHERE da.allergen_id IS NOT NULL),
                       '{}'
                   ) AS allergens
            FROM dishes d
            LEFT JOIN dish_allergens da ON da.dish_id = d.id
            WHERE d.is_active AND (d.tenant_id = $1 OR d.tenant_id IS NULL)
            GROUP BY d.id
            "#,
        )
        .bind(tenant.0)
        .fetch_all(&self.db)
        .await
        .with_context(|| format!("load dish catalog for tenant {tenant}"))?;

        let dishes = rows
            .into_iter()
            .map(Dish::try_from)
            .collect::<anyhow::Result<Vec<_>>>()?;
        let catalog = into_catalog(dishes);
        debug!(%tenant, dishes = catalog.len(), "catalog snapshot loaded");
        Ok(catalog)
    }
}

#[derive(Debug, Clone, Default)]
pub struct MemoryDishRepo {
    dishes: Vec<Dish>,
}

impl MemoryDishRepo {
    pub fn new(dishes: Vec<Dish>) -> Self {
        Self { dishes }
    }
}

#[async_trait]
impl DishRepository for MemoryDishRepo {
    async fn snapshot(&self, tenant: TenantId) -> anyhow::Result<InMemoryCatalog> {
        Ok(into_catalog(
            self.dishes
                .iter()
                .filter(|d| d.active && d.scope.admits(tenant))
                .cloned(),
        ))
    }
}
