//! Read-only dish catalog access and candidate selection for one meal.

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::trace;

use super::error::CatalogError;
use super::model::{DietaryConstraints, Dish, MealSlot, TenantId};

/// Narrow read interface over whatever stores dishes.
pub trait DishCatalog {
    /// Active dishes tagged with `slot` that belong to `tenant` or to everyone.
    fn find_for_slot(&self, slot: MealSlot, tenant: TenantId) -> Vec<Dish>;

    /// Same as [`DishCatalog::find_for_slot`], narrowed by dietary flags and
    /// excluded allergens.
    fn find(&self, slot: MealSlot, tenant: TenantId, constraints: &DietaryConstraints) -> Vec<Dish> {
        self.find_for_slot(slot, tenant)
            .into_iter()
            .filter(|dish| constraints.admits(dish))
            .collect()
    }
}

pub fn is_offered(dish: &Dish, slot: MealSlot, tenant: TenantId) -> bool {
    dish.slot == slot && dish.active && dish.scope.admits(tenant)
}

/// At most `limit` matching dishes in random order.
pub fn candidates<C, R>(
    catalog: &C,
    slot: MealSlot,
    tenant: TenantId,
    constraints: &DietaryConstraints,
    limit: usize,
    rng: &mut R,
) -> Vec<Dish>
where
    C: DishCatalog + ?Sized,
    R: Rng + ?Sized,
{
    let mut found = catalog.find(slot, tenant, constraints);
    let matched = found.len();
    found.shuffle(rng);
    found.truncate(limit);
    trace!(%slot, %tenant, matched, kept = found.len(), "catalog candidates");
    found
}

/// Point-in-time copy of a catalog.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalog {
    dishes: Vec<Dish>,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, dish: Dish) -> Result<(), CatalogError> {
        if self
            .dishes
            .iter()
            .any(|d| d.name == dish.name && d.scope == dish.scope)
        {
            return Err(CatalogError::Duplicate { name: dish.name });
        }
        self.dishes.push(dish);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.dishes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dishes.is_empty()
    }

    pub fn dishes(&self) -> &[Dish] {
        &self.dishes
    }
}

impl TryFrom<Vec<Dish>> for InMemoryCatalog {
    type Error = CatalogError;

    fn try_from(dishes: Vec<Dish>) -> Result<Self, Self::Error> {
        let mut catalog = InMemoryCatalog::new();
        for dish in dishes {
            catalog.insert(dish)?;
        }
        Ok(catalog)
    }
}

impl DishCatalog for InMemoryCatalog {
    fn find_for_slot(&self, slot: MealSlot, tenant: TenantId) -> Vec<Dish> {
        self.dishes
            .iter()
            .filter(|d| is_offered(d, slot, tenant))
            .cloned()
            .collect()
    }
}

/// Degraded mode for catalogs without dietary data: constraints are ignored
/// and only slot, activity and tenant visibility are checked.
#[derive(Debug, Clone)]
pub struct LegacyCatalog<C>(pub C);

impl<C: DishCatalog> DishCatalog for LegacyCatalog<C> {
    fn find_for_slot(&self, slot: MealSlot, tenant: TenantId) -> Vec<Dish> {
        self.0.find_for_slot(slot, tenant)
    }

    fn find(&self, slot: MealSlot, tenant: TenantId, _constraints: &DietaryConstraints) -> Vec<Dish> {
        self.0.find_for_slot(slot, tenant)
    }
}
