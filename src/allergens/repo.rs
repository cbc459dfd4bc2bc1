use std::collections::BTreeSet;

use anyhow::Context;
use async_trait::async_trait;
use sqlx::PgPool;

use super::repo_types::AllergenRow;
use crate::planner::{Allergen, AllergenId};

#[async_trait]
pub trait AllergenRepository: Send + Sync {
    async fn list(&self) -> anyhow::Result<Vec<Allergen>>;

    /// Which of `ids` exist.
    async fn existing(&self, ids: &BTreeSet<AllergenId>) -> anyhow::Result<BTreeSet<AllergenId>>;
}

/// The fourteen allergens food businesses must declare in the EU.
pub fn default_allergens() -> Vec<Allergen> {
    [
        "Gluten",
        "Crustaceans",
        "Eggs",
        "Fish",
        "Peanuts",
        "Soybeans",
        "Milk",
        "Tree nuts",
        "Celery",
        "Mustard",
        "Sesame",
        "Sulphites",
        "Lupin",
        "Molluscs",
    ]
    .into_iter()
    .zip(1..)
    .map(|(name, id)| Allergen {
        id: AllergenId(id),
        name: name.into(),
    })
    .collect()
}

#[derive(Clone)]
pub struct PgAllergenRepo {
    db: PgPool,
}

impl PgAllergenRepo {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl AllergenRepository for PgAllergenRepo {
    async fn list(&self) -> anyhow::Result<Vec<Allergen>> {
        let rows = sqlx::query_as::<_, AllergenRow>(
            r#"
            SELECT id, name
            FROM allergens
            ORDER BY name
            "#,
        )
        .fetch_all(&self.db)
        .await
        .context("list allergens")?;
        Ok(rows.into_iter().map(Allergen::from).collect())
    }

    async fn existing(&self, ids: &BTreeSet<AllergenId>) -> anyhow::Result<BTreeSet<AllergenId>> {
        let wanted: Vec<i64> = ids.iter().map(|id| id.0).collect();
        let found: Vec<i64> = sqlx::query_scalar(
            r#"
            SELECT id
            FROM allergens
            WHERE id = ANY($1)
            "#,
        )
        .bind(&wanted)
        .fetch_all(&self.db)
        .await
        .context("look up allergens")?;
        Ok(found.into_iter().map(AllergenId).collect())
    }
}

#[derive(Debug, Clone)]
pub struct MemoryAllergenRepo {
    allergens: Vec<Allergen>,
}

impl MemoryAllergenRepo {
    pub fn new(allergens: Vec<Allergen>) -> Self {
        Self { allergens }
    }
}

impl Default for MemoryAllergenRepo {
    fn default() -> Self {
        Self::new(default_allergens())
    }
}

#[async_trait]
impl AllergenRepository for MemoryAllergenRepo {
    async fn list(&self) -> anyhow::Result<Vec<Allergen>> {
        let mut all = self.allergens.clone();
        all.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(all)
    }

    async fn existing(&self, ids: &BTreeSet<AllergenId>) -> anyhow::Result<BTreeSet<AllergenId>> {
        Ok(self
            .allergens
            .iter()
            .map(|a| a.id)
            .filter(|id| ids.contains(id))
            .collect())
    }
}
