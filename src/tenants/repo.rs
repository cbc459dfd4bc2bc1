use std::collections::HashMap;

use anyhow::Context;
use async_trait::async_trait;
use sqlx::PgPool;

use super::repo_types::TenantRow;
use crate::planner::Tenant;

#[async_trait]
pub trait TenantRepository: Send + Sync {
    /// Restaurant addressed by its URL slug.
    async fn find_by_slug(&self, slug: &str) -> anyhow::Result<Option<Tenant>>;

    /// All restaurants, ordered by name.
    async fn list(&self) -> anyhow::Result<Vec<Tenant>>;
}

#[derive(Clone)]
pub struct PgTenantRepo {
    db: PgPool,
}

impl PgTenantRepo {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl TenantRepository for PgTenantRepo {
    async fn find_by_slug(&self, slug: &str) -> anyhow::Result<Option<Tenant>> {
        let row = sqlx::query_as::<_, TenantRow>(
            r#"
            SELECT id, slug, name
            FROM tenants
            WHERE slug = $1
            "#,
        )
        .bind(slug)
        .fetch_optional(&self.db)
        .await
        .with_context(|| format!("load tenant '{slug}'"))?;
        Ok(row.map(Tenant::from))
    }

    async fn list(&self) -> anyhow::Result<Vec<Tenant>> {
        let rows = sqlx::query_as::<_, TenantRow>(
            r#"
            SELECT id, slug, name
            FROM tenants
            ORDER BY name
            "#,
        )
        .fetch_all(&self.db)
        .await
        .context("list tenants")?;
        Ok(rows.into_iter().map(Tenant::from).collect())
    }
}

#[derive(Debug, Clone, Default)]
pub struct MemoryTenantRepo {
    by_slug: HashMap<String, Tenant>,
}

impl MemoryTenantRepo {
    pub fn new(tenants: impl IntoIterator<Item = Tenant>) -> Self {
        Self {
            by_slug: tenants.into_iter().map(|t| (t.slug.clone(), t)).collect(),
        }
    }
}

#[async_trait]
impl TenantRepository for MemoryTenantRepo {
    async fn find_by_slug(&self, slug: &str) -> anyhow::Result<Option<Tenant>> {
        Ok(self.by_slug.get(slug).cloned())
    }

    async fn list(&self) -> anyhow::Result<Vec<Tenant>> {
        let mut all: Vec<Tenant> = self.by_slug.values().cloned().collect();
        all.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(all)
    }
}
