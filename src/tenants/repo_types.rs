use sqlx::FromRow;
use uuid::Uuid;

use crate::planner::{Tenant, TenantId};

#[derive(Debug, Clone, FromRow)]
pub struct TenantRow {
    pub id: Uuid,
    pub slug: String,
    pub name: String,
}

impl From<TenantRow> for Tenant {
    fn from(r: TenantRow) -> Self {
        Self {
            id: TenantId(r.id),
            slug: r.slug,
            name: r.name,
        }
    }
}
