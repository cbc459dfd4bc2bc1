pub mod handlers;
mod repo;
mod repo_types;

use crate::state::AppState;
use axum::Router;

pub use repo::{MemoryTenantRepo, PgTenantRepo, TenantRepository};

pub fn router() -> Router<AppState> {
    handlers::tenant_routes()
}
