mod dto;
mod extractors;
pub mod handlers;
mod repo;
mod repo_types;
pub mod services;

use crate::state::AppState;
use axum::Router;

pub use repo::{MemoryPlanRepo, PgPlanRepo, PlanRepository};

pub fn router() -> Router<AppState> {
    handlers::plan_routes()
}
