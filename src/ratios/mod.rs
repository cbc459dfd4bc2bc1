pub mod handlers;
mod repo;
mod repo_types;

use crate::state::AppState;
use axum::Router;

pub use repo::{default_ratios, MacroRatioRepository, MemoryRatioRepo, PgRatioRepo};

pub fn router() -> Router<AppState> {
    handlers::ratio_routes()
}
