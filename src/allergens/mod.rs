pub mod handlers;
mod repo;
mod repo_types;

use crate::state::AppState;
use axum::Router;

pub use repo::{default_allergens, AllergenRepository, MemoryAllergenRepo, PgAllergenRepo};

pub fn router() -> Router<AppState> {
    handlers::allergen_routes()
}
