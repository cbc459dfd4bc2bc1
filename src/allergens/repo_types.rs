use sqlx::FromRow;

use crate::planner::{Allergen, AllergenId};

#[derive(Debug, Clone, FromRow)]
pub struct AllergenRow {
    pub id: i64,
    pub name: String,
}

impl From<AllergenRow> for Allergen {
    fn from(r: AllergenRow) -> Self {
        Self {
            id: AllergenId(r.id),
            name: r.name,
        }
    }
}
