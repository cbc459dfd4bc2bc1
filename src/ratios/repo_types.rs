use anyhow::Context;
use sqlx::FromRow;

use crate::planner::MacroRatio;

#[derive(Debug, Clone, FromRow)]
pub struct MacroRatioRow {
    pub id: i64,
    pub name: String,
    pub protein_pct: i32,
    pub carb_pct: i32,
    pub fat_pct: i32,
    pub fiber_recommendation: String,
    pub description: String,
}

impl TryFrom<MacroRatioRow> for MacroRatio {
    type Error = anyhow::Error;

    fn try_from(r: MacroRatioRow) -> Result<Self, Self::Error> {
        let pct = |v: i32| u32::try_from(v).with_context(|| format!("macro ratio {} has a negative share", r.id));
        Ok(Self {
            id: r.id,
            protein_pct: pct(r.protein_pct)?,
            carb_pct: pct(r.carb_pct)?,
            fat_pct: pct(r.fat_pct)?,
            name: r.name,
            fiber_recommendation: r.fiber_recommendation,
            description: r.description,
        })
    }
}
