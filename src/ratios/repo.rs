use anyhow::Context;
use async_trait::async_trait;
use sqlx::PgPool;

use super::repo_types::MacroRatioRow;
use crate::planner::MacroRatio;

#[async_trait]
pub trait MacroRatioRepository: Send + Sync {
    async fn get(&self, id: i64) -> anyhow::Result<Option<MacroRatio>>;
    async fn list(&self) -> anyhow::Result<Vec<MacroRatio>>;
}

/// Ratios every installation starts with (also seeded by the initial migration).
pub fn default_ratios() -> Vec<MacroRatio> {
    [
        ("Balanced Standard", 30, 45, 25, "Classic split recommended by most official guidelines."),
        ("High-Protein (Weight Loss)", 35, 35, 30, "More protein for satiety and keeping lean mass."),
        ("High-Protein Extreme", 40, 30, 30, "For definition phases and aggressive cutting."),
        ("Zone 40-30-30", 40, 30, 30, "The classic Zone diet split."),
        ("Moderate Low-Carb", 30, 25, 45, "Moderate carb reduction, shifts toward fat burning."),
        ("Ketogenic Standard", 20, 5, 75, "The most common ketogenic variant."),
        ("Keto High-Protein (Gym)", 35, 5, 60, "Keto for people who train hard."),
        ("Carb Cycling / Anabolic", 35, 50, 15, "Heavy training days with plenty of carbs."),
        ("Lean Bulking", 25, 55, 20, "Clean bulk with the surplus coming from carbs."),
        ("Low-Fat (Old-School)", 25, 60, 15, "Classic endurance style, still used by runners."),
    ]
    .into_iter()
    .zip(1..)
    .map(|((name, p, c, f, desc), id)| MacroRatio {
        id,
        name: name.into(),
        protein_pct: p,
        carb_pct: c,
        fat_pct: f,
        fiber_recommendation: "14g / 1000 kcal".into(),
        description: desc.into(),
    })
    .collect()
}

#[derive(Clone)]
pub struct PgRatioRepo {
    db: PgPool,
}

impl PgRatioRepo {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl MacroRatioRepository for PgRatioRepo {
    async fn get(&self, id: i64) -> anyhow::Result<Option<MacroRatio>> {
        let row = sqlx::query_as::<_, MacroRatioRow>(
            r#"
            SELECT id, name, protein_pct, carb_pct, fat_pct, fiber_recommendation, description
            FROM macro_ratios
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.db)
        .await
        .with_context(|| format!("load macro ratio {id}"))?;
        row.map(MacroRatio::try_from).transpose()
    }

    async fn list(&self) -> anyhow::Result<Vec<MacroRatio>> {
        let rows = sqlx::query_as::<_, MacroRatioRow>(
            r#"
            SELECT id, name, protein_pct, carb_pct, fat_pct, fiber_recommendation, description
            FROM macro_ratios
            ORDER BY name
            "#,
        )
        .fetch_all(&self.db)
        .await
        .context("list macro ratios")?;
        rows.into_iter().map(MacroRatio::try_from).collect()
    }
}

#[derive(Debug, Clone)]
pub struct MemoryRatioRepo {
    ratios: Vec<MacroRatio>,
}

impl MemoryRatioRepo {
    pub fn new(ratios: Vec<MacroRatio>) -> Self {
        Self { ratios }
    }
}

impl Default for MemoryRatioRepo {
    fn default() -> Self {
        Self::new(default_ratios())
    }
}

#[async_trait]
impl MacroRatioRepository for MemoryRatioRepo {
    async fn get(&self, id: i64) -> anyhow::Result<Option<MacroRatio>> {
        Ok(self.ratios.iter().find(|r| r.id == id).cloned())
    }

    async fn list(&self) -> anyhow::Result<Vec<MacroRatio>> {
        let mut all = self.ratios.clone();
        all.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(all)
    }
}
