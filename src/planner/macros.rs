use super::config::PlannerConfig;
use super::model::{MacroRatio, MacroTargets};

const KCAL_PER_G_PROTEIN: f64 = 4.0;
const KCAL_PER_G_CARBS: f64 = 4.0;
const KCAL_PER_G_FAT: f64 = 9.0;

fn grams(daily_calories: u32, pct: u32, kcal_per_g: f64) -> u32 {
    (f64::from(daily_calories) * f64::from(pct) / 100.0 / kcal_per_g).floor() as u32
}

/// Gram targets for a daily budget. Fiber follows the carb target, clamped
/// to the configured band.
pub fn allocate(daily_calories: u32, ratio: &MacroRatio, config: &PlannerConfig) -> MacroTargets {
    let protein_g = grams(daily_calories, ratio.protein_pct, KCAL_PER_G_PROTEIN);
    let carbs_g = grams(daily_calories, ratio.carb_pct, KCAL_PER_G_CARBS);
    let fat_g = grams(daily_calories, ratio.fat_pct, KCAL_PER_G_FAT);
    let fiber_g = (carbs_g / 12).clamp(config.fiber_min_g, config.fiber_max_g);

    MacroTargets {
        protein_g,
        carbs_g,
        fat_g,
        fiber_g,
    }
}

/// Body-mass index to one decimal, or `None` without a usable height.
pub fn body_mass_index(weight_kg: f64, height_cm: Option<f64>) -> Option<f64> {
    let height = height_cm.filter(|h| *h > 0.0)?;
    let meters = height / 100.0;
    Some((weight_kg / (meters * meters) * 10.0).round() / 10.0)
}
