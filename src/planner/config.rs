use std::collections::HashMap;

use time::Weekday;

use super::model::{ActivityLevel, MealSlot};

/// Tables and tunables the planner reads.
///
/// Everything here is plain data handed to [`super::MealPlanner::new`], so
/// tests can swap any table without touching process state.
#[derive(Debug, Clone)]
pub struct PlannerConfig {
    pub activity_multipliers: HashMap<ActivityLevel, f64>,
    /// Multiplier for a missing or unrecognised activity level.
    pub default_activity_multiplier: f64,
    pub default_height_cm: f64,
    pub calorie_step: u32,
    pub calorie_floor: u32,
    pub goal: GoalAdjustment,
    pub fiber_min_g: u32,
    pub fiber_max_g: u32,
    /// Share of the daily budget per slot, in display order.
    pub meal_shares: [f64; 5],
    /// Added to every per-meal calorie target.
    pub meal_calorie_bonus: u32,
    /// `(hour-of-day upper bound, slot)`; the first band whose bound is above
    /// the current time is the meal we are at. Past the last band the pointer
    /// moves to breakfast tomorrow.
    pub meal_bands: Vec<(f64, MealSlot)>,
    pub labels: DayLabels,
    pub portions: PortionRules,
    pub candidate_limit: usize,
    pub days: usize,
}

#[derive(Debug, Clone, Copy)]
pub struct GoalAdjustment {
    pub large_threshold_kg: f64,
    pub large_kcal: f64,
    pub small_threshold_kg: f64,
    pub small_kcal: f64,
}

#[derive(Debug, Clone)]
pub struct DayLabels {
    pub today: String,
    pub tomorrow: String,
    /// Indexed Monday first.
    pub weekdays: [String; 7],
    pub no_match: String,
    pub past_suffix: String,
}

impl DayLabels {
    pub fn weekday(&self, day: Weekday) -> &str {
        &self.weekdays[day.number_days_from_monday() as usize]
    }

    pub fn past_meal(&self, slot: MealSlot) -> String {
        format!("{} {}", slot.label(), self.past_suffix)
    }
}

#[derive(Debug, Clone)]
pub struct PortionRules {
    /// Multiset the dish count is drawn from uniformly.
    pub dish_counts: Vec<usize>,
    pub min_grams: u32,
    pub max_grams: u32,
    pub grams_step: u32,
    /// Fraction of the remaining budget a single dish may use.
    pub headroom: f64,
    /// Selection stops once the remaining budget drops below this.
    pub min_remaining_kcal: i64,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        let activity_multipliers = HashMap::from([
            (ActivityLevel::Sedentary, 1.2),
            (ActivityLevel::Light, 1.375),
            (ActivityLevel::Moderate, 1.55),
            (ActivityLevel::Active, 1.725),
            (ActivityLevel::VeryActive, 1.9),
        ]);

        Self {
            activity_multipliers,
            default_activity_multiplier: 1.55,
            default_height_cm: 170.0,
            calorie_step: 50,
            calorie_floor: 1200,
            goal: GoalAdjustment {
                large_threshold_kg: 0.5,
                large_kcal: 550.0,
                small_threshold_kg: 0.1,
                small_kcal: 300.0,
            },
            fiber_min_g: 25,
            fiber_max_g: 38,
            meal_shares: [0.25, 0.10, 0.30, 0.10, 0.25],
            meal_calorie_bonus: 5,
            meal_bands: vec![
                (9.5, MealSlot::Breakfast),
                (11.0, MealSlot::Snack1),
                (13.5, MealSlot::Lunch),
                (17.0, MealSlot::Snack2),
                (20.5, MealSlot::Dinner),
            ],
            labels: DayLabels {
                today: "Today".into(),
                tomorrow: "Tomorrow".into(),
                weekdays: [
                    "Monday".into(),
                    "Tuesday".into(),
                    "Wednesday".into(),
                    "Thursday".into(),
                    "Friday".into(),
                    "Saturday".into(),
                    "Sunday".into(),
                ],
                no_match: "Manual choice recommended (no matching dishes)".into(),
                past_suffix: "already passed".into(),
            },
            portions: PortionRules {
                dish_counts: vec![1, 2, 2, 3],
                min_grams: 80,
                max_grams: 380,
                grams_step: 10,
                headroom: 0.8,
                min_remaining_kcal: 120,
            },
            candidate_limit: 12,
            days: 7,
        }
    }
}

impl PlannerConfig {
    pub fn activity_multiplier(&self, level: Option<ActivityLevel>) -> f64 {
        level
            .and_then(|l| self.activity_multipliers.get(&l).copied())
            .unwrap_or(self.default_activity_multiplier)
    }

    pub fn meal_share(&self, slot: MealSlot) -> f64 {
        self.meal_shares[slot.index()]
    }
}
