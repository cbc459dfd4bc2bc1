//! Meal pointer and weekly calendar.
//!
//! The pointer decides which slot is "now" from the tenant-local clock; the
//! slots before it on the first day are rendered as elapsed placeholders.

use time::{Date, Duration, Time};

use super::config::PlannerConfig;
use super::model::{MacroTargets, MealSlot, PortionedDish};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MealPointer {
    pub start: MealSlot,
    /// 0 when the plan starts today, 1 when it starts tomorrow.
    pub day_offset: u8,
    pub first_label: String,
}

pub fn meal_pointer(now: Time, config: &PlannerConfig) -> MealPointer {
    let hour = f64::from(now.hour()) + f64::from(now.minute()) / 60.0;
    match config.meal_bands.iter().find(|(until, _)| hour < *until) {
        Some(&(_, slot)) => MealPointer {
            start: slot,
            day_offset: 0,
            first_label: config.labels.today.clone(),
        },
        None => MealPointer {
            start: MealSlot::Breakfast,
            day_offset: 1,
            first_label: config.labels.tomorrow.clone(),
        },
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanDay {
    pub label: String,
    pub date: Date,
}

/// Consecutive days starting at `today + day_offset`.
///
/// When the plan starts tomorrow, the second entry keeps the "today" label.
pub fn week(today: Date, pointer: &MealPointer, config: &PlannerConfig) -> Vec<PlanDay> {
    let start = today.saturating_add(Duration::days(i64::from(pointer.day_offset)));
    (0..config.days)
        .map(|i| {
            let date = start.saturating_add(Duration::days(i as i64));
            let label = match i {
                0 => pointer.first_label.clone(),
                1 if pointer.day_offset == 1 => config.labels.today.clone(),
                _ => config.labels.weekday(date.weekday()).to_string(),
            };
            PlanDay { label, date }
        })
        .collect()
}

/// Whether `slot` on day `day` already happened.
pub fn is_elapsed(day: usize, slot: MealSlot, pointer: &MealPointer) -> bool {
    day == 0 && slot < pointer.start
}

pub fn past_placeholder(slot: MealSlot, config: &PlannerConfig) -> PortionedDish {
    PortionedDish::placeholder(config.labels.past_meal(slot), true)
}

/// Budget for a single meal. Macros are truncated per meal, so the five
/// meals may add up to slightly less than the daily targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MealTarget {
    pub calories: u32,
    pub protein_g: u32,
    pub carbs_g: u32,
    pub fat_g: u32,
}

pub fn meal_target(
    slot: MealSlot,
    daily_calories: u32,
    daily: &MacroTargets,
    config: &PlannerConfig,
) -> MealTarget {
    let share = config.meal_share(slot);
    let part = |total: u32| (f64::from(total) * share) as u32;
    MealTarget {
        calories: (f64::from(daily_calories) * share).round() as u32 + config.meal_calorie_bonus,
        protein_g: part(daily.protein_g),
        carbs_g: part(daily.carbs_g),
        fat_g: part(daily.fat_g),
    }
}
