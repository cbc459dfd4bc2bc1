use std::collections::BTreeMap;

use rand::Rng;
use time::Date;
use tracing::debug;

use super::catalog::{candidates, DishCatalog};
use super::config::PlannerConfig;
use super::model::{DayPlan, DietaryConstraints, MacroTargets, MealSlot, PortionedDish, TenantId};
use super::portions;
use super::schedule::{self, MealPointer};

/// Inputs shared by every meal of one plan.
pub(crate) struct WeekInputs<'a> {
    pub tenant: TenantId,
    pub constraints: &'a DietaryConstraints,
    pub daily_calories: u32,
    pub targets: &'a MacroTargets,
    pub today: Date,
    pub pointer: &'a MealPointer,
}

pub(crate) fn assemble_week<C, R>(
    inputs: &WeekInputs<'_>,
    catalog: &C,
    config: &PlannerConfig,
    rng: &mut R,
) -> Vec<DayPlan>
where
    C: DishCatalog + ?Sized,
    R: Rng + ?Sized,
{
    let calendar = schedule::week(inputs.today, inputs.pointer, config);
    let mut days = Vec::with_capacity(calendar.len());
    for (index, day) in calendar.into_iter().enumerate() {
        let mut meals = BTreeMap::new();
        for slot in MealSlot::ALL {
            meals.insert(slot, assemble_meal(index, slot, inputs, catalog, config, rng));
        }
        days.push(DayPlan {
            label: day.label,
            date: day.date,
            meals,
        });
    }
    days
}

fn assemble_meal<C, R>(
    day: usize,
    slot: MealSlot,
    inputs: &WeekInputs<'_>,
    catalog: &C,
    config: &PlannerConfig,
    rng: &mut R,
) -> Vec<PortionedDish>
where
    C: DishCatalog + ?Sized,
    R: Rng + ?Sized,
{
    if schedule::is_elapsed(day, slot, inputs.pointer) {
        return vec![schedule::past_placeholder(slot, config)];
    }

    let target = schedule::meal_target(slot, inputs.daily_calories, inputs.targets, config);
    let pool = candidates(
        catalog,
        slot,
        inputs.tenant,
        inputs.constraints,
        config.candidate_limit,
        rng,
    );
    let dishes = portions::select(&pool, target.calories, config, rng);
    debug!(
        day,
        %slot,
        target_kcal = target.calories,
        candidates = pool.len(),
        picked = dishes.len(),
        "meal assembled"
    );
    dishes
}
