//! Daily energy budget: Mifflin-St Jeor BMR, activity-scaled TDEE and the
//! weight-goal adjustment.

use super::config::PlannerConfig;
use super::model::{Gender, Profile};

/// Basal metabolic rate in kcal/day. A missing height falls back to
/// `config.default_height_cm`.
pub fn basal_metabolic_rate(profile: &Profile, config: &PlannerConfig) -> f64 {
    let height = profile.height_cm.unwrap_or(config.default_height_cm);
    let base = 10.0 * profile.weight_kg + 6.25 * height - 5.0 * f64::from(profile.age);
    match profile.gender {
        Gender::Male => base + 5.0,
        Gender::Female => base - 161.0,
    }
}

pub fn total_daily_energy(profile: &Profile, config: &PlannerConfig) -> f64 {
    basal_metabolic_rate(profile, config) * config.activity_multiplier(profile.activity)
}

/// Signed kcal correction moving the budget toward the target weight.
pub fn goal_adjustment(profile: &Profile, config: &PlannerConfig) -> f64 {
    let Some(target) = profile.target_weight_kg else {
        return 0.0;
    };
    let diff = target - profile.weight_kg;
    let goal = &config.goal;
    let magnitude = if diff.abs() > goal.large_threshold_kg {
        goal.large_kcal
    } else if diff.abs() > goal.small_threshold_kg {
        goal.small_kcal
    } else {
        0.0
    };
    magnitude.copysign(diff)
}

/// Daily calorie budget: always a multiple of `calorie_step` and never below
/// `calorie_floor`.
pub fn daily_calories(profile: &Profile, config: &PlannerConfig) -> u32 {
    let tdee = total_daily_energy(profile, config) + goal_adjustment(profile, config);
    let step = f64::from(config.calorie_step.max(1));
    let rounded = (tdee / step).round_ties_even() * step;
    if rounded.is_finite() && rounded > f64::from(config.calorie_floor) {
        rounded as u32
    } else {
        config.calorie_floor
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::planner::model::ActivityLevel;

    fn profile() -> Profile {
        Profile {
            age: 30,
            gender: Gender::Male,
            weight_kg: 80.0,
            height_cm: Some(180.0),
            activity: Some(ActivityLevel::Moderate),
            target_weight_kg: None,
        }
    }

    #[test]
    fn reference_male_profile() {
        let cfg = PlannerConfig::default();
        let p = profile();
        assert_eq!(basal_metabolic_rate(&p, &cfg), 1780.0);
        assert!((total_daily_energy(&p, &cfg) - 2759.0).abs() < 1e-6);
        assert_eq!(daily_calories(&p, &cfg), 2750);
    }

    #[test]
    fn losing_weight_subtracts_large_adjustment() {
        let cfg = PlannerConfig::default();
        let p = Profile {
            target_weight_kg: Some(75.0),
            ..profile()
        };
        assert_eq!(goal_adjustment(&p, &cfg), -550.0);
        // 2759 - 550 = 2209 -> 2200
        assert_eq!(daily_calories(&p, &cfg), 2200);
    }

    #[test]
    fn small_and_negligible_goals() {
        let cfg = PlannerConfig::default();
        let gain = Profile {
            target_weight_kg: Some(80.3),
            ..profile()
        };
        assert_eq!(goal_adjustment(&gain, &cfg), 300.0);

        let same = Profile {
            target_weight_kg: Some(80.05),
            ..profile()
        };
        assert_eq!(goal_adjustment(&same, &cfg), 0.0);
    }

    #[test]
    fn female_offset_and_default_height() {
        let cfg = PlannerConfig::default();
        let p = Profile {
            gender: Gender::Female,
            height_cm: None,
            ..profile()
        };
        // 800 + 6.25 * 170 - 150 - 161
        assert_eq!(basal_metabolic_rate(&p, &cfg), 1551.5);
    }

    #[test]
    fn unknown_activity_uses_moderate_multiplier() {
        let cfg = PlannerConfig::default();
        let p = Profile {
            activity: None,
            ..profile()
        };
        assert_eq!(daily_calories(&p, &cfg), 2750);
    }

    #[test]
    fn budget_is_floored_and_stepped() {
        let cfg = PlannerConfig::default();
        let tiny = Profile {
            age: 90,
            gender: Gender::Female,
            weight_kg: 35.0,
            height_cm: Some(140.0),
            activity: Some(ActivityLevel::Sedentary),
            target_weight_kg: Some(30.0),
        };
        assert_eq!(daily_calories(&tiny, &cfg), 1200);

        for age in [18, 35, 60, 85] {
            for weight in [45.0, 62.5, 90.0, 140.0] {
                for activity in [ActivityLevel::Sedentary, ActivityLevel::VeryActive] {
                    let p = Profile {
                        age,
                        weight_kg: weight,
                        activity: Some(activity),
                        ..profile()
                    };
                    let kcal = daily_calories(&p, &cfg);
                    assert_eq!(kcal % 50, 0);
                    assert!(kcal >= 1200);
                }
            }
        }
    }
}
