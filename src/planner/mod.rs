//! Meal-plan generation engine.
//!
//! Pure and synchronous: the only inputs from the outside world are the
//! catalog snapshot, the tenant-local clock and the random source, all
//! passed in by the caller.

mod assembler;
pub mod catalog;
pub mod config;
pub mod constraints;
pub mod energy;
pub mod error;
pub mod macros;
pub mod model;
pub mod portions;
pub mod schedule;

use rand::Rng;
use time::OffsetDateTime;
use tracing::{info, instrument};

pub use catalog::{DishCatalog, InMemoryCatalog, LegacyCatalog};
pub use config::PlannerConfig;
pub use error::{CatalogError, PlanError};
pub use model::*;

use assembler::WeekInputs;

/// Everything the caller decides about a plan.
#[derive(Debug, Clone, PartialEq)]
pub struct PlanRequest {
    pub profile: Profile,
    pub macro_ratio: MacroRatio,
    pub constraints: DietaryConstraints,
}

#[derive(Debug, Clone, Default)]
pub struct MealPlanner {
    config: PlannerConfig,
}

impl MealPlanner {
    pub fn new(config: PlannerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    /// Builds a full week for `request` from `catalog`.
    ///
    /// `now` carries the restaurant's UTC offset; its local time decides which
    /// meals of the first day already passed. Identical inputs and an
    /// identically seeded `rng` produce identical plans.
    ///
    /// # Errors
    ///
    /// [`PlanError::Configuration`] when `tenant` is missing.
    #[instrument(skip_all, fields(tenant = ?tenant.map(|t| t.slug.as_str())))]
    pub fn generate<C, R>(
        &self,
        request: &PlanRequest,
        tenant: Option<&Tenant>,
        catalog: &C,
        now: OffsetDateTime,
        rng: &mut R,
    ) -> Result<GeneratedPlan, PlanError>
    where
        C: DishCatalog + ?Sized,
        R: Rng + ?Sized,
    {
        let tenant = tenant.ok_or_else(PlanError::missing_tenant)?;
        let profile = &request.profile;

        let daily_calories = energy::daily_calories(profile, &self.config);
        let bmi = macros::body_mass_index(profile.weight_kg, profile.height_cm);
        let targets = macros::allocate(daily_calories, &request.macro_ratio, &self.config);
        let constraints = constraints::normalize(request.constraints.clone());
        let pointer = schedule::meal_pointer(now.time(), &self.config);

        let inputs = WeekInputs {
            tenant: tenant.id,
            constraints: &constraints,
            daily_calories,
            targets: &targets,
            today: now.date(),
            pointer: &pointer,
        };
        let days = assembler::assemble_week(&inputs, catalog, &self.config, rng);

        info!(
            daily_calories,
            start = %pointer.start,
            day_offset = pointer.day_offset,
            "meal plan generated"
        );

        Ok(GeneratedPlan {
            daily_calories,
            bmi,
            targets,
            days,
            constraints,
            tenant_id: tenant.id,
            tenant_name: tenant.name.clone(),
            generated_at: now,
        })
    }
}
