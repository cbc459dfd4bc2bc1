use super::model::{DietaryConstraints, Dish};

/// Expands implied flags: raw vegan is vegan, vegan is vegetarian and
/// lactose free.
pub fn normalize(mut constraints: DietaryConstraints) -> DietaryConstraints {
    if constraints.raw_vegan {
        constraints.vegan = true;
    }
    if constraints.vegan {
        constraints.vegetarian = true;
        constraints.lactose_free = true;
    }
    constraints
}

impl DietaryConstraints {
    /// Dietary and allergen predicate. Vegan and vegetarian are exclusive
    /// here: only the stricter of the two is checked.
    pub fn admits(&self, dish: &Dish) -> bool {
        let diet = &dish.diet;
        let base = if self.vegan {
            diet.vegan
        } else if self.vegetarian {
            diet.vegetarian
        } else {
            true
        };

        base && (!self.raw_vegan || diet.raw_vegan)
            && (!self.gluten_free || diet.gluten_free)
            && (!self.lactose_free || diet.lactose_free)
            && dish.allergens.is_disjoint(&self.excluded_allergens)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use uuid::Uuid;

    use super::*;
    use crate::planner::model::{AllergenId, DietFlags, MealSlot, Nutrients, TenantScope};

    fn dish(diet: DietFlags, allergens: &[i64]) -> Dish {
        Dish {
            id: Uuid::new_v4(),
            name: "dish".into(),
            slot: MealSlot::Lunch,
            per_100g: Nutrients::default(),
            diet,
            allergens: allergens.iter().copied().map(AllergenId).collect(),
            active: true,
            scope: TenantScope::Global,
        }
    }

    #[test]
    fn raw_vegan_implies_everything_plant_based() {
        let c = normalize(DietaryConstraints {
            raw_vegan: true,
            ..Default::default()
        });
        assert!(c.raw_vegan && c.vegan && c.vegetarian && c.lactose_free);
        assert!(!c.gluten_free);
        assert_eq!(normalize(c.clone()), c);
    }

    #[test]
    fn vegan_is_checked_instead_of_vegetarian() {
        let c = normalize(DietaryConstraints {
            vegan: true,
            ..Default::default()
        });
        // Tagged vegan and lactose free but not vegetarian: only the vegan flag is consulted.
        let odd = dish(
            DietFlags {
                vegan: true,
                lactose_free: true,
                ..Default::default()
            },
            &[],
        );
        assert!(c.admits(&odd));

        let veggie = dish(
            DietFlags {
                vegetarian: true,
                lactose_free: true,
                ..Default::default()
            },
            &[],
        );
        assert!(!c.admits(&veggie));
    }

    #[test]
    fn excluded_allergens_reject_dish() {
        let c = DietaryConstraints {
            excluded_allergens: BTreeSet::from([AllergenId(3)]),
            ..Default::default()
        };
        assert!(!c.admits(&dish(DietFlags::default(), &[1, 3])));
        assert!(c.admits(&dish(DietFlags::default(), &[1, 2])));
    }

    #[test]
    fn raw_gluten_and_lactose_flags_are_each_required() {
        let plant = DietFlags {
            vegan: true,
            vegetarian: true,
            lactose_free: true,
            ..Default::default()
        };
        let raw = DietFlags {
            raw_vegan: true,
            ..plant
        };

        let raw_vegan = normalize(DietaryConstraints {
            raw_vegan: true,
            ..Default::default()
        });
        assert!(raw_vegan.admits(&dish(raw, &[])));
        assert!(!raw_vegan.admits(&dish(plant, &[])));

        let gluten_free = DietaryConstraints {
            gluten_free: true,
            ..Default::default()
        };
        assert!(gluten_free.admits(&dish(DietFlags { gluten_free: true, ..Default::default() }, &[])));
        assert!(!gluten_free.admits(&dish(DietFlags::default(), &[])));

        let lactose_free = DietaryConstraints {
            lactose_free: true,
            ..Default::default()
        };
        assert!(lactose_free.admits(&dish(DietFlags { lactose_free: true, ..Default::default() }, &[])));
        assert!(!lactose_free.admits(&dish(DietFlags::default(), &[])));
    }

    #[test]
    fn flags_combine_with_and() {
        let c = DietaryConstraints {
            vegetarian: true,
            gluten_free: true,
            lactose_free: true,
            ..Default::default()
        };
        let all = DietFlags {
            vegetarian: true,
            gluten_free: true,
            lactose_free: true,
            ..Default::default()
        };
        assert!(c.admits(&dish(all, &[])));
        assert!(!c.admits(&dish(DietFlags { gluten_free: false, ..all }, &[])));
        assert!(!c.admits(&dish(DietFlags { lactose_free: false, ..all }, &[])));
        assert!(!c.admits(&dish(DietFlags { vegetarian: false, ..all }, &[])));
    }

    #[test]
    fn no_constraints_admit_anything() {
        assert!(DietaryConstraints::default().admits(&dish(DietFlags::default(), &[7])));
    }
}
