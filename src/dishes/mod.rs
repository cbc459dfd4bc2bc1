mod repo;
mod repo_types;

pub use repo::{DishRepository, MemoryDishRepo, PgDishRepo};
