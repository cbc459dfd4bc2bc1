pub mod allergens;
pub mod app;
pub mod config;
pub mod db;
pub mod dishes;
pub mod planner;
pub mod plans;
pub mod ratios;
pub mod state;
pub mod tenants;
