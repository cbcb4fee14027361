pub mod app;
pub mod auth;
pub mod config;
pub mod dates;
pub mod days;
pub mod error;
pub mod foods;
pub mod meals;
pub mod portions;
pub mod preferences;
pub mod state;
mod validation;
