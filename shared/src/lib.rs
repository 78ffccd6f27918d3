//! Shared types and brewing logic for the Pour-Over Brew Dashboard
//!
//! This crate computes pour-over schedules and manages custom 4:6 presets.
//! It is used natively and by the browser front end (via WASM).

pub mod config;
pub mod editor;
pub mod error;
pub mod models;
pub mod phase;
pub mod recipe;
pub mod storage;
pub mod types;
pub mod validation;

pub use error::{AppError, AppResult};
pub use models::*;
pub use phase::*;
pub use recipe::*;
pub use types::*;
pub use validation::*;
