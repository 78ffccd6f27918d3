//! Domain models for the Pour-Over Brew Dashboard

mod brew;
mod preset;

pub use brew::*;
pub use preset::*;
