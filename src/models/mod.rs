//! Core data models for the analytics dashboard.

mod dataset;
mod player;
mod record;

pub use dataset::*;
pub use player::*;
pub use record::*;
