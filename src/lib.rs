//! # Cup Analytics
//!
//! A read-only dashboard over pre-computed tournament statistics.
//!
//! ## Architecture
//!
//! - **models**: Records, datasets and player stat extraction
//! - **storage**: Data directory layout and JSON file reading
//! - **registry**: Named datasets shared across readers
//! - **calculate**: Impact Rating derivation and ranking
//! - **view**: Sorting and column projection over datasets
//! - **aggregate**: Column sums for distribution charts
//! - **dashboard**: Tab assembly
//! - **api**: REST API endpoints
//! - **config**: Configuration loading and validation

pub mod aggregate;
pub mod api;
pub mod calculate;
pub mod config;
pub mod dashboard;
pub mod models;
pub mod registry;
pub mod storage;
pub mod view;

pub use models::*;
pub use registry::DatasetRegistry;
