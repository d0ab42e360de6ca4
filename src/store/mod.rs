//! Entity store

pub mod models;
pub mod repositories;
pub mod seed;
pub mod state;

pub use state::{Store, StoreState};
