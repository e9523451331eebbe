//! Repository layer for data access operations.

mod flat_repo;
pub mod seed;

pub use flat_repo::{FlatRepository, InMemoryFlatRepository};
pub use seed::seed_demo_flats;
