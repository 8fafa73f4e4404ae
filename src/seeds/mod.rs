//! Database seeding functionality
//!
//! Populates the generics table with the lookup rows the API resolves
//! channel and config types against.

pub mod lookup;

pub use lookup::seed_lookup_rows;
