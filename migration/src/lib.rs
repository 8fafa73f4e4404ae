//! Database migrations for the PANIC channel management API.
//!
//! All schema changes are expressed as SeaORM migrations and applied at
//! startup (or by tests against in-memory SQLite).

pub use sea_orm_migration::prelude::*;

mod m2026_02_16_101500_create_generics;
mod m2026_02_16_101600_create_configs;
mod m2026_02_16_101700_create_config_links;
mod m2026_02_16_101800_create_configs_old;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m2026_02_16_101500_create_generics::Migration),
            Box::new(m2026_02_16_101600_create_configs::Migration),
            Box::new(m2026_02_16_101700_create_config_links::Migration),
            Box::new(m2026_02_16_101800_create_configs_old::Migration),
        ]
    }
}
