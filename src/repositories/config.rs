//! Monitored config repository
//!
//! Thin collaborator over the sub-chain rows of the shared configs table.
//! The link endpoints only need existence probes; full config management
//! lives outside this service.

use std::sync::Arc;

use anyhow::Result;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};
use uuid::Uuid;

use crate::models::config::{self, Entity as Config, SUB_CHAIN_CONFIG_TYPE};

/// Repository for monitored sub-chain configuration rows.
#[derive(Debug, Clone)]
pub struct ConfigRepository {
    /// Database connection pool
    pub db: Arc<DatabaseConnection>,
}

impl ConfigRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// True when a sub-chain config row with the id exists.
    pub async fn exists(&self, id: Uuid) -> Result<bool> {
        Ok(self.find_by_id(id).await?.is_some())
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<config::Model>> {
        Ok(Config::find_by_id(id)
            .filter(config::Column::ConfigType.eq(SUB_CHAIN_CONFIG_TYPE))
            .one(&*self.db)
            .await?)
    }
}
