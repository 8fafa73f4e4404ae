//! Generic lookup repository
//!
//! Read/seed access to the reference-data rows. Channel type resolution is
//! constrained to the `channel_type` group so a config-type id can never be
//! passed off as a channel type.

use std::sync::Arc;

use anyhow::{Result, anyhow};
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};
use uuid::Uuid;

use crate::models::generic::{self, Entity as Generic, GROUP_CHANNEL_TYPE};

/// Repository for generic lookup rows.
#[derive(Debug, Clone)]
pub struct GenericRepository {
    /// Database connection pool
    pub db: Arc<DatabaseConnection>,
}

impl GenericRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Resolves a `channel_type` lookup row by id.
    pub async fn find_channel_type(&self, id: Uuid) -> Result<Option<generic::Model>> {
        Ok(Generic::find_by_id(id)
            .filter(generic::Column::GroupName.eq(GROUP_CHANNEL_TYPE))
            .one(&*self.db)
            .await?)
    }

    /// Finds a lookup row by its (group, value) pair.
    pub async fn find_by_group_value(
        &self,
        group: &str,
        value: &str,
    ) -> Result<Option<generic::Model>> {
        Ok(Generic::find()
            .filter(generic::Column::GroupName.eq(group))
            .filter(generic::Column::Value.eq(value))
            .one(&*self.db)
            .await?)
    }

    pub async fn insert(&self, row: generic::ActiveModel) -> Result<generic::Model> {
        let id = row
            .id
            .clone()
            .take()
            .ok_or_else(|| anyhow!("lookup row id must be set"))?;

        row.insert(&*self.db).await?;

        let fetched = Generic::find_by_id(id).one(&*self.db).await?;
        fetched.ok_or_else(|| anyhow!("lookup row '{}' not persisted", id))
    }
}
