//! Backup repository for the configs_old table
//!
//! Snapshots a channel's current state, including its linked config set,
//! into the parallel backup table. One backup row exists per channel id:
//! each snapshot deletes the previous one before inserting the fresh copy.

use std::sync::Arc;

use anyhow::Result;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};
use serde_json::json;
use uuid::Uuid;

use crate::models::config;
use crate::models::config_link::{self, Entity as ConfigLink};
use crate::models::config_old::{self, Entity as ConfigOld};

/// Repository for channel backup snapshots.
#[derive(Debug, Clone)]
pub struct ChannelBackupRepository {
    /// Database connection pool
    pub db: Arc<DatabaseConnection>,
}

impl ChannelBackupRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Replaces the backup row for the given channel with a copy of its
    /// current state. The linked config set is captured alongside the row
    /// so the snapshot is self-contained.
    pub async fn replace_backup(&self, current: &config::Model) -> Result<()> {
        let mut config_ids: Vec<Uuid> = ConfigLink::find()
            .filter(config_link::Column::ChannelId.eq(current.id))
            .all(&*self.db)
            .await?
            .into_iter()
            .map(|link| link.config_id)
            .collect();
        config_ids.sort();

        ConfigOld::delete_by_id(current.id).exec(&*self.db).await?;

        let snapshot = config_old::ActiveModel {
            id: Set(current.id),
            name: Set(current.name.clone()),
            config_type: Set(current.config_type.clone()),
            type_id: Set(current.type_id),
            details: Set(current.details.clone()),
            config_ids: Set(Some(json!(config_ids))),
            created_at: Set(current.created_at),
            modified_at: Set(current.modified_at),
            backed_up_at: Set(Utc::now().into()),
        };
        snapshot.insert(&*self.db).await?;

        Ok(())
    }

    /// Fetches the backup row for a channel id. The API itself never reads
    /// backups; this exists for the external comparison tooling and tests.
    pub async fn find_backup(&self, id: Uuid) -> Result<Option<config_old::Model>> {
        Ok(ConfigOld::find_by_id(id).one(&*self.db).await?)
    }
}
