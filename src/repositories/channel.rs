//! Channel repository for database operations
//!
//! One repository serves every channel kind: all kinds live in the shared
//! configs table discriminated by `config_type`, so kind-specific reads
//! filter on the discriminator while id lookups, duplicate-name checks and
//! bulk link removal operate table-wide.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use anyhow::{Result, anyhow};
use sea_orm::sea_query::Query;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder,
    Set,
};
use uuid::Uuid;

use crate::models::channel::{ChannelKind, ChannelRecord, LinkedConfig};
use crate::models::config::{self, Entity as Config, SUB_CHAIN_CONFIG_TYPE};
use crate::models::config_link::{self, Entity as ConfigLink};
use crate::models::generic::{self, Entity as Generic};

/// Repository for channel rows in the shared configs table.
#[derive(Debug, Clone)]
pub struct ChannelRepository {
    /// Database connection pool
    pub db: Arc<DatabaseConnection>,
}

impl ChannelRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Lists every channel of the given kind, hydrated with its type lookup
    /// row and the projected names of its linked sub-chain configs.
    pub async fn find_all_hydrated(&self, kind: ChannelKind) -> Result<Vec<ChannelRecord>> {
        let models = Config::find()
            .filter(config::Column::ConfigType.eq(kind.as_str()))
            .order_by_asc(config::Column::CreatedAt)
            .order_by_asc(config::Column::Id)
            .all(&*self.db)
            .await?;

        self.hydrate(models).await
    }

    /// Looks a channel up by id alone. Ids are globally unique across the
    /// shared table, so no kind filter is needed; a row whose discriminator
    /// is the reserved sub-chain value matches no channel view and yields
    /// `None`.
    pub async fn find_by_id_hydrated(&self, id: Uuid) -> Result<Option<ChannelRecord>> {
        let Some(model) = Config::find_by_id(id).one(&*self.db).await? else {
            return Ok(None);
        };

        if model.config_type.parse::<ChannelKind>().is_err() {
            return Ok(None);
        }

        let mut hydrated = self.hydrate(vec![model]).await?;
        Ok(hydrated.pop())
    }

    /// Raw by-id fetch with no kind filter, for mutations that operate on
    /// whatever document holds the id.
    pub async fn find_document(&self, id: Uuid) -> Result<Option<config::Model>> {
        Ok(Config::find_by_id(id).one(&*self.db).await?)
    }

    /// True when another row in the shared table, of any kind, already
    /// holds the name. `exclude_id` skips the row being edited.
    pub async fn is_duplicate_name(&self, name: &str, exclude_id: Option<Uuid>) -> Result<bool> {
        let mut query = Config::find().filter(config::Column::Name.eq(name));
        if let Some(id) = exclude_id {
            query = query.filter(config::Column::Id.ne(id));
        }
        Ok(query.one(&*self.db).await?.is_some())
    }

    pub async fn insert(&self, channel: config::ActiveModel) -> Result<config::Model> {
        let id = channel
            .id
            .clone()
            .take()
            .ok_or_else(|| anyhow!("channel id must be set"))?;

        channel.insert(&*self.db).await?;

        // SQLite backends do not return the inserted row; fetch it by the id we set.
        let fetched = Config::find_by_id(id).one(&*self.db).await?;
        fetched.ok_or_else(|| anyhow!("channel '{}' not persisted", id))
    }

    pub async fn update(&self, channel: config::ActiveModel) -> Result<config::Model> {
        Ok(channel.update(&*self.db).await?)
    }

    /// Deletes by id, returning the number of rows removed.
    pub async fn delete_by_id(&self, id: Uuid) -> Result<u64> {
        let result = Config::delete_by_id(id).exec(&*self.db).await?;
        Ok(result.rows_affected)
    }

    /// Adds `config_id` to the channel's linked set. Returns `false` when
    /// zero rows matched: the channel does not exist, or its discriminator
    /// is the reserved sub-chain value. Linking an already-linked config is
    /// a successful no-op.
    pub async fn link_config(&self, channel_id: Uuid, config_id: Uuid) -> Result<bool> {
        if self.find_linkable_channel(channel_id).await?.is_none() {
            return Ok(false);
        }

        let link = config_link::ActiveModel {
            channel_id: Set(channel_id),
            config_id: Set(config_id),
        };

        match ConfigLink::insert(link)
            .on_conflict(
                sea_orm::sea_query::OnConflict::columns([
                    config_link::Column::ChannelId,
                    config_link::Column::ConfigId,
                ])
                .do_nothing()
                .to_owned(),
            )
            .exec(&*self.db)
            .await
        {
            Ok(_) | Err(DbErr::RecordNotInserted) => Ok(true),
            Err(err) => Err(err.into()),
        }
    }

    /// Removes `config_id` from the channel's linked set under the same
    /// sub-chain guard. Removing a non-member still counts as matched.
    pub async fn unlink_config(&self, channel_id: Uuid, config_id: Uuid) -> Result<bool> {
        if self.find_linkable_channel(channel_id).await?.is_none() {
            return Ok(false);
        }

        ConfigLink::delete_many()
            .filter(config_link::Column::ChannelId.eq(channel_id))
            .filter(config_link::Column::ConfigId.eq(config_id))
            .exec(&*self.db)
            .await?;

        Ok(true)
    }

    /// Removes `config_id` from the linked set of every channel, leaving
    /// links owned by sub-chain rows untouched. Returns the number of links
    /// removed.
    pub async fn unlink_config_from_all(&self, config_id: Uuid) -> Result<u64> {
        let channels = Query::select()
            .column(config::Column::Id)
            .from(Config)
            .and_where(config::Column::ConfigType.ne(SUB_CHAIN_CONFIG_TYPE))
            .to_owned();

        let result = ConfigLink::delete_many()
            .filter(config_link::Column::ConfigId.eq(config_id))
            .filter(config_link::Column::ChannelId.in_subquery(channels))
            .exec(&*self.db)
            .await?;

        Ok(result.rows_affected)
    }

    /// The ids currently linked to a channel, in insertion-independent
    /// (config id) order.
    pub async fn linked_config_ids(&self, channel_id: Uuid) -> Result<Vec<Uuid>> {
        let mut ids: Vec<Uuid> = ConfigLink::find()
            .filter(config_link::Column::ChannelId.eq(channel_id))
            .all(&*self.db)
            .await?
            .into_iter()
            .map(|link| link.config_id)
            .collect();
        ids.sort();
        Ok(ids)
    }

    async fn find_linkable_channel(&self, id: Uuid) -> Result<Option<config::Model>> {
        Ok(Config::find_by_id(id)
            .filter(config::Column::ConfigType.ne(SUB_CHAIN_CONFIG_TYPE))
            .one(&*self.db)
            .await?)
    }

    /// Resolves type lookup rows and linked config projections for a batch
    /// of channel rows with one query per satellite table.
    async fn hydrate(&self, models: Vec<config::Model>) -> Result<Vec<ChannelRecord>> {
        if models.is_empty() {
            return Ok(Vec::new());
        }

        let type_ids: HashSet<Uuid> = models.iter().filter_map(|model| model.type_id).collect();
        let type_rows: HashMap<Uuid, generic::Model> = if type_ids.is_empty() {
            HashMap::new()
        } else {
            Generic::find()
                .filter(generic::Column::Id.is_in(type_ids))
                .all(&*self.db)
                .await?
                .into_iter()
                .map(|row| (row.id, row))
                .collect()
        };

        let channel_ids: Vec<Uuid> = models.iter().map(|model| model.id).collect();
        let links = ConfigLink::find()
            .filter(config_link::Column::ChannelId.is_in(channel_ids))
            .all(&*self.db)
            .await?;

        let linked_ids: HashSet<Uuid> = links.iter().map(|link| link.config_id).collect();
        let config_names: HashMap<Uuid, String> = if linked_ids.is_empty() {
            HashMap::new()
        } else {
            Config::find()
                .filter(config::Column::Id.is_in(linked_ids))
                .filter(config::Column::ConfigType.eq(SUB_CHAIN_CONFIG_TYPE))
                .all(&*self.db)
                .await?
                .into_iter()
                .map(|row| (row.id, row.name))
                .collect()
        };

        let mut links_by_channel: HashMap<Uuid, Vec<LinkedConfig>> = HashMap::new();
        for link in links {
            if let Some(name) = config_names.get(&link.config_id) {
                links_by_channel
                    .entry(link.channel_id)
                    .or_default()
                    .push(LinkedConfig {
                        id: link.config_id,
                        name: name.clone(),
                    });
            }
        }

        Ok(models
            .into_iter()
            .map(|model| {
                let channel_type = model.type_id.and_then(|id| type_rows.get(&id).cloned());
                let mut configs = links_by_channel.remove(&model.id).unwrap_or_default();
                configs.sort_by(|a, b| a.id.cmp(&b.id));
                ChannelRecord {
                    model,
                    channel_type,
                    configs,
                }
            })
            .collect())
    }
}
