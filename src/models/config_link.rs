//! Channel-to-config link entity model
//!
//! Join rows between a channel and the sub-chain configs it alerts for.
//! The composite primary key is what gives the link set its set
//! semantics: re-linking an existing pair conflicts instead of
//! duplicating the row.

use sea_orm::ActiveModelBehavior;
use sea_orm::entity::prelude::*;
use uuid::Uuid;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "config_links")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub channel_id: Uuid,

    #[sea_orm(primary_key, auto_increment = false)]
    pub config_id: Uuid,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::config::Entity",
        from = "Column::ChannelId",
        to = "super::config::Column::Id"
    )]
    Channel,
}

impl ActiveModelBehavior for ActiveModel {}
