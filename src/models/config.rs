//! Shared configs entity model
//!
//! One physical table backs every alert channel kind and the monitored
//! sub-chain configurations, discriminated by `config_type`. Ids are
//! globally unique across all kinds, so a lookup by id alone is
//! unambiguous and the duplicate-name check spans the whole table.

use super::generic::Entity as Generic;
use sea_orm::ActiveModelBehavior;
use sea_orm::entity::prelude::*;
use sea_orm::prelude::DateTimeWithTimeZone;
use serde_json::Value as JsonValue;
use uuid::Uuid;

/// Reserved discriminator value for monitored sub-chain configuration rows.
/// Rows carrying it share the table with channels but are never channels;
/// link mutations against them must match zero rows.
pub const SUB_CHAIN_CONFIG_TYPE: &str = "sub_chain";

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "configs")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    /// Unique across the whole table, regardless of kind
    pub name: String,

    /// Discriminator: one of the six channel kinds or `sub_chain`
    pub config_type: String,

    /// Reference to the `channel_type` lookup row (null for sub-chain rows)
    pub type_id: Option<Uuid>,

    /// Kind-specific payload (credentials, severity flags, ...)
    #[sea_orm(column_type = "JsonBinary")]
    pub details: Option<JsonValue>,

    pub created_at: DateTimeWithTimeZone,

    pub modified_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "Generic",
        from = "Column::TypeId",
        to = "super::generic::Column::Id"
    )]
    ChannelType,
}

impl Related<Generic> for Entity {
    fn to() -> RelationDef {
        Relation::ChannelType.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
