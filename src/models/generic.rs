//! Generic lookup entity model
//!
//! Reference-data rows identified by group + value. The `channel_type`
//! group enumerates the supported alert channel kinds; the `config_type`
//! group enumerates the monitored-configuration kinds.

use sea_orm::ActiveModelBehavior;
use sea_orm::entity::prelude::*;
use sea_orm::prelude::DateTimeWithTimeZone;
use uuid::Uuid;

/// Group name for rows describing alert channel kinds.
pub const GROUP_CHANNEL_TYPE: &str = "channel_type";

/// Group name for rows describing monitored-configuration kinds.
pub const GROUP_CONFIG_TYPE: &str = "config_type";

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "generics")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    /// Lookup group, e.g. `channel_type`
    pub group_name: String,

    /// Lookup value within the group, e.g. `telegram`
    pub value: String,

    pub description: Option<String>,

    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
