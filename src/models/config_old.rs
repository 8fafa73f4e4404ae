//! Backup entity model for the configs_old table
//!
//! One row per channel id, replaced on every mutation of the live row.
//! Write-only from the API's point of view: external comparison tooling
//! is the only reader.

use sea_orm::ActiveModelBehavior;
use sea_orm::entity::prelude::*;
use sea_orm::prelude::DateTimeWithTimeZone;
use serde_json::Value as JsonValue;
use uuid::Uuid;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "configs_old")]
pub struct Model {
    /// Same id as the live configs row this snapshot was taken from
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    pub name: String,

    pub config_type: String,

    pub type_id: Option<Uuid>,

    #[sea_orm(column_type = "JsonBinary")]
    pub details: Option<JsonValue>,

    /// Linked config ids captured at snapshot time
    #[sea_orm(column_type = "JsonBinary")]
    pub config_ids: Option<JsonValue>,

    pub created_at: DateTimeWithTimeZone,

    pub modified_at: DateTimeWithTimeZone,

    pub backed_up_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
