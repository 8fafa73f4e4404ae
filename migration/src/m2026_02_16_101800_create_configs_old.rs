//! Migration to create the configs_old backup table.
//!
//! Holds the pre-mutation snapshot of a channel, one row per channel id.
//! The table is written by the API before every mutation and never read
//! back; external comparison tooling consumes it directly.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ConfigsOld::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ConfigsOld::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ConfigsOld::Name).text().not_null())
                    .col(ColumnDef::new(ConfigsOld::ConfigType).text().not_null())
                    .col(ColumnDef::new(ConfigsOld::TypeId).uuid().null())
                    .col(ColumnDef::new(ConfigsOld::Details).json_binary().null())
                    .col(ColumnDef::new(ConfigsOld::ConfigIds).json_binary().null())
                    .col(
                        ColumnDef::new(ConfigsOld::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ConfigsOld::ModifiedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ConfigsOld::BackedUpAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ConfigsOld::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum ConfigsOld {
    Table,
    Id,
    Name,
    ConfigType,
    TypeId,
    Details,
    ConfigIds,
    CreatedAt,
    ModifiedAt,
    BackedUpAt,
}
