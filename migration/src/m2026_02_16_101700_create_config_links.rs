//! Migration to create the config_links table.
//!
//! Each row links one channel to one monitored sub-chain config. The
//! composite primary key gives the link set its set semantics: inserting an
//! existing pair conflicts instead of duplicating it.

use sea_orm_migration::prelude::*;

use super::m2026_02_16_101600_create_configs::Configs;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ConfigLinks::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(ConfigLinks::ChannelId).uuid().not_null())
                    .col(ColumnDef::new(ConfigLinks::ConfigId).uuid().not_null())
                    .primary_key(
                        Index::create()
                            .col(ConfigLinks::ChannelId)
                            .col(ConfigLinks::ConfigId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_config_links_channel_id")
                            .from(ConfigLinks::Table, ConfigLinks::ChannelId)
                            .to(Configs::Table, Configs::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_config_links_config_id")
                    .table(ConfigLinks::Table)
                    .col(ConfigLinks::ConfigId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_config_links_config_id").to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(ConfigLinks::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum ConfigLinks {
    Table,
    ChannelId,
    ConfigId,
}
