//! Migration to create the shared configs table.
//!
//! All six alert channel kinds and the monitored sub-chain configurations
//! live in this one table, discriminated by the `config_type` column. Ids
//! are therefore globally unique across every kind, which is what makes
//! id-only lookups and the table-wide duplicate-name check sound.

use sea_orm_migration::prelude::*;

use super::m2026_02_16_101500_create_generics::Generics;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Configs::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Configs::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Configs::Name).text().not_null())
                    .col(ColumnDef::new(Configs::ConfigType).text().not_null())
                    .col(ColumnDef::new(Configs::TypeId).uuid().null())
                    .col(ColumnDef::new(Configs::Details).json_binary().null())
                    .col(
                        ColumnDef::new(Configs::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Configs::ModifiedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_configs_type_id")
                            .from(Configs::Table, Configs::TypeId)
                            .to(Generics::Table, Generics::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_configs_name")
                    .table(Configs::Table)
                    .col(Configs::Name)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_configs_config_type")
                    .table(Configs::Table)
                    .col(Configs::ConfigType)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_configs_name").to_owned())
            .await?;

        manager
            .drop_index(Index::drop().name("idx_configs_config_type").to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Configs::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Configs {
    Table,
    Id,
    Name,
    ConfigType,
    TypeId,
    Details,
    CreatedAt,
    ModifiedAt,
}
