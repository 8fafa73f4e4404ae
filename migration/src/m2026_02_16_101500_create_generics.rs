//! Migration to create the generics lookup table.
//!
//! Generic rows are reference data identified by group + value, e.g. the
//! `channel_type` group holds one row per supported alert channel kind.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Generics::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Generics::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Generics::GroupName).text().not_null())
                    .col(ColumnDef::new(Generics::Value).text().not_null())
                    .col(ColumnDef::new(Generics::Description).text().null())
                    .col(
                        ColumnDef::new(Generics::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_generics_group_value")
                    .table(Generics::Table)
                    .col(Generics::GroupName)
                    .col(Generics::Value)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_generics_group_value").to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Generics::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Generics {
    Table,
    Id,
    GroupName,
    Value,
    Description,
    CreatedAt,
}
