//! Tests for lookup-row seeding: every channel and config type row is
//! created once, and re-running the seeder changes nothing.

#[path = "test_utils/mod.rs"]
mod test_utils;

use anyhow::Result;
use sea_orm::EntityTrait;

use panic_api::models::Generic;
use panic_api::models::channel::ChannelKind;
use panic_api::models::config::SUB_CHAIN_CONFIG_TYPE;
use panic_api::models::generic::{GROUP_CHANNEL_TYPE, GROUP_CONFIG_TYPE};
use panic_api::repositories::GenericRepository;
use panic_api::seeds::seed_lookup_rows;
use std::sync::Arc;
use test_utils::setup_test_db;

#[tokio::test]
async fn seeding_creates_all_lookup_rows() -> Result<()> {
    let db = setup_test_db().await?;
    seed_lookup_rows(&db).await?;

    let repo = GenericRepository::new(Arc::new(db.clone()));

    for kind in ChannelKind::ALL {
        let row = repo
            .find_by_group_value(GROUP_CHANNEL_TYPE, kind.as_str())
            .await?;
        assert!(row.is_some(), "missing channel_type row for {kind}");
    }

    for value in ["chain", SUB_CHAIN_CONFIG_TYPE] {
        let row = repo.find_by_group_value(GROUP_CONFIG_TYPE, value).await?;
        assert!(row.is_some(), "missing config_type row for {value}");
    }

    Ok(())
}

#[tokio::test]
async fn seeding_is_idempotent() -> Result<()> {
    let db = setup_test_db().await?;

    seed_lookup_rows(&db).await?;
    let first = Generic::find().all(&db).await?.len();

    seed_lookup_rows(&db).await?;
    let second = Generic::find().all(&db).await?.len();

    assert_eq!(first, second);
    assert_eq!(first, ChannelKind::ALL.len() + 2);
    Ok(())
}

#[tokio::test]
async fn channel_type_resolution_is_group_scoped() -> Result<()> {
    let db = setup_test_db().await?;
    seed_lookup_rows(&db).await?;

    let repo = GenericRepository::new(Arc::new(db.clone()));

    // A config_type row never resolves as a channel type.
    let sub_chain = repo
        .find_by_group_value(GROUP_CONFIG_TYPE, SUB_CHAIN_CONFIG_TYPE)
        .await?
        .expect("seeded");
    assert!(repo.find_channel_type(sub_chain.id).await?.is_none());

    let telegram = repo
        .find_by_group_value(GROUP_CHANNEL_TYPE, "telegram")
        .await?
        .expect("seeded");
    assert!(repo.find_channel_type(telegram.id).await?.is_some());
    Ok(())
}
