//! Repository-level tests for channel operations over the shared table:
//! the sub-chain link guard, link set semantics, the table-wide duplicate
//! name check and backup replacement.

#[path = "test_utils/mod.rs"]
mod test_utils;

use anyhow::Result;
use serde_json::json;
use std::sync::Arc;
use uuid::Uuid;

use panic_api::models::channel::ChannelKind;
use panic_api::repositories::{ChannelBackupRepository, ChannelRepository};
use test_utils::{
    insert_channel, insert_channel_type, insert_link, insert_sub_chain_config, setup_test_db,
};

#[tokio::test]
async fn linking_twice_keeps_a_single_entry() -> Result<()> {
    let db = setup_test_db().await?;
    let repo = ChannelRepository::new(Arc::new(db.clone()));

    let channel_id = insert_channel(
        &db,
        "telegram",
        "ops-telegram",
        None,
        json!({"botToken": "abc", "chatId": "1"}),
    )
    .await?;
    let config_id = insert_sub_chain_config(&db, "cosmos-mainnet").await?;

    assert!(repo.link_config(channel_id, config_id).await?);
    assert!(repo.link_config(channel_id, config_id).await?);

    assert_eq!(repo.linked_config_ids(channel_id).await?, vec![config_id]);
    Ok(())
}

#[tokio::test]
async fn linking_against_a_sub_chain_row_matches_zero_rows() -> Result<()> {
    let db = setup_test_db().await?;
    let repo = ChannelRepository::new(Arc::new(db.clone()));

    let not_a_channel = insert_sub_chain_config(&db, "cosmos-mainnet").await?;
    let config_id = insert_sub_chain_config(&db, "cosmos-testnet").await?;

    assert!(!repo.link_config(not_a_channel, config_id).await?);
    assert!(!repo.unlink_config(not_a_channel, config_id).await?);
    assert!(repo.linked_config_ids(not_a_channel).await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn linking_a_missing_channel_matches_zero_rows() -> Result<()> {
    let db = setup_test_db().await?;
    let repo = ChannelRepository::new(Arc::new(db.clone()));

    let config_id = insert_sub_chain_config(&db, "cosmos-mainnet").await?;
    assert!(!repo.link_config(Uuid::new_v4(), config_id).await?);
    Ok(())
}

#[tokio::test]
async fn unlinking_a_non_member_is_a_successful_no_op() -> Result<()> {
    let db = setup_test_db().await?;
    let repo = ChannelRepository::new(Arc::new(db.clone()));

    let channel_id = insert_channel(
        &db,
        "slack",
        "ops-slack",
        None,
        json!({"appToken": "xapp", "botToken": "xoxb", "botChannelId": "C01"}),
    )
    .await?;
    let config_id = insert_sub_chain_config(&db, "cosmos-mainnet").await?;

    assert!(repo.unlink_config(channel_id, config_id).await?);
    Ok(())
}

#[tokio::test]
async fn bulk_unlink_spares_sub_chain_owned_links() -> Result<()> {
    let db = setup_test_db().await?;
    let repo = ChannelRepository::new(Arc::new(db.clone()));

    let email = insert_channel(
        &db,
        "email",
        "ops-email",
        None,
        json!({"smtp": "smtp.example.com", "emailFrom": "a@b.c", "emailsTo": ["x@y.z"]}),
    )
    .await?;
    let telegram = insert_channel(
        &db,
        "telegram",
        "ops-telegram",
        None,
        json!({"botToken": "abc", "chatId": "1"}),
    )
    .await?;
    let sub_chain_owner = insert_sub_chain_config(&db, "cosmos-mainnet").await?;
    let config_id = insert_sub_chain_config(&db, "cosmos-testnet").await?;

    assert!(repo.link_config(email, config_id).await?);
    assert!(repo.link_config(telegram, config_id).await?);
    // A link held by a sub-chain row, inserted around the guard.
    insert_link(&db, sub_chain_owner, config_id).await?;

    let removed = repo.unlink_config_from_all(config_id).await?;
    assert_eq!(removed, 2);

    assert!(repo.linked_config_ids(email).await?.is_empty());
    assert!(repo.linked_config_ids(telegram).await?.is_empty());
    assert_eq!(
        repo.linked_config_ids(sub_chain_owner).await?,
        vec![config_id]
    );
    Ok(())
}

#[tokio::test]
async fn duplicate_name_check_spans_every_kind() -> Result<()> {
    let db = setup_test_db().await?;
    let repo = ChannelRepository::new(Arc::new(db.clone()));

    let email = insert_channel(
        &db,
        "email",
        "shared-name",
        None,
        json!({"smtp": "smtp.example.com", "emailFrom": "a@b.c", "emailsTo": ["x@y.z"]}),
    )
    .await?;

    assert!(repo.is_duplicate_name("shared-name", None).await?);
    assert!(repo.is_duplicate_name("shared-name", Some(Uuid::new_v4())).await?);
    // The row being edited does not collide with itself.
    assert!(!repo.is_duplicate_name("shared-name", Some(email)).await?);
    assert!(!repo.is_duplicate_name("other-name", None).await?);
    Ok(())
}

#[tokio::test]
async fn id_lookup_ignores_sub_chain_rows() -> Result<()> {
    let db = setup_test_db().await?;
    let repo = ChannelRepository::new(Arc::new(db.clone()));

    let sub_chain = insert_sub_chain_config(&db, "cosmos-mainnet").await?;
    assert!(repo.find_by_id_hydrated(sub_chain).await?.is_none());

    // The raw document fetch still sees it.
    assert!(repo.find_document(sub_chain).await?.is_some());
    Ok(())
}

#[tokio::test]
async fn id_lookup_hydrates_type_row_and_linked_configs() -> Result<()> {
    let db = setup_test_db().await?;
    let repo = ChannelRepository::new(Arc::new(db.clone()));

    let type_id = insert_channel_type(&db, "telegram").await?;
    let channel_id = insert_channel(
        &db,
        "telegram",
        "ops-telegram",
        Some(type_id),
        json!({"botToken": "abc", "chatId": "1"}),
    )
    .await?;
    let config_id = insert_sub_chain_config(&db, "cosmos-mainnet").await?;
    assert!(repo.link_config(channel_id, config_id).await?);

    let record = repo
        .find_by_id_hydrated(channel_id)
        .await?
        .expect("channel should resolve");

    assert_eq!(record.model.name, "ops-telegram");
    let type_row = record.channel_type.expect("type row should hydrate");
    assert_eq!(type_row.value, "telegram");
    assert_eq!(record.configs.len(), 1);
    assert_eq!(record.configs[0].id, config_id);
    assert_eq!(record.configs[0].name, "cosmos-mainnet");
    Ok(())
}

#[tokio::test]
async fn listing_by_kind_only_returns_that_kind() -> Result<()> {
    let db = setup_test_db().await?;
    let repo = ChannelRepository::new(Arc::new(db.clone()));

    insert_channel(
        &db,
        "telegram",
        "t1",
        None,
        json!({"botToken": "abc", "chatId": "1"}),
    )
    .await?;
    insert_channel(
        &db,
        "email",
        "e1",
        None,
        json!({"smtp": "smtp.example.com", "emailFrom": "a@b.c", "emailsTo": ["x@y.z"]}),
    )
    .await?;
    insert_sub_chain_config(&db, "cosmos-mainnet").await?;

    let telegrams = repo.find_all_hydrated(ChannelKind::Telegram).await?;
    assert_eq!(telegrams.len(), 1);
    assert_eq!(telegrams[0].model.name, "t1");

    let twilios = repo.find_all_hydrated(ChannelKind::Twilio).await?;
    assert!(twilios.is_empty());
    Ok(())
}

#[tokio::test]
async fn backup_replacement_keeps_one_row_per_channel() -> Result<()> {
    let db = setup_test_db().await?;
    let repo = ChannelRepository::new(Arc::new(db.clone()));
    let backups = ChannelBackupRepository::new(Arc::new(db.clone()));

    let channel_id = insert_channel(
        &db,
        "telegram",
        "ops-telegram",
        None,
        json!({"botToken": "abc", "chatId": "1"}),
    )
    .await?;
    let config_id = insert_sub_chain_config(&db, "cosmos-mainnet").await?;
    assert!(repo.link_config(channel_id, config_id).await?);

    let current = repo
        .find_document(channel_id)
        .await?
        .expect("channel exists");
    backups.replace_backup(&current).await?;

    let first = backups
        .find_backup(channel_id)
        .await?
        .expect("backup row exists");
    assert_eq!(first.name, "ops-telegram");
    assert_eq!(first.config_ids, Some(json!([config_id])));

    // Mutate, snapshot again: the backup is replaced, not accumulated.
    assert!(repo.unlink_config(channel_id, config_id).await?);
    let current = repo
        .find_document(channel_id)
        .await?
        .expect("channel exists");
    backups.replace_backup(&current).await?;

    let second = backups
        .find_backup(channel_id)
        .await?
        .expect("backup row exists");
    assert_eq!(second.config_ids, Some(json!([])));
    Ok(())
}
