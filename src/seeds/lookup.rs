//! Lookup-row seeding
//!
//! Ensures the `channel_type` group has one row per supported channel kind
//! and the `config_type` group carries the monitored-configuration kinds,
//! including the reserved sub-chain value. Existing rows are left alone, so
//! seeding is safe to run on every startup.

use anyhow::Result;
use chrono::Utc;
use sea_orm::{DatabaseConnection, Set};
use std::sync::Arc;
use uuid::Uuid;

use crate::models::channel::ChannelKind;
use crate::models::config::SUB_CHAIN_CONFIG_TYPE;
use crate::models::generic;
use crate::models::generic::{GROUP_CHANNEL_TYPE, GROUP_CONFIG_TYPE};
use crate::repositories::GenericRepository;

/// Seeds the generics table with the channel and config type lookup rows.
pub async fn seed_lookup_rows(db: &DatabaseConnection) -> Result<()> {
    let repo = GenericRepository::new(Arc::new(db.clone()));

    for kind in ChannelKind::ALL {
        ensure_row(
            &repo,
            GROUP_CHANNEL_TYPE,
            kind.as_str(),
            &format!("{} alert channel", kind.as_str()),
        )
        .await?;
    }

    ensure_row(&repo, GROUP_CONFIG_TYPE, "chain", "monitored chain").await?;
    ensure_row(
        &repo,
        GROUP_CONFIG_TYPE,
        SUB_CHAIN_CONFIG_TYPE,
        "monitored sub-chain",
    )
    .await?;

    log::info!("Lookup row seeding completed");
    Ok(())
}

async fn ensure_row(
    repo: &GenericRepository,
    group: &str,
    value: &str,
    description: &str,
) -> Result<()> {
    match repo.find_by_group_value(group, value).await? {
        Some(_) => {
            log::debug!("Lookup row {}/{} already exists, skipping", group, value);
        }
        None => {
            log::info!("Creating lookup row {}/{}", group, value);
            let row = generic::ActiveModel {
                id: Set(Uuid::new_v4()),
                group_name: Set(group.to_string()),
                value: Set(value.to_string()),
                description: Set(Some(description.to_string())),
                created_at: Set(Utc::now().into()),
            };
            repo.insert(row).await?;
        }
    }
    Ok(())
}
