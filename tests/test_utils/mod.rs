//! Test utilities for database and router testing.
//!
//! Builds in-memory SQLite databases with migrations applied and provides
//! fixture helpers for lookup rows, channels and sub-chain configs.

use anyhow::Result;
use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use chrono::Utc;
use http_body_util::BodyExt;
use migration::{Migrator, MigratorTrait};
use sea_orm::{ActiveModelTrait, ConnectionTrait, Database, DatabaseConnection, Set, Statement};
use serde_json::Value as JsonValue;
use tower::ServiceExt;
use uuid::Uuid;

use panic_api::models::config::{self, SUB_CHAIN_CONFIG_TYPE};
use panic_api::models::config_link;
use panic_api::models::generic::{self, GROUP_CHANNEL_TYPE};
use panic_api::server::{AppState, create_app};

/// Sets up an in-memory SQLite database with all migrations applied.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = Database::connect("sqlite::memory:").await?;

    Migrator::up(&db, None).await?;

    // SQLite does not enforce our Postgres foreign key semantics; disable FK
    // checks so fixtures can be inserted without the full relation graph.
    db.execute(Statement::from_string(
        db.get_database_backend(),
        "PRAGMA foreign_keys = OFF".to_string(),
    ))
    .await?;

    Ok(db)
}

/// Builds the application router over the given database.
#[allow(dead_code)]
pub fn build_app(db: &DatabaseConnection) -> Router {
    create_app(AppState { db: db.clone() })
}

/// Inserts a `channel_type` lookup row and returns its id.
#[allow(dead_code)]
pub async fn insert_channel_type(db: &DatabaseConnection, value: &str) -> Result<Uuid> {
    let id = Uuid::new_v4();
    let row = generic::ActiveModel {
        id: Set(id),
        group_name: Set(GROUP_CHANNEL_TYPE.to_string()),
        value: Set(value.to_string()),
        description: Set(None),
        created_at: Set(Utc::now().into()),
    };
    row.insert(db).await?;
    Ok(id)
}

/// Inserts a channel row directly and returns its id.
#[allow(dead_code)]
pub async fn insert_channel(
    db: &DatabaseConnection,
    kind: &str,
    name: &str,
    type_id: Option<Uuid>,
    details: JsonValue,
) -> Result<Uuid> {
    let id = Uuid::new_v4();
    let now = Utc::now();
    let row = config::ActiveModel {
        id: Set(id),
        name: Set(name.to_string()),
        config_type: Set(kind.to_string()),
        type_id: Set(type_id),
        details: Set(Some(details)),
        created_at: Set(now.into()),
        modified_at: Set(now.into()),
    };
    row.insert(db).await?;
    Ok(id)
}

/// Inserts a monitored sub-chain config row and returns its id.
#[allow(dead_code)]
pub async fn insert_sub_chain_config(db: &DatabaseConnection, name: &str) -> Result<Uuid> {
    let id = Uuid::new_v4();
    let now = Utc::now();
    let row = config::ActiveModel {
        id: Set(id),
        name: Set(name.to_string()),
        config_type: Set(SUB_CHAIN_CONFIG_TYPE.to_string()),
        type_id: Set(None),
        details: Set(None),
        created_at: Set(now.into()),
        modified_at: Set(now.into()),
    };
    row.insert(db).await?;
    Ok(id)
}

/// Inserts a raw link row, bypassing the repository's sub-chain guard.
#[allow(dead_code)]
pub async fn insert_link(
    db: &DatabaseConnection,
    channel_id: Uuid,
    config_id: Uuid,
) -> Result<()> {
    let row = config_link::ActiveModel {
        channel_id: Set(channel_id),
        config_id: Set(config_id),
    };
    row.insert(db).await?;
    Ok(())
}

/// Sends a request through the router and returns status plus parsed body.
/// A 204 yields `JsonValue::Null`.
#[allow(dead_code)]
pub async fn send_request(
    app: Router,
    method: &str,
    uri: &str,
    body: Option<JsonValue>,
) -> Result<(StatusCode, JsonValue)> {
    let request = match body {
        Some(json) => Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(serde_json::to_vec(&json)?))?,
        None => Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())?,
    };

    let response = app.oneshot(request).await?;
    let status = response.status();
    let bytes = response.into_body().collect().await?.to_bytes();

    let value = if bytes.is_empty() {
        JsonValue::Null
    } else {
        serde_json::from_slice(&bytes)?
    };

    Ok((status, value))
}
