//! # Channels API Handlers
//!
//! The channel resource: CRUD over the six alert channel kinds plus the
//! config link endpoints. Each handler is a linear validation pipeline
//! with early exit on the first failure; mutations snapshot the current
//! row into the backup table before touching the live one.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use chrono::Utc;
use sea_orm::Set;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::error::ApiError;
use crate::handlers::types::Envelope;
use crate::models::channel::{ChannelDetails, ChannelKind, ChannelRecord, LinkedConfig};
use crate::models::{config, generic};
use crate::repositories::{
    ChannelBackupRepository, ChannelRepository, ConfigRepository, GenericRepository,
};
use crate::server::AppState;

/// Body fields that are managed by the service and never merged into a
/// channel's detail payload. `type` and `configs` are immutable after
/// creation; links change only through the dedicated link endpoints.
const RESERVED_FIELDS: [&str; 10] = [
    "id",
    "name",
    "type",
    "configs",
    "createdAt",
    "created_at",
    "modifiedAt",
    "modified_at",
    "configType",
    "config_type",
];

/// Channel type lookup row as exposed in responses
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ChannelTypeInfo {
    #[schema(value_type = String)]
    pub id: Uuid,
    pub value: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Channel information for API responses. Kind-specific fields are
/// flattened alongside the common ones, matching the stored document
/// shape.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChannelInfo {
    #[schema(value_type = String)]
    pub id: Uuid,
    pub name: String,
    #[serde(rename = "type")]
    pub channel_type: Option<ChannelTypeInfo>,
    /// Linked sub-chain configs, projected to id + name
    pub configs: Vec<LinkedConfig>,
    pub created_at: String,
    pub modified_at: String,
    /// Kind-specific payload fields
    #[serde(flatten)]
    #[schema(value_type = Object)]
    pub details: Map<String, JsonValue>,
}

impl From<ChannelRecord> for ChannelInfo {
    fn from(record: ChannelRecord) -> Self {
        let details = match record.model.details {
            Some(JsonValue::Object(map)) => map,
            _ => Map::new(),
        };

        Self {
            id: record.model.id,
            name: record.model.name,
            channel_type: record.channel_type.map(|row| ChannelTypeInfo {
                id: row.id,
                value: row.value,
                description: row.description,
            }),
            configs: record.configs,
            created_at: record.model.created_at.to_rfc3339(),
            modified_at: record.model.modified_at.to_rfc3339(),
            details,
        }
    }
}

/// Lists every channel of every kind
#[utoipa::path(
    get,
    path = "/v1/channels",
    responses(
        (status = 200, description = "All channels across the six kinds", body = Envelope<Vec<ChannelInfo>>),
        (status = 536, description = "Could not retrieve data", body = ApiError)
    ),
    tag = "channels"
)]
pub async fn get_channels(
    State(state): State<AppState>,
) -> Result<Json<Envelope<Vec<ChannelInfo>>>, ApiError> {
    let repo = ChannelRepository::new(Arc::new(state.db.clone()));

    let mut channels = Vec::new();
    for kind in ChannelKind::ALL {
        let records = repo
            .find_all_hydrated(kind)
            .await
            .map_err(ApiError::retrieve)?;
        channels.extend(records.into_iter().map(ChannelInfo::from));
    }

    Ok(Json(Envelope::success(channels)))
}

/// Fetches a single channel by id
#[utoipa::path(
    get,
    path = "/v1/channels/{id}",
    params(("id" = String, Path, description = "Channel id")),
    responses(
        (status = 200, description = "The channel", body = Envelope<ChannelInfo>),
        (status = 400, description = "Malformed id", body = ApiError),
        (status = 404, description = "No channel with that id", body = ApiError),
        (status = 536, description = "Could not retrieve data", body = ApiError)
    ),
    tag = "channels"
)]
pub async fn get_channel(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Envelope<ChannelInfo>>, ApiError> {
    let id = parse_id(&id)?;

    let repo = ChannelRepository::new(Arc::new(state.db.clone()));
    let record = repo
        .find_by_id_hydrated(id)
        .await
        .map_err(ApiError::retrieve)?
        .ok_or_else(|| ApiError::not_found("Channel"))?;

    Ok(Json(Envelope::success(ChannelInfo::from(record))))
}

/// Creates a channel of the kind named by the `type` lookup reference
#[utoipa::path(
    post,
    path = "/v1/channels",
    request_body(content = Object, description = "`{type: {id}, name, ...kind-specific fields}`"),
    responses(
        (status = 200, description = "Created; result is the new id", body = Envelope<String>, example = json!({
            "status": "success",
            "result": "550e8400-e29b-41d4-a716-446655440000"
        })),
        (status = 400, description = "Validation failure", body = ApiError),
        (status = 409, description = "Duplicate channel name", body = ApiError),
        (status = 536, description = "Could not save data", body = ApiError)
    ),
    tag = "channels"
)]
pub async fn create_channel(
    State(state): State<AppState>,
    Json(body): Json<JsonValue>,
) -> Result<Json<Envelope<String>>, ApiError> {
    let body = body
        .as_object()
        .ok_or_else(|| ApiError::validation("request body must be a JSON object"))?;

    let generic_repo = GenericRepository::new(Arc::new(state.db.clone()));
    let channel_repo = ChannelRepository::new(Arc::new(state.db.clone()));

    let type_row = resolve_channel_type(&generic_repo, body).await?;
    let kind: ChannelKind = type_row
        .value
        .parse()
        .map_err(|err: crate::models::channel::UnknownChannelKind| {
            ApiError::validation(err.to_string())
        })?;

    let name = extract_name(body)?;

    // Links are established through the dedicated endpoints, never at
    // creation; any `configs` field in the body is discarded here.
    let payload = detail_payload(body, None);
    let details = parse_details(kind, payload)?;

    if channel_repo
        .is_duplicate_name(&name, None)
        .await
        .map_err(ApiError::retrieve)?
    {
        return Err(ApiError::duplicate_name(&name));
    }

    let now = Utc::now();
    let details_json = details.to_json().map_err(|err| ApiError::save(err.into()))?;
    let model = config::ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set(name),
        config_type: Set(kind.as_str().to_string()),
        type_id: Set(Some(type_row.id)),
        details: Set(Some(details_json)),
        created_at: Set(now.into()),
        modified_at: Set(now.into()),
    };

    let created = channel_repo.insert(model).await.map_err(ApiError::save)?;

    Ok(Json(Envelope::success(created.id.to_string())))
}

/// Updates a channel's name and kind-specific fields
#[utoipa::path(
    put,
    path = "/v1/channels/{id}",
    params(("id" = String, Path, description = "Channel id")),
    request_body(content = Object, description = "Same shape as creation minus `type` and `configs`"),
    responses(
        (status = 200, description = "Updated; result is the id", body = Envelope<String>),
        (status = 400, description = "Malformed id or validation failure", body = ApiError),
        (status = 404, description = "No channel with that id", body = ApiError),
        (status = 409, description = "Duplicate channel name", body = ApiError),
        (status = 536, description = "Could not save data", body = ApiError)
    ),
    tag = "channels"
)]
pub async fn update_channel(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<JsonValue>,
) -> Result<Json<Envelope<String>>, ApiError> {
    let id = parse_id(&id)?;
    let body = body
        .as_object()
        .ok_or_else(|| ApiError::validation("request body must be a JSON object"))?;

    let channel_repo = ChannelRepository::new(Arc::new(state.db.clone()));

    let record = channel_repo
        .find_by_id_hydrated(id)
        .await
        .map_err(ApiError::retrieve)?
        .ok_or_else(|| ApiError::not_found("Channel"))?;
    let current = record.model;

    let kind: ChannelKind = current
        .config_type
        .parse()
        .map_err(|err: crate::models::channel::UnknownChannelKind| {
            ApiError::retrieve(anyhow::Error::from(err))
        })?;

    let name = match body.get("name") {
        Some(value) => {
            let name = value
                .as_str()
                .map(str::trim)
                .filter(|name| !name.is_empty())
                .ok_or_else(|| ApiError::validation("name must be a non-empty string"))?;
            name.to_string()
        }
        None => current.name.clone(),
    };

    if channel_repo
        .is_duplicate_name(&name, Some(id))
        .await
        .map_err(ApiError::retrieve)?
    {
        return Err(ApiError::duplicate_name(&name));
    }

    // `type` and `configs` are immutable after creation; the merge below
    // overlays the remaining body fields onto the stored payload.
    let payload = detail_payload(body, current.details.as_ref());
    let details = parse_details(kind, payload)?;

    snapshot_to_old(&state, &current).await;

    let details_json = details.to_json().map_err(|err| ApiError::save(err.into()))?;
    let mut model: config::ActiveModel = current.into();
    model.name = Set(name);
    model.details = Set(Some(details_json));
    model.modified_at = Set(Utc::now().into());

    let updated = channel_repo.update(model).await.map_err(ApiError::save)?;

    Ok(Json(Envelope::success(updated.id.to_string())))
}

/// Deletes a channel
#[utoipa::path(
    delete,
    path = "/v1/channels/{id}",
    params(("id" = String, Path, description = "Channel id")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 400, description = "Malformed id", body = ApiError),
        (status = 404, description = "No document with that id", body = ApiError),
        (status = 536, description = "Could not remove data", body = ApiError)
    ),
    tag = "channels"
)]
pub async fn remove_channel(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = parse_id(&id)?;

    let channel_repo = ChannelRepository::new(Arc::new(state.db.clone()));
    let current = channel_repo
        .find_document(id)
        .await
        .map_err(ApiError::retrieve)?
        .ok_or_else(|| ApiError::not_found("Channel"))?;

    snapshot_to_old(&state, &current).await;

    let removed = channel_repo
        .delete_by_id(id)
        .await
        .map_err(ApiError::remove)?;
    if removed == 0 {
        return Err(ApiError::not_found("Channel"));
    }

    Ok(StatusCode::NO_CONTENT)
}

/// Links a sub-chain config to a channel
#[utoipa::path(
    post,
    path = "/v1/channels/{channel_id}/configs/{config_id}",
    params(
        ("channel_id" = String, Path, description = "Channel id"),
        ("config_id" = String, Path, description = "Sub-chain config id")
    ),
    responses(
        (status = 204, description = "Link present"),
        (status = 400, description = "Malformed id", body = ApiError),
        (status = 404, description = "Channel or config not found", body = ApiError),
        (status = 536, description = "Could not save data", body = ApiError)
    ),
    tag = "channels"
)]
pub async fn create_config_link(
    State(state): State<AppState>,
    Path((channel_id, config_id)): Path<(String, String)>,
) -> Result<StatusCode, ApiError> {
    let (channel_id, config_id) = (parse_id(&channel_id)?, parse_id(&config_id)?);

    let config_repo = ConfigRepository::new(Arc::new(state.db.clone()));
    if !config_repo
        .exists(config_id)
        .await
        .map_err(ApiError::retrieve)?
    {
        return Err(ApiError::not_found("Config"));
    }

    let channel_repo = ChannelRepository::new(Arc::new(state.db.clone()));
    let record = channel_repo
        .find_by_id_hydrated(channel_id)
        .await
        .map_err(ApiError::retrieve)?
        .ok_or_else(|| ApiError::not_found("Channel"))?;

    snapshot_to_old(&state, &record.model).await;

    let matched = channel_repo
        .link_config(channel_id, config_id)
        .await
        .map_err(ApiError::save)?;
    if !matched {
        return Err(ApiError::not_found("Channel"));
    }

    Ok(StatusCode::NO_CONTENT)
}

/// Unlinks a sub-chain config from a channel
#[utoipa::path(
    delete,
    path = "/v1/channels/{channel_id}/configs/{config_id}",
    params(
        ("channel_id" = String, Path, description = "Channel id"),
        ("config_id" = String, Path, description = "Sub-chain config id")
    ),
    responses(
        (status = 204, description = "Link absent"),
        (status = 400, description = "Malformed id", body = ApiError),
        (status = 404, description = "Channel or config not found", body = ApiError),
        (status = 536, description = "Could not remove data", body = ApiError)
    ),
    tag = "channels"
)]
pub async fn remove_config_link(
    State(state): State<AppState>,
    Path((channel_id, config_id)): Path<(String, String)>,
) -> Result<StatusCode, ApiError> {
    let (channel_id, config_id) = (parse_id(&channel_id)?, parse_id(&config_id)?);

    let config_repo = ConfigRepository::new(Arc::new(state.db.clone()));
    if !config_repo
        .exists(config_id)
        .await
        .map_err(ApiError::retrieve)?
    {
        return Err(ApiError::not_found("Config"));
    }

    let channel_repo = ChannelRepository::new(Arc::new(state.db.clone()));
    let record = channel_repo
        .find_by_id_hydrated(channel_id)
        .await
        .map_err(ApiError::retrieve)?
        .ok_or_else(|| ApiError::not_found("Channel"))?;

    snapshot_to_old(&state, &record.model).await;

    let matched = channel_repo
        .unlink_config(channel_id, config_id)
        .await
        .map_err(ApiError::remove)?;
    if !matched {
        return Err(ApiError::not_found("Channel"));
    }

    Ok(StatusCode::NO_CONTENT)
}

/// Rejects collection-level mutations that require an id.
pub async fn missing_id() -> ApiError {
    ApiError::missing_parameter("id")
}

/// Best-effort backup: the snapshot must never block the primary mutation,
/// so its failure is logged and deliberately discarded.
async fn snapshot_to_old(state: &AppState, current: &config::Model) {
    let backup = ChannelBackupRepository::new(Arc::new(state.db.clone()));
    if let Err(err) = backup.replace_backup(current).await {
        tracing::warn!(
            channel_id = %current.id,
            error = ?err,
            "channel backup failed; continuing with the mutation"
        );
    }
}

fn parse_id(raw: &str) -> Result<Uuid, ApiError> {
    raw.parse().map_err(|_| ApiError::invalid_id())
}

fn extract_name(body: &Map<String, JsonValue>) -> Result<String, ApiError> {
    body.get("name")
        .and_then(JsonValue::as_str)
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .ok_or_else(|| ApiError::validation("name is required"))
}

async fn resolve_channel_type(
    repo: &GenericRepository,
    body: &Map<String, JsonValue>,
) -> Result<generic::Model, ApiError> {
    let type_id = body
        .get("type")
        .and_then(|value| value.get("id"))
        .and_then(JsonValue::as_str)
        .ok_or_else(|| ApiError::validation("type.id is required"))?;

    let type_id: Uuid = type_id
        .parse()
        .map_err(|_| ApiError::validation("type.id is not a valid id"))?;

    repo.find_channel_type(type_id)
        .await
        .map_err(ApiError::retrieve)?
        .ok_or_else(|| ApiError::validation("unrecognized channel type"))
}

/// Builds the kind-specific payload for validation: the stored payload (if
/// any) overlaid with the body, minus the reserved fields.
fn detail_payload(body: &Map<String, JsonValue>, existing: Option<&JsonValue>) -> JsonValue {
    let mut merged = match existing {
        Some(JsonValue::Object(map)) => map.clone(),
        _ => Map::new(),
    };

    for (key, value) in body {
        if RESERVED_FIELDS.contains(&key.as_str()) {
            continue;
        }
        merged.insert(key.clone(), value.clone());
    }

    JsonValue::Object(merged)
}

fn parse_details(kind: ChannelKind, payload: JsonValue) -> Result<ChannelDetails, ApiError> {
    use crate::models::channel::DetailsError;

    ChannelDetails::parse(kind, payload).map_err(|err| match err {
        DetailsError::Shape(message) => ApiError::validation(message),
        DetailsError::Fields(fields) => {
            ApiError::validation("Error when parsing data").with_field_errors(fields)
        }
    })
}
