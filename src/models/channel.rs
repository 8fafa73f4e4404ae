//! Channel kind definitions and per-kind detail payloads.
//!
//! A channel row in the shared configs table is discriminated by
//! [`ChannelKind`] and carries a kind-specific JSON payload. The payload
//! types below are the typed view of that JSON: request bodies are
//! deserialized through them (unknown fields rejected), and the same
//! structs serialize back into the stored `details` column.
//!
//! Field names are camelCase on the wire, with snake_case aliases accepted
//! on input for clients that post the stored form.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use thiserror::Error;
use utoipa::ToSchema;
use uuid::Uuid;

use super::{config, generic};

/// The six supported alert channel kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChannelKind {
    Email,
    Opsgenie,
    PagerDuty,
    Slack,
    Telegram,
    Twilio,
}

impl ChannelKind {
    /// Every kind, in the order listings are assembled.
    pub const ALL: [ChannelKind; 6] = [
        ChannelKind::Email,
        ChannelKind::Opsgenie,
        ChannelKind::PagerDuty,
        ChannelKind::Slack,
        ChannelKind::Telegram,
        ChannelKind::Twilio,
    ];

    /// The stored discriminator value for this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            ChannelKind::Email => "email",
            ChannelKind::Opsgenie => "opsgenie",
            ChannelKind::PagerDuty => "pagerduty",
            ChannelKind::Slack => "slack",
            ChannelKind::Telegram => "telegram",
            ChannelKind::Twilio => "twilio",
        }
    }
}

impl fmt::Display for ChannelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a discriminator value names no channel kind.
#[derive(Debug, Error)]
#[error("unknown channel type '{0}'")]
pub struct UnknownChannelKind(pub String);

impl FromStr for ChannelKind {
    type Err = UnknownChannelKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "email" => Ok(ChannelKind::Email),
            "opsgenie" => Ok(ChannelKind::Opsgenie),
            "pagerduty" => Ok(ChannelKind::PagerDuty),
            "slack" => Ok(ChannelKind::Slack),
            "telegram" => Ok(ChannelKind::Telegram),
            "twilio" => Ok(ChannelKind::Twilio),
            other => Err(UnknownChannelKind(other.to_string())),
        }
    }
}

/// Errors produced while turning a request body into a typed detail payload.
#[derive(Debug, Error)]
pub enum DetailsError {
    /// The body does not deserialize into the kind's shape (missing or
    /// unknown fields, wrong types).
    #[error("{0}")]
    Shape(String),
    /// The shape was fine but individual field values are invalid.
    #[error("invalid field values")]
    Fields(BTreeMap<String, String>),
}

/// Email channel payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct EmailDetails {
    pub smtp: String,
    #[serde(default = "default_smtp_port")]
    pub port: u16,
    #[serde(alias = "email_from")]
    pub email_from: String,
    #[serde(alias = "emails_to")]
    pub emails_to: Vec<String>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default)]
    pub info: bool,
    #[serde(default)]
    pub warning: bool,
    #[serde(default)]
    pub critical: bool,
    #[serde(default)]
    pub error: bool,
}

fn default_smtp_port() -> u16 {
    25
}

/// Opsgenie channel payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct OpsgenieDetails {
    #[serde(alias = "api_token")]
    pub api_token: String,
    #[serde(default)]
    pub eu: bool,
    #[serde(default)]
    pub info: bool,
    #[serde(default)]
    pub warning: bool,
    #[serde(default)]
    pub critical: bool,
    #[serde(default)]
    pub error: bool,
}

/// PagerDuty channel payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct PagerDutyDetails {
    #[serde(alias = "integration_key")]
    pub integration_key: String,
    #[serde(default)]
    pub info: bool,
    #[serde(default)]
    pub warning: bool,
    #[serde(default)]
    pub critical: bool,
    #[serde(default)]
    pub error: bool,
}

/// Slack channel payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SlackDetails {
    #[serde(alias = "app_token")]
    pub app_token: String,
    #[serde(alias = "bot_token")]
    pub bot_token: String,
    #[serde(alias = "bot_channel_id")]
    pub bot_channel_id: String,
    #[serde(default)]
    pub commands: bool,
    #[serde(default)]
    pub alerts: bool,
    #[serde(default)]
    pub info: bool,
    #[serde(default)]
    pub warning: bool,
    #[serde(default)]
    pub critical: bool,
    #[serde(default)]
    pub error: bool,
}

/// Telegram channel payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct TelegramDetails {
    #[serde(alias = "bot_token")]
    pub bot_token: String,
    #[serde(alias = "chat_id")]
    pub chat_id: String,
    #[serde(default)]
    pub commands: bool,
    #[serde(default)]
    pub alerts: bool,
    #[serde(default)]
    pub info: bool,
    #[serde(default)]
    pub warning: bool,
    #[serde(default)]
    pub critical: bool,
    #[serde(default)]
    pub error: bool,
}

/// Twilio channel payload. Twilio calls are reserved for critical alerts,
/// so this is the only kind without the full severity flag set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct TwilioDetails {
    #[serde(alias = "account_sid")]
    pub account_sid: String,
    #[serde(alias = "auth_token")]
    pub auth_token: String,
    #[serde(alias = "twilio_phone_number")]
    pub twilio_phone_number: String,
    #[serde(alias = "phone_numbers_to_dial")]
    pub phone_numbers_to_dial: Vec<String>,
    #[serde(default)]
    pub critical: bool,
}

/// Typed view of a channel row's `details` column.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ChannelDetails {
    Email(EmailDetails),
    Opsgenie(OpsgenieDetails),
    PagerDuty(PagerDutyDetails),
    Slack(SlackDetails),
    Telegram(TelegramDetails),
    Twilio(TwilioDetails),
}

impl ChannelDetails {
    /// Deserializes and validates a payload for the given kind.
    pub fn parse(kind: ChannelKind, value: JsonValue) -> Result<Self, DetailsError> {
        let details = match kind {
            ChannelKind::Email => serde_json::from_value(value).map(ChannelDetails::Email),
            ChannelKind::Opsgenie => serde_json::from_value(value).map(ChannelDetails::Opsgenie),
            ChannelKind::PagerDuty => serde_json::from_value(value).map(ChannelDetails::PagerDuty),
            ChannelKind::Slack => serde_json::from_value(value).map(ChannelDetails::Slack),
            ChannelKind::Telegram => serde_json::from_value(value).map(ChannelDetails::Telegram),
            ChannelKind::Twilio => serde_json::from_value(value).map(ChannelDetails::Twilio),
        }
        .map_err(|err| DetailsError::Shape(err.to_string()))?;

        let field_errors = details.field_errors();
        if !field_errors.is_empty() {
            return Err(DetailsError::Fields(field_errors));
        }

        Ok(details)
    }

    pub fn kind(&self) -> ChannelKind {
        match self {
            ChannelDetails::Email(_) => ChannelKind::Email,
            ChannelDetails::Opsgenie(_) => ChannelKind::Opsgenie,
            ChannelDetails::PagerDuty(_) => ChannelKind::PagerDuty,
            ChannelDetails::Slack(_) => ChannelKind::Slack,
            ChannelDetails::Telegram(_) => ChannelKind::Telegram,
            ChannelDetails::Twilio(_) => ChannelKind::Twilio,
        }
    }

    /// Serializes back into the stored JSON form.
    pub fn to_json(&self) -> serde_json::Result<JsonValue> {
        serde_json::to_value(self)
    }

    fn field_errors(&self) -> BTreeMap<String, String> {
        let mut errors = BTreeMap::new();

        match self {
            ChannelDetails::Email(details) => {
                require(&mut errors, "smtp", &details.smtp);
                require(&mut errors, "emailFrom", &details.email_from);
                if details.emails_to.is_empty()
                    || details.emails_to.iter().any(|addr| addr.trim().is_empty())
                {
                    errors.insert(
                        "emailsTo".to_string(),
                        "at least one non-empty recipient address is required".to_string(),
                    );
                }
                if details.port == 0 {
                    errors.insert("port".to_string(), "port must be non-zero".to_string());
                }
            }
            ChannelDetails::Opsgenie(details) => {
                require(&mut errors, "apiToken", &details.api_token);
            }
            ChannelDetails::PagerDuty(details) => {
                require(&mut errors, "integrationKey", &details.integration_key);
            }
            ChannelDetails::Slack(details) => {
                require(&mut errors, "appToken", &details.app_token);
                require(&mut errors, "botToken", &details.bot_token);
                require(&mut errors, "botChannelId", &details.bot_channel_id);
            }
            ChannelDetails::Telegram(details) => {
                require(&mut errors, "botToken", &details.bot_token);
                require(&mut errors, "chatId", &details.chat_id);
            }
            ChannelDetails::Twilio(details) => {
                require(&mut errors, "accountSid", &details.account_sid);
                require(&mut errors, "authToken", &details.auth_token);
                require(&mut errors, "twilioPhoneNumber", &details.twilio_phone_number);
                if details.phone_numbers_to_dial.is_empty()
                    || details
                        .phone_numbers_to_dial
                        .iter()
                        .any(|number| number.trim().is_empty())
                {
                    errors.insert(
                        "phoneNumbersToDial".to_string(),
                        "at least one non-empty phone number is required".to_string(),
                    );
                }
            }
        }

        errors
    }
}

fn require(errors: &mut BTreeMap<String, String>, field: &str, value: &str) {
    if value.trim().is_empty() {
        errors.insert(field.to_string(), format!("{field} is required"));
    }
}

/// Projection of a linked sub-chain config.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct LinkedConfig {
    #[schema(value_type = String)]
    pub id: Uuid,
    pub name: String,
}

/// A channel row hydrated with its type lookup row and linked configs.
#[derive(Debug, Clone)]
pub struct ChannelRecord {
    pub model: config::Model,
    pub channel_type: Option<generic::Model>,
    pub configs: Vec<LinkedConfig>,
}
