//! # Data Models
//!
//! SeaORM entities for the shared configs collection and its satellites,
//! plus the in-memory channel type definitions.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub mod channel;
pub mod config;
pub mod config_link;
pub mod config_old;
pub mod generic;

pub use config::Entity as Config;
pub use config_link::Entity as ConfigLink;
pub use config_old::Entity as ConfigOld;
pub use generic::Entity as Generic;

/// Basic service information response
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ServiceInfo {
    /// The name of the service
    pub service: String,
    /// The version of the service
    pub version: String,
}

impl Default for ServiceInfo {
    fn default() -> Self {
        Self {
            service: "panic-api".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}
