//! # PANIC Channels API Library
//!
//! Core functionality for the PANIC channel management service: handlers,
//! repositories, entity models and server configuration.

pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod models;
pub mod repositories;
pub mod seeds;
pub mod server;
pub mod telemetry;
pub use migration;
