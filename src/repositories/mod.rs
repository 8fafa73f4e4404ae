//! # Repository Layer
//!
//! Repositories encapsulating SeaORM operations over the shared configs
//! table and its satellites. One generic channel repository serves all six
//! channel kinds; the shared table is what lets the duplicate-name check
//! and bulk unlink span every kind through a single instance.

pub mod backup;
pub mod channel;
pub mod config;
pub mod generic;

pub use backup::ChannelBackupRepository;
pub use channel::ChannelRepository;
pub use config::ConfigRepository;
pub use generic::GenericRepository;
