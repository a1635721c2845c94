//! # traintrack-database
//!
//! PostgreSQL connection management, migrations, and the concrete
//! user repository for TrainTrack.

pub mod connection;
pub mod migration;
pub mod repositories;

pub use connection::DatabasePool;
