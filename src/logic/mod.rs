//! Logic modules — translates role parameters into catalog resources.
//!
//! # Modules
//!
//! - `resolver` — Merges API role input with defaults and platform names
//! - `planner` — Plans the API role catalog
//! - `database` — Resolves and plans the PostgreSQL database role

pub mod database;
pub mod planner;
pub mod resolver;
