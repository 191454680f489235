//! Infrastructure layer for chatstore.
//!
//! Contains the SQLite implementation of the repository trait defined in
//! `chatstore-core` and the loader for `config.toml`.

pub mod config;
pub mod sqlite;
