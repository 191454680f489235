//! Application layer for chatstore: the HTTP transport and the wiring that
//! connects it to the SQLite-backed chat service.

pub mod http;
pub mod state;
