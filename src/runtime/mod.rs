//! Application lifecycle
//!
//! - `lifetime`: startup preparation and graceful shutdown
//! - `modes`: execution modes (only the HTTP server for now)

pub mod lifetime;
pub mod modes;
