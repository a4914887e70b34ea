//! textcopy - short-lived text sharing over HTTP
//!
//! Clients create an empty slot, receive a short code, and put base64 text
//! into the slot. Anyone holding the code can read the text until the slot
//! expires. Everything lives in memory.
//!
//! # Architecture
//! - `storage`: concurrent in-memory store with lazy expiry and a background sweeper
//! - `api`: JSON API, static frontend serving and request middleware
//! - `config`: configuration loading and validation
//! - `runtime`: server lifecycle
//! - `system`: logging setup
//! - `utils`: code generation and text validation

pub mod api;
pub mod cli;
pub mod config;
pub mod errors;
pub mod runtime;
pub mod storage;
pub mod system;
pub mod utils;
