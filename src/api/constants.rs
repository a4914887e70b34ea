//! API constants

/// Largest request body accepted by the text endpoints (1 MiB)
pub const MAX_BODY_BYTES: usize = 1024 * 1024;

pub const HELLO_MESSAGE: &str = "hello from textcopy api";

pub const MSG_INVALID_JSON: &str = "invalid json";
