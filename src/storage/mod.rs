//! Entry storage: the concurrent text store and its expiry sweeper

pub mod models;
pub mod sweeper;
pub mod text_store;

pub use models::TextEntry;
pub use sweeper::{DEFAULT_SWEEP_INTERVAL, ExpirySweeper, SweepReport, SweeperHandle};
pub use text_store::{DEFAULT_TTL, TextStore};
