pub mod headless_mode;
pub mod messages;
pub mod setup;
pub mod snapshot;

pub use headless_mode::run_headless_mode;
pub use setup::{FilterOverrides, SessionData, setup_session};
pub use snapshot::run_snapshot;
