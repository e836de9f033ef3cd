//! Configuration and dependency wiring for the catalog binary.

mod dependencies;
mod retry;
mod settings;

pub use dependencies::Dependencies;
pub use retry::retry_until;
pub use settings::Settings;
