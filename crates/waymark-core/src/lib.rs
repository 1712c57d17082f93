//! Waymark Core
//!
//! Entry point for applications: read a [`Config`], call [`start`] once
//! from the startup routine and pass the returned watcher to whatever
//! needs to follow or change the address.

mod config;
mod error;
mod startup;

pub use config::Config;
pub use error::CoreError;
pub use startup::start;

// Re-export components
pub use waymark_address::{AddressError, Location};
#[cfg(target_arch = "wasm32")]
pub use waymark_history::BrowserHost;
pub use waymark_history::{
    AddressWatcher, HistoryError, ListenerId, MemoryHost, Mode, ModePreference, NavigationHost,
    Signal,
};

pub type Result<T> = std::result::Result<T, CoreError>;

/// Initialize logging
pub fn init_logging() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    fmt().with_env_filter(filter).with_target(true).init();
}
