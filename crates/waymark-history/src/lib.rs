//! Waymark History
//!
//! One listener-based interface over two navigation mechanisms:
//! - Native history (`pushState` + `popstate`)
//! - Fragment fallback (`location.hash` + `hashchange`)
//!
//! The mechanism is picked once when an [`AddressWatcher`] is built and
//! never changes afterwards.

mod error;
mod host;
mod listeners;
mod memory;
mod mode;
mod watcher;
#[cfg(target_arch = "wasm32")]
mod web;

pub use error::HistoryError;
pub use host::{Handler, NavigationHost, Signal};
pub use listeners::{Listener, ListenerId, ListenerRegistry};
pub use memory::MemoryHost;
pub use mode::{Mode, ModePreference};
pub use watcher::AddressWatcher;
#[cfg(target_arch = "wasm32")]
pub use web::BrowserHost;

pub use waymark_address::Location;

pub type Result<T> = std::result::Result<T, HistoryError>;
