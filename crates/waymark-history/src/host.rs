//! The environment a watcher runs against

use std::fmt;
use std::rc::Rc;

use waymark_address::Location;

use crate::Result;

/// Callback a host invokes when one of its signals fires.
pub type Handler = Rc<dyn Fn()>;

/// Change signals a host can deliver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Signal {
    /// Navigation through history entries (`popstate`).
    PopState,
    /// Fragment identifier changed (`hashchange`).
    HashChange,
}

impl Signal {
    pub fn event_name(&self) -> &'static str {
        match self {
            Signal::PopState => "popstate",
            Signal::HashChange => "hashchange",
        }
    }
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.event_name())
    }
}

/// Navigation state and signals of the hosting environment.
///
/// Hosts hold at most one handler per signal; installing a handler
/// replaces whatever was installed for that signal before.
pub trait NavigationHost {
    /// Current fragment and path. Unreadable parts are reported empty.
    fn location(&self) -> Location;

    /// Whether entries can be pushed without a reload.
    fn supports_push_state(&self) -> bool;

    /// Push a new entry with `path` as its address. No state, no title.
    fn push_state(&self, path: &str) -> Result<()>;

    /// Set the fragment identifier. A leading `#` is accepted.
    fn set_fragment(&self, fragment: &str) -> Result<()>;

    fn install_handler(&self, signal: Signal, handler: Handler) -> Result<()>;
}
