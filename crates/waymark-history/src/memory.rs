//! In-memory navigation host
//!
//! Behaves like a browser tab without a page: an entry stack, a current
//! URL, one handler slot per signal and an event queue. Fragment changes
//! and traversal queue their signals; nothing is delivered until
//! [`MemoryHost::dispatch_pending`] runs, the way a browser delivers
//! them from its event loop.

use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};
use std::fmt;
use std::rc::Rc;

use url::Url;
use waymark_address::{AddressError, Location, FRAGMENT_MARKER};

use crate::error::HistoryError;
use crate::host::{Handler, NavigationHost, Signal};
use crate::Result;

struct MemoryState {
    entries: Vec<Url>,
    index: usize,
    push_state_supported: bool,
    handlers: HashMap<Signal, Handler>,
    pending: VecDeque<Signal>,
}

impl MemoryState {
    fn current(&self) -> &Url {
        &self.entries[self.index]
    }

    fn push_entry(&mut self, url: Url) {
        self.entries.truncate(self.index + 1);
        self.entries.push(url);
        self.index = self.entries.len() - 1;
    }
}

/// Clone-able handle to one in-memory environment.
#[derive(Clone)]
pub struct MemoryHost {
    state: Rc<RefCell<MemoryState>>,
}

impl MemoryHost {
    /// A host with native history support.
    pub fn new(href: &str) -> Result<Self> {
        Self::build(href, true)
    }

    /// A host that only supports fragment navigation.
    pub fn legacy(href: &str) -> Result<Self> {
        Self::build(href, false)
    }

    fn build(href: &str, push_state_supported: bool) -> Result<Self> {
        let url = Url::parse(href)
            .map_err(|e| AddressError::InvalidUrl(format!("{href}: {e}")))?;

        Ok(Self {
            state: Rc::new(RefCell::new(MemoryState {
                entries: vec![url],
                index: 0,
                push_state_supported,
                handlers: HashMap::new(),
                pending: VecDeque::new(),
            })),
        })
    }

    /// Current full URL.
    pub fn href(&self) -> String {
        self.state.borrow().current().to_string()
    }

    /// Number of entries in the session history.
    pub fn history_len(&self) -> usize {
        self.state.borrow().entries.len()
    }

    pub fn pending_events(&self) -> usize {
        self.state.borrow().pending.len()
    }

    pub fn has_handler(&self, signal: Signal) -> bool {
        self.state.borrow().handlers.contains_key(&signal)
    }

    /// Deliver queued events in order. Returns how many were dequeued.
    ///
    /// Events queued by handlers while dispatching are delivered in the
    /// same call. Events for signals without a handler are dropped.
    pub fn dispatch_pending(&self) -> usize {
        let mut dispatched = 0;
        loop {
            let handler = {
                let mut state = self.state.borrow_mut();
                let Some(signal) = state.pending.pop_front() else {
                    break;
                };
                dispatched += 1;
                tracing::trace!(signal = %signal, "Dispatching host event");
                state.handlers.get(&signal).cloned()
            };

            if let Some(handler) = handler {
                handler();
            }
        }
        dispatched
    }

    /// Deliver `signal` immediately, as if the environment fired it.
    pub fn fire(&self, signal: Signal) {
        let handler = self.state.borrow().handlers.get(&signal).cloned();
        if let Some(handler) = handler {
            handler();
        }
    }

    /// Go back one entry. Returns `false` at the start of history.
    pub fn back(&self) -> bool {
        self.traverse(-1)
    }

    /// Go forward one entry. Returns `false` at the end of history.
    pub fn forward(&self) -> bool {
        self.traverse(1)
    }

    fn traverse(&self, delta: isize) -> bool {
        let mut state = self.state.borrow_mut();
        let Some(target) = state.index.checked_add_signed(delta) else {
            return false;
        };
        if target >= state.entries.len() {
            return false;
        }

        let fragment_changed = state.current().fragment() != state.entries[target].fragment();
        state.index = target;

        if state.push_state_supported {
            state.pending.push_back(Signal::PopState);
        }
        if fragment_changed {
            state.pending.push_back(Signal::HashChange);
        }
        true
    }
}

impl NavigationHost for MemoryHost {
    fn location(&self) -> Location {
        Location::from_url(self.state.borrow().current())
    }

    fn supports_push_state(&self) -> bool {
        self.state.borrow().push_state_supported
    }

    fn push_state(&self, path: &str) -> Result<()> {
        let mut state = self.state.borrow_mut();
        if !state.push_state_supported {
            return Err(HistoryError::Host("pushState is not available".to_string()));
        }

        let url = state
            .current()
            .join(path)
            .map_err(|e| HistoryError::Host(format!("Cannot push {path}: {e}")))?;
        if url.origin() != state.current().origin() {
            tracing::warn!(path = %path, "Refused cross-origin pushState");
            return Err(HistoryError::Host(format!(
                "SecurityError: {url} is not same-origin with {}",
                state.current()
            )));
        }
        state.push_entry(url);
        Ok(())
    }

    fn set_fragment(&self, fragment: &str) -> Result<()> {
        let fragment = fragment.strip_prefix(FRAGMENT_MARKER).unwrap_or(fragment);

        let mut state = self.state.borrow_mut();
        let mut url = state.current().clone();
        url.set_fragment(Some(fragment));
        if url == *state.current() {
            return Ok(());
        }

        state.push_entry(url);
        if state.push_state_supported {
            state.pending.push_back(Signal::PopState);
        }
        state.pending.push_back(Signal::HashChange);
        Ok(())
    }

    fn install_handler(&self, signal: Signal, handler: Handler) -> Result<()> {
        let previous = self.state.borrow_mut().handlers.insert(signal, handler);
        if previous.is_some() {
            tracing::debug!(signal = %signal, "Replaced existing host handler");
        }
        Ok(())
    }
}

impl fmt::Debug for MemoryHost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.borrow();
        f.debug_struct("MemoryHost")
            .field("href", &state.current().as_str())
            .field("index", &state.index)
            .field("entries", &state.entries.len())
            .field("push_state_supported", &state.push_state_supported)
            .field("pending", &state.pending)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::cell::Cell;

    #[test]
    fn test_push_state_resolves_against_current() {
        let host = MemoryHost::new("https://app.test/index.html#/old").unwrap();
        host.push_state("/inbox/3").unwrap();

        assert_eq!(host.href(), "https://app.test/inbox/3");
        assert_eq!(host.history_len(), 2);
        // pushState never signals.
        assert_eq!(host.pending_events(), 0);
    }

    #[test]
    fn test_push_state_unsupported() {
        let host = MemoryHost::legacy("https://app.test/").unwrap();
        assert!(matches!(host.push_state("/a"), Err(HistoryError::Host(_))));
    }

    #[test]
    fn test_push_state_rejects_cross_origin() {
        let host = MemoryHost::new("https://app.test/").unwrap();

        assert!(matches!(
            host.push_state("//other.test/x"),
            Err(HistoryError::Host(_))
        ));
        assert!(matches!(
            host.push_state("http://app.test/x"),
            Err(HistoryError::Host(_))
        ));
        assert_eq!(host.href(), "https://app.test/");
        assert_eq!(host.history_len(), 1);
    }

    #[test]
    fn test_set_fragment_queues_hashchange() {
        let host = MemoryHost::legacy("https://app.test/").unwrap();
        host.set_fragment("#/a").unwrap();

        assert_eq!(host.location(), Location::new("#/a", "/"));
        assert_eq!(host.pending_events(), 1);

        // Same fragment again is not a change.
        host.set_fragment("/a").unwrap();
        assert_eq!(host.pending_events(), 1);
        assert_eq!(host.history_len(), 2);
    }

    #[test]
    fn test_dispatch_pending_runs_handlers() {
        let host = MemoryHost::legacy("https://app.test/").unwrap();
        let calls = Rc::new(Cell::new(0));
        let counter = Rc::clone(&calls);
        host.install_handler(Signal::HashChange, Rc::new(move || counter.set(counter.get() + 1)))
            .unwrap();

        host.set_fragment("#/a").unwrap();
        host.set_fragment("#/b").unwrap();
        assert_eq!(calls.get(), 0);

        assert_eq!(host.dispatch_pending(), 2);
        assert_eq!(calls.get(), 2);
        assert_eq!(host.dispatch_pending(), 0);
    }

    #[test]
    fn test_install_replaces_handler() {
        let host = MemoryHost::new("https://app.test/").unwrap();
        let hits = Rc::new(RefCell::new(Vec::new()));

        let first = Rc::clone(&hits);
        host.install_handler(Signal::PopState, Rc::new(move || first.borrow_mut().push(1)))
            .unwrap();
        let second = Rc::clone(&hits);
        host.install_handler(Signal::PopState, Rc::new(move || second.borrow_mut().push(2)))
            .unwrap();

        host.fire(Signal::PopState);
        assert_eq!(*hits.borrow(), vec![2]);
    }

    #[test]
    fn test_traversal() {
        let host = MemoryHost::new("https://app.test/").unwrap();
        host.push_state("/a").unwrap();
        host.push_state("/b").unwrap();

        assert!(host.back());
        assert_eq!(host.href(), "https://app.test/a");
        assert_eq!(host.pending_events(), 1);

        assert!(host.back());
        assert!(!host.back());
        assert!(host.forward());
        assert!(host.forward());
        assert!(!host.forward());
        assert_eq!(host.href(), "https://app.test/b");
    }

    #[test]
    fn test_push_truncates_forward_entries() {
        let host = MemoryHost::new("https://app.test/").unwrap();
        host.push_state("/a").unwrap();
        host.push_state("/b").unwrap();
        host.back();
        host.push_state("/c").unwrap();

        assert_eq!(host.history_len(), 3);
        assert!(!host.forward());
    }

    #[test]
    fn test_invalid_href() {
        assert!(matches!(
            MemoryHost::new("nope"),
            Err(HistoryError::Address(AddressError::InvalidUrl(_)))
        ));
    }
}
