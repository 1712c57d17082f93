//! Address watcher
//!
//! Owns the listener registry and the selected [`Mode`]. Clone the
//! watcher to hand it to other parts of the application; all clones
//! share the same listeners.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use crate::host::{Handler, NavigationHost};
use crate::listeners::{ListenerId, ListenerRegistry};
use crate::mode::{Mode, ModePreference};
use crate::Result;

struct Inner<H> {
    host: H,
    mode: Mode,
    listeners: RefCell<ListenerRegistry>,
}

impl<H: NavigationHost> Inner<H> {
    fn notify(&self) {
        let address = self.host.location().address();
        // Listeners may add or remove listeners; those changes apply
        // from the next notification on.
        let listeners = self.listeners.borrow().snapshot();

        tracing::trace!(address = %address, listeners = listeners.len(), "Address changed");

        for listener in listeners {
            listener(&address);
        }
    }
}

pub struct AddressWatcher<H: NavigationHost> {
    inner: Rc<Inner<H>>,
}

impl<H: NavigationHost + 'static> AddressWatcher<H> {
    /// Detect the mode and hook the matching host signal.
    pub fn new(host: H) -> Result<Self> {
        Self::with_preference(host, ModePreference::Auto)
    }

    pub fn with_preference(host: H, preference: ModePreference) -> Result<Self> {
        let mode = Mode::resolve(preference, &host)?;
        let inner = Rc::new(Inner {
            host,
            mode,
            listeners: RefCell::new(ListenerRegistry::new()),
        });

        // Weak so host events after the last watcher is dropped do nothing.
        let weak: Weak<Inner<H>> = Rc::downgrade(&inner);
        let handler: Handler = Rc::new(move || {
            if let Some(inner) = weak.upgrade() {
                inner.notify();
            }
        });
        inner.host.install_handler(mode.signal(), handler)?;

        tracing::debug!(mode = %mode, signal = %mode.signal(), "Address watcher installed");

        Ok(Self { inner })
    }

    /// Build a watcher and register its first listener.
    pub fn init<F>(host: H, callback: F) -> Result<(Self, ListenerId)>
    where
        F: Fn(&str) + 'static,
    {
        let watcher = Self::new(host)?;
        let id = watcher.add_listener(callback);
        Ok((watcher, id))
    }
}

impl<H: NavigationHost> AddressWatcher<H> {
    pub fn mode(&self) -> Mode {
        self.inner.mode
    }

    pub fn host(&self) -> &H {
        &self.inner.host
    }

    /// Register a listener. It is notified after every listener
    /// registered before it.
    pub fn add_listener<F>(&self, listener: F) -> ListenerId
    where
        F: Fn(&str) + 'static,
    {
        let id = self.inner.listeners.borrow_mut().add(Rc::new(listener));
        tracing::debug!(listener = %id, "Listener added");
        id
    }

    /// Remove a listener by handle. Returns whether it was registered.
    pub fn remove_listener(&self, id: ListenerId) -> bool {
        let removed = self.inner.listeners.borrow_mut().remove(id);
        tracing::debug!(listener = %id, removed, "Listener removed");
        removed
    }

    /// Remove the listener at `index`.
    ///
    /// Indices shift after every removal, so an index captured before an
    /// earlier removal may now name a different listener. Out-of-range
    /// indices are ignored.
    pub fn remove_listener_at(&self, index: usize) -> bool {
        let removed = self.inner.listeners.borrow_mut().remove_at(index);
        tracing::debug!(index, removed, "Listener removed by position");
        removed
    }

    pub fn listener_count(&self) -> usize {
        self.inner.listeners.borrow().len()
    }

    /// Notify every listener of the current address, in registration order.
    ///
    /// A panicking listener is not caught; listeners after it are skipped.
    pub fn notify(&self) {
        self.inner.notify();
    }

    /// Current address, with fragment markers stripped. Empty when the
    /// host has no address information.
    pub fn path(&self) -> String {
        self.inner.host.location().address()
    }

    /// Address segments after the root.
    pub fn path_segments(&self) -> Vec<String> {
        self.inner.host.location().segments()
    }

    /// Change the address through the selected mechanism.
    ///
    /// With native history, listeners run before this returns. With the
    /// fragment fallback they run when the host delivers `hashchange`.
    pub fn set_path(&self, path: &str) -> Result<()> {
        let notify_now = self
            .inner
            .mode
            .set_address(&self.inner.host, path)
            .inspect_err(|e| tracing::warn!(path = %path, error = %e, "Failed to set address"))?;

        if notify_now {
            self.inner.notify();
        }
        Ok(())
    }
}

impl<H: NavigationHost> Clone for AddressWatcher<H> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<H: NavigationHost> fmt::Debug for AddressWatcher<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AddressWatcher")
            .field("mode", &self.inner.mode)
            .field("listeners", &self.inner.listeners.borrow())
            .finish()
    }
}
