//! Browser host over `web-sys`

use std::cell::RefCell;
use std::collections::HashMap;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use waymark_address::Location;

use crate::error::HistoryError;
use crate::host::{Handler, NavigationHost, Signal};
use crate::Result;

fn js_error(context: &str, err: JsValue) -> HistoryError {
    HistoryError::Host(format!("{context}: {err:?}"))
}

/// The page's `window`.
///
/// Handlers go into the `onpopstate` / `onhashchange` slots, so each
/// signal holds one handler and a new one replaces the old. The closures
/// live as long as the host; dropping the host clears the slots it still
/// occupies.
pub struct BrowserHost {
    window: web_sys::Window,
    closures: RefCell<HashMap<Signal, Closure<dyn FnMut()>>>,
}

impl BrowserHost {
    pub fn new() -> Result<Self> {
        let window =
            web_sys::window().ok_or_else(|| HistoryError::Host("No global window".to_string()))?;

        Ok(Self {
            window,
            closures: RefCell::new(HashMap::new()),
        })
    }

    fn set_slot(&self, signal: Signal, function: Option<&js_sys::Function>) {
        match signal {
            Signal::PopState => self.window.set_onpopstate(function),
            Signal::HashChange => self.window.set_onhashchange(function),
        }
    }

    fn slot(&self, signal: Signal) -> Option<js_sys::Function> {
        match signal {
            Signal::PopState => self.window.onpopstate(),
            Signal::HashChange => self.window.onhashchange(),
        }
    }
}

impl NavigationHost for BrowserHost {
    fn location(&self) -> Location {
        let location = self.window.location();
        let fragment = location.hash().unwrap_or_else(|e| {
            tracing::warn!(error = ?e, "Cannot read location.hash");
            String::new()
        });
        let path = location.pathname().unwrap_or_else(|e| {
            tracing::warn!(error = ?e, "Cannot read location.pathname");
            String::new()
        });
        Location::new(fragment, path)
    }

    fn supports_push_state(&self) -> bool {
        match self.window.history() {
            Ok(history) => {
                js_sys::Reflect::has(&history, &JsValue::from_str("pushState")).unwrap_or(false)
            }
            Err(_) => false,
        }
    }

    fn push_state(&self, path: &str) -> Result<()> {
        let history = self
            .window
            .history()
            .map_err(|e| js_error("window.history", e))?;
        history
            .push_state_with_url(&JsValue::NULL, "", Some(path))
            .map_err(|e| js_error("history.pushState", e))
    }

    fn set_fragment(&self, fragment: &str) -> Result<()> {
        self.window
            .location()
            .set_hash(fragment)
            .map_err(|e| js_error("location.hash", e))
    }

    fn install_handler(&self, signal: Signal, handler: Handler) -> Result<()> {
        let closure = Closure::<dyn FnMut()>::new(move || handler());
        self.set_slot(signal, Some(closure.as_ref().unchecked_ref()));
        self.closures.borrow_mut().insert(signal, closure);
        Ok(())
    }
}

impl Drop for BrowserHost {
    fn drop(&mut self) {
        let closures = self.closures.borrow();
        for (signal, closure) in closures.iter() {
            // Leave slots another host has taken over since.
            let owned = self
                .slot(*signal)
                .is_some_and(|current| JsValue::from(current) == *closure.as_ref());
            if owned {
                self.set_slot(*signal, None);
            }
        }
    }
}
