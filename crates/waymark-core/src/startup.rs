//! Application startup

use waymark_history::{AddressWatcher, NavigationHost};

use crate::config::Config;
use crate::Result;

/// Build the application's watcher and register its first listener.
///
/// Call once; clone the returned watcher to share it.
pub fn start<H, F>(host: H, config: &Config, callback: F) -> Result<AddressWatcher<H>>
where
    H: NavigationHost + 'static,
    F: Fn(&str) + 'static,
{
    let watcher = AddressWatcher::with_preference(host, config.mode)?;
    let id = watcher.add_listener(callback);

    tracing::info!(mode = %watcher.mode(), listener = %id, "Waymark started");

    if config.notify_on_start {
        watcher.notify();
    }

    Ok(watcher)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CoreError;
    use pretty_assertions::assert_eq;
    use std::cell::RefCell;
    use std::rc::Rc;
    use waymark_history::{HistoryError, MemoryHost, Mode, ModePreference};

    fn sink() -> (Rc<RefCell<Vec<String>>>, impl Fn(&str) + 'static) {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let inner = Rc::clone(&seen);
        (seen, move |address: &str| {
            inner.borrow_mut().push(address.to_string())
        })
    }

    #[test]
    fn test_start_defaults() {
        let host = MemoryHost::new("https://app.test/home").unwrap();
        let (seen, callback) = sink();
        let watcher = start(host, &Config::default(), callback).unwrap();

        assert_eq!(watcher.mode(), Mode::NativeHistory);
        assert!(seen.borrow().is_empty());

        watcher.set_path("/away").unwrap();
        assert_eq!(*seen.borrow(), vec!["/away"]);
    }

    #[test]
    fn test_start_notifies_current_address() {
        let host = MemoryHost::legacy("https://app.test/#/deep/link").unwrap();
        let (seen, callback) = sink();
        let config = Config {
            notify_on_start: true,
            ..Config::default()
        };
        let watcher = start(host, &config, callback).unwrap();

        assert_eq!(watcher.mode(), Mode::FragmentFallback);
        assert_eq!(*seen.borrow(), vec!["/deep/link"]);
    }

    #[test]
    fn test_start_rejects_unsupported_mode() {
        let host = MemoryHost::legacy("https://app.test/").unwrap();
        let config = Config {
            mode: ModePreference::NativeHistory,
            ..Config::default()
        };

        assert!(matches!(
            start(host, &config, |_| {}),
            Err(CoreError::History(HistoryError::Unsupported(Mode::NativeHistory)))
        ));
    }
}
