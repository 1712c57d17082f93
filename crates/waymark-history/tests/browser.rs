#![cfg(target_arch = "wasm32")]

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen_test::*;
use waymark_history::{AddressWatcher, BrowserHost, Mode, ModePreference, NavigationHost};

wasm_bindgen_test_configure!(run_in_browser);

#[wasm_bindgen_test]
fn native_history_notifies_synchronously() {
    let host = BrowserHost::new().unwrap();
    assert!(host.supports_push_state());

    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    let (watcher, _) =
        AddressWatcher::init(host, move |address| sink.borrow_mut().push(address.to_string()))
            .unwrap();
    assert_eq!(watcher.mode(), Mode::NativeHistory);

    watcher.set_path("/waymark/one").unwrap();
    assert_eq!(*seen.borrow(), vec!["/waymark/one".to_string()]);
    assert_eq!(watcher.path_segments(), vec!["waymark", "one"]);
}

#[wasm_bindgen_test]
fn fragment_fallback_updates_hash() {
    let host = BrowserHost::new().unwrap();
    let watcher = AddressWatcher::with_preference(host, ModePreference::FragmentFallback).unwrap();

    watcher.set_path("/waymark/two").unwrap();
    assert_eq!(watcher.host().location().fragment, "#/waymark/two");
    assert_eq!(watcher.path(), "/waymark/two");
}

#[wasm_bindgen_test]
fn dropping_replaced_host_keeps_newer_handler() {
    let window = web_sys::window().unwrap();

    let first = AddressWatcher::new(BrowserHost::new().unwrap()).unwrap();
    let second = AddressWatcher::new(BrowserHost::new().unwrap()).unwrap();
    assert_eq!(second.mode(), Mode::NativeHistory);

    drop(first);
    assert!(window.onpopstate().is_some());

    drop(second);
    assert!(window.onpopstate().is_none());
}
