//! Marker stripping and segment splitting

/// Character that introduces a fragment identifier.
pub const FRAGMENT_MARKER: char = '#';

/// Path separator.
pub const SEPARATOR: char = '/';

/// Remove every fragment marker from `raw`.
pub fn strip_markers(raw: &str) -> String {
    raw.replace(FRAGMENT_MARKER, "")
}

/// Split an address on `/`, dropping the leading root segment.
///
/// `/a/b/c` gives `["a", "b", "c"]`, `/` gives `[""]` and an empty
/// address gives no segments at all. Markers are stripped first.
pub fn split_segments(address: &str) -> Vec<String> {
    let address = strip_markers(address);
    if address.is_empty() {
        return Vec::new();
    }

    address
        .split(SEPARATOR)
        .skip(1)
        .map(str::to_string)
        .collect()
}
