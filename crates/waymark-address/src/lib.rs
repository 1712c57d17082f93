//! Waymark Address
//!
//! Computes the application "address" from a location snapshot:
//! the fragment identifier when one is set, otherwise the path,
//! with fragment markers stripped.

mod error;
mod location;
mod segments;

pub use error::AddressError;
pub use location::Location;
pub use segments::{split_segments, strip_markers, FRAGMENT_MARKER, SEPARATOR};

pub type Result<T> = std::result::Result<T, AddressError>;
