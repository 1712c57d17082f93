//! Location snapshots

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::AddressError;
use crate::segments::{split_segments, strip_markers, FRAGMENT_MARKER};
use crate::Result;

/// The navigation state a host reports at one instant.
///
/// `fragment` carries its leading `#` the way browsers report
/// `location.hash`, and is empty when no fragment is set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub fragment: String,
    pub path: String,
}

impl Location {
    pub fn new(fragment: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            fragment: fragment.into(),
            path: path.into(),
        }
    }

    /// Build a snapshot from a parsed URL.
    pub fn from_url(url: &Url) -> Self {
        let fragment = match url.fragment() {
            Some(f) if !f.is_empty() => format!("{FRAGMENT_MARKER}{f}"),
            _ => String::new(),
        };

        Self {
            fragment,
            path: url.path().to_string(),
        }
    }

    /// Parse an absolute href into a snapshot.
    pub fn parse(href: &str) -> Result<Self> {
        let url = Url::parse(href).map_err(|e| AddressError::InvalidUrl(format!("{href}: {e}")))?;
        Ok(Self::from_url(&url))
    }

    /// The raw address: the fragment if set, otherwise the path.
    pub fn raw_address(&self) -> &str {
        if self.fragment.is_empty() {
            &self.path
        } else {
            &self.fragment
        }
    }

    /// The address with fragment markers stripped.
    pub fn address(&self) -> String {
        strip_markers(self.raw_address())
    }

    /// Address segments after the root.
    pub fn segments(&self) -> Vec<String> {
        split_segments(self.raw_address())
    }
}
