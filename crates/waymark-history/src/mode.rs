//! Navigation mechanism selection

use serde::{Deserialize, Serialize};
use std::fmt;

use waymark_address::FRAGMENT_MARKER;

use crate::error::HistoryError;
use crate::host::{NavigationHost, Signal};
use crate::Result;

/// Mechanism a watcher drives. Chosen once, never changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    NativeHistory,
    FragmentFallback,
}

/// Requested mechanism, as read from configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModePreference {
    /// Native history when the host supports it, fragments otherwise.
    #[default]
    Auto,
    NativeHistory,
    FragmentFallback,
}

impl Mode {
    /// Feature detection.
    pub fn detect<H: NavigationHost + ?Sized>(host: &H) -> Self {
        if host.supports_push_state() {
            Mode::NativeHistory
        } else {
            Mode::FragmentFallback
        }
    }

    /// Resolve a preference against what the host can do.
    ///
    /// Forcing fragments always works; forcing native history on a host
    /// without push state fails.
    pub fn resolve<H: NavigationHost + ?Sized>(
        preference: ModePreference,
        host: &H,
    ) -> Result<Self> {
        match preference {
            ModePreference::Auto => Ok(Self::detect(host)),
            ModePreference::FragmentFallback => Ok(Mode::FragmentFallback),
            ModePreference::NativeHistory if host.supports_push_state() => {
                Ok(Mode::NativeHistory)
            }
            ModePreference::NativeHistory => Err(HistoryError::Unsupported(Mode::NativeHistory)),
        }
    }

    /// The host signal this mode listens on.
    pub fn signal(&self) -> Signal {
        match self {
            Mode::NativeHistory => Signal::PopState,
            Mode::FragmentFallback => Signal::HashChange,
        }
    }

    /// Change the address through this mode's mechanism.
    ///
    /// Returns `true` when the host will not signal the change itself and
    /// the caller has to notify listeners right away.
    pub(crate) fn set_address<H: NavigationHost + ?Sized>(
        &self,
        host: &H,
        path: &str,
    ) -> Result<bool> {
        match self {
            Mode::NativeHistory => {
                host.push_state(path)?;
                Ok(true)
            }
            Mode::FragmentFallback => {
                host.set_fragment(&format!("{FRAGMENT_MARKER}{path}"))?;
                Ok(false)
            }
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::NativeHistory => "native_history",
            Mode::FragmentFallback => "fragment_fallback",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
