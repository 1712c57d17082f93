//! Watcher configuration

use serde::{Deserialize, Serialize};

use waymark_history::ModePreference;

use crate::Result;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Which navigation mechanism to drive
    pub mode: ModePreference,
    /// Notify the startup listener with the current address right away
    /// instead of waiting for the first change
    pub notify_on_start: bool,
}

impl Config {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
