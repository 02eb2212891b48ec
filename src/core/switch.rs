use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SwitchState {
    On,
    Off,
}

impl From<bool> for SwitchState {
    fn from(is_on: bool) -> Self {
        if is_on { Self::On } else { Self::Off }
    }
}

impl SwitchState {
    /// Parse a toggleable entity state, `None` for anything but `on` and `off`.
    #[must_use]
    pub fn from_state(state: &str) -> Option<Self> {
        match state {
            "on" => Some(Self::On),
            "off" => Some(Self::Off),
            _ => None,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::On => "on",
            Self::Off => "off",
        }
    }
}

impl Display for SwitchState {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Controlled device as last seen.
#[derive(Clone, Debug)]
pub struct Device {
    /// `None` when the device reports neither `on` nor `off`, for example `unavailable`.
    pub state: Option<SwitchState>,

    pub friendly_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_state_ok() {
        assert_eq!(SwitchState::from_state("on"), Some(SwitchState::On));
        assert_eq!(SwitchState::from_state("off"), Some(SwitchState::Off));
        assert_eq!(SwitchState::from_state("unavailable"), None);
    }

    #[test]
    fn serialize_ok() -> crate::prelude::Result {
        assert_eq!(serde_json::to_string(&SwitchState::Off)?, r#""off""#);
        Ok(())
    }
}
