//! Day/night lighting state.
//!
//! The current mode is a plain value owned by the caller. `next_state` decides
//! the transition; `switch_lighting` applies it to a host and updates the
//! caller's value only after the host accepted it.

use crate::error::HostError;
use crate::host::SceneHost;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LightingMode {
    #[default]
    Day,
    Night,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LightingRequest {
    Day,
    Night,
    Toggle,
}

/// Mode that results from applying `requested` to `current`.
pub fn next_state(current: LightingMode, requested: LightingRequest) -> LightingMode {
    match requested {
        LightingRequest::Day => LightingMode::Day,
        LightingRequest::Night => LightingMode::Night,
        LightingRequest::Toggle => match current {
            LightingMode::Day => LightingMode::Night,
            LightingMode::Night => LightingMode::Day,
        },
    }
}

/// Apply `request` through `host`. Returns whether the mode changed.
///
/// The host is not called when the mode would stay the same.
pub async fn switch_lighting(
    host: &dyn SceneHost,
    mode: &mut LightingMode,
    request: LightingRequest,
) -> Result<bool, HostError> {
    let next = next_state(*mode, request);
    if next == *mode {
        return Ok(false);
    }
    host.set_lighting(next).await?;
    *mode = next;
    Ok(true)
}

impl fmt::Display for LightingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LightingMode::Day => write!(f, "day"),
            LightingMode::Night => write!(f, "night"),
        }
    }
}

impl FromStr for LightingMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "day" => Ok(LightingMode::Day),
            "night" => Ok(LightingMode::Night),
            _ => Err(format!("Invalid lighting mode '{}'. Valid options: day, night", s)),
        }
    }
}

impl FromStr for LightingRequest {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "day" => Ok(LightingRequest::Day),
            "night" => Ok(LightingRequest::Night),
            "toggle" => Ok(LightingRequest::Toggle),
            _ => Err(format!(
                "Invalid lighting request '{}'. Valid options: day, night, toggle",
                s
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::{DryRunHost, HostCall};

    #[test]
    fn test_next_state() {
        use LightingMode::*;

        assert_eq!(next_state(Day, LightingRequest::Day), Day);
        assert_eq!(next_state(Night, LightingRequest::Day), Day);
        assert_eq!(next_state(Day, LightingRequest::Night), Night);
        assert_eq!(next_state(Night, LightingRequest::Night), Night);
        assert_eq!(next_state(Day, LightingRequest::Toggle), Night);
        assert_eq!(next_state(Night, LightingRequest::Toggle), Day);
    }

    #[test]
    fn test_parse() {
        assert_eq!("NIGHT".parse::<LightingMode>().unwrap(), LightingMode::Night);
        assert_eq!("toggle".parse::<LightingRequest>().unwrap(), LightingRequest::Toggle);
        assert!("dusk".parse::<LightingMode>().is_err());
    }

    #[tokio::test]
    async fn test_switch_only_calls_host_on_change() {
        let host = DryRunHost::new();
        let mut mode = LightingMode::Day;

        assert!(!switch_lighting(&host, &mut mode, LightingRequest::Day).await.unwrap());
        assert!(host.calls().is_empty());

        assert!(switch_lighting(&host, &mut mode, LightingRequest::Toggle).await.unwrap());
        assert_eq!(mode, LightingMode::Night);
        assert_eq!(host.calls(), vec![HostCall::SetLighting { mode: LightingMode::Night }]);
    }

    #[tokio::test]
    async fn test_switch_keeps_state_on_host_failure() {
        let host = DryRunHost::new().unavailable();
        let mut mode = LightingMode::Day;

        assert!(switch_lighting(&host, &mut mode, LightingRequest::Night).await.is_err());
        assert_eq!(mode, LightingMode::Day);
    }
}
