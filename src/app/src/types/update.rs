use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Body of `POST /api/update/{ip}`
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct UpdateResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Phase of the firmware update lifecycle of one device
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum UpdatePhase {
    #[default]
    Idle,
    AwaitingConfirmation,
    InFlight,
    Succeeded,
    Failed,
    NetworkError,
}

impl UpdatePhase {
    /// Phases in which the update button is offered to the user
    pub fn shows_button(self) -> bool {
        matches!(self, Self::Idle | Self::Failed | Self::NetworkError)
    }

    /// Phases that own an outstanding dialog or request
    pub fn is_pending(self) -> bool {
        matches!(self, Self::AwaitingConfirmation | Self::InFlight)
    }
}

/// Update state of a single device, created on the first update attempt
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct FirmwareUpdateState {
    pub phase: UpdatePhase,
    /// Button label before the attempt, restored after a failure
    pub original_label: String,
    /// Incremented per attempt; completions of older attempts are dropped
    pub attempt: u32,
}

/// Update states keyed by device IP, at most one per device
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct FirmwareUpdates(BTreeMap<String, FirmwareUpdateState>);

impl FirmwareUpdates {
    pub fn get(&self, ip: &str) -> Option<&FirmwareUpdateState> {
        self.0.get(ip)
    }

    pub fn get_mut(&mut self, ip: &str) -> Option<&mut FirmwareUpdateState> {
        self.0.get_mut(ip)
    }

    /// Phase of `ip`, `Idle` for devices never touched
    pub fn phase(&self, ip: &str) -> UpdatePhase {
        self.0.get(ip).map(|s| s.phase).unwrap_or_default()
    }

    pub fn entry(&mut self, ip: &str) -> &mut FirmwareUpdateState {
        self.0.entry(ip.to_string()).or_default()
    }

    /// Current state of `ip` if it is in `phase` for `attempt`
    pub fn matching(
        &mut self,
        ip: &str,
        attempt: u32,
        phase: UpdatePhase,
    ) -> Option<&mut FirmwareUpdateState> {
        self.0
            .get_mut(ip)
            .filter(|s| s.attempt == attempt && s.phase == phase)
    }

    /// Drop every state without an outstanding dialog or request
    pub fn retain_pending(&mut self) {
        self.0.retain(|_, state| state.phase.is_pending());
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn update_response_tolerates_missing_fields() {
        let response: UpdateResponse = serde_json::from_str(r#"{ "error": "Device not found" }"#)
            .expect("valid json");
        assert!(!response.success);
        assert_eq!(response.error.as_deref(), Some("Device not found"));
    }

    #[test]
    fn button_shown_only_when_actionable_or_failed() {
        assert!(UpdatePhase::Idle.shows_button());
        assert!(UpdatePhase::Failed.shows_button());
        assert!(UpdatePhase::NetworkError.shows_button());
        assert!(!UpdatePhase::AwaitingConfirmation.shows_button());
        assert!(!UpdatePhase::InFlight.shows_button());
        assert!(!UpdatePhase::Succeeded.shows_button());
    }

    #[test]
    fn untouched_device_is_idle() {
        let updates = FirmwareUpdates::default();
        assert_eq!(updates.phase("10.0.0.5"), UpdatePhase::Idle);
    }

    #[test]
    fn retain_pending_keeps_outstanding_attempts_only() {
        let mut updates = FirmwareUpdates::default();
        updates.entry("10.0.0.1").phase = UpdatePhase::InFlight;
        updates.entry("10.0.0.2").phase = UpdatePhase::Succeeded;
        updates.entry("10.0.0.3").phase = UpdatePhase::AwaitingConfirmation;
        updates.entry("10.0.0.4").phase = UpdatePhase::Failed;

        updates.retain_pending();

        assert_eq!(updates.len(), 2);
        assert_eq!(updates.phase("10.0.0.1"), UpdatePhase::InFlight);
        assert_eq!(updates.phase("10.0.0.3"), UpdatePhase::AwaitingConfirmation);
        assert!(updates.get("10.0.0.2").is_none());
    }

    #[test]
    fn matching_rejects_stale_attempts() {
        let mut updates = FirmwareUpdates::default();
        let state = updates.entry("10.0.0.1");
        state.phase = UpdatePhase::Failed;
        state.attempt = 2;

        assert!(updates.matching("10.0.0.1", 1, UpdatePhase::Failed).is_none());
        assert!(updates.matching("10.0.0.1", 2, UpdatePhase::InFlight).is_none());
        assert!(updates.matching("10.0.0.1", 2, UpdatePhase::Failed).is_some());
    }
}
