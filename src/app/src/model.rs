use crate::types::*;

/// Application Model - the complete state.
///
/// The shell never sees it directly; `crate::view` projects it into a
/// `ViewModel`.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Model {
    pub config: CoreConfig,

    // Text resolver state
    pub text: TextResolver,
    pub preferred_language: Option<String>,
    pub translations_ready: bool,

    // Device list state
    pub table: DeviceTable,
    pub scan: ScanState,

    // Firmware update state per device IP
    pub updates: FirmwareUpdates,
}

impl Model {
    /// Phase of the firmware update of `ip`
    pub fn update_phase(&self, ip: &str) -> UpdatePhase {
        self.updates.phase(ip)
    }
}
