use serde::{Deserialize, Serialize};

/// Outcome shown in the status line
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum ScanStatus {
    #[default]
    Ready,
    Scanning,
    Complete {
        count: usize,
    },
    Failed {
        error: String,
    },
}

/// Scan bookkeeping
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ScanState {
    pub in_progress: bool,
    /// Id of the most recent scan; responses carrying another id are stale
    pub scan_id: u64,
    pub status: ScanStatus,
}

impl ScanState {
    /// Mark a new scan as running and return its id
    pub fn begin(&mut self) -> u64 {
        self.scan_id += 1;
        self.in_progress = true;
        self.status = ScanStatus::Scanning;
        self.scan_id
    }

    /// Whether a completion for `scan_id` still belongs to the running scan
    pub fn is_current(&self, scan_id: u64) -> bool {
        self.in_progress && self.scan_id == scan_id
    }

    pub fn has_failed(&self) -> bool {
        matches!(self.status, ScanStatus::Failed { .. })
    }
}
