use serde::{Deserialize, Serialize};

use crate::types::*;

/// Events that can happen in the app
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub enum Event {
    /// Sent once by the shell at startup with the browser locale, if any
    Initialize { language: Option<String> },
    Configure(CoreConfig),

    Scan(ScanEvent),
    Table(TableEvent),
    Firmware(FirmwareEvent),
    I18n(I18nEvent),
}

/// Scan controller events
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub enum ScanEvent {
    StartScan,

    // Internal events, skipped from serialization
    #[serde(skip)]
    ScanResponse {
        scan_id: u64,
        result: Result<Vec<Device>, ScanError>,
    },
    #[serde(skip)]
    ScanTimeout { scan_id: u64 },
    /// Follow-up scan after a successful firmware update
    #[serde(skip)]
    RefreshDue,
}

/// Device table events
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub enum TableEvent {
    SortBy(SortColumn),
}

/// Firmware update lifecycle events, all addressed by device IP
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub enum FirmwareEvent {
    UpdateFirmware { ip: String },

    // Internal events, skipped from serialization
    #[serde(skip)]
    ConfirmationAnswered {
        ip: String,
        attempt: u32,
        confirmed: bool,
    },
    #[serde(skip)]
    UpdateResponse {
        ip: String,
        attempt: u32,
        result: Result<(), UpdateError>,
    },
    #[serde(skip)]
    UpdateTimeout { ip: String, attempt: u32 },
    #[serde(skip)]
    AlertDismissed { ip: String, attempt: u32 },
    #[serde(skip)]
    ResetDue { ip: String, attempt: u32 },
}

/// Which part of the translation loading sequence a fetch belongs to
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum LoadStage {
    Fallback,
    Preferred,
    Switch,
}

/// Text resolver events
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub enum I18nEvent {
    SetLanguage { language: String },

    #[serde(skip)]
    TranslationsLoaded {
        language: String,
        stage: LoadStage,
        result: Result<TranslationTable, TranslationError>,
    },
}
