//! Display description produced by the projector in `crate::view`.
//!
//! Device-supplied strings in these types are already HTML-escaped, so a shell
//! may inject them as markup.

use serde::{Deserialize, Serialize};

use super::SortColumn;

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ViewModel {
    pub app_title: String,
    pub page_title: String,
    pub scan_button: ScanButton,
    pub status_text: String,
    pub table: TableView,
    pub active_language: String,
    pub available_languages: Vec<String>,
    /// False until the initial translation load finished
    pub ready: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ScanButton {
    pub label: String,
    pub disabled: bool,
}

/// The table area: either rows or a placeholder replacing the table
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum TableView {
    Empty(EmptyState),
    Devices {
        columns: Vec<ColumnHeader>,
        rows: Vec<DeviceRow>,
    },
}

impl Default for TableView {
    fn default() -> Self {
        Self::Empty(EmptyState::default())
    }
}

impl TableView {
    pub fn rows(&self) -> &[DeviceRow] {
        match self {
            Self::Devices { rows, .. } => rows,
            Self::Empty(_) => &[],
        }
    }

    pub fn row(&self, ip: &str) -> Option<&DeviceRow> {
        self.rows().iter().find(|r| r.key == ip)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct EmptyState {
    pub kind: EmptyKind,
    pub message: String,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum EmptyKind {
    #[default]
    Loading,
    NoDevices,
    ScanError,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum SortIndicator {
    #[default]
    Sortable,
    SortAsc,
    SortDesc,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ColumnHeader {
    pub column: SortColumn,
    pub label: String,
    pub indicator: SortIndicator,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum FirmwareClass {
    #[default]
    FwLatest,
    FwOutdated,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum ButtonStyle {
    #[default]
    Default,
    Success,
    Danger,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct UpdateButton {
    pub label: String,
    pub style: ButtonStyle,
    pub disabled: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct AuthBadge {
    pub label: String,
    pub enabled: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct DeviceRow {
    /// Raw device IP, used by the shell to address `UpdateFirmware`
    pub key: String,
    pub name: String,
    pub device_type: String,
    pub generation: String,
    pub ip: String,
    pub ip_href: String,
    pub mac: String,
    pub fw: String,
    pub fw_class: FirmwareClass,
    pub tooltip: String,
    /// Whether the update affordance is offered
    pub update_button_visible: bool,
    /// Button element state; present for every updatable device so progress
    /// labels ("updating", "updated") can be shown while the affordance is hidden
    pub update_button: Option<UpdateButton>,
    pub auth_badge: AuthBadge,
}
