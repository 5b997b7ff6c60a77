use std::cmp::Ordering;

use serde::{Deserialize, Deserializer, Serialize};

fn default_generation() -> u32 {
    1
}

/// Read `null` as the type's default. Unnamed devices report `"name": null`.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// A device as reported by the scan service
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Device {
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(rename = "type", deserialize_with = "null_as_default")]
    pub device_type: String,
    pub ip: String,
    #[serde(deserialize_with = "null_as_default")]
    pub mac: String,
    #[serde(deserialize_with = "null_as_default")]
    pub fw: String,
    #[serde(default = "default_generation", deserialize_with = "null_as_default")]
    pub generation: u32,
    #[serde(deserialize_with = "null_as_default")]
    pub auth: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub has_update: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub can_update: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub latest_version: String,
}

impl Device {
    /// Generation with the same fallback the scan service applies: 0 counts as 1
    pub fn effective_generation(&self) -> u32 {
        self.generation.max(1)
    }

    /// Whether a firmware update may be triggered from the UI right now
    pub fn is_updatable(&self) -> bool {
        self.has_update && self.can_update
    }
}

/// Sortable columns of the device table, in display order
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub enum SortColumn {
    #[default]
    Name,
    Type,
    Generation,
    Ip,
    Mac,
    Fw,
    Auth,
}

impl SortColumn {
    pub const ALL: [SortColumn; 7] = [
        SortColumn::Name,
        SortColumn::Type,
        SortColumn::Generation,
        SortColumn::Ip,
        SortColumn::Mac,
        SortColumn::Fw,
        SortColumn::Auth,
    ];

    /// Translation key of the column header
    pub fn header_key(self) -> &'static str {
        match self {
            Self::Name => "table_header_name",
            Self::Type => "table_header_type",
            Self::Generation => "table_header_gen",
            Self::Ip => "table_header_ip",
            Self::Mac => "table_header_mac",
            Self::Fw => "table_header_fw",
            Self::Auth => "table_header_auth",
        }
    }

    /// Ascending comparison of two devices on this column
    pub fn compare(self, a: &Device, b: &Device) -> Ordering {
        fn text(a: &str, b: &str) -> Ordering {
            a.to_lowercase().cmp(&b.to_lowercase())
        }

        match self {
            Self::Name => text(&a.name, &b.name),
            Self::Type => text(&a.device_type, &b.device_type),
            Self::Generation => a.effective_generation().cmp(&b.effective_generation()),
            Self::Ip => text(&a.ip, &b.ip),
            Self::Mac => text(&a.mac, &b.mac),
            Self::Fw => text(&a.fw, &b.fw),
            // false < true, i.e. 0/1
            Self::Auth => a.auth.cmp(&b.auth),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn flipped(self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }
}

/// User-controlled ordering of the device table
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SortState {
    pub column: SortColumn,
    pub direction: SortDirection,
}

impl SortState {
    /// Same column flips the direction, a new column starts ascending
    pub fn toggle(&mut self, column: SortColumn) {
        if self.column == column {
            self.direction = self.direction.flipped();
        } else {
            self.column = column;
            self.direction = SortDirection::Ascending;
        }
    }

    pub fn compare(&self, a: &Device, b: &Device) -> Ordering {
        let ordering = self.column.compare(a, b);
        match self.direction {
            SortDirection::Ascending => ordering,
            // reverse() keeps Equal as Equal
            SortDirection::Descending => ordering.reverse(),
        }
    }
}

/// The device collection of the last successful scan plus the sort order
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct DeviceTable {
    devices: Vec<Device>,
    sort: SortState,
}

impl DeviceTable {
    /// Replace the collection wholesale, keeping the sort state
    pub fn set_devices(&mut self, devices: Vec<Device>) {
        self.devices = devices;
    }

    pub fn set_sort(&mut self, column: SortColumn) {
        self.sort.toggle(column);
    }

    pub fn sort(&self) -> SortState {
        self.sort
    }

    /// Devices in display order; the stored order is left untouched.
    ///
    /// `sort_by` is stable, so ties keep the order of the last `set_devices`.
    pub fn sorted_view(&self) -> Vec<&Device> {
        let mut view: Vec<&Device> = self.devices.iter().collect();
        view.sort_by(|a, b| self.sort.compare(a, b));
        view
    }

    pub fn device(&self, ip: &str) -> Option<&Device> {
        self.devices.iter().find(|d| d.ip == ip)
    }

    pub fn devices(&self) -> &[Device] {
        &self.devices
    }

    pub fn len(&self) -> usize {
        self.devices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.devices.is_empty()
    }
}
