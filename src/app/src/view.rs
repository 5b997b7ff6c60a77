//! Render projector: pure mapping from `Model` to `ViewModel`.

use crate::model::Model;
use crate::types::*;

/// Escape `& < > " '` so device-supplied text can be injected as markup
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#039;"),
            c => escaped.push(c),
        }
    }
    escaped
}

pub fn project_view(model: &Model) -> ViewModel {
    let text = &model.text;

    ViewModel {
        app_title: text.t("app_title"),
        page_title: text.t("page_title"),
        scan_button: ScanButton {
            label: text.t("scan_button"),
            disabled: model.scan.in_progress,
        },
        status_text: status_text(model),
        table: project_table(model),
        active_language: text.active_language().to_string(),
        available_languages: text.available_languages(),
        ready: model.translations_ready,
    }
}

fn status_text(model: &Model) -> String {
    let text = &model.text;
    match &model.scan.status {
        ScanStatus::Ready => text.t("scan_status_ready"),
        ScanStatus::Scanning => text.t("scan_status_scanning"),
        ScanStatus::Complete { count } => {
            text.resolve("scan_status_complete", &[("count", count.to_string().as_str())])
        }
        ScanStatus::Failed { error } => {
            text.resolve("scan_status_error", &[("error", escape_html(error).as_str())])
        }
    }
}

fn project_table(model: &Model) -> TableView {
    let empty = |kind, key| {
        TableView::Empty(EmptyState {
            kind,
            message: model.text.t(key),
        })
    };

    if model.scan.in_progress {
        empty(EmptyKind::Loading, "loading_message")
    } else if model.scan.has_failed() {
        empty(EmptyKind::ScanError, "error_occurred")
    } else if model.table.is_empty() {
        empty(EmptyKind::NoDevices, "no_devices_found")
    } else {
        TableView::Devices {
            columns: project_columns(model),
            rows: project_rows(model),
        }
    }
}

fn project_columns(model: &Model) -> Vec<ColumnHeader> {
    let sort = model.table.sort();

    SortColumn::ALL
        .iter()
        .map(|&column| ColumnHeader {
            column,
            label: model.text.t(column.header_key()),
            indicator: match sort.direction {
                _ if sort.column != column => SortIndicator::Sortable,
                SortDirection::Ascending => SortIndicator::SortAsc,
                SortDirection::Descending => SortIndicator::SortDesc,
            },
        })
        .collect()
}

/// Rows in current sort order
pub fn project_rows(model: &Model) -> Vec<DeviceRow> {
    model
        .table
        .sorted_view()
        .into_iter()
        .map(|device| project_row(model, device))
        .collect()
}

pub fn project_row(model: &Model, device: &Device) -> DeviceRow {
    let text = &model.text;
    let state = model.updates.get(&device.ip);
    let phase = state.map(|s| s.phase).unwrap_or_default();
    let ip = escape_html(&device.ip);

    let tooltip = match (device.has_update, device.can_update) {
        (true, true) => text.resolve(
            "fw_update_to",
            &[("version", escape_html(&device.latest_version).as_str())],
        ),
        (true, false) => text.t("fw_set_password"),
        (false, _) => text.t("fw_latest"),
    };

    let update_button = device.is_updatable().then(|| {
        let original = state
            .map(|s| s.original_label.clone())
            .filter(|label| !label.is_empty())
            .unwrap_or_else(|| text.t("fw_update_btn"));
        update_button(phase, original, text)
    });

    let auth_key = if device.auth {
        "auth_enabled"
    } else {
        "auth_disabled"
    };

    DeviceRow {
        key: device.ip.clone(),
        name: escape_html(&device.name),
        device_type: escape_html(&device.device_type),
        generation: format!(
            "{}{}",
            text.t("gen_prefix"),
            device.effective_generation()
        ),
        ip_href: format!("http://{ip}"),
        ip,
        mac: escape_html(&device.mac),
        fw: escape_html(&device.fw),
        fw_class: if device.has_update {
            FirmwareClass::FwOutdated
        } else {
            FirmwareClass::FwLatest
        },
        tooltip,
        update_button_visible: device.is_updatable() && phase.shows_button(),
        update_button,
        auth_badge: AuthBadge {
            label: text.t(auth_key),
            enabled: device.auth,
        },
    }
}

fn update_button(phase: UpdatePhase, original_label: String, text: &TextResolver) -> UpdateButton {
    let (label, style) = match phase {
        UpdatePhase::Idle | UpdatePhase::AwaitingConfirmation => {
            (original_label, ButtonStyle::Default)
        }
        UpdatePhase::InFlight => (text.t("fw_updating"), ButtonStyle::Default),
        UpdatePhase::Succeeded => (text.t("fw_updated"), ButtonStyle::Success),
        UpdatePhase::Failed => (text.t("fw_failed"), ButtonStyle::Danger),
        UpdatePhase::NetworkError => (text.t("fw_error"), ButtonStyle::Danger),
    };

    UpdateButton {
        label,
        style,
        disabled: phase != UpdatePhase::Idle,
    }
}
