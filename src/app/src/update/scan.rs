use crux_core::{render::render, Command};

use crate::events::{Event, ScanEvent};
use crate::http_get;
use crate::http_helpers::{build_url, process_scan_response};
use crate::model::Model;
use crate::notify_after;
use crate::types::{Device, ScanError, ScanStatus};
use crate::Effect;

pub const SCAN_ENDPOINT: &str = "/api/scan";

/// Handle scan controller events
pub fn handle(event: ScanEvent, model: &mut Model) -> Command<Effect, Event> {
    match event {
        ScanEvent::StartScan => start_scan(model),
        ScanEvent::RefreshDue => {
            log::info!("refreshing device list after firmware update");
            start_scan(model)
        }
        ScanEvent::ScanResponse { scan_id, result } => finish_scan(scan_id, result, model),
        ScanEvent::ScanTimeout { scan_id } => {
            let secs = model.config.scan_timeout_ms / 1000;
            finish_scan(scan_id, Err(ScanError::TimedOut(secs)), model)
        }
    }
}

/// Request the device list unless a scan is already running
pub fn start_scan(model: &mut Model) -> Command<Effect, Event> {
    if model.scan.in_progress {
        log::debug!("scan {} still in progress, ignoring request", model.scan.scan_id);
        return Command::done();
    }

    let scan_id = model.scan.begin();
    log::info!("starting scan {scan_id}");

    Command::all([
        render(),
        http_get!(build_url(SCAN_ENDPOINT), |result| Event::Scan(
            ScanEvent::ScanResponse {
                scan_id,
                result: process_scan_response(result),
            }
        )),
        notify_after!(
            model.config.scan_timeout_ms,
            Event::Scan(ScanEvent::ScanTimeout { scan_id })
        ),
    ])
}

fn finish_scan(
    scan_id: u64,
    result: Result<Vec<Device>, ScanError>,
    model: &mut Model,
) -> Command<Effect, Event> {
    if !model.scan.is_current(scan_id) {
        log::debug!("discarding completion of stale scan {scan_id}");
        return Command::done();
    }

    model.scan.in_progress = false;
    match result {
        Ok(devices) => {
            log::info!("scan {scan_id} found {} device(s)", devices.len());
            model.scan.status = ScanStatus::Complete {
                count: devices.len(),
            };
            model.table.set_devices(devices);
            // rows are rebuilt, only attempts still waiting on the user or
            // the server keep their state
            model.updates.retain_pending();
        }
        Err(e) => {
            log::error!("scan {scan_id} failed: {e}");
            model.scan.status = ScanStatus::Failed {
                error: e.to_string(),
            };
        }
    }

    render()
}
