use crux_core::{render::render, Command};

use crate::events::{Event, FirmwareEvent, ScanEvent};
use crate::http_helpers::{build_url, process_update_response, update_endpoint};
use crate::model::Model;
use crate::notify_after;
use crate::types::{FirmwareUpdateState, UpdateError, UpdatePhase};
use crate::{DialogCmd, Effect, HttpCmd};

/// Handle firmware update lifecycle events
pub fn handle(event: FirmwareEvent, model: &mut Model) -> Command<Effect, Event> {
    match event {
        FirmwareEvent::UpdateFirmware { ip } => request_update(ip, model),
        FirmwareEvent::ConfirmationAnswered {
            ip,
            attempt,
            confirmed,
        } => handle_confirmation(ip, attempt, confirmed, model),
        FirmwareEvent::UpdateResponse {
            ip,
            attempt,
            result,
        } => finish_update(ip, attempt, result, model),
        FirmwareEvent::UpdateTimeout { ip, attempt } => {
            let secs = model.config.update_timeout_ms / 1000;
            let error = UpdateError::Transport(format!("request timed out after {secs} s"));
            finish_update(ip, attempt, Err(error), model)
        }
        FirmwareEvent::AlertDismissed { ip, attempt } => schedule_reset(ip, attempt, model),
        FirmwareEvent::ResetDue { ip, attempt } => reset_button(ip, attempt, model),
    }
}

/// Idle -> AwaitingConfirmation
fn request_update(ip: String, model: &mut Model) -> Command<Effect, Event> {
    match model.table.device(&ip) {
        Some(device) if device.is_updatable() => {}
        Some(_) => {
            log::warn!("ignoring update request for {ip}: no applicable update");
            return Command::done();
        }
        None => {
            log::warn!("ignoring update request for unknown device {ip}");
            return Command::done();
        }
    }

    let phase = model.updates.phase(&ip);
    if phase != UpdatePhase::Idle {
        log::debug!("ignoring update request for {ip} in phase {phase:?}");
        return Command::done();
    }

    let label = model.text.t("fw_update_btn");
    let prompt = model.text.resolve("fw_update_confirm", &[("ip", ip.as_str())]);

    let state = model.updates.entry(&ip);
    state.attempt += 1;
    state.phase = UpdatePhase::AwaitingConfirmation;
    state.original_label = label;
    let attempt = state.attempt;

    log::debug!("asking for confirmation of update {attempt} on {ip}");

    Command::all([
        render(),
        DialogCmd::confirm(prompt).build().then_send(move |output| {
            Event::Firmware(FirmwareEvent::ConfirmationAnswered {
                ip,
                attempt,
                confirmed: output.is_confirmed(),
            })
        }),
    ])
}

/// AwaitingConfirmation -> InFlight, or back to Idle when declined
fn handle_confirmation(
    ip: String,
    attempt: u32,
    confirmed: bool,
    model: &mut Model,
) -> Command<Effect, Event> {
    let Some(state) = model
        .updates
        .matching(&ip, attempt, UpdatePhase::AwaitingConfirmation)
    else {
        log::debug!("discarding stale confirmation for {ip}");
        return Command::done();
    };

    if !confirmed {
        log::debug!("update on {ip} declined");
        state.phase = UpdatePhase::Idle;
        return render();
    }

    state.phase = UpdatePhase::InFlight;
    log::info!("requesting firmware update on {ip}");

    let response_ip = ip.clone();
    Command::all([
        render(),
        HttpCmd::post(build_url(&update_endpoint(&ip)))
            .build()
            .then_send(move |result| {
                Event::Firmware(FirmwareEvent::UpdateResponse {
                    ip: response_ip,
                    attempt,
                    result: process_update_response(result),
                })
            }),
        notify_after!(
            model.config.update_timeout_ms,
            Event::Firmware(FirmwareEvent::UpdateTimeout { ip, attempt })
        ),
    ])
}

/// InFlight -> Succeeded | Failed | NetworkError
fn finish_update(
    ip: String,
    attempt: u32,
    result: Result<(), UpdateError>,
    model: &mut Model,
) -> Command<Effect, Event> {
    let Some(state) = model
        .updates
        .matching(&ip, attempt, UpdatePhase::InFlight)
    else {
        log::debug!("discarding stale update completion for {ip}");
        return Command::done();
    };

    match result {
        Ok(()) => {
            log::info!("firmware update started on {ip}");
            state.phase = UpdatePhase::Succeeded;
            Command::all([
                render(),
                notify_after!(
                    model.config.refresh_delay_ms,
                    Event::Scan(ScanEvent::RefreshDue)
                ),
            ])
        }
        Err(error) => {
            let (phase, key) = if error.is_transport() {
                (UpdatePhase::NetworkError, "fw_network_error")
            } else {
                (UpdatePhase::Failed, "fw_update_error")
            };
            log::error!("firmware update on {ip} failed: {error}");
            state.phase = phase;

            let message = model
                .text
                .resolve(key, &[("error", error.to_string().as_str())]);
            Command::all([
                render(),
                DialogCmd::alert(message).build().then_send(move |_| {
                    Event::Firmware(FirmwareEvent::AlertDismissed { ip, attempt })
                }),
            ])
        }
    }
}

fn failed_attempt<'a>(
    model: &'a mut Model,
    ip: &str,
    attempt: u32,
) -> Option<&'a mut FirmwareUpdateState> {
    model.updates.get_mut(ip).filter(|s| {
        s.attempt == attempt && matches!(s.phase, UpdatePhase::Failed | UpdatePhase::NetworkError)
    })
}

/// Start the reset delay once the error alert was dismissed
fn schedule_reset(ip: String, attempt: u32, model: &mut Model) -> Command<Effect, Event> {
    if failed_attempt(model, &ip, attempt).is_none() {
        return Command::done();
    }

    notify_after!(
        model.config.reset_delay_ms,
        Event::Firmware(FirmwareEvent::ResetDue { ip, attempt })
    )
}

/// Failed | NetworkError -> Idle
fn reset_button(ip: String, attempt: u32, model: &mut Model) -> Command<Effect, Event> {
    match failed_attempt(model, &ip, attempt) {
        Some(state) => {
            log::debug!("restoring update button of {ip}");
            state.phase = UpdatePhase::Idle;
            render()
        }
        None => Command::done(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::dialog::{DialogOperation, DialogOutput};
    use crate::commands::timer::{TimerOperation, TimerOutput};
    use crate::types::Device;

    const IP: &str = "10.0.0.5";

    fn updatable_model() -> Model {
        let mut model = Model::default();
        model.table.set_devices(vec![Device {
            name: "Boiler".to_string(),
            device_type: "SHSW-1".to_string(),
            ip: IP.to_string(),
            mac: "A4CF12F45D21".to_string(),
            fw: "1.9.0".to_string(),
            generation: 1,
            auth: true,
            has_update: true,
            can_update: true,
            latest_version: "1.14.0".to_string(),
        }]);
        model
    }

    fn model_in(phase: UpdatePhase) -> Model {
        let mut model = updatable_model();
        let state = model.updates.entry(IP);
        state.phase = phase;
        state.attempt = 1;
        state.original_label = "Update".to_string();
        model
    }

    fn effects(cmd: &mut Command<Effect, Event>) -> Vec<Effect> {
        cmd.effects().collect()
    }

    fn timer_millis(effects: &[Effect]) -> Vec<u64> {
        effects
            .iter()
            .filter_map(|e| match e {
                Effect::Timer(request) => match request.operation {
                    TimerOperation::NotifyAfter { millis } => Some(millis),
                },
                _ => None,
            })
            .collect()
    }

    fn dialog(effects: &[Effect]) -> Option<DialogOperation> {
        effects.iter().find_map(|e| match e {
            Effect::Dialog(request) => Some(request.operation.clone()),
            _ => None,
        })
    }

    mod request {
        use super::*;

        #[test]
        fn click_asks_for_confirmation_naming_ip() {
            let mut model = updatable_model();

            let mut cmd = handle(
                FirmwareEvent::UpdateFirmware { ip: IP.to_string() },
                &mut model,
            );

            assert_eq!(
                model.update_phase(IP),
                UpdatePhase::AwaitingConfirmation
            );
            match dialog(&effects(&mut cmd)) {
                Some(DialogOperation::Confirm { message }) => assert!(message.contains(IP)),
                other => panic!("expected confirmation, got {other:?}"),
            }
        }

        #[test]
        fn click_without_update_is_ignored() {
            let mut model = updatable_model();
            model.table.set_devices(vec![Device {
                ip: IP.to_string(),
                has_update: false,
                can_update: true,
                ..Default::default()
            }]);

            let mut cmd = handle(
                FirmwareEvent::UpdateFirmware { ip: IP.to_string() },
                &mut model,
            );

            assert!(model.updates.is_empty());
            assert!(cmd.effects().next().is_none());
        }

        #[test]
        fn click_while_in_flight_is_ignored() {
            let mut model = model_in(UpdatePhase::InFlight);
            let before = model.clone();

            let mut cmd = handle(
                FirmwareEvent::UpdateFirmware { ip: IP.to_string() },
                &mut model,
            );

            assert_eq!(model, before);
            assert!(cmd.effects().next().is_none());
        }

        #[test]
        fn click_while_failed_waits_for_reset() {
            let mut model = model_in(UpdatePhase::Failed);

            let _ = handle(
                FirmwareEvent::UpdateFirmware { ip: IP.to_string() },
                &mut model,
            );

            assert_eq!(model.update_phase(IP), UpdatePhase::Failed);
        }
    }

    mod confirmation {
        use super::*;

        #[test]
        fn decline_returns_to_idle_without_request() {
            let mut model = model_in(UpdatePhase::AwaitingConfirmation);

            let mut cmd = handle(
                FirmwareEvent::ConfirmationAnswered {
                    ip: IP.to_string(),
                    attempt: 1,
                    confirmed: false,
                },
                &mut model,
            );

            assert_eq!(model.update_phase(IP), UpdatePhase::Idle);
            assert!(!effects(&mut cmd)
                .iter()
                .any(|e| matches!(e, Effect::Http(_))));
        }

        #[test]
        fn accept_posts_update_request() {
            let mut model = model_in(UpdatePhase::AwaitingConfirmation);

            let mut cmd = handle(
                FirmwareEvent::ConfirmationAnswered {
                    ip: IP.to_string(),
                    attempt: 1,
                    confirmed: true,
                },
                &mut model,
            );

            assert_eq!(model.update_phase(IP), UpdatePhase::InFlight);
            let effects = effects(&mut cmd);
            let request = effects
                .iter()
                .find_map(|e| match e {
                    Effect::Http(request) => Some(request.operation.clone()),
                    _ => None,
                })
                .expect("update request");
            assert_eq!(request.method, "POST");
            assert_eq!(request.url, "https://relative/api/update/10.0.0.5");
            assert_eq!(timer_millis(&effects), [20_000]);
        }

        #[test]
        fn answer_for_other_attempt_is_ignored() {
            let mut model = model_in(UpdatePhase::AwaitingConfirmation);

            let _ = handle(
                FirmwareEvent::ConfirmationAnswered {
                    ip: IP.to_string(),
                    attempt: 7,
                    confirmed: true,
                },
                &mut model,
            );

            assert_eq!(
                model.update_phase(IP),
                UpdatePhase::AwaitingConfirmation
            );
        }
    }

    mod completion {
        use super::*;

        #[test]
        fn success_schedules_refresh_scan() {
            let mut model = model_in(UpdatePhase::InFlight);

            let mut cmd = handle(
                FirmwareEvent::UpdateResponse {
                    ip: IP.to_string(),
                    attempt: 1,
                    result: Ok(()),
                },
                &mut model,
            );

            assert_eq!(model.update_phase(IP), UpdatePhase::Succeeded);
            assert_eq!(timer_millis(&effects(&mut cmd)), [30_000]);
        }

        #[test]
        fn rejection_alerts_server_message() {
            let mut model = model_in(UpdatePhase::InFlight);

            let mut cmd = handle(
                FirmwareEvent::UpdateResponse {
                    ip: IP.to_string(),
                    attempt: 1,
                    result: Err(UpdateError::Rejected("bad password".to_string())),
                },
                &mut model,
            );

            assert_eq!(model.update_phase(IP), UpdatePhase::Failed);
            match dialog(&effects(&mut cmd)) {
                Some(DialogOperation::Alert { message }) => {
                    assert!(message.contains("bad password"))
                }
                other => panic!("expected alert, got {other:?}"),
            }
        }

        #[test]
        fn transport_error_becomes_network_error() {
            let mut model = model_in(UpdatePhase::InFlight);

            let mut cmd = handle(
                FirmwareEvent::UpdateResponse {
                    ip: IP.to_string(),
                    attempt: 1,
                    result: Err(UpdateError::Transport("connection refused".to_string())),
                },
                &mut model,
            );

            assert_eq!(model.update_phase(IP), UpdatePhase::NetworkError);
            match dialog(&effects(&mut cmd)) {
                Some(DialogOperation::Alert { message }) => {
                    assert_eq!(message, "Network error: connection refused")
                }
                other => panic!("expected alert, got {other:?}"),
            }
        }

        #[test]
        fn timeout_while_in_flight_is_network_error() {
            let mut model = model_in(UpdatePhase::InFlight);

            let _ = handle(
                FirmwareEvent::UpdateTimeout {
                    ip: IP.to_string(),
                    attempt: 1,
                },
                &mut model,
            );

            assert_eq!(model.update_phase(IP), UpdatePhase::NetworkError);
        }

        #[test]
        fn timeout_after_response_is_ignored() {
            let mut model = model_in(UpdatePhase::Succeeded);

            let mut cmd = handle(
                FirmwareEvent::UpdateTimeout {
                    ip: IP.to_string(),
                    attempt: 1,
                },
                &mut model,
            );

            assert_eq!(model.update_phase(IP), UpdatePhase::Succeeded);
            assert!(cmd.effects().next().is_none());
        }
    }

    mod reset {
        use super::*;

        #[test]
        fn dismissed_alert_starts_reset_delay() {
            let mut model = model_in(UpdatePhase::Failed);

            let mut cmd = handle(
                FirmwareEvent::AlertDismissed {
                    ip: IP.to_string(),
                    attempt: 1,
                },
                &mut model,
            );

            assert_eq!(timer_millis(&effects(&mut cmd)), [3_000]);
            assert_eq!(model.update_phase(IP), UpdatePhase::Failed);
        }

        #[test]
        fn reset_restores_idle_and_label() {
            let mut model = model_in(UpdatePhase::NetworkError);

            let _ = handle(
                FirmwareEvent::ResetDue {
                    ip: IP.to_string(),
                    attempt: 1,
                },
                &mut model,
            );

            let state = model.updates.get(IP).expect("state");
            assert_eq!(state.phase, UpdatePhase::Idle);
            assert_eq!(state.original_label, "Update");
        }

        #[test]
        fn reset_after_rescan_is_ignored() {
            let mut model = updatable_model();

            let mut cmd = handle(
                FirmwareEvent::ResetDue {
                    ip: IP.to_string(),
                    attempt: 1,
                },
                &mut model,
            );

            assert!(model.updates.is_empty());
            assert!(cmd.effects().next().is_none());
        }
    }

    mod shell_answers {
        use super::*;
        use crux_http::protocol::{HttpResponse, HttpResult};

        #[test]
        fn declined_prompt_becomes_answer_event() {
            let mut model = updatable_model();
            let mut cmd = handle(
                FirmwareEvent::UpdateFirmware { ip: IP.to_string() },
                &mut model,
            );

            let mut request = cmd
                .effects()
                .find_map(|e| match e {
                    Effect::Dialog(request) => Some(request),
                    _ => None,
                })
                .expect("confirmation prompt");
            request
                .resolve(DialogOutput::Confirmed(false))
                .expect("resolve prompt");

            let events: Vec<Event> = cmd.events().collect();
            assert_eq!(
                events,
                [Event::Firmware(FirmwareEvent::ConfirmationAnswered {
                    ip: IP.to_string(),
                    attempt: 1,
                    confirmed: false,
                })]
            );
        }

        #[test]
        fn server_refusal_becomes_rejected_update() {
            let mut model = model_in(UpdatePhase::AwaitingConfirmation);
            let mut cmd = handle(
                FirmwareEvent::ConfirmationAnswered {
                    ip: IP.to_string(),
                    attempt: 1,
                    confirmed: true,
                },
                &mut model,
            );

            let mut request = cmd
                .effects()
                .find_map(|e| match e {
                    Effect::Http(request) => Some(request),
                    _ => None,
                })
                .expect("update request");
            let response = HttpResponse::status(401)
                .body(br#"{"success":false,"error":"bad password"}"#.to_vec())
                .build();
            request
                .resolve(HttpResult::Ok(response))
                .expect("resolve request");

            let events: Vec<Event> = cmd.events().collect();
            assert_eq!(
                events,
                [Event::Firmware(FirmwareEvent::UpdateResponse {
                    ip: IP.to_string(),
                    attempt: 1,
                    result: Err(UpdateError::Rejected("bad password".to_string())),
                })]
            );
        }

        #[test]
        fn elapsed_reset_timer_becomes_reset_due() {
            let mut model = model_in(UpdatePhase::NetworkError);
            let mut cmd = handle(
                FirmwareEvent::AlertDismissed {
                    ip: IP.to_string(),
                    attempt: 1,
                },
                &mut model,
            );

            let mut request = cmd
                .effects()
                .find_map(|e| match e {
                    Effect::Timer(request) => Some(request),
                    _ => None,
                })
                .expect("reset timer");
            request.resolve(TimerOutput::Elapsed).expect("resolve timer");

            let events: Vec<Event> = cmd.events().collect();
            assert_eq!(
                events,
                [Event::Firmware(FirmwareEvent::ResetDue {
                    ip: IP.to_string(),
                    attempt: 1,
                })]
            );
        }
    }
}
