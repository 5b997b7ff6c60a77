/// Assign model fields and request a render only if one of them changed.
///
/// ```ignore
/// update_field!(model.translations_ready, true)
///
/// update_field!(
///     model.preferred_language, preferred;
///     model.translations_ready, false
/// )
/// ```
#[macro_export]
macro_rules! update_field {
    ($($field:expr, $value:expr);+ $(;)?) => {{
        let mut changed = false;
        $(
            let value = $value;
            if $field != value {
                $field = value;
                changed = true;
            }
        )+
        if changed {
            crux_core::render::render()
        } else {
            crux_core::Command::done()
        }
    }};
}

/// Macro for GET requests whose response is turned into a domain event by a
/// `process_*` helper from `http_helpers`.
///
/// # Example
/// ```ignore
/// http_get!(url, |result| Event::Scan(ScanEvent::ScanResponse {
///     scan_id,
///     result: process_scan_response(result),
/// }))
/// ```
#[macro_export]
macro_rules! http_get {
    ($url:expr, |$result:ident| $event:expr) => {
        $crate::HttpCmd::get($url)
            .build()
            .then_send(move |$result| $event)
    };
}

/// Macro for shell timers that send `$event` once `$millis` have passed.
///
/// # Example
/// ```ignore
/// notify_after!(model.config.reset_delay_ms, Event::Firmware(FirmwareEvent::ResetDue { ip, attempt }))
/// ```
#[macro_export]
macro_rules! notify_after {
    ($millis:expr, $event:expr) => {
        $crate::TimerCmd::notify_after($millis)
            .build()
            .then_send(move |_| $event)
    };
}
