mod firmware;
mod i18n;
mod scan;
mod table;

pub use scan::start_scan;

use crux_core::Command;

use crate::events::Event;
use crate::model::Model;
use crate::types::CoreConfig;
use crate::update_field;
use crate::Effect;

/// Main update dispatcher - routes events to domain-specific handlers
pub fn update(event: Event, model: &mut Model) -> Command<Effect, Event> {
    match event {
        // Initialization
        Event::Initialize { language } => i18n::initialize(language, model),
        Event::Configure(config) => configure(config, model),

        // Domain events
        Event::Scan(event) => scan::handle(event, model),
        Event::Table(event) => table::handle(event, model),
        Event::Firmware(event) => firmware::handle(event, model),
        Event::I18n(event) => i18n::handle(event, model),
    }
}

/// Replace the configuration if it validates, keep the old one otherwise
fn configure(config: CoreConfig, model: &mut Model) -> Command<Effect, Event> {
    match config.validated() {
        Ok(config) => {
            log::debug!("applying configuration {config:?}");
            model.text.set_fallback_language(&config.fallback_language);
            update_field!(model.config, config)
        }
        Err(e) => {
            log::error!("{e}");
            Command::done()
        }
    }
}
