pub mod commands;
pub mod events;
pub mod http_helpers;
pub mod macros;
pub mod model;
pub mod types;
pub mod update;
pub mod view;

#[cfg(target_arch = "wasm32")]
pub mod wasm;


use crux_core::Command;

// Re-export core types
pub use crate::{
    commands::{
        dialog::{DialogOperation, DialogOutput},
        timer::{TimerOperation, TimerOutput},
    },
    events::{Event, FirmwareEvent, I18nEvent, LoadStage, ScanEvent, TableEvent},
    http_helpers::{build_url, update_endpoint, BASE_URL},
    model::Model,
    types::*,
};
pub use crux_http::Result as HttpResult;

#[crux_macros::effect(typegen)]
pub enum Effect {
    Render(crux_core::render::RenderOperation),
    Http(crux_http::protocol::HttpRequest),
    Timer(TimerOperation),
    Dialog(DialogOperation),
}

pub type DialogCmd = crate::commands::dialog::Dialog<Effect, Event>;
pub type HttpCmd = crux_http::command::Http<Effect, Event>;
pub type TimerCmd = crate::commands::timer::Timer<Effect, Event>;

/// The Core application
#[derive(Default)]
pub struct App;

impl crux_core::App for App {
    type Event = Event;
    type Model = Model;
    type ViewModel = ViewModel;
    type Effect = Effect;

    fn update(&self, event: Self::Event, model: &mut Self::Model) -> Command<Effect, Event> {
        update::update(event, model)
    }

    fn view(&self, model: &Self::Model) -> Self::ViewModel {
        view::project_view(model)
    }
}
