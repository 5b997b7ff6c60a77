use crux_core::{render::render, Command};

use crate::events::{Event, TableEvent};
use crate::model::Model;
use crate::Effect;

/// Handle column header activations
pub fn handle(event: TableEvent, model: &mut Model) -> Command<Effect, Event> {
    match event {
        TableEvent::SortBy(column) => {
            model.table.set_sort(column);
            log::debug!("sorting devices by {:?}", model.table.sort());
            render()
        }
    }
}
