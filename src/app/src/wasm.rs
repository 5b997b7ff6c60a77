//! WebAssembly FFI bindings for the scanner core
//!
//! The browser shell passes bincode-serialized events and effect responses in
//! and receives serialized effect requests and view models back.

use lazy_static::lazy_static;
use wasm_bindgen::prelude::wasm_bindgen;

use crux_core::{
    bridge::{Bridge, EffectId},
    Core,
};

use crate::App;

lazy_static! {
    static ref CORE: Bridge<App> = Bridge::new(Core::new());
}

#[cfg(debug_assertions)]
const LOG_LEVEL: log::Level = log::Level::Debug;
#[cfg(not(debug_assertions))]
const LOG_LEVEL: log::Level = log::Level::Info;

/// Set up console logging; runs when the module is instantiated
#[wasm_bindgen(start)]
pub fn init_wasm() {
    // a second instantiation finds the logger already installed
    if console_log::init_with_level(LOG_LEVEL).is_err() {
        log::debug!("console logger already initialized");
    }
}

/// Process a serialized `Event` and return the serialized effect requests
#[wasm_bindgen]
pub fn process_event(event_bytes: &[u8]) -> Vec<u8> {
    let mut effects = Vec::new();
    if let Err(e) = CORE.update(event_bytes, &mut effects) {
        log::error!("failed to process event: {e}");
    }
    effects
}

/// Serialized `ViewModel` of the current state
#[wasm_bindgen]
pub fn view() -> Vec<u8> {
    let mut view = Vec::new();
    if let Err(e) = CORE.view(&mut view) {
        log::error!("failed to serialize view model: {e}");
    }
    view
}

/// Resolve effect `id` with the shell's serialized output
#[wasm_bindgen]
pub fn handle_response(id: u32, response_bytes: &[u8]) -> Vec<u8> {
    let mut effects = Vec::new();
    if let Err(e) = CORE.resolve(EffectId(id), response_bytes, &mut effects) {
        log::error!("failed to resolve effect {id}: {e}");
    }
    effects
}
