use crux_core::{render::render, Command};

use crate::events::{Event, I18nEvent, LoadStage};
use crate::http_get;
use crate::http_helpers::{build_url, process_translation_response};
use crate::model::Model;
use crate::types::{normalize_language, TranslationError, TranslationTable};
use crate::update_field;
use crate::Effect;

/// Start the translation loading sequence: fallback first, then `language`
pub fn initialize(language: Option<String>, model: &mut Model) -> Command<Effect, Event> {
    let preferred = language
        .as_deref()
        .map(normalize_language)
        .filter(|l| !l.is_empty());
    let changed = update_field!(
        model.preferred_language, preferred;
        model.translations_ready, false
    );

    let fallback = model.text.fallback_language().to_string();
    log::info!(
        "loading translations (fallback {fallback}, preferred {:?})",
        model.preferred_language
    );

    Command::all([changed, load(fallback, LoadStage::Fallback, model)])
}

/// Handle text resolver events
pub fn handle(event: I18nEvent, model: &mut Model) -> Command<Effect, Event> {
    match event {
        I18nEvent::SetLanguage { language } => set_language(language, model),
        I18nEvent::TranslationsLoaded {
            language,
            stage,
            result,
        } => translations_loaded(language, stage, result, model),
    }
}

fn load(language: String, stage: LoadStage, model: &Model) -> Command<Effect, Event> {
    let url = build_url(&model.config.translations_endpoint(&language));
    log::debug!("fetching {url}");

    http_get!(url, |result| {
        let result = process_translation_response(&language, result);
        Event::I18n(I18nEvent::TranslationsLoaded {
            language,
            stage,
            result,
        })
    })
}

fn set_language(language: String, model: &mut Model) -> Command<Effect, Event> {
    let language = normalize_language(&language);
    if language.is_empty() {
        return Command::done();
    }

    if model.text.set_language(&language) {
        log::debug!("switched to language {language}");
        render()
    } else {
        load(language, LoadStage::Switch, model)
    }
}

fn translations_loaded(
    language: String,
    stage: LoadStage,
    result: Result<TranslationTable, TranslationError>,
    model: &mut Model,
) -> Command<Effect, Event> {
    let loaded = match result {
        Ok(table) => {
            log::debug!("loaded {} translation(s) for {language}", table.len());
            model.text.insert_table(&language, table);
            true
        }
        Err(e) => {
            log::warn!("{e}");
            false
        }
    };

    match stage {
        LoadStage::Fallback => {
            let preferred = model
                .preferred_language
                .clone()
                .filter(|p| p != model.text.fallback_language());

            match preferred {
                Some(preferred) => load(preferred, LoadStage::Preferred, model),
                None => finish_initialization(model),
            }
        }
        LoadStage::Preferred => {
            let target = if loaded {
                language
            } else {
                model.text.fallback_language().to_string()
            };
            model.text.set_language(&target);
            finish_initialization(model)
        }
        LoadStage::Switch if loaded => {
            model.text.set_language(&language);
            render()
        }
        LoadStage::Switch => Command::done(),
    }
}

fn finish_initialization(model: &mut Model) -> Command<Effect, Event> {
    log::info!("translations ready, language {}", model.text.active_language());
    update_field!(model.translations_ready, true)
}
