use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// One language: message key -> template with `{placeholder}` markers
pub type TranslationTable = BTreeMap<String, String>;

/// English texts compiled into the core so the UI is legible before the
/// translation files arrive.
const BUILTIN_ENGLISH: &[(&str, &str)] = &[
    ("app_title", "Shelly Scanner"),
    ("page_title", "Shelly Device Scanner"),
    ("scan_button", "Scan Network"),
    ("scan_status_ready", "Ready to scan"),
    ("scan_status_scanning", "Scanning network..."),
    ("scan_status_complete", "Scan complete. Found {count} device(s)"),
    ("scan_status_error", "Scan failed: {error}"),
    ("loading_message", "Searching for Shelly devices..."),
    ("no_devices_found", "No Shelly devices found"),
    ("error_occurred", "An error occurred while scanning"),
    ("table_header_name", "Name"),
    ("table_header_type", "Type"),
    ("table_header_gen", "Gen"),
    ("table_header_ip", "IP Address"),
    ("table_header_mac", "MAC Address"),
    ("table_header_fw", "Firmware"),
    ("table_header_auth", "Auth"),
    ("gen_prefix", "Gen "),
    ("auth_enabled", "Enabled"),
    ("auth_disabled", "Disabled"),
    ("fw_latest", "Firmware is up to date"),
    ("fw_update_to", "Update available: {version}"),
    ("fw_set_password", "Set the admin password to enable updates"),
    ("fw_update_btn", "Update"),
    ("fw_update_confirm", "Start firmware update on {ip}?"),
    ("fw_updating", "Updating..."),
    ("fw_updated", "Updated"),
    ("fw_failed", "Failed"),
    ("fw_error", "Error"),
    ("fw_update_error", "Update failed: {error}"),
    ("fw_network_error", "Network error: {error}"),
];

/// Reduce a locale such as `de-CH` to its lower-cased primary subtag
pub fn normalize_language(language: &str) -> String {
    language
        .split(['-', '_'])
        .next()
        .unwrap_or_default()
        .trim()
        .to_lowercase()
}

/// Key lookup with a fallback language and `{placeholder}` substitution
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TextResolver {
    tables: BTreeMap<String, TranslationTable>,
    active_language: String,
    fallback_language: String,
}

impl Default for TextResolver {
    fn default() -> Self {
        Self::new("en")
    }
}

impl TextResolver {
    /// A resolver whose fallback table is seeded with the built-in English texts
    pub fn new(fallback_language: &str) -> Self {
        let builtin = BUILTIN_ENGLISH
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        let fallback_language = normalize_language(fallback_language);

        Self {
            tables: BTreeMap::from([(fallback_language.clone(), builtin)]),
            active_language: fallback_language.clone(),
            fallback_language,
        }
    }

    pub fn active_language(&self) -> &str {
        &self.active_language
    }

    pub fn fallback_language(&self) -> &str {
        &self.fallback_language
    }

    /// Change the language consulted when the active one lacks a key
    pub fn set_fallback_language(&mut self, language: &str) {
        self.fallback_language = normalize_language(language);
    }

    /// Store a table for `language`; does not change the active language
    pub fn insert_table(&mut self, language: &str, table: TranslationTable) {
        self.tables.insert(normalize_language(language), table);
    }

    pub fn has_language(&self, language: &str) -> bool {
        self.tables.contains_key(&normalize_language(language))
    }

    /// Switch the active language if its table is loaded
    pub fn set_language(&mut self, language: &str) -> bool {
        let language = normalize_language(language);
        if self.tables.contains_key(&language) {
            self.active_language = language;
            true
        } else {
            false
        }
    }

    /// Loaded language codes, sorted
    pub fn available_languages(&self) -> Vec<String> {
        self.tables.keys().cloned().collect()
    }

    fn lookup(&self, language: &str, key: &str) -> Option<&str> {
        self.tables
            .get(language)
            .and_then(|table| table.get(key))
            .map(String::as_str)
            .filter(|text| !text.is_empty())
    }

    /// Resolve `key` in the active language, then the fallback language, then
    /// return the key itself. Each replacement substitutes the first `{name}`.
    pub fn resolve(&self, key: &str, replacements: &[(&str, &str)]) -> String {
        let mut text = self
            .lookup(&self.active_language, key)
            .or_else(|| self.lookup(&self.fallback_language, key))
            .unwrap_or(key)
            .to_string();

        for (name, value) in replacements {
            text = text.replacen(&format!("{{{name}}}"), value, 1);
        }

        text
    }

    /// `resolve` without replacements
    pub fn t(&self, key: &str) -> String {
        self.resolve(key, &[])
    }
}
