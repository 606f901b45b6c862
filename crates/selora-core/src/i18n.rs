//! Translation tables.
//!
//! Languages are an explicit code → table mapping validated at construction,
//! never discovered at runtime. Scoring and validation never consult these;
//! they only affect displayed text.

use std::collections::HashMap;

use crate::error::CoreError;

/// A flat key → string lookup table for one language.
pub type TranslationTable = HashMap<String, String>;

/// All loaded translation tables plus the fallback language.
#[derive(Debug, Clone)]
pub struct Translations {
    tables: HashMap<String, TranslationTable>,
    fallback: String,
}

impl Translations {
    /// Build a translation set. Fails if the fallback language has no table
    /// or its table is empty.
    pub fn new(
        tables: HashMap<String, TranslationTable>,
        fallback: impl Into<String>,
    ) -> Result<Self, CoreError> {
        let fallback = fallback.into();
        match tables.get(&fallback) {
            None => Err(CoreError::MissingFallbackTable(fallback)),
            Some(table) if table.is_empty() => Err(CoreError::EmptyTranslationTable(fallback)),
            Some(_) => Ok(Self { tables, fallback }),
        }
    }

    pub fn fallback_language(&self) -> &str {
        &self.fallback
    }

    pub fn has_language(&self, language: &str) -> bool {
        self.tables.contains_key(language)
    }

    /// Look up `key` in the table for `language`, falling back to the
    /// fallback table, then to the key itself.
    pub fn t(&self, language: &str, key: &str) -> String {
        self.lookup(language, key)
            .unwrap_or_else(|| key.to_string())
    }

    /// Like [`t`](Self::t), with `{name}` placeholder interpolation.
    pub fn t_with(&self, language: &str, key: &str, params: &[(&str, &str)]) -> String {
        let mut text = self.t(language, key);
        for (name, value) in params {
            text = text.replace(&format!("{{{name}}}"), value);
        }
        text
    }

    fn lookup(&self, language: &str, key: &str) -> Option<String> {
        if let Some(table) = self.tables.get(language)
            && let Some(text) = table.get(key)
        {
            return Some(text.clone());
        }
        self.tables.get(&self.fallback)?.get(key).cloned()
    }
}
