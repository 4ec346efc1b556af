//! Localized display names
//!
//! Step and component names are carried as a map of language tag to display
//! string. The engine never interprets them; only the shell resolves one for
//! display.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Language used when the requested one has no entry
pub const DEFAULT_LANG: &str = "fr";

/// A display name keyed by language tag (e.g. `{"fr": "Moulage", "en": "Molding"}`)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "NameRepr")]
pub struct LocalizedName(BTreeMap<String, String>);

/// Accepted input shapes: a language map or a bare string
#[derive(Deserialize)]
#[serde(untagged)]
enum NameRepr {
    Plain(String),
    Map(BTreeMap<String, String>),
}

impl From<NameRepr> for LocalizedName {
    fn from(repr: NameRepr) -> Self {
        match repr {
            NameRepr::Plain(s) => LocalizedName::single(DEFAULT_LANG, s),
            NameRepr::Map(map) => LocalizedName(map),
        }
    }
}

impl LocalizedName {
    /// Create an empty name
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Create a name with a single language entry
    pub fn single(lang: impl Into<String>, text: impl Into<String>) -> Self {
        let mut map = BTreeMap::new();
        map.insert(lang.into(), text.into());
        Self(map)
    }

    /// Create a French/English pair, the shape used by bundled datasets
    pub fn fr_en(fr: impl Into<String>, en: impl Into<String>) -> Self {
        Self::new().with("fr", fr).with("en", en)
    }

    /// Builder-style insert
    pub fn with(mut self, lang: impl Into<String>, text: impl Into<String>) -> Self {
        self.0.insert(lang.into(), text.into());
        self
    }

    /// Get the entry for an exact language tag
    pub fn get(&self, lang: &str) -> Option<&str> {
        self.0.get(lang).map(|s| s.as_str())
    }

    /// Resolve a display string
    ///
    /// Fallback order: requested language, then [`DEFAULT_LANG`], then
    /// `placeholder`.
    pub fn resolve<'a>(&'a self, lang: &str, placeholder: &'a str) -> &'a str {
        self.get(lang)
            .or_else(|| self.get(DEFAULT_LANG))
            .unwrap_or(placeholder)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over `(lang, text)` pairs in tag order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}
