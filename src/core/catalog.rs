//! Language catalog shown by the language picker

use serde::Serialize;
use utoipa::ToSchema;

/// Built-in languages: (code, display name, flag asset)
const LANGUAGES: &[(&str, &str, &str)] = &[
    (
        "fr",
        "French",
        "https://cdn.builder.io/api/v1/image/assets/TEMP/c6b3cb52203375d611e7d6434f199ef0adc2c57d",
    ),
    (
        "es",
        "Spanish",
        "https://cdn.builder.io/api/v1/image/assets/TEMP/8370ecf552c11379212a86e6cf94d81f0cd58d91",
    ),
    (
        "ja",
        "Japanese",
        "https://cdn.builder.io/api/v1/image/assets/TEMP/9b304b8e736eb37cf94cee7e03e8d10897cd8ee9",
    ),
    ("en", "English", "/placeholder.svg"),
    ("de", "German", "/placeholder.svg"),
    ("it", "Italian", "/placeholder.svg"),
    ("pt", "Portuguese", "/placeholder.svg"),
    ("ru", "Russian", "/placeholder.svg"),
    ("zh", "Chinese", "/placeholder.svg"),
    ("ko", "Korean", "/placeholder.svg"),
];

/// Codes the picker actively offers
const OFFERED: &[&str] = &["fr", "es", "ja"];

/// Language the chat starts out translating into
pub const DEFAULT_LANGUAGE: &str = "fr";

/// One catalog entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct Language {
    pub code: String,
    pub name: String,
    pub flag: String,
    /// Shown in the language picker
    pub offered: bool,
}

/// Read-only code → language mapping
#[derive(Debug, Clone)]
pub struct LanguageCatalog {
    languages: Vec<Language>,
}

impl Default for LanguageCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

impl LanguageCatalog {
    pub fn builtin() -> Self {
        let languages = LANGUAGES
            .iter()
            .map(|&(code, name, flag)| Language {
                code: code.to_string(),
                name: name.to_string(),
                flag: flag.to_string(),
                offered: OFFERED.contains(&code),
            })
            .collect();
        Self { languages }
    }

    /// Look up a language by its code
    pub fn get(&self, code: &str) -> Option<&Language> {
        self.languages.iter().find(|l| l.code == code)
    }

    /// Display name for a code, e.g. "fr" → "French"
    pub fn display_name(&self, code: &str) -> Option<&str> {
        self.get(code).map(|l| l.name.as_str())
    }

    /// Accepts either a code or a display name and returns the display name.
    /// Unknown values pass through unchanged.
    pub fn resolve_name(&self, code_or_name: &str) -> String {
        self.get(code_or_name)
            .or_else(|| {
                self.languages
                    .iter()
                    .find(|l| l.name.eq_ignore_ascii_case(code_or_name))
            })
            .map(|l| l.name.clone())
            .unwrap_or_else(|| code_or_name.to_string())
    }

    /// All languages in catalog order
    pub fn all(&self) -> &[Language] {
        &self.languages
    }

    /// Languages offered in the picker
    pub fn offered(&self) -> impl Iterator<Item = &Language> {
        self.languages.iter().filter(|l| l.offered)
    }

    pub fn contains(&self, code: &str) -> bool {
        self.get(code).is_some()
    }
}
