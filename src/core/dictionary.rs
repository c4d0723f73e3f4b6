//! Static phrase dictionary used when no provider can answer

use std::collections::HashMap;

use crate::core::models::{TranslationResult, AUTO_DETECTED_LABEL};

/// Built-in phrases: (source phrase, [(target language, translation)])
///
/// Matching is exact and case-sensitive, so capitalized and lower-case
/// spellings are listed separately.
const DEMO_PHRASES: &[(&str, &[(&str, &str)])] = &[
    (
        "How are you?",
        &[
            ("French", "Comment allez-vous?"),
            ("Spanish", "¿Cómo estás?"),
            ("Japanese", "元気ですか？"),
        ],
    ),
    (
        "Hello",
        &[("French", "Bonjour"), ("Spanish", "Hola"), ("Japanese", "こんにちは")],
    ),
    (
        "hello",
        &[("French", "Bonjour"), ("Spanish", "Hola"), ("Japanese", "こんにちは")],
    ),
    (
        "Thank you",
        &[
            ("French", "Merci"),
            ("Spanish", "Gracias"),
            ("Japanese", "ありがとうございます"),
        ],
    ),
    (
        "thank you",
        &[
            ("French", "Merci"),
            ("Spanish", "Gracias"),
            ("Japanese", "ありがとうございます"),
        ],
    ),
    (
        "Good morning",
        &[
            ("French", "Bonjour"),
            ("Spanish", "Buenos días"),
            ("Japanese", "おはようございます"),
        ],
    ),
    (
        "good morning",
        &[
            ("French", "Bonjour"),
            ("Spanish", "Buenos días"),
            ("Japanese", "おはようございます"),
        ],
    ),
    (
        "Goodbye",
        &[("French", "Au revoir"), ("Spanish", "Adiós"), ("Japanese", "さようなら")],
    ),
    (
        "goodbye",
        &[("French", "Au revoir"), ("Spanish", "Adiós"), ("Japanese", "さようなら")],
    ),
    (
        "Please",
        &[
            ("French", "S'il vous plaît"),
            ("Spanish", "Por favor"),
            ("Japanese", "お願いします"),
        ],
    ),
    (
        "please",
        &[
            ("French", "S'il vous plaît"),
            ("Spanish", "Por favor"),
            ("Japanese", "お願いします"),
        ],
    ),
];

/// Read-only phrase table, built once at startup
#[derive(Debug, Clone)]
pub struct PhraseDictionary {
    phrases: HashMap<&'static str, HashMap<&'static str, &'static str>>,
}

impl Default for PhraseDictionary {
    fn default() -> Self {
        Self::builtin()
    }
}

impl PhraseDictionary {
    /// Dictionary holding the built-in demo phrases
    pub fn builtin() -> Self {
        let phrases = DEMO_PHRASES
            .iter()
            .map(|(phrase, translations)| {
                (*phrase, translations.iter().copied().collect::<HashMap<_, _>>())
            })
            .collect();
        Self { phrases }
    }

    /// Exact, case-sensitive lookup
    pub fn lookup(&self, text: &str, target_lang: &str) -> Option<&'static str> {
        self.phrases
            .get(text)
            .and_then(|translations| translations.get(target_lang))
            .copied()
    }

    /// Dictionary answer for `text`, or a labeled placeholder on a miss.
    ///
    /// Never fails; this is the last step of the fallback chain.
    pub fn translate(&self, text: &str, target_lang: &str) -> TranslationResult {
        let translated = match self.lookup(text, target_lang) {
            Some(found) => found.to_string(),
            None => demo_placeholder(text, target_lang),
        };

        TranslationResult::new(translated, AUTO_DETECTED_LABEL, target_lang)
    }

    /// Number of source phrases
    pub fn len(&self) -> usize {
        self.phrases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.phrases.is_empty()
    }
}

/// Placeholder shown for text the dictionary does not know
pub fn demo_placeholder(text: &str, target_lang: &str) -> String {
    format!(
        "🎮 Demo: \"{}\" → {} (Add an API key for real translation)",
        text, target_lang
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_known_phrase() {
        let dictionary = PhraseDictionary::builtin();
        assert_eq!(dictionary.lookup("Hello", "French"), Some("Bonjour"));
        assert_eq!(dictionary.lookup("hello", "Spanish"), Some("Hola"));
        assert_eq!(dictionary.lookup("Thank you", "Japanese"), Some("ありがとうございます"));
        assert_eq!(dictionary.lookup("How are you?", "Spanish"), Some("¿Cómo estás?"));
    }

    #[test]
    fn test_lookup_is_case_sensitive() {
        let dictionary = PhraseDictionary::builtin();
        assert_eq!(dictionary.lookup("HELLO", "French"), None);
        assert_eq!(dictionary.lookup("Hello ", "French"), None);
        assert_eq!(dictionary.lookup("how are you?", "French"), None);
    }

    #[test]
    fn test_lookup_unknown_target() {
        let dictionary = PhraseDictionary::builtin();
        assert_eq!(dictionary.lookup("Hello", "German"), None);
    }

    #[test]
    fn test_translate_hit() {
        let result = PhraseDictionary::builtin().translate("Goodbye", "French");
        assert_eq!(result.translated_text, "Au revoir");
        assert_eq!(result.source_lang, AUTO_DETECTED_LABEL);
        assert_eq!(result.target_lang, "French");
    }

    #[test]
    fn test_translate_miss_uses_placeholder() {
        let result = PhraseDictionary::builtin().translate("Hello", "German");
        assert!(result.translated_text.contains("Hello"));
        assert!(result.translated_text.contains("German"));
        assert_eq!(
            result.translated_text,
            "🎮 Demo: \"Hello\" → German (Add an API key for real translation)"
        );
    }

    #[test]
    fn test_translate_is_pure() {
        let dictionary = PhraseDictionary::builtin();
        for (text, target) in [("Hello", "French"), ("Where is the station?", "Korean")] {
            assert_eq!(
                dictionary.translate(text, target),
                dictionary.translate(text, target)
            );
        }
    }

    #[test]
    fn test_builtin_size() {
        let dictionary = PhraseDictionary::builtin();
        assert_eq!(dictionary.len(), 11);
        assert!(!dictionary.is_empty());
    }
}
