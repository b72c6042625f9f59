//! Speech and language collaborator boundaries.
//!
//! The core never talks to a speech or translation provider directly; it goes
//! through these traits. Real providers (cloud speech SDKs, translation APIs)
//! live behind them, as do the text-mode stand-ins the CLI uses.

use std::io;

/// Turns captured audio into text, reporting the detected language alongside.
pub trait Transcriber {
    /// Capture one utterance. Returns `(text, language)`, e.g.
    /// `("hola", "es-MX")`.
    fn listen(&mut self) -> io::Result<(String, String)>;
}

/// Speaks (or otherwise presents) an answer in the given language.
pub trait Synthesizer {
    fn speak(&mut self, text: &str, lang: &str) -> io::Result<()>;
}

/// Detects the language of a piece of text.
pub trait LanguageDetector {
    fn detect(&self, text: &str) -> io::Result<String>;
}

/// Translates text into a target language.
pub trait Translator {
    fn translate(&self, text: &str, target_lang: &str) -> io::Result<String>;
}

/// Detector stand-in that reports a fixed session language.
pub struct FixedLanguage {
    language: String,
}

impl FixedLanguage {
    pub fn new(language: &str) -> Self {
        Self {
            language: language.to_string(),
        }
    }
}

impl LanguageDetector for FixedLanguage {
    fn detect(&self, _text: &str) -> io::Result<String> {
        Ok(self.language.clone())
    }
}

/// Translator stand-in that returns the text unchanged.
pub struct IdentityTranslator;

impl Translator for IdentityTranslator {
    fn translate(&self, text: &str, _target_lang: &str) -> io::Result<String> {
        Ok(text.to_string())
    }
}
