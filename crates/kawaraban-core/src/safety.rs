//! Content-safety user messaging.
//!
//! When a turn ends in the filtered outcome the caller still owes the user a
//! coherent assistant reply. This module provides that reply, translated when
//! the session language is not English.

use crate::speech::Translator;
use std::io;

/// Fixed reply spoken when a request trips the provider's content filter.
/// Wording (including the typo) matches the deployed service.
pub const CONTENT_FILTERING_MSG: &str = "I'm sorry, but I'm not able to answer your request \
because it triggered our content filtering system. Please try again using \
more appropiate language.";

/// The content-filtering message in the session language. English sessions
/// get the fixed text; anything else goes through the translator.
pub fn content_filtering_message(lang: &str, translator: &dyn Translator) -> io::Result<String> {
    if lang == "en-US" {
        Ok(CONTENT_FILTERING_MSG.to_string())
    } else {
        translator.translate(CONTENT_FILTERING_MSG, lang)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::speech::Translator;

    struct Uppercase;

    impl Translator for Uppercase {
        fn translate(&self, text: &str, _target_lang: &str) -> io::Result<String> {
            Ok(text.to_uppercase())
        }
    }

    #[test]
    fn test_english_skips_translation() {
        let message = content_filtering_message("en-US", &Uppercase).unwrap();
        assert_eq!(message, CONTENT_FILTERING_MSG);
    }

    #[test]
    fn test_other_languages_are_translated() {
        let message = content_filtering_message("es-MX", &Uppercase).unwrap();
        assert_eq!(message, CONTENT_FILTERING_MSG.to_uppercase());
    }
}
