//! Language detection over `whatlang`.

/// Source marker passed to the translator when detection fails.
pub const AUTO_SOURCE: &str = "auto";

#[derive(Debug, Clone, Copy, Default)]
pub struct LanguageDetector;

impl LanguageDetector {
    pub fn new() -> Self {
        Self
    }

    /// Best guess as an ISO 639-1 code; `None` when the text carries no
    /// detectable script. Languages outside the table map to `"other"`.
    pub fn detect(&self, text: &str) -> Option<&'static str> {
        if text.trim().is_empty() {
            return None;
        }
        whatlang::detect(text).map(|info| lang_to_code(info.lang()))
    }

    /// Source-language argument for the translator.
    pub fn detect_source(&self, text: &str) -> &'static str {
        self.detect(text).unwrap_or(AUTO_SOURCE)
    }
}

fn lang_to_code(lang: whatlang::Lang) -> &'static str {
    use whatlang::Lang::*;
    match lang {
        Eng => "en",
        Cmn => "zh",
        Jpn => "ja",
        Kor => "ko",
        Deu => "de",
        Fra => "fr",
        Spa => "es",
        Rus => "ru",
        Por => "pt",
        Ita => "it",
        _ => "other",
    }
}
