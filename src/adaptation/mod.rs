pub mod culture;
pub mod detect;
pub mod rules;
pub mod suggestion;

pub use culture::{context_for_label, ContextType, Culture, AUTO_CULTURE, FALLBACK_CULTURE};
pub use detect::LanguageDetector;
pub use rules::{classify_and_rewrite, is_intercepted, SemanticType, REWRITE_RULES};
pub use suggestion::suggestion_for;

use crate::translation::BaiduTranslator;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Translation emitted in place of a vendor call for intercepted text.
pub const INTERCEPTED_TRANSLATION: &str = "—";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Adaptation {
    pub detected_speaker_culture: String,
    pub context_type: ContextType,
    pub semantic_type: SemanticType,
    pub rewritten_text: String,
    pub translated_text: String,
    pub culture_suggest: String,
}

pub struct CultureAdapter {
    detector: LanguageDetector,
    translator: BaiduTranslator,
}

impl CultureAdapter {
    pub fn new(translator: BaiduTranslator) -> Self {
        Self {
            detector: LanguageDetector::new(),
            translator,
        }
    }

    /// `auto` maps the detected language to a country, falling back to
    /// [`FALLBACK_CULTURE`]; any other label is returned verbatim.
    pub fn resolve_culture(&self, text: &str, speaker_culture: &str) -> String {
        if speaker_culture != AUTO_CULTURE {
            return speaker_culture.to_string();
        }
        self.detector
            .detect(text)
            .and_then(Culture::from_language)
            .unwrap_or(FALLBACK_CULTURE)
            .label()
            .to_string()
    }

    pub async fn adapt(&self, text: &str, speaker_culture: &str, target_lang: &str) -> Adaptation {
        let detected_speaker_culture = self.resolve_culture(text, speaker_culture);
        let context_type = context_for_label(&detected_speaker_culture);
        let (semantic_type, rewritten_text) = classify_and_rewrite(text, context_type);

        let translated_text = if is_intercepted(&rewritten_text) {
            debug!("Rewrite intercepted, skipping translation");
            INTERCEPTED_TRANSLATION.to_string()
        } else {
            let src_lang = self.detector.detect_source(text);
            self.translator
                .translate(&rewritten_text, src_lang, target_lang)
                .await
        };

        info!(
            culture = %detected_speaker_culture,
            context = %context_type,
            semantic = %semantic_type,
            "Adapted utterance"
        );

        Adaptation {
            culture_suggest: suggestion_for(context_type, semantic_type).to_string(),
            detected_speaker_culture,
            context_type,
            semantic_type,
            rewritten_text,
            translated_text,
        }
    }
}
