use super::culture::ContextType;
use super::rules::SemanticType;

pub const OFFENSE_SUGGESTION: &str = "Avoid negative statements about nations or ethnic groups; cross-cultural communication should stay respectful and equal.";

pub const HIGH_CONTEXT_SUGGESTION: &str = "High-context advice: convey your attitude through tactful wording and avoid direct criticism; if the listener comes from a low-context culture, make the meaning more explicit.";

pub const LOW_CONTEXT_SUGGESTION: &str = "Low-context advice: state your point directly and avoid excessive indirection; if the listener comes from a high-context culture, soften the tone.";

pub fn suggestion_for(context: ContextType, semantic: SemanticType) -> &'static str {
    if semantic == SemanticType::SevereOffense {
        return OFFENSE_SUGGESTION;
    }
    match context {
        ContextType::HighContext => HIGH_CONTEXT_SUGGESTION,
        _ => LOW_CONTEXT_SUGGESTION,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offense_overrides_context() {
        assert_eq!(
            suggestion_for(ContextType::HighContext, SemanticType::SevereOffense),
            OFFENSE_SUGGESTION
        );
        assert_eq!(
            suggestion_for(ContextType::Unknown, SemanticType::SevereOffense),
            OFFENSE_SUGGESTION
        );
    }

    #[test]
    fn unknown_context_gets_low_context_advice() {
        assert_eq!(
            suggestion_for(ContextType::Unknown, SemanticType::Neutral),
            LOW_CONTEXT_SUGGESTION
        );
    }

    #[test]
    fn keyed_by_context_otherwise() {
        assert_eq!(
            suggestion_for(ContextType::HighContext, SemanticType::Sarcasm),
            HIGH_CONTEXT_SUGGESTION
        );
        assert_eq!(
            suggestion_for(ContextType::LowContext, SemanticType::Neutral),
            LOW_CONTEXT_SUGGESTION
        );
    }
}
