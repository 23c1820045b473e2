//! Ordered semantic rewrite rules.
//!
//! A rule fires when the text contains at least one trigger from each of its
//! two sets. Rules are scanned in [`REWRITE_RULES`] order and the first match
//! wins. Rules with a context gate only fire for that speaker context; the
//! offense rule has no gate.
//!
//! Trigger lists are literal and mix languages; matching is plain substring
//! containment.

use super::culture::ContextType;
use serde::{Deserialize, Serialize};

/// Rewritten text emitted by the offense rule. Translation is skipped when the
/// rewrite carries this marker.
pub const INTERCEPTION_MARKER: &str = "[Blocked]";

const INTERCEPTION_TEXT: &str =
    "[Blocked] This content contains national or ethnic offense and violates cross-cultural communication norms";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SemanticType {
    #[serde(rename = "high-context sarcasm")]
    Sarcasm,
    #[serde(rename = "high-context polite refusal")]
    PoliteRefusal,
    #[serde(rename = "severe cultural offense")]
    SevereOffense,
    #[serde(rename = "neutral")]
    Neutral,
}

impl SemanticType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SemanticType::Sarcasm => "high-context sarcasm",
            SemanticType::PoliteRefusal => "high-context polite refusal",
            SemanticType::SevereOffense => "severe cultural offense",
            SemanticType::Neutral => "neutral",
        }
    }
}

impl std::fmt::Display for SemanticType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy)]
pub enum Transform {
    /// Sequential literal replacements, applied in order.
    Replace(&'static [(&'static str, &'static str)]),
    /// Discards the text and emits a fixed message.
    Intercept(&'static str),
}

impl Transform {
    pub fn apply(&self, text: &str) -> String {
        match self {
            Transform::Replace(pairs) => pairs
                .iter()
                .fold(text.to_string(), |acc, (from, to)| acc.replace(from, to)),
            Transform::Intercept(message) => (*message).to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct RewriteRule {
    pub semantic: SemanticType,
    pub triggers_a: &'static [&'static str],
    pub triggers_b: &'static [&'static str],
    pub context_gate: Option<ContextType>,
    pub transform: Transform,
}

impl RewriteRule {
    pub fn matches(&self, text: &str, context: ContextType) -> bool {
        if let Some(gate) = self.context_gate {
            if gate != context {
                return false;
            }
        }
        contains_any(text, self.triggers_a) && contains_any(text, self.triggers_b)
    }
}

fn contains_any(text: &str, triggers: &[&str]) -> bool {
    triggers.iter().any(|t| text.contains(t))
}

pub const REWRITE_RULES: [RewriteRule; 3] = [
    RewriteRule {
        semantic: SemanticType::Sarcasm,
        triggers_a: &["你真厉害", "你好聪明", "真棒", "amazing"],
        triggers_b: &["迟到", "忘记", "搞不定", "想不明白", "late"],
        context_gate: Some(ContextType::HighContext),
        transform: Transform::Replace(&[
            ("真厉害", "太离谱了"),
            ("好聪明", "怎么回事"),
            ("真棒", "太不负责任了"),
            ("amazing", "太离谱了"),
        ]),
    },
    RewriteRule {
        semantic: SemanticType::PoliteRefusal,
        triggers_a: &["还不错", "挺好的"],
        triggers_b: &["再改改", "不太适合", "考虑下"],
        context_gate: Some(ContextType::HighContext),
        transform: Transform::Replace(&[("还不错", "这个方案不合适"), ("挺好的", "我不能接受")]),
    },
    RewriteRule {
        semantic: SemanticType::SevereOffense,
        triggers_a: &["你们国家", "你们民族", "your country"],
        triggers_b: &["差", "垃圾", "low", "不行"],
        context_gate: None,
        transform: Transform::Intercept(INTERCEPTION_TEXT),
    },
];

/// Classifies `text` and returns the rewrite of the first matching rule, or
/// `Neutral` with the text unchanged.
pub fn classify_and_rewrite(text: &str, context: ContextType) -> (SemanticType, String) {
    REWRITE_RULES
        .iter()
        .find(|rule| rule.matches(text, context))
        .map(|rule| (rule.semantic, rule.transform.apply(text)))
        .unwrap_or_else(|| (SemanticType::Neutral, text.to_string()))
}

pub fn is_intercepted(rewritten: &str) -> bool {
    rewritten.contains(INTERCEPTION_MARKER)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sarcasm_rewrites_praise_into_criticism() {
        let (semantic, text) = classify_and_rewrite("你真厉害，又迟到了", ContextType::HighContext);
        assert_eq!(semantic, SemanticType::Sarcasm);
        assert_eq!(text, "你太离谱了，又迟到了");
    }

    #[test]
    fn english_sarcasm_trigger_is_replaced() {
        let (semantic, text) = classify_and_rewrite("amazing, late again", ContextType::HighContext);
        assert_eq!(semantic, SemanticType::Sarcasm);
        assert_eq!(text, "太离谱了, late again");
    }

    #[test]
    fn polite_refusal_becomes_explicit() {
        let (semantic, text) =
            classify_and_rewrite("这个方案还不错，不过再改改吧", ContextType::HighContext);
        assert_eq!(semantic, SemanticType::PoliteRefusal);
        assert_eq!(text, "这个方案这个方案不合适，不过再改改吧");
    }

    #[test]
    fn gated_rules_do_not_fire_for_low_context() {
        let input = "你真厉害，又迟到了";
        let (semantic, text) = classify_and_rewrite(input, ContextType::LowContext);
        assert_eq!(semantic, SemanticType::Neutral);
        assert_eq!(text, input);

        let (semantic, _) = classify_and_rewrite("挺好的，考虑下", ContextType::Unknown);
        assert_eq!(semantic, SemanticType::Neutral);
    }

    #[test]
    fn offense_fires_regardless_of_context() {
        for context in [
            ContextType::HighContext,
            ContextType::LowContext,
            ContextType::Unknown,
        ] {
            let (semantic, text) = classify_and_rewrite("your country is so low", context);
            assert_eq!(semantic, SemanticType::SevereOffense);
            assert!(is_intercepted(&text));
        }
    }

    #[test]
    fn first_matching_rule_wins() {
        // Matches both the sarcasm rule and the offense rule.
        let input = "你真厉害，你们国家总是迟到，真差";
        let (semantic, _) = classify_and_rewrite(input, ContextType::HighContext);
        assert_eq!(semantic, SemanticType::Sarcasm);

        // Without the high-context gate, it falls through to the offense rule.
        let (semantic, _) = classify_and_rewrite(input, ContextType::LowContext);
        assert_eq!(semantic, SemanticType::SevereOffense);
    }

    #[test]
    fn one_trigger_set_alone_is_not_enough() {
        let (semantic, _) = classify_and_rewrite("你真厉害", ContextType::HighContext);
        assert_eq!(semantic, SemanticType::Neutral);
        let (semantic, _) = classify_and_rewrite("your country", ContextType::LowContext);
        assert_eq!(semantic, SemanticType::Neutral);
    }

    #[test]
    fn neutral_text_is_not_intercepted() {
        let (semantic, text) = classify_and_rewrite("今天天气很好", ContextType::HighContext);
        assert_eq!(semantic, SemanticType::Neutral);
        assert!(!is_intercepted(&text));
    }
}
