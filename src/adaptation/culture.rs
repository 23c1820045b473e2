use serde::{Deserialize, Serialize};

/// Country used when `auto` resolution cannot map the detected language.
pub const FALLBACK_CULTURE: Culture = Culture::China;

/// Sentinel accepted in place of a country label.
pub const AUTO_CULTURE: &str = "auto";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Culture {
    China,
    Japan,
    Korea,
    Usa,
    Germany,
    Canada,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ContextType {
    #[serde(rename = "high-context")]
    HighContext,
    #[serde(rename = "low-context")]
    LowContext,
    #[serde(rename = "unknown")]
    Unknown,
}

impl Culture {
    pub fn label(&self) -> &'static str {
        match self {
            Culture::China => "China",
            Culture::Japan => "Japan",
            Culture::Korea => "Korea",
            Culture::Usa => "USA",
            Culture::Germany => "Germany",
            Culture::Canada => "Canada",
        }
    }

    /// Accepts the English labels and the Chinese labels older clients send.
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "China" | "中国" => Some(Culture::China),
            "Japan" | "日本" => Some(Culture::Japan),
            "Korea" | "韩国" => Some(Culture::Korea),
            "USA" | "美国" => Some(Culture::Usa),
            "Germany" | "德国" => Some(Culture::Germany),
            "Canada" | "加拿大" => Some(Culture::Canada),
            _ => None,
        }
    }

    pub fn context(&self) -> ContextType {
        match self {
            Culture::China | Culture::Japan | Culture::Korea => ContextType::HighContext,
            Culture::Usa | Culture::Germany | Culture::Canada => ContextType::LowContext,
        }
    }

    /// Language-to-culture table used by `auto` resolution.
    pub fn from_language(lang: &str) -> Option<Self> {
        match lang {
            "zh" => Some(Culture::China),
            "ja" => Some(Culture::Japan),
            "ko" => Some(Culture::Korea),
            "en" => Some(Culture::Usa),
            "de" => Some(Culture::Germany),
            _ => None,
        }
    }
}

impl std::fmt::Display for Culture {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl ContextType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContextType::HighContext => "high-context",
            ContextType::LowContext => "low-context",
            ContextType::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for ContextType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Context for a culture label; labels outside the table are `Unknown`.
pub fn context_for_label(label: &str) -> ContextType {
    Culture::from_label(label)
        .map(|c| c.context())
        .unwrap_or(ContextType::Unknown)
}
