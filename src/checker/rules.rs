use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Language tag carried by a correction term.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Language {
    #[default]
    Ko,
    En,
}

impl Language {
    /// Resolve a raw tag. Anything other than `EN` (in any case) is Korean.
    pub fn from_tag(tag: Option<&str>) -> Self {
        match tag.map(|t| t.trim().to_uppercase()) {
            Some(t) if t == "EN" => Language::En,
            _ => Language::Ko,
        }
    }
}

impl<'de> Deserialize<'de> for Language {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let tag = Option::<String>::deserialize(deserializer)?;
        Ok(Language::from_tag(tag.as_deref()))
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Language::Ko => write!(f, "KO"),
            Language::En => write!(f, "EN"),
        }
    }
}

/// A from/to pair supplied by whoever manages the custom term list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorrectionTerm {
    pub from_text: String,
    pub to_text: String,
    #[serde(default)]
    pub language: Option<String>,
}

impl CorrectionTerm {
    pub fn new(from_text: impl Into<String>, to_text: impl Into<String>, language: Language) -> Self {
        Self {
            from_text: from_text.into(),
            to_text: to_text.into(),
            language: Some(language.to_string()),
        }
    }
}

/// Compiled pattern plus its literal replacement.
#[derive(Debug, Clone)]
pub struct CorrectionRule {
    pub pattern: Regex,
    pub replacement: String,
}

impl CorrectionRule {
    /// Rule matching `from` literally, anywhere, case-sensitively.
    pub fn literal(from: &str, replacement: &str) -> Result<Self, regex::Error> {
        Ok(Self {
            pattern: Regex::new(&escape_pattern(from))?,
            replacement: replacement.to_string(),
        })
    }

    /// Rule matching `from` as a whole word, ignoring case.
    ///
    /// Boundaries are ASCII-only, so a Hangul particle right after the term
    /// (`MV를`) still counts as a boundary.
    pub fn bounded(from: &str, replacement: &str) -> Result<Self, regex::Error> {
        let pattern = RegexBuilder::new(&format!(r"(?-u:\b){}(?-u:\b)", escape_pattern(from)))
            .case_insensitive(true)
            .build()?;
        Ok(Self {
            pattern,
            replacement: replacement.to_string(),
        })
    }
}

/// Escape every regex metacharacter so the text matches only itself.
pub fn escape_pattern(text: &str) -> String {
    regex::escape(text)
}

/// Compile custom terms into rules, preserving order.
///
/// Terms whose `from_text` or `to_text` is blank after trimming are dropped
/// without error. `EN` terms get word boundaries and case-insensitive
/// matching; everything else is a raw substring match.
pub fn build_custom_rules(terms: &[CorrectionTerm]) -> Vec<CorrectionRule> {
    terms
        .iter()
        .filter_map(|term| {
            let from = term.from_text.trim();
            let to = term.to_text.trim();
            if from.is_empty() || to.is_empty() {
                log::debug!("Skipping blank correction term {:?}", term);
                return None;
            }

            let built = match Language::from_tag(term.language.as_deref()) {
                Language::En => CorrectionRule::bounded(from, to),
                Language::Ko => CorrectionRule::literal(from, to),
            };

            match built {
                Ok(rule) => Some(rule),
                Err(e) => {
                    log::warn!("Failed to compile correction term '{}': {}", from, e);
                    None
                }
            }
        })
        .collect()
}
