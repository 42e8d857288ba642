pub mod builtin;
pub mod corrector;
pub mod rules;

pub use corrector::Corrector;

use regex::NoExpand;
use rules::{build_custom_rules, CorrectionRule, CorrectionTerm};
use serde::Serialize;
use thiserror::Error;

/// Only this many chars are corrected; the rest is passed through untouched.
pub const MAX_TEXT_LENGTH: usize = 20_000;

/// Inputs at or below this many chars skip the shrinkage guard.
pub const MIN_LENGTH_CHECK_THRESHOLD: usize = 20;

/// A corrected text shorter than this fraction of the input is rejected.
pub const MIN_LENGTH_RATIO: f64 = 0.5;

/// One match-and-replace event.
///
/// `index` is the char offset of the match in the text as it stood right
/// before the rule that produced it ran, not in the final output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CorrectionChange {
    pub from: String,
    pub to: String,
    pub index: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Applied {
    pub corrected: String,
    pub changes: Vec<CorrectionChange>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Spellchecked {
    pub original: String,
    pub corrected: String,
    pub changes: Vec<CorrectionChange>,
    pub truncated: bool,
}

impl Spellchecked {
    pub fn is_changed(&self) -> bool {
        self.original != self.corrected
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SpellcheckError {
    #[error("please enter text")]
    EmptyText,
    #[error("correction result is abnormal")]
    CorrectionInvalid,
}

impl SpellcheckError {
    /// Machine-readable code.
    pub fn code(&self) -> &'static str {
        match self {
            SpellcheckError::EmptyText => "EMPTY_TEXT",
            SpellcheckError::CorrectionInvalid => "CORRECTION_INVALID",
        }
    }
}

/// Custom rules first, then (optionally) the built-in table.
pub fn assemble_rules(terms: &[CorrectionTerm], use_builtin: bool) -> Vec<CorrectionRule> {
    let mut rules = build_custom_rules(terms);
    if use_builtin {
        rules.extend_from_slice(builtin::builtin_rules());
    }
    rules
}

/// Run `rules` in order over an accumulating string.
///
/// Every rule sees the output of the rules before it and is applied as a
/// single replace-all pass.
pub fn apply_replacement_rules(text: &str, rules: &[CorrectionRule]) -> Applied {
    let mut corrected = text.to_string();
    let mut changes = Vec::new();

    for rule in rules {
        let mut found = Vec::new();
        let mut offset = 0;
        let mut last_byte = 0;

        for m in rule.pattern.find_iter(&corrected) {
            offset += corrected[last_byte..m.start()].chars().count();
            last_byte = m.start();
            found.push(CorrectionChange {
                from: m.as_str().to_string(),
                to: rule.replacement.clone(),
                index: offset,
            });
        }

        if found.is_empty() {
            continue;
        }

        corrected = rule
            .pattern
            .replace_all(&corrected, NoExpand(&rule.replacement))
            .into_owned();
        changes.extend(found);
    }

    Applied { corrected, changes }
}

/// Correct `text` with `rules`, guarding against empty input and degenerate output.
pub fn spellcheck_text(
    text: &str,
    rules: &[CorrectionRule],
) -> Result<Spellchecked, SpellcheckError> {
    if text.trim().is_empty() {
        return Err(SpellcheckError::EmptyText);
    }

    let (working, remainder) = split_at_char(text, MAX_TEXT_LENGTH);
    let truncated = !remainder.is_empty();
    if truncated {
        log::debug!(
            "Input exceeds {} chars, leaving {} chars uncorrected",
            MAX_TEXT_LENGTH,
            remainder.chars().count()
        );
    }

    let Applied { mut corrected, changes } = apply_replacement_rules(working, rules);
    corrected.push_str(remainder);

    if corrected.trim().is_empty() {
        log::debug!("Correction produced blank output");
        return Err(SpellcheckError::CorrectionInvalid);
    }

    let original_len = text.chars().count();
    if original_len > MIN_LENGTH_CHECK_THRESHOLD {
        let corrected_len = corrected.chars().count();
        if (corrected_len as f64) < original_len as f64 * MIN_LENGTH_RATIO {
            log::debug!(
                "Correction shrank text from {} to {} chars",
                original_len,
                corrected_len
            );
            return Err(SpellcheckError::CorrectionInvalid);
        }
    }

    Ok(Spellchecked {
        original: text.to_string(),
        corrected,
        changes,
        truncated,
    })
}

fn split_at_char(text: &str, max_chars: usize) -> (&str, &str) {
    match text.char_indices().nth(max_chars) {
        Some((byte, _)) => text.split_at(byte),
        None => (text, ""),
    }
}

#[cfg(test)]
mod tests {
    use super::rules::Language;
    use super::*;

    fn builtins() -> Vec<CorrectionRule> {
        assemble_rules(&[], true)
    }

    fn rule(from: &str, to: &str) -> CorrectionRule {
        CorrectionRule::literal(from, to).unwrap()
    }

    #[test]
    fn test_correct_text_is_unchanged() {
        let result = spellcheck_text("Hello world 123", &builtins()).unwrap();
        assert_eq!(result.corrected, result.original);
        assert!(result.changes.is_empty());
        assert!(!result.truncated);
        assert!(!result.is_changed());
    }

    #[test]
    fn test_known_substitutions() {
        let result = spellcheck_text("됬어", &builtins()).unwrap();
        assert_eq!(result.corrected, "됐어");
        assert_eq!(
            result.changes,
            vec![CorrectionChange {
                from: "됬".to_string(),
                to: "됐".to_string(),
                index: 0
            }]
        );

        let result = spellcheck_text("되요", &builtins()).unwrap();
        assert_eq!(result.corrected, "돼요");
    }

    #[test]
    fn test_builtin_order_is_observable() {
        // "되요" fires before "안되요" gets a chance.
        let result = spellcheck_text("안되요", &builtins()).unwrap();
        assert_eq!(result.corrected, "안돼요");
        assert_eq!(result.changes.len(), 1);
    }

    #[test]
    fn test_empty_input() {
        for text in ["", "   ", "\n\t "] {
            let err = spellcheck_text(text, &builtins()).unwrap_err();
            assert_eq!(err, SpellcheckError::EmptyText);
            assert_eq!(err.code(), "EMPTY_TEXT");
        }
    }

    #[test]
    fn test_truncation_preserves_length() {
        let input = "a".repeat(MAX_TEXT_LENGTH + 10);
        let result = spellcheck_text(&input, &builtins()).unwrap();
        assert!(result.truncated);
        assert_eq!(result.corrected.len(), input.len());
        assert_eq!(result.corrected, input);
    }

    #[test]
    fn test_remainder_is_never_corrected() {
        let input = format!("됬{}됬어", "가".repeat(MAX_TEXT_LENGTH - 1));
        let result = spellcheck_text(&input, &builtins()).unwrap();
        assert!(result.truncated);
        assert!(result.corrected.starts_with("됐"));
        assert!(result.corrected.ends_with("됬어"));
        assert_eq!(result.changes.len(), 1);
        assert_eq!(result.corrected.chars().count(), input.chars().count());
    }

    #[test]
    fn test_input_at_cap_is_not_truncated() {
        let input = "가".repeat(MAX_TEXT_LENGTH);
        let result = spellcheck_text(&input, &[]).unwrap();
        assert!(!result.truncated);
    }

    #[test]
    fn test_english_terms_use_word_boundaries() {
        let rules = assemble_rules(&[CorrectionTerm::new("cat", "dog", Language::En)], false);
        assert_eq!(spellcheck_text("cat", &rules).unwrap().corrected, "dog");
        assert_eq!(
            spellcheck_text("The cat sat", &rules).unwrap().corrected,
            "The dog sat"
        );
        let untouched = spellcheck_text("concatenate", &rules).unwrap();
        assert_eq!(untouched.corrected, "concatenate");
        assert!(untouched.changes.is_empty());
    }

    #[test]
    fn test_english_terms_match_before_korean_particles() {
        let rules = assemble_rules(&[CorrectionTerm::new("mv", "music video", Language::En)], false);
        let result = spellcheck_text("신곡 MV를 봤다", &rules).unwrap();
        assert_eq!(result.corrected, "신곡 music video를 봤다");
        assert_eq!(result.changes[0].from, "MV");
        assert_eq!(result.changes[0].index, 3);
    }

    #[test]
    fn test_korean_terms_match_substrings() {
        let rules = assemble_rules(&[CorrectionTerm::new("뮤비", "뮤직비디오", Language::Ko)], false);
        let result = spellcheck_text("신곡뮤비공개", &rules).unwrap();
        assert_eq!(result.corrected, "신곡뮤직비디오공개");
        assert_eq!(result.changes[0].index, 2);
    }

    #[test]
    fn test_metacharacters_match_literally() {
        let rules = assemble_rules(&[CorrectionTerm::new("a.b", "c", Language::Ko)], false);
        assert_eq!(spellcheck_text("a.b", &rules).unwrap().corrected, "c");
        assert_eq!(spellcheck_text("axb", &rules).unwrap().corrected, "axb");
        assert_eq!(spellcheck_text("a b", &rules).unwrap().corrected, "a b");
    }

    #[test]
    fn test_replacement_is_literal() {
        let result = apply_replacement_rules("ab", &[rule("a", "$1")]);
        assert_eq!(result.corrected, "$1b");
    }

    #[test]
    fn test_rules_apply_sequentially() {
        // The first rule consumes the second rule's target.
        let result = apply_replacement_rules("abc", &[rule("ab", "x"), rule("abc", "y")]);
        assert_eq!(result.corrected, "xc");
        assert_eq!(result.changes.len(), 1);

        // The second rule sees the first rule's output.
        let result = apply_replacement_rules("ab", &[rule("a", "b"), rule("bb", "c")]);
        assert_eq!(result.corrected, "c");
        assert_eq!(result.changes.len(), 2);
    }

    #[test]
    fn test_change_index_is_relative_to_pass_input() {
        let result = apply_replacement_rules("가나다", &[rule("가나", "가"), rule("다", "라")]);
        assert_eq!(result.corrected, "가라");
        assert_eq!(result.changes[0].index, 0);
        assert_eq!(result.changes[1].index, 1);
    }

    #[test]
    fn test_every_match_is_recorded() {
        let result = apply_replacement_rules("됬어 됬다", builtin::builtin_rules());
        assert_eq!(result.corrected, "됐어 됐다");
        let indexes: Vec<usize> = result.changes.iter().map(|c| c.index).collect();
        assert_eq!(indexes, vec![0, 3]);
    }

    #[test]
    fn test_english_matches_keep_original_casing_in_change() {
        let rules = assemble_rules(&[CorrectionTerm::new("mv", "music video", Language::En)], false);
        let result = spellcheck_text("New MV out", &rules).unwrap();
        assert_eq!(result.corrected, "New music video out");
        assert_eq!(result.changes[0].from, "MV");
        assert_eq!(result.changes[0].index, 4);
    }

    #[test]
    fn test_shrinkage_guard() {
        let rules = [rule("abcd", "a")];

        let long = "abcd".repeat(6);
        let err = spellcheck_text(&long, &rules).unwrap_err();
        assert_eq!(err, SpellcheckError::CorrectionInvalid);
        assert_eq!(err.code(), "CORRECTION_INVALID");

        let short = "abcd".repeat(5);
        let result = spellcheck_text(&short, &rules).unwrap();
        assert_eq!(result.corrected, "aaaaa");
    }

    #[test]
    fn test_blank_output_is_rejected() {
        let err = spellcheck_text("뮤비", &[rule("뮤비", " ")]).unwrap_err();
        assert_eq!(err, SpellcheckError::CorrectionInvalid);
    }

    #[test]
    fn test_custom_rules_run_before_builtins() {
        let rules = assemble_rules(&[CorrectionTerm::new("되요", "되어요", Language::Ko)], true);
        let result = spellcheck_text("되요", &rules).unwrap();
        assert_eq!(result.corrected, "되어요");
    }

    #[test]
    fn test_builtin_only_rules() {
        assert_eq!(assemble_rules(&[], true).len(), builtin::BUILTIN_CORRECTIONS.len());
        assert!(assemble_rules(&[], false).is_empty());
    }
}
