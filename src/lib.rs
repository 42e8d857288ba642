pub mod checker;
pub mod cli;
pub mod config;
pub mod terms;

pub use checker::rules::{build_custom_rules, CorrectionRule, CorrectionTerm, Language};
pub use checker::{
    apply_replacement_rules, spellcheck_text, CorrectionChange, Corrector, SpellcheckError,
    Spellchecked,
};
pub use config::Config;

#[derive(Debug, Clone, Default)]
pub struct CheckResult {
    pub change_count: usize,
    pub fixed_count: usize,
    pub failed_count: usize,
}

/// Outcome of correcting one file.
#[derive(Debug, Clone)]
pub struct FileReport {
    pub path: std::path::PathBuf,
    pub outcome: Result<Spellchecked, SpellcheckError>,
}

impl FileReport {
    pub fn change_count(&self) -> usize {
        self.outcome.as_ref().map_or(0, |r| r.changes.len())
    }
}
