use super::rules::{CorrectionRule, CorrectionTerm};
use super::{assemble_rules, spellcheck_text, SpellcheckError, Spellchecked};
use crate::terms::TermStore;
use crate::{Config, FileReport};
use anyhow::{Context, Result};
use rayon::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};

/// Holds the assembled rule list and runs it over texts and files.
pub struct Corrector {
    rules: Vec<CorrectionRule>,
}

impl Corrector {
    pub fn new(config: &Config) -> Result<Self> {
        let terms_path = config.terms_path()?;
        let store = TermStore::load(&terms_path)?;
        let terms = store.active_terms();
        log::debug!(
            "Loaded {} active custom terms from {}",
            terms.len(),
            terms_path.display()
        );
        Ok(Self::from_terms(&terms, config.use_builtin))
    }

    pub fn from_terms(terms: &[CorrectionTerm], use_builtin: bool) -> Self {
        Self {
            rules: assemble_rules(terms, use_builtin),
        }
    }

    pub fn rules(&self) -> &[CorrectionRule] {
        &self.rules
    }

    pub fn check_text(&self, text: &str) -> Result<Spellchecked, SpellcheckError> {
        spellcheck_text(text, &self.rules)
    }

    pub fn check_file(&self, path: &Path) -> Result<FileReport> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read file: {}", path.display()))?;

        Ok(FileReport {
            path: path.to_path_buf(),
            outcome: self.check_text(&content),
        })
    }

    /// Check files in parallel, keeping input order in the output.
    pub fn check_files(&self, paths: &[PathBuf]) -> Result<Vec<FileReport>> {
        paths.par_iter().map(|path| self.check_file(path)).collect()
    }

    /// Write the corrected text back. Returns whether the file was touched.
    pub fn apply_fix(report: &FileReport) -> Result<bool> {
        match &report.outcome {
            Ok(result) if result.is_changed() => {
                fs::write(&report.path, &result.corrected).with_context(|| {
                    format!("Failed to write file: {}", report.path.display())
                })?;
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}
