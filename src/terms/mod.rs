//! File-backed list of custom correction terms.

pub mod manager;

use crate::checker::rules::{CorrectionTerm, Language};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TermError {
    #[error("term text must not be blank")]
    BlankTerm,
    #[error("no term with id {0}")]
    NotFound(u64),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TermEntry {
    pub id: u64,
    pub from_text: String,
    pub to_text: String,
    #[serde(default)]
    pub language: Language,
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct TermStore {
    #[serde(default)]
    pub terms: Vec<TermEntry>,

    #[serde(skip)]
    path: PathBuf,
}

impl TermStore {
    /// Load the store at `path`. A missing file is an empty store.
    pub fn load(path: &Path) -> Result<Self> {
        let mut store = if path.exists() {
            let contents = fs::read_to_string(path)
                .with_context(|| format!("Failed to read term list: {}", path.display()))?;
            toml::from_str::<TermStore>(&contents)
                .with_context(|| format!("Failed to parse term list: {}", path.display()))?
        } else {
            TermStore::default()
        };
        store.path = path.to_path_buf();
        Ok(store)
    }

    pub fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).context("Failed to create term list directory")?;
            }
        }
        let contents = toml::to_string_pretty(self).context("Failed to serialize term list")?;
        fs::write(&self.path, contents)
            .with_context(|| format!("Failed to write term list: {}", self.path.display()))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn add(&mut self, from_text: &str, to_text: &str, language: Language) -> Result<u64, TermError> {
        let from_text = from_text.trim();
        let to_text = to_text.trim();
        if from_text.is_empty() || to_text.is_empty() {
            return Err(TermError::BlankTerm);
        }

        let id = self.terms.iter().map(|t| t.id).max().unwrap_or(0) + 1;
        self.terms.push(TermEntry {
            id,
            from_text: from_text.to_string(),
            to_text: to_text.to_string(),
            language,
            active: true,
        });
        Ok(id)
    }

    pub fn remove(&mut self, id: u64) -> Result<TermEntry, TermError> {
        let pos = self
            .terms
            .iter()
            .position(|t| t.id == id)
            .ok_or(TermError::NotFound(id))?;
        Ok(self.terms.remove(pos))
    }

    pub fn set_active(&mut self, id: u64, active: bool) -> Result<(), TermError> {
        let entry = self
            .terms
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or(TermError::NotFound(id))?;
        entry.active = active;
        Ok(())
    }

    /// Active entries, in stored order, ready for rule building.
    pub fn active_terms(&self) -> Vec<CorrectionTerm> {
        self.terms
            .iter()
            .filter(|t| t.active)
            .map(|t| CorrectionTerm::new(t.from_text.clone(), t.to_text.clone(), t.language))
            .collect()
    }
}
