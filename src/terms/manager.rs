use super::TermStore;
use crate::checker::builtin::BUILTIN_CORRECTIONS;
use crate::checker::rules::Language;
use anyhow::Result;
use colored::*;
use std::path::Path;

pub fn list_terms(path: &Path) -> Result<()> {
    let store = TermStore::load(path)?;

    if store.terms.is_empty() {
        println!("{}", "No custom terms defined.".yellow());
        println!(
            "Run {} to add one.",
            "hanfix terms add <FROM> <TO>".cyan()
        );
        return Ok(());
    }

    println!("{}", "Custom terms:".bold());
    println!();

    for term in &store.terms {
        let marker = if term.active {
            "✓".green()
        } else {
            "·".dimmed()
        };
        println!(
            "  {} {:>4} [{}] {} → {}",
            marker,
            term.id.to_string().dimmed(),
            term.language.to_string().cyan(),
            term.from_text.red(),
            term.to_text.green()
        );
    }

    println!();
    println!("Term list: {}", store.path().display().to_string().dimmed());

    Ok(())
}

pub fn add_term(path: &Path, from: &str, to: &str, language: &str) -> Result<()> {
    let mut store = TermStore::load(path)?;
    let language = Language::from_tag(Some(language));
    let id = store.add(from, to, language)?;
    store.save()?;

    println!(
        "{} Added term {} [{}] {} → {}",
        "✓".green().bold(),
        id.to_string().cyan(),
        language,
        from.trim(),
        to.trim()
    );

    Ok(())
}

pub fn remove_term(path: &Path, id: u64) -> Result<()> {
    let mut store = TermStore::load(path)?;
    let removed = store.remove(id)?;
    store.save()?;

    println!(
        "{} Removed term {} ({} → {})",
        "✓".green().bold(),
        id.to_string().cyan(),
        removed.from_text,
        removed.to_text
    );

    Ok(())
}

pub fn set_term_active(path: &Path, id: u64, active: bool) -> Result<()> {
    let mut store = TermStore::load(path)?;
    store.set_active(id, active)?;
    store.save()?;

    println!(
        "{} Term {} {}",
        "✓".green().bold(),
        id.to_string().cyan(),
        if active { "enabled" } else { "disabled" }
    );

    Ok(())
}

pub fn list_builtin_rules() {
    println!("{}", "Built-in corrections (applied in this order):".bold());
    println!();
    for (i, (from, to)) in BUILTIN_CORRECTIONS.iter().enumerate() {
        println!(
            "  {:>3} {} → {}",
            (i + 1).to_string().dimmed(),
            from.red(),
            to.green()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_term_lifecycle() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("terms.toml");

        list_terms(&path).unwrap();
        add_term(&path, "뮤비", "뮤직비디오", "ko").unwrap();
        set_term_active(&path, 1, false).unwrap();

        let store = TermStore::load(&path).unwrap();
        assert!(!store.terms[0].active);

        remove_term(&path, 1).unwrap();
        assert!(TermStore::load(&path).unwrap().terms.is_empty());
        assert!(remove_term(&path, 1).is_err());
    }
}
