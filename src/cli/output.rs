use crate::checker::{CorrectionChange, MAX_TEXT_LENGTH};
use crate::FileReport;
use colored::*;
use serde::Serialize;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("Unknown format: {}", s)),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

#[derive(Debug, Serialize)]
struct JsonError<'a> {
    code: &'a str,
    message: String,
}

#[derive(Debug, Serialize)]
struct JsonFile<'a> {
    file: String,
    ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    truncated: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    corrected: Option<&'a str>,
    changes: &'a [CorrectionChange],
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<JsonError<'a>>,
}

#[derive(Debug, Serialize)]
struct JsonOutput<'a> {
    files_checked: usize,
    total_changes: usize,
    files: Vec<JsonFile<'a>>,
}

pub fn print_reports(
    reports: &[FileReport],
    colored_output: bool,
    format: &OutputFormat,
) -> serde_json::Result<()> {
    match format {
        OutputFormat::Text => {
            for report in reports {
                print_text_report(report, colored_output);
            }
        }
        OutputFormat::Json => println!("{}", render_json(reports)?),
    }
    Ok(())
}

pub fn render_json(reports: &[FileReport]) -> serde_json::Result<String> {
    let files = reports
        .iter()
        .map(|report| match &report.outcome {
            Ok(result) => JsonFile {
                file: display_name(&report.path),
                ok: true,
                truncated: Some(result.truncated),
                corrected: Some(&result.corrected),
                changes: &result.changes,
                error: None,
            },
            Err(e) => JsonFile {
                file: display_name(&report.path),
                ok: false,
                truncated: None,
                corrected: None,
                changes: &[],
                error: Some(JsonError {
                    code: e.code(),
                    message: e.to_string(),
                }),
            },
        })
        .collect();

    let output = JsonOutput {
        files_checked: reports.len(),
        total_changes: reports.iter().map(FileReport::change_count).sum(),
        files,
    };

    serde_json::to_string_pretty(&output)
}

fn display_name(path: &Path) -> String {
    if path.as_os_str().is_empty() {
        "<stdin>".to_string()
    } else {
        path.display().to_string()
    }
}

fn print_text_report(report: &FileReport, colored_output: bool) {
    let file_name = display_name(&report.path);

    match &report.outcome {
        Ok(result) if result.changes.is_empty() => {}
        Ok(result) => {
            if colored_output {
                println!("\n{}", file_name.bold().underline());
            } else {
                println!("\n{}", file_name);
            }

            for change in &result.changes {
                let position = format!("@{}", change.index);
                if colored_output {
                    println!(
                        "  {} {} {} {}",
                        position.blue().bold(),
                        change.from.red().bold(),
                        "→".dimmed(),
                        change.to.green()
                    );
                } else {
                    println!("  {} {} → {}", position, change.from, change.to);
                }
            }

            if result.truncated {
                let note = format!(
                    "only the first {} characters were corrected",
                    MAX_TEXT_LENGTH
                );
                if colored_output {
                    println!("  {}", note.yellow());
                } else {
                    println!("  {}", note);
                }
            }
        }
        Err(e) => {
            if colored_output {
                println!(
                    "\n{} {} {} {}",
                    "✗".red().bold(),
                    file_name.bold(),
                    e.code().red(),
                    e.to_string().dimmed()
                );
            } else {
                println!("\n✗ {} {} {}", file_name, e.code(), e);
            }
        }
    }
}

pub fn print_check_summary(total_changes: usize, files: usize, colored: bool) {
    println!();
    if total_changes == 0 {
        if colored {
            println!("{}", "✓ No corrections needed!".green().bold());
        } else {
            println!("✓ No corrections needed!");
        }
    } else {
        let change_word = if total_changes == 1 { "correction" } else { "corrections" };
        let file_word = if files == 1 { "file" } else { "files" };
        if colored {
            println!(
                "{} {} {} suggested in {} {}",
                "✗".red().bold(),
                total_changes.to_string().red().bold(),
                change_word,
                files,
                file_word
            );
        } else {
            println!(
                "✗ {} {} suggested in {} {}",
                total_changes, change_word, files, file_word
            );
        }
    }
}

pub fn print_fix_summary(total_fixed: usize, colored: bool) {
    println!();
    if total_fixed == 0 {
        if colored {
            println!("{}", "No files changed.".green().bold());
        } else {
            println!("No files changed.");
        }
    } else {
        let file_word = if total_fixed == 1 { "file" } else { "files" };
        if colored {
            println!(
                "{} {} {} corrected",
                "✓".green().bold(),
                total_fixed.to_string().green().bold(),
                file_word
            );
        } else {
            println!("✓ {} {} corrected", total_fixed, file_word);
        }
    }
}
