use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use clap_complete::{generate, Shell};
use dialoguer::Confirm;
use hanfix::cli::output::OutputFormat;
use hanfix::{cli, terms, CheckResult, Config, Corrector, FileReport, SpellcheckError};
use std::io::{self, Read};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "hanfix")]
#[command(version, about = "A rule-based Korean/English text corrector", long_about = None)]
struct Cli {
    /// Files or directories to correct (reads stdin when omitted)
    #[arg(value_name = "FILES")]
    files: Vec<PathBuf>,

    /// Write corrections back (stdin input is echoed corrected to stdout)
    #[arg(short, long)]
    fix: bool,

    /// Ask before rewriting each file
    #[arg(short, long, requires = "fix")]
    interactive: bool,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,

    /// Exit with code 0 even if corrections are found
    #[arg(long)]
    no_fail: bool,

    /// Only apply custom terms, skip the built-in table
    #[arg(long)]
    no_builtin: bool,

    /// Custom term list (TOML)
    #[arg(long, env = "HANFIX_TERMS", value_name = "PATH")]
    terms: Option<PathBuf>,

    /// Output format (text, json)
    #[arg(short = 'o', long, default_value = "text")]
    format: OutputFormat,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Generate shell completion script
    #[arg(long, value_name = "SHELL")]
    completion: Option<Shell>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Parser, Debug)]
enum Commands {
    /// Custom term management
    Terms {
        #[command(subcommand)]
        action: TermCommands,
    },
    /// List the built-in corrections in application order
    Rules,
}

#[derive(Parser, Debug)]
enum TermCommands {
    /// List custom terms
    List,
    /// Add a custom term
    Add {
        /// Text to look for
        from: String,
        /// Replacement text
        to: String,
        /// Language tag (ko, en); en terms match whole words, ignoring case
        #[arg(short, long, default_value = "ko")]
        lang: String,
    },
    /// Remove a custom term
    Remove { id: u64 },
    /// Re-enable a disabled term
    Enable { id: u64 },
    /// Keep a term but stop applying it
    Disable { id: u64 },
}

fn main() -> Result<()> {
    let mut cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    if cli.no_color {
        colored::control::set_override(false);
    }

    if let Some(shell) = cli.completion {
        let mut cmd = Cli::command();
        generate(shell, &mut cmd, "hanfix", &mut io::stdout());
        return Ok(());
    }

    let config = Config::load(cli.terms.clone(), cli.no_builtin)?;

    if let Some(command) = cli.command.take() {
        return handle_command(command, &config);
    }

    let corrector = Corrector::new(&config)?;
    let colored = !cli.no_color;

    if cli.files.is_empty() {
        return run_stdin(&corrector, &cli);
    }

    let files = cli::collect_files(&cli.files, &config.extensions);
    if files.is_empty() {
        anyhow::bail!("No files to check. Use --help for usage information.");
    }

    let reports = corrector.check_files(&files)?;
    let mut result = CheckResult::default();

    for report in &reports {
        result.change_count += report.change_count();
        if matches!(report.outcome, Err(SpellcheckError::CorrectionInvalid)) {
            result.failed_count += 1;
        }
        if cli.fix
            && report.change_count() > 0
            && confirm_fix(&cli, report)?
            && Corrector::apply_fix(report)?
        {
            result.fixed_count += 1;
        }
    }

    cli::output::print_reports(&reports, colored, &cli.format)?;

    if cli.format == OutputFormat::Text {
        if cli.fix {
            cli::output::print_fix_summary(result.fixed_count, colored);
        } else {
            cli::output::print_check_summary(result.change_count, files.len(), colored);
        }
    }

    let failing = result.failed_count > 0 || (!cli.fix && result.change_count > 0);
    if failing && !cli.no_fail {
        std::process::exit(1);
    }

    Ok(())
}

fn run_stdin(corrector: &Corrector, cli: &Cli) -> Result<()> {
    let mut input = String::new();
    io::stdin()
        .read_to_string(&mut input)
        .context("Failed to read stdin")?;

    let report = FileReport {
        path: PathBuf::new(),
        outcome: corrector.check_text(&input),
    };

    if cli.fix {
        match &report.outcome {
            Ok(result) => print!("{}", result.corrected),
            Err(e) => {
                log::warn!("{}: {}", e.code(), e);
                print!("{}", input);
            }
        }
        return Ok(());
    }

    let colored = !cli.no_color;
    cli::output::print_reports(std::slice::from_ref(&report), colored, &cli.format)?;
    if cli.format == OutputFormat::Text {
        cli::output::print_check_summary(report.change_count(), 1, colored);
    }

    let failing = match &report.outcome {
        Ok(result) => !result.changes.is_empty(),
        Err(e) => *e == SpellcheckError::CorrectionInvalid,
    };
    if failing && !cli.no_fail {
        std::process::exit(1);
    }

    Ok(())
}

fn confirm_fix(cli: &Cli, report: &FileReport) -> Result<bool> {
    if !cli.interactive {
        return Ok(true);
    }
    let answer = Confirm::new()
        .with_prompt(format!(
            "Apply {} corrections to {}?",
            report.change_count(),
            report.path.display()
        ))
        .default(true)
        .interact()?;
    Ok(answer)
}

fn handle_command(command: Commands, config: &Config) -> Result<()> {
    match command {
        Commands::Terms { action } => {
            let path = config.terms_path()?;
            match action {
                TermCommands::List => terms::manager::list_terms(&path)?,
                TermCommands::Add { from, to, lang } => {
                    terms::manager::add_term(&path, &from, &to, &lang)?
                }
                TermCommands::Remove { id } => terms::manager::remove_term(&path, id)?,
                TermCommands::Enable { id } => terms::manager::set_term_active(&path, id, true)?,
                TermCommands::Disable { id } => {
                    terms::manager::set_term_active(&path, id, false)?
                }
            }
        }
        Commands::Rules => terms::manager::list_builtin_rules(),
    }
    Ok(())
}
