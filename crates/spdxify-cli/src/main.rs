use std::process::ExitCode;

use clap::Parser;
use colored::Colorize;
use tracing_subscriber::{fmt, EnvFilter};

use spdxify_core::plan;
use spdxify_core::{Action, Config, ConfigFiletype, OneShot, Result, SpdxIdSearcher, SpdxifyError};

mod args;
use args::Cli;

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match handle_run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", "[ERROR]".red().bold(), e);
            ExitCode::from(e.exit_code() as u8)
        }
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn handle_run(cli: Cli) -> Result<()> {
    let config_path = match cli.config {
        Some(path) => path,
        None => Config::default_path()?,
    };
    tracing::debug!(path = %config_path.display(), "using config file");
    let mut config = Config::load(Some(config_path.as_path()))?;

    let one_shot = OneShot {
        extension: cli.extension.unwrap_or_default(),
        comment: cli.comment.unwrap_or_default(),
        prefix: cli.prefix.unwrap_or_default(),
    };
    if !one_shot.extension.is_empty() {
        tracing::debug!(
            extension = %one_shot.extension,
            comment = %one_shot.comment,
            prefix = %one_shot.prefix,
            "one-shot run"
        );
    }
    config.apply_one_shot(one_shot);

    let license = cli.license.as_deref().filter(|l| !l.is_empty());
    if license.is_none() {
        tracing::warn!("no license given; per-file lookup will be used");
    }

    println!();
    println!("Repository: {}", cli.repo.display().to_string().cyan());
    if let Some(license) = license {
        println!("License: {}", license.cyan());
    }
    if let Some(only) = &config.only_suffix {
        println!("Only: {}", only.cyan());
    }
    if cli.dry_run {
        println!("{}", "(dry run)".yellow());
    }
    println!();
    println!("Checking...");

    let result = plan::run(&config, &cli.repo, license, &SpdxIdSearcher::new())?;

    for record in result.records() {
        let tag = format!("[{}]", record.action());
        match record.action() {
            Action::Add => {
                let id_line = config
                    .filetype_for(record.name())
                    .cloned()
                    .unwrap_or_else(ConfigFiletype::default)
                    .render(record.want_id());
                println!(
                    "  {} {} (line {}: {})",
                    tag.green(),
                    record.name(),
                    record.line() + 1,
                    id_line.dimmed()
                );
            }
            Action::Skip => {
                if cli.verbose {
                    println!("  {} {}", tag.yellow(), record.name());
                }
            }
            Action::Conflict => println!(
                "  {} {} (found {}, want {})",
                tag.red().bold(),
                record.name(),
                record.found_id(),
                record.want_id()
            ),
        }
    }

    println!();
    println!("Summary:");
    println!("  Add: {}", result.added());
    println!("  Skip: {}", result.skipped());
    println!("  Conflicts: {}", result.conflicts());

    if result.conflicts() > 0 {
        println!();
        return Err(SpdxifyError::Conflicts {
            count: result.conflicts(),
        });
    }

    println!();
    println!("{} {}", "Check complete:".green(), cli.repo.display());

    Ok(())
}
