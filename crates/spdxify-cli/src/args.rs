use std::path::PathBuf;

use clap::Parser;

#[derive(Parser)]
#[command(name = "spdxify")]
#[command(about = "Add SPDX short-form license identifiers to source files")]
#[command(version)]
pub struct Cli {
    /// Path to configuration file (default: ~/.spdxify.json)
    #[arg(short = 'c', long = "config")]
    pub config: Option<PathBuf>,

    /// License to apply, if same for all files
    #[arg(short = 'l', long)]
    pub license: Option<String>,

    /// File extension to apply (one-shot run)
    #[arg(short = 'e', long)]
    pub extension: Option<String>,

    /// Comment format, with SPDX where the identifier goes (one-shot run)
    #[arg(short = 't', long)]
    pub comment: Option<String>,

    /// Prefix marking a first line to keep above the identifier (one-shot run)
    #[arg(short = 'p', long)]
    pub prefix: Option<String>,

    /// Dry run: report planned actions without touching files
    #[arg(short = 'd', long)]
    pub dry_run: bool,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Path to the repository
    pub repo: PathBuf,
}
