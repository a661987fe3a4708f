//! safelist_scanner - utility class safelist generator
//!
//! Scans a source tree for CSS utility classes and writes them to a
//! `{"safelist": [...]}` JSON file.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use log::LevelFilter;

use safelist_scanner::{ClassScanResult, SafelistConfig, check, generate, top_classes};

#[derive(Parser, Debug)]
#[command(name = "safelist_scanner")]
#[command(author, version, about = "Collect utility CSS classes into a safelist JSON file")]
#[command(long_about = "
safelist_scanner walks a source tree, pulls utility class names out of
markup and script files, and writes them sorted and deduplicated to a
safelist file so the CSS build keeps classes it cannot see statically.

Settings are read from --config, or from safelist.toml in the working
directory when present; flags override the file.

EXAMPLES:
    safelist_scanner src -o config/tailwindWhitelist.json
    safelist_scanner --config playground/safelist.toml --report scan.json
    safelist_scanner --check          # exit 1 if the safelist is stale
")]
struct Cli {
    /// Source directory to scan
    source: Option<PathBuf>,

    /// Safelist JSON file to write
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// TOML config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// File extension to scan (repeatable, replaces the configured list)
    #[arg(long = "ext", value_name = "EXT")]
    extensions: Vec<String>,

    /// Directory name to skip (repeatable, added to the configured list)
    #[arg(long = "exclude", value_name = "DIR")]
    exclude_dirs: Vec<String>,

    /// Minimum class length
    #[arg(long)]
    min_length: Option<usize>,

    /// Keep classes containing uppercase letters
    #[arg(long)]
    allow_uppercase: bool,

    /// Only look at class attributes, helper calls, directives and templates
    #[arg(long)]
    no_string_literals: bool,

    /// Stop after this many files
    #[arg(long)]
    max_files: Option<usize>,

    /// Also write a JSON scan report to this path
    #[arg(long)]
    report: Option<PathBuf>,

    /// Number of most used classes to print
    #[arg(long)]
    top: Option<usize>,

    /// Compare against the existing safelist instead of writing it
    #[arg(long)]
    check: bool,

    /// Show a progress bar
    #[arg(long)]
    progress: bool,

    /// Log debug details
    #[arg(short, long, conflicts_with = "quiet")]
    verbose: bool,

    /// Only log warnings and errors
    #[arg(short, long)]
    quiet: bool,
}

impl Cli {
    fn log_level(&self) -> LevelFilter {
        if self.verbose {
            LevelFilter::Debug
        } else if self.quiet {
            LevelFilter::Warn
        } else {
            LevelFilter::Info
        }
    }

    /// Load the config and apply command line overrides
    fn into_config(self) -> Result<SafelistConfig> {
        let mut config = SafelistConfig::discover(self.config.as_deref())?;

        if let Some(source) = self.source {
            config.source_dir = source;
        }
        if let Some(output) = self.output {
            config.output_file = output;
        }
        if self.report.is_some() {
            config.report_file = self.report;
        }
        if let Some(top) = self.top {
            config.top = top;
        }
        if !self.extensions.is_empty() {
            config.scan.extensions = self.extensions;
        }
        for dir in self.exclude_dirs {
            if !config.scan.exclude_dirs.contains(&dir) {
                config.scan.exclude_dirs.push(dir);
            }
        }
        if self.no_string_literals {
            config.scan.string_literals = false;
        }
        if self.max_files.is_some() {
            config.scan.max_files = self.max_files;
        }
        if self.progress {
            config.scan.show_progress = true;
        }
        if let Some(min_length) = self.min_length {
            config.filter.min_length = min_length;
        }
        if self.allow_uppercase {
            config.filter.allow_uppercase = true;
        }

        Ok(config)
    }
}

fn init_logging(level: LevelFilter) {
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format_target(false)
        .format_timestamp(None)
        .init();
}

fn print_summary(result: &ClassScanResult, top: usize) {
    let stats = &result.stats;
    println!("Found {} unique classes", result.classes.len());
    println!("Scanned {} files", stats.total_files);
    if stats.total_files > 0 {
        println!(
            "Read {:.1}% of files, kept {:.1}% of candidates",
            stats.success_rate(),
            stats.acceptance_rate()
        );
    }
    if stats.error_files > 0 {
        println!("Skipped {} unreadable files:", stats.error_files);
        for path in &stats.error_file_paths {
            println!("  {}", path.display());
        }
    }

    let ranked = top_classes(result, top);
    if !ranked.is_empty() {
        println!("\nTop {} most used classes:", ranked.len());
        for (class, count) in ranked {
            println!("{}: {} files", class, count);
        }
    }
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_logging(cli.log_level());

    let check_only = cli.check;
    let config = cli.into_config()?;

    if check_only {
        let outcome = check(&config)?;
        print_summary(&outcome.result, config.top);
        if outcome.up_to_date {
            println!("Safelist is up to date: {}", config.output_file.display());
            return Ok(ExitCode::SUCCESS);
        }
        eprintln!("Safelist is out of date: {}", config.output_file.display());
        return Ok(ExitCode::FAILURE);
    }

    let outcome = generate(&config)?;
    print_summary(&outcome.result, config.top);
    println!("Results saved to {}", outcome.output_file.display());
    if let Some(report_file) = &outcome.report_file {
        println!("Report saved to {}", report_file.display());
    }

    Ok(ExitCode::SUCCESS)
}
