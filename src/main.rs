//! sweepfile - find large, old and disposable files worth cleaning up.
//!
//! Usage:
//!   sweep scan [PATH]        Scan a directory and list classified files
//!   sweep targets            Overview of Downloads, Desktop, Documents and caches
//!   sweep rules              List the classification rules
//!   sweep --help             Show help

mod settings;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::{Parser, Subcommand, ValueEnum};
use color_eyre::eyre::{Context, OptionExt, Result};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use sweepfile_analyze::{FileFilter, SortKey, SortOrder, SortState, apply};
use sweepfile_core::{FileRecord, RuleSet, ScanSummary, SkipReason, SkipRecord, format_bytes};
use sweepfile_scan::{ScanConfig, ScanError, Scanner, TargetSummary, home_targets, scan_targets};

use settings::UserSettings;

#[derive(Parser)]
#[command(
    name = "sweep",
    version,
    about = "Find large, old and disposable files worth cleaning up",
    long_about = "sweepfile walks a directory with bounded depth and entry count, \
                  and labels files that look like cleanup candidates: installers, \
                  caches, build artifacts, device backups and old large files.\n\n\
                  Defaults can be set in <config dir>/sweepfile/settings.toml."
)]
struct Cli {
    /// Enable debug logging on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Scan a directory and list its files
    Scan {
        /// Path to scan
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Maximum directory depth (the root is level 0)
        #[arg(short, long)]
        depth: Option<u32>,

        /// Stop after collecting this many files
        #[arg(short = 'm', long)]
        max_entries: Option<usize>,

        /// Minimum file size to list (e.g., "1KB", "10MB")
        #[arg(long)]
        min_size: Option<String>,

        /// Only list files with at least one suspicious label
        #[arg(short, long)]
        suspicious_only: bool,

        /// Comma-separated extension allow-list (e.g., "zip,dmg")
        #[arg(short, long)]
        ext: Option<String>,

        /// Sort column
        #[arg(long)]
        sort: Option<SortKey>,

        /// Sort direction
        #[arg(long)]
        order: Option<SortOrder>,

        /// Number of rows to show
        #[arg(short = 'n', long)]
        top: Option<usize>,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },

    /// Summarize the default cleanup targets in the home directory
    Targets {
        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },

    /// List the classification rules in evaluation order
    Rules,
}

#[derive(Debug, Clone, Copy, ValueEnum, Default)]
enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Options for a single `sweep scan` run, after merging flags over settings.
struct ScanOptions {
    depth: u32,
    max_entries: usize,
    filter: FileFilter,
    sort: SortState,
    top: usize,
    format: OutputFormat,
}

/// JSON document for `sweep scan --format json`.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ScanReport<'a> {
    target_path: &'a Path,
    summary: ScanSummary,
    view_summary: ScanSummary,
    reached_cap: bool,
    files: &'a [FileRecord],
    skipped: Vec<SkippedPath<'a>>,
}

/// A skip record with its user-visible reason text alongside the stable code.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SkippedPath<'a> {
    path: &'a Path,
    reason: SkipReason,
    reason_label: &'static str,
}

impl<'a> From<&'a SkipRecord> for SkippedPath<'a> {
    fn from(skip: &'a SkipRecord) -> Self {
        Self {
            path: &skip.path,
            reason: skip.reason,
            reason_label: skip.reason.label(),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let settings = UserSettings::load();

    match cli.command {
        Command::Scan {
            path,
            depth,
            max_entries,
            min_size,
            suspicious_only,
            ext,
            sort,
            order,
            top,
            format,
        } => {
            let (default_depth, default_max) = settings.scan_bounds();
            let min_size = min_size.as_deref().map(parse_size).transpose()?.unwrap_or(0);
            let filter = FileFilter::builder()
                .min_size(min_size)
                .suspicious_only(suspicious_only)
                .extensions(
                    ext.as_deref()
                        .map(FileFilter::parse_extensions)
                        .unwrap_or_default(),
                )
                .build()?;
            let options = ScanOptions {
                depth: depth.unwrap_or(default_depth),
                max_entries: max_entries.unwrap_or(default_max),
                filter,
                sort: SortState::new(
                    sort.unwrap_or(settings.display.sort),
                    order.unwrap_or(settings.display.order),
                ),
                top: top.unwrap_or(settings.display.top),
                format,
            };
            run_scan(&path, &options).await?;
        }
        Command::Targets { format } => {
            run_targets(&settings, format).await?;
        }
        Command::Rules => {
            run_rules();
        }
    }

    Ok(())
}

/// Install the stderr subscriber. `-v` wins over `SWEEP_LOG` / `RUST_LOG`.
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("sweepfile=debug")
    } else {
        EnvFilter::try_from_env("SWEEP_LOG")
            .or_else(|_| EnvFilter::try_from_default_env())
            .unwrap_or_else(|_| EnvFilter::new("sweepfile=warn"))
    };

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .init();
}

/// Turn a user-supplied root into an absolute path.
///
/// Existing paths are canonicalized, so a symlinked root is resolved here
/// rather than by the walker. Missing paths stay absolute but unresolved and
/// show up as a skip record on the result.
fn resolve_root(path: &Path) -> Result<PathBuf> {
    if path.as_os_str().is_empty() {
        return Err(ScanError::invalid_root("Root path cannot be empty").into());
    }
    match path.canonicalize() {
        Ok(resolved) => Ok(resolved),
        Err(_) => std::path::absolute(path).context("Invalid path"),
    }
}

/// Run a target scan and print the filtered view.
async fn run_scan(path: &Path, options: &ScanOptions) -> Result<()> {
    let root = resolve_root(path)?;

    eprintln!("Scanning {}...", root.display());

    let config = ScanConfig::builder()
        .root(&root)
        .depth(options.depth)
        .max_entries(options.max_entries)
        .build()
        .map_err(ScanError::from)?;

    let scanner = Scanner::new();
    let mut progress = scanner.subscribe();
    let reporter = tokio::spawn(async move {
        while let Ok(snapshot) = progress.recv().await {
            tracing::debug!(
                files = snapshot.files_collected,
                bytes = snapshot.bytes_collected,
                skipped = snapshot.skipped,
                "scan progress"
            );
            if snapshot.finished {
                break;
            }
        }
    });

    let result = scanner.scan(&config).await.context("Scan failed")?;
    reporter.abort();

    let view = apply(&result.files, &options.filter, options.sort);
    let view_summary = ScanSummary::from_files(&view);
    let reached_cap = result.reached_cap(options.max_entries);

    match options.format {
        OutputFormat::Text => {
            println!();
            println!("{}", "─".repeat(100));
            println!(" {}", result.target_path.display());
            print_summary(&result.summary, result.skipped.len());
            if view.len() != result.files.len() {
                println!(
                    " Showing {} matching files ({})",
                    view_summary.total_files,
                    format_bytes(view_summary.total_size)
                );
            }
            println!("{}", "─".repeat(100));
            println!();

            print_table(&view, options.top);

            if !result.skipped.is_empty() {
                println!();
                println!(" Skipped:");
                for skip in &result.skipped {
                    println!("   {} ({})", skip.path.display(), skip.reason);
                }
            }

            if reached_cap {
                println!();
                println!(
                    " Stopped after {} files; raise --max-entries to see more.",
                    options.max_entries
                );
            }
        }
        OutputFormat::Json => {
            let report = ScanReport {
                target_path: &result.target_path,
                summary: result.summary,
                view_summary,
                reached_cap,
                files: &view,
                skipped: result.skipped.iter().map(SkippedPath::from).collect(),
            };
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }

    Ok(())
}

/// Scan the default targets concurrently and print one summary per target.
async fn run_targets(settings: &UserSettings, format: OutputFormat) -> Result<()> {
    let targets = home_targets().ok_or_eyre("Could not determine the home directory")?;
    let template = ScanConfig::for_overview(".")
        .with_bounds(settings.overview.depth, settings.overview.max_entries);

    eprintln!("Scanning {} locations...", targets.len());

    let summaries = scan_targets(Arc::new(Scanner::new()), targets, &template)
        .await
        .context("Scan failed")?;

    match format {
        OutputFormat::Text => {
            println!();
            for entry in &summaries {
                print_target(entry);
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&summaries)?);
        }
    }

    Ok(())
}

/// Print the rule set in evaluation order.
fn run_rules() {
    let rules = RuleSet::default();
    for rule in rules.rules() {
        println!("{:<14} {}", rule.id, rule.label);
    }
}

fn print_summary(summary: &ScanSummary, skipped: usize) {
    println!(
        " {} files, {} total, {} suspicious, {} skipped",
        summary.total_files,
        format_bytes(summary.total_size),
        summary.suspicious_count,
        skipped
    );
}

fn print_target(entry: &TargetSummary) {
    println!(" {} ({})", entry.target.label, entry.target.path.display());
    println!(
        "   {} files, {} total, {} suspicious",
        entry.summary.total_files,
        format_bytes(entry.summary.total_size),
        entry.summary.suspicious_count
    );
    if entry.skipped > 0 {
        println!("   {} path(s) skipped", entry.skipped);
    }
    println!();
}

/// Print the first `top` records as a table.
fn print_table(records: &[FileRecord], top: usize) {
    if records.is_empty() {
        println!(" No files to show.");
        return;
    }

    println!(
        " {:<32} {:>10} {:<10}  {:<28} {}",
        "Name", "Size", "Modified", "Origin", "Label"
    );
    for record in records.iter().take(top) {
        println!(
            " {:<32} {:>10} {:<10}  {:<28} {}",
            truncate(&record.name, 32),
            record.size_label(),
            record.modified_at.format("%Y-%m-%d"),
            truncate(&record.origin.display().to_string(), 28),
            record.primary_label().unwrap_or("-")
        );
    }

    let remaining = records.len().saturating_sub(top);
    if remaining > 0 {
        println!(" ... and {} more", remaining);
    }
}

/// Truncate a string to at most `max_len` characters.
fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(1)).collect();
        format!("{kept}…")
    }
}

/// Parse a size string (e.g., "1KB", "10MB", "1GB").
fn parse_size(s: &str) -> Result<u64> {
    let s = s.trim().to_uppercase();
    let digits = |s: &str| -> Result<f64> {
        s.trim_end_matches(|c: char| !c.is_ascii_digit() && c != '.')
            .parse::<f64>()
            .with_context(|| format!("Invalid size: {s}"))
    };

    let (num, multiplier) = if s.ends_with("TB") || s.ends_with('T') {
        (digits(&s)?, 1u64 << 40)
    } else if s.ends_with("GB") || s.ends_with('G') {
        (digits(&s)?, 1 << 30)
    } else if s.ends_with("MB") || s.ends_with('M') {
        (digits(&s)?, 1 << 20)
    } else if s.ends_with("KB") || s.ends_with('K') {
        (digits(&s)?, 1 << 10)
    } else {
        (digits(&s)?, 1)
    };

    Ok((num * multiplier as f64) as u64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_scan_flags() {
        let cli = Cli::try_parse_from([
            "sweep", "scan", "/tmp", "--sort", "date", "--order", "asc", "--ext", "zip,dmg",
            "-n", "5",
        ])
        .unwrap();
        match cli.command {
            Command::Scan {
                path,
                sort,
                order,
                ext,
                top,
                ..
            } => {
                assert_eq!(path, PathBuf::from("/tmp"));
                assert_eq!(sort, Some(SortKey::Date));
                assert_eq!(order, Some(SortOrder::Ascending));
                assert_eq!(ext.as_deref(), Some("zip,dmg"));
                assert_eq!(top, Some(5));
            }
            _ => panic!("expected scan"),
        }
    }

    #[test]
    fn test_parse_size() {
        assert_eq!(parse_size("512").unwrap(), 512);
        assert_eq!(parse_size("1KB").unwrap(), 1024);
        assert_eq!(parse_size("10mb").unwrap(), 10 * 1024 * 1024);
        assert_eq!(parse_size("1.5G").unwrap(), 1536 * 1024 * 1024);
        assert!(parse_size("lots").is_err());
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("relatório-final.zip", 8), "relatór…");
    }

    #[test]
    fn test_skipped_path_json_carries_label() {
        let skip = SkipRecord::listing_failed("/locked");
        let json = serde_json::to_value(SkippedPath::from(&skip)).unwrap();
        assert_eq!(json["path"], "/locked");
        assert_eq!(json["reason"], "listing_failed");
        assert_eq!(json["reasonLabel"], "Nao foi possivel listar");
    }

    #[test]
    fn test_resolve_root() {
        assert!(resolve_root(Path::new("")).is_err());

        let temp = tempfile::TempDir::new().unwrap();
        let resolved = resolve_root(temp.path()).unwrap();
        assert!(resolved.is_absolute());

        let missing = resolve_root(Path::new("does/not/exist")).unwrap();
        assert!(missing.is_absolute());
        assert!(missing.ends_with("does/not/exist"));
    }
}
