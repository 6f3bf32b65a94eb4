//! bundle-sbom: post-build npm dependency manifest and CycloneDX SBOM generator.

use anyhow::{Context, Result};
use bundle_sbom::config::{DEFAULT_MANIFEST_NAME, DEFAULT_SBOM_NAME};
use bundle_sbom::{OutputConfig, generate};
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{Shell, generate as generate_completions};
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "bundle-sbom")]
#[command(version)]
#[command(about = "Generate an npm dependency manifest and CycloneDX SBOM from bundled files", long_about = None)]
#[command(after_help = "EXAMPLES:
    # Generate from an explicit file list
    bundle-sbom generate --out-dir dist $(cat bundled-files.txt)

    # Stream the file list from a bundler hook
    bundler --list-files | bundle-sbom generate --files-from - --out-dir dist

    # Custom artifact names
    bundle-sbom generate --manifest-name deps.txt --sbom-name bom.json src/**/*.js")]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Arguments for the `generate` subcommand
#[derive(Parser)]
struct GenerateArgs {
    /// Bundled source files to resolve to packages
    files: Vec<PathBuf>,

    /// Read additional file paths from a newline-delimited list (use `-` for stdin)
    #[arg(long, value_name = "PATH")]
    files_from: Option<PathBuf>,

    /// Build context root, used to shorten logged paths
    #[arg(long, default_value = ".")]
    context: PathBuf,

    /// Directory to write both artifacts into (created if missing)
    #[arg(short, long, default_value = ".", env = "BUNDLE_SBOM_OUT_DIR")]
    out_dir: PathBuf,

    /// Filename of the plain-text dependency manifest
    #[arg(long, default_value = DEFAULT_MANIFEST_NAME)]
    manifest_name: String,

    /// Filename of the CycloneDX SBOM document
    #[arg(long, default_value = DEFAULT_SBOM_NAME)]
    sbom_name: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve bundled files to packages and write both artifacts
    Generate(GenerateArgs),

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| log_level.to_string()),
        ))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    match cli.command {
        Commands::Generate(args) => {
            let mut files = args.files;
            if let Some(list) = &args.files_from {
                files.extend(read_file_list(list)?);
            }

            let config = OutputConfig {
                out_dir: args.out_dir,
                manifest_name: args.manifest_name,
                sbom_name: args.sbom_name,
            };

            let summary = generate(&files, &args.context, &config)
                .context("SBOM generation failed")?;

            if !cli.quiet {
                eprintln!(
                    "{} unique packages ({} files resolved, {} without an owning package)",
                    summary.package_count, summary.resolved_files, summary.unresolved_files
                );
                eprintln!("  manifest: {}", summary.manifest_path.display());
                eprintln!("  sbom:     {}", summary.sbom_path.display());
            }
            Ok(())
        }

        Commands::Completions { shell } => {
            generate_completions(shell, &mut Cli::command(), "bundle-sbom", &mut io::stdout());
            Ok(())
        }
    }
}

/// Read a newline-delimited file list, `-` meaning stdin. Blank lines are skipped.
fn read_file_list(path: &Path) -> Result<Vec<PathBuf>> {
    let content = if path.as_os_str() == "-" {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .context("reading file list from stdin")?;
        buf
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("reading file list from {}", path.display()))?
    };

    Ok(content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(PathBuf::from)
        .collect())
}
