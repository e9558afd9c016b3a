use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use classmeter::{Config, ReportFormat, ResolutionMode, default_config_toml, generate_report, run_shell};
use std::io;
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// classmeter - Java class metrics and dependency report
#[derive(Parser, Debug)]
#[command(name = "classmeter", version, about = "Java class metrics and dependency report")]
struct Cli {
    /// Use specified config file instead of defaults
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug); RUST_LOG overrides
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Analyze a source tree and write the report
    Report {
        /// Root directory of the Java sources
        source: PathBuf,

        /// Report file to write
        output: PathBuf,

        #[arg(long, value_enum)]
        format: Option<FormatArg>,

        /// Append fan-in / fan-out and dependency cycles
        #[arg(long)]
        coupling: bool,

        /// Drop names that are neither imported nor declared in the tree
        #[arg(long)]
        strict: bool,
    },
    /// Interactive command loop (default)
    Shell,
    /// Print the default configuration
    Config,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum FormatArg {
    Text,
    Json,
}

impl From<FormatArg> for ReportFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Text => Self::Text,
            FormatArg::Json => Self::Json,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut config = if let Some(config_path) = &cli.config {
        Config::load_from(config_path)
    } else {
        Config::load()
    };

    match cli.command {
        Some(Commands::Report { source, output, format, coupling, strict }) => {
            if let Some(format) = format {
                config.report_format = format.into();
            }
            config.coupling_section |= coupling;
            if strict {
                config.resolution_mode = ResolutionMode::Strict;
            }
            run_report(&source, &output, &config)
        }
        Some(Commands::Config) => {
            print!("{}", default_config_toml());
            Ok(())
        }
        Some(Commands::Shell) | None => {
            let stdin = io::stdin();
            run_shell(stdin.lock(), &mut io::stdout(), &config).context("shell I/O failed")
        }
    }
}

fn run_report(source: &std::path::Path, output: &std::path::Path, config: &Config) -> Result<()> {
    let outcome = generate_report(source, output, config)
        .with_context(|| format!("report for {} failed", source.display()))?;
    println!(
        "Analyzed {} classes from {} files. Report saved to {}",
        outcome.classes,
        outcome.files_scanned,
        output.display()
    );
    if outcome.files_skipped > 0 {
        println!("{} files could not be parsed and were skipped", outcome.files_skipped);
    }
    Ok(())
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();
}
