//! AsyncAPI flags CLI
//!
//! Prints the template flags derived from a parsed-document snapshot.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use asyncapi_flags::{load_document_auto, model::Document, pascal_case, FlagReport, ReportOptions};

#[derive(Parser, Debug)]
#[command(name = "asyncapi-flags")]
#[command(about = "Derive code-generation flags from a parsed AsyncAPI document")]
#[command(version)]
struct Cli {
    /// Enable debug logging
    #[arg(long, short, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Only log errors
    #[arg(long, short, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print protocol, publisher, subscriber and render flags as JSON
    Flags {
        /// Document snapshot: file path or URL (http:// or https://)
        document: String,

        /// Output file (stdout if not specified)
        #[arg(long)]
        output: Option<PathBuf>,

        /// Pretty-print JSON output
        #[arg(long)]
        pretty: bool,

        /// Recompute render flags instead of reusing the process-wide cache
        #[arg(long)]
        no_cache: bool,
    },

    /// Check whether the document needs any generated client code
    Check {
        /// Document snapshot: file path or URL (http:// or https://)
        document: String,

        /// Output result as JSON (for automation)
        #[arg(long)]
        json: bool,
    },

    /// Convert text to a PascalCase identifier, one result per line
    PascalCase {
        /// Text to convert
        #[arg(required = true)]
        text: Vec<String>,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(&cli);
    debug!(command = ?cli.command, "asyncapi-flags starting");

    let result = match cli.command {
        Commands::Flags {
            document,
            output,
            pretty,
            no_cache,
        } => run_flags(&document, output, pretty, no_cache),
        Commands::Check { document, json } => run_check(&document, json),
        Commands::PascalCase { text } => {
            for input in text {
                println!("{}", pascal_case(&input));
            }
            Ok(())
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(code) => ExitCode::from(code),
    }
}

fn init_logging(cli: &Cli) {
    let level = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "error"
    } else {
        "warn"
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("asyncapi_flags={}", level)));

    // stdout carries JSON; logs go to stderr
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
        .init();
}

fn load(source: &str) -> Result<Document, u8> {
    load_document_auto(source).map_err(|e| {
        eprintln!("Error: {}", e);
        e.exit_code() as u8
    })
}

fn run_flags(
    source: &str,
    output: Option<PathBuf>,
    pretty: bool,
    no_cache: bool,
) -> Result<(), u8> {
    let doc = load(source)?;
    let options = ReportOptions::new().use_cache(!no_cache);
    let report = FlagReport::build(&doc, &options);

    let json_output = if pretty {
        serde_json::to_string_pretty(&report)
    } else {
        serde_json::to_string(&report)
    }
    .map_err(|e| {
        eprintln!("Error serializing output: {}", e);
        2u8
    })?;

    match output {
        Some(path) => {
            std::fs::write(&path, &json_output).map_err(|e| {
                eprintln!("Error writing to {}: {}", path.display(), e);
                3u8
            })?;
        }
        None => {
            println!("{}", json_output);
        }
    }

    Ok(())
}

fn run_check(source: &str, json_output: bool) -> Result<(), u8> {
    let doc = load(source)?;
    let report = FlagReport::build(&doc, &ReportOptions::default());
    let generate = report.should_generate();

    if json_output {
        let output = serde_json::json!({
            "generate": generate,
            "hasPubOrSub": report.has_pub_or_sub,
            "hasSupportedOperations": report.has_supported_operations,
        });
        println!("{}", output);
    } else if generate {
        println!("Supported operations found");
    } else if !report.has_supported_operations {
        println!("No supported operations");
    } else {
        println!("No publishers or subscribers");
    }

    if generate {
        Ok(())
    } else {
        Err(1)
    }
}
