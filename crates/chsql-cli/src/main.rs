//! chsql CLI
//!
//! Parses ClickHouse SQL and prints it back as a syntax tree (JSON) or as
//! formatted SQL.

use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::Parser;
use tracing::{debug, Level};
use tracing_subscriber::FmtSubscriber;

use chsql_core::format::DEFAULT_INDENT;
use chsql_core::{format_beautify, format_compact, Statement};

/// Parse and format ClickHouse SQL.
#[derive(Parser)]
#[command(name = "chsql")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// SQL text to parse (reads --file or stdin when absent).
    query: Option<String>,

    /// Read the SQL from a file (`-` for stdin).
    #[arg(short, long, conflicts_with = "query")]
    file: Option<PathBuf>,

    /// Print the statements as compact SQL.
    #[arg(long, conflicts_with = "beautify")]
    format: bool,

    /// Print the statements as indented, multi-line SQL.
    #[arg(long)]
    beautify: bool,

    /// Indentation unit for --beautify.
    #[arg(long, env = "CHSQL_INDENT", default_value = DEFAULT_INDENT)]
    indent: String,

    /// Enable verbose output.
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn read_input(&self) -> anyhow::Result<String> {
        if let Some(query) = &self.query {
            return Ok(query.clone());
        }
        match &self.file {
            Some(path) if path.as_os_str() != "-" => fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display())),
            _ => {
                let mut input = String::new();
                io::stdin()
                    .read_to_string(&mut input)
                    .context("failed to read stdin")?;
                Ok(input)
            }
        }
    }

    fn render(&self, statements: &[Statement]) -> anyhow::Result<String> {
        if !self.format && !self.beautify {
            return serde_json::to_string_pretty(statements)
                .context("failed to serialize syntax tree");
        }
        let rendered: Vec<String> = statements
            .iter()
            .map(|statement| {
                if self.beautify {
                    format_beautify(statement, &self.indent)
                } else {
                    format_compact(statement)
                }
            })
            .collect();
        Ok(rendered.join(";\n"))
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .without_time()
        .with_writer(io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let input = cli.read_input()?;
    let outcome = chsql_core::parse(&input);
    debug!(statements = outcome.statements.len(), "parsed input");

    if !outcome.statements.is_empty() {
        println!("{}", cli.render(&outcome.statements)?);
    }

    if let Some(error) = outcome.error {
        bail!("parse failed: {error}");
    }
    Ok(())
}
