use anyhow::{Context, Result};
use ast_selection::analysis::{render, SelectionRange};
use ast_selection::config::{load_from_path, InspectConfig, OutputFormat};
use ast_selection::pool::with_parser;
use ast_selection::ts::{Language, TreeSitterError};
use ast_selection::SyntaxTree;
use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "ast-selection")]
#[command(about = "Inspect the syntax subtrees covered by a text selection", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable debug logging (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze the subtrees covered by a byte range of a source file
    Inspect {
        /// Source file to parse
        file: PathBuf,

        /// Selection start (byte offset)
        #[arg(short, long)]
        start: usize,

        /// Selection end (byte offset, exclusive)
        #[arg(short, long)]
        end: usize,

        /// Source language (inferred from the extension if omitted)
        #[arg(short, long)]
        lang: Option<Language>,

        /// TOML config file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Emit JSON instead of the text report
        #[arg(long)]
        json: bool,

        /// Disable colored output
        #[arg(long)]
        no_color: bool,
    },

    /// Print the whole syntax tree of a source file
    Dump {
        /// Source file to parse
        file: PathBuf,

        /// Source language (inferred from the extension if omitted)
        #[arg(short, long)]
        lang: Option<Language>,

        /// TOML config file
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// List supported source languages
    Languages,
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Inspect {
            file,
            start,
            end,
            lang,
            config,
            json,
            no_color,
        } => cmd_inspect(&file, SelectionRange::new(start, end), lang, config, json, no_color),

        Commands::Dump { file, lang, config } => cmd_dump(&file, lang, config),

        Commands::Languages => cmd_languages(),
    };

    if let Err(e) = result {
        eprintln!("{} {:#}", "error:".red().bold(), e);
        std::process::exit(1);
    }
}

/// Helper: Load the config file if one was given.
fn load_config(path: Option<PathBuf>) -> Result<InspectConfig> {
    match path {
        Some(path) => Ok(load_from_path(&path)?),
        None => Ok(InspectConfig::default()),
    }
}

/// Resolve the source language.
///
/// Priority order:
/// 1. Explicit --lang flag
/// 2. `language` in the config file
/// 3. File extension
fn resolve_language(
    file: &Path,
    flag: Option<Language>,
    config: &InspectConfig,
) -> Result<Language, TreeSitterError> {
    flag.or(config.language)
        .or_else(|| Language::from_path(file))
        .ok_or_else(|| TreeSitterError::UnknownLanguage {
            path: file.to_path_buf(),
        })
}

/// Helper: Parse `file` with the pooled parser and the configured kinds.
fn parse_file(file: &Path, lang: Option<Language>, config: &InspectConfig) -> Result<SyntaxTree> {
    let language = resolve_language(file, lang, config)?;
    let table = config.kind_table(language);
    let tree = with_parser(language, |parser| parser.parse_file(file, &table))??;
    Ok(tree)
}

fn cmd_inspect(
    file: &Path,
    selection: SelectionRange,
    lang: Option<Language>,
    config: Option<PathBuf>,
    json: bool,
    no_color: bool,
) -> Result<()> {
    let config = load_config(config)?;
    if no_color || !config.output.color {
        colored::control::set_override(false);
    }

    let tree = parse_file(file, lang, &config)?;
    let analysis = config.analyzer().analyze(&tree, selection).with_context(|| {
        format!(
            "cannot analyze selection {}..{} of {}",
            selection.start,
            selection.end,
            file.display()
        )
    })?;

    if json || config.output.format == OutputFormat::Json {
        let lca_span = tree.span(analysis.lca);
        let value = serde_json::json!({
            "file": file.display().to_string(),
            "selection": analysis.selection,
            "lca": {
                "kind": tree.kind(analysis.lca),
                "start": lca_span.start,
                "end": lca_span.end,
            },
            "stats": analysis.stats,
            "run": analysis.nodes(&tree),
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    println!("{}", "AST".bold());
    println!(
        "{}",
        format!(
            "{} node(s) under {} ({})",
            analysis.run.len(),
            tree.kind(analysis.lca),
            file.display()
        )
        .dimmed()
    );
    println!();
    print!("{}", analysis.report(&tree));
    Ok(())
}

fn cmd_dump(file: &Path, lang: Option<Language>, config: Option<PathBuf>) -> Result<()> {
    let config = load_config(config)?;
    let tree = parse_file(file, lang, &config)?;
    print!("{}", render(&tree, tree.roots(), 0));
    Ok(())
}

fn cmd_languages() -> Result<()> {
    println!("{}", "Supported languages:".bold());
    for language in Language::all() {
        println!("  {} (.{})", language, language.extensions().join(", ."));
    }
    Ok(())
}
