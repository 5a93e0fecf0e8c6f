//! CLI command implementations

use anyhow::{Context, Result};
use colored::Colorize;
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::config::{FileResolver, TranslateOptions, DICT_FILE, INPUT_DICT};
use crate::dictionary::loader::{LoadStats, TranslationFileLoader};
use crate::normalizer::{NormalizerRegistry, QualifiedName, SimpleNormalizer};
use crate::translator::{TranslateDictionary, TranslationResult};

use super::args::{Cli, Commands};
use super::paths::PersistentConfig;

/// Execute a CLI command
pub fn execute(cli: Cli) -> Result<()> {
    let config_path = cli.config.as_deref();
    let config = PersistentConfig::load_from(config_path)?;

    match cli.command {
        Commands::Lexize {
            tokens,
            dict_file,
            input_dict,
            options,
            stopwords,
            reject_unknown,
            json,
        } => {
            let data_dir = config.resolve_data_dir(cli.data_dir)?;
            let options = match options {
                Some(list) => TranslateOptions::parse_list(&list)?,
                None => {
                    let dict_file = dict_file.context("either --dict-file or --options is required")?;
                    let input_dict = config.resolve_input_dict(input_dict);
                    TranslateOptions::parse([(DICT_FILE, dict_file), (INPUT_DICT, input_dict)])?
                }
            };
            let registry = build_registry(stopwords.as_deref(), reject_unknown)?;
            let stdin = std::io::stdin();
            let stdout = std::io::stdout();
            cmd_lexize(
                &options,
                &data_dir,
                registry,
                tokens,
                json,
                stdin.lock(),
                &mut stdout.lock(),
            )
        }
        Commands::Info {
            dict_file,
            entries,
            json,
        } => {
            let data_dir = config.resolve_data_dir(cli.data_dir)?;
            cmd_info(&dict_file, &data_dir, entries, json, &mut std::io::stdout().lock())
        }
        Commands::Settings {
            set_data_dir,
            set_input_dict,
            reset,
        } => cmd_settings(config, config_path, set_data_dir, set_input_dict, reset),
    }
}

/// Build the normalizer registry used by the CLI
fn build_registry(stopwords: Option<&Path>, reject_unknown: bool) -> Result<NormalizerRegistry> {
    let registry = NormalizerRegistry::with_builtins();
    if stopwords.is_some() || reject_unknown {
        let simple = match stopwords {
            Some(path) => SimpleNormalizer::from_stopword_file(path, !reject_unknown)?,
            None => SimpleNormalizer::new(std::iter::empty::<&str>(), !reject_unknown),
        };
        registry.register(QualifiedName::qualified("pg_catalog", "simple"), Arc::new(simple));
    }
    Ok(registry)
}

/// Lexize command
///
/// Tokens are read from `input` when none are given.
fn cmd_lexize<R: BufRead, W: Write>(
    options: &TranslateOptions,
    data_dir: &Path,
    registry: NormalizerRegistry,
    tokens: Vec<String>,
    json: bool,
    input: R,
    out: &mut W,
) -> Result<()> {
    let registry = Arc::new(registry);
    let resolver = FileResolver::new(data_dir);
    let (dict, stats) = TranslateDictionary::from_options(options, registry, &resolver)?;
    tracing::info!(
        dict_file = %options.dict_file,
        input_dict = %options.input_dict,
        entries = stats.entries,
        "dictionary ready"
    );

    let tokens = if tokens.is_empty() {
        read_tokens(input)?
    } else {
        tokens
    };

    let mut results = Vec::with_capacity(tokens.len());
    for token in tokens {
        let result = dict.translate(&token)?;
        results.push((token, result));
    }

    if json {
        let values: Vec<_> = results
            .iter()
            .map(|(token, result)| serde_json::json!({ "token": token, "result": result }))
            .collect();
        writeln!(out, "{}", serde_json::to_string_pretty(&values)?)?;
    } else {
        for (token, result) in &results {
            write_result(out, token, result.as_ref())?;
        }
    }
    Ok(())
}

fn read_tokens<R: BufRead>(input: R) -> Result<Vec<String>> {
    let mut tokens = Vec::new();
    for line in input.lines() {
        let line = line.context("Failed to read tokens from stdin")?;
        tokens.extend(crate::words::words(&line).map(str::to_string));
    }
    Ok(tokens)
}

fn write_result<W: Write>(out: &mut W, token: &str, result: Option<&TranslationResult>) -> Result<()> {
    match result {
        None => writeln!(out, "{} {}", token.bold(), "no match".yellow())?,
        Some(result) => {
            let variants: Vec<String> = result
                .iter()
                .map(|l| format!("{} {}", l.lexeme.green(), format!("({})", l.nvariant).dimmed()))
                .collect();
            writeln!(out, "{} -> {}", token.bold(), variants.join(", "))?;
        }
    }
    Ok(())
}

/// Info command
fn cmd_info<W: Write>(
    dict_file: &str,
    data_dir: &Path,
    entries: bool,
    json: bool,
    out: &mut W,
) -> Result<()> {
    let path = FileResolver::new(data_dir).resolve(dict_file)?;
    let (table, stats) = TranslationFileLoader::load(&path)?;

    if json {
        let mut value = serde_json::json!({
            "path": path.display().to_string(),
            "stats": stats,
        });
        if entries {
            value["entries"] = table
                .iter()
                .map(|e| serde_json::json!({ "key": e.key(), "outputs": e.outputs() }))
                .collect();
        }
        writeln!(out, "{}", serde_json::to_string_pretty(&value)?)?;
        return Ok(());
    }

    writeln!(out, "{}: {}", "Dictionary".bold(), path.display())?;
    write_stats(out, &stats)?;
    if entries {
        for entry in &table {
            writeln!(out, "  {}\t{}", entry.key().cyan(), entry.outputs().join(" "))?;
        }
    }
    Ok(())
}

fn write_stats<W: Write>(out: &mut W, stats: &LoadStats) -> Result<()> {
    writeln!(out, "{}: {}", "Lines".bold(), stats.lines)?;
    writeln!(out, "{}: {}", "Entries".bold(), stats.entries.to_string().green())?;
    writeln!(out, "{}: {}", "Blank lines".bold(), stats.blank)?;
    writeln!(out, "{}: {}", "Comment lines".bold(), stats.comments)?;
    writeln!(out, "{}: {}", "Single-field lines".bold(), stats.single_field)?;
    if stats.duplicates > 0 {
        writeln!(
            out,
            "{}: {}",
            "Duplicate keys dropped".bold(),
            stats.duplicates.to_string().yellow()
        )?;
    } else {
        writeln!(out, "{}: 0", "Duplicate keys dropped".bold())?;
    }
    Ok(())
}

/// Settings command
fn cmd_settings(
    mut config: PersistentConfig,
    config_path: Option<&Path>,
    set_data_dir: Option<PathBuf>,
    set_input_dict: Option<String>,
    reset: bool,
) -> Result<()> {
    if reset {
        config = PersistentConfig::default();
        config.save_to(config_path)?;
        println!("{}", "Configuration reset to defaults".green());
        return Ok(());
    }

    let mut modified = false;
    if let Some(dir) = set_data_dir {
        config.data_dir = Some(dir);
        modified = true;
    }
    if let Some(name) = set_input_dict {
        QualifiedName::parse(&name)?;
        config.input_dict = Some(name);
        modified = true;
    }

    if modified {
        config.save_to(config_path)?;
        println!("{}", "Configuration updated".green());
    }

    println!("{}", "Current settings:".bold());
    match &config.data_dir {
        Some(dir) => println!("  data dir:   {}", dir.display()),
        None => println!("  data dir:   {}", "(default)".dimmed()),
    }
    match &config.input_dict {
        Some(name) => println!("  input dict: {}", name),
        None => println!("  input dict: {}", "(default: simple)".dimmed()),
    }
    Ok(())
}
