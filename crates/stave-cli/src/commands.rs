use std::fs;
use std::path::Path;

use anyhow::Context;
use colored::Colorize;
use stave_diff::{DeltaDiff, Diff, ItemSnapshot};
use stave_merge::{diff_items, merge_items, EngineConfig};
use stave_tree::{AttributeValue, SerializedTree};
use tracing::debug;

use crate::cli::*;

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    let config = load_config(cli.config.as_deref())?;
    match cli.command {
        Command::Diff(args) => cmd_diff(args, &config, &cli.format),
        Command::Merge(args) => cmd_merge(args, &config, &cli.format),
        Command::Show(args) => cmd_show(args, &cli.format),
        Command::Digest(args) => cmd_digest(args, &config),
    }
}

fn load_config(path: Option<&Path>) -> anyhow::Result<EngineConfig> {
    let Some(path) = path else {
        return Ok(EngineConfig::default());
    };
    let text = fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    let config = EngineConfig::from_toml_str(&text)
        .with_context(|| format!("loading config {}", path.display()))?;
    debug!(path = %path.display(), "loaded engine config");
    Ok(config)
}

fn load_snapshot(path: &Path) -> anyhow::Result<ItemSnapshot> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("reading snapshot {}", path.display()))?;
    ItemSnapshot::from_json(&text).with_context(|| format!("decoding snapshot {}", path.display()))
}

fn cmd_diff(args: DiffArgs, config: &EngineConfig, format: &OutputFormat) -> anyhow::Result<()> {
    let state = load_snapshot(&args.state)?;
    let changes = load_snapshot(&args.changes)?;
    let diff = diff_items(&state, &changes, config)?;

    match format {
        OutputFormat::Json => println!("{}", diff.to_json()?),
        OutputFormat::Text => {
            if diff.is_empty() {
                println!("No changes.");
                return Ok(());
            }
            println!("Diff of {} ({} deltas)", diff.kind().to_string().cyan().bold(), diff.len());
            print_deltas(&diff);
        }
    }
    Ok(())
}

fn cmd_merge(args: MergeArgs, config: &EngineConfig, format: &OutputFormat) -> anyhow::Result<()> {
    let state = load_snapshot(&args.state)?;
    let target = load_snapshot(&args.target)?;
    let merged = merge_items(&state, &target, config)?;
    let digest = merged.digest()?;
    let snapshot = merged.into_snapshot();

    if let Some(output) = &args.output {
        fs::write(output, snapshot.to_json()?)
            .with_context(|| format!("writing {}", output.display()))?;
        println!(
            "{} Merged {} onto {} -> {}",
            "✓".green().bold(),
            args.target.display(),
            args.state.display(),
            output.display().to_string().yellow()
        );
        println!("  Digest: {}", digest.short_hex().dimmed());
        return Ok(());
    }

    match format {
        OutputFormat::Json => println!("{}", snapshot.to_json()?),
        OutputFormat::Text => {
            println!("{} Merged head of {}", "✓".green().bold(), snapshot.kind().to_string().cyan().bold());
            print_deltas(snapshot.deltas());
            println!("  Digest: {}", digest.short_hex().dimmed());
        }
    }
    Ok(())
}

fn cmd_show(args: ShowArgs, format: &OutputFormat) -> anyhow::Result<()> {
    let snapshot = load_snapshot(&args.snapshot)?;
    match format {
        OutputFormat::Json => println!("{}", snapshot.to_json()?),
        OutputFormat::Text => {
            println!(
                "{} {} ({} deltas)",
                "Snapshot".bold(),
                snapshot.kind().to_string().cyan().bold(),
                snapshot.len()
            );
            print_deltas(snapshot.deltas());
        }
    }
    Ok(())
}

fn cmd_digest(args: DigestArgs, config: &EngineConfig) -> anyhow::Result<()> {
    let state = load_snapshot(&args.state)?;
    let target = load_snapshot(&args.target)?;
    let merged: Diff = merge_items(&state, &target, config)?;
    println!("{}", merged.digest()?);
    Ok(())
}

fn print_deltas<'a>(deltas: impl IntoIterator<Item = &'a DeltaDiff>) {
    for delta in deltas {
        println!(
            "  {:<24} {:<28} {}",
            delta.delta_type().to_string().yellow(),
            delta.delta.description().to_string(),
            summarize(&delta.payload).dimmed()
        );
    }
}

fn summarize(payload: &SerializedTree) -> String {
    if payload.is_empty() {
        return "(default)".to_string();
    }
    if payload.num_children() > 0 {
        return format!("{} records", payload.num_children());
    }
    payload
        .attributes()
        .map(|(name, value)| format!("{name}={}", format_value(value)))
        .collect::<Vec<_>>()
        .join(" ")
}

fn format_value(value: &AttributeValue) -> String {
    match value {
        AttributeValue::Bool(b) => b.to_string(),
        AttributeValue::Int(n) => n.to_string(),
        AttributeValue::Float(f) => f.to_string(),
        AttributeValue::Text(s) => format!("{s:?}"),
    }
}
