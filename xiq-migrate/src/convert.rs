//! The `convert` command.
//!
//! Loads the XIQ export, optional controller topology listing and defaults,
//! runs the converter, writes the bundle and reports what was lost on the way.
//! Per-record problems never fail the command unless `--strict` is set; a
//! source file that is not a JSON object does.

use std::path::Path;

use anyhow::{bail, Context, Result};
use edge_schema::{read_topologies, write_file, ExistingTopology, PublishStep};
use serde::Serialize;

use crate::cli::{ConvertArgs, OutputFormat};
use crate::path_guard::refuse_input_overwrite;
use xiq_migrate::conversion_summary::{render, summarize, ConversionSummary};
use xiq_migrate::defaults::{embedded_defaults, load_defaults, ConversionDefaults};
use xiq_migrate::report::{render_publish_plan, render_warnings};
use xiq_migrate::{ConversionWarning, Converter, NormalizedSourceConfig};

#[derive(Debug, Serialize)]
struct ConvertReport<'a> {
    summary: ConversionSummary,
    warnings: &'a [ConversionWarning],
    publish_plan: Vec<PublishStep>,
}

pub fn run_convert(args: ConvertArgs) -> Result<()> {
    if let Some(output) = &args.output {
        let mut inputs: Vec<&Path> = vec![&args.input];
        inputs.extend(args.existing_topologies.as_deref());
        inputs.extend(args.defaults.as_deref());
        refuse_input_overwrite(output, &inputs)?;
    }

    let defaults = resolve_defaults(args.defaults.as_deref())?;
    let source = NormalizedSourceConfig::load(&args.input)
        .with_context(|| format!("failed to load source {}", args.input.display()))?;
    let existing = load_existing(args.existing_topologies.as_deref())?;

    let conversion = Converter::new(defaults).convert(&source, &existing);

    if let Some(output) = &args.output {
        write_file(&conversion.config, output)
            .with_context(|| format!("failed to write bundle {}", output.display()))?;
    }

    let summary = summarize(&conversion);
    let publish_plan = conversion.config.publish_plan();
    match args.format {
        OutputFormat::Text => {
            println!("{}", render(summary));
            if !conversion.warnings.is_empty() {
                println!();
                println!("{}", render_warnings(&conversion.warnings));
            }
            println!();
            println!("{}", render_publish_plan(&publish_plan));
            if let Some(output) = &args.output {
                println!();
                println!("wrote {}", output.display());
            }
        }
        OutputFormat::Json => {
            let report = ConvertReport {
                summary,
                warnings: &conversion.warnings,
                publish_plan,
            };
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }

    let skipped = conversion.skipped_count();
    if args.strict && skipped > 0 {
        bail!("strict mode failed: {skipped} record(s) skipped");
    }
    Ok(())
}

fn resolve_defaults(path: Option<&Path>) -> Result<ConversionDefaults> {
    match path {
        Some(path) => Ok(load_defaults(path)?),
        None => Ok(embedded_defaults()),
    }
}

fn load_existing(path: Option<&Path>) -> Result<Vec<ExistingTopology>> {
    let Some(path) = path else {
        return Ok(Vec::new());
    };
    let existing = read_topologies(path)
        .with_context(|| format!("failed to read existing topologies {}", path.display()))?;
    tracing::debug!(count = existing.len(), "loaded existing topologies");
    Ok(existing)
}
