use anyhow::{Context, Result};

use crate::cli::{InspectArgs, OutputFormat};
use xiq_migrate::inspect::inspect;
use xiq_migrate::report::render_inventory;
use xiq_migrate::NormalizedSourceConfig;

pub fn run_inspect(args: InspectArgs) -> Result<()> {
    let source = NormalizedSourceConfig::load(&args.input)
        .with_context(|| format!("failed to load source {}", args.input.display()))?;
    let inventory = inspect(&source);

    match args.format {
        OutputFormat::Text => println!("{}", render_inventory(&inventory)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&inventory)?),
    }
    Ok(())
}
