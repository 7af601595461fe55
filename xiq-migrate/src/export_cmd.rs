use anyhow::{Context, Result};

use crate::cli::ExportCsvArgs;
use xiq_migrate::export::export_source;
use xiq_migrate::NormalizedSourceConfig;

pub fn run_export_csv(args: ExportCsvArgs) -> Result<()> {
    let source = NormalizedSourceConfig::load(&args.input)
        .with_context(|| format!("failed to load source {}", args.input.display()))?;
    let written = export_source(&source, &args.dir)?;

    if written.is_empty() {
        println!("nothing to export");
    }
    for path in written {
        println!("{}", path.display());
    }
    Ok(())
}
