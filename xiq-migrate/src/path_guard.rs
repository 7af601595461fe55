use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};

/// Fail if `output` names the same file as any of `inputs`.
pub fn refuse_input_overwrite(output: &Path, inputs: &[&Path]) -> Result<()> {
    let output_key = comparable(output)?;
    for input in inputs {
        if comparable(input)? == output_key {
            bail!(
                "refusing to overwrite input file {} with the conversion output",
                input.display()
            );
        }
    }
    Ok(())
}

/// Absolute form of `path` with symlinks resolved as far as the filesystem allows.
///
/// A file that does not exist yet is resolved through its parent directory.
fn comparable(path: &Path) -> Result<PathBuf> {
    if let Ok(resolved) = path.canonicalize() {
        return Ok(resolved);
    }
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .context("failed to read the current directory")?
            .join(path)
    };
    match (absolute.parent(), absolute.file_name()) {
        (Some(parent), Some(name)) => match parent.canonicalize() {
            Ok(parent) => Ok(parent.join(name)),
            Err(_) => Ok(absolute),
        },
        _ => Ok(absolute),
    }
}
