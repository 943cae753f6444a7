//! Opening frontmatter fence repair command.

use std::path::PathBuf;

use anyhow::Result;
use mdtidy_corpus::{FenceRepair, PassRunner};

/// Run the fix-fences command.
pub fn run(dir: PathBuf, dry_run: bool) -> Result<()> {
    tracing::info!("Repairing frontmatter fences in {}", dir.display());

    let report = PassRunner::new(dir).dry_run(dry_run).run(&FenceRepair)?;

    tracing::debug!("Finished in {}ms", report.duration_ms);

    println!("Scanned {} files. Fixed {}.", report.scanned, report.updated());

    Ok(())
}
