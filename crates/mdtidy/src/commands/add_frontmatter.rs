//! Frontmatter generation command.

use std::path::PathBuf;

use anyhow::Result;
use mdtidy_corpus::{FrontmatterSynthesis, PassRunner};

/// Run the add-frontmatter command.
pub fn run(dir: PathBuf, dry_run: bool) -> Result<()> {
    tracing::info!("Adding missing frontmatter in {}", dir.display());

    let report = PassRunner::new(dir)
        .dry_run(dry_run)
        .run(&FrontmatterSynthesis)?;

    tracing::debug!("Finished in {}ms", report.duration_ms);

    println!("Checked {} files. Updated {}.", report.scanned, report.updated());

    Ok(())
}
