//! Code fence language report command.

use std::path::PathBuf;

use anyhow::Result;
use mdtidy_corpus::scan_code_langs;

/// Run the code-langs command.
pub fn run(dir: PathBuf) -> Result<()> {
    let report = scan_code_langs(&dir)?;

    for doc in &report.documents {
        for change in &doc.changes {
            match change.line {
                Some(line) => println!(
                    "{}:{}: {} -> {}",
                    doc.path.display(),
                    line,
                    change.from,
                    change.to
                ),
                None => println!("{}: {} -> {}", doc.path.display(), change.from, change.to),
            }
        }
    }

    if !report.unparsed.is_empty() {
        tracing::warn!("{} files could not be parsed", report.unparsed.len());
    }

    println!(
        "Checked {} files. Found {} non-canonical code tags.",
        report.scanned,
        report.total_changes()
    );

    Ok(())
}
