use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use pictogram_application::{ExportFormat, export_service};

pub async fn run(file: &Path, size: u32, format: ExportFormat, out: Option<PathBuf>) -> Result<()> {
    let svg = tokio::fs::read_to_string(file)
        .await
        .with_context(|| format!("Failed to read {}", file.display()))?;

    let exported = export_service::export(&svg, size, format)?;
    let target = out.unwrap_or_else(|| PathBuf::from(&exported.file_name));
    tokio::fs::write(&target, &exported.bytes)
        .await
        .with_context(|| format!("Failed to write {}", target.display()))?;

    println!("{} ({})", target.display(), exported.mime_type);
    Ok(())
}
