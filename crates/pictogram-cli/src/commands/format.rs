use std::path::Path;

use anyhow::{Context, Result};
use pictogram_core::svg::pretty_print;

pub async fn run(file: &Path) -> Result<()> {
    let svg = tokio::fs::read_to_string(file)
        .await
        .with_context(|| format!("Failed to read {}", file.display()))?;
    println!("{}", pretty_print(&svg)?);
    Ok(())
}
