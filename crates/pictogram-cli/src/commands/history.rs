use std::path::Path;

use anyhow::Result;

use super::context::{load_config, open_history};
use super::output::print_json;

pub async fn list(base_dir: Option<&Path>, json: bool) -> Result<()> {
    let config = load_config(base_dir)?;
    let items = open_history(base_dir, &config).await?.list().await;
    if json {
        return print_json(&items);
    }
    if items.is_empty() {
        eprintln!("History is empty");
    }
    for item in &items {
        println!("{}  {}", item.date, item.prompt);
    }
    Ok(())
}

pub async fn clear(base_dir: Option<&Path>) -> Result<()> {
    let config = load_config(base_dir)?;
    open_history(base_dir, &config).await?.clear().await?;
    eprintln!("History cleared");
    Ok(())
}
